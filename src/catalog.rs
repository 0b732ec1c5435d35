use indexmap::IndexMap;
use log::debug;
use std::collections::HashSet;

use crate::errors::SwaggerError;
use crate::models::Schema;

/// A type that can describe its own shape for schema generation.
///
/// There is no reflection here: each model states its identifier and its
/// structural members explicitly, and nested composite members carry a
/// registration hook so the catalog can discover them transitively.
pub trait ApiModel {
    /// Unique type identifier, used as the definition key and in `$ref`s.
    fn model_id() -> &'static str;

    /// Structural description of the type's members.
    fn model_spec() -> ModelSpec;
}

/// Structural description of one registrable model.
#[derive(Debug, Clone)]
pub struct ModelSpec {
    pub description: Option<String>,
    pub properties: Vec<PropertySpec>,
}

impl ModelSpec {
    pub fn new(properties: Vec<PropertySpec>) -> Self {
        Self {
            description: None,
            properties,
        }
    }

    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

/// One structural member of a model.
#[derive(Debug, Clone)]
pub struct PropertySpec {
    pub name: &'static str,
    pub data_type: DataType,
    pub required: bool,
    pub description: Option<String>,
}

impl PropertySpec {
    pub fn new(name: &'static str, data_type: DataType) -> Self {
        Self {
            name,
            data_type,
            required: false,
            description: None,
        }
    }

    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

/// The data types a parameter or property can take.
///
/// Composite types go through [`ModelRef`] so the referenced model can be
/// registered on demand; collections wrap their element type and never
/// become named definitions of their own.
#[derive(Debug, Clone)]
pub enum DataType {
    String,
    Integer,
    Long,
    Float,
    Double,
    Boolean,
    Date,
    DateTime,
    Uuid,
    File,
    Model(ModelRef),
    Array(Box<DataType>),
}

impl DataType {
    /// Shorthand for an array of the given element type.
    pub fn array_of(element: DataType) -> Self {
        DataType::Array(Box::new(element))
    }

    /// Shorthand for a reference to a registrable model.
    pub fn model<T: ApiModel>() -> Self {
        DataType::Model(ModelRef::of::<T>())
    }

    /// Swagger 2.0 `type`/`format` pair for this data type.
    pub fn type_and_format(&self) -> (&'static str, Option<&'static str>) {
        match self {
            DataType::String => ("string", None),
            DataType::Integer => ("integer", Some("int32")),
            DataType::Long => ("integer", Some("int64")),
            DataType::Float => ("number", Some("float")),
            DataType::Double => ("number", Some("double")),
            DataType::Boolean => ("boolean", None),
            DataType::Date => ("string", Some("date")),
            DataType::DateTime => ("string", Some("date-time")),
            DataType::Uuid => ("string", Some("uuid")),
            DataType::File => ("file", None),
            DataType::Model(_) => ("object", None),
            DataType::Array(_) => ("array", None),
        }
    }
}

/// Reference to a registrable model: its identifier plus a hook that
/// registers the model (and, transitively, its own references) into a
/// catalog. The hook is what lets recursive type graphs resolve without
/// the catalog knowing any concrete type.
#[derive(Debug, Clone, Copy)]
pub struct ModelRef {
    pub id: &'static str,
    registrar: fn(&mut ModelCatalog),
}

impl ModelRef {
    pub fn of<T: ApiModel>() -> Self {
        Self {
            id: T::model_id(),
            registrar: |catalog| catalog.add_model::<T>(),
        }
    }

    pub(crate) fn register(&self, catalog: &mut ModelCatalog) {
        (self.registrar)(catalog)
    }
}

/// Registry mapping a type identifier to its generated schema definition.
#[derive(Debug, Default)]
pub struct ModelCatalog {
    definitions: IndexMap<String, Schema>,
    in_progress: HashSet<&'static str>,
}

impl ModelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model for schema generation.
    ///
    /// Re-registering an already known identifier is a no-op. Referenced
    /// composite members are registered depth-first before the model
    /// itself is marked resolved, so emitted `$ref`s never dangle; a type
    /// currently being registered is skipped on re-entry, which breaks
    /// self-referential cycles and leaves the recursive edge as a `$ref`.
    pub fn add_model<T: ApiModel>(&mut self) {
        let id = T::model_id();
        if self.definitions.contains_key(id) || self.in_progress.contains(id) {
            return;
        }
        self.in_progress.insert(id);

        let spec = T::model_spec();
        for property in &spec.properties {
            self.ensure_registered(&property.data_type);
        }

        let schema = Self::object_schema(&spec);
        self.in_progress.remove(id);
        self.definitions.insert(id.to_string(), schema);
        debug!("registered model '{}'", id);
    }

    /// Register whatever models a data type refers to, walking through
    /// array wrappers.
    pub(crate) fn ensure_registered(&mut self, data_type: &DataType) {
        match data_type {
            DataType::Model(model) => model.register(self),
            DataType::Array(element) => self.ensure_registered(element),
            _ => {}
        }
    }

    /// Look up the schema definition for a registered type identifier.
    pub fn resolve(&self, id: &str) -> Result<&Schema, SwaggerError> {
        self.definitions
            .get(id)
            .ok_or_else(|| SwaggerError::UnknownModel(id.to_string()))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.definitions.contains_key(id)
    }

    /// All registered definitions, in registration order.
    pub fn definitions(&self) -> &IndexMap<String, Schema> {
        &self.definitions
    }

    /// Inline schema for a data type as it appears inside an operation:
    /// models become `$ref`s, arrays wrap their element schema, and
    /// primitives carry `type`/`format` directly.
    pub fn schema_for(data_type: &DataType) -> Schema {
        match data_type {
            DataType::Model(model) => Schema::reference(model.id),
            DataType::Array(element) => Schema {
                type_: Some("array".to_string()),
                items: Some(Box::new(Self::schema_for(element))),
                ..Default::default()
            },
            primitive => {
                let (type_, format) = primitive.type_and_format();
                Schema {
                    type_: Some(type_.to_string()),
                    format: format.map(str::to_string),
                    ..Default::default()
                }
            }
        }
    }

    fn object_schema(spec: &ModelSpec) -> Schema {
        let mut properties = IndexMap::new();
        let mut required = Vec::new();

        for property in &spec.properties {
            let mut schema = Self::schema_for(&property.data_type);
            schema.description = property.description.clone();
            properties.insert(property.name.to_string(), Box::new(schema));
            if property.required {
                required.push(property.name.to_string());
            }
        }

        Schema {
            type_: Some("object".to_string()),
            description: spec.description.clone(),
            properties,
            required: if required.is_empty() {
                None
            } else {
                Some(required)
            },
            ..Default::default()
        }
    }
}
