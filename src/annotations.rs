use serde_json::Value;

use crate::catalog::{ApiModel, DataType, ModelRef};

/// HTTP methods the document can describe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
    Options,
    Head,
    Patch,
}

impl HttpMethod {
    /// Lower-case name, as used for path item slots.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "get",
            HttpMethod::Post => "post",
            HttpMethod::Put => "put",
            HttpMethod::Delete => "delete",
            HttpMethod::Options => "options",
            HttpMethod::Head => "head",
            HttpMethod::Patch => "patch",
        }
    }
}

/// Where a parameter is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamLocation {
    Path,
    Query,
    Header,
    Body,
    Form,
}

impl ParamLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParamLocation::Path => "path",
            ParamLocation::Query => "query",
            ParamLocation::Header => "header",
            ParamLocation::Body => "body",
            ParamLocation::Form => "formData",
        }
    }
}

/// Declarative description of one operation parameter.
#[derive(Debug, Clone)]
pub struct ParamAnnotation {
    pub location: ParamLocation,
    pub name: String,
    pub data_type: DataType,
    pub default: Option<Value>,
    pub description: Option<String>,
    pub required: Option<bool>,
}

impl ParamAnnotation {
    pub fn new(location: ParamLocation, name: impl Into<String>) -> Self {
        Self {
            location,
            name: name.into(),
            data_type: DataType::String,
            default: None,
            description: None,
            required: None,
        }
    }

    /// Path parameter; always required regardless of any `required` call.
    pub fn path(name: impl Into<String>) -> Self {
        Self::new(ParamLocation::Path, name)
    }

    pub fn query(name: impl Into<String>) -> Self {
        Self::new(ParamLocation::Query, name)
    }

    pub fn header(name: impl Into<String>) -> Self {
        Self::new(ParamLocation::Header, name)
    }

    /// Body parameter carrying the given model; named `body` by convention.
    pub fn body<T: ApiModel>() -> Self {
        Self::new(ParamLocation::Body, "body").with_type(DataType::Model(ModelRef::of::<T>()))
    }

    pub fn form(name: impl Into<String>, data_type: DataType) -> Self {
        Self::new(ParamLocation::Form, name).with_type(data_type)
    }

    pub fn with_type(mut self, data_type: DataType) -> Self {
        self.data_type = data_type;
        self
    }

    pub fn default_value(mut self, value: impl Into<Value>) -> Self {
        self.default = Some(value.into());
        self
    }

    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }

    pub fn required(mut self, required: bool) -> Self {
        self.required = Some(required);
        self
    }
}

/// One declared annotation fact attached to a route registration.
///
/// Facts are consumed in declaration order: single-valued kinds (route
/// override, summary, description) take the last declared value, while
/// repeatable kinds accumulate.
#[derive(Debug, Clone)]
pub enum RouteAnnotation {
    /// Explicit (method, path) override; when absent the operation
    /// inherits the pair from the underlying route registration.
    Route { method: HttpMethod, path: String },
    Summary(String),
    Description(String),
    Response {
        status: u16,
        description: String,
        model: Option<DataType>,
    },
    Tags(Vec<String>),
    Consumes(Vec<String>),
    Produces(Vec<String>),
    Param(ParamAnnotation),
    /// Security requirement naming one or more registered scheme names.
    Security(Vec<String>),
    Deprecated,
}

impl RouteAnnotation {
    pub fn summary(text: impl Into<String>) -> Self {
        RouteAnnotation::Summary(text.into())
    }

    pub fn response(status: u16, description: impl Into<String>) -> Self {
        RouteAnnotation::Response {
            status,
            description: description.into(),
            model: None,
        }
    }

    pub fn response_with_model(
        status: u16,
        description: impl Into<String>,
        model: DataType,
    ) -> Self {
        RouteAnnotation::Response {
            status,
            description: description.into(),
            model: Some(model),
        }
    }

    pub fn tags<S: Into<String>>(names: impl IntoIterator<Item = S>) -> Self {
        RouteAnnotation::Tags(names.into_iter().map(Into::into).collect())
    }

    pub fn consumes<S: Into<String>>(media_types: impl IntoIterator<Item = S>) -> Self {
        RouteAnnotation::Consumes(media_types.into_iter().map(Into::into).collect())
    }

    pub fn produces<S: Into<String>>(media_types: impl IntoIterator<Item = S>) -> Self {
        RouteAnnotation::Produces(media_types.into_iter().map(Into::into).collect())
    }

    pub fn security<S: Into<String>>(schemes: impl IntoIterator<Item = S>) -> Self {
        RouteAnnotation::Security(schemes.into_iter().map(Into::into).collect())
    }
}

/// One registered route plus the ordered annotation facts declared for it.
///
/// The route name doubles as the operation id and must be unique across
/// the document.
#[derive(Debug, Clone)]
pub struct RouteRegistration {
    pub name: String,
    pub method: HttpMethod,
    pub path: String,
    pub annotations: Vec<RouteAnnotation>,
}

impl RouteRegistration {
    pub fn new(method: HttpMethod, path: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            method,
            path: path.into(),
            annotations: Vec::new(),
        }
    }

    pub fn annotate(mut self, annotation: RouteAnnotation) -> Self {
        self.annotations.push(annotation);
        self
    }

    pub fn is_annotated(&self) -> bool {
        !self.annotations.is_empty()
    }
}
