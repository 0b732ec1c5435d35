use anyhow::{Context, Result};
use indexmap::IndexMap;
use log::{debug, info};
use std::{
    collections::HashSet,
    fs::{self, File},
    io::Write,
    path::Path,
};

use crate::annotations::HttpMethod;
use crate::catalog::ModelCatalog;
use crate::errors::SwaggerError;
use crate::models::{
    ExternalDocs, Info, Operation, PathItem, Schema, SecurityScheme, SwaggerDocument,
};
use crate::registry::{SecuritySchemeRegistry, TagCatalog};
use crate::scanner::{path_placeholders, ScannedOperation};

/// Global document metadata collected during configuration, the
/// non-operation half of the builder's input.
#[derive(Debug, Clone, Default)]
pub struct GlobalMetadata {
    pub info: Info,
    pub host: Option<String>,
    pub base_path: Option<String>,
    pub schemes: Vec<String>,
    pub external_docs: Option<ExternalDocs>,
}

/// Merge global metadata, scanned operations and catalog entries into one
/// immutable document.
///
/// Deterministic for a given input: routes are laid out in registration
/// order and definitions in catalog order, so repeated builds serialize
/// byte-identically. This is also the single validation gate; any
/// dangling reference surfaces here, before the document is ever served.
pub fn build(
    meta: &GlobalMetadata,
    operations: &[ScannedOperation],
    models: &ModelCatalog,
    tags: &TagCatalog,
    security: &SecuritySchemeRegistry,
) -> Result<SwaggerDocument, SwaggerError> {
    let security_definitions = security.materialize();

    let mut seen_ids = HashSet::new();
    let mut paths: IndexMap<String, PathItem> = IndexMap::new();

    for scanned in operations {
        let operation_id = scanned
            .operation
            .operationId
            .clone()
            .unwrap_or_else(|| format!("{} {}", scanned.method.as_str(), scanned.path));
        if !seen_ids.insert(operation_id.clone()) {
            return Err(SwaggerError::DuplicateOperationId(operation_id));
        }

        validate_operation(scanned, &operation_id, models, tags, &security_definitions)?;

        let path_item = paths
            .entry(scanned.path.clone())
            .or_insert_with(PathItem::default);
        let slot = method_slot(path_item, scanned.method);
        if let Some(existing) = slot {
            return Err(SwaggerError::DuplicateOperationId(format!(
                "'{}' and '{}' both document {} {}",
                existing.operationId.as_deref().unwrap_or("?"),
                operation_id,
                scanned.method.as_str(),
                scanned.path
            )));
        }
        *slot = Some(scanned.operation.clone());
    }

    // Definitions registered transitively stay internally consistent, but
    // verify them anyway so the gate catches every dangling reference.
    for (id, schema) in models.definitions() {
        let mut references = HashSet::new();
        collect_references(schema, &mut references);
        for reference in references {
            resolve_reference(&reference, models).map_err(|_| {
                SwaggerError::IncompleteDocument(format!(
                    "definition '{}' references unknown schema '{}'",
                    id, reference
                ))
            })?;
        }
    }

    debug!(
        "assembled document with {} paths and {} definitions",
        paths.len(),
        models.definitions().len()
    );

    Ok(SwaggerDocument {
        swagger: "2.0".to_string(),
        info: meta.info.clone(),
        host: meta.host.clone(),
        basePath: meta.base_path.clone(),
        schemes: meta.schemes.clone(),
        consumes: Vec::new(),
        produces: Vec::new(),
        tags: tags.tags(),
        paths,
        definitions: models.definitions().clone(),
        securityDefinitions: security_definitions,
        security: Vec::new(),
        externalDocs: meta.external_docs.clone(),
    })
}

fn method_slot(path_item: &mut PathItem, method: HttpMethod) -> &mut Option<Operation> {
    match method {
        HttpMethod::Get => &mut path_item.get,
        HttpMethod::Post => &mut path_item.post,
        HttpMethod::Put => &mut path_item.put,
        HttpMethod::Delete => &mut path_item.delete,
        HttpMethod::Options => &mut path_item.options,
        HttpMethod::Head => &mut path_item.head,
        HttpMethod::Patch => &mut path_item.patch,
    }
}

fn validate_operation(
    scanned: &ScannedOperation,
    operation_id: &str,
    models: &ModelCatalog,
    tags: &TagCatalog,
    security_definitions: &IndexMap<String, SecurityScheme>,
) -> Result<(), SwaggerError> {
    let operation = &scanned.operation;

    // Every placeholder in the template needs a declared path parameter.
    for placeholder in path_placeholders(&scanned.path) {
        let documented = operation
            .parameters
            .iter()
            .any(|param| param.in_type == "path" && param.name == placeholder);
        if !documented {
            return Err(SwaggerError::UndocumentedPathParameter {
                operation: operation_id.to_string(),
                path: scanned.path.clone(),
                placeholder,
            });
        }
    }

    for requirement in &operation.security {
        for scheme in requirement.keys() {
            if !security_definitions.contains_key(scheme) {
                return Err(SwaggerError::UnknownSecurityScheme {
                    operation: operation_id.to_string(),
                    scheme: scheme.clone(),
                });
            }
        }
    }

    for tag in &operation.tags {
        if !tags.contains(tag) {
            return Err(SwaggerError::IncompleteDocument(format!(
                "operation '{}' references unregistered tag '{}'",
                operation_id, tag
            )));
        }
    }

    let mut references = HashSet::new();
    for param in &operation.parameters {
        if let Some(schema) = &param.schema {
            collect_references(schema, &mut references);
        }
        if let Some(items) = &param.items {
            collect_references(items, &mut references);
        }
    }
    for response in operation.responses.values() {
        if let Some(schema) = &response.schema {
            collect_references(schema, &mut references);
        }
    }
    for reference in references {
        resolve_reference(&reference, models)?;
    }

    Ok(())
}

/// Collect every `$ref` reachable from a schema.
fn collect_references(schema: &Schema, references: &mut HashSet<String>) {
    if let Some(ref_) = &schema.ref_ {
        references.insert(ref_.clone());
    }
    if let Some(items) = &schema.items {
        collect_references(items, references);
    }
    for property in schema.properties.values() {
        collect_references(property, references);
    }
}

fn resolve_reference(reference: &str, models: &ModelCatalog) -> Result<(), SwaggerError> {
    let id = reference
        .strip_prefix("#/definitions/")
        .unwrap_or(reference);
    models.resolve(id).map(|_| ())
}

/// Write the document to disk in the requested output formats.
pub fn write_document(
    document: &SwaggerDocument,
    output_dir: impl AsRef<Path>,
    output_types: &[String],
) -> Result<()> {
    let output_dir = output_dir.as_ref();

    fs::create_dir_all(output_dir)
        .context(format!("Failed to create output directory: {:?}", output_dir))?;

    for output_type in output_types {
        match output_type.as_str() {
            "json" => write_json(output_dir, document)?,
            "yaml" => write_yaml(output_dir, document)?,
            _ => debug!("Unknown output type: {}", output_type),
        }
    }

    Ok(())
}

fn write_json(output_dir: &Path, document: &SwaggerDocument) -> Result<()> {
    let json = serde_json::to_string_pretty(document)
        .context("Failed to serialize swagger document to JSON")?;

    let file_path = output_dir.join("swagger.json");
    let mut file =
        File::create(&file_path).context(format!("Failed to create file: {:?}", file_path))?;
    file.write_all(json.as_bytes())
        .context(format!("Failed to write to file: {:?}", file_path))?;

    info!("Generated file: {:?}", file_path);
    Ok(())
}

fn write_yaml(output_dir: &Path, document: &SwaggerDocument) -> Result<()> {
    let yaml = serde_yaml::to_string(document)
        .context("Failed to serialize swagger document to YAML")?;

    let file_path = output_dir.join("swagger.yaml");
    let mut file =
        File::create(&file_path).context(format!("Failed to create file: {:?}", file_path))?;
    file.write_all(yaml.as_bytes())
        .context(format!("Failed to write to file: {:?}", file_path))?;

    info!("Generated file: {:?}", file_path);
    Ok(())
}
