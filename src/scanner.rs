use indexmap::IndexMap;
use log::debug;
use once_cell::sync::Lazy;
use regex::Regex;

use crate::annotations::{HttpMethod, ParamAnnotation, ParamLocation, RouteAnnotation, RouteRegistration};
use crate::catalog::{DataType, ModelCatalog};
use crate::models::{Operation, Parameter, Response};

/// Matches a `{name}` or `{name:constraint}` placeholder in a path template.
static PLACEHOLDER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([A-Za-z_][A-Za-z0-9_]*)(?::([^}]+))?\}").unwrap());

/// One operation scanned out of a route registration, keyed by its
/// normalized path template and method.
#[derive(Debug, Clone)]
pub struct ScannedOperation {
    pub path: String,
    pub method: HttpMethod,
    pub operation: Operation,
}

/// Strip route constraints from a path template: `/x/{id:guid}` → `/x/{id}`.
pub fn normalize_path(path: &str) -> String {
    PLACEHOLDER_REGEX.replace_all(path, "{$1}").into_owned()
}

/// Placeholder names declared in a path template, in order of appearance.
pub fn path_placeholders(path: &str) -> Vec<String> {
    PLACEHOLDER_REGEX
        .captures_iter(path)
        .map(|captures| captures[1].to_string())
        .collect()
}

/// Convert registered routes into operation descriptors.
///
/// With `annotated_only` set, a route that declared no annotation facts is
/// excluded from the document entirely; otherwise a bare operation is
/// synthesized from the route's method and path. Body and form parameter
/// models that were never explicitly registered are registered on demand.
pub fn scan(
    routes: &[RouteRegistration],
    catalog: &mut ModelCatalog,
    annotated_only: bool,
) -> Vec<ScannedOperation> {
    let mut operations = Vec::new();

    for route in routes {
        if annotated_only && !route.is_annotated() {
            debug!("skipping unannotated route '{}'", route.name);
            continue;
        }
        operations.push(scan_route(route, catalog));
    }

    operations
}

/// Fold one route's ordered facts into an operation.
///
/// Single-valued fields (method/path override, summary, description) take
/// the last declared value; repeatable kinds (tags, consumes, produces,
/// parameters, responses, security) accumulate in declaration order.
fn scan_route(route: &RouteRegistration, catalog: &mut ModelCatalog) -> ScannedOperation {
    let mut method = route.method;
    let mut path = route.path.clone();
    let mut operation = Operation {
        operationId: Some(route.name.clone()),
        ..Default::default()
    };

    for annotation in &route.annotations {
        match annotation {
            RouteAnnotation::Route {
                method: declared_method,
                path: declared_path,
            } => {
                method = *declared_method;
                path = declared_path.clone();
            }
            RouteAnnotation::Summary(text) => operation.summary = Some(text.clone()),
            RouteAnnotation::Description(text) => operation.description = Some(text.clone()),
            RouteAnnotation::Deprecated => operation.deprecated = Some(true),
            RouteAnnotation::Tags(names) => operation.tags.extend(names.iter().cloned()),
            RouteAnnotation::Consumes(media_types) => {
                operation.consumes.extend(media_types.iter().cloned())
            }
            RouteAnnotation::Produces(media_types) => {
                operation.produces.extend(media_types.iter().cloned())
            }
            RouteAnnotation::Security(schemes) => {
                let mut requirement = IndexMap::new();
                for scheme in schemes {
                    requirement.insert(scheme.clone(), Vec::new());
                }
                operation.security.push(requirement);
            }
            RouteAnnotation::Response {
                status,
                description,
                model,
            } => {
                let schema = model.as_ref().map(|data_type| {
                    catalog.ensure_registered(data_type);
                    ModelCatalog::schema_for(data_type)
                });
                operation.responses.insert(
                    status.to_string(),
                    Response {
                        description: description.clone(),
                        schema,
                    },
                );
            }
            RouteAnnotation::Param(param) => {
                operation.parameters.push(scan_param(param, catalog));
            }
        }
    }

    // A valid operation always carries at least one response.
    if operation.responses.is_empty() {
        operation.responses.insert(
            "200".to_string(),
            Response {
                description: "OK".to_string(),
                schema: None,
            },
        );
    }

    debug!(
        "scanned operation '{}' as {} {}",
        route.name,
        method.as_str(),
        path
    );

    ScannedOperation {
        path: normalize_path(&path),
        method,
        operation,
    }
}

/// Resolve one declared parameter to its descriptor.
///
/// Path parameters are always required. Body parameters carry a resolved
/// schema ($ref for models, inline for primitives and arrays); every other
/// location carries `type`/`format` directly.
fn scan_param(param: &ParamAnnotation, catalog: &mut ModelCatalog) -> Parameter {
    catalog.ensure_registered(&param.data_type);

    let required = match param.location {
        ParamLocation::Path => Some(true),
        _ => param.required,
    };

    let mut descriptor = Parameter {
        name: param.name.clone(),
        in_type: param.location.as_str().to_string(),
        description: param.description.clone(),
        required,
        ..Default::default()
    };

    if param.location == ParamLocation::Body {
        descriptor.schema = Some(ModelCatalog::schema_for(&param.data_type));
    } else {
        let (type_, format) = param.data_type.type_and_format();
        descriptor.type_ = Some(type_.to_string());
        descriptor.format = format.map(str::to_string);
        if let DataType::Array(element) = &param.data_type {
            descriptor.items = Some(Box::new(ModelCatalog::schema_for(element)));
        }
        descriptor.default = param.default.clone();
    }

    descriptor
}
