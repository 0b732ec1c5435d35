use thiserror::Error;

/// Errors raised while configuring the provider or assembling the document.
///
/// All of these are deterministic misconfigurations: they surface on the
/// first document build (or on the offending configuration call) and
/// retrying without a code change cannot succeed.
#[derive(Error, Debug)]
pub enum SwaggerError {
    #[error("unknown model: no schema registered for type '{0}'")]
    UnknownModel(String),

    #[error("unknown security scheme: operation '{operation}' requires scheme '{scheme}' which is not registered")]
    UnknownSecurityScheme { operation: String, scheme: String },

    #[error("undocumented path parameter: '{path}' declares placeholder '{placeholder}' but operation '{operation}' has no matching path parameter")]
    UndocumentedPathParameter {
        operation: String,
        path: String,
        placeholder: String,
    },

    #[error("incomplete document: {0}")]
    IncompleteDocument(String),

    #[error("configuration after seal: cannot {0} once the document has been served")]
    ConfigurationAfterSeal(&'static str),

    #[error("duplicate operation id: {0}")]
    DuplicateOperationId(String),
}
