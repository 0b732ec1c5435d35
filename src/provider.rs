use log::{debug, info, warn};
use url::Url;

use crate::annotations::RouteRegistration;
use crate::builder::{self, GlobalMetadata};
use crate::catalog::{ApiModel, ModelCatalog};
use crate::errors::SwaggerError;
use crate::models::{Contact, ExternalDocs, SwaggerDocument, Tag};
use crate::registry::{SecuritySchemeBuilder, SecuritySchemeRegistry, TagCatalog};
use crate::scanner;

/// URI scheme the API is served over.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scheme {
    Http,
    Https,
}

impl Scheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Scheme::Http => "http",
            Scheme::Https => "https",
        }
    }
}

/// Lifecycle state of the provider.
///
/// Configuration is a startup-only phase: the first document request
/// seals the provider and later configuration calls fail loudly instead
/// of silently diverging from what was already served.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ProviderState {
    #[default]
    Uninitialized,
    Configuring,
    Sealed,
}

/// Owns the document-in-progress and all catalogs, and coordinates them
/// to assemble the final document on demand.
///
/// Deliberately an explicitly constructed context object rather than a
/// process-wide global, so it stays testable and resettable; the
/// application's startup routine owns it.
#[derive(Default)]
pub struct SwaggerMetadataProvider {
    state: ProviderState,
    meta: GlobalMetadata,
    annotated_only: bool,
    routes: Vec<RouteRegistration>,
    models: ModelCatalog,
    tags: TagCatalog,
    security: SecuritySchemeRegistry,
    document: Option<SwaggerDocument>,
}

impl SwaggerMetadataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> ProviderState {
        self.state
    }

    pub fn is_sealed(&self) -> bool {
        self.state() == ProviderState::Sealed
    }

    fn configure(&mut self, what: &'static str) -> Result<(), SwaggerError> {
        if self.is_sealed() {
            return Err(SwaggerError::ConfigurationAfterSeal(what));
        }
        self.state = ProviderState::Configuring;
        Ok(())
    }

    /// Set the document's title, version, description and contact.
    /// The last call wins, field by field.
    pub fn set_info(
        &mut self,
        title: &str,
        version: &str,
        description: Option<&str>,
        contact: Option<Contact>,
    ) -> Result<(), SwaggerError> {
        self.configure("set document info")?;
        self.meta.info.title = title.to_string();
        self.meta.info.version = version.to_string();
        self.meta.info.description = description.map(str::to_string);
        self.meta.info.contact = contact;
        Ok(())
    }

    /// Set document-root metadata: external documentation, URI schemes,
    /// host and base path.
    pub fn set_swagger_root(
        &mut self,
        external_docs: Option<ExternalDocs>,
        schemes: &[Scheme],
        host: Option<&str>,
        base_path: Option<&str>,
    ) -> Result<(), SwaggerError> {
        self.configure("set document root metadata")?;
        if let Some(docs) = &external_docs {
            if Url::parse(&docs.url).is_err() {
                warn!("external documentation url is not a valid URL: {}", docs.url);
            }
        }
        self.meta.external_docs = external_docs;
        self.meta.schemes = schemes.iter().map(|s| s.as_str().to_string()).collect();
        self.meta.host = host.map(str::to_string);
        self.meta.base_path = base_path.map(str::to_string);
        Ok(())
    }

    /// Store a factory for the named security scheme; materialized when
    /// the document is assembled.
    pub fn set_security_scheme_builder(
        &mut self,
        builder: Box<dyn SecuritySchemeBuilder>,
        name: &str,
    ) -> Result<(), SwaggerError> {
        self.configure("register a security scheme")?;
        self.security.set_builder(builder, name);
        Ok(())
    }

    /// Register a model for schema generation (idempotent).
    pub fn add_model<T: ApiModel>(&mut self) -> Result<(), SwaggerError> {
        self.configure("register a model")?;
        self.models.add_model::<T>();
        Ok(())
    }

    /// Register a tag; last write wins on the description.
    pub fn add_tag(&mut self, tag: Tag) -> Result<(), SwaggerError> {
        self.configure("register a tag")?;
        self.tags.add_tag(tag);
        Ok(())
    }

    /// Register a route and its declared annotation facts.
    pub fn register_route(&mut self, route: RouteRegistration) -> Result<(), SwaggerError> {
        self.configure("register a route")?;
        debug!(
            "registered route '{}' ({} {})",
            route.name,
            route.method.as_str(),
            route.path
        );
        self.routes.push(route);
        Ok(())
    }

    /// When set, routes without any annotation facts are excluded from
    /// the document instead of getting a bare synthesized operation.
    pub fn show_only_annotated_routes(&mut self, annotated_only: bool) -> Result<(), SwaggerError> {
        self.configure("change route visibility")?;
        self.annotated_only = annotated_only;
        Ok(())
    }

    /// The assembled document.
    ///
    /// The first call seals the provider, scans the registered routes,
    /// builds the document once and caches it; later calls return the
    /// same immutable value. A failed build is not cached: the provider
    /// stays sealed and the same deterministic error is returned again.
    pub fn document(&mut self) -> Result<&SwaggerDocument, SwaggerError> {
        self.state = ProviderState::Sealed;

        let document = match self.document.take() {
            Some(document) => document,
            None => {
                let operations =
                    scanner::scan(&self.routes, &mut self.models, self.annotated_only);
                let document = builder::build(
                    &self.meta,
                    &operations,
                    &self.models,
                    &self.tags,
                    &self.security,
                )?;
                info!(
                    "sealed swagger document '{}' {} ({} paths, {} definitions)",
                    document.info.title,
                    document.info.version,
                    document.paths.len(),
                    document.definitions.len()
                );
                document
            }
        };

        Ok(self.document.insert(document))
    }

    /// Explicitly return to the configuring state and drop the cached
    /// document. Rebuilding is opt-in only; it never happens implicitly.
    pub fn reset(&mut self) {
        self.state = ProviderState::Configuring;
        self.document = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotations::{HttpMethod, RouteAnnotation};
    use crate::registry::BasicSecuritySchemeBuilder;

    #[test]
    fn starts_uninitialized_and_moves_to_configuring() {
        let mut provider = SwaggerMetadataProvider::new();
        assert_eq!(provider.state(), ProviderState::Uninitialized);

        provider.set_info("Service", "v1", None, None).unwrap();
        assert_eq!(provider.state(), ProviderState::Configuring);
    }

    #[test]
    fn first_document_request_seals_the_provider() {
        let mut provider = SwaggerMetadataProvider::new();
        provider.set_info("Service", "v1", None, None).unwrap();
        provider.document().unwrap();

        assert!(provider.is_sealed());
        let err = provider
            .add_tag(Tag {
                name: "Late".to_string(),
                ..Default::default()
            })
            .unwrap_err();
        assert!(matches!(err, SwaggerError::ConfigurationAfterSeal(_)));
    }

    #[test]
    fn every_configuration_call_is_rejected_after_seal() {
        let mut provider = SwaggerMetadataProvider::new();
        provider.document().unwrap();

        assert!(provider.set_info("Service", "v1", None, None).is_err());
        assert!(provider
            .set_swagger_root(None, &[Scheme::Http], None, None)
            .is_err());
        assert!(provider
            .set_security_scheme_builder(Box::new(BasicSecuritySchemeBuilder::new()), "Basic")
            .is_err());
        assert!(provider
            .register_route(RouteRegistration::new(HttpMethod::Get, "/x", "X"))
            .is_err());
        assert!(provider.show_only_annotated_routes(true).is_err());
    }

    #[test]
    fn document_is_built_once_and_cached() {
        let mut provider = SwaggerMetadataProvider::new();
        provider.set_info("Service", "v1", None, None).unwrap();
        provider
            .register_route(
                RouteRegistration::new(HttpMethod::Get, "/service", "GetService")
                    .annotate(RouteAnnotation::summary("Get Service")),
            )
            .unwrap();

        let first = provider.document().unwrap().clone();
        let second = provider.document().unwrap();
        assert_eq!(&first, second);
    }

    #[test]
    fn failed_build_leaves_provider_sealed_and_error_repeats() {
        let mut provider = SwaggerMetadataProvider::new();
        provider
            .register_route(RouteRegistration::new(
                HttpMethod::Get,
                "/customers/{name}",
                "GetCustomer",
            ))
            .unwrap();

        assert!(matches!(
            provider.document(),
            Err(SwaggerError::UndocumentedPathParameter { .. })
        ));
        assert!(provider.is_sealed());
        assert!(matches!(
            provider.document(),
            Err(SwaggerError::UndocumentedPathParameter { .. })
        ));
    }

    #[test]
    fn reset_reopens_configuration_and_drops_the_cache() {
        let mut provider = SwaggerMetadataProvider::new();
        provider.set_info("Service", "v1", None, None).unwrap();
        provider.document().unwrap();

        provider.reset();
        assert_eq!(provider.state(), ProviderState::Configuring);
        provider.set_info("Renamed", "v2", None, None).unwrap();

        let document = provider.document().unwrap();
        assert_eq!(document.info.title, "Renamed");
    }

    #[test]
    fn last_set_info_wins() {
        let mut provider = SwaggerMetadataProvider::new();
        provider
            .set_info("First", "v1", Some("one"), None)
            .unwrap();
        provider
            .set_info("Second", "v2", Some("two"), None)
            .unwrap();

        let document = provider.document().unwrap();
        assert_eq!(document.info.title, "Second");
        assert_eq!(document.info.version, "v2");
        assert_eq!(document.info.description.as_deref(), Some("two"));
    }
}
