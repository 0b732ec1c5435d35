use indexmap::IndexMap;
use log::debug;

use crate::models::{SecurityScheme, Tag};

/// Registry of tag descriptors usable to group operations.
///
/// Multiple route modules commonly declare the same tag; re-insertion with
/// a differing description overwrites (last write wins) while the tag
/// keeps its first-insertion position in the document.
#[derive(Debug, Default)]
pub struct TagCatalog {
    tags: IndexMap<String, Tag>,
}

impl TagCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_tag(&mut self, tag: Tag) {
        debug!("registered tag '{}'", tag.name);
        self.tags.insert(tag.name.clone(), tag);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    pub fn get(&self, name: &str) -> Option<&Tag> {
        self.tags.get(name)
    }

    /// All tags in first-insertion order.
    pub fn tags(&self) -> Vec<Tag> {
        self.tags.values().cloned().collect()
    }
}

/// Factory that materializes a security scheme descriptor.
///
/// Registering a builder rather than a finished descriptor decouples the
/// wiring (which scheme name a route requires) from the scheme shape.
pub trait SecuritySchemeBuilder {
    fn build(&self) -> SecurityScheme;
}

/// Builder for HTTP basic authentication.
#[derive(Debug, Default)]
pub struct BasicSecuritySchemeBuilder {
    description: Option<String>,
}

impl BasicSecuritySchemeBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

impl SecuritySchemeBuilder for BasicSecuritySchemeBuilder {
    fn build(&self) -> SecurityScheme {
        SecurityScheme {
            type_: "basic".to_string(),
            description: self.description.clone(),
            ..Default::default()
        }
    }
}

/// Where an API key is carried.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiKeyLocation {
    Query,
    Header,
}

impl ApiKeyLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiKeyLocation::Query => "query",
            ApiKeyLocation::Header => "header",
        }
    }
}

/// Builder for API key authentication.
#[derive(Debug)]
pub struct ApiKeySecuritySchemeBuilder {
    parameter_name: String,
    location: ApiKeyLocation,
    description: Option<String>,
}

impl ApiKeySecuritySchemeBuilder {
    pub fn new(parameter_name: impl Into<String>, location: ApiKeyLocation) -> Self {
        Self {
            parameter_name: parameter_name.into(),
            location,
            description: None,
        }
    }

    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

impl SecuritySchemeBuilder for ApiKeySecuritySchemeBuilder {
    fn build(&self) -> SecurityScheme {
        SecurityScheme {
            type_: "apiKey".to_string(),
            description: self.description.clone(),
            name: Some(self.parameter_name.clone()),
            in_type: Some(self.location.as_str().to_string()),
            ..Default::default()
        }
    }
}

/// OAuth2 grant flow, in Swagger 2.0 vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OAuth2Flow {
    Implicit,
    Password,
    Application,
    AccessCode,
}

impl OAuth2Flow {
    pub fn as_str(&self) -> &'static str {
        match self {
            OAuth2Flow::Implicit => "implicit",
            OAuth2Flow::Password => "password",
            OAuth2Flow::Application => "application",
            OAuth2Flow::AccessCode => "accessCode",
        }
    }
}

/// Builder for OAuth2 authentication.
#[derive(Debug)]
pub struct OAuth2SecuritySchemeBuilder {
    flow: OAuth2Flow,
    authorization_url: Option<String>,
    token_url: Option<String>,
    scopes: IndexMap<String, String>,
    description: Option<String>,
}

impl OAuth2SecuritySchemeBuilder {
    pub fn new(flow: OAuth2Flow) -> Self {
        Self {
            flow,
            authorization_url: None,
            token_url: None,
            scopes: IndexMap::new(),
            description: None,
        }
    }

    pub fn authorization_url(mut self, url: impl Into<String>) -> Self {
        self.authorization_url = Some(url.into());
        self
    }

    pub fn token_url(mut self, url: impl Into<String>) -> Self {
        self.token_url = Some(url.into());
        self
    }

    pub fn scope(mut self, name: impl Into<String>, description: impl Into<String>) -> Self {
        self.scopes.insert(name.into(), description.into());
        self
    }

    pub fn describe(mut self, text: impl Into<String>) -> Self {
        self.description = Some(text.into());
        self
    }
}

impl SecuritySchemeBuilder for OAuth2SecuritySchemeBuilder {
    fn build(&self) -> SecurityScheme {
        SecurityScheme {
            type_: "oauth2".to_string(),
            description: self.description.clone(),
            flow: Some(self.flow.as_str().to_string()),
            authorizationUrl: self.authorization_url.clone(),
            tokenUrl: self.token_url.clone(),
            scopes: self.scopes.clone(),
            ..Default::default()
        }
    }
}

/// Registry mapping a scheme name to the builder that materializes its
/// descriptor. Builders are kept as factories and only materialized at
/// document assembly time.
#[derive(Default)]
pub struct SecuritySchemeRegistry {
    builders: IndexMap<String, Box<dyn SecuritySchemeBuilder>>,
}

impl SecuritySchemeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_builder(&mut self, builder: Box<dyn SecuritySchemeBuilder>, name: &str) {
        debug!("registered security scheme builder '{}'", name);
        self.builders.insert(name.to_string(), builder);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.builders.contains_key(name)
    }

    /// Materialize every registered scheme, in registration order.
    pub fn materialize(&self) -> IndexMap<String, SecurityScheme> {
        self.builders
            .iter()
            .map(|(name, builder)| (name.clone(), builder.build()))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn re_adding_a_tag_overwrites_description_and_keeps_order() {
        let mut catalog = TagCatalog::new();
        catalog.add_tag(Tag {
            name: "Service".to_string(),
            description: Some("first".to_string()),
            ..Default::default()
        });
        catalog.add_tag(Tag {
            name: "Widgets".to_string(),
            ..Default::default()
        });
        catalog.add_tag(Tag {
            name: "Service".to_string(),
            description: Some("second".to_string()),
            ..Default::default()
        });

        let tags = catalog.tags();
        assert_eq!(tags.len(), 2);
        assert_eq!(tags[0].name, "Service");
        assert_eq!(tags[0].description.as_deref(), Some("second"));
        assert_eq!(tags[1].name, "Widgets");
    }

    #[test]
    fn basic_builder_materializes_basic_scheme() {
        let mut registry = SecuritySchemeRegistry::new();
        registry.set_builder(Box::new(BasicSecuritySchemeBuilder::new()), "Basic");

        let schemes = registry.materialize();
        assert_eq!(schemes["Basic"].type_, "basic");
    }

    #[test]
    fn api_key_builder_carries_name_and_location() {
        let builder = ApiKeySecuritySchemeBuilder::new("X-Api-Key", ApiKeyLocation::Header);
        let scheme = builder.build();
        assert_eq!(scheme.type_, "apiKey");
        assert_eq!(scheme.name.as_deref(), Some("X-Api-Key"));
        assert_eq!(scheme.in_type.as_deref(), Some("header"));
    }

    #[test]
    fn oauth2_builder_carries_flow_and_scopes() {
        let builder = OAuth2SecuritySchemeBuilder::new(OAuth2Flow::Implicit)
            .authorization_url("https://auth.example.com/authorize")
            .scope("read", "Read access");
        let scheme = builder.build();
        assert_eq!(scheme.type_, "oauth2");
        assert_eq!(scheme.flow.as_deref(), Some("implicit"));
        assert_eq!(
            scheme.authorizationUrl.as_deref(),
            Some("https://auth.example.com/authorize")
        );
        assert_eq!(scheme.scopes["read"], "Read access");
    }

    #[test]
    fn last_builder_wins_for_a_scheme_name() {
        let mut registry = SecuritySchemeRegistry::new();
        registry.set_builder(Box::new(BasicSecuritySchemeBuilder::new()), "Auth");
        registry.set_builder(
            Box::new(ApiKeySecuritySchemeBuilder::new("token", ApiKeyLocation::Query)),
            "Auth",
        );

        let schemes = registry.materialize();
        assert_eq!(schemes.len(), 1);
        assert_eq!(schemes["Auth"].type_, "apiKey");
    }
}
