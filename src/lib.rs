pub mod annotations;
pub mod builder;
pub mod catalog;
pub mod errors;
pub mod models;
pub mod provider;
pub mod registry;
pub mod scanner;

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use crate::annotations::{HttpMethod, ParamAnnotation, RouteAnnotation, RouteRegistration};
    use crate::catalog::{ApiModel, DataType, ModelSpec, PropertySpec};
    use crate::errors::SwaggerError;
    use crate::models::Tag;
    use crate::provider::{Scheme, SwaggerMetadataProvider};
    use crate::registry::BasicSecuritySchemeBuilder;

    struct ServiceCustomer;

    impl ApiModel for ServiceCustomer {
        fn model_id() -> &'static str {
            "ServiceCustomer"
        }

        fn model_spec() -> ModelSpec {
            ModelSpec::new(vec![
                PropertySpec::new("CustomerName", DataType::String),
                PropertySpec::new("CustomerEmail", DataType::String),
            ])
        }
    }

    fn service_provider() -> SwaggerMetadataProvider {
        let mut provider = SwaggerMetadataProvider::new();
        provider
            .set_info(
                "Swagger Example Service",
                "v0",
                Some("Our awesome service"),
                None,
            )
            .unwrap();
        provider
            .set_swagger_root(None, &[Scheme::Http], None, Some("/"))
            .unwrap();
        provider
            .add_tag(Tag {
                name: "Service Details".to_string(),
                description: Some("Operations for handling the service".to_string()),
                ..Default::default()
            })
            .unwrap();
        provider.add_model::<ServiceCustomer>().unwrap();
        provider
            .register_route(
                RouteRegistration::new(
                    HttpMethod::Get,
                    "/service/customers/{name}",
                    "GetCustomer",
                )
                .annotate(RouteAnnotation::summary("Get Service Customer"))
                .annotate(RouteAnnotation::response_with_model(
                    200,
                    "OK",
                    DataType::model::<ServiceCustomer>(),
                ))
                .annotate(RouteAnnotation::Param(
                    ParamAnnotation::path("name").default_value("Jack"),
                ))
                .annotate(RouteAnnotation::tags(["Service Details"])),
            )
            .unwrap();
        provider
    }

    #[test]
    fn end_to_end_service_customer_document() {
        let mut provider = service_provider();
        let document = provider.document().unwrap();

        assert_eq!(document.swagger, "2.0");
        assert_eq!(document.info.title, "Swagger Example Service");
        assert_eq!(document.schemes, ["http"]);

        let operation = document.paths["/service/customers/{name}"]
            .get
            .as_ref()
            .unwrap();
        assert_eq!(operation.operationId.as_deref(), Some("GetCustomer"));
        assert_eq!(operation.summary.as_deref(), Some("Get Service Customer"));
        assert_eq!(operation.tags, ["Service Details"]);

        assert_eq!(operation.responses.len(), 1);
        let ok = &operation.responses["200"];
        assert_eq!(
            ok.schema.as_ref().unwrap().ref_.as_deref(),
            Some("#/definitions/ServiceCustomer")
        );

        assert_eq!(operation.parameters.len(), 1);
        let name = &operation.parameters[0];
        assert_eq!(name.name, "name");
        assert_eq!(name.in_type, "path");
        assert_eq!(name.required, Some(true));
        assert_eq!(name.default, Some(serde_json::json!("Jack")));

        let customer = &document.definitions["ServiceCustomer"];
        assert_eq!(customer.type_.as_deref(), Some("object"));
        assert_eq!(
            customer.properties["CustomerName"].type_.as_deref(),
            Some("string")
        );
        assert_eq!(
            customer.properties["CustomerEmail"].type_.as_deref(),
            Some("string")
        );

        assert_eq!(document.tags.len(), 1);
        assert_eq!(document.tags[0].name, "Service Details");
    }

    #[test]
    fn building_twice_from_the_same_state_is_byte_identical() {
        let mut first = service_provider();
        let mut second = service_provider();

        let first_json = serde_json::to_string(first.document().unwrap()).unwrap();
        let second_json = serde_json::to_string(second.document().unwrap()).unwrap();
        assert_eq!(first_json, second_json);

        // and the sealed provider keeps serving the identical snapshot
        let again = serde_json::to_string(first.document().unwrap()).unwrap();
        assert_eq!(first_json, again);
    }

    #[test]
    fn security_requirement_needs_a_registered_scheme() {
        let mut provider = service_provider();
        provider
            .register_route(
                RouteRegistration::new(HttpMethod::Post, "/service/customers", "PostCustomer")
                    .annotate(RouteAnnotation::security(["Basic"])),
            )
            .unwrap();

        assert!(matches!(
            provider.document(),
            Err(SwaggerError::UnknownSecurityScheme { scheme, .. }) if scheme == "Basic"
        ));

        let mut provider = service_provider();
        provider
            .set_security_scheme_builder(Box::new(BasicSecuritySchemeBuilder::new()), "Basic")
            .unwrap();
        provider
            .register_route(
                RouteRegistration::new(HttpMethod::Post, "/service/customers", "PostCustomer")
                    .annotate(RouteAnnotation::security(["Basic"])),
            )
            .unwrap();

        let document = provider.document().unwrap();
        assert_eq!(document.securityDefinitions["Basic"].type_, "basic");
        let operation = document.paths["/service/customers"].post.as_ref().unwrap();
        assert_eq!(operation.security[0]["Basic"], Vec::<String>::new());
    }

    #[test]
    fn serialized_shape_matches_swagger_2_0() {
        let mut provider = service_provider();
        let value = serde_json::to_value(provider.document().unwrap()).unwrap();

        assert_eq!(value["swagger"], "2.0");
        assert_eq!(value["basePath"], "/");
        assert_eq!(
            value["paths"]["/service/customers/{name}"]["get"]["responses"]["200"]["schema"]
                ["$ref"],
            "#/definitions/ServiceCustomer"
        );
        assert_eq!(
            value["definitions"]["ServiceCustomer"]["properties"]["CustomerName"]["type"],
            "string"
        );
        // internal field names never leak into the wire shape
        assert!(value["paths"]["/service/customers/{name}"]["get"]["parameters"][0]
            .get("in")
            .is_some());
        assert!(value["paths"]["/service/customers/{name}"]["get"]["parameters"][0]
            .get("in_type")
            .is_none());
    }
}
