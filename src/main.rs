use anyhow::Result;
use clap::Parser;
use env_logger::Env;
use log::{debug, info};

use swagger_annotations::annotations::{
    HttpMethod, ParamAnnotation, RouteAnnotation, RouteRegistration,
};
use swagger_annotations::builder::write_document;
use swagger_annotations::catalog::{ApiModel, DataType, ModelSpec, PropertySpec};
use swagger_annotations::models::{Contact, ExternalDocs, Tag};
use swagger_annotations::provider::{Scheme, SwaggerMetadataProvider};
use swagger_annotations::registry::BasicSecuritySchemeBuilder;

/// Generates the sample service's Swagger 2.0 document from its route annotations
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Output directory for generated files
    #[arg(short, long, default_value = "./docs")]
    output: String,

    /// Output types to generate (json,yaml)
    #[arg(long = "ot", default_value = "json,yaml")]
    output_types: String,

    /// Enable verbose output
    #[arg(short, long)]
    verbose: bool,
}

struct ServiceOwner;

impl ApiModel for ServiceOwner {
    fn model_id() -> &'static str {
        "ServiceOwner"
    }

    fn model_spec() -> ModelSpec {
        ModelSpec::new(vec![
            PropertySpec::new("CompanyName", DataType::String),
            PropertySpec::new("CompanyContactEmail", DataType::String),
        ])
    }
}

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

struct ServiceDetails;

impl ApiModel for ServiceDetails {
    fn model_id() -> &'static str {
        "ServiceDetails"
    }

    fn model_spec() -> ModelSpec {
        ModelSpec::new(vec![
            PropertySpec::new("Name", DataType::String),
            PropertySpec::new("Owner", DataType::model::<ServiceOwner>()),
            PropertySpec::new(
                "Customers",
                DataType::array_of(DataType::model::<ServiceCustomer>()),
            ),
        ])
    }
}

struct Widget;

impl ApiModel for Widget {
    fn model_id() -> &'static str {
        "Widget"
    }

    fn model_spec() -> ModelSpec {
        ModelSpec::new(vec![
            PropertySpec::new("Name", DataType::String),
            PropertySpec::new("Price", DataType::Double),
        ])
    }
}

const SERVICE_TAG: &str = "Service Details";
const SERVICE_TAG_DESCRIPTION: &str = "Operations for handling the service";
const WIDGETS_TAG: &str = "Available Widgets";

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logger with appropriate verbosity level
    let env = Env::default().filter_or("RUST_LOG", if cli.verbose { "debug" } else { "info" });
    env_logger::init_from_env(env);

    debug!("Starting swagger-annotations demo...");

    let output_types: Vec<String> = cli
        .output_types
        .split(',')
        .map(|s| s.trim().to_string())
        .collect();

    let mut provider = SwaggerMetadataProvider::new();
    configure_document(&mut provider)?;
    register_service_routes(&mut provider)?;

    let document = provider.document()?;
    debug!("Assembled {} paths", document.paths.len());

    write_document(document, &cli.output, &output_types)?;
    info!("Swagger documentation generated successfully");

    Ok(())
}

/// Application-level document metadata, set once at startup.
fn configure_document(provider: &mut SwaggerMetadataProvider) -> Result<()> {
    provider.set_info(
        "Swagger Example Service",
        "v0",
        Some("Our awesome service"),
        Some(Contact {
            email: Some("exampleEmail@example.com".to_string()),
            ..Default::default()
        }),
    )?;

    provider.set_swagger_root(
        Some(ExternalDocs {
            description: Some("Service documentation".to_string()),
            url: "https://example.com/service/docs".to_string(),
        }),
        &[Scheme::Http],
        Some("localhost:8080"),
        Some("/"),
    )?;

    provider.set_security_scheme_builder(Box::new(BasicSecuritySchemeBuilder::new()), "Basic")?;
    provider.show_only_annotated_routes(true)?;

    Ok(())
}

/// The sample service module: registers its models, tags and annotated
/// routes against the provider, the way any route module would at startup.
fn register_service_routes(provider: &mut SwaggerMetadataProvider) -> Result<()> {
    provider.add_model::<ServiceOwner>()?;
    provider.add_model::<Widget>()?;

    provider.add_tag(Tag {
        name: SERVICE_TAG.to_string(),
        description: Some(SERVICE_TAG_DESCRIPTION.to_string()),
        ..Default::default()
    })?;
    provider.add_tag(Tag {
        name: WIDGETS_TAG.to_string(),
        ..Default::default()
    })?;

    provider.register_route(
        RouteRegistration::new(HttpMethod::Get, "/service/", "ServiceHome")
            .annotate(RouteAnnotation::summary("Get Service Home"))
            .annotate(RouteAnnotation::response(200, "OK"))
            .annotate(RouteAnnotation::tags([SERVICE_TAG])),
    )?;

    provider.register_route(
        RouteRegistration::new(HttpMethod::Get, "/service/details", "GetDetails")
            .annotate(RouteAnnotation::summary("Get Service Details"))
            .annotate(RouteAnnotation::response_with_model(
                200,
                "OK",
                DataType::model::<ServiceDetails>(),
            ))
            .annotate(RouteAnnotation::tags([SERVICE_TAG])),
    )?;

    provider.register_route(
        RouteRegistration::new(HttpMethod::Get, "/service/widgets", "GetWidgets")
            .annotate(RouteAnnotation::summary("Get List of Widgets available"))
            .annotate(RouteAnnotation::response_with_model(
                200,
                "OK",
                DataType::array_of(DataType::model::<Widget>()),
            ))
            .annotate(RouteAnnotation::tags([WIDGETS_TAG])),
    )?;

    provider.register_route(
        RouteRegistration::new(HttpMethod::Get, "/service/customers", "GetCustomers")
            .annotate(RouteAnnotation::summary("Get Service Customers"))
            .annotate(RouteAnnotation::response_with_model(
                200,
                "OK",
                DataType::array_of(DataType::model::<ServiceCustomer>()),
            ))
            .annotate(RouteAnnotation::tags([SERVICE_TAG])),
    )?;

    // Several query parameters massaged into one handler input.
    provider.register_route(
        RouteRegistration::new(HttpMethod::Get, "/service/customerspaged", "GetCustomersPaged")
            .annotate(RouteAnnotation::summary("Get Service Customers"))
            .annotate(RouteAnnotation::response_with_model(
                200,
                "OK",
                DataType::array_of(DataType::model::<ServiceCustomer>()),
            ))
            .annotate(RouteAnnotation::Param(
                ParamAnnotation::query("Skip")
                    .with_type(DataType::Integer)
                    .default_value(0),
            ))
            .annotate(RouteAnnotation::Param(
                ParamAnnotation::query("Take")
                    .with_type(DataType::Integer)
                    .default_value(10),
            ))
            .annotate(RouteAnnotation::tags([SERVICE_TAG])),
    )?;

    provider.register_route(
        RouteRegistration::new(HttpMethod::Get, "/service/customers/{name}", "GetCustomer")
            .annotate(RouteAnnotation::summary("Get Service Customer"))
            .annotate(RouteAnnotation::response_with_model(
                200,
                "OK",
                DataType::model::<ServiceCustomer>(),
            ))
            .annotate(RouteAnnotation::Param(
                ParamAnnotation::path("name").default_value("Jack"),
            ))
            .annotate(RouteAnnotation::tags([SERVICE_TAG])),
    )?;

    provider.register_route(
        RouteRegistration::new(
            HttpMethod::Post,
            "/service/customer/{serviceGuid:guid}",
            "PostNewCustomer",
        )
        .annotate(RouteAnnotation::summary("Post Service Customer"))
        .annotate(RouteAnnotation::response_with_model(
            200,
            "OK",
            DataType::model::<ServiceCustomer>(),
        ))
        .annotate(RouteAnnotation::produces(["application/json"]))
        .annotate(RouteAnnotation::consumes([
            "application/json",
            "application/xml",
        ]))
        .annotate(RouteAnnotation::Param(
            ParamAnnotation::path("serviceGuid")
                .with_type(DataType::Uuid)
                .describe("The GUID that identifies the service"),
        ))
        .annotate(RouteAnnotation::Param(ParamAnnotation::body::<
            ServiceCustomer,
        >()))
        .annotate(RouteAnnotation::tags([SERVICE_TAG]))
        .annotate(RouteAnnotation::security(["Basic"])),
    )?;

    // The declared (method, path) pair on the fact overrides the
    // registration, mirroring handlers that document themselves.
    provider.register_route(
        RouteRegistration::new(
            HttpMethod::Post,
            "/service/customer/{name}/file",
            "PostCustomerReview",
        )
        .annotate(RouteAnnotation::Route {
            method: HttpMethod::Post,
            path: "/service/customer/{name}/file".to_string(),
        })
        .annotate(RouteAnnotation::summary("Post Customer Review"))
        .annotate(RouteAnnotation::response(200, "OK"))
        .annotate(RouteAnnotation::consumes(["multipart/form-data"]))
        .annotate(RouteAnnotation::Param(
            ParamAnnotation::path("name").default_value("Jill"),
        ))
        .annotate(RouteAnnotation::Param(ParamAnnotation::form(
            "file",
            DataType::File,
        )))
        .annotate(RouteAnnotation::tags([SERVICE_TAG]))
        .annotate(RouteAnnotation::security(["Basic"])),
    )?;

    Ok(())
}
