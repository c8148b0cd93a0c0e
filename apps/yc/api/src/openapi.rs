use utoipa::openapi::OpenApi as OpenApiSpec;
use utoipa::{Modify, OpenApi};

/// Search and ingestion handlers declare absolute paths, so their docs are
/// merged rather than nested under a prefix.
struct AbsoluteRoutes;

impl Modify for AbsoluteRoutes {
    fn modify(&self, openapi: &mut OpenApiSpec) {
        openapi.merge(domain_search::ApiDoc::openapi());
        openapi.merge(domain_yc::ApiDoc::openapi());
    }
}

#[derive(OpenApi)]
#[openapi(
    components(
        schemas(axum_helpers::ErrorResponse)
    ),
    info(
        title = "YC Companies API",
        version = "0.1.0",
        description = "Ingests the YC company directory and serves natural-language semantic search over it"
    ),
    nest(
        (path = "/companies", api = domain_companies::ApiDoc)
    ),
    modifiers(&AbsoluteRoutes)
)]
pub struct ApiDoc;
