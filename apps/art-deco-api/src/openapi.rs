//! OpenAPI documentation configuration

use utoipa::OpenApi;

/// Combined OpenAPI documentation for all APIs
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Art Deco API",
        version = "0.1.0",
        description = "Item catalogue with vector similarity search on Redis",
        license(name = "MIT")
    ),
    servers(
        (url = "http://localhost:8080", description = "Local development server")
    ),
    nest(
        (path = "/items", api = domain_items::ApiDoc)
    ),
    tags(
        (name = "Items", description = "Item storage and vector similarity search (Redis)")
    )
)]
pub struct ApiDoc;
