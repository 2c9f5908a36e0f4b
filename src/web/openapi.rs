//! OpenAPI documentation generation using utoipa
//!
//! Handler functions are annotated with `#[utoipa::path]`; schema generation
//! happens at compile time via `#[derive(ToSchema)]`. Swagger UI serves the
//! interactive documentation at `/docs`.

use utoipa::OpenApi;

/// Main OpenAPI specification for the Pokedex Proxy API
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Pokedex Proxy API",
        description = "A caching catalog proxy for PokeAPI. The full catalog is \
            materialized upstream-side in batches, cached with a bounded TTL, and \
            served either whole (`/api/pokemon`) or filtered, sorted and paginated \
            (`/api/pokemon/browse`).",
        license(name = "MIT")
    ),
    paths(
        crate::web::handlers::health::health_check,
        crate::web::handlers::pokemon::get_pokemon,
        crate::web::handlers::pokemon::browse_pokemon,
    ),
    components(schemas(
        crate::models::Pokemon,
        crate::models::EnrichedPokemon,
        crate::pipeline::PageView,
        crate::web::handlers::pokemon::BrowseResponse,
        crate::web::responses::HealthResponse,
    )),
    tags(
        (name = "pokemon", description = "Catalog proxy and browsing"),
        (name = "health", description = "Service health"),
    )
)]
pub struct ApiDoc;
