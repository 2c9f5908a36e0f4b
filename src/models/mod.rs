//! Domain models for the Pokedex Proxy
//!
//! Wire types mirror the upstream PokeAPI response shapes; `Pokemon` is the
//! processed, UI-ready record the rest of the application works with.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Upstream list endpoint response: `GET /pokemon?limit=L&offset=O`
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonListResponse {
    pub count: u64,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    pub results: Vec<PokemonRef>,
}

/// Lightweight reference from the list endpoint; `url` carries the numeric id
/// as its last path segment.
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonRef {
    pub name: String,
    pub url: String,
}

/// Upstream detail endpoint response: `GET /pokemon/{idOrName}`
///
/// Only the fields this service consumes are modeled; the upstream record
/// carries far more.
#[derive(Debug, Clone, Deserialize)]
pub struct PokemonDetailResponse {
    pub id: u32,
    pub name: String,
    #[serde(default)]
    pub types: Vec<PokemonTypeSlot>,
    #[serde(default)]
    pub sprites: Sprites,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PokemonTypeSlot {
    pub slot: u8,
    #[serde(rename = "type")]
    pub type_ref: NamedApiResource,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NamedApiResource {
    pub name: String,
    #[serde(default)]
    pub url: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Sprites {
    #[serde(default)]
    pub front_default: Option<String>,
    #[serde(default)]
    pub other: Option<OtherSprites>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct OtherSprites {
    #[serde(default)]
    pub showdown: Option<ShowdownSprites>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ShowdownSprites {
    #[serde(default)]
    pub front_default: Option<String>,
}

/// Processed, UI-ready catalog record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    /// One or two type names, upstream slot order
    pub types: Vec<String>,
    pub image_url: String,
}

impl Pokemon {
    /// Placeholder substituted when a single detail fetch fails
    pub fn placeholder(id: u32, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            types: Vec::new(),
            image_url: String::new(),
        }
    }
}

impl From<PokemonDetailResponse> for Pokemon {
    fn from(detail: PokemonDetailResponse) -> Self {
        // Explicit fallback chain: showdown sprite, else default front
        // sprite, else empty string.
        let image_url = detail
            .sprites
            .other
            .as_ref()
            .and_then(|o| o.showdown.as_ref())
            .and_then(|s| s.front_default.clone())
            .or(detail.sprites.front_default)
            .unwrap_or_default();

        Self {
            id: detail.id,
            name: detail.name,
            types: detail.types.into_iter().map(|t| t.type_ref.name).collect(),
            image_url,
        }
    }
}

/// Catalog record enriched with filter-match information
///
/// `matching_types` and `slots` are populated only while a type filter is
/// active; unfiltered pages serialize as plain `Pokemon` records.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EnrichedPokemon {
    #[serde(flatten)]
    pub pokemon: Pokemon,
    /// Subset of `types` present in the active filter, in filter-set order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub matching_types: Vec<String>,
    /// 1-based position of each matching type within the filter set
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub slots: Vec<usize>,
}

impl From<Pokemon> for EnrichedPokemon {
    fn from(pokemon: Pokemon) -> Self {
        Self {
            pokemon,
            matching_types: Vec::new(),
            slots: Vec::new(),
        }
    }
}
