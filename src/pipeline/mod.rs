//! Filter/sort/paginate pipeline over the in-memory catalog
//!
//! A synchronous transformation: given the full catalog and the set of
//! selected type names (insertion order = selection order), produce the
//! ordered, paged subset to display. The filtering rule is asymmetric on
//! purpose — one selected type matches any entity carrying it, while two or
//! more selected types match only dual-typed entities fully covered by the
//! selection.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{EnrichedPokemon, Pokemon};

pub mod view_state;

pub use view_state::ViewState;

/// Fixed number of items per page
pub const PAGE_SIZE: usize = 24;

/// One page of the filtered, sorted catalog
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct PageView {
    pub items: Vec<EnrichedPokemon>,
    /// Number of entities passing the filter, across all pages
    pub total_count: usize,
    /// `ceil(total_count / 24)`; 0 when nothing matches
    pub total_pages: usize,
    /// Effective 0-based page; reset to 0 when the filter matches nothing
    pub page: usize,
}

/// Apply the filter, enrichment, sort and pagination contract to the catalog.
///
/// An out-of-range `page` yields an empty item list, not an error. A filter
/// matching nothing yields `total_pages = 0` and resets the reported page
/// to 0.
pub fn apply(catalog: &[Pokemon], selected: &[String], page: usize) -> PageView {
    if selected.is_empty() {
        // No filtering, upstream order preserved.
        let total_count = catalog.len();
        let total_pages = total_count.div_ceil(PAGE_SIZE);
        let items = page_slice(catalog, page)
            .iter()
            .cloned()
            .map(EnrichedPokemon::from)
            .collect();
        return PageView {
            items,
            total_count,
            total_pages,
            page,
        };
    }

    let mut matched: Vec<EnrichedPokemon> = catalog
        .iter()
        .filter(|p| passes_filter(p, selected))
        .cloned()
        .map(|p| enrich(p, selected))
        .collect();

    if matched.is_empty() {
        return PageView {
            items: Vec::new(),
            total_count: 0,
            total_pages: 0,
            page: 0,
        };
    }

    sort_matched(&mut matched, selected);

    let total_count = matched.len();
    let total_pages = total_count.div_ceil(PAGE_SIZE);
    let items = page_slice(&matched, page).to_vec();

    PageView {
        items,
        total_count,
        total_pages,
        page,
    }
}

/// Filtering rule.
///
/// - one selected type: any of the entity's types may match;
/// - two or more: the entity must carry exactly 2 types and every one of
///   them must be selected. Single-typed entities are excluded here.
fn passes_filter(pokemon: &Pokemon, selected: &[String]) -> bool {
    if selected.len() == 1 {
        return pokemon.types.iter().any(|t| selected.contains(t));
    }
    pokemon.types.len() == 2 && pokemon.types.iter().all(|t| selected.contains(t))
}

/// Compute `matching_types` (filter-set order) and `slots` (1-based
/// filter-set positions) for an entity that passed the filter.
fn enrich(pokemon: Pokemon, selected: &[String]) -> EnrichedPokemon {
    let mut matching_types: Vec<String> = pokemon
        .types
        .iter()
        .filter(|t| selected.contains(t))
        .cloned()
        .collect();
    matching_types.sort_by_key(|t| filter_index(selected, t));

    let slots = matching_types
        .iter()
        .map(|t| filter_index(selected, t) + 1)
        .collect();

    EnrichedPokemon {
        pokemon,
        matching_types,
        slots,
    }
}

/// Sort order of the filtered result: single selection sorts by id alone;
/// multiple selections sort by the filter-set index of the first matching
/// type, ties broken by id.
fn sort_matched(matched: &mut [EnrichedPokemon], selected: &[String]) {
    if selected.len() == 1 {
        matched.sort_by_key(|e| e.pokemon.id);
        return;
    }
    matched.sort_by(|a, b| {
        let a_idx = a.matching_types.first().map(|t| filter_index(selected, t));
        let b_idx = b.matching_types.first().map(|t| filter_index(selected, t));
        a_idx.cmp(&b_idx).then(a.pokemon.id.cmp(&b.pokemon.id))
    });
}

fn filter_index(selected: &[String], type_name: &str) -> usize {
    selected
        .iter()
        .position(|s| s == type_name)
        .unwrap_or(selected.len())
}

fn page_slice<T>(items: &[T], page: usize) -> &[T] {
    let start = page.saturating_mul(PAGE_SIZE).min(items.len());
    let end = start.saturating_add(PAGE_SIZE).min(items.len());
    &items[start..end]
}
