//! URL utilities for consistent URL handling
//!
//! This module provides utilities for URL manipulation and identifier
//! extraction that are used throughout the application.

use std::sync::LazyLock;

use regex::Regex;

static POKEMON_ID_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/pokemon/(\d+)/").expect("valid pattern"));

/// URL utilities for consistent URL handling
pub struct UrlUtils;

impl UrlUtils {
    /// Extract the numeric id from a reference URL's `/pokemon/<digits>/`
    /// segment.
    ///
    /// Malformed URLs yield 0 — a defined fallback, not a failure.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use pokedex_proxy::utils::url::UrlUtils;
    ///
    /// assert_eq!(UrlUtils::extract_pokemon_id("https://pokeapi.co/api/v2/pokemon/25/"), 25);
    /// assert_eq!(UrlUtils::extract_pokemon_id("https://pokeapi.co/api/v2/berry/1/"), 0);
    /// ```
    pub fn extract_pokemon_id(url: &str) -> u32 {
        POKEMON_ID_RE
            .captures(url)
            .and_then(|caps| caps.get(1))
            .and_then(|m| m.as_str().parse::<u32>().ok())
            .unwrap_or(0)
    }

    /// Join a path onto a base URL without doubling the separator
    pub fn join(base: &str, path: &str) -> String {
        format!("{}/{}", base.trim_end_matches('/'), path.trim_start_matches('/'))
    }
}
