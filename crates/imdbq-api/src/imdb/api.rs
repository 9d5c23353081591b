//! `ImdbApi` trait definition.
#![allow(clippy::future_not_send)]

use super::error::Result;
use super::types::{SearchResult, SearchTitleParams, Title};

/// IMDb API trait.
///
/// Abstracts API operations for mock substitution in tests.
/// Uses `trait_variant::make` to generate a `Send`-bound async trait.
#[allow(clippy::module_name_repetitions)]
#[trait_variant::make(ImdbApi: Send)]
pub trait LocalImdbApi {
    /// Looks up a single title by its IMDb identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ImdbError::NotFound`](super::ImdbError::NotFound) on a
    /// non-200 status, or a transport/JSON error.
    async fn look_up_id(&self, imdb_id: &str) -> Result<Title>;

    /// Searches titles by free text.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP request or JSON parsing fails.
    async fn search_for_title(&self, params: &SearchTitleParams) -> Result<Vec<SearchResult>>;
}
