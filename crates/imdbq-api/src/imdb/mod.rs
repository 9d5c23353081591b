//! IMDb API client module.
//!
//! Handles HTTP requests to the IMDb title lookup and search endpoints
//! and maps their JSON bodies into titles and search results.

mod api;
mod cache;
mod client;
mod error;
mod types;
mod user_agent;
mod util;

#[allow(clippy::module_name_repetitions)]
pub use api::{ImdbApi, LocalImdbApi};
pub use cache::{MemoryCache, ResponseCache};
#[allow(clippy::module_name_repetitions)]
pub use client::{DEFAULT_LOCALE, ImdbClient, ImdbClientBuilder};
#[allow(clippy::module_name_repetitions)]
pub use error::{ImdbError, Result};
pub use types::{SearchResult, SearchTitleParams, Title, TitleCategory, UnknownCategory};
pub use user_agent::{USER_AGENTS, pick_user_agent};
pub use util::extract_release_year;
