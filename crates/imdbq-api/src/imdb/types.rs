//! IMDb response types, result records and search parameters.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::util::extract_release_year;

// --- Categories ---

/// Match-quality tier returned by the search endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TitleCategory {
    /// Popular titles matching the query.
    TitlePopular,
    /// Exact title matches.
    TitleExact,
    /// Approximate matches.
    TitleApprox,
    /// Titles containing the query as a substring.
    TitleSubstring,
}

impl TitleCategory {
    /// Every category, closest match first.
    pub const DEFAULT_ORDER: [Self; 4] = [
        Self::TitlePopular,
        Self::TitleExact,
        Self::TitleApprox,
        Self::TitleSubstring,
    ];

    /// Key used by the search endpoint for this category.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::TitlePopular => "title_popular",
            Self::TitleExact => "title_exact",
            Self::TitleApprox => "title_approx",
            Self::TitleSubstring => "title_substring",
        }
    }
}

impl fmt::Display for TitleCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when a string is not a known category name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown title category: {0}")]
pub struct UnknownCategory(pub String);

impl FromStr for TitleCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::DEFAULT_ORDER
            .into_iter()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(String::from(s)))
    }
}

// --- Raw response rows ---

/// One title object as sent by either endpoint.
///
/// All fields are optional on the wire; completeness is checked when
/// converting into [`Title`] or [`SearchResult`].
#[derive(Debug, Clone, Default, Deserialize)]
pub(crate) struct RawTitle {
    /// IMDb identifier (`tt...`).
    #[serde(default)]
    pub id: Option<String>,
    /// Display title.
    #[serde(default)]
    pub title: Option<String>,
    /// Free-text description, usually starting with the release year.
    #[serde(default)]
    pub description: Option<String>,
}

/// Body of the `title/maindetails` endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct LookupResponse {
    /// Title payload.
    pub data: RawTitle,
}

/// Returns the string if it is present and non-empty.
fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|s| !s.is_empty())
}

// --- Title ---

/// Core identifying metadata for one title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Title {
    imdb_id: String,
    title: String,
    release_year: Option<String>,
}

impl Title {
    /// Creates a title from already-extracted fields.
    pub fn new(
        imdb_id: impl Into<String>,
        title: impl Into<String>,
        release_year: Option<String>,
    ) -> Self {
        Self {
            imdb_id: imdb_id.into(),
            title: title.into(),
            release_year,
        }
    }

    /// Builds a title from a lookup payload.
    ///
    /// Returns `None` when the identifier or display title is missing.
    /// A missing description only leaves the release year empty.
    pub(crate) fn from_raw(raw: &RawTitle) -> Option<Self> {
        let imdb_id = non_empty(raw.id.as_ref())?;
        let title = non_empty(raw.title.as_ref())?;
        let release_year = raw
            .description
            .as_deref()
            .and_then(extract_release_year)
            .map(String::from);

        Some(Self::new(imdb_id, title, release_year))
    }

    /// IMDb identifier (e.g. `tt0032138`).
    #[must_use]
    pub fn imdb_id(&self) -> &str {
        &self.imdb_id
    }

    /// Display title in the requested locale.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Four-digit release year, if the description starts with one.
    #[must_use]
    pub fn release_year(&self) -> Option<&str> {
        self.release_year.as_deref()
    }
}

// --- Search result ---

/// A single search hit tagged with the category it was found in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchResult {
    /// Category the row was listed under.
    #[serde(rename = "type")]
    pub kind: TitleCategory,
    /// IMDb identifier.
    pub imdb_id: String,
    /// Display title.
    pub title: String,
    /// Four-digit release year.
    pub release_year: Option<String>,
}

impl SearchResult {
    /// Builds a result from a search row.
    ///
    /// Returns `None` unless `id`, `title` and `description` are all
    /// present and non-empty.
    pub(crate) fn from_raw(kind: TitleCategory, raw: &RawTitle) -> Option<Self> {
        let imdb_id = non_empty(raw.id.as_ref())?;
        let title = non_empty(raw.title.as_ref())?;
        let description = non_empty(raw.description.as_ref())?;

        Some(Self {
            kind,
            imdb_id: String::from(imdb_id),
            title: String::from(title),
            release_year: extract_release_year(description).map(String::from),
        })
    }
}

// --- Search Parameters ---

/// Parameters for the `xml/find` search endpoint.
#[derive(Debug, Clone)]
pub struct SearchTitleParams {
    /// Free-text title query (required).
    pub query: String,
    /// Maximum number of results (default: unlimited).
    pub limit: Option<usize>,
    /// Categories to collect, in output order (default: all four).
    pub types: Vec<TitleCategory>,
}

impl SearchTitleParams {
    /// Creates new search params with the given query.
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            limit: None,
            types: TitleCategory::DEFAULT_ORDER.to_vec(),
        }
    }

    /// Caps the number of returned results.
    #[must_use]
    pub const fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Replaces the requested categories.
    #[must_use]
    pub fn types(mut self, types: impl IntoIterator<Item = TitleCategory>) -> Self {
        self.types = types.into_iter().collect();
        self
    }
}
