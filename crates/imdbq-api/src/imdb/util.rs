//! Description parsing helpers.

use std::sync::LazyLock;

use regex::Regex;

/// Regex for the leading year of a description.
#[allow(clippy::expect_used)]
static RELEASE_YEAR_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d{4}").expect("failed to compile release year regex"));

/// Extracts the four leading digits of a description.
///
/// # Input format
///
/// ```text
/// 1939, Victor Fleming
/// ```
#[must_use]
pub fn extract_release_year(description: &str) -> Option<&str> {
    RELEASE_YEAR_RE.find(description).map(|m| m.as_str())
}
