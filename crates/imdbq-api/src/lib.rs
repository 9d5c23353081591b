//! API client library for imdbq.
//!
//! Provides a client for the IMDb title lookup and search endpoints.

/// IMDb API client.
pub mod imdb;
