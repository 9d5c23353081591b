//! `ImdbClient` - IMDb API client implementation.

use std::future::Future;
use std::sync::Arc;

use rand::Rng;
use reqwest::{Client, StatusCode};
use serde_json::{Map, Value};
use tracing::instrument::WithSubscriber;
use tracing::{Dispatch, instrument};
use url::Url;

use super::api::LocalImdbApi;
use super::cache::ResponseCache;
use super::error::{ImdbError, Result};
use super::types::{
    LookupResponse, RawTitle, SearchResult, SearchTitleParams, Title, TitleCategory,
};
use super::user_agent::pick_user_agent;

/// Host serving the title lookup endpoint.
const DEFAULT_LOOKUP_HOST: &str = "app.imdb.com";

/// Search endpoint. Only reachable over plain HTTP.
const DEFAULT_SEARCH_URL: &str = "http://www.imdb.com/xml/find";

/// Lookup path relative to the lookup base URL.
const LOOKUP_PATH: &str = "title/maindetails";

/// Default response locale.
pub const DEFAULT_LOCALE: &str = "en_US";

/// IMDb API client.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct ImdbClient {
    /// HTTP client (reqwest, gzip enabled, fixed User-Agent).
    http_client: Client,
    /// Base URL for the lookup endpoint.
    lookup_base_url: Url,
    /// Full URL of the search endpoint.
    search_url: Url,
    /// Locale sent with lookups.
    locale: String,
    /// User-Agent chosen at construction.
    user_agent: String,
    /// Optional response cache.
    cache: Option<Arc<dyn ResponseCache>>,
    /// Optional log destination for this client's spans and events.
    logger: Option<Dispatch>,
}

/// Builder for `ImdbClient`.
#[derive(Debug)]
#[allow(clippy::module_name_repetitions)]
pub struct ImdbClientBuilder {
    locale: Option<String>,
    secure: bool,
    user_agent: Option<String>,
    lookup_base_url: Option<Url>,
    search_url: Option<Url>,
    cache: Option<Arc<dyn ResponseCache>>,
    logger: Option<Dispatch>,
}

impl ImdbClientBuilder {
    /// Creates a new builder.
    const fn new() -> Self {
        Self {
            locale: None,
            secure: true,
            user_agent: None,
            lookup_base_url: None,
            search_url: None,
            cache: None,
            logger: None,
        }
    }

    /// Sets the response locale (default: `en_US`).
    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    /// Selects `https` (default) or `http` for lookups.
    ///
    /// Search requests always use plain HTTP.
    #[must_use]
    pub const fn secure(mut self, secure: bool) -> Self {
        self.secure = secure;
        self
    }

    /// Sets the User-Agent explicitly instead of picking one from the pool.
    #[must_use]
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.user_agent = Some(ua.into());
        self
    }

    /// Picks the User-Agent from the built-in pool with the given random source.
    #[must_use]
    pub fn user_agent_from<R: Rng + ?Sized>(mut self, rng: &mut R) -> Self {
        self.user_agent = Some(String::from(pick_user_agent(rng)));
        self
    }

    /// Overrides the lookup base URL (for wiremock in tests).
    ///
    /// Takes precedence over [`secure`](Self::secure).
    #[must_use]
    pub fn lookup_base_url(mut self, url: Url) -> Self {
        self.lookup_base_url = Some(url);
        self
    }

    /// Overrides the search endpoint URL (for wiremock in tests).
    #[must_use]
    pub fn search_url(mut self, url: Url) -> Self {
        self.search_url = Some(url);
        self
    }

    /// Sets a response cache.
    #[must_use]
    pub fn cache(mut self, cache: Arc<dyn ResponseCache>) -> Self {
        self.cache = Some(cache);
        self
    }

    /// Routes this client's spans and events to `logger` instead of the
    /// global default subscriber.
    #[must_use]
    pub fn logger(mut self, logger: impl Into<Dispatch>) -> Self {
        self.logger = Some(logger.into());
        self
    }

    /// Builds the client.
    ///
    /// # Errors
    ///
    /// - A default endpoint URL fails to parse.
    /// - `reqwest::Client` build fails.
    pub fn build(self) -> Result<ImdbClient> {
        let user_agent = self
            .user_agent
            .unwrap_or_else(|| String::from(pick_user_agent(&mut rand::thread_rng())));

        let lookup_base_url = if let Some(url) = self.lookup_base_url {
            url
        } else {
            let scheme = if self.secure { "https" } else { "http" };
            Url::parse(&format!("{scheme}://{DEFAULT_LOOKUP_HOST}/"))?
        };

        let search_url = if let Some(url) = self.search_url {
            url
        } else {
            Url::parse(DEFAULT_SEARCH_URL)?
        };

        let http_client = Client::builder()
            .user_agent(&user_agent)
            .gzip(true)
            .build()
            .map_err(ImdbError::Build)?;

        Ok(ImdbClient {
            http_client,
            lookup_base_url,
            search_url,
            locale: self.locale.unwrap_or_else(|| String::from(DEFAULT_LOCALE)),
            user_agent,
            cache: self.cache,
            logger: self.logger,
        })
    }
}

impl ImdbClient {
    /// Creates a new builder.
    #[must_use]
    pub const fn builder() -> ImdbClientBuilder {
        ImdbClientBuilder::new()
    }

    /// Locale sent with lookups.
    #[must_use]
    pub fn locale(&self) -> &str {
        &self.locale
    }

    /// Changes the locale for subsequent lookups.
    pub fn set_locale(&mut self, locale: impl Into<String>) {
        self.locale = locale.into();
    }

    /// User-Agent sent with every request.
    #[must_use]
    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// Runs `fut` with the configured logger as its default subscriber.
    async fn with_logger<F: Future>(&self, fut: F) -> F::Output {
        match &self.logger {
            Some(logger) => fut.with_subscriber(logger.clone()).await,
            None => fut.await,
        }
    }

    /// Sends a GET request with query params, going through the cache.
    ///
    /// Returns the status and body. The body is empty for non-200 responses.
    #[instrument(skip_all)]
    async fn get_body(&self, url: Url, query: &[(&str, &str)]) -> Result<(StatusCode, String)> {
        let request = self.http_client.get(url).query(query).build()?;
        let key = request.url().to_string();

        if let Some(body) = self.cache.as_ref().and_then(|cache| cache.get(&key)) {
            tracing::debug!(url = %key, "IMDb API cache hit");
            return Ok((StatusCode::OK, body));
        }

        tracing::debug!(url = %key, "IMDb API request");

        let response = self.http_client.execute(request).await?;
        let status = response.status();
        if status != StatusCode::OK {
            return Ok((status, String::new()));
        }

        let body = response.text().await?;
        if let Some(cache) = &self.cache {
            cache.put(&key, &body);
        }
        Ok((status, body))
    }

    #[instrument(skip(self))]
    async fn look_up_id_inner(&self, imdb_id: &str) -> Result<Title> {
        let url = self.lookup_base_url.join(LOOKUP_PATH)?;
        let query = [("tconst", imdb_id), ("locale", self.locale.as_str())];

        let (status, body) = self.get_body(url, &query).await?;
        if status != StatusCode::OK {
            tracing::warn!(imdb_id, %status, "IMDb lookup returned non-200");
            return Err(ImdbError::NotFound {
                imdb_id: String::from(imdb_id),
                status,
            });
        }

        let response: LookupResponse = serde_json::from_str(&body)?;
        Title::from_raw(&response.data).ok_or_else(|| ImdbError::NotFound {
            imdb_id: String::from(imdb_id),
            status,
        })
    }

    #[instrument(skip_all, fields(query = %params.query))]
    async fn search_for_title_inner(
        &self,
        params: &SearchTitleParams,
    ) -> Result<Vec<SearchResult>> {
        let query = [("q", params.query.as_str()), ("json", "1"), ("tt", "on")];

        let (status, body) = self.get_body(self.search_url.clone(), &query).await?;
        if status != StatusCode::OK {
            return Err(ImdbError::Status {
                status,
                url: self.search_url.to_string(),
            });
        }

        let categories: Map<String, Value> = serde_json::from_str(&body)?;
        let results = collect_results(categories, &params.types, params.limit);
        tracing::debug!(count = results.len(), "IMDb search finished");
        Ok(results)
    }
}

/// Flattens a search response into result records.
///
/// Categories are visited in `types` order. Rows that are not objects, or
/// lack a string id, title or description, are skipped. Collection stops
/// once `limit` rows are held.
fn collect_results(
    mut categories: Map<String, Value>,
    types: &[TitleCategory],
    limit: Option<usize>,
) -> Vec<SearchResult> {
    let limit = limit.unwrap_or(usize::MAX);
    let mut results = Vec::new();

    for &kind in types {
        let rows = match categories.remove(kind.as_str()) {
            Some(Value::Array(rows)) => rows,
            Some(Value::Null) | None => continue,
            Some(other) => {
                tracing::trace!(%kind, value = %other, "skipping non-list category");
                continue;
            }
        };

        for row in rows {
            if results.len() >= limit {
                return results;
            }
            let raw = serde_json::from_value::<RawTitle>(row).ok();
            let result = raw.as_ref().and_then(|raw| SearchResult::from_raw(kind, raw));
            match result {
                Some(result) => results.push(result),
                None => tracing::trace!(
                    %kind,
                    id = ?raw.and_then(|raw| raw.id),
                    "skipping incomplete search row"
                ),
            }
        }
    }

    results
}

impl LocalImdbApi for ImdbClient {
    async fn look_up_id(&self, imdb_id: &str) -> Result<Title> {
        self.with_logger(self.look_up_id_inner(imdb_id)).await
    }

    async fn search_for_title(&self, params: &SearchTitleParams) -> Result<Vec<SearchResult>> {
        self.with_logger(self.search_for_title_inner(params)).await
    }
}
