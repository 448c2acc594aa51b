//! PubMed E-utilities client.
//!
//! Provides async HTTP client with:
//! - Two-phase retrieval: ESearch for identifiers, EFetch for records
//! - Fixed delay before every request (NCBI allows 3 req/s)
//! - Non-success statuses mapped to [`ClientError`], never retried

use std::time::Duration;

use reqwest::Client;
use url::Url;

use crate::config::{Config, api};
use crate::error::{ClientError, ClientResult};
use crate::parser::{Element, RawRecord};

/// ESearch endpoint, relative to the base URL.
const ESEARCH: &str = "esearch.fcgi";

/// EFetch endpoint, relative to the base URL.
const EFETCH: &str = "efetch.fcgi";

/// PubMed E-utilities client.
#[derive(Clone)]
pub struct PubMedClient {
    /// HTTP client.
    client: Client,

    /// Operator email sent with every request.
    email: String,

    /// API key (optional).
    api_key: Option<String>,

    /// Client identifier.
    tool: String,

    /// E-utilities base URL.
    base_url: Url,

    /// Rate limit delay.
    rate_limit_delay: Duration,
}

impl PubMedClient {
    /// Create a new client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns error if the base URL is invalid or HTTP client initialization fails.
    pub fn new(config: Config) -> ClientResult<Self> {
        let client = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(config.connect_timeout)
            .gzip(true)
            .build()?;

        Ok(Self {
            client,
            email: config.email,
            api_key: config.api_key,
            tool: config.tool,
            base_url: Url::parse(&config.base_url)?,
            rate_limit_delay: config.rate_limit_delay,
        })
    }

    /// Check if an API key is configured.
    #[must_use]
    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }

    /// Search PubMed and fetch the matching records.
    ///
    /// An empty search result returns immediately without a fetch request.
    ///
    /// # Errors
    ///
    /// Returns error on API failure in either phase.
    pub async fn search(&self, query: &str, max_results: u32) -> ClientResult<Vec<RawRecord>> {
        let ids = self.search_ids(query, max_results).await?;
        if ids.is_empty() {
            tracing::debug!(query, "Search returned no identifiers");
            return Ok(Vec::new());
        }
        self.fetch_details(&ids).await
    }

    /// Run ESearch and return at most `max_results` PMIDs.
    ///
    /// # Errors
    ///
    /// Returns error on API failure.
    pub async fn search_ids(&self, query: &str, max_results: u32) -> ClientResult<Vec<String>> {
        let params = vec![
            ("term".to_string(), query.to_string()),
            ("retmax".to_string(), max_results.to_string()),
        ];

        let root = self.get(ESEARCH, &params).await?;

        if let Some(error) = root.child("ERROR").and_then(Element::text) {
            tracing::warn!(query, %error, "ESearch reported an error");
        }

        let ids: Vec<String> = root
            .descendant("IdList")
            .map(|list| list.children_named("Id").filter_map(Element::text).collect())
            .unwrap_or_default();

        tracing::debug!(
            query,
            count = ?root.child("Count").and_then(Element::text),
            returned = ids.len(),
            "ESearch completed"
        );
        Ok(ids)
    }

    /// Run EFetch for all `ids` in one request and split the response into records.
    ///
    /// Identifiers are sent as given; duplicates are not removed.
    ///
    /// # Errors
    ///
    /// Returns error on API failure or if the response is not well-formed XML.
    pub async fn fetch_details(&self, ids: &[String]) -> ClientResult<Vec<RawRecord>> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let params = vec![
            ("id".to_string(), ids.join(",")),
            ("retmode".to_string(), "xml".to_string()),
        ];

        let root = self.get(EFETCH, &params).await?;
        let records: Vec<RawRecord> =
            root.into_named("PubmedArticle").into_iter().map(RawRecord::new).collect();

        tracing::debug!(requested = ids.len(), received = records.len(), "EFetch completed");
        Ok(records)
    }

    /// Make a GET request and parse the XML body.
    async fn get(&self, endpoint: &str, params: &[(String, String)]) -> ClientResult<Element> {
        let url = self.endpoint_url(endpoint, params)?;

        // Rate limit
        tokio::time::sleep(self.rate_limit_delay).await;

        tracing::debug!(endpoint, "Sending E-utilities request");
        let response = self.client.get(url).send().await?;

        let response = self.handle_response(response).await?;
        let body = response.bytes().await?;

        Ok(Element::parse(&body)?)
    }

    /// Build the full URL: endpoint-specific params followed by the shared ones.
    fn endpoint_url(&self, endpoint: &str, params: &[(String, String)]) -> ClientResult<Url> {
        let mut url = self.base_url.join(endpoint)?;
        {
            let mut query = url.query_pairs_mut();
            query.append_pair("db", api::DATABASE);
            for (k, v) in params {
                query.append_pair(k, v);
            }
            query.append_pair("email", &self.email);
            query.append_pair("tool", &self.tool);
            if let Some(key) = &self.api_key {
                query.append_pair("api_key", key);
            }
        }
        Ok(url)
    }

    /// Handle API response status codes.
    async fn handle_response(
        &self,
        response: reqwest::Response,
    ) -> ClientResult<reqwest::Response> {
        let status = response.status();

        if status.is_success() {
            return Ok(response);
        }

        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get("Retry-After")
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(1);

                Err(ClientError::rate_limited(retry_after))
            }
            404 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::not_found(text))
            }
            400 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::bad_request(text))
            }
            500..=599 => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::server(status.as_u16(), text))
            }
            _ => {
                let text = response.text().await.unwrap_or_default();
                Err(ClientError::UnexpectedStatus { status: status.as_u16(), message: text })
            }
        }
    }
}

impl std::fmt::Debug for PubMedClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PubMedClient")
            .field("base_url", &self.base_url.as_str())
            .field("has_api_key", &self.has_api_key())
            .finish()
    }
}
