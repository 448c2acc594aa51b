//! Configuration for the PubMed E-utilities client.

use std::time::Duration;

/// API configuration constants.
pub mod api {
    use std::time::Duration;

    /// Base URL for the NCBI E-utilities.
    pub const BASE_URL: &str = "https://eutils.ncbi.nlm.nih.gov/entrez/eutils/";

    /// Database searched by every request.
    pub const DATABASE: &str = "pubmed";

    /// Client identifier sent as the `tool` parameter.
    pub const TOOL: &str = "research_paper_fetcher";

    /// Placeholder operator email used when none is configured.
    pub const DEFAULT_EMAIL: &str = "your-email@example.com";

    /// Request timeout.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

    /// Connection timeout.
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Delay before every request (340ms, NCBI asks for at most 3 req/s).
    pub const RATE_LIMIT_DELAY: Duration = Duration::from_millis(340);

    /// Default cap on the number of identifiers returned by a search.
    pub const DEFAULT_MAX_RESULTS: u32 = 100;
}

/// Client configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Operator email, required by the NCBI usage policy.
    pub email: String,

    /// NCBI API key (optional).
    pub api_key: Option<String>,

    /// Base URL for the E-utilities (for testing with mock servers).
    pub base_url: String,

    /// Client identifier sent with each request.
    pub tool: String,

    /// Request timeout.
    pub request_timeout: Duration,

    /// Connection timeout.
    pub connect_timeout: Duration,

    /// Delay observed before each request.
    pub rate_limit_delay: Duration,
}

impl Config {
    /// Create a new configuration for the given operator email.
    #[must_use]
    pub fn new(email: impl Into<String>, api_key: Option<String>) -> Self {
        Self {
            email: email.into(),
            api_key,
            base_url: api::BASE_URL.to_string(),
            tool: api::TOOL.to_string(),
            request_timeout: api::REQUEST_TIMEOUT,
            connect_timeout: api::CONNECT_TIMEOUT,
            rate_limit_delay: api::RATE_LIMIT_DELAY,
        }
    }

    /// Create a test configuration pointing at a mock server.
    #[must_use]
    pub fn for_testing(base_url: &str) -> Self {
        Self {
            email: "test@example.com".to_string(),
            api_key: None,
            base_url: format!("{}/", base_url.trim_end_matches('/')),
            tool: api::TOOL.to_string(),
            request_timeout: Duration::from_secs(5),
            connect_timeout: Duration::from_secs(2),
            rate_limit_delay: Duration::from_millis(0), // No delay in tests
        }
    }

    /// Create configuration from environment variables.
    ///
    /// Reads `PUBMED_EMAIL` and `NCBI_API_KEY`; a blank key counts as unset.
    pub fn from_env() -> anyhow::Result<Self> {
        let email =
            std::env::var("PUBMED_EMAIL").unwrap_or_else(|_| api::DEFAULT_EMAIL.to_string());
        let api_key = std::env::var("NCBI_API_KEY").ok().filter(|k| !k.trim().is_empty());
        Ok(Self::new(email, api_key))
    }

    /// Override the delay observed before each request.
    #[must_use]
    pub fn with_rate_limit_delay(mut self, delay: Duration) -> Self {
        self.rate_limit_delay = delay;
        self
    }

    /// Check if an API key is configured.
    #[must_use]
    pub const fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new(api::DEFAULT_EMAIL, None)
    }
}
