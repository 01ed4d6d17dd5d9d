/// Client configuration, constructed explicitly and injected at client
/// creation. No process-global endpoint state.
///
/// All fields have defaults suitable for local development; override
/// via environment variables or direct construction.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Backend API base URL, without a trailing slash
    /// (default: `http://localhost:5000/api`).
    pub base_url: String,
    /// Per-request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
}

const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

impl ClientConfig {
    /// Create a configuration for the given base URL with the default
    /// timeout. Trailing slashes are stripped so endpoint paths can be
    /// appended uniformly.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            request_timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                   | Default                     |
    /// |---------------------------|-----------------------------|
    /// | `FRAMESCOUT_API_URL`      | `http://localhost:5000/api` |
    /// | `FRAMESCOUT_TIMEOUT_SECS` | `30`                        |
    pub fn from_env() -> Self {
        let base_url =
            std::env::var("FRAMESCOUT_API_URL").unwrap_or_else(|_| DEFAULT_BASE_URL.into());

        let request_timeout_secs: u64 = std::env::var("FRAMESCOUT_TIMEOUT_SECS")
            .unwrap_or_else(|_| DEFAULT_TIMEOUT_SECS.to_string())
            .parse()
            .expect("FRAMESCOUT_TIMEOUT_SECS must be a valid u64");

        Self {
            request_timeout_secs,
            ..Self::new(base_url)
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
