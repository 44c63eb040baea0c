use crate::errors::ResolveError;

/// Configuration for the resolution pipeline
///
/// Built once at startup and injected into the sources and resolver at
/// construction time; nothing reads global state at call time, so tests
/// can point the pipeline at fake endpoints.
#[derive(Debug, Clone)]
pub struct ResolverConfig {
    /// DHCP lease page endpoint (expects POST form field `mac`)
    pub lease_url: String,

    /// Device directory endpoint (expects GET with `format`/`token`/`interface_mac`)
    pub directory_url: String,

    /// Service credential sent to the device directory
    pub directory_token: String,

    /// Base URL the rendered account link points at; the subscriber
    /// reference is appended verbatim
    pub account_url: String,

    /// User-Agent header sent to the lease page, which rejects
    /// non-browser clients
    pub user_agent: String,

    /// Timeout in milliseconds applied to every outbound request
    pub http_timeout_ms: u64,
}

impl Default for ResolverConfig {
    fn default() -> Self {
        Self {
            lease_url: "http://ip.iformula.ru/mac.php".to_string(),
            directory_url: "https://zt.platform24.tv/v2/devices".to_string(),
            directory_token: String::new(),
            account_url: "https://fs.groupw.ru/user_selected?id_user=".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:132.0) Gecko/20100101 Firefox/132.0"
                .to_string(),
            http_timeout_ms: 10_000,
        }
    }
}

impl ResolverConfig {
    /// Load configuration from the environment
    ///
    /// Endpoint overrides are optional; the directory token is a secret
    /// with no usable default and must be present.
    pub fn from_env() -> Result<Self, ResolveError> {
        let mut config = Self::default();

        if let Ok(url) = std::env::var("MACSCOUT_LEASE_URL") {
            config.lease_url = url;
        }
        if let Ok(url) = std::env::var("MACSCOUT_DIRECTORY_URL") {
            config.directory_url = url;
        }
        if let Ok(url) = std::env::var("MACSCOUT_ACCOUNT_URL") {
            config.account_url = url;
        }

        config.directory_token = std::env::var("MACSCOUT_DIRECTORY_TOKEN").map_err(|_| {
            ResolveError::ConfigError(
                "MACSCOUT_DIRECTORY_TOKEN environment variable not set".to_string(),
            )
        })?;

        Ok(config)
    }
}
