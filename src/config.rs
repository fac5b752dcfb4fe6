use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Where the bearer token for the backend comes from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TokenSource {
    Static(String),
    File(PathBuf),
}

#[derive(Clone, Debug)]
pub struct ConsoleConfig {
    pub api_base_url: String,
    pub token_source: TokenSource,
    pub request_timeout: Option<Duration>,
}

impl ConsoleConfig {
    pub fn from_env() -> Result<Self, String> {
        let api_base_url = env::var("CALLINGBIRD_API_URL")
            .map_err(|_| "CALLINGBIRD_API_URL must be set".to_string())?;

        let token_source = match (
            env::var("CALLINGBIRD_API_TOKEN").ok(),
            env::var("CALLINGBIRD_TOKEN_FILE").ok(),
        ) {
            (Some(token), _) if !token.trim().is_empty() => TokenSource::Static(token),
            (_, Some(path)) if !path.trim().is_empty() => TokenSource::File(PathBuf::from(path)),
            _ => {
                return Err(
                    "CALLINGBIRD_API_TOKEN or CALLINGBIRD_TOKEN_FILE must be set".to_string(),
                )
            }
        };

        let request_timeout = match env::var("CALLINGBIRD_TIMEOUT_SECS") {
            Ok(raw) => Some(parse_timeout(&raw)?),
            Err(_) => None,
        };

        Self::new(api_base_url, token_source).map(|config| Self {
            request_timeout,
            ..config
        })
    }

    pub fn new(api_base_url: impl Into<String>, token_source: TokenSource) -> Result<Self, String> {
        let api_base_url = normalize_base_url(&api_base_url.into())?;

        Ok(Self {
            api_base_url,
            token_source,
            request_timeout: None,
        })
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = Some(timeout);
        self
    }
}

fn normalize_base_url(raw: &str) -> Result<String, String> {
    let trimmed = raw.trim().trim_end_matches('/');

    if !(trimmed.starts_with("http://") || trimmed.starts_with("https://")) {
        return Err(format!("API base URL must start with http:// or https://, got '{}'", raw));
    }

    Ok(trimmed.to_string())
}

fn parse_timeout(raw: &str) -> Result<Duration, String> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|_| format!("CALLINGBIRD_TIMEOUT_SECS must be a whole number, got '{}'", raw))?;

    if secs == 0 {
        return Err("CALLINGBIRD_TIMEOUT_SECS must be greater than zero".to_string());
    }

    Ok(Duration::from_secs(secs))
}
