//! Client configuration: base URL and the client-wide timeout.

use std::time::Duration;

/// Environment variable holding the API base URL.
pub const API_URL_ENV: &str = "CAMPUS_API_URL";

/// Base URL used when `CAMPUS_API_URL` is unset or blank.
pub const DEFAULT_BASE_URL: &str = "http://localhost:5000/api";

/// Fixed timeout applied to every request.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Read the base URL from `CAMPUS_API_URL`, falling back to the
    /// localhost default.
    pub fn from_env() -> Self {
        Self::from_env_value(std::env::var(API_URL_ENV).ok())
    }

    fn from_env_value(value: Option<String>) -> Self {
        match value {
            Some(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::new(DEFAULT_BASE_URL),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Join an endpoint path such as `/posts` onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn env_value_wins_over_default() {
        let config = ClientConfig::from_env_value(Some("https://api.example.edu/".to_string()));
        assert_eq!(config.base_url, "https://api.example.edu");
        assert_eq!(config.timeout, Duration::from_secs(10));
    }

    #[test]
    fn missing_or_blank_env_falls_back() {
        assert_eq!(ClientConfig::from_env_value(None).base_url, DEFAULT_BASE_URL);
        assert_eq!(
            ClientConfig::from_env_value(Some("  ".to_string())).base_url,
            DEFAULT_BASE_URL
        );
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let config = ClientConfig::new("http://localhost:3000/");
        assert_eq!(config.url("/posts"), "http://localhost:3000/posts");
    }
}
