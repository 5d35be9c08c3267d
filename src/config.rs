// Configuration: the backend base URL. Read from the environment once in
// `main` and handed to `ApiClient::new`, nothing else touches env vars.

/// Environment variable holding the backend base URL.
pub const API_URL_VAR: &str = "API_URL";

/// Used when `API_URL` is not set.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:9000";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub api_url: String,
}

impl Config {
    pub fn new(api_url: impl Into<String>) -> Self {
        let api_url = api_url.into();
        Config {
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build from `API_URL`, falling back to `DEFAULT_API_URL`.
    pub fn from_env() -> Self {
        Self::from_value(std::env::var(API_URL_VAR).ok())
    }

    /// Empty values count as absent.
    pub fn from_value(api_url: Option<String>) -> Self {
        match api_url {
            Some(url) if !url.trim().is_empty() => Self::new(url.trim()),
            _ => Self::new(DEFAULT_API_URL),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_value_falls_back_to_local_default() {
        assert_eq!(Config::from_value(None).api_url, DEFAULT_API_URL);
        assert_eq!(Config::from_value(Some("  ".into())).api_url, DEFAULT_API_URL);
    }

    #[test]
    fn provided_value_wins_and_trailing_slash_is_trimmed() {
        let config = Config::from_value(Some("https://api.example.com/".into()));
        assert_eq!(config.api_url, "https://api.example.com");
    }
}
