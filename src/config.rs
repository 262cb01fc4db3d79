use serde::Deserialize;

use crate::models::Method;

/// Client configuration loaded from `NEA_`-prefixed environment variables
#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    /// Base address of the recommendation backend
    #[serde(default = "default_backend_url")]
    pub backend_url: String,

    /// Append a visible system entry to the transcript when a request fails
    #[serde(default)]
    pub show_errors: bool,

    /// Recommendation method selected at session start
    #[serde(default)]
    pub default_method: Method,
}

fn default_backend_url() -> String {
    "http://localhost:8000".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend_url: default_backend_url(),
            show_errors: false,
            default_method: Method::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Load configuration from an explicit set of variables
    pub fn from_vars<I>(vars: I) -> anyhow::Result<Self>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let mut config = envy::prefixed("NEA_")
            .from_iter::<_, Config>(vars)
            .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;
        config.backend_url = config.backend_url.trim_end_matches('/').to_string();
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_defaults() {
        let config = Config::from_vars(vars(&[])).unwrap();
        assert_eq!(config.backend_url, "http://localhost:8000");
        assert!(!config.show_errors);
        assert_eq!(config.default_method, Method::Multimodal);
    }

    #[test]
    fn test_overrides_and_trailing_slash() {
        let config = Config::from_vars(vars(&[
            ("NEA_BACKEND_URL", "https://nea.example.com/"),
            ("NEA_SHOW_ERRORS", "true"),
            ("NEA_DEFAULT_METHOD", "cf"),
        ]))
        .unwrap();
        assert_eq!(config.backend_url, "https://nea.example.com");
        assert!(config.show_errors);
        assert_eq!(config.default_method, Method::Collaborative);
    }

    #[test]
    fn test_invalid_method_is_rejected() {
        let result = Config::from_vars(vars(&[("NEA_DEFAULT_METHOD", "random")]));
        assert!(result.is_err());
    }
}
