use std::time::Duration;

use anyhow::Context;

#[derive(Debug, Clone)]
pub struct Config {
    pub mangadex_api_url: String,
    pub uploads_base_url: String,
    pub bind_addr: String,
    pub public_url: String,
    pub request_timeout: Duration,
    /// Language codes tried in order when picking a title/description/tag name.
    pub preferred_languages: Vec<String>,
    pub user_agent: String,
}

const DEFAULT_MANGADEX_API_URL: &str = "https://api.mangadex.org";
const DEFAULT_UPLOADS_BASE_URL: &str = "https://uploads.mangadex.org";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:3000";
const DEFAULT_PUBLIC_URL: &str = "http://localhost:3000";
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PREFERRED_LANGUAGES: &str = "en";

impl Default for Config {
    fn default() -> Self {
        Config {
            mangadex_api_url: DEFAULT_MANGADEX_API_URL.into(),
            uploads_base_url: DEFAULT_UPLOADS_BASE_URL.into(),
            bind_addr: DEFAULT_BIND_ADDR.into(),
            public_url: DEFAULT_PUBLIC_URL.into(),
            request_timeout: Duration::from_secs(DEFAULT_REQUEST_TIMEOUT_SECS),
            preferred_languages: parse_language_list(DEFAULT_PREFERRED_LANGUAGES),
            user_agent: default_user_agent(),
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let mangadex_api_url =
            std::env::var("MANGADEX_API_URL").unwrap_or(DEFAULT_MANGADEX_API_URL.into());
        let uploads_base_url =
            std::env::var("MANGADEX_UPLOADS_URL").unwrap_or(DEFAULT_UPLOADS_BASE_URL.into());
        let bind_addr = std::env::var("BIND_ADDR").unwrap_or(DEFAULT_BIND_ADDR.into());
        let public_url = std::env::var("PUBLIC_URL").unwrap_or(DEFAULT_PUBLIC_URL.into());
        let timeout_secs = match std::env::var("REQUEST_TIMEOUT_SECS") {
            Ok(raw) => raw
                .trim()
                .parse::<u64>()
                .with_context(|| format!("Invalid REQUEST_TIMEOUT_SECS: {}", raw))?,
            Err(_) => DEFAULT_REQUEST_TIMEOUT_SECS,
        };
        let preferred_languages = std::env::var("PREFERRED_LANGUAGES")
            .map(|raw| parse_language_list(&raw))
            .unwrap_or_else(|_| parse_language_list(DEFAULT_PREFERRED_LANGUAGES));
        let user_agent = std::env::var("USER_AGENT").unwrap_or_else(|_| default_user_agent());

        Ok(Config {
            mangadex_api_url,
            uploads_base_url,
            bind_addr,
            public_url,
            request_timeout: Duration::from_secs(timeout_secs),
            preferred_languages,
            user_agent,
        })
    }

    pub fn validate(&self) -> Result<(), String> {
        if self.mangadex_api_url.trim().is_empty() {
            return Err("MANGADEX_API_URL is empty".into());
        }
        if self.uploads_base_url.trim().is_empty() {
            return Err("MANGADEX_UPLOADS_URL is empty".into());
        }
        if self.request_timeout.is_zero() {
            return Err("REQUEST_TIMEOUT_SECS must be greater than zero".into());
        }
        if self.preferred_languages.is_empty() {
            return Err("PREFERRED_LANGUAGES must name at least one language".into());
        }
        if self.user_agent.trim().is_empty() {
            return Err("USER_AGENT is empty".into());
        }
        Ok(())
    }
}

fn default_user_agent() -> String {
    format!("{}/{}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"))
}

fn parse_language_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(|l| l.trim().to_string())
        .filter(|l| !l.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn language_list_is_trimmed_and_skips_blanks() {
        assert_eq!(
            parse_language_list(" en, ja-ro ,,ja "),
            vec!["en".to_string(), "ja-ro".into(), "ja".into()]
        );
    }

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.preferred_languages, vec!["en".to_string()]);
    }

    #[test]
    fn validate_rejects_zero_timeout() {
        let config = Config {
            request_timeout: Duration::ZERO,
            ..Config::default()
        };
        assert_eq!(
            config.validate().unwrap_err(),
            "REQUEST_TIMEOUT_SECS must be greater than zero"
        );
    }

    #[test]
    fn validate_rejects_empty_languages() {
        let config = Config {
            preferred_languages: vec![],
            ..Config::default()
        };
        assert!(config.validate().is_err());
    }
}
