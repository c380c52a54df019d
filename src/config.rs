use anyhow::{Context, Result};
use reqwest::Url;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Config {
    // Server
    pub server_base_url: Url,
    /// Locale the server rendered the page in (the page-scoped hint)
    pub server_lang: Option<String>,
    /// Session cookie forwarded with locale notifications
    pub session_cookie: Option<String>,

    // Notification
    pub notify_timeout: Duration,
    /// Total attempts per notification; 1 means fire once, never retry
    pub notify_max_attempts: u32,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let server_base_url = std::env::var("SERVER_BASE_URL")
            .unwrap_or_else(|_| "http://127.0.0.1:5000".to_string());

        Ok(Self {
            server_base_url: Url::parse(&server_base_url)
                .with_context(|| format!("SERVER_BASE_URL is not a valid URL: {}", server_base_url))?,
            server_lang: std::env::var("SERVER_LANG")
                .ok()
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty()),
            session_cookie: std::env::var("SESSION_COOKIE")
                .ok()
                .filter(|v| !v.is_empty()),

            notify_timeout: Duration::from_secs(
                std::env::var("NOTIFY_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .unwrap_or(5),
            ),
            notify_max_attempts: std::env::var("NOTIFY_MAX_ATTEMPTS")
                .ok()
                .and_then(|v| v.parse().ok())
                .filter(|v: &u32| *v >= 1)
                .unwrap_or(1),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_base_url: Url::parse("http://127.0.0.1:5000").expect("static URL is valid"),
            server_lang: None,
            session_cookie: None,
            notify_timeout: Duration::from_secs(5),
            notify_max_attempts: 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;
    use std::io::Write;

    const VARS: &[&str] = &[
        "SERVER_BASE_URL",
        "SERVER_LANG",
        "SESSION_COOKIE",
        "NOTIFY_TIMEOUT_SECS",
        "NOTIFY_MAX_ATTEMPTS",
    ];

    fn clear_env() {
        for var in VARS {
            std::env::remove_var(var);
        }
    }

    #[test]
    #[serial]
    fn test_from_env_defaults() {
        clear_env();
        let config = Config::from_env().unwrap();

        assert_eq!(config.server_base_url.as_str(), "http://127.0.0.1:5000/");
        assert_eq!(config.server_lang, None);
        assert_eq!(config.session_cookie, None);
        assert_eq!(config.notify_timeout, Duration::from_secs(5));
        assert_eq!(config.notify_max_attempts, 1);
    }

    #[test]
    #[serial]
    fn test_from_env_reads_overrides() {
        clear_env();
        std::env::set_var("SERVER_BASE_URL", "https://leafcare.example.com");
        std::env::set_var("SERVER_LANG", " hi ");
        std::env::set_var("SESSION_COOKIE", "session=abc");
        std::env::set_var("NOTIFY_TIMEOUT_SECS", "2");
        std::env::set_var("NOTIFY_MAX_ATTEMPTS", "3");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.server_base_url.host_str(), Some("leafcare.example.com"));
        assert_eq!(config.server_lang.as_deref(), Some("hi"));
        assert_eq!(config.session_cookie.as_deref(), Some("session=abc"));
        assert_eq!(config.notify_timeout, Duration::from_secs(2));
        assert_eq!(config.notify_max_attempts, 3);
    }

    #[test]
    #[serial]
    fn test_from_env_rejects_invalid_url() {
        clear_env();
        std::env::set_var("SERVER_BASE_URL", "not a url");

        let result = Config::from_env();
        clear_env();

        assert!(result.unwrap_err().to_string().contains("SERVER_BASE_URL"));
    }

    #[test]
    #[serial]
    fn test_zero_attempts_means_single_attempt() {
        clear_env();
        std::env::set_var("NOTIFY_MAX_ATTEMPTS", "0");

        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.notify_max_attempts, 1);
    }

    #[test]
    #[serial]
    fn test_from_env_after_loading_dotenv_file() {
        clear_env();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(".env");
        let mut file = std::fs::File::create(&path).unwrap();
        writeln!(file, "SERVER_LANG=mr").unwrap();
        writeln!(file, "NOTIFY_TIMEOUT_SECS=9").unwrap();

        dotenvy::from_path(&path).unwrap();
        let config = Config::from_env().unwrap();
        clear_env();

        assert_eq!(config.server_lang.as_deref(), Some("mr"));
        assert_eq!(config.notify_timeout, Duration::from_secs(9));
    }
}
