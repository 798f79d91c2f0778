use std::fmt;
use std::time::Duration;

/// Base URL used when none is configured.
pub const DEFAULT_API_URL: &str = "http://localhost:8000";

pub const DEFAULT_USER_ID: u64 = 1;

/// Request timeout for the native client.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// How requests are authorized.
#[derive(Clone, PartialEq, Eq)]
pub enum Credentials {
    /// No credentials configured; every request fails with `Unauthorized`.
    None,
    /// A pre-issued token sent as-is in the `token` header.
    Token(String),
    /// Exchange username/password for a short-lived session token.
    Session { username: String, password: String },
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credentials::None => write!(f, "None"),
            Credentials::Token(_) => write!(f, "Token(***)"),
            Credentials::Session { username, .. } => {
                write!(f, "Session {{ username: {:?}, password: *** }}", username)
            }
        }
    }
}

impl Credentials {
    /// Pick credentials from optional settings: a non-empty token wins,
    /// then a username/password pair.
    pub fn from_parts(token: Option<&str>, username: Option<&str>, password: Option<&str>) -> Self {
        fn non_empty(s: Option<&str>) -> Option<&str> {
            s.map(str::trim).filter(|s| !s.is_empty())
        }
        if let Some(token) = non_empty(token) {
            return Credentials::Token(token.to_string());
        }
        match (non_empty(username), password.filter(|p| !p.is_empty())) {
            (Some(username), Some(password)) => Credentials::Session {
                username: username.to_string(),
                password: password.to_string(),
            },
            _ => Credentials::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    /// Base URL without trailing slash
    pub base_url: String,
    /// Owner of the buoy fleet (`/user/{id}/buoys`)
    pub user_id: u64,
    pub credentials: Credentials,
    pub timeout: Duration,
}

impl ApiConfig {
    pub fn new(base_url: impl Into<String>, user_id: u64, credentials: Credentials) -> Self {
        let base_url: String = base_url.into();
        Self {
            base_url: base_url.trim().trim_end_matches('/').to_string(),
            user_id,
            credentials,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Configuration baked in at compile time for the WASM build.
    ///
    /// Only `BITBUOY_API_URL` and `BITBUOY_USER_ID` are read. Anything compiled
    /// in ships to every browser, so credentials are always entered at
    /// runtime through the sign-in form.
    pub fn from_build_env() -> Self {
        Self::from_settings(
            option_env!("BITBUOY_API_URL"),
            option_env!("BITBUOY_USER_ID"),
            Credentials::None,
        )
    }

    /// Build from optional raw settings, falling back to the defaults.
    pub fn from_settings(base_url: Option<&str>, user_id: Option<&str>, credentials: Credentials) -> Self {
        let base_url = base_url
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .unwrap_or(DEFAULT_API_URL);
        let user_id = user_id
            .and_then(|s| s.trim().parse::<u64>().ok())
            .unwrap_or(DEFAULT_USER_ID);
        Self::new(base_url, user_id, credentials)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ApiConfig::from_settings(None, None, Credentials::None);
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.user_id, DEFAULT_USER_ID);
        assert_eq!(config.timeout, Duration::from_secs(DEFAULT_TIMEOUT_SECS));
    }

    #[test]
    fn test_trailing_slash_trimmed_and_bad_user_id_ignored() {
        let config = ApiConfig::from_settings(Some("https://api.example.org/v1/ "), Some("abc"), Credentials::None);
        assert_eq!(config.base_url, "https://api.example.org/v1");
        assert_eq!(config.user_id, DEFAULT_USER_ID);
        let config = ApiConfig::from_settings(Some(""), Some(" 42 "), Credentials::None);
        assert_eq!(config.base_url, DEFAULT_API_URL);
        assert_eq!(config.user_id, 42);
    }

    #[test]
    fn test_build_env_carries_no_credentials() {
        assert_eq!(ApiConfig::from_build_env().credentials, Credentials::None);
    }

    #[test]
    fn test_credentials_precedence() {
        assert_eq!(
            Credentials::from_parts(Some("abc"), Some("op"), Some("pw")),
            Credentials::Token("abc".to_string())
        );
        assert_eq!(
            Credentials::from_parts(Some(" "), Some("op"), Some("pw")),
            Credentials::Session { username: "op".to_string(), password: "pw".to_string() }
        );
        assert_eq!(Credentials::from_parts(None, Some("op"), None), Credentials::None);
        assert_eq!(Credentials::from_parts(None, None, None), Credentials::None);
    }

    #[test]
    fn test_debug_redacts_secrets() {
        let token = format!("{:?}", Credentials::Token("s3cret".to_string()));
        assert!(!token.contains("s3cret"));
        let session = format!(
            "{:?}",
            Credentials::Session { username: "op".to_string(), password: "hunter2".to_string() }
        );
        assert!(session.contains("op"));
        assert!(!session.contains("hunter2"));
    }
}
