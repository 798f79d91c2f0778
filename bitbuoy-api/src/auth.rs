//! Session tokens obtained through `POST /auth/session`.
//!
//! Credentials and tokens live in memory only. Tokens are re-requested
//! shortly before they expire. Nothing here is ever written to storage.

use crate::config::Credentials;
use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Mutex;

/// Tokens are treated as expired this many seconds early.
pub const REFRESH_MARGIN_SECS: i64 = 30;

#[derive(Debug, Serialize)]
pub struct SessionRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Deserialize, PartialEq)]
pub struct SessionResponse {
    pub token: String,
    /// Lifetime in seconds
    pub expires_in: i64,
}

#[derive(Clone, PartialEq)]
pub struct SessionToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl std::fmt::Debug for SessionToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SessionToken {{ expires_at: {} }}", self.expires_at)
    }
}

impl SessionToken {
    pub fn from_response(response: SessionResponse, issued_at: DateTime<Utc>) -> Self {
        Self {
            token: response.token,
            expires_at: issued_at + TimeDelta::seconds(response.expires_in.max(0)),
        }
    }

    pub fn is_fresh(&self, now: DateTime<Utc>) -> bool {
        now < self.expires_at - TimeDelta::seconds(REFRESH_MARGIN_SECS)
    }
}

/// The current session token, shared by all requests of one client.
#[derive(Debug, Default)]
pub struct TokenCache(Mutex<Option<SessionToken>>);

impl TokenCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// The cached token if it is still fresh at `now`.
    pub fn fresh(&self, now: DateTime<Utc>) -> Option<String> {
        let guard = self.0.lock().unwrap_or_else(|e| e.into_inner());
        guard
            .as_ref()
            .filter(|t| t.is_fresh(now))
            .map(|t| t.token.clone())
    }

    pub fn store(&self, token: SessionToken) {
        *self.0.lock().unwrap_or_else(|e| e.into_inner()) = Some(token);
    }

    pub fn clear(&self) {
        *self.0.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}

/// The credentials a client currently signs requests with. Replaced on
/// sign-in, cleared on sign-out.
#[derive(Debug)]
pub struct CredentialCell(Mutex<Credentials>);

impl CredentialCell {
    pub fn new(credentials: Credentials) -> Self {
        Self(Mutex::new(credentials))
    }

    pub fn get(&self) -> Credentials {
        self.0.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn set(&self, credentials: Credentials) {
        *self.0.lock().unwrap_or_else(|e| e.into_inner()) = credentials;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn issued() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_token_freshness_honours_margin() {
        let token = SessionToken::from_response(
            SessionResponse { token: "t".into(), expires_in: 300 },
            issued(),
        );
        assert!(token.is_fresh(issued()));
        assert!(token.is_fresh(issued() + TimeDelta::seconds(269)));
        assert!(!token.is_fresh(issued() + TimeDelta::seconds(270)));
    }

    #[test]
    fn test_negative_lifetime_is_expired() {
        let token = SessionToken::from_response(
            SessionResponse { token: "t".into(), expires_in: -10 },
            issued(),
        );
        assert!(!token.is_fresh(issued()));
    }

    #[test]
    fn test_cache_store_and_clear() {
        let cache = TokenCache::new();
        assert_eq!(cache.fresh(issued()), None);
        cache.store(SessionToken::from_response(
            SessionResponse { token: "abc".into(), expires_in: 3600 },
            issued(),
        ));
        assert_eq!(cache.fresh(issued()), Some("abc".to_string()));
        assert_eq!(cache.fresh(issued() + TimeDelta::hours(2)), None);
        cache.clear();
        assert_eq!(cache.fresh(issued()), None);
    }

    #[test]
    fn test_parse_session_response() {
        let response: SessionResponse =
            serde_json::from_str(r#"{"token": "xyz", "expires_in": 900}"#).unwrap();
        assert_eq!(response, SessionResponse { token: "xyz".into(), expires_in: 900 });
    }

    #[test]
    fn test_credential_cell_replace_and_clear() {
        let cell = CredentialCell::new(Credentials::None);
        cell.set(Credentials::Session { username: "op".into(), password: "pw".into() });
        assert!(matches!(cell.get(), Credentials::Session { ref username, .. } if username == "op"));
        assert!(!format!("{:?}", cell).contains("pw"));
        cell.set(Credentials::None);
        assert_eq!(cell.get(), Credentials::None);
    }

    #[test]
    fn test_debug_hides_token() {
        let token = SessionToken { token: "secret".into(), expires_at: issued() };
        assert!(!format!("{:?}", token).contains("secret"));
    }
}
