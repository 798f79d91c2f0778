use crate::auth::{SessionResponse, SessionToken, TokenCache};
use crate::config::Credentials;
use bitbuoy_core::buoy::BuoyList;
use bitbuoy_core::error::FetchError;
use bitbuoy_core::measurement::Measurement;
use chrono::Utc;
use log::info;
use serde::de::DeserializeOwned;
use std::future::Future;

/// The two reads the dashboard needs from the measurement API.
///
/// Futures returned by the browser transport are not `Send`, so the trait
/// leaves `Send` unspecified.
#[allow(async_fn_in_trait)]
pub trait BuoyApi {
    /// `GET /user/{id}/buoys`
    async fn fetch_buoys(&self) -> Result<BuoyList, FetchError>;

    /// `POST /measurements/?serial_numbers=...`
    async fn fetch_measurements(&self, serial_numbers: &[String]) -> Result<Vec<Measurement>, FetchError>;

    /// Sign subsequent requests with `credentials`, dropping any cached
    /// session token.
    fn sign_in(&self, credentials: Credentials);

    /// Forget the credentials and any cached session token.
    fn sign_out(&self);
}

/// Decode a JSON response body.
pub fn decode<T: DeserializeOwned>(body: &str) -> Result<T, FetchError> {
    serde_json::from_str(body).map_err(|e| FetchError::Malformed(e.to_string()))
}

/// Token for the next request: a static token as-is, or a cached session
/// token, running `exchange` when the cache is empty or stale.
pub(crate) async fn resolve_token<F, Fut>(
    credentials: &Credentials,
    cache: &TokenCache,
    exchange: F,
) -> Result<String, FetchError>
where
    F: FnOnce(String, String) -> Fut,
    Fut: Future<Output = Result<SessionResponse, FetchError>>,
{
    match credentials {
        Credentials::None => Err(FetchError::Unauthorized(
            "not signed in".to_string(),
        )),
        Credentials::Token(token) => Ok(token.clone()),
        Credentials::Session { username, password } => {
            if let Some(token) = cache.fresh(Utc::now()) {
                return Ok(token);
            }
            info!("Requesting session token for {}", username);
            let response = exchange(username.clone(), password.clone())
                .await
                .map_err(|e| match e {
                    FetchError::Status(code @ (401 | 403)) => {
                        FetchError::Unauthorized(format!("session exchange rejected ({})", code))
                    }
                    other => other,
                })?;
            let token = SessionToken::from_response(response, Utc::now());
            let value = token.token.clone();
            cache.store(token);
            Ok(value)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::Cell;

    #[test]
    fn test_decode_malformed() {
        let err = decode::<BuoyList>("{\"buoys\": 3}").unwrap_err();
        assert!(matches!(err, FetchError::Malformed(_)));
    }

    #[tokio::test]
    async fn test_static_token_needs_no_exchange() {
        let cache = TokenCache::new();
        let calls = Cell::new(0);
        let token = resolve_token(&Credentials::Token("abc".into()), &cache, |_, _| async {
            calls.set(calls.get() + 1);
            Err(FetchError::Status(500))
        })
        .await;
        assert_eq!(token, Ok("abc".to_string()));
        assert_eq!(calls.get(), 0);
    }

    #[tokio::test]
    async fn test_missing_credentials_are_unauthorized() {
        let cache = TokenCache::new();
        let token = resolve_token(&Credentials::None, &cache, |_, _| async {
            Ok(SessionResponse { token: "t".into(), expires_in: 60 })
        })
        .await;
        assert!(token.unwrap_err().is_auth());
    }

    #[tokio::test]
    async fn test_session_token_is_cached() {
        let cache = TokenCache::new();
        let credentials = Credentials::Session { username: "op".into(), password: "pw".into() };
        let calls = Cell::new(0);
        for _ in 0..3 {
            let token = resolve_token(&credentials, &cache, |user, pass| {
                calls.set(calls.get() + 1);
                async move {
                    assert_eq!((user.as_str(), pass.as_str()), ("op", "pw"));
                    Ok(SessionResponse { token: "session-1".into(), expires_in: 900 })
                }
            })
            .await;
            assert_eq!(token, Ok("session-1".to_string()));
        }
        assert_eq!(calls.get(), 1);
    }

    #[tokio::test]
    async fn test_rejected_exchange_maps_to_unauthorized() {
        let cache = TokenCache::new();
        let credentials = Credentials::Session { username: "op".into(), password: "bad".into() };
        let token = resolve_token(&credentials, &cache, |_, _| async { Err(FetchError::Status(401)) }).await;
        assert!(matches!(token, Err(FetchError::Unauthorized(_))));
        assert_eq!(cache.fresh(Utc::now()), None);
    }
}
