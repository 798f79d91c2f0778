//! `reqwest` transport used by the CLI.

use crate::auth::{CredentialCell, SessionRequest, SessionResponse, TokenCache};
use crate::client::{decode, resolve_token, BuoyApi};
use crate::config::{ApiConfig, Credentials};
use crate::endpoints::{self, APPLICATION_JSON, HEADER_ACCEPT, HEADER_TOKEN};
use bitbuoy_core::buoy::BuoyList;
use bitbuoy_core::error::FetchError;
use bitbuoy_core::measurement::Measurement;
use log::{debug, warn};
use reqwest::{Client, RequestBuilder, StatusCode, Url};
use serde::de::DeserializeOwned;

pub struct HttpClient {
    client: Client,
    config: ApiConfig,
    credentials: CredentialCell,
    tokens: TokenCache,
}

/// `POST {base}/measurements/?serial_numbers=B001,B002`, encoded by `Url`.
fn measurements_url(base_url: &str, serial_numbers: &[String]) -> Result<Url, FetchError> {
    let mut url = Url::parse(&endpoints::measurements_path(base_url))
        .map_err(|e| FetchError::Network(format!("invalid API URL {}: {}", base_url, e)))?;
    url.query_pairs_mut()
        .append_pair(endpoints::SERIAL_NUMBERS_PARAM, &serial_numbers.join(","));
    Ok(url)
}

impl HttpClient {
    pub fn new(config: ApiConfig) -> Result<Self, FetchError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;
        Ok(Self {
            client,
            credentials: CredentialCell::new(config.credentials.clone()),
            config,
            tokens: TokenCache::new(),
        })
    }

    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    async fn token(&self) -> Result<String, FetchError> {
        let credentials = self.credentials.get();
        resolve_token(&credentials, &self.tokens, |username, password| {
            self.exchange_session(username, password)
        })
        .await
    }

    async fn exchange_session(&self, username: String, password: String) -> Result<SessionResponse, FetchError> {
        let request = self
            .client
            .post(endpoints::session_url(&self.config.base_url))
            .json(&SessionRequest {
                username: &username,
                password: &password,
            });
        self.send_json(request).await
    }

    async fn send_json<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, FetchError> {
        let response = request
            .header(HEADER_ACCEPT, APPLICATION_JSON)
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        debug!("{} {}", status, response.url());
        if !status.is_success() {
            if status == StatusCode::UNAUTHORIZED {
                warn!("Token rejected; clearing cached session");
                self.tokens.clear();
            }
            return Err(FetchError::Status(status.as_u16()));
        }

        let body = response
            .text()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;
        decode(&body)
    }
}

impl BuoyApi for HttpClient {
    async fn fetch_buoys(&self) -> Result<BuoyList, FetchError> {
        let token = self.token().await?;
        let url = endpoints::buoys_url(&self.config.base_url, self.config.user_id);
        self.send_json(self.client.get(url).header(HEADER_TOKEN, token))
            .await
    }

    async fn fetch_measurements(&self, serial_numbers: &[String]) -> Result<Vec<Measurement>, FetchError> {
        let token = self.token().await?;
        let url = measurements_url(&self.config.base_url, serial_numbers)?;
        self.send_json(self.client.post(url).header(HEADER_TOKEN, token))
            .await
    }

    fn sign_in(&self, credentials: Credentials) {
        self.credentials.set(credentials);
        self.tokens.clear();
    }

    fn sign_out(&self) {
        self.sign_in(Credentials::None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measurements_url_joins_serials() {
        let serials = vec!["B001".to_string(), "B002".to_string()];
        let url = measurements_url("https://api.example.org", &serials).unwrap();
        assert_eq!(url.path(), "/measurements/");
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("serial_numbers".to_string(), "B001,B002".to_string())]);
    }

    #[test]
    fn test_measurements_url_encodes_serials() {
        let serials = vec!["B 1&x".to_string()];
        let url = measurements_url("http://h", &serials).unwrap();
        assert!(!url.query().unwrap_or_default().contains('&'));
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();
        assert_eq!(pairs, vec![("serial_numbers".to_string(), "B 1&x".to_string())]);
    }

    #[test]
    fn test_invalid_base_url() {
        assert!(matches!(measurements_url("not a url", &[]), Err(FetchError::Network(_))));
    }

    #[tokio::test]
    async fn test_signed_out_client_needs_sign_in() {
        let config = ApiConfig::new("http://127.0.0.1:9", 1, Credentials::Token("abc".into()));
        let client = HttpClient::new(config).unwrap();
        assert_eq!(client.token().await, Ok("abc".to_string()));
        client.sign_out();
        assert!(client.token().await.unwrap_err().is_auth());
        client.sign_in(Credentials::Token("def".into()));
        assert_eq!(client.token().await, Ok("def".to_string()));
    }
}
