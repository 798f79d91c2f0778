//! Browser `fetch` transport used by the WASM dashboard.

use crate::auth::{CredentialCell, SessionRequest, SessionResponse, TokenCache};
use crate::client::{decode, resolve_token, BuoyApi};
use crate::config::{ApiConfig, Credentials};
use crate::endpoints::{self, APPLICATION_JSON, HEADER_ACCEPT, HEADER_CONTENT_TYPE, HEADER_TOKEN};
use bitbuoy_core::buoy::BuoyList;
use bitbuoy_core::error::FetchError;
use bitbuoy_core::measurement::Measurement;
use log::{debug, warn};
use serde::de::DeserializeOwned;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, Response};

pub struct WebClient {
    config: ApiConfig,
    credentials: CredentialCell,
    tokens: TokenCache,
}

fn js_error(value: JsValue) -> FetchError {
    let message = value
        .as_string()
        .or_else(|| {
            value
                .dyn_ref::<js_sys::Error>()
                .map(|e| String::from(e.message()))
        })
        .unwrap_or_else(|| format!("{:?}", value));
    FetchError::Network(message)
}

impl WebClient {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            credentials: CredentialCell::new(config.credentials.clone()),
            config,
            tokens: TokenCache::new(),
        }
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
        let body = serde_json::to_string(&SessionRequest {
            username: &username,
            password: &password,
        })
        .map_err(|e| FetchError::Malformed(e.to_string()))?;
        let url = endpoints::session_url(&self.config.base_url);
        self.request_json("POST", &url, None, Some(body)).await
    }

    async fn request_json<T: DeserializeOwned>(
        &self,
        method: &str,
        url: &str,
        token: Option<&str>,
        body: Option<String>,
    ) -> Result<T, FetchError> {
        let opts = RequestInit::new();
        opts.set_method(method);
        let has_body = body.is_some();
        if let Some(body) = body {
            opts.set_body(&JsValue::from_str(&body));
        }

        let request = Request::new_with_str_and_init(url, &opts).map_err(js_error)?;
        let headers = request.headers();
        headers.set(HEADER_ACCEPT, APPLICATION_JSON).map_err(js_error)?;
        if has_body {
            headers.set(HEADER_CONTENT_TYPE, APPLICATION_JSON).map_err(js_error)?;
        }
        if let Some(token) = token {
            headers.set(HEADER_TOKEN, token).map_err(js_error)?;
        }

        let window = web_sys::window()
            .ok_or_else(|| FetchError::Network("no window available".to_string()))?;
        let value = JsFuture::from(window.fetch_with_request(&request))
            .await
            .map_err(js_error)?;
        let response: Response = value
            .dyn_into()
            .map_err(|_| FetchError::Malformed("fetch did not return a Response".to_string()))?;

        debug!("{} {} {}", method, response.status(), url);
        if !response.ok() {
            if response.status() == 401 {
                warn!("Token rejected; clearing cached session");
                self.tokens.clear();
            }
            return Err(FetchError::Status(response.status()));
        }

        let text = JsFuture::from(response.text().map_err(js_error)?)
            .await
            .map_err(js_error)?;
        let body = text
            .as_string()
            .ok_or_else(|| FetchError::Malformed("response body is not text".to_string()))?;
        decode(&body)
    }
}

impl BuoyApi for WebClient {
    async fn fetch_buoys(&self) -> Result<BuoyList, FetchError> {
        let token = self.token().await?;
        let url = endpoints::buoys_url(&self.config.base_url, self.config.user_id);
        self.request_json("GET", &url, Some(&token), None).await
    }

    async fn fetch_measurements(&self, serial_numbers: &[String]) -> Result<Vec<Measurement>, FetchError> {
        let token = self.token().await?;
        let serials = js_sys::encode_uri_component(&serial_numbers.join(","));
        let url = format!(
            "{}?{}={}",
            endpoints::measurements_path(&self.config.base_url),
            endpoints::SERIAL_NUMBERS_PARAM,
            String::from(serials)
        );
        self.request_json("POST", &url, Some(&token), None).await
    }

    fn sign_in(&self, credentials: Credentials) {
        self.credentials.set(credentials);
        self.tokens.clear();
    }

    fn sign_out(&self) {
        self.sign_in(Credentials::None);
    }
}
