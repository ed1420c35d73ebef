// src/client/mod.rs — HTTP client for the learning backend
//
// Every request carries `Authorization: Bearer <token>` when the session
// holds one. A 401 from any endpoint clears the session before the error
// reaches the caller.

pub mod auth;
pub mod resources;
pub mod types;

use reqwest::{Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::sync::Arc;
use tracing::debug;
use url::Url;

use crate::infra::config::ApiConfig;
use crate::infra::errors::StudyError;
use crate::session::SessionStore;

pub use auth::{Authenticator, HttpAuthenticator};

/// Shared reqwest client plus the configured base URL. Cloning is cheap.
#[derive(Debug, Clone)]
pub struct Transport {
    http: reqwest::Client,
    base_url: Url,
}

impl Transport {
    pub fn new(config: &ApiConfig) -> Result<Self, StudyError> {
        let base_url = Url::parse(&config.base_url)
            .map_err(|e| StudyError::Config(format!("invalid base url '{}': {e}", config.base_url)))?;
        if base_url.cannot_be_a_base() {
            return Err(StudyError::Config(format!(
                "base url '{base_url}' cannot carry a path"
            )));
        }
        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .user_agent(concat!("studydesk/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| StudyError::Config(format!("failed to build HTTP client: {e}")))?;
        Ok(Self { http, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Base URL with `segments` appended, each percent-encoded.
    pub fn url(&self, segments: &[&str]) -> Url {
        let mut url = self.base_url.clone();
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }

    pub fn request(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let url = self.url(segments);
        debug!(%method, %url, "request");
        self.http.request(method, url)
    }
}

/// Pull the server's `{"message": "..."}` out of an error response body.
pub(crate) async fn error_message(response: Response) -> (StatusCode, Option<String>) {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<serde_json::Value>(&body)
        .ok()
        .and_then(|v| v["message"].as_str().map(str::to_string))
        .filter(|m| !m.trim().is_empty());
    (status, message)
}

pub(crate) async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, StudyError> {
    response
        .json::<T>()
        .await
        .map_err(|e| StudyError::InvalidResponse(e.to_string()))
}

/// Authenticated client used by every resource call.
#[derive(Clone)]
pub struct ApiClient {
    transport: Transport,
    session: Arc<SessionStore>,
}

impl ApiClient {
    pub fn new(transport: Transport, session: Arc<SessionStore>) -> Self {
        Self { transport, session }
    }

    pub fn session(&self) -> &Arc<SessionStore> {
        &self.session
    }

    pub fn base_url(&self) -> &Url {
        self.transport.base_url()
    }

    fn authorized(&self, method: Method, segments: &[&str]) -> RequestBuilder {
        let builder = self.transport.request(method, segments);
        match self.session.current_token() {
            Some(token) if !token.is_empty() => builder.bearer_auth(token),
            _ => builder,
        }
    }

    /// Send and check the status. 401 invalidates the session.
    async fn send(&self, builder: RequestBuilder) -> Result<Response, StudyError> {
        let response = builder.send().await?;
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            self.session.invalidate().await;
            return Err(StudyError::Unauthorized);
        }
        if !status.is_success() {
            let (status, message) = error_message(response).await;
            let message = message.unwrap_or_else(|| {
                status
                    .canonical_reason()
                    .unwrap_or("request failed")
                    .to_string()
            });
            return Err(StudyError::Network {
                status: Some(status.as_u16()),
                message,
            });
        }
        Ok(response)
    }

    pub async fn get<T: DeserializeOwned>(&self, segments: &[&str]) -> Result<T, StudyError> {
        let response = self.send(self.authorized(Method::GET, segments)).await?;
        decode(response).await
    }

    pub async fn get_with_query<T, Q>(&self, segments: &[&str], query: &Q) -> Result<T, StudyError>
    where
        T: DeserializeOwned,
        Q: Serialize + ?Sized,
    {
        let builder = self.authorized(Method::GET, segments).query(query);
        decode(self.send(builder).await?).await
    }

    pub async fn post<B, T>(&self, segments: &[&str], body: &B) -> Result<T, StudyError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.authorized(Method::POST, segments).json(body);
        decode(self.send(builder).await?).await
    }

    pub async fn put<B, T>(&self, segments: &[&str], body: &B) -> Result<T, StudyError>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let builder = self.authorized(Method::PUT, segments).json(body);
        decode(self.send(builder).await?).await
    }

    /// PUT whose response body is ignored.
    pub async fn put_unit<B>(&self, segments: &[&str], body: &B) -> Result<(), StudyError>
    where
        B: Serialize + ?Sized,
    {
        let builder = self.authorized(Method::PUT, segments).json(body);
        self.send(builder).await?;
        Ok(())
    }

    pub async fn delete(&self, segments: &[&str]) -> Result<(), StudyError> {
        self.send(self.authorized(Method::DELETE, segments)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn transport(base: &str) -> Transport {
        Transport::new(&ApiConfig {
            base_url: base.into(),
            timeout_seconds: 10,
        })
        .unwrap()
    }

    #[test]
    fn test_url_appends_segments() {
        let t = transport("http://localhost:5001");
        assert_eq!(
            t.url(&["api", "courses", "c1"]).as_str(),
            "http://localhost:5001/api/courses/c1"
        );
    }

    #[test]
    fn test_url_keeps_base_prefix_and_encodes() {
        let t = transport("https://example.com/mobile/");
        assert_eq!(
            t.url(&["api", "chapters", "a b/c"]).as_str(),
            "https://example.com/mobile/api/chapters/a%20b%2Fc"
        );
    }

    #[test]
    fn test_rejects_unusable_base() {
        let err = Transport::new(&ApiConfig {
            base_url: "mailto:someone@example.com".into(),
            timeout_seconds: 10,
        })
        .unwrap_err();
        assert!(matches!(err, StudyError::Config(_)));
    }
}
