// src/client/auth.rs — Login and registration endpoints

use async_trait::async_trait;
use reqwest::Method;
use tracing::debug;

use super::{decode, error_message, Transport};
use crate::infra::errors::StudyError;
use crate::session::types::{AuthResponse, LoginRequest, RegisterRequest};

/// Exchanges credentials for a (user, token) pair.
///
/// Rejections become [`StudyError::Authentication`]; transport failures stay
/// [`StudyError::Network`].
#[async_trait]
pub trait Authenticator: Send + Sync {
    async fn login(&self, request: LoginRequest) -> Result<AuthResponse, StudyError>;

    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, StudyError>;
}

/// `POST /api/auth/login` and `POST /api/auth/register`.
///
/// These calls never carry a bearer token, so this type does not hold the
/// session.
pub struct HttpAuthenticator {
    transport: Transport,
}

impl HttpAuthenticator {
    pub fn new(transport: Transport) -> Self {
        Self { transport }
    }

    async fn exchange<B: serde::Serialize + Sync>(
        &self,
        endpoint: &str,
        body: &B,
    ) -> Result<AuthResponse, StudyError> {
        let response = self
            .transport
            .request(Method::POST, &["api", "auth", endpoint])
            .json(body)
            .send()
            .await?;

        if !response.status().is_success() {
            let (status, message) = error_message(response).await;
            debug!(endpoint, %status, "auth rejected");
            return Err(StudyError::authentication(message));
        }

        decode(response).await
    }
}

#[async_trait]
impl Authenticator for HttpAuthenticator {
    async fn login(&self, request: LoginRequest) -> Result<AuthResponse, StudyError> {
        self.exchange("login", &request).await
    }

    async fn register(&self, request: RegisterRequest) -> Result<AuthResponse, StudyError> {
        self.exchange("register", &request).await
    }
}
