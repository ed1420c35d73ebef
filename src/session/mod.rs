// src/session/mod.rs — Session lifecycle: restore, login, logout, invalidate
//
// SessionStore is the single source of truth for who is logged in. It is
// passed explicitly (usually as Arc<SessionStore>) to the HTTP client and to
// every front-end entry point; there is no global session.

pub mod types;

use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::client::auth::Authenticator;
use crate::infra::errors::StudyError;
use crate::storage::KeyValueStore;

pub use types::{AuthResponse, LoginRequest, RegisterRequest, Session, User};

/// Durable key holding the raw bearer token.
pub const TOKEN_KEY: &str = "token";
/// Durable key holding the JSON-encoded [`User`].
pub const USER_KEY: &str = "user";

pub struct SessionStore {
    kv: Arc<dyn KeyValueStore>,
    auth: Arc<dyn Authenticator>,
    state: RwLock<Option<Session>>,
    /// `true` until the first `restore()` completes.
    loading: watch::Sender<bool>,
}

impl SessionStore {
    pub fn new(kv: Arc<dyn KeyValueStore>, auth: Arc<dyn Authenticator>) -> Self {
        let (loading, _) = watch::channel(true);
        Self {
            kv,
            auth,
            state: RwLock::new(None),
            loading,
        }
    }

    // ─── Startup ────────────────────────────────────────────────────────

    /// Load a previously persisted session. Storage failures and malformed
    /// data are logged and treated as "no session". Always marks the store
    /// ready.
    pub async fn restore(&self) {
        let restored = self.read_persisted().await;
        match &restored {
            Some(session) => info!(user = %session.user.id, "restored session"),
            None => debug!("no persisted session"),
        }
        *self.write_state() = restored;
        self.loading.send_replace(false);
    }

    async fn read_persisted(&self) -> Option<Session> {
        let token = match self.kv.get(TOKEN_KEY).await {
            Ok(Some(t)) if !t.trim().is_empty() => t,
            Ok(_) => return None,
            Err(e) => {
                warn!("Failed to read stored token: {e}");
                return None;
            }
        };
        let raw_user = match self.kv.get(USER_KEY).await {
            Ok(Some(u)) => u,
            Ok(None) => return None,
            Err(e) => {
                warn!("Failed to read stored user: {e}");
                return None;
            }
        };
        match serde_json::from_str::<User>(&raw_user) {
            Ok(user) => Some(Session { user, token }),
            Err(e) => {
                warn!("Stored user profile is malformed, ignoring: {e}");
                None
            }
        }
    }

    /// Whether the startup check has not finished yet.
    pub fn is_loading(&self) -> bool {
        *self.loading.borrow()
    }

    /// Wait until `restore()` has completed.
    pub async fn wait_ready(&self) {
        let mut rx = self.loading.subscribe();
        // The sender lives in `self`, so the channel cannot close here.
        let _ = rx.wait_for(|loading| !*loading).await;
    }

    // ─── Auth actions ───────────────────────────────────────────────────

    pub async fn login(&self, identifier: &str, secret: &str) -> Result<User, StudyError> {
        let response = self
            .auth
            .login(LoginRequest::new(identifier, secret))
            .await?;
        self.establish(response).await
    }

    /// Register a new student account. `grade_level` defaults to
    /// [`types::DEFAULT_GRADE`].
    pub async fn register(
        &self,
        name: &str,
        identifier: &str,
        secret: &str,
        grade_level: Option<&str>,
    ) -> Result<User, StudyError> {
        let request =
            RegisterRequest::new(name, identifier, secret, grade_level.map(str::to_string));
        let response = self.auth.register(request).await?;
        self.establish(response).await
    }

    /// Install a fresh session in memory, then persist token and user.
    async fn establish(&self, response: AuthResponse) -> Result<User, StudyError> {
        let session = response.into_session().ok_or_else(|| {
            StudyError::InvalidResponse("auth response is missing a token or user id".into())
        })?;
        let user = session.user.clone();
        let token = session.token.clone();
        *self.write_state() = Some(session);
        info!(user = %user.id, "session established");

        self.kv.set(TOKEN_KEY, &token).await?;
        self.persist_user(&user).await?;
        Ok(user)
    }

    /// Clear the session in memory and on disk. Safe to call when logged out.
    pub async fn logout(&self) -> Result<(), StudyError> {
        let previous = self.write_state().take();
        if let Some(session) = previous {
            info!(user = %session.user.id, "logged out");
        }

        // Attempt both removals even if the first one fails.
        let token_result = self.kv.remove(TOKEN_KEY).await;
        let user_result = self.kv.remove(USER_KEY).await;
        token_result.and(user_result)
    }

    /// Cleanup after the server rejected our credentials.
    pub async fn invalidate(&self) {
        warn!("Server rejected the session token; clearing session");
        if let Err(e) = self.logout().await {
            warn!("Failed to clear persisted session: {e}");
        }
    }

    /// Replace the profile of the current user, keeping the token.
    pub async fn update_user(&self, user: User) -> Result<(), StudyError> {
        {
            let mut state = self.write_state();
            let session = state.as_mut().ok_or(StudyError::NotAuthenticated)?;
            session.user = user.clone();
        }
        self.persist_user(&user).await
    }

    async fn persist_user(&self, user: &User) -> Result<(), StudyError> {
        let json = serde_json::to_string(user)
            .map_err(|e| StudyError::StorageWrite(format!("encode user: {e}")))?;
        self.kv.set(USER_KEY, &json).await
    }

    // ─── Accessors ──────────────────────────────────────────────────────

    pub fn current_token(&self) -> Option<String> {
        self.read_state().as_ref().map(|s| s.token.clone())
    }

    pub fn current_user(&self) -> Option<User> {
        self.read_state().as_ref().map(|s| s.user.clone())
    }

    pub fn session(&self) -> Option<Session> {
        self.read_state().clone()
    }

    pub fn is_authenticated(&self) -> bool {
        self.read_state().is_some()
    }

    fn read_state(&self) -> RwLockReadGuard<'_, Option<Session>> {
        self.state.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Option<Session>> {
        self.state.write().unwrap_or_else(|e| e.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;
    use async_trait::async_trait;

    /// Accepts one fixed password and answers with a canned user.
    struct FixedAuth;

    fn canned(token: &str) -> AuthResponse {
        serde_json::from_value(serde_json::json!({
            "_id": "u1",
            "name": "Sari",
            "email": "sari@example.com",
            "role": "student",
            "grade": "12",
            "token": token,
        }))
        .unwrap()
    }

    #[async_trait]
    impl Authenticator for FixedAuth {
        async fn login(&self, request: LoginRequest) -> Result<AuthResponse, StudyError> {
            if request.password == "correct" {
                Ok(canned("tok-login"))
            } else {
                Err(StudyError::authentication(None))
            }
        }

        async fn register(&self, _request: RegisterRequest) -> Result<AuthResponse, StudyError> {
            Ok(canned("tok-register"))
        }
    }

    fn store(kv: Arc<MemoryStore>) -> SessionStore {
        SessionStore::new(kv, Arc::new(FixedAuth))
    }

    #[tokio::test]
    async fn test_loading_flag_flips_after_restore() {
        let sessions = store(Arc::new(MemoryStore::new()));
        assert!(sessions.is_loading());
        sessions.restore().await;
        assert!(!sessions.is_loading());
        sessions.wait_ready().await;
    }

    #[tokio::test]
    async fn test_failed_login_leaves_session_unchanged() {
        let kv = Arc::new(MemoryStore::new());
        let sessions = store(kv.clone());
        sessions.login("sari@example.com", "correct").await.unwrap();

        let err = sessions.login("sari@example.com", "wrong").await.unwrap_err();
        assert_eq!(err.to_string(), "Authentication failed: Invalid credentials");
        assert_eq!(sessions.current_token().as_deref(), Some("tok-login"));
    }

    #[tokio::test]
    async fn test_update_user_requires_session() {
        let sessions = store(Arc::new(MemoryStore::new()));
        let user: User = serde_json::from_str(r#"{"_id":"u1"}"#).unwrap();
        let err = sessions.update_user(user).await.unwrap_err();
        assert!(matches!(err, StudyError::NotAuthenticated));
    }

    #[tokio::test]
    async fn test_update_user_persists_profile() {
        let kv = Arc::new(MemoryStore::new());
        let sessions = store(kv.clone());
        sessions.register("Sari", "sari@example.com", "pw", None).await.unwrap();

        let mut user = sessions.current_user().unwrap();
        user.name = "Sari Dewi".into();
        sessions.update_user(user).await.unwrap();

        let raw = kv.get(USER_KEY).await.unwrap().unwrap();
        assert!(raw.contains("Sari Dewi"));
        assert_eq!(sessions.current_token().as_deref(), Some("tok-register"));
    }

    #[tokio::test]
    async fn test_blank_persisted_token_is_no_session() {
        let kv = Arc::new(MemoryStore::with_entries([
            (TOKEN_KEY, ""),
            (USER_KEY, r#"{"_id":"u1"}"#),
        ]));
        let sessions = store(kv);
        sessions.restore().await;
        assert!(!sessions.is_authenticated());
    }
}
