// src/cli/context.rs — Wiring shared by every command

use std::sync::Arc;

use crate::client::{ApiClient, HttpAuthenticator, Transport};
use crate::infra::config::Config;
use crate::records::RecordStore;
use crate::session::SessionStore;
use crate::storage::{KeyValueStore, SqliteStore};

/// One session and one record store over the same durable substrate,
/// plus the authenticated HTTP client bound to that session.
pub struct AppContext {
    pub config: Config,
    pub sessions: Arc<SessionStore>,
    pub records: RecordStore,
    pub api: ApiClient,
    /// The on-disk store, when the context was opened from one.
    pub db: Option<Arc<SqliteStore>>,
}

impl AppContext {
    /// Open storage, build the client and restore any saved session.
    pub async fn init(config: Config) -> anyhow::Result<Self> {
        let path = config.storage.resolve_path()?;
        let db = Arc::new(SqliteStore::open(&path)?);
        let mut ctx = Self::with_store(config, db.clone()).await?;
        ctx.db = Some(db);
        Ok(ctx)
    }

    pub async fn with_store(config: Config, kv: Arc<dyn KeyValueStore>) -> anyhow::Result<Self> {
        let transport = Transport::new(&config.api)?;
        let auth = Arc::new(HttpAuthenticator::new(transport.clone()));
        let sessions = Arc::new(SessionStore::new(kv.clone(), auth));
        sessions.restore().await;

        Ok(Self {
            records: RecordStore::new(kv),
            api: ApiClient::new(transport, sessions.clone()),
            sessions,
            config,
            db: None,
        })
    }

    /// Fail early for commands that need a logged-in user.
    pub fn require_login(&self) -> anyhow::Result<()> {
        if self.sessions.is_authenticated() {
            Ok(())
        } else {
            Err(crate::infra::errors::StudyError::NotAuthenticated.into())
        }
    }
}
