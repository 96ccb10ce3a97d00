use std::collections::HashMap;
use std::sync::Arc;

use anyhow::{bail, Result};
use chrono::{DateTime, Duration, Utc};
use floatchat_core::Role;
use floatchat_dataset::plot::PlotSpec;
use floatchat_dataset::ArgoDataset;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub const MAX_TRANSCRIPT_MESSAGES: usize = 40;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub plot: Option<PlotSpec>,
    pub at: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            plot: None,
            at: Utc::now(),
        }
    }

    pub fn assistant(content: impl Into<String>, plot: Option<PlotSpec>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            plot,
            at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct DashboardSession {
    pub session_id: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
    pub messages: Vec<ChatMessage>,
    pub dataset: Arc<ArgoDataset>,
}

impl DashboardSession {
    pub fn new(dataset: ArgoDataset, ttl: Duration) -> Self {
        let now = Utc::now();
        Self {
            session_id: Uuid::new_v4().to_string(),
            created_at: now,
            expires_at: expiry_after(now, ttl),
            messages: Vec::new(),
            dataset: Arc::new(dataset),
        }
    }

    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

// Saturates instead of overflowing.
pub fn expiry_after(now: DateTime<Utc>, ttl: Duration) -> DateTime<Utc> {
    now.checked_add_signed(ttl)
        .unwrap_or(DateTime::<Utc>::MAX_UTC)
}

pub trait SessionRepository: Send + Sync {
    async fn load_session(&self, session_id: &str) -> Result<Option<DashboardSession>>;
    async fn upsert_session(&self, session: &DashboardSession) -> Result<()>;
    async fn append_messages(
        &self,
        session_id: &str,
        messages: Vec<ChatMessage>,
        expires_at: DateTime<Utc>,
    ) -> Result<()>;
    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64>;
}

#[derive(Clone, Default)]
pub struct MemoryStore {
    sessions: Arc<RwLock<HashMap<String, DashboardSession>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().len()
    }
}

impl SessionRepository for MemoryStore {
    async fn load_session(&self, session_id: &str) -> Result<Option<DashboardSession>> {
        let now = Utc::now();
        Ok(self
            .sessions
            .read()
            .get(session_id)
            .filter(|session| !session.is_expired(now))
            .cloned())
    }

    async fn upsert_session(&self, session: &DashboardSession) -> Result<()> {
        self.sessions
            .write()
            .insert(session.session_id.clone(), session.clone());
        Ok(())
    }

    async fn append_messages(
        &self,
        session_id: &str,
        messages: Vec<ChatMessage>,
        expires_at: DateTime<Utc>,
    ) -> Result<()> {
        let mut sessions = self.sessions.write();
        let Some(session) = sessions.get_mut(session_id) else {
            bail!("session {} not found", session_id);
        };
        if session.is_expired(Utc::now()) {
            bail!("session {} expired", session_id);
        }
        session.messages.extend(messages);
        if session.messages.len() > MAX_TRANSCRIPT_MESSAGES {
            let keep_from = session.messages.len() - MAX_TRANSCRIPT_MESSAGES;
            session.messages = session.messages.split_off(keep_from);
        }
        session.expires_at = expires_at;
        Ok(())
    }

    async fn purge_expired(&self, now: DateTime<Utc>) -> Result<u64> {
        let mut removed = 0_u64;
        self.sessions.write().retain(|_, value| {
            let keep = !value.is_expired(now);
            if !keep {
                removed += 1;
            }
            keep
        });

        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn empty_session(ttl: Duration) -> DashboardSession {
        DashboardSession::new(ArgoDataset::from_rows(Utc::now(), Vec::new()), ttl)
    }

    #[tokio::test]
    async fn upsert_then_load() {
        let store = MemoryStore::new();
        let session = empty_session(Duration::hours(1));
        store.upsert_session(&session).await.unwrap();

        let loaded = store.load_session(&session.session_id).await.unwrap();
        assert_eq!(loaded.map(|s| s.session_id), Some(session.session_id));
        assert!(store.load_session("missing").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn append_extends_transcript() {
        let store = MemoryStore::new();
        let session = empty_session(Duration::hours(1));
        store.upsert_session(&session).await.unwrap();

        store
            .append_messages(
                &session.session_id,
                vec![ChatMessage::user("hi"), ChatMessage::assistant("hello", None)],
                session.expires_at,
            )
            .await
            .unwrap();

        let loaded = store
            .load_session(&session.session_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.messages.len(), 2);
        assert_eq!(loaded.messages[0].role, Role::User);

        let missing = store
            .append_messages("missing", Vec::new(), Utc::now())
            .await;
        assert!(missing.is_err());
    }

    #[tokio::test]
    async fn transcript_keeps_latest_messages() {
        let store = MemoryStore::new();
        let session = empty_session(Duration::hours(1));
        store.upsert_session(&session).await.unwrap();

        for idx in 0..100 {
            store
                .append_messages(
                    &session.session_id,
                    vec![
                        ChatMessage::user(format!("q{idx}")),
                        ChatMessage::assistant(format!("a{idx}"), None),
                    ],
                    session.expires_at,
                )
                .await
                .unwrap();
        }

        let loaded = store
            .load_session(&session.session_id)
            .await
            .unwrap()
            .unwrap();
        assert_eq!(loaded.messages.len(), MAX_TRANSCRIPT_MESSAGES);
        assert_eq!(loaded.messages[0].content, "q80");
        assert_eq!(loaded.messages[MAX_TRANSCRIPT_MESSAGES - 1].content, "a99");
    }

    #[tokio::test]
    async fn expired_sessions_are_not_served() {
        let store = MemoryStore::new();
        let session = empty_session(Duration::seconds(-1));
        store.upsert_session(&session).await.unwrap();

        assert!(store.load_session(&session.session_id).await.unwrap().is_none());
        let revived = store
            .append_messages(
                &session.session_id,
                vec![ChatMessage::user("hi")],
                Utc::now() + Duration::hours(1),
            )
            .await;
        assert!(revived.is_err());
        assert_eq!(store.session_count(), 1);
    }

    #[test]
    fn expiry_saturates_on_overflow() {
        let now = Utc::now();
        assert_eq!(expiry_after(now, Duration::hours(1)), now + Duration::hours(1));
        assert_eq!(
            expiry_after(DateTime::<Utc>::MAX_UTC, Duration::hours(1)),
            DateTime::<Utc>::MAX_UTC
        );
        let session = empty_session(Duration::days(365 * 300_000));
        assert_eq!(session.expires_at, DateTime::<Utc>::MAX_UTC);
    }

    #[tokio::test]
    async fn purge_drops_expired_sessions() {
        let store = MemoryStore::new();
        store
            .upsert_session(&empty_session(Duration::seconds(-1)))
            .await
            .unwrap();
        store
            .upsert_session(&empty_session(Duration::hours(1)))
            .await
            .unwrap();

        assert_eq!(store.purge_expired(Utc::now()).await.unwrap(), 1);
        assert_eq!(store.session_count(), 1);
    }
}
