//! Redis-backed session store — JSON values with a sliding TTL.
//!
//! `update` is read-modify-write; per-session serialization is the
//! caller's responsibility (one in-flight write per session id).

use async_trait::async_trait;
use chrono::Utc;
use redis::AsyncCommands;
use uuid::Uuid;

use crate::models::session::Session;
use crate::session::{SessionMutation, SessionStore, StoreError};

const SESSION_TTL_SECS: u64 = 60 * 60 * 24;

pub struct RedisSessionStore {
    client: redis::Client,
}

impl RedisSessionStore {
    pub fn new(client: redis::Client) -> Self {
        Self { client }
    }

    fn key(id: Uuid) -> String {
        format!("coursecraft:session:{id}")
    }

    async fn connection(&self) -> Result<redis::aio::MultiplexedConnection, StoreError> {
        self.client
            .get_multiplexed_async_connection()
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }

    async fn write(&self, session: &Session) -> Result<(), StoreError> {
        let raw = serde_json::to_string(session)
            .map_err(|e| StoreError::Backend(format!("serialize session: {e}")))?;
        let mut con = self.connection().await?;
        con.set_ex::<_, _, ()>(Self::key(session.id), raw, SESSION_TTL_SECS)
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

#[async_trait]
impl SessionStore for RedisSessionStore {
    async fn get(&self, id: Uuid) -> Result<Session, StoreError> {
        let mut con = self.connection().await?;
        let raw: Option<String> = con
            .get(Self::key(id))
            .await
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let raw = raw.ok_or(StoreError::NotFound(id))?;
        serde_json::from_str(&raw)
            .map_err(|e| StoreError::Backend(format!("deserialize session: {e}")))
    }

    async fn put(&self, session: Session) -> Result<(), StoreError> {
        self.write(&session).await
    }

    async fn update(&self, id: Uuid, mutation: SessionMutation) -> Result<Session, StoreError> {
        let mut session = self.get(id).await?;
        mutation(&mut session);
        session.updated_at = Utc::now();
        self.write(&session).await?;
        Ok(session)
    }
}
