//! Session storage — keyed mapping from session id to accumulated records.
//!
//! The engine's analysis and synthesis functions are pure and store-free;
//! all session bookkeeping goes through this injected interface. Per-session
//! write serialization is the caller's contract: the store does not guard
//! against two concurrent writers to the same session id beyond keeping
//! each individual operation atomic.

pub mod memory;
pub mod redis;

use async_trait::async_trait;
use thiserror::Error;
use uuid::Uuid;

use crate::models::session::Session;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("session {0} not found")]
    NotFound(Uuid),

    #[error("session store backend error: {0}")]
    Backend(String),
}

/// Closure applied to a session under `update`.
pub type SessionMutation = Box<dyn FnOnce(&mut Session) + Send>;

#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn get(&self, id: Uuid) -> Result<Session, StoreError>;

    async fn put(&self, session: Session) -> Result<(), StoreError>;

    /// Applies `mutation` to the stored session and returns the updated
    /// record. Bumps `updated_at`.
    async fn update(&self, id: Uuid, mutation: SessionMutation) -> Result<Session, StoreError>;
}
