//! In-memory session store — the default backend.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::RwLock;
use uuid::Uuid;

use crate::models::session::Session;
use crate::session::{SessionMutation, SessionStore, StoreError};

#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, id: Uuid) -> Result<Session, StoreError> {
        self.sessions
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn put(&self, session: Session) -> Result<(), StoreError> {
        self.sessions.write().await.insert(session.id, session);
        Ok(())
    }

    async fn update(&self, id: Uuid, mutation: SessionMutation) -> Result<Session, StoreError> {
        let mut sessions = self.sessions.write().await;
        let session = sessions.get_mut(&id).ok_or(StoreError::NotFound(id))?;
        mutation(session);
        session.updated_at = Utc::now();
        Ok(session.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::session::SmeResponse;

    #[tokio::test]
    async fn test_put_then_get_round_trips() {
        let store = InMemorySessionStore::new();
        let session = Session::new();
        let id = session.id;
        store.put(session).await.unwrap();
        let loaded = store.get(id).await.unwrap();
        assert_eq!(loaded.id, id);
    }

    #[tokio::test]
    async fn test_get_unknown_id_is_not_found() {
        let store = InMemorySessionStore::new();
        let id = Uuid::new_v4();
        assert!(matches!(
            store.get(id).await,
            Err(StoreError::NotFound(missing)) if missing == id
        ));
    }

    #[tokio::test]
    async fn test_update_applies_mutation_and_bumps_updated_at() {
        let store = InMemorySessionStore::new();
        let session = Session::new();
        let id = session.id;
        let created_at = session.created_at;
        store.put(session).await.unwrap();

        let updated = store
            .update(
                id,
                Box::new(|s| {
                    s.sme_responses.push(SmeResponse {
                        question: "Q".to_string(),
                        answer: "A".to_string(),
                        category: None,
                    })
                }),
            )
            .await
            .unwrap();

        assert_eq!(updated.sme_responses.len(), 1);
        assert!(updated.updated_at >= created_at);

        let reloaded = store.get(id).await.unwrap();
        assert_eq!(reloaded.sme_responses.len(), 1);
    }

    #[tokio::test]
    async fn test_update_unknown_id_is_not_found() {
        let store = InMemorySessionStore::new();
        let result = store.update(Uuid::new_v4(), Box::new(|_| {})).await;
        assert!(matches!(result, Err(StoreError::NotFound(_))));
    }
}
