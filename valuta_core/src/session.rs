//! Per-chat conversation state, held in process memory.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::state_machine::ConversationState;

/// Chat identifier, as assigned by the transport.
pub type ChatId = i64;

#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Current state; `Idle` when nothing is stored.
    async fn get(&self, chat_id: ChatId) -> ConversationState;

    /// Store `state`. Storing `Idle` is the same as [`SessionStore::clear`].
    async fn put(&self, chat_id: ChatId, state: ConversationState);

    async fn clear(&self, chat_id: ChatId);
}

/// Mutex-guarded map; lost on restart.
#[derive(Debug, Clone, Default)]
pub struct InMemorySessionStore {
    sessions: Arc<Mutex<HashMap<ChatId, ConversationState>>>,
}

impl InMemorySessionStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of chats with a conversion in progress.
    pub async fn active_count(&self) -> usize {
        self.sessions.lock().await.len()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn get(&self, chat_id: ChatId) -> ConversationState {
        let sessions = self.sessions.lock().await;
        sessions.get(&chat_id).copied().unwrap_or_default()
    }

    async fn put(&self, chat_id: ChatId, state: ConversationState) {
        let mut sessions = self.sessions.lock().await;
        if state.is_idle() {
            sessions.remove(&chat_id);
        } else {
            sessions.insert(chat_id, state);
        }
    }

    async fn clear(&self, chat_id: ChatId) {
        self.sessions.lock().await.remove(&chat_id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Currency;

    #[tokio::test]
    async fn missing_chat_is_idle() {
        let store = InMemorySessionStore::new();
        assert!(store.get(42).await.is_idle());
    }

    #[tokio::test]
    async fn put_get_clear() {
        let store = InMemorySessionStore::new();
        let state = ConversationState::BaseSelected {
            base: Currency::Eur,
        };
        store.put(1, state).await;
        store.put(2, state).await;
        assert_eq!(store.get(1).await, state);
        assert_eq!(store.active_count().await, 2);

        store.clear(1).await;
        assert!(store.get(1).await.is_idle());
        assert_eq!(store.get(2).await, state);
    }

    #[tokio::test]
    async fn storing_idle_removes_entry() {
        let store = InMemorySessionStore::new();
        store
            .put(
                7,
                ConversationState::BaseSelected {
                    base: Currency::Usd,
                },
            )
            .await;
        store.put(7, ConversationState::Idle).await;
        assert_eq!(store.active_count().await, 0);
    }
}
