//! SSE session bookkeeping

use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{mpsc, RwLock};
use tracing::debug;
use uuid::Uuid;

use crate::protocol::McpMessage;

/// Outgoing messages buffered per session before the stream applies backpressure
const SESSION_BUFFER: usize = 32;

/// Open SSE sessions, keyed by session id
#[derive(Clone, Default)]
pub(crate) struct SessionStore {
    sessions: Arc<RwLock<HashMap<Uuid, mpsc::Sender<McpMessage>>>>,
}

impl SessionStore {
    /// Open a new session, returning its id, the receiving end of its
    /// message channel and a guard that closes the session when dropped
    pub async fn open(&self) -> (Uuid, mpsc::Receiver<McpMessage>, SessionGuard) {
        let id = Uuid::new_v4();
        let (tx, rx) = mpsc::channel(SESSION_BUFFER);

        self.sessions.write().await.insert(id, tx);
        debug!("Opened SSE session {}", id);

        let guard = SessionGuard {
            id,
            store: self.clone(),
        };
        (id, rx, guard)
    }

    /// Sender for a session, if it is still open
    pub async fn sender(&self, id: &Uuid) -> Option<mpsc::Sender<McpMessage>> {
        self.sessions.read().await.get(id).cloned()
    }

    pub async fn close(&self, id: &Uuid) {
        if self.sessions.write().await.remove(id).is_some() {
            debug!("Closed SSE session {}", id);
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

/// Removes its session from the store when the owning stream is dropped
pub(crate) struct SessionGuard {
    id: Uuid,
    store: SessionStore,
}

impl Drop for SessionGuard {
    fn drop(&mut self) {
        let store = self.store.clone();
        let id = self.id;

        // Drop runs outside of async context; closing needs the write lock
        if let Ok(handle) = tokio::runtime::Handle::try_current() {
            handle.spawn(async move { store.close(&id).await });
        }
    }
}
