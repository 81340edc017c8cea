//! In-memory session store. Nothing here outlives the process.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio::time::Instant;
use tracing::info;
use uuid::Uuid;

use crate::controller::workspace::Workspace;
use crate::errors::AppError;

struct Entry {
    workspace: Workspace,
    last_touched: Instant,
}

impl Entry {
    fn touch(&mut self) -> &mut Workspace {
        self.last_touched = Instant::now();
        &mut self.workspace
    }
}

/// Workspaces keyed by session id.
///
/// Callers must not hold the lock across the model call; use `update` for
/// each transition instead. Abandoned sessions are dropped by `sweep_idle`.
#[derive(Clone, Default)]
pub struct SessionStore {
    inner: Arc<Mutex<HashMap<Uuid, Entry>>>,
}

impl SessionStore {
    pub async fn create(&self) -> (Uuid, Workspace) {
        let id = Uuid::new_v4();
        let workspace = Workspace::default();
        self.inner.lock().await.insert(
            id,
            Entry {
                workspace: workspace.clone(),
                last_touched: Instant::now(),
            },
        );
        (id, workspace)
    }

    pub async fn snapshot(&self, id: Uuid) -> Result<Workspace, AppError> {
        let mut sessions = self.inner.lock().await;
        let entry = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        Ok(entry.touch().clone())
    }

    /// Runs one transition under the lock.
    pub async fn update<T>(
        &self,
        id: Uuid,
        transition: impl FnOnce(&mut Workspace) -> T,
    ) -> Result<T, AppError> {
        let mut sessions = self.inner.lock().await;
        let entry = sessions.get_mut(&id).ok_or_else(|| not_found(id))?;
        Ok(transition(entry.touch()))
    }

    pub async fn remove(&self, id: Uuid) -> Result<(), AppError> {
        self.inner
            .lock()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or_else(|| not_found(id))
    }

    /// Drops sessions idle for at least `max_idle`. A session with a model
    /// call in flight is kept. Returns how many were dropped.
    pub async fn sweep_idle(&self, max_idle: Duration) -> usize {
        let mut sessions = self.inner.lock().await;
        let before = sessions.len();
        sessions.retain(|_, entry| {
            entry.workspace.is_loading() || entry.last_touched.elapsed() < max_idle
        });
        before - sessions.len()
    }

    pub async fn count(&self) -> usize {
        self.inner.lock().await.len()
    }

    /// Background task that sweeps idle sessions on a fixed period.
    pub fn spawn_sweeper(&self, max_idle: Duration) -> tokio::task::JoinHandle<()> {
        let store = self.clone();
        let period = (max_idle / 4).max(Duration::from_secs(1));
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            loop {
                ticker.tick().await;
                let dropped = store.sweep_idle(max_idle).await;
                if dropped > 0 {
                    info!(
                        "Discarded {dropped} idle sessions, {} remain",
                        store.count().await
                    );
                }
            }
        })
    }
}

fn not_found(id: Uuid) -> AppError {
    AppError::NotFound(format!("Session {id} not found"))
}
