use crate::error::ApiError;
use crate::models::{Session, SessionConfig, SessionId};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::RwLock;

/// Trait for editing-session storage
#[async_trait]
pub trait SessionStore: Send + Sync {
    /// Store a new session (replacing any with the same id).
    ///
    /// Returns the ids of sessions evicted to make room.
    async fn insert(&self, session: Session) -> Result<Vec<SessionId>, ApiError>;

    /// Snapshot of a session
    async fn get(&self, id: &SessionId) -> Result<Option<Session>, ApiError>;

    /// Apply `change` to a session atomically and return the result.
    ///
    /// Nothing is stored if `change` fails.
    async fn update<F>(&self, id: &SessionId, change: F) -> Result<Session, ApiError>
    where
        F: FnOnce(&mut Session) -> Result<(), ApiError> + Send;

    /// Whether a session is stored, without counting as a use
    async fn contains(&self, id: &SessionId) -> Result<bool, ApiError>;

    /// Drop a session. Returns whether it existed.
    async fn remove(&self, id: &SessionId) -> Result<bool, ApiError>;
}

struct Entry {
    session: Session,
    last_used: Instant,
    /// Access order for LRU eviction
    tick: u64,
}

#[derive(Default)]
struct Sessions {
    entries: HashMap<SessionId, Entry>,
    clock: u64,
}

impl Sessions {
    fn touch(&mut self, id: &SessionId) -> Option<&mut Entry> {
        self.clock += 1;
        let tick = self.clock;
        let entry = self.entries.get_mut(id)?;
        entry.last_used = Instant::now();
        entry.tick = tick;
        Some(entry)
    }
}

/// In-memory session storage, bounded by capacity and idle time
pub struct InMemorySessionStore {
    sessions: Arc<RwLock<Sessions>>,
    max_sessions: usize,
    idle_timeout: Duration,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::with_config(SessionConfig::default())
    }

    pub fn with_config(config: SessionConfig) -> Self {
        Self::with_limits(config.max_sessions, config.idle_timeout())
    }

    /// `max_sessions` is raised to at least 1.
    pub fn with_limits(max_sessions: usize, idle_timeout: Duration) -> Self {
        Self {
            sessions: Arc::new(RwLock::new(Sessions::default())),
            max_sessions: max_sessions.max(1),
            idle_timeout,
        }
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.sessions.read().await.entries.is_empty()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: Session) -> Result<Vec<SessionId>, ApiError> {
        let mut sessions = self.sessions.write().await;
        sessions.entries.remove(&session.id);

        let mut evicted: Vec<SessionId> = sessions
            .entries
            .iter()
            .filter(|(_, entry)| entry.last_used.elapsed() >= self.idle_timeout)
            .map(|(id, _)| id.clone())
            .collect();
        for id in &evicted {
            sessions.entries.remove(id);
        }

        while sessions.entries.len() >= self.max_sessions {
            let oldest = sessions
                .entries
                .iter()
                .min_by_key(|(_, entry)| entry.tick)
                .map(|(id, _)| id.clone());
            match oldest {
                Some(id) => {
                    sessions.entries.remove(&id);
                    evicted.push(id);
                }
                None => break,
            }
        }

        if !evicted.is_empty() {
            tracing::info!(count = evicted.len(), "Evicted sessions");
        }

        sessions.clock += 1;
        let tick = sessions.clock;
        sessions.entries.insert(
            session.id.clone(),
            Entry {
                session,
                last_used: Instant::now(),
                tick,
            },
        );
        Ok(evicted)
    }

    async fn get(&self, id: &SessionId) -> Result<Option<Session>, ApiError> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.touch(id).map(|entry| entry.session.clone()))
    }

    async fn update<F>(&self, id: &SessionId, change: F) -> Result<Session, ApiError>
    where
        F: FnOnce(&mut Session) -> Result<(), ApiError> + Send,
    {
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .touch(id)
            .ok_or_else(|| ApiError::SessionNotFound(id.to_string()))?;

        let mut updated = entry.session.clone();
        change(&mut updated)?;
        entry.session = updated.clone();
        Ok(updated)
    }

    async fn contains(&self, id: &SessionId) -> Result<bool, ApiError> {
        let sessions = self.sessions.read().await;
        Ok(sessions.entries.contains_key(id))
    }

    async fn remove(&self, id: &SessionId) -> Result<bool, ApiError> {
        let mut sessions = self.sessions.write().await;
        Ok(sessions.entries.remove(id).is_some())
    }
}
