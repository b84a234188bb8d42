use smile_filters::PixelBuffer;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::models::SessionId;

/// An edited frame for one parameter state of a session
#[derive(Clone)]
pub struct CachedFrame {
    /// Session generation the frame was rendered for
    pub generation: u64,
    /// Pipeline output without annotations
    pub buffer: Arc<PixelBuffer>,
}

/// Latest edited frame per session.
///
/// Renders can finish out of order; a frame only replaces the cached one if
/// its generation is not older, so the newest parameter state always wins.
pub struct PreviewCache {
    cache: Arc<RwLock<HashMap<SessionId, CachedFrame>>>,
}

impl PreviewCache {
    pub fn new() -> Self {
        Self {
            cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Store a frame. Returns false if a newer frame is already cached.
    pub async fn store(&self, id: &SessionId, frame: CachedFrame) -> bool {
        let mut cache = self.cache.write().await;
        match cache.get(id) {
            Some(existing) if existing.generation > frame.generation => {
                tracing::debug!(
                    session = %id,
                    cached = existing.generation,
                    stale = frame.generation,
                    "Discarding stale frame"
                );
                false
            }
            _ => {
                cache.insert(id.clone(), frame);
                true
            }
        }
    }

    /// The cached frame for `id` if it was rendered for `generation`.
    pub async fn get(&self, id: &SessionId, generation: u64) -> Option<CachedFrame> {
        let cache = self.cache.read().await;
        cache
            .get(id)
            .filter(|frame| frame.generation == generation)
            .cloned()
    }

    pub async fn remove(&self, id: &SessionId) {
        let mut cache = self.cache.write().await;
        cache.remove(id);
    }
}

impl Default for PreviewCache {
    fn default() -> Self {
        Self::new()
    }
}
