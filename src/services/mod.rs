pub mod preview_cache;
pub mod renderer;
pub mod session_store;

pub use preview_cache::{CachedFrame, PreviewCache};
pub use renderer::RenderService;
pub use session_store::{InMemorySessionStore, SessionStore};
