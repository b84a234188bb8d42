pub mod config;
pub mod preset;
pub mod session;

pub use config::{AppConfig, CanvasConfig, SessionConfig, UploadConfig};
pub use preset::{slugify, Preset, PresetCatalog, PresetConfig};
pub use session::{Session, SessionId, ViewMode};
