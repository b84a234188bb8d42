use crate::assets::AssetLoader;
use crate::models::preset::{PresetCatalog, PresetConfig};
use serde::Deserialize;

/// Application configuration loaded from config.yaml
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// Bounds uploaded photos are scaled into
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Upload limits
    #[serde(default)]
    pub upload: UploadConfig,

    /// Session retention
    #[serde(default)]
    pub sessions: SessionConfig,

    /// Preset definitions, in display order
    #[serde(default = "PresetConfig::builtin")]
    pub presets: Vec<PresetConfig>,
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct CanvasConfig {
    #[serde(default = "default_max_width")]
    pub max_width: u32,
    #[serde(default = "default_max_height")]
    pub max_height: u32,
}

fn default_max_width() -> u32 {
    800
}

fn default_max_height() -> u32 {
    600
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            max_width: default_max_width(),
            max_height: default_max_height(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct UploadConfig {
    #[serde(default = "default_max_bytes")]
    pub max_bytes: usize,
}

fn default_max_bytes() -> usize {
    10 * 1024 * 1024
}

impl Default for UploadConfig {
    fn default() -> Self {
        Self {
            max_bytes: default_max_bytes(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq)]
pub struct SessionConfig {
    /// Sessions kept at once; the least recently used is evicted beyond this
    #[serde(default = "default_max_sessions")]
    pub max_sessions: usize,
    /// Sessions untouched for this long are evicted on the next upload
    #[serde(default = "default_idle_timeout_secs")]
    pub idle_timeout_secs: u64,
}

fn default_max_sessions() -> usize {
    32
}

fn default_idle_timeout_secs() -> u64 {
    30 * 60
}

impl SessionConfig {
    pub fn idle_timeout(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.idle_timeout_secs)
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            max_sessions: default_max_sessions(),
            idle_timeout_secs: default_idle_timeout_secs(),
        }
    }
}

impl AppConfig {
    /// Load configuration from AssetLoader (embedded or external)
    ///
    /// Unreadable or invalid configuration falls back to the defaults.
    pub fn load_from_assets(loader: &AssetLoader) -> Self {
        match loader.read_config_string() {
            Ok(content) => match Self::parse(&content) {
                Ok(config) => {
                    tracing::info!(
                        presets = config.presets.len(),
                        max_width = config.canvas.max_width,
                        max_height = config.canvas.max_height,
                        "Loaded configuration"
                    );
                    config
                }
                Err(e) => {
                    tracing::warn!(%e, "Failed to parse config, using defaults");
                    Self::default()
                }
            },
            Err(e) => {
                tracing::warn!(%e, "Failed to read config, using defaults");
                Self::default()
            }
        }
    }

    /// Parse and validate a YAML document.
    pub fn parse(content: &str) -> anyhow::Result<Self> {
        let config: Self = serde_yaml::from_str(content)?;
        if config.canvas.max_width == 0 || config.canvas.max_height == 0 {
            anyhow::bail!("canvas bounds must be non-zero");
        }
        if config.sessions.max_sessions == 0 {
            anyhow::bail!("sessions.max_sessions must be at least 1");
        }
        config.preset_catalog()?;
        Ok(config)
    }

    /// Validated preset catalog.
    pub fn preset_catalog(&self) -> Result<PresetCatalog, smile_filters::ParamError> {
        PresetCatalog::from_config(&self.presets)
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            canvas: CanvasConfig::default(),
            upload: UploadConfig::default(),
            sessions: SessionConfig::default(),
            presets: PresetConfig::builtin(),
        }
    }
}
