//! Asset loading with embedded fallbacks
//!
//! - `config.yaml` is embedded in the binary. If `CONFIG_FILE` is set and the
//!   file exists, it is read instead; if it is set but missing, the embedded
//!   default is written there first.
//! - Label fonts come from `FONTS_DIR` when set, with system fonts as
//!   fallback (see [`crate::rendering::Compositor`]).

use rust_embed::RustEmbed;
use std::borrow::Cow;
use std::fs;
use std::io;
use std::path::PathBuf;

/// Embedded default config
#[derive(RustEmbed)]
#[folder = "."]
#[include = "config.yaml"]
struct EmbeddedConfig;

const CONFIG_NAME: &str = "config.yaml";

/// Report of init (extraction) operations
#[derive(Debug, Default)]
pub struct InitReport {
    pub written: Vec<String>,
    pub skipped: Vec<String>,
}

/// Asset loader with optional filesystem overrides
#[derive(Debug, Clone, Default)]
pub struct AssetLoader {
    /// External config file path (from CONFIG_FILE env var)
    config_file: Option<PathBuf>,
    /// External fonts directory (from FONTS_DIR env var)
    fonts_dir: Option<PathBuf>,
}

impl AssetLoader {
    /// Paths should be `Some` only if the corresponding env var was set.
    pub fn new(config_file: Option<PathBuf>, fonts_dir: Option<PathBuf>) -> Self {
        Self {
            config_file,
            fonts_dir,
        }
    }

    /// Build a loader from `CONFIG_FILE` and `FONTS_DIR`.
    pub fn from_env() -> Self {
        Self::new(
            std::env::var("CONFIG_FILE").ok().map(PathBuf::from),
            std::env::var("FONTS_DIR").ok().map(PathBuf::from),
        )
    }

    pub fn config_file(&self) -> Option<&PathBuf> {
        self.config_file.as_ref()
    }

    /// Read the config file, falling back to the embedded default.
    pub fn read_config(&self) -> io::Result<Cow<'static, [u8]>> {
        if let Some(ref path) = self.config_file {
            if path.exists() {
                tracing::trace!(path = %path.display(), "Loading config from filesystem");
                return Ok(Cow::Owned(fs::read(path)?));
            }
        }

        Self::embedded_config()
    }

    pub fn read_config_string(&self) -> io::Result<String> {
        let bytes = self.read_config()?;
        String::from_utf8(bytes.into_owned())
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    fn embedded_config() -> io::Result<Cow<'static, [u8]>> {
        EmbeddedConfig::get(CONFIG_NAME)
            .map(|f| {
                tracing::trace!("Loading config from embedded assets");
                f.data
            })
            .ok_or_else(|| io::Error::new(io::ErrorKind::NotFound, "Embedded config.yaml not found"))
    }

    /// Font files from `FONTS_DIR` (ttf, otf, ttc), sorted by file name.
    pub fn get_fonts(&self) -> Vec<(String, Vec<u8>)> {
        let Some(ref dir) = self.fonts_dir else {
            return Vec::new();
        };
        let Ok(entries) = fs::read_dir(dir) else {
            tracing::warn!(dir = %dir.display(), "Fonts directory not readable");
            return Vec::new();
        };

        let mut fonts: Vec<(String, Vec<u8>)> = entries
            .flatten()
            .filter(|entry| {
                entry
                    .path()
                    .extension()
                    .and_then(|ext| ext.to_str())
                    .is_some_and(|ext| matches!(ext, "ttf" | "otf" | "ttc"))
            })
            .filter_map(|entry| {
                let name = entry.file_name().to_string_lossy().to_string();
                match fs::read(entry.path()) {
                    Ok(data) => Some((name, data)),
                    Err(e) => {
                        tracing::warn!(font = %name, %e, "Failed to read font");
                        None
                    }
                }
            })
            .collect();
        fonts.sort_by(|a, b| a.0.cmp(&b.0));
        fonts
    }

    /// Write the embedded config to `CONFIG_FILE` if that path is set but
    /// missing. Returns whether a file was written.
    pub fn seed_if_configured(&self) -> io::Result<bool> {
        let Some(ref path) = self.config_file else {
            return Ok(false);
        };
        if path.exists() {
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, &*Self::embedded_config()?)?;
        tracing::info!(path = %path.display(), "Seeded config file with embedded default");
        Ok(true)
    }

    /// Extract the embedded config (init command).
    ///
    /// Writes to `CONFIG_FILE` if set, otherwise `./config.yaml`.
    pub fn init(&self, force: bool) -> io::Result<InitReport> {
        let mut report = InitReport::default();
        let path = self
            .config_file
            .clone()
            .unwrap_or_else(|| PathBuf::from("./").join(CONFIG_NAME));

        if !force && path.exists() {
            report.skipped.push(path.display().to_string());
            return Ok(report);
        }
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, &*Self::embedded_config()?)?;
        report.written.push(path.display().to_string());

        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_is_used_without_override() {
        let loader = AssetLoader::new(None, None);
        let config = loader.read_config_string().unwrap();
        assert!(config.contains("Natural Smile"));
    }

    #[test]
    fn test_external_config_takes_priority() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("custom.yaml");
        fs::write(&path, "presets: []\n").unwrap();

        let loader = AssetLoader::new(Some(path), None);
        assert_eq!(loader.read_config_string().unwrap(), "presets: []\n");
    }

    #[test]
    fn test_missing_external_config_falls_back_to_embedded() {
        let dir = tempfile::tempdir().unwrap();
        let loader = AssetLoader::new(Some(dir.path().join("missing.yaml")), None);
        assert!(loader.read_config_string().unwrap().contains("presets:"));
    }

    #[test]
    fn test_seed_writes_missing_config_once() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.yaml");
        let loader = AssetLoader::new(Some(path.clone()), None);

        assert!(loader.seed_if_configured().unwrap());
        assert!(path.exists());
        assert!(!loader.seed_if_configured().unwrap());
    }

    #[test]
    fn test_init_respects_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.yaml");
        fs::write(&path, "edited").unwrap();
        let loader = AssetLoader::new(Some(path.clone()), None);

        let report = loader.init(false).unwrap();
        assert_eq!(report.skipped.len(), 1);
        assert_eq!(fs::read_to_string(&path).unwrap(), "edited");

        let report = loader.init(true).unwrap();
        assert_eq!(report.written.len(), 1);
        assert!(fs::read_to_string(&path).unwrap().contains("Hollywood Smile"));
    }

    #[test]
    fn test_get_fonts_filters_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b.ttf"), b"font-b").unwrap();
        fs::write(dir.path().join("a.otf"), b"font-a").unwrap();
        fs::write(dir.path().join("notes.txt"), b"ignored").unwrap();

        let loader = AssetLoader::new(None, Some(dir.path().to_path_buf()));
        let names: Vec<_> = loader.get_fonts().into_iter().map(|(n, _)| n).collect();
        assert_eq!(names, vec!["a.otf".to_string(), "b.ttf".to_string()]);

        assert!(AssetLoader::new(None, None).get_fonts().is_empty());
    }
}
