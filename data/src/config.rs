pub mod state;
pub mod theme;

pub use state::{CanvasSize, HoverStep, MapColors, MapConfig, Sources};

use std::path::Path;

pub const CONFIG_FILE: &str = "drugmap.json";

#[derive(thiserror::Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed config {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },
}

/// A missing file is not an error; it yields the defaults.
pub fn read(path: &Path) -> Result<MapConfig, ConfigError> {
    let contents = match std::fs::read_to_string(path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            log::info!("No config at {}, using defaults", path.display());
            return Ok(MapConfig::default());
        }
        Err(source) => {
            return Err(ConfigError::Io {
                path: path.display().to_string(),
                source,
            });
        }
    };

    serde_json::from_str(&contents).map_err(|source| ConfigError::Parse {
        path: path.display().to_string(),
        source,
    })
}

pub fn load() -> MapConfig {
    let path = crate::data_path(Some(CONFIG_FILE));

    match read(&path) {
        Ok(config) => config,
        Err(e) => {
            log::error!("{e}; falling back to defaults");
            MapConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ColorScale;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = read(&dir.path().join(CONFIG_FILE)).unwrap();

        assert_eq!(config.color_scale, ColorScale::Continuous);
    }

    #[test]
    fn reads_file_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "color_scale": "discrete" }"#).unwrap();

        assert_eq!(read(&path).unwrap().color_scale, ColorScale::Discrete);
    }

    #[test]
    fn broken_json_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, "{ not json").unwrap();

        assert!(matches!(read(&path), Err(ConfigError::Parse { .. })));
    }
}
