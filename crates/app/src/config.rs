//! Application configuration from the environment

use std::path::PathBuf;

use artboard_config::{ArtboardConfig, ConfigError};
use tracing::info;

/// Environment variable naming a JSON `ArtboardConfig` file
pub const CONFIG_ENV: &str = "ARTBOARD_CONFIG";

/// Environment variable forcing a stroke seed for reproducible output
pub const SEED_ENV: &str = "ARTBOARD_SEED";

/// Resolved application configuration
#[derive(Debug, Clone, Default)]
pub struct AppConfig {
    pub artboard: ArtboardConfig,
}

impl AppConfig {
    /// Defaults, overlaid by `ARTBOARD_CONFIG` and `ARTBOARD_SEED` when set
    pub fn from_env() -> Result<Self, ConfigError> {
        let path = std::env::var_os(CONFIG_ENV).map(PathBuf::from);
        let seed = std::env::var(SEED_ENV).ok();
        Self::resolve(path, seed.as_deref())
    }

    fn resolve(path: Option<PathBuf>, seed: Option<&str>) -> Result<Self, ConfigError> {
        let mut artboard = match path {
            Some(path) => {
                info!("Loading config from {}", path.display());
                ArtboardConfig::load(&path)?
            }
            None => ArtboardConfig::default(),
        };
        if let Some(seed) = seed.and_then(|s| s.trim().parse::<u64>().ok()) {
            artboard.tool.seed = Some(seed);
        }
        Ok(Self { artboard })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_defaults() {
        let config = AppConfig::resolve(None, None).unwrap();
        assert_eq!(config.artboard, ArtboardConfig::default());
    }

    #[test]
    fn test_resolve_seed_override() {
        let config = AppConfig::resolve(None, Some(" 42 ")).unwrap();
        assert_eq!(config.artboard.tool.seed, Some(42));

        let ignored = AppConfig::resolve(None, Some("abc")).unwrap();
        assert_eq!(ignored.artboard.tool.seed, None);
    }

    #[test]
    fn test_resolve_missing_file() {
        let result = AppConfig::resolve(Some(PathBuf::from("/nonexistent/artboard.json")), None);
        assert!(matches!(result, Err(ConfigError::Io(_))));
    }
}
