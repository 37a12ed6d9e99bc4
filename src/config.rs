use anyhow::{Context, Result};
use std::fmt::Display;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{info, warn};

pub(crate) const DEFAULT_PORT: u16 = 5000;
pub(crate) const DEFAULT_HOST: &str = "0.0.0.0";
pub(crate) const DEFAULT_CORS_ORIGIN: &str = "http://localhost:3000";
pub(crate) const DEFAULT_REFRESH_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) db_path: PathBuf,
    pub(crate) host: String,
    pub(crate) port: u16,
    pub(crate) cors_origin: String,
    pub(crate) refresh_interval: Duration,
}

impl Config {
    pub(crate) fn load(data_dir: &Path) -> Self {
        Self::from_lookup(data_dir, |key| std::env::var(key).ok())
    }

    /// Builds the config from any key lookup, so tests need not touch the
    /// process environment.
    pub(crate) fn from_lookup(data_dir: &Path, lookup: impl Fn(&str) -> Option<String>) -> Self {
        let db_path = lookup("MIGAS_DB")
            .filter(|s| !s.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join("migas.db"));
        let refresh_secs = try_load(&lookup, "MIGAS_REFRESH_SECS", DEFAULT_REFRESH_SECS);
        Self {
            data_dir: data_dir.to_path_buf(),
            db_path,
            host: lookup("MIGAS_HOST")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_HOST.to_string()),
            port: try_load(&lookup, "MIGAS_PORT", DEFAULT_PORT),
            cors_origin: lookup("MIGAS_CORS_ORIGIN")
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_CORS_ORIGIN.to_string()),
            refresh_interval: Duration::from_secs(refresh_secs.max(1)),
        }
    }

    pub(crate) fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn try_load<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    match lookup(key) {
        None => {
            info!("{key} not set, using default: {default}");
            default
        }
        Some(raw) => raw.trim().parse().unwrap_or_else(|e| {
            warn!("Invalid {key} value '{raw}': {e}, using default: {default}");
            default
        }),
    }
}

/// Per-user data directory, created on first use.
pub(crate) fn data_dir() -> Result<PathBuf> {
    let proj_dirs = directories::ProjectDirs::from("id", "migas", "Migas")
        .ok_or_else(|| anyhow::anyhow!("Could not determine data directory"))?;
    let data_dir = proj_dirs.data_dir();
    std::fs::create_dir_all(data_dir)
        .with_context(|| format!("Failed to create data directory: {}", data_dir.display()))?;
    Ok(data_dir.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_with(vars: &[(&str, &str)]) -> Config {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(Path::new("/tmp/migas"), |key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config_with(&[]);
        assert_eq!(config.db_path, PathBuf::from("/tmp/migas/migas.db"));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.bind_address(), "0.0.0.0:5000");
        assert_eq!(config.cors_origin, DEFAULT_CORS_ORIGIN);
        assert_eq!(config.refresh_interval, Duration::from_secs(30));
    }

    #[test]
    fn test_overrides() {
        let config = config_with(&[
            ("MIGAS_DB", "/srv/migas.sqlite"),
            ("MIGAS_PORT", "8080"),
            ("MIGAS_HOST", "127.0.0.1"),
            ("MIGAS_REFRESH_SECS", "5"),
        ]);
        assert_eq!(config.db_path, PathBuf::from("/srv/migas.sqlite"));
        assert_eq!(config.bind_address(), "127.0.0.1:8080");
        assert_eq!(config.refresh_interval, Duration::from_secs(5));
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = config_with(&[("MIGAS_PORT", "lima ribu"), ("MIGAS_REFRESH_SECS", "-1")]);
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.refresh_interval, Duration::from_secs(DEFAULT_REFRESH_SECS));
    }

    #[test]
    fn test_zero_refresh_is_clamped() {
        let config = config_with(&[("MIGAS_REFRESH_SECS", "0")]);
        assert_eq!(config.refresh_interval, Duration::from_secs(1));
    }
}
