//! Cluster configuration for the distributed pipeline.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::WireError;

/// Configuration for the distributed merge pipeline.
///
/// Parsed from `spanner.toml` with environment variable overrides:
/// - `SPANNER_CLUSTER_WORKERS` -> `cluster.workers`
/// - `SPANNER_CLUSTER_WORKER_BINARY` -> `cluster.worker_binary`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterConfig {
    #[serde(default)]
    pub cluster: ClusterSection,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClusterSection {
    /// Worker processes the coordinator spawns.
    #[serde(default = "default_workers")]
    pub workers: usize,

    /// Explicit path to the worker binary. Unset means "look next to the
    /// current executable, then on PATH".
    #[serde(default)]
    pub worker_binary: Option<String>,
}

fn default_workers() -> usize {
    4
}

impl Default for ClusterSection {
    fn default() -> Self {
        Self {
            workers: default_workers(),
            worker_binary: None,
        }
    }
}

impl ClusterConfig {
    /// Parse config from a TOML string.
    pub fn from_toml(toml_str: &str) -> Result<Self, WireError> {
        let mut config: Self = toml::from_str(toml_str)?;
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }

    /// Load config from a file path.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, WireError> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_toml(&content)
    }

    /// Defaults for a single-host run, no config file needed.
    pub fn local() -> Self {
        Self {
            cluster: ClusterSection::default(),
        }
    }

    pub(crate) fn apply_env_overrides(&mut self) {
        if let Ok(v) = std::env::var("SPANNER_CLUSTER_WORKERS") {
            if let Ok(workers) = v.parse::<usize>() {
                self.cluster.workers = workers;
            }
        }
        if let Ok(v) = std::env::var("SPANNER_CLUSTER_WORKER_BINARY") {
            self.cluster.worker_binary = Some(v);
        }
    }

    pub fn validate(&self) -> Result<(), WireError> {
        if self.cluster.workers == 0 {
            return Err(WireError::Config(
                "cluster.workers must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Path of the worker binary to spawn.
    ///
    /// An explicit configured path always wins. Otherwise prefer a
    /// `merge-worker` sitting next to the current executable, and fall
    /// back to a bare name for PATH lookup.
    pub fn resolve_worker_binary(&self) -> PathBuf {
        if let Some(explicit) = &self.cluster.worker_binary {
            return PathBuf::from(explicit);
        }
        if let Ok(exe) = std::env::current_exe() {
            let sibling = exe.with_file_name("merge-worker");
            if sibling.exists() {
                return sibling;
            }
        }
        PathBuf::from("merge-worker")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write as _;

    #[test]
    fn parses_a_full_config() {
        let config = ClusterConfig::from_toml(
            r#"
            [cluster]
            workers = 3
            worker_binary = "/opt/spanner/merge-worker"
            "#,
        )
        .unwrap();
        assert_eq!(config.cluster.workers, 3);
        assert_eq!(
            config.resolve_worker_binary(),
            PathBuf::from("/opt/spanner/merge-worker")
        );
    }

    #[test]
    fn missing_sections_fall_back_to_defaults() {
        let config = ClusterConfig::from_toml("").unwrap();
        assert_eq!(config.cluster.workers, default_workers());
        assert!(config.cluster.worker_binary.is_none());
    }

    #[test]
    fn zero_workers_is_rejected() {
        let err = ClusterConfig::from_toml("[cluster]\nworkers = 0\n");
        assert!(matches!(err, Err(WireError::Config(_))));
    }

    #[test]
    fn garbage_toml_is_a_parse_error() {
        let err = ClusterConfig::from_toml("[cluster\nworkers = ");
        assert!(matches!(err, Err(WireError::ConfigParse(_))));
    }

    #[test]
    fn from_file_reads_and_validates() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        writeln!(f, "[cluster]\nworkers = 2").unwrap();
        f.flush().unwrap();
        let config = ClusterConfig::from_file(f.path()).unwrap();
        assert_eq!(config.cluster.workers, 2);
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let err = ClusterConfig::from_file("/definitely/not/here.toml");
        assert!(matches!(err, Err(WireError::Io(_))));
    }

    #[test]
    fn local_defaults_are_valid() {
        let config = ClusterConfig::local();
        assert!(config.validate().is_ok());
    }
}
