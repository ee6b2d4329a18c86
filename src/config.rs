//! Connection configuration, loaded from TOML (ambient stack, spec.md §1).
//! Grounded in the teacher's `ActorConfig::from_file`, which loads its own
//! manifest the same way via `toml::from_str`.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::version::Version;

/// How a [`ConnectionConfig`] picks the controller version used to filter
/// field definitions (spec.md §4.7).
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum VersionSelector {
    /// Probe the version-field definitions over the wire.
    #[default]
    Detect,
    /// Use the compiled-in [`crate::version::LATEST_VERSION`].
    Latest,
    /// Parse an explicit `"a.b.c.d"` string.
    Explicit(String),
    /// Skip version filtering entirely; trial-and-error mode.
    TrialAndError,
}

impl VersionSelector {
    /// Resolve to an explicit [`Version`], or `None` for trial-and-error
    /// and detect-that-hasn't-run-yet (the facade performs the actual
    /// detection probe; this only covers the statically-knowable cases).
    pub fn resolve_static(&self) -> Option<Version> {
        match self {
            VersionSelector::Latest => Some(crate::version::LATEST_VERSION),
            VersionSelector::Explicit(s) => Version::parse(s),
            VersionSelector::Detect | VersionSelector::TrialAndError => None,
        }
    }
}

/// Connection parameters for one Luxtronik controller (spec.md §1).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConnectionConfig {
    pub host: String,
    #[serde(default = "default_cfi_port")]
    pub cfi_port: u16,
    #[serde(default = "default_shi_port")]
    pub shi_port: u16,
    #[serde(default = "default_modbus_timeout_secs")]
    pub modbus_timeout_secs: u64,
    #[serde(default)]
    pub version: VersionSelector,
    #[serde(default = "default_safe")]
    pub safe: bool,
}

fn default_cfi_port() -> u16 {
    crate::cfi::DEFAULT_PORT
}

fn default_shi_port() -> u16 {
    crate::shi::DEFAULT_PORT
}

fn default_modbus_timeout_secs() -> u64 {
    crate::shi::DEFAULT_TIMEOUT.as_secs()
}

fn default_safe() -> bool {
    true
}

impl ConnectionConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: ConnectionConfig = toml::from_str(&content)?;
        Ok(config)
    }

    pub fn modbus_timeout(&self) -> Duration {
        Duration::from_secs(self.modbus_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_toml_fills_in_defaults() {
        let config: ConnectionConfig = toml::from_str("host = \"192.0.2.1\"\n").unwrap();
        assert_eq!(config.cfi_port, crate::cfi::DEFAULT_PORT);
        assert_eq!(config.shi_port, crate::shi::DEFAULT_PORT);
        assert!(config.safe);
        assert!(matches!(config.version, VersionSelector::Detect));
    }

    #[test]
    fn explicit_version_selector_resolves() {
        let selector = VersionSelector::Explicit("3.90.1.0".to_string());
        assert_eq!(selector.resolve_static(), Version::parse("3.90.1.0"));
    }

    #[test]
    fn from_file_loads_a_toml_manifest_on_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("luxtronik.toml");
        std::fs::write(
            &path,
            "host = \"192.0.2.1\"\ncfi_port = 8899\nversion = { explicit = \"3.90.1.0\" }\nsafe = false\n",
        )
        .unwrap();

        let config = ConnectionConfig::from_file(&path).unwrap();
        pretty_assertions::assert_eq!(config.host, "192.0.2.1");
        pretty_assertions::assert_eq!(config.cfi_port, 8899);
        pretty_assertions::assert_eq!(config.shi_port, crate::shi::DEFAULT_PORT);
        assert!(!config.safe);
        assert_eq!(config.version.resolve_static(), Version::parse("3.90.1.0"));
    }

    #[test]
    fn from_file_reports_an_error_for_a_missing_path() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("does-not-exist.toml");
        assert!(ConnectionConfig::from_file(&missing).is_err());
    }
}
