use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_CONFIG_NAME: &str = "streamui.config.json";

/// StreamUI configuration file format
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Config {
    /// Catalog document replacing the built-in space mission catalog
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub catalog: Option<String>,

    #[serde(default)]
    pub session: SessionSection,

    #[serde(default)]
    pub render: RenderSection,

    #[serde(default)]
    pub server: ServerSection,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionSection {
    #[serde(default = "default_max_duration_secs")]
    pub max_duration_secs: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RenderSection {
    #[serde(default = "default_max_depth")]
    pub max_depth: usize,

    /// Indent HTML output
    #[serde(default = "default_true")]
    pub pretty: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSection {
    #[serde(default = "default_port")]
    pub port: u16,

    /// Bytes per chunk of the scripted generator
    #[serde(default = "default_chunk_size")]
    pub chunk_size: usize,

    #[serde(default)]
    pub chunk_delay_ms: u64,
}

fn default_max_duration_secs() -> u64 {
    streamui_session::DEFAULT_MAX_DURATION.as_secs()
}

fn default_max_depth() -> usize {
    streamui_renderer::DEFAULT_MAX_DEPTH
}

fn default_true() -> bool {
    true
}

fn default_port() -> u16 {
    3000
}

fn default_chunk_size() -> usize {
    48
}

impl Default for SessionSection {
    fn default() -> Self {
        Self {
            max_duration_secs: default_max_duration_secs(),
        }
    }
}

impl Default for RenderSection {
    fn default() -> Self {
        Self {
            max_depth: default_max_depth(),
            pretty: default_true(),
        }
    }
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            port: default_port(),
            chunk_size: default_chunk_size(),
            chunk_delay_ms: 0,
        }
    }
}

impl Config {
    /// Load config from a directory
    pub fn load(cwd: &Path) -> anyhow::Result<Self> {
        let config_path = cwd.join(DEFAULT_CONFIG_NAME);

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let config: Config = serde_json::from_str(&content).map_err(|err| {
                anyhow::anyhow!("Invalid {}: {}", config_path.display(), err)
            })?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Catalog path resolved against `cwd`
    pub fn catalog_path(&self, cwd: &Path) -> Option<PathBuf> {
        self.catalog.as_ref().map(|path| cwd.join(path))
    }

    pub fn max_duration(&self) -> Duration {
        Duration::from_secs(self.session.max_duration_secs.max(1))
    }

    pub fn chunk_delay(&self) -> Duration {
        Duration::from_millis(self.server.chunk_delay_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_config() {
        let json = r#"{
            "catalog": "catalogs/space.json",
            "session": { "maxDurationSecs": 10 },
            "render": { "maxDepth": 8, "pretty": false },
            "server": { "port": 8080, "chunkSize": 16, "chunkDelayMs": 25 }
        }"#;

        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.catalog.as_deref(), Some("catalogs/space.json"));
        assert_eq!(config.max_duration(), Duration::from_secs(10));
        assert_eq!(config.render.max_depth, 8);
        assert!(!config.render.pretty);
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.server.chunk_size, 16);
        assert_eq!(config.chunk_delay(), Duration::from_millis(25));
    }

    #[test]
    fn test_partial_sections_use_defaults() {
        let config: Config = serde_json::from_str(r#"{"server": {"port": 4000}}"#).unwrap();
        assert_eq!(config.server.port, 4000);
        assert_eq!(config.server.chunk_size, 48);
        assert_eq!(config.session.max_duration_secs, 30);
        assert!(config.render.pretty);
    }

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.catalog, None);
        assert_eq!(config.render.max_depth, 64);
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        assert_eq!(Config::load(dir.path()).unwrap(), Config::default());

        std::fs::write(
            dir.path().join(DEFAULT_CONFIG_NAME),
            r#"{"catalog": "ui.json", "render": {"maxDepth": 3}}"#,
        )
        .unwrap();
        let config = Config::load(dir.path()).unwrap();
        assert_eq!(config.render.max_depth, 3);
        assert_eq!(config.catalog_path(dir.path()), Some(dir.path().join("ui.json")));
    }

    #[test]
    fn test_load_rejects_malformed_file() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(DEFAULT_CONFIG_NAME), "{").unwrap();
        let err = Config::load(dir.path()).unwrap_err();
        assert!(err.to_string().contains(DEFAULT_CONFIG_NAME));
    }
}
