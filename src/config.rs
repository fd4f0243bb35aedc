use crate::error::{Result, ShelfError};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

pub const CONFIG_FILE: &str = ".shelf.toml";

/// Database path that keeps the store in memory for the life of the process.
pub const IN_MEMORY: &str = ":memory:";

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ShelfConfig {
    #[serde(default)]
    pub database: DatabaseSettings,

    #[serde(default)]
    pub server: ServerSettings,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseSettings {
    /// SQLite file, relative to the directory holding the config file
    #[serde(default = "default_database_path")]
    pub path: String,
}

fn default_database_path() -> String {
    "library.db".to_string()
}

impl Default for DatabaseSettings {
    fn default() -> Self {
        Self {
            path: default_database_path(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Serve the GraphiQL explorer on `/`
    #[serde(default = "default_graphiql")]
    pub graphiql: bool,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_graphiql() -> bool {
    true
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            graphiql: default_graphiql(),
        }
    }
}

impl ShelfConfig {
    /// Load the nearest `.shelf.toml` at or above `start_path`.
    ///
    /// Returns the config together with the directory paths are resolved
    /// against. Without a config file the defaults apply and `start_path`
    /// is that directory.
    pub fn load(start_path: &Path) -> Result<(Self, PathBuf)> {
        let Some(config_path) = Self::find_config_file(start_path) else {
            tracing::debug!(
                "No {} found above {}, using defaults",
                CONFIG_FILE,
                start_path.display()
            );
            return Ok((Self::default(), start_path.to_path_buf()));
        };

        let content = std::fs::read_to_string(&config_path)?;
        let config: ShelfConfig = toml::from_str(&content)?;
        let project_root = config_path
            .parent()
            .ok_or_else(|| ShelfError::Config("Config file has no parent directory".to_string()))?
            .to_path_buf();
        tracing::debug!("Loaded config from {}", config_path.display());
        Ok((config, project_root))
    }

    pub fn find_config_file(start_path: &Path) -> Option<PathBuf> {
        let mut current = start_path.to_path_buf();
        loop {
            let config_path = current.join(CONFIG_FILE);
            if config_path.exists() {
                return Some(config_path);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    pub fn database_path(&self, project_root: &Path) -> PathBuf {
        if self.database.path == IN_MEMORY {
            PathBuf::from(IN_MEMORY)
        } else {
            project_root.join(&self.database.path)
        }
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
