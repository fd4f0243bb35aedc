mod init;
mod mutate;
mod query;
mod schema;
mod serve;

pub use init::handle_init;
pub use mutate::handle_mutate;
pub use query::handle_query;
pub use schema::handle_schema;
pub use serve::{ServeOptions, handle_serve};

use crate::config::{IN_MEMORY, ShelfConfig};
use crate::storage::Store;
use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Common context passed to command handlers that use the database
pub struct CommandContext {
    pub config: ShelfConfig,
    pub database_path: PathBuf,
}

impl CommandContext {
    /// Load config from `cwd`; `database` overrides the configured path and
    /// is taken relative to `cwd`.
    pub fn load(cwd: &Path, database: Option<String>) -> Result<Self> {
        let (config, root) =
            ShelfConfig::load(cwd).context("Failed to load shelf configuration")?;
        let database_path = match database {
            Some(path) => resolve_database_path(cwd, &path),
            None => config.database_path(&root),
        };
        Ok(Self {
            config,
            database_path,
        })
    }

    pub fn open_store(&self) -> Result<Store> {
        Store::open(&self.database_path)
            .with_context(|| format!("Failed to open database {}", self.database_path.display()))
    }
}

pub(crate) fn resolve_database_path(base: &Path, path: &str) -> PathBuf {
    if path == IN_MEMORY {
        PathBuf::from(IN_MEMORY)
    } else {
        base.join(path)
    }
}

/// Parse `--variables` JSON, defaulting to no variables
pub(crate) fn parse_variables(variables: Option<String>) -> Result<async_graphql::Variables> {
    match variables {
        Some(v) => serde_json::from_str(&v).context("Failed to parse --variables as JSON"),
        None => Ok(async_graphql::Variables::default()),
    }
}
