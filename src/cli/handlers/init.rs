use anyhow::Result;
use colored::Colorize;

use super::resolve_database_path;
use crate::config::{CONFIG_FILE, DatabaseSettings, ShelfConfig};
use crate::error::ShelfError;
use crate::storage::{DEFAULT_SEED_COUNT, Store};

pub fn handle_init(database: Option<String>, seed: bool, force: bool) -> Result<()> {
    let cwd = std::env::current_dir()?;
    let config_path = cwd.join(CONFIG_FILE);

    if config_path.exists() && !force {
        return Err(ShelfError::AlreadyInitialized(config_path.display().to_string()).into());
    }

    let config = ShelfConfig {
        database: DatabaseSettings {
            path: database.unwrap_or_else(|| DatabaseSettings::default().path),
        },
        ..Default::default()
    };
    config.save(&config_path)?;

    let database_path = resolve_database_path(&cwd, &config.database.path);
    let store = Store::open(&database_path)?;

    let rt = tokio::runtime::Runtime::new()?;
    if force {
        rt.block_on(store.reset())?;
    }
    if seed {
        rt.block_on(store.seed(DEFAULT_SEED_COUNT))?;
    }

    println!(
        "{} shelf project in {}",
        "Initialized".green(),
        cwd.display()
    );
    println!("  Config:   {}", config_path.display());
    println!("  Database: {}", database_path.display());
    if seed {
        println!(
            "  {} {} authors and books",
            "Seeded".cyan(),
            DEFAULT_SEED_COUNT
        );
    }

    Ok(())
}
