use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "shelf")]
#[command(
    author,
    version,
    about = "A small GraphQL API for books and authors backed by SQLite"
)]
#[command(propagate_version = true)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to the SQLite database (overrides .shelf.toml; ':memory:' for a throwaway store)
    #[arg(long, global = true, env = "SHELF_DATABASE")]
    pub database: Option<String>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Also write JSON logs to this file (rotated daily)
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Write .shelf.toml and create the database
    Init {
        /// Insert the demo authors and books
        #[arg(long)]
        seed: bool,

        /// Overwrite an existing config and empty the database
        #[arg(long)]
        force: bool,
    },

    /// Start GraphQL HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, env = "SHELF_PORT")]
        port: Option<u16>,

        /// Address to bind
        #[arg(long, env = "SHELF_HOST")]
        host: Option<String>,

        /// Drop and recreate the tables before serving
        #[arg(long)]
        reset: bool,

        /// Insert the demo authors and books before serving
        #[arg(long)]
        seed: bool,

        /// Do not serve the GraphiQL explorer
        #[arg(long)]
        no_graphiql: bool,
    },

    /// Execute a GraphQL query
    Query {
        /// GraphQL query string
        query: String,

        /// Variables as JSON
        #[arg(long)]
        variables: Option<String>,
    },

    /// Execute a GraphQL mutation (automatically wraps in 'mutation { }')
    Mutate {
        /// Mutation body (without 'mutation' keyword)
        mutation: String,

        /// Variables as JSON
        #[arg(long)]
        variables: Option<String>,
    },

    /// Print the GraphQL schema (SDL)
    Schema,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_definition_is_valid() {
        use clap::CommandFactory;
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_serve_flags() {
        let cli = Cli::parse_from([
            "shelf",
            "serve",
            "--port",
            "4000",
            "--reset",
            "--database",
            "books.db",
        ]);
        assert_eq!(cli.database.as_deref(), Some("books.db"));
        match cli.command {
            Commands::Serve {
                port, reset, seed, ..
            } => {
                assert_eq!(port, Some(4000));
                assert!(reset);
                assert!(!seed);
            }
            _ => panic!("expected serve"),
        }
    }
}
