use anyhow::Result;
use clap::Parser;

use shelf::cli::handlers::{
    CommandContext, ServeOptions, handle_init, handle_mutate, handle_query, handle_schema,
    handle_serve,
};
use shelf::cli::{Cli, Commands};
use shelf::logging;

fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose, cli.log_file.as_deref())?;

    match cli.command {
        Commands::Init { seed, force } => handle_init(cli.database, seed, force),
        Commands::Serve {
            port,
            host,
            reset,
            seed,
            no_graphiql,
        } => {
            let ctx = load_context(cli.database)?;
            handle_serve(
                ctx,
                ServeOptions {
                    host,
                    port,
                    reset,
                    seed,
                    no_graphiql,
                },
            )
        }
        Commands::Query { query, variables } => {
            handle_query(load_context(cli.database)?, query, variables)
        }
        Commands::Mutate {
            mutation,
            variables,
        } => handle_mutate(load_context(cli.database)?, mutation, variables),
        Commands::Schema => handle_schema(),
    }
}

fn load_context(database: Option<String>) -> Result<CommandContext> {
    let cwd = std::env::current_dir()?;
    CommandContext::load(&cwd, database)
}
