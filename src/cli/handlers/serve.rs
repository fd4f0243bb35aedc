use anyhow::Result;

use super::CommandContext;
use crate::graphql::{GRAPHQL_PATH, build_schema, run_server};
use crate::storage::DEFAULT_SEED_COUNT;

/// Flags of `shelf serve`; unset values fall back to `.shelf.toml`
#[derive(Debug, Default)]
pub struct ServeOptions {
    pub host: Option<String>,
    pub port: Option<u16>,
    pub reset: bool,
    pub seed: bool,
    pub no_graphiql: bool,
}

pub fn handle_serve(ctx: CommandContext, options: ServeOptions) -> Result<()> {
    let ServeOptions {
        host,
        port,
        reset,
        seed,
        no_graphiql,
    } = options;
    let host = host.unwrap_or_else(|| ctx.config.server.host.clone());
    let port = port.unwrap_or(ctx.config.server.port);
    let graphiql = ctx.config.server.graphiql && !no_graphiql;
    let store = ctx.open_store()?;

    tracing::info!(
        database = %ctx.database_path.display(),
        "Starting GraphQL server"
    );
    println!("Starting GraphQL server on http://{}:{}{}", host, port, GRAPHQL_PATH);
    if graphiql {
        println!("GraphiQL: http://{}:{}/", host, port);
    }

    tokio::runtime::Runtime::new()?.block_on(async move {
        if reset {
            store.reset().await?;
        }
        if seed {
            store.seed(DEFAULT_SEED_COUNT).await?;
        }
        run_server(build_schema(store), &host, port, graphiql).await
    })?;
    Ok(())
}
