use async_graphql::http::GraphiQLSource;
use async_graphql_axum::GraphQL;
use axum::{Router, response::Html, routing::get};
use tokio::net::TcpListener;

use super::ShelfSchema;
use crate::error::Result;

pub const GRAPHQL_PATH: &str = "/graphql";

/// `/graphql` accepts GET and POST; `/` serves GraphiQL when enabled.
pub fn router(schema: ShelfSchema, graphiql: bool) -> Router {
    let router = Router::new().route_service(GRAPHQL_PATH, GraphQL::new(schema));
    if graphiql {
        router.route("/", get(graphiql_page))
    } else {
        router
    }
}

async fn graphiql_page() -> Html<String> {
    Html(GraphiQLSource::build().endpoint(GRAPHQL_PATH).finish())
}

/// Bind `host:port` and serve until the process exits.
pub async fn run_server(schema: ShelfSchema, host: &str, port: u16, graphiql: bool) -> Result<()> {
    let listener = TcpListener::bind((host, port)).await?;
    serve(listener, schema, graphiql).await
}

pub async fn serve(listener: TcpListener, schema: ShelfSchema, graphiql: bool) -> Result<()> {
    let addr = listener.local_addr()?;
    tracing::info!("GraphQL endpoint on http://{}{}", addr, GRAPHQL_PATH);
    if graphiql {
        tracing::info!("GraphiQL on http://{}/", addr);
    }

    axum::serve(listener, router(schema, graphiql)).await?;
    Ok(())
}
