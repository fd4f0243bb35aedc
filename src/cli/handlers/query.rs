use anyhow::Result;

use super::{CommandContext, parse_variables};
use crate::graphql::build_schema;

pub fn handle_query(ctx: CommandContext, query: String, variables: Option<String>) -> Result<()> {
    let store = ctx.open_store()?;
    let schema = build_schema(store);
    let vars = parse_variables(variables)?;

    let request = async_graphql::Request::new(query).variables(vars);
    let response = tokio::runtime::Runtime::new()?.block_on(schema.execute(request));

    println!("{}", serde_json::to_string_pretty(&response)?);
    Ok(())
}
