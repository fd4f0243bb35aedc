use anyhow::Result;

use crate::graphql::build_schema;
use crate::storage::Store;

pub fn handle_schema() -> Result<()> {
    let schema = build_schema(Store::open_in_memory()?);
    print!("{}", schema.sdl());
    Ok(())
}
