//! GraphQL schema and resolvers for shelf.
//!
//! ## Usage
//!
//! ```bash
//! # Start the GraphQL server
//! shelf serve --port 3000
//!
//! # Execute a query from CLI
//! shelf query '{ books(bookIds: ["1", "2"]) { title authorName } }'
//!
//! # Execute a mutation from CLI
//! shelf mutate 'addAuthor(name: "Mary Shelley") { id }'
//! ```
//!
//! ## Schema
//!
//! - **Queries**: `books`, `authors`, `book`, `author`
//! - **Mutations**: `addAuthor`, `addBook`, `updateBook`, `updateAuthor`,
//!   `deleteBook`, `deleteAuthor`
//!
//! Every root field is nullable, so a failing field reports its error without
//! discarding its siblings.

mod schema;
mod server;
mod types;

pub use schema::{MutationRoot, QueryRoot, ShelfSchema, build_schema};
pub use server::{GRAPHQL_PATH, router, run_server, serve};
pub use types::{Author, Book};
