//! Data models for shelf.
//!
//! Row shapes produced by the store:
//!
//! - [`Author`]: an `authors` row
//! - [`Book`]: a `books` row
//! - [`BookEntry`]: a book joined with its author's name
//! - [`AuthorEntry`]: an author with its books aggregated

mod author;
mod book;

pub use author::{Author, AuthorEntry};
pub use book::{Book, BookEntry};
