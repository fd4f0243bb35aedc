//! SQLite storage layer for shelf.
//!
//! Two tables with autoincrement keys:
//!
//! ```sql
//! authors (id INTEGER PRIMARY KEY AUTOINCREMENT, name TEXT NOT NULL)
//! books   (id INTEGER PRIMARY KEY AUTOINCREMENT, title TEXT NOT NULL,
//!          authorId INTEGER REFERENCES authors(id))
//! ```
//!
//! Foreign keys are declared but not enforced, so a book may keep pointing at
//! an author that no longer exists.
//!
//! ## Components
//!
//! - [`Store`]: the shared connection plus the author and book operations

mod authors;
mod books;
mod store;

pub use store::{DEFAULT_SEED_COUNT, Store};
