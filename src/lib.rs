//! # Shelf - a small GraphQL API for books and authors
//!
//! Shelf keeps authors and books in SQLite and exposes them through a
//! GraphQL endpoint with create, read, update and delete operations.
//!
//! ## Quick Start
//!
//! ```bash
//! # Write .shelf.toml and a database with demo data
//! shelf init --seed
//!
//! # Serve http://127.0.0.1:3000/graphql
//! shelf serve
//!
//! # Or run documents without a server
//! shelf query '{ authors { name books { title } } }'
//! shelf mutate 'addBook(title: "Frankenstein", authorId: "1") { id }'
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Command-line interface definitions and handlers
//! - [`config`]: Configuration loading
//! - [`error`]: Error types and result aliases
//! - [`graphql`]: GraphQL schema, resolvers and HTTP transport
//! - [`model`]: Author and book rows
//! - [`storage`]: SQLite store

/// Command-line interface definitions using clap.
pub mod cli;

/// Configuration loading and management.
///
/// Handles `.shelf.toml` configuration files and project discovery.
pub mod config;

/// Error types and result aliases.
///
/// Defines `ShelfError` enum and `Result<T>` type alias.
pub mod error;

/// GraphQL schema and resolvers.
///
/// Provides the async-graphql schema and the axum server exposing it.
pub mod graphql;

pub mod logging;

/// Data models for shelf.
pub mod model;

/// SQLite storage layer.
pub mod storage;
