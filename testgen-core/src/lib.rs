//! Core state and backend plumbing for testgen.
//!
//! This crate holds everything that is independent of the terminal:
//!
//! - [`selection`] — the session-scoped store of files queued for
//!   generation.
//! - [`tree`] — the lazily materialized repository file tree and its
//!   ticket-based synchronization with the listing API.
//! - [`api`] — the async HTTP client for the backend contract.
//! - [`db`] / [`schema`] — the WAL-mode SQLite history store (non-fatal by
//!   policy; see [`error::StorageError`]).
//! - [`types`] — owned wire/domain types shared with the UI shell.
//! - [`error`] — the `FetchError` / `InvalidOperation` / `StorageError`
//!   taxonomy.
//!
//! Nothing here spawns tasks or draws: the binary's event loop drives the
//! controllers and routes completions back in.

pub mod api;
pub mod db;
pub mod error;
pub mod schema;
pub mod selection;
pub mod tree;
pub mod types;
