//! # Tradeflow Database Crate
//!
//! The storage-side boundary of the analytics service: a PostgreSQL
//! connection pool plus the executor that runs rendered analytics queries.
//!
//! ## Architectural Principles
//!
//! - **Layer 3 Adapter:** Encapsulates everything Postgres-specific. The
//!   query compiler only ever hands over `(query text, ordered parameters)`
//!   and receives tabular rows back; it assumes nothing else about storage.
//! - **Parameterized Execution:** Parameters from the compiler are bound
//!   positionally, so request values never travel inside query text.
//! - **Asynchronous & Pooled:** All operations are asynchronous over a shared
//!   `PgPool`; concurrent requests each borrow a connection from the pool.
//!
//! ## Public API
//!
//! - `connect`: The async function to establish the database connection pool.
//! - `run_migrations`: A utility to apply database migrations, ensuring the schema is up-to-date.
//! - `TradeStore`: Executes a `RenderedQuery` and returns rows as
//!   alias -> JSON value maps.
//! - `DbError`: The specific error types that can be returned from this crate.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod executor;

// Re-export the key components to create a clean, public-facing API.
pub use connection::{connect, run_migrations};
pub use error::DbError;
pub use executor::TradeStore;
