//! # Database Crate
//!
//! The application-specific interface to the SQLite store holding treatment
//! options, comparison attributes, pros/cons rows and the comprehension quiz.
//!
//! ## Architectural Principles
//!
//! - **Adapter:** all SQL lives here. The rest of the application sees typed
//!   entities from `core-types` and never writes a query.
//! - **Fixed schema:** there is no migrations subsystem. Seeding issues
//!   `CREATE TABLE IF NOT EXISTS` for the five tables.
//! - **Seed once:** `seed::initialize` populates an empty store inside one
//!   transaction and is a no-op on every later start.
//!
//! ## Public API
//!
//! - `connect`: builds the connection pool from `DatabaseSettings`.
//! - `seed::initialize`: idempotent bootstrap of the fixed content.
//! - `DbRepository`: read access for the page controllers.
//! - `DbError`: the errors this crate returns.

// Declare the modules that constitute this crate.
pub mod connection;
pub mod error;
pub mod repository;
pub mod seed;
pub mod seed_data;

// Re-export the key components to create a clean, public-facing API.
pub use connection::connect;
pub use error::DbError;
pub use repository::{DbRepository, TableCounts};
pub use seed::{SeedOutcome, initialize};
pub use sqlx::SqlitePool;
