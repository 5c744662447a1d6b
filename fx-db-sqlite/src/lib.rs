//! SQLite storage backend for the FX calculator.
//!
//! Values live in a single `key_values` table created by the bundled
//! migrations.

pub mod factory;
pub mod repository;

pub use factory::SqliteRepositoryFactory;
pub use repository::SqliteRepository;
