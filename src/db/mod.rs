//! Database module
//!
//! SQLite integration using sqlx with:
//! - Connection pool management
//! - Repository pattern over a flat key-value settings space
//! - Migrations embedded at build time

pub mod pool;
pub mod repository;

pub use pool::{create_pool, health_check, run_migrations};
