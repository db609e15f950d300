//! # chirpy-db
//!
//! Persistence layer implementing the chirpy-core repository traits.
//!
//! ## Overview
//!
//! - Connection pool management
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - PostgreSQL repository implementations
//! - DashMap-backed in-memory repositories with identical semantics
//! - Schema migrations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use chirpy_db::{create_pool, run_migrations, DatabaseConfig, PgUserRepository};
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let pool = create_pool(&DatabaseConfig::new("postgres://localhost/chirpy")).await?;
//!     run_migrations(&pool).await?;
//!     let user_repo = PgUserRepository::new(pool);
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod memory;
pub mod migrations;
pub mod models;
pub mod pool;
pub mod repositories;

// Re-export commonly used types
pub use memory::{InMemoryRefreshTokenRepository, InMemoryUserRepository};
pub use migrations::{embedded_migrator, run_migrations};
pub use pool::{create_pool, DatabaseConfig, PgPool};
pub use repositories::{PgRefreshTokenRepository, PgUserRepository};
