//! # club-db
//!
//! Database layer implementing repository traits with PostgreSQL via SQLx.
//!
//! ## Overview
//!
//! This crate provides PostgreSQL implementations for all repository traits
//! defined in `club-core`. It handles:
//!
//! - Connection pool management and schema migrations
//! - Database models with SQLx `FromRow` derives
//! - Entity ↔ Model mappers
//! - Filter, patch and ordering inputs rendered as bound SQL
//! - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use club_db::pool::{create_pool, run_migrations, DatabaseConfig};
//! use club_db::repositories::PgTermRepository;
//! use club_core::traits::TermRepository;
//!
//! async fn example() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = DatabaseConfig::from_env();
//!     let pool = create_pool(&config).await?;
//!     run_migrations(&pool).await?;
//!     let terms = PgTermRepository::new(pool);
//!
//!     // Use the repository...
//!     Ok(())
//! }
//! ```

pub mod mappers;
pub mod models;
pub mod pool;
pub mod repositories;
pub mod sql;

// Re-export commonly used types
pub use pool::{
    create_lazy_pool, create_pool, create_pool_from_env, ping, run_migrations, DatabaseConfig,
    PgPool,
};
pub use repositories::{
    PgApplicationAnswerRepository, PgApplicationRepository, PgEventAttendanceRepository,
    PgEventRepository, PgProfileRepository, PgQuestionRepository, PgTermRepository,
};
