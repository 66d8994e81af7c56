//! # SchoolHub CLI
//!
//! Account management and demo data for SchoolHub development.
//!
//! ```ignore
//! use schoolhub_cli::seeder::{seed_all, SeedConfig};
//!
//! seed_all(&pool, SeedConfig::default()).await?;
//! ```

pub mod admin;
pub mod seeder;
