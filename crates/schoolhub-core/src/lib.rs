//! # SchoolHub Core
//!
//! Foundational types shared by every SchoolHub crate:
//!
//! - [`errors`]: [`AppError`] with HTTP response conversion and field-level
//!   validation details
//! - [`file_storage`]: storage trait for uploaded images and a local backend
//! - [`pagination`]: query parameters and metadata for paginated lists
//! - [`password`]: bcrypt hashing for admin accounts
//! - [`serde`]: lenient query-string deserializers
//!
//! ```ignore
//! use schoolhub_core::{AppError, PaginationParams};
//!
//! let err = AppError::not_found(anyhow::anyhow!("News item not found"));
//! let limit = PaginationParams::default().limit();
//! ```

pub mod errors;
pub mod file_storage;
pub mod pagination;
pub mod password;
pub mod serde;

pub use errors::{AppError, FieldErrors};
pub use file_storage::{FileStorage, LocalFileStorage, StorageError};
pub use pagination::{Paginated, PaginationMeta, PaginationParams};
pub use password::{hash_password, verify_password};
