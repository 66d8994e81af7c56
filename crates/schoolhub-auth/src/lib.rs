//! # SchoolHub Auth
//!
//! Server-issued admin sessions. A successful login yields a signed JWT
//! carrying the admin's id, email and [`AdminRole`]; every admin request
//! presents it as a bearer token and is verified before any handler runs.
//!
//! ```ignore
//! use schoolhub_auth::{AdminRole, create_access_token, verify_token};
//!
//! let token = create_access_token(admin_id, "office@school.ac.th", AdminRole::Editor, &config)?;
//! let claims = verify_token(&token, &config)?;
//! assert_eq!(claims.role, AdminRole::Editor);
//! ```

pub mod claims;
pub mod jwt;

pub use claims::{AdminRole, Claims};
pub use jwt::{create_access_token, verify_token};
