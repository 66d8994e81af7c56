//! Shared helpers for the HTTP layer.
//!
//! - [`email`]: SMTP notifications to the school office
//! - [`html`]: escaping for server-rendered HTML
//! - [`sql`]: dynamic INSERT / UPDATE building and database error mapping

pub mod email;
pub mod html;
pub mod sql;
