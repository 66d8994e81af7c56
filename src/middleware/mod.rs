//! Request guards for the admin API.
//!
//! 1. `require_admin` is a route layer on every `/api/admin/*` router except
//!    login. It verifies the bearer token, checks the account is still
//!    active and stores the claims in the request extensions.
//! 2. Handlers take [`auth::AdminUser`] to know who is acting, or a role
//!    extractor such as [`auth::RequireSettingsManager`] to restrict an
//!    endpoint to super admins.
//!
//! ```ignore
//! async fn update_settings(
//!     RequireSettingsManager(admin): RequireSettingsManager,
//!     ValidatedJson(dto): ValidatedJson<UpdateSettingsDto>,
//! ) -> Result<Json<SettingsResponse>, AppError> { ... }
//! ```

pub mod auth;
