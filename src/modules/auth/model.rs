//! Admin login models, re-exported from `schoolhub-models`.

pub use schoolhub_models::admins::{
    ADMIN_USER_COLUMNS, AdminCredentials, AdminUser as AdminAccount, LoginRequest, LoginResponse,
};
