use serde::{Deserialize, Serialize};
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

use schoolhub_models::validation::validate_http_url;

fn default_folder() -> String {
    "misc".to_string()
}

/// `POST /api/admin/uploads?folder=news&max_size_mb=5`
#[derive(Debug, Clone, Deserialize, ToSchema, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UploadQuery {
    /// Target folder (`^[a-z0-9_-]{1,32}$`, default `misc`)
    #[serde(default = "default_folder")]
    pub folder: String,
    /// Per-upload size limit in MiB, capped by the server limit
    pub max_size_mb: Option<usize>,
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct UploadResponse {
    pub key: String,
    pub url: String,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct DeleteUploadDto {
    #[validate(custom(function = "validate_http_url"))]
    pub url: String,
}
