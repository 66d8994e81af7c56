#![allow(dead_code)]

use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

use axum::body::Body;
use axum::http::{Request, Response};
use http_body_util::BodyExt;
use schoolhub::router::init_router;
use schoolhub::state::AppState;
use schoolhub_auth::{AdminRole, create_access_token};
use schoolhub_config::{
    CorsConfig, EmailConfig, JwtConfig, RateLimitConfig, ServerConfig, StorageConfig,
};
use schoolhub_core::{LocalFileStorage, hash_password};
use serde_json::Value;
use sqlx::PgPool;
use uuid::Uuid;

pub const TEST_PASSWORD: &str = "correct-horse-battery";
pub const TEST_IP: &str = "203.0.113.10";
pub const BOUNDARY: &str = "schoolhub-test-boundary";

pub struct TestAdmin {
    pub id: Uuid,
    pub email: String,
    pub role: AdminRole,
}

pub fn test_jwt_config() -> JwtConfig {
    JwtConfig {
        secret: "integration-test-secret-0123456789".to_string(),
        access_token_expiry: 3600,
    }
}

/// A fresh directory per test so uploads never collide.
pub fn test_storage_config() -> StorageConfig {
    StorageConfig {
        dir: std::env::temp_dir()
            .join("schoolhub-tests")
            .join(Uuid::new_v4().to_string()),
        base_url: "http://localhost:3000/files".to_string(),
        max_upload_mb: 10,
    }
}

pub fn test_state(pool: PgPool, rate_limit_config: RateLimitConfig) -> AppState {
    let storage_config = test_storage_config();
    let storage = Arc::new(LocalFileStorage::with_max_size(
        storage_config.dir.clone(),
        storage_config.base_url.clone(),
        storage_config.max_upload_bytes(),
    ));

    AppState {
        db: pool,
        jwt_config: test_jwt_config(),
        email_config: EmailConfig::default(),
        cors_config: CorsConfig {
            allowed_origins: vec!["http://localhost:5173".to_string()],
        },
        rate_limit_config,
        server_config: ServerConfig {
            port: 0,
            metrics_port: 0,
        },
        storage_config,
        storage,
    }
}

pub fn setup_test_app(pool: PgPool) -> axum::Router {
    init_router(test_state(pool, RateLimitConfig::permissive()))
}

/// Like [`setup_test_app`] but also hands back the upload directory.
pub fn setup_test_app_with_storage(pool: PgPool) -> (axum::Router, PathBuf) {
    let state = test_state(pool, RateLimitConfig::permissive());
    let dir = state.storage_config.dir.clone();
    (init_router(state), dir)
}

pub fn setup_test_app_with_rate_limit(pool: PgPool, config: RateLimitConfig) -> axum::Router {
    init_router(test_state(pool, config))
}

pub fn generate_unique_email() -> String {
    format!("admin-{}@school.test", Uuid::new_v4().simple())
}

pub async fn create_test_admin(pool: &PgPool, role: AdminRole) -> TestAdmin {
    create_admin_with_status(pool, role, true).await
}

pub async fn create_admin_with_status(pool: &PgPool, role: AdminRole, active: bool) -> TestAdmin {
    let email = generate_unique_email();
    let hashed = hash_password(TEST_PASSWORD).unwrap();

    let id = sqlx::query_scalar::<_, Uuid>(
        r#"
        INSERT INTO admin_users (email, password_hash, full_name, role, is_active)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id
        "#,
    )
    .bind(&email)
    .bind(hashed)
    .bind("Test Admin")
    .bind(role.as_str())
    .bind(active)
    .fetch_one(pool)
    .await
    .unwrap();

    TestAdmin { id, email, role }
}

pub fn admin_token(admin: &TestAdmin) -> String {
    create_access_token(admin.id, &admin.email, admin.role, &test_jwt_config()).unwrap()
}

pub async fn editor_token(pool: &PgPool) -> String {
    admin_token(&create_test_admin(pool, AdminRole::Editor).await)
}

pub fn json_request(method: &str, uri: &str, token: Option<&str>, body: Option<Value>) -> Request<Body> {
    let mut builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("x-forwarded-for", TEST_IP);

    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }

    match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(serde_json::to_vec(&body).unwrap()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    }
}

pub async fn read_body(response: Response<Body>) -> Vec<u8> {
    response
        .into_body()
        .collect()
        .await
        .unwrap()
        .to_bytes()
        .to_vec()
}

pub async fn read_json(response: Response<Body>) -> Value {
    let bytes = read_body(response).await;
    serde_json::from_slice(&bytes).unwrap()
}

/// A draft that passes every enrollment step.
pub fn valid_enrollment_draft() -> Value {
    serde_json::json!({
        "student": {
            "prefix": "Miss",
            "first_name": "Ploy",
            "last_name": "Suksan",
            "id_card": "1103700012345",
            "birth_date": "2012-05-14",
            "gender": "female",
            "phone": "0812345678",
            "address": "99 Moo 4, Bang Kapi, Bangkok"
        },
        "parent": {
            "full_name": "Somchai Suksan",
            "relationship": "father",
            "phone": "0898765432",
            "email": "somchai@example.com",
            "occupation": "Engineer"
        },
        "academic": {
            "previous_school": "Wat Pho Primary School",
            "previous_grade": "P6",
            "gpa": 3.45,
            "applying_grade": "m1"
        },
        "agreements": {
            "accept_terms": true,
            "confirm_information": true
        }
    })
}

/// A small, fully decodable PNG.
pub fn sample_png() -> Vec<u8> {
    let img = image::DynamicImage::ImageRgb8(image::RgbImage::from_pixel(
        8,
        8,
        image::Rgb([20, 90, 160]),
    ));
    let mut buf = Cursor::new(Vec::new());
    img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
    buf.into_inner()
}

/// One multipart part: `(field name, file name, content type, bytes)`.
/// Parts without a file name are plain text fields.
pub type Part<'a> = (&'a str, Option<&'a str>, &'a str, &'a [u8]);

pub fn multipart_body(parts: &[Part<'_>]) -> Vec<u8> {
    let mut body = Vec::new();
    for (name, file_name, content_type, content) in parts {
        body.extend_from_slice(format!("--{}\r\n", BOUNDARY).as_bytes());
        match file_name {
            Some(file_name) => {
                body.extend_from_slice(
                    format!(
                        "Content-Disposition: form-data; name=\"{}\"; filename=\"{}\"\r\n",
                        name, file_name
                    )
                    .as_bytes(),
                );
                body.extend_from_slice(
                    format!("Content-Type: {}\r\n\r\n", content_type).as_bytes(),
                );
            }
            None => body.extend_from_slice(
                format!("Content-Disposition: form-data; name=\"{}\"\r\n\r\n", name)
                    .as_bytes(),
            ),
        }
        body.extend_from_slice(content);
        body.extend_from_slice(b"\r\n");
    }
    body.extend_from_slice(format!("--{}--\r\n", BOUNDARY).as_bytes());
    body
}

pub fn file_part<'a>(file_name: &'a str, content_type: &'a str, content: &'a [u8]) -> Part<'a> {
    ("file", Some(file_name), content_type, content)
}

pub fn multipart_request(uri: &str, token: Option<&str>, body: Vec<u8>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(
            "content-type",
            format!("multipart/form-data; boundary={}", BOUNDARY),
        )
        .header("x-forwarded-for", TEST_IP);
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {}", token));
    }
    builder.body(Body::from(body)).unwrap()
}
