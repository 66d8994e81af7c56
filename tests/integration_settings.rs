mod common;

use axum::http::StatusCode;
use common::{admin_token, create_test_admin, json_request, read_json, setup_test_app};
use schoolhub_auth::AdminRole;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_editor_cannot_change_settings(pool: PgPool) {
    let editor = create_test_admin(&pool, AdminRole::Editor).await;
    let token = admin_token(&editor);
    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/admin/settings",
            Some(&token),
            Some(json!({ "values": { "school_name": "Editor School" } })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    // reading is still allowed
    let response = app
        .oneshot(json_request("GET", "/api/admin/settings", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_super_admin_updates_settings(pool: PgPool) {
    let admin = create_test_admin(&pool, AdminRole::SuperAdmin).await;
    let token = admin_token(&admin);
    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            "/api/admin/settings",
            Some(&token),
            Some(json!({
                "values": {
                    "school_name": "Bangkok Wittaya School",
                    "phone": "02-123-4567"
                },
                "social_links": [
                    { "platform": "facebook", "url": "https://facebook.com/bkwittaya" },
                    { "platform": "line", "url": "https://line.me/R/ti/p/@bkwittaya" }
                ]
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["values"]["school_name"], "Bangkok Wittaya School");
    assert_eq!(body["typed"]["social_links"].as_array().unwrap().len(), 2);

    let response = app
        .oneshot(json_request("GET", "/api/public/settings", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["typed"]["school_name"], "Bangkok Wittaya School");
    assert_eq!(body["typed"]["phone"], "02-123-4567");
    assert_eq!(body["typed"]["social_links"][0]["platform"], "facebook");
    // untouched keys keep their seeded value
    assert_eq!(body["values"]["office_hours"], "Mon-Fri 08:00-16:30");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_invalid_social_link_is_rejected(pool: PgPool) {
    let admin = create_test_admin(&pool, AdminRole::SuperAdmin).await;
    let token = admin_token(&admin);
    let app = setup_test_app(pool.clone());

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/admin/settings",
            Some(&token),
            Some(json!({
                "values": { "school_name": "Should not be saved" },
                "social_links": [{ "platform": "youtube", "url": "javascript:alert(1)" }]
            })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(response).await;
    assert!(body["fields"]["social_links"].is_array());

    let name = sqlx::query_scalar::<_, String>(
        "SELECT value FROM site_settings WHERE key = 'school_name'",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(name, "");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_raw_social_links_value_is_rejected(pool: PgPool) {
    let admin = create_test_admin(&pool, AdminRole::SuperAdmin).await;
    let token = admin_token(&admin);
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "PUT",
            "/api/admin/settings",
            Some(&token),
            Some(json!({ "values": { "social_links": "[]", "Bad Key": "x" } })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}
