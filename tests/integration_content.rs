mod common;

use axum::http::StatusCode;
use common::{editor_token, json_request, read_json, setup_test_app};
use serde_json::{Value, json};
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

async fn create_faq(app: &axum::Router, token: &str, question: &str) -> Value {
    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/admin/faqs",
            Some(token),
            Some(json!({ "question": question, "answer": "Yes, every weekday." })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    read_json(response).await
}

fn faq_questions(page: &Value) -> Vec<String> {
    page["faqs"]
        .as_array()
        .unwrap()
        .iter()
        .map(|faq| faq["question"].as_str().unwrap().to_string())
        .collect()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_faq_lifecycle(pool: PgPool) {
    sqlx::query("INSERT INTO faqs (question, answer, order_position) VALUES ('Existing?', 'Yes', 4)")
        .execute(&pool)
        .await
        .unwrap();

    let token = editor_token(&pool).await;
    let app = setup_test_app(pool);

    let faq = create_faq(&app, &token, "  Is there a school bus?  ").await;
    assert_eq!(faq["question"], "Is there a school bus?");
    assert_eq!(faq["order_position"], 5);
    assert_eq!(faq["is_active"], true);
    let id = faq["id"].as_str().unwrap().to_string();

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/public/contact", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let page = read_json(response).await;
    assert!(faq_questions(&page).contains(&"Is there a school bus?".to_string()));

    let response = app
        .clone()
        .oneshot(json_request(
            "PATCH",
            &format!("/api/admin/faqs/{}/visibility", id),
            Some(&token),
            Some(json!({ "visible": false })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["is_active"], false);

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/public/contact", None, None))
        .await
        .unwrap();
    let page = read_json(response).await;
    assert!(!faq_questions(&page).contains(&"Is there a school bus?".to_string()));

    let response = app
        .oneshot(json_request("GET", "/api/admin/faqs", Some(&token), None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let admin_list = read_json(response).await;
    assert!(
        admin_list
            .as_array()
            .unwrap()
            .iter()
            .any(|faq| faq["id"] == id.as_str())
    );
}

#[sqlx::test(migrations = "./migrations")]
async fn test_order_positions_increase(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = setup_test_app(pool);

    let first = create_faq(&app, &token, "First?").await;
    let second = create_faq(&app, &token, "Second?").await;
    let third = create_faq(&app, &token, "Third?").await;

    assert_eq!(first["order_position"], 1);
    assert_eq!(second["order_position"], 2);
    assert_eq!(third["order_position"], 3);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_update_and_delete(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = setup_test_app(pool.clone());

    let faq = create_faq(&app, &token, "Uniform?").await;
    let id = faq["id"].as_str().unwrap();

    let response = app
        .clone()
        .oneshot(json_request(
            "PUT",
            &format!("/api/admin/faqs/{}", id),
            Some(&token),
            Some(json!({ "answer": "Navy blue on Mondays." })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let updated = read_json(response).await;
    assert_eq!(updated["answer"], "Navy blue on Mondays.");
    assert_eq!(updated["question"], "Uniform?");

    let response = app
        .clone()
        .oneshot(json_request(
            "DELETE",
            &format!("/api/admin/faqs/{}", id),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let remaining = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM faqs")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(remaining, 0);

    let response = app
        .oneshot(json_request(
            "GET",
            &format!("/api/admin/faqs/{}", id),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_item_is_not_found(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "PUT",
            &format!("/api/admin/staff/{}", Uuid::new_v4()),
            Some(&token),
            Some(json!({ "position": "Teacher" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_blank_title_is_rejected(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin/news",
            Some(&token),
            Some(json!({ "title": "   ", "content": "Body" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(response).await;
    assert!(body["fields"]["title"].is_array());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_content_requires_token(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/admin/faqs",
            None,
            Some(json!({ "question": "Q?", "answer": "A" })),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_public_news_hides_drafts_and_scheduled(pool: PgPool) {
    sqlx::query(
        r#"
        INSERT INTO news (title, content, category, is_published, published_at) VALUES
            ('Live', 'x', 'general', TRUE, NOW() - INTERVAL '1 day'),
            ('Draft', 'x', 'general', FALSE, NOW() - INTERVAL '1 day'),
            ('Scheduled', 'x', 'general', TRUE, NOW() + INTERVAL '7 days'),
            ('Sports day', 'x', 'sports', TRUE, NOW() - INTERVAL '2 days')
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(json_request("GET", "/api/public/news", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let titles: Vec<&str> = body["data"]
        .as_array()
        .unwrap()
        .iter()
        .map(|n| n["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Live", "Sports day"]);
    assert_eq!(body["meta"]["total"], 2);

    let response = app
        .oneshot(json_request(
            "GET",
            "/api/public/news?category=sports",
            None,
            None,
        ))
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 1);
    assert_eq!(body["data"][0]["title"], "Sports day");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_scheduled_news_not_readable_by_id(pool: PgPool) {
    let scheduled = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO news (title, content, is_published, published_at)
         VALUES ('Scheduled', 'x', TRUE, NOW() + INTERVAL '7 days') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    let live = sqlx::query_scalar::<_, Uuid>(
        "INSERT INTO news (title, content, is_published, published_at)
         VALUES ('Live', 'x', TRUE, NOW() - INTERVAL '1 hour') RETURNING id",
    )
    .fetch_one(&pool)
    .await
    .unwrap();

    let token = editor_token(&pool).await;
    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/api/public/news/{}", scheduled),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            &format!("/api/public/news/{}", live),
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["title"], "Live");

    // admins still see it
    let response = app
        .oneshot(json_request(
            "GET",
            &format!("/api/admin/news/{}", scheduled),
            Some(&token),
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_concurrent_creates_get_distinct_positions(pool: PgPool) {
    let token = editor_token(&pool).await;
    let app = setup_test_app(pool.clone());

    let handles: Vec<_> = (0..12)
        .map(|i| {
            let app = app.clone();
            let token = token.clone();
            tokio::spawn(async move {
                app.oneshot(json_request(
                    "POST",
                    "/api/admin/faqs",
                    Some(&token),
                    Some(json!({ "question": format!("Question {}?", i), "answer": "Yes" })),
                ))
                .await
                .unwrap()
                .status()
            })
        })
        .collect();

    for handle in handles {
        assert_eq!(handle.await.unwrap(), StatusCode::CREATED);
    }

    let (total, distinct, max) = sqlx::query_as::<_, (i64, i64, Option<i32>)>(
        "SELECT COUNT(*), COUNT(DISTINCT order_position), MAX(order_position) FROM faqs",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(total, 12);
    assert_eq!(distinct, 12);
    assert_eq!(max, Some(12));
}
