mod common;

use axum::http::StatusCode;
use common::{json_request, read_json, setup_test_app};
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_health_and_fallback(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(json_request("GET", "/health", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(read_json(response).await["status"], "ok");

    let response = app
        .oneshot(json_request("GET", "/api/public/nowhere", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(read_json(response).await["error"], "Not found");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_home_page_limits(pool: PgPool) {
    for i in 0..5 {
        sqlx::query(
            "INSERT INTO news (title, content, published_at) VALUES ($1, 'x', NOW() - make_interval(days => $2))",
        )
        .bind(format!("News {}", i))
        .bind(i)
        .execute(&pool)
        .await
        .unwrap();
    }
    for i in 1..=6 {
        sqlx::query("INSERT INTO events (title, event_date) VALUES ($1, CURRENT_DATE + $2::int)")
            .bind(format!("Event {}", i))
            .bind(i)
            .execute(&pool)
            .await
            .unwrap();
    }
    sqlx::query("INSERT INTO staff (full_name, position, is_active) VALUES ('A', 'Teacher', TRUE), ('B', 'Teacher', FALSE)")
        .execute(&pool)
        .await
        .unwrap();
    sqlx::query("UPDATE site_settings SET value = 'Bangkok Wittaya School' WHERE key = 'school_name'")
        .execute(&pool)
        .await
        .unwrap();

    let app = setup_test_app(pool);
    let response = app
        .oneshot(json_request("GET", "/api/public/home", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["settings"]["school_name"], "Bangkok Wittaya School");
    assert_eq!(body["news"].as_array().unwrap().len(), 3);
    assert_eq!(body["news"][0]["title"], "News 0");
    let events = body["upcoming_events"].as_array().unwrap();
    assert_eq!(events.len(), 4);
    assert_eq!(events[0]["title"], "Event 1");
    assert_eq!(body["stats"]["staff"], 1);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_calendar_includes_overlapping_events(pool: PgPool) {
    sqlx::query(
        r#"
        INSERT INTO events (title, event_date, end_date) VALUES
            ('Camp', '2025-05-29', '2025-06-02'),
            ('Sports day', '2025-06-15', NULL),
            ('Exams', '2025-07-01', NULL),
            ('Orientation', '2025-05-10', NULL)
        "#,
    )
    .execute(&pool)
    .await
    .unwrap();

    let app = setup_test_app(pool);
    let response = app
        .clone()
        .oneshot(json_request(
            "GET",
            "/api/public/calendar?year=2025&month=6",
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = read_json(response).await;
    assert_eq!(body["year"], 2025);
    assert_eq!(body["month"], 6);
    let titles: Vec<&str> = body["events"]
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["Camp", "Sports day"]);

    let response = app
        .oneshot(json_request(
            "GET",
            "/api/public/calendar?year=2025&month=13",
            None,
            None,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_about_page_lists_active_rows(pool: PgPool) {
    sqlx::query(
        "INSERT INTO milestones (year, title, is_active, order_position) VALUES
            (1985, 'School founded', TRUE, 1),
            (1999, 'Hidden milestone', FALSE, 2)",
    )
    .execute(&pool)
    .await
    .unwrap();

    let app = setup_test_app(pool);
    let response = app
        .oneshot(json_request("GET", "/api/public/about", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    let milestones = body["milestones"].as_array().unwrap();
    assert_eq!(milestones.len(), 1);
    assert_eq!(milestones[0]["title"], "School founded");
}
