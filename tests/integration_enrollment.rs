mod common;

use axum::http::StatusCode;
use chrono::{Datelike, Utc};
use common::{json_request, read_json, setup_test_app, valid_enrollment_draft};
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;

#[sqlx::test(migrations = "./migrations")]
async fn test_short_id_card_is_rejected(pool: PgPool) {
    let app = setup_test_app(pool);
    let mut draft = valid_enrollment_draft();
    draft["student"]["id_card"] = json!("110370001234");

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/public/enrollment/steps/student",
            None,
            Some(draft),
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(response).await;
    assert!(body["fields"]["student.id_card"].is_array());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_valid_step_names_next(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/public/enrollment/steps/student",
            None,
            Some(valid_enrollment_draft()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["step"], "student");
    assert_eq!(body["step_number"], 1);
    assert_eq!(body["next_step"], "parent");
    assert_eq!(body["ready_to_submit"], false);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/public/enrollment/steps/4",
            None,
            Some(valid_enrollment_draft()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["step"], "review");
    assert!(body["next_step"].is_null());
    assert_eq!(body["ready_to_submit"], true);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_step_ignores_later_sections(pool: PgPool) {
    let app = setup_test_app(pool);
    let draft = json!({ "student": valid_enrollment_draft()["student"] });

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/public/enrollment/steps/student",
            None,
            Some(draft),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_missing_section_is_reported(pool: PgPool) {
    let app = setup_test_app(pool);
    let draft = json!({ "student": valid_enrollment_draft()["student"] });

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/public/enrollment/steps/parent",
            None,
            Some(draft),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(response).await;
    assert!(body["fields"]["parent"].is_array());
}

#[sqlx::test(migrations = "./migrations")]
async fn test_unknown_step(pool: PgPool) {
    let app = setup_test_app(pool);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/public/enrollment/steps/payment",
            None,
            Some(valid_enrollment_draft()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_submit_assigns_sequential_reference_numbers(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let year = Utc::now().year();

    let response = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/public/enrollment/submit",
            None,
            Some(valid_enrollment_draft()),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let body = read_json(response).await;
    assert_eq!(body["reference_number"], format!("ADM-{}-00001", year));
    assert_eq!(body["status"], "pending");

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/public/enrollment/submit",
            None,
            Some(valid_enrollment_draft()),
        ))
        .await
        .unwrap();
    let body = read_json(response).await;
    assert_eq!(body["reference_number"], format!("ADM-{}-00002", year));

    let (name, grade) = sqlx::query_as::<_, (String, String)>(
        "SELECT student_first_name, applying_grade FROM admissions ORDER BY created_at LIMIT 1",
    )
    .fetch_one(&pool)
    .await
    .unwrap();
    assert_eq!(name, "Ploy");
    assert_eq!(grade, "m1");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_submit_revalidates_every_section(pool: PgPool) {
    let app = setup_test_app(pool.clone());
    let mut draft = valid_enrollment_draft();
    draft["agreements"]["accept_terms"] = json!(false);
    draft["academic"]["gpa"] = json!(4.5);

    let response = app
        .oneshot(json_request(
            "POST",
            "/api/public/enrollment/submit",
            None,
            Some(draft),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    let body = read_json(response).await;
    assert!(body["fields"]["academic.gpa"].is_array());
    assert!(body["fields"]["agreements.accept_terms"].is_array());

    let stored = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM admissions")
        .fetch_one(&pool)
        .await
        .unwrap();
    assert_eq!(stored, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_enrollment_form_lists_programs(pool: PgPool) {
    sqlx::query(
        "INSERT INTO curriculum_programs (name, grade_levels, is_active) VALUES
            ('Science-Math', 'M4-M6', TRUE),
            ('Closed track', 'M4-M6', FALSE)",
    )
    .execute(&pool)
    .await
    .unwrap();

    let app = setup_test_app(pool);
    let response = app
        .oneshot(json_request("GET", "/api/public/enrollment", None, None))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = read_json(response).await;
    assert_eq!(body["steps"].as_array().unwrap().len(), 4);
    let programs = body["programs"].as_array().unwrap();
    assert_eq!(programs.len(), 1);
    assert_eq!(programs[0]["name"], "Science-Math");
}
