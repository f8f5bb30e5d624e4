//! Database-backed tests for the ledger-consistency rules: the
//! `payment_given` accumulator across the payment lifecycle, the
//! cascade on farmer deletion, and the unique-phone constraint.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{create_test_admin, create_test_farmer, create_test_work, generate_unique_phone};
use farmledger::config::cors::CorsConfig;
use farmledger::config::jwt::JwtConfig;
use farmledger::config::upload::UploadConfig;
use farmledger::router::init_router;
use farmledger::state::AppState;
use http_body_util::BodyExt;
use serde_json::json;
use sqlx::PgPool;
use tower::ServiceExt;
use uuid::Uuid;

async fn setup_test_app(pool: PgPool) -> axum::Router {
    dotenvy::dotenv().ok();
    let state = AppState {
        db: pool.clone(),
        jwt_config: JwtConfig::from_env(),
        cors_config: CorsConfig::from_env(),
        upload_config: UploadConfig::from_env(),
    };
    init_router(state)
}

async fn get_admin_token(app: axum::Router, username: &str, password: &str) -> String {
    let request = Request::builder()
        .method("POST")
        .uri("/api/auth/admin/login")
        .header("content-type", "application/json")
        .body(Body::from(
            serde_json::to_string(&json!({
                "username": username,
                "password": password
            }))
            .unwrap(),
        ))
        .unwrap();

    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let body: serde_json::Value = serde_json::from_slice(&body).unwrap();
    body["token"].as_str().unwrap().to_string()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn payment_given(pool: &PgPool, work_id: Uuid) -> f64 {
    sqlx::query_scalar::<_, f64>("SELECT payment_given FROM work_records WHERE id = $1")
        .bind(work_id)
        .fetch_one(pool)
        .await
        .unwrap()
}

#[sqlx::test(migrations = "./migrations")]
async fn test_payment_lifecycle_tracks_work_accumulator(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin = create_test_admin(&mut tx, "adminpass123").await;
    let farmer = create_test_farmer(&mut tx, "farmerpass123").await;
    let work_id = create_test_work(&mut tx, farmer.id, 90.0, 200.0).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_admin_token(app, &admin.username, &admin.password).await;

    // Recording a payment against the work record increments the
    // accumulator by exactly the payment amount.
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/admin/payment/{}", farmer.id))
                .header("content-type", "application/json")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::from(
                    serde_json::to_string(&json!({
                        "amount": 120.0,
                        "workId": work_id
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let payment_id = body["payment"]["id"].as_str().unwrap().to_string();

    assert_eq!(payment_given(&pool, work_id).await, 120.0);

    // Editing the amount applies the delta, not a second increment.
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/admin/payment/{}", payment_id))
                .header("content-type", "application/json")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::from(
                    serde_json::to_string(&json!({"amount": 300.0})).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(payment_given(&pool, work_id).await, 300.0);

    // Deleting the payment subtracts its full amount.
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/admin/payment/{}", payment_id))
                .header("authorization", format!("Bearer {}", token))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    assert_eq!(payment_given(&pool, work_id).await, 0.0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_farmer_delete_removes_all_ledger_rows(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin = create_test_admin(&mut tx, "adminpass123").await;
    let farmer = create_test_farmer(&mut tx, "farmerpass123").await;
    let work_id = create_test_work(&mut tx, farmer.id, 60.0, 150.0).await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_admin_token(app, &admin.username, &admin.password).await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri(format!("/api/admin/payment/{}", farmer.id))
                .header("content-type", "application/json")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::from(
                    serde_json::to_string(&json!({
                        "amount": 50.0,
                        "workId": work_id
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri(format!("/api/admin/farmer/{}", farmer.id))
                .header("content-type", "application/json")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::from(
                    serde_json::to_string(&json!({"adminPassword": admin.password})).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // Zero remaining references in either ledger, and the account is gone.
    let works = sqlx::query_scalar::<_, i64>(
        "SELECT COUNT(*) FROM work_records WHERE farmer_id = $1",
    )
    .bind(farmer.id)
    .fetch_one(&pool)
    .await
    .unwrap();
    let payments =
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM payments WHERE farmer_id = $1")
            .bind(farmer.id)
            .fetch_one(&pool)
            .await
            .unwrap();
    let farmers = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM farmers WHERE id = $1")
        .bind(farmer.id)
        .fetch_one(&pool)
        .await
        .unwrap();

    assert_eq!(works, 0);
    assert_eq!(payments, 0);
    assert_eq!(farmers, 0);
}

#[sqlx::test(migrations = "./migrations")]
async fn test_duplicate_phone_registration_is_conflict(pool: PgPool) {
    let phone = generate_unique_phone();
    let body = json!({
        "name": "Ama",
        "phone": phone,
        "password": "farmerpass123"
    });

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/farmer")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/farmer")
                .header("content-type", "application/json")
                .body(Body::from(serde_json::to_string(&body).unwrap()))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);
    let body = json_body(response).await;
    assert_eq!(body["error"], "Farmer already exists");
}

#[sqlx::test(migrations = "./migrations")]
async fn test_work_update_recomputes_total_and_clears_note(pool: PgPool) {
    let mut tx = pool.begin().await.unwrap();
    let admin = create_test_admin(&mut tx, "adminpass123").await;
    let farmer = create_test_farmer(&mut tx, "farmerpass123").await;
    tx.commit().await.unwrap();

    let app = setup_test_app(pool.clone()).await;
    let token = get_admin_token(app, &admin.username, &admin.password).await;

    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/admin/work")
                .header("content-type", "application/json")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::from(
                    serde_json::to_string(&json!({
                        "farmerId": farmer.id,
                        "workType": "plowing",
                        "minutes": 90.0,
                        "ratePer60": 200.0,
                        "notes": "north field"
                    }))
                    .unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["work"]["totalAmount"], 300.0);
    let work_id = body["work"]["id"].as_str().unwrap().to_string();

    // An update that leaves notes out keeps the old text and recomputes
    // the total from the new minutes.
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/admin/work/{}", work_id))
                .header("content-type", "application/json")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::from(
                    serde_json::to_string(&json!({"minutes": 120.0})).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["work"]["totalAmount"], 400.0);
    assert_eq!(body["work"]["notes"], "north field");

    // An explicit null clears the note.
    let app = setup_test_app(pool.clone()).await;
    let response = app
        .oneshot(
            Request::builder()
                .method("PUT")
                .uri(format!("/api/admin/work/{}", work_id))
                .header("content-type", "application/json")
                .header("authorization", format!("Bearer {}", token))
                .body(Body::from(
                    serde_json::to_string(&json!({"notes": null})).unwrap(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert!(body["work"]["notes"].is_null());
}
