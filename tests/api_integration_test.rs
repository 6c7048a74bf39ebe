use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use sea_orm::{ActiveModelTrait, EntityTrait, Set};
use tower::util::ServiceExt; // for `oneshot`

use talenthub::api;
use talenthub::db;
use talenthub::infrastructure::AppState;

// Helper to create a test app state backed by in-memory SQLite
async fn setup_test_state() -> AppState {
    let db = db::init_db("sqlite::memory:")
        .await
        .expect("Failed to init DB");
    AppState::new(db)
}

fn test_app(state: AppState) -> Router {
    api::api_router(state)
}

async fn send_json(
    app: &Router,
    method: &str,
    uri: &str,
    payload: serde_json::Value,
) -> (StatusCode, serde_json::Value) {
    let req = Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(payload.to_string()))
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

async fn get_json(app: &Router, uri: &str) -> (StatusCode, serde_json::Value) {
    let req = Request::builder().uri(uri).body(Body::empty()).unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

// Helper to create a talent through the API, returning its id
async fn create_test_talent(app: &Router, name: &str) -> String {
    let (status, json) = send_json(
        app,
        "POST",
        "/talents",
        serde_json::json!({
            "name": name,
            "niche": "Beauty",
            "status": "Active",
            "joinDate": "2024-01-15"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_str().unwrap().to_string()
}

async fn create_test_account(app: &Router, talent_id: &str, username: &str) -> String {
    let (status, json) = send_json(
        app,
        "POST",
        "/accounts",
        serde_json::json!({
            "talentId": talent_id,
            "platform": "TikTok",
            "username": username,
            "followers": 125000
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_str().unwrap().to_string()
}

async fn create_test_product(app: &Router, account_id: &str, name: &str) -> String {
    let (status, json) = send_json(
        app,
        "POST",
        "/products",
        serde_json::json!({
            "name": name,
            "link": "https://shope.ee/test-item",
            "accountId": account_id
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_str().unwrap().to_string()
}

async fn create_overall_sale(
    app: &Router,
    talent_id: &str,
    account_id: &str,
    date: &str,
    revenue: f64,
) -> String {
    let (status, json) = send_json(
        app,
        "POST",
        "/sales",
        serde_json::json!({
            "type": "Overall",
            "date": date,
            "talentId": talent_id,
            "accountId": account_id,
            "revenue": revenue,
            "commission": 0,
            "views": 1500,
            "clicks": 90,
            "status": "Completed"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn test_talent_crud() {
    let state = setup_test_state().await;
    let app = test_app(state);

    let id = create_test_talent(&app, "Ayu Lestari").await;

    let (status, json) = get_json(&app, "/talents").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["total"], 1);
    assert_eq!(json["talents"][0]["name"], "Ayu Lestari");
    assert_eq!(json["talents"][0]["joinDate"], "2024-01-15");

    // Full replace
    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/talents/{}", id),
        serde_json::json!({
            "name": "Ayu Lestari",
            "niche": "Skincare",
            "status": "Inactive",
            "joinDate": "2024-01-15"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = get_json(&app, "/talents").await;
    assert_eq!(json["talents"][0]["niche"], "Skincare");
    assert_eq!(json["talents"][0]["status"], "Inactive");

    // Delete, then the collection is empty
    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/talents/{}", id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let (_, json) = get_json(&app, "/talents").await;
    assert_eq!(json["total"], 0);
}

#[tokio::test]
async fn test_account_keeps_snapshotted_talent_name() {
    let state = setup_test_state().await;
    let app = test_app(state);

    let talent_id = create_test_talent(&app, "Ayu Lestari").await;
    create_test_account(&app, &talent_id, "ayu.beauty").await;

    let (_, json) = get_json(&app, "/accounts").await;
    assert_eq!(json["accounts"][0]["talentName"], "Ayu Lestari");

    // Renaming the talent must not relabel the stored account
    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/talents/{}", talent_id),
        serde_json::json!({
            "name": "Ayu L. Putri",
            "niche": "Beauty",
            "status": "Active",
            "joinDate": "2024-01-15"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = get_json(&app, "/accounts").await;
    assert_eq!(json["accounts"][0]["talentName"], "Ayu Lestari");
}

#[tokio::test]
async fn test_bulk_post_creation_fans_out_per_quantity() {
    let state = setup_test_state().await;
    let app = test_app(state);

    let talent_id = create_test_talent(&app, "Ayu Lestari").await;
    let account_id = create_test_account(&app, &talent_id, "ayu.beauty").await;
    let serum_id = create_test_product(&app, &account_id, "Glow Serum").await;
    let tint_id = create_test_product(&app, &account_id, "Lip Tint").await;

    let (status, json) = send_json(
        &app,
        "POST",
        "/posts",
        serde_json::json!({
            "date": "2024-03-05",
            "talentId": talent_id,
            "accountId": account_id,
            "items": [
                { "productId": serum_id, "quantity": 3 },
                { "productId": tint_id, "quantity": 1 }
            ]
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(json["created"], 4);

    let (_, json) = get_json(&app, "/posts").await;
    assert_eq!(json["total"], 4);
    let posts = json["posts"].as_array().unwrap();
    let serum_posts = posts
        .iter()
        .filter(|p| p["productId"] == serum_id.as_str())
        .count();
    let tint_posts = posts
        .iter()
        .filter(|p| p["productId"] == tint_id.as_str())
        .count();
    assert_eq!(serum_posts, 3);
    assert_eq!(tint_posts, 1);
    for post in posts {
        assert_eq!(post["date"], "2024-03-05");
        assert_eq!(post["talentId"], talent_id.as_str());
        assert_eq!(post["accountId"], account_id.as_str());
        assert_eq!(post["views"], 0);
        assert_eq!(post["likes"], 0);
        assert_eq!(post["comments"], 0);
    }
}

#[tokio::test]
async fn test_post_edit_preserves_engagement_counters() {
    let state = setup_test_state().await;
    let db = state.db().clone();
    let app = test_app(state);

    let talent_id = create_test_talent(&app, "Ayu Lestari").await;
    let account_id = create_test_account(&app, &talent_id, "ayu.beauty").await;
    let serum_id = create_test_product(&app, &account_id, "Glow Serum").await;
    let tint_id = create_test_product(&app, &account_id, "Lip Tint").await;

    send_json(
        &app,
        "POST",
        "/posts",
        serde_json::json!({
            "date": "2024-03-05",
            "talentId": talent_id,
            "accountId": account_id,
            "items": [{ "productId": serum_id, "quantity": 1 }]
        }),
    )
    .await;

    let (_, json) = get_json(&app, "/posts").await;
    let post_id = json["posts"][0]["id"].as_str().unwrap().to_string();

    // Simulate engagement recorded on the stored row
    let stored = talenthub::models::post::Entity::find_by_id(post_id.clone())
        .one(&db)
        .await
        .unwrap()
        .unwrap();
    let mut active: talenthub::models::post::ActiveModel = stored.into();
    active.views = Set(Some(4200));
    active.likes = Set(Some(310));
    active.update(&db).await.unwrap();

    // Edit mode replaces the product and date in one call
    let (status, _) = send_json(
        &app,
        "PUT",
        &format!("/posts/{}", post_id),
        serde_json::json!({
            "date": "2024-03-06",
            "talentId": talent_id,
            "accountId": account_id,
            "productId": tint_id
        }),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, json) = get_json(&app, "/posts").await;
    let post = &json["posts"][0];
    assert_eq!(post["productId"], tint_id.as_str());
    assert_eq!(post["productName"], "Lip Tint");
    assert_eq!(post["date"], "2024-03-06");
    assert_eq!(post["views"], 4200);
    assert_eq!(post["likes"], 310);
}

#[tokio::test]
async fn test_daily_count_reports_same_day_posts() {
    let state = setup_test_state().await;
    let app = test_app(state);

    let talent_id = create_test_talent(&app, "Ayu Lestari").await;
    let account_id = create_test_account(&app, &talent_id, "ayu.beauty").await;
    let serum_id = create_test_product(&app, &account_id, "Glow Serum").await;

    send_json(
        &app,
        "POST",
        "/posts",
        serde_json::json!({
            "date": "2024-03-05",
            "talentId": talent_id,
            "accountId": account_id,
            "items": [{ "productId": serum_id, "quantity": 2 }]
        }),
    )
    .await;

    let (status, json) = get_json(
        &app,
        &format!("/posts/daily-count?talentId={}&date=2024-03-05", talent_id),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["count"], 2);

    let (_, json) = get_json(
        &app,
        &format!("/posts/daily-count?talentId={}&date=2024-03-06", talent_id),
    )
    .await;
    assert_eq!(json["count"], 0);
}

#[tokio::test]
async fn test_post_listing_filters_by_period_and_text() {
    let state = setup_test_state().await;
    let app = test_app(state);

    let talent_id = create_test_talent(&app, "Ayu Lestari").await;
    let account_id = create_test_account(&app, &talent_id, "ayu.beauty").await;
    let serum_id = create_test_product(&app, &account_id, "Glow Serum").await;

    for date in ["2024-03-05", "2024-04-02"] {
        send_json(
            &app,
            "POST",
            "/posts",
            serde_json::json!({
                "date": date,
                "talentId": talent_id,
                "accountId": account_id,
                "items": [{ "productId": serum_id, "quantity": 1 }]
            }),
        )
        .await;
    }

    // March only (month is zero-indexed)
    let (_, json) = get_json(&app, "/posts?month=2&year=2024").await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["posts"][0]["date"], "2024-03-05");

    // Case-insensitive substring against the snapshotted names
    let (_, json) = get_json(&app, "/posts?month=2&year=2024&product=serum").await;
    assert_eq!(json["total"], 1);
    let (_, json) = get_json(&app, "/posts?month=2&year=2024&product=lipstick").await;
    assert_eq!(json["total"], 0);
}

#[tokio::test]
async fn test_dashboard_march_scenario() {
    let state = setup_test_state().await;
    let app = test_app(state);

    let talent_id = create_test_talent(&app, "Ayu Lestari").await;
    let account_id = create_test_account(&app, &talent_id, "ayu.beauty").await;
    create_overall_sale(&app, &talent_id, &account_id, "2024-03-05", 100000.0).await;
    create_overall_sale(&app, &talent_id, &account_id, "2024-03-20", 50000.0).await;
    // Out of period, must not count
    create_overall_sale(&app, &talent_id, &account_id, "2024-04-01", 999999.0).await;

    let (status, json) = get_json(&app, "/dashboard?month=2&year=2024").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["totalRevenue"], 150000.0);

    let trend = json["dailyTrend"].as_array().unwrap();
    assert_eq!(trend.len(), 31);
    for point in trend {
        let day = point["day"].as_u64().unwrap();
        let expected = match day {
            5 => 100000.0,
            20 => 50000.0,
            _ => 0.0,
        };
        assert_eq!(point["revenue"], expected, "day {}", day);
    }

    // Top accounts carry the period revenue
    assert_eq!(json["topAccounts"][0]["username"], "ayu.beauty");
    assert_eq!(json["topAccounts"][0]["revenue"], 150000.0);
}

#[tokio::test]
async fn test_dashboard_drops_account_choice_of_other_talent() {
    let state = setup_test_state().await;
    let app = test_app(state);

    let ayu = create_test_talent(&app, "Ayu Lestari").await;
    let budi = create_test_talent(&app, "Budi Santoso").await;
    let ayu_acct = create_test_account(&app, &ayu, "ayu.beauty").await;
    let budi_acct = create_test_account(&app, &budi, "budi.gadget").await;
    create_overall_sale(&app, &ayu, &ayu_acct, "2024-03-05", 100000.0).await;
    create_overall_sale(&app, &budi, &budi_acct, "2024-03-05", 70000.0).await;

    // budi's account does not belong to ayu: the account choice is dropped
    // and the summary covers all of ayu's accounts
    let (status, json) = get_json(
        &app,
        &format!(
            "/dashboard?month=2&year=2024&talentId={}&accountId={}",
            ayu, budi_acct
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["totalRevenue"], 100000.0);
}

#[tokio::test]
async fn test_account_deletion_leaves_products_in_place() {
    let state = setup_test_state().await;
    let app = test_app(state);

    let talent_id = create_test_talent(&app, "Ayu Lestari").await;
    let account_id = create_test_account(&app, &talent_id, "ayu.beauty").await;
    create_test_product(&app, &account_id, "Glow Serum").await;

    let req = Request::builder()
        .method("DELETE")
        .uri(format!("/accounts/{}", account_id))
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    // No cascade: the product survives with its snapshotted account name
    let (_, json) = get_json(&app, "/products").await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["products"][0]["accountName"], "ayu.beauty");
}

#[tokio::test]
async fn test_sales_listing_filters() {
    let state = setup_test_state().await;
    let app = test_app(state);

    let talent_id = create_test_talent(&app, "Ayu Lestari").await;
    let account_id = create_test_account(&app, &talent_id, "ayu.beauty").await;
    let serum_id = create_test_product(&app, &account_id, "Glow Serum").await;

    create_overall_sale(&app, &talent_id, &account_id, "2024-03-05", 100000.0).await;
    let (status, _) = send_json(
        &app,
        "POST",
        "/sales",
        serde_json::json!({
            "type": "Product",
            "date": "2024-03-10",
            "talentId": talent_id,
            "accountId": account_id,
            "productId": serum_id,
            "revenue": 540000,
            "commission": 27000,
            "quantity": 12,
            "status": "Completed"
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, json) = get_json(&app, "/sales").await;
    assert_eq!(json["total"], 2);

    let (_, json) = get_json(&app, "/sales?type=Product").await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["sales"][0]["productName"], "Glow Serum");
    assert_eq!(json["sales"][0]["quantity"], 12);

    // Overall rows carry the fixed aggregate label
    let (_, json) = get_json(&app, "/sales?type=Overall").await;
    assert_eq!(json["sales"][0]["productName"], "Performa Keseluruhan");

    // Inclusive date range
    let (_, json) = get_json(&app, "/sales?startDate=2024-03-06&endDate=2024-03-10").await;
    assert_eq!(json["total"], 1);
    assert_eq!(json["sales"][0]["date"], "2024-03-10");
}

#[tokio::test]
async fn test_export_collection_as_csv() {
    let state = setup_test_state().await;
    let app = test_app(state);

    create_test_talent(&app, "Ayu Lestari").await;

    let req = Request::builder()
        .uri("/export/talents")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(req).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("text/csv"));
    let disposition = response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(disposition.starts_with("attachment"));

    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let csv = String::from_utf8(body.to_vec()).unwrap();
    // Columns are the records' own wire field names
    assert!(csv.starts_with("id,name,niche,status,joinDate"));
    assert!(csv.contains("Ayu Lestari"));
}

#[tokio::test]
async fn test_seeded_dashboard_loads() {
    let state = setup_test_state().await;
    talenthub::seed::seed_demo_data(state.db())
        .await
        .expect("Failed to seed");
    let app = test_app(state);

    let (status, json) = get_json(&app, "/dashboard?month=2&year=2024").await;
    assert_eq!(status, StatusCode::OK);
    assert!(json["totalRevenue"].as_f64().unwrap() > 0.0);
    assert!(!json["talentActivity"].as_array().unwrap().is_empty());
    assert_eq!(json["dailyTrend"].as_array().unwrap().len(), 31);
}
