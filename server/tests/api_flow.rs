//! HTTP API integration tests
//!
//! Drive the assembled router with oneshot requests against an
//! in-memory database.

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use serde_json::{Value, json};
use tower::ServiceExt;

use verdura_server::auth::role_policy::{RolePolicy, StaffEntry};
use verdura_server::{Config, ServerState, api, db};

async fn test_app() -> Router {
    let db = db::connect_memory().await.expect("in-memory db");
    let config = Config::with_overrides("./unused", 0);
    let policy = RolePolicy::new(vec![StaffEntry {
        username: Some("manager".into()),
        email: None,
    }]);
    api::build_app(ServerState::with_db(config, db, policy))
}

async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, value)
}

async fn register(app: &Router, username: &str) -> (String, Value) {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "username": username,
            "email": format!("{username}@example.com"),
            "phone": "555-0000",
            "password": "hunter2hunter2",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "register failed: {body}");
    (
        body["token"].as_str().unwrap().to_string(),
        body["user"].clone(),
    )
}

async fn create_item(app: &Router, staff_token: &str, name: &str, price: i64, quantity: i64) -> String {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/items",
        Some(staff_token),
        Some(json!({
            "name": name,
            "description": "test item",
            "price": price,
            "category": "vegetable",
            "quantity": quantity,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "item create failed: {body}");
    body["id"].as_str().unwrap().to_string()
}

#[tokio::test]
async fn register_login_me_flow() {
    let app = test_app().await;
    let (token, user) = register(&app, "alice").await;
    assert_eq!(user["role"], "customer");
    assert_eq!(user["points"], 0);

    let (status, me) = send(&app, Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["username"], "alice");

    // Wrong password
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "alice@example.com", "password": "wrong-password"})),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED, "{body}");

    // Right password
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/login",
        None,
        Some(json!({"email": "alice@example.com", "password": "hunter2hunter2"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["token"].as_str().is_some());
}

#[tokio::test]
async fn duplicate_registration_rejected() {
    let app = test_app().await;
    register(&app, "alice").await;

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/auth/register",
        None,
        Some(json!({
            "username": "alice2",
            "email": "alice@example.com",
            "phone": "555-0000",
            "password": "hunter2hunter2",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
}

#[tokio::test]
async fn protected_routes_require_token() {
    let app = test_app().await;
    let (status, _) = send(&app, Method::GET, "/api/items", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn staff_allowlist_controls_catalog_writes() {
    let app = test_app().await;
    let (staff_token, staff_user) = register(&app, "manager").await;
    assert_eq!(staff_user["role"], "staff");
    let (customer_token, _) = register(&app, "alice").await;

    // Customer cannot create items
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/items",
        Some(&customer_token),
        Some(json!({
            "name": "carrot",
            "description": "orange",
            "price": 3000,
            "category": "vegetable",
            "quantity": 10,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    // Staff can
    let item_id = create_item(&app, &staff_token, "carrot", 3000, 10).await;

    // Both roles can read
    let (status, item) = send(
        &app,
        Method::GET,
        &format!("/api/items/{item_id}"),
        Some(&customer_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(item["name"], "carrot");
}

#[tokio::test]
async fn checkout_over_http() {
    let app = test_app().await;
    let (staff_token, _) = register(&app, "manager").await;
    let (customer_token, _) = register(&app, "alice").await;
    let item_id = create_item(&app, &staff_token, "hamper", 100_000, 5).await;

    let (status, order) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(&customer_token),
        Some(json!({
            "orderItems": [{"item": item_id, "quantity": 1}],
            "convertedPoints": 0,
            "voucherApplied": [],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{order}");
    assert_eq!(order["subtotal"], 100_000);
    assert_eq!(order["total"], 100_000);
    assert_eq!(order["isFulfilled"], false);

    // Large order earned the loyalty point
    let (_, me) = send(&app, Method::GET, "/api/auth/me", Some(&customer_token), None).await;
    assert_eq!(me["points"], 1);

    // Staff sees it in the fulfillment queue
    let (status, queue) = send(&app, Method::GET, "/api/orders", Some(&staff_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(queue["results"].as_array().unwrap().len(), 1);

    // Staff cannot place orders
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(&staff_token),
        Some(json!({
            "orderItems": [{"item": item_id, "quantity": 1}],
        })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn empty_cart_is_a_client_error() {
    let app = test_app().await;
    register(&app, "manager").await;
    let (customer_token, _) = register(&app, "alice").await;

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(&customer_token),
        Some(json!({"orderItems": []})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4001);
}

#[tokio::test]
async fn item_list_pages_with_cursor() {
    let app = test_app().await;
    let (staff_token, _) = register(&app, "manager").await;

    for i in 0..15 {
        create_item(&app, &staff_token, &format!("item-{i:02}"), 1000 + i, 5).await;
    }

    let (status, page1) = send(&app, Method::GET, "/api/items", Some(&staff_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page1["results"].as_array().unwrap().len(), 10);
    assert_eq!(page1["remainingResults"], 5);
    let cursor = page1["next_cursor"].as_str().unwrap().to_string();

    let (status, page2) = send(
        &app,
        Method::GET,
        &format!("/api/items?next_cursor={}", urlencode(&cursor)),
        Some(&staff_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(page2["results"].as_array().unwrap().len(), 5);
    assert_eq!(page2["remainingResults"], 0);
    assert!(page2["next_cursor"].is_null());

    // No overlap between pages
    let first_ids: Vec<&str> = page1["results"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["id"].as_str().unwrap())
        .collect();
    for item in page2["results"].as_array().unwrap() {
        assert!(!first_ids.contains(&item["id"].as_str().unwrap()));
    }
}

#[tokio::test]
async fn voucher_lifecycle() {
    let app = test_app().await;
    let (staff_token, _) = register(&app, "manager").await;
    let (customer_token, _) = register(&app, "alice").await;

    // Percentage value must stay below 100
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/vouchers",
        Some(&staff_token),
        Some(json!({
            "code": "ALL",
            "title": "everything free",
            "description": "",
            "type": "percentage",
            "value": 100,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, voucher) = send(
        &app,
        Method::POST,
        "/api/vouchers",
        Some(&staff_token),
        Some(json!({
            "code": "TEN",
            "title": "ten percent off",
            "description": "",
            "type": "percentage",
            "value": 10,
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    let voucher_id = voucher["id"].as_str().unwrap().to_string();

    // Customers can browse vouchers but not create them
    let (status, list) = send(&app, Method::GET, "/api/vouchers", Some(&customer_token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list["results"].as_array().unwrap().len(), 1);

    // Soft-delete hides it from the listing
    let (status, _) = send(
        &app,
        Method::DELETE,
        &format!("/api/vouchers/{voucher_id}"),
        Some(&staff_token),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, list) = send(&app, Method::GET, "/api/vouchers", Some(&customer_token), None).await;
    assert_eq!(list["results"].as_array().unwrap().len(), 0);
}

fn urlencode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char)
            }
            other => out.push_str(&format!("%{other:02X}")),
        }
    }
    out
}
