//! HTTP contract tests, driving the router in-process.

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use pasal_store::Store;
use pasal_storefront_api::{router, AppState, StorefrontConfig};
use serde_json::{json, Value};
use tower::ServiceExt;

const STORE_LAT: f64 = 27.8742;
const STORE_LNG: f64 = 83.4534;

async fn app() -> Router {
    let store = Store::seeded().await.unwrap();
    router(AppState::new(&StorefrontConfig::default(), store))
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
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
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
    send(app, Method::GET, uri, None).await
}

fn order_body(lines: &[(&str, u32)], at_store: bool) -> Value {
    let items: Vec<Value> = lines
        .iter()
        .map(|(id, quantity)| json!({ "productId": id, "quantity": quantity }))
        .collect();
    let mut body = json!({
        "customer": { "id": "cust-1", "name": "Sita Sharma", "phone": "+977-9841234567" },
        "items": items,
        "paymentMethod": "cash",
        // client-side totals must be ignored
        "total": 1,
        "subtotal": 1
    });
    if at_store {
        body["location"] = json!({ "coordinates": { "lat": STORE_LAT, "lng": STORE_LNG } });
    }
    body
}

// =============================================================================
// Health & Location
// =============================================================================

#[tokio::test]
async fn test_health() {
    let app = app().await;
    let (status, body) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "storefront-api");
    assert_eq!(body["products"], 6);
}

#[tokio::test]
async fn test_get_store_location() {
    let app = app().await;
    let (status, body) = get(&app, "/api/location").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "नबिन निर्मल स्टोर");
    assert_eq!(body["coordinates"]["lat"], STORE_LAT);
    assert_eq!(body["coordinates"]["lng"], STORE_LNG);
}

#[tokio::test]
async fn test_delivery_estimate_at_store() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/location",
        Some(json!({
            "customerLocation": { "coordinates": { "lat": STORE_LAT, "lng": STORE_LNG } }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["distance"], 0.0);
    assert_eq!(body["deliveryFee"], 50.0);
    assert_eq!(body["estimatedTime"], "1–2 hours");
    assert_eq!(body["estimatedTimeNe"], "१-२ घण्टा");
    assert_eq!(body["storeLocation"]["phone"], "+977-9876543210");
}

#[tokio::test]
async fn test_delivery_estimate_far_away() {
    let app = app().await;
    // Kathmandu, well over 30 km from Palpa
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/location",
        Some(json!({
            "customerLocation": { "coordinates": { "lat": 27.7172, "lng": 85.3240 }, "isManual": true }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["distance"].as_f64().unwrap() > 30.0);
    assert_eq!(body["deliveryFee"], 300.0);
    assert_eq!(body["estimatedTime"], "1 day");
}

#[tokio::test]
async fn test_delivery_estimate_rejects_bad_input() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/location",
        Some(json!({ "customerLocation": { "coordinates": { "lat": 95.0, "lng": 83.0 } } })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, body) = send(&app, Method::POST, "/api/location", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

// =============================================================================
// Pricing
// =============================================================================

#[tokio::test]
async fn test_quote_without_location_uses_fallback_fee() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/pricing/quote",
        Some(json!({
            "items": [
                { "productId": "demo-1", "unitPrice": 180, "quantity": 2 },
                { "productId": "demo-3", "unitPrice": 85, "quantity": 1 }
            ]
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subtotal"], 445.0);
    assert_eq!(body["deliveryFee"], 100.0);
    assert_eq!(body["taxAmount"], 57.85);
    assert_eq!(body["total"], 602.85);
    assert_eq!(body["freeShipping"], false);
    assert_eq!(body["amountUntilFreeShipping"], 1555.0);
    assert_eq!(body["itemCount"], 3);
    assert_eq!(body["taxLabel"], "13% VAT");
    assert_eq!(body["currency"], "Rs.");
    assert!(body["delivery"].is_null());
}

#[tokio::test]
async fn test_quote_free_shipping_above_threshold() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/pricing/quote",
        Some(json!({
            "items": [{ "productId": "demo-1", "unitPrice": 180, "quantity": 12 }],
            "customerLocation": { "coordinates": { "lat": STORE_LAT, "lng": STORE_LNG } }
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["subtotal"], 2160.0);
    assert_eq!(body["deliveryFee"], 0.0);
    assert_eq!(body["freeShipping"], true);
    assert_eq!(body["total"], 2440.8);
    assert_eq!(body["delivery"]["band"], "nearby");
}

#[tokio::test]
async fn test_quote_rejects_invalid_lines() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/pricing/quote",
        Some(json!({ "items": [{ "productId": "demo-1", "unitPrice": -1, "quantity": 1 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/pricing/quote",
        Some(json!({ "items": [{ "productId": "demo-1", "unitPrice": 10, "quantity": 1000 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_quote_rejects_price_above_cap() {
    let app = app().await;
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/pricing/quote",
        Some(json!({ "items": [{ "productId": "gold", "unitPrice": 1e26, "quantity": 999 }] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");

    // the server keeps answering
    let (status, _) = get(&app, "/health").await;
    assert_eq!(status, StatusCode::OK);
}

// =============================================================================
// Products
// =============================================================================

#[tokio::test]
async fn test_list_products_with_filters() {
    let app = app().await;

    let (status, body) = get(&app, "/api/products").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["products"].as_array().unwrap().len(), 6);
    assert_eq!(body["pagination"]["total"], 6);
    assert_eq!(body["pagination"]["totalPages"], 1);

    let (_, body) = get(&app, "/api/products?category=grocery").await;
    assert_eq!(body["pagination"]["total"], 3);

    let (_, body) = get(&app, "/api/products?inStock=true").await;
    assert_eq!(body["pagination"]["total"], 5);

    let (_, body) = get(&app, "/api/products?search=tea").await;
    assert_eq!(body["products"][0]["id"], "demo-5");

    let (_, body) = get(&app, "/api/products?minPrice=100&maxPrice=400").await;
    let ids: Vec<&str> = body["products"]
        .as_array()
        .unwrap()
        .iter()
        .map(|p| p["id"].as_str().unwrap())
        .collect();
    assert_eq!(ids, vec!["demo-1", "demo-4", "demo-5"]);

    let (_, body) = get(&app, "/api/products?limit=4&page=2").await;
    assert_eq!(body["products"].as_array().unwrap().len(), 2);
    assert_eq!(body["pagination"]["totalPages"], 2);
}

#[tokio::test]
async fn test_list_products_rejects_bad_query() {
    let app = app().await;
    for uri in [
        "/api/products?limit=0",
        "/api/products?limit=500",
        "/api/products?minPrice=-5",
        "/api/products?category=electronics",
    ] {
        let (status, body) = get(&app, uri).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert_eq!(body["code"], "VALIDATION_ERROR", "{uri}");
    }
}

#[tokio::test]
async fn test_product_crud() {
    let app = app().await;

    let (status, created) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({
            "name": "गुन्द्रुक",
            "nameEn": "Gundruk",
            "price": 150,
            "originalPrice": 200,
            "category": "grocery",
            "stock": 10
        })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["discount"], 25);
    assert_eq!(created["inStock"], true);
    let id = created["id"].as_str().unwrap().to_string();

    let (status, fetched) = get(&app, &format!("/api/products/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["nameEn"], "Gundruk");

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/products/{id}"),
        Some(json!({ "price": 180 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["price"], 180.0);
    assert_eq!(updated["discount"], 10);

    let (status, deleted) = send(&app, Method::DELETE, &format!("/api/products/{id}"), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["message"], "Product deleted successfully");

    let (status, body) = get(&app, &format!("/api/products/{id}")).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn test_create_product_validation() {
    let app = app().await;
    let (status, _) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({ "name": " ", "nameEn": "Blank", "price": 10, "category": "grocery" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({ "name": "x", "nameEn": "x", "price": -10, "category": "grocery" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/products",
        Some(json!({ "name": "x", "nameEn": "x", "price": 1e26, "category": "grocery", "stock": 5 })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "price must be between 0 and 10000000");

    let (status, _) = send(&app, Method::PUT, "/api/products/demo-1", Some(json!({ "price": 1e26 }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    let (_, rice) = get(&app, "/api/products/demo-1").await;
    assert_eq!(rice["price"], 180.0);

    let (status, _) = send(&app, Method::PUT, "/api/products/demo-99", Some(json!({ "stock": 1 }))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

// =============================================================================
// Orders
// =============================================================================

#[tokio::test]
async fn test_place_order_priced_server_side() {
    let app = app().await;
    let (status, order) = send(
        &app,
        Method::POST,
        "/api/orders",
        Some(order_body(&[("demo-1", 2), ("demo-3", 1)], true)),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(order["status"], "pending");
    assert!(order["orderNumber"].as_str().unwrap().starts_with("ORD-"));
    assert_eq!(order["pricing"]["subtotal"], 445.0);
    assert_eq!(order["pricing"]["deliveryFee"], 50.0);
    assert_eq!(order["pricing"]["taxAmount"], 57.85);
    assert_eq!(order["pricing"]["total"], 552.85);
    assert_eq!(order["items"][0]["nameEn"], "Basmati Rice");

    let (_, rice) = get(&app, "/api/products/demo-1").await;
    assert_eq!(rice["stock"], 48);

    let id = order["id"].as_str().unwrap();
    let (status, by_id) = get(&app, &format!("/api/orders/{id}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_id, order);

    let number = order["orderNumber"].as_str().unwrap();
    let (status, by_number) = get(&app, &format!("/api/orders/{number}")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(by_number["id"], order["id"]);
}

#[tokio::test]
async fn test_place_order_rejections() {
    let app = app().await;

    let (status, body) = send(&app, Method::POST, "/api/orders", Some(order_body(&[("demo-6", 1)], false))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "OUT_OF_STOCK");

    let (status, _) = send(&app, Method::POST, "/api/orders", Some(order_body(&[("demo-99", 1)], false))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, Method::POST, "/api/orders", Some(order_body(&[], false))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut bank = order_body(&[("demo-1", 1)], false);
    bank["paymentMethod"] = json!("bank");
    let (status, _) = send(&app, Method::POST, "/api/orders", Some(bank)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let mut no_phone = order_body(&[("demo-1", 1)], false);
    no_phone["customer"]["phone"] = json!("");
    let (status, _) = send(&app, Method::POST, "/api/orders", Some(no_phone)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = get(&app, "/api/orders/ORD-0").await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (_, rice) = get(&app, "/api/products/demo-1").await;
    assert_eq!(rice["stock"], 50);
}

#[tokio::test]
async fn test_list_orders_and_status_workflow() {
    let app = app().await;
    let (_, first) = send(&app, Method::POST, "/api/orders", Some(order_body(&[("demo-2", 1)], false))).await;
    let (_, second) = send(&app, Method::POST, "/api/orders", Some(order_body(&[("demo-5", 3)], true))).await;

    let (status, all) = get(&app, "/api/orders?customerId=cust-1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(all.as_array().unwrap().len(), 2);
    assert_eq!(all[0]["id"], second["id"]);

    let (_, none) = get(&app, "/api/orders?customerId=someone-else").await;
    assert!(none.as_array().unwrap().is_empty());

    let status_uri = format!("/api/orders/{}/status", first["id"].as_str().unwrap());

    let (status, confirmed) = send(&app, Method::PUT, &status_uri, Some(json!({ "status": "confirmed" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(confirmed["status"], "confirmed");
    assert!(!confirmed["updatedAt"].is_null());

    let (_, pending) = get(&app, "/api/orders?status=pending").await;
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let (status, body) = send(&app, Method::PUT, &status_uri, Some(json!({ "status": "pending" }))).await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], "BUSINESS_LOGIC");

    let (status, _) = send(&app, Method::PUT, &status_uri, Some(json!({ "status": "lost" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/orders/missing/status",
        Some(json!({ "status": "cancelled" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_list_orders_search() {
    let app = app().await;
    let (_, sita) = send(&app, Method::POST, "/api/orders", Some(order_body(&[("demo-2", 1)], false))).await;
    let mut hari = order_body(&[("demo-5", 1)], false);
    hari["customer"] = json!({ "id": "cust-2", "name": "Hari Thapa", "phone": "9807654321" });
    let (_, hari) = send(&app, Method::POST, "/api/orders", Some(hari)).await;

    let (status, found) = get(&app, "/api/orders?search=SITA").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(found.as_array().unwrap().len(), 1);
    assert_eq!(found[0]["id"], sita["id"]);

    let (_, found) = get(&app, "/api/orders?search=980765").await;
    assert_eq!(found[0]["id"], hari["id"]);

    let id = hari["id"].as_str().unwrap();
    let (_, found) = get(&app, &format!("/api/orders?search={}", &id[..8])).await;
    assert_eq!(found[0]["id"], hari["id"]);

    let (_, found) = get(&app, "/api/orders?search=hari&status=confirmed").await;
    assert!(found.as_array().unwrap().is_empty());

    let long = "x".repeat(101);
    let (status, _) = get(&app, &format!("/api/orders?search={long}")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

// =============================================================================
// Admin
// =============================================================================

#[tokio::test]
async fn test_admin_analytics() {
    let app = app().await;
    let (status, empty) = get(&app, "/api/admin/analytics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(empty["totalProducts"], 6);
    assert_eq!(empty["totalOrders"], 0);
    assert_eq!(empty["averageOrderValue"], 0.0);
    assert_eq!(empty["topCategories"][0], json!({ "category": "grocery", "count": 3 }));
    // only the soap is below 10 units
    assert_eq!(empty["lowStockProducts"], 1);

    send(&app, Method::POST, "/api/orders", Some(order_body(&[("demo-1", 2), ("demo-3", 1)], true))).await;
    send(&app, Method::POST, "/api/orders", Some(order_body(&[("demo-4", 6)], false))).await;

    let (_, analytics) = get(&app, "/api/admin/analytics").await;
    assert_eq!(analytics["totalOrders"], 2);
    // 552.85 + 2269.60
    assert_eq!(analytics["totalRevenue"], 2822.45);
    assert_eq!(analytics["averageOrderValue"], 1411.23);
    assert_eq!(analytics["lowStockProducts"], 2);
}

#[tokio::test]
async fn test_oversized_body_is_rejected_as_client_error() {
    let app = app().await;
    let mut body = order_body(&[("demo-1", 1)], false);
    body["specialInstructions"] = json!("x".repeat(3 * 1024 * 1024));
    let (status, body) = send(&app, Method::POST, "/api/orders", Some(body)).await;
    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert_eq!(body["code"], "PAYLOAD_TOO_LARGE");

    let (_, rice) = get(&app, "/api/products/demo-1").await;
    assert_eq!(rice["stock"], 50);
}

#[tokio::test]
async fn test_malformed_json_is_bad_request() {
    let app = app().await;
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/orders")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{ not json"))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
