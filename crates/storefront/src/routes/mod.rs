//! HTTP route handlers for storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET    /health              - Health check
//! GET    /home                - Home page sections
//!
//! # Products
//! GET    /products            - Product listing (?team=&size=&sort=)
//! GET    /products/filters    - Teams and sizes for the listing filters
//! GET    /products/{id}       - Product detail
//!
//! # Cart
//! GET    /cart                - Cart contents and subtotal
//! GET    /cart/count          - Cart count badge
//! POST   /cart/add            - Add a product in a size, optionally customized
//! POST   /cart/quick-add      - Add one of a product in its default size
//! POST   /cart/update         - Set a line's quantity (zero or less removes)
//! POST   /cart/remove         - Remove a line
//! POST   /cart/clear          - Empty the cart
//!
//! # Checkout
//! POST   /checkout            - Place an order and empty the cart
//!
//! # Admin
//! GET    /admin/categories    - Standard product categories
//! GET    /admin/products      - Recorded product submissions
//! POST   /admin/products      - Record a product submission
//! DELETE /admin/products      - Delete all submissions
//! ```

pub mod admin;
pub mod cart;
pub mod checkout;
pub mod products;

use std::time::Duration;

use axum::{
    Router,
    http::{Request, Response},
    middleware,
    routing::{get, post},
};
use tower_http::trace::{DefaultOnResponse, OnResponse, TraceLayer};
use tracing::Span;

use crate::middleware::request_id_middleware;
use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/filters", get(products::filters))
        .route("/{id}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/count", get(cart::count))
        .route("/add", post(cart::add))
        .route("/quick-add", post(cart::quick_add))
        .route("/update", post(cart::update))
        .route("/remove", post(cart::remove))
        .route("/clear", post(cart::clear))
}

/// Create the admin routes router.
pub fn admin_routes() -> Router<AppState> {
    Router::new()
        .route("/categories", get(admin::categories))
        .route(
            "/products",
            get(admin::list).post(admin::create).delete(admin::clear),
        )
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/home", get(products::home))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .route("/checkout", post(checkout::place))
        .nest("/admin", admin_routes())
}

/// The complete application: routes, health check and middleware.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .layer(middleware::from_fn(request_id_middleware))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(|request: &Request<_>| {
                    tracing::info_span!(
                        "http_request",
                        method = %request.method(),
                        uri = %request.uri(),
                        request_id = tracing::field::Empty,
                        status = tracing::field::Empty,
                        latency_ms = tracing::field::Empty,
                    )
                })
                .on_response(|response: &Response<_>, latency: Duration, span: &Span| {
                    span.record("status", response.status().as_u16());
                    span.record(
                        "latency_ms",
                        u64::try_from(latency.as_millis()).unwrap_or(u64::MAX),
                    );
                    DefaultOnResponse::default().on_response(response, latency, span);
                }),
        )
        .with_state(state)
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction())
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use std::sync::Arc;

    use axum::body::{Body, to_bytes};
    use axum::http::{StatusCode, header};
    use serde_json::{Value, json};
    use tower::ServiceExt;

    use super::*;
    use crate::catalog::Catalog;
    use crate::config::StorefrontConfig;
    use crate::storage::{MemoryStore, SharedStore};

    fn test_app() -> (Router, SharedStore) {
        let storage: SharedStore = Arc::new(MemoryStore::new());
        let state = AppState::new(
            StorefrontConfig::default(),
            Catalog::builtin(),
            Arc::clone(&storage),
        );
        (app(state), storage)
    }

    async fn send(
        app: &Router,
        method: &str,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
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
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn get(app: &Router, uri: &str) -> (StatusCode, Value) {
        send(app, "GET", uri, None).await
    }

    async fn post(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
        send(app, "POST", uri, Some(body)).await
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _) = test_app();
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert!(response.headers().contains_key("x-request-id"));
    }

    #[tokio::test]
    async fn test_product_listing_filters_and_sorts() {
        let (app, _) = test_app();
        let (status, body) = get(&app, "/products?team=All&size=XXL&sort=price-asc").await;
        assert_eq!(status, StatusCode::OK);
        let products = body.as_array().unwrap();
        assert_eq!(products.len(), 4);
        assert_eq!(products[0]["id"], "arsenal-away-2024");
        assert_eq!(products[1]["id"], "liverpool-third-2024");
        assert_eq!(products[2]["id"], "italy-away-2024");

        let (status, _) = get(&app, "/products?sort=cheapest").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        let (status, _) = get(&app, "/products?size=XXXL").await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_product_detail() {
        let (app, _) = test_app();
        let (status, body) = get(&app, "/products/psg-home-2024").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["display_price"], "$95.00");
        assert_eq!(body["images"][0], "/images/psg_home.jpg");

        let (status, body) = get(&app, "/products/nope").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].as_str().unwrap().contains("nope"));
    }

    #[tokio::test]
    async fn test_home_and_filters() {
        let (app, _) = test_app();
        let (_, home) = get(&app, "/home").await;
        assert_eq!(home["featured"].as_array().unwrap().len(), 5);
        assert_eq!(home["retro"].as_array().unwrap().len(), 2);

        let (_, filters) = get(&app, "/products/filters").await;
        assert_eq!(filters["sizes"], json!(["S", "M", "L", "XL", "XXL"]));
    }

    #[tokio::test]
    async fn test_cart_flow_persists() {
        let (app, storage) = test_app();
        let line = json!({"product_id": "rma-home-2024", "size": "M"});

        let mut add = line.clone();
        add["quantity"] = json!(1);
        post(&app, "/cart/add", add.clone()).await;
        add["quantity"] = json!(2);
        let (status, cart) = post(&app, "/cart/add", add).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(cart["items"].as_array().unwrap().len(), 1);
        assert_eq!(cart["items"][0]["quantity"], 3);
        assert_eq!(cart["items"][0]["line_price"], "$270.00");
        assert_eq!(cart["subtotal"], "$270.00");
        assert!(storage.get("cart").unwrap().is_some());

        let (_, count) = get(&app, "/cart/count").await;
        assert_eq!(count["count"], 3);

        let mut update = line.clone();
        update["quantity"] = json!(0);
        let (_, cart) = post(&app, "/cart/update", update).await;
        assert_eq!(cart["items"], json!([]));
        assert_eq!(cart["subtotal"], "$0.00");
    }

    #[tokio::test]
    async fn test_cart_customization_keeps_lines_apart() {
        let (app, _) = test_app();
        post(&app, "/cart/add", json!({"product_id": "psg-home-2024", "size": "L"})).await;
        let custom = json!({"product_id": "psg-home-2024", "size": "L", "player": " Mbappe "});
        let (_, cart) = post(&app, "/cart/add", custom).await;
        assert_eq!(cart["items"].as_array().unwrap().len(), 2);
        assert_eq!(cart["items"][1]["player"], "Mbappe");

        let line = json!({"product_id": "psg-home-2024", "size": "L", "player": "Mbappe"});
        let (_, cart) = post(&app, "/cart/remove", line).await;
        assert_eq!(cart["items"].as_array().unwrap().len(), 1);
        assert!(cart["items"][0].get("player").is_none());
    }

    #[tokio::test]
    async fn test_cart_rejections() {
        let (app, _) = test_app();
        let size_not_offered = json!({"product_id": "juventus-home-2024", "size": "XXL"});
        let (status, _) = post(&app, "/cart/add", size_not_offered).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let zero = json!({"product_id": "rma-home-2024", "size": "M", "quantity": 0});
        let (status, _) = post(&app, "/cart/add", zero).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);

        let missing = json!({"product_id": "missing", "size": "M"});
        let (status, _) = post(&app, "/cart/add", missing).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (_, cart) = get(&app, "/cart").await;
        assert_eq!(cart["item_count"], 0);
    }

    #[tokio::test]
    async fn test_quick_add_uses_first_size() {
        let (app, _) = test_app();
        let (_, cart) =
            post(&app, "/cart/quick-add", json!({"product_id": "germany-home-1990"})).await;
        assert_eq!(cart["items"][0]["size"], "L");
        assert_eq!(cart["items"][0]["quantity"], 1);
    }

    #[tokio::test]
    async fn test_checkout() {
        let (app, _) = test_app();
        let shipping = json!({
            "fullName": "Sam Kerr",
            "email": "sam@example.com",
            "address": "10 Bridge Road",
            "city": "London",
            "zipCode": "SW6 1HS",
            "country": "United Kingdom",
            "paymentMethod": "creditCard"
        });

        let (status, _) = post(&app, "/checkout", shipping.clone()).await;
        assert_eq!(status, StatusCode::CONFLICT);

        post(&app, "/cart/quick-add", json!({"product_id": "spain-home-2024"})).await;
        let (status, body) = post(&app, "/checkout", json!({"fullName": "Sam Kerr"})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert!(body["fields"]["email"].is_string());

        let (status, receipt) = post(&app, "/checkout", shipping).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(receipt["total"], "90.00");
        assert_eq!(receipt["shipping"]["paymentMethod"], "creditCard");

        let (_, cart) = get(&app, "/cart").await;
        assert_eq!(cart["item_count"], 0);
    }

    #[tokio::test]
    async fn test_admin_submissions() {
        let (app, _) = test_app();
        let (_, categories) = get(&app, "/admin/categories").await;
        assert_eq!(categories.as_array().unwrap().len(), 5);

        let (status, body) = post(&app, "/admin/products", json!({})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["fields"]["tag"], "Tag is required");

        let form = json!({
            "productName": "Celtic Home 24/25",
            "teamName": "Celtic",
            "teamDescription": "Green and white hoops.",
            "price": 75,
            "sizes": ["M", "L"],
            "images": [{"name": "celtic.webp", "size": 1024, "type": "image/webp"}],
            "category": "Scottish Clubs",
            "tag": "new"
        });
        let (status, body) = post(&app, "/admin/products", form).await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(body["isNewCategory"], true);
        assert!(body.get("is_new_category").is_none());

        let (_, listed) = get(&app, "/admin/products").await;
        assert_eq!(listed.as_array().unwrap().len(), 1);
        assert_eq!(listed[0]["productName"], "Celtic Home 24/25");

        let (status, _) = send(&app, "DELETE", "/admin/products", None).await;
        assert_eq!(status, StatusCode::NO_CONTENT);
        let (_, listed) = get(&app, "/admin/products").await;
        assert_eq!(listed, json!([]));
    }
}
