//! Scenario tests for the order detail view-model.
//!
//! Each scenario drives `OrderScreen` against a wiremock order service
//! and asserts that the displayed state always comes from the follow-up
//! fetch — never from the action the viewer requested.

use serde_json::json;
use uuid::Uuid;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use worklane_orders::actions::{OrderAction, ViewerRelation};
use worklane_orders::models::orders::{OrderStatus, PaymentStatus, SubmitDelivery, SubmitReview};
use worklane_orders::{OrderApi, OrderApiConfig, OrderClientError, OrderScreen};

const ORDER_ID: &str = "7c9e6679-7425-40de-944b-e07fc1f90ae7";
const CLIENT_ID: &str = "11111111-1111-4111-8111-111111111111";
const FREELANCER_ID: &str = "22222222-2222-4222-8222-222222222222";

fn order_id() -> Uuid {
    ORDER_ID.parse().unwrap()
}

fn client_id() -> Uuid {
    CLIENT_ID.parse().unwrap()
}

fn freelancer_id() -> Uuid {
    FREELANCER_ID.parse().unwrap()
}

fn order_json(status: &str, payment: &str) -> serde_json::Value {
    json!({
        "id": ORDER_ID,
        "orderNumber": "WL-2026-00417",
        "clientId": CLIENT_ID,
        "freelancerId": FREELANCER_ID,
        "status": status,
        "paymentStatus": payment,
        "totalAmount": 550.0
    })
}

async fn screen_for(server: &MockServer, viewer: Uuid) -> OrderScreen {
    let config = OrderApiConfig::new(server.uri().parse().unwrap(), "test-token");
    OrderScreen::new(OrderApi::new(config).unwrap(), viewer)
}

/// Serve `before` for the first GET on the order, `after` for every GET
/// that follows — the shape of a server-side transition between the
/// initial load and the post-dispatch refetch.
async fn serve_order_then(server: &MockServer, before: serde_json::Value, after: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(format!("/api/orders/{ORDER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"order": before})))
        .up_to_n_times(1)
        .mount(server)
        .await;
    Mock::given(method("GET"))
        .and(path(format!("/api/orders/{ORDER_ID}")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"data": {"order": after}})))
        .mount(server)
        .await;
}

#[tokio::test]
async fn client_approves_a_delivered_order_and_sees_the_fetched_state() {
    let server = MockServer::start().await;
    serve_order_then(
        &server,
        order_json("DELIVERED", "PAID"),
        order_json("COMPLETED", "RELEASED"),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/orders/{ORDER_ID}/approve")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let mut screen = screen_for(&server, client_id()).await;
    let view = screen.load(order_id()).await.unwrap();
    assert_eq!(view.relation, ViewerRelation::Client);
    assert_eq!(
        view.actions,
        vec![
            OrderAction::ApproveAndReleasePayment,
            OrderAction::RequestRevision
        ]
    );

    let view = screen.approve(None).await.unwrap();
    assert_eq!(view.order.status, OrderStatus::Completed);
    assert_eq!(view.order.payment_status, PaymentStatus::Released);
    assert_eq!(view.status_badge.label, "Completed");
    assert!(view.actions.is_empty());
    assert!(!screen.is_busy());
}

#[tokio::test]
async fn freelancer_accepts_a_pending_order() {
    let server = MockServer::start().await;
    serve_order_then(
        &server,
        order_json("PENDING", "PAID"),
        order_json("ACCEPTED", "PAID"),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/orders/{ORDER_ID}/accept")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let mut screen = screen_for(&server, freelancer_id()).await;
    let view = screen.load(order_id()).await.unwrap();
    assert_eq!(view.relation, ViewerRelation::Freelancer);
    assert_eq!(view.actions, vec![OrderAction::AcceptOrder]);

    let view = screen.accept().await.unwrap();
    assert_eq!(view.order.status, OrderStatus::Accepted);
    assert_eq!(view.actions, vec![OrderAction::StartWork]);
}

#[tokio::test]
async fn displayed_status_is_never_inferred_from_the_requested_action() {
    // The server raced us: while the freelancer accepted, an admin
    // cancelled the order. The view must show what the refetch says.
    let server = MockServer::start().await;
    serve_order_then(
        &server,
        order_json("PENDING", "PAID"),
        order_json("CANCELLED", "REFUNDED"),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/orders/{ORDER_ID}/accept")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .mount(&server)
        .await;

    let mut screen = screen_for(&server, freelancer_id()).await;
    screen.load(order_id()).await.unwrap();

    let view = screen.accept().await.unwrap();
    assert_eq!(view.order.status, OrderStatus::Cancelled);
    assert!(view.actions.is_empty());
}

#[tokio::test]
async fn empty_revision_reason_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/orders/{ORDER_ID}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"order": order_json("DELIVERED", "PAID")})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/orders/{ORDER_ID}/revision")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(0)
        .mount(&server)
        .await;

    let mut screen = screen_for(&server, client_id()).await;
    screen.load(order_id()).await.unwrap();

    let err = screen.request_revision("   ").await.unwrap_err();
    assert!(matches!(err, OrderClientError::Validation(_)));

    // The view is untouched and the controls are live again.
    let view = screen.view().unwrap();
    assert_eq!(view.order.status, OrderStatus::Delivered);
    assert!(!screen.is_busy());
}

#[tokio::test]
async fn blank_delivery_title_never_reaches_the_network() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/orders/{ORDER_ID}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"order": order_json("IN_PROGRESS", "PAID")})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/orders/{ORDER_ID}/deliver")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(0)
        .mount(&server)
        .await;

    let mut screen = screen_for(&server, freelancer_id()).await;
    screen.load(order_id()).await.unwrap();

    let delivery = SubmitDelivery {
        title: "   ".into(),
        description: "All formats included".into(),
        files: vec!["/uploads/final.zip".into()],
    };
    let err = screen.submit_delivery(delivery).await.unwrap_err();
    assert!(matches!(err, OrderClientError::Validation(_)));

    let view = screen.view().unwrap();
    assert_eq!(view.order.status, OrderStatus::InProgress);
    assert!(!screen.is_busy());
}

#[tokio::test]
async fn a_dropped_dispatch_keeps_the_controls_disabled_until_reload() {
    // Double-click protection: the first click's future is dropped while
    // its request is still on the wire, the second click must be refused
    // until a fresh load confirms the server's state.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/orders/{ORDER_ID}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"order": order_json("PENDING", "PAID")})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/orders/{ORDER_ID}/accept")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"success": true}))
                .set_delay(std::time::Duration::from_secs(60)),
        )
        .mount(&server)
        .await;

    let mut screen = screen_for(&server, freelancer_id()).await;
    screen.load(order_id()).await.unwrap();

    let first = tokio::time::timeout(std::time::Duration::from_millis(50), screen.accept()).await;
    assert!(first.is_err(), "the slow dispatch should have timed out");
    assert!(screen.is_busy());

    let err = screen.accept().await.unwrap_err();
    assert!(matches!(err, OrderClientError::DispatchInFlight));

    // A fresh load is a new navigation: it re-enables the controls.
    screen.load(order_id()).await.unwrap();
    assert!(!screen.is_busy());
}

#[tokio::test]
async fn an_out_of_range_rating_is_skipped_but_approval_proceeds() {
    let server = MockServer::start().await;
    serve_order_then(
        &server,
        order_json("DELIVERED", "PAID"),
        order_json("COMPLETED", "RELEASED"),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/orders/{ORDER_ID}/review")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/orders/{ORDER_ID}/approve")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let mut screen = screen_for(&server, client_id()).await;
    screen.load(order_id()).await.unwrap();

    let review = SubmitReview {
        rating: 6,
        comment: "Great work".into(),
    };
    let view = screen.approve(Some(review)).await.unwrap();
    assert_eq!(view.order.status, OrderStatus::Completed);
    assert_eq!(view.order.payment_status, PaymentStatus::Released);
}

#[tokio::test]
async fn a_failed_review_does_not_block_approval() {
    let server = MockServer::start().await;
    serve_order_then(
        &server,
        order_json("DELIVERED", "PAID"),
        order_json("COMPLETED", "RELEASED"),
    )
    .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/orders/{ORDER_ID}/review")))
        .respond_with(ResponseTemplate::new(500).set_body_string("review service down"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/orders/{ORDER_ID}/approve")))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"success": true})))
        .expect(1)
        .mount(&server)
        .await;

    let mut screen = screen_for(&server, client_id()).await;
    screen.load(order_id()).await.unwrap();

    let review = SubmitReview {
        rating: 5,
        comment: "Great work".into(),
    };
    let view = screen.approve(Some(review)).await.unwrap();
    assert_eq!(view.order.status, OrderStatus::Completed);
    assert_eq!(view.order.payment_status, PaymentStatus::Released);
}

#[tokio::test]
async fn a_rejected_dispatch_leaves_the_prior_view_untouched() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/orders/{ORDER_ID}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"order": order_json("PENDING", "PAID")})),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/api/orders/{ORDER_ID}/accept")))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({"message": "Order was cancelled by the client"})),
        )
        .mount(&server)
        .await;

    let mut screen = screen_for(&server, freelancer_id()).await;
    screen.load(order_id()).await.unwrap();

    let err = screen.accept().await.unwrap_err();
    match err {
        OrderClientError::Transition { message } => {
            assert_eq!(message, "Order was cancelled by the client");
        }
        other => panic!("expected Transition, got: {other:?}"),
    }

    let view = screen.view().unwrap();
    assert_eq!(view.order.status, OrderStatus::Pending);
    assert!(!screen.is_busy());
}

#[tokio::test]
async fn forbidden_orders_are_never_rendered() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/orders/{ORDER_ID}")))
        .respond_with(
            ResponseTemplate::new(403)
                .set_body_json(json!({"message": "You are not a party to this order"})),
        )
        .mount(&server)
        .await;

    let mut screen = screen_for(&server, client_id()).await;
    let err = screen.load(order_id()).await.unwrap_err();
    assert!(err.redirects_away());
    assert!(screen.view().is_none());
}

#[tokio::test]
async fn observers_see_a_read_only_view() {
    // The order service let a third party read this order (e.g. support
    // staff); the action row must still be empty.
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(format!("/api/orders/{ORDER_ID}")))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({"order": order_json("DELIVERED", "PAID")})),
        )
        .mount(&server)
        .await;

    let mut screen = screen_for(&server, Uuid::new_v4()).await;
    let view = screen.load(order_id()).await.unwrap();
    assert_eq!(view.relation, ViewerRelation::Observer);
    assert!(view.actions.is_empty());
}

#[tokio::test]
async fn dispatching_without_a_loaded_order_is_a_validation_error() {
    let server = MockServer::start().await;
    let mut screen = screen_for(&server, client_id()).await;
    let err = screen.approve(None).await.unwrap_err();
    assert!(matches!(err, OrderClientError::Validation(_)));
}
