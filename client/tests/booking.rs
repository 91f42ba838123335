//! Integration tests for workshop lookup, ticket creation, payment and the
//! booking flow

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)] // Test code can use unwrap/expect/panic

use booking_gateway_client::WorkshopCache;
use booking_gateway_core::{BookingState, GatewayError, TicketGroup, TicketRequest};
use booking_gateway_testing::fixtures::{
    no_pending_payment_json, pending_payment_json, ticket_created_json, workshop_json,
};
use booking_gateway_testing::helpers::{init_test_tracing, signed_in_gateway, signed_out_gateway};
use serde_json::json;
use wiremock::matchers::{body_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CHECK_PENDING: &str = "/api/Order/check-pending";
const CREATE_TICKET: &str = "/api/RegisterAttend/create";
const CREATE_PAYMENT: &str = "/api/Payment/create";

async fn mount_pending_check(server: &MockServer, body: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path(CHECK_PENDING))
        .and(query_param("serviceType", "RegisterAttend"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

// ============================================================================
// Workshops
// ============================================================================

#[tokio::test]
async fn workshop_and_master_are_decoded() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/Workshop/W1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(workshop_json("W1")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/Master/M1"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "id": "M1", "masterName": "Master Lan" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (gateway, _store) = signed_in_gateway(&server);
    let workshops = gateway.workshops();

    let workshop = workshops.fetch_workshop(" W1 ").await.unwrap();
    assert_eq!(workshop.workshop_name, "Tea ceremony");
    let master_id = workshop.master_id.unwrap();

    let master = workshops.fetch_master(&master_id).await.unwrap();
    assert_eq!(master.name, "Master Lan");
}

#[tokio::test]
async fn blank_workshop_id_is_not_sent() {
    let server = MockServer::start().await;
    let (gateway, _store) = signed_in_gateway(&server);

    let err = gateway.workshops().fetch_workshop("   ").await.unwrap_err();
    assert!(matches!(err, GatewayError::ValidationError { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn cache_refreshes_on_every_visit() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/Workshop/W1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(workshop_json("W1")))
        .expect(2)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/api/Workshop/W2"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let (gateway, _store) = signed_in_gateway(&server);
    let workshops = gateway.workshops();
    let mut cache = WorkshopCache::new();
    assert!(cache.cached().is_none());

    cache.refresh(&workshops, "W1").await.unwrap();
    cache.refresh(&workshops, "W1").await.unwrap();
    assert_eq!(cache.cached().unwrap().workshop_id, "W1");

    assert!(cache.refresh(&workshops, "W2").await.is_err());
    assert!(cache.cached().is_none());

    cache.invalidate();
    assert!(cache.cached().is_none());
}

// ============================================================================
// Ticket creation
// ============================================================================

#[tokio::test]
async fn create_ticket_sends_trimmed_id_and_quantity() {
    init_test_tracing();
    let server = MockServer::start().await;
    mount_pending_check(&server, no_pending_payment_json()).await;
    Mock::given(method("POST"))
        .and(path(CREATE_TICKET))
        .and(body_json(json!({ "WorkshopId": "W1", "NumberOfTicket": 2 })))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticket_created_json("G1")))
        .expect(1)
        .mount(&server)
        .await;

    let (gateway, _store) = signed_in_gateway(&server);
    let group = gateway
        .tickets()
        .create_ticket(&TicketRequest::new("  W1  ", 2))
        .await
        .unwrap();

    assert_eq!(
        group,
        TicketGroup {
            group_id: "G1".to_string()
        }
    );
}

#[tokio::test]
async fn zero_quantity_never_reaches_the_network() {
    let server = MockServer::start().await;
    let (gateway, _store) = signed_in_gateway(&server);

    let err = gateway
        .tickets()
        .create_ticket(&TicketRequest::new("W1", 0))
        .await
        .unwrap_err();

    assert!(matches!(
        err,
        GatewayError::ValidationError {
            field: "quantity",
            ..
        }
    ));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn pending_payment_blocks_ticket_creation() {
    let server = MockServer::start().await;
    mount_pending_check(&server, pending_payment_json()).await;
    Mock::given(method("POST"))
        .and(path(CREATE_TICKET))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticket_created_json("G1")))
        .expect(0)
        .mount(&server)
        .await;

    let (gateway, _store) = signed_in_gateway(&server);
    let err = gateway
        .tickets()
        .create_ticket(&TicketRequest::new("W1", 1))
        .await
        .unwrap_err();

    match err {
        GatewayError::PendingPaymentExists { message } => {
            assert!(message.contains("chưa thanh toán"));
        }
        other => panic!("expected PendingPaymentExists, got {other:?}"),
    }
}

#[tokio::test]
async fn unpaid_ticket_message_on_create_is_retagged_without_retry() {
    let server = MockServer::start().await;
    mount_pending_check(&server, no_pending_payment_json()).await;
    Mock::given(method("POST"))
        .and(path(CREATE_TICKET))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_json(json!({ "message": "Bạn còn vé chưa thanh toán" })),
        )
        .expect(1)
        .mount(&server)
        .await;

    let (gateway, _store) = signed_in_gateway(&server);
    let err = gateway
        .tickets()
        .create_ticket(&TicketRequest::new("W1", 1))
        .await
        .unwrap_err();

    assert_eq!(
        err,
        GatewayError::PendingPaymentExists {
            message: "Bạn còn vé chưa thanh toán".to_string()
        }
    );
    let create_posts = server
        .received_requests()
        .await
        .unwrap()
        .iter()
        .filter(|r| r.url.path() == CREATE_TICKET)
        .count();
    assert_eq!(create_posts, 1);
}

#[tokio::test]
async fn failing_pending_check_does_not_block_booking() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path(CHECK_PENDING))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(CREATE_TICKET))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticket_created_json("G7")))
        .expect(1)
        .mount(&server)
        .await;

    let (gateway, _store) = signed_in_gateway(&server);
    let group = gateway
        .tickets()
        .create_ticket(&TicketRequest::new("W1", 1))
        .await
        .unwrap();
    assert_eq!(group.group_id, "G7");
}

#[tokio::test]
async fn signed_out_booking_requires_login() {
    let server = MockServer::start().await;
    let (gateway, _store) = signed_out_gateway(&server);

    let err = gateway
        .tickets()
        .create_ticket(&TicketRequest::new("W1", 1))
        .await
        .unwrap_err();

    assert_eq!(err, GatewayError::AuthRequired);
    assert!(err.requires_login());
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn expired_session_during_create_is_not_retried() {
    let server = MockServer::start().await;
    mount_pending_check(&server, no_pending_payment_json()).await;
    Mock::given(method("POST"))
        .and(path(CREATE_TICKET))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let (gateway, store) = signed_in_gateway(&server);
    let err = gateway
        .tickets()
        .create_ticket(&TicketRequest::new("W1", 1))
        .await
        .unwrap_err();

    assert_eq!(err, GatewayError::AuthExpired);
    assert!(store.current().is_none());
}

// ============================================================================
// Payment and the booking flow
// ============================================================================

#[tokio::test]
async fn payment_returns_the_checkout_link() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(CREATE_PAYMENT))
        .and(body_json(json!({ "groupId": "G1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "isSuccess": true,
            "data": { "checkoutUrl": "https://pay.example.com/G1" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let (gateway, _store) = signed_in_gateway(&server);
    let handoff = gateway.payments().initiate_payment("G1").await.unwrap();
    assert_eq!(handoff.group_id, "G1");
    assert_eq!(handoff.checkout_url, "https://pay.example.com/G1");
}

#[tokio::test]
async fn flow_walks_from_submission_to_payment() {
    let server = MockServer::start().await;
    mount_pending_check(&server, no_pending_payment_json()).await;
    Mock::given(method("POST"))
        .and(path(CREATE_TICKET))
        .respond_with(ResponseTemplate::new(200).set_body_json(ticket_created_json("G1")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(CREATE_PAYMENT))
        .respond_with(
            ResponseTemplate::new(500).set_body_json(json!({ "message": "Gateway busy" })),
        )
        .up_to_n_times(3)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(CREATE_PAYMENT))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(json!({ "paymentUrl": "https://pay.example.com/G1" })),
        )
        .mount(&server)
        .await;

    let (gateway, _store) = signed_in_gateway(&server);
    let mut flow = gateway.booking_flow();
    assert_eq!(flow.state(), &BookingState::Idle);

    let group = flow.submit(&TicketRequest::new("W1", 2)).await.unwrap();
    assert_eq!(
        flow.state(),
        &BookingState::AwaitingPaymentInit {
            group: group.clone()
        }
    );

    // three failed attempts: the tickets exist, so the flow keeps waiting
    let err = flow.start_payment().await.unwrap_err();
    assert!(matches!(err, GatewayError::ServerError { status_code: 500, .. }));
    assert!(matches!(flow.state(), BookingState::AwaitingPaymentInit { .. }));

    let handoff = flow.start_payment().await.unwrap();
    assert_eq!(handoff.checkout_url, "https://pay.example.com/G1");
    assert!(matches!(flow.state(), BookingState::Done { .. }));

    flow.reset().unwrap();
    assert_eq!(flow.state(), &BookingState::Idle);
}

#[tokio::test]
async fn flow_fails_on_pending_payment_and_can_restart() {
    let server = MockServer::start().await;
    mount_pending_check(&server, pending_payment_json()).await;

    let (gateway, _store) = signed_in_gateway(&server);
    let mut flow = gateway.booking_flow();

    let err = flow.submit(&TicketRequest::new("W1", 1)).await.unwrap_err();
    assert!(matches!(err, GatewayError::PendingPaymentExists { .. }));
    assert_eq!(flow.state(), &BookingState::Failed { reason: err });

    // a second submission needs an explicit restart
    let again = flow.submit(&TicketRequest::new("W1", 1)).await.unwrap_err();
    assert!(matches!(again, GatewayError::Flow(_)));

    flow.reset().unwrap();
    assert_eq!(flow.state(), &BookingState::Idle);
}

#[tokio::test]
async fn flow_rejects_invalid_input_before_any_call() {
    let server = MockServer::start().await;
    let (gateway, _store) = signed_in_gateway(&server);
    let mut flow = gateway.booking_flow();

    let err = flow.submit(&TicketRequest::new(" ", 1)).await.unwrap_err();
    assert!(matches!(err, GatewayError::ValidationError { .. }));
    assert!(matches!(flow.state(), BookingState::Failed { .. }));
    assert!(server.received_requests().await.unwrap().is_empty());

    let payment = flow.start_payment().await.unwrap_err();
    assert!(matches!(payment, GatewayError::Flow(_)));
}
