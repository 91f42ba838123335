//! # Booking Gateway Testing
//!
//! Shared helpers for the gateway's integration tests:
//!
//! - [`helpers`]: gateways wired to a [`wiremock::MockServer`] and an
//!   in-memory token store, with a fast retry policy
//! - [`fixtures`]: sessions, forms and backend payloads
//!
//! ## Example
//!
//! ```no_run
//! use booking_gateway_testing::helpers::signed_in_gateway;
//! use wiremock::MockServer;
//!
//! # async fn example() {
//! let server = MockServer::start().await;
//! let (gateway, store) = signed_in_gateway(&server);
//! let _ = gateway.workshops().fetch_workshop("W1").await;
//! assert!(store.current().is_some());
//! # }
//! ```

pub use booking_gateway_auth::mocks::MockTokenStore;

/// Gateways and configuration for tests.
pub mod helpers {
    use booking_gateway_auth::mocks::MockTokenStore;
    use booking_gateway_client::{BookingGateway, GatewayConfig};
    use booking_gateway_runtime::RetryPolicy;
    use std::net::TcpListener;
    use std::time::Duration;
    use wiremock::MockServer;

    use crate::fixtures::test_session;

    /// Delay between attempts in tests.
    pub const TEST_RETRY_DELAY: Duration = Duration::from_millis(10);

    /// Three attempts, 10 ms apart.
    #[must_use]
    pub fn fast_retry() -> RetryPolicy {
        RetryPolicy::builder().delay(TEST_RETRY_DELAY).build()
    }

    /// Configuration pointing at `base_url` with [`fast_retry`] and a short timeout.
    #[must_use]
    pub fn test_config(base_url: &str) -> GatewayConfig {
        GatewayConfig::new(base_url)
            .with_timeout(Duration::from_secs(5))
            .with_retry(fast_retry())
    }

    /// A gateway over `store`, talking to `base_url`.
    ///
    /// # Panics
    ///
    /// Panics if `base_url` is not a valid http(s) URL.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn gateway_at(base_url: &str, store: MockTokenStore) -> BookingGateway<MockTokenStore> {
        BookingGateway::new(&test_config(base_url), store).expect("test base URL should be valid")
    }

    /// A gateway with a stored session, talking to `server`.
    ///
    /// The returned store shares state with the gateway's.
    #[must_use]
    pub fn signed_in_gateway(server: &MockServer) -> (BookingGateway<MockTokenStore>, MockTokenStore) {
        let store = MockTokenStore::with_session(test_session());
        (gateway_at(&server.uri(), store.clone()), store)
    }

    /// A gateway with an empty store, talking to `server`.
    #[must_use]
    pub fn signed_out_gateway(server: &MockServer) -> (BookingGateway<MockTokenStore>, MockTokenStore) {
        let store = MockTokenStore::new();
        (gateway_at(&server.uri(), store.clone()), store)
    }

    /// A base URL nothing listens on, so every request fails to connect.
    ///
    /// # Panics
    ///
    /// Panics if no local port can be bound.
    #[must_use]
    #[allow(clippy::expect_used)]
    pub fn unreachable_base_url() -> String {
        let listener = TcpListener::bind("127.0.0.1:0").expect("bind an ephemeral port");
        let addr = listener.local_addr().expect("ephemeral port has an address");
        drop(listener);
        format!("http://{addr}")
    }

    /// Route `tracing` output to the test harness. Safe to call repeatedly.
    pub fn init_test_tracing() {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    }
}

/// Sample data.
pub mod fixtures {
    use booking_gateway_core::{ImageUpload, Registration, Session};
    use chrono::NaiveDate;
    use serde_json::{Value, json};

    /// Access token of [`test_session`].
    pub const ACCESS_TOKEN: &str = "T1";

    /// `T1` / `R1` for `a@b.com`.
    #[must_use]
    pub fn test_session() -> Session {
        Session::new(ACCESS_TOKEN, "R1", "a@b.com")
    }

    /// A registration form that passes local validation.
    #[must_use]
    pub fn registration() -> Registration {
        Registration {
            name: "Nguyen An".to_string(),
            email: "an@example.com".to_string(),
            phone: "0901234567".to_string(),
            password: "secret1".to_string(),
            confirmed_password: "secret1".to_string(),
            gender: "Male".to_string(),
            dob: NaiveDate::from_ymd_opt(1995, 4, 12).unwrap_or_default(),
            image: None,
        }
    }

    /// A small PNG-typed upload.
    #[must_use]
    pub fn avatar() -> ImageUpload {
        ImageUpload {
            file_name: "avatar.png".to_string(),
            mime_type: "image/png".to_string(),
            bytes: b"fake-png-bytes".to_vec(),
        }
    }

    /// Workshop `id` wrapped in the usual envelope.
    #[must_use]
    pub fn workshop_json(id: &str) -> Value {
        json!({
            "isSuccess": true,
            "data": {
                "workshopId": id,
                "workshopName": "Tea ceremony",
                "startDate": "2025-03-01T09:00:00",
                "location": "Hanoi",
                "price": 150000.0,
                "capacity": 20,
                "masterId": "M1"
            }
        })
    }

    /// Successful ticket creation for group `group_id`.
    #[must_use]
    pub fn ticket_created_json(group_id: &str) -> Value {
        json!({ "isSuccess": true, "data": { "groupId": group_id } })
    }

    /// The pending-payment check reporting an unpaid ticket.
    #[must_use]
    pub fn pending_payment_json() -> Value {
        json!({
            "isSuccess": false,
            "message": "Bạn có vé chưa thanh toán, vui lòng thanh toán trước"
        })
    }

    /// The pending-payment check reporting nothing unpaid.
    #[must_use]
    pub fn no_pending_payment_json() -> Value {
        json!({ "isSuccess": true })
    }
}
