//! Integration tests driving the Square provider against a mocked gateway
//! HTTP endpoint.

use std::sync::Arc;

use async_trait::async_trait;
use rust_decimal::Decimal;
use url::Url;
use uuid::Uuid;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use vendr_provider_core::objects::{CallbackRequest, PaymentOrder, PaymentStatus, TotalPrice};
use vendr_provider_core::provider::{OrderResolver, PaymentProvider};
use vendr_provider_square::api::BatchRetrieveOrdersRequest;
use vendr_provider_square::client::{
    GatewayError, SQUARE_API_VERSION, SquareApiClient, SquareGateway,
};
use vendr_provider_square::provider::SquareCheckoutProvider;
use vendr_provider_square::settings::SquareSettings;
use vendr_provider_square::signature::{SIGNATURE_HEADER, compute_signature};

const CALLBACK_URL: &str =
    "https://store.example.com/umbraco/vendr/payment/callback/square-checkout-onetime/";
const SIGNING_SECRET: &str = "sandbox-signing-secret";
const HOST_ORDER_ID: &str = "3fa85f64-5717-4562-b3fc-2c963f66afa6";
const PAYMENT_EVENT: &str = r#"{"data":{"object":{"payment":{"order_id":"ORDER1"}}}}"#;

struct StaticOrders(Vec<PaymentOrder>);

#[async_trait]
impl OrderResolver for StaticOrders {
    async fn resolve(&self, order_id: Uuid) -> Option<PaymentOrder> {
        self.0.iter().find(|order| order.id == order_id).cloned()
    }
}

fn host_order() -> PaymentOrder {
    PaymentOrder {
        id: Uuid::parse_str(HOST_ORDER_ID).unwrap(),
        order_number: "ORDER-42".to_string(),
        currency_code: "USD".to_string(),
        total_price: TotalPrice::new(Decimal::new(1999, 2), Decimal::new(500, 2)),
        customer_reference: None,
    }
}

fn settings() -> SquareSettings {
    SquareSettings {
        continue_url: "https://store.example.com/continue".to_string(),
        location_id: "L123".to_string(),
        sandbox_access_token: "test-token".to_string(),
        sandbox_webhook_signing_secret: SIGNING_SECRET.to_string(),
        sandbox_mode: true,
        ..SquareSettings::default()
    }
}

fn client_for(server: &MockServer) -> SquareApiClient {
    SquareApiClient::new(Url::parse(&server.uri()).unwrap(), "test-token")
}

fn provider_for(server: &MockServer, orders: Vec<PaymentOrder>) -> SquareCheckoutProvider {
    let server_uri = server.uri();
    SquareCheckoutProvider::with_gateway_factory(Arc::new(StaticOrders(orders)), move |settings| {
        let base_url = Url::parse(&server_uri)?;
        Ok(Arc::new(SquareApiClient::new(
            base_url,
            settings.access_token(),
        )))
    })
}

fn signed_request(body: &'static str) -> CallbackRequest {
    let signature = compute_signature(SIGNING_SECRET, CALLBACK_URL, body.as_bytes());
    CallbackRequest::new(CALLBACK_URL, body).with_header(SIGNATURE_HEADER, signature)
}

#[tokio::test]
async fn test_batch_retrieve_sends_pinned_headers_and_parses_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/orders/batch-retrieve"))
        .and(header("Square-Version", SQUARE_API_VERSION))
        .and(header("authorization", "Bearer test-token"))
        .and(body_json(serde_json::json!({ "order_ids": ["ORDER1"] })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "orders": [{
                "id": "ORDER1",
                "location_id": "L123",
                "reference_id": HOST_ORDER_ID,
                "state": "COMPLETED"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let response = client_for(&server)
        .batch_retrieve_orders(BatchRetrieveOrdersRequest {
            order_ids: vec!["ORDER1".to_string()],
        })
        .await
        .unwrap();

    assert_eq!(response.orders.len(), 1);
    assert_eq!(response.orders[0].state.as_deref(), Some("COMPLETED"));
    assert_eq!(response.orders[0].reference_id.as_deref(), Some(HOST_ORDER_ID));
}

#[tokio::test]
async fn test_api_error_surfaces_square_error_detail() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/orders/batch-retrieve"))
        .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
            "errors": [{
                "category": "INVALID_REQUEST_ERROR",
                "code": "NOT_FOUND",
                "detail": "Order not found."
            }]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .batch_retrieve_orders(BatchRetrieveOrdersRequest {
            order_ids: vec!["MISSING".to_string()],
        })
        .await
        .unwrap_err();

    match err {
        GatewayError::Api { status, message } => {
            assert_eq!(status.as_u16(), 404);
            assert_eq!(message, "Order not found.");
        }
        other => panic!("expected api error, got {other:?}"),
    }
}

#[tokio::test]
async fn test_create_checkout_posts_to_location_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/locations/L123/checkouts"))
        .and(header("Square-Version", SQUARE_API_VERSION))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "checkout": {
                "id": "CHK1",
                "checkout_page_url": "https://connect.squareupsandbox.com/v2/checkout?c=CHK1"
            }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server, vec![]);
    let urls = vendr_provider_core::objects::PaymentUrls {
        continue_url: "https://store.example.com/continue".to_string(),
        ..Default::default()
    };

    let result = provider
        .generate_checkout_form(&host_order(), &urls, &settings())
        .await
        .unwrap();

    assert_eq!(
        result.form.action,
        "https://connect.squareupsandbox.com/v2/checkout?c=CHK1"
    );
}

#[tokio::test]
async fn test_callback_end_to_end_authorizes_completed_order() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/orders/batch-retrieve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "orders": [{ "id": "ORDER1", "state": "COMPLETED" }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let provider = provider_for(&server, vec![]);
    let result = provider
        .process_callback(&host_order(), &signed_request(PAYMENT_EVENT), &settings())
        .await;

    let info = result.transaction().expect("callback should process");
    assert_eq!(info.transaction_id, "ORDER1");
    assert_eq!(info.payment_status, PaymentStatus::Authorized);
    assert_eq!(info.amount_authorized, Decimal::new(2499, 2));
}

#[tokio::test]
async fn test_invalid_signature_reaches_no_gateway_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/orders/batch-retrieve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "orders": [{ "id": "ORDER1", "state": "COMPLETED" }]
        })))
        .expect(0)
        .mount(&server)
        .await;

    let provider = provider_for(&server, vec![]);
    let request = CallbackRequest::new(CALLBACK_URL, PAYMENT_EVENT)
        .with_header(SIGNATURE_HEADER, "AAAAAAAAAAAAAAAAAAAAAAAAAAA=");

    let result = provider
        .process_callback(&host_order(), &request, &settings())
        .await;

    assert!(result.is_bad_request());
    server.verify().await;
}

#[tokio::test]
async fn test_order_reference_recovered_end_to_end() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/orders/batch-retrieve"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "orders": [{
                "id": "ORDER1",
                "reference_id": HOST_ORDER_ID,
                "state": "COMPLETED"
            }]
        })))
        .mount(&server)
        .await;

    let provider = provider_for(&server, vec![host_order()]);
    let reference = provider
        .get_order_reference(&signed_request(PAYMENT_EVENT), &settings())
        .await
        .expect("reference should be recovered");

    assert_eq!(
        reference.to_string(),
        format!("{HOST_ORDER_ID},ORDER-42")
    );
}
