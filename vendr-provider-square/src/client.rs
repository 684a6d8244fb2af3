//! HTTP client for the Square REST API.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Serialize;
use serde::de::DeserializeOwned;
use url::Url;

use crate::api::{
    BatchRetrieveOrdersRequest, BatchRetrieveOrdersResponse, CreateCheckoutRequest,
    CreateCheckoutResponse, SquareErrorBody,
};
use crate::settings::SquareSettings;

/// Square API version pinned on every request.
pub const SQUARE_API_VERSION: &str = "2024-08-21";

/// Errors produced by Square gateway calls.
#[derive(Debug, thiserror::Error)]
pub enum GatewayError {
    /// Network failure before Square produced a response.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    /// Square returned a non-2xx status code.
    #[error("square api error: status {status}, {message}")]
    Api { status: StatusCode, message: String },

    /// Response body did not decode as the expected JSON shape.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// The endpoint path could not be joined onto the base URL.
    #[error("invalid url: {0}")]
    Url(#[from] url::ParseError),
}

/// The Square calls the provider makes, behind a seam so tests can stub
/// and count them.
#[async_trait]
pub trait SquareGateway: Send + Sync {
    /// `POST /v2/orders/batch-retrieve`.
    async fn batch_retrieve_orders(
        &self,
        request: BatchRetrieveOrdersRequest,
    ) -> Result<BatchRetrieveOrdersResponse, GatewayError>;

    /// `POST /v2/locations/{location_id}/checkouts`.
    async fn create_checkout(
        &self,
        location_id: &str,
        request: CreateCheckoutRequest,
    ) -> Result<CreateCheckoutResponse, GatewayError>;
}

/// Typed reqwest client for the Square REST API.
///
/// Every request carries `Authorization: Bearer {access_token}` and the
/// pinned [`SQUARE_API_VERSION`].
#[derive(Debug, Clone)]
pub struct SquareApiClient {
    http: Client,
    base_url: Url,
    access_token: String,
}

impl SquareApiClient {
    /// Client for the environment and credentials selected by `settings`.
    pub fn for_settings(settings: &SquareSettings) -> Result<Self, GatewayError> {
        let base_url = Url::parse(settings.environment().base_url())?;
        Ok(Self::new(base_url, settings.access_token()))
    }

    pub fn new(base_url: Url, access_token: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            base_url,
            access_token: access_token.into(),
        }
    }

    /// Replace the default `reqwest::Client` with a custom one.
    pub fn with_http_client(mut self, client: Client) -> Self {
        self.http = client;
        self
    }

    async fn post_json<B: Serialize, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, GatewayError> {
        let url = self.base_url.join(path)?;

        let resp = self
            .http
            .post(url)
            .bearer_auth(&self.access_token)
            .header("Square-Version", SQUARE_API_VERSION)
            .json(body)
            .send()
            .await?;

        parse_response(resp).await
    }
}

#[async_trait]
impl SquareGateway for SquareApiClient {
    async fn batch_retrieve_orders(
        &self,
        request: BatchRetrieveOrdersRequest,
    ) -> Result<BatchRetrieveOrdersResponse, GatewayError> {
        self.post_json("/v2/orders/batch-retrieve", &request).await
    }

    async fn create_checkout(
        &self,
        location_id: &str,
        request: CreateCheckoutRequest,
    ) -> Result<CreateCheckoutResponse, GatewayError> {
        self.post_json(&format!("/v2/locations/{location_id}/checkouts"), &request)
            .await
    }
}

async fn parse_response<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, GatewayError> {
    let status = resp.status();
    if !status.is_success() {
        let body = resp.text().await.unwrap_or_default();
        let message = match serde_json::from_str::<SquareErrorBody>(&body) {
            Ok(envelope) => envelope
                .errors
                .first()
                .and_then(|e| e.detail.clone().or_else(|| e.code.clone()))
                .unwrap_or(body),
            Err(_) => body,
        };
        return Err(GatewayError::Api { status, message });
    }
    let bytes = resp.bytes().await?;
    serde_json::from_slice(&bytes).map_err(GatewayError::Json)
}
