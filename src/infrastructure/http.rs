use crate::domain::payment::{C2pRequest, C2pResponse, CardPaymentResponse, TransactionRecord};
use crate::domain::ports::PaymentGateway;
use crate::error::{CheckoutError, Result};
use async_trait::async_trait;
use once_cell::sync::Lazy;
use serde_json::Value;
use std::time::Duration;

static CLIENT: Lazy<reqwest::Client> = Lazy::new(|| {
    reqwest::Client::builder()
        .connect_timeout(Duration::from_secs(5))
        .timeout(Duration::from_secs(30))
        .build()
        .expect("Failed to build reqwest client")
});

/// Gateway adapter over the payment service's HTTP API.
pub struct HttpGateway {
    base_url: String,
}

impl HttpGateway {
    /// Creates a gateway client for the given base URL (no trailing slash).
    pub fn new(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        while base_url.ends_with('/') {
            base_url.pop();
        }
        Self { base_url }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }
}

/// Extracts the `error` field from a failure body, if the body is JSON.
async fn rejection_message(response: reqwest::Response) -> Option<String> {
    let body: Value = response.json().await.ok()?;
    body.get("error")
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn transport(err: reqwest::Error) -> CheckoutError {
    CheckoutError::Transport(err.to_string())
}

#[async_trait]
impl PaymentGateway for HttpGateway {
    async fn create_card_payment(&self) -> Result<CardPaymentResponse> {
        let url = self.url("/api/create-card-payment");
        tracing::debug!(%url, "initiating card payment");
        let response = CLIENT.post(&url).send().await.map_err(transport)?;

        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(transport);
        }
        tracing::warn!(%status, "card payment initiation rejected");
        match rejection_message(response).await {
            Some(message) => Err(CheckoutError::GatewayRejection(message)),
            None => Err(CheckoutError::Transport(format!(
                "gateway returned HTTP {status}"
            ))),
        }
    }

    async fn submit_c2p(&self, request: &C2pRequest) -> Result<C2pResponse> {
        let url = self.url("/api/create-c2p-payment");
        tracing::debug!(%url, amount = %request.amount, "submitting C2P payment");
        let response = CLIENT
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status.is_success() {
            let parsed: C2pResponse = response.json().await.map_err(transport)?;
            tracing::info!(status = %parsed.status, "C2P response received");
            return Ok(parsed);
        }
        tracing::warn!(%status, "C2P submission rejected");
        match rejection_message(response).await {
            Some(message) => Err(CheckoutError::GatewayRejection(message)),
            None => Err(CheckoutError::Transport(format!(
                "gateway returned HTTP {status}"
            ))),
        }
    }

    async fn payment_details(&self, transaction_id: &str) -> Result<TransactionRecord> {
        let url = self.url(&format!("/api/payment-details/{transaction_id}"));
        tracing::debug!(%url, "fetching transaction details");
        let response = CLIENT.get(&url).send().await.map_err(transport)?;

        let status = response.status();
        if status == reqwest::StatusCode::NOT_FOUND {
            return Err(CheckoutError::NotFound);
        }
        if !status.is_success() {
            return Err(CheckoutError::Transport(format!(
                "gateway returned HTTP {status}"
            )));
        }
        response.json().await.map_err(transport)
    }
}
