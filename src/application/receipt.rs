use crate::domain::payment::TransactionRecord;
use crate::domain::ports::PaymentGatewayBox;
use crate::domain::profile::CustomerProfile;
use crate::error::CheckoutError;
use chrono::{DateTime, Utc};

/// Receipt retrieval states. Every outcome is terminal; no automatic retries.
#[derive(Debug, Clone, PartialEq)]
pub enum ReceiptState {
    Loading,
    Loaded(TransactionRecord),
    NotFound,
    Unreachable { message: String },
}

/// Fetches and projects a stored transaction for the receipt view.
///
/// Projections trust the gateway's stored record and apply no further
/// validation.
pub struct ReceiptViewModel {
    gateway: PaymentGatewayBox,
    state: ReceiptState,
}

impl ReceiptViewModel {
    pub fn new(gateway: PaymentGatewayBox) -> Self {
        Self {
            gateway,
            state: ReceiptState::Loading,
        }
    }

    pub fn state(&self) -> &ReceiptState {
        &self.state
    }

    /// Fetches the transaction once; further calls return the settled state.
    pub async fn load(&mut self, transaction_id: &str) -> &ReceiptState {
        if self.state != ReceiptState::Loading {
            return &self.state;
        }
        self.state = match self.gateway.payment_details(transaction_id).await {
            Ok(record) => {
                tracing::info!(%transaction_id, status = %record.status, "receipt loaded");
                ReceiptState::Loaded(record)
            }
            Err(CheckoutError::NotFound) => {
                tracing::warn!(%transaction_id, "transaction not found");
                ReceiptState::NotFound
            }
            Err(err) => {
                tracing::warn!(%transaction_id, error = %err, "receipt retrieval failed");
                ReceiptState::Unreachable {
                    message: "could not load the payment details".to_string(),
                }
            }
        };
        &self.state
    }

    pub fn record(&self) -> Option<&TransactionRecord> {
        match &self.state {
            ReceiptState::Loaded(record) => Some(record),
            _ => None,
        }
    }

    /// Paid amount, preferring the customer snapshot over the request echo.
    pub fn amount(&self) -> Option<String> {
        let record = self.record()?;
        record
            .personal_data
            .as_ref()
            .map(|profile| profile.amount.clone())
            .or_else(|| {
                record
                    .request_data
                    .as_ref()
                    .and_then(|echo| echo.amount.map(|a| a.to_string()))
            })
    }

    pub fn origin_phone(&self) -> Option<&str> {
        self.record()?
            .request_data
            .as_ref()
            .and_then(|echo| echo.c2p_phone.as_deref())
    }

    pub fn bank_reference(&self) -> Option<&str> {
        self.record()?
            .bank_response
            .as_ref()
            .and_then(|bank| bank.reference.as_deref())
    }

    pub fn status(&self) -> Option<&str> {
        self.record().map(|record| record.status.as_str())
    }

    pub fn is_completed(&self) -> bool {
        self.record().is_some_and(TransactionRecord::is_completed)
    }

    pub fn customer(&self) -> Option<&CustomerProfile> {
        self.record()?.personal_data.as_ref()
    }

    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        self.record()?.created_at
    }
}
