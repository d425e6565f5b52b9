use crate::domain::payment::{C2pRequest, C2pResponse, CardPaymentResponse, TransactionRecord};
use crate::error::Result;
use async_trait::async_trait;
use serde_json::Value;

/// Session key for the initial checkout step's draft.
pub const KEY_CHECKOUT_DRAFT: &str = "checkoutDraft";
/// Session key for the identity step's customer profile.
pub const KEY_PERSONAL_DATA: &str = "personalData";

/// Key-value bridge carrying structured data between otherwise-stateless
/// steps of one session.
///
/// Cleared on successful submission, not on navigation. The purchase
/// authorization key must never be written here; no persisted type carries it.
#[async_trait]
pub trait SessionStore: Send + Sync {
    async fn save(&self, key: &str, value: Value) -> Result<()>;
    async fn load(&self, key: &str) -> Result<Option<Value>>;
    async fn clear(&self, key: &str) -> Result<()>;
}

/// External payment gateway contract.
///
/// Implementations map transport-level failures to `CheckoutError::Transport`,
/// structured rejections to `CheckoutError::GatewayRejection` with the verbatim
/// gateway message, and a 404 on detail retrieval to `CheckoutError::NotFound`.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Initiates a card payment; the response carries a redirect URL.
    async fn create_card_payment(&self) -> Result<CardPaymentResponse>;
    /// Submits a C2P payment request.
    async fn submit_c2p(&self, request: &C2pRequest) -> Result<C2pResponse>;
    /// Fetches a stored transaction by identifier.
    async fn payment_details(&self, transaction_id: &str) -> Result<TransactionRecord>;
}

pub type SessionStoreBox = Box<dyn SessionStore>;
pub type PaymentGatewayBox = Box<dyn PaymentGateway>;
