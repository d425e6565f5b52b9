use crate::domain::profile::{CheckoutDraft, CustomerProfile};
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Transaction status reported by the gateway for a completed payment.
pub const STATUS_COMPLETED: &str = "completed";
/// Response status that marks a C2P submission as accepted.
pub const STATUS_SUCCESS: &str = "success";

/// Outgoing C2P payment request.
///
/// Constructed immediately before submission and dropped afterwards; the
/// purchase key inside it is never persisted anywhere.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct C2pRequest {
    pub amount: Decimal,
    #[serde(rename = "telefono")]
    pub origin_phone: String,
    #[serde(rename = "ci")]
    pub destination_id: String,
    #[serde(rename = "banco")]
    pub destination_bank_code: String,
    #[serde(rename = "destino")]
    pub destination_mobile: String,
    #[serde(rename = "purchase_key")]
    pub purchase_key: String,
    /// Entry-point metadata, when the flow was reached through a referral.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub origin: Option<String>,
    #[serde(rename = "personalData", skip_serializing_if = "Option::is_none")]
    pub personal_data: Option<CustomerProfile>,
    #[serde(rename = "checkoutData", skip_serializing_if = "Option::is_none")]
    pub checkout_data: Option<CheckoutDraft>,
}

/// Gateway response to a C2P submission.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct C2pResponse {
    #[serde(default)]
    pub status: String,
    #[serde(rename = "transactionId", default)]
    pub transaction_id: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

impl C2pResponse {
    pub fn is_success(&self) -> bool {
        self.status == STATUS_SUCCESS
    }
}

/// Gateway response to a card payment initiation.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct CardPaymentResponse {
    #[serde(rename = "paymentUrl", default)]
    pub payment_url: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Bank-side result attached to a stored transaction.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct BankResponse {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

/// Echo of the submitted request as stored by the gateway (never the key).
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
pub struct RequestEcho {
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(rename = "c2pPhone", default)]
    pub c2p_phone: Option<String>,
}

/// A stored transaction, fetched by identifier; owned by the gateway.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
pub struct TransactionRecord {
    #[serde(rename = "internalId")]
    pub internal_id: String,
    pub status: String,
    #[serde(rename = "requestData", default)]
    pub request_data: Option<RequestEcho>,
    #[serde(rename = "bankResponse", default)]
    pub bank_response: Option<BankResponse>,
    #[serde(rename = "personalData", default)]
    pub personal_data: Option<CustomerProfile>,
    #[serde(rename = "checkoutData", default)]
    pub checkout_data: Option<CheckoutDraft>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl TransactionRecord {
    pub fn is_completed(&self) -> bool {
        self.status == STATUS_COMPLETED
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_c2p_request_wire_names() {
        let request = C2pRequest {
            amount: dec!(150.00),
            origin_phone: "584142591177".into(),
            destination_id: "V18367443".into(),
            destination_bank_code: "0105".into(),
            destination_mobile: "584241513063".into(),
            purchase_key: "1234".into(),
            origin: None,
            personal_data: None,
            checkout_data: None,
        };

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["telefono"], "584142591177");
        assert_eq!(json["ci"], "V18367443");
        assert_eq!(json["banco"], "0105");
        assert_eq!(json["destino"], "584241513063");
        assert_eq!(json["purchase_key"], "1234");
        assert!(json.get("origin").is_none());
        assert!(json.get("personalData").is_none());
    }

    #[test]
    fn test_c2p_response_deserialization() {
        let response: C2pResponse =
            serde_json::from_str(r#"{"status":"success","transactionId":"abc123"}"#).unwrap();
        assert!(response.is_success());
        assert_eq!(response.transaction_id.as_deref(), Some("abc123"));

        let rejected: C2pResponse =
            serde_json::from_str(r#"{"status":"error","error":"insufficient funds"}"#).unwrap();
        assert!(!rejected.is_success());
        assert_eq!(rejected.error.as_deref(), Some("insufficient funds"));
    }

    #[test]
    fn test_transaction_record_deserialization() {
        let json = r#"{
            "internalId": "abc123",
            "status": "completed",
            "requestData": {"amount": "150.00", "c2pPhone": "584142591177"},
            "bankResponse": {"code": "00", "reference": "REF-778"},
            "created_at": "2025-04-01T12:30:00Z"
        }"#;
        let record: TransactionRecord = serde_json::from_str(json).unwrap();
        assert!(record.is_completed());
        assert_eq!(record.internal_id, "abc123");
        let echo = record.request_data.unwrap();
        assert_eq!(echo.amount, Some(dec!(150.00)));
        assert_eq!(
            record.bank_response.unwrap().reference.as_deref(),
            Some("REF-778")
        );
        assert!(record.created_at.is_some());
    }

    #[test]
    fn test_transaction_record_tolerates_missing_sections() {
        let record: TransactionRecord =
            serde_json::from_str(r#"{"internalId":"x1","status":"failed"}"#).unwrap();
        assert!(!record.is_completed());
        assert!(record.request_data.is_none());
        assert!(record.personal_data.is_none());
    }
}
