#![allow(dead_code)]

use async_trait::async_trait;
use c2p_checkout::application::controller::CheckoutController;
use c2p_checkout::domain::form::fields;
use c2p_checkout::domain::payment::{
    BankResponse, C2pRequest, C2pResponse, CardPaymentResponse, RequestEcho, TransactionRecord,
};
use c2p_checkout::domain::ports::PaymentGateway;
use c2p_checkout::error::{CheckoutError, Result};
use rust_decimal_macros::dec;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Canned behavior for the C2P submission endpoint.
#[derive(Clone)]
pub enum C2pScript {
    Success { transaction_id: String },
    WrongStatus { error: String },
    Reject { message: String },
    Transport,
}

/// Canned behavior for the payment-details endpoint.
#[derive(Clone)]
pub enum DetailScript {
    Record(TransactionRecord),
    NotFound,
    Transport,
}

/// Gateway double that counts calls and captures the last submitted request.
#[derive(Clone)]
pub struct ScriptedGateway {
    pub c2p_calls: Arc<AtomicUsize>,
    pub detail_calls: Arc<AtomicUsize>,
    pub last_request: Arc<Mutex<Option<C2pRequest>>>,
    pub c2p_script: Arc<Mutex<C2pScript>>,
    pub detail_script: Arc<Mutex<DetailScript>>,
}

impl ScriptedGateway {
    pub fn new(c2p: C2pScript, detail: DetailScript) -> Self {
        Self {
            c2p_calls: Arc::new(AtomicUsize::new(0)),
            detail_calls: Arc::new(AtomicUsize::new(0)),
            last_request: Arc::new(Mutex::new(None)),
            c2p_script: Arc::new(Mutex::new(c2p)),
            detail_script: Arc::new(Mutex::new(detail)),
        }
    }

    pub fn succeeding(transaction_id: &str) -> Self {
        Self::new(
            C2pScript::Success {
                transaction_id: transaction_id.to_string(),
            },
            DetailScript::Record(completed_record(transaction_id)),
        )
    }

    pub fn c2p_call_count(&self) -> usize {
        self.c2p_calls.load(Ordering::SeqCst)
    }

    pub fn detail_call_count(&self) -> usize {
        self.detail_calls.load(Ordering::SeqCst)
    }

    pub fn last_request(&self) -> Option<C2pRequest> {
        self.last_request.lock().unwrap().clone()
    }
}

#[async_trait]
impl PaymentGateway for ScriptedGateway {
    async fn create_card_payment(&self) -> Result<CardPaymentResponse> {
        Ok(CardPaymentResponse {
            payment_url: Some("https://bank.example/pay/1".into()),
            error: None,
        })
    }

    async fn submit_c2p(&self, request: &C2pRequest) -> Result<C2pResponse> {
        self.c2p_calls.fetch_add(1, Ordering::SeqCst);
        *self.last_request.lock().unwrap() = Some(request.clone());
        match self.c2p_script.lock().unwrap().clone() {
            C2pScript::Success { transaction_id } => Ok(C2pResponse {
                status: "success".into(),
                transaction_id: Some(transaction_id),
                message: Some("Pago procesado exitosamente.".into()),
                error: None,
            }),
            C2pScript::WrongStatus { error } => Ok(C2pResponse {
                status: "error".into(),
                transaction_id: None,
                message: None,
                error: Some(error),
            }),
            C2pScript::Reject { message } => Err(CheckoutError::GatewayRejection(message)),
            C2pScript::Transport => {
                Err(CheckoutError::Transport("connection reset".into()))
            }
        }
    }

    async fn payment_details(&self, _transaction_id: &str) -> Result<TransactionRecord> {
        self.detail_calls.fetch_add(1, Ordering::SeqCst);
        match self.detail_script.lock().unwrap().clone() {
            DetailScript::Record(record) => Ok(record),
            DetailScript::NotFound => Err(CheckoutError::NotFound),
            DetailScript::Transport => {
                Err(CheckoutError::Transport("connection refused".into()))
            }
        }
    }
}

/// A completed transaction as the gateway would store it.
pub fn completed_record(transaction_id: &str) -> TransactionRecord {
    TransactionRecord {
        internal_id: transaction_id.to_string(),
        status: "completed".into(),
        request_data: Some(RequestEcho {
            amount: Some(dec!(150.00)),
            c2p_phone: Some("584142591177".into()),
        }),
        bank_response: Some(BankResponse {
            code: Some("00".into()),
            message: Some("aprobado".into()),
            reference: Some("REF-778".into()),
            error: None,
        }),
        personal_data: None,
        checkout_data: None,
        created_at: None,
    }
}

/// Fills the payment form with the canonical valid values.
pub fn fill_payment_form(controller: &mut CheckoutController) {
    controller.set_field(fields::AMOUNT, "150.00").unwrap();
    controller
        .set_field(fields::C2P_PHONE, "584142591177")
        .unwrap();
    controller.set_field(fields::C2P_ID, "V12345678").unwrap();
    controller.set_field(fields::C2P_BANK, "0105").unwrap();
    controller
        .set_field(fields::DEST_MOBILE, "584241513063")
        .unwrap();
    controller.set_field(fields::PURCHASE_KEY, "1234").unwrap();
}
