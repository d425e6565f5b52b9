use crate::application::identity::describe_errors;
use crate::domain::form::{FormState, fields};
use crate::domain::payment::{C2pRequest, C2pResponse};
use crate::domain::ports::{
    KEY_CHECKOUT_DRAFT, KEY_PERSONAL_DATA, PaymentGatewayBox, SessionStoreBox,
};
use crate::domain::profile::{CheckoutDraft, CustomerProfile, EffectiveCustomer};
use crate::error::{CheckoutError, Result};
use rust_decimal::Decimal;
use std::str::FromStr;

/// Generic user-facing message for transport and unexpected-shape failures.
pub const SUBMIT_FAILURE_MESSAGE: &str = "the payment could not be processed, please try again";

/// Submission state machine.
///
/// `Idle` is re-entrant; `Failed` allows retry with the same or edited fields
/// (the purchase key field is cleared so it must be re-entered); `Succeeded`
/// is terminal for the session.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitState {
    Idle,
    Submitting,
    Succeeded { transaction_id: String },
    Failed { message: String },
}

/// Outcome of a resolved submission attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// C2P flow accepted; navigate to the receipt keyed by this identifier.
    Completed { transaction_id: String },
    /// Card flow: embed the external payment surface, no navigation.
    Redirect(String),
    /// The response arrived for a torn-down or superseded attempt.
    Abandoned,
}

/// A submission attempt handed to the gateway.
///
/// The attempt number keys the stale-response guard: only a response applied
/// with the current attempt number can touch controller state.
#[derive(Debug)]
pub struct PendingSubmission {
    pub attempt: u64,
    pub request: C2pRequest,
}

/// Orchestrates the payment submission step.
///
/// Owns the payment form, assembles the outgoing request by merging form
/// values with the persisted profile and draft, issues exactly one gateway
/// request at a time, and interprets the response into the next state.
pub struct CheckoutController {
    form: FormState,
    session: SessionStoreBox,
    gateway: PaymentGatewayBox,
    state: SubmitState,
    attempt: u64,
    origin: Option<String>,
}

impl CheckoutController {
    pub fn new(session: SessionStoreBox, gateway: PaymentGatewayBox) -> Self {
        Self {
            form: FormState::c2p_payment(),
            session,
            gateway,
            state: SubmitState::Idle,
            attempt: 0,
            origin: None,
        }
    }

    /// Records the entry-point metadata forwarded with the request.
    pub fn set_origin(&mut self, origin: impl Into<String>) {
        self.origin = Some(origin.into());
    }

    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        self.form.set_field(name, value)
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    fn guard_reentry(&self) -> Result<()> {
        match &self.state {
            SubmitState::Submitting => Err(CheckoutError::SubmissionPending),
            SubmitState::Succeeded { .. } => Err(CheckoutError::Validation(
                "checkout already completed".to_string(),
            )),
            SubmitState::Idle | SubmitState::Failed { .. } => Ok(()),
        }
    }

    async fn load_profile(&self) -> Result<Option<CustomerProfile>> {
        // Malformed stored data reads as "no profile yet"
        Ok(self
            .session
            .load(KEY_PERSONAL_DATA)
            .await?
            .and_then(|value| serde_json::from_value(value).ok()))
    }

    async fn load_draft(&self) -> Result<Option<CheckoutDraft>> {
        Ok(self
            .session
            .load(KEY_CHECKOUT_DRAFT)
            .await?
            .and_then(|value| serde_json::from_value(value).ok()))
    }

    /// Resolved customer view for read-only summary surfaces.
    pub async fn effective_customer(&self) -> Result<EffectiveCustomer> {
        let profile = self.load_profile().await?;
        let draft = self.load_draft().await?;
        Ok(EffectiveCustomer::resolve(
            &self.form,
            profile.as_ref(),
            draft.as_ref(),
        ))
    }

    /// Validates the form, assembles the request, and enters `Submitting`.
    ///
    /// Rejected with `SubmissionPending` while an attempt is in flight, so a
    /// double submit can never issue a second gateway request.
    pub async fn begin_submit(&mut self) -> Result<PendingSubmission> {
        self.guard_reentry()?;
        if !self.form.is_submittable() {
            return Err(CheckoutError::Validation(describe_errors(&self.form)));
        }

        let profile = self.load_profile().await?;
        let draft = self.load_draft().await?;
        let resolved = EffectiveCustomer::resolve(&self.form, profile.as_ref(), draft.as_ref());

        let amount_raw = resolved
            .amount
            .ok_or_else(|| CheckoutError::Validation("amount is required".to_string()))?;
        let amount = Decimal::from_str(&amount_raw)
            .map_err(|_| CheckoutError::Validation("amount is not a valid number".to_string()))?;

        let field = |name: &str| self.form.value(name).unwrap_or_default().to_string();
        let request = C2pRequest {
            amount,
            origin_phone: field(fields::C2P_PHONE),
            destination_id: field(fields::C2P_ID),
            destination_bank_code: field(fields::C2P_BANK),
            destination_mobile: field(fields::DEST_MOBILE),
            purchase_key: field(fields::PURCHASE_KEY),
            origin: self.origin.clone(),
            personal_data: profile,
            checkout_data: draft,
        };

        self.attempt += 1;
        self.state = SubmitState::Submitting;
        tracing::info!(attempt = self.attempt, "payment submission started");
        Ok(PendingSubmission {
            attempt: self.attempt,
            request,
        })
    }

    /// Interprets the gateway's response for a given attempt.
    ///
    /// Responses for a superseded attempt, or arriving outside `Submitting`,
    /// are discarded without touching state.
    pub async fn apply_c2p_response(
        &mut self,
        attempt: u64,
        result: Result<C2pResponse>,
    ) -> Result<SubmitOutcome> {
        if attempt != self.attempt || self.state != SubmitState::Submitting {
            tracing::debug!(attempt, "discarding stale gateway response");
            return Ok(SubmitOutcome::Abandoned);
        }

        match result {
            Ok(response) if response.is_success() => match response.transaction_id {
                Some(transaction_id) => {
                    // Persisted data is cleared only on confirmed success
                    self.session.clear(KEY_PERSONAL_DATA).await?;
                    self.session.clear(KEY_CHECKOUT_DRAFT).await?;
                    self.form.reset();
                    self.state = SubmitState::Succeeded {
                        transaction_id: transaction_id.clone(),
                    };
                    tracing::info!(%transaction_id, "payment succeeded");
                    Ok(SubmitOutcome::Completed { transaction_id })
                }
                None => {
                    self.fail(SUBMIT_FAILURE_MESSAGE.to_string());
                    Err(CheckoutError::Transport(
                        "success response without a transaction identifier".to_string(),
                    ))
                }
            },
            Ok(response) => {
                let message = response
                    .error
                    .or(response.message)
                    .unwrap_or_else(|| SUBMIT_FAILURE_MESSAGE.to_string());
                self.fail(message.clone());
                Err(CheckoutError::GatewayRejection(message))
            }
            Err(CheckoutError::GatewayRejection(message)) => {
                self.fail(message.clone());
                Err(CheckoutError::GatewayRejection(message))
            }
            Err(err) => {
                self.fail(SUBMIT_FAILURE_MESSAGE.to_string());
                Err(err)
            }
        }
    }

    /// Submits the current form as one C2P attempt.
    pub async fn submit(&mut self) -> Result<SubmitOutcome> {
        let pending = self.begin_submit().await?;
        let result = self.gateway.submit_c2p(&pending.request).await;
        self.apply_c2p_response(pending.attempt, result).await
    }

    /// Card sub-flow: requests a redirect URL for an embedded payment surface.
    ///
    /// Single-flight like C2P, but not gated on the form (the request has no
    /// body) and never clears persisted data; the external surface handles its
    /// own completion.
    pub async fn request_card_payment(&mut self) -> Result<SubmitOutcome> {
        self.guard_reentry()?;
        self.attempt += 1;
        let attempt = self.attempt;
        self.state = SubmitState::Submitting;
        tracing::info!(attempt, "card payment initiation started");

        let result = self.gateway.create_card_payment().await;
        if attempt != self.attempt || self.state != SubmitState::Submitting {
            return Ok(SubmitOutcome::Abandoned);
        }

        match result {
            Ok(response) => match response.payment_url {
                Some(url) => {
                    self.state = SubmitState::Idle;
                    Ok(SubmitOutcome::Redirect(url))
                }
                None => {
                    let message = response
                        .error
                        .unwrap_or_else(|| "no payment URL returned".to_string());
                    self.fail(message.clone());
                    Err(CheckoutError::GatewayRejection(message))
                }
            },
            Err(CheckoutError::GatewayRejection(message)) => {
                self.fail(message.clone());
                Err(CheckoutError::GatewayRejection(message))
            }
            Err(err) => {
                self.fail(SUBMIT_FAILURE_MESSAGE.to_string());
                Err(err)
            }
        }
    }

    /// Abandons any in-flight attempt, e.g. when the view is torn down.
    ///
    /// The bumped attempt number makes a late response inapplicable.
    pub fn teardown(&mut self) {
        self.attempt += 1;
        self.state = SubmitState::Idle;
    }

    fn fail(&mut self, message: String) {
        tracing::warn!(%message, "payment submission failed");
        // The one-time key must be re-entered for the next attempt
        self.form.clear_field(fields::PURCHASE_KEY);
        self.state = SubmitState::Failed { message };
    }
}
