use crate::domain::form::{FormState, fields};
use crate::domain::ports::{KEY_PERSONAL_DATA, SessionStoreBox};
use crate::domain::profile::CustomerProfile;
use crate::error::{CheckoutError, Result};

/// Identity-collection step of the flow.
///
/// Accumulates the personal-data form and, on submit, persists the resulting
/// [`CustomerProfile`] to the session bridge for the later payment step.
pub struct IdentityStep {
    form: FormState,
    session: SessionStoreBox,
}

impl IdentityStep {
    pub fn new(session: SessionStoreBox) -> Self {
        Self {
            form: FormState::personal_data(),
            session,
        }
    }

    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        self.form.set_field(name, value)
    }

    pub fn form(&self) -> &FormState {
        &self.form
    }

    /// Validates the whole form and persists the profile under `personalData`.
    ///
    /// The profile is immutable once persisted; later steps read it only.
    pub async fn submit(&mut self) -> Result<CustomerProfile> {
        if !self.form.is_submittable() {
            return Err(CheckoutError::Validation(describe_errors(&self.form)));
        }
        let take = |name: &str| self.form.value(name).unwrap_or_default().to_string();
        let profile = CustomerProfile {
            full_name: take(fields::FULL_NAME),
            phone_number: take(fields::PHONE_NUMBER),
            id_number: take(fields::ID_NUMBER),
            billing_address: take(fields::BILLING_ADDRESS),
            shipping_address: take(fields::SHIPPING_ADDRESS),
            email: take(fields::EMAIL),
            amount: take(fields::AMOUNT),
        };
        self.session
            .save(KEY_PERSONAL_DATA, serde_json::to_value(&profile)?)
            .await?;
        tracing::info!("customer profile persisted for the payment step");
        Ok(profile)
    }
}

/// Formats the current field errors into one user-facing message.
pub(crate) fn describe_errors(form: &FormState) -> String {
    let details = form
        .errors()
        .iter()
        .map(|(name, message)| format!("{name}: {message}"))
        .collect::<Vec<_>>()
        .join("; ");
    format!("form has missing or invalid fields: {details}")
}
