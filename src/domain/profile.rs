use crate::domain::form::{FormState, fields};
use crate::domain::validation::COUNTRY_CODE;
use serde::{Deserialize, Serialize};

/// Customer identity and shipping data collected on the identity step.
///
/// Immutable once persisted under the `personalData` session key; later steps
/// consume it read-only. Never carries the purchase authorization key.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone)]
#[serde(rename_all = "camelCase")]
pub struct CustomerProfile {
    pub full_name: String,
    /// 10-digit local number; the locale prefix is added separately.
    pub phone_number: String,
    pub id_number: String,
    pub billing_address: String,
    pub shipping_address: String,
    pub email: String,
    pub amount: String,
}

impl CustomerProfile {
    /// Phone number in full wire form (country code + 10 digits).
    pub fn full_phone(&self) -> String {
        format!("{COUNTRY_CODE}{}", self.phone_number)
    }
}

/// Customer data from the initial checkout step.
///
/// An older shape than [`CustomerProfile`]: depending on the entry point it may
/// lack phone, email or amount. Read-only once persisted under `checkoutDraft`.
#[derive(Debug, Serialize, Deserialize, PartialEq, Clone, Default)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutDraft {
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub id_number: Option<String>,
    #[serde(default)]
    pub billing_address: Option<String>,
    #[serde(default)]
    pub shipping_address: Option<String>,
    #[serde(default)]
    pub phone_number: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub amount: Option<String>,
}

/// Customer fields resolved across the flow's divergent persisted shapes.
///
/// Single merge rule: current form values win, then the persisted profile,
/// then the draft. Request assembly draws the amount from here (the one field
/// the payment form re-collects); the order summary reads the identity fields.
/// Nothing else may consult the session for these fields.
#[derive(Debug, PartialEq, Clone, Default)]
pub struct EffectiveCustomer {
    pub full_name: Option<String>,
    pub phone_number: Option<String>,
    pub id_number: Option<String>,
    pub billing_address: Option<String>,
    pub shipping_address: Option<String>,
    pub email: Option<String>,
    pub amount: Option<String>,
}

impl EffectiveCustomer {
    pub fn resolve(
        form: &FormState,
        profile: Option<&CustomerProfile>,
        draft: Option<&CheckoutDraft>,
    ) -> Self {
        let pick = |name: &str,
                    from_profile: fn(&CustomerProfile) -> &str,
                    from_draft: fn(&CheckoutDraft) -> Option<&String>| {
            form.value(name)
                .filter(|v| !v.trim().is_empty())
                .map(str::to_string)
                .or_else(|| profile.map(|p| from_profile(p).to_string()))
                .or_else(|| draft.and_then(|d| from_draft(d).cloned()))
        };

        Self {
            full_name: pick(fields::FULL_NAME, |p| &p.full_name, |d| d.full_name.as_ref()),
            phone_number: pick(
                fields::PHONE_NUMBER,
                |p| &p.phone_number,
                |d| d.phone_number.as_ref(),
            ),
            id_number: pick(fields::ID_NUMBER, |p| &p.id_number, |d| d.id_number.as_ref()),
            billing_address: pick(
                fields::BILLING_ADDRESS,
                |p| &p.billing_address,
                |d| d.billing_address.as_ref(),
            ),
            shipping_address: pick(
                fields::SHIPPING_ADDRESS,
                |p| &p.shipping_address,
                |d| d.shipping_address.as_ref(),
            ),
            email: pick(fields::EMAIL, |p| &p.email, |d| d.email.as_ref()),
            amount: pick(fields::AMOUNT, |p| &p.amount, |d| d.amount.as_ref()),
        }
    }

    /// Phone in full wire form, when any shape supplied one.
    pub fn full_phone(&self) -> Option<String> {
        self.phone_number
            .as_ref()
            .map(|local| format!("{COUNTRY_CODE}{local}"))
    }
}
