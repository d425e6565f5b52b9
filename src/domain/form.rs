use crate::domain::validation::{FieldKind, validate};
use crate::error::{CheckoutError, Result};
use std::collections::HashMap;

/// Field names shared between the form registries and the wire payloads.
pub mod fields {
    pub const FULL_NAME: &str = "fullName";
    pub const PHONE_NUMBER: &str = "phoneNumber";
    pub const ID_NUMBER: &str = "idNumber";
    pub const BILLING_ADDRESS: &str = "billingAddress";
    pub const SHIPPING_ADDRESS: &str = "shippingAddress";
    pub const EMAIL: &str = "email";
    pub const AMOUNT: &str = "amount";
    pub const C2P_PHONE: &str = "c2pPhone";
    pub const C2P_ID: &str = "c2pId";
    pub const C2P_BANK: &str = "c2pBank";
    pub const DEST_MOBILE: &str = "destMobile";
    pub const PURCHASE_KEY: &str = "purchaseKey";
}

/// Holds the current values and per-field errors for one step of the flow.
///
/// The set of tracked fields is fixed at construction. A field that has never
/// been edited counts as missing, so `is_submittable` is false until every
/// tracked field holds a valid value.
#[derive(Debug, Clone)]
pub struct FormState {
    registry: Vec<(&'static str, FieldKind)>,
    values: HashMap<&'static str, String>,
    errors: HashMap<&'static str, &'static str>,
}

impl FormState {
    pub fn new(registry: &[(&'static str, FieldKind)]) -> Self {
        Self {
            registry: registry.to_vec(),
            values: HashMap::new(),
            errors: HashMap::new(),
        }
    }

    /// Registry for the identity-collection step.
    pub fn personal_data() -> Self {
        Self::new(&[
            (fields::FULL_NAME, FieldKind::Required),
            (fields::PHONE_NUMBER, FieldKind::PhoneLocal),
            (fields::ID_NUMBER, FieldKind::Required),
            (fields::BILLING_ADDRESS, FieldKind::Required),
            (fields::SHIPPING_ADDRESS, FieldKind::Required),
            (fields::EMAIL, FieldKind::Email),
            (fields::AMOUNT, FieldKind::Amount),
        ])
    }

    /// Registry for the C2P payment step.
    pub fn c2p_payment() -> Self {
        Self::new(&[
            (fields::AMOUNT, FieldKind::Amount),
            (fields::C2P_PHONE, FieldKind::PhoneFull),
            (fields::C2P_ID, FieldKind::NationalId),
            (fields::C2P_BANK, FieldKind::BankCode),
            (fields::DEST_MOBILE, FieldKind::PhoneFull),
            (fields::PURCHASE_KEY, FieldKind::PurchaseKey),
        ])
    }

    fn lookup(&self, name: &str) -> Option<(&'static str, FieldKind)> {
        self.registry.iter().copied().find(|(n, _)| *n == name)
    }

    pub fn tracks(&self, name: &str) -> bool {
        self.lookup(name).is_some()
    }

    /// Updates a field value and re-validates it.
    pub fn set_field(&mut self, name: &str, value: &str) -> Result<()> {
        let (key, kind) = self
            .lookup(name)
            .ok_or_else(|| CheckoutError::Validation(format!("unknown field: {name}")))?;
        self.values.insert(key, value.to_string());
        match validate(kind, value) {
            Some(message) => {
                self.errors.insert(key, message);
            }
            None => {
                self.errors.remove(key);
            }
        }
        Ok(())
    }

    /// Removes a field's value and error, forcing re-entry.
    pub fn clear_field(&mut self, name: &str) {
        if let Some((key, _)) = self.lookup(name) {
            self.values.remove(key);
            self.errors.remove(key);
        }
    }

    pub fn value(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn error(&self, name: &str) -> Option<&'static str> {
        self.errors.get(name).copied()
    }

    /// Current field errors, including tracked fields that were never edited.
    pub fn errors(&self) -> Vec<(&'static str, &'static str)> {
        self.registry
            .iter()
            .filter_map(|(name, _)| match self.errors.get(name) {
                Some(message) => Some((*name, *message)),
                None if self.is_missing(name) => Some((*name, "this field is required")),
                None => None,
            })
            .collect()
    }

    fn is_missing(&self, name: &str) -> bool {
        self.values
            .get(name)
            .map_or(true, |v| v.trim().is_empty())
    }

    /// True iff every tracked field is non-empty and no field has an error.
    ///
    /// Recomputed on every call; never cached.
    pub fn is_submittable(&self) -> bool {
        self.errors.is_empty() && self.registry.iter().all(|(name, _)| !self.is_missing(name))
    }

    /// Clears all values and errors, so reused state cannot resend stale input.
    pub fn reset(&mut self) {
        self.values.clear();
        self.errors.clear();
    }
}
