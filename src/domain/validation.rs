use once_cell::sync::Lazy;
use regex::Regex;
use rust_decimal::Decimal;
use std::str::FromStr;

/// Fixed locale country code prefixed to full-form phone numbers.
pub const COUNTRY_CODE: &str = "58";

static PHONE_FULL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^58\d{10}$").unwrap());
static PHONE_LOCAL: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{10}$").unwrap());
static NATIONAL_ID: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^[VEJGP]\d{7,9}$").unwrap());
static BANK_CODE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4}$").unwrap());
static PURCHASE_KEY: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d{4,8}$").unwrap());
static AMOUNT: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\d+(\.\d{1,2})?$").unwrap());
static EMAIL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[\w.+-]+@([\w-]+\.)+[\w-]{2,}$").unwrap());

/// Syntactic rule applied to a single form field.
///
/// Rules are hard-coded for one locale (Venezuelan phone, id and bank formats).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Country code plus 10 digits, e.g. `584141234567`.
    PhoneFull,
    /// 10 digits without the country code.
    PhoneLocal,
    /// Cedula/RIF: a type letter followed by 7 to 9 digits, e.g. `V12345678`.
    NationalId,
    /// 4-digit bank code, e.g. `0105`.
    BankCode,
    /// One-time purchase authorization key, 4 to 8 digits.
    PurchaseKey,
    /// Positive decimal with at most 2 fractional digits.
    Amount,
    Email,
    /// Free text, required non-empty after trimming.
    Required,
}

/// Validates a raw field value against its rule.
///
/// Returns `None` when the value is valid, or the user-facing error message.
/// Deterministic and side-effect free; an empty string always fails.
pub fn validate(kind: FieldKind, value: &str) -> Option<&'static str> {
    match kind {
        FieldKind::PhoneFull => {
            (!PHONE_FULL.is_match(value)).then_some("invalid phone format")
        }
        FieldKind::PhoneLocal => {
            (!PHONE_LOCAL.is_match(value)).then_some("must be a 10-digit phone number")
        }
        FieldKind::NationalId => (!NATIONAL_ID.is_match(value)).then_some("invalid ID format"),
        FieldKind::BankCode => {
            (!BANK_CODE.is_match(value)).then_some("must be a 4-digit bank code")
        }
        FieldKind::PurchaseKey => {
            (!PURCHASE_KEY.is_match(value)).then_some("must be a numeric key of 4 to 8 digits")
        }
        FieldKind::Amount => {
            let positive = Decimal::from_str(value)
                .map(|d| d > Decimal::ZERO)
                .unwrap_or(false);
            (!AMOUNT.is_match(value) || !positive)
                .then_some("must be a positive amount with up to 2 decimals")
        }
        FieldKind::Email => {
            (!EMAIL.is_match(value)).then_some("must be a valid email address")
        }
        FieldKind::Required => value.trim().is_empty().then_some("this field is required"),
    }
}
