//! Application layer orchestrating the checkout flow.
//!
//! The flow runs as explicit state machines: the identity step persists the
//! customer profile to the session bridge, the submission controller drives a
//! single-flight payment against the gateway, and the receipt view-model
//! fetches the resulting transaction for display.

pub mod controller;
pub mod identity;
pub mod receipt;
