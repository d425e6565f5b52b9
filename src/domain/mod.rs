pub mod form;
pub mod payment;
pub mod ports;
pub mod profile;
pub mod validation;
