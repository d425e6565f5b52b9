use assert_cmd::cargo_bin;
use assert_cmd::prelude::*;
use predicates::prelude::*;
use std::io::Write;
use std::process::Command;
use tempfile::NamedTempFile;

#[test]
fn test_incomplete_form_is_rejected_before_any_request() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "step, field, value").unwrap();
    writeln!(file, "payment, amount, 150.00").unwrap();
    writeln!(file, "payment, c2pPhone, 584142591177").unwrap();
    // purchaseKey and the destination fields are never provided

    let mut cmd = Command::new(cargo_bin!("c2p-checkout"));
    // The gateway must never be contacted, so a dead address is fine
    cmd.arg(file.path()).arg("--gateway-url").arg("http://127.0.0.1:9");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("missing or invalid fields"))
        .stderr(predicate::str::contains("purchaseKey"));
}

#[test]
fn test_invalid_field_value_is_reported() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "step, field, value").unwrap();
    writeln!(file, "payment, amount, 150.00").unwrap();
    writeln!(file, "payment, c2pPhone, 584142591177").unwrap();
    writeln!(file, "payment, c2pId, X99").unwrap();
    writeln!(file, "payment, c2pBank, 0105").unwrap();
    writeln!(file, "payment, destMobile, 584241513063").unwrap();
    writeln!(file, "payment, purchaseKey, 1234").unwrap();

    let mut cmd = Command::new(cargo_bin!("c2p-checkout"));
    cmd.arg(file.path()).arg("--gateway-url").arg("http://127.0.0.1:9");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("invalid ID format"));
}

#[test]
fn test_unknown_field_is_skipped_with_warning() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "step, field, value").unwrap();
    writeln!(file, "payment, cardNumber, 4111111111111111").unwrap();

    let mut cmd = Command::new(cargo_bin!("c2p-checkout"));
    cmd.arg(file.path()).arg("--gateway-url").arg("http://127.0.0.1:9");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("Error applying input"));
}

#[test]
fn test_order_summary_shows_resolved_customer_before_payment() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "step, field, value").unwrap();
    writeln!(file, "identity, fullName, Juan Pérez").unwrap();
    writeln!(file, "identity, phoneNumber, 4141234567").unwrap();
    writeln!(file, "identity, idNumber, V-12345678").unwrap();
    writeln!(file, "identity, billingAddress, Av. Principal").unwrap();
    writeln!(file, "identity, shippingAddress, Calle Y").unwrap();
    writeln!(file, "identity, email, correo@ejemplo.com").unwrap();
    writeln!(file, "identity, amount, 150.00").unwrap();
    writeln!(file, "payment, amount, 150.00").unwrap();
    writeln!(file, "payment, c2pPhone, 584142591177").unwrap();
    writeln!(file, "payment, c2pId, V18367443").unwrap();
    writeln!(file, "payment, c2pBank, 0105").unwrap();
    writeln!(file, "payment, destMobile, 584241513063").unwrap();
    writeln!(file, "payment, purchaseKey, 1234").unwrap();

    let mut cmd = Command::new(cargo_bin!("c2p-checkout"));
    cmd.arg(file.path()).arg("--gateway-url").arg("http://127.0.0.1:9");

    // The summary is printed from the persisted profile before the gateway
    // is contacted, so it survives the transport failure
    cmd.assert()
        .failure()
        .stdout(predicate::str::contains("customer,Juan Pérez"))
        .stdout(predicate::str::contains("customerPhone,584141234567"))
        .stdout(predicate::str::contains("customerEmail,correo@ejemplo.com"))
        .stdout(predicate::str::contains("billingAddress,Av. Principal"))
        .stderr(predicate::str::contains("could not reach the payment service"));
}

#[test]
fn test_unreachable_gateway_reports_transport_failure() {
    let mut file = NamedTempFile::new().unwrap();
    writeln!(file, "step, field, value").unwrap();
    writeln!(file, "payment, amount, 150.00").unwrap();
    writeln!(file, "payment, c2pPhone, 584142591177").unwrap();
    writeln!(file, "payment, c2pId, V18367443").unwrap();
    writeln!(file, "payment, c2pBank, 0105").unwrap();
    writeln!(file, "payment, destMobile, 584241513063").unwrap();
    writeln!(file, "payment, purchaseKey, 1234").unwrap();

    let mut cmd = Command::new(cargo_bin!("c2p-checkout"));
    // Nothing listens here; the submission fails at the transport layer
    cmd.arg(file.path()).arg("--gateway-url").arg("http://127.0.0.1:9");

    cmd.assert()
        .failure()
        .stderr(predicate::str::contains("could not reach the payment service"));
}
