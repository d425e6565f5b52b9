use c2p_checkout::application::controller::{CheckoutController, SubmitOutcome};
use c2p_checkout::application::identity::IdentityStep;
use c2p_checkout::application::receipt::{ReceiptState, ReceiptViewModel};
use c2p_checkout::infrastructure::http::HttpGateway;
use c2p_checkout::infrastructure::in_memory::InMemorySessionStore;
use c2p_checkout::interfaces::csv::input_reader::{InputReader, Step};
use clap::Parser;
use miette::{IntoDiagnostic, Result, miette};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Input CSV of field edits (step, field, value)
    input: PathBuf,

    /// Base URL of the payment gateway
    #[arg(long)]
    gateway_url: String,

    /// Entry-point metadata forwarded with the payment request
    #[arg(long)]
    origin: Option<String>,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    // One session shared by both steps, as separate page loads would share it
    let session = InMemorySessionStore::new();
    let mut identity = IdentityStep::new(Box::new(session.clone()));
    let mut controller = CheckoutController::new(
        Box::new(session),
        Box::new(HttpGateway::new(&cli.gateway_url)),
    );
    if let Some(origin) = cli.origin {
        controller.set_origin(origin);
    }

    // Replay the recorded field edits into the step forms
    let file = File::open(&cli.input).into_diagnostic()?;
    let reader = InputReader::new(file);
    let mut saw_identity = false;
    for input_result in reader.inputs() {
        match input_result {
            Ok(input) => {
                let applied = match input.step {
                    Step::Identity => {
                        saw_identity = true;
                        identity.set_field(&input.field, &input.value)
                    }
                    Step::Payment => controller.set_field(&input.field, &input.value),
                };
                if let Err(e) = applied {
                    eprintln!("Error applying input: {e}");
                }
            }
            Err(e) => {
                eprintln!("Error reading input: {e}");
            }
        }
    }

    if saw_identity {
        identity.submit().await.into_diagnostic()?;
    }

    // Order summary from the resolved customer view, shown before payment
    let customer = controller.effective_customer().await.into_diagnostic()?;
    if let Some(name) = &customer.full_name {
        println!("customer,{name}");
    }
    if let Some(phone) = customer.full_phone() {
        println!("customerPhone,{phone}");
    }
    if let Some(id_number) = &customer.id_number {
        println!("customerId,{id_number}");
    }
    if let Some(email) = &customer.email {
        println!("customerEmail,{email}");
    }
    if let Some(billing) = &customer.billing_address {
        println!("billingAddress,{billing}");
    }
    if let Some(shipping) = &customer.shipping_address {
        println!("shippingAddress,{shipping}");
    }

    match controller.submit().await.into_diagnostic()? {
        SubmitOutcome::Completed { transaction_id } => {
            let mut receipt =
                ReceiptViewModel::new(Box::new(HttpGateway::new(&cli.gateway_url)));
            receipt.load(&transaction_id).await;
            match receipt.state() {
                ReceiptState::Loaded(record) => {
                    println!("transaction,{}", record.internal_id);
                    println!("status,{}", record.status);
                    if let Some(amount) = receipt.amount() {
                        println!("amount,{amount}");
                    }
                    if let Some(phone) = receipt.origin_phone() {
                        println!("originPhone,{phone}");
                    }
                    if let Some(reference) = receipt.bank_reference() {
                        println!("bankReference,{reference}");
                    }
                    if let Some(created_at) = receipt.created_at() {
                        println!("createdAt,{}", created_at.to_rfc3339());
                    }
                    Ok(())
                }
                ReceiptState::NotFound => Err(miette!(
                    "transaction {transaction_id} was accepted but its receipt was not found"
                )),
                ReceiptState::Unreachable { message } => Err(miette!("{message}")),
                ReceiptState::Loading => Err(miette!("receipt retrieval did not settle")),
            }
        }
        SubmitOutcome::Redirect(url) => {
            println!("redirect,{url}");
            Ok(())
        }
        SubmitOutcome::Abandoned => Ok(()),
    }
}
