//! Booking payment status commands.

use clap::{Args, Subcommand};
use serde_json::json;
use uuid::Uuid;

use wanderwise_core::error::AppError;

use crate::app::App;
use crate::output::{self, OutputFormat};

/// Arguments for payment commands
#[derive(Debug, Args)]
pub struct PaymentArgs {
    /// Payment subcommand
    #[command(subcommand)]
    pub command: PaymentCommand,
}

/// Payment subcommands
#[derive(Debug, Subcommand)]
pub enum PaymentCommand {
    /// Display state of an itinerary booking
    Status {
        /// Itinerary booking ID
        id: Uuid,
    },
    /// Whether the ledger holds a completed payment for a booking
    IsPaid {
        /// Booking or itinerary booking ID
        id: Option<Uuid>,
    },
}

/// Execute payment commands
pub async fn execute(app: &App, args: &PaymentArgs, format: OutputFormat) -> Result<(), AppError> {
    app.session.context().await.require_principal()?;

    match &args.command {
        PaymentCommand::Status { id } => {
            let state = app.payments.resolve(*id).await?;
            match format {
                OutputFormat::Json => output::print_json(&json!({ "id": id, "state": state })),
                OutputFormat::Table => output::print_kv("Payment state", state.as_str()),
            }
        }
        PaymentCommand::IsPaid { id } => {
            let paid = app.payments.is_paid(*id).await;
            match format {
                OutputFormat::Json => output::print_json(&json!({ "id": id, "paid": paid })),
                OutputFormat::Table => output::print_kv("Paid", if paid { "yes" } else { "no" }),
            }
        }
    }
    Ok(())
}
