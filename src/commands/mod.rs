//! CLI command definitions and dispatch.

pub mod account;
pub mod activity;
pub mod migrate;
pub mod payment;
pub mod profile;

use clap::{Parser, Subcommand};
use tracing::debug;

use wanderwise_auth::AuthError;
use wanderwise_core::config::AppConfig;
use wanderwise_core::error::AppError;

use crate::app::App;
use crate::output::OutputFormat;

/// WanderWise: sessions, activity feed and payment status
#[derive(Debug, Parser)]
#[command(name = "wanderwise", version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, default_value = "config/default.toml")]
    pub config: String,

    /// Output format
    #[arg(short, long, value_enum, default_value = "table")]
    pub format: OutputFormat,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Top-level commands
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in
    Login(account::LoginArgs),
    /// Create an account and sign in
    Register(account::RegisterArgs),
    /// Sign out and clear the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Profile management
    Profile(profile::ProfileArgs),
    /// Change the password
    Password,
    /// Recent activity feed
    Activity(activity::ActivityArgs),
    /// Booking payment status
    Payment(payment::PaymentArgs),
    /// Apply database migrations
    Migrate,
}

impl Cli {
    /// Execute the CLI command.
    ///
    /// The stored session is restored first. A command that succeeds counts
    /// as user activity and refreshes the session timestamp.
    pub async fn execute(&self, config: AppConfig) -> Result<(), AppError> {
        let app = App::build(config).await?;
        app.session.initialize().await;

        let result = match &self.command {
            Commands::Login(args) => account::login(&app, args, self.format).await,
            Commands::Register(args) => account::register(&app, args, self.format).await,
            Commands::Logout => account::logout(&app).await,
            Commands::Whoami => account::whoami(&app, self.format).await,
            Commands::Profile(args) => profile::execute(&app, args, self.format).await,
            Commands::Password => profile::change_password(&app).await,
            Commands::Activity(args) => activity::execute(&app, args, self.format).await,
            Commands::Payment(args) => payment::execute(&app, args, self.format).await,
            Commands::Migrate => migrate::execute(&app).await,
        };

        if result.is_ok() && app.session.record_activity().await {
            debug!("Session activity recorded");
        }

        app.session.shutdown();
        app.db.close().await;
        result
    }
}

/// Map a session failure to the CLI error type, keeping its message.
pub fn auth_failure(err: AuthError) -> AppError {
    match err {
        AuthError::InvalidCredentials | AuthError::NotLoggedIn => {
            AppError::authentication(err.to_string())
        }
        AuthError::Validation(_) => AppError::validation(err.to_string()),
        AuthError::Unsupported(_) => AppError::not_implemented(err.to_string()),
        AuthError::Unavailable => AppError::service_unavailable(err.to_string()),
    }
}

/// Prompt for a secret without echoing it.
pub fn prompt_password(prompt: &str) -> Result<String, AppError> {
    dialoguer::Password::new()
        .with_prompt(prompt)
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))
}
