//! Sign-in, registration and session inspection commands.

use clap::Args;

use wanderwise_core::error::AppError;
use wanderwise_entity::user::{Principal, Registration, UserRole};

use super::{auth_failure, prompt_password};
use crate::app::App;
use crate::output::{self, OutputFormat};

/// Arguments for `login`
#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Account email
    pub email: String,
    /// Password (prompted when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

/// Arguments for `register`
#[derive(Debug, Args)]
pub struct RegisterArgs {
    /// Account email
    #[arg(long)]
    pub email: String,
    /// Public handle
    #[arg(long)]
    pub username: String,
    /// First name
    #[arg(long)]
    pub first_name: String,
    /// Last name
    #[arg(long)]
    pub last_name: String,
    /// Role: traveler or tour_guide
    #[arg(long, default_value = "traveler")]
    pub role: String,
    /// Phone number
    #[arg(long)]
    pub phone: Option<String>,
    /// Password (prompted when omitted)
    #[arg(long)]
    pub password: Option<String>,
}

/// Sign in and persist the session.
pub async fn login(app: &App, args: &LoginArgs, format: OutputFormat) -> Result<(), AppError> {
    let password = match &args.password {
        Some(p) => p.clone(),
        None => prompt_password("Password")?,
    };

    let principal = app
        .session
        .login(&args.email, &password)
        .await
        .map_err(auth_failure)?;

    output::print_success(&format!("Signed in as {}", principal.display_name()));
    print_principal(&principal, format);
    Ok(())
}

/// Create an account and sign in.
pub async fn register(
    app: &App,
    args: &RegisterArgs,
    format: OutputFormat,
) -> Result<(), AppError> {
    let role: UserRole = args.role.parse()?;
    if role.is_admin() {
        return Err(AppError::validation("Admin accounts cannot be self-registered"));
    }

    let password = match &args.password {
        Some(p) => p.clone(),
        None => dialoguer::Password::new()
            .with_prompt("Password")
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()
            .map_err(|e| AppError::internal(format!("Input error: {e}")))?,
    };

    let registration = Registration {
        email: args.email.clone(),
        username: args.username.clone(),
        password,
        first_name: args.first_name.clone(),
        last_name: args.last_name.clone(),
        role,
        phone: args.phone.clone(),
        date_of_birth: None,
        gender: None,
    };

    match app.session.register(&registration).await {
        Ok(principal) => {
            output::print_success(&format!("Welcome, {}", principal.display_name()));
            print_principal(&principal, format);
            Ok(())
        }
        Err(e) => {
            for message in e.messages() {
                output::print_warning(&message);
            }
            Err(auth_failure(e))
        }
    }
}

/// Sign out.
pub async fn logout(app: &App) -> Result<(), AppError> {
    if !app.session.is_logged_in().await {
        output::print_warning("Not signed in");
        return Ok(());
    }
    app.session.logout().await;
    output::print_success("Signed out");
    Ok(())
}

/// Show the signed-in principal and when the session lapses.
pub async fn whoami(app: &App, format: OutputFormat) -> Result<(), AppError> {
    let ctx = app.session.context().await;
    match format {
        OutputFormat::Json => output::print_json(&ctx),
        OutputFormat::Table => {
            let principal = ctx.require_principal()?;
            print_principal(principal, format);
            if let Some(expires_at) = ctx.expires_at {
                let expires_at = expires_at.format("%Y-%m-%d %H:%M UTC").to_string();
                output::print_kv("Session expires", &expires_at);
            }
        }
    }
    Ok(())
}

pub(crate) fn print_principal(principal: &Principal, format: OutputFormat) {
    match format {
        OutputFormat::Json => output::print_json(principal),
        OutputFormat::Table => {
            output::print_kv("ID", &principal.id.to_string());
            output::print_kv("Name", &principal.display_name());
            output::print_kv("Username", &principal.username);
            output::print_kv("Email", &principal.email);
            output::print_kv("Role", principal.role.as_str());
            if let Some(location) = &principal.profile.location {
                output::print_kv("Location", location);
            }
            if !principal.profile.languages.is_empty() {
                output::print_kv("Languages", &principal.profile.languages.join(", "));
            }
        }
    }
}
