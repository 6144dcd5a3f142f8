//! Profile and password commands.

use clap::{Args, Subcommand};

use wanderwise_core::error::AppError;
use wanderwise_entity::user::{Gender, ProfileUpdate};

use super::{account, auth_failure, prompt_password};
use crate::app::App;
use crate::output::{self, OutputFormat};

/// Arguments for profile commands
#[derive(Debug, Args)]
pub struct ProfileArgs {
    /// Profile subcommand
    #[command(subcommand)]
    pub command: ProfileCommand,
}

/// Profile subcommands
#[derive(Debug, Subcommand)]
pub enum ProfileCommand {
    /// Change profile fields. Omitted fields are left as they are.
    Update {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        bio: Option<String>,
        #[arg(long)]
        avatar_url: Option<String>,
        /// Comma-separated list
        #[arg(long, value_delimiter = ',')]
        languages: Option<Vec<String>>,
        #[arg(long)]
        experience: Option<String>,
        /// male, female, non_binary or prefer_not_to_say
        #[arg(long)]
        gender: Option<String>,
    },
}

/// Execute profile commands
pub async fn execute(app: &App, args: &ProfileArgs, format: OutputFormat) -> Result<(), AppError> {
    match &args.command {
        ProfileCommand::Update {
            first_name,
            last_name,
            phone,
            location,
            bio,
            avatar_url,
            languages,
            experience,
            gender,
        } => {
            let gender = match gender {
                Some(g) => Some(
                    Gender::parse(g)
                        .ok_or_else(|| AppError::validation(format!("Unknown gender '{g}'")))?,
                ),
                None => None,
            };
            let update = ProfileUpdate {
                first_name: first_name.clone(),
                last_name: last_name.clone(),
                phone: phone.clone(),
                location: location.clone(),
                bio: bio.clone(),
                avatar_url: avatar_url.clone(),
                languages: languages.clone(),
                experience: experience.clone(),
                date_of_birth: None,
                gender,
            };
            if update.is_empty() {
                output::print_warning("Nothing to update");
                return Ok(());
            }

            app.session.context().await.require_principal()?;
            if !app.session.update_profile(&update).await {
                return Err(AppError::service_unavailable("Profile could not be updated"));
            }

            output::print_success("Profile updated");
            if let Some(principal) = app.session.current_user().await {
                account::print_principal(&principal, format);
            }
        }
    }
    Ok(())
}

/// Change the password of the signed-in principal.
pub async fn change_password(app: &App) -> Result<(), AppError> {
    app.session.context().await.require_principal()?;

    let current = prompt_password("Current password")?;
    let new = dialoguer::Password::new()
        .with_prompt("New password")
        .with_confirmation("Repeat new password", "Passwords do not match")
        .interact()
        .map_err(|e| AppError::internal(format!("Input error: {e}")))?;

    app.session
        .update_password(&current, &new)
        .await
        .map_err(auth_failure)?;

    output::print_success("Password changed");
    Ok(())
}
