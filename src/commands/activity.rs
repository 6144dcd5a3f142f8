//! Activity feed commands.

use clap::{Args, Subcommand};
use serde::Serialize;
use tabled::Tabled;

use wanderwise_core::error::AppError;
use wanderwise_entity::activity::ActivityItem;

use crate::app::App;
use crate::output::{self, OutputFormat};

/// Arguments for activity commands
#[derive(Debug, Args)]
pub struct ActivityArgs {
    /// Activity subcommand
    #[command(subcommand)]
    pub command: ActivityCommand,
}

/// Activity subcommands
#[derive(Debug, Subcommand)]
pub enum ActivityCommand {
    /// Most recent activities
    Recent {
        /// Number of items (defaults to `activity.default_limit`)
        #[arg(short, long)]
        limit: Option<usize>,
    },
    /// Every activity
    All,
}

/// Activity display row for table output
#[derive(Debug, Serialize, Tabled)]
struct ActivityRow {
    /// When
    when: String,
    /// Type
    #[tabled(rename = "type")]
    kind: String,
    /// Title
    title: String,
    /// Description
    description: String,
}

impl From<&ActivityItem> for ActivityRow {
    fn from(item: &ActivityItem) -> Self {
        Self {
            when: item.formatted_date.clone(),
            kind: match item.booking_kind() {
                Some(kind) => format!("{} ({kind})", item.activity_type),
                None => item.activity_type.to_string(),
            },
            title: item.title.clone(),
            description: item.description.clone(),
        }
    }
}

/// Execute activity commands
pub async fn execute(app: &App, args: &ActivityArgs, format: OutputFormat) -> Result<(), AppError> {
    let ctx = app.session.context().await;

    let items = match &args.command {
        ActivityCommand::Recent { limit } => {
            let limit = limit.unwrap_or(app.config.activity.default_limit);
            app.activity.recent_for(&ctx, limit).await?
        }
        ActivityCommand::All => app.activity.all_for(&ctx).await?,
    };

    match format {
        OutputFormat::Json => output::print_json(&items),
        OutputFormat::Table => {
            let rows: Vec<ActivityRow> = items.iter().map(ActivityRow::from).collect();
            output::print_list(&rows, format, "No recent activity.");
        }
    }
    Ok(())
}
