use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use std::path::PathBuf;
use tracing::info;

use super::bootstrap::open_app_state;
use super::error::CliError;
use super::output;
use super::state::AppState;
use crate::application::dtos::{FootprintDto, LeaderboardEntryDto, UserDto};
use crate::application::services::{ConfigService, LogLevel};
use crate::application::utils::ResultExt;
use hydroprint_domain::footprint::{
    calculate, HouseholdContext, InputField, UsageInputs, DEFAULT_INPUTS,
};
use hydroprint_domain::shared::{DomainError, UserId};

#[derive(Parser, Debug)]
#[command(name = "hydroprint")]
#[command(version, about = "Personal water footprint calculator and daily log")]
pub struct Cli {
    /// Print machine-readable JSON instead of text
    #[arg(long, global = true, default_value_t = false)]
    pub json: bool,
    /// Database file, overriding the configured one
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Calculate a footprint from flags alone, without touching the database
    Calc {
        #[command(flatten)]
        inputs: InputArgs,
        #[arg(long, allow_hyphen_values = true)]
        household: Option<i64>,
        /// Print the plain-text summary used as chat context
        #[arg(long, default_value_t = false)]
        summary: bool,
    },
    User {
        #[command(subcommand)]
        command: UserCommand,
    },
    /// Show the dashboard, optionally with unsaved edits applied
    Show {
        #[arg(long)]
        user: String,
        #[command(flatten)]
        inputs: InputArgs,
    },
    /// Apply edits; a submitted period they touch becomes open again
    Set {
        #[arg(long)]
        user: String,
        #[command(flatten)]
        inputs: InputArgs,
    },
    /// Set the household size, or clear it when SIZE is omitted
    Household {
        #[arg(long)]
        user: String,
        #[arg(allow_hyphen_values = true)]
        size: Option<i64>,
    },
    SubmitDaily {
        #[arg(long)]
        user: String,
        #[command(flatten)]
        inputs: InputArgs,
    },
    SubmitWeekly {
        #[arg(long)]
        user: String,
        #[command(flatten)]
        inputs: InputArgs,
    },
    Streak {
        #[arg(long)]
        user: String,
    },
    Leaderboard {
        #[arg(long, default_value_t = 10)]
        limit: usize,
        /// Show only this user's rank
        #[arg(long)]
        user: Option<String>,
    },
    Trend {
        #[arg(long)]
        user: String,
        #[arg(long, default_value_t = 7)]
        days: u32,
    },
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
pub enum UserCommand {
    Create {
        #[arg(long)]
        name: String,
        #[arg(long, allow_hyphen_values = true)]
        household: Option<i64>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    Show,
    SetLogLevel { level: LogLevel },
}

/// One optional flag per input counter
#[derive(Args, Debug, Default, Clone)]
pub struct InputArgs {
    #[arg(long)]
    pub shower_minutes: Option<u32>,
    #[arg(long)]
    pub baths: Option<u32>,
    #[arg(long)]
    pub faucet_minutes: Option<u32>,
    #[arg(long)]
    pub flushes: Option<u32>,
    #[arg(long)]
    pub laundry_loads: Option<u32>,
    #[arg(long)]
    pub dishwasher_loads: Option<u32>,
    #[arg(long)]
    pub garden_minutes: Option<u32>,
    #[arg(long)]
    pub meat_meals: Option<u32>,
    #[arg(long)]
    pub new_clothing_items: Option<u32>,
    #[arg(long)]
    pub miles_driven: Option<u32>,
    #[arg(long)]
    pub recycling_items: Option<u32>,
    #[arg(long)]
    pub compost_lbs: Option<u32>,
    #[arg(long)]
    pub ai_queries: Option<u32>,
}

impl InputArgs {
    /// Edits in field order, only for the flags that were given
    pub fn edits(&self) -> Vec<(InputField, u32)> {
        let values = [
            (InputField::ShowerMinutes, self.shower_minutes),
            (InputField::Baths, self.baths),
            (InputField::FaucetMinutes, self.faucet_minutes),
            (InputField::Flushes, self.flushes),
            (InputField::LaundryLoads, self.laundry_loads),
            (InputField::DishwasherLoads, self.dishwasher_loads),
            (InputField::GardenMinutes, self.garden_minutes),
            (InputField::MeatMeals, self.meat_meals),
            (InputField::NewClothingItems, self.new_clothing_items),
            (InputField::MilesDriven, self.miles_driven),
            (InputField::RecyclingItems, self.recycling_items),
            (InputField::CompostLbs, self.compost_lbs),
            (InputField::AiQueries, self.ai_queries),
        ];
        values
            .into_iter()
            .filter_map(|(field, value)| value.map(|v| (field, v)))
            .collect()
    }

    pub fn apply_to(&self, mut base: UsageInputs) -> UsageInputs {
        for (field, value) in self.edits() {
            base.set(field, value);
        }
        base
    }
}

/// Run one parsed command and return what should be printed
pub async fn run(cli: Cli, config: &ConfigService) -> Result<String, CliError> {
    let json = cli.json;
    match cli.command {
        Commands::Calc {
            inputs,
            household,
            summary,
        } => {
            let result = calculate(
                &inputs.apply_to(DEFAULT_INPUTS),
                &HouseholdContext {
                    household_size: household,
                },
            );
            if summary && !json {
                return Ok(result.summary_text());
            }
            render(json, &FootprintDto::from(&result), output::footprint)
        }
        Commands::Config { command } => run_config(command, config, cli.db, json),
        command => {
            let state = open_app_state(config, cli.db.as_deref()).await?;
            execute(command, &state, json).await
        }
    }
}

/// Commands that need the database
pub async fn execute(command: Commands, state: &AppState, json: bool) -> Result<String, CliError> {
    let dashboard = &state.services.dashboard;

    match command {
        Commands::User {
            command: UserCommand::Create { name, household },
        } => {
            let profile = dashboard.register_user(name, household).await?;
            render(json, &UserDto::from(&profile), output::user)
        }
        Commands::Show { user, inputs } => {
            let mut session = dashboard.load(&UserId::from_string(&user)).await?;
            // Preview only; nothing is written
            for (field, value) in inputs.edits() {
                dashboard.update_input(&mut session, field, value);
            }
            render(json, &dashboard.dashboard(&session), output::dashboard)
        }
        Commands::Set { user, inputs } => {
            let mut session = dashboard.load(&UserId::from_string(&user)).await?;
            dashboard.apply_edits(&mut session, &inputs.edits()).await?;
            render(json, &dashboard.dashboard(&session), output::dashboard)
        }
        Commands::Household { user, size } => {
            let mut session = dashboard.load(&UserId::from_string(&user)).await?;
            dashboard.set_household_size(&mut session, size).await?;
            render(json, &dashboard.dashboard(&session), output::dashboard)
        }
        Commands::SubmitDaily { user, inputs } => {
            let mut session = dashboard.load(&UserId::from_string(&user)).await?;
            dashboard.apply_edits(&mut session, &inputs.edits()).await?;
            let receipt = dashboard.submit_daily(&mut session).await?;
            render(json, &receipt, output::daily_receipt)
        }
        Commands::SubmitWeekly { user, inputs } => {
            let mut session = dashboard.load(&UserId::from_string(&user)).await?;
            dashboard.apply_edits(&mut session, &inputs.edits()).await?;
            let receipt = dashboard.submit_weekly(&mut session).await?;
            render(json, &receipt, output::weekly_receipt)
        }
        Commands::Streak { user } => {
            let stats = state.queries.streak.stats(&UserId::from_string(&user)).await?;
            render(json, &stats, output::streak)
        }
        Commands::Leaderboard { limit, user } => {
            let entries: Vec<LeaderboardEntryDto> = match user {
                Some(user) => state
                    .queries
                    .leaderboard
                    .rank_of(&UserId::from_string(&user))
                    .await?
                    .into_iter()
                    .collect(),
                None => state.queries.leaderboard.top(limit).await?,
            };
            render(json, &entries, |e| output::leaderboard(e))
        }
        Commands::Trend { user, days } => {
            let trend = state
                .queries
                .trend
                .trend(&UserId::from_string(&user), days)
                .await?;
            render(json, &trend, output::trend)
        }
        Commands::Calc { .. } | Commands::Config { .. } => Err(DomainError::InvalidInput(
            "command does not use the database".to_string(),
        )
        .into()),
    }
}

fn run_config(
    command: ConfigCommand,
    config: &ConfigService,
    database_override: Option<PathBuf>,
    json: bool,
) -> Result<String, CliError> {
    if let ConfigCommand::SetLogLevel { level } = command {
        config.set_log_level(level)?;
        info!("Log level set to {}", level.as_str());
    }

    let current = config.config();
    let database_path = database_override.unwrap_or_else(|| config.database_path());
    if json {
        return Ok(serde_json::to_string_pretty(&current).to_serialization_err()?);
    }
    Ok(output::config(
        &current,
        &config.config_path().to_string_lossy(),
        &database_path.to_string_lossy(),
    ))
}

fn render<T: Serialize>(
    json: bool,
    value: &T,
    text: impl FnOnce(&T) -> String,
) -> Result<String, CliError> {
    if json {
        Ok(serde_json::to_string_pretty(value).to_serialization_err()?)
    } else {
        Ok(text(value))
    }
}
