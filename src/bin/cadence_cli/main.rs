// ABOUTME: Command-line interface for migrating, seeding, analyzing, and tracking goals
// ABOUTME: Prints JSON on stdout; logs go to stderr
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Usage:
//! ```bash
//! # Create tables
//! cargo run --bin cadence-cli -- migrate
//!
//! # Seed 60 days of synthetic journal data for a new user
//! cargo run --bin cadence-cli -- seed --days 60
//!
//! # Run pattern analysis and show the latest patterns
//! cargo run --bin cadence-cli -- analyze --user-id <uuid>
//! cargo run --bin cadence-cli -- patterns --user-id <uuid>
//!
//! # Goals
//! cargo run --bin cadence-cli -- goal create --user-id <uuid> --title "Squat 140kg" \
//!     --metric fitness_test.1rm_back_squat --target 140 --current 120 --deadline-days 90
//! cargo run --bin cadence-cli -- goal progress --goal-id <uuid> --value 127.5
//! cargo run --bin cadence-cli -- goal project --goal-id <uuid>
//! ```

mod commands;

use anyhow::Result;
use cadence::config::{DatabaseUrl, ServerConfig};
use cadence::database::Database;
use cadence::logging::LoggingConfig;
use clap::{Parser, Subcommand};
use tracing::info;
use uuid::Uuid;

#[derive(Parser)]
#[command(
    name = "cadence-cli",
    about = "Cadence training signal analysis",
    long_about = "Seed, analyze, and inspect training journal data. Pattern analysis reports correlations between signals; goal probabilities are a pace heuristic."
)]
struct CliArgs {
    #[command(subcommand)]
    command: Command,

    /// Database URL override (defaults to `DATABASE_URL`)
    #[arg(long)]
    database_url: Option<String>,

    /// Enable debug logging
    #[arg(long, short = 'v')]
    verbose: bool,
}

#[derive(Subcommand)]
enum Command {
    /// Create all tables and indexes
    Migrate,

    /// Insert synthetic journal entries and run one analysis
    Seed {
        /// User to seed (a new id is generated when omitted)
        #[arg(long)]
        user_id: Option<Uuid>,

        /// Number of days of entries ending today
        #[arg(long, default_value = "60")]
        days: u32,

        /// Random seed for reproducible data
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Run pattern analysis for a user
    Analyze {
        /// User to analyze
        #[arg(long)]
        user_id: Uuid,
    },

    /// Show the patterns of a user's latest analysis run
    Patterns {
        /// User to inspect
        #[arg(long)]
        user_id: Uuid,
    },

    /// Goal management
    Goal {
        #[command(subcommand)]
        action: GoalCommand,
    },
}

#[derive(Subcommand)]
enum GoalCommand {
    /// Create a goal and compute its initial projection
    Create {
        /// Owning user
        #[arg(long)]
        user_id: Uuid,

        /// Display title
        #[arg(long)]
        title: String,

        /// Tracked metric (e.g. `body_weight_kg`)
        #[arg(long)]
        metric: String,

        /// Unit of the values
        #[arg(long)]
        unit: Option<String>,

        /// Value to reach
        #[arg(long, allow_negative_numbers = true)]
        target: f64,

        /// Starting value
        #[arg(long, allow_negative_numbers = true)]
        current: f64,

        /// Days until the deadline
        #[arg(long, default_value = "30")]
        deadline_days: i64,
    },

    /// Record a progress value and refresh the projection
    Progress {
        /// Goal to update
        #[arg(long)]
        goal_id: Uuid,

        /// Observed value
        #[arg(long, allow_negative_numbers = true)]
        value: f64,
    },

    /// Recompute the projection
    Project {
        /// Goal to project
        #[arg(long)]
        goal_id: Uuid,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = CliArgs::parse();

    let mut logging = LoggingConfig::for_cli();
    if args.verbose {
        logging.level = "debug".into();
    }
    logging.init()?;

    let mut config = ServerConfig::from_env()?;
    if let Some(url) = args.database_url.as_deref() {
        config.database.url = DatabaseUrl::parse_url(url)?;
    }
    info!("{}", config.summary());

    let database = Database::connect(&config.database.url.to_connection_string()).await?;
    if config.database.auto_migrate || matches!(args.command, Command::Migrate) {
        database.migrate().await?;
    }

    match args.command {
        Command::Migrate => commands::print_json(&serde_json::json!({
            "migrated": true,
            "database": config.database.url.to_string(),
        })),
        Command::Seed {
            user_id,
            days,
            seed,
        } => commands::seed::run(&database, &config.engine, user_id, days, seed).await,
        Command::Analyze { user_id } => {
            commands::analysis::analyze(&database, &config.engine, user_id).await
        }
        Command::Patterns { user_id } => {
            commands::analysis::patterns(&database, &config.engine, user_id).await
        }
        Command::Goal { action } => match action {
            GoalCommand::Create {
                user_id,
                title,
                metric,
                unit,
                target,
                current,
                deadline_days,
            } => {
                let request = commands::goal::CreateGoal {
                    user_id,
                    title,
                    metric,
                    unit,
                    target,
                    current,
                    deadline_days,
                };
                commands::goal::create(&database, &config.engine, request).await
            }
            GoalCommand::Progress { goal_id, value } => {
                commands::goal::progress(&database, &config.engine, goal_id, value).await
            }
            GoalCommand::Project { goal_id } => {
                commands::goal::project(&database, &config.engine, goal_id).await
            }
        },
    }
}
