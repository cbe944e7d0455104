pub mod commands;
pub mod context;
pub mod utils;

use clap::{Parser, Subcommand};
use serde::{Deserialize, Serialize};

use crate::config::ClientConfig;
use crate::error::GatewayError;
use context::CliContext;

#[derive(Parser)]
#[command(name = "hradmin")]
#[command(about = "hradmin CLI - Command-line client for the HR and education administration API")]
#[command(version)]
pub struct Cli {
    #[arg(long, global = true, help = "Output in human-readable text format")]
    pub text: bool,

    #[arg(long, global = true, help = "Output in JSON format")]
    pub json: bool,

    #[arg(long, global = true, help = "Backend origin, overrides HRADMIN_SERVER_URL")]
    pub server: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    #[command(about = "Sign in, sign out and password management")]
    Auth {
        #[command(subcommand)]
        cmd: commands::auth::AuthCommands,
    },

    #[command(about = "Employee management")]
    Emp {
        #[command(subcommand)]
        cmd: commands::emp::EmpCommands,
    },

    #[command(about = "Department management")]
    Dept {
        #[command(subcommand)]
        cmd: commands::dept::DeptCommands,
    },

    #[command(about = "Class management")]
    Clazz {
        #[command(subcommand)]
        cmd: commands::clazz::ClazzCommands,
    },

    #[command(about = "Student management")]
    Student {
        #[command(subcommand)]
        cmd: commands::student::StudentCommands,
    },

    #[command(about = "Activity log (admin only)")]
    Log {
        #[command(subcommand)]
        cmd: commands::log::LogCommands,
    },

    #[command(about = "Subjects, job titles and education levels")]
    Ref {
        #[command(subcommand)]
        cmd: commands::reference::RefCommands,
    },

    #[command(about = "Dashboard statistics")]
    Dash {
        #[command(subcommand)]
        cmd: commands::dash::DashCommands,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutputFormat {
    Text,
    Json,
}

impl OutputFormat {
    pub fn from_cli(cli: &Cli) -> Self {
        if cli.json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        }
    }
}

pub async fn run(cli: Cli) -> anyhow::Result<()> {
    let mut config = crate::config::config().clone();
    if let Some(server) = &cli.server {
        config.api.server_url = server.trim_end_matches('/').to_string();
    }
    run_with_config(cli, &config).await
}

pub async fn run_with_config(cli: Cli, config: &ClientConfig) -> anyhow::Result<()> {
    let output_format = OutputFormat::from_cli(&cli);
    let ctx = CliContext::new(config, output_format)?;

    let result = dispatch(cli.command, &ctx).await;
    if let (Err(e), OutputFormat::Json) = (&result, output_format) {
        let code = e.downcast_ref::<GatewayError>().map(GatewayError::error_code);
        utils::output_error(&output_format, &e.to_string(), code)?;
    }
    result
}

async fn dispatch(command: Commands, ctx: &CliContext) -> anyhow::Result<()> {
    match command {
        Commands::Auth { cmd } => commands::auth::handle(cmd, ctx).await,
        Commands::Emp { cmd } => commands::emp::handle(cmd, ctx).await,
        Commands::Dept { cmd } => commands::dept::handle(cmd, ctx).await,
        Commands::Clazz { cmd } => commands::clazz::handle(cmd, ctx).await,
        Commands::Student { cmd } => commands::student::handle(cmd, ctx).await,
        Commands::Log { cmd } => commands::log::handle(cmd, ctx).await,
        Commands::Ref { cmd } => commands::reference::handle(cmd, ctx).await,
        Commands::Dash { cmd } => commands::dash::handle(cmd, ctx).await,
    }
}
