//! CLI Adapter.

mod check;
mod list;
mod resolve;

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::app::commands::resolve::OutputFormat;
use crate::app::config::{ConfigOverrides, Settings, load_settings};
use crate::app::logging::init_tracing;
use crate::domain::AppError;
use crate::domain::setup::SetupGroup;

#[derive(Parser)]
#[command(name = "labsetup")]
#[command(version)]
#[command(
    about = "Resolve instrument setups into a flat device configuration",
    long_about = None
)]
struct Cli {
    #[command(flatten)]
    global: GlobalArgs,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct GlobalArgs {
    /// Setup directory to search (repeatable; overrides config and environment)
    #[arg(short = 'p', long = "setup-path", global = true, value_name = "DIR")]
    setup_path: Vec<PathBuf>,
    /// Config file (defaults to ./labsetup.toml when present)
    #[arg(short = 'c', long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve setups and print the merged configuration
    #[clap(visible_alias = "r")]
    Resolve {
        /// Setup names, loaded in order
        #[arg(required = true, value_name = "SETUP")]
        setups: Vec<String>,
        /// Output format (toml, json, yaml)
        #[arg(short, long, default_value = "toml")]
        format: String,
        /// Permit setups of the special group
        #[arg(long)]
        allow_special: bool,
        /// Load the system setup before the requested ones
        #[arg(long)]
        with_system: bool,
    },
    /// List available setups
    #[clap(visible_alias = "ls")]
    List {
        /// Only list setups of this group
        #[arg(short, long)]
        group: Option<String>,
    },
    /// Show one setup as written, without resolving includes
    Show {
        /// Setup name
        setup: String,
    },
    /// Validate all setups
    Check {
        /// Treat warnings as failures
        #[arg(long)]
        strict: bool,
    },
}

/// Entry point for the CLI.
pub fn run() {
    let cli = Cli::parse();

    let result = settings(&cli.global).and_then(|settings| {
        init_tracing(&settings.log_level);
        dispatch(cli.command, &settings)
    });

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    }
}

fn settings(global: &GlobalArgs) -> Result<Settings, AppError> {
    let overrides =
        ConfigOverrides { config: global.config.clone(), setup_paths: global.setup_path.clone() };
    load_settings(&overrides, &std::env::current_dir()?)
}

fn dispatch(command: Commands, settings: &Settings) -> Result<i32, AppError> {
    match command {
        Commands::Resolve { setups, format, allow_special, with_system } => {
            let format = format.parse::<OutputFormat>().map_err(AppError::config_error)?;
            let mut options = settings.options;
            options.allow_special |= allow_special;
            options.autoload_system |= with_system;
            resolve::run_resolve(settings, &setups, format, options).map(|_| 0)
        }
        Commands::List { group } => {
            let group = group.map(|g| g.parse::<SetupGroup>()).transpose()?;
            list::run_list(settings, group).map(|_| 0)
        }
        Commands::Show { setup } => list::run_show(settings, &setup).map(|_| 0),
        Commands::Check { strict } => check::run_check(settings, strict),
    }
}
