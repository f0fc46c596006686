//! Mostly Harmless - reddit companion for the pages you visit
//!
//! CLI entry point that dispatches to subcommands.

use clap::Parser;
use console::style;
use mostly_harmless::cli::commands::{self, post, App};
use mostly_harmless::cli::{Cli, Commands};
use mostly_harmless::config::{Config, ConfigManager};
use mostly_harmless::error::HarmlessResult;
use mostly_harmless::popup::PopupAction;
use mostly_harmless::ui;
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> ExitCode {
    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{} {}", style("Error:").red().bold(), e);
            if let Some(hint) = e.hint() {
                eprintln!("{} {}", style("Hint:").yellow(), hint);
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging(verbose: u8, config: &Config) {
    // 0 = warn, 1 = info, 2+ = debug
    let filter = match verbose {
        0 => EnvFilter::new("mostly_harmless=warn"),
        1 => EnvFilter::new("mostly_harmless=info"),
        _ => EnvFilter::new("mostly_harmless=debug"),
    };

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time();

    if config.general.log_format == "json" {
        builder.json().init();
    } else {
        builder.init();
    }
}

async fn run() -> HarmlessResult<()> {
    let cli = Cli::parse();

    let config_manager = match cli.config {
        Some(ref path) => ConfigManager::with_path(path.clone()),
        None => ConfigManager::new(),
    };
    let config = config_manager.load().await?;

    init_logging(cli.verbose, &config);
    ui::init_theme();
    debug!("Using config {}", config_manager.path().display());

    // Config commands don't need the stores
    if let Commands::Config(args) = cli.command {
        return commands::config(args, &config_manager, &config).await;
    }

    let store_dir = ConfigManager::store_dir(&config, cli.state_dir.as_deref());
    let app = App::open(config, &store_dir)?;

    match cli.command {
        Commands::Config(_) => unreachable!("Config handled above"),
        Commands::Lookup(args) => commands::lookup(args, &app).await,
        Commands::Show(args) => commands::show(args, &app).await,
        Commands::Vote(args) => post::vote(args, &app).await,
        Commands::Save(args) => post::toggle(PopupAction::Save, args, &app).await,
        Commands::Unsave(args) => post::toggle(PopupAction::Unsave, args, &app).await,
        Commands::Hide(args) => post::toggle(PopupAction::Hide, args, &app).await,
        Commands::Unhide(args) => post::toggle(PopupAction::Unhide, args, &app).await,
        Commands::Report(args) => post::report(args, &app).await,
        Commands::Comment(args) => post::comment(args, &app).await,
        Commands::Draft(args) => post::draft(args, &app).await,
        Commands::Settings(args) => commands::settings(args, &app).await,
    }
}
