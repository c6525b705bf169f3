//! contactsinteraction: operator binary for the recent contacts address book
//!
//! Usage:
//!   contactsinteraction list <principal>          - List a principal's recent contacts
//!   contactsinteraction show <principal> <id>     - Print one card
//!   contactsinteraction props <principal>         - Print address book properties and ACL
//!   contactsinteraction record <actor> [options]  - Record an interaction
//!   contactsinteraction cleanup                   - Expire old recent contacts once
//!   contactsinteraction daemon                    - Run the cleanup scheduler

mod args;
mod commands;

use std::io;
use std::sync::Arc;

use args::RunMode;
use ci_core::{Catalog, Config, SqliteRecentContactStore};
use ci_schedule::{CleanupJob, Scheduler};
use commands::Context;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let argv: Vec<String> = std::env::args().skip(1).collect();
    let mode = match args::parse_args(&argv) {
        Ok(mode) => mode,
        Err(e) => {
            eprintln!("error: {}", e);
            eprintln!();
            print_help();
            std::process::exit(2);
        }
    };

    match mode {
        RunMode::Help => {
            print_help();
            return Ok(());
        }
        RunMode::Version => {
            println!("contactsinteraction {}", env!("CARGO_PKG_VERSION"));
            return Ok(());
        }
        _ => {}
    }

    // Logs go to stderr so command output stays clean
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("info".parse()?))
        .with_writer(io::stderr)
        .init();

    dotenvy::dotenv().ok();

    let config = Config::load().map_err(|e| anyhow::anyhow!("Config error: {}", e))?;

    let store = Arc::new(
        SqliteRecentContactStore::open(&config.database.path)
            .map_err(|e| anyhow::anyhow!("Failed to open database: {}", e))?,
    );
    let l10n = Arc::new(
        Catalog::load(&config.l10n)
            .map_err(|e| anyhow::anyhow!("Failed to load translations: {}", e))?,
    );
    tracing::debug!(
        database = %config.database.path,
        language = %config.l10n.language,
        "Configuration loaded"
    );

    let ctx = Context {
        store,
        l10n,
        app_id: config.app.app_id.clone(),
    };
    let mut out = io::stdout().lock();

    match mode {
        RunMode::List { principal } => commands::list(&ctx, &principal, &mut out),
        RunMode::Show { principal, name } => commands::show(&ctx, &principal, &name, &mut out),
        RunMode::Props { principal } => commands::props(&ctx, &principal, &mut out),
        RunMode::Record(interaction) => commands::record(&ctx, &interaction, &mut out),
        RunMode::Cleanup => {
            let job = CleanupJob::from_config(Arc::clone(&ctx.store), &config.cleanup)?;
            commands::cleanup(&job, &mut out)
        }
        RunMode::Daemon => run_daemon(&ctx, &config).await,
        RunMode::Help | RunMode::Version => Ok(()),
    }
}

/// Print help message
fn print_help() {
    println!("contactsinteraction - Recently contacted address book");
    println!();
    println!("Usage:");
    println!("  contactsinteraction list <principal>         List recent contacts");
    println!("  contactsinteraction show <principal> <id>    Print one vCard");
    println!("  contactsinteraction props <principal>        Print properties and ACL");
    println!("  contactsinteraction record <actor> [--uid U] [--email E] [--cloud-id C]");
    println!("                                               Record a contact interaction");
    println!("  contactsinteraction cleanup                  Delete expired recent contacts");
    println!("  contactsinteraction daemon                   Run cleanup on its cron schedule");
    println!("  contactsinteraction --help                   Show this help message");
    println!("  contactsinteraction --version                Show version");
    println!();
    println!("A principal is a URI such as principals/users/alice, or a bare user id.");
    println!();
    println!("Environment Variables:");
    println!("  CI_APP_ID                  Application id (default: contactsinteraction)");
    println!("  CI_DB_PATH                 SQLite database (default: data/contactsinteraction.db)");
    println!("  CI_LANGUAGE                Language for generated strings (default: en)");
    println!("  CI_L10N_CATALOG            Path to a TOML translation catalog");
    println!("  CI_CLEANUP_ENABLED         Enable scheduled cleanup (default: true)");
    println!("  CI_CLEANUP_CRON            Cleanup schedule (default: 0 0 3 * * *)");
    println!("  CI_CLEANUP_RETENTION_DAYS  Days a contact stays recent (default: 7)");
}

/// Run the cleanup scheduler until Ctrl+C
async fn run_daemon(ctx: &Context, config: &Config) -> anyhow::Result<()> {
    if !config.cleanup.enabled {
        tracing::warn!("Cleanup is disabled, nothing to run");
        return Ok(());
    }

    let job = CleanupJob::from_config(Arc::clone(&ctx.store), &config.cleanup)?;
    tracing::info!(
        cron = %config.cleanup.cron,
        retention_days = job.retention().num_days(),
        "Starting cleanup daemon"
    );
    let handle = Scheduler::new(job, &config.cleanup.cron)?.start();

    tokio::signal::ctrl_c().await?;
    tracing::info!("Shutting down...");
    handle.stop().await;

    Ok(())
}
