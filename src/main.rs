mod cli;
mod output;

use std::time::SystemTime;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use declutter::cleaner::ScanCriteria;
use declutter::cleanup::CleanupOrchestrator;
use declutter::config::ServerConfig;
use declutter::utils::{parse_age, threshold_from_secs};

use cli::{Cli, Command, Criteria};
use output::ConsoleObserver;

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "declutter=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let deletes = cli.command.deletes();
    match cli.command {
        Command::Serve { host, port } => serve(host, port),
        Command::Scan(criteria) => {
            output::print_banner();
            scan(&criteria)
        }
        Command::Clean { criteria, .. } => {
            output::print_banner();
            if deletes {
                clean(&criteria)
            } else {
                output::print_no_confirm_warning();
                scan(&criteria)
            }
        }
    }
}

fn serve(host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = ServerConfig::from_env()?;
    if let Some(host) = host {
        config.host = host;
    }
    if let Some(port) = port {
        config.port = port;
    }

    let runtime = tokio::runtime::Runtime::new().context("failed to start async runtime")?;
    runtime
        .block_on(declutter::server::serve(config))
        .context("server failed")
}

fn build_criteria(args: &Criteria) -> Result<ScanCriteria> {
    let threshold = match (&args.older_than, args.before) {
        (Some(age), _) => {
            let age = parse_age(age).map_err(anyhow::Error::msg)?;
            SystemTime::now()
                .checked_sub(age)
                .unwrap_or(SystemTime::UNIX_EPOCH)
        }
        (None, Some(secs)) => threshold_from_secs(secs),
        (None, None) => anyhow::bail!("either --older-than or --before is required"),
    };
    Ok(ScanCriteria::new(&args.directory, &args.extension, threshold))
}

fn scan(args: &Criteria) -> Result<()> {
    let criteria = build_criteria(args)?;
    output::print_scan_header(&criteria.root, &criteria.extension, criteria.threshold);

    let result = CleanupOrchestrator::default().scan(&criteria);
    output::print_scan_result(&result);
    if result.is_actionable() {
        output::print_dry_run_footer();
    }
    Ok(())
}

fn clean(args: &Criteria) -> Result<()> {
    let criteria = build_criteria(args)?;
    output::print_scan_header(&criteria.root, &criteria.extension, criteria.threshold);

    let result = CleanupOrchestrator::new(&ConsoleObserver).scan_then_delete(&criteria);
    output::print_deletion_result(&result);
    Ok(())
}
