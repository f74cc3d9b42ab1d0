//! Revu CLI - Pull request feedback audit and review dashboard
//!
//! `audit` checks whether review feedback on a pull request has been
//! addressed; `discover` and `act` find pull requests you review and submit
//! verdicts on them.

mod commands;

use clap::{Parser, Subcommand};
use revu_core::Config;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{ActArgs, AuditArgs, DiscoverArgs};

/// Revu: audit pull request review feedback and act on reviews
#[derive(Parser, Debug)]
#[command(name = "revu")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Audit review threads on a pull request
    #[command(visible_alias = "a")]
    Audit(AuditArgs),

    /// Find open pull requests you have reviewed or commented on
    Discover(DiscoverArgs),

    /// Approve, request changes on, or comment on a pull request
    Act(ActArgs),

    /// Show current configuration
    Config,

    /// Show version information
    Version,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Reports go to stdout, so logs go to stderr
    let default_level = if cli.verbose { "debug" } else { "warn" };
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)))
        .init();

    let config = Config::load_with_env()?;

    if cli.verbose {
        tracing::info!(
            graphql_url = %config.github.graphql_url,
            format = ?config.audit.format,
            "Configuration loaded"
        );
    }

    match cli.command {
        Some(Commands::Audit(args)) => {
            args.execute(config).await?;
        }
        Some(Commands::Discover(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Act(args)) => {
            args.execute(&config).await?;
        }
        Some(Commands::Config) => {
            println!("Revu Configuration");
            println!("==================");
            println!();
            println!("GitHub Settings:");
            println!("  graphql_url: {}", config.github.graphql_url);
            println!("  timeout: {:?}", config.github.timeout);
            println!("  page_size: {}", config.github.page_size);
            println!();
            println!("Audit Settings:");
            println!("  format: {:?}", config.audit.format);
            println!("  exclude_resolved: {}", config.audit.exclude_resolved);
            println!("  auto_resolve: {}", config.audit.auto_resolve);
            println!();
            if let Some(path) = Config::default_config_path() {
                println!("Config file: {}", path.display());
                if path.exists() {
                    println!("  (exists)");
                } else {
                    println!("  (not found - using defaults)");
                }
            }
        }
        Some(Commands::Version) => {
            println!("revu {}", env!("CARGO_PKG_VERSION"));
        }
        None => {
            println!("Revu - Pull request feedback audit and review dashboard");
            println!();
            println!("Use --help for usage information");
        }
    }

    Ok(())
}
