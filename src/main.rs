// file: src/main.rs
// description: commandline application entry point with command handling

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use spamsweep::utils::logging::{format_error, format_success, format_warning};
use spamsweep::{
    Config, ScanOptions, ScanOrchestrator, SpamFilter, TokenMode, TokenProvider, WordList,
};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "spamsweep")]
#[command(version = "0.1.0")]
#[command(about = "Spam-comment moderation pipeline for YouTube channels", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Scan every upload, flag spam comments, and moderation-reject them
    Scan {
        /// Flag spam without rejecting anything
        #[arg(long)]
        dry_run: bool,

        /// Use configured credentials only, never prompt for authorization
        #[arg(long)]
        silent_auth: bool,

        /// Cap the number of videos scanned
        #[arg(long, value_name = "NUM")]
        limit: Option<usize>,
    },

    /// Acquire a token and report whether authentication works
    Auth {
        #[arg(long)]
        silent: bool,
    },

    /// Print the active blocked-word list
    Words,

    /// Classify a single text against the blocked-word list
    Check { text: String },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    spamsweep::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Scan {
            dry_run,
            silent_auth,
            limit,
        } => {
            cmd_scan(config, dry_run, silent_auth, limit).await;
        }
        Commands::Auth { silent } => {
            cmd_auth(&config, silent).await;
        }
        Commands::Words => {
            cmd_words(&config)?;
        }
        Commands::Check { text } => {
            cmd_check(&config, &text)?;
        }
    }

    Ok(())
}

async fn cmd_scan(config: Config, dry_run: bool, silent_auth: bool, limit: Option<usize>) {
    let options = ScanOptions {
        mode: if silent_auth {
            TokenMode::Silent
        } else {
            TokenMode::Interactive
        },
        dry_run,
        limit,
    };

    let orchestrator = ScanOrchestrator::new(config);

    // the one human-readable status line the scan reports with; the report
    // carries the effective dry run, which may come from config alone
    match orchestrator.run(&options).await {
        Ok(report) => {
            let line = report.status_line();
            if report.dry_run && report.spam_flagged > 0 {
                println!("{}", format_warning(&line));
            } else {
                println!("{}", format_success(&line));
            }
        }
        Err(e) => {
            println!("{}", format_error(&format!("Scan failed: {}", e)));
            std::process::exit(1);
        }
    }
}

async fn cmd_auth(config: &Config, silent: bool) {
    let mode = if silent {
        TokenMode::Silent
    } else {
        TokenMode::Interactive
    };

    let provider = TokenProvider::new(config.auth.clone());

    match provider.acquire(mode).await {
        Ok(_token) => {
            println!("{}", format_success("Authentication succeeded"));
        }
        Err(e) => {
            println!("{}", format_error(&format!("Authentication failed: {}", e)));
            std::process::exit(1);
        }
    }
}

fn cmd_words(config: &Config) -> Result<()> {
    let list = WordList::load(&config.filter.wordlist_path)?;

    if list.is_empty() {
        println!("{}", format_warning("The blocked-word list is empty"));
        return Ok(());
    }

    println!("{} blocked words:", list.len());
    for word in list.words() {
        println!("  {}", word);
    }

    Ok(())
}

fn cmd_check(config: &Config, text: &str) -> Result<()> {
    let list = WordList::load(&config.filter.wordlist_path)?;
    let filter = SpamFilter::new(&list);

    if filter.is_spam(text) {
        println!("{}", format_warning("spam"));
    } else {
        println!("{}", format_success("clean"));
    }

    Ok(())
}
