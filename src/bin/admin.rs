//! CLI administration tool for link-shortener.
//!
//! Manages short links directly against the database without going through
//! the HTTP API. Mutations run through [`LinkService`], so the configured
//! cache is invalidated exactly as the server would do it.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin admin -- links show abc123
//! cargo run --bin admin -- links search https://example.com
//! cargo run --bin admin -- links create https://example.com --alias promo
//! cargo run --bin admin -- links update abc123 https://example.org
//! cargo run --bin admin -- links delete abc123 -y
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server (see `link_shortener::config`).

use link_shortener::application::services::LinkService;
use link_shortener::config::{self, Config};
use link_shortener::domain::entities::UrlRecord;
use link_shortener::{logging, server};

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;

/// CLI tool for managing link-shortener.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage short links
    Links {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Short link subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Show a short link and its visit statistics
    Show {
        /// Short code to look up
        short_code: String,
    },

    /// List short links pointing at an exact original URL
    Search {
        /// Original URL (matched exactly)
        original_url: String,
    },

    /// Create a short link
    Create {
        /// Original URL to shorten
        original_url: String,

        /// Custom short code (generated if omitted)
        #[arg(short, long)]
        alias: Option<String>,
    },

    /// Point a short link at a new URL
    Update {
        short_code: String,
        original_url: String,
    },

    /// Delete a short link
    Delete {
        short_code: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;
    logging::init("warn", "text");

    let pool = server::connect_database(&config).await?;
    let service = server::build_link_service(&config, pool).await;

    match cli.command {
        Commands::Links { action } => handle_link_action(action, &service).await?,
        Commands::Db { action } => handle_db_action(action, &service, &config).await?,
    }

    Ok(())
}

/// Dispatches short link commands.
async fn handle_link_action(action: LinkAction, service: &LinkService) -> Result<()> {
    match action {
        LinkAction::Show { short_code } => {
            let record = service.get_stats(&short_code).await?;
            print_record(&record);
        }
        LinkAction::Search { original_url } => {
            let records = service.search_by_original_url(&original_url).await?;
            println!(
                "{}",
                format!("🔎 {} short link(s) for {}", records.len(), original_url)
                    .bright_blue()
                    .bold()
            );
            println!();
            for record in &records {
                print_record(record);
                println!();
            }
        }
        LinkAction::Create {
            original_url,
            alias,
        } => {
            let record = service.create_short_link(original_url, alias).await?;
            println!("{}", "✨ Short link created".green().bold());
            print_record(&record);
        }
        LinkAction::Update {
            short_code,
            original_url,
        } => {
            let record = service.update_link(&short_code, &original_url).await?;
            println!("{}", "✏️  Short link updated".green().bold());
            print_record(&record);
        }
        LinkAction::Delete { short_code, yes } => {
            delete_link(service, &short_code, yes).await?;
        }
    }

    Ok(())
}

/// Deletes a short link after showing it and asking for confirmation.
async fn delete_link(service: &LinkService, short_code: &str, skip_confirm: bool) -> Result<()> {
    let record = service.get_stats(short_code).await?;
    print_record(&record);
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Delete short link '{}'?", short_code))
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "Cancelled".yellow());
            return Ok(());
        }
    }

    service.delete_link(short_code).await?;
    println!("{}", format!("🗑  Deleted '{}'", short_code).green());

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, service: &LinkService, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔌 Checking connections...".bright_blue());

            match service.ping_store().await {
                Ok(()) => println!("  {} database", "✓".green()),
                Err(e) => println!("  {} database: {}", "✗".red(), e),
            }

            let (backend, healthy) = service.cache_health().await;
            if healthy {
                println!("  {} cache ({})", "✓".green(), backend);
            } else {
                println!("  {} cache ({})", "✗".red(), backend);
            }

            println!("  cache TTL: {}s", config.cache_ttl_seconds);
        }
    }

    Ok(())
}

fn print_record(record: &UrlRecord) {
    println!("  {}  {}", "Code:".bold(), record.short_code.cyan());
    println!("  {}   {}", "URL:".bold(), record.original_url);
    println!(
        "  {} {}",
        "Since:".bold(),
        record.registered_at.format("%Y-%m-%d %H:%M:%S UTC")
    );
    println!("  {} {}", "Visits:".bold(), record.visit_count);
    match record.last_visited_at {
        Some(at) => println!("  {}   {}", "Last:".bold(), at.format("%Y-%m-%d %H:%M:%S UTC")),
        None => println!("  {}   {}", "Last:".bold(), "never".dimmed()),
    }
}
