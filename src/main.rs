mod config;
mod notion;

use anyhow::{Context, Result};
use birthdays_core::{build_feed, ics};
use chrono::{NaiveDate, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "birthdays-cli")]
#[command(about = "Generate an ICS birthday calendar feed from a Notion contacts database")]
struct Cli {
    /// Path to config.toml (defaults to ~/.config/birthdays/config.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch birthdays and write the .ics feed
    Generate {
        /// Output file (defaults to the configured output path)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Print upcoming birthdays without writing a file
    List,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let cfg = config::load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Generate { output } => cmd_generate(&cfg, output).await,
        Commands::List => cmd_list(&cfg).await,
    }
}

/// Today in the configured timezone, stripped to a calendar date.
/// Everything downstream of this value is timezone-agnostic.
fn reference_today(timezone: &str) -> Result<NaiveDate> {
    let tz: chrono_tz::Tz = timezone
        .parse()
        .map_err(|_| anyhow::anyhow!("Unknown timezone '{}' in config", timezone))?;
    Ok(Utc::now().with_timezone(&tz).date_naive())
}

async fn cmd_generate(cfg: &config::Config, output: Option<PathBuf>) -> Result<()> {
    let client = notion::NotionClient::new(&cfg.notion);
    let records = client.fetch_birthdays().await?;

    let today = reference_today(&cfg.timezone)?;
    let events = build_feed(&records, today);

    let ics_content = ics::generate_feed(&events, "Birthdays");
    let output = output.unwrap_or_else(|| PathBuf::from(&cfg.output));

    std::fs::write(&output, ics_content)
        .with_context(|| format!("Failed to write {}", output.display()))?;

    println!(
        "✅ Generated `{}` with {} upcoming birthday(s)",
        output.display(),
        events.len()
    );

    Ok(())
}

async fn cmd_list(cfg: &config::Config) -> Result<()> {
    let client = notion::NotionClient::new(&cfg.notion);
    let records = client.fetch_birthdays().await?;

    let today = reference_today(&cfg.timezone)?;
    let mut events = build_feed(&records, today);

    if events.is_empty() {
        println!("No upcoming birthdays.");
        return Ok(());
    }

    // The feed preserves record order; a date sort reads better on a terminal
    events.sort_by_key(|e| e.date);

    println!("📅 Upcoming birthdays:");
    for event in &events {
        match &event.note {
            Some(note) => println!("  {}  {} ({})", event.date, event.title, note),
            None => println!("  {}  {}", event.date, event.title),
        }
    }

    Ok(())
}
