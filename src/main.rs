use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use tracing_subscriber::EnvFilter;

mod api;
mod config;
mod errors;
mod models;
mod render;
mod state;

use crate::config::settings::Settings;
use errors::Result;

#[derive(Parser)]
#[command(name = "jira-next")]
#[command(version)]
#[command(about = "Fetch the top-ranked Jira ticket and flatten it into Markdown", long_about = None)]
struct Cli {
    /// for debugging purposes
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch the top-ranked issue of the filter into the state file
    Fetch {
        /// JQL to run instead of the configured filter
        #[arg(long)]
        jql: Option<String>,

        /// Where to write the raw ticket JSON
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Render the fetched ticket JSON as Markdown
    Format {
        /// Raw ticket JSON (default: .claude/state/raw-ticket.json)
        input: Option<PathBuf>,

        /// Markdown output (default: .claude/state/raw-ticket.md)
        output: Option<PathBuf>,
    },

    /// Fetch, then format
    Run {
        /// JQL to run instead of the configured filter
        #[arg(long)]
        jql: Option<String>,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Display resolved configuration (with masked secrets)
    Show,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match Settings::load() {
        Ok(settings) => match cli.command {
            Commands::Fetch { jql, output } => {
                handle_fetch(&settings, jql.as_deref(), output.as_deref()).await
            }

            Commands::Format { input, output } => {
                handle_format(&settings, input.as_deref(), output.as_deref())
            }

            Commands::Run { jql } => handle_run(&settings, jql.as_deref()).await,

            Commands::Config { action } => handle_config(&settings, action),
        },
        Err(e) => Err(e),
    };

    if let Err(e) = result {
        tracing::debug!(error = ?e, "Command failed");
        eprintln!("\n{}", e.report());
        std::process::exit(1);
    }
}

fn init_logging(verbose: bool) {
    let default_directive = if verbose { "jira_next=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

async fn handle_fetch(settings: &Settings, jql: Option<&str>, output: Option<&Path>) -> Result<()> {
    let jira_config = settings.jira()?;
    let jql = jql.unwrap_or(&settings.jql);
    let out_file = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| settings.raw_ticket_path());

    println!("{}", "  Searching Jira...".dimmed());
    println!("{}", format!("  JQL: {}", jql).dimmed());

    let jira = api::jira::JiraClient::new(&jira_config)?;
    let ticket = jira.fetch_top(jql).await?;

    state::write_raw(&out_file, &ticket)?;

    match ticket.issue_key() {
        Some(key) => {
            println!("{} {}", "Fetched:".green().bold(), key.bright_white());
            println!("{} {}", "Wrote:".bold(), out_file.display());
        }
        None => println!("{}", "No tickets found (idle).".yellow()),
    }

    Ok(())
}

fn handle_format(settings: &Settings, input: Option<&Path>, output: Option<&Path>) -> Result<()> {
    let in_path = input
        .map(Path::to_path_buf)
        .unwrap_or_else(|| settings.raw_ticket_path());
    let out_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| settings.markdown_path());

    let data = state::read_raw(&in_path)?;
    let markdown = render::markdown::render(&data);
    state::write_markdown(&out_path, &markdown)?;

    if render::markdown::is_idle(&data) {
        println!(
            "{} {} {}",
            "No ticket available.".yellow(),
            "Wrote:".bold(),
            out_path.display()
        );
    } else {
        println!("{} {}", "Wrote:".bold(), out_path.display());
    }

    Ok(())
}

async fn handle_run(settings: &Settings, jql: Option<&str>) -> Result<()> {
    handle_fetch(settings, jql, None).await?;
    handle_format(settings, None, None)
}

fn handle_config(settings: &Settings, action: ConfigAction) -> Result<()> {
    use crate::config::settings::mask_secret;

    match action {
        ConfigAction::Show => {
            let unset = || "(unset)".red().to_string();

            println!("{}", "Current Configuration".cyan().bold());
            println!();

            let file_state = if Settings::config_file().exists() {
                "found".green()
            } else {
                "not found".dimmed()
            };
            println!(
                "  {} {} ({})",
                "file:".dimmed(),
                Settings::config_file().display(),
                file_state
            );
            println!();

            println!("{}", "[jira]".bold());
            println!(
                "  {} {}",
                "host:".dimmed(),
                settings.host.as_deref().map(|h| h.bright_white().to_string()).unwrap_or_else(unset)
            );
            println!(
                "  {} {}",
                "email:".dimmed(),
                settings.email.as_deref().map(|e| e.bright_white().to_string()).unwrap_or_else(unset)
            );
            println!(
                "  {} {}",
                "api_token:".dimmed(),
                settings
                    .api_token
                    .as_deref()
                    .map(|t| mask_secret(t).yellow().to_string())
                    .unwrap_or_else(unset)
            );
            println!("  {} {}", "jql:".dimmed(), settings.jql.bright_white());

            println!();
            println!("{}", "[state]".bold());
            println!("  {} {}", "raw_ticket:".dimmed(), settings.raw_ticket_path().display());
            println!("  {} {}", "markdown:".dimmed(), settings.markdown_path().display());

            Ok(())
        }
    }
}
