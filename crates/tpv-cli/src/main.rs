//! TPV CLI - Submit verification calls and manage the mirror
//!
//! Talks to the TPV API; quotes are computed locally.

mod api;
mod config;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use colored::Colorize;
use dialoguer::{Input, Password};
use std::fs;
use tracing_subscriber::EnvFilter;

use api::TpvClient;
use config::Config;
use tpv::domain::services::amortization;
use tpv::TpvSubmission;

#[derive(Parser)]
#[command(name = "tpv")]
#[command(about = "TPV CLI - Third-party verification calls", long_about = None)]
#[command(version)]
struct Cli {
    /// Log HTTP traffic and decisions
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Store the operator API key
    Login {
        /// API key (will prompt if not provided)
        #[arg(short, long)]
        key: Option<String>,
    },

    /// Set server URL and submission defaults interactively
    Configure,

    /// Submit a verification call from a TOML file
    Submit {
        /// TOML file with the form fields (camelCase keys)
        file: String,
        /// Agent code (overrides file and default)
        #[arg(short, long)]
        agent: Option<String>,
        /// Assistant id (overrides file and default)
        #[arg(long)]
        assistant: Option<String>,
        /// Print the request body instead of sending it
        #[arg(long)]
        dry_run: bool,
    },

    /// Compute a monthly payment locally
    Quote {
        /// Sales price
        #[arg(short, long)]
        price: f64,
        /// Annual interest rate in percent (e.g. 9.99)
        #[arg(short, long)]
        rate: f64,
        /// Amortization in months
        #[arg(short, long)]
        term: u32,
    },

    /// Rewrite the spreadsheet mirror now
    Sync,

    /// List stored call requests
    Requests {
        /// Max rows to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
        /// Only show this status (initiated, completed, failed)
        #[arg(short, long)]
        status: Option<String>,
    },

    /// Show current configuration
    Config,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Login { key } => cmd_login(key).await,
        Commands::Configure => cmd_configure(),
        Commands::Submit {
            file,
            agent,
            assistant,
            dry_run,
        } => cmd_submit(file, agent, assistant, dry_run).await,
        Commands::Quote { price, rate, term } => cmd_quote(price, rate, term),
        Commands::Sync => cmd_sync().await,
        Commands::Requests { limit, status } => cmd_requests(limit, status).await,
        Commands::Config => cmd_config(),
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

// ============================================
// Command Implementations
// ============================================

async fn cmd_login(key: Option<String>) -> Result<()> {
    let mut config = Config::load()?;

    let api_key = match key {
        Some(k) => k,
        None => Password::new()
            .with_prompt("API Key")
            .interact()
            .context("Failed to read API key")?,
    };

    // Test connection
    let client = TpvClient::new(&config.base_url, Some(&api_key));
    print!("Testing connection... ");

    match client.health().await {
        Ok(true) => {
            println!("{}", "OK".green());
        }
        _ => {
            println!("{}", "Failed".red());
            bail!("Could not reach TPV API at {}", config.base_url);
        }
    }

    config.set_api_key(api_key);
    config.save()?;

    println!("{} API key saved to {:?}", "✓".green(), Config::config_path()?);

    Ok(())
}

fn cmd_configure() -> Result<()> {
    let mut config = Config::load()?;

    config.base_url = Input::new()
        .with_prompt("Server URL")
        .default(config.base_url.clone())
        .interact_text()
        .context("Failed to read server URL")?;

    let agent: String = Input::new()
        .with_prompt("Default agent code (blank for none)")
        .default(config.default_agent_id.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()
        .context("Failed to read agent code")?;
    config.default_agent_id = non_empty(agent);

    let assistant: String = Input::new()
        .with_prompt("Default assistant id (blank for none)")
        .default(config.default_assistant_id.clone().unwrap_or_default())
        .allow_empty(true)
        .interact_text()
        .context("Failed to read assistant id")?;
    config.default_assistant_id = non_empty(assistant);

    config.save()?;
    println!("{} Configuration saved to {:?}", "✓".green(), Config::config_path()?);

    Ok(())
}

async fn cmd_submit(
    file: String,
    agent: Option<String>,
    assistant: Option<String>,
    dry_run: bool,
) -> Result<()> {
    let config = Config::load()?;

    let content =
        fs::read_to_string(&file).with_context(|| format!("Failed to read file: {}", file))?;
    let mut submission: TpvSubmission =
        toml::from_str(&content).with_context(|| format!("Failed to parse {}", file))?;

    apply_defaults(&mut submission, &config, agent, assistant);

    if submission.agent_id.is_none() {
        bail!("No agent code. Use --agent, add agentId to the file or run 'tpv configure'.");
    }

    if dry_run {
        println!("{}", serde_json::to_string_pretty(&submission)?);
        return Ok(());
    }

    let client = TpvClient::new(&config.base_url, config.api_key.as_deref());
    let response = client.initiate_call(&submission).await?;

    println!("{} {}", "✓".green(), response.message);
    println!("  Call ID: {}", response.call_id.cyan());

    Ok(())
}

/// Command-line values win, then the file, then the saved defaults
fn apply_defaults(
    submission: &mut TpvSubmission,
    config: &Config,
    agent: Option<String>,
    assistant: Option<String>,
) {
    submission.agent_id = agent
        .or(submission.agent_id.take())
        .or_else(|| config.default_agent_id.clone());
    submission.assistant_id = assistant
        .or(submission.assistant_id.take())
        .or_else(|| config.default_assistant_id.clone());
}

fn cmd_quote(price: f64, rate: f64, term: u32) -> Result<()> {
    let monthly = amortization::monthly_payment(price, rate, term)
        .context("Price must be positive, rate non-negative and term at least one month")?;

    println!("{}", "Quote:".bold());
    println!("  Sales price:     {:>12.2}", price);
    println!("  Admin fee:       {:>12.2}", amortization::admin_fee(price));
    println!("  Rate:            {:>11.2}%", rate);
    println!("  Term:            {:>9} mo", term);
    println!("  Monthly payment: {}", format!("{:>12.2}", monthly).green().bold());

    Ok(())
}

async fn cmd_sync() -> Result<()> {
    let config = Config::load()?;
    let client = TpvClient::new(&config.base_url, config.api_key.as_deref());

    let response = client.sync().await?;
    println!(
        "{} Sheet rewritten ({} rows including header)",
        "✓".green(),
        response.rows_written
    );

    Ok(())
}

async fn cmd_requests(limit: usize, status: Option<String>) -> Result<()> {
    let config = Config::load()?;
    let client = TpvClient::new(&config.base_url, config.api_key.as_deref());

    let requests: Vec<_> = client
        .list_requests()
        .await?
        .into_iter()
        .filter(|r| status.as_deref().map_or(true, |s| r.status.eq_ignore_ascii_case(s)))
        .take(limit)
        .collect();

    if requests.is_empty() {
        println!("No call requests found.");
        return Ok(());
    }

    println!("{}", "Call requests:".bold());
    for r in requests {
        let status = match r.status.as_str() {
            "completed" => r.status.green(),
            "failed" => r.status.red(),
            _ => r.status.yellow(),
        };
        let duration = r
            .call_duration_seconds
            .map(|d| format!("{}s", d))
            .unwrap_or_else(|| "-".to_string());

        println!(
            "  {} {} {} {} [{}] {} {}",
            truncate_string(&r.created_at, 19).dimmed(),
            r.agent_id.cyan(),
            r.customer_name,
            r.phone_number.dimmed(),
            status,
            duration,
            r.ended_reason.as_deref().unwrap_or("").dimmed()
        );
        if let Some(call_id) = &r.vapi_call_id {
            println!("      {}", call_id.dimmed());
        }
    }

    Ok(())
}

fn cmd_config() -> Result<()> {
    let config = Config::load()?;

    println!("{}", "Configuration:".bold());
    println!("  Path: {:?}", Config::config_path()?);
    println!("  Base URL: {}", config.base_url);
    println!(
        "  API Key: {}",
        if config.api_key.is_some() { "Set".green() } else { "Not set".red() }
    );
    println!(
        "  Default Agent: {}",
        config.default_agent_id.as_deref().unwrap_or("None").cyan()
    );
    println!(
        "  Default Assistant: {}",
        config.default_assistant_id.as_deref().unwrap_or("None").cyan()
    );

    Ok(())
}

fn non_empty(value: String) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Truncate string safely for UTF-8 (by char count, not bytes)
fn truncate_string(s: &str, max_chars: usize) -> String {
    s.chars().take(max_chars).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const FORM: &str = r#"
        customerName = "Jane Doe"
        address = "12 King St W"
        phoneNumber = "416-555-1234"
        products = ["Furnace", "Air Conditioner"]
        salesPrice = 10000
        interestRate = "9.99%"
        amortization = 60
    "#;

    fn config_with_defaults() -> Config {
        Config {
            default_agent_id: Some("MM23".to_string()),
            default_assistant_id: Some("assistant-default".to_string()),
            ..Config::default()
        }
    }

    #[test]
    fn test_toml_form_parses_numbers_as_text() {
        let submission: TpvSubmission = toml::from_str(FORM).unwrap();
        assert_eq!(submission.sales_price.as_deref(), Some("10000"));
        assert_eq!(submission.amortization.as_deref(), Some("60"));
        assert_eq!(
            submission.products.unwrap().items(),
            vec!["Furnace".to_string(), "Air Conditioner".to_string()]
        );
    }

    #[test]
    fn test_defaults_fill_missing_ids() {
        let mut submission: TpvSubmission = toml::from_str(FORM).unwrap();
        apply_defaults(&mut submission, &config_with_defaults(), None, None);

        assert_eq!(submission.agent_id.as_deref(), Some("MM23"));
        assert_eq!(submission.assistant_id.as_deref(), Some("assistant-default"));
    }

    #[test]
    fn test_flags_win_over_file_and_defaults() {
        let mut submission: TpvSubmission =
            toml::from_str(&format!("agentId = \"AB01\"\n{}", FORM)).unwrap();
        apply_defaults(
            &mut submission,
            &config_with_defaults(),
            Some("CD02".to_string()),
            None,
        );

        assert_eq!(submission.agent_id.as_deref(), Some("CD02"));
    }

    #[test]
    fn test_file_wins_over_defaults() {
        let mut submission: TpvSubmission =
            toml::from_str(&format!("agentId = \"AB01\"\n{}", FORM)).unwrap();
        apply_defaults(&mut submission, &config_with_defaults(), None, None);

        assert_eq!(submission.agent_id.as_deref(), Some("AB01"));
    }

    #[test]
    fn test_non_empty_trims_blank_input() {
        assert_eq!(non_empty("  ".to_string()), None);
        assert_eq!(non_empty(" MM23 ".to_string()), Some("MM23".to_string()));
    }
}
