//! Dwolla Checkout CLI
//!
//! Command-line interface for the off-site checkout flow:
//! - Validate a checkout response and print its redirect URL
//! - Sign and verify redirect postbacks

mod config;

use std::io::Read;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use rust_decimal::Decimal;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use checkout_types::{CHECKOUT_URL_TEMPLATE, CheckoutResponse, Validate};

#[derive(Parser)]
#[command(name = "dwolla-checkout")]
#[command(author, version, about = "Dwolla off-site checkout tools", long_about = None)]
struct Cli {
    /// Application consumer secret used to sign postbacks
    #[arg(long, env = "DWOLLA_APP_SECRET", hide_env_values = true)]
    app_secret: Option<String>,

    /// Redirect template containing the {CheckoutId} placeholder
    #[arg(long, env = "DWOLLA_CHECKOUT_URL", default_value = CHECKOUT_URL_TEMPLATE)]
    checkout_url: String,

    /// Emit logs as JSON
    #[arg(long)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a checkout response (JSON)
    Validate {
        /// Path to the response; reads stdin when omitted
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Validate a checkout response and print the customer's redirect URL
    RedirectUrl {
        /// Path to the response; reads stdin when omitted
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Compute the postback signature for a checkout
    Sign {
        #[arg(long)]
        checkout_id: String,
        #[arg(long)]
        amount: Decimal,
    },
    /// Parse, validate and authenticate a redirect query string
    VerifyRedirect {
        /// Query string, with or without the leading '?'
        query: String,
    },
}

fn init_tracing(json: bool) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,checkout_hex=debug,checkout_cli=debug".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(json.then(|| tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr)))
        .with((!json).then(|| tracing_subscriber::fmt::layer().with_writer(std::io::stderr)))
        .init();
}

fn read_response(file: Option<PathBuf>) -> Result<CheckoutResponse> {
    let raw = match file {
        Some(path) => std::fs::read_to_string(&path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut raw = String::new();
            std::io::stdin()
                .read_to_string(&mut raw)
                .context("Failed to read stdin")?;
            raw
        }
    };

    serde_json::from_str(&raw).context("Invalid checkout response JSON")
}

fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.json_logs);

    let config = config::Config::new(cli.app_secret, cli.checkout_url)?;
    tracing::debug!(checkout_url = %config.checkout_url, "configuration loaded");

    match cli.command {
        Commands::Validate { file } => {
            let response = read_response(file)?;
            let result = response.validate();
            println!("{}", serde_json::to_string_pretty(&result)?);
            if !result.is_valid() {
                std::process::exit(1);
            }
        }

        Commands::RedirectUrl { file } => {
            let response = read_response(file)?;
            response.validate().into_result()?;
            println!("{}", response.build_redirect_url_with(&config.checkout_url));
        }

        Commands::Sign {
            checkout_id,
            amount,
        } => {
            let service = config.service()?;
            println!("{}", service.sign(&checkout_id, amount));
        }

        Commands::VerifyRedirect { query } => {
            let service = config.service()?;
            let postback = service.accept_redirect(&query)?;
            println!("{}", serde_json::to_string_pretty(&postback)?);
        }
    }

    Ok(())
}
