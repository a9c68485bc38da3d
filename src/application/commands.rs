//! CLI commands and handlers

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use serde_json::json;
use tracing::info;

use crate::application::services::SwapService;
use crate::application::session::SwapSession;
use crate::domain::token::canonical_symbol;

#[derive(Parser, Debug)]
#[command(name = "swapquote")]
#[command(version, about = "Token swap quotes from a static market definition")]
pub struct Cli {
    /// Path to a market TOML file (bundled market if omitted)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// List supported tokens
    Tokens {
        /// Show icon, fee and contract details
        #[arg(short, long)]
        detailed: bool,
    },

    /// List directed trading pairs with their rates
    Pairs {
        /// Only pairs paying with this token
        #[arg(short, long)]
        from: Option<String>,
    },

    /// Quote a swap
    Quote {
        /// Token to pay with
        from: String,

        /// Token to receive
        to: String,

        /// Amount of the pay token
        #[arg(allow_hyphen_values = true)]
        amount: String,

        /// Slippage tolerance in percent
        #[arg(short, long)]
        slippage: Option<f64>,

        /// Print the quote as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show market settings
    Status,
}

pub struct CommandExecutor;

impl CommandExecutor {
    /// Execute the selected command
    pub fn execute(command: Commands, service: Arc<SwapService>) -> Result<()> {
        match command {
            Commands::Tokens { detailed } => Self::execute_tokens_command(detailed, &service),
            Commands::Pairs { from } => Self::execute_pairs_command(from, &service),
            Commands::Quote {
                from,
                to,
                amount,
                slippage,
                json,
            } => Self::execute_quote_command(&from, &to, &amount, slippage, json, service),
            Commands::Status => Self::execute_status_command(&service),
        }
    }

    fn execute_tokens_command(detailed: bool, service: &SwapService) -> Result<()> {
        let network = &service.app().default_network;
        for token in service.get_all_tokens() {
            println!("{:<6} {:<16} {:>2} decimals", token.symbol, token.name, token.decimals);
            if detailed {
                println!("       icon: {}  min fee: {}", token.icon, service.format(token.min_fee, &token.symbol));
                if let Some(address) = token.address(network) {
                    println!("       {}: {}", network, address);
                }
            }
        }
        Ok(())
    }

    fn execute_pairs_command(from: Option<String>, service: &SwapService) -> Result<()> {
        let from = from.as_deref().map(canonical_symbol);
        for (pair, _) in service.calculator().rates().pairs() {
            if from.as_ref().is_some_and(|f| *f != pair.from) {
                continue;
            }
            let label = service
                .exchange_rate_label(&pair.from, &pair.to)
                .with_context(|| format!("pair {}", pair))?;
            println!("{:<10} {}", pair.to_string(), label);
        }
        Ok(())
    }

    fn execute_quote_command(
        from: &str,
        to: &str,
        amount: &str,
        slippage: Option<f64>,
        as_json: bool,
        service: Arc<SwapService>,
    ) -> Result<()> {
        let mut session = SwapSession::new(service);
        if let Some(slippage) = slippage {
            let deadline = session.settings().deadline_minutes;
            session.update_settings(slippage, deadline)?;
        }
        session
            .select_pair(from, to)
            .map_err(|e| anyhow::anyhow!("{} ({})", e.user_message(), e))?;
        session.set_pay_amount(amount);

        let preview = session
            .preview()
            .map_err(|e| anyhow::anyhow!("{} ({})", e.user_message(), e))?;
        info!("quoted {} {} -> {}", preview.quote.input_amount, preview.quote.from, preview.quote.to);

        if as_json {
            let out = json!({
                "quote": preview.quote,
                "minimum_received": preview.minimum_received,
                "rate_label": preview.rate_label,
                "slippage": session.settings().slippage,
                "deadline_minutes": preview.deadline_minutes,
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
            return Ok(());
        }

        let q = &preview.quote;
        println!("Pay:              {} {}", session.pay_amount(), q.from);
        println!("Receive:          {} {}", preview.output_display, q.to);
        println!("Rate:             {}", preview.rate_label);
        println!("Trading fee:      {} {}", preview.fee_display, q.to);
        println!("Price impact:     {}", q.impact_level);
        println!(
            "Minimum received: {} {} ({}% slippage)",
            preview.minimum_received_display,
            q.to,
            session.settings().slippage
        );
        if q.impact_level.needs_warning() {
            println!("Warning: high price impact");
        }
        Ok(())
    }

    fn execute_status_command(service: &SwapService) -> Result<()> {
        let app = service.app();
        let params = service.calculator().params();
        println!("{} v{}", app.name, app.version);
        println!("  network:          {}", app.default_network);
        println!("  tokens:           {}", service.get_all_tokens().len());
        println!("  pairs:            {}", service.get_trading_pairs().len());
        println!("  trading fee:      {}%", params.trading_fee_rate * 100.0);
        println!("  min amount:       {}", params.min_transaction_amount);
        println!("  slippage:         {}% (max {}%)", app.default_slippage, app.max_slippage);
        println!(
            "  deadline:         {}m (max {}m)",
            app.default_deadline_minutes, app.max_deadline_minutes
        );
        Ok(())
    }
}
