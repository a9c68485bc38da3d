//! Application services and use cases

use std::sync::Arc;

use tracing::info;

use crate::domain::quote::{Quote, QuoteCalculator, QuoteParams};
use crate::domain::rate::{PriceFeed, RateTable};
use crate::domain::token::{Token, TokenRegistry};
use crate::shared::config::{AppCfg, MarketConfig};
use crate::shared::errors::{ConfigError, QuoteError};

/// Entry point for callers: one loaded market, read-only for its lifetime.
#[derive(Debug, Clone)]
pub struct SwapService {
    app: AppCfg,
    calculator: QuoteCalculator,
}

impl SwapService {
    /// Build the registry and rate table from a market document.
    pub fn from_config(cfg: MarketConfig) -> Result<Self, ConfigError> {
        cfg.validate()?;
        let registry = TokenRegistry::from_config(&cfg.tokens)?;
        let rates = RateTable::from_config(&cfg.rates, &registry)?;

        for symbol in [&cfg.app.default_pay_token, &cfg.app.default_receive_token] {
            if !registry.contains(symbol) {
                return Err(ConfigError::InvalidSetting(format!(
                    "default token {} is not registered",
                    symbol
                )));
            }
        }

        info!(
            "market {} v{} loaded: {} tokens, {} pairs",
            cfg.app.name,
            cfg.app.version,
            registry.len(),
            rates.len()
        );

        let params = QuoteParams::from(&cfg);
        Ok(Self {
            app: cfg.app,
            calculator: QuoteCalculator::new(Arc::new(registry), Arc::new(rates), params),
        })
    }

    /// Service over the bundled market.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_config(MarketConfig::bundled()?)
    }

    /// Same market with rates replaced by a snapshot taken from `feed`.
    pub fn with_rate_snapshot(&self, feed: &dyn PriceFeed) -> Self {
        let registry = self.calculator.shared_registry();
        let rates = RateTable::from_feed(&registry, feed);
        info!("rates refreshed from {}: {} pairs", feed.source(), rates.len());
        Self {
            app: self.app.clone(),
            calculator: QuoteCalculator::new(registry, Arc::new(rates), *self.calculator.params()),
        }
    }

    pub fn app(&self) -> &AppCfg {
        &self.app
    }

    pub fn calculator(&self) -> &QuoteCalculator {
        &self.calculator
    }

    pub fn quote(&self, from: &str, to: &str, amount: f64) -> Result<Quote, QuoteError> {
        self.calculator.quote(from, to, amount)
    }

    pub fn format(&self, amount: f64, symbol: &str) -> String {
        self.calculator.registry().format_amount(amount, symbol)
    }

    pub fn get_token(&self, symbol: &str) -> Option<&Token> {
        self.calculator.registry().get(symbol)
    }

    pub fn get_all_tokens(&self) -> Vec<&Token> {
        self.calculator.registry().all()
    }

    /// Directed pair keys like `ETH-USDC`, in configuration order.
    pub fn get_trading_pairs(&self) -> Vec<String> {
        self.calculator
            .rates()
            .pairs()
            .map(|(pair, _)| pair.to_string())
            .collect()
    }

    pub fn exchange_rate_label(&self, from: &str, to: &str) -> Result<String, QuoteError> {
        self.calculator.rate_label(from, to)
    }
}
