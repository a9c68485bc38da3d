//! Market configuration document

use std::{fs, path::Path};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::shared::errors::ConfigError;

/// Bundled default market, compiled into the binary.
const BUNDLED_MARKET: &str = include_str!("../../config/market.toml");

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppCfg {
    pub name: String,
    pub version: String,
    /// Percent
    pub default_slippage: f64,
    /// Percent
    pub max_slippage: f64,
    pub default_deadline_minutes: u32,
    pub max_deadline_minutes: u32,
    pub min_transaction_amount: f64,
    #[serde(default)]
    pub supported_networks: Vec<String>,
    pub default_network: String,
    pub default_pay_token: String,
    pub default_receive_token: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TokenCfg {
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    #[serde(default)]
    pub icon: String,
    #[serde(default)]
    pub color: String,
    #[serde(default)]
    pub coingecko_id: Option<String>,
    #[serde(default)]
    pub min_fee: f64,
    /// Contract address per network name
    #[serde(default)]
    pub address: IndexMap<String, String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GasEstimatesCfg {
    pub swap: u64,
    pub approve: u64,
    pub transfer: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeesCfg {
    /// Proportional fee taken from the gross output, e.g. 0.003
    pub trading_fee: f64,
    pub gas_estimates: Option<GasEstimatesCfg>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ImpactCfg {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PriceApiCfg {
    pub base_url: String,
    pub price_endpoint: String,
    pub update_interval_ms: u64,
    #[serde(default)]
    pub backup_apis: Vec<String>,
}

/// Complete market document: tokens, directed rates and quoting constants.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MarketConfig {
    pub app: AppCfg,
    pub tokens: Vec<TokenCfg>,
    /// `"FROM-TO" = rate`, kept in document order
    pub rates: IndexMap<String, f64>,
    pub fees: FeesCfg,
    pub impact: ImpactCfg,
    pub price_api: Option<PriceApiCfg>,
}

impl MarketConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let s = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        debug!("loaded market config from {}", path.display());
        Self::from_toml_str(&s)
    }

    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let cfg: Self = toml::from_str(s)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// The market shipped with the crate.
    pub fn bundled() -> Result<Self, ConfigError> {
        Self::from_toml_str(BUNDLED_MARKET)
    }

    /// Scalar checks. Token and rate consistency is checked when the
    /// registry and rate table are built.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let fee = self.fees.trading_fee;
        if !fee.is_finite() || !(0.0..1.0).contains(&fee) {
            return Err(ConfigError::InvalidFee(format!(
                "trading_fee must be in [0, 1), got {}",
                fee
            )));
        }

        let min = self.app.min_transaction_amount;
        if !min.is_finite() || min <= 0.0 {
            return Err(ConfigError::InvalidSetting(format!(
                "min_transaction_amount must be positive, got {}",
                min
            )));
        }

        let ImpactCfg { low, medium, high } = self.impact;
        let ascending = [low, medium, high].iter().all(|t| t.is_finite() && *t > 0.0)
            && low < medium
            && medium < high;
        if !ascending {
            return Err(ConfigError::InvalidThresholds(format!(
                "expected 0 < low < medium < high, got {} / {} / {}",
                low, medium, high
            )));
        }

        let app = &self.app;
        if !(app.max_slippage > 0.0 && app.max_slippage <= 100.0) {
            return Err(ConfigError::InvalidSetting(format!(
                "max_slippage must be in (0, 100], got {}",
                app.max_slippage
            )));
        }
        if !(app.default_slippage > 0.0 && app.default_slippage <= app.max_slippage) {
            return Err(ConfigError::InvalidSetting(format!(
                "default_slippage must be in (0, {}], got {}",
                app.max_slippage, app.default_slippage
            )));
        }
        if app.default_deadline_minutes == 0
            || app.default_deadline_minutes > app.max_deadline_minutes
        {
            return Err(ConfigError::InvalidSetting(format!(
                "default_deadline_minutes must be in [1, {}], got {}",
                app.max_deadline_minutes, app.default_deadline_minutes
            )));
        }
        if !app.supported_networks.is_empty()
            && !app.supported_networks.contains(&app.default_network)
        {
            return Err(ConfigError::InvalidSetting(format!(
                "default_network {} is not in supported_networks",
                app.default_network
            )));
        }

        Ok(())
    }
}
