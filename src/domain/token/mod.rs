//! Token domain - token metadata and the registry

mod token_registry;

pub use token_registry::TokenRegistry;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::shared::config::TokenCfg;
use crate::shared::utils::MAX_DISPLAY_DECIMALS;

/// Canonical form of a token symbol: trimmed, uppercase.
pub fn canonical_symbol(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}

/// Token representation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Token {
    pub symbol: String,
    pub name: String,
    pub decimals: u8,
    pub min_fee: f64,
    pub icon: String,
    pub color: String,
    pub coingecko_id: Option<String>,
    pub addresses: IndexMap<String, String>,
}

impl Token {
    pub fn new(symbol: &str, name: &str, decimals: u8) -> Self {
        Self {
            symbol: canonical_symbol(symbol),
            name: name.to_string(),
            decimals,
            min_fee: 0.0,
            icon: String::new(),
            color: String::new(),
            coingecko_id: None,
            addresses: IndexMap::new(),
        }
    }

    /// Fraction digits used when rendering amounts of this token.
    pub fn display_decimals(&self) -> u8 {
        self.decimals.min(MAX_DISPLAY_DECIMALS)
    }

    pub fn address(&self, network: &str) -> Option<&str> {
        self.addresses.get(network).map(String::as_str)
    }
}

impl From<&TokenCfg> for Token {
    fn from(cfg: &TokenCfg) -> Self {
        Self {
            symbol: canonical_symbol(&cfg.symbol),
            name: cfg.name.clone(),
            decimals: cfg.decimals,
            min_fee: cfg.min_fee,
            icon: cfg.icon.clone(),
            color: cfg.color.clone(),
            coingecko_id: cfg.coingecko_id.clone(),
            addresses: cfg.address.clone(),
        }
    }
}
