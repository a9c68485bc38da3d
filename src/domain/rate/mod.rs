//! Rate domain - directed exchange rates and their sources

mod price_feed;
mod rate_table;

pub use price_feed::{PriceFeed, StaticPriceFeed};
pub use rate_table::RateTable;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::domain::token::canonical_symbol;
use crate::shared::errors::ConfigError;

/// Ordered token pair. `ETH-USDC` and `USDC-ETH` are distinct pairs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TradingPair {
    pub from: String,
    pub to: String,
}

impl TradingPair {
    pub fn new(from: &str, to: &str) -> Self {
        Self {
            from: canonical_symbol(from),
            to: canonical_symbol(to),
        }
    }

    pub fn reversed(&self) -> Self {
        Self {
            from: self.to.clone(),
            to: self.from.clone(),
        }
    }
}

impl fmt::Display for TradingPair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.from, self.to)
    }
}

impl FromStr for TradingPair {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.split_once('-') {
            Some((from, to)) => {
                let pair = Self::new(from, to);
                if pair.from.is_empty() || pair.to.is_empty() || pair.to.contains('-') {
                    return Err(ConfigError::InvalidPairKey(s.to_string()));
                }
                if pair.from == pair.to {
                    return Err(ConfigError::InvalidPairKey(s.to_string()));
                }
                Ok(pair)
            }
            None => Err(ConfigError::InvalidPairKey(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_pair_key() {
        let pair: TradingPair = "eth-usdc".parse().unwrap();
        assert_eq!(pair, TradingPair::new("ETH", "USDC"));
        assert_eq!(pair.to_string(), "ETH-USDC");
        assert_eq!(pair.reversed().to_string(), "USDC-ETH");
    }

    #[test]
    fn test_reject_malformed_keys() {
        for key in ["ETHUSDC", "-USDC", "ETH-", "ETH-ETH", "A-B-C"] {
            assert!(
                matches!(key.parse::<TradingPair>(), Err(ConfigError::InvalidPairKey(_))),
                "{} should be rejected",
                key
            );
        }
    }
}
