//! Quote calculation over the token registry and rate table

use std::sync::Arc;

use tracing::debug;

use super::{ImpactThresholds, Quote};
use crate::domain::rate::RateTable;
use crate::domain::token::{canonical_symbol, TokenRegistry};
use crate::shared::config::MarketConfig;
use crate::shared::errors::QuoteError;
use crate::shared::utils::{format_grouped, MAX_DISPLAY_DECIMALS};

/// Quoting constants
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuoteParams {
    /// Proportional fee taken from the gross output
    pub trading_fee_rate: f64,
    /// Smallest pay amount accepted
    pub min_transaction_amount: f64,
    pub impact: ImpactThresholds,
}

impl Default for QuoteParams {
    fn default() -> Self {
        Self {
            trading_fee_rate: 0.003,
            min_transaction_amount: 0.000001,
            impact: ImpactThresholds::default(),
        }
    }
}

impl From<&MarketConfig> for QuoteParams {
    fn from(cfg: &MarketConfig) -> Self {
        Self {
            trading_fee_rate: cfg.fees.trading_fee,
            min_transaction_amount: cfg.app.min_transaction_amount,
            impact: cfg.impact.into(),
        }
    }
}

/// Pure quote calculator. Shares the read-only tables, never mutates them.
#[derive(Debug, Clone)]
pub struct QuoteCalculator {
    registry: Arc<TokenRegistry>,
    rates: Arc<RateTable>,
    params: QuoteParams,
}

impl QuoteCalculator {
    pub fn new(registry: Arc<TokenRegistry>, rates: Arc<RateTable>, params: QuoteParams) -> Self {
        Self {
            registry,
            rates,
            params,
        }
    }

    pub fn registry(&self) -> &TokenRegistry {
        &self.registry
    }

    pub fn shared_registry(&self) -> Arc<TokenRegistry> {
        Arc::clone(&self.registry)
    }

    pub fn rates(&self) -> &RateTable {
        &self.rates
    }

    pub fn params(&self) -> &QuoteParams {
        &self.params
    }

    /// Quote `amount` of `from` into `to`.
    pub fn quote(&self, from: &str, to: &str, amount: f64) -> Result<Quote, QuoteError> {
        if !amount.is_finite() || amount < self.params.min_transaction_amount {
            return Err(QuoteError::InvalidAmount(amount.to_string()));
        }
        let (from, to, rate) = self.resolve(from, to)?;

        let gross_output = amount * rate;
        if !gross_output.is_finite() {
            return Err(QuoteError::InvalidAmount(amount.to_string()));
        }
        let fee = gross_output * self.params.trading_fee_rate;
        let net_output = gross_output - fee;
        let impact_level = self.params.impact.classify(amount);

        debug!(
            "quote {} {} -> {} {} (rate {}, fee {}, impact {})",
            amount, from, net_output, to, rate, fee, impact_level
        );

        Ok(Quote {
            from,
            to,
            input_amount: amount,
            rate,
            gross_output,
            fee,
            net_output,
            impact_level,
        })
    }

    /// Canonical symbols and the directed rate, or the reason there is none.
    pub fn resolve(&self, from: &str, to: &str) -> Result<(String, String, f64), QuoteError> {
        let from = canonical_symbol(from);
        let to = canonical_symbol(to);
        if from == to {
            return Err(QuoteError::SameToken(from));
        }
        for symbol in [&from, &to] {
            if !self.registry.contains(symbol) {
                return Err(QuoteError::UnknownToken(symbol.clone()));
            }
        }
        match self.rates.lookup(&from, &to) {
            Some(rate) => Ok((from, to, rate)),
            None => Err(QuoteError::RateUnavailable { from, to }),
        }
    }

    /// Label like `1 ETH = 2,100.5 USDC`.
    pub fn rate_label(&self, from: &str, to: &str) -> Result<String, QuoteError> {
        let (from, to, rate) = self.resolve(from, to)?;
        Ok(format!(
            "1 {} = {} {}",
            from,
            format_grouped(rate, MAX_DISPLAY_DECIMALS as usize),
            to
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::quote::ImpactLevel;
    use crate::domain::rate::TradingPair;
    use crate::domain::token::Token;

    const TOL: f64 = 1e-9;

    fn calculator(pairs: &[(&str, &str, f64)]) -> QuoteCalculator {
        let registry = TokenRegistry::new(vec![
            Token::new("ETH", "Ethereum", 18),
            Token::new("USDC", "USD Coin", 6),
            Token::new("BTC", "Bitcoin", 8),
        ])
        .unwrap();
        let rates = RateTable::new(
            pairs
                .iter()
                .map(|(from, to, rate)| (TradingPair::new(from, to), *rate)),
            &registry,
        )
        .unwrap();
        QuoteCalculator::new(Arc::new(registry), Arc::new(rates), QuoteParams::default())
    }

    #[test]
    fn test_eth_usdc_quote() {
        let calc = calculator(&[("ETH", "USDC", 2100.50)]);
        let q = calc.quote("ETH", "USDC", 1.0).unwrap();
        assert!((q.gross_output - 2100.50).abs() < TOL);
        assert!((q.fee - 6.3015).abs() < TOL);
        assert!((q.net_output - 2094.1985).abs() < TOL);
        assert_eq!(q.rate, 2100.50);
        assert_eq!(q.impact_level, ImpactLevel::Medium);
    }

    #[test]
    fn test_symbols_are_canonicalized() {
        let calc = calculator(&[("ETH", "USDC", 2100.50)]);
        let q = calc.quote("eth", "Usdc", 2.0).unwrap();
        assert_eq!(q.from, "ETH");
        assert_eq!(q.to, "USDC");
    }

    #[test]
    fn test_invalid_amounts() {
        let calc = calculator(&[("ETH", "USDC", 2100.50)]);
        for amount in [0.0, -1.0, 0.0000001, f64::NAN, f64::INFINITY] {
            assert!(matches!(
                calc.quote("ETH", "USDC", amount),
                Err(QuoteError::InvalidAmount(_))
            ));
        }
        assert!(calc.quote("ETH", "USDC", 0.000001).is_ok());
    }

    #[test]
    fn test_same_token() {
        let calc = calculator(&[("ETH", "USDC", 2100.50)]);
        assert_eq!(
            calc.quote("ETH", "eth", 1.0),
            Err(QuoteError::SameToken("ETH".to_string()))
        );
    }

    #[test]
    fn test_unknown_token() {
        let calc = calculator(&[("ETH", "USDC", 2100.50)]);
        assert_eq!(
            calc.quote("ETH", "DOGE", 1.0),
            Err(QuoteError::UnknownToken("DOGE".to_string()))
        );
    }

    #[test]
    fn test_reverse_pair_is_not_inferred() {
        let calc = calculator(&[("ETH", "USDC", 2100.50)]);
        assert_eq!(
            calc.quote("USDC", "ETH", 100.0),
            Err(QuoteError::RateUnavailable {
                from: "USDC".to_string(),
                to: "ETH".to_string(),
            })
        );
    }

    #[test]
    fn test_amount_checked_before_tokens() {
        let calc = calculator(&[]);
        assert!(matches!(
            calc.quote("ETH", "ETH", 0.0),
            Err(QuoteError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_rate_label() {
        let calc = calculator(&[("ETH", "USDC", 2100.50), ("ETH", "BTC", 0.065432)]);
        assert_eq!(calc.rate_label("eth", "usdc").unwrap(), "1 ETH = 2,100.5 USDC");
        assert_eq!(calc.rate_label("ETH", "BTC").unwrap(), "1 ETH = 0.065432 BTC");
        assert!(calc.rate_label("BTC", "ETH").is_err());
    }

    #[test]
    fn test_rate_label_ignores_receive_token_decimals() {
        let registry = TokenRegistry::new(vec![
            Token::new("AAA", "Token A", 2),
            Token::new("BBB", "Token B", 2),
        ])
        .unwrap();
        let rates = RateTable::new(vec![(TradingPair::new("AAA", "BBB"), 0.001)], &registry).unwrap();
        let calc = QuoteCalculator::new(Arc::new(registry), Arc::new(rates), QuoteParams::default());
        assert_eq!(calc.rate_label("AAA", "BBB").unwrap(), "1 AAA = 0.001 BBB");
    }

    #[test]
    fn test_overflowing_output_is_invalid_amount() {
        let calc = calculator(&[("BTC", "USDC", 43000.0)]);
        assert!(matches!(
            calc.quote("BTC", "USDC", 1e308),
            Err(QuoteError::InvalidAmount(_))
        ));
        let q = calc.quote("BTC", "USDC", 1e300).unwrap();
        assert!(q.net_output.is_finite());
        assert!(q.net_output >= 0.0);
    }
}
