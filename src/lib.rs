//! swapquote - display quotes for token swaps
//! Static token registry, directed rate table, fee and price-impact
//! calculation, amount formatting.

pub mod application;
pub mod domain;
pub mod shared;

// Re-export main types for convenience
pub use application::{SwapService, SwapSession};
pub use domain::quote::{ImpactLevel, Quote, QuoteCalculator};
pub use domain::rate::{PriceFeed, RateTable, TradingPair};
pub use domain::token::{Token, TokenRegistry};
pub use shared::config::MarketConfig;
pub use shared::errors::{ConfigError, QuoteError, SessionError};
