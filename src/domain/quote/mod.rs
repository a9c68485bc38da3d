//! Quote domain - swap quotes, fees and price impact

mod price_impact;
mod quote_calculator;

pub use price_impact::{ImpactLevel, ImpactThresholds};
pub use quote_calculator::{QuoteCalculator, QuoteParams};

use serde::{Deserialize, Serialize};

/// Display quote for a single directed swap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub from: String,
    pub to: String,
    pub input_amount: f64,
    /// Rate used, `1 from = rate to`
    pub rate: f64,
    pub gross_output: f64,
    /// Trading fee, in receive-token units
    pub fee: f64,
    pub net_output: f64,
    pub impact_level: ImpactLevel,
}
