use std::fmt;

use serde::{Deserialize, Serialize};

use crate::shared::config::ImpactCfg;

/// Price impact severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ImpactLevel {
    Low,
    Medium,
    High,
    VeryHigh,
}

impl ImpactLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            ImpactLevel::Low => "low",
            ImpactLevel::Medium => "medium",
            ImpactLevel::High => "high",
            ImpactLevel::VeryHigh => "very-high",
        }
    }

    /// Whether the UI should show a warning before swapping.
    pub fn needs_warning(&self) -> bool {
        matches!(self, ImpactLevel::High | ImpactLevel::VeryHigh)
    }
}

impl fmt::Display for ImpactLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Exclusive upper bounds for the first three buckets. A metric equal to a
/// bound falls into the next, more severe bucket.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactThresholds {
    pub low: f64,
    pub medium: f64,
    pub high: f64,
}

impl Default for ImpactThresholds {
    fn default() -> Self {
        Self {
            low: 1.0,
            medium: 3.0,
            high: 5.0,
        }
    }
}

impl From<ImpactCfg> for ImpactThresholds {
    fn from(cfg: ImpactCfg) -> Self {
        Self {
            low: cfg.low,
            medium: cfg.medium,
            high: cfg.high,
        }
    }
}

impl ImpactThresholds {
    /// Classify the pay amount.
    pub fn classify(&self, metric: f64) -> ImpactLevel {
        match metric {
            m if m < self.low => ImpactLevel::Low,
            m if m < self.medium => ImpactLevel::Medium,
            m if m < self.high => ImpactLevel::High,
            _ => ImpactLevel::VeryHigh,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_buckets() {
        let t = ImpactThresholds::default();
        assert_eq!(t.classify(0.5), ImpactLevel::Low);
        assert_eq!(t.classify(2.0), ImpactLevel::Medium);
        assert_eq!(t.classify(4.99), ImpactLevel::High);
        assert_eq!(t.classify(250.0), ImpactLevel::VeryHigh);
    }

    #[test]
    fn test_boundary_goes_to_higher_bucket() {
        let t = ImpactThresholds::default();
        assert_eq!(t.classify(1.0), ImpactLevel::Medium);
        assert_eq!(t.classify(3.0), ImpactLevel::High);
        assert_eq!(t.classify(5.0), ImpactLevel::VeryHigh);
    }

    #[test]
    fn test_severity_order() {
        assert!(ImpactLevel::Low < ImpactLevel::Medium);
        assert!(ImpactLevel::High < ImpactLevel::VeryHigh);
        assert!(!ImpactLevel::Medium.needs_warning());
        assert!(ImpactLevel::High.needs_warning());
    }

    #[test]
    fn test_serializes_kebab_case() {
        let json = serde_json::to_string(&ImpactLevel::VeryHigh).unwrap();
        assert_eq!(json, "\"very-high\"");
        assert_eq!(ImpactLevel::VeryHigh.to_string(), "very-high");
    }
}
