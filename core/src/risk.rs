//! Risk tier classification.
//!
//! Two schemes coexist, matching the two ways risk is surfaced:
//!   1. The four-tier scheme (critical/high/medium/low) recomputed from
//!      the churn score against the central `RiskThresholds`.
//!   2. The three-tier badge (`RiskLevel` on the record), which is
//!      upstream model output and is displayed as delivered.
//!
//! A missing churn score classifies as *unscored*, never as low: the
//! signal detector and the tier counts both depend on that distinction.
//! Only arithmetic (sums, averages) flattens a missing score to 0.

use crate::config::RiskThresholds;
use crate::record::CustomerRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskTier {
    Critical,
    High,
    Medium,
    Low,
}

impl RiskTier {
    pub const ALL: [RiskTier; 4] = [Self::Critical, Self::High, Self::Medium, Self::Low];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Critical => "critical",
            Self::High => "high",
            Self::Medium => "medium",
            Self::Low => "low",
        }
    }
}

/// Four-tier classification. Bounds are inclusive on the lower edge of
/// each tier: exactly 70.0 is critical, exactly 50.0 is high. `None`
/// stays `None` — an unscored customer must not silently land in the
/// low tier.
pub fn classify(churn_score: Option<f64>, thresholds: &RiskThresholds) -> Option<RiskTier> {
    let score = churn_score?;
    Some(if score >= thresholds.critical {
        RiskTier::Critical
    } else if score >= thresholds.high {
        RiskTier::High
    } else if score >= thresholds.medium {
        RiskTier::Medium
    } else {
        RiskTier::Low
    })
}

/// Per-tier customer counts, with unscored customers tracked
/// separately. For any snapshot, `total() == snapshot.customers.len()`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TierBreakdown {
    pub critical: usize,
    pub high:     usize,
    pub medium:   usize,
    pub low:      usize,
    pub unscored: usize,
}

impl TierBreakdown {
    pub fn count(&self, tier: RiskTier) -> usize {
        match tier {
            RiskTier::Critical => self.critical,
            RiskTier::High => self.high,
            RiskTier::Medium => self.medium,
            RiskTier::Low => self.low,
        }
    }

    /// Customers that carried a churn score.
    pub fn scored_total(&self) -> usize {
        self.critical + self.high + self.medium + self.low
    }

    pub fn total(&self) -> usize {
        self.scored_total() + self.unscored
    }
}

pub fn tier_breakdown(customers: &[CustomerRecord], thresholds: &RiskThresholds) -> TierBreakdown {
    let mut breakdown = TierBreakdown::default();
    for customer in customers {
        match classify(customer.churn_score, thresholds) {
            Some(RiskTier::Critical) => breakdown.critical += 1,
            Some(RiskTier::High) => breakdown.high += 1,
            Some(RiskTier::Medium) => breakdown.medium += 1,
            Some(RiskTier::Low) => breakdown.low += 1,
            None => breakdown.unscored += 1,
        }
    }
    breakdown
}
