//! Central analytics configuration.
//!
//! Every threshold, cutoff, and financial constant the engine uses is
//! defined here exactly once and injected into the components that need
//! it. Call sites never re-declare a threshold locally; a screen that
//! needs the critical-tier cutoff reads it from the same struct the
//! signal detector reads.

use crate::error::EngineResult;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Churn-score cutoffs for the four-tier scheme. Each bound is the
/// inclusive lower edge of its tier: a score of exactly `critical`
/// classifies as critical.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RiskThresholds {
    pub critical: f64,
    pub high:     f64,
    pub medium:   f64,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            critical: 70.0,
            high:     50.0,
            medium:   40.0,
        }
    }
}

/// Cutoffs for the four early-warning predicates.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SignalThresholds {
    /// Minimum churn score for the high-value-at-risk signal.
    pub high_value_score: f64,
    /// Balance must exceed this multiple of the portfolio average.
    pub high_value_balance_multiplier: f64,
    /// Days without a transaction before a customer counts as inactive.
    pub inactive_days: u32,
    /// Complaint count above which the high-complaints signal fires.
    pub complaint_threshold: u32,
    /// Tenure (months) below which a customer is "new".
    pub new_customer_tenure_months: u32,
    /// Minimum churn score for the new-customer-at-risk signal.
    pub new_customer_score: f64,
}

impl Default for SignalThresholds {
    fn default() -> Self {
        Self {
            high_value_score: 70.0,
            high_value_balance_multiplier: 2.0,
            inactive_days: 30,
            complaint_threshold: 2,
            new_customer_tenure_months: 12,
            new_customer_score: 50.0,
        }
    }
}

/// Financial constants for the campaign ROI calculator.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CampaignEconomics {
    /// Flat revenue estimate per retained customer, in currency units.
    /// Applied only when a campaign has no recorded daily revenue, and
    /// always surfaced with the `revenue_estimated` flag set — this is
    /// an estimation heuristic, not a ledger figure.
    pub revenue_per_retained: f64,
    /// ROI reported when a campaign has revenue but no budget
    /// ("positive but undefined").
    pub zero_budget_roi: f64,
}

impl Default for CampaignEconomics {
    fn default() -> Self {
        Self {
            revenue_per_retained: 500_000.0,
            zero_budget_roi: 100.0,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub thresholds: RiskThresholds,
    pub signals:    SignalThresholds,
    pub economics:  CampaignEconomics,
    /// How many partitions the per-dimension "top risk" list keeps.
    pub top_risk_count: usize,
}

impl Default for AnalyticsConfig {
    fn default() -> Self {
        Self {
            thresholds: RiskThresholds::default(),
            signals:    SignalThresholds::default(),
            economics:  CampaignEconomics::default(),
            top_risk_count: 3,
        }
    }
}

impl AnalyticsConfig {
    /// Load a JSON config file. Absent fields fall back to the defaults
    /// above, so a partial override file is valid.
    pub fn from_file(path: impl AsRef<Path>) -> EngineResult<Self> {
        let raw = std::fs::read_to_string(path)?;
        let config = serde_json::from_str(&raw)?;
        Ok(config)
    }
}
