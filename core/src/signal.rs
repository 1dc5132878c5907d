//! Early-warning signal detector.
//!
//! Four named predicates evaluated per customer and counted across the
//! snapshot. The predicates are independent — one customer can trip
//! several signals, so the counts are not mutually exclusive and may
//! sum past the snapshot size. The detector is a pure counting pass; a
//! caller that needs the matching customers re-filters with the same
//! public predicate.

use crate::config::SignalThresholds;
use crate::record::CustomerRecord;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EarlySignal {
    HighValueAtRisk,
    Inactive,
    HighComplaints,
    NewCustomerAtRisk,
}

impl EarlySignal {
    pub const ALL: [EarlySignal; 4] = [
        Self::HighValueAtRisk,
        Self::Inactive,
        Self::HighComplaints,
        Self::NewCustomerAtRisk,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::HighValueAtRisk => "high_value_at_risk",
            Self::Inactive => "inactive",
            Self::HighComplaints => "high_complaints",
            Self::NewCustomerAtRisk => "new_customer_at_risk",
        }
    }
}

/// Critically scored customer holding well above the average balance.
/// Unscored customers never match.
pub fn is_high_value_at_risk(
    customer: &CustomerRecord,
    portfolio_avg_balance: f64,
    thresholds: &SignalThresholds,
) -> bool {
    matches!(customer.churn_score, Some(score) if score >= thresholds.high_value_score)
        && customer.account_balance
            > thresholds.high_value_balance_multiplier * portfolio_avg_balance
}

/// No transaction in over `inactive_days`. Normalization already set
/// absent activity data to 90 days, so missing data counts as inactive.
pub fn is_inactive(customer: &CustomerRecord, thresholds: &SignalThresholds) -> bool {
    customer.days_since_last_transaction > thresholds.inactive_days
}

pub fn is_high_complaints(customer: &CustomerRecord, thresholds: &SignalThresholds) -> bool {
    customer.complaints > thresholds.complaint_threshold
}

/// Recently onboarded customer already scoring high.
pub fn is_new_customer_at_risk(
    customer: &CustomerRecord,
    thresholds: &SignalThresholds,
) -> bool {
    customer.tenure_months < thresholds.new_customer_tenure_months
        && matches!(customer.churn_score, Some(score) if score >= thresholds.new_customer_score)
}

/// Flat signal → count map for one snapshot.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SignalCounts {
    pub high_value_at_risk:   usize,
    pub inactive:             usize,
    pub high_complaints:      usize,
    pub new_customer_at_risk: usize,
}

impl SignalCounts {
    pub fn count(&self, signal: EarlySignal) -> usize {
        match signal {
            EarlySignal::HighValueAtRisk => self.high_value_at_risk,
            EarlySignal::Inactive => self.inactive,
            EarlySignal::HighComplaints => self.high_complaints,
            EarlySignal::NewCustomerAtRisk => self.new_customer_at_risk,
        }
    }

    /// `(signal name, count)` pairs in stable declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&'static str, usize)> + '_ {
        EarlySignal::ALL.into_iter().map(|s| (s.name(), self.count(s)))
    }
}

/// Count every signal across the snapshot in a single pass.
/// `portfolio_avg_balance` is the ungrouped snapshot average — compute
/// it once (see `segmentation::portfolio_stats`) and pass it in.
pub fn detect(
    customers: &[CustomerRecord],
    portfolio_avg_balance: f64,
    thresholds: &SignalThresholds,
) -> SignalCounts {
    let mut counts = SignalCounts::default();
    for customer in customers {
        if is_high_value_at_risk(customer, portfolio_avg_balance, thresholds) {
            counts.high_value_at_risk += 1;
        }
        if is_inactive(customer, thresholds) {
            counts.inactive += 1;
        }
        if is_high_complaints(customer, thresholds) {
            counts.high_complaints += 1;
        }
        if is_new_customer_at_risk(customer, thresholds) {
            counts.new_customer_at_risk += 1;
        }
    }
    counts
}
