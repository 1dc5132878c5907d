//! Segmentation aggregator — per-dimension risk breakdowns.
//!
//! Partitions the customer snapshot by segment, branch, or product
//! type; computes per-partition totals, risk concentration, and balance
//! figures; and ranks partitions by risk concentration. Everything is
//! recomputed from scratch on each call — snapshots are small (hundreds
//! to low thousands of records) and no partial results survive between
//! snapshots.

use crate::aggregate::{average, count_where, group_by, sum_by, top_n};
use crate::record::{CustomerRecord, RiskLevel};
use serde::{Deserialize, Serialize};

/// A grouping dimension over the customer snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Segment,
    Branch,
    ProductType,
}

impl Dimension {
    pub const ALL: [Dimension; 3] = [Self::Segment, Self::Branch, Self::ProductType];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Segment => "segment",
            Self::Branch => "branch",
            Self::ProductType => "product_type",
        }
    }

    /// Partition key for a customer. Normalization already collapsed
    /// blank values into the "unknown" bucket.
    pub fn key_of(&self, customer: &CustomerRecord) -> String {
        match self {
            Self::Segment => customer.segment.clone(),
            Self::Branch => customer.branch.clone(),
            Self::ProductType => customer.product_type.clone(),
        }
    }
}

/// Derived metrics for one partition of one dimension.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionStats {
    pub key: String,
    pub total: usize,
    pub high_risk_count: usize,
    /// `high_risk_count / total * 100`; 0 for an empty partition.
    pub high_risk_percent: f64,
    pub avg_churn_score: f64,
    pub total_balance: f64,
    pub avg_balance: f64,
}

/// Partition the snapshot by `dimension` and compute the five derived
/// metrics per partition. Partition order is first-seen record order.
/// "High risk" here is the three-tier badge, as the risk screens count
/// it.
pub fn breakdown(customers: &[CustomerRecord], dimension: Dimension) -> Vec<DimensionStats> {
    group_by(customers, |c| dimension.key_of(c))
        .into_iter()
        .map(|(key, members)| {
            let total = members.len();
            let high_risk_count = count_where(&members, |c| c.risk_level == RiskLevel::High);
            let high_risk_percent = if total > 0 {
                (high_risk_count as f64 / total as f64) * 100.0
            } else {
                0.0
            };
            DimensionStats {
                key,
                total,
                high_risk_count,
                high_risk_percent,
                avg_churn_score: average(&members, |c| c.score_or_zero()),
                total_balance: sum_by(&members, |c| c.account_balance),
                avg_balance: average(&members, |c| c.account_balance),
            }
        })
        .collect()
}

/// The `n` partitions with the highest risk concentration. Ranked by
/// `high_risk_percent` descending; ties broken by partition key so the
/// ranking is stable across runs regardless of record order.
pub fn top_risk(stats: &[DimensionStats], n: usize) -> Vec<DimensionStats> {
    top_n(stats, n, |a, b| {
        b.high_risk_percent
            .partial_cmp(&a.high_risk_percent)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.key.cmp(&b.key))
    })
}

/// Portfolio-level aggregates over the whole snapshot, ungrouped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PortfolioStats {
    pub total: usize,
    pub high_risk:   usize,
    pub medium_risk: usize,
    pub low_risk:    usize,
    pub avg_churn_score: f64,
    pub avg_balance:   f64,
    pub total_balance: f64,
}

pub fn portfolio_stats(customers: &[CustomerRecord]) -> PortfolioStats {
    PortfolioStats {
        total: customers.len(),
        high_risk: count_where(customers, |c| c.risk_level == RiskLevel::High),
        medium_risk: count_where(customers, |c| c.risk_level == RiskLevel::Medium),
        low_risk: count_where(customers, |c| c.risk_level == RiskLevel::Low),
        avg_churn_score: average(customers, |c| c.score_or_zero()),
        avg_balance: average(customers, |c| c.account_balance),
        total_balance: sum_by(customers, |c| c.account_balance),
    }
}
