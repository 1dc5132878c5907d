//! Analysis assembly — one snapshot in, one immutable result out.
//!
//! `analyze` is the single entry point every risk screen shares:
//! portfolio aggregates, tier breakdowns, per-dimension segmentations
//! with their top-risk rankings, early-warning signal counts, and
//! recommendation statistics, all computed from the same snapshot with
//! the same injected config. The result has no identity and no
//! persistence; the next snapshot produces a fresh one.

use crate::aggregate::{average, count_where, sum_by};
use crate::config::AnalyticsConfig;
use crate::record::{
    CustomerRecord, ExpectedImpact, RecommendationRecord, RecommendationStatus,
};
use crate::risk::{classify, tier_breakdown, RiskTier, TierBreakdown};
use crate::segmentation::{
    breakdown, portfolio_stats, top_risk, Dimension, DimensionStats, PortfolioStats,
};
use crate::signal::{detect, SignalCounts};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Per-tier statistics over the scored population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TierStats {
    pub tier:  RiskTier,
    pub count: usize,
    /// Share of the scored population, as a percentage.
    pub percent: f64,
    pub avg_balance: f64,
    pub avg_score:   f64,
}

/// One dimension's partitions plus its top-risk ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DimensionBreakdown {
    pub dimension: Dimension,
    pub partitions: Vec<DimensionStats>,
    pub top_risk:   Vec<DimensionStats>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecommendationStats {
    pub total:       usize,
    pub pending:     usize,
    pub approved:    usize,
    pub implemented: usize,
    pub rejected:    usize,
    pub high_impact:   usize,
    pub medium_impact: usize,
    pub low_impact:    usize,
    pub avg_confidence: f64,
}

/// The engine's output value object. Created fresh on every analysis
/// call; never mutated once returned.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub generated_at: DateTime<Utc>,
    pub portfolio: PortfolioStats,
    pub tiers: TierBreakdown,
    pub tier_stats: Vec<TierStats>,
    /// Customers classified critical or high.
    pub predicted_churners: usize,
    /// Summed balances of the critical and high tiers.
    pub at_risk_balance: f64,
    pub breakdowns: Vec<DimensionBreakdown>,
    pub signals: SignalCounts,
    pub recommendations: RecommendationStats,
}

/// Run the full analysis over a snapshot. Pure and synchronous; an
/// empty snapshot degrades every figure to zero rather than erroring.
pub fn analyze(
    customers: &[CustomerRecord],
    recommendations: &[RecommendationRecord],
    config: &AnalyticsConfig,
) -> AnalysisResult {
    let portfolio = portfolio_stats(customers);
    let tiers = tier_breakdown(customers, &config.thresholds);

    let tier_stats: Vec<TierStats> = RiskTier::ALL
        .into_iter()
        .map(|tier| {
            let members: Vec<&CustomerRecord> = customers
                .iter()
                .filter(|c| classify(c.churn_score, &config.thresholds) == Some(tier))
                .collect();
            let scored_total = tiers.scored_total();
            TierStats {
                tier,
                count: members.len(),
                percent: if scored_total > 0 {
                    (members.len() as f64 / scored_total as f64) * 100.0
                } else {
                    0.0
                },
                avg_balance: average(&members, |c| c.account_balance),
                avg_score: average(&members, |c| c.score_or_zero()),
            }
        })
        .collect();

    let at_risk_balance = sum_by(customers, |c| {
        match classify(c.churn_score, &config.thresholds) {
            Some(RiskTier::Critical) | Some(RiskTier::High) => c.account_balance,
            _ => 0.0,
        }
    });

    let breakdowns = Dimension::ALL
        .into_iter()
        .map(|dimension| {
            let partitions = breakdown(customers, dimension);
            let top = top_risk(&partitions, config.top_risk_count);
            DimensionBreakdown {
                dimension,
                partitions,
                top_risk: top,
            }
        })
        .collect();

    let signals = detect(customers, portfolio.avg_balance, &config.signals);

    let result = AnalysisResult {
        generated_at: Utc::now(),
        predicted_churners: tiers.critical + tiers.high,
        at_risk_balance,
        portfolio,
        tiers,
        tier_stats,
        breakdowns,
        signals,
        recommendations: recommendation_stats(recommendations),
    };

    log::info!(
        "analysis complete: {} customers ({} unscored), {} predicted churners, at-risk balance {:.0}",
        result.portfolio.total,
        result.tiers.unscored,
        result.predicted_churners,
        result.at_risk_balance,
    );

    result
}

pub fn recommendation_stats(recommendations: &[RecommendationRecord]) -> RecommendationStats {
    RecommendationStats {
        total: recommendations.len(),
        pending: count_where(recommendations, |r| r.status == RecommendationStatus::Pending),
        approved: count_where(recommendations, |r| r.status == RecommendationStatus::Approved),
        implemented: count_where(recommendations, |r| {
            r.status == RecommendationStatus::Implemented
        }),
        rejected: count_where(recommendations, |r| r.status == RecommendationStatus::Rejected),
        high_impact: count_where(recommendations, |r| r.expected_impact == ExpectedImpact::High),
        medium_impact: count_where(recommendations, |r| {
            r.expected_impact == ExpectedImpact::Medium
        }),
        low_impact: count_where(recommendations, |r| r.expected_impact == ExpectedImpact::Low),
        avg_confidence: average(recommendations, |r| r.confidence_score),
    }
}
