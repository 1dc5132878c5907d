//! Campaign effectiveness & ROI calculator.
//!
//! Per-campaign funnel rates and financial return, plus the
//! portfolio-level rollups the campaign and budget screens share.
//! Revenue falls back to a flat per-retained-customer estimate when no
//! daily metrics were recorded; that path always sets
//! `revenue_estimated` so an estimate is never conflated with ledger
//! revenue downstream.

use crate::aggregate::{count_where, sum_by};
use crate::config::CampaignEconomics;
use crate::record::{CampaignRecord, CampaignStatus};
use crate::types::CampaignId;
use serde::{Deserialize, Serialize};

/// Funnel rates and return figures for a single campaign.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignPerformance {
    pub campaign_id: CampaignId,
    pub name:   String,
    pub status: CampaignStatus,
    pub targeted:  u32,
    pub contacted: u32,
    pub responded: u32,
    pub retained:  u32,
    /// contacted / targeted, as a percentage; 0 when nothing targeted.
    pub contact_rate: f64,
    /// retained / contacted, as a percentage; 0 when nothing contacted.
    pub retention_rate: f64,
    pub budget:           f64,
    pub allocated_budget: f64,
    pub revenue: f64,
    /// True when `revenue` came from the flat per-retained estimate
    /// rather than recorded daily metrics.
    pub revenue_estimated: bool,
    pub roi: f64,
    pub cost_per_conversion: f64,
}

/// Evaluate one campaign record against the central economics constants.
pub fn evaluate(campaign: &CampaignRecord, economics: &CampaignEconomics) -> CampaignPerformance {
    let targeted = campaign.target_count;
    let contacted = campaign.contacted_count;
    let retained = campaign.converted_count;

    let contact_rate = rate(contacted, targeted);
    let retention_rate = rate(retained, contacted);

    let recorded = campaign.recorded_revenue();
    let (revenue, revenue_estimated) = if recorded > 0.0 {
        (recorded, false)
    } else if retained > 0 {
        let estimate = retained as f64 * economics.revenue_per_retained;
        log::warn!(
            "campaign '{}': no recorded revenue, estimating {estimate:.0} from {retained} retained",
            campaign.id,
        );
        (estimate, true)
    } else {
        (0.0, false)
    };

    CampaignPerformance {
        campaign_id: campaign.id.clone(),
        name: campaign.name.clone(),
        status: campaign.status,
        targeted,
        contacted,
        responded: campaign.responded_count,
        retained,
        contact_rate,
        retention_rate,
        budget: campaign.budget,
        allocated_budget: campaign.allocated_budget,
        revenue,
        revenue_estimated,
        roi: roi(revenue, campaign.budget, economics),
        cost_per_conversion: if campaign.budget > 0.0 && retained > 0 {
            campaign.budget / retained as f64
        } else {
            0.0
        },
    }
}

/// Return on investment as a percentage. With no budget the ratio is
/// undefined: positive revenue reports the configured sentinel
/// ("positive but undefined"), zero revenue reports 0.
pub fn roi(revenue: f64, budget: f64, economics: &CampaignEconomics) -> f64 {
    if budget > 0.0 {
        ((revenue - budget) / budget) * 100.0
    } else if revenue > 0.0 {
        economics.zero_budget_roi
    } else {
        0.0
    }
}

fn rate(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    (numerator as f64 / denominator as f64) * 100.0
}

/// Rollup across every campaign in the snapshot. Average rates are
/// ratios of the summed funnel counters, not means of per-campaign
/// rates.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CampaignPortfolio {
    pub total_campaigns:  usize,
    pub active_campaigns: usize,
    pub total_targeted:  u64,
    pub total_contacted: u64,
    pub total_retained:  u64,
    pub avg_contact_rate:   f64,
    pub avg_retention_rate: f64,
}

pub fn portfolio(performances: &[CampaignPerformance]) -> CampaignPortfolio {
    let total_targeted = sum_by(performances, |p| p.targeted as f64);
    let total_contacted = sum_by(performances, |p| p.contacted as f64);
    let total_retained = sum_by(performances, |p| p.retained as f64);

    CampaignPortfolio {
        total_campaigns: performances.len(),
        active_campaigns: count_where(performances, |p| p.status == CampaignStatus::Active),
        total_targeted: total_targeted as u64,
        total_contacted: total_contacted as u64,
        total_retained: total_retained as u64,
        avg_contact_rate: if total_targeted > 0.0 {
            (total_contacted / total_targeted) * 100.0
        } else {
            0.0
        },
        avg_retention_rate: if total_contacted > 0.0 {
            (total_retained / total_contacted) * 100.0
        } else {
            0.0
        },
    }
}

/// Pre-aggregated totals as the budget/ROI summary service delivers
/// them. The engine only derives ratios from these.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BudgetTotals {
    pub total_budget:    f64,
    pub total_allocated: f64,
    pub total_revenue:   f64,
    pub total_conversions: u32,
}

/// Portfolio-level budget view.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetSummary {
    pub total_budget:    f64,
    pub total_allocated: f64,
    /// total_budget − total_allocated.
    pub remaining: f64,
    /// allocated / total, as a percentage; 0 when no budget exists.
    pub utilization_percent: f64,
    pub total_revenue:     f64,
    pub total_conversions: u32,
    pub overall_roi: f64,
    /// total_budget / total_conversions; 0 when nothing converted.
    pub cost_per_conversion: f64,
    /// True when any contributing revenue figure was estimated.
    pub revenue_estimated: bool,
}

/// Derive the budget view from per-campaign performances.
pub fn budget_summary(
    performances: &[CampaignPerformance],
    economics: &CampaignEconomics,
) -> BudgetSummary {
    let totals = BudgetTotals {
        total_budget: sum_by(performances, |p| p.budget),
        total_allocated: sum_by(performances, |p| p.allocated_budget),
        total_revenue: sum_by(performances, |p| p.revenue),
        total_conversions: sum_by(performances, |p| p.retained as f64) as u32,
    };
    let mut summary = budget_summary_from_totals(&totals, economics);
    summary.revenue_estimated = performances.iter().any(|p| p.revenue_estimated);
    summary
}

/// Derive the budget view from service-provided totals. Revenue here is
/// ledger-backed by definition, so the estimate flag stays false.
pub fn budget_summary_from_totals(
    totals: &BudgetTotals,
    economics: &CampaignEconomics,
) -> BudgetSummary {
    BudgetSummary {
        total_budget: totals.total_budget,
        total_allocated: totals.total_allocated,
        remaining: totals.total_budget - totals.total_allocated,
        utilization_percent: if totals.total_budget > 0.0 {
            (totals.total_allocated / totals.total_budget) * 100.0
        } else {
            0.0
        },
        total_revenue: totals.total_revenue,
        total_conversions: totals.total_conversions,
        overall_roi: roi(totals.total_revenue, totals.total_budget, economics),
        cost_per_conversion: if totals.total_conversions > 0 {
            totals.total_budget / totals.total_conversions as f64
        } else {
            0.0
        },
        revenue_estimated: false,
    }
}
