//! Upstream sources and the analytics engine.
//!
//! The engine owns three collaborator seams — customers, campaigns,
//! recommendations — plus the optional pre-aggregated budget totals the
//! campaign service may provide. `refresh()` fetches everything first,
//! then normalizes and analyzes. Any fetch failure propagates before
//! analysis starts: the engine never computes over a partial snapshot.

use crate::analysis::{analyze, AnalysisResult};
use crate::campaign::{
    budget_summary, budget_summary_from_totals, evaluate, portfolio, BudgetSummary,
    BudgetTotals, CampaignPerformance, CampaignPortfolio,
};
use crate::config::AnalyticsConfig;
use crate::error::EngineResult;
use crate::record::{RawCampaignRecord, RawCustomerRecord, RawRecommendationRecord};
use crate::snapshot::Snapshot;

pub trait CustomerSource {
    fn fetch_customers(&self) -> EngineResult<Vec<RawCustomerRecord>>;
}

pub trait CampaignSource {
    fn fetch_campaigns(&self) -> EngineResult<Vec<RawCampaignRecord>>;

    /// Pre-aggregated budget totals, when the service provides them.
    /// `None` means the engine derives the budget view from the
    /// campaign records instead.
    fn fetch_budget_totals(&self) -> EngineResult<Option<BudgetTotals>> {
        Ok(None)
    }
}

pub trait RecommendationSource {
    fn fetch_recommendations(&self) -> EngineResult<Vec<RawRecommendationRecord>>;
}

/// Everything one refresh produces. Immutable once returned; the next
/// refresh replaces it wholesale.
#[derive(Debug, Clone)]
pub struct AnalysisBundle {
    pub snapshot: Snapshot,
    pub analysis: AnalysisResult,
    pub campaigns: Vec<CampaignPerformance>,
    pub campaign_portfolio: CampaignPortfolio,
    pub budget: BudgetSummary,
}

pub struct AnalyticsEngine {
    config: AnalyticsConfig,
    customers: Box<dyn CustomerSource>,
    campaigns: Box<dyn CampaignSource>,
    recommendations: Box<dyn RecommendationSource>,
}

impl AnalyticsEngine {
    pub fn new(
        config: AnalyticsConfig,
        customers: Box<dyn CustomerSource>,
        campaigns: Box<dyn CampaignSource>,
        recommendations: Box<dyn RecommendationSource>,
    ) -> Self {
        Self {
            config,
            customers,
            campaigns,
            recommendations,
        }
    }

    pub fn config(&self) -> &AnalyticsConfig {
        &self.config
    }

    /// Fetch a fresh snapshot and run the full analysis over it.
    ///
    /// All fetches complete before any computation: a failing source
    /// returns its error here and no partial result is produced.
    pub fn refresh(&self) -> EngineResult<AnalysisBundle> {
        let raw_customers = self.customers.fetch_customers()?;
        let raw_campaigns = self.campaigns.fetch_campaigns()?;
        let raw_recommendations = self.recommendations.fetch_recommendations()?;
        let budget_totals = self.campaigns.fetch_budget_totals()?;

        let snapshot = Snapshot::from_raw(raw_customers, raw_campaigns, raw_recommendations);

        let analysis = analyze(
            &snapshot.customers,
            &snapshot.recommendations,
            &self.config,
        );

        let campaigns: Vec<CampaignPerformance> = snapshot
            .campaigns
            .iter()
            .map(|c| evaluate(c, &self.config.economics))
            .collect();
        let campaign_portfolio = portfolio(&campaigns);

        let budget = match budget_totals {
            Some(totals) => budget_summary_from_totals(&totals, &self.config.economics),
            None => budget_summary(&campaigns, &self.config.economics),
        };

        log::info!(
            "refresh complete: {} customers, {} campaigns ({} active), budget utilization {:.1}%",
            snapshot.customers.len(),
            campaign_portfolio.total_campaigns,
            campaign_portfolio.active_campaigns,
            budget.utilization_percent,
        );

        Ok(AnalysisBundle {
            snapshot,
            analysis,
            campaigns,
            campaign_portfolio,
            budget,
        })
    }
}

/// Fixture source backed by in-memory rows. Implements all three seams;
/// used by the runner and the integration tests.
#[derive(Debug, Clone, Default)]
pub struct InMemorySource {
    pub customers: Vec<RawCustomerRecord>,
    pub campaigns: Vec<RawCampaignRecord>,
    pub recommendations: Vec<RawRecommendationRecord>,
    pub budget_totals: Option<BudgetTotals>,
}

impl CustomerSource for InMemorySource {
    fn fetch_customers(&self) -> EngineResult<Vec<RawCustomerRecord>> {
        Ok(self.customers.clone())
    }
}

impl CampaignSource for InMemorySource {
    fn fetch_campaigns(&self) -> EngineResult<Vec<RawCampaignRecord>> {
        Ok(self.campaigns.clone())
    }

    fn fetch_budget_totals(&self) -> EngineResult<Option<BudgetTotals>> {
        Ok(self.budget_totals.clone())
    }
}

impl RecommendationSource for InMemorySource {
    fn fetch_recommendations(&self) -> EngineResult<Vec<RawRecommendationRecord>> {
        Ok(self.recommendations.clone())
    }
}
