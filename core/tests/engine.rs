use retention_core::campaign::BudgetTotals;
use retention_core::config::AnalyticsConfig;
use retention_core::error::{EngineError, EngineResult};
use retention_core::generator::{generate_book, BookParams};
use retention_core::record::{
    RawCampaignRecord, RawCustomerRecord, RawRecommendationRecord,
};
use retention_core::source::{
    AnalyticsEngine, CampaignSource, CustomerSource, InMemorySource, RecommendationSource,
};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn seeded_source(seed: u64) -> InMemorySource {
    let params = BookParams {
        customers: 150,
        campaigns: 5,
        recommendations: 25,
        ..BookParams::default()
    };
    let (customers, campaigns, recommendations) = generate_book(seed, &params);
    InMemorySource {
        customers,
        campaigns,
        recommendations,
        budget_totals: None,
    }
}

fn engine_from(source: InMemorySource) -> AnalyticsEngine {
    AnalyticsEngine::new(
        AnalyticsConfig::default(),
        Box::new(source.clone()),
        Box::new(source.clone()),
        Box::new(source),
    )
}

/// A customer service that is down.
struct FailingCustomerSource;

impl CustomerSource for FailingCustomerSource {
    fn fetch_customers(&self) -> EngineResult<Vec<RawCustomerRecord>> {
        Err(EngineError::upstream("customers", "connection refused"))
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// A refresh normalizes, analyzes, and evaluates every collection from
/// one consistent snapshot.
#[test]
fn refresh_produces_consistent_bundle() {
    let engine = engine_from(seeded_source(42));
    let bundle = engine.refresh().unwrap();

    assert_eq!(bundle.analysis.portfolio.total, bundle.snapshot.customers.len());
    assert_eq!(bundle.campaigns.len(), bundle.snapshot.campaigns.len());
    assert_eq!(
        bundle.campaign_portfolio.total_campaigns,
        bundle.snapshot.campaigns.len()
    );
    assert_eq!(bundle.analysis.tiers.total(), bundle.snapshot.customers.len());
}

/// A failing source propagates its error and no partial result is
/// produced.
#[test]
fn failing_source_aborts_refresh() {
    let source = seeded_source(42);
    let engine = AnalyticsEngine::new(
        AnalyticsConfig::default(),
        Box::new(FailingCustomerSource),
        Box::new(source.clone()),
        Box::new(source),
    );

    let err = engine.refresh().unwrap_err();
    match err {
        EngineError::Upstream { service, .. } => assert_eq!(service, "customers"),
        other => panic!("expected Upstream error, got {other:?}"),
    }
}

/// Service-provided budget totals take precedence over the per-campaign
/// derivation.
#[test]
fn budget_totals_from_service_take_precedence() {
    let mut source = seeded_source(42);
    source.budget_totals = Some(BudgetTotals {
        total_budget: 5_000_000.0,
        total_allocated: 1_000_000.0,
        total_revenue: 6_000_000.0,
        total_conversions: 10,
    });

    let engine = engine_from(source);
    let bundle = engine.refresh().unwrap();

    assert_eq!(bundle.budget.total_budget, 5_000_000.0);
    assert_eq!(bundle.budget.remaining, 4_000_000.0);
    assert_eq!(bundle.budget.utilization_percent, 20.0);
    assert!(!bundle.budget.revenue_estimated);
}

/// Two refreshes over the same source are independent: the second
/// replaces the first wholesale and computes identical figures from
/// identical input.
#[test]
fn refresh_is_replace_wholesale() {
    let engine = engine_from(seeded_source(7));

    let first = engine.refresh().unwrap();
    let second = engine.refresh().unwrap();

    assert_eq!(first.analysis.tiers, second.analysis.tiers);
    assert_eq!(first.analysis.signals, second.analysis.signals);
    assert_eq!(
        first.campaign_portfolio.total_retained,
        second.campaign_portfolio.total_retained
    );
}

/// Empty sources refresh cleanly into an all-zero bundle.
#[test]
fn empty_sources_refresh_cleanly() {
    let engine = engine_from(InMemorySource::default());
    let bundle = engine.refresh().unwrap();

    assert!(bundle.snapshot.is_empty());
    assert_eq!(bundle.analysis.portfolio.total, 0);
    assert_eq!(bundle.campaign_portfolio.total_campaigns, 0);
    assert_eq!(bundle.budget.total_budget, 0.0);
}

/// The boxed-trait seams accept any implementation, not just the
/// in-memory fixture.
#[test]
fn custom_source_implementations_compose() {
    struct StaticCampaigns;
    impl CampaignSource for StaticCampaigns {
        fn fetch_campaigns(&self) -> EngineResult<Vec<RawCampaignRecord>> {
            Ok(vec![RawCampaignRecord {
                id: Some("CAMP1".into()),
                name: Some("Win-Back 2025".into()),
                status: Some("active".into()),
                target_count: Some(100),
                contacted_count: Some(60),
                converted_count: Some(12),
                budget: Some(2_000_000.0),
                ..RawCampaignRecord::default()
            }])
        }
    }

    struct NoRecommendations;
    impl RecommendationSource for NoRecommendations {
        fn fetch_recommendations(&self) -> EngineResult<Vec<RawRecommendationRecord>> {
            Ok(Vec::new())
        }
    }

    let customers = seeded_source(3);
    let engine = AnalyticsEngine::new(
        AnalyticsConfig::default(),
        Box::new(customers),
        Box::new(StaticCampaigns),
        Box::new(NoRecommendations),
    );

    let bundle = engine.refresh().unwrap();
    assert_eq!(bundle.campaigns.len(), 1);
    assert_eq!(bundle.campaigns[0].retained, 12);
    // No daily metrics recorded, so the revenue figure is the flagged estimate.
    assert!(bundle.campaigns[0].revenue_estimated);
    assert_eq!(bundle.campaigns[0].revenue, 12.0 * 500_000.0);
}
