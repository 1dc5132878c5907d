use approx::assert_relative_eq;
use retention_core::analysis::{analyze, recommendation_stats};
use retention_core::config::AnalyticsConfig;
use retention_core::generator::{generate_book, BookParams};
use retention_core::record::{CustomerRecord, RiskLevel};
use retention_core::risk::RiskTier;
use retention_core::snapshot::Snapshot;

// ── Helpers ──────────────────────────────────────────────────────────────────

fn customer(id: &str, score: Option<f64>, risk: RiskLevel, balance: f64) -> CustomerRecord {
    CustomerRecord {
        customer_id: id.into(),
        name: String::new(),
        email: String::new(),
        phone: String::new(),
        segment: "retail".into(),
        branch: "Kigali Main".into(),
        product_type: "Savings".into(),
        account_balance: balance,
        tenure_months: 60,
        complaints: 0,
        days_since_last_transaction: 10,
        churn_score: score,
        risk_level: risk,
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// End-to-end scenario: scores [85, 60, 45, 20] at equal balances land
/// one customer in each tier, average 52.5, with half the book
/// predicted to churn.
#[test]
fn four_customer_scenario() {
    let config = AnalyticsConfig::default();
    let book = vec![
        customer("C1", Some(85.0), RiskLevel::High, 1_000_000.0),
        customer("C2", Some(60.0), RiskLevel::High, 1_000_000.0),
        customer("C3", Some(45.0), RiskLevel::Medium, 1_000_000.0),
        customer("C4", Some(20.0), RiskLevel::Low, 1_000_000.0),
    ];

    let result = analyze(&book, &[], &config);

    assert_eq!(result.tiers.critical, 1);
    assert_eq!(result.tiers.high, 1);
    assert_eq!(result.tiers.medium, 1);
    assert_eq!(result.tiers.low, 1);
    assert_eq!(result.tiers.unscored, 0);

    assert_relative_eq!(result.portfolio.avg_churn_score, 52.5);

    // Critical + high over total = 50%.
    assert_eq!(result.predicted_churners, 2);
    assert_relative_eq!(
        result.predicted_churners as f64 / result.portfolio.total as f64 * 100.0,
        50.0
    );
    assert_relative_eq!(result.at_risk_balance, 2_000_000.0);
}

/// Tier stats cover the scored population: percentages sum to 100 and
/// per-tier counts match the breakdown.
#[test]
fn tier_stats_cover_scored_population() {
    let config = AnalyticsConfig::default();
    let book = vec![
        customer("C1", Some(90.0), RiskLevel::High, 4_000_000.0),
        customer("C2", Some(75.0), RiskLevel::High, 2_000_000.0),
        customer("C3", Some(55.0), RiskLevel::Medium, 1_000_000.0),
        customer("C4", Some(10.0), RiskLevel::Low, 500_000.0),
        customer("C5", None, RiskLevel::Low, 500_000.0),
    ];

    let result = analyze(&book, &[], &config);

    let percent_sum: f64 = result.tier_stats.iter().map(|t| t.percent).sum();
    assert_relative_eq!(percent_sum, 100.0, epsilon = 1e-9);

    for stats in &result.tier_stats {
        assert_eq!(stats.count, result.tiers.count(stats.tier));
    }

    let critical = result
        .tier_stats
        .iter()
        .find(|t| t.tier == RiskTier::Critical)
        .unwrap();
    assert_eq!(critical.count, 2);
    assert_relative_eq!(critical.avg_balance, 3_000_000.0);
    assert_relative_eq!(critical.avg_score, 82.5);
}

/// Invariants hold over a generated book: tier counts sum to the
/// snapshot size and every dimension's partitions cover it.
#[test]
fn invariants_hold_over_generated_book() {
    let config = AnalyticsConfig::default();
    let params = BookParams {
        customers: 300,
        campaigns: 6,
        recommendations: 40,
        ..BookParams::default()
    };
    let (customers, campaigns, recommendations) = generate_book(2024, &params);
    let snapshot = Snapshot::from_raw(customers, campaigns, recommendations);

    let result = analyze(&snapshot.customers, &snapshot.recommendations, &config);

    assert_eq!(result.tiers.total(), snapshot.customers.len());
    assert_eq!(
        result.portfolio.high_risk + result.portfolio.medium_risk + result.portfolio.low_risk,
        snapshot.customers.len(),
    );

    for breakdown in &result.breakdowns {
        let covered: usize = breakdown.partitions.iter().map(|p| p.total).sum();
        assert_eq!(
            covered,
            snapshot.customers.len(),
            "dimension {}",
            breakdown.dimension.name()
        );
        assert!(breakdown.top_risk.len() <= config.top_risk_count);
    }
}

/// The top-risk list is a subset of the partitions, ranked by
/// concentration.
#[test]
fn top_risk_is_ranked_subset() {
    let config = AnalyticsConfig::default();
    let params = BookParams {
        customers: 200,
        ..BookParams::default()
    };
    let (customers, _, _) = generate_book(7, &params);
    let snapshot = Snapshot::from_raw(customers, Vec::new(), Vec::new());

    let result = analyze(&snapshot.customers, &[], &config);
    for breakdown in &result.breakdowns {
        for pair in breakdown.top_risk.windows(2) {
            assert!(
                pair[0].high_risk_percent >= pair[1].high_risk_percent,
                "top_risk out of order for {}",
                breakdown.dimension.name()
            );
        }
        for entry in &breakdown.top_risk {
            assert!(breakdown.partitions.contains(entry));
        }
    }
}

/// Recommendation stats: status counts sum to the collection size.
#[test]
fn recommendation_status_counts_sum() {
    let params = BookParams {
        customers: 50,
        recommendations: 80,
        ..BookParams::default()
    };
    let (customers, _, recommendations) = generate_book(11, &params);
    let snapshot = Snapshot::from_raw(customers, Vec::new(), recommendations);

    let stats = recommendation_stats(&snapshot.recommendations);
    assert_eq!(stats.total, 80);
    assert_eq!(
        stats.pending + stats.approved + stats.implemented + stats.rejected,
        stats.total
    );
    assert_eq!(
        stats.high_impact + stats.medium_impact + stats.low_impact,
        stats.total
    );
    assert!((50.0..=95.0).contains(&stats.avg_confidence));
}

/// An empty snapshot degrades every aggregate to zero without erroring.
#[test]
fn empty_snapshot_analyzes_to_zero() {
    let config = AnalyticsConfig::default();
    let result = analyze(&[], &[], &config);

    assert_eq!(result.portfolio.total, 0);
    assert_eq!(result.tiers.total(), 0);
    assert_eq!(result.predicted_churners, 0);
    assert_relative_eq!(result.at_risk_balance, 0.0);
    assert_eq!(result.signals.iter().map(|(_, n)| n).sum::<usize>(), 0);
    for breakdown in &result.breakdowns {
        assert!(breakdown.partitions.is_empty());
        assert!(breakdown.top_risk.is_empty());
    }
    assert_relative_eq!(result.recommendations.avg_confidence, 0.0);
}
