use retention_core::config::RiskThresholds;
use retention_core::record::{CustomerRecord, RiskLevel};
use retention_core::risk::{classify, tier_breakdown, RiskTier};

// ── Helpers ──────────────────────────────────────────────────────────────────

fn scored(id: &str, score: Option<f64>) -> CustomerRecord {
    CustomerRecord {
        customer_id: id.into(),
        name: String::new(),
        email: String::new(),
        phone: String::new(),
        segment: "retail".into(),
        branch: "Kigali Main".into(),
        product_type: "Savings".into(),
        account_balance: 1_000_000.0,
        tenure_months: 60,
        complaints: 0,
        days_since_last_transaction: 10,
        churn_score: score,
        risk_level: RiskLevel::Low,
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────

/// Tier bounds are inclusive on the lower edge: exactly 70.0 is
/// critical and exactly 50.0 is high.
#[test]
fn boundaries_are_inclusive_on_lower_edge() {
    let t = RiskThresholds::default();

    assert_eq!(classify(Some(70.0), &t), Some(RiskTier::Critical));
    assert_eq!(classify(Some(69.999), &t), Some(RiskTier::High));
    assert_eq!(classify(Some(50.0), &t), Some(RiskTier::High));
    assert_eq!(classify(Some(49.999), &t), Some(RiskTier::Medium));
    assert_eq!(classify(Some(40.0), &t), Some(RiskTier::Medium));
    assert_eq!(classify(Some(39.999), &t), Some(RiskTier::Low));
    assert_eq!(classify(Some(0.0), &t), Some(RiskTier::Low));
    assert_eq!(classify(Some(100.0), &t), Some(RiskTier::Critical));
}

/// A missing score classifies as unscored, never as low.
#[test]
fn missing_score_is_unscored_not_low() {
    let t = RiskThresholds::default();
    assert_eq!(classify(None, &t), None);

    let customers = vec![scored("C1", None), scored("C2", Some(10.0))];
    let breakdown = tier_breakdown(&customers, &t);
    assert_eq!(breakdown.unscored, 1);
    assert_eq!(breakdown.low, 1);
}

/// Tier counts plus the unscored count always equal the snapshot size.
#[test]
fn tier_counts_sum_to_snapshot_size() {
    let t = RiskThresholds::default();
    let customers = vec![
        scored("C1", Some(85.0)),
        scored("C2", Some(60.0)),
        scored("C3", Some(45.0)),
        scored("C4", Some(20.0)),
        scored("C5", None),
        scored("C6", Some(71.5)),
    ];

    let breakdown = tier_breakdown(&customers, &t);
    assert_eq!(breakdown.total(), customers.len());
    assert_eq!(breakdown.scored_total() + breakdown.unscored, customers.len());
    assert_eq!(breakdown.critical, 2);
    assert_eq!(breakdown.high, 1);
    assert_eq!(breakdown.medium, 1);
    assert_eq!(breakdown.low, 1);
    assert_eq!(breakdown.unscored, 1);
}

/// The three-tier badge comes from the record as delivered; absent or
/// junk values default to low.
#[test]
fn risk_level_parse_defaults_to_low() {
    assert_eq!(RiskLevel::parse(Some("high")), RiskLevel::High);
    assert_eq!(RiskLevel::parse(Some("HIGH")), RiskLevel::High);
    assert_eq!(RiskLevel::parse(Some("medium")), RiskLevel::Medium);
    assert_eq!(RiskLevel::parse(Some("low")), RiskLevel::Low);
    assert_eq!(RiskLevel::parse(Some("")), RiskLevel::Low);
    assert_eq!(RiskLevel::parse(Some("elevated")), RiskLevel::Low);
    assert_eq!(RiskLevel::parse(None), RiskLevel::Low);
}

/// An empty snapshot produces an all-zero breakdown.
#[test]
fn empty_snapshot_breakdown_is_zero() {
    let breakdown = tier_breakdown(&[], &RiskThresholds::default());
    assert_eq!(breakdown.total(), 0);
    assert_eq!(breakdown.count(RiskTier::Critical), 0);
}
