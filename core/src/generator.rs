//! Synthetic book generation for demos, seeding, and tests.
//!
//! Produces *raw* records on purpose: generated books flow through the
//! same normalization boundary as real service rows, and a slice of
//! each book deliberately carries missing fields so that path stays
//! exercised. Same seed ⇒ identical book.

use crate::record::{DailyMetric, RawCampaignRecord, RawCustomerRecord, RawRecommendationRecord};
use crate::rng::BookRng;
use chrono::NaiveDate;

const SEGMENTS: [&str; 4] = ["retail", "sme", "corporate", "institutional_banking"];
const SEGMENT_WEIGHTS: [f64; 4] = [0.55, 0.25, 0.15, 0.05];

const BRANCHES: [&str; 6] = [
    "Kigali Main",
    "Nyarugenge",
    "Kicukiro",
    "Gasabo",
    "Musanze",
    "Huye",
];

const PRODUCT_TYPES: [&str; 3] = ["Savings", "Current", "Fixed Deposit"];

const FIRST_NAMES: [&str; 24] = [
    "Alice", "Benjamin", "Claudine", "David", "Eric", "Francine", "Gerald", "Henriette",
    "Innocent", "Jeanette", "Kevin", "Liliane", "Moses", "Nadia", "Olivier", "Pascal",
    "Queen", "Robert", "Solange", "Theogene", "Umutoni", "Vincent", "Winnie", "Yves",
];

const LAST_NAMES: [&str; 24] = [
    "Uwimana", "Mukamana", "Niyonzima", "Habimana", "Ingabire", "Nshimiyimana",
    "Mugisha", "Uwase", "Ndayisaba", "Mukandayisenga", "Bizimana", "Umuhoza",
    "Hakizimana", "Nyirahabimana", "Karemera", "Mutesi", "Rukundo", "Ishimwe",
    "Gasana", "Umulisa", "Ndahiro", "Keza", "Munyaneza", "Iradukunda",
];

const CAMPAIGN_THEMES: [&str; 6] = [
    "Win-Back",
    "Loyalty Rewards",
    "Fee Waiver",
    "Premium Upgrade",
    "Reactivation",
    "Anniversary",
];

const RECOMMENDED_ACTIONS: [&str; 6] = [
    "Schedule Personal Call",
    "Offer Fee Waiver",
    "Send Reactivation Campaign",
    "Assign Senior Relationship Manager",
    "Premium Account Upgrade",
    "Satisfaction Survey",
];

/// Knobs for book shape. The shares control how much of the book
/// exercises the normalization defaults.
#[derive(Debug, Clone)]
pub struct BookParams {
    pub customers: usize,
    pub campaigns: usize,
    pub recommendations: usize,
    /// Share of customers with no churn score at all.
    pub unscored_share: f64,
    /// Share of customers with assorted missing optional fields.
    pub sparse_share: f64,
}

impl Default for BookParams {
    fn default() -> Self {
        Self {
            customers: 500,
            campaigns: 8,
            recommendations: 60,
            unscored_share: 0.10,
            sparse_share: 0.15,
        }
    }
}

/// A complete raw book: customers, campaigns, recommendations.
pub fn generate_book(
    seed: u64,
    params: &BookParams,
) -> (
    Vec<RawCustomerRecord>,
    Vec<RawCampaignRecord>,
    Vec<RawRecommendationRecord>,
) {
    let mut rng = BookRng::new(seed);

    let customers: Vec<RawCustomerRecord> = (0..params.customers)
        .map(|i| generate_customer(&mut rng, i, params))
        .collect();

    let campaigns: Vec<RawCampaignRecord> = (0..params.campaigns)
        .map(|i| generate_campaign(&mut rng, i))
        .collect();

    // Recommendations reference customers, so an empty book gets none.
    let recommendations: Vec<RawRecommendationRecord> = if customers.is_empty() {
        Vec::new()
    } else {
        (0..params.recommendations)
            .map(|_| generate_recommendation(&mut rng, &customers))
            .collect()
    };

    log::debug!(
        "generated book seed={seed}: {} customers, {} campaigns, {} recommendations",
        customers.len(),
        campaigns.len(),
        recommendations.len(),
    );

    (customers, campaigns, recommendations)
}

fn pick_segment(rng: &mut BookRng) -> &'static str {
    let roll = rng.next_f64();
    let mut cumulative = 0.0;
    for (segment, weight) in SEGMENTS.iter().zip(SEGMENT_WEIGHTS) {
        cumulative += weight;
        if roll < cumulative {
            return segment;
        }
    }
    SEGMENTS[0]
}

fn generate_customer(rng: &mut BookRng, index: usize, params: &BookParams) -> RawCustomerRecord {
    let sparse = rng.chance(params.sparse_share);
    let unscored = rng.chance(params.unscored_share);

    let first = *rng.pick(&FIRST_NAMES);
    let last = *rng.pick(&LAST_NAMES);
    let segment = pick_segment(rng);

    // Heavy-tailed balances, capped so one whale does not dwarf a demo book.
    let balance = rng.pareto(50_000.0, 1.1).min(80_000_000.0);

    let churn_score = if unscored {
        None
    } else {
        Some((rng.range_f64(0.0, 100.0) * 10.0).round() / 10.0)
    };

    // The badge usually agrees with the score; a small slice disagrees
    // or is missing, the way stale upstream rows look.
    let risk_level = match churn_score {
        _ if rng.chance(0.05) => None,
        Some(s) if s >= 70.0 => Some("high".to_string()),
        Some(s) if s >= 40.0 => Some("medium".to_string()),
        Some(_) => Some("low".to_string()),
        None => None,
    };

    RawCustomerRecord {
        customer_id: Some(format!("CUST{:05}", index + 1)),
        name: Some(format!("{first} {last}")),
        email: Some(format!(
            "{}.{}@example.rw",
            first.to_lowercase(),
            last.to_lowercase()
        )),
        phone: if sparse {
            None
        } else {
            Some(format!("+2507{:08}", rng.next_u64_below(100_000_000)))
        },
        segment: Some(segment.to_string()),
        branch: if sparse && rng.chance(0.3) {
            None
        } else {
            Some((*rng.pick(&BRANCHES)).to_string())
        },
        product_type: Some((*rng.pick(&PRODUCT_TYPES)).to_string()),
        account_balance: if sparse && rng.chance(0.2) {
            None
        } else {
            Some(balance.round())
        },
        tenure_months: if sparse && rng.chance(0.3) {
            None
        } else {
            Some(rng.next_u64_below(240) as u32)
        },
        complaints: Some(weighted_complaints(rng)),
        days_since_last_transaction: if sparse {
            None
        } else {
            Some(rng.next_u64_below(180) as u32)
        },
        churn_score,
        risk_level,
    }
}

fn weighted_complaints(rng: &mut BookRng) -> u32 {
    // Most customers never complain; a small tail complains a lot.
    let roll = rng.next_f64();
    if roll < 0.70 {
        0
    } else if roll < 0.90 {
        rng.next_u64_below(2) as u32 + 1
    } else {
        rng.next_u64_below(4) as u32 + 3
    }
}

fn generate_campaign(rng: &mut BookRng, index: usize) -> RawCampaignRecord {
    let theme = *rng.pick(&CAMPAIGN_THEMES);
    let targeted = 50 + rng.next_u64_below(450) as u32;
    let contacted = (targeted as f64 * rng.range_f64(0.3, 0.95)) as u32;
    let responded = (contacted as f64 * rng.range_f64(0.2, 0.8)) as u32;
    let converted = (responded as f64 * rng.range_f64(0.2, 0.9)) as u32;

    let statuses = ["draft", "active", "active", "paused", "completed"];
    let status = *rng.pick(&statuses);

    // Some campaigns carry no budget at all (the zero-budget ROI path),
    // and some record no daily revenue (the estimate path).
    let budget = if rng.chance(0.2) {
        None
    } else {
        Some((rng.range_f64(500_000.0, 20_000_000.0)).round())
    };

    let start =
        NaiveDate::from_ymd_opt(2024, 1 + (index as u32 % 12), 1).unwrap_or_default();
    let daily_metrics = if rng.chance(0.5) {
        (0..14)
            .filter_map(|day| {
                start
                    .checked_add_days(chrono::Days::new(day))
                    .map(|date| DailyMetric {
                        date,
                        revenue: rng.range_f64(0.0, 2_000_000.0).round(),
                    })
            })
            .collect()
    } else {
        Vec::new()
    };

    RawCampaignRecord {
        id: Some(format!("CAMP{:04}", index + 1)),
        name: Some(format!("{theme} {}", 2024 + (index / 12))),
        target_segment: Some((*rng.pick(&SEGMENTS)).to_string()),
        campaign_type: Some("retention".to_string()),
        status: Some(status.to_string()),
        start_date: Some(start),
        end_date: start.checked_add_days(chrono::Days::new(90)),
        target_count: Some(targeted),
        contacted_count: Some(contacted),
        responded_count: Some(responded),
        converted_count: Some(converted),
        budget,
        allocated_budget: budget.map(|b| (b * rng.range_f64(0.4, 1.0)).round()),
        daily_metrics,
    }
}

fn generate_recommendation(
    rng: &mut BookRng,
    customers: &[RawCustomerRecord],
) -> RawRecommendationRecord {
    let customer = rng.pick(customers);
    let statuses = ["pending", "pending", "approved", "implemented", "rejected"];
    let impacts = ["low", "medium", "medium", "high"];

    RawRecommendationRecord {
        customer_id: customer.customer_id.clone(),
        action: Some((*rng.pick(&RECOMMENDED_ACTIONS)).to_string()),
        // Confidence is clamped to 50–95 upstream; mirror that band.
        confidence_score: Some(rng.range_f64(50.0, 95.0).round()),
        expected_impact: Some((*rng.pick(&impacts)).to_string()),
        status: Some((*rng.pick(&statuses)).to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_seed_same_book() {
        let params = BookParams {
            customers: 50,
            campaigns: 4,
            recommendations: 10,
            ..BookParams::default()
        };
        let a = serde_json::to_string(&generate_book(1234, &params)).unwrap();
        let b = serde_json::to_string(&generate_book(1234, &params)).unwrap();
        assert_eq!(a, b, "books diverged for same seed");
    }

    #[test]
    fn book_has_requested_sizes() {
        let params = BookParams {
            customers: 120,
            campaigns: 5,
            recommendations: 30,
            ..BookParams::default()
        };
        let (customers, campaigns, recommendations) = generate_book(9, &params);
        assert_eq!(customers.len(), 120);
        assert_eq!(campaigns.len(), 5);
        assert_eq!(recommendations.len(), 30);
    }

    #[test]
    fn book_contains_unscored_customers() {
        let params = BookParams {
            customers: 400,
            unscored_share: 0.25,
            ..BookParams::default()
        };
        let (customers, _, _) = generate_book(77, &params);
        let unscored = customers.iter().filter(|c| c.churn_score.is_none()).count();
        assert!(unscored > 0, "expected some unscored customers in the book");
    }
}
