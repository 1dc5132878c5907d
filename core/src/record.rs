//! Record types and the normalization boundary.
//!
//! Upstream services deliver loosely-shaped rows: optional fields,
//! several historical aliases for the same column, free-text enum
//! values. Each `Raw*` type mirrors that shape verbatim; `normalize()`
//! converts it into the strict engine-owned record exactly once, at the
//! snapshot boundary. Nothing downstream of a `Snapshot` ever sees an
//! un-normalized row, and no row is ever dropped for missing fields.
//!
//! Defaults applied during normalization:
//!   - balance / tenure / complaints absent    → 0
//!   - days_since_last_transaction absent      → 90 (conservatively inactive)
//!   - churn_score absent                      → stays `None` ("unscored")
//!   - risk_level absent or unrecognized       → low
//!   - segment / branch / product_type blank   → "unknown"
//!   - campaign status unrecognized            → draft (logged)
//!   - campaign budget absent                  → allocated_budget, then 0

use crate::types::{CampaignId, CustomerId};
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Fallback bucket for missing or blank dimension values.
pub const UNKNOWN: &str = "unknown";

/// Days-without-a-transaction assumed when the field is absent.
/// Absent activity data is treated as inactivity, not as activity.
pub const DEFAULT_DAYS_SINCE_TXN: u32 = 90;

// ── Enumerations ─────────────────────────────────────────────────────────────

/// The three-tier risk badge carried on the customer record itself.
/// This is upstream model output — the engine displays it as delivered
/// and never recomputes it from the churn score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    /// Parse an upstream string, defaulting to low when absent or
    /// unrecognized.
    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("high") => Self::High,
            Some(v) if v.eq_ignore_ascii_case("medium") => Self::Medium,
            Some(v) if v.eq_ignore_ascii_case("low") || v.is_empty() => Self::Low,
            Some(other) => {
                log::warn!("unrecognized risk_level '{other}', defaulting to low");
                Self::Low
            }
            None => Self::Low,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CampaignStatus {
    #[default]
    Draft,
    Active,
    Paused,
    Completed,
}

impl CampaignStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Draft => "draft",
            Self::Active => "active",
            Self::Paused => "paused",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("active") => Self::Active,
            Some(v) if v.eq_ignore_ascii_case("paused") => Self::Paused,
            Some(v) if v.eq_ignore_ascii_case("completed") => Self::Completed,
            Some(v) if v.eq_ignore_ascii_case("draft") || v.is_empty() => Self::Draft,
            Some(other) => {
                log::warn!("unrecognized campaign status '{other}', defaulting to draft");
                Self::Draft
            }
            None => Self::Draft,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RecommendationStatus {
    #[default]
    Pending,
    Approved,
    Implemented,
    Rejected,
}

impl RecommendationStatus {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Implemented => "implemented",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("approved") => Self::Approved,
            Some(v) if v.eq_ignore_ascii_case("implemented") => Self::Implemented,
            Some(v) if v.eq_ignore_ascii_case("rejected") => Self::Rejected,
            _ => Self::Pending,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpectedImpact {
    #[default]
    Low,
    Medium,
    High,
}

impl ExpectedImpact {
    pub fn name(&self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
        }
    }

    pub fn parse(value: Option<&str>) -> Self {
        match value.map(str::trim) {
            Some(v) if v.eq_ignore_ascii_case("high") => Self::High,
            Some(v) if v.eq_ignore_ascii_case("medium") => Self::Medium,
            _ => Self::Low,
        }
    }
}

// ── Customers ────────────────────────────────────────────────────────────────

/// A customer row as the customer-listing service delivers it. Every
/// field is optional and the serde aliases cover the column-name
/// variants observed upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCustomerRecord {
    pub customer_id: Option<String>,
    #[serde(alias = "Name")]
    pub name: Option<String>,
    #[serde(alias = "Email")]
    pub email: Option<String>,
    #[serde(alias = "Phone")]
    pub phone: Option<String>,
    #[serde(alias = "Segment")]
    pub segment: Option<String>,
    #[serde(alias = "Branch")]
    pub branch: Option<String>,
    #[serde(alias = "Product_Type")]
    pub product_type: Option<String>,
    #[serde(alias = "Account_Balance")]
    pub account_balance: Option<f64>,
    #[serde(alias = "tenure", alias = "Tenure_Months")]
    pub tenure_months: Option<u32>,
    #[serde(alias = "Complaints", alias = "complaint_history")]
    pub complaints: Option<u32>,
    #[serde(alias = "Days_Since_Last_Transaction")]
    pub days_since_last_transaction: Option<u32>,
    pub churn_score: Option<f64>,
    pub risk_level: Option<String>,
}

impl RawCustomerRecord {
    pub fn normalize(self) -> CustomerRecord {
        CustomerRecord {
            customer_id: non_blank(self.customer_id),
            name: self.name.unwrap_or_default(),
            email: self.email.unwrap_or_default(),
            phone: self.phone.unwrap_or_default(),
            segment: non_blank(self.segment),
            branch: non_blank(self.branch),
            product_type: non_blank(self.product_type),
            account_balance: self.account_balance.unwrap_or(0.0),
            tenure_months: self.tenure_months.unwrap_or(0),
            complaints: self.complaints.unwrap_or(0),
            days_since_last_transaction: self
                .days_since_last_transaction
                .unwrap_or(DEFAULT_DAYS_SINCE_TXN),
            churn_score: self.churn_score,
            risk_level: RiskLevel::parse(self.risk_level.as_deref()),
        }
    }
}

/// The strict, engine-owned customer snapshot value. Read-only after
/// normalization; analyses never mutate one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerRecord {
    pub customer_id: CustomerId,
    pub name:         String,
    pub email:        String,
    pub phone:        String,
    pub segment:      String,
    pub branch:       String,
    pub product_type: String,
    pub account_balance: f64,
    pub tenure_months:   u32,
    pub complaints:      u32,
    pub days_since_last_transaction: u32,
    /// Upstream model output, 0–100. `None` means the customer has never
    /// been scored; arithmetic treats that as 0 but classification keeps
    /// it distinct from the low tier.
    pub churn_score: Option<f64>,
    pub risk_level:  RiskLevel,
}

impl CustomerRecord {
    /// Churn score for sums and averages. The missing-score default
    /// lives here so no aggregation site re-invents it.
    pub fn score_or_zero(&self) -> f64 {
        self.churn_score.unwrap_or(0.0)
    }
}

// ── Campaigns ────────────────────────────────────────────────────────────────

/// One day of recorded campaign revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyMetric {
    pub date:    NaiveDate,
    pub revenue: f64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawCampaignRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub target_segment: Option<String>,
    pub campaign_type: Option<String>,
    pub status: Option<String>,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
    pub target_count: Option<u32>,
    pub contacted_count: Option<u32>,
    pub responded_count: Option<u32>,
    #[serde(alias = "conversions")]
    pub converted_count: Option<u32>,
    pub budget: Option<f64>,
    pub allocated_budget: Option<f64>,
    pub daily_metrics: Vec<DailyMetric>,
}

impl RawCampaignRecord {
    pub fn normalize(self) -> CampaignRecord {
        let allocated_budget = self.allocated_budget.unwrap_or(0.0);
        CampaignRecord {
            id: non_blank(self.id),
            name: self.name.unwrap_or_default(),
            target_segment: self.target_segment,
            campaign_type: self.campaign_type,
            status: CampaignStatus::parse(self.status.as_deref()),
            start_date: self.start_date,
            end_date: self.end_date,
            target_count: self.target_count.unwrap_or(0),
            contacted_count: self.contacted_count.unwrap_or(0),
            responded_count: self.responded_count.unwrap_or(0),
            converted_count: self.converted_count.unwrap_or(0),
            // Budget falls back to the allocated figure when unset.
            budget: self.budget.unwrap_or(allocated_budget),
            allocated_budget,
            daily_metrics: self.daily_metrics,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CampaignRecord {
    pub id:   CampaignId,
    pub name: String,
    pub target_segment: Option<String>,
    pub campaign_type:  Option<String>,
    pub status:     CampaignStatus,
    pub start_date: Option<NaiveDate>,
    pub end_date:   Option<NaiveDate>,
    // Funnel counters: targeted → contacted → responded → retained.
    pub target_count:    u32,
    pub contacted_count: u32,
    pub responded_count: u32,
    pub converted_count: u32,
    pub budget:           f64,
    pub allocated_budget: f64,
    pub daily_metrics: Vec<DailyMetric>,
}

impl CampaignRecord {
    /// Sum of recorded daily revenue. Zero when no metrics are attached.
    pub fn recorded_revenue(&self) -> f64 {
        self.daily_metrics.iter().map(|m| m.revenue).sum()
    }
}

// ── Recommendations ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawRecommendationRecord {
    pub customer_id: Option<String>,
    pub action: Option<String>,
    pub confidence_score: Option<f64>,
    pub expected_impact: Option<String>,
    pub status: Option<String>,
}

impl RawRecommendationRecord {
    pub fn normalize(self) -> RecommendationRecord {
        RecommendationRecord {
            customer_id: non_blank(self.customer_id),
            action: self.action.unwrap_or_default(),
            confidence_score: self.confidence_score.unwrap_or(0.0),
            expected_impact: ExpectedImpact::parse(self.expected_impact.as_deref()),
            status: RecommendationStatus::parse(self.status.as_deref()),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationRecord {
    pub customer_id: CustomerId,
    pub action: String,
    /// 0–100.
    pub confidence_score: f64,
    pub expected_impact: ExpectedImpact,
    pub status: RecommendationStatus,
}

// ── Audit log ────────────────────────────────────────────────────────────────

/// One administrative audit-log row, as exported by the audit screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuditRecord {
    pub timestamp: DateTime<Utc>,
    /// Empty string means a system-initiated action.
    pub user:       String,
    pub action:     String,
    pub table_name: String,
    pub record_id:  String,
    pub ip_address: String,
}

fn non_blank(value: Option<String>) -> String {
    match value {
        Some(v) if !v.trim().is_empty() => v,
        _ => UNKNOWN.to_string(),
    }
}
