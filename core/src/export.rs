//! Export formatter — delimited text tables for download.
//!
//! A projection is a fixed header row plus one formatted row per
//! record. Column order and header text are contractual: downstream
//! consumers parse these files. Quoting and escaping follow the CSV
//! convention (fields containing the delimiter or a quote are quoted,
//! inner quotes doubled) via the `csv` writer. An empty collection
//! serializes to exactly the header row.
//!
//! Fixed precision by semantic unit: percentages and scores to one
//! decimal, currency as whole units.

use crate::analysis::DimensionBreakdown;
use crate::campaign::CampaignPerformance;
use crate::error::{EngineError, EngineResult};
use crate::record::{AuditRecord, CustomerRecord};
use anyhow::anyhow;

pub const CUSTOMER_HEADERS: [&str; 10] = [
    "Customer ID",
    "Name",
    "Email",
    "Phone",
    "Segment",
    "Branch",
    "Product Type",
    "Churn Score (%)",
    "Risk Level",
    "Account Balance",
];

pub const AUDIT_HEADERS: [&str; 6] = [
    "Timestamp",
    "User",
    "Action",
    "Table",
    "Record ID",
    "IP Address",
];

pub const CAMPAIGN_HEADERS: [&str; 12] = [
    "Campaign",
    "Status",
    "Targeted",
    "Contacted",
    "Responded",
    "Retained",
    "Contact Rate (%)",
    "Retention Rate (%)",
    "Budget",
    "Revenue",
    "Revenue Estimated",
    "ROI (%)",
];

pub const BREAKDOWN_HEADERS: [&str; 8] = [
    "Dimension",
    "Value",
    "Customers",
    "High Risk",
    "High Risk (%)",
    "Avg Churn Score (%)",
    "Total Balance",
    "Avg Balance",
];

/// Serialize a header row plus pre-formatted data rows.
pub fn write_table(headers: &[&str], rows: &[Vec<String>]) -> EngineResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(headers)?;
    for row in rows {
        writer.write_record(row)?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| EngineError::Other(anyhow!("csv writer flush failed: {e}")))?;
    String::from_utf8(bytes)
        .map_err(|e| EngineError::Other(anyhow!("csv output was not UTF-8: {e}")))
}

pub fn customers_csv(customers: &[CustomerRecord]) -> EngineResult<String> {
    let rows: Vec<Vec<String>> = customers
        .iter()
        .map(|c| {
            vec![
                c.customer_id.clone(),
                c.name.clone(),
                c.email.clone(),
                c.phone.clone(),
                c.segment.clone(),
                c.branch.clone(),
                c.product_type.clone(),
                // Unscored customers export an empty cell, not a zero.
                c.churn_score.map(fmt_percent).unwrap_or_default(),
                c.risk_level.name().to_string(),
                fmt_currency(c.account_balance),
            ]
        })
        .collect();
    write_table(&CUSTOMER_HEADERS, &rows)
}

pub fn audit_csv(entries: &[AuditRecord]) -> EngineResult<String> {
    let rows: Vec<Vec<String>> = entries
        .iter()
        .map(|e| {
            vec![
                e.timestamp.to_rfc3339(),
                if e.user.is_empty() {
                    "System".to_string()
                } else {
                    e.user.clone()
                },
                e.action.clone(),
                e.table_name.clone(),
                e.record_id.clone(),
                e.ip_address.clone(),
            ]
        })
        .collect();
    write_table(&AUDIT_HEADERS, &rows)
}

pub fn campaigns_csv(performances: &[CampaignPerformance]) -> EngineResult<String> {
    let rows: Vec<Vec<String>> = performances
        .iter()
        .map(|p| {
            vec![
                p.name.clone(),
                p.status.name().to_string(),
                p.targeted.to_string(),
                p.contacted.to_string(),
                p.responded.to_string(),
                p.retained.to_string(),
                fmt_percent(p.contact_rate),
                fmt_percent(p.retention_rate),
                fmt_currency(p.budget),
                fmt_currency(p.revenue),
                if p.revenue_estimated { "yes" } else { "no" }.to_string(),
                fmt_percent(p.roi),
            ]
        })
        .collect();
    write_table(&CAMPAIGN_HEADERS, &rows)
}

pub fn breakdowns_csv(breakdowns: &[DimensionBreakdown]) -> EngineResult<String> {
    let rows: Vec<Vec<String>> = breakdowns
        .iter()
        .flat_map(|b| {
            b.partitions.iter().map(|p| {
                vec![
                    b.dimension.name().to_string(),
                    p.key.clone(),
                    p.total.to_string(),
                    p.high_risk_count.to_string(),
                    fmt_percent(p.high_risk_percent),
                    fmt_percent(p.avg_churn_score),
                    fmt_currency(p.total_balance),
                    fmt_currency(p.avg_balance),
                ]
            })
        })
        .collect();
    write_table(&BREAKDOWN_HEADERS, &rows)
}

/// Percentages and scores: one decimal place.
pub fn fmt_percent(value: f64) -> String {
    format!("{value:.1}")
}

/// Currency: whole units, no separators.
pub fn fmt_currency(value: f64) -> String {
    format!("{value:.0}")
}
