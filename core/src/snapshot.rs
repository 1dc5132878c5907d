//! Snapshot — the finite, immutable input collection every analysis
//! consumes.
//!
//! A snapshot is built once per fetch cycle from the raw service rows,
//! normalized at construction, and then treated as read-only. Refresh is
//! replace-wholesale: a new fetch produces a new snapshot and a new
//! analysis; the old pair is discarded, never patched.

use crate::record::{
    CampaignRecord, CustomerRecord, RawCampaignRecord, RawCustomerRecord,
    RawRecommendationRecord, RecommendationRecord,
};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Snapshot {
    pub fetched_at: DateTime<Utc>,
    pub customers:       Vec<CustomerRecord>,
    pub campaigns:       Vec<CampaignRecord>,
    pub recommendations: Vec<RecommendationRecord>,
}

impl Snapshot {
    /// Build a snapshot from raw service rows, running the record
    /// normalization exactly once. Records are kept in delivery order.
    pub fn from_raw(
        customers: Vec<RawCustomerRecord>,
        campaigns: Vec<RawCampaignRecord>,
        recommendations: Vec<RawRecommendationRecord>,
    ) -> Self {
        let snapshot = Self {
            fetched_at: Utc::now(),
            customers: customers.into_iter().map(RawCustomerRecord::normalize).collect(),
            campaigns: campaigns.into_iter().map(RawCampaignRecord::normalize).collect(),
            recommendations: recommendations
                .into_iter()
                .map(RawRecommendationRecord::normalize)
                .collect(),
        };
        log::debug!(
            "snapshot built: {} customers, {} campaigns, {} recommendations",
            snapshot.customers.len(),
            snapshot.campaigns.len(),
            snapshot.recommendations.len(),
        );
        snapshot
    }

    pub fn is_empty(&self) -> bool {
        self.customers.is_empty() && self.campaigns.is_empty() && self.recommendations.is_empty()
    }
}

/// On-disk form of a raw snapshot, as written by seeding tools or saved
/// from a service response. Loaded by the runner with `--snapshot`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RawSnapshotFile {
    pub customers:       Vec<RawCustomerRecord>,
    pub campaigns:       Vec<RawCampaignRecord>,
    pub recommendations: Vec<RawRecommendationRecord>,
}

impl RawSnapshotFile {
    pub fn into_snapshot(self) -> Snapshot {
        Snapshot::from_raw(self.customers, self.campaigns, self.recommendations)
    }
}
