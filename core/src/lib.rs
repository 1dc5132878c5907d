//! retention-core — customer risk analytics & segmentation engine.
//!
//! Takes a snapshot of customer, campaign, and recommendation records
//! already fetched from backing services and derives risk tiers,
//! per-dimension segment breakdowns, early-warning churn signals,
//! campaign effectiveness and budget/ROI figures, and CSV exports.
//!
//! Layering (leaves first):
//!   1. `record` / `snapshot` — strict types behind a one-time
//!      normalization boundary
//!   2. `aggregate` — pure group/count/average/sum/rank primitives
//!   3. `risk`, `segmentation`, `signal`, `campaign` — the analyzers
//!   4. `analysis` — assembles one immutable `AnalysisResult`
//!   5. `source` — collaborator seams and the refresh engine
//!   6. `export` — delimited text projections for download
//!
//! Every threshold and financial constant lives in `config` and is
//! injected; no analyzer re-declares one locally.

pub mod aggregate;
pub mod analysis;
pub mod campaign;
pub mod config;
pub mod error;
pub mod export;
pub mod generator;
pub mod record;
pub mod risk;
pub mod rng;
pub mod segmentation;
pub mod signal;
pub mod snapshot;
pub mod source;
pub mod types;
