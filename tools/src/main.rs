//! retention-runner: headless analytics runner for the retention desk.
//!
//! Usage:
//!   retention-runner --seed 12345 --customers 500 --out-dir ./out
//!   retention-runner --snapshot book.json --config overrides.json

use anyhow::{Context, Result};
use retention_core::{
    config::AnalyticsConfig,
    export,
    generator::{generate_book, BookParams},
    snapshot::RawSnapshotFile,
    source::{AnalysisBundle, AnalyticsEngine, InMemorySource},
};
use std::env;
use std::fs;
use std::path::Path;

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    let seed = parse_arg(&args, "--seed", 42u64);
    let customers = parse_arg(&args, "--customers", 500usize);
    let campaigns = parse_arg(&args, "--campaigns", 8usize);
    let snapshot_path = str_arg(&args, "--snapshot");
    let config_path = str_arg(&args, "--config");
    let out_dir = str_arg(&args, "--out-dir").unwrap_or("./out");

    let run_id = uuid::Uuid::new_v4();

    println!("Retention Desk — analytics runner");
    println!("  run_id:    {run_id}");
    println!("  started:   {}", chrono::Utc::now().to_rfc3339());
    match snapshot_path {
        Some(path) => println!("  snapshot:  {path}"),
        None => {
            println!("  seed:      {seed}");
            println!("  customers: {customers}");
            println!("  campaigns: {campaigns}");
        }
    }
    println!("  out_dir:   {out_dir}");
    println!();

    let config = match config_path {
        Some(path) => {
            AnalyticsConfig::from_file(path).with_context(|| format!("loading config {path}"))?
        }
        None => AnalyticsConfig::default(),
    };

    let source = match snapshot_path {
        Some(path) => {
            let raw = fs::read_to_string(path).with_context(|| format!("reading {path}"))?;
            let file: RawSnapshotFile =
                serde_json::from_str(&raw).with_context(|| format!("parsing {path}"))?;
            InMemorySource {
                customers: file.customers,
                campaigns: file.campaigns,
                recommendations: file.recommendations,
                budget_totals: None,
            }
        }
        None => {
            let params = BookParams {
                customers,
                campaigns,
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
    };

    let engine = AnalyticsEngine::new(
        config,
        Box::new(source.clone()),
        Box::new(source.clone()),
        Box::new(source),
    );

    let bundle = engine.refresh()?;
    print_summary(&bundle);
    write_artifacts(&bundle, Path::new(out_dir))?;

    Ok(())
}

fn print_summary(bundle: &AnalysisBundle) {
    let analysis = &bundle.analysis;
    let portfolio = &analysis.portfolio;
    let tiers = &analysis.tiers;

    println!("=== PORTFOLIO ===");
    println!("  customers:       {}", portfolio.total);
    println!(
        "  risk badges:     high={} medium={} low={}",
        portfolio.high_risk, portfolio.medium_risk, portfolio.low_risk
    );
    println!(
        "  tiers:           critical={} high={} medium={} low={} unscored={}",
        tiers.critical, tiers.high, tiers.medium, tiers.low, tiers.unscored
    );
    println!("  avg churn score: {:.1}%", portfolio.avg_churn_score);
    println!("  avg balance:     {:.0}", portfolio.avg_balance);
    println!("  at-risk balance: {:.0}", analysis.at_risk_balance);

    println!();
    println!("=== EARLY WARNING SIGNALS ===");
    for (name, count) in analysis.signals.iter() {
        println!("  {name:<22} {count}");
    }

    println!();
    println!("=== TOP RISK PARTITIONS ===");
    for breakdown in &analysis.breakdowns {
        for stats in &breakdown.top_risk {
            println!(
                "  {:<13} {:<24} {:>5.1}% high risk ({}/{})",
                breakdown.dimension.name(),
                stats.key,
                stats.high_risk_percent,
                stats.high_risk_count,
                stats.total,
            );
        }
    }

    println!();
    println!("=== CAMPAIGNS ===");
    let cp = &bundle.campaign_portfolio;
    println!(
        "  {} campaigns ({} active) | targeted {} | contacted {} | retained {}",
        cp.total_campaigns, cp.active_campaigns, cp.total_targeted, cp.total_contacted,
        cp.total_retained,
    );
    println!(
        "  avg contact rate {:.1}% | avg retention rate {:.1}%",
        cp.avg_contact_rate, cp.avg_retention_rate
    );
    for campaign in &bundle.campaigns {
        println!(
            "  {:<28} ROI {:>7.1}% | revenue {:>12.0}{}",
            campaign.name,
            campaign.roi,
            campaign.revenue,
            if campaign.revenue_estimated {
                " (estimated)"
            } else {
                ""
            },
        );
    }

    println!();
    println!("=== BUDGET ===");
    let budget = &bundle.budget;
    println!(
        "  total {:.0} | allocated {:.0} | remaining {:.0} | utilization {:.1}%",
        budget.total_budget, budget.total_allocated, budget.remaining, budget.utilization_percent,
    );
    println!(
        "  overall ROI {:.1}%{} | cost per conversion {:.0}",
        budget.overall_roi,
        if budget.revenue_estimated {
            " (estimated)"
        } else {
            ""
        },
        budget.cost_per_conversion,
    );
}

fn write_artifacts(bundle: &AnalysisBundle, out_dir: &Path) -> Result<()> {
    fs::create_dir_all(out_dir)?;

    let customers = export::customers_csv(&bundle.snapshot.customers)?;
    fs::write(out_dir.join("customers.csv"), customers)?;

    let campaigns = export::campaigns_csv(&bundle.campaigns)?;
    fs::write(out_dir.join("campaigns.csv"), campaigns)?;

    let breakdowns = export::breakdowns_csv(&bundle.analysis.breakdowns)?;
    fs::write(out_dir.join("breakdowns.csv"), breakdowns)?;

    let analysis = serde_json::to_string_pretty(&bundle.analysis)?;
    fs::write(out_dir.join("analysis.json"), analysis)?;

    log::info!("artifacts written to {}", out_dir.display());
    Ok(())
}

fn parse_arg<T: std::str::FromStr + Copy>(args: &[String], flag: &str, default: T) -> T {
    args.windows(2)
        .find(|w| w[0] == flag)
        .and_then(|w| w[1].parse().ok())
        .unwrap_or(default)
}

fn str_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}
