//! Open-loop load generator for the gateway
//!
//! Fires requests at a fixed rate, records per-request latency, prints the
//! percentile table and appends a row to a summary CSV.
//!
//! Usage:
//!   cargo run --bin loadgen -- --url http://localhost:8080/api/summary \
//!       --qps 20 --duration 30 --work 5 --tail-every 10 --tail-extra 100 \
//!       --strategy baseline --rep 1 --out results/summary.csv
//!
//! Aggregate repetitions:
//!   cargo run --bin loadgen -- --aggregate results/summary.csv

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result, bail};
use tokio::task::JoinSet;
use tokio::time::MissedTickBehavior;

use minishop::perf::LatencySamples;
use minishop::report::{self, RunSummary};
use minishop::work_simulator::LoadParams;

fn arg_value(name: &str) -> Option<String> {
    let args: Vec<String> = std::env::args().collect();
    for i in 0..args.len() {
        if args[i] == name && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

fn parsed_arg<T: std::str::FromStr>(name: &str, default: T) -> Result<T> {
    match arg_value(name) {
        Some(v) => v
            .parse()
            .map_err(|_| anyhow::anyhow!("Invalid value for {}: {}", name, v)),
        None => Ok(default),
    }
}

struct RunConfig {
    url: String,
    qps: u32,
    duration: Duration,
    params: LoadParams,
    strategy: String,
    rep: u32,
    out: PathBuf,
}

impl RunConfig {
    fn from_args() -> Result<Self> {
        let qps: u32 = parsed_arg("--qps", 10)?;
        if qps == 0 {
            bail!("--qps must be positive");
        }
        Ok(Self {
            url: arg_value("--url")
                .unwrap_or_else(|| "http://localhost:8080/api/summary".to_string()),
            qps,
            duration: Duration::from_secs(parsed_arg("--duration", 10)?),
            params: LoadParams::new(
                parsed_arg("--work", 0)?,
                parsed_arg("--tail-every", 0)?,
                parsed_arg("--tail-extra", 0)?,
            ),
            strategy: arg_value("--strategy").unwrap_or_else(|| "baseline".to_string()),
            rep: parsed_arg("--rep", 1)?,
            out: PathBuf::from(
                arg_value("--out").unwrap_or_else(|| "results/summary.csv".to_string()),
            ),
        })
    }
}

async fn run(config: RunConfig) -> Result<()> {
    let client = Arc::new(
        reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .context("Failed to build HTTP client")?,
    );

    println!(
        "Driving {} at {} qps for {:?} (work={} tailEvery={} tailExtra={})",
        config.url,
        config.qps,
        config.duration,
        config.params.work_ms,
        config.params.tail_every,
        config.params.tail_extra_ms
    );

    let mut ticker = tokio::time::interval(Duration::from_secs_f64(1.0 / config.qps as f64));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Burst);

    let mut in_flight = JoinSet::new();
    let start = Instant::now();
    while start.elapsed() < config.duration {
        ticker.tick().await;
        let client = client.clone();
        let url = config.url.clone();
        let params = config.params;
        in_flight.spawn(async move {
            let sent = Instant::now();
            let ok = match client.get(&url).query(&params).send().await {
                Ok(resp) => resp.status().is_success(),
                Err(_) => false,
            };
            (ok, sent.elapsed())
        });
    }

    let mut samples = LatencySamples::with_capacity(in_flight.len());
    let mut errors = 0usize;
    while let Some(result) = in_flight.join_next().await {
        match result {
            Ok((true, latency)) => samples.record(latency),
            Ok((false, _)) => errors += 1,
            Err(e) => {
                eprintln!("request task failed: {}", e);
                errors += 1;
            }
        }
    }
    let elapsed = start.elapsed();

    samples.print_report(&config.strategy);
    println!("  errors: {}", errors);

    if samples.is_empty() {
        bail!("No successful requests, nothing to record");
    }

    let secs = |d: Option<Duration>| d.map(|d| d.as_secs_f64()).unwrap_or(0.0);
    let summary = RunSummary {
        strategy: config.strategy,
        qps: config.qps,
        rep: config.rep,
        actual_qps: samples.len() as f64 / elapsed.as_secs_f64(),
        p50_s: secs(samples.percentile(50.0)),
        p90_s: secs(samples.percentile(90.0)),
        p99_s: secs(samples.percentile(99.0)),
    };
    report::append_summary(&config.out, &summary)?;
    println!("✅ Appended run to {}", config.out.display());
    Ok(())
}

fn aggregate(summary_path: &Path) -> Result<()> {
    let runs = report::read_summary(summary_path)?;
    let rows = report::aggregate(&runs);
    let out = summary_path.with_file_name("aggregated_latency.csv");
    report::write_aggregated(&out, &rows)?;

    println!("=== Aggregated {} runs into {} rows ===", runs.len(), rows.len());
    println!("{}", report::AGGREGATED_HEADER);
    for row in &rows {
        println!("{}", row.to_csv_line());
    }
    println!("✅ Saved {}", out.display());
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    if let Some(path) = arg_value("--aggregate") {
        return aggregate(Path::new(&path));
    }
    run(RunConfig::from_args()?).await
}
