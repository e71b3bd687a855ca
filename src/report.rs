//! Load-run summaries and their aggregation
//!
//! One `RunSummary` row is produced per (strategy, qps, rep) load run and
//! appended to `summary.csv`. `aggregate` folds repetitions into one
//! `AggregatedLatency` row per (strategy, qps) with millisecond means and
//! sample standard deviations, written as `aggregated_latency.csv`.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::path::Path;

use anyhow::{Context, Result, bail};

pub const SUMMARY_HEADER: &str = "strategy,qps,rep,actual_qps,p50_s,p90_s,p99_s";
pub const AGGREGATED_HEADER: &str = "strategy,qps,runs,actual_qps_mean,p50_mean_ms,p50_std_ms,p90_mean_ms,p90_std_ms,p99_mean_ms,p99_std_ms";

/// One load run. Latencies in seconds.
#[derive(Debug, Clone, PartialEq)]
pub struct RunSummary {
    pub strategy: String,
    pub qps: u32,
    pub rep: u32,
    pub actual_qps: f64,
    pub p50_s: f64,
    pub p90_s: f64,
    pub p99_s: f64,
}

impl RunSummary {
    pub fn to_csv_line(&self) -> String {
        format!(
            "{},{},{},{:.3},{:.6},{:.6},{:.6}",
            self.strategy, self.qps, self.rep, self.actual_qps, self.p50_s, self.p90_s, self.p99_s
        )
    }
}

/// Repetitions of one (strategy, qps) folded together. Latencies in ms.
///
/// Standard deviations are `None` for a single run.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedLatency {
    pub strategy: String,
    pub qps: u32,
    pub runs: usize,
    pub actual_qps_mean: f64,
    pub p50_mean_ms: f64,
    pub p50_std_ms: Option<f64>,
    pub p90_mean_ms: f64,
    pub p90_std_ms: Option<f64>,
    pub p99_mean_ms: f64,
    pub p99_std_ms: Option<f64>,
}

impl AggregatedLatency {
    pub fn to_csv_line(&self) -> String {
        let std = |v: Option<f64>| v.map(|v| format!("{:.3}", v)).unwrap_or_default();
        format!(
            "{},{},{},{:.3},{:.3},{},{:.3},{},{:.3},{}",
            self.strategy,
            self.qps,
            self.runs,
            self.actual_qps_mean,
            self.p50_mean_ms,
            std(self.p50_std_ms),
            self.p90_mean_ms,
            std(self.p90_std_ms),
            self.p99_mean_ms,
            std(self.p99_std_ms),
        )
    }
}

// ============================================================
// Aggregation
// ============================================================

fn mean(values: &[f64]) -> f64 {
    values.iter().sum::<f64>() / values.len() as f64
}

/// Sample standard deviation (n - 1)
fn sample_std(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let m = mean(values);
    let var = values.iter().map(|v| (v - m).powi(2)).sum::<f64>() / (values.len() - 1) as f64;
    Some(var.sqrt())
}

/// Group runs by (strategy, qps), ordered by strategy then qps.
pub fn aggregate(runs: &[RunSummary]) -> Vec<AggregatedLatency> {
    let mut groups: BTreeMap<(&str, u32), Vec<&RunSummary>> = BTreeMap::new();
    for run in runs {
        groups
            .entry((run.strategy.as_str(), run.qps))
            .or_default()
            .push(run);
    }

    groups
        .into_iter()
        .map(|((strategy, qps), group)| {
            let col = |f: fn(&RunSummary) -> f64| group.iter().map(|r| f(*r)).collect::<Vec<_>>();
            let p50 = col(|r| r.p50_s * 1000.0);
            let p90 = col(|r| r.p90_s * 1000.0);
            let p99 = col(|r| r.p99_s * 1000.0);

            AggregatedLatency {
                strategy: strategy.to_string(),
                qps,
                runs: group.len(),
                actual_qps_mean: mean(&col(|r| r.actual_qps)),
                p50_mean_ms: mean(&p50),
                p50_std_ms: sample_std(&p50),
                p90_mean_ms: mean(&p90),
                p90_std_ms: sample_std(&p90),
                p99_mean_ms: mean(&p99),
                p99_std_ms: sample_std(&p99),
            }
        })
        .collect()
}

// ============================================================
// CSV I/O
// ============================================================

/// Append one run, writing the header first if the file is new or empty.
pub fn append_summary(path: &Path, run: &RunSummary) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create {}", parent.display()))?;
    }
    let needs_header = std::fs::metadata(path).map(|m| m.len() == 0).unwrap_or(true);

    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;
    if needs_header {
        writeln!(file, "{}", SUMMARY_HEADER)?;
    }
    writeln!(file, "{}", run.to_csv_line())?;
    Ok(())
}

/// Read `summary.csv`. Columns are located by header name, extra columns are ignored.
pub fn read_summary(path: &Path) -> Result<Vec<RunSummary>> {
    let file = File::open(path).with_context(|| format!("Failed to open {}", path.display()))?;
    let mut lines = BufReader::new(file).lines();

    let header = match lines.next() {
        Some(line) => line?,
        None => bail!("{} is empty", path.display()),
    };
    let columns: Vec<&str> = header.split(',').map(str::trim).collect();
    let index_of = |name: &str| {
        columns
            .iter()
            .position(|c| *c == name)
            .with_context(|| format!("Missing column '{}' in {}", name, path.display()))
    };
    let strategy_i = index_of("strategy")?;
    let qps_i = index_of("qps")?;
    let rep_i = index_of("rep")?;
    let actual_i = index_of("actual_qps")?;
    let p50_i = index_of("p50_s")?;
    let p90_i = index_of("p90_s")?;
    let p99_i = index_of("p99_s")?;

    let mut runs = Vec::new();
    for (line_num, line) in lines.enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        let parts: Vec<&str> = line.split(',').map(str::trim).collect();
        let field = |i: usize| {
            parts
                .get(i)
                .copied()
                .with_context(|| format!("Short row at line {}", line_num + 2))
        };
        let number = |i: usize| -> Result<f64> {
            field(i)?
                .parse()
                .with_context(|| format!("Invalid number at line {}", line_num + 2))
        };

        runs.push(RunSummary {
            strategy: field(strategy_i)?.to_string(),
            qps: number(qps_i)?.round() as u32,
            rep: number(rep_i)?.round() as u32,
            actual_qps: number(actual_i)?,
            p50_s: number(p50_i)?,
            p90_s: number(p90_i)?,
            p99_s: number(p99_i)?,
        });
    }
    Ok(runs)
}

pub fn write_aggregated(path: &Path, rows: &[AggregatedLatency]) -> Result<()> {
    let mut file =
        File::create(path).with_context(|| format!("Failed to create {}", path.display()))?;
    writeln!(file, "{}", AGGREGATED_HEADER)?;
    for row in rows {
        writeln!(file, "{}", row.to_csv_line())?;
    }
    Ok(())
}
