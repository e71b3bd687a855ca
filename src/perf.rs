//! Latency samples - percentile breakdown for load runs
//!
//! Collects one sample per completed request and answers p50/p90/p99 style
//! queries for the load generator.

use std::time::Duration;

/// Per-request latency samples (nanoseconds)
#[derive(Debug, Default, Clone)]
pub struct LatencySamples {
    samples_ns: Vec<u64>,
}

impl LatencySamples {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            samples_ns: Vec::with_capacity(capacity),
        }
    }

    #[inline]
    pub fn record(&mut self, latency: Duration) {
        self.samples_ns
            .push(u64::try_from(latency.as_nanos()).unwrap_or(u64::MAX));
    }

    pub fn len(&self) -> usize {
        self.samples_ns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples_ns.is_empty()
    }

    /// Calculate percentile from samples
    ///
    /// # Arguments
    /// * `p` - Percentile (0-100), e.g., 50.0 for median, 99.0 for P99
    pub fn percentile(&self, p: f64) -> Option<Duration> {
        if self.samples_ns.is_empty() {
            return None;
        }
        let mut sorted = self.samples_ns.clone();
        sorted.sort_unstable();
        let idx = ((p / 100.0) * (sorted.len() - 1) as f64).round() as usize;
        Some(Duration::from_nanos(sorted[idx.min(sorted.len() - 1)]))
    }

    pub fn min(&self) -> Option<Duration> {
        self.samples_ns.iter().copied().min().map(Duration::from_nanos)
    }

    pub fn max(&self) -> Option<Duration> {
        self.samples_ns.iter().copied().max().map(Duration::from_nanos)
    }

    pub fn mean(&self) -> Option<Duration> {
        if self.samples_ns.is_empty() {
            return None;
        }
        let sum: u128 = self.samples_ns.iter().map(|&ns| ns as u128).sum();
        Some(Duration::from_nanos(
            (sum / self.samples_ns.len() as u128) as u64,
        ))
    }

    /// Print a human-readable latency table
    pub fn print_report(&self, label: &str) {
        println!("\n=== Latency: {} ({} samples) ===", label, self.len());
        let fmt = |d: Option<Duration>| {
            d.map(|d| format!("{:.2} ms", d.as_secs_f64() * 1000.0))
                .unwrap_or_else(|| "-".to_string())
        };
        println!("  min:  {}", fmt(self.min()));
        println!("  mean: {}", fmt(self.mean()));
        println!("  p50:  {}", fmt(self.percentile(50.0)));
        println!("  p90:  {}", fmt(self.percentile(90.0)));
        println!("  p99:  {}", fmt(self.percentile(99.0)));
        println!("  max:  {}", fmt(self.max()));
    }
}
