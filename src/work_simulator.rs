//! Work Simulator - synthetic CPU burn and periodic tail latency
//!
//! Every service (product, order, gateway) owns one `WorkSimulator`. A request
//! carries `LoadParams`; the simulator turns them into pure CPU-bound busy
//! work on the calling worker:
//!
//! ```text
//! request ──▶ burn_cpu_ms(work) ──▶ maybe_add_tail(tailEvery, tailExtra) ──▶ handler body
//!                                        │
//!                                        └─ every Nth call burns tailExtra ms more
//! ```
//!
//! The busy loop never sleeps or yields: it models CPU contention, not waiting.

use std::hint::black_box;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use utoipa::IntoParams;

/// Odd 64-bit mixing constant (golden ratio)
const MIX: u64 = 0x9e37_79b9_7f4a_7c15;

/// Write-only sink for the burn accumulator. Never read back.
static SINK: AtomicU64 = AtomicU64::new(0);

// ============================================================================
// LoadParams
// ============================================================================

/// Caller-supplied load knobs, bound from `?work=&tailEvery=&tailExtra=`.
///
/// All three default to 0 (no injected load). Negative or non-numeric values
/// are rejected by the query extractor before they reach the simulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, IntoParams)]
#[serde(default)]
#[into_params(parameter_in = Query)]
pub struct LoadParams {
    /// CPU burn per hop in milliseconds
    #[serde(rename = "work")]
    #[param(example = 10)]
    pub work_ms: u64,
    /// Burn extra on every Nth call (0 = never)
    #[serde(rename = "tailEvery")]
    #[param(example = 10)]
    pub tail_every: u64,
    /// Extra burn for a tail call in milliseconds
    #[serde(rename = "tailExtra")]
    #[param(example = 100)]
    pub tail_extra_ms: u64,
}

impl LoadParams {
    pub fn new(work_ms: u64, tail_every: u64, tail_extra_ms: u64) -> Self {
        Self {
            work_ms,
            tail_every,
            tail_extra_ms,
        }
    }

    /// No injected load at all
    pub fn is_idle(&self) -> bool {
        self.work_ms == 0 && (self.tail_every == 0 || self.tail_extra_ms == 0)
    }
}

fn saturating_i64(v: u64) -> i64 {
    i64::try_from(v).unwrap_or(i64::MAX)
}

// ============================================================================
// WorkSimulator
// ============================================================================

/// Per-service load injector. Owns the tail call counter.
#[derive(Debug, Default)]
pub struct WorkSimulator {
    /// Incremented once per `maybe_add_tail` that passes the no-op guard
    calls: AtomicU64,
}

impl WorkSimulator {
    pub fn new() -> Self {
        Self {
            calls: AtomicU64::new(0),
        }
    }

    /// Spin the calling thread for at least `ms` milliseconds.
    ///
    /// `ms <= 0` returns immediately.
    pub fn burn_cpu_ms(ms: i64) {
        if ms <= 0 {
            return;
        }

        let start = Instant::now();
        let target = Duration::from_millis(ms as u64);
        let mut x: u64 = 0;
        while start.elapsed() < target {
            x ^= (x << 1).wrapping_add(MIX);
        }
        SINK.store(black_box(x), Ordering::Relaxed);
    }

    /// Count this call and burn `extra_ms` when the count hits a multiple of `every`.
    ///
    /// Returns `true` when the tail burn fired. Either argument `<= 0` is a
    /// no-op and does not advance the counter.
    pub fn maybe_add_tail(&self, every: i64, extra_ms: i64) -> bool {
        if every <= 0 || extra_ms <= 0 {
            return false;
        }

        let n = self.calls.fetch_add(1, Ordering::AcqRel) + 1;
        if n % every as u64 == 0 {
            tracing::trace!(target: "tail", call = n, every, extra_ms, "tail burn");
            Self::burn_cpu_ms(extra_ms);
            return true;
        }
        false
    }

    /// Run the full per-hop preamble: base work, then the tail check.
    pub fn apply(&self, params: &LoadParams) -> bool {
        if params.is_idle() {
            return false;
        }
        Self::burn_cpu_ms(saturating_i64(params.work_ms));
        self.maybe_add_tail(
            saturating_i64(params.tail_every),
            saturating_i64(params.tail_extra_ms),
        )
    }

    /// Tail-counted calls so far
    pub fn calls(&self) -> u64 {
        self.calls.load(Ordering::Acquire)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn timed<F: FnOnce() -> R, R>(f: F) -> (R, Duration) {
        let start = Instant::now();
        let r = f();
        (r, start.elapsed())
    }

    #[test]
    fn test_burn_zero_and_negative_return_immediately() {
        let ((), zero) = timed(|| WorkSimulator::burn_cpu_ms(0));
        let ((), negative) = timed(|| WorkSimulator::burn_cpu_ms(-25));
        assert!(zero < Duration::from_millis(5), "burn(0) took {:?}", zero);
        assert!(
            negative < Duration::from_millis(5),
            "burn(-25) took {:?}",
            negative
        );
    }

    #[test]
    fn test_burn_blocks_at_least_requested() {
        for ms in [1_i64, 15, 40] {
            let ((), elapsed) = timed(|| WorkSimulator::burn_cpu_ms(ms));
            assert!(
                elapsed >= Duration::from_millis(ms as u64),
                "burn({}) returned after {:?}",
                ms,
                elapsed
            );
        }
    }

    #[test]
    fn test_tail_fires_on_every_third_call() {
        let sim = WorkSimulator::new();
        let mut fired = Vec::new();
        let mut durations = Vec::new();

        for _ in 0..9 {
            let (hit, elapsed) = timed(|| sim.maybe_add_tail(3, 50));
            fired.push(hit);
            durations.push(elapsed);
        }

        assert_eq!(
            fired,
            vec![false, false, true, false, false, true, false, false, true]
        );
        for (i, d) in durations.iter().enumerate() {
            let call = i + 1;
            if call % 3 == 0 {
                assert!(*d >= Duration::from_millis(50), "call #{} took {:?}", call, d);
            } else {
                assert!(*d < Duration::from_millis(50), "call #{} took {:?}", call, d);
            }
        }
        assert_eq!(sim.calls(), 9);
    }

    #[test]
    fn test_tail_disabled_by_zero_every_or_zero_extra() {
        let sim = WorkSimulator::new();
        for _ in 0..20 {
            assert!(!sim.maybe_add_tail(0, 50));
            assert!(!sim.maybe_add_tail(2, 0));
            assert!(!sim.maybe_add_tail(-1, 50));
            assert!(!sim.maybe_add_tail(2, -10));
        }
        // guarded calls never touch the counter
        assert_eq!(sim.calls(), 0);
    }

    #[test]
    fn test_first_tail_is_the_call_reaching_every() {
        let sim = WorkSimulator::new();
        assert!(!sim.maybe_add_tail(2, 1));
        assert!(sim.maybe_add_tail(2, 1));
    }

    #[test]
    fn test_counter_is_atomic_across_threads() {
        let sim = Arc::new(WorkSimulator::new());
        let fired = Arc::new(AtomicU64::new(0));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let sim = sim.clone();
                let fired = fired.clone();
                std::thread::spawn(move || {
                    for _ in 0..125 {
                        if sim.maybe_add_tail(100, 1) {
                            fired.fetch_add(1, Ordering::Relaxed);
                        }
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        assert_eq!(sim.calls(), 1000);
        assert_eq!(fired.load(Ordering::Relaxed), 10);
    }

    #[test]
    fn test_apply_runs_work_then_tail() {
        let sim = WorkSimulator::new();
        let params = LoadParams::new(10, 1, 10);
        let (hit, elapsed) = timed(|| sim.apply(&params));
        assert!(hit);
        assert!(elapsed >= Duration::from_millis(20));
        assert_eq!(sim.calls(), 1);
    }

    #[test]
    fn test_apply_idle_params_is_free() {
        let sim = WorkSimulator::new();
        for params in [LoadParams::default(), LoadParams::new(0, 3, 0)] {
            assert!(params.is_idle());
            let (hit, elapsed) = timed(|| sim.apply(&params));
            assert!(!hit);
            assert!(elapsed < Duration::from_millis(5));
        }
        assert_eq!(sim.calls(), 0);
    }

    #[test]
    fn test_load_params_defaults_and_names() {
        let params: LoadParams = serde_json::from_str("{}").unwrap();
        assert_eq!(params, LoadParams::default());
        assert!(params.is_idle());

        let params: LoadParams =
            serde_json::from_str(r#"{"work":5,"tailEvery":10,"tailExtra":200}"#).unwrap();
        assert_eq!(params, LoadParams::new(5, 10, 200));
        assert!(!params.is_idle());

        assert!(serde_json::from_str::<LoadParams>(r#"{"work":-1}"#).is_err());
    }
}
