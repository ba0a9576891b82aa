use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::Serialize;

/// Counters describing one report run. Clones share the same counters.
#[derive(Clone, Default)]
pub struct RunStats {
    inner: Arc<StatsInner>,
}

#[derive(Default)]
struct StatsInner {
    orders_loaded: AtomicU64,
    orders_in_range: AtomicU64,
    machines_evaluated: AtomicU64,
    warnings: AtomicU64,
}

impl RunStats {
    pub fn add_orders_loaded(&self, delta: u64) {
        self.inner.orders_loaded.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn add_orders_in_range(&self, delta: u64) {
        self.inner.orders_in_range.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn add_machines_evaluated(&self, delta: u64) {
        self.inner.machines_evaluated.fetch_add(delta, Ordering::Relaxed);
    }

    pub fn inc_warnings(&self) {
        self.inner.warnings.fetch_add(1, Ordering::Relaxed);
    }

    pub fn snapshot(&self) -> StatsSnapshot {
        StatsSnapshot {
            orders_loaded: self.inner.orders_loaded.load(Ordering::Relaxed),
            orders_in_range: self.inner.orders_in_range.load(Ordering::Relaxed),
            machines_evaluated: self.inner.machines_evaluated.load(Ordering::Relaxed),
            warnings: self.inner.warnings.load(Ordering::Relaxed),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct StatsSnapshot {
    pub orders_loaded: u64,
    pub orders_in_range: u64,
    pub machines_evaluated: u64,
    pub warnings: u64,
}

impl StatsSnapshot {
    pub fn to_json_line(&self, label: &str, elapsed: Option<Duration>) -> String {
        #[derive(Serialize)]
        struct Line<'a> {
            label: &'a str,
            #[serde(flatten)]
            stats: &'a StatsSnapshot,
            elapsed_us: Option<u128>,
        }

        let line = Line {
            label,
            stats: self,
            elapsed_us: elapsed.map(|d| d.as_micros()),
        };
        serde_json::to_string(&line).unwrap_or_else(|_| String::from("{}"))
    }
}

pub struct RunTimer {
    start: Instant,
}

impl RunTimer {
    pub fn start() -> Self {
        Self { start: Instant::now() }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }
}
