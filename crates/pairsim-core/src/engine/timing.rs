use super::worker::WorkerRole;
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy)]
pub struct Stopwatch {
    started: Instant,
}

impl Stopwatch {
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Local computation interval of one worker.
#[derive(Debug, Clone, PartialEq)]
pub struct ComputeTiming {
    pub worker: usize,
    pub role: WorkerRole,
    pub items: usize,
    pub elapsed: Duration,
}

impl ComputeTiming {
    /// Mean time per scored pair; `None` for a worker that received no work.
    pub fn average_per_item(&self) -> Option<Duration> {
        if self.items == 0 {
            None
        } else {
            Some(self.elapsed.div_f64(self.items as f64))
        }
    }
}

/// Phase timings of one run. Diagnostic only; nothing in the engine reads them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PhaseTimings {
    /// From "chunks ready" to "every worker holds its chunk".
    pub distribution: Duration,
    /// One entry per worker, ordered by worker index.
    pub computation: Vec<ComputeTiming>,
    /// From "coordinator starts waiting" to "every report received".
    pub collection: Duration,
    /// Wall-clock time of the whole run, loading and persistence included.
    pub total: Duration,
}
