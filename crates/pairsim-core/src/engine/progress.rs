use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub enum Progress {
    PhaseStart { name: &'static str },
    PhaseFinish,

    /// A worker holds its chunk and is waiting for the others.
    ChunkReceived { worker: usize },

    TaskStart { total_steps: u64 },
    TaskIncrement,
    TaskFinish,

    WorkerFinished {
        worker: usize,
        items: usize,
        elapsed: Duration,
    },
}

pub type ProgressCallback<'a> = Box<dyn Fn(Progress) + Send + Sync + 'a>;

/// Fan-out point for progress events.
///
/// A reporter is shared by reference between the coordinator and every worker
/// thread, so the callback may be invoked concurrently.
#[derive(Default)]
pub struct ProgressReporter<'a> {
    callback: Option<ProgressCallback<'a>>,
}

impl<'a> ProgressReporter<'a> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_callback(callback: ProgressCallback<'a>) -> Self {
        Self {
            callback: Some(callback),
        }
    }

    #[inline]
    pub fn report(&self, event: Progress) {
        if let Some(cb) = &self.callback {
            cb(event);
        }
    }

    /// Runs `work` between a `PhaseStart` and a `PhaseFinish` event.
    pub fn phase<T>(&self, name: &'static str, work: impl FnOnce() -> T) -> T {
        self.report(Progress::PhaseStart { name });
        let output = work();
        self.report(Progress::PhaseFinish);
        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};

    #[test]
    fn reporter_without_callback_ignores_events() {
        let reporter = ProgressReporter::new();
        reporter.report(Progress::TaskIncrement);
        assert_eq!(reporter.phase("Idle", || 7), 7);
    }

    #[test]
    fn phase_wraps_work_in_start_and_finish_events() {
        let events = Arc::new(Mutex::new(Vec::new()));
        let sink = events.clone();
        let reporter =
            ProgressReporter::with_callback(Box::new(move |e| sink.lock().unwrap().push(e)));

        let value = reporter.phase("Loading", || {
            reporter.report(Progress::TaskIncrement);
            42
        });

        assert_eq!(value, 42);
        assert_eq!(
            *events.lock().unwrap(),
            vec![
                Progress::PhaseStart { name: "Loading" },
                Progress::TaskIncrement,
                Progress::PhaseFinish,
            ]
        );
    }
}
