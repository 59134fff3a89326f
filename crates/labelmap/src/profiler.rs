//! Scoped region timing, per tag and per thread.
//!
//! A [`Profiler`] is an explicitly owned context object: there is no
//! process-wide static store, so multiple profilers (and the tables
//! they observe) can coexist and be torn down independently. Each
//! worker thread takes a [`Recorder`], wraps code regions in
//! [`RegionTimer`] guards, and accumulates events in a local buffer
//! that flushes into the shared store under a single lock when it
//! fills and when the recorder drops.
//!
//! Timing is observability only; wrapping lookup-table operations in
//! timers has no effect on their behavior.

use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt::Write as _;
use std::io;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use parking_lot::Mutex;
use serde::Serialize;
use tracing::{debug, info};

use labelmap_core::{CoreError, CoreResult};

/// Local events buffered per recorder before a flush into the shared
/// store.
const FLUSH_THRESHOLD: usize = 1024;

#[derive(Debug, Clone)]
struct RegionEvent {
    tag: &'static str,
    thread: u64,
    duration: Duration,
}

struct Store {
    events: Mutex<Vec<RegionEvent>>,
    next_thread: AtomicU64,
}

/// Shared handle to a profiling session.
///
/// Cloning is cheap and yields a handle to the same event store.
#[derive(Clone)]
pub struct Profiler {
    store: Arc<Store>,
}

impl Profiler {
    /// Creates an empty profiling session.
    #[must_use]
    pub fn new() -> Self {
        Self {
            store: Arc::new(Store {
                events: Mutex::new(Vec::new()),
                next_thread: AtomicU64::new(0),
            }),
        }
    }

    /// Creates a recorder for the calling thread.
    ///
    /// Each recorder is tagged with a dense thread index assigned in
    /// creation order, which is what aggregation reports as the
    /// thread. One recorder per thread; recorders are not `Sync`.
    #[must_use]
    pub fn recorder(&self) -> Recorder {
        let thread = self.store.next_thread.fetch_add(1, Ordering::Relaxed);
        Recorder {
            store: Arc::clone(&self.store),
            thread,
            buffer: RefCell::new(Vec::new()),
        }
    }

    /// Aggregates all flushed events, grouped by tag and thread.
    ///
    /// Only events already flushed into the shared store are counted;
    /// drop (or [`flush`](Recorder::flush)) recorders before
    /// aggregating. Rows are sorted by tag, then thread.
    #[must_use]
    pub fn stats(&self) -> Vec<RegionStats> {
        let events = self.store.events.lock();
        let mut grouped: HashMap<(&'static str, u64), Vec<u64>> = HashMap::new();
        for event in events.iter() {
            grouped
                .entry((event.tag, event.thread))
                .or_default()
                .push(event.duration.as_micros() as u64);
        }

        let mut rows: Vec<RegionStats> = grouped
            .into_iter()
            .map(|((tag, thread), times)| RegionStats::from_times(tag, thread, &times))
            .collect();
        rows.sort_by(|a, b| a.tag.cmp(&b.tag).then(a.thread.cmp(&b.thread)));
        rows
    }

    /// Renders a human-readable per-tag, per-thread timing summary.
    #[must_use]
    pub fn render_report(&self) -> String {
        let rows = self.stats();
        let mut out = String::from("=== region timing (per thread) ===\n");
        let mut current_tag: Option<&str> = None;
        let mut threads = std::collections::HashSet::new();
        for row in &rows {
            if current_tag != Some(row.tag.as_str()) {
                let _ = writeln!(out, "--- {} ---", row.tag);
                current_tag = Some(row.tag.as_str());
            }
            let _ = writeln!(
                out,
                "  thread {} | calls: {} | total(ms): {:.3} | avg(us): {:.1} | min(us): {} | max(us): {}",
                row.thread,
                row.calls,
                row.total_us as f64 / 1000.0,
                row.mean_us,
                row.min_us,
                row.max_us,
            );
            threads.insert(row.thread);
        }
        let _ = writeln!(out, "threads observed: {}", threads.len());
        out
    }

    /// Writes the aggregated stats as CSV.
    ///
    /// Column layout follows [`RegionStats`]: tag, thread, calls,
    /// total, mean, min, max.
    ///
    /// # Errors
    ///
    /// Returns [`CoreError::Serialization`] when a row fails to encode
    /// and [`CoreError::Io`] when the underlying writer fails.
    pub fn export_csv<W: io::Write>(&self, writer: W) -> CoreResult<()> {
        let rows = self.stats();
        let mut csv_writer = csv::Writer::from_writer(writer);
        for row in &rows {
            csv_writer
                .serialize(row)
                .map_err(|e| CoreError::Serialization(e.to_string()))?;
        }
        csv_writer.flush()?;
        info!(rows = rows.len(), "exported profiler stats to csv");
        Ok(())
    }

    /// Discards all flushed events.
    ///
    /// Events still buffered in live recorders survive and will land
    /// in the store on their next flush.
    pub fn clear(&self) {
        self.store.events.lock().clear();
    }
}

impl Default for Profiler {
    fn default() -> Self {
        Self::new()
    }
}

/// Per-thread event buffer for one profiling session.
///
/// Obtained from [`Profiler::recorder`]; flushes its buffer into the
/// shared store when full and on drop.
pub struct Recorder {
    store: Arc<Store>,
    thread: u64,
    buffer: RefCell<Vec<RegionEvent>>,
}

impl Recorder {
    /// Starts timing a tagged region; the elapsed time is recorded
    /// when the returned guard drops.
    #[must_use]
    pub fn time(&self, tag: &'static str) -> RegionTimer<'_> {
        RegionTimer {
            recorder: self,
            tag,
            start: Instant::now(),
        }
    }

    /// Thread index this recorder reports under.
    #[must_use]
    pub fn thread_index(&self) -> u64 {
        self.thread
    }

    /// Moves buffered events into the shared store.
    pub fn flush(&self) {
        let drained: Vec<RegionEvent> = {
            let mut buffer = self.buffer.borrow_mut();
            if buffer.is_empty() {
                return;
            }
            buffer.drain(..).collect()
        };
        debug!(
            thread = self.thread,
            events = drained.len(),
            "flushing recorder buffer"
        );
        self.store.events.lock().extend(drained);
    }

    fn record(&self, tag: &'static str, duration: Duration) {
        let full = {
            let mut buffer = self.buffer.borrow_mut();
            buffer.push(RegionEvent {
                tag,
                thread: self.thread,
                duration,
            });
            buffer.len() >= FLUSH_THRESHOLD
        };
        if full {
            self.flush();
        }
    }
}

impl Drop for Recorder {
    fn drop(&mut self) {
        self.flush();
    }
}

/// RAII guard that records the wall-clock time of a code region on
/// drop.
pub struct RegionTimer<'a> {
    recorder: &'a Recorder,
    tag: &'static str,
    start: Instant,
}

impl Drop for RegionTimer<'_> {
    fn drop(&mut self) {
        self.recorder.record(self.tag, self.start.elapsed());
    }
}

/// Aggregated timing for one (tag, thread) pair.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegionStats {
    /// Region tag as passed to [`Recorder::time`].
    pub tag: String,
    /// Dense thread index assigned by the profiler.
    pub thread: u64,
    /// Number of recorded regions.
    pub calls: u64,
    /// Total elapsed time, microseconds.
    pub total_us: u64,
    /// Mean elapsed time, microseconds.
    pub mean_us: f64,
    /// Shortest recorded region, microseconds.
    pub min_us: u64,
    /// Longest recorded region, microseconds.
    pub max_us: u64,
}

impl RegionStats {
    fn from_times(tag: &str, thread: u64, times_us: &[u64]) -> Self {
        let total: u64 = times_us.iter().sum();
        let min = times_us.iter().copied().min().unwrap_or(0);
        let max = times_us.iter().copied().max().unwrap_or(0);
        let calls = times_us.len() as u64;
        Self {
            tag: tag.to_string(),
            thread,
            calls,
            total_us: total,
            mean_us: if calls == 0 {
                0.0
            } else {
                total as f64 / calls as f64
            },
            min_us: min,
            max_us: max,
        }
    }
}
