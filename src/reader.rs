//! Blocking read loop: source -> tracker -> sink.
//!
//! One reader per source, on its own thread. It is the only writer into the tracker.
//! Stopping is cooperative: the flag is checked between events, so a reader blocked on
//! an idle device exits once its current read returns.

use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};

use crate::error::{Error, Result};
use crate::input::EventSource;
use crate::sink::{deliver, TransitionSink};
use crate::tracker::ButtonTracker;

/// Counters returned when a reader exits cleanly.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct ReadStats {
    pub events: u64,
    pub transitions: u64,
}

pub struct Reader<S, K> {
    source: S,
    tracker: Arc<ButtonTracker>,
    sink: K,
}

impl<S, K> Reader<S, K>
where
    S: EventSource,
    K: TransitionSink,
{
    pub fn new(source: S, tracker: Arc<ButtonTracker>, sink: K) -> Self {
        Self { source, tracker, sink }
    }

    /// Run until `stop` is set or the source ends. Read errors end the loop.
    ///
    /// Fails up front if the source speaks a different code space than the tracker's
    /// table, which would otherwise drop every event as unmapped.
    pub fn run(&mut self, stop: &AtomicBool) -> Result<ReadStats> {
        let mut stats = ReadStats::default();
        let kind = self.source.kind();
        let expected = self.tracker.mapping().source();
        if kind != expected {
            return Err(Error::SourceMismatch {
                expected,
                actual: kind,
            });
        }

        while !stop.load(Ordering::Acquire) {
            let Some(ev) = self.source.next_event()? else {
                log::info!("[{}] source ended after {} events", kind, stats.events);
                return Ok(stats);
            };

            if stats.events == 0 {
                log::info!("[{}] events flowing", kind);
            }
            stats.events += 1;

            if let Some(transition) = self.tracker.apply(ev.device, ev.code, ev.value) {
                stats.transitions += 1;
                deliver(&mut self.sink, transition);
            }

            if stats.events.is_multiple_of(500) {
                log::debug!("[{}] events processed: {}", kind, stats.events);
            }
        }

        log::info!("[{}] stopped", kind);
        Ok(stats)
    }
}

impl<S, K> Reader<S, K>
where
    S: EventSource + 'static,
    K: TransitionSink + 'static,
{
    /// Start the loop on a dedicated thread.
    pub fn spawn(mut self, name: &str) -> io::Result<ReaderHandle> {
        let stop = Arc::new(AtomicBool::new(false));

        let thread_stop = stop.clone();
        let label = name.to_string();
        let thread = thread::Builder::new().name(name.into()).spawn(move || {
            log::info!("[{}] reader thread starting", label);
            let result = self.run(&thread_stop);
            if let Err(ref e) = result {
                log::error!("[{}] {}", label, e);
            }
            result
        })?;

        Ok(ReaderHandle { stop, thread })
    }
}

pub struct ReaderHandle {
    stop: Arc<AtomicBool>,
    thread: JoinHandle<Result<ReadStats>>,
}

impl ReaderHandle {
    /// Ask the reader to exit after its current read.
    pub fn stop(&self) {
        self.stop.store(true, Ordering::Release);
    }

    /// False once the thread has exited, whether it returned or panicked.
    pub fn is_running(&self) -> bool {
        !self.thread.is_finished()
    }

    /// Wait for the reader thread. A panic in the reader is resumed here.
    pub fn join(self) -> Result<ReadStats> {
        match self.thread.join() {
            Ok(result) => result,
            Err(panic) => std::panic::resume_unwind(panic),
        }
    }
}
