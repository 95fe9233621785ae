//! Live progress line
//!
//! A background thread rewrites a single terminal line with the running
//! total on a fixed interval. It is not synchronized with batch boundaries,
//! so the same number may repeat between ticks.

use log::warn;
use std::io::{self, Write};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;

use super::aggregator::ProgressCounter;

/// Handle to a running progress line
///
/// Stopped by [`ProgressReporter::stop`], or on drop, so an early return or
/// a panic in the pipeline still shuts the thread down and joins it.
pub struct ProgressReporter {
    stop_tx: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl ProgressReporter {
    /// Start ticking `counter` into `out` every `interval`
    pub fn start<W>(counter: ProgressCounter, interval: Duration, mut out: W) -> io::Result<Self>
    where
        W: Write + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name("progress".to_string())
            .spawn(move || {
                loop {
                    write_progress(&mut out, counter.get());
                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        // Stop requested, or the handle was dropped
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                write_progress(&mut out, counter.get());
                writeln!(out).ok();
                out.flush().ok();
            })?;

        Ok(Self {
            stop_tx: Some(stop_tx),
            handle: Some(handle),
        })
    }

    /// Print the final total, end the line, and wait for the thread to exit
    pub fn stop(mut self) {
        self.shutdown();
    }

    fn shutdown(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            tx.send(()).ok();
        }
        if let Some(handle) = self.handle.take()
            && handle.join().is_err()
        {
            warn!("Progress reporter thread panicked");
        }
    }
}

impl Drop for ProgressReporter {
    fn drop(&mut self) {
        self.shutdown();
    }
}

/// Overwrite the current line with the running total
fn write_progress<W: Write>(out: &mut W, total: u64) {
    write!(out, "\r{} spam messages counted", total).ok();
    out.flush().ok();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::count::aggregator::Aggregator;
    use crate::count::test_support::SharedBuf;
    use crate::models::ItemMetadata;

    #[test]
    fn test_stop_prints_final_total_and_newline() {
        let counter = ProgressCounter::new();
        let buf = SharedBuf::default();
        let reporter =
            ProgressReporter::start(counter.clone(), Duration::from_secs(60), buf.clone()).unwrap();

        let mut agg = Aggregator::new(None, counter.clone());
        agg.absorb(&[ItemMetadata::new("a", Some(0))]);
        reporter.stop();

        let out = buf.contents();
        assert!(out.starts_with('\r'));
        assert!(out.ends_with("\r1 spam messages counted\n"));
    }

    #[test]
    fn test_ticks_repeatedly_while_running() {
        let counter = ProgressCounter::new();
        let buf = SharedBuf::default();
        let reporter =
            ProgressReporter::start(counter, Duration::from_millis(5), buf.clone()).unwrap();

        thread::sleep(Duration::from_millis(100));
        reporter.stop();

        let ticks = buf.contents().matches('\r').count();
        assert!(ticks >= 3, "expected several ticks, got {ticks}");
    }

    #[test]
    fn test_drop_stops_thread() {
        let buf = SharedBuf::default();
        {
            let _reporter =
                ProgressReporter::start(ProgressCounter::new(), Duration::from_secs(60), buf.clone())
                    .unwrap();
        }
        // Drop joined the thread, so the final newline is already written
        assert!(buf.contents().ends_with('\n'));
    }
}
