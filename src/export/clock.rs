//! Export filename stamps.
//!
//! Stamps are Unix milliseconds, strictly increasing within a process: if
//! the wall clock has not moved past the last stamp, the next one is
//! `last + 1`.

use std::sync::atomic::{AtomicI64, Ordering};

use chrono::Utc;

/// Hands out unique, increasing millisecond stamps.
#[derive(Debug, Default)]
pub struct ExportClock {
    last: AtomicI64,
}

impl ExportClock {
    pub const fn new() -> Self {
        Self {
            last: AtomicI64::new(0),
        }
    }

    /// Next stamp based on the current wall clock.
    pub fn next_stamp(&self) -> i64 {
        self.stamp_at(Utc::now().timestamp_millis())
    }

    /// Next stamp given a wall-clock reading in milliseconds.
    pub fn stamp_at(&self, now_ms: i64) -> i64 {
        let previous = self
            .last
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |last| {
                Some(next_after(last, now_ms))
            })
            .unwrap_or_else(|last| last);
        next_after(previous, now_ms)
    }

    /// Last stamp handed out, or 0 if none.
    #[cfg(test)]
    pub fn last_stamp(&self) -> i64 {
        self.last.load(Ordering::SeqCst)
    }
}

fn next_after(last: i64, now_ms: i64) -> i64 {
    if now_ms > last {
        now_ms
    } else {
        last + 1
    }
}

/// Process-wide clock used by the export command.
pub static EXPORT_CLOCK: ExportClock = ExportClock::new();
