//! Current-status derivation.

use vpnc_log::{Event, Status};

/// The status the connection is currently in, as far as the log can tell.
///
/// A trailing `FAILED` is not a state: the attempt left the connection where
/// it was, so the answer falls back to the most recent `UP`/`DOWN` by log
/// position (not by timestamp). A failure with nothing resolved before it
/// yields `None`. Transient markers at the tail are returned as-is; they mean
/// the outcome was never recorded.
pub fn current_status(events: &[Event]) -> Option<&Event> {
    let last = events.last()?;
    if last.status != Status::Failed {
        return Some(last);
    }
    events.iter().rev().find(|event| event.status.is_resolved())
}

/// Whole seconds since `event` went `UP`, or `None` for any other status.
///
/// Clamped at zero when the clock is behind the recorded timestamp.
pub fn uptime_seconds(event: &Event, now_millis: i64) -> Option<i64> {
    if event.status != Status::Up {
        return None;
    }
    Some(now_millis.saturating_sub(event.timestamp).max(0) / 1000)
}
