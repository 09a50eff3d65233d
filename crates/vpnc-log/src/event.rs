//! Status events: the only record kind in the log.

use serde::{Deserialize, Serialize};
use std::fmt::{Display, Formatter};
use std::str::FromStr;

/// Closed set of lifecycle states a connection can report.
///
/// `Starting`/`Stopping` are transient markers, `Up`/`Down` are resolved
/// states, and `Failed` records a transition attempt that did not reach its
/// target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Status {
    Starting,
    Stopping,
    Up,
    Down,
    Failed,
}

impl Status {
    pub const ALL: [Status; 5] = [
        Status::Starting,
        Status::Stopping,
        Status::Up,
        Status::Down,
        Status::Failed,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Starting => "STARTING",
            Self::Stopping => "STOPPING",
            Self::Up => "UP",
            Self::Down => "DOWN",
            Self::Failed => "FAILED",
        }
    }

    /// `Up` or `Down`.
    pub fn is_resolved(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }

    pub fn is_transient(self) -> bool {
        matches!(self, Self::Starting | Self::Stopping)
    }
}

impl Display for Status {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status `{0}` (expected one of STARTING, STOPPING, UP, DOWN, FAILED)")]
pub struct ParseStatusError(pub String);

impl FromStr for Status {
    type Err = ParseStatusError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Status::ALL
            .into_iter()
            .find(|status| status.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseStatusError(trimmed.to_string()))
    }
}

/// One recorded observation. `timestamp` is milliseconds since the Unix epoch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Event {
    pub status: Status,
    pub timestamp: i64,
}

impl Event {
    pub fn new(status: Status, timestamp: i64) -> Self {
        Self { status, timestamp }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_parses_case_insensitively() {
        assert_eq!("up".parse::<Status>(), Ok(Status::Up));
        assert_eq!(" Failed ".parse::<Status>(), Ok(Status::Failed));
        assert_eq!("STOPPING".parse::<Status>(), Ok(Status::Stopping));
    }

    #[test]
    fn status_rejects_unknown_names() {
        let err = "RUNNING".parse::<Status>().expect_err("RUNNING is not a status");
        assert_eq!(err, ParseStatusError("RUNNING".to_string()));
        assert!(err.to_string().contains("unknown status `RUNNING`"));
    }

    #[test]
    fn event_serializes_with_upper_case_status() {
        let json = serde_json::to_string(&Event::new(Status::Starting, 1_700_000_000_000))
            .expect("event should serialize");
        assert_eq!(json, r#"{"status":"STARTING","timestamp":1700000000000}"#);
    }

    #[test]
    fn resolved_and_transient_partition() {
        for status in Status::ALL {
            let classes = [
                status.is_resolved(),
                status.is_transient(),
                status == Status::Failed,
            ];
            assert_eq!(classes.iter().filter(|c| **c).count(), 1, "{status}");
        }
    }
}
