//! Filtered, optionally sorted views over the event log.

use crate::error::EngineError;
use chrono::{DateTime, NaiveDate};
use tracing::warn;
use vpnc_log::{Event, Status};

/// Longest raw filter value accepted from the command line.
pub const MAX_FILTER_VALUE_LEN: usize = 64;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortOrder {
    Ascending,
    Descending,
    /// Keep log (insertion) order.
    #[default]
    Unordered,
}

impl SortOrder {
    /// Parse `asc`/`desc`; anything else keeps log order.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "asc" | "ascending" => Self::Ascending,
            "desc" | "descending" => Self::Descending,
            other => {
                warn!(sort = other, "unrecognized sort order; keeping log order");
                Self::Unordered
            }
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
            Self::Unordered => "none",
        }
    }
}

/// Inclusive timestamp bounds, exact status match, and ordering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HistoryFilter {
    pub from: Option<i64>,
    pub to: Option<i64>,
    pub status: Option<Status>,
    pub sort: SortOrder,
}

impl HistoryFilter {
    /// Validate raw command-line values into a filter.
    pub fn parse(
        from: Option<&str>,
        to: Option<&str>,
        status: Option<&str>,
        sort: Option<&str>,
    ) -> Result<Self, EngineError> {
        let from = from
            .map(|raw| check_len("from", raw).and_then(parse_lower_bound))
            .transpose()?;
        let to = to
            .map(|raw| check_len("to", raw).and_then(parse_upper_bound))
            .transpose()?;
        let status = status
            .map(|raw| {
                check_len("status", raw)?.parse::<Status>().map_err(|e| {
                    EngineError::invalid_filter("status", raw, e.to_string())
                })
            })
            .transpose()?;
        let sort = sort
            .map(|raw| check_len("sort", raw).map(SortOrder::parse_lenient))
            .transpose()?
            .unwrap_or_default();

        if let (Some(lower), Some(upper)) = (from, to)
            && lower > upper
        {
            return Err(EngineError::InvalidFilterValue {
                field: "from",
                value: lower.to_string(),
                reason: format!("lower bound is after upper bound ({upper})"),
            });
        }

        Ok(Self {
            from,
            to,
            status,
            sort,
        })
    }

    pub fn matches(&self, event: &Event) -> bool {
        self.from.is_none_or(|from| event.timestamp >= from)
            && self.to.is_none_or(|to| event.timestamp <= to)
            && self.status.is_none_or(|status| event.status == status)
    }
}

/// Events passing `filter`, in log order unless a sort was requested.
///
/// Sorting is stable: equal timestamps keep their relative log order.
pub fn query_history(events: &[Event], filter: &HistoryFilter) -> Vec<Event> {
    let mut selected: Vec<Event> = events
        .iter()
        .filter(|event| filter.matches(event))
        .copied()
        .collect();
    match filter.sort {
        SortOrder::Ascending => selected.sort_by_key(|event| event.timestamp),
        SortOrder::Descending => {
            selected.sort_by(|left, right| right.timestamp.cmp(&left.timestamp))
        }
        SortOrder::Unordered => {}
    }
    selected
}

/// Start of a date (UTC), an RFC 3339 instant, or raw epoch milliseconds.
pub fn parse_lower_bound(raw: &str) -> Result<i64, EngineError> {
    parse_bound("from", raw, |date| {
        date.and_hms_milli_opt(0, 0, 0, 0)
            .map(|dt| dt.and_utc().timestamp_millis())
    })
}

/// Last millisecond of a date (UTC), so the date itself is included.
pub fn parse_upper_bound(raw: &str) -> Result<i64, EngineError> {
    parse_bound("to", raw, |date| {
        date.and_hms_milli_opt(23, 59, 59, 999)
            .map(|dt| dt.and_utc().timestamp_millis())
    })
}

fn parse_bound(
    field: &'static str,
    raw: &str,
    from_date: impl Fn(NaiveDate) -> Option<i64>,
) -> Result<i64, EngineError> {
    let trimmed = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return from_date(date).ok_or_else(|| {
            EngineError::invalid_filter(field, raw, "date is out of range")
        });
    }
    if let Ok(instant) = DateTime::parse_from_rfc3339(trimmed) {
        return Ok(instant.timestamp_millis());
    }
    if !trimmed.is_empty() && trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return trimmed
            .parse::<i64>()
            .map_err(|e| EngineError::invalid_filter(field, raw, e.to_string()));
    }
    Err(EngineError::invalid_filter(
        field,
        raw,
        "Invalid date format (expected YYYY-MM-DD, RFC 3339, or epoch milliseconds)",
    ))
}

fn check_len<'a>(field: &'static str, raw: &'a str) -> Result<&'a str, EngineError> {
    if raw.len() > MAX_FILTER_VALUE_LEN {
        return Err(EngineError::InvalidFilterValue {
            field,
            value: format!("{}...", raw.chars().take(16).collect::<String>()),
            reason: format!("Input value too large ({} > {MAX_FILTER_VALUE_LEN} bytes)", raw.len()),
        });
    }
    Ok(raw)
}
