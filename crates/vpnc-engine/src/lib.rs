//! # vpnc-engine
//!
//! Status and history logic over the `vpnc-log` event sequence.
//!
//! The free functions here are pure:
//! - [`current_status`] resolves the visible status, skipping trailing failures
//! - [`plan_transition`] decides what an `up`/`down` request appends
//! - [`query_history`] filters and optionally sorts the log
//!
//! [`Controller`] wires those to an [`vpnc_log::EventLog`], an
//! [`OutcomeSource`] and a [`Clock`], all supplied by the caller.

pub mod controller;
pub mod error;
pub mod history;
pub mod outcome;
pub mod status;
pub mod transition;

pub use controller::{Controller, StatusReport};
pub use error::EngineError;
pub use history::{
    HistoryFilter, MAX_FILTER_VALUE_LEN, SortOrder, parse_lower_bound, parse_upper_bound,
    query_history,
};
pub use outcome::{
    Clock, FixedClock, FixedOutcome, OutcomeSource, RandomOutcome, ScriptedOutcome, SystemClock,
};
pub use status::{current_status, uptime_seconds};
pub use transition::{TransitionKind, TransitionPlan, plan_transition};
