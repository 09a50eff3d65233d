//! Command-level operations over a persisted log.

use crate::error::EngineError;
use crate::history::{HistoryFilter, query_history};
use crate::outcome::{Clock, OutcomeSource};
use crate::status::{current_status, uptime_seconds};
use crate::transition::{TransitionKind, TransitionPlan, plan_transition};
use tracing::{debug, info};
use vpnc_log::{Event, EventLog};

/// Answer to `status`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusReport {
    pub current: Option<Event>,
    /// Present only when `current` is `UP`.
    pub uptime_seconds: Option<i64>,
}

pub struct Controller<L, O, C> {
    log: L,
    outcomes: O,
    clock: C,
}

impl<L, O, C> Controller<L, O, C>
where
    L: EventLog,
    O: OutcomeSource,
    C: Clock,
{
    pub fn new(log: L, outcomes: O, clock: C) -> Self {
        Self {
            log,
            outcomes,
            clock,
        }
    }

    pub fn log(&self) -> &L {
        &self.log
    }

    pub fn status(&self) -> Result<StatusReport, EngineError> {
        let events = self.log.load()?;
        let current = current_status(&events).copied();
        let uptime = current.and_then(|event| uptime_seconds(&event, self.clock.now_millis()));
        Ok(StatusReport {
            current,
            uptime_seconds: uptime,
        })
    }

    pub fn transition(&mut self, kind: TransitionKind) -> Result<TransitionPlan, EngineError> {
        self.transition_with(kind, |_| {})
    }

    /// Run a transition, calling `on_marker` once the transient marker is
    /// durable and before the outcome is written.
    ///
    /// The two events are separate rewrites. If the second one fails the
    /// marker stays in the log and the error is returned; nothing is rolled
    /// back.
    pub fn transition_with(
        &mut self,
        kind: TransitionKind,
        on_marker: impl FnOnce(&Event),
    ) -> Result<TransitionPlan, EngineError> {
        let events = self.log.load()?;
        let plan = plan_transition(&events, kind, &mut self.outcomes, &self.clock);
        match plan {
            TransitionPlan::AlreadyInState(current) => {
                debug!(kind = kind.as_str(), status = %current.status, "already in target state");
            }
            TransitionPlan::Apply { marker, outcome } => {
                self.log.append(marker)?;
                on_marker(&marker);
                self.log.append(outcome)?;
                info!(
                    kind = kind.as_str(),
                    outcome = %outcome.status,
                    timestamp = outcome.timestamp,
                    "transition recorded"
                );
            }
        }
        Ok(plan)
    }

    pub fn history(&self, filter: &HistoryFilter) -> Result<Vec<Event>, EngineError> {
        let events = self.log.load()?;
        Ok(query_history(&events, filter))
    }
}
