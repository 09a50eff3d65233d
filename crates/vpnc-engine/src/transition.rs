//! Simulated `up`/`down` transitions.

use crate::outcome::{Clock, OutcomeSource};
use crate::status::current_status;
use vpnc_log::{Event, Status};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionKind {
    Up,
    Down,
}

impl TransitionKind {
    /// Resolved state this transition aims for.
    pub fn target(self) -> Status {
        match self {
            Self::Up => Status::Up,
            Self::Down => Status::Down,
        }
    }

    /// Transient marker recorded before the outcome.
    pub fn marker(self) -> Status {
        match self {
            Self::Up => Status::Starting,
            Self::Down => Status::Stopping,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
        }
    }
}

/// What a transition request resolves to before anything is written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionPlan {
    /// Current status already equals the target; nothing to append.
    AlreadyInState(Event),
    /// Append `marker`, then `outcome`, as two separate writes.
    Apply { marker: Event, outcome: Event },
}

impl TransitionPlan {
    pub fn events(&self) -> Vec<Event> {
        match self {
            Self::AlreadyInState(_) => Vec::new(),
            Self::Apply { marker, outcome } => vec![*marker, *outcome],
        }
    }
}

/// Decide what `kind` does against the current log.
///
/// The outcome source is only consulted when a transition actually happens.
pub fn plan_transition<O, C>(
    events: &[Event],
    kind: TransitionKind,
    outcomes: &mut O,
    clock: &C,
) -> TransitionPlan
where
    O: OutcomeSource + ?Sized,
    C: Clock + ?Sized,
{
    if let Some(current) = current_status(events)
        && current.status == kind.target()
    {
        return TransitionPlan::AlreadyInState(*current);
    }

    let marker = Event::new(kind.marker(), clock.now_millis());
    let resolved = if outcomes.succeeds() {
        kind.target()
    } else {
        Status::Failed
    };
    let outcome = Event::new(resolved, clock.now_millis());
    TransitionPlan::Apply { marker, outcome }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::outcome::{FixedClock, FixedOutcome, RandomOutcome, ScriptedOutcome};

    fn ev(status: Status, timestamp: i64) -> Event {
        Event::new(status, timestamp)
    }

    #[test]
    fn up_when_already_up_appends_nothing() {
        let events = [ev(Status::Starting, 1), ev(Status::Up, 2)];
        let mut outcomes = ScriptedOutcome::new([true]);
        let plan = plan_transition(&events, TransitionKind::Up, &mut outcomes, &FixedClock(9));

        assert_eq!(plan, TransitionPlan::AlreadyInState(ev(Status::Up, 2)));
        assert!(plan.events().is_empty());
        assert_eq!(outcomes.remaining(), 1, "coin must not be flipped");
    }

    #[test]
    fn down_when_already_down_appends_nothing() {
        let events = [ev(Status::Down, 5)];
        let plan = plan_transition(
            &events,
            TransitionKind::Down,
            &mut FixedOutcome(true),
            &FixedClock(9),
        );
        assert_eq!(plan, TransitionPlan::AlreadyInState(ev(Status::Down, 5)));
    }

    #[test]
    fn already_up_sees_through_trailing_failure() {
        let events = [ev(Status::Up, 2), ev(Status::Stopping, 3), ev(Status::Failed, 4)];
        let plan = plan_transition(
            &events,
            TransitionKind::Up,
            &mut FixedOutcome(true),
            &FixedClock(9),
        );
        assert_eq!(plan, TransitionPlan::AlreadyInState(ev(Status::Up, 2)));
    }

    #[test]
    fn up_from_empty_log_appends_marker_then_outcome() {
        let plan = plan_transition(&[], TransitionKind::Up, &mut FixedOutcome(true), &FixedClock(9));
        assert_eq!(
            plan.events(),
            vec![ev(Status::Starting, 9), ev(Status::Up, 9)]
        );
    }

    #[test]
    fn failed_outcome_is_recorded_as_failed() {
        let events = [ev(Status::Up, 1)];
        let plan = plan_transition(
            &events,
            TransitionKind::Down,
            &mut FixedOutcome(false),
            &FixedClock(9),
        );
        assert_eq!(
            plan.events(),
            vec![ev(Status::Stopping, 9), ev(Status::Failed, 9)]
        );
    }

    #[test]
    fn transient_tail_does_not_block_transition() {
        let events = [ev(Status::Down, 1), ev(Status::Starting, 2)];
        let plan = plan_transition(
            &events,
            TransitionKind::Up,
            &mut FixedOutcome(true),
            &FixedClock(9),
        );
        assert!(matches!(plan, TransitionPlan::Apply { .. }));
    }

    #[test]
    fn seeded_random_outcomes_cover_both_results() {
        let mut outcomes = RandomOutcome::seeded(2024);
        let mut saw_up = false;
        let mut saw_failed = false;
        for _ in 0..200 {
            match plan_transition(&[], TransitionKind::Up, &mut outcomes, &FixedClock(1)) {
                TransitionPlan::Apply { marker, outcome } => {
                    assert_eq!(marker.status, Status::Starting);
                    match outcome.status {
                        Status::Up => saw_up = true,
                        Status::Failed => saw_failed = true,
                        other => panic!("unexpected outcome {other}"),
                    }
                }
                other => panic!("empty log cannot be already up: {other:?}"),
            }
        }
        assert!(saw_up && saw_failed);
    }
}
