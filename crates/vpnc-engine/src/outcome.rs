//! Injectable sources of nondeterminism: transition outcomes and wall time.

use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Decides whether one simulated transition reaches its target.
pub trait OutcomeSource {
    fn succeeds(&mut self) -> bool;
}

/// Fair coin over any `rand` generator.
#[derive(Debug, Clone)]
pub struct RandomOutcome<R = StdRng> {
    rng: R,
}

impl RandomOutcome<StdRng> {
    pub fn from_os_rng() -> Self {
        Self {
            rng: StdRng::from_os_rng(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl<R: Rng> OutcomeSource for RandomOutcome<R> {
    fn succeeds(&mut self) -> bool {
        self.rng.random_bool(0.5)
    }
}

/// Always the same answer.
#[derive(Debug, Clone, Copy)]
pub struct FixedOutcome(pub bool);

impl OutcomeSource for FixedOutcome {
    fn succeeds(&mut self) -> bool {
        self.0
    }
}

/// Replays a queue of answers; reports failure once the queue is drained.
#[derive(Debug, Clone, Default)]
pub struct ScriptedOutcome {
    script: VecDeque<bool>,
}

impl ScriptedOutcome {
    pub fn new(script: impl IntoIterator<Item = bool>) -> Self {
        Self {
            script: script.into_iter().collect(),
        }
    }

    pub fn remaining(&self) -> usize {
        self.script.len()
    }
}

impl OutcomeSource for ScriptedOutcome {
    fn succeeds(&mut self) -> bool {
        self.script.pop_front().unwrap_or(false)
    }
}

impl<T: OutcomeSource + ?Sized> OutcomeSource for &mut T {
    fn succeeds(&mut self) -> bool {
        (**self).succeeds()
    }
}

/// Milliseconds since the Unix epoch.
pub trait Clock {
    fn now_millis(&self) -> i64;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_millis(&self) -> i64 {
        Utc::now().timestamp_millis()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub i64);

impl Clock for FixedClock {
    fn now_millis(&self) -> i64 {
        self.0
    }
}
