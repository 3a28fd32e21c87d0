//! Consecutive-failure circuit breaker shared by all requests of a client.

use std::sync::{Mutex, PoisonError};
use std::time::{Duration, Instant};

/// Consecutive server failures that open the circuit.
pub const CIRCUIT_THRESHOLD: u32 = 5;

/// How long an open circuit rejects requests before letting one through.
pub const CIRCUIT_COOLDOWN: Duration = Duration::from_secs(30);

#[derive(Debug, Default)]
struct State {
    consecutive_failures: u32,
    opened_at: Option<Instant>,
}

/// Tracks consecutive 5xx responses and short-circuits requests while the
/// upstream is failing.
///
/// Once `threshold` failures are recorded in a row the circuit opens. Requests
/// are rejected until `cooldown` has elapsed, after which the counter resets
/// and traffic flows again. Any non-5xx response closes the circuit.
#[derive(Debug)]
pub struct CircuitBreaker {
    threshold: u32,
    cooldown: Duration,
    state: Mutex<State>,
}

impl Default for CircuitBreaker {
    fn default() -> Self {
        Self::new(CIRCUIT_THRESHOLD, CIRCUIT_COOLDOWN)
    }
}

impl CircuitBreaker {
    /// Creates a breaker with a custom threshold and cooldown.
    #[must_use]
    pub fn new(threshold: u32, cooldown: Duration) -> Self {
        Self {
            threshold: threshold.max(1),
            cooldown,
            state: Mutex::new(State::default()),
        }
    }

    /// Returns `true` while the circuit rejects requests.
    #[must_use]
    pub fn is_open(&self) -> bool {
        self.is_open_at(Instant::now())
    }

    /// Records a 5xx response.
    pub fn record_failure(&self) {
        self.record_failure_at(Instant::now());
    }

    /// Records a non-5xx response, closing the circuit.
    pub fn record_success(&self) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        *state = State::default();
    }

    fn is_open_at(&self, now: Instant) -> bool {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        let Some(opened_at) = state.opened_at else {
            return false;
        };

        if now.saturating_duration_since(opened_at) <= self.cooldown {
            return true;
        }

        *state = State::default();
        false
    }

    fn record_failure_at(&self, now: Instant) {
        let mut state = self.state.lock().unwrap_or_else(PoisonError::into_inner);
        state.consecutive_failures = state.consecutive_failures.saturating_add(1);
        if state.consecutive_failures >= self.threshold {
            if state.opened_at.is_none() {
                tracing::warn!(
                    failures = state.consecutive_failures,
                    cooldown_secs = self.cooldown.as_secs(),
                    "circuit breaker opened"
                );
            }
            state.opened_at = Some(now);
        }
    }
}
