//! Bounded random-retry loops.

use crate::error::{GenError, Result};

/// Attempt ceiling for one retry loop. Callers that collect many distinct
/// values run one loop per value, so the ceiling does not shrink as the
/// target grows.
pub const MAX_ATTEMPTS: u64 = 100_000_000;

/// Call `attempt` until it yields `Some`, at most `max_attempts` times.
///
/// Errors from `attempt` are returned immediately. Hitting the ceiling is
/// reported as `GenError::Exhausted`, with `what` describing the goal.
pub fn bounded_retry<T, F, D>(max_attempts: u64, what: D, mut attempt: F) -> Result<T>
where
    F: FnMut() -> Result<Option<T>>,
    D: FnOnce() -> String,
{
    for _ in 0..max_attempts {
        if let Some(value) = attempt()? {
            return Ok(value);
        }
    }
    Err(GenError::Exhausted {
        what: what(),
        attempts: max_attempts,
    })
}
