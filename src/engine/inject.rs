//! Forced injection of caller-supplied values into a generated column.

use super::retry::bounded_retry;
use crate::error::Result;
use crate::value::Value;
use ahash::AHashSet;
use rand::Rng;

/// Overwrite random, non-overlapping rows of `values` with `injects`.
///
/// Only the first `min(injects, rows)` injected values are used. Each one is
/// written `max(1, rand(rows / injects / 10))` times, where `rand(n)` is
/// uniform in `[0, n)`. Returns the total number of overwritten rows.
pub fn inject_values<R: Rng>(
    values: &mut [Value],
    injects: &[Value],
    max_attempts: u64,
    rng: &mut R,
) -> Result<usize> {
    if injects.is_empty() || values.is_empty() {
        return Ok(0);
    }

    let rows = values.len();
    let count = injects.len().min(rows);
    let spread = rows / injects.len() / 10;

    let mut used = AHashSet::new();
    let mut injected = 0;

    for inject in &injects[..count] {
        let times = if spread == 0 {
            1
        } else {
            rng.random_range(0..spread).max(1)
        };

        for _ in 0..times {
            let index = bounded_retry(
                max_attempts,
                || format!("a free row for injected value '{}'", inject),
                || {
                    let index = rng.random_range(0..rows);
                    Ok(used.insert(index).then_some(index))
                },
            )?;
            values[index] = inject.clone();
            injected += 1;
        }
    }

    Ok(injected)
}
