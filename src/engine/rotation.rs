//! Value rotation: a small pool of unique values spread over many rows.
//!
//! Two steps:
//! 1. `prepare_pool` collects `rotate` distinct candidates (injected values
//!    first, then random draws)
//! 2. `random_distribution` partitions the rows into one non-empty group per
//!    pool entry, with random group sizes and shuffled positions

use super::retry::bounded_retry;
use crate::error::{GenError, Result};
use crate::field::{FieldKind, FieldSpec};
use crate::value::Value;
use ahash::AHashSet;
use rand::seq::SliceRandom;
use rand::Rng;

/// Fail early when the field's value domain is smaller than the pool.
pub fn check_feasible(field: &FieldSpec, rotate: usize) -> Result<()> {
    match field.kind.domain_size() {
        Some(domain) if rotate as u128 > domain => {
            let message = match field.kind {
                FieldKind::RandomInt { min, max } => format!(
                    "rotate ({}) should not be greater than the size of the range [{}, {}] ({})",
                    rotate, min, max, domain
                ),
                _ => format!(
                    "rotate ({}) exceeds the {} distinct values a {} field can produce",
                    rotate,
                    domain,
                    field.kind.label()
                ),
            };
            Err(GenError::infeasible(&field.name, message))
        }
        _ => Ok(()),
    }
}

/// Build the pool of `rotate` unique values for a field.
///
/// Injected values go in first (each once, never more than `rotate`), then
/// `draw` is called until the pool is full.
pub fn prepare_pool<F>(
    field: &FieldSpec,
    rotate: usize,
    max_attempts: u64,
    mut draw: F,
) -> Result<Vec<Value>>
where
    F: FnMut() -> Result<Value>,
{
    let mut pool = Vec::with_capacity(rotate);
    let mut seen = AHashSet::with_capacity(rotate);

    for value in field.effective_inject() {
        if pool.len() >= rotate {
            break;
        }
        if seen.insert(value.clone()) {
            pool.push(value.clone());
        }
    }

    // The ceiling applies to each new value, not to the whole pool
    while pool.len() < rotate {
        let value = bounded_retry(
            max_attempts,
            || {
                format!(
                    "unique value {} of {} for field '{}'",
                    pool.len() + 1,
                    rotate,
                    field.name
                )
            },
            || {
                let value = draw()?;
                Ok((!seen.contains(&value)).then_some(value))
            },
        )?;
        seen.insert(value.clone());
        pool.push(value);
    }

    Ok(pool)
}

/// Partition `total` row slots into `parts` non-empty groups.
///
/// Yields `(row_index, segment_index)` for every row. Every segment in
/// `0..parts` appears at least once.
pub fn random_distribution<R: Rng>(
    total: usize,
    parts: usize,
    max_attempts: u64,
    rng: &mut R,
) -> Result<impl Iterator<Item = (usize, usize)>> {
    if parts == 0 {
        return Err(GenError::Distribution(
            "parts has to be greater than 0".to_string(),
        ));
    }
    if total < parts {
        return Err(GenError::Distribution(format!(
            "parts ({}) should not be greater than total ({})",
            parts, total
        )));
    }

    // A cut at `i` ends a segment after slot `i`; cuts live in [0, total - 2]
    // so the last segment is never empty.
    let mut cuts = AHashSet::with_capacity(parts - 1);
    while cuts.len() < parts - 1 {
        let cut = bounded_retry(
            max_attempts,
            || format!("cut point {} of {} over {} rows", cuts.len() + 1, parts - 1, total),
            || {
                let cut = rng.random_range(0..total - 1);
                Ok((!cuts.contains(&cut)).then_some(cut))
            },
        )?;
        cuts.insert(cut);
    }

    let mut segments = Vec::with_capacity(total);
    let mut segment = 0;
    for i in 0..total {
        segments.push(segment);
        if cuts.contains(&i) {
            segment += 1;
        }
    }
    segments.shuffle(rng);

    Ok(segments.into_iter().enumerate())
}
