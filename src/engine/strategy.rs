//! Single-value generators, one per field kind.
//!
//! Used directly for non-rotated fields and to fill rotation pools.

use super::retry::bounded_retry;
use crate::error::{GenError, Result};
use crate::external::ExternalGenerator;
use crate::field::{CharFormat, CharMode, Charset, FieldKind, FieldSpec, FormatPiece};
use crate::value::Value;
use rand::seq::IndexedRandom;
use rand::Rng;

/// Uniform integer in `[min, max]`.
pub fn random_int<R: Rng>(rng: &mut R, min: i64, max: i64) -> i64 {
    rng.random_range(min..=max)
}

/// Uniform real in `[min, max)`, rounded to `precision` decimals.
///
/// Rounding can push the result onto `max` or below `min`; callers that need
/// the half-open range re-draw (see `random_value`).
pub fn random_float<R: Rng>(rng: &mut R, min: f64, max: f64, precision: u32) -> f64 {
    round_to(rng.random::<f64>() * (max - min) + min, precision)
}

pub fn round_to(value: f64, precision: u32) -> f64 {
    let factor = 10f64.powi(precision as i32);
    (value * factor).round() / factor
}

pub fn random_char<R: Rng>(rng: &mut R, charset: Charset) -> char {
    let alphabet = charset.alphabet();
    alphabet[rng.random_range(0..alphabet.len())] as char
}

/// `length` characters from a-z, A-Z, 0-9.
pub fn random_chars<R: Rng>(rng: &mut R, length: usize) -> String {
    (0..length)
        .map(|_| random_char(rng, Charset::Alnum))
        .collect()
}

/// Expand a format pattern: literals verbatim, tokens to random characters.
pub fn random_formatted<R: Rng>(rng: &mut R, format: &CharFormat) -> String {
    format
        .pieces()
        .iter()
        .map(|piece| match piece {
            FormatPiece::Literal(c) => *c,
            FormatPiece::Random(cs) => random_char(rng, *cs),
        })
        .collect()
}

/// Draw one random value for `field`.
///
/// `inc:int` fields have no random values and are rejected.
pub fn random_value<R: Rng>(
    field: &FieldSpec,
    external: &dyn ExternalGenerator,
    max_attempts: u64,
    rng: &mut R,
) -> Result<Value> {
    let value = match &field.kind {
        FieldKind::RandomInt { min, max } => Value::Int(random_int(rng, *min, *max)),
        FieldKind::RandomFloat {
            min,
            max,
            precision,
        } => {
            let (min, max, precision) = (*min, *max, *precision);
            let x = bounded_retry(
                max_attempts,
                || {
                    format!(
                        "a {}-decimal value in [{}, {}) for field '{}'",
                        precision, min, max, field.name
                    )
                },
                || {
                    let x = random_float(rng, min, max, precision);
                    Ok((x >= min && x < max).then_some(x))
                },
            )?;
            Value::Float(x)
        }
        FieldKind::RandomChar(CharMode::Length(length)) => Value::Text(random_chars(rng, *length)),
        FieldKind::RandomChar(CharMode::Format(format)) => {
            Value::Text(random_formatted(rng, format))
        }
        FieldKind::Fixed { values } => values
            .choose(rng)
            .cloned()
            .ok_or_else(|| GenError::config(&field.name, "need values for fixed type"))?,
        FieldKind::External { name } => {
            external
                .generate(name, rng)
                .map_err(|e| GenError::External {
                    field: field.name.clone(),
                    generator: name.clone(),
                    message: format!("{:#}", e),
                })?
        }
        FieldKind::IncrementInt { .. } => {
            return Err(GenError::config(
                &field.name,
                "inc:int fields are sequential and have no random values",
            ))
        }
    };
    Ok(value)
}
