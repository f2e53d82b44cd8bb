//! Conversion of raw field descriptors into validated `FieldSpec`s.

use super::{
    dedup, CharFormat, CharMode, FieldKind, FieldSpec, DEFAULT_CHAR_LENGTH, DEFAULT_PRECISION,
    DEFAULT_ROW_COUNT,
};
use crate::config::{IntOrString, RawField};
use crate::error::{GenError, Result};
use crate::value::Value;
use once_cell::sync::Lazy;
use regex::Regex;
use std::str::FromStr;

/// Largest supported `precision` for `rand:float`.
pub const MAX_PRECISION: u32 = 15;

static INC_INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^inc:int$").unwrap());
static RAND_INT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^rand:int$").unwrap());
static RAND_FLOAT_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^rand:float$").unwrap());
static RAND_CHAR_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^rand:char$").unwrap());
static FIXED_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^fixed$").unwrap());
static EXTERNAL_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^faker?:(\S+)$").unwrap());

/// Declared field type, before its parameters are read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeTag {
    IncrementInt,
    RandomInt,
    RandomFloat,
    RandomChar,
    Fixed,
    External(String),
}

impl FromStr for TypeTag {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if INC_INT_RE.is_match(s) {
            Ok(TypeTag::IncrementInt)
        } else if RAND_INT_RE.is_match(s) {
            Ok(TypeTag::RandomInt)
        } else if RAND_FLOAT_RE.is_match(s) {
            Ok(TypeTag::RandomFloat)
        } else if RAND_CHAR_RE.is_match(s) {
            Ok(TypeTag::RandomChar)
        } else if FIXED_RE.is_match(s) {
            Ok(TypeTag::Fixed)
        } else if let Some(caps) = EXTERNAL_RE.captures(s) {
            Ok(TypeTag::External(caps[1].to_string()))
        } else {
            Err(format!(
                "unsupported type: {}. Supported types: inc:int, rand:int, rand:float, rand:char, fixed, faker:<generator>",
                s
            ))
        }
    }
}

/// Requested rotation before it is resolved against the row count.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RotateSpec {
    /// Literal number of distinct values
    Count(usize),
    /// `rows/<div>`: the row count divided by `div`
    RowsDiv(usize),
}

impl RotateSpec {
    pub fn from_raw(raw: &IntOrString) -> std::result::Result<Self, String> {
        match raw {
            IntOrString::Int(n) => {
                if *n < 1 {
                    return Err(format!("rotate must be at least 1, got {}", n));
                }
                Ok(RotateSpec::Count(*n as usize))
            }
            IntOrString::Text(s) => s.parse(),
        }
    }

    /// Resolve to a concrete pool size, never larger than `row_count`.
    pub fn resolve(&self, row_count: usize) -> usize {
        match self {
            RotateSpec::Count(n) => (*n).min(row_count),
            RotateSpec::RowsDiv(div) => row_count / div,
        }
    }
}

impl FromStr for RotateSpec {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let s = s.trim();
        if let Some(div) = s.to_ascii_lowercase().strip_prefix("rows/") {
            return match div.trim().parse::<usize>() {
                Ok(0) => Err("rotate divisor must be greater than 0".to_string()),
                Ok(d) => Ok(RotateSpec::RowsDiv(d)),
                Err(_) => Err(format!(
                    "invalid rotate: {}. Use a number or rows/<divisor>",
                    s
                )),
            };
        }
        match s.parse::<i64>() {
            Ok(n) if n >= 1 => Ok(RotateSpec::Count(n as usize)),
            Ok(n) => Err(format!("rotate must be at least 1, got {}", n)),
            Err(_) => Err(format!(
                "invalid rotate: {}. Use a number or rows/<divisor>",
                s
            )),
        }
    }
}

/// Resolve the configured row count.
///
/// Any scalar is accepted; absent, non-positive, fractional, boolean or
/// unparsable values fall back to `DEFAULT_ROW_COUNT`.
pub fn resolve_row_count(raw: Option<&Value>) -> usize {
    let parsed = match raw {
        Some(Value::Int(n)) => Some(*n),
        Some(Value::Text(s)) => s.trim().parse::<i64>().ok(),
        Some(Value::Float(_)) | Some(Value::Bool(_)) | None => None,
    };
    match parsed {
        Some(n) if n > 0 => n as usize,
        _ => DEFAULT_ROW_COUNT,
    }
}

impl FieldSpec {
    /// Build a validated field from its raw descriptor.
    ///
    /// `index` is the zero-based position in the field list and only used to
    /// label errors for fields without a name.
    pub fn from_raw(raw: &RawField, index: usize, row_count: usize) -> Result<FieldSpec> {
        let name = raw
            .name
            .as_deref()
            .map(str::trim)
            .filter(|n| !n.is_empty())
            .ok_or_else(|| GenError::config(format!("#{}", index + 1), "field needs a name"))?
            .to_string();

        let type_str = raw
            .field_type
            .as_deref()
            .filter(|t| !t.trim().is_empty())
            .ok_or_else(|| GenError::config(&name, "field needs a type"))?;

        let tag: TypeTag = type_str.parse().map_err(|e| GenError::config(&name, e))?;
        let kind = build_kind(&name, tag, raw)?;

        // inc:int and fixed never rotate, so their rotate key is not read
        let rotate = match raw.rotate {
            Some(ref r) if kind.supports_rotation() => {
                let spec = RotateSpec::from_raw(r).map_err(|e| GenError::config(&name, e))?;
                let resolved = spec.resolve(row_count);
                if resolved == 0 {
                    return Err(GenError::config(
                        &name,
                        format!("rotate resolves to 0 distinct values for {} rows", row_count),
                    ));
                }
                Some(resolved)
            }
            _ => None,
        };

        let inject = raw.inject.clone().map(dedup).unwrap_or_default();

        Ok(FieldSpec {
            name,
            kind,
            rotate,
            inject,
        })
    }
}

fn build_kind(name: &str, tag: TypeTag, raw: &RawField) -> Result<FieldKind> {
    let kind = match tag {
        TypeTag::IncrementInt => FieldKind::IncrementInt {
            start: raw.start.unwrap_or(1),
            step: raw.step.unwrap_or(1),
        },
        TypeTag::RandomInt => {
            let (min, max) = match raw.range {
                Some(ref range) => int_range(range).map_err(|e| GenError::config(name, e))?,
                None => (0, 100),
            };
            FieldKind::RandomInt { min, max }
        }
        TypeTag::RandomFloat => {
            let (min, max) = match raw.range {
                Some(ref range) => float_range(range).map_err(|e| GenError::config(name, e))?,
                None => (0.0, 1.0),
            };
            let precision = raw.precision.unwrap_or(DEFAULT_PRECISION);
            if precision > MAX_PRECISION {
                return Err(GenError::config(
                    name,
                    format!("precision must be at most {}", MAX_PRECISION),
                ));
            }
            let factor = 10f64.powi(precision as i32);
            if (min * factor).ceil() / factor >= max {
                return Err(GenError::config(
                    name,
                    format!(
                        "no value with {} decimal places lies in [{}, {})",
                        precision, min, max
                    ),
                ));
            }
            FieldKind::RandomFloat {
                min,
                max,
                precision,
            }
        }
        TypeTag::RandomChar => match raw.format {
            Some(ref format) => {
                let format: CharFormat = format.parse().map_err(|e| GenError::config(name, e))?;
                FieldKind::RandomChar(CharMode::Format(format))
            }
            None => {
                let length = raw.length.unwrap_or(DEFAULT_CHAR_LENGTH);
                if length == 0 {
                    return Err(GenError::config(name, "length must be greater than 0"));
                }
                FieldKind::RandomChar(CharMode::Length(length))
            }
        },
        TypeTag::Fixed => match raw.values {
            Some(ref values) if !values.is_empty() => FieldKind::Fixed {
                values: values.clone(),
            },
            _ => return Err(GenError::config(name, "need values for fixed type")),
        },
        TypeTag::External(generator) => FieldKind::External { name: generator },
    };
    Ok(kind)
}

fn int_range(range: &[Value]) -> std::result::Result<(i64, i64), String> {
    let [lo, hi] = range else {
        return Err("invalid range. should be like: [0, 100]".to_string());
    };
    match (lo.as_i64(), hi.as_i64()) {
        (Some(min), Some(max)) => ordered(min, max),
        _ => Err("range bounds must be integers".to_string()),
    }
}

fn float_range(range: &[Value]) -> std::result::Result<(f64, f64), String> {
    let [lo, hi] = range else {
        return Err("invalid range. should be like: [0, 1]".to_string());
    };
    match (lo.as_f64(), hi.as_f64()) {
        (Some(min), Some(max)) if min.is_finite() && max.is_finite() => ordered(min, max),
        _ => Err("range bounds must be numbers".to_string()),
    }
}

fn ordered<T: PartialOrd + std::fmt::Display>(min: T, max: T) -> std::result::Result<(T, T), String> {
    if min >= max {
        return Err(format!(
            "invalid range [{}, {}]: first bound must be less than the second",
            min, max
        ));
    }
    Ok((min, max))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_tags_case_insensitive() {
        assert_eq!("INC:INT".parse::<TypeTag>().unwrap(), TypeTag::IncrementInt);
        assert_eq!("Rand:Float".parse::<TypeTag>().unwrap(), TypeTag::RandomFloat);
        assert_eq!(
            "faker:name:first_name".parse::<TypeTag>().unwrap(),
            TypeTag::External("name:first_name".to_string())
        );
        assert!("rand:date".parse::<TypeTag>().is_err());
    }

    #[test]
    fn test_rotate_rows_division() {
        let spec: RotateSpec = "rows/4".parse().unwrap();
        assert_eq!(spec.resolve(100), 25);
    }

    #[test]
    fn test_rotate_literal_clamped() {
        let spec = RotateSpec::from_raw(&IntOrString::Int(200)).unwrap();
        assert_eq!(spec.resolve(100), 100);
    }

    #[test]
    fn test_rotate_invalid() {
        assert!("rows/0".parse::<RotateSpec>().is_err());
        assert!("rows/x".parse::<RotateSpec>().is_err());
        assert!("many".parse::<RotateSpec>().is_err());
        assert!(RotateSpec::from_raw(&IntOrString::Int(0)).is_err());
    }

    #[test]
    fn test_row_count_defaults() {
        assert_eq!(resolve_row_count(None), 100);
        assert_eq!(resolve_row_count(Some(&Value::Int(-5))), 100);
        assert_eq!(resolve_row_count(Some(&Value::Int(0))), 100);
        assert_eq!(resolve_row_count(Some(&Value::from("abc"))), 100);
        assert_eq!(resolve_row_count(Some(&Value::Float(12.5))), 100);
        assert_eq!(resolve_row_count(Some(&Value::Bool(true))), 100);
        assert_eq!(resolve_row_count(Some(&Value::from("250"))), 250);
        assert_eq!(resolve_row_count(Some(&Value::Int(7))), 7);
    }
}
