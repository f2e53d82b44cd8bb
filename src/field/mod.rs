//! Field specifications: the typed, validated description of each output column.
//!
//! This module provides:
//! - `FieldKind`, a closed set of generation strategies with their parameters
//! - `FieldSpec`, one column with optional rotation and injection
//! - `GenerationPlan`, the row count plus the ordered field list
//! - Conversion from raw configuration descriptors (see `parse`)

mod format;
mod parse;

pub use format::{CharFormat, Charset, FormatPiece};
pub use parse::{resolve_row_count, RotateSpec, TypeTag};

use crate::value::Value;

/// Row count used when the configuration gives none (or an invalid one).
pub const DEFAULT_ROW_COUNT: usize = 100;
/// Default string length for `rand:char` without a format.
pub const DEFAULT_CHAR_LENGTH: usize = 10;
/// Default decimal places for `rand:float`.
pub const DEFAULT_PRECISION: u32 = 1;

/// How a `rand:char` field builds its strings.
#[derive(Debug, Clone, PartialEq)]
pub enum CharMode {
    /// `n` characters from a-z, A-Z, 0-9
    Length(usize),
    /// Expand a pattern of literals and `/`-tokens
    Format(CharFormat),
}

/// Generation strategy with its type-specific parameters.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldKind {
    /// `start, start+step, start+2*step, ...`
    IncrementInt { start: i64, step: i64 },
    /// Uniform integer in `[min, max]`
    RandomInt { min: i64, max: i64 },
    /// Uniform real in `[min, max)` rounded to `precision` decimals
    RandomFloat { min: f64, max: f64, precision: u32 },
    /// Random string
    RandomChar(CharMode),
    /// Uniform sample from a closed set
    Fixed { values: Vec<Value> },
    /// Delegated to a named external generator
    External { name: String },
}

impl FieldKind {
    /// Short type label, as written in config files.
    pub fn label(&self) -> &'static str {
        match self {
            FieldKind::IncrementInt { .. } => "inc:int",
            FieldKind::RandomInt { .. } => "rand:int",
            FieldKind::RandomFloat { .. } => "rand:float",
            FieldKind::RandomChar(_) => "rand:char",
            FieldKind::Fixed { .. } => "fixed",
            FieldKind::External { .. } => "faker",
        }
    }

    /// Rotation does not apply to monotonic sequences or closed sets.
    pub fn supports_rotation(&self) -> bool {
        !matches!(self, FieldKind::IncrementInt { .. } | FieldKind::Fixed { .. })
    }

    /// Sequences are arithmetic and closed sets stay closed; neither is injected.
    pub fn supports_injection(&self) -> bool {
        !matches!(self, FieldKind::IncrementInt { .. } | FieldKind::Fixed { .. })
    }

    /// Number of distinct values the strategy can draw, when known.
    ///
    /// Floats count the `precision`-decimal grid points in `[min, max)`.
    /// External generators return `None`.
    pub fn domain_size(&self) -> Option<u128> {
        match self {
            FieldKind::RandomInt { min, max } => Some((*max as i128 - *min as i128 + 1) as u128),
            FieldKind::RandomChar(CharMode::Length(n)) => Some(
                (0..*n).fold(1u128, |acc, _| acc.saturating_mul(Charset::Alnum.alphabet().len() as u128)),
            ),
            FieldKind::RandomChar(CharMode::Format(format)) => Some(format.domain_size()),
            FieldKind::RandomFloat {
                min,
                max,
                precision,
            } => {
                let factor = 10f64.powi(*precision as i32);
                let steps = (max * factor).ceil() - (min * factor).ceil();
                // `as` saturates for grids too large to matter
                Some(steps.max(0.0) as u128)
            }
            FieldKind::Fixed { values } => Some(values.len() as u128),
            FieldKind::IncrementInt { .. } | FieldKind::External { .. } => None,
        }
    }
}

/// One output column.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldSpec {
    pub name: String,
    pub kind: FieldKind,
    /// Number of distinct values allowed, already clamped to the row count
    pub rotate: Option<usize>,
    /// Caller-supplied values forced into the column, de-duplicated
    pub inject: Vec<Value>,
}

impl FieldSpec {
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind,
            rotate: None,
            inject: Vec::new(),
        }
    }

    pub fn with_rotate(mut self, rotate: usize) -> Self {
        self.rotate = Some(rotate);
        self
    }

    /// Set injected values, dropping duplicates (first occurrence wins).
    pub fn with_inject(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.inject = dedup(values);
        self
    }

    /// Rotation pool size, if rotation applies to this field's kind.
    pub fn effective_rotate(&self) -> Option<usize> {
        self.rotate.filter(|_| self.kind.supports_rotation())
    }

    /// Injected values, empty for kinds that ignore injection.
    pub fn effective_inject(&self) -> &[Value] {
        if self.kind.supports_injection() {
            &self.inject
        } else {
            &[]
        }
    }
}

/// Everything one generation run needs, fixed for the run's lifetime.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationPlan {
    pub row_count: usize,
    pub fields: Vec<FieldSpec>,
    pub include_headers: bool,
}

impl GenerationPlan {
    pub fn new(row_count: usize, fields: Vec<FieldSpec>) -> Self {
        Self {
            row_count,
            fields,
            include_headers: false,
        }
    }

    pub fn with_headers(mut self, include_headers: bool) -> Self {
        self.include_headers = include_headers;
        self
    }

    pub fn headers(&self) -> Vec<String> {
        self.fields.iter().map(|f| f.name.clone()).collect()
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

pub(crate) fn dedup(values: impl IntoIterator<Item = Value>) -> Vec<Value> {
    let mut seen = ahash::AHashSet::new();
    values
        .into_iter()
        .filter(|v| seen.insert(v.clone()))
        .collect()
}
