//! Field value generation engine.
//!
//! A run has two passes over the plan's fields, in declaration order:
//! 1. prepare: build the rotation pool of every rotated field
//! 2. generate: fill each column with exactly `row_count` values
//!
//! Every field draws from its own `StdRng`, split off the caller's RNG at the
//! start of the run, so a fixed seed reproduces the output.

mod inject;
mod retry;
mod rotation;
mod strategy;

pub use inject::inject_values;
pub use retry::{bounded_retry, MAX_ATTEMPTS};
pub use rotation::{check_feasible, prepare_pool, random_distribution};
pub use strategy::{random_chars, random_float, random_formatted, random_int, random_value, round_to};

use crate::error::{GenError, Result};
use crate::external::{ExternalGenerator, FakeRegistry};
use crate::field::{FieldKind, FieldSpec, GenerationPlan};
use crate::progress::{ProgressEvent, ProgressObserver, PROGRESS_INTERVAL};
use crate::value::Value;
use crate::writer::CsvWriter;
use ahash::AHashSet;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use schemars::JsonSchema;
use serde::Serialize;
use std::io::Write;
use tracing::{debug, info, trace};

/// Statistics from a generation run
#[derive(Debug, Default, Clone, Serialize, JsonSchema)]
pub struct GenerateStats {
    /// Number of rows generated
    pub rows: usize,
    /// Number of fields (columns)
    pub fields: usize,
    /// Per-field statistics
    pub field_stats: Vec<FieldStats>,
}

/// Per-field generation statistics
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct FieldStats {
    pub name: String,
    pub kind: String,
    /// Distinct values in the column
    pub unique_values: usize,
    /// Rotation pool size, for rotated fields
    pub pool_size: Option<usize>,
    /// Rows overwritten by injected values
    pub injected: usize,
}

/// One generated column.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub kind: &'static str,
    pub data: Vec<Value>,
    pub pool_size: Option<usize>,
    pub injected: usize,
}

/// Output of a run: one column per field, in declaration order.
#[derive(Debug, Clone)]
pub struct GeneratedData {
    row_count: usize,
    include_headers: bool,
    columns: Vec<Column>,
}

impl GeneratedData {
    pub fn row_count(&self) -> usize {
        self.row_count
    }

    pub fn headers(&self) -> Vec<&str> {
        self.columns.iter().map(|c| c.name.as_str()).collect()
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    /// Column data by field name.
    pub fn column(&self, name: &str) -> Option<&[Value]> {
        self.columns
            .iter()
            .find(|c| c.name == name)
            .map(|c| c.data.as_slice())
    }

    /// Lazy row-major view.
    pub fn rows(&self) -> Rows<'_> {
        Rows {
            data: self,
            next: 0,
        }
    }

    /// Materialize all rows.
    pub fn into_rows(self) -> Vec<Vec<Value>> {
        let mut iters: Vec<_> = self.columns.into_iter().map(|c| c.data.into_iter()).collect();
        (0..self.row_count)
            .map(|_| iters.iter_mut().filter_map(|it| it.next()).collect())
            .collect()
    }

    /// Stream the header (if requested) and all rows to `writer`.
    pub fn write_to<W: Write>(&self, writer: &mut CsvWriter<W>) -> std::io::Result<()> {
        if self.include_headers && !self.columns.is_empty() {
            writer.write_row(self.headers())?;
        }
        for row in self.rows() {
            writer.write_row(row)?;
        }
        writer.flush()
    }

    /// Serialize to an in-memory string.
    pub fn to_delimited_string(&self, delimiter: &str) -> std::io::Result<String> {
        let mut writer = CsvWriter::new(Vec::new(), delimiter);
        self.write_to(&mut writer)?;
        let bytes = writer.into_inner()?;
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn stats(&self) -> GenerateStats {
        GenerateStats {
            rows: self.row_count,
            fields: self.columns.len(),
            field_stats: self
                .columns
                .iter()
                .map(|c| FieldStats {
                    name: c.name.clone(),
                    kind: c.kind.to_string(),
                    unique_values: c.data.iter().collect::<AHashSet<_>>().len(),
                    pool_size: c.pool_size,
                    injected: c.injected,
                })
                .collect(),
        }
    }
}

/// Iterator over rows of a `GeneratedData`, fields in declaration order.
pub struct Rows<'a> {
    data: &'a GeneratedData,
    next: usize,
}

impl<'a> Iterator for Rows<'a> {
    type Item = Vec<&'a Value>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.next >= self.data.row_count {
            return None;
        }
        let data = self.data;
        let index = self.next;
        let row = data.columns.iter().map(|c| &c.data[index]).collect();
        self.next += 1;
        Some(row)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.data.row_count.saturating_sub(self.next);
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for Rows<'_> {}

/// Runs the prepare and generate passes over a `GenerationPlan`.
pub struct Engine {
    external: Box<dyn ExternalGenerator>,
    observer: Option<Box<dyn ProgressObserver>>,
    max_attempts: u64,
    progress_interval: usize,
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

impl Engine {
    /// Engine with the `fake`-backed external generators and no observer.
    pub fn new() -> Self {
        Self {
            external: Box::new(FakeRegistry::new()),
            observer: None,
            max_attempts: MAX_ATTEMPTS,
            progress_interval: PROGRESS_INTERVAL,
        }
    }

    pub fn with_external_generator<G>(mut self, external: G) -> Self
    where
        G: ExternalGenerator + 'static,
    {
        self.external = Box::new(external);
        self
    }

    pub fn with_observer<O>(mut self, observer: O) -> Self
    where
        O: ProgressObserver + 'static,
    {
        self.observer = Some(Box::new(observer));
        self
    }

    /// Override the attempt ceiling of every retry loop.
    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_progress_interval(mut self, rows: usize) -> Self {
        self.progress_interval = rows.max(1);
        self
    }

    fn notify(&self, event: ProgressEvent<'_>) {
        if let Some(ref observer) = self.observer {
            observer.on_event(&event);
        }
    }

    /// Checks that need the engine's collaborators, run before any generation.
    pub fn validate(&self, plan: &GenerationPlan) -> Result<()> {
        for field in &plan.fields {
            if let FieldKind::External { ref name } = field.kind {
                if !self.external.is_supported(name) {
                    return Err(GenError::config(
                        &field.name,
                        format!("unknown external generator: {}", name),
                    ));
                }
            }
        }
        Ok(())
    }

    /// Run both passes and return every column.
    pub fn generate<R: Rng>(&self, plan: &GenerationPlan, rng: &mut R) -> Result<GeneratedData> {
        self.validate(plan)?;
        info!(
            rows = plan.row_count,
            fields = plan.fields.len(),
            "generating data"
        );

        let mut streams: Vec<StdRng> = plan.fields.iter().map(|_| StdRng::from_rng(&mut *rng)).collect();

        let pools = plan
            .fields
            .iter()
            .zip(streams.iter_mut())
            .map(|(field, stream)| self.prepare(field, plan.row_count, stream))
            .collect::<Result<Vec<_>>>()?;

        let total_fields = plan.fields.len();
        let mut columns = Vec::with_capacity(total_fields);
        for (index, ((field, pool), stream)) in plan
            .fields
            .iter()
            .zip(pools.iter())
            .zip(streams.iter_mut())
            .enumerate()
        {
            self.notify(ProgressEvent::FieldStarted {
                index,
                field: &field.name,
                total_fields,
            });
            let column = self.generate_field(field, pool.as_deref(), plan.row_count, stream)?;
            self.notify(ProgressEvent::FieldFinished {
                index,
                field: &field.name,
            });
            columns.push(column);
        }

        Ok(GeneratedData {
            row_count: plan.row_count,
            include_headers: plan.include_headers,
            columns,
        })
    }

    /// Prepare pass for one field: the rotation pool, or `None` when the
    /// field is not rotated.
    pub fn prepare<R: Rng>(
        &self,
        field: &FieldSpec,
        row_count: usize,
        rng: &mut R,
    ) -> Result<Option<Vec<Value>>> {
        let Some(rotate) = field.effective_rotate() else {
            return Ok(None);
        };
        let rotate = rotate.min(row_count);
        if rotate == 0 {
            return Ok(None);
        }

        self.notify(ProgressEvent::Preparing { field: &field.name });
        debug!(field = %field.name, rotate, "preparing rotation pool");

        check_feasible(field, rotate)?;
        let pool = prepare_pool(field, rotate, self.max_attempts, || {
            random_value(field, self.external.as_ref(), self.max_attempts, rng)
        })?;

        trace!(field = %field.name, pool = pool.len(), "rotation pool ready");
        Ok(Some(pool))
    }

    /// Generate pass for one field.
    ///
    /// `pool` is the field's prepared rotation pool, if any.
    pub fn generate_field<R: Rng>(
        &self,
        field: &FieldSpec,
        pool: Option<&[Value]>,
        row_count: usize,
        rng: &mut R,
    ) -> Result<Column> {
        debug!(field = %field.name, kind = field.kind.label(), "generating column");

        let mut column = Column {
            name: field.name.clone(),
            kind: field.kind.label(),
            data: Vec::with_capacity(row_count),
            pool_size: None,
            injected: 0,
        };

        match (&field.kind, pool) {
            (FieldKind::IncrementInt { start, step }, _) => {
                column.data.extend(
                    (0..row_count as i64).map(|i| Value::Int(start.wrapping_add(i.wrapping_mul(*step)))),
                );
            }
            (FieldKind::Fixed { .. }, _) | (_, None) => {
                for row in 0..row_count {
                    column
                        .data
                        .push(random_value(field, self.external.as_ref(), self.max_attempts, rng)?);
                    if (row + 1) % self.progress_interval == 0 {
                        self.notify(ProgressEvent::RowsGenerated {
                            field: &field.name,
                            rows: row + 1,
                            total: row_count,
                        });
                    }
                }
                column.injected =
                    inject_values(&mut column.data, field.effective_inject(), self.max_attempts, rng)?;
            }
            (_, Some(pool)) => {
                column.data = vec![Value::Int(0); row_count];
                for (row, segment) in random_distribution(row_count, pool.len(), self.max_attempts, rng)? {
                    column.data[row] = pool[segment].clone();
                }
                column.pool_size = Some(pool.len());
            }
        }

        self.notify(ProgressEvent::RowsGenerated {
            field: &field.name,
            rows: row_count,
            total: row_count,
        });
        Ok(column)
    }
}
