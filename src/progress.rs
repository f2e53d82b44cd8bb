//! Progress reporting for generation runs.
//!
//! The engine calls a `ProgressObserver` at fixed checkpoints instead of
//! printing. Any `Fn(&ProgressEvent)` closure is an observer, which is how the
//! CLI drives its `indicatif` progress bar.

/// Default number of rows between `RowsGenerated` events.
pub const PROGRESS_INTERVAL: usize = 10_000;

/// A checkpoint reached during generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProgressEvent<'a> {
    /// Rotation pool is being built for a field
    Preparing { field: &'a str },
    /// Data generation started for the field at `index`
    FieldStarted {
        index: usize,
        field: &'a str,
        total_fields: usize,
    },
    /// `rows` of `total` rows are done for the field
    RowsGenerated {
        field: &'a str,
        rows: usize,
        total: usize,
    },
    /// The field's column is complete
    FieldFinished { index: usize, field: &'a str },
}

/// Receives progress events from the engine.
pub trait ProgressObserver {
    fn on_event(&self, event: &ProgressEvent<'_>);
}

impl<F> ProgressObserver for F
where
    F: Fn(&ProgressEvent<'_>),
{
    fn on_event(&self, event: &ProgressEvent<'_>) {
        self(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;

    #[test]
    fn test_closure_observer() {
        let seen = RefCell::new(Vec::new());
        let observer = |event: &ProgressEvent<'_>| {
            if let ProgressEvent::RowsGenerated { rows, .. } = event {
                seen.borrow_mut().push(*rows);
            }
        };

        observer.on_event(&ProgressEvent::RowsGenerated {
            field: "id",
            rows: 10,
            total: 20,
        });
        observer.on_event(&ProgressEvent::Preparing { field: "id" });

        assert_eq!(*seen.borrow(), vec![10]);
    }
}
