//! External value generators.
//!
//! `faker:<name>` fields hand value production to an `ExternalGenerator`.
//! The engine treats the returned values opaquely and does not retry
//! failures. `FakeRegistry` is the default implementation, backed by the
//! `fake` crate.

mod fake;

pub use self::fake::{FakeRegistry, SUPPORTED_GENERATORS};

use crate::value::Value;

/// A named value producer outside the engine's control.
pub trait ExternalGenerator: Send + Sync {
    /// Whether `name` resolves to a generator.
    fn is_supported(&self, name: &str) -> bool;

    /// Produce one value for `name`.
    fn generate(&self, name: &str, rng: &mut dyn rand::RngCore) -> anyhow::Result<Value>;
}
