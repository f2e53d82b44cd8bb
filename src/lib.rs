//! Synthetic delimited data from a declarative field specification.
//!
//! ```rust
//! use rand::rngs::StdRng;
//! use rand::SeedableRng;
//! use synthcsv::{Engine, FieldKind, FieldSpec, GenerationPlan};
//!
//! let plan = GenerationPlan::new(
//!     20,
//!     vec![
//!         FieldSpec::new("id", FieldKind::IncrementInt { start: 1, step: 1 }),
//!         FieldSpec::new("score", FieldKind::RandomInt { min: 0, max: 10 }).with_rotate(3),
//!     ],
//! )
//! .with_headers(true);
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let data = Engine::new().generate(&plan, &mut rng).unwrap();
//! let csv = data.to_delimited_string(",").unwrap();
//! assert_eq!(csv.lines().count(), 21);
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod external;
pub mod field;
pub mod json_schema;
pub mod logging;
pub mod progress;
pub mod value;
pub mod writer;

pub use config::{GeneratorConfig, GeneratorYamlConfig, RawField};
pub use engine::{Engine, GenerateStats, GeneratedData};
pub use error::GenError;
pub use external::{ExternalGenerator, FakeRegistry};
pub use field::{CharMode, FieldKind, FieldSpec, GenerationPlan};
pub use progress::{ProgressEvent, ProgressObserver};
pub use value::Value;
