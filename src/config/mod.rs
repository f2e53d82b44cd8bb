//! Configuration for a generation run.
//!
//! Supports YAML (and JSON) field specification files plus CLI overrides.
//!
//! ```yaml
//! rows: 1000
//! include_headers: true
//! fields:
//!   - name: id
//!     type: inc:int
//!   - name: score
//!     type: rand:int
//!     range: [0, 10]
//!     rotate: rows/100
//!   - name: code
//!     type: rand:char
//!     format: "/W/W-/d/d/d"
//!     inject: ["XX-000"]
//! ```

use crate::error::{GenError, Result};
use crate::field::{resolve_row_count, FieldSpec, GenerationPlan};
use crate::value::Value;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default column delimiter.
pub const DEFAULT_DELIMITER: &str = ",";

/// Integer that may also be written as a string (`rotate: 5`, `rotate: rows/4`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(untagged)]
pub enum IntOrString {
    Int(i64),
    Text(String),
}

/// One field as written in the config file, before validation.
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct RawField {
    /// Column name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// inc:int, rand:int, rand:float, rand:char, fixed or faker:<generator>
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,

    /// First value of an inc:int sequence (default 1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub start: Option<i64>,

    /// Increment of an inc:int sequence (default 1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub step: Option<i64>,

    /// `[min, max]` for rand:int and rand:float
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<Vec<Value>>,

    /// Decimal places for rand:float (default 1)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub precision: Option<u32>,

    /// String length for rand:char (default 10)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub length: Option<usize>,

    /// Pattern for rand:char, e.g. "/W/W-/d/d/d"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,

    /// Candidate values for fixed
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<Value>>,

    /// Number of distinct values: a number or "rows/<divisor>"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<IntOrString>,

    /// Values forced into the column at random rows
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inject: Option<Vec<Value>>,
}

/// Field specification file structure
#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(default)]
pub struct GeneratorYamlConfig {
    /// Number of rows to generate; anything but a positive integer means 100
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<Value>,

    /// Emit a header line with the field names
    #[serde(skip_serializing_if = "Option::is_none")]
    pub include_headers: Option<bool>,

    /// Column delimiter (default ",")
    #[serde(skip_serializing_if = "Option::is_none")]
    pub delimiter: Option<String>,

    /// Random seed for reproducibility
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Output columns, in order
    pub fields: Vec<RawField>,
}

impl GeneratorYamlConfig {
    /// Load configuration from a YAML or JSON file (chosen by extension).
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("json"));

        let config = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_yaml_str(&content)?
        };
        Ok(config)
    }

    pub fn from_yaml_str(content: &str) -> anyhow::Result<Self> {
        Ok(serde_yaml_ng::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> anyhow::Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Save configuration to a YAML file
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = serde_yaml_ng::to_string(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Validate every field and build the plan.
    ///
    /// `rows_override` replaces the file's `rows` when given.
    pub fn to_plan(&self, rows_override: Option<i64>) -> Result<GenerationPlan> {
        let rows = rows_override.map(Value::Int);
        let row_count = resolve_row_count(rows.as_ref().or(self.rows.as_ref()));

        if self.fields.is_empty() {
            return Err(GenError::Plan(
                "need 'fields' in the config file and at least 1 field in it".to_string(),
            ));
        }

        let fields = self
            .fields
            .iter()
            .enumerate()
            .map(|(i, raw)| FieldSpec::from_raw(raw, i, row_count))
            .collect::<Result<Vec<_>>>()?;

        Ok(GenerationPlan::new(row_count, fields).with_headers(self.include_headers.unwrap_or(false)))
    }
}

/// Runtime configuration for a generation run
#[derive(Debug)]
pub struct GeneratorConfig {
    /// Validated plan
    pub plan: GenerationPlan,
    /// Output file (None for stdout)
    pub output: Option<PathBuf>,
    /// Column delimiter
    pub delimiter: String,
    /// Random seed (None = from OS entropy)
    pub seed: Option<u64>,
    /// Show progress
    pub progress: bool,
}

impl GeneratorConfig {
    /// Create a new builder
    pub fn builder() -> GeneratorConfigBuilder {
        GeneratorConfigBuilder::default()
    }
}

/// Builder for GeneratorConfig
#[derive(Default)]
pub struct GeneratorConfigBuilder {
    config_file: Option<PathBuf>,
    yaml: Option<GeneratorYamlConfig>,
    output: Option<PathBuf>,
    rows: Option<i64>,
    seed: Option<u64>,
    include_headers: Option<bool>,
    delimiter: Option<String>,
    progress: bool,
}

impl GeneratorConfigBuilder {
    pub fn config_file(mut self, path: Option<PathBuf>) -> Self {
        self.config_file = path;
        self
    }

    /// Use an already parsed config instead of a file.
    pub fn yaml(mut self, yaml: GeneratorYamlConfig) -> Self {
        self.yaml = Some(yaml);
        self
    }

    pub fn output(mut self, path: Option<PathBuf>) -> Self {
        self.output = path;
        self
    }

    pub fn rows(mut self, rows: Option<i64>) -> Self {
        self.rows = rows;
        self
    }

    pub fn seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn include_headers(mut self, include_headers: Option<bool>) -> Self {
        self.include_headers = include_headers;
        self
    }

    pub fn delimiter(mut self, delimiter: Option<String>) -> Self {
        self.delimiter = delimiter;
        self
    }

    pub fn progress(mut self, progress: bool) -> Self {
        self.progress = progress;
        self
    }

    /// Build the GeneratorConfig
    pub fn build(self) -> anyhow::Result<GeneratorConfig> {
        let yaml = match (self.yaml, self.config_file) {
            (Some(yaml), _) => yaml,
            (None, Some(ref path)) => GeneratorYamlConfig::load(path)?,
            (None, None) => anyhow::bail!("A field specification file is required"),
        };

        let mut plan = yaml.to_plan(self.rows)?;

        // CLI overrides file settings
        if let Some(headers) = self.include_headers {
            plan.include_headers = headers;
        }

        let delimiter = self
            .delimiter
            .or_else(|| yaml.delimiter.clone())
            .unwrap_or_else(|| DEFAULT_DELIMITER.to_string());
        if delimiter.is_empty() {
            anyhow::bail!("Delimiter cannot be empty");
        }

        let seed = self.seed.or(yaml.seed);

        Ok(GeneratorConfig {
            plan,
            output: self.output,
            delimiter,
            seed,
            progress: self.progress,
        })
    }
}
