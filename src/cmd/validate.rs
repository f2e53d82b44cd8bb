//! Validate command CLI handler.

use serde::Serialize;
use std::path::PathBuf;
use synthcsv::{Engine, GeneratorYamlConfig};

/// JSON output for the validate command
#[derive(Serialize)]
pub struct ValidateJsonOutput {
    pub file: String,
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rows: Option<usize>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub fields: Vec<ValidatedField>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct ValidatedField {
    pub name: String,
    pub kind: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rotate: Option<usize>,
    pub inject: usize,
}

pub fn run(config: PathBuf, json: bool) -> anyhow::Result<()> {
    let result = GeneratorYamlConfig::load(&config).and_then(|yaml| {
        let plan = yaml.to_plan(None)?;
        Engine::new().validate(&plan)?;
        Ok(plan)
    });

    let output = match result {
        Ok(ref plan) => ValidateJsonOutput {
            file: config.display().to_string(),
            valid: true,
            rows: Some(plan.row_count),
            fields: plan
                .fields
                .iter()
                .map(|f| ValidatedField {
                    name: f.name.clone(),
                    kind: f.kind.label().to_string(),
                    rotate: f.effective_rotate(),
                    inject: f.effective_inject().len(),
                })
                .collect(),
            error: None,
        },
        Err(ref e) => ValidateJsonOutput {
            file: config.display().to_string(),
            valid: false,
            rows: None,
            fields: Vec::new(),
            error: Some(format!("{:#}", e)),
        },
    };

    if json {
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else if output.valid {
        println!("✓ {} is valid", output.file);
        println!("  Rows: {}", output.rows.unwrap_or_default());
        for field in &output.fields {
            let mut line = format!("  {:<20} {}", field.name, field.kind);
            if let Some(rotate) = field.rotate {
                line.push_str(&format!(" rotate={}", rotate));
            }
            if field.inject > 0 {
                line.push_str(&format!(" inject={}", field.inject));
            }
            println!("{}", line);
        }
    } else {
        eprintln!("✗ {} is invalid", output.file);
    }

    result.map(|_| ())
}
