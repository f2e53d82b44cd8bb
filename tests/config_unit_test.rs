//! Config file loading and CLI overrides.

use std::fs;
use synthcsv::config::DEFAULT_DELIMITER;
use synthcsv::{FieldKind, GenError, GeneratorConfig, GeneratorYamlConfig};
use tempfile::TempDir;

const YAML: &str = r#"
rows: 40
include_headers: true
delimiter: "|"
seed: 11
fields:
  - name: id
    type: inc:int
    start: 100
    step: 5
  - name: score
    type: rand:int
    range: [0, 10]
    rotate: rows/8
  - name: code
    type: rand:char
    format: "/W/W-/d/d"
    inject: ["ZZ-00"]
  - name: color
    type: fixed
    values: [red, green, 3]
"#;

#[test]
fn test_yaml_to_plan() {
    let yaml = GeneratorYamlConfig::from_yaml_str(YAML).unwrap();
    let plan = yaml.to_plan(None).unwrap();

    assert_eq!(plan.row_count, 40);
    assert!(plan.include_headers);
    assert_eq!(plan.headers(), vec!["id", "score", "code", "color"]);
    assert_eq!(
        plan.field("id").unwrap().kind,
        FieldKind::IncrementInt { start: 100, step: 5 }
    );
    assert_eq!(plan.field("score").unwrap().rotate, Some(5));
    assert_eq!(plan.field("code").unwrap().inject.len(), 1);
}

#[test]
fn test_rows_override_rescales_rotation() {
    let yaml = GeneratorYamlConfig::from_yaml_str(YAML).unwrap();
    let plan = yaml.to_plan(Some(80)).unwrap();
    assert_eq!(plan.row_count, 80);
    assert_eq!(plan.field("score").unwrap().rotate, Some(10));
}

#[test]
fn test_non_integer_rows_fall_back_to_default() {
    for rows in ["12.5", "true", "\"many\"", "-3", "0"] {
        let content = format!("rows: {}\nfields:\n  - {{name: n, type: rand:int}}\n", rows);
        let yaml = GeneratorYamlConfig::from_yaml_str(&content).unwrap();
        assert_eq!(yaml.to_plan(None).unwrap().row_count, 100, "rows: {}", rows);
    }

    let json = r#"{"rows": 7.9, "fields": [{"name": "n", "type": "rand:int"}]}"#;
    let yaml = GeneratorYamlConfig::from_json_str(json).unwrap();
    assert_eq!(yaml.to_plan(None).unwrap().row_count, 100);
}

#[test]
fn test_missing_fields() {
    let yaml = GeneratorYamlConfig::from_yaml_str("rows: 10\n").unwrap();
    assert!(matches!(yaml.to_plan(None), Err(GenError::Plan(_))));
}

#[test]
fn test_json_file_load() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("spec.json");
    fs::write(
        &path,
        r#"{"rows": "25", "fields": [{"name": "n", "type": "rand:int", "range": [1, 3]}]}"#,
    )
    .unwrap();

    let plan = GeneratorYamlConfig::load(&path).unwrap().to_plan(None).unwrap();
    assert_eq!(plan.row_count, 25);
    assert_eq!(plan.fields[0].kind, FieldKind::RandomInt { min: 1, max: 3 });
}

#[test]
fn test_save_and_reload() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("spec.yaml");

    let yaml = GeneratorYamlConfig::from_yaml_str(YAML).unwrap();
    yaml.save(&path).unwrap();
    let reloaded = GeneratorYamlConfig::load(&path).unwrap();

    assert_eq!(yaml.to_plan(None).unwrap(), reloaded.to_plan(None).unwrap());
}

#[test]
fn test_builder_cli_overrides_file() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("spec.yaml");
    fs::write(&path, YAML).unwrap();

    let config = GeneratorConfig::builder()
        .config_file(Some(path.clone()))
        .rows(Some(16))
        .include_headers(Some(false))
        .delimiter(Some("\t".to_string()))
        .build()
        .unwrap();
    assert_eq!(config.plan.row_count, 16);
    assert!(!config.plan.include_headers);
    assert_eq!(config.delimiter, "\t");
    assert_eq!(config.seed, Some(11));

    let config = GeneratorConfig::builder()
        .config_file(Some(path))
        .seed(Some(3))
        .build()
        .unwrap();
    assert_eq!(config.delimiter, "|");
    assert_eq!(config.seed, Some(3));
    assert!(config.plan.include_headers);
}

#[test]
fn test_builder_defaults_and_errors() {
    let yaml = GeneratorYamlConfig::from_yaml_str("fields:\n  - {name: n, type: rand:int}\n").unwrap();
    let config = GeneratorConfig::builder().yaml(yaml.clone()).build().unwrap();
    assert_eq!(config.plan.row_count, 100);
    assert_eq!(config.delimiter, DEFAULT_DELIMITER);
    assert!(!config.plan.include_headers);

    assert!(GeneratorConfig::builder()
        .yaml(yaml)
        .delimiter(Some(String::new()))
        .build()
        .is_err());
    assert!(GeneratorConfig::builder().build().is_err());
}
