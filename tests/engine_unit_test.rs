//! Engine tests through the public API.

use rand::rngs::StdRng;
use rand::SeedableRng;
use std::collections::HashSet;
use synthcsv::engine::random_distribution;
use synthcsv::{
    CharMode, Engine, ExternalGenerator, FieldKind, FieldSpec, GenError, GenerationPlan, Value,
};

fn rng() -> StdRng {
    StdRng::seed_from_u64(7)
}

fn all_kinds() -> Vec<FieldSpec> {
    vec![
        FieldSpec::new("id", FieldKind::IncrementInt { start: 1, step: 1 }),
        FieldSpec::new("n", FieldKind::RandomInt { min: -5, max: 5 }),
        FieldSpec::new(
            "f",
            FieldKind::RandomFloat {
                min: 0.0,
                max: 10.0,
                precision: 2,
            },
        ),
        FieldSpec::new("c", FieldKind::RandomChar(CharMode::Length(8))),
        FieldSpec::new(
            "x",
            FieldKind::Fixed {
                values: vec![Value::from("a"), Value::from("b")],
            },
        ),
        FieldSpec::new(
            "who",
            FieldKind::External {
                name: "name:first_name".to_string(),
            },
        ),
    ]
}

#[test]
fn test_every_column_has_row_count_values() {
    for rows in [1, 7, 250] {
        let plan = GenerationPlan::new(rows, all_kinds());
        let data = Engine::new().generate(&plan, &mut rng()).unwrap();
        assert_eq!(data.row_count(), rows);
        for column in data.columns() {
            assert_eq!(column.data.len(), rows, "column {}", column.name);
        }
        assert_eq!(data.rows().len(), rows);
    }
}

#[test]
fn test_headers_follow_declaration_order() {
    let plan = GenerationPlan::new(3, all_kinds()).with_headers(true);
    let data = Engine::new().generate(&plan, &mut rng()).unwrap();
    assert_eq!(data.headers(), vec!["id", "n", "f", "c", "x", "who"]);

    let text = data.to_delimited_string(",").unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("id,n,f,c,x,who"));
    assert_eq!(lines.count(), 3);
}

#[test]
fn test_increment_defaults() {
    let plan = GenerationPlan::new(
        4,
        vec![FieldSpec::new("id", FieldKind::IncrementInt { start: 1, step: 1 })],
    );
    let data = Engine::new().generate(&plan, &mut rng()).unwrap();
    let ids: Vec<i64> = data.column("id").unwrap().iter().filter_map(Value::as_i64).collect();
    assert_eq!(ids, vec![1, 2, 3, 4]);
}

#[test]
fn test_int_and_float_bounds() {
    let plan = GenerationPlan::new(
        2000,
        vec![
            FieldSpec::new("n", FieldKind::RandomInt { min: 3, max: 6 }),
            FieldSpec::new(
                "f",
                FieldKind::RandomFloat {
                    min: 1.5,
                    max: 2.5,
                    precision: 2,
                },
            ),
        ],
    );
    let data = Engine::new().generate(&plan, &mut rng()).unwrap();

    let ints: HashSet<i64> = data.column("n").unwrap().iter().filter_map(Value::as_i64).collect();
    assert_eq!(ints, (3..=6).collect());

    for v in data.column("f").unwrap() {
        let x = v.as_f64().unwrap();
        assert!((1.5..2.5).contains(&x), "{} out of range", x);
        assert_eq!((x * 100.0).round() / 100.0, x);
    }
}

#[test]
fn test_rotation_uses_exactly_rotate_values() {
    let plan = GenerationPlan::new(
        100,
        vec![FieldSpec::new("n", FieldKind::RandomInt { min: 0, max: 1000 }).with_rotate(10)],
    );
    let data = Engine::new().generate(&plan, &mut rng()).unwrap();
    let stats = data.stats();
    assert_eq!(stats.field_stats[0].pool_size, Some(10));
    assert_eq!(stats.field_stats[0].unique_values, 10);
}

#[test]
fn test_rotation_of_entire_int_domain() {
    let plan = GenerationPlan::new(
        50,
        vec![FieldSpec::new("n", FieldKind::RandomInt { min: 0, max: 10 }).with_rotate(11)],
    );
    let data = Engine::new().generate(&plan, &mut rng()).unwrap();
    let values: HashSet<i64> = data.column("n").unwrap().iter().filter_map(Value::as_i64).collect();
    assert_eq!(values, (0..=10).collect());
}

#[test]
fn test_rotation_includes_injected_values() {
    let field = FieldSpec::new("code", FieldKind::RandomChar(CharMode::Length(6)))
        .with_rotate(4)
        .with_inject(vec![Value::from("SPECIAL")]);
    let plan = GenerationPlan::new(40, vec![field]);
    let data = Engine::new().generate(&plan, &mut rng()).unwrap();
    let column = data.column("code").unwrap();

    assert!(column.contains(&Value::from("SPECIAL")));
    assert_eq!(column.iter().collect::<HashSet<_>>().len(), 4);
}

#[test]
fn test_fixed_values_membership() {
    let values = vec![Value::from("red"), Value::Int(2), Value::Bool(true)];
    let plan = GenerationPlan::new(
        300,
        vec![FieldSpec::new(
            "mixed",
            FieldKind::Fixed {
                values: values.clone(),
            },
        )
        .with_inject(vec![Value::from("never")])],
    );
    let data = Engine::new().generate(&plan, &mut rng()).unwrap();
    let seen: HashSet<&Value> = data.column("mixed").unwrap().iter().collect();
    assert!(seen.iter().all(|v| values.contains(v)));
    assert_eq!(seen.len(), 3);
}

#[test]
fn test_injection_counts() {
    let field = FieldSpec::new("code", FieldKind::RandomChar(CharMode::Length(10)))
        .with_inject(vec![Value::from("v1"), Value::from("v2")]);
    let plan = GenerationPlan::new(1000, vec![field]);
    let data = Engine::new().generate(&plan, &mut rng()).unwrap();

    let column = data.column("code").unwrap();
    let v1 = column.iter().filter(|v| **v == Value::from("v1")).count();
    let v2 = column.iter().filter(|v| **v == Value::from("v2")).count();
    assert!((1..50).contains(&v1));
    assert!((1..50).contains(&v2));
    assert_eq!(data.stats().field_stats[0].injected, v1 + v2);
}

#[test]
fn test_char_format_shape() {
    let format = "/D/D-/d/d/d/d".parse().unwrap();
    let plan = GenerationPlan::new(
        200,
        vec![FieldSpec::new("code", FieldKind::RandomChar(CharMode::Format(format)))],
    );
    let data = Engine::new().generate(&plan, &mut rng()).unwrap();
    for v in data.column("code").unwrap() {
        let s: Vec<char> = v.as_str().unwrap().chars().collect();
        assert_eq!(s.len(), 7);
        assert!(s[..2].iter().all(|c| c.is_ascii_alphabetic()));
        assert_eq!(s[2], '-');
        assert!(s[3..].iter().all(|c| c.is_ascii_digit()));
    }
}

#[test]
fn test_distribution_ten_over_three() {
    let mut rng = rng();
    let mut counts = [0usize; 3];
    let mut rows = Vec::new();
    for (row, segment) in random_distribution(10, 3, 1000, &mut rng).unwrap() {
        rows.push(row);
        counts[segment] += 1;
    }
    assert_eq!(rows, (0..10).collect::<Vec<_>>());
    assert!(counts.iter().all(|c| *c >= 1));
}

#[test]
fn test_infeasible_rotation_fails_before_generation() {
    let plan = GenerationPlan::new(
        100,
        vec![FieldSpec::new("n", FieldKind::RandomInt { min: 0, max: 10 }).with_rotate(50)],
    );
    let err = Engine::new().generate(&plan, &mut rng()).unwrap_err();
    assert!(matches!(err, GenError::Infeasible { ref field, .. } if field == "n"));
}

#[test]
fn test_infeasible_char_format_rotation() {
    let format = "/d".parse().unwrap();
    let plan = GenerationPlan::new(
        100,
        vec![FieldSpec::new("digit", FieldKind::RandomChar(CharMode::Format(format))).with_rotate(20)],
    );
    assert!(matches!(
        Engine::new().generate(&plan, &mut rng()),
        Err(GenError::Infeasible { .. })
    ));
}

#[test]
fn test_infeasible_float_rotation() {
    let whole = FieldKind::RandomFloat {
        min: 0.0,
        max: 3.0,
        precision: 0,
    };
    let plan = GenerationPlan::new(100, vec![FieldSpec::new("f", whole).with_rotate(5)]);
    // Fails from the domain check, not from running out of attempts
    let err = Engine::new()
        .with_max_attempts(u64::MAX)
        .generate(&plan, &mut rng())
        .unwrap_err();
    assert!(matches!(err, GenError::Infeasible { ref field, .. } if field == "f"));
}

struct Constant;

impl ExternalGenerator for Constant {
    fn is_supported(&self, _name: &str) -> bool {
        true
    }

    fn generate(&self, _name: &str, _rng: &mut dyn rand::RngCore) -> anyhow::Result<Value> {
        Ok(Value::from("same"))
    }
}

#[test]
fn test_retry_ceiling_is_reported() {
    // the generator can only ever produce one distinct value
    let plan = GenerationPlan::new(
        10,
        vec![FieldSpec::new(
            "n",
            FieldKind::External {
                name: "constant".to_string(),
            },
        )
        .with_rotate(2)],
    );
    let err = Engine::new()
        .with_external_generator(Constant)
        .with_max_attempts(25)
        .generate(&plan, &mut rng())
        .unwrap_err();
    assert!(matches!(err, GenError::Exhausted { attempts: 25, .. }));
}

#[test]
fn test_rotation_total_draws_may_exceed_ceiling() {
    // 19_999 cut points over 19_999 slots take ~210k draws in total
    let rows = 20_000;
    let plan = GenerationPlan::new(
        rows,
        vec![FieldSpec::new("n", FieldKind::RandomInt { min: 0, max: 40_000 }).with_rotate(rows)],
    );
    let data = Engine::new()
        .with_max_attempts(150_000)
        .generate(&plan, &mut rng())
        .unwrap();
    assert_eq!(data.stats().field_stats[0].unique_values, rows);
}

struct Broken;

impl ExternalGenerator for Broken {
    fn is_supported(&self, _name: &str) -> bool {
        true
    }

    fn generate(&self, name: &str, _rng: &mut dyn rand::RngCore) -> anyhow::Result<Value> {
        anyhow::bail!("{} is offline", name)
    }
}

#[test]
fn test_external_failure_propagates() {
    let plan = GenerationPlan::new(
        5,
        vec![FieldSpec::new(
            "who",
            FieldKind::External {
                name: "remote".to_string(),
            },
        )],
    );
    let err = Engine::new()
        .with_external_generator(Broken)
        .generate(&plan, &mut rng())
        .unwrap_err();
    match err {
        GenError::External {
            field,
            generator,
            message,
        } => {
            assert_eq!(field, "who");
            assert_eq!(generator, "remote");
            assert!(message.contains("offline"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_unknown_external_generator_rejected() {
    let plan = GenerationPlan::new(
        5,
        vec![FieldSpec::new(
            "x",
            FieldKind::External {
                name: "no_such_thing".to_string(),
            },
        )],
    );
    let err = Engine::new().validate(&plan).unwrap_err();
    assert!(err.is_config());
}

#[test]
fn test_seeded_runs_are_reproducible() {
    let plan = GenerationPlan::new(100, all_kinds());
    let a = Engine::new().generate(&plan, &mut rng()).unwrap();
    let b = Engine::new().generate(&plan, &mut rng()).unwrap();
    assert_eq!(a.into_rows(), b.into_rows());
}
