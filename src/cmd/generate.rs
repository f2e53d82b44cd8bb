//! Generate command CLI handler.

use indicatif::{ProgressBar, ProgressStyle};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::{self, Write};
use std::path::PathBuf;
use std::time::Instant;
use synthcsv::writer::CsvWriter;
use synthcsv::{Engine, GeneratedData, GeneratorConfig, ProgressEvent};

#[allow(clippy::too_many_arguments)]
pub fn run(
    config: PathBuf,
    output: Option<PathBuf>,
    rows: Option<i64>,
    seed: Option<u64>,
    include_headers: Option<bool>,
    delimiter: Option<String>,
    progress: bool,
    json: bool,
) -> anyhow::Result<()> {
    let config = GeneratorConfig::builder()
        .config_file(Some(config))
        .output(output)
        .rows(rows)
        .seed(seed)
        .include_headers(include_headers)
        .delimiter(delimiter)
        .progress(progress)
        .build()?;

    let seed = config.seed.unwrap_or_else(rand::random);
    let mut rng = StdRng::seed_from_u64(seed);
    tracing::debug!(seed, "seeded generator");

    let start_time = Instant::now();

    let data = if config.progress && !json {
        let pb = ProgressBar::new(config.plan.fields.len() as u64);
        pb.set_style(
            ProgressStyle::with_template(
                "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} fields {msg}",
            )
            .unwrap()
            .progress_chars("█▓▒░  ")
            .tick_chars("⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏"),
        );
        pb.enable_steady_tick(std::time::Duration::from_millis(100));

        let pb_clone = pb.clone();
        let engine = Engine::new().with_observer(move |event: &ProgressEvent<'_>| match event {
            ProgressEvent::Preparing { field } => {
                pb_clone.set_message(format!("preparing {}", field))
            }
            ProgressEvent::FieldStarted { field, .. } => pb_clone.set_message(field.to_string()),
            ProgressEvent::RowsGenerated { field, rows, total } => {
                pb_clone.set_message(format!("{} {}/{}", field, rows, total))
            }
            ProgressEvent::FieldFinished { .. } => pb_clone.inc(1),
        });

        let data = engine.generate(&config.plan, &mut rng);
        pb.finish_and_clear();
        data?
    } else {
        Engine::new().generate(&config.plan, &mut rng)?
    };

    match config.output {
        Some(ref path) => {
            let mut writer = CsvWriter::create(path, &config.delimiter)?;
            data.write_to(&mut writer)?;
        }
        None => {
            let stdout = io::stdout();
            let mut writer = CsvWriter::new(stdout.lock(), &config.delimiter);
            data.write_to(&mut writer)?;
        }
    }

    let elapsed = start_time.elapsed();
    print_stats(&data, &config, seed, elapsed, json)
}

fn print_stats(
    data: &GeneratedData,
    config: &GeneratorConfig,
    seed: u64,
    elapsed: std::time::Duration,
    json: bool,
) -> anyhow::Result<()> {
    let stats = data.stats();
    let mut err = io::stderr().lock();

    if json {
        writeln!(err, "{}", serde_json::to_string_pretty(&stats)?)?;
        return Ok(());
    }

    // Data went to stdout; keep the terminal summary short
    if config.output.is_none() && !config.progress {
        return Ok(());
    }

    writeln!(err, "✓ Generated {} rows × {} fields", stats.rows, stats.fields)?;
    if let Some(ref path) = config.output {
        writeln!(err, "  Output: {}", path.display())?;
    }
    writeln!(err, "  Seed: {}", seed)?;
    for field in &stats.field_stats {
        let mut line = format!(
            "  {:<20} {:<10} {} unique",
            field.name, field.kind, field.unique_values
        );
        if let Some(pool) = field.pool_size {
            line.push_str(&format!(", rotate {}", pool));
        }
        if field.injected > 0 {
            line.push_str(&format!(", {} injected", field.injected));
        }
        writeln!(err, "{}", line)?;
    }
    writeln!(err, "  Elapsed: {:.3}s", elapsed.as_secs_f64())?;
    Ok(())
}
