use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use serde::Serialize;

use steelmate::rules::load_rules;
use steelmate::{Analyzer, Catalog, MaterialRecord, Requirements, StrengthLevel};

const USAGE: &str = "usage: steelmate <catalog.json> <command> [args]

commands:
  similar <grade> [threshold]
  corrosion <grade>
  mechanical <grade>
  validate <grade>
  recommend <application> [temperature] [high]

Set STEELMATE_RULES to use a custom rule table.";

enum Command {
    Similar { grade: String, threshold: Option<f64> },
    Corrosion { grade: String },
    Mechanical { grade: String },
    Validate { grade: String },
    Recommend { application: String, requirements: Requirements },
}

fn parse_args(args: &[String]) -> Result<(PathBuf, Command)> {
    let [catalog, command, rest @ ..] = args else {
        bail!("{}", USAGE);
    };
    let arg = |i: usize| rest.get(i).cloned();
    let grade = || arg(0).with_context(|| format!("`{}` needs a grade\n\n{}", command, USAGE));

    let command = match command.as_str() {
        "similar" => Command::Similar {
            grade: grade()?,
            threshold: arg(1)
                .map(|t| t.parse::<f64>())
                .transpose()
                .context("threshold must be a number")?,
        },
        "corrosion" => Command::Corrosion { grade: grade()? },
        "mechanical" => Command::Mechanical { grade: grade()? },
        "validate" => Command::Validate { grade: grade()? },
        "recommend" => {
            let application = arg(0).with_context(|| format!("`recommend` needs an application\n\n{}", USAGE))?;
            let temperature = arg(1)
                .map(|t| t.parse::<f64>())
                .transpose()
                .context("temperature must be a number")?;
            let strength = match arg(2).as_deref() {
                None => None,
                Some("high") => Some(StrengthLevel::High),
                Some("standard") => Some(StrengthLevel::Standard),
                Some(other) => bail!("unknown strength level '{}', expected high or standard", other),
            };
            Command::Recommend {
                application,
                requirements: Requirements { temperature, strength },
            }
        }
        other => bail!("unknown command '{}'\n\n{}", other, USAGE),
    };

    Ok((PathBuf::from(catalog), command))
}

fn build_analyzer(catalog_path: &Path) -> Result<Analyzer> {
    let catalog = Catalog::load(catalog_path)
        .with_context(|| format!("could not load catalog {}", catalog_path.display()))?;

    match std::env::var_os("STEELMATE_RULES") {
        Some(path) => {
            let path = PathBuf::from(path);
            let rules = load_rules(&path)
                .with_context(|| format!("could not load rules {}", path.display()))?;
            Ok(Analyzer::with_rules(catalog, rules))
        }
        None => Ok(Analyzer::new(catalog)),
    }
}

fn lookup<'a>(analyzer: &'a Analyzer, grade: &str) -> Result<&'a MaterialRecord> {
    analyzer
        .catalog()
        .find(grade)
        .with_context(|| format!("grade '{}' is not in the catalog", grade))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let (catalog_path, command) = parse_args(&args)?;
    let analyzer = build_analyzer(&catalog_path)?;

    match command {
        Command::Similar { grade, threshold } => {
            let target = lookup(&analyzer, &grade)?;
            match threshold {
                Some(threshold) => print_json(&analyzer.find_similar_materials(target, threshold)),
                None => print_json(&analyzer.find_similar_materials_default(target)),
            }
        }
        Command::Corrosion { grade } => {
            print_json(&analyzer.predict_corrosion_resistance(lookup(&analyzer, &grade)?))
        }
        Command::Mechanical { grade } => {
            print_json(&analyzer.predict_mechanical_properties(lookup(&analyzer, &grade)?))
        }
        Command::Validate { grade } => {
            print_json(&analyzer.validate_composition(lookup(&analyzer, &grade)?))
        }
        Command::Recommend { application, requirements } => {
            print_json(&analyzer.recommend_by_application(&application, &requirements))
        }
    }
}
