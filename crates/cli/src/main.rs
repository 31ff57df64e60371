//! BabyAGI forecast CLI - completion predictions and what-if scenarios.

mod plan;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use babyagi_core::{Objective, ObjectiveId};
use babyagi_prediction::{format_duration, PredictionConfig, Predictor, DEFAULT_WINDOW_DAYS};
use babyagi_scenario::{Comparison, ScenarioSet, ScenarioSimulator};
use babyagi_storage::{JsonObjectiveStore, ObjectiveStore};
use clap::{Parser, Subcommand};
use serde::Serialize;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::plan::ScenarioPlan;

#[derive(Parser)]
#[command(name = "babyagi")]
#[command(about = "Completion forecasts and what-if scenarios for BabyAGI objectives", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Storage path for objective data
    #[arg(short, long, global = true, default_value = ".babyagi")]
    data: PathBuf,

    /// Prediction config (JSON)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Import an exported objective list (JSON array)
    Import {
        /// File to import
        file: PathBuf,
    },
    /// Forecast an objective against stored history
    Predict {
        /// Objective ID
        id: String,
    },
    /// Show recent velocity
    Velocity {
        /// Window in days
        #[arg(long, default_value_t = DEFAULT_WINDOW_DAYS)]
        window: u32,
    },
    /// Build scenarios from a plan file and compare them
    Simulate {
        /// Objective ID
        id: String,
        /// Plan file (JSON array of scenarios)
        #[arg(long)]
        plan: PathBuf,
    },
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn load_config(path: Option<&Path>) -> Result<PredictionConfig> {
    let Some(path) = path else {
        return Ok(PredictionConfig::default());
    };
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read config {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid config {}", path.display()))
}

async fn load_objective(store: &JsonObjectiveStore, id: &str) -> Result<Objective> {
    store
        .load_objective(&ObjectiveId::from(id))
        .await?
        .ok_or_else(|| anyhow::anyhow!("Objective not found: {}", id))
}

async fn read_plans(path: &Path) -> Result<Vec<ScenarioPlan>> {
    let json = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read plan {}", path.display()))?;
    serde_json::from_str(&json).with_context(|| format!("Invalid plan {}", path.display()))
}

fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[derive(Serialize)]
struct ScenarioSummary<'a> {
    name: &'a str,
    description: &'a str,
    total_estimated_ms: f64,
    risk_level: babyagi_prediction::RiskLevel,
    modifications: Vec<&'a str>,
}

#[derive(Serialize)]
struct SimulationReport<'a> {
    scenarios: Vec<ScenarioSummary<'a>>,
    comparison: Comparison,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = load_config(cli.config.as_deref()).await?;
    let predictor = Predictor::new().with_config(config);

    let mut store = JsonObjectiveStore::new(&cli.data)
        .await
        .with_context(|| format!("Failed to open store at {}", cli.data.display()))?;

    match cli.command {
        Commands::Import { file } => {
            let count = store
                .import_file(&file)
                .await
                .with_context(|| format!("Failed to import {}", file.display()))?;
            info!("Imported {} objectives", count);
            println!("Imported {} objectives into {}", count, store.root().display());
        }
        Commands::Predict { id } => {
            let objective = load_objective(&store, &id).await?;
            let history = store.list_objectives().await?;
            let prediction = predictor.predict_objective(&objective, &history);

            if cli.json {
                return print_json(&prediction);
            }

            println!("Objective: {} ({})", objective.title, objective.id);
            println!("  Role: {}", objective.role());
            for task in &objective.tasks {
                let Some(p) = prediction.task(&task.id) else { continue };
                println!(
                    "  {:<40} {:>8}  conf {:.2}  [{}]",
                    task.title,
                    format_duration(p.estimated_duration_ms),
                    p.confidence,
                    p.factors.join(", ")
                );
            }
            println!("  Total: {}", format_duration(prediction.total_estimated_ms));
            println!("  Completion: {}", prediction.completion_date.format("%Y-%m-%d %H:%M UTC"));
            println!(
                "  Risk: {} ({} of {} tasks risky)",
                prediction.risk_level.as_str().to_uppercase(),
                prediction.high_risk_count,
                objective.tasks.len()
            );
            if !prediction.bottlenecks.is_empty() {
                println!("  Bottlenecks: {}", prediction.bottlenecks.join(", "));
            }
        }
        Commands::Velocity { window } => {
            let objectives = store.list_objectives().await?;
            let now = chrono::Utc::now();
            let metrics = predictor.velocity_at(&objectives, window, now);
            let trend = predictor.velocity_trend_at(&objectives, window, now)?;

            if cli.json {
                return print_json(&serde_json::json!({ "metrics": metrics, "trend": trend }));
            }

            println!("Velocity (last {} days)", window);
            println!("  Tasks/day: {:.2}", metrics.tasks_per_day);
            println!("  Objectives/week: {:.2}", metrics.objectives_per_week);
            println!("  Avg task duration: {}", format_duration(metrics.avg_task_duration_ms));
            println!("  Trend: {:?} ({:+.2}/day)", trend.direction, trend.slope);
        }
        Commands::Simulate { id, plan } => {
            let objective = load_objective(&store, &id).await?;
            let history = store.list_objectives().await?;
            let plans = read_plans(&plan).await?;

            let sim = ScenarioSimulator::new(predictor);
            let mut set = ScenarioSet::new();
            set.push(sim.create_scenario(&objective, "Baseline", "Objective as planned", &history));
            for plan in &plans {
                set.push(plan.build(&sim, &objective, &history));
            }
            let comparison = set.compare();

            if cli.json {
                let scenarios = set
                    .iter()
                    .map(|s| ScenarioSummary {
                        name: &s.name,
                        description: &s.description,
                        total_estimated_ms: s.prediction.total_estimated_ms,
                        risk_level: s.prediction.risk_level,
                        modifications: s.modifications.iter().map(|m| m.description.as_str()).collect(),
                    })
                    .collect();
                return print_json(&SimulationReport { scenarios, comparison });
            }

            println!("Scenarios for {} ({})", objective.title, objective.id);
            for ((scenario, delta), risk) in set
                .iter()
                .zip(&comparison.time_deltas)
                .zip(&comparison.risk_comparison)
            {
                println!(
                    "  {:<20} {:>8}  {:>9}  {}",
                    scenario.name,
                    format_duration(scenario.prediction.total_estimated_ms),
                    if *delta == 0.0 { "-".to_string() } else { format_delta(*delta) },
                    risk
                );
                for modification in &scenario.modifications {
                    println!("      - {}", modification.description);
                }
            }
            if !comparison.recommendations.is_empty() {
                println!("Recommendations:");
                for recommendation in &comparison.recommendations {
                    println!("  * {}", recommendation);
                }
            }
        }
    }

    Ok(())
}

fn format_delta(ms: f64) -> String {
    if ms > 0.0 {
        format!("+{}", format_duration(ms))
    } else {
        format_duration(ms)
    }
}
