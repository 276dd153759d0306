use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use std::path::{Path, PathBuf};
use tabled::{settings::Style, Table, Tabled};

use liftrs::config::AppConfig;
use liftrs::error::SnapshotError;
use liftrs::export::{export_overview, ExportFormat};
use liftrs::fatigue::FatigueClassifier;
use liftrs::heatmap::assign_buckets;
use liftrs::logging::{init_logging, LogConfig, LogLevel};
use liftrs::models::{FatigueResult, MatchedTemplate, UpNextRecommendation};
use liftrs::muscles::normalize_result;
use liftrs::ranking::rank_muscles;
use liftrs::upnext::{evaluate, generation_instruction, UpNextInput, UpNextState};
use liftrs::Entitlements;

/// liftrs - Recovery & Training Recommendation CLI
///
/// Evaluates per-muscle fatigue snapshots into readiness views, body-map
/// heatmap intensities, and "up next" workout recommendations.
#[derive(Parser)]
#[command(name = "liftrs")]
#[command(author = "liftrs Contributors")]
#[command(version = "0.1.0")]
#[command(about = "Recovery & Training Recommendation CLI", long_about = None)]
struct Cli {
    /// Sets a custom config file
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Increase verbosity of output
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify a snapshot and display the ranked recovery view
    Status {
        /// Snapshot JSON from the aggregation feed
        #[arg(short, long)]
        file: PathBuf,

        /// Only print the whole-body summary
        #[arg(short, long)]
        summary: bool,
    },

    /// Display body-map heatmap intensity buckets
    Heatmap {
        /// Snapshot JSON from the aggregation feed
        #[arg(short, long)]
        file: PathBuf,

        /// Palette size including the reserved background color
        #[arg(short, long)]
        palette_size: Option<usize>,
    },

    /// Evaluate the up-next recommendation decision
    Recommend {
        /// Recommendation JSON from the producer
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Snapshot JSON, used for the generation instruction
        #[arg(short, long)]
        snapshot: Option<PathBuf>,

        /// Treat the user as Pro
        #[arg(long)]
        pro: bool,

        /// Simulate an in-flight fetch
        #[arg(long)]
        loading: bool,

        /// Simulate a failed fetch
        #[arg(long)]
        error: bool,

        /// Manually chosen template JSON overriding the recommendation
        #[arg(long, value_name = "FILE")]
        override_template: Option<PathBuf>,
    },

    /// Export a classified snapshot as per-muscle rows
    Export {
        /// Snapshot JSON from the aggregation feed
        #[arg(short, long)]
        file: PathBuf,

        /// Output file path
        #[arg(short, long)]
        output: PathBuf,

        /// Export format (csv, json)
        #[arg(short = 'F', long, default_value = "csv")]
        format: String,
    },

    /// Manage application settings
    Config {
        /// List all configuration options
        #[arg(short, long)]
        list: bool,

        /// Write a default config file
        #[arg(long)]
        init: bool,

        /// Get a configuration value
        #[arg(short, long)]
        get: Option<String>,
    },
}

/// Tabled row for the ranked muscle list
#[derive(Tabled)]
struct StatusRow {
    #[tabled(rename = "Muscle")]
    muscle: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Readiness")]
    readiness: String,
    #[tabled(rename = "7d Volume")]
    volume: String,
    #[tabled(rename = "Baseline")]
    baseline: String,
    #[tabled(rename = "Hint")]
    hint: String,
}

fn load_snapshot(path: &Path) -> Result<FatigueResult> {
    if !path.exists() {
        return Err(SnapshotError::FileNotFound {
            path: path.to_path_buf(),
        }
        .into());
    }
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read snapshot {}", path.display()))?;
    let result: FatigueResult = serde_json::from_str(&contents).map_err(|e| {
        SnapshotError::Decode {
            reason: e.to_string(),
        }
    })?;
    let result = normalize_result(&result);
    result.validate()?;
    Ok(result)
}

fn load_recommendation(path: &Path) -> Result<UpNextRecommendation> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read recommendation {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse recommendation {}", path.display()))
}

fn load_template(path: &Path) -> Result<MatchedTemplate> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read template {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("failed to parse template {}", path.display()))
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = match &cli.config {
        Some(path) => path.clone(),
        None => AppConfig::default_path()?,
    };
    let app_config = AppConfig::load_or_default(&config_path)?;

    let log_config = LogConfig {
        level: LogLevel::from_verbosity(cli.verbose),
        ..app_config.logging.clone()
    };
    init_logging(&log_config)?;

    match cli.command {
        Commands::Status { file, summary } => {
            let snapshot = load_snapshot(&file)?;
            let classified = FatigueClassifier::classify_result(&snapshot, &app_config.engine);
            let overview = rank_muscles(&classified.per_muscle, &app_config.engine.readiness);

            println!("{}", "Recovery status".green().bold());

            match &overview.average_readiness {
                Some(average) => println!(
                    "  Whole body: {}% - {}",
                    average.percent,
                    average.label.bold()
                ),
                None => println!("  {}", "No tracked muscle groups yet".dimmed()),
            }
            if classified.deload_week_detected {
                println!("  {}", "Deload week detected".cyan());
            }

            if let Some(weakest) = &overview.weakest_muscle {
                println!(
                    "  Weakest: {} ({}%)",
                    weakest.muscle.muscle_group,
                    weakest.readiness.percent
                );
            }
            println!(
                "  Last {} days: {} volume across {} workouts",
                classified.window_days,
                classified.totals.total_volume,
                classified.totals.workout_count
            );

            if !summary {
                let rows: Vec<StatusRow> = overview
                    .ranked
                    .iter()
                    .map(|entry| StatusRow {
                        muscle: entry.muscle.muscle_group.clone(),
                        status: entry.muscle.status.to_string(),
                        readiness: format!(
                            "{}% {}",
                            entry.readiness.percent, entry.readiness.label
                        ),
                        volume: entry.muscle.last7_days_volume.to_string(),
                        baseline: entry
                            .muscle
                            .baseline_volume
                            .map(|b| b.to_string())
                            .unwrap_or_else(|| "-".to_string()),
                        hint: FatigueClassifier::hint_for_item(&entry.muscle)
                            .unwrap_or("")
                            .to_string(),
                    })
                    .collect();

                let mut table = Table::new(rows);
                table.with(Style::rounded());
                println!("{}", table);

                if !overview.fatigued_muscles.is_empty() {
                    let names: Vec<&str> = overview
                        .fatigued_muscles
                        .iter()
                        .map(|entry| entry.muscle.muscle_group.as_str())
                        .collect();
                    println!("  {} {}", "Most fatigued:".red(), names.join(", "));
                }
                if !overview.freshest_muscles.is_empty() {
                    let names: Vec<&str> = overview
                        .freshest_muscles
                        .iter()
                        .map(|entry| entry.muscle.muscle_group.as_str())
                        .collect();
                    println!("  {} {}", "Freshest:".green(), names.join(", "));
                }
            }
        }

        Commands::Heatmap { file, palette_size } => {
            let snapshot = load_snapshot(&file)?;
            let classified = FatigueClassifier::classify_result(&snapshot, &app_config.engine);
            let palette = palette_size.unwrap_or(app_config.display.palette_size);
            let cells = assign_buckets(
                &classified.per_muscle,
                palette,
                &app_config.engine.readiness,
            )?;

            println!("{}", "Body-map intensities".blue().bold());
            if cells.is_empty() {
                println!("  {}", "No muscle data in the window".dimmed());
            }
            for cell in cells {
                let bar = "█".repeat(cell.bucket as usize);
                println!(
                    "  {:<12} bucket {}/{} {}  ({}% ready)",
                    cell.muscle_group,
                    cell.bucket,
                    palette - 1,
                    bar.red(),
                    cell.readiness_percent
                );
            }
        }

        Commands::Recommend {
            file,
            snapshot,
            pro,
            loading,
            error,
            override_template,
        } => {
            let recommendation = match &file {
                Some(path) => Some(load_recommendation(path)?),
                None => None,
            };
            let can_generate_ai = recommendation
                .as_ref()
                .map(|r| r.can_generate_ai)
                .unwrap_or(false);
            let reasoning = recommendation.as_ref().map(|r| r.reasoning.clone());

            let input = UpNextInput {
                loading,
                is_error: error,
                recommendation,
                override_template: match &override_template {
                    Some(path) => Some(load_template(path)?),
                    None => None,
                },
                entitlements: Entitlements {
                    is_pro: pro,
                    can_generate_ai,
                },
            };

            println!("{}", "Up next".magenta().bold());
            match evaluate(&input) {
                UpNextState::Loading => {
                    println!("  Finding your next workout...");
                }
                UpNextState::Override { template } => {
                    println!(
                        "  {} ({} exercises) [manual pick - Swap available]",
                        template.template_name.bold(),
                        template.exercise_count
                    );
                }
                UpNextState::Empty => {
                    println!("  No saved workouts yet - create your first template");
                }
                UpNextState::Start {
                    template,
                    visible_tags,
                } => {
                    println!(
                        "  {} ({} exercises, match {:.0})",
                        template.template_name.bold(),
                        template.exercise_count,
                        template.match_score
                    );
                    println!("  {}", template.match_reason.dimmed());
                    if let Some(reasoning) = &reasoning {
                        println!("  {}", reasoning.dimmed());
                    }
                    if !visible_tags.is_empty() {
                        println!("  Tags: {}", visible_tags.join(", "));
                    }
                    println!("  {}", "[Start workout] [Edit]".green());
                }
                UpNextState::GenerateOrCreate {
                    generate_enabled,
                    visible_tags,
                } => {
                    if let Some(reasoning) = &reasoning {
                        println!("  {}", reasoning.dimmed());
                    }
                    if !visible_tags.is_empty() {
                        println!("  Tags: {}", visible_tags.join(", "));
                    }
                    if generate_enabled {
                        println!("  {}", "[Generate workout] [Create manually]".green());
                    } else {
                        println!(
                            "  {}",
                            "[Generate workout (upgrade)] [Create manually]".yellow()
                        );
                    }
                }
            }

            if let Some(snapshot_path) = snapshot {
                let snapshot = load_snapshot(&snapshot_path)?;
                let classified =
                    FatigueClassifier::classify_result(&snapshot, &app_config.engine);
                if let Some(instruction) = generation_instruction(&classified) {
                    println!("  Generation instruction: {}", instruction.italic());
                }
            }
        }

        Commands::Export {
            file,
            output,
            format,
        } => {
            let snapshot = load_snapshot(&file)?;
            let classified = FatigueClassifier::classify_result(&snapshot, &app_config.engine);
            let overview = rank_muscles(&classified.per_muscle, &app_config.engine.readiness);
            let format = ExportFormat::from_str(&format).map_err(liftrs::LiftRsError::from)?;
            export_overview(&overview, &output, format).map_err(liftrs::LiftRsError::from)?;
            println!(
                "{} {}",
                "Exported readiness rows to".yellow(),
                output.display()
            );
        }

        Commands::Config { list, init, get } => {
            if init {
                app_config.save(&config_path)?;
                println!("Wrote default config to {}", config_path.display());
            } else if list {
                for (key, value) in app_config.entries() {
                    println!("{} = {}", key, value);
                }
            } else if let Some(key) = get {
                match app_config.get(&key) {
                    Some(value) => println!("{}", value),
                    None => anyhow::bail!("unknown config key: {}", key),
                }
            } else {
                println!("Config file: {}", config_path.display());
            }
        }
    }

    Ok(())
}
