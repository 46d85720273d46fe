use clap::{Parser, Subcommand};
use sf_results::{RunManifest, RunStore};
use sf_scenario::{NamedStorm, engine_version, run_batch};
use sf_sim::Emptying;
use std::error::Error;
use std::io::Write;
use std::path::{Path, PathBuf};

mod ts1;

#[derive(Parser)]
#[command(name = "sf-cli")]
#[command(about = "Stormflow CLI - infiltration structure simulation tool", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate a scenario file
    Validate {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
    },
    /// List scenarios in a scenario file
    Scenarios {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
    },
    /// Run every scenario against a storm hydrograph
    Run {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Path to the .ts1 hydrograph file
        storm_path: PathBuf,
        /// Override the simulation horizon in hours
        #[arg(long)]
        horizon_hours: Option<f64>,
        /// Skip persisting results to the run store
        #[arg(long)]
        no_store: bool,
    },
    /// List stored runs for a scenario file
    Runs {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Only show runs for this scenario ID
        scenario_id: Option<String>,
    },
    /// Export a stored run's time series as CSV
    ExportSeries {
        /// Path to the scenario YAML file
        scenario_path: PathBuf,
        /// Run ID to export
        run_id: String,
        /// Output CSV file path (defaults to stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Validate { scenario_path } => cmd_validate(&scenario_path),
        Commands::Scenarios { scenario_path } => cmd_scenarios(&scenario_path),
        Commands::Run {
            scenario_path,
            storm_path,
            horizon_hours,
            no_store,
        } => cmd_run(&scenario_path, &storm_path, horizon_hours, no_store),
        Commands::Runs {
            scenario_path,
            scenario_id,
        } => cmd_runs(&scenario_path, scenario_id.as_deref()),
        Commands::ExportSeries {
            scenario_path,
            run_id,
            output,
        } => cmd_export_series(&scenario_path, &run_id, output.as_deref()),
    }
}

fn load_validated(path: &Path) -> Result<sf_project::ScenarioFile, Box<dyn Error>> {
    let file = sf_project::load_scenario_file(path)?;
    sf_project::validate_scenario_file(&file)?;
    Ok(file)
}

fn cmd_validate(scenario_path: &Path) -> Result<(), Box<dyn Error>> {
    let file = load_validated(scenario_path)?;
    println!(
        "OK: '{}' ({} scenarios)",
        file.name,
        file.scenarios.len()
    );
    Ok(())
}

fn cmd_scenarios(scenario_path: &Path) -> Result<(), Box<dyn Error>> {
    let file = load_validated(scenario_path)?;
    for scenario in &file.scenarios {
        println!(
            "{:<20} {:<32} units={}",
            scenario.id, scenario.name, scenario.structure.num_units
        );
    }
    Ok(())
}

fn cmd_run(
    scenario_path: &Path,
    storm_path: &Path,
    horizon_hours: Option<f64>,
    no_store: bool,
) -> Result<(), Box<dyn Error>> {
    let file = load_validated(scenario_path)?;
    let content = std::fs::read_to_string(storm_path)?;
    let storm = ts1::parse_ts1(&content)?;

    let label = storm_path
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .unwrap_or_else(|| "storm".to_string());
    println!(
        "Storm '{label}': {} samples over {:.0} min, peak {:.4} m3/s, total {:.1} m3",
        storm.len(),
        storm.duration_min(),
        storm.peak_flow_m3_per_s(),
        storm.total_volume_m3()
    );

    let mut opts = file.sim_options();
    if let Some(hours) = horizon_hours {
        opts = opts.with_horizon_hours(hours);
    }

    let storms = vec![NamedStorm::new(label, storm)];
    let entries = run_batch(&file.scenarios, &storms, &opts);

    let store = if no_store {
        None
    } else {
        Some(RunStore::for_scenario_file(scenario_path)?)
    };

    println!(
        "{:<20} {:>12} {:>8} {:>12} {:>12} {:>16} {:>8}",
        "Scenario", "Peak (m3)", "Util", "Outflow (m3)", "Overflow (m3)", "Emptying", "MB err"
    );
    for entry in &entries {
        match &entry.outcome {
            Ok(result) => {
                let s = &result.summary;
                let emptying = match s.emptying {
                    Emptying::Drained { minutes } => format!("{:.0} min", minutes),
                    Emptying::NotDrained { .. } => "not drained".to_string(),
                    Emptying::Dry => "dry".to_string(),
                };
                println!(
                    "{:<20} {:>12.2} {:>7.0}% {:>12.2} {:>12.2} {:>16} {:>7.2}%",
                    entry.scenario_id,
                    s.peak_storage_m3,
                    s.storage_utilization * 100.0,
                    s.total_outflow_m3,
                    s.total_overflow_m3,
                    emptying,
                    s.mass_balance.error_percent
                );
                if !s.mass_balance.within_tolerance {
                    println!("  WARNING: mass-balance error exceeds tolerance");
                }
                if let Some(store) = &store {
                    let manifest = RunManifest::new(
                        entry.run_id.clone(),
                        entry.scenario_id.clone(),
                        entry.storm_label.clone(),
                        engine_version(),
                    );
                    store.save_run(&manifest, result)?;
                }
            }
            Err(err) => {
                println!("{:<20} FAILED: {err}", entry.scenario_id);
            }
        }
    }
    Ok(())
}

fn cmd_runs(scenario_path: &Path, scenario_id: Option<&str>) -> Result<(), Box<dyn Error>> {
    let store = RunStore::for_scenario_file(scenario_path)?;
    let mut runs = store.list_runs(scenario_id)?;
    runs.sort_by(|a, b| a.timestamp.cmp(&b.timestamp));
    if runs.is_empty() {
        println!("No stored runs.");
        return Ok(());
    }
    for manifest in runs {
        println!(
            "{}  {:<20} {:<20} {}",
            manifest.timestamp, manifest.scenario_id, manifest.storm_label, manifest.run_id
        );
    }
    Ok(())
}

fn cmd_export_series(
    scenario_path: &Path,
    run_id: &str,
    output: Option<&Path>,
) -> Result<(), Box<dyn Error>> {
    let store = RunStore::for_scenario_file(scenario_path)?;
    let series = store.load_timeseries(run_id)?;

    let mut csv = String::from(
        "time_min,inflow_m3_per_s,stored_volume_m3,outflow_m3_per_s,overflow_m3_per_s,water_level_m\n",
    );
    for record in &series {
        csv.push_str(&format!(
            "{},{},{},{},{},{}\n",
            record.time_min,
            record.inflow_m3_per_s,
            record.stored_volume_m3,
            record.outflow_m3_per_s,
            record.overflow_m3_per_s,
            record.water_level_m
        ));
    }

    match output {
        Some(path) => std::fs::write(path, csv)?,
        None => std::io::stdout().write_all(csv.as_bytes())?,
    }
    Ok(())
}
