use anyhow::{Context, Result};
use chrono::Local;
use clap::Parser;
use log::{info, warn};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use seat_planner::{
    AllocationResult, AllocationSummary, Allocator, Config, constants::DEFAULT_CONFIG_PATH,
    model::PersonId, model::SeatId, read_floor_plan, read_hierarchy,
};

#[derive(Parser)]
#[command(author, version, about = "Run the same floor and roster under two configurations and compare", long_about = None)]
struct Args {
    /// Baseline configuration
    #[arg(short = 'a', long = "baseline", default_value = DEFAULT_CONFIG_PATH)]
    baseline: PathBuf,

    /// Candidate configuration
    #[arg(short = 'b', long = "candidate")]
    candidate: PathBuf,

    /// Save the comparison as JSON in the baseline output directory
    #[arg(long)]
    save: bool,
}

#[derive(Debug, Serialize)]
struct Comparison {
    baseline: PathBuf,
    candidate: PathBuf,
    baseline_summary: AllocationSummary,
    candidate_summary: AllocationSummary,
    baseline_warnings: usize,
    candidate_warnings: usize,
    /// People sitting somewhere else (or only seated in one run)
    moved: usize,
}

fn load(path: &Path) -> Result<Config> {
    if path.exists() {
        Config::load_from_file(path).with_context(|| format!("loading {}", path.display()))
    } else {
        warn!(
            "Config file not found: {}, using default settings",
            path.display()
        );
        Ok(Config::default())
    }
}

fn seat_map(result: &AllocationResult) -> BTreeMap<PersonId, SeatId> {
    result
        .assignments
        .iter()
        .map(|a| (a.person_id, a.seat_id))
        .collect()
}

fn moved(a: &AllocationResult, b: &AllocationResult) -> usize {
    let (a, b) = (seat_map(a), seat_map(b));
    let changed = a.iter().filter(|&(p, s)| b.get(p) != Some(s)).count();
    let added = b.keys().filter(|p| !a.contains_key(*p)).count();
    changed + added
}

fn delta(name: &str, a: usize, b: usize) {
    let d = b as i64 - a as i64;
    info!("{name:<16} {a:>6} -> {b:>6} ({d:+})");
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    let args = Args::parse();

    let baseline = load(&args.baseline)?;
    let candidate = load(&args.candidate)?;

    // both runs share the baseline's input files
    let plan = read_floor_plan(&baseline.input.tables, &baseline.input.seats)
        .context("reading floor plan")?;
    let (roster, preferences) = read_hierarchy(&baseline.input.hierarchy)
        .context("reading roster")?
        .build()?;

    let a = Allocator::new(&plan, &roster, &baseline).run(&preferences);
    let b = Allocator::new(&plan, &roster, &candidate).run(&preferences);

    info!("=== Baseline vs candidate ===");
    info!("Baseline:  {}", args.baseline.display());
    info!("Candidate: {}", args.candidate.display());
    let (sa, sb) = (&a.summary, &b.summary);
    delta("people seated", sa.people_seated, sb.people_seated);
    delta("seats used", sa.seats_used, sb.seats_used);
    delta("teams full", sa.teams_full, sb.teams_full);
    delta("teams partial", sa.teams_partial, sb.teams_partial);
    delta("teams unseated", sa.teams_unseated, sb.teams_unseated);
    delta("zones", sa.zones, sb.zones);
    delta("warnings", a.warnings.len(), b.warnings.len());

    let comparison = Comparison {
        baseline: args.baseline.clone(),
        candidate: args.candidate.clone(),
        baseline_summary: a.summary.clone(),
        candidate_summary: b.summary.clone(),
        baseline_warnings: a.warnings.len(),
        candidate_warnings: b.warnings.len(),
        moved: moved(&a, &b),
    };
    info!("People moved: {}", comparison.moved);

    if args.save {
        let dir = &baseline.output.dir;
        std::fs::create_dir_all(dir)
            .with_context(|| format!("creating {}", dir.display()))?;
        let timestamp = Local::now().format("%Y-%m-%d_%H-%M-%S");
        let path = dir.join(format!("compare_{timestamp}.json"));
        std::fs::write(&path, serde_json::to_string_pretty(&comparison)?)
            .with_context(|| format!("writing {}", path.display()))?;
        info!("Comparison saved to: {}", path.display());
    }
    Ok(())
}
