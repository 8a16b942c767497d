use anyhow::{Context, Result};
use clap::Parser;
use log::{debug, error, info, warn};
use std::path::PathBuf;

use seat_planner::{
    AllocationMode, Allocator, Config, OverflowPolicy, SequencePolicy, ZoneFallback,
    constants::DEFAULT_CONFIG_PATH, export_assignments_csv, read_floor_plan, read_hierarchy,
    write_report_json,
};

#[derive(Parser)]
#[command(author, version, about = "Assign leaders and teams to seats on a floor plan", long_about = None)]
struct Args {
    /// Configuration file path
    #[arg(short = 'c', long = "config", default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Tables CSV (overrides input.tables)
    #[arg(long)]
    tables: Option<PathBuf>,

    /// Seats CSV (overrides input.seats)
    #[arg(long)]
    seats: Option<PathBuf>,

    /// Roster JSON (overrides input.hierarchy)
    #[arg(long)]
    hierarchy: Option<PathBuf>,

    /// Output directory (overrides output.dir)
    #[arg(short = 'o', long = "output")]
    output: Option<PathBuf>,

    /// Allocation mode: zone | manager-proximity
    #[arg(short = 'm', long)]
    mode: Option<AllocationMode>,

    /// Seat order inside a table: row-major | serpentine | column-major
    #[arg(short = 's', long)]
    sequence: Option<SequencePolicy>,

    /// Oversized teams: strict | split
    #[arg(long)]
    overflow: Option<OverflowPolicy>,

    /// Department without a fitting zone: full-pool | unseated
    #[arg(long)]
    zone_fallback: Option<ZoneFallback>,

    /// Also write the JSON run report
    #[arg(long)]
    report: bool,

    /// Run and log the summary without writing files
    #[arg(long)]
    dry_run: bool,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(p) = &self.tables {
            config.input.tables = p.clone();
        }
        if let Some(p) = &self.seats {
            config.input.seats = p.clone();
        }
        if let Some(p) = &self.hierarchy {
            config.input.hierarchy = p.clone();
        }
        if let Some(p) = &self.output {
            config.output.dir = p.clone();
        }
        if let Some(mode) = self.mode {
            config.allocation.mode = mode;
        }
        if let Some(policy) = self.sequence {
            config.sequencing.policy = policy;
        }
        if let Some(overflow) = self.overflow {
            config.allocation.overflow = overflow;
        }
        if let Some(fallback) = self.zone_fallback {
            config.allocation.zone_fallback = fallback;
        }
    }
}

fn main() {
    // Initialize logger - defaults to RUST_LOG if set, otherwise INFO
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();

    let args = Args::parse();
    if let Err(e) = run(&args) {
        error!("Error: {e:#}");
        for cause in e.chain() {
            if let Some(ioe) = cause.downcast_ref::<std::io::Error>()
                && ioe.kind() == std::io::ErrorKind::NotFound
            {
                error!("Hint: run `generate` to write demo input under data/.");
                break;
            }
        }
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<()> {
    let mut config = if args.config.exists() {
        Config::load_from_file(&args.config)
            .with_context(|| format!("loading {}", args.config.display()))?
    } else {
        warn!(
            "Config file not found: {}, using default settings",
            args.config.display()
        );
        Config::default()
    };
    args.apply(&mut config);
    config.validate()?;
    debug!("{config:?}");

    let plan = read_floor_plan(&config.input.tables, &config.input.seats)
        .context("reading floor plan")?;
    let (roster, preferences) = read_hierarchy(&config.input.hierarchy)
        .context("reading roster")?
        .build()?;
    info!(
        "Loaded {} tables, {} seats, {} people, {} teams",
        plan.tables().len(),
        plan.seats().len(),
        roster.people().len(),
        roster.teams().len()
    );

    let result = Allocator::new(&plan, &roster, &config).run(&preferences);
    let s = &result.summary;
    info!("=== Allocation summary ===");
    info!("Mode: {}, sequencing: {}", config.allocation.mode, config.sequencing.policy);
    info!("People seated: {}/{}", s.people_seated, s.people_total);
    info!("Seats used: {}/{}", s.seats_used, s.seats_total);
    info!("Leaders seated: {}", s.leaders_seated);
    info!(
        "Teams: {} full, {} partial, {} unseated",
        s.teams_full, s.teams_partial, s.teams_unseated
    );
    info!("Zones: {}", s.zones);
    if !result.is_clean() {
        warn!("{} warnings", result.warnings.len());
    }

    if args.dry_run {
        return Ok(());
    }
    let dir = Some(config.output.dir.as_path());
    let path = export_assignments_csv(&result, dir)?;
    info!("Assignments saved to: {}", path.display());
    if args.report {
        let path = write_report_json(&result, dir)?;
        info!("Report saved to: {}", path.display());
    }
    Ok(())
}
