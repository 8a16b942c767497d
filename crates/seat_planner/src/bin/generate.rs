use anyhow::{Context, Result};
use clap::Parser;
use log::info;
use std::path::PathBuf;

use seat_planner::floor_reader::{write_seats, write_tables};
use seat_planner::generation::{DEFAULT_SEED, FloorLayout, RosterLayout, generate_roster, grid_floor};
use seat_planner::hierarchy::write_hierarchy;

#[derive(Parser)]
#[command(author, version, about = "Write a seeded demo roster and grid floor", long_about = None)]
struct Args {
    /// Output directory for tables.csv, seats.csv and hierarchy.json
    #[arg(short = 'o', long = "output", default_value = "data")]
    output: PathBuf,

    /// RNG seed
    #[arg(long, default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Comma separated department names
    #[arg(short = 'd', long, value_delimiter = ',')]
    departments: Vec<String>,

    /// Managers per department
    #[arg(long, default_value_t = 2)]
    managers: u32,

    /// Table blocks along x and y
    #[arg(long, default_value_t = 2)]
    blocks: u32,

    /// Seats along each side of a table
    #[arg(long, default_value_t = 3)]
    seats_per_side: u32,
}

fn main() -> Result<()> {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .try_init();
    let args = Args::parse();

    let mut roster = RosterLayout {
        managers_per_department: args.managers,
        ..Default::default()
    };
    if !args.departments.is_empty() {
        roster.departments = args.departments.clone();
    }
    let floor = FloorLayout {
        blocks_x: args.blocks,
        blocks_y: args.blocks,
        seats_per_side: args.seats_per_side,
        ..Default::default()
    };

    std::fs::create_dir_all(&args.output)
        .with_context(|| format!("creating {}", args.output.display()))?;

    let (tables, seats) = grid_floor(&floor);
    write_tables(args.output.join("tables.csv"), &tables)?;
    write_seats(args.output.join("seats.csv"), &seats)?;
    info!("Floor: {} tables, {} seats", tables.len(), seats.len());

    let hierarchy = generate_roster(&roster, args.seed);
    write_hierarchy(args.output.join("hierarchy.json"), &hierarchy)?;
    info!(
        "Roster: {} people in {} departments (seed {})",
        hierarchy.people.len(),
        roster.departments.len(),
        args.seed
    );
    info!("Demo data written to: {}", args.output.display());
    Ok(())
}
