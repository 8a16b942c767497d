pub mod allocate;
pub mod config;
pub mod constants;
pub mod error;
pub mod export;
pub mod floor_reader;
pub mod generation;
pub mod geometry;
pub mod hierarchy;
pub mod model;

pub use allocate::{
    AllocationMode, AllocationResult, AllocationSummary, AllocationWarning, Allocator, Assignment,
    OverflowPolicy, ZoneFallback, allocate,
};
pub use config::Config;
pub use constants::{DEFAULT_CLUSTER_THRESHOLD, DEFAULT_ROW_TOLERANCE, DEFAULT_ZONE_PADDING};
pub use error::SeatPlanError;
pub use export::{export_assignments_csv, write_report_json};
pub use floor_reader::{read_floor_plan, read_seats, read_tables};
pub use geometry::{SequencePolicy, Sequencer, cluster_tables, sequence_seats};
pub use hierarchy::{HierarchyFile, form_teams, read_hierarchy};
pub use model::{FloorPlan, Person, Preferences, Roster, Seat, Table, Team};
