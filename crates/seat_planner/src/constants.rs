/// Clustering (floor distance units)
pub const DEFAULT_CLUSTER_THRESHOLD: f64 = 350.0; // max center-to-center distance inside a zone
pub const DEFAULT_ZONE_PADDING: f64 = 20.0; // padding around a zone's bounding box

/// Seat sequencing
pub const DEFAULT_ROW_TOLERANCE: f64 = 20.0; // absorbs manual placement noise

/// Preference weights
pub const POSITIONAL_WEIGHT: u32 = 10; // near-window / near-entry / quiet / corner
pub const PREMIUM_WEIGHT: u32 = 5;

/// Team id prefix used for leader seats
pub const LEADER_TEAM_PREFIX: &str = "leader-";

/// Expected headers in CSV files
pub const TABLE_HEADERS: [&str; 6] = ["id", "x", "y", "width", "height", "capacity"];
pub const SEAT_HEADERS: [&str; 10] = [
    "id",
    "x",
    "y",
    "table_id",
    "near_window",
    "near_entry",
    "corner",
    "quiet_zone",
    "accessible",
    "premium",
];
pub const ASSIGNMENT_HEADERS: [&str; 8] = [
    "seat_id",
    "person_id",
    "name",
    "role",
    "gender",
    "department",
    "team_id",
    "table_id",
];

/// Default config path
pub const DEFAULT_CONFIG_PATH: &str = "config/default.toml";
