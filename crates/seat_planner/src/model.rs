pub mod floor;
pub mod people;

pub use floor::{FloorPlan, Point, Rect, Seat, SeatAttributes, SeatId, Table, TableId, Zone, ZoneId};
pub use people::{Gender, Person, PersonId, PreferenceSet, Preferences, Role, Roster, Team, TeamId};
