use crate::allocate::ZoneFallback;
use crate::model::{Gender, Person, PersonId, Role, SeatId, TableId, TeamId, Zone};
use serde::Serialize;
use std::fmt;

/// One seated person
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Assignment {
    pub seat_id: SeatId,
    pub person_id: PersonId,
    pub name: String,
    pub role: Role,
    pub gender: Gender,
    pub department: String,
    pub team_id: TeamId,
    pub table_id: Option<TableId>,
    /// Preference score of the chosen seat (leaders only)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<u32>,
}

impl Assignment {
    pub fn new(seat: SeatId, person: &Person, team: &TeamId, table: Option<TableId>) -> Self {
        Self {
            seat_id: seat,
            person_id: person.id,
            name: person.name.clone(),
            role: person.role,
            gender: person.gender,
            department: person.department.clone(),
            team_id: team.clone(),
            table_id: table,
            score: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SeatingStatus {
    Full,
    Partial,
    Unseated,
}

/// How one team fared
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamOutcome {
    pub team_id: TeamId,
    pub department: String,
    pub tables: Vec<TableId>,
    pub seated: Vec<PersonId>,
    pub unseated: Vec<PersonId>,
}

impl TeamOutcome {
    pub fn status(&self) -> SeatingStatus {
        match (self.seated.is_empty(), self.unseated.is_empty()) {
            (_, true) => SeatingStatus::Full,
            (false, false) => SeatingStatus::Partial,
            (true, false) => SeatingStatus::Unseated,
        }
    }
}

/// Recoverable conditions collected during a run
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "kebab-case")]
pub enum AllocationWarning {
    /// No zone could hold the whole department
    ZoneShortfall {
        department: String,
        required: usize,
        largest_zone: usize,
        fallback: ZoneFallback,
    },
    /// A team did not fit inside its department's zone and went elsewhere
    TeamOutsideZone { team: TeamId, table: TableId },
    /// No single table could hold the team
    TeamShortfall {
        team: TeamId,
        required: usize,
        available: usize,
        unseated: Vec<PersonId>,
    },
    /// The team was spread over several tables
    TeamSplit { team: TeamId, tables: Vec<TableId> },
    LeaderUnseated { person: PersonId },
    EmptyTeam { team: TeamId },
    InvalidTable { table: TableId, reason: String },
    UnknownMember { team: TeamId, person: PersonId },
    DuplicateMember { team: TeamId, person: PersonId },
    UnknownTableRef { seat: SeatId, table: TableId },
    /// Seat position is not a finite point, never offered
    UnlocatedSeat { seat: SeatId },
    /// Not a leader and not on any team
    Unteamed { person: PersonId },
}

impl AllocationWarning {
    /// True for warnings that lift the one-table guarantee for a team
    pub fn breaks_cohesion_of(&self, team_id: &TeamId) -> bool {
        match self {
            Self::TeamShortfall { team, .. } | Self::TeamSplit { team, .. } => team == team_id,
            _ => false,
        }
    }
}

impl fmt::Display for AllocationWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ZoneShortfall {
                department,
                required,
                largest_zone,
                fallback,
            } => write!(
                f,
                "department {department} needs {required} seats but the largest zone has {largest_zone} free ({fallback})"
            ),
            Self::TeamOutsideZone { team, table } => {
                write!(f, "team {team} did not fit its zone, placed on table {table}")
            }
            Self::TeamShortfall {
                team,
                required,
                available,
                unseated,
            } => write!(
                f,
                "team {team} needs {required} seats, best table offers {available}; {} unseated",
                unseated.len()
            ),
            Self::TeamSplit { team, tables } => {
                write!(f, "team {team} split over {} tables", tables.len())
            }
            Self::LeaderUnseated { person } => write!(f, "no free seat left for leader {person}"),
            Self::EmptyTeam { team } => write!(f, "team {team} has no members, skipped"),
            Self::InvalidTable { table, reason } => write!(f, "table {table} skipped: {reason}"),
            Self::UnknownMember { team, person } => {
                write!(f, "team {team} lists unknown person {person}")
            }
            Self::DuplicateMember { team, person } => {
                write!(f, "person {person} already on another team, dropped from {team}")
            }
            Self::UnknownTableRef { seat, table } => {
                write!(f, "seat {seat} references missing table {table}")
            }
            Self::UnlocatedSeat { seat } => write!(f, "seat {seat} skipped: non-finite position"),
            Self::Unteamed { person } => write!(f, "person {person} is not on any team"),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct AllocationSummary {
    pub seats_total: usize,
    pub seats_used: usize,
    pub people_total: usize,
    pub people_seated: usize,
    pub people_unseated: usize,
    pub leaders_seated: usize,
    pub teams_full: usize,
    pub teams_partial: usize,
    pub teams_unseated: usize,
    pub zones: usize,
}

/// Everything one run produces
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AllocationResult {
    /// Sorted by seat id
    pub assignments: Vec<Assignment>,
    pub summary: AllocationSummary,
    pub teams: Vec<TeamOutcome>,
    pub warnings: Vec<AllocationWarning>,
    pub zones: Vec<Zone>,
}

impl AllocationResult {
    pub fn assignment_of(&self, person: PersonId) -> Option<&Assignment> {
        self.assignments.iter().find(|a| a.person_id == person)
    }

    /// Tables used by a team's seated members, in seating order without repeats
    pub fn tables_of(&self, team: &TeamId) -> Vec<TableId> {
        let mut out = Vec::new();
        for a in self.assignments.iter().filter(|a| &a.team_id == team) {
            if let Some(t) = a.table_id
                && !out.contains(&t)
            {
                out.push(t);
            }
        }
        out
    }

    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn outcome(seated: &[u32], unseated: &[u32]) -> TeamOutcome {
        TeamOutcome {
            team_id: TeamId::new("t"),
            department: "Eng".to_string(),
            tables: vec![],
            seated: seated.iter().copied().map(PersonId).collect(),
            unseated: unseated.iter().copied().map(PersonId).collect(),
        }
    }

    #[test]
    fn test_status() {
        assert_eq!(outcome(&[1, 2], &[]).status(), SeatingStatus::Full);
        assert_eq!(outcome(&[1], &[2]).status(), SeatingStatus::Partial);
        assert_eq!(outcome(&[], &[2]).status(), SeatingStatus::Unseated);
        assert_eq!(outcome(&[], &[]).status(), SeatingStatus::Full);
    }

    #[test]
    fn test_cohesion_flag() {
        let team = TeamId::new("t1");
        let shortfall = AllocationWarning::TeamShortfall {
            team: team.clone(),
            required: 7,
            available: 6,
            unseated: vec![PersonId(9)],
        };
        assert!(shortfall.breaks_cohesion_of(&team));
        assert!(!shortfall.breaks_cohesion_of(&TeamId::new("t2")));
        let outside = AllocationWarning::TeamOutsideZone {
            team: team.clone(),
            table: TableId(1),
        };
        assert!(!outside.breaks_cohesion_of(&team));
    }

    #[test]
    fn test_warning_display_and_json() {
        let w = AllocationWarning::TeamShortfall {
            team: TeamId::new("t1"),
            required: 7,
            available: 6,
            unseated: vec![PersonId(9)],
        };
        assert_eq!(
            w.to_string(),
            "team t1 needs 7 seats, best table offers 6; 1 unseated"
        );
        let json = serde_json::to_value(&w).unwrap();
        assert_eq!(json["kind"], "team-shortfall");
        assert_eq!(json["unseated"][0], 9);
    }
}
