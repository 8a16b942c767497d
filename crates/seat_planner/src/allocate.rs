pub mod report;
pub mod scoring;
pub mod state;
pub mod team;
pub mod zone;

pub use report::{
    AllocationResult, AllocationSummary, AllocationWarning, Assignment, SeatingStatus, TeamOutcome,
};
pub use scoring::{ScoreWeights, best_seat, score_seat};
pub use state::FreeState;
pub use team::{TeamPlacement, assign_team};
pub use zone::{select_zone, zone_capacity};

use crate::config::Config;
use crate::constants::LEADER_TEAM_PREFIX;
use crate::geometry::{Sequencer, cluster_tables};
use crate::model::{
    FloorPlan, Person, PersonId, Point, Preferences, Role, Roster, SeatId, Table, TableId, Team,
    TeamId, Zone,
};
use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use strum_macros::{Display, EnumString};

/// How departments are mapped onto the floor
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum AllocationMode {
    /// Cluster tables into zones and give each department one zone
    #[default]
    Zone,
    /// No zones; each department's teams gather around its first table
    ManagerProximity,
}

/// What to do with a team no single table can hold
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum OverflowPolicy {
    /// Fill the roomiest table, leave the rest unseated
    #[default]
    Strict,
    /// Spill over as many tables as it takes
    Split,
}

/// What to do with a department no zone can hold
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum ZoneFallback {
    /// Use every table on the floor
    #[default]
    FullPool,
    /// Leave the department unseated
    Unseated,
}

/// A team with its members resolved against the roster
#[derive(Debug, Clone)]
pub(crate) struct PendingTeam<'a> {
    team: &'a Team,
    members: Vec<&'a Person>,
}

/// Allocation engine entry point.
///
/// Holds only shared references to immutable input; every call to
/// [`Allocator::run`] builds its own free-seat state, so repeated runs with
/// the same input give identical results.
#[derive(Debug, Clone, Copy)]
pub struct Allocator<'a> {
    plan: &'a FloorPlan,
    roster: &'a Roster,
    config: &'a Config,
}

impl<'a> Allocator<'a> {
    pub fn new(plan: &'a FloorPlan, roster: &'a Roster, config: &'a Config) -> Self {
        Self {
            plan,
            roster,
            config,
        }
    }

    pub fn run(&self, preferences: &Preferences) -> AllocationResult {
        let mut run = Run::new(self.plan, self.roster, self.config);
        let teams = run.prepare_teams();

        let zones = match self.config.allocation.mode {
            AllocationMode::Zone => cluster_tables(
                &run.tables,
                self.config.clustering.threshold,
                self.config.clustering.padding,
            ),
            AllocationMode::ManagerProximity => Vec::new(),
        };
        info!(
            "allocating {} people over {} seats, {} tables, {} zones ({} mode)",
            self.roster.people().len(),
            self.plan.seats().len(),
            run.tables.len(),
            zones.len(),
            self.config.allocation.mode
        );

        // 1) leaders
        run.place_leaders(preferences);

        // 2) departments
        for department in self.roster.departments(&self.config.departments.order) {
            let dept_teams: Vec<&PendingTeam> = teams
                .iter()
                .filter(|t| t.team.department == department)
                .collect();
            if dept_teams.is_empty() {
                continue;
            }
            match self.config.allocation.mode {
                AllocationMode::Zone => {
                    run.place_department_in_zone(&department, &dept_teams, &zones)
                }
                AllocationMode::ManagerProximity => {
                    run.place_department_by_proximity(&department, &dept_teams)
                }
            }
        }

        // 3) assembly
        run.finish(zones)
    }
}

/// Convenience wrapper around [`Allocator`]
pub fn allocate(
    plan: &FloorPlan,
    roster: &Roster,
    preferences: &Preferences,
    config: &Config,
) -> AllocationResult {
    Allocator::new(plan, roster, config).run(preferences)
}

/// Mutable state of a single run
pub(crate) struct Run<'a> {
    roster: &'a Roster,
    config: &'a Config,
    free: FreeState<'a>,
    /// Tables that can take people, input order
    tables: Vec<&'a Table>,
    sequencer: Sequencer,
    placed: BTreeSet<PersonId>,
    assignments: Vec<Assignment>,
    outcomes: Vec<TeamOutcome>,
    warnings: Vec<AllocationWarning>,
}

impl<'a> Run<'a> {
    fn new(plan: &'a FloorPlan, roster: &'a Roster, config: &'a Config) -> Self {
        let mut run = Self {
            roster,
            config,
            free: FreeState::new(plan),
            tables: Vec::with_capacity(plan.tables().len()),
            sequencer: config.sequencing,
            placed: BTreeSet::new(),
            assignments: Vec::new(),
            outcomes: Vec::new(),
            warnings: Vec::new(),
        };

        for &(seat, table) in plan.dangling_seats() {
            run.warn(AllocationWarning::UnknownTableRef { seat, table });
        }
        for &seat in plan.unlocated_seats() {
            run.warn(AllocationWarning::UnlocatedSeat { seat });
        }
        for table in plan.tables() {
            match table.defect() {
                Some(reason) => run.warn(AllocationWarning::InvalidTable {
                    table: table.id,
                    reason: reason.to_string(),
                }),
                None => run.tables.push(table),
            }
        }
        run
    }

    fn warn(&mut self, warning: AllocationWarning) {
        warn!("{warning}");
        self.warnings.push(warning);
    }

    /// Resolve team members, dropping unknown and repeated people
    fn prepare_teams(&mut self) -> Vec<PendingTeam<'a>> {
        let roster = self.roster;
        let mut seen: BTreeSet<PersonId> = BTreeSet::new();
        let mut out = Vec::new();

        for team in roster.teams() {
            let mut members = Vec::with_capacity(team.members.len());
            for &id in &team.members {
                let Some(person) = roster.person(id) else {
                    self.warn(AllocationWarning::UnknownMember {
                        team: team.id.clone(),
                        person: id,
                    });
                    continue;
                };
                if !seen.insert(id) {
                    self.warn(AllocationWarning::DuplicateMember {
                        team: team.id.clone(),
                        person: id,
                    });
                    continue;
                }
                members.push(person);
            }
            if members.is_empty() {
                self.warn(AllocationWarning::EmptyTeam {
                    team: team.id.clone(),
                });
                continue;
            }
            out.push(PendingTeam { team, members });
        }

        for person in roster.people() {
            if !person.is_leader() && !seen.contains(&person.id) {
                self.warn(AllocationWarning::Unteamed { person: person.id });
            }
        }
        out
    }

    /// Best-scoring free seat for every leader, in roster order
    fn place_leaders(&mut self, preferences: &Preferences) {
        let roster = self.roster;
        for leader in roster.leaders() {
            let prefs = preferences.get(&leader.id).copied().unwrap_or_default();
            if prefs.near_team {
                debug!("leader {}: near-team preference is not scored", leader.id);
            }

            let best = best_seat(self.free.free_seats(), &prefs, &self.config.scoring);
            let Some((seat, score)) = best else {
                self.warn(AllocationWarning::LeaderUnseated { person: leader.id });
                continue;
            };

            self.free.take_seat(seat.id);
            self.placed.insert(leader.id);
            let team = TeamId::new(format!("{LEADER_TEAM_PREFIX}{}", leader.id));
            let mut assignment = Assignment::new(seat.id, leader, &team, seat.table);
            assignment.score = Some(score);
            debug!("leader {} -> seat {} (score {score})", leader.id, seat.id);
            self.assignments.push(assignment);
        }
    }

    /// Place a department's teams against the whole floor, pulling later teams
    /// towards the table of the first one.
    fn place_department_by_proximity(&mut self, department: &str, teams: &[&PendingTeam<'a>]) {
        let plan = self.free.plan();
        let mut anchor: Option<Point> = None;
        info!("department {department}: {} teams by proximity", teams.len());

        for team in self.largest_first(teams) {
            let pool = self.tables_near(anchor);
            let landed = self.place_team(team, &pool, false);
            if anchor.is_none() {
                anchor = landed
                    .and_then(|id| plan.table(id))
                    .map(|t| t.rect.center());
            }
        }
    }

    /// All tables, nearest to `anchor` first (input order without an anchor or on ties)
    fn tables_near(&self, anchor: Option<Point>) -> Vec<&'a Table> {
        let mut pool = self.tables.clone();
        if let Some(anchor) = anchor {
            pool.sort_by(|a, b| {
                let da = a.rect.center().distance(anchor);
                let db = b.rect.center().distance(anchor);
                da.total_cmp(&db)
            });
        }
        pool
    }

    /// Record every remaining member of `team` as unseated
    fn leave_unseated(&mut self, team: &PendingTeam<'a>) {
        let unseated: Vec<PersonId> = self.pending_members(team).iter().map(|p| p.id).collect();
        if !unseated.is_empty() {
            self.warn(AllocationWarning::TeamShortfall {
                team: team.team.id.clone(),
                required: unseated.len(),
                available: 0,
                unseated: unseated.clone(),
            });
        }
        self.record_team(team, Vec::new(), unseated);
    }

    fn record_team(
        &mut self,
        team: &PendingTeam<'a>,
        placements: Vec<(TableId, Vec<(SeatId, &'a Person)>)>,
        unseated: Vec<PersonId>,
    ) {
        let mut tables = Vec::with_capacity(placements.len());
        let mut seated = Vec::new();
        for (table, seats) in placements {
            tables.push(table);
            for (seat, person) in seats {
                self.placed.insert(person.id);
                seated.push(person.id);
                self.assignments
                    .push(Assignment::new(seat, person, &team.team.id, Some(table)));
            }
        }
        self.outcomes.push(TeamOutcome {
            team_id: team.team.id.clone(),
            department: team.team.department.clone(),
            tables,
            seated,
            unseated,
        });
    }

    fn finish(mut self, zones: Vec<Zone>) -> AllocationResult {
        self.assignments.sort_by_key(|a| a.seat_id);

        let people_total = self.roster.people().len();
        let people_seated = self.assignments.len();
        let count = |status: SeatingStatus| {
            self.outcomes
                .iter()
                .filter(|o| o.status() == status)
                .count()
        };
        let summary = AllocationSummary {
            seats_total: self.free.plan().seats().len(),
            seats_used: self.free.seats_used(),
            people_total,
            people_seated,
            people_unseated: people_total.saturating_sub(people_seated),
            leaders_seated: self
                .assignments
                .iter()
                .filter(|a| a.role == Role::Leader)
                .count(),
            teams_full: count(SeatingStatus::Full),
            teams_partial: count(SeatingStatus::Partial),
            teams_unseated: count(SeatingStatus::Unseated),
            zones: zones.len(),
        };
        info!(
            "seated {}/{} people on {}/{} seats, {} warnings",
            summary.people_seated,
            summary.people_total,
            summary.seats_used,
            summary.seats_total,
            self.warnings.len()
        );

        AllocationResult {
            assignments: self.assignments,
            summary,
            teams: self.outcomes,
            warnings: self.warnings,
            zones,
        }
    }
}
