use crate::error::{Result, SeatPlanError};
use crate::model::{Person, PersonId, PreferenceSet, Preferences, Role, Roster, Team, TeamId};

use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

/// Roster file layout.
///
/// `teams` may be omitted, in which case they are formed from `reports_to`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HierarchyFile {
    pub people: Vec<Person>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub teams: Option<Vec<Team>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub preferences: Vec<PreferenceEntry>,
}

/// Preferences of one person, flattened into a single JSON object
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PreferenceEntry {
    pub person: PersonId,
    #[serde(flatten)]
    pub prefs: PreferenceSet,
}

impl HierarchyFile {
    /// Build the roster and preference map for a run
    pub fn build(self) -> Result<(Roster, Preferences)> {
        let teams = match self.teams {
            Some(teams) => teams,
            None => {
                let formed = form_teams(&self.people);
                info!("formed {} teams from reporting lines", formed.len());
                formed
            }
        };
        let roster = Roster::new(self.people, teams)?;

        let mut preferences: Preferences = BTreeMap::new();
        for entry in self.preferences {
            if roster.person(entry.person).is_none() {
                return Err(SeatPlanError::RosterError {
                    message: format!("preferences given for unknown person {}", entry.person),
                });
            }
            if preferences.insert(entry.person, entry.prefs).is_some() {
                return Err(SeatPlanError::RosterError {
                    message: format!("preferences given twice for person {}", entry.person),
                });
            }
        }
        Ok((roster, preferences))
    }
}

/// Group every manager and sub-manager with the employees reporting directly
/// to them.
///
/// Team ids are `team-<manager id>`, members list the manager first and then
/// the reports in roster order. Employees reporting straight to a leader form
/// a team without the leader, who sits on a leader seat. People whose manager
/// is missing end up on no team.
pub fn form_teams(people: &[Person]) -> Vec<Team> {
    let by_id: BTreeMap<PersonId, &Person> = people.iter().map(|p| (p.id, p)).collect();
    let mut reports: BTreeMap<PersonId, Vec<PersonId>> = BTreeMap::new();
    for p in people.iter().filter(|p| p.role == Role::Employee) {
        if let Some(boss) = p.reports_to
            && by_id.contains_key(&boss)
        {
            reports.entry(boss).or_default().push(p.id);
        } else {
            debug!("employee {} has no known manager", p.id);
        }
    }

    let mut teams = Vec::new();
    for p in people {
        let direct = reports.remove(&p.id).unwrap_or_default();
        let members: Vec<PersonId> = match p.role {
            Role::Manager | Role::SubManager => std::iter::once(p.id).chain(direct).collect(),
            Role::Leader if !direct.is_empty() => direct,
            Role::Leader | Role::Employee => continue,
        };
        teams.push(Team {
            id: TeamId::new(format!("team-{}", p.id)),
            department: p.department.clone(),
            members,
        });
    }
    teams
}

pub fn read_hierarchy_from_reader<R: Read>(reader: R) -> Result<HierarchyFile> {
    Ok(serde_json::from_reader(reader)?)
}

pub fn read_hierarchy<P: AsRef<Path>>(path: P) -> Result<HierarchyFile> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| SeatPlanError::ReadFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    read_hierarchy_from_reader(BufReader::new(file))
}

pub fn write_hierarchy<P: AsRef<Path>>(path: P, hierarchy: &HierarchyFile) -> Result<()> {
    let path = path.as_ref();
    let file = File::create(path).map_err(|e| SeatPlanError::CreateFile {
        path: path.to_path_buf(),
        source: e,
    })?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, hierarchy)?;
    writer.flush()?;
    Ok(())
}
