use crate::error::{Result, SeatPlanError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use strum_macros::{Display, EnumString};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PersonId(pub u32);

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TeamId(pub String);

impl TeamId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl fmt::Display for TeamId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Role {
    Leader,
    Manager,
    SubManager,
    Employee,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Gender {
    Female,
    Male,
    #[default]
    Unspecified,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Person {
    pub id: PersonId,
    pub name: String,
    #[serde(default)]
    pub gender: Gender,
    pub department: String,
    pub role: Role,
    #[serde(default)]
    pub special_needs: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reports_to: Option<PersonId>,
}

impl Person {
    pub fn new(id: u32, name: &str, department: &str, role: Role) -> Self {
        Self {
            id: PersonId(id),
            name: name.to_string(),
            gender: Gender::Unspecified,
            department: department.to_string(),
            role,
            special_needs: false,
            reports_to: None,
        }
    }

    pub fn reporting_to(mut self, manager: u32) -> Self {
        self.reports_to = Some(PersonId(manager));
        self
    }

    pub fn is_leader(&self) -> bool {
        self.role == Role::Leader
    }
}

/// Soft seating wishes; an unset flag never penalizes a seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PreferenceSet {
    pub near_window: bool,
    pub near_entry: bool,
    pub quiet_zone: bool,
    pub corner: bool,
    pub near_team: bool,
    pub premium: bool,
}

impl PreferenceSet {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }
}

/// Caller-owned preferences, passed into each run
pub type Preferences = BTreeMap<PersonId, PreferenceSet>;

/// A manager or sub-manager with their direct reports
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Team {
    pub id: TeamId,
    pub department: String,
    pub members: Vec<PersonId>,
}

impl Team {
    pub fn new(id: &str, department: &str, members: &[u32]) -> Self {
        Self {
            id: TeamId::new(id),
            department: department.to_string(),
            members: members.iter().copied().map(PersonId).collect(),
        }
    }
}

/// People and teams for one allocation run
#[derive(Debug, Clone, Default)]
pub struct Roster {
    people: Vec<Person>,
    teams: Vec<Team>,
    index: BTreeMap<PersonId, usize>,
}

impl Roster {
    pub fn new(people: Vec<Person>, teams: Vec<Team>) -> Result<Self> {
        let mut index = BTreeMap::new();
        for (i, person) in people.iter().enumerate() {
            if index.insert(person.id, i).is_some() {
                return Err(SeatPlanError::DuplicateId {
                    kind: "person",
                    id: person.id.0,
                });
            }
        }
        Ok(Self {
            people,
            teams,
            index,
        })
    }

    pub fn people(&self) -> &[Person] {
        &self.people
    }

    pub fn teams(&self) -> &[Team] {
        &self.teams
    }

    pub fn person(&self, id: PersonId) -> Option<&Person> {
        self.index.get(&id).map(|&i| &self.people[i])
    }

    /// Leaders in roster order
    pub fn leaders(&self) -> impl Iterator<Item = &Person> {
        self.people.iter().filter(|p| p.is_leader())
    }

    /// Departments in `preferred` order first, then by first appearance among teams
    pub fn departments(&self, preferred: &[String]) -> Vec<String> {
        let mut out: Vec<String> = Vec::new();
        let seen = preferred
            .iter()
            .chain(self.teams.iter().map(|t| &t.department));
        for dept in seen {
            if !out.contains(dept) {
                out.push(dept.clone());
            }
        }
        out
    }
}
