use super::{PendingTeam, Run, report::AllocationWarning, state::FreeState};
use crate::allocate::OverflowPolicy;
use crate::geometry::Sequencer;
use crate::model::{Person, PersonId, SeatId, Table, TableId};
use log::debug;
use std::cmp::Reverse;

/// Result of trying to put a whole team on one table
#[derive(Debug, Clone, PartialEq)]
pub enum TeamPlacement<'p> {
    Placed {
        table: TableId,
        seats: Vec<(SeatId, &'p Person)>,
    },
    NoFit {
        required: usize,
        best_available: usize,
    },
}

/// Special-needs members first, everyone else keeps roster order
pub fn order_members<'p, I>(members: I) -> Vec<&'p Person>
where
    I: IntoIterator<Item = &'p Person>,
{
    let (mut first, rest): (Vec<_>, Vec<_>) = members.into_iter().partition(|p| p.special_needs);
    first.extend(rest);
    first
}

/// First table in pool order that can take `required` people
pub fn first_fit<'t>(required: usize, pool: &[&'t Table], free: &FreeState) -> Option<&'t Table> {
    pool.iter().copied().find(|t| free.usable(t) >= required)
}

/// Table with the most room left, earliest in pool order on ties
pub fn roomiest<'t>(pool: &[&'t Table], free: &FreeState) -> Option<(&'t Table, usize)> {
    pool.iter()
        .map(|&t| (t, free.usable(t)))
        .filter(|&(_, room)| room > 0)
        .min_by_key(|&(_, room)| Reverse(room))
}

/// Seat `members` on `table` in sequencer order, as many as fit, and mark the
/// table consumed.
pub fn fill_table<'p>(
    table: &Table,
    members: &[&'p Person],
    free: &mut FreeState,
    sequencer: &Sequencer,
) -> Vec<(SeatId, &'p Person)> {
    let room = free.usable(table);
    let order = sequencer.order(&free.free_seats_on(table.id));
    let seats: Vec<(SeatId, &'p Person)> = order
        .into_iter()
        .zip(members.iter().copied())
        .take(room)
        .map(|(seat, person)| (seat.id, person))
        .collect();
    for (seat, _) in &seats {
        free.take_seat(*seat);
    }
    free.consume_table(table.id);
    seats
}

/// Put already ordered `members` on the first table of `pool` with enough room.
pub fn assign_team<'p>(
    members: &[&'p Person],
    pool: &[&Table],
    free: &mut FreeState,
    sequencer: &Sequencer,
) -> TeamPlacement<'p> {
    match first_fit(members.len(), pool, free) {
        Some(table) => TeamPlacement::Placed {
            table: table.id,
            seats: fill_table(table, members, free, sequencer),
        },
        None => TeamPlacement::NoFit {
            required: members.len(),
            best_available: roomiest(pool, free).map_or(0, |(_, room)| room),
        },
    }
}

impl<'a> Run<'a> {
    /// Members of `team` still waiting for a seat, special-needs first
    pub(super) fn pending_members(&self, team: &PendingTeam<'a>) -> Vec<&'a Person> {
        order_members(
            team.members
                .iter()
                .copied()
                .filter(|p| !self.placed.contains(&p.id)),
        )
    }

    /// Place one team. `restricted` marks a pool narrowed to a zone, which is
    /// widened to the whole floor before giving up on a single table.
    ///
    /// Returns the first table the team landed on.
    pub(super) fn place_team(
        &mut self,
        team: &PendingTeam<'a>,
        pool: &[&'a Table],
        restricted: bool,
    ) -> Option<TableId> {
        let members = self.pending_members(team);
        if members.is_empty() {
            self.record_team(team, Vec::new(), Vec::new());
            return None;
        }

        let mut placement = assign_team(&members, pool, &mut self.free, &self.sequencer);
        if restricted && matches!(placement, TeamPlacement::NoFit { .. }) {
            let everywhere = self.tables.clone();
            placement = assign_team(&members, &everywhere, &mut self.free, &self.sequencer);
            if let TeamPlacement::Placed { table, .. } = &placement {
                self.warn(AllocationWarning::TeamOutsideZone {
                    team: team.team.id.clone(),
                    table: *table,
                });
            }
        }

        match placement {
            TeamPlacement::Placed { table, seats } => {
                debug!(
                    "team {} -> table {} ({} seats)",
                    team.team.id,
                    table,
                    seats.len()
                );
                self.record_team(team, vec![(table, seats)], Vec::new());
                Some(table)
            }
            TeamPlacement::NoFit {
                required,
                best_available,
            } => self.place_overflow(team, &members, required, best_available),
        }
    }

    /// No single table fits: seat what the overflow policy allows, report the rest
    fn place_overflow(
        &mut self,
        team: &PendingTeam<'a>,
        members: &[&'a Person],
        required: usize,
        best_available: usize,
    ) -> Option<TableId> {
        let everywhere = self.tables.clone();
        let mut placements = Vec::new();
        let mut rest = members;

        while !rest.is_empty() {
            let Some((table, _)) = roomiest(&everywhere, &self.free) else {
                break;
            };
            let seats = fill_table(table, rest, &mut self.free, &self.sequencer);
            rest = &rest[seats.len()..];
            placements.push((table.id, seats));
            if self.config.allocation.overflow == OverflowPolicy::Strict {
                break;
            }
        }

        let unseated: Vec<PersonId> = rest.iter().map(|p| p.id).collect();
        let first = placements.first().map(|(t, _)| *t);
        if placements.len() > 1 {
            self.warn(AllocationWarning::TeamSplit {
                team: team.team.id.clone(),
                tables: placements.iter().map(|(t, _)| *t).collect(),
            });
        }
        if !unseated.is_empty() {
            self.warn(AllocationWarning::TeamShortfall {
                team: team.team.id.clone(),
                required,
                available: best_available,
                unseated: unseated.clone(),
            });
        }
        self.record_team(team, placements, unseated);
        first
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::SequencePolicy;
    use crate::model::{FloorPlan, Rect, Role, Seat};

    fn person(id: u32, special_needs: bool) -> Person {
        let mut p = Person::new(id, &format!("p{id}"), "Eng", Role::Employee);
        p.special_needs = special_needs;
        p
    }

    /// Table 1: 4 seats in one row. Table 2: two rows of 4.
    fn plan() -> FloorPlan {
        let tables = vec![
            Table::new(1, Rect::new(0.0, 0.0, 200.0, 40.0), 4),
            Table::new(2, Rect::new(0.0, 200.0, 200.0, 80.0), 8),
        ];
        let mut seats = Vec::new();
        for i in 0..4u32 {
            let x = i as f64 * 50.0;
            seats.push(Seat::new(10 + i, x, 0.0, Some(1)));
            seats.push(Seat::new(20 + i, x, 200.0, Some(2)));
            seats.push(Seat::new(30 + i, x, 240.0, Some(2)));
        }
        FloorPlan::new(seats, tables).unwrap()
    }

    fn pool(plan: &FloorPlan) -> Vec<&Table> {
        plan.tables().iter().collect()
    }

    #[test]
    fn test_order_members_special_needs_first() {
        let people = [person(1, false), person(2, true), person(3, false), person(4, true)];
        let ids: Vec<u32> = order_members(people.iter()).iter().map(|p| p.id.0).collect();
        assert_eq!(ids, vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_first_fit_skips_small_tables() {
        let plan = plan();
        let free = FreeState::new(&plan);
        let pool = pool(&plan);
        assert_eq!(first_fit(3, &pool, &free).unwrap().id, TableId(1));
        assert_eq!(first_fit(5, &pool, &free).unwrap().id, TableId(2));
        assert!(first_fit(9, &pool, &free).is_none());
    }

    #[test]
    fn test_serpentine_team_of_five() {
        let plan = plan();
        let mut free = FreeState::new(&plan);
        let people: Vec<Person> = (1..=5).map(|i| person(i, false)).collect();
        let members: Vec<&Person> = people.iter().collect();
        let sequencer = Sequencer::new(SequencePolicy::Serpentine, 20.0);

        let placement = assign_team(&members, &pool(&plan), &mut free, &sequencer);
        let TeamPlacement::Placed { table, seats } = placement else {
            panic!("team should fit on table 2");
        };
        assert_eq!(table, TableId(2));
        let got: Vec<(u32, u32)> = seats.iter().map(|(s, p)| (s.0, p.id.0)).collect();
        // row A left to right, then the right end of row B
        assert_eq!(got, vec![(20, 1), (21, 2), (22, 3), (23, 4), (33, 5)]);
        assert!(free.is_consumed(TableId(2)));
        assert!(!free.is_free(SeatId(33)));
        assert!(free.is_free(SeatId(32)));
    }

    #[test]
    fn test_consumed_table_is_not_reused() {
        let plan = plan();
        let mut free = FreeState::new(&plan);
        let people: Vec<Person> = (1..=2).map(|i| person(i, false)).collect();
        let members: Vec<&Person> = people.iter().collect();
        let sequencer = Sequencer::default();
        let pool = pool(&plan);

        let first = assign_team(&members, &pool, &mut free, &sequencer);
        assert!(matches!(first, TeamPlacement::Placed { table: TableId(1), .. }));
        // table 1 still has two free seats but is consumed
        let second = assign_team(&members, &pool, &mut free, &sequencer);
        assert!(matches!(second, TeamPlacement::Placed { table: TableId(2), .. }));
        let third = assign_team(&members, &pool, &mut free, &sequencer);
        assert_eq!(
            third,
            TeamPlacement::NoFit {
                required: 2,
                best_available: 0
            }
        );
    }

    #[test]
    fn test_no_fit_reports_best_available() {
        let plan = plan();
        let mut free = FreeState::new(&plan);
        let people: Vec<Person> = (1..=9).map(|i| person(i, false)).collect();
        let members: Vec<&Person> = people.iter().collect();
        let placement = assign_team(&members, &pool(&plan), &mut free, &Sequencer::default());
        assert_eq!(
            placement,
            TeamPlacement::NoFit {
                required: 9,
                best_available: 8
            }
        );
        assert_eq!(free.seats_used(), 0);
    }

    #[test]
    fn test_roomiest_prefers_earlier_table_on_ties() {
        let tables = vec![
            Table::new(1, Rect::new(0.0, 0.0, 10.0, 10.0), 2),
            Table::new(2, Rect::new(50.0, 0.0, 10.0, 10.0), 2),
        ];
        let seats = vec![
            Seat::new(1, 0.0, 0.0, Some(1)),
            Seat::new(2, 5.0, 0.0, Some(1)),
            Seat::new(3, 50.0, 0.0, Some(2)),
            Seat::new(4, 55.0, 0.0, Some(2)),
        ];
        let plan = FloorPlan::new(seats, tables).unwrap();
        let free = FreeState::new(&plan);
        let pool: Vec<&Table> = plan.tables().iter().collect();
        let (table, room) = roomiest(&pool, &free).unwrap();
        assert_eq!((table.id, room), (TableId(1), 2));
    }
}
