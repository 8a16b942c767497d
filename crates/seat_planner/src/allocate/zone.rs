use super::{PendingTeam, Run, ZoneFallback, report::AllocationWarning, state::FreeState};
use crate::model::{Table, Zone};
use log::info;

/// Free room over the zone's unconsumed tables
pub fn zone_capacity(zone: &Zone, free: &FreeState) -> usize {
    let plan = free.plan();
    zone.tables
        .iter()
        .filter_map(|&id| plan.table(id))
        .map(|t| free.usable(t))
        .sum()
}

/// First zone, in zone order, that can hold `required` people
pub fn select_zone<'z>(zones: &'z [Zone], required: usize, free: &FreeState) -> Option<&'z Zone> {
    zones.iter().find(|z| zone_capacity(z, free) >= required)
}

impl<'a> Run<'a> {
    /// Teams of one department, largest first (ties keep roster order)
    pub(super) fn largest_first<'t>(&self, teams: &[&'t PendingTeam<'a>]) -> Vec<&'t PendingTeam<'a>> {
        let mut sized: Vec<(usize, &'t PendingTeam<'a>)> = teams
            .iter()
            .map(|&t| (self.pending_members(t).len(), t))
            .collect();
        sized.sort_by(|a, b| b.0.cmp(&a.0));
        sized.into_iter().map(|(_, t)| t).collect()
    }

    /// Put a whole department into one zone that can hold it.
    pub(super) fn place_department_in_zone(
        &mut self,
        department: &str,
        teams: &[&PendingTeam<'a>],
        zones: &[Zone],
    ) {
        let ordered = self.largest_first(teams);
        let required: usize = ordered.iter().map(|t| self.pending_members(t).len()).sum();
        let plan = self.free.plan();

        if let Some(zone) = select_zone(zones, required, &self.free) {
            info!(
                "department {department}: {required} people -> zone {} ({} free)",
                zone.id,
                zone_capacity(zone, &self.free)
            );
            let pool: Vec<&'a Table> = zone.tables.iter().filter_map(|&id| plan.table(id)).collect();
            for team in ordered {
                self.place_team(team, &pool, true);
            }
            return;
        }

        let fallback = self.config.allocation.zone_fallback;
        let largest_zone = zones
            .iter()
            .map(|z| zone_capacity(z, &self.free))
            .max()
            .unwrap_or(0);
        self.warn(AllocationWarning::ZoneShortfall {
            department: department.to_string(),
            required,
            largest_zone,
            fallback,
        });

        match fallback {
            ZoneFallback::FullPool => {
                let pool = self.tables.clone();
                for team in ordered {
                    self.place_team(team, &pool, false);
                }
            }
            ZoneFallback::Unseated => {
                for team in ordered {
                    self.leave_unseated(team);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::cluster_tables;
    use crate::model::{FloorPlan, Rect, Seat, SeatId, TableId, ZoneId};

    /// Zone 0: one table with 8 seats. Zone 1: three tables with 5 seats each.
    fn plan() -> FloorPlan {
        let mut tables = vec![Table::new(1, Rect::new(0.0, 0.0, 200.0, 80.0), 8)];
        for i in 0..3u32 {
            tables.push(Table::new(
                2 + i,
                Rect::new(2000.0 + i as f64 * 250.0, 0.0, 200.0, 80.0),
                5,
            ));
        }
        let mut seats = Vec::new();
        let mut next = 1;
        for t in &tables {
            for k in 0..t.capacity {
                seats.push(Seat::new(
                    next,
                    t.rect.x + (k % 4) as f64 * 50.0,
                    (k / 4) as f64 * 40.0,
                    Some(t.id.0),
                ));
                next += 1;
            }
        }
        FloorPlan::new(seats, tables).unwrap()
    }

    #[test]
    fn test_zone_capacity() {
        let plan = plan();
        let mut free = FreeState::new(&plan);
        let zones = cluster_tables(plan.tables(), 350.0, 20.0);
        assert_eq!(zones.len(), 2);
        assert_eq!(zone_capacity(&zones[0], &free), 8);
        assert_eq!(zone_capacity(&zones[1], &free), 15);

        free.consume_table(TableId(3));
        assert_eq!(zone_capacity(&zones[1], &free), 10);
        free.take_seat(SeatId(1));
        assert_eq!(zone_capacity(&zones[0], &free), 7);
    }

    #[test]
    fn test_department_of_twelve_goes_to_the_bigger_zone() {
        let plan = plan();
        let free = FreeState::new(&plan);
        let zones = cluster_tables(plan.tables(), 350.0, 20.0);
        assert_eq!(select_zone(&zones, 12, &free).unwrap().id, ZoneId(1));
        assert_eq!(select_zone(&zones, 8, &free).unwrap().id, ZoneId(0));
        assert!(select_zone(&zones, 16, &free).is_none());
    }

    #[test]
    fn test_selected_zone_always_has_room() {
        let plan = plan();
        let mut free = FreeState::new(&plan);
        let zones = cluster_tables(plan.tables(), 350.0, 20.0);
        free.consume_table(TableId(2));
        for required in 0..=20 {
            if let Some(zone) = select_zone(&zones, required, &free) {
                assert!(zone_capacity(zone, &free) >= required);
            }
        }
    }
}
