use crate::model::{FloorPlan, Seat, SeatId, Table, TableId};
use std::collections::BTreeSet;

/// Free seats and consumed tables for one run.
///
/// Built fresh from the immutable floor plan at the start of every run and
/// threaded through each phase by the orchestrator.
#[derive(Debug, Clone)]
pub struct FreeState<'a> {
    plan: &'a FloorPlan,
    free_seats: BTreeSet<SeatId>,
    consumed_tables: BTreeSet<TableId>,
}

impl<'a> FreeState<'a> {
    pub fn new(plan: &'a FloorPlan) -> Self {
        Self {
            plan,
            free_seats: plan.seats().iter().map(|s| s.id).collect(),
            consumed_tables: BTreeSet::new(),
        }
    }

    pub fn plan(&self) -> &'a FloorPlan {
        self.plan
    }

    pub fn is_free(&self, seat: SeatId) -> bool {
        self.free_seats.contains(&seat)
    }

    /// Returns false if the seat was already taken
    pub fn take_seat(&mut self, seat: SeatId) -> bool {
        self.free_seats.remove(&seat)
    }

    /// All free seats, ascending id
    pub fn free_seats(&self) -> impl Iterator<Item = &'a Seat> + '_ {
        let plan = self.plan;
        self.free_seats.iter().filter_map(move |&id| plan.seat(id))
    }

    /// Free seats on one table, ascending id
    pub fn free_seats_on(&self, table: TableId) -> Vec<&'a Seat> {
        let plan = self.plan;
        plan.seats_on(table)
            .iter()
            .filter(|&&id| self.free_seats.contains(&id))
            .filter_map(|&id| plan.seat(id))
            .collect()
    }

    /// How many more people the table can take: free seats, capped by the
    /// capacity left after seats already taken on it. Zero once consumed.
    pub fn usable(&self, table: &Table) -> usize {
        if self.is_consumed(table.id) {
            return 0;
        }
        let seats = self.plan.seats_on(table.id);
        let free = seats.iter().filter(|&&id| self.free_seats.contains(&id)).count();
        let taken = seats.len() - free;
        free.min((table.capacity as usize).saturating_sub(taken))
    }

    pub fn is_consumed(&self, table: TableId) -> bool {
        self.consumed_tables.contains(&table)
    }

    pub fn consume_table(&mut self, table: TableId) {
        self.consumed_tables.insert(table);
    }

    pub fn seats_used(&self) -> usize {
        self.plan.seats().len() - self.free_seats.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Rect;

    fn plan() -> FloorPlan {
        let tables = vec![
            Table::new(1, Rect::new(0.0, 0.0, 200.0, 80.0), 3),
            Table::new(2, Rect::new(400.0, 0.0, 200.0, 80.0), 10),
        ];
        let seats = vec![
            Seat::new(1, 0.0, 0.0, Some(1)),
            Seat::new(2, 50.0, 0.0, Some(1)),
            Seat::new(3, 100.0, 0.0, Some(1)),
            Seat::new(4, 150.0, 0.0, Some(1)),
            Seat::new(5, 400.0, 0.0, Some(2)),
            Seat::new(6, 900.0, 900.0, None),
        ];
        FloorPlan::new(seats, tables).unwrap()
    }

    #[test]
    fn test_usable_is_capped_by_capacity() {
        let plan = plan();
        let mut state = FreeState::new(&plan);
        let t1 = plan.table(TableId(1)).unwrap().clone();
        let t2 = plan.table(TableId(2)).unwrap().clone();
        assert_eq!(state.usable(&t1), 3);
        assert_eq!(state.usable(&t2), 1);

        // a leader taking a seat on t1 also uses up capacity
        assert!(state.take_seat(SeatId(2)));
        assert_eq!(state.usable(&t1), 2);
        assert_eq!(state.free_seats_on(TableId(1)).len(), 3);
    }

    #[test]
    fn test_take_seat_twice() {
        let plan = plan();
        let mut state = FreeState::new(&plan);
        assert!(state.take_seat(SeatId(6)));
        assert!(!state.take_seat(SeatId(6)));
        assert!(!state.is_free(SeatId(6)));
        assert_eq!(state.seats_used(), 1);
        assert_eq!(state.free_seats().count(), 5);
    }

    #[test]
    fn test_consumed_table_has_no_capacity() {
        let plan = plan();
        let mut state = FreeState::new(&plan);
        let t2 = plan.table(TableId(2)).unwrap().clone();
        state.consume_table(TableId(2));
        assert!(state.is_consumed(TableId(2)));
        assert_eq!(state.usable(&t2), 0);
    }

    #[test]
    fn test_free_seats_in_id_order() {
        let plan = plan();
        let mut state = FreeState::new(&plan);
        state.take_seat(SeatId(1));
        let ids: Vec<u32> = state.free_seats().map(|s| s.id.0).collect();
        assert_eq!(ids, vec![2, 3, 4, 5, 6]);
    }
}
