use crate::error::{Result, SeatPlanError};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Seat identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SeatId(pub u32);

/// Table identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TableId(pub u32);

/// Zone (pod) identifier, assigned in clustering order
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ZoneId(pub u32);

impl fmt::Display for SeatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for TableId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for ZoneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// 2D floor coordinate (x grows right, y grows towards the back)
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    pub fn distance(&self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }

    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }
}

/// Axis-aligned rectangle, (x, y) is the top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.x + self.width * 0.5, self.y + self.height * 0.5)
    }

    pub fn right(&self) -> f64 {
        self.x + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.y + self.height
    }

    /// Smallest rectangle covering both
    pub fn union(self, other: Rect) -> Rect {
        let x = self.x.min(other.x);
        let y = self.y.min(other.y);
        Rect::new(
            x,
            y,
            self.right().max(other.right()) - x,
            self.bottom().max(other.bottom()) - y,
        )
    }

    /// Grow by `pad` on every side
    pub fn expand(self, pad: f64) -> Rect {
        Rect::new(
            self.x - pad,
            self.y - pad,
            self.width + 2.0 * pad,
            self.height + 2.0 * pad,
        )
    }

    pub fn is_finite(&self) -> bool {
        [self.x, self.y, self.width, self.height]
            .iter()
            .all(|v| v.is_finite())
    }
}

/// Steward-assigned tags on a physical seat
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SeatAttributes {
    pub near_window: bool,
    pub near_entry: bool,
    pub corner: bool,
    pub quiet_zone: bool,
    pub accessible: bool,
    pub premium: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub id: SeatId,
    pub position: Point,
    #[serde(default)]
    pub attributes: SeatAttributes,
    /// Resolved by the geometry-mapping step upstream
    #[serde(default)]
    pub table: Option<TableId>,
}

impl Seat {
    pub fn new(id: u32, x: f64, y: f64, table: Option<u32>) -> Self {
        Self {
            id: SeatId(id),
            position: Point::new(x, y),
            attributes: SeatAttributes::default(),
            table: table.map(TableId),
        }
    }

    pub fn with_attributes(mut self, attributes: SeatAttributes) -> Self {
        self.attributes = attributes;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Table {
    pub id: TableId,
    pub rect: Rect,
    pub capacity: u32,
}

impl Table {
    pub fn new(id: u32, rect: Rect, capacity: u32) -> Self {
        Self {
            id: TableId(id),
            rect,
            capacity,
        }
    }

    /// Reason the table cannot take anyone, if any
    pub fn defect(&self) -> Option<&'static str> {
        if self.capacity == 0 {
            Some("capacity is zero")
        } else if !self.rect.is_finite() {
            Some("non-finite geometry")
        } else if !(self.rect.width > 0.0 && self.rect.height > 0.0) {
            Some("non-positive size")
        } else {
            None
        }
    }
}

/// Spatial cluster of tables treated as one allocation unit
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Zone {
    pub id: ZoneId,
    pub tables: Vec<TableId>,
    pub bounds: Rect,
}

/// Immutable seat/table geometry for one floor
///
/// Seats are kept sorted by id; tables keep their input order, which is the
/// fixed scan order used by every first-fit step.
#[derive(Debug, Clone, Default)]
pub struct FloorPlan {
    seats: Vec<Seat>,
    tables: Vec<Table>,
    seat_index: BTreeMap<SeatId, usize>,
    table_index: BTreeMap<TableId, usize>,
    seats_by_table: BTreeMap<TableId, Vec<SeatId>>,
    /// Seats whose table reference did not resolve (seat, missing table)
    dangling: Vec<(SeatId, TableId)>,
    /// Seats left out because their position is not a finite point
    unlocated: Vec<SeatId>,
}

impl FloorPlan {
    pub fn new(mut seats: Vec<Seat>, tables: Vec<Table>) -> Result<Self> {
        let mut table_index = BTreeMap::new();
        for (i, table) in tables.iter().enumerate() {
            if table_index.insert(table.id, i).is_some() {
                return Err(SeatPlanError::DuplicateId {
                    kind: "table",
                    id: table.id.0,
                });
            }
        }

        seats.sort_by_key(|s| s.id);
        if let Some(pair) = seats.windows(2).find(|w| w[0].id == w[1].id) {
            return Err(SeatPlanError::DuplicateId {
                kind: "seat",
                id: pair[0].id.0,
            });
        }
        let (mut seats, unlocated): (Vec<Seat>, Vec<Seat>) =
            seats.into_iter().partition(|s| s.position.is_finite());
        let unlocated = unlocated.into_iter().map(|s| s.id).collect();

        let mut seat_index = BTreeMap::new();
        let mut seats_by_table: BTreeMap<TableId, Vec<SeatId>> = BTreeMap::new();
        let mut dangling = Vec::new();
        for (i, seat) in seats.iter_mut().enumerate() {
            seat_index.insert(seat.id, i);
            if let Some(table) = seat.table {
                if table_index.contains_key(&table) {
                    seats_by_table.entry(table).or_default().push(seat.id);
                } else {
                    dangling.push((seat.id, table));
                    seat.table = None;
                }
            }
        }

        Ok(Self {
            seats,
            tables,
            seat_index,
            table_index,
            seats_by_table,
            dangling,
            unlocated,
        })
    }

    pub fn seats(&self) -> &[Seat] {
        &self.seats
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn seat(&self, id: SeatId) -> Option<&Seat> {
        self.seat_index.get(&id).map(|&i| &self.seats[i])
    }

    pub fn table(&self, id: TableId) -> Option<&Table> {
        self.table_index.get(&id).map(|&i| &self.tables[i])
    }

    /// Seat ids on a table, ascending
    pub fn seats_on(&self, table: TableId) -> &[SeatId] {
        self.seats_by_table
            .get(&table)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    pub fn dangling_seats(&self) -> &[(SeatId, TableId)] {
        &self.dangling
    }

    pub fn unlocated_seats(&self) -> &[SeatId] {
        &self.unlocated
    }
}
