//! Seeded demo data: an organisation roster and a grid floor.
//!
//! Same seed, same output on every platform (`ChaCha8Rng`).

use crate::hierarchy::{HierarchyFile, PreferenceEntry};
use crate::model::{
    Gender, Person, PersonId, PreferenceSet, Rect, Role, Seat, SeatAttributes, Table,
};

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub const DEFAULT_SEED: u64 = 42;

const FIRST_NAMES_F: &[&str] = &[
    "Mary", "Aiko", "Sofia", "Emma", "Hana", "Olivia", "Yuki", "Grace", "Lucia", "Chloe", "Mei",
    "Anna", "Sara", "Nina", "Clara", "Rin",
];
const FIRST_NAMES_M: &[&str] = &[
    "James", "Kenji", "Lucas", "Noah", "Haruto", "Liam", "Daniel", "Ren", "Marco", "Ethan",
    "Sota", "Oliver", "Hugo", "Leo", "Takumi", "Adam",
];
const LAST_NAMES: &[&str] = &[
    "Smith", "Tanaka", "Garcia", "Sato", "Brown", "Suzuki", "Miller", "Ito", "Rossi", "Kato",
    "Martin", "Watanabe", "Novak", "Kobayashi", "Silva", "Yamamoto",
];

/// Shape of a generated organisation
#[derive(Debug, Clone, PartialEq)]
pub struct RosterLayout {
    /// One leader per department
    pub departments: Vec<String>,
    pub managers_per_department: u32,
    pub sub_managers_per_manager: u32,
    /// Direct reports per manager or sub-manager (inclusive range)
    pub team_size: (u32, u32),
    pub special_needs_rate: f64,
}

impl Default for RosterLayout {
    fn default() -> Self {
        Self {
            departments: vec![
                "Engineering".to_string(),
                "Sales".to_string(),
                "Operations".to_string(),
            ],
            managers_per_department: 2,
            sub_managers_per_manager: 1,
            team_size: (2, 4),
            special_needs_rate: 0.05,
        }
    }
}

struct Builder {
    rng: ChaCha8Rng,
    next_id: u32,
    special_needs_rate: f64,
    people: Vec<Person>,
}

impl Builder {
    fn pick<'s>(&mut self, pool: &[&'s str]) -> &'s str {
        pool[self.rng.gen_range(0..pool.len())]
    }

    fn person(&mut self, department: &str, role: Role, reports_to: Option<u32>) -> u32 {
        let id = self.next_id;
        self.next_id += 1;

        let gender = if self.rng.gen_bool(0.5) {
            Gender::Female
        } else {
            Gender::Male
        };
        let first = match gender {
            Gender::Female => self.pick(FIRST_NAMES_F),
            _ => self.pick(FIRST_NAMES_M),
        };
        let last = self.pick(LAST_NAMES);

        let mut p = Person::new(id, &format!("{first} {last}"), department, role);
        p.gender = gender;
        p.special_needs = role == Role::Employee && self.rng.gen_bool(self.special_needs_rate);
        p.reports_to = reports_to.map(PersonId);
        self.people.push(p);
        id
    }

    fn reports(&mut self, department: &str, boss: u32, layout: &RosterLayout) {
        let (lo, hi) = layout.team_size;
        let n = self.rng.gen_range(lo.min(hi)..=hi.max(lo));
        for _ in 0..n {
            self.person(department, Role::Employee, Some(boss));
        }
    }
}

/// Generate leaders, managers, sub-managers and employees with reporting
/// lines. Teams are left for [`crate::hierarchy::form_teams`]; leaders get
/// random seat preferences.
pub fn generate_roster(layout: &RosterLayout, seed: u64) -> HierarchyFile {
    let rate = layout.special_needs_rate;
    let mut b = Builder {
        rng: ChaCha8Rng::seed_from_u64(seed),
        next_id: 1,
        // gen_bool panics outside 0..=1
        special_needs_rate: if rate.is_finite() { rate.clamp(0.0, 1.0) } else { 0.0 },
        people: Vec::new(),
    };

    let mut leaders = Vec::with_capacity(layout.departments.len());
    for dept in &layout.departments {
        leaders.push(b.person(dept, Role::Leader, None));
    }

    for (dept, &leader) in layout.departments.iter().zip(&leaders) {
        for _ in 0..layout.managers_per_department {
            let manager = b.person(dept, Role::Manager, Some(leader));
            b.reports(dept, manager, layout);
            for _ in 0..layout.sub_managers_per_manager {
                let sub = b.person(dept, Role::SubManager, Some(manager));
                b.reports(dept, sub, layout);
            }
        }
    }

    let mut preferences = Vec::with_capacity(leaders.len());
    for &leader in &leaders {
        let prefs = PreferenceSet {
            near_window: b.rng.gen_bool(0.5),
            near_entry: b.rng.gen_bool(0.3),
            quiet_zone: b.rng.gen_bool(0.5),
            corner: b.rng.gen_bool(0.3),
            near_team: false,
            premium: b.rng.gen_bool(0.5),
        };
        if !prefs.is_empty() {
            preferences.push(PreferenceEntry {
                person: PersonId(leader),
                prefs,
            });
        }
    }

    HierarchyFile {
        people: b.people,
        teams: None,
        preferences,
    }
}

/// Grid floor: blocks of tables, far enough apart to form one zone each
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloorLayout {
    pub blocks_x: u32,
    pub blocks_y: u32,
    /// Tables per block along each axis
    pub tables_x: u32,
    pub tables_y: u32,
    /// Seats along each long side of a table
    pub seats_per_side: u32,
}

impl Default for FloorLayout {
    fn default() -> Self {
        Self {
            blocks_x: 2,
            blocks_y: 2,
            tables_x: 2,
            tables_y: 2,
            seats_per_side: 3,
        }
    }
}

const SEAT_PITCH: f64 = 60.0;
const TABLE_DEPTH: f64 = 60.0;
const SEAT_OFFSET: f64 = 25.0;
const TABLE_GAP: f64 = 50.0;
const AISLE: f64 = 140.0;
const BLOCK_GAP: f64 = 800.0;

/// Build tables and seats for `layout`. Ids run from 1 in block, row, column
/// order; seats sit on both long sides of each table.
///
/// Steward tags: the leftmost table column is near a window, the front row of
/// the first block row is near the entry, row ends are corners, the last
/// block is a quiet zone, and the first block's first table is premium.
pub fn grid_floor(layout: &FloorLayout) -> (Vec<Table>, Vec<Seat>) {
    let width = layout.seats_per_side as f64 * SEAT_PITCH;
    let pitch_x = width + TABLE_GAP;
    let pitch_y = TABLE_DEPTH + AISLE;
    let block_w = layout.tables_x as f64 * pitch_x + BLOCK_GAP;
    let block_h = layout.tables_y as f64 * pitch_y + BLOCK_GAP;
    let last_block = (layout.blocks_x * layout.blocks_y).saturating_sub(1);

    let mut tables = Vec::new();
    let mut seats = Vec::new();
    let mut seat_id = 1;

    for by in 0..layout.blocks_y {
        for bx in 0..layout.blocks_x {
            let block = by * layout.blocks_x + bx;
            for ty in 0..layout.tables_y {
                for tx in 0..layout.tables_x {
                    let id = tables.len() as u32 + 1;
                    let x = bx as f64 * block_w + tx as f64 * pitch_x;
                    let y = by as f64 * block_h + ty as f64 * pitch_y;
                    tables.push(Table::new(
                        id,
                        Rect::new(x, y, width, TABLE_DEPTH),
                        layout.seats_per_side * 2,
                    ));

                    for side in 0..2 {
                        let sy = if side == 0 {
                            y - SEAT_OFFSET
                        } else {
                            y + TABLE_DEPTH + SEAT_OFFSET
                        };
                        for k in 0..layout.seats_per_side {
                            let attributes = SeatAttributes {
                                near_window: bx == 0 && tx == 0,
                                near_entry: by == 0 && ty == 0 && side == 0,
                                corner: k == 0 || k + 1 == layout.seats_per_side,
                                quiet_zone: block == last_block,
                                accessible: k == 0 && side == 0,
                                premium: block == 0 && tx == 0 && ty == 0,
                            };
                            let sx = x + SEAT_PITCH / 2.0 + k as f64 * SEAT_PITCH;
                            seats.push(
                                Seat::new(seat_id, sx, sy, Some(id)).with_attributes(attributes),
                            );
                            seat_id += 1;
                        }
                    }
                }
            }
        }
    }
    (tables, seats)
}
