use crate::constants::DEFAULT_ROW_TOLERANCE;
use crate::model::Seat;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Fill order inside one table
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum SequencePolicy {
    /// Rows front to back, each row left to right
    RowMajor,
    /// Rows front to back, alternating direction every row
    #[default]
    Serpentine,
    /// Columns left to right, each column front to back (bench seating)
    ColumnMajor,
}

/// Seat sequencing settings injected into every seat-assigning step
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Sequencer {
    pub policy: SequencePolicy,
    /// Coordinates within one tolerance step share a row (or column)
    pub tolerance: f64,
}

impl Default for Sequencer {
    fn default() -> Self {
        Self {
            policy: SequencePolicy::default(),
            tolerance: DEFAULT_ROW_TOLERANCE,
        }
    }
}

impl Sequencer {
    pub fn new(policy: SequencePolicy, tolerance: f64) -> Self {
        Self { policy, tolerance }
    }

    pub fn order<'a>(&self, seats: &[&'a Seat]) -> Vec<&'a Seat> {
        sequence_seats(seats, self.policy, self.tolerance)
    }
}

/// Order a table's free seats so that filling them one by one never leaves a gap.
///
/// The result is always a permutation of `seats`.
pub fn sequence_seats<'a>(
    seats: &[&'a Seat],
    policy: SequencePolicy,
    tolerance: f64,
) -> Vec<&'a Seat> {
    match policy {
        SequencePolicy::RowMajor => {
            lines(seats, |s| bucket(s.position.y, tolerance), |s| s.position.x).concat()
        }
        SequencePolicy::Serpentine => {
            lines(seats, |s| bucket(s.position.y, tolerance), |s| s.position.x)
                .into_iter()
                .enumerate()
                .flat_map(|(i, mut row)| {
                    if i % 2 == 1 {
                        row.reverse();
                    }
                    row
                })
                .collect()
        }
        SequencePolicy::ColumnMajor => {
            lines(seats, |s| bucket(s.position.x, tolerance), |s| s.position.y).concat()
        }
    }
}

/// Snap a coordinate to its tolerance bucket
fn bucket(value: f64, tolerance: f64) -> i64 {
    if tolerance > 0.0 {
        (value / tolerance).round() as i64
    } else {
        value.round() as i64
    }
}

/// Split seats into lines (rows or columns) ordered by line key, each line
/// ordered along the other axis with the seat id as tie-break.
fn lines<'a>(
    seats: &[&'a Seat],
    line_key: impl Fn(&Seat) -> i64,
    along: impl Fn(&Seat) -> f64,
) -> Vec<Vec<&'a Seat>> {
    let sorted = seats.iter().copied().sorted_by(|a, b| {
        line_key(a)
            .cmp(&line_key(b))
            .then_with(|| along(a).total_cmp(&along(b)))
            .then_with(|| a.id.cmp(&b.id))
    });

    let mut out = Vec::new();
    for (_, line) in &sorted.chunk_by(|s| line_key(s)) {
        out.push(line.collect());
    }
    out
}
