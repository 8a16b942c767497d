use crate::constants::{POSITIONAL_WEIGHT, PREMIUM_WEIGHT};
use crate::model::{PreferenceSet, Seat};
use serde::{Deserialize, Serialize};

/// Points added per satisfied preference
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScoreWeights {
    /// near-window, near-entry, quiet-zone, corner
    pub positional: u32,
    pub premium: u32,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            positional: POSITIONAL_WEIGHT,
            premium: PREMIUM_WEIGHT,
        }
    }
}

/// Score one seat against one person's preferences.
///
/// A flag only counts when the seat carries the matching tag. `near_team`
/// has no seat tag and never contributes.
pub fn score_seat(seat: &Seat, prefs: &PreferenceSet, weights: &ScoreWeights) -> u32 {
    let tags = &seat.attributes;
    let positional = [
        (prefs.near_window, tags.near_window),
        (prefs.near_entry, tags.near_entry),
        (prefs.quiet_zone, tags.quiet_zone),
        (prefs.corner, tags.corner),
    ]
    .iter()
    .filter(|&&(wanted, present)| wanted && present)
    .count() as u32;

    let premium = if prefs.premium && tags.premium {
        weights.premium
    } else {
        0
    };

    positional * weights.positional + premium
}

/// Highest scoring seat, lowest seat id on ties
pub fn best_seat<'a, I>(seats: I, prefs: &PreferenceSet, weights: &ScoreWeights) -> Option<(&'a Seat, u32)>
where
    I: IntoIterator<Item = &'a Seat>,
{
    seats
        .into_iter()
        .map(|seat| (seat, score_seat(seat, prefs, weights)))
        .max_by(|(a, sa), (b, sb)| sa.cmp(sb).then_with(|| b.id.cmp(&a.id)))
}
