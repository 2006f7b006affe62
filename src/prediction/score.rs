// Prediction scoring against an official race result.
//
// Each slot is scored independently by exact identifier match. There is no
// partial credit: predicting the race winner into second place scores
// nothing for either slot. An unfilled prediction slot scores zero rather
// than erroring, since predictions may be scored before every slot is
// confirmed filled.

use serde::{Deserialize, Serialize};

use super::slot::Slot;
use super::{Prediction, RaceResult};

/// How one slot scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotScore {
    pub slot: Slot,
    pub predicted: Option<String>,
    pub actual: Option<String>,
    pub correct: bool,
    pub points: u32,
}

/// The full outcome of scoring one prediction against one result.
/// Derived on demand, never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    /// One entry per slot, in `Slot::ALL` order.
    pub slots: Vec<SlotScore>,
    pub total: u32,
}

impl ScoreBreakdown {
    /// Number of slots predicted correctly.
    pub fn correct_count(&self) -> u32 {
        self.slots.iter().filter(|s| s.correct).count() as u32
    }
}

/// Score a prediction against the official result.
///
/// Pure function over its two inputs; calling it twice with the same values
/// produces the same breakdown.
pub fn score(prediction: &Prediction, result: &RaceResult) -> ScoreBreakdown {
    let mut slots = Vec::with_capacity(Slot::ALL.len());
    let mut total = 0;

    for slot in Slot::ALL {
        let predicted = prediction.get(slot);
        let actual = result.get(slot);

        // An unfilled or empty pick never matches, even when the official
        // slot is also empty.
        let correct = match (predicted, actual) {
            (Some(p), Some(a)) if !p.is_empty() => p == a,
            _ => false,
        };
        let points = if correct { slot.points() } else { 0 };
        total += points;

        slots.push(SlotScore {
            slot,
            predicted: predicted.map(str::to_string),
            actual: actual.map(str::to_string),
            correct,
            points,
        });
    }

    ScoreBreakdown { slots, total }
}
