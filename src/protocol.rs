// Wire-shaped records exchanged with the external persistence API.
//
// Records are field-named (never positional) so stored documents stay
// forward-compatible when slots or fields are added. Parsing is lenient
// about emptiness (an empty string is an unfilled slot, not an error) but
// strict about invariants: restoring a team replays the stored ids through
// the normal selection operations, so a stale or hand-edited record cannot
// smuggle in an over-budget or duplicate-driver team.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::catalog::Catalog;
use crate::config::LeagueRules;
use crate::money::Amount;
use crate::prediction::{Prediction, RaceResult, Slot};
use crate::team::{SelectionError, TeamSelection};

// ---------------------------------------------------------------------------
// Team records
// ---------------------------------------------------------------------------

/// A fantasy team as submitted to (and returned from) the persistence API.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRecord {
    pub driver_1: String,
    pub driver_2: String,
    pub driver_3: String,
    pub driver_4: String,
    pub constructor: String,
    pub budget_remaining: Amount,
    /// Set by the store on write; absent on fresh submissions.
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Build the submission record for a team.
///
/// Only a valid team can be submitted, so this validates first.
pub fn team_record(selection: &TeamSelection) -> Result<TeamRecord, SelectionError> {
    selection.validate()?;

    let ids: Vec<&str> = selection.drivers().iter().map(|d| d.id.as_str()).collect();
    // The stored document shape is fixed at four drivers by the external
    // API; a league configured for a different count cannot be submitted
    // through it.
    if ids.len() != 4 {
        return Err(SelectionError::IncompleteTeam {
            drivers: ids.len(),
            required_drivers: 4,
            has_constructor: selection.constructor().is_some(),
        });
    }
    let constructor = selection
        .constructor()
        .map(|c| c.id.clone())
        .unwrap_or_default();

    Ok(TeamRecord {
        driver_1: ids[0].to_string(),
        driver_2: ids[1].to_string(),
        driver_3: ids[2].to_string(),
        driver_4: ids[3].to_string(),
        constructor,
        budget_remaining: selection.remaining_budget(),
        updated_at: None,
    })
}

/// Rebuild a selection from a stored record.
///
/// The stored `budget_remaining` is advisory: the budget is recomputed from
/// catalog prices, and a mismatch (price change since the team was saved,
/// or a tampered document) is logged and the recomputed value wins.
pub fn restore_team(
    catalog: &Catalog,
    rules: LeagueRules,
    record: &TeamRecord,
) -> Result<TeamSelection, SelectionError> {
    let selection = TeamSelection::from_saved(
        catalog,
        rules,
        &[
            record.driver_1.as_str(),
            record.driver_2.as_str(),
            record.driver_3.as_str(),
            record.driver_4.as_str(),
        ],
        &record.constructor,
    )?;

    if selection.remaining_budget() != record.budget_remaining {
        warn!(
            "stored budget {} disagrees with recomputed {}; using recomputed",
            record.budget_remaining,
            selection.remaining_budget()
        );
    }

    Ok(selection)
}

// ---------------------------------------------------------------------------
// Prediction records
// ---------------------------------------------------------------------------

/// A prediction as stored: six named slot fields, empty string = unfilled.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PredictionRecord {
    #[serde(default)]
    pub pole: String,
    #[serde(default)]
    pub first: String,
    #[serde(default)]
    pub second: String,
    #[serde(default)]
    pub third: String,
    #[serde(default)]
    pub fourth: String,
    #[serde(rename = "fastestLap", default)]
    pub fastest_lap: String,
    /// Set by the store on write; absent on fresh submissions.
    #[serde(default)]
    pub submitted_at: Option<DateTime<Utc>>,
}

/// An official race result as supplied by the results provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RaceResultRecord {
    #[serde(default)]
    pub race_id: String,
    #[serde(default)]
    pub pole: String,
    #[serde(default)]
    pub first: String,
    #[serde(default)]
    pub second: String,
    #[serde(default)]
    pub third: String,
    #[serde(default)]
    pub fourth: String,
    #[serde(rename = "fastestLap", default)]
    pub fastest_lap: String,
}

impl PredictionRecord {
    fn field(&self, slot: Slot) -> &str {
        match slot {
            Slot::Pole => &self.pole,
            Slot::First => &self.first,
            Slot::Second => &self.second,
            Slot::Third => &self.third,
            Slot::Fourth => &self.fourth,
            Slot::FastestLap => &self.fastest_lap,
        }
    }
}

impl RaceResultRecord {
    fn field(&self, slot: Slot) -> &str {
        match slot {
            Slot::Pole => &self.pole,
            Slot::First => &self.first,
            Slot::Second => &self.second,
            Slot::Third => &self.third,
            Slot::Fourth => &self.fourth,
            Slot::FastestLap => &self.fastest_lap,
        }
    }
}

/// Build the submission record for a prediction. Unfilled slots serialize
/// as empty strings, matching the stored document shape.
pub fn prediction_record(prediction: &Prediction) -> PredictionRecord {
    let field = |slot: Slot| prediction.get(slot).unwrap_or_default().to_string();
    PredictionRecord {
        pole: field(Slot::Pole),
        first: field(Slot::First),
        second: field(Slot::Second),
        third: field(Slot::Third),
        fourth: field(Slot::Fourth),
        fastest_lap: field(Slot::FastestLap),
        submitted_at: None,
    }
}

/// Parse a stored prediction record.
///
/// Empty fields become unfilled slots, and the assignments are replayed
/// through `Prediction::assign` so a record that lists the same driver in
/// two slots collapses to the later slot, the same way the selection flow
/// would have.
pub fn parse_prediction(record: &PredictionRecord) -> Prediction {
    Slot::ALL.into_iter().fold(Prediction::new(), |p, slot| {
        let driver = record.field(slot);
        if driver.is_empty() {
            p
        } else {
            p.assign(slot, driver)
        }
    })
}

/// Parse a race result record, treating empty fields as unfilled slots.
pub fn parse_race_result(record: &RaceResultRecord) -> RaceResult {
    Slot::ALL
        .into_iter()
        .fold(RaceResult::new(record.race_id.clone()), |r, slot| {
            let driver = record.field(slot);
            if driver.is_empty() {
                r
            } else {
                r.with(slot, driver)
            }
        })
}
