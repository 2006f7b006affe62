// League standings: aggregate scored races into a ranked table.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::prediction::ScoreBreakdown;

/// One user's line in the standings table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StandingsEntry {
    pub user: String,
    pub points: u32,
    pub correct_predictions: u32,
}

/// Aggregate per-race score breakdowns into a standings table.
///
/// A user may appear once per scored race; their points and correct-slot
/// counts accumulate. Ordering is deterministic: points descending, then
/// correct predictions descending, then user name ascending.
pub fn compute_standings<'a, I>(rows: I) -> Vec<StandingsEntry>
where
    I: IntoIterator<Item = (&'a str, &'a ScoreBreakdown)>,
{
    let mut totals: HashMap<String, (u32, u32)> = HashMap::new();
    for (user, breakdown) in rows {
        let entry = totals.entry(user.to_string()).or_default();
        entry.0 += breakdown.total;
        entry.1 += breakdown.correct_count();
    }

    let mut table: Vec<StandingsEntry> = totals
        .into_iter()
        .map(|(user, (points, correct_predictions))| StandingsEntry {
            user,
            points,
            correct_predictions,
        })
        .collect();

    table.sort_by(|a, b| {
        b.points
            .cmp(&a.points)
            .then(b.correct_predictions.cmp(&a.correct_predictions))
            .then(a.user.cmp(&b.user))
    });

    table
}
