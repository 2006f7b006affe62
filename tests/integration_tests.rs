// Integration tests for the fantasy core.
//
// These tests exercise the full system end-to-end using the library crate's
// public API. They verify that the major subsystems (config loading, the
// reference catalog, team building, prediction scoring, standings, and the
// persistence wire records) work together correctly.

use anyhow::Result;

use pitwall::catalog::Catalog;
use pitwall::config::{ensure_config_files, load_config_from, LeagueRules};
use pitwall::money::Amount;
use pitwall::prediction::{score, Prediction, RaceResult, Slot};
use pitwall::protocol::{
    parse_prediction, parse_race_result, prediction_record, restore_team, team_record,
    PredictionRecord, RaceResultRecord, TeamRecord,
};
use pitwall::standings::compute_standings;
use pitwall::team::{SelectionError, TeamSelection};

// ===========================================================================
// Test helpers
// ===========================================================================

/// Fixture directory path (relative to the project root, which is the cwd
/// for `cargo test`).
const FIXTURES: &str = "tests/fixtures";

fn fixture_catalog() -> Catalog {
    Catalog::load(
        format!("{FIXTURES}/drivers.csv"),
        format!("{FIXTURES}/constructors.csv"),
    )
    .expect("fixture catalog should load")
}

/// A starting roster: drivers priced 5.5 + 4.5 + 5.0 + 4.0.
const FOUR_DRIVERS: [&str; 4] = [
    "max_verstappen",
    "sergio_perez",
    "lewis_hamilton",
    "george_russell",
];

fn build_team(catalog: &Catalog) -> TeamSelection {
    FOUR_DRIVERS
        .iter()
        .fold(TeamSelection::new(LeagueRules::default()), |s, id| {
            s.toggle_driver(catalog, id).expect("driver should fit")
        })
        .set_constructor(catalog, "red_bull")
        .expect("constructor should fit")
}

// ===========================================================================
// Config + catalog
// ===========================================================================

#[test]
fn config_loads_from_fixture_base_dir() -> Result<()> {
    // Assemble a base dir the way the app sees one: defaults/ bootstraps
    // config/, then the config loads and points at the catalog files.
    let tmp = std::env::temp_dir().join("pitwall_it_config_base");
    let _ = std::fs::remove_dir_all(&tmp);
    std::fs::create_dir_all(tmp.join("defaults"))?;
    std::fs::copy(
        format!("{FIXTURES}/league.toml"),
        tmp.join("defaults/league.toml"),
    )?;

    let copied = ensure_config_files(&tmp)?;
    assert_eq!(copied.len(), 1);

    let config = load_config_from(&tmp)?;
    assert_eq!(config.league_name, "Fixture League");
    assert_eq!(config.rules, LeagueRules::default());

    // The data paths resolve against the crate root during tests.
    let catalog = Catalog::load(&config.data_paths.drivers, &config.data_paths.constructors)
        .expect("catalog from config paths should load");
    assert_eq!(catalog.drivers().len(), 10);
    assert_eq!(catalog.constructors().len(), 10);

    let _ = std::fs::remove_dir_all(&tmp);
    Ok(())
}

#[test]
fn fixture_catalog_has_expected_prices() {
    let catalog = fixture_catalog();

    assert_eq!(
        catalog.driver("max_verstappen").unwrap().price,
        Amount::from_tenths(55)
    );
    assert_eq!(
        catalog.driver("lance_stroll").unwrap().price,
        Amount::from_tenths(30)
    );
    assert_eq!(
        catalog.constructor("haas").unwrap().price,
        Amount::from_tenths(20)
    );
    assert_eq!(catalog.driver("max_verstappen").unwrap().constructor, "red_bull");
}

// ===========================================================================
// Team building end-to-end
// ===========================================================================

#[test]
fn full_team_flow_builds_validates_and_submits() {
    let catalog = fixture_catalog();
    let team = build_team(&catalog);

    // 45.0 - (19.0 drivers + 5.0 constructor) = 21.0
    assert_eq!(team.remaining_budget(), Amount::from_tenths(210));
    assert!(team.validate().is_ok());

    let record = team_record(&team).expect("valid team should produce a record");
    assert_eq!(record.driver_1, "max_verstappen");
    assert_eq!(record.constructor, "red_bull");
    assert_eq!(record.budget_remaining, Amount::from_tenths(210));
}

#[test]
fn stored_team_roundtrips_through_json_and_restore() -> Result<()> {
    let catalog = fixture_catalog();
    let team = build_team(&catalog);

    let record = team_record(&team)?;
    let json = serde_json::to_string(&record)?;
    let back: TeamRecord = serde_json::from_str(&json)?;
    let restored = restore_team(&catalog, LeagueRules::default(), &back)?;

    assert_eq!(restored, team);
    Ok(())
}

#[test]
fn editing_a_team_is_a_wholesale_resubmission() {
    // Swap one driver on a restored team and submit again; the new record
    // supersedes the old one wholesale.
    let catalog = fixture_catalog();
    let team = build_team(&catalog);

    let edited = team
        .toggle_driver(&catalog, "sergio_perez")
        .unwrap()
        .toggle_driver(&catalog, "lance_stroll")
        .unwrap();
    assert!(edited.validate().is_ok());
    // 4.5 out, 3.0 in: remaining goes from 21.0 to 22.5.
    assert_eq!(edited.remaining_budget(), Amount::from_tenths(225));

    let record = team_record(&edited).unwrap();
    assert_eq!(record.driver_2, "lewis_hamilton");
    assert_eq!(record.driver_4, "lance_stroll");
}

#[test]
fn budget_rejections_leave_the_selection_untouched() {
    let catalog = fixture_catalog();
    let rules = LeagueRules {
        total_budget: Amount::from_tenths(100),
        drivers_per_team: 4,
    };
    let selection = TeamSelection::new(rules)
        .toggle_driver(&catalog, "max_verstappen")
        .unwrap()
        .toggle_driver(&catalog, "george_russell")
        .unwrap();
    assert_eq!(selection.remaining_budget(), Amount::from_tenths(5));

    // 0.5 left: every remaining driver and constructor is too expensive.
    let err = selection.toggle_driver(&catalog, "lance_stroll").unwrap_err();
    assert_eq!(
        err,
        SelectionError::BudgetExceeded {
            shortfall: Amount::from_tenths(25),
        }
    );
    let err = selection.set_constructor(&catalog, "haas").unwrap_err();
    assert_eq!(
        err,
        SelectionError::BudgetExceeded {
            shortfall: Amount::from_tenths(15),
        }
    );
    assert_eq!(selection.remaining_budget(), Amount::from_tenths(5));
    assert_eq!(selection.drivers().len(), 2);
}

#[test]
fn exact_budget_exhaustion_is_accepted_end_to_end() {
    // 5.5 + 4.5 + 5.0 + 4.0 drivers + 2.0 constructor against a 21.0 cap
    // lands at exactly zero and must validate.
    let catalog = fixture_catalog();
    let rules = LeagueRules {
        total_budget: Amount::from_tenths(210),
        drivers_per_team: 4,
    };
    let team = FOUR_DRIVERS
        .iter()
        .fold(TeamSelection::new(rules), |s, id| {
            s.toggle_driver(&catalog, id).unwrap()
        })
        .set_constructor(&catalog, "williams")
        .unwrap();

    assert_eq!(team.remaining_budget(), Amount::ZERO);
    assert!(team.validate().is_ok());
    assert_eq!(team.display_budget().to_string(), "0.0");
}

// ===========================================================================
// Predictions end-to-end
// ===========================================================================

#[test]
fn prediction_flow_from_draft_to_score() {
    let catalog = fixture_catalog();
    let team = build_team(&catalog);

    // Predict with the team's own drivers, the way the prediction page does.
    let ids: Vec<&str> = team.drivers().iter().map(|d| d.id.as_str()).collect();
    let prediction = Prediction::new()
        .assign(Slot::Pole, ids[0])
        .assign(Slot::First, ids[0])
        .assign(Slot::Second, ids[1])
        .assign(Slot::Third, ids[2])
        .assign(Slot::Fourth, ids[3])
        .assign(Slot::FastestLap, ids[1]);

    // Assigning a driver twice moved them, so the draft is not complete yet.
    assert!(!prediction.is_complete());
    assert_eq!(prediction.get(Slot::Pole), None);
    assert_eq!(prediction.get(Slot::Second), None);

    let prediction = prediction
        .assign(Slot::Pole, "charles_leclerc")
        .assign(Slot::Second, "lando_norris");
    assert!(prediction.is_complete());

    let result = RaceResult::new("bahrain_2024")
        .with(Slot::Pole, "charles_leclerc")
        .with(Slot::First, "max_verstappen")
        .with(Slot::Second, "sergio_perez")
        .with(Slot::Third, "lewis_hamilton")
        .with(Slot::Fourth, "carlos_sainz")
        .with(Slot::FastestLap, "sergio_perez");

    // pole (10) + first (25) + third (15) + fastestLap (8) = 58
    let breakdown = score(&prediction, &result);
    assert_eq!(breakdown.total, 58);
    assert_eq!(breakdown.correct_count(), 4);
}

#[test]
fn prediction_roundtrips_through_stored_record() -> Result<()> {
    let prediction = Prediction::new()
        .assign(Slot::Pole, "max_verstappen")
        .assign(Slot::First, "max_verstappen") // moves, leaving pole empty
        .assign(Slot::FastestLap, "lando_norris");

    let record = prediction_record(&prediction);
    let json = serde_json::to_string(&record)?;
    assert!(json.contains("\"fastestLap\":\"lando_norris\""));
    assert!(json.contains("\"pole\":\"\""));

    let back: PredictionRecord = serde_json::from_str(&json)?;
    assert_eq!(parse_prediction(&back), prediction);
    Ok(())
}

#[test]
fn scoring_a_stored_prediction_against_a_provider_result() {
    // Both sides arrive as wire records, the way a dashboard sees them.
    let prediction = parse_prediction(&PredictionRecord {
        pole: "max_verstappen".to_string(),
        first: "max_verstappen".to_string(),
        second: "lando_norris".to_string(),
        fastest_lap: "charles_leclerc".to_string(),
        ..Default::default()
    });
    let result = parse_race_result(&RaceResultRecord {
        race_id: "monza_2024".to_string(),
        pole: "max_verstappen".to_string(),
        first: "charles_leclerc".to_string(),
        second: "lando_norris".to_string(),
        third: "carlos_sainz".to_string(),
        fourth: "lewis_hamilton".to_string(),
        fastest_lap: "charles_leclerc".to_string(),
    });

    // The duplicate verstappen collapsed onto first, which is wrong, and
    // pole is left unfilled; second (18) + fastestLap (8) score.
    let breakdown = score(&prediction, &result);
    assert_eq!(breakdown.total, 26);
    assert_eq!(breakdown.correct_count(), 2);
}

#[test]
fn unfilled_slots_score_zero_against_sparse_results() {
    // A result missing its fastest-lap entry and a prediction missing the
    // same slot must not accidentally match.
    let prediction = parse_prediction(&PredictionRecord {
        pole: "max_verstappen".to_string(),
        fastest_lap: String::new(),
        ..Default::default()
    });
    let result = parse_race_result(&RaceResultRecord {
        race_id: "sprint".to_string(),
        pole: "max_verstappen".to_string(),
        ..Default::default()
    });

    let breakdown = score(&prediction, &result);
    assert_eq!(breakdown.total, Slot::Pole.points());
    let fastest = breakdown
        .slots
        .iter()
        .find(|s| s.slot == Slot::FastestLap)
        .unwrap();
    assert!(!fastest.correct);
}

// ===========================================================================
// Standings
// ===========================================================================

#[test]
fn league_standings_across_two_races() {
    let result_r1 = RaceResult::new("r1")
        .with(Slot::Pole, "max_verstappen")
        .with(Slot::First, "max_verstappen")
        .with(Slot::Second, "lando_norris")
        .with(Slot::Third, "charles_leclerc")
        .with(Slot::Fourth, "carlos_sainz")
        .with(Slot::FastestLap, "lando_norris");
    let result_r2 = RaceResult::new("r2")
        .with(Slot::Pole, "charles_leclerc")
        .with(Slot::First, "lando_norris")
        .with(Slot::Second, "max_verstappen")
        .with(Slot::Third, "oscar_piastri")
        .with(Slot::Fourth, "george_russell")
        .with(Slot::FastestLap, "max_verstappen");

    // alice nails r1 (88) and whiffs r2; bob takes partial credit in both.
    let alice_r1 = score(
        &Prediction::new()
            .assign(Slot::Pole, "max_verstappen")
            .assign(Slot::First, "max_verstappen")
            .assign(Slot::Second, "lando_norris")
            .assign(Slot::Third, "charles_leclerc")
            .assign(Slot::Fourth, "carlos_sainz")
            .assign(Slot::FastestLap, "lando_norris"),
        &result_r1,
    );
    let alice_r2 = score(
        &Prediction::new().assign(Slot::Pole, "lance_stroll"),
        &result_r2,
    );
    let bob_r1 = score(
        &Prediction::new()
            .assign(Slot::First, "max_verstappen")
            .assign(Slot::FastestLap, "lando_norris"),
        &result_r1,
    );
    let bob_r2 = score(
        &Prediction::new()
            .assign(Slot::Pole, "charles_leclerc")
            .assign(Slot::First, "lando_norris"),
        &result_r2,
    );

    let table = compute_standings([
        ("alice", &alice_r1),
        ("alice", &alice_r2),
        ("bob", &bob_r1),
        ("bob", &bob_r2),
    ]);

    assert_eq!(table.len(), 2);
    assert_eq!(table[0].user, "alice");
    assert_eq!(table[0].points, 88);
    assert_eq!(table[0].correct_predictions, 6);
    assert_eq!(table[1].user, "bob");
    assert_eq!(table[1].points, 25 + 8 + 10 + 25);
    assert_eq!(table[1].correct_predictions, 4);
}
