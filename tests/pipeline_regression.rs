//! Pipeline Regression Tests
//!
//! Exercises the full C1-C8 simulation pipeline end to end, plus a CSV
//! round trip through disk, asserting on determinism and data sanity.

use elyx_sim::csv_io;
use elyx_sim::simulation;
use elyx_sim::types::{Profile, Rules};
use tempfile::tempdir;

fn run_default() -> elyx_sim::types::Dataset {
    let profile = Profile::default();
    let rules = Rules::default();
    simulation::run(&profile, &rules)
}

#[test]
fn full_run_produces_every_table() {
    let dataset = run_default();
    assert!(!dataset.daily.is_empty(), "daily table should not be empty");
    assert!(!dataset.labs.is_empty(), "labs table should not be empty");
    assert!(!dataset.fitness.is_empty(), "fitness table should not be empty");
    assert!(!dataset.body_comp.is_empty(), "body_comp table should not be empty");
    assert!(!dataset.kpis.is_empty(), "kpis table should not be empty");
}

#[test]
fn full_run_has_no_nan_biometrics() {
    let dataset = run_default();
    for row in &dataset.daily {
        assert!(!row.weight_kg.is_nan(), "weight_kg is NaN on {}", row.date);
        assert!(!row.rhr_bpm.is_nan(), "rhr_bpm is NaN on {}", row.date);
        assert!(!row.hrv_ms.is_nan(), "hrv_ms is NaN on {}", row.date);
        assert!(!row.adherence.is_nan(), "adherence is NaN on {}", row.date);
    }
    for row in &dataset.labs {
        assert!(!row.ldl_mgdl.is_nan(), "ldl_mgdl is NaN on {}", row.date);
    }
}

#[test]
fn daily_dates_cover_the_full_profile_window() {
    let profile = Profile::default();
    let dataset = run_default();
    let first = dataset.daily.first().expect("at least one daily row").date;
    let last = dataset.daily.last().expect("at least one daily row").date;
    assert_eq!(first, profile.start_date);
    assert_eq!(last, profile.end_date());
}

#[test]
fn csv_round_trip_preserves_row_counts() {
    let dataset = run_default();
    let dir = tempdir().expect("tempdir");
    csv_io::write_dataset(&dataset, dir.path()).expect("write dataset");
    let reloaded = csv_io::read_dataset(dir.path()).expect("read dataset");

    assert_eq!(dataset.daily.len(), reloaded.daily.len());
    assert_eq!(dataset.labs.len(), reloaded.labs.len());
    assert_eq!(dataset.fitness.len(), reloaded.fitness.len());
    assert_eq!(dataset.body_comp.len(), reloaded.body_comp.len());
    assert_eq!(dataset.interventions.len(), reloaded.interventions.len());
    assert_eq!(dataset.chats.len(), reloaded.chats.len());
    assert_eq!(dataset.kpis.len(), reloaded.kpis.len());
}

#[test]
fn csv_round_trip_preserves_representative_values() {
    let dataset = run_default();
    let dir = tempdir().expect("tempdir");
    csv_io::write_dataset(&dataset, dir.path()).expect("write dataset");
    let reloaded = csv_io::read_dataset(dir.path()).expect("read dataset");

    let (a, b) = (&dataset.daily[0], &reloaded.daily[0]);
    assert_eq!(a.date, b.date);
    assert!((a.weight_kg - b.weight_kg).abs() < 1e-6);
    assert!((a.rhr_bpm - b.rhr_bpm).abs() < 1e-6);
}

#[test]
fn missing_dataset_directory_is_fatal() {
    let dir = tempdir().expect("tempdir");
    let missing = dir.path().join("does-not-exist");
    let err = csv_io::read_dataset(&missing);
    assert!(err.is_err(), "reading a dataset directory with no tables should fail loudly");
}
