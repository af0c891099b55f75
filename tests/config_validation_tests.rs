//! Config Validation Tests
//!
//! Exercises `Profile::load_with_provenance` / `Rules::load_with_provenance`
//! end to end against real TOML files, including the typo-warning path and
//! the `$ELYX_CONFIG` / `$ELYX_RULES` override.

use elyx_sim::types::{Profile, Rules};
use std::io::Write;
use std::sync::Mutex;

// `ELYX_CONFIG`/`ELYX_RULES` are process-wide; serialize the tests that touch them.
static ENV_LOCK: Mutex<()> = Mutex::new(());

fn write_temp_toml(contents: &str) -> (tempfile::TempDir, std::path::PathBuf) {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("config.toml");
    let mut f = std::fs::File::create(&path).expect("create toml");
    f.write_all(contents.as_bytes()).expect("write toml");
    (dir, path)
}

#[test]
fn profile_loads_overrides_from_elyx_config() {
    let _guard = ENV_LOCK.lock().unwrap();
    let (_dir, path) = write_temp_toml(
        r#"
        seed = 777

        [demographics]
        name = "Test Member"
        "#,
    );
    std::env::set_var("ELYX_CONFIG", &path);
    let (profile, _prov) = Profile::load_with_provenance();
    std::env::remove_var("ELYX_CONFIG");

    assert_eq!(profile.seed, 777);
    assert_eq!(profile.demographics.name, "Test Member");
}

#[test]
fn profile_provenance_flags_only_explicitly_set_keys() {
    let _guard = ENV_LOCK.lock().unwrap();
    let (_dir, path) = write_temp_toml(
        r#"
        [demographics]
        name = "Test Member"
        "#,
    );
    std::env::set_var("ELYX_CONFIG", &path);
    let (_profile, prov) = Profile::load_with_provenance();
    std::env::remove_var("ELYX_CONFIG");

    assert!(prov.is_user_set("demographics.name"));
    assert!(!prov.is_user_set("seed"), "seed was never set in this file");
}

#[test]
fn rules_loads_overrides_from_elyx_rules() {
    let _guard = ENV_LOCK.lock().unwrap();
    let (_dir, path) = write_temp_toml(
        r#"
        [adherence]
        travel_penalty_per_day = -0.5
        "#,
    );
    std::env::set_var("ELYX_RULES", &path);
    let (rules, _prov) = Rules::load_with_provenance();
    std::env::remove_var("ELYX_RULES");

    assert!((rules.adherence.travel_penalty_per_day - (-0.5)).abs() < 1e-9);
}

#[test]
fn missing_elyx_config_path_falls_back_to_defaults() {
    let _guard = ENV_LOCK.lock().unwrap();
    std::env::set_var("ELYX_CONFIG", "/no/such/path/profile.toml");
    let (profile, prov) = Profile::load_with_provenance();
    std::env::remove_var("ELYX_CONFIG");

    assert_eq!(profile.seed, Profile::default().seed);
    assert!(prov.explicit_keys.is_empty());
}
