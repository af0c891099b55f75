//! Static configuration — member `Profile` and simulation `Rules`.
//!
//! ## Loading order (each independently)
//!
//! `Profile`:
//! 1. `$ELYX_CONFIG` environment variable (path to TOML file)
//! 2. `./profile.toml` in the current working directory
//! 3. Built-in defaults
//!
//! `Rules`:
//! 1. `$ELYX_RULES` environment variable
//! 2. `./rules.toml`
//! 3. Built-in defaults
//!
//! ## Usage
//!
//! Call `config::init()` once at startup, then `config::profile()` /
//! `config::rules()` anywhere — both are read-only for the remainder of the
//! process, unlike the per-run `Rng`, which is threaded explicitly instead.
//!
//! ```ignore
//! config::init(Profile::load(), Rules::load());
//! let seed = config::profile().seed;
//! ```

pub mod defaults;
pub mod rng;
pub mod validation;

pub use rng::Rng;

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use tracing::{info, warn};

use crate::error::ConfigError;
use crate::types::{Profile, Rules};

/// Tracks which dotted key paths were explicitly present in a loaded TOML
/// file, so callers can distinguish user-set values from defaults.
#[derive(Debug, Clone, Default)]
pub struct ConfigProvenance {
    pub explicit_keys: std::collections::HashSet<String>,
}

impl ConfigProvenance {
    pub fn is_user_set(&self, dotted_key: &str) -> bool {
        self.explicit_keys.contains(dotted_key)
    }
}

static PROFILE: OnceLock<Profile> = OnceLock::new();
static RULES: OnceLock<Rules> = OnceLock::new();

/// Initialize the global config. Must be called exactly once before any call
/// to `profile()`/`rules()`.
pub fn init(profile: Profile, rules: Rules) {
    if PROFILE.set(profile).is_err() {
        warn!("config::init() called more than once — ignoring profile");
    }
    if RULES.set(rules).is_err() {
        warn!("config::init() called more than once — ignoring rules");
    }
}

/// The global member profile. Panics if `init()` has not run — a missing
/// config at this point is a startup bug, not a recoverable condition.
pub fn profile() -> &'static Profile {
    PROFILE.get().expect("config::profile() called before config::init()")
}

/// The global simulation rules.
pub fn rules() -> &'static Rules {
    RULES.get().expect("config::rules() called before config::init()")
}

pub fn is_initialized() -> bool {
    PROFILE.get().is_some() && RULES.get().is_some()
}

fn load_toml<T: serde::de::DeserializeOwned>(
    path: &Path,
    known_keys: &std::collections::HashSet<&str>,
) -> Result<(T, ConfigProvenance), ConfigError> {
    let contents = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;

    for w in validation::validate_unknown_keys(&contents, known_keys) {
        warn!("{w}");
    }

    let raw: toml::Value = contents.parse().unwrap_or(toml::Value::Table(Default::default()));
    let provenance = ConfigProvenance { explicit_keys: validation::walk_toml_keys(&raw, "").into_iter().collect() };

    let parsed: T = toml::from_str(&contents).map_err(|e| ConfigError::Parse(path.to_path_buf(), e))?;
    Ok((parsed, provenance))
}

impl Profile {
    /// Load using the standard search order: `$ELYX_CONFIG` -> `./profile.toml`
    /// -> built-in defaults.
    pub fn load() -> Self {
        Self::load_with_provenance().0
    }

    pub fn load_with_provenance() -> (Self, ConfigProvenance) {
        let known = validation::known_profile_keys();

        if let Ok(path) = std::env::var("ELYX_CONFIG") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match load_toml::<Profile>(&p, &known) {
                    Ok((profile, prov)) => {
                        info!(path = %p.display(), member = %profile.demographics.name, "loaded profile from ELYX_CONFIG");
                        return (profile, prov);
                    }
                    Err(e) => warn!(path = %p.display(), error = %e, "failed to load ELYX_CONFIG, falling back"),
                }
            } else {
                warn!(path = %path, "ELYX_CONFIG points to a non-existent file, falling back");
            }
        }

        let local = PathBuf::from("profile.toml");
        if local.exists() {
            match load_toml::<Profile>(&local, &known) {
                Ok((profile, prov)) => {
                    info!(member = %profile.demographics.name, "loaded profile from ./profile.toml");
                    return (profile, prov);
                }
                Err(e) => warn!(error = %e, "failed to load ./profile.toml, using defaults"),
            }
        }

        info!("no profile.toml found — using built-in defaults");
        (Profile::default(), ConfigProvenance::default())
    }
}

impl Rules {
    /// Load using the standard search order: `$ELYX_RULES` -> `./rules.toml`
    /// -> built-in defaults.
    pub fn load() -> Self {
        Self::load_with_provenance().0
    }

    pub fn load_with_provenance() -> (Self, ConfigProvenance) {
        let known = validation::known_rules_keys();

        if let Ok(path) = std::env::var("ELYX_RULES") {
            let p = PathBuf::from(&path);
            if p.exists() {
                match load_toml::<Rules>(&p, &known) {
                    Ok((rules, prov)) => {
                        info!(path = %p.display(), "loaded rules from ELYX_RULES");
                        return (rules, prov);
                    }
                    Err(e) => warn!(path = %p.display(), error = %e, "failed to load ELYX_RULES, falling back"),
                }
            } else {
                warn!(path = %path, "ELYX_RULES points to a non-existent file, falling back");
            }
        }

        let local = PathBuf::from("rules.toml");
        if local.exists() {
            match load_toml::<Rules>(&local, &known) {
                Ok((rules, prov)) => {
                    info!("loaded rules from ./rules.toml");
                    return (rules, prov);
                }
                Err(e) => warn!(error = %e, "failed to load ./rules.toml, using defaults"),
            }
        }

        info!("no rules.toml found — using built-in defaults");
        (Rules::default(), ConfigProvenance::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_profile_has_sane_dates() {
        let p = Profile::default();
        assert!(p.end_date() > p.start_date);
        assert_eq!(p.weeks(), p.weeks());
    }

    #[test]
    fn empty_toml_produces_defaults() {
        let rules: Rules = toml::from_str("").expect("empty TOML should parse");
        assert_eq!(rules.adherence.travel_penalty_per_day, defaults_mod_check());
    }

    fn defaults_mod_check() -> f64 {
        Rules::default().adherence.travel_penalty_per_day
    }

    #[test]
    fn provenance_empty_without_file() {
        let prov = ConfigProvenance::default();
        assert!(!prov.is_user_set("demographics.name"));
    }
}
