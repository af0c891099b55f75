//! Config validation: unknown-key detection with Levenshtein suggestions.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

/// A non-fatal config warning (typo, unrecognized section).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " — did you mean '{s}'?")?;
        }
        Ok(())
    }
}

/// Known dotted key paths for `profile.toml`.
pub fn known_profile_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        "demographics",
        "demographics.member_id",
        "demographics.name",
        "demographics.age",
        "demographics.sex",
        "demographics.goals",
        "baselines",
        "baselines.weight_kg",
        "baselines.rhr_bpm",
        "baselines.hrv_ms",
        "baselines.sleep_hours",
        "baselines.vo2max",
        "baselines.grip_kg",
        "baselines.fms_score",
        "baselines.fev1_l",
        "baselines.body_fat_percent",
        "baselines.lean_mass_kg",
        "baselines.bone_density_tscore",
        "baselines.labs",
        "baselines.labs.fpg_mgdl",
        "baselines.labs.ogtt2h_mgdl",
        "baselines.labs.fasting_insulin_uiu_ml",
        "baselines.labs.ldl_mgdl",
        "baselines.labs.hdl_mgdl",
        "baselines.labs.triglycerides_mgdl",
        "baselines.labs.apob_mgdl",
        "baselines.labs.apoa1_mgdl",
        "baselines.labs.lpa_mgdl",
        "baselines.labs.crp_mgl",
        "baselines.labs.esr_mm_hr",
        "baselines.labs.alt_u_l",
        "baselines.labs.ast_u_l",
        "baselines.labs.creatinine_mgdl",
        "baselines.labs.egfr",
        "baselines.labs.tsh_uiu_ml",
        "baselines.labs.t3_ng_dl",
        "baselines.labs.t4_ug_dl",
        "baselines.labs.cortisol_ug_dl",
        "baselines.labs.vitamin_d_ng_ml",
        "baselines.labs.b12_pg_ml",
        "baselines.labs.ferritin_ng_ml",
        "baselines.labs.omega3_index_percent",
        "bounds",
        "bounds.weight_kg",
        "bounds.rhr_bpm",
        "bounds.hrv_ms",
        "bounds.sleep_hours",
        "bounds.vo2max",
        "adherence_base",
        "cadence",
        "cadence.travel_every_n_weeks",
        "cadence.illness_probability_weekly",
        "cadence.quarterly_labs_weeks",
        "seed",
        "start_date",
        "months",
    ];
    keys.iter().copied().collect()
}

/// Known dotted key paths for `rules.toml`.
pub fn known_rules_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        "adherence",
        "adherence.travel_penalty_per_day",
        "adherence.illness_penalty_per_day",
        "adherence.noise_std",
        "sleep",
        "sleep.travel_drop_range",
        "sleep.noise_std",
        "rhr",
        "rhr.noise_std",
        "rhr.travel_bump_range",
        "rhr.illness_bump_range",
        "rhr.weekly_drop_if_good",
        "hrv",
        "hrv.noise_std",
        "hrv.travel_bump_range",
        "hrv.illness_bump_range",
        "hrv.weekly_gain_if_good_range",
        "weight",
        "weight.weekly_loss_if_high_adherence_kg",
        "weight.noise_std",
        "weight.travel_water_gain_kg",
        "glycemic",
        "glycemic.monthly_improvement_range",
        "glycemic.noise_std",
        "lipids",
        "lipids.ldl_monthly_range",
        "lipids.hdl_monthly_range",
        "lipids.tg_monthly_range",
        "lipids.noise_std",
        "inflammation",
        "inflammation.noise_std",
        "inflammation.mean_revert_rate",
        "fitness",
        "fitness.vo2_gain_range",
        "fitness.vo2_weekly_loss_if_low",
        "fitness.grip_gain_range",
        "fitness.fms_gain_per_4w_if_mobility2",
        "fitness.spirometry_monthly_gain_range",
        "body_comp",
        "body_comp.bf_drop_range",
        "body_comp.lean_mass_gain_kg",
    ];
    keys.iter().copied().collect()
}

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() { k.clone() } else { format!("{prefix}.{k}") };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

/// Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a_len = a.len();
    let b_len = b.len();
    if a_len == 0 {
        return b_len;
    }
    if b_len == 0 {
        return a_len;
    }

    let mut prev: Vec<usize> = (0..=b_len).collect();
    let mut curr = vec![0; b_len + 1];

    for (i, ca) in a.chars().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.chars().enumerate() {
            let cost = if ca == cb { 0 } else { 1 };
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b_len]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for &k in known {
        let dist = levenshtein(unknown, k);
        if dist <= 3 {
            match best {
                Some((_, best_dist)) if dist >= best_dist => {}
                _ => best = Some((k, dist)),
            }
        }
    }
    best.map(|(k, _)| k.to_string())
}

/// Parse a raw TOML string and return warnings for any unknown keys,
/// checked against `known`. Never fails on unknown keys — only warns.
pub fn validate_unknown_keys(raw_toml: &str, known: &HashSet<&str>) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(),
    };

    let found = walk_toml_keys(&value, "");
    let mut warnings = Vec::new();
    for key in found {
        if !known.contains(key.as_str()) {
            let suggestion = suggest_correction(&key, known);
            warnings.push(ValidationWarning {
                field: key.clone(),
                message: format!("unrecognized config key '{key}'"),
                suggestion,
            });
        }
    }
    warnings
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [baselines]
            [baselines.labs]
            ldl_mgdl = 130.0
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"baselines".to_string()));
        assert!(keys.contains(&"baselines.labs".to_string()));
        assert!(keys.contains(&"baselines.labs.ldl_mgdl".to_string()));
    }

    #[test]
    fn typo_key_produces_warning_with_suggestion() {
        let toml_str = "[baselines]\nweigth_kg = 80.0\n";
        let known = known_profile_keys();
        let warnings = validate_unknown_keys(toml_str, &known);
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].suggestion.as_deref(), Some("baselines.weight_kg"));
    }

    #[test]
    fn all_valid_keys_produce_zero_warnings() {
        let toml_str = "[demographics]\nname = \"Test\"\n\n[cadence]\ntravel_every_n_weeks = 4\n";
        let known = known_profile_keys();
        let warnings = validate_unknown_keys(toml_str, &known);
        assert!(warnings.is_empty(), "expected 0 warnings, got {warnings:?}");
    }

    #[test]
    fn garbage_key_gets_no_suggestion() {
        let known = known_profile_keys();
        assert!(suggest_correction("completely_unrelated_garbage_xyz", &known).is_none());
    }

    #[test]
    fn rules_known_keys_cover_domains() {
        let known = known_rules_keys();
        assert!(known.contains("adherence.noise_std"));
        assert!(known.contains("lipids.ldl_monthly_range"));
        assert!(known.contains("fitness.fms_gain_per_4w_if_mobility2"));
    }
}
