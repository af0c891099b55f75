//! C11: pull the latest known values for a role's owned tables into a
//! short, individually-citable bulleted brief for the orchestrator prompt.

use chrono::NaiveDate;

use crate::error::RagError;
use crate::types::{Dataset, Role};

fn latest<'a, T>(rows: &'a [T], since: Option<NaiveDate>, date_of: impl Fn(&T) -> NaiveDate) -> Option<&'a T> {
    let filtered: Vec<&T> = match since {
        Some(cutoff) => rows.iter().filter(|r| date_of(r) >= cutoff).collect(),
        None => rows.iter().collect(),
    };
    let pool = if filtered.is_empty() { rows.iter().collect::<Vec<_>>() } else { filtered };
    pool.into_iter().max_by_key(|r| date_of(r))
}

fn dr_warren_facts(dataset: &Dataset, since: Option<NaiveDate>) -> Vec<String> {
    match latest(&dataset.labs, since, |r| r.date) {
        Some(row) => vec![
            format!("latest LDL: {:.1} mg/dl [lab:{}]", row.ldl_mgdl, row.date),
            format!("latest ApoB: {:.1} mg/dl [lab:{}]", row.apob_mgdl, row.date),
        ],
        None => vec!["no lab data available yet".to_string()],
    }
}

fn advik_facts(dataset: &Dataset, since: Option<NaiveDate>) -> Vec<String> {
    match latest(&dataset.daily, since, |r| r.date) {
        Some(row) => vec![
            format!("latest RHR: {:.0} bpm [daily:{}]", row.rhr_bpm, row.date),
            format!("latest HRV: {:.1} ms [daily:{}]", row.hrv_ms, row.date),
        ],
        None => vec!["no daily biometrics available yet".to_string()],
    }
}

fn carla_facts(dataset: &Dataset, since: Option<NaiveDate>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(row) = latest(&dataset.daily, since, |r| r.date) {
        lines.push(format!("latest caloric balance: {:.0} kcal [daily:{}]", row.caloric_balance_kcal, row.date));
    }
    if let Some(row) = latest(&dataset.body_comp, since, |r| r.date) {
        lines.push(format!("latest body fat: {:.1}% [body_comp:{}]", row.dexa_bodyfat_percent, row.date));
    }
    if lines.is_empty() {
        lines.push("no nutrition/body-composition data available yet".to_string());
    }
    lines
}

fn rachel_facts(dataset: &Dataset, since: Option<NaiveDate>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(row) = latest(&dataset.fitness, since, |r| r.date) {
        lines.push(format!("latest FMS score: {:.1} [fitness:{}]", row.fms_score, row.date));
    }
    if let Some(row) = latest(&dataset.body_comp, since, |r| r.date) {
        lines.push(format!("latest lean mass: {:.1} kg [body_comp:{}]", row.dexa_lean_mass_kg, row.date));
    }
    if lines.is_empty() {
        lines.push("no fitness/body-composition data available yet".to_string());
    }
    lines
}

fn ruby_facts(dataset: &Dataset, since: Option<NaiveDate>) -> Vec<String> {
    let mut lines = Vec::new();
    if let Some(row) = latest(&dataset.interventions, since, |r| r.date) {
        lines.push(format!("latest intervention action: {} [intervention:{}]", row.action, row.id));
    }
    if let Some(row) = latest(&dataset.events, since, |r| r.date) {
        lines.push(format!("latest event: {} ({}) [event:{}]", row.event_type, row.note, row.date));
    }
    if lines.is_empty() {
        lines.push("no interventions or events on record yet".to_string());
    }
    lines
}

fn neel_facts(dataset: &Dataset, since: Option<NaiveDate>) -> Vec<String> {
    let month_date_of = |m: &str| NaiveDate::parse_from_str(&format!("{m}-01"), "%Y-%m-%d").unwrap_or_default();
    match latest(&dataset.kpis, since, |row| month_date_of(&row.month)) {
        Some(row) => vec![
            format!("latest monthly adherence: {:.1}% [kpi:{}]", row.adherence_avg, row.month),
            format!("rationale coverage: {:.0}% [kpi:{}]", row.rationale_coverage_percent, row.month),
        ],
        None => vec!["no monthly KPIs available yet".to_string()],
    }
}

/// Assemble the facts block for `role_name`. Fails with `RoleNotFound` if
/// the name does not resolve to a known role.
pub fn assemble(role_name: &str, dataset: &Dataset, since: Option<NaiveDate>) -> Result<String, RagError> {
    let role = Role::parse(role_name).ok_or_else(|| RagError::RoleNotFound(role_name.to_string()))?;

    let lines = match role {
        Role::DrWarren => dr_warren_facts(dataset, since),
        Role::Advik => advik_facts(dataset, since),
        Role::Carla => carla_facts(dataset, since),
        Role::Rachel => rachel_facts(dataset, since),
        Role::Ruby => ruby_facts(dataset, since),
        Role::Neel => neel_facts(dataset, since),
    };

    Ok(lines.into_iter().map(|l| format!("- {l}")).collect::<Vec<_>>().join("\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Profile, Rules};

    fn dataset() -> Dataset {
        crate::simulation::run(&Profile::default(), &Rules::default())
    }

    #[test]
    fn unknown_role_fails_loudly() {
        let ds = dataset();
        let err = assemble("nobody", &ds, None);
        assert!(matches!(err, Err(RagError::RoleNotFound(_))));
    }

    #[test]
    fn dr_warren_facts_cite_a_lab_row() {
        let ds = dataset();
        let text = assemble("Dr. Warren", &ds, None).expect("facts");
        assert!(text.contains("[lab:"));
        assert!(text.contains("LDL"));
    }

    #[test]
    fn since_filter_falls_back_when_no_rows_match() {
        let ds = dataset();
        let far_future = NaiveDate::from_ymd_opt(2999, 1, 1).unwrap();
        let text = assemble("Advik", &ds, Some(far_future)).expect("facts");
        assert!(!text.is_empty());
        assert!(text.contains("RHR"));
    }
}
