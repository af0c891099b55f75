//! Table I/O: `Dataset` <-> the CSV files on disk.
//!
//! Out of scope per SPEC_FULL §1 ("CSV I/O plumbing and column-rename
//! maps") beyond the minimal plumbing actually needed to produce/consume
//! the tables in §6: one header row, comma-separated, UTF-8, stable date
//! and timestamp formats. No column-rename configuration layer — the
//! header is the field name.

use std::collections::HashMap;
use std::path::Path;

use chrono::{DateTime, NaiveDate, Utc};
use tracing::warn;

use crate::error::{MalformedRow, PipelineError};
use crate::types::{
    BodyCompRow, ChatRow, DailyRow, Dataset, EventRow, EventType, FitnessRow, InterventionRow, KpiMonthRow, LabsRow, RuleId,
};

const DATE_FMT: &str = "%Y-%m-%d";
const TIMESTAMP_FMT: &str = "%Y-%m-%d %H:%M%:z";

fn fmt_date(d: NaiveDate) -> String {
    d.format(DATE_FMT).to_string()
}

fn fmt_ts(t: DateTime<Utc>) -> String {
    t.format(TIMESTAMP_FMT).to_string()
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), DATE_FMT).ok()
}

fn parse_ts(s: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_str(s.trim(), TIMESTAMP_FMT).ok().map(|t| t.with_timezone(&Utc))
}

fn open_writer(dir: &Path, name: &str) -> Result<csv::Writer<std::fs::File>, PipelineError> {
    let path = dir.join(name);
    csv::Writer::from_path(&path).map_err(|e| PipelineError::CsvIo { table: name.to_string(), source: std::io::Error::new(std::io::ErrorKind::Other, e) })
}

fn open_reader(dir: &Path, name: &str) -> Result<csv::Reader<std::fs::File>, PipelineError> {
    let path = dir.join(name);
    if !path.exists() {
        return Err(PipelineError::MissingSourceFile(name.to_string()));
    }
    csv::Reader::from_path(&path).map_err(|e| PipelineError::CsvIo { table: name.to_string(), source: std::io::Error::new(std::io::ErrorKind::Other, e) })
}

/// Write every table in `dataset` to `dir`, one CSV file per entity.
pub fn write_dataset(dataset: &Dataset, dir: &Path) -> Result<(), PipelineError> {
    std::fs::create_dir_all(dir).map_err(|e| PipelineError::CsvIo { table: "out_dir".to_string(), source: e })?;

    write_events(dataset, dir)?;
    write_daily(dataset, dir)?;
    write_labs(dataset, dir)?;
    write_fitness(dataset, dir)?;
    write_body_comp(dataset, dir)?;
    write_interventions(dataset, dir)?;
    write_chats(dataset, dir)?;
    write_kpis(dataset, dir)?;
    Ok(())
}

fn finish(mut w: csv::Writer<std::fs::File>, table: &str) -> Result<(), PipelineError> {
    w.flush().map_err(|e| PipelineError::CsvIo { table: table.to_string(), source: e })
}

fn write_events(dataset: &Dataset, dir: &Path) -> Result<(), PipelineError> {
    let mut w = open_writer(dir, "events.csv")?;
    w.write_record(["date", "type", "intensity", "note"]).ok();
    for e in &dataset.events {
        w.write_record([fmt_date(e.date), e.event_type.to_string(), e.intensity.to_string(), e.note.clone()])
            .map_err(|err| PipelineError::CsvIo { table: "events.csv".to_string(), source: std::io::Error::new(std::io::ErrorKind::Other, err) })?;
    }
    finish(w, "events.csv")
}

fn write_daily(dataset: &Dataset, dir: &Path) -> Result<(), PipelineError> {
    let mut w = open_writer(dir, "daily.csv")?;
    w.write_record([
        "date", "adherence", "steps", "active_minutes", "weight_kg", "rhr_bpm", "hrv_ms", "sleep_hours", "sleep_quality",
        "stress_score", "soreness", "caloric_balance_kcal",
    ])
    .ok();
    for d in &dataset.daily {
        w.write_record([
            fmt_date(d.date),
            format!("{:.3}", d.adherence),
            d.steps.to_string(),
            d.active_minutes.to_string(),
            format!("{:.2}", d.weight_kg),
            format!("{:.0}", d.rhr_bpm),
            format!("{:.1}", d.hrv_ms),
            format!("{:.1}", d.sleep_hours),
            format!("{:.1}", d.sleep_quality),
            format!("{:.1}", d.stress_score),
            format!("{:.1}", d.soreness),
            format!("{:.1}", d.caloric_balance_kcal),
        ])
        .map_err(|err| PipelineError::CsvIo { table: "daily.csv".to_string(), source: std::io::Error::new(std::io::ErrorKind::Other, err) })?;
    }
    finish(w, "daily.csv")
}

fn write_labs(dataset: &Dataset, dir: &Path) -> Result<(), PipelineError> {
    let mut w = open_writer(dir, "labs.csv")?;
    w.write_record([
        "date", "fpg_mgdl", "ogtt2h_mgdl", "fasting_insulin_uiu_ml", "total_cholesterol_mgdl", "ldl_mgdl", "hdl_mgdl",
        "triglycerides_mgdl", "apob_mgdl", "apoa1_mgdl", "lpa_mgdl", "crp_mgl", "esr_mm_hr", "alt_u_l", "ast_u_l",
        "creatinine_mgdl", "egfr", "tsh_uiu_ml", "t3_ng_dl", "t4_ug_dl", "cortisol_ug_dl", "vitamin_d_ng_ml", "b12_pg_ml",
        "ferritin_ng_ml", "omega3_index_percent",
    ])
    .ok();
    for l in &dataset.labs {
        w.write_record([
            fmt_date(l.date),
            format!("{:.2}", l.fpg_mgdl),
            format!("{:.2}", l.ogtt2h_mgdl),
            format!("{:.2}", l.fasting_insulin_uiu_ml),
            format!("{:.2}", l.total_cholesterol_mgdl),
            format!("{:.2}", l.ldl_mgdl),
            format!("{:.2}", l.hdl_mgdl),
            format!("{:.2}", l.triglycerides_mgdl),
            format!("{:.2}", l.apob_mgdl),
            format!("{:.2}", l.apoa1_mgdl),
            format!("{:.2}", l.lpa_mgdl),
            format!("{:.2}", l.crp_mgl),
            format!("{:.2}", l.esr_mm_hr),
            format!("{:.2}", l.alt_u_l),
            format!("{:.2}", l.ast_u_l),
            format!("{:.2}", l.creatinine_mgdl),
            format!("{:.2}", l.egfr),
            format!("{:.2}", l.tsh_uiu_ml),
            format!("{:.2}", l.t3_ng_dl),
            format!("{:.2}", l.t4_ug_dl),
            format!("{:.2}", l.cortisol_ug_dl),
            format!("{:.2}", l.vitamin_d_ng_ml),
            format!("{:.2}", l.b12_pg_ml),
            format!("{:.2}", l.ferritin_ng_ml),
            format!("{:.2}", l.omega3_index_percent),
        ])
        .map_err(|err| PipelineError::CsvIo { table: "labs.csv".to_string(), source: std::io::Error::new(std::io::ErrorKind::Other, err) })?;
    }
    finish(w, "labs.csv")
}

fn write_fitness(dataset: &Dataset, dir: &Path) -> Result<(), PipelineError> {
    let mut w = open_writer(dir, "fitness.csv")?;
    w.write_record(["date", "vo2max_est", "five_km_time_min", "one_rm_deadlift_kg", "one_rm_squat_kg", "grip_strength_kg", "fms_score", "spirometry_fev1_l"]).ok();
    for f in &dataset.fitness {
        w.write_record([
            fmt_date(f.date),
            format!("{:.2}", f.vo2max_est),
            format!("{:.2}", f.five_km_time_min),
            format!("{:.0}", f.one_rm_deadlift_kg),
            format!("{:.0}", f.one_rm_squat_kg),
            format!("{:.2}", f.grip_strength_kg),
            format!("{:.2}", f.fms_score),
            format!("{:.2}", f.spirometry_fev1_l),
        ])
        .map_err(|err| PipelineError::CsvIo { table: "fitness.csv".to_string(), source: std::io::Error::new(std::io::ErrorKind::Other, err) })?;
    }
    finish(w, "fitness.csv")
}

fn write_body_comp(dataset: &Dataset, dir: &Path) -> Result<(), PipelineError> {
    let mut w = open_writer(dir, "body_comp.csv")?;
    w.write_record(["date", "dexa_bodyfat_percent", "dexa_lean_mass_kg", "bone_density_tscore"]).ok();
    for b in &dataset.body_comp {
        w.write_record([fmt_date(b.date), format!("{:.2}", b.dexa_bodyfat_percent), format!("{:.2}", b.dexa_lean_mass_kg), format!("{:.2}", b.bone_density_tscore)])
            .map_err(|err| PipelineError::CsvIo { table: "body_comp.csv".to_string(), source: std::io::Error::new(std::io::ErrorKind::Other, err) })?;
    }
    finish(w, "body_comp.csv")
}

fn write_interventions(dataset: &Dataset, dir: &Path) -> Result<(), PipelineError> {
    let mut w = open_writer(dir, "interventions.csv")?;
    w.write_record(["id", "date", "rule_id", "trigger_metric", "trigger_value", "action", "owner", "follow_up_date", "note"]).ok();
    for iv in &dataset.interventions {
        w.write_record([
            iv.id.clone(),
            fmt_date(iv.date),
            iv.rule_id.to_string(),
            iv.trigger_metric.clone(),
            format!("{:.2}", iv.trigger_value),
            iv.action.clone(),
            iv.owner.clone(),
            fmt_date(iv.follow_up_date),
            iv.note.clone(),
        ])
        .map_err(|err| PipelineError::CsvIo { table: "interventions.csv".to_string(), source: std::io::Error::new(std::io::ErrorKind::Other, err) })?;
    }
    finish(w, "interventions.csv")
}

fn write_chats(dataset: &Dataset, dir: &Path) -> Result<(), PipelineError> {
    let mut w = open_writer(dir, "chats.csv")?;
    w.write_record(["timestamp", "sender", "role", "text", "tags", "linked_intervention_id"]).ok();
    for c in &dataset.chats {
        w.write_record([
            fmt_ts(c.timestamp),
            c.sender.clone(),
            c.role.clone(),
            c.text.clone(),
            c.tags.join(";"),
            c.linked_intervention_id.clone().unwrap_or_default(),
        ])
        .map_err(|err| PipelineError::CsvIo { table: "chats.csv".to_string(), source: std::io::Error::new(std::io::ErrorKind::Other, err) })?;
    }
    finish(w, "chats.csv")
}

fn write_kpis(dataset: &Dataset, dir: &Path) -> Result<(), PipelineError> {
    let mut w = open_writer(dir, "kpis_monthly.csv")?;
    w.write_record([
        "month", "adherence_avg", "sessions_total", "consults_attended", "consults_missed", "weight_change_kg", "sleep_avg",
        "stress_avg", "ldl_change_mgdl", "vo2max_change", "rationale_coverage_percent",
    ])
    .ok();
    for k in &dataset.kpis {
        w.write_record([
            k.month.clone(),
            format!("{:.1}", k.adherence_avg),
            k.sessions_total.to_string(),
            k.consults_attended.to_string(),
            k.consults_missed.to_string(),
            format!("{:.2}", k.weight_change_kg),
            format!("{:.1}", k.sleep_avg),
            format!("{:.1}", k.stress_avg),
            format!("{:.1}", k.ldl_change_mgdl),
            format!("{:.1}", k.vo2max_change),
            format!("{:.1}", k.rationale_coverage_percent),
        ])
        .map_err(|err| PipelineError::CsvIo { table: "kpis_monthly.csv".to_string(), source: std::io::Error::new(std::io::ErrorKind::Other, err) })?;
    }
    finish(w, "kpis_monthly.csv")
}

/// Read back every table from `dir` into a `Dataset`. Fails loudly
/// (`MissingSourceFile`) if a table is absent; a single malformed row is
/// logged and skipped, the rest of that table still loads.
pub fn read_dataset(dir: &Path) -> Result<Dataset, PipelineError> {
    Ok(Dataset {
        events: read_events(dir)?,
        daily: read_daily(dir)?,
        labs: read_labs(dir)?,
        fitness: read_fitness(dir)?,
        body_comp: read_body_comp(dir)?,
        interventions: read_interventions(dir)?,
        chats: read_chats(dir)?,
        kpis: read_kpis(dir)?,
    })
}

fn warn_skip(table: &str, line: usize, reason: impl std::fmt::Display) {
    let malformed = MalformedRow { table: table.to_string(), line, reason: reason.to_string() };
    warn!("{malformed}");
}

fn read_events(dir: &Path) -> Result<Vec<EventRow>, PipelineError> {
    let mut r = open_reader(dir, "events.csv")?;
    let mut out = Vec::new();
    for (i, rec) in r.records().enumerate() {
        let rec = match rec {
            Ok(r) => r,
            Err(e) => {
                warn_skip("events.csv", i + 2, e);
                continue;
            }
        };
        let Some(date) = rec.get(0).and_then(parse_date) else {
            warn_skip("events.csv", i + 2, "unparseable date");
            continue;
        };
        let event_type = match rec.get(1) {
            Some("travel") => EventType::Travel,
            Some("illness") => EventType::Illness,
            _ => {
                warn_skip("events.csv", i + 2, "unknown event type");
                continue;
            }
        };
        let Some(intensity) = rec.get(2).and_then(|s| s.parse::<u8>().ok()) else {
            warn_skip("events.csv", i + 2, "unparseable intensity");
            continue;
        };
        out.push(EventRow { date, event_type, intensity, note: rec.get(3).unwrap_or_default().to_string() });
    }
    Ok(out)
}

fn read_daily(dir: &Path) -> Result<Vec<DailyRow>, PipelineError> {
    let mut r = open_reader(dir, "daily.csv")?;
    let mut out = Vec::new();
    for (i, rec) in r.records().enumerate() {
        let rec = match rec {
            Ok(r) => r,
            Err(e) => {
                warn_skip("daily.csv", i + 2, e);
                continue;
            }
        };
        let parsed = (|| -> Option<DailyRow> {
            Some(DailyRow {
                date: parse_date(rec.get(0)?)?,
                adherence: rec.get(1)?.parse().ok()?,
                steps: rec.get(2)?.parse().ok()?,
                active_minutes: rec.get(3)?.parse().ok()?,
                weight_kg: rec.get(4)?.parse().ok()?,
                rhr_bpm: rec.get(5)?.parse().ok()?,
                hrv_ms: rec.get(6)?.parse().ok()?,
                sleep_hours: rec.get(7)?.parse().ok()?,
                sleep_quality: rec.get(8)?.parse().ok()?,
                stress_score: rec.get(9)?.parse().ok()?,
                soreness: rec.get(10)?.parse().ok()?,
                caloric_balance_kcal: rec.get(11)?.parse().ok()?,
            })
        })();
        match parsed {
            Some(row) => out.push(row),
            None => warn_skip("daily.csv", i + 2, "unparseable row"),
        }
    }
    Ok(out)
}

fn read_labs(dir: &Path) -> Result<Vec<LabsRow>, PipelineError> {
    let mut r = open_reader(dir, "labs.csv")?;
    let mut out = Vec::new();
    for (i, rec) in r.records().enumerate() {
        let rec = match rec {
            Ok(r) => r,
            Err(e) => {
                warn_skip("labs.csv", i + 2, e);
                continue;
            }
        };
        let parsed = (|| -> Option<LabsRow> {
            Some(LabsRow {
                date: parse_date(rec.get(0)?)?,
                fpg_mgdl: rec.get(1)?.parse().ok()?,
                ogtt2h_mgdl: rec.get(2)?.parse().ok()?,
                fasting_insulin_uiu_ml: rec.get(3)?.parse().ok()?,
                total_cholesterol_mgdl: rec.get(4)?.parse().ok()?,
                ldl_mgdl: rec.get(5)?.parse().ok()?,
                hdl_mgdl: rec.get(6)?.parse().ok()?,
                triglycerides_mgdl: rec.get(7)?.parse().ok()?,
                apob_mgdl: rec.get(8)?.parse().ok()?,
                apoa1_mgdl: rec.get(9)?.parse().ok()?,
                lpa_mgdl: rec.get(10)?.parse().ok()?,
                crp_mgl: rec.get(11)?.parse().ok()?,
                esr_mm_hr: rec.get(12)?.parse().ok()?,
                alt_u_l: rec.get(13)?.parse().ok()?,
                ast_u_l: rec.get(14)?.parse().ok()?,
                creatinine_mgdl: rec.get(15)?.parse().ok()?,
                egfr: rec.get(16)?.parse().ok()?,
                tsh_uiu_ml: rec.get(17)?.parse().ok()?,
                t3_ng_dl: rec.get(18)?.parse().ok()?,
                t4_ug_dl: rec.get(19)?.parse().ok()?,
                cortisol_ug_dl: rec.get(20)?.parse().ok()?,
                vitamin_d_ng_ml: rec.get(21)?.parse().ok()?,
                b12_pg_ml: rec.get(22)?.parse().ok()?,
                ferritin_ng_ml: rec.get(23)?.parse().ok()?,
                omega3_index_percent: rec.get(24)?.parse().ok()?,
            })
        })();
        match parsed {
            Some(row) => out.push(row),
            None => warn_skip("labs.csv", i + 2, "unparseable row"),
        }
    }
    Ok(out)
}

fn read_fitness(dir: &Path) -> Result<Vec<FitnessRow>, PipelineError> {
    let mut r = open_reader(dir, "fitness.csv")?;
    let mut out = Vec::new();
    for (i, rec) in r.records().enumerate() {
        let rec = match rec {
            Ok(r) => r,
            Err(e) => {
                warn_skip("fitness.csv", i + 2, e);
                continue;
            }
        };
        let parsed = (|| -> Option<FitnessRow> {
            Some(FitnessRow {
                date: parse_date(rec.get(0)?)?,
                vo2max_est: rec.get(1)?.parse().ok()?,
                five_km_time_min: rec.get(2)?.parse().ok()?,
                one_rm_deadlift_kg: rec.get(3)?.parse().ok()?,
                one_rm_squat_kg: rec.get(4)?.parse().ok()?,
                grip_strength_kg: rec.get(5)?.parse().ok()?,
                fms_score: rec.get(6)?.parse().ok()?,
                spirometry_fev1_l: rec.get(7)?.parse().ok()?,
            })
        })();
        match parsed {
            Some(row) => out.push(row),
            None => warn_skip("fitness.csv", i + 2, "unparseable row"),
        }
    }
    Ok(out)
}

fn read_body_comp(dir: &Path) -> Result<Vec<BodyCompRow>, PipelineError> {
    let mut r = open_reader(dir, "body_comp.csv")?;
    let mut out = Vec::new();
    for (i, rec) in r.records().enumerate() {
        let rec = match rec {
            Ok(r) => r,
            Err(e) => {
                warn_skip("body_comp.csv", i + 2, e);
                continue;
            }
        };
        let parsed = (|| -> Option<BodyCompRow> {
            Some(BodyCompRow {
                date: parse_date(rec.get(0)?)?,
                dexa_bodyfat_percent: rec.get(1)?.parse().ok()?,
                dexa_lean_mass_kg: rec.get(2)?.parse().ok()?,
                bone_density_tscore: rec.get(3)?.parse().ok()?,
            })
        })();
        match parsed {
            Some(row) => out.push(row),
            None => warn_skip("body_comp.csv", i + 2, "unparseable row"),
        }
    }
    Ok(out)
}

fn parse_rule_id(s: &str) -> Option<RuleId> {
    match s {
        "CV-01" => Some(RuleId::Cv01),
        "LIP-02" => Some(RuleId::Lip02),
        _ => None,
    }
}

fn read_interventions(dir: &Path) -> Result<Vec<InterventionRow>, PipelineError> {
    let mut r = open_reader(dir, "interventions.csv")?;
    let mut out = Vec::new();
    for (i, rec) in r.records().enumerate() {
        let rec = match rec {
            Ok(r) => r,
            Err(e) => {
                warn_skip("interventions.csv", i + 2, e);
                continue;
            }
        };
        let parsed = (|| -> Option<InterventionRow> {
            Some(InterventionRow {
                id: rec.get(0)?.to_string(),
                date: parse_date(rec.get(1)?)?,
                rule_id: parse_rule_id(rec.get(2)?)?,
                trigger_metric: rec.get(3)?.to_string(),
                trigger_value: rec.get(4)?.parse().ok()?,
                action: rec.get(5)?.to_string(),
                owner: rec.get(6)?.to_string(),
                follow_up_date: parse_date(rec.get(7)?)?,
                note: rec.get(8)?.to_string(),
            })
        })();
        match parsed {
            Some(row) => out.push(row),
            None => warn_skip("interventions.csv", i + 2, "unparseable row"),
        }
    }
    Ok(out)
}

fn read_chats(dir: &Path) -> Result<Vec<ChatRow>, PipelineError> {
    let mut r = open_reader(dir, "chats.csv")?;
    let mut out = Vec::new();
    for (i, rec) in r.records().enumerate() {
        let rec = match rec {
            Ok(r) => r,
            Err(e) => {
                warn_skip("chats.csv", i + 2, e);
                continue;
            }
        };
        let parsed = (|| -> Option<ChatRow> {
            let timestamp = parse_ts(rec.get(0)?)?;
            let tags = rec.get(4).map(|s| s.split(';').filter(|s| !s.is_empty()).map(str::to_string).collect()).unwrap_or_default();
            let linked = rec.get(5).filter(|s| !s.is_empty()).map(str::to_string);
            Some(ChatRow { timestamp, sender: rec.get(1)?.to_string(), role: rec.get(2)?.to_string(), text: rec.get(3)?.to_string(), tags, linked_intervention_id: linked })
        })();
        match parsed {
            Some(row) => out.push(row),
            None => warn_skip("chats.csv", i + 2, "unparseable row"),
        }
    }
    Ok(out)
}

fn read_kpis(dir: &Path) -> Result<Vec<KpiMonthRow>, PipelineError> {
    let mut r = open_reader(dir, "kpis_monthly.csv")?;
    let mut out = Vec::new();
    for (i, rec) in r.records().enumerate() {
        let rec = match rec {
            Ok(r) => r,
            Err(e) => {
                warn_skip("kpis_monthly.csv", i + 2, e);
                continue;
            }
        };
        let parsed = (|| -> Option<KpiMonthRow> {
            Some(KpiMonthRow {
                month: rec.get(0)?.to_string(),
                adherence_avg: rec.get(1)?.parse().ok()?,
                sessions_total: rec.get(2)?.parse().ok()?,
                consults_attended: rec.get(3)?.parse().ok()?,
                consults_missed: rec.get(4)?.parse().ok()?,
                weight_change_kg: rec.get(5)?.parse().ok()?,
                sleep_avg: rec.get(6)?.parse().ok()?,
                stress_avg: rec.get(7)?.parse().ok()?,
                ldl_change_mgdl: rec.get(8)?.parse().ok()?,
                vo2max_change: rec.get(9)?.parse().ok()?,
                rationale_coverage_percent: rec.get(10)?.parse().ok()?,
            })
        })();
        match parsed {
            Some(row) => out.push(row),
            None => warn_skip("kpis_monthly.csv", i + 2, "unparseable row"),
        }
    }
    Ok(out)
}

/// Collection of per-type field lists used by `crate::ingest` to build a
/// Document's salient-fields text. Kept alongside the I/O layer since it
/// mirrors the same column names.
pub fn salient_fields() -> HashMap<&'static str, &'static [&'static str]> {
    let mut m: HashMap<&'static str, &'static [&'static str]> = HashMap::new();
    m.insert("daily", &["steps", "rhr_bpm", "hrv_ms", "sleep_hours"]);
    m.insert("lab", &["ldl_mgdl", "apob_mgdl", "hdl_mgdl", "triglycerides_mgdl"]);
    m.insert("fitness", &["vo2max_est", "one_rm_deadlift_kg", "one_rm_squat_kg"]);
    m.insert("body_comp", &["dexa_bodyfat_percent", "dexa_lean_mass_kg", "bone_density_tscore"]);
    m.insert("intervention", &["trigger_metric", "action", "owner"]);
    m.insert("kpi", &["adherence_avg", "sessions_total", "weight_change_kg"]);
    m.insert("event", &["type", "intensity", "note"]);
    m
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Profile, Rules};
    use tempfile::tempdir;

    #[test]
    fn round_trips_through_disk() {
        let profile = Profile::default();
        let rules = Rules::default();
        let dataset = crate::simulation::run(&profile, &rules);

        let dir = tempdir().expect("tempdir");
        write_dataset(&dataset, dir.path()).expect("write");
        let loaded = read_dataset(dir.path()).expect("read");

        assert_eq!(dataset.daily.len(), loaded.daily.len());
        assert_eq!(dataset.labs.len(), loaded.labs.len());
        assert_eq!(dataset.interventions.len(), loaded.interventions.len());
        assert_eq!(dataset.chats.len(), loaded.chats.len());
        assert_eq!(dataset.kpis.len(), loaded.kpis.len());
        for (a, b) in dataset.daily.iter().zip(loaded.daily.iter()) {
            assert_eq!(a.date, b.date);
            assert!((a.weight_kg - b.weight_kg).abs() < 1e-6);
        }
    }

    #[test]
    fn malformed_row_is_skipped_not_fatal() {
        let dir = tempdir().expect("tempdir");
        std::fs::write(dir.path().join("events.csv"), "date,type,intensity,note\n2025-01-01,travel,2,ok\nNOT-A-DATE,travel,2,bad\n2025-01-03,illness,1,ok2\n")
            .expect("write csv");
        let events = read_events(dir.path()).expect("read");
        assert_eq!(events.len(), 2);
    }

    #[test]
    fn missing_table_is_fatal() {
        let dir = tempdir().expect("tempdir");
        let err = read_dataset(dir.path());
        assert!(err.is_err());
    }
}
