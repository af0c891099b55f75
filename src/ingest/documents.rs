//! Build one [`Document`] per source row, text-first: a pipe-separated
//! "field:value" string of the row's most salient fields, plus metadata
//! the retriever can filter on.

use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::types::{DocType, Document, DocumentMetadata};
use crate::types::{BodyCompRow, ChatRow, DailyRow, Dataset, EventRow, FitnessRow, InterventionRow, KpiMonthRow, LabsRow};

use super::embed::HashEmbedder;

fn numerics(pairs: &[(&str, f64)]) -> BTreeMap<String, f64> {
    pairs.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
}

fn month_start(month: &str) -> NaiveDate {
    let mut parts = month.splitn(2, '-');
    let y: i32 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(1970);
    let m: u32 = parts.next().and_then(|s| s.parse().ok()).unwrap_or(1);
    NaiveDate::from_ymd_opt(y, m, 1).unwrap_or_default()
}

fn event_doc(row: &EventRow, embedder: &HashEmbedder) -> Document {
    let text = format!("type:{} | intensity:{} | notes:{}", row.event_type, row.intensity, row.note);
    Document {
        id: format!("event:{}", row.date),
        embedding: embedder.encode(&text),
        metadata: DocumentMetadata {
            doc_type: DocType::Event,
            date: row.date,
            month: None,
            numerics: numerics(&[("intensity", f64::from(row.intensity))]),
        },
        text,
    }
}

fn daily_doc(row: &DailyRow, embedder: &HashEmbedder) -> Document {
    let text = format!("steps:{} | rhr:{:.0} | hrv:{:.1} | sleep:{:.1}", row.steps, row.rhr_bpm, row.hrv_ms, row.sleep_hours);
    Document {
        id: format!("daily:{}", row.date),
        embedding: embedder.encode(&text),
        metadata: DocumentMetadata {
            doc_type: DocType::Daily,
            date: row.date,
            month: None,
            numerics: numerics(&[("rhr_bpm", row.rhr_bpm), ("hrv_ms", row.hrv_ms)]),
        },
        text,
    }
}

fn lab_doc(row: &LabsRow, embedder: &HashEmbedder) -> Document {
    let text = format!(
        "ldl:{:.1} | apob:{:.1} | hdl:{:.1} | triglycerides:{:.1}",
        row.ldl_mgdl, row.apob_mgdl, row.hdl_mgdl, row.triglycerides_mgdl
    );
    Document {
        id: format!("lab:{}", row.date),
        embedding: embedder.encode(&text),
        metadata: DocumentMetadata {
            doc_type: DocType::Lab,
            date: row.date,
            month: None,
            numerics: numerics(&[("ldl_mgdl", row.ldl_mgdl), ("apob_mgdl", row.apob_mgdl)]),
        },
        text,
    }
}

fn fitness_doc(row: &FitnessRow, embedder: &HashEmbedder) -> Document {
    let text = format!(
        "vo2max:{:.1} | deadlift:{:.0} | squat:{:.0}",
        row.vo2max_est, row.one_rm_deadlift_kg, row.one_rm_squat_kg
    );
    Document {
        id: format!("fitness:{}", row.date),
        embedding: embedder.encode(&text),
        metadata: DocumentMetadata { doc_type: DocType::Fitness, date: row.date, month: None, numerics: numerics(&[("vo2max", row.vo2max_est)]) },
        text,
    }
}

fn body_comp_doc(row: &BodyCompRow, embedder: &HashEmbedder) -> Document {
    let text = format!(
        "bodyfat:{:.1} | lean_mass:{:.1} | bone_density:{:.2}",
        row.dexa_bodyfat_percent, row.dexa_lean_mass_kg, row.bone_density_tscore
    );
    Document {
        id: format!("body_comp:{}", row.date),
        embedding: embedder.encode(&text),
        metadata: DocumentMetadata {
            doc_type: DocType::BodyComp,
            date: row.date,
            month: None,
            numerics: numerics(&[("bodyfat_percent", row.dexa_bodyfat_percent)]),
        },
        text,
    }
}

fn intervention_doc(row: &InterventionRow, embedder: &HashEmbedder) -> Document {
    let text = format!("trigger:{} | action:{} | owner:{}", row.trigger_metric, row.action, row.owner);
    Document {
        id: format!("intervention:{}", row.id),
        embedding: embedder.encode(&text),
        metadata: DocumentMetadata { doc_type: DocType::Intervention, date: row.date, month: None, numerics: numerics(&[("trigger_value", row.trigger_value)]) },
        text,
    }
}

fn kpi_doc(row: &KpiMonthRow, embedder: &HashEmbedder) -> Document {
    let text = format!(
        "adherence:{:.1} | sessions:{} | weight_change:{:.1}",
        row.adherence_avg, row.sessions_total, row.weight_change_kg
    );
    Document {
        id: format!("kpi:{}", row.month),
        embedding: embedder.encode(&text),
        metadata: DocumentMetadata {
            doc_type: DocType::Kpi,
            date: month_start(&row.month),
            month: Some(row.month.clone()),
            numerics: numerics(&[("adherence_avg", row.adherence_avg), ("sessions_total", f64::from(row.sessions_total))]),
        },
        text,
    }
}

fn chat_doc(row: &ChatRow, embedder: &HashEmbedder) -> Document {
    let text = row.text.clone();
    Document {
        id: format!("chat:{}", row.timestamp.to_rfc3339()),
        embedding: embedder.encode(&text),
        metadata: DocumentMetadata { doc_type: DocType::Chat, date: row.timestamp.date_naive(), month: None, numerics: BTreeMap::new() },
        text,
    }
}

/// Build a `Document` for every row in `dataset`, in table order.
pub fn build_documents(dataset: &Dataset) -> Vec<Document> {
    let embedder = HashEmbedder::new();
    let mut docs = Vec::new();

    docs.extend(dataset.events.iter().map(|r| event_doc(r, &embedder)));
    docs.extend(dataset.daily.iter().map(|r| daily_doc(r, &embedder)));
    docs.extend(dataset.labs.iter().map(|r| lab_doc(r, &embedder)));
    docs.extend(dataset.fitness.iter().map(|r| fitness_doc(r, &embedder)));
    docs.extend(dataset.body_comp.iter().map(|r| body_comp_doc(r, &embedder)));
    docs.extend(dataset.interventions.iter().map(|r| intervention_doc(r, &embedder)));
    docs.extend(dataset.kpis.iter().map(|r| kpi_doc(r, &embedder)));
    docs.extend(dataset.chats.iter().map(|r| chat_doc(r, &embedder)));

    docs
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Profile, Rules};

    #[test]
    fn every_row_produces_a_document() {
        let profile = Profile::default();
        let rules = Rules::default();
        let dataset = crate::simulation::run(&profile, &rules);
        let docs = build_documents(&dataset);

        let expected = dataset.events.len()
            + dataset.daily.len()
            + dataset.labs.len()
            + dataset.fitness.len()
            + dataset.body_comp.len()
            + dataset.interventions.len()
            + dataset.kpis.len()
            + dataset.chats.len();
        assert_eq!(docs.len(), expected);
    }

    #[test]
    fn document_ids_are_unique() {
        let profile = Profile::default();
        let rules = Rules::default();
        let dataset = crate::simulation::run(&profile, &rules);
        let docs = build_documents(&dataset);

        let mut ids: Vec<&str> = docs.iter().map(|d| d.id.as_str()).collect();
        ids.sort_unstable();
        let before = ids.len();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn lab_documents_carry_ldl_and_apob_numerics() {
        let profile = Profile::default();
        let rules = Rules::default();
        let dataset = crate::simulation::run(&profile, &rules);
        let docs = build_documents(&dataset);
        let lab_doc = docs.iter().find(|d| d.metadata.doc_type == DocType::Lab).expect("at least one lab doc");
        assert!(lab_doc.metadata.numerics.contains_key("ldl_mgdl"));
        assert!(lab_doc.metadata.numerics.contains_key("apob_mgdl"));
    }
}
