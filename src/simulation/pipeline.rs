//! The C1-C8 pipeline driver.
//!
//! Owns the single seeded [`Rng`] for the duration of a run and threads it
//! through every stage in the strict order SPEC_FULL §2 requires. Each
//! stage function is pure given its inputs plus a `&mut Rng` — the driver's
//! only job is sequencing and collecting results into one [`Dataset`].

use tracing::info;

use crate::config::Rng;
use crate::types::{Dataset, Profile, Rules};

use super::{chat, daily, events, fitness, interventions, kpi, labs};

/// Run the full pipeline: C2 (events) through C8 (KPIs), in order.
pub fn run(profile: &Profile, rules: &Rules) -> Dataset {
    let mut rng = Rng::seed_from_u64(profile.seed);

    info!(seed = profile.seed, start = %profile.start_date, months = profile.months, "pipeline: starting run");

    let evts = events::generate_events(profile, &mut rng);
    info!(count = evts.len(), "pipeline: C2 events generated");

    let daily_rows = daily::simulate_daily(profile, rules, &evts, &mut rng);
    info!(count = daily_rows.len(), "pipeline: C3 daily rows simulated");

    let labs_rows = labs::simulate_labs(profile, rules, &daily_rows, &mut rng);
    info!(count = labs_rows.len(), "pipeline: C4 labs rows simulated");

    let (fitness_rows, body_comp_rows) = fitness::simulate_fitness(profile, rules, &daily_rows, &mut rng);
    info!(count = fitness_rows.len(), "pipeline: C5 fitness/body-comp rows simulated");

    let intervention_rows = interventions::detect_interventions(profile, &daily_rows, &labs_rows);
    info!(count = intervention_rows.len(), "pipeline: C6 interventions detected");

    let chat_rows = chat::synthesize_chat(profile, &intervention_rows, &mut rng);
    info!(count = chat_rows.len(), "pipeline: C7 chat messages synthesized");

    let kpi_rows = kpi::aggregate_kpis(profile, &daily_rows, &labs_rows, &fitness_rows, &intervention_rows, &chat_rows);
    info!(count = kpi_rows.len(), "pipeline: C8 KPI rows aggregated");

    Dataset {
        events: evts,
        daily: daily_rows,
        labs: labs_rows,
        fitness: fitness_rows,
        body_comp: body_comp_rows,
        interventions: intervention_rows,
        chats: chat_rows,
        kpis: kpi_rows,
    }
}
