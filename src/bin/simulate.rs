//! `elyx-simulate` — run the C1-C9 pipeline once and write the resulting
//! tables (and, optionally, the vector index) to disk.

use std::path::PathBuf;

use clap::Parser;
use elyx_sim::config;
use elyx_sim::types::{Profile, Rules};
use elyx_sim::{csv_io, ingest, simulation};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "elyx-simulate")]
#[command(about = "Generate a longitudinal synthetic health dataset")]
struct Args {
    /// Directory the CSV tables are written to.
    #[arg(long, default_value = "out/dataset")]
    out_dir: PathBuf,

    /// Directory the vector index is written to. Skipped if omitted.
    #[arg(long)]
    index_dir: Option<PathBuf>,

    /// Override the RNG seed from the loaded profile.
    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let args = Args::parse();

    let mut profile = Profile::load();
    if let Some(seed) = args.seed {
        profile.seed = seed;
    }
    let rules = Rules::load();
    config::init(profile.clone(), rules.clone());

    info!(member = %profile.demographics.name, seed = profile.seed, "elyx-simulate: starting run");
    let dataset = simulation::run(&profile, &rules);

    csv_io::write_dataset(&dataset, &args.out_dir)?;
    info!(out_dir = %args.out_dir.display(), "elyx-simulate: tables written");

    if let Some(index_dir) = &args.index_dir {
        ingest::ingest(&dataset, index_dir)?;
        info!(index_dir = %index_dir.display(), "elyx-simulate: vector index built");
    }

    Ok(())
}
