//! `elyx-server` — serve the role-scoped RAG HTTP API (C10-C14) over a
//! previously generated dataset and vector index.

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use elyx_sim::api::{self, ApiState};
use elyx_sim::config::defaults::SERVER_DEFAULT_ADDR;
use elyx_sim::ingest::{self, HashEmbedder, VectorStore};
use elyx_sim::rag::Generator;
use elyx_sim::{csv_io, simulation};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "elyx-server")]
#[command(about = "Role-scoped retrieval-augmented question answering over a synthetic health dataset")]
struct Args {
    /// Directory holding the dataset CSV tables (produced by `elyx-simulate`).
    #[arg(long, default_value = "out/dataset")]
    data_dir: PathBuf,

    /// Directory holding the persistent vector index.
    #[arg(long, default_value = "out/index")]
    index_dir: PathBuf,

    /// Re-ingest (drop and recreate the collection) on startup even if one
    /// already exists.
    #[arg(long)]
    reingest: bool,

    #[arg(long, default_value_t = SERVER_DEFAULT_ADDR.to_string())]
    bind: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let args = Args::parse();

    let dataset = match csv_io::read_dataset(&args.data_dir) {
        Ok(dataset) => dataset,
        Err(e) => {
            tracing::warn!(error = %e, data_dir = %args.data_dir.display(), "elyx-server: no dataset on disk, generating one in memory");
            let profile = elyx_sim::types::Profile::load();
            let rules = elyx_sim::types::Rules::load();
            simulation::run(&profile, &rules)
        }
    };

    let store = VectorStore::open(&args.index_dir)?;
    if args.reingest || !store.is_ready() {
        info!("elyx-server: (re)building vector index");
        let docs = ingest::build_documents(&dataset);
        store.reingest(&docs)?;
    }

    let state = ApiState {
        dataset: Arc::new(dataset),
        store,
        embedder: Arc::new(HashEmbedder::new()),
        generator: Arc::new(Generator::with_template_default()),
    };

    let app = api::create_app(state);
    let bind: std::net::SocketAddr = args.bind.parse()?;
    info!(%bind, "elyx-server: listening");
    let listener = tokio::net::TcpListener::bind(bind).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
