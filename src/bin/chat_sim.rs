//! `elyx-chat-sim` — an offline batch client that drives a multi-day
//! synthetic conversation against a running `elyx-server` instance over
//! HTTP. Never runs in the same process as the pipeline or the server.

use std::path::PathBuf;

use clap::Parser;
use elyx_sim::chatsim::{self, RagClient};
use elyx_sim::types::Profile;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "elyx-chat-sim")]
#[command(about = "Drive a simulated multi-day conversation against a running RAG server")]
struct Args {
    /// Base URL of the running `elyx-server` instance.
    #[arg(long, default_value = "http://127.0.0.1:8080")]
    server_url: String,

    /// Where to write the resulting transcript as JSON.
    #[arg(long, default_value = "out/chat_sim_transcript.json")]
    out_file: PathBuf,

    #[arg(long, default_value_t = 7)]
    seed: u64,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_env_filter(tracing_subscriber::EnvFilter::from_default_env()).init();

    let args = Args::parse();
    let profile = Profile::load();
    let client = RagClient::new(args.server_url.clone());

    info!(server_url = %args.server_url, "elyx-chat-sim: starting conversation loop");
    let transcript = chatsim::run(&profile, &client, args.seed).await;
    info!(messages = transcript.len(), "elyx-chat-sim: loop finished");

    if let Some(parent) = args.out_file.parent() {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(&transcript)?;
    std::fs::write(&args.out_file, json)?;
    info!(out_file = %args.out_file.display(), "elyx-chat-sim: transcript written");

    Ok(())
}
