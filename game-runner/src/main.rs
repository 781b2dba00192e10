mod autoplay;
mod hint_client;
mod orchestrator;

use anyhow::Result;
use clap::Parser;

use shooter_core::constants::{WORLD_HEIGHT_DEFAULT, WORLD_WIDTH_DEFAULT};
use shooter_core::Game;

use crate::hint_client::HintClient;
use crate::orchestrator::{Orchestrator, OrchestratorConfig};

#[derive(Debug, Parser)]
#[command(
    name = "game-runner",
    about = "Headless slingshot session with AI strategic hints"
)]
struct Args {
    /// Deterministic session seed.
    #[arg(long, default_value_t = 7)]
    seed: u32,

    /// Base URL of the strategic-hint backend.
    #[arg(long, default_value = "http://127.0.0.1:8787")]
    backend: String,

    /// Number of 16 ms simulation ticks to run (0 = run until interrupted).
    #[arg(long, default_value_t = 3_750)]
    ticks: u64,

    #[arg(long, default_value_t = WORLD_WIDTH_DEFAULT)]
    width: u32,

    #[arg(long, default_value_t = WORLD_HEIGHT_DEFAULT)]
    height: u32,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let args = Args::parse();
    tracing::info!(
        seed = args.seed,
        backend = %args.backend,
        ticks = args.ticks,
        "starting headless slingshot session"
    );

    let game = Game::new(args.width, args.height, args.seed);
    let client = HintClient::new(&args.backend);
    let config = OrchestratorConfig {
        autoplay_seed: args.seed,
        ..Default::default()
    };

    let mut orchestrator = Orchestrator::new(game, client, config);
    orchestrator.run(args.ticks).await;

    let disp = orchestrator.display();
    tracing::info!(
        cycles = orchestrator.cycles_completed(),
        hint = disp.message.as_deref().unwrap_or("-"),
        rationale = disp.rationale.as_deref().unwrap_or("-"),
        "session finished"
    );
    if let Some(dbg) = &disp.debug {
        tracing::info!(
            debug = %serde_json::to_string(dbg).unwrap_or_default(),
            "last hint debug payload"
        );
    }

    Ok(())
}
