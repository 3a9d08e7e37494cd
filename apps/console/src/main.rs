use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use futures::StreamExt;
use shared::protocol::SimulationEvent;
use sim_core::{
    views::DashboardView, LocalClock, RunOutcome, ScriptTiming, SeededEntropy,
    SimulationController,
};
use tokio_stream::wrappers::{errors::BroadcastStreamRecvError, BroadcastStream};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

mod report;

/// Plays chaos runs headlessly and prints what the dashboard would show.
#[derive(Parser, Debug)]
#[command(name = "aegis-sim")]
struct Args {
    /// Number of back-to-back runs.
    #[arg(long, default_value_t = 1)]
    runs: u32,
    /// Print every event as one JSON line instead of text.
    #[arg(long)]
    json: bool,
    /// Multiplier applied to every script delay.
    #[arg(long, env = "AEGIS_TIME_SCALE", default_value_t = 1.0)]
    time_scale: f64,
    /// Seed for deterministic health samples and delays.
    #[arg(long, env = "AEGIS_SEED")]
    seed: Option<u64>,
    #[arg(long, env = "AEGIS_LOG", default_value = "info")]
    log_filter: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing(&args.log_filter);

    let timing = ScriptTiming::default()
        .scaled(args.time_scale)
        .context("invalid --time-scale")?;
    let controller = match args.seed {
        Some(seed) => SimulationController::new_with_dependencies(
            timing,
            Arc::new(SeededEntropy::new(seed)),
            Arc::new(LocalClock),
        ),
        None => SimulationController::new(timing),
    };

    let printer = tokio::spawn(print_events(
        BroadcastStream::new(controller.subscribe_events()),
        args.json,
    ));
    let interrupt = {
        let controller = Arc::clone(&controller);
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("interrupt received, detaching simulation");
                controller.shutdown();
            }
        })
    };

    let mut completed = 0;
    for run in 1..=args.runs {
        match controller.trigger().await {
            RunOutcome::Completed => completed += 1,
            outcome => {
                warn!(run, ?outcome, "stopping before all runs completed");
                break;
            }
        }
    }

    let view = DashboardView::from_state(&controller.snapshot());
    controller.shutdown();
    interrupt.abort();
    let _ = interrupt.await;
    // Dropping the last handle closes the event stream and lets the printer finish.
    drop(controller);
    printer.await.context("event printer task failed")??;

    if !args.json {
        for line in report::render_summary(&view, completed, args.runs) {
            println!("{line}");
        }
    }
    Ok(())
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn print_events(mut events: BroadcastStream<SimulationEvent>, json: bool) -> Result<()> {
    while let Some(item) = events.next().await {
        match item {
            Ok(event) if json => println!("{}", serde_json::to_string(&event)?),
            Ok(event) => println!("{}", report::render_event(&event)),
            Err(BroadcastStreamRecvError::Lagged(skipped)) => {
                warn!(skipped, "event printer fell behind");
            }
        }
    }
    Ok(())
}
