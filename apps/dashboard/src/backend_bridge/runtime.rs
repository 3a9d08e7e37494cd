//! Runtime bridge between UI command queue and the simulation controller.

use std::{sync::Arc, thread};

use crossbeam_channel::{Receiver, Sender, TrySendError};
use shared::state::SimulationState;
use sim_core::{LocalClock, ScriptTiming, SeededEntropy, SimulationController};
use tokio::sync::watch;
use tracing::{debug, error, info, warn};

use crate::backend_bridge::commands::{command_name, BackendCommand};
use crate::config::Settings;
use crate::controller::events::{UiError, UiErrorContext, UiEvent};

/// Starts the backend worker thread. It exits after a `Shutdown` command or
/// once every command sender is gone.
pub fn launch(
    cmd_rx: Receiver<BackendCommand>,
    ui_tx: Sender<UiEvent>,
    settings: &Settings,
) -> thread::JoinHandle<()> {
    let settings = settings.clone();
    thread::spawn(move || run_backend(cmd_rx, ui_tx, settings))
}

fn run_backend(cmd_rx: Receiver<BackendCommand>, ui_tx: Sender<UiEvent>, settings: Settings) {
    let _ = ui_tx.try_send(UiEvent::Info("Simulation backend starting...".to_string()));

    let timing = match settings.timing() {
        Ok(timing) => timing,
        Err(err) => {
            error!("invalid simulation pacing: {err}");
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_dashboard_error(
                UiErrorContext::BackendStartup,
                &err,
            )));
            return;
        }
    };
    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(err) => {
            let _ = ui_tx.try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                format!("backend worker startup failure: failed to build runtime: {err}"),
            )));
            error!("failed to build backend runtime: {err}");
            return;
        }
    };

    runtime.block_on(async move {
        let controller = build_controller(timing, settings.seed);
        let forwarder = tokio::spawn(forward_state(controller.subscribe(), ui_tx.clone()));
        let _ = ui_tx.try_send(UiEvent::Info("Simulation backend ready".to_string()));
        info!(
            time_scale = settings.time_scale,
            seed = ?settings.seed,
            "simulation backend ready"
        );

        serve_commands(&controller, &cmd_rx);

        controller.shutdown();
        forwarder.abort();
    });
}

fn build_controller(timing: ScriptTiming, seed: Option<u64>) -> Arc<SimulationController> {
    match seed {
        Some(seed) => SimulationController::new_with_dependencies(
            timing,
            Arc::new(SeededEntropy::new(seed)),
            Arc::new(LocalClock),
        ),
        None => SimulationController::new(timing),
    }
}

fn serve_commands(controller: &Arc<SimulationController>, cmd_rx: &Receiver<BackendCommand>) {
    while let Ok(cmd) = cmd_rx.recv() {
        debug!(command = command_name(&cmd), "backend command received");
        match cmd {
            BackendCommand::InjectChaos => {
                let controller = Arc::clone(controller);
                tokio::spawn(async move {
                    let outcome = controller.trigger().await;
                    debug!(?outcome, "chaos trigger finished");
                });
            }
            BackendCommand::Shutdown => return,
        }
    }
    debug!("ui command channel disconnected; shutting down simulation");
}

async fn forward_state(mut state_rx: watch::Receiver<SimulationState>, ui_tx: Sender<UiEvent>) {
    loop {
        let snapshot = state_rx.borrow_and_update().clone();
        match ui_tx.try_send(UiEvent::StateChanged(snapshot)) {
            Ok(()) => {}
            Err(TrySendError::Full(_)) => warn!("ui event queue full; dropped a state snapshot"),
            Err(TrySendError::Disconnected(_)) => {
                debug!("ui event channel closed; state forwarding stopped");
                return;
            }
        }
        if state_rx.changed().await.is_err() {
            return;
        }
    }
}
