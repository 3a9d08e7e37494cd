use std::{
    sync::{
        atomic::{AtomicBool, AtomicU64, Ordering},
        Arc, Mutex, PoisonError,
    },
    time::Duration,
};

use shared::{
    domain::{LogId, TerminalLog, CHAOS_TARGET},
    protocol::{HealthPhase, SimulationEvent},
    state::{HealthWindow, SimulationState},
};
use tokio::sync::{broadcast, watch};
use tracing::{debug, info};

pub mod clock;
pub mod content;
pub mod entropy;
pub mod script;
pub mod timing;
pub mod views;

pub use clock::{Clock, LocalClock};
pub use entropy::{EntropySource, SeededEntropy, ThreadEntropy};
pub use timing::ScriptTiming;

use script::{BASELINE_RANGE, CHAOS_SCRIPT, DIP_RANGE, RESTORED_RANGE};

const EVENT_CHANNEL_CAPACITY: usize = 256;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunOutcome {
    /// The script played to the end and the fleet is idle again.
    Completed,
    /// Another run was active; nothing changed.
    AlreadyRunning,
    /// The controller was shut down while this run was in flight.
    Cancelled,
    /// The controller was already shut down; nothing changed.
    Detached,
}

/// Owns the simulation state and plays the chaos script on demand.
///
/// All mutations go through [`SimulationController::commit`], so subscribers
/// observe whole steps and nothing is published once [`shutdown`] returns.
///
/// [`shutdown`]: SimulationController::shutdown
pub struct SimulationController {
    timing: ScriptTiming,
    entropy: Arc<dyn EntropySource>,
    clock: Arc<dyn Clock>,
    running: AtomicBool,
    next_log_id: AtomicU64,
    detached: Mutex<bool>,
    state: watch::Sender<SimulationState>,
    events: broadcast::Sender<SimulationEvent>,
    shutdown: watch::Sender<bool>,
}

/// Releases the single-run guard even if the run future is dropped.
struct RunGuard<'a>(&'a AtomicBool);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

impl SimulationController {
    pub fn new(timing: ScriptTiming) -> Arc<Self> {
        Self::new_with_dependencies(timing, Arc::new(ThreadEntropy), Arc::new(LocalClock))
    }

    pub fn new_with_dependencies(
        timing: ScriptTiming,
        entropy: Arc<dyn EntropySource>,
        clock: Arc<dyn Clock>,
    ) -> Arc<Self> {
        let window = HealthWindow::seeded(|| BASELINE_RANGE.draw(entropy.as_ref()));
        let (state, _) = watch::channel(SimulationState::new(window));
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        let (shutdown, _) = watch::channel(false);
        Arc::new(Self {
            timing,
            entropy,
            clock,
            running: AtomicBool::new(false),
            next_log_id: AtomicU64::new(1),
            detached: Mutex::new(false),
            state,
            events,
            shutdown,
        })
    }

    pub fn timing(&self) -> ScriptTiming {
        self.timing
    }

    pub fn subscribe(&self) -> watch::Receiver<SimulationState> {
        self.state.subscribe()
    }

    pub fn subscribe_events(&self) -> broadcast::Receiver<SimulationEvent> {
        self.events.subscribe()
    }

    pub fn snapshot(&self) -> SimulationState {
        self.state.borrow().clone()
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::Acquire)
    }

    pub fn is_detached(&self) -> bool {
        *self.detached.lock().unwrap_or_else(PoisonError::into_inner)
    }

    /// Detaches the controller from its views. Any in-flight run stops at its
    /// next suspension point and no further state or events are published.
    pub fn shutdown(&self) {
        {
            let mut detached = self.detached.lock().unwrap_or_else(PoisonError::into_inner);
            if *detached {
                return;
            }
            if self.is_running() {
                let _ = self.events.send(SimulationEvent::RunCancelled);
            }
            *detached = true;
        }
        self.shutdown.send_replace(true);
        info!("simulation controller detached");
    }

    /// Plays one chaos run, or returns at once if a run is already active.
    pub async fn trigger(&self) -> RunOutcome {
        if self.is_detached() {
            debug!("chaos trigger ignored: controller detached");
            return RunOutcome::Detached;
        }
        if self
            .running
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            debug!("chaos trigger coalesced into active run");
            return RunOutcome::AlreadyRunning;
        }
        let _guard = RunGuard(&self.running);
        self.play_script().await
    }

    async fn play_script(&self) -> RunOutcome {
        let mut shutdown = self.shutdown.subscribe();

        let dip = DIP_RANGE.draw(self.entropy.as_ref());
        let entered = self.commit(|state| {
            state.is_simulating = true;
            state.chaos_service = Some(CHAOS_TARGET);
            state.logs.clear();
            state.patch_visible = false;
            state.patch_complete = false;
            let sample = state.health_window.push(dip);
            vec![
                SimulationEvent::RunStarted {
                    dip: sample.clone(),
                },
                SimulationEvent::HealthSampled {
                    phase: HealthPhase::Dip,
                    sample,
                },
            ]
        });
        if !entered {
            return RunOutcome::Detached;
        }
        info!(target_service = %CHAOS_TARGET, dip, "chaos run started");

        for (index, step) in CHAOS_SCRIPT.iter().enumerate() {
            let delay = self.timing.step_delay(self.entropy.as_ref());
            if !self.pause(&mut shutdown, delay).await {
                return self.abandoned(index);
            }

            let log = TerminalLog {
                id: self.allocate_log_id(),
                kind: step.kind,
                message: step.message.to_string(),
                timestamp: self.clock.timestamp(),
            };
            let recovery = step
                .recovery
                .map(|range| range.draw(self.entropy.as_ref()));

            let applied = self.commit(|state| {
                state.logs.push(log.clone());
                let mut events = vec![SimulationEvent::LogAppended { index, log }];
                if step.reveals_patch {
                    state.patch_visible = true;
                    events.push(SimulationEvent::PatchRevealed);
                }
                if let Some(health) = recovery {
                    events.push(SimulationEvent::HealthSampled {
                        phase: HealthPhase::Recovery,
                        sample: state.health_window.push(health),
                    });
                }
                events
            });
            if !applied {
                return self.abandoned(index);
            }
            debug!(
                index,
                kind = step.kind.as_str(),
                delay_ms = delay.as_millis() as u64,
                "script step applied"
            );
        }

        if !self.pause(&mut shutdown, self.timing.settle_delay).await {
            return self.abandoned(CHAOS_SCRIPT.len());
        }
        let restored = RESTORED_RANGE.draw(self.entropy.as_ref());
        let settled = self.commit(|state| {
            state.chaos_service = None;
            state.patch_complete = true;
            let sample = state.health_window.push(restored);
            state.is_simulating = false;
            vec![
                SimulationEvent::HealthSampled {
                    phase: HealthPhase::Restored,
                    sample,
                },
                SimulationEvent::RunSettled,
            ]
        });
        if !settled {
            return self.abandoned(CHAOS_SCRIPT.len());
        }
        info!(restored, "chaos run settled");
        RunOutcome::Completed
    }

    /// Applies one atomic change and publishes its events, unless detached.
    fn commit<F>(&self, change: F) -> bool
    where
        F: FnOnce(&mut SimulationState) -> Vec<SimulationEvent>,
    {
        let detached = self.detached.lock().unwrap_or_else(PoisonError::into_inner);
        if *detached {
            return false;
        }
        let mut events = Vec::new();
        self.state.send_modify(|state| events = change(state));
        for event in events {
            // No subscribers is fine; views may only watch the state.
            let _ = self.events.send(event);
        }
        true
    }

    /// Sleeps for `delay`; returns `false` if the controller detaches first.
    async fn pause(&self, shutdown: &mut watch::Receiver<bool>, delay: Duration) -> bool {
        if *shutdown.borrow_and_update() {
            return false;
        }
        tokio::select! {
            _ = tokio::time::sleep(delay) => !self.is_detached(),
            _ = shutdown.changed() => false,
        }
    }

    fn allocate_log_id(&self) -> LogId {
        LogId(self.next_log_id.fetch_add(1, Ordering::Relaxed))
    }

    fn abandoned(&self, step: usize) -> RunOutcome {
        info!(step, "chaos run abandoned after teardown");
        RunOutcome::Cancelled
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
