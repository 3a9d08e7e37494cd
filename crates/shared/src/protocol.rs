use serde::{Deserialize, Serialize};

use crate::domain::{HealthSample, TerminalLog};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthPhase {
    Dip,
    Recovery,
    Restored,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum ControllerCommand {
    InjectChaos,
    Shutdown,
}

/// One mutation of the simulation state, published after it is applied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "payload", rename_all = "snake_case")]
pub enum SimulationEvent {
    RunStarted {
        dip: HealthSample,
    },
    LogAppended {
        index: usize,
        log: TerminalLog,
    },
    PatchRevealed,
    HealthSampled {
        phase: HealthPhase,
        sample: HealthSample,
    },
    RunSettled,
    RunCancelled,
}

impl SimulationEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SimulationEvent::RunStarted { .. } => "run_started",
            SimulationEvent::LogAppended { .. } => "log_appended",
            SimulationEvent::PatchRevealed => "patch_revealed",
            SimulationEvent::HealthSampled { .. } => "health_sampled",
            SimulationEvent::RunSettled => "run_settled",
            SimulationEvent::RunCancelled => "run_cancelled",
        }
    }
}
