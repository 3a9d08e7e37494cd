//! Read-only projections of [`SimulationState`] for the dashboard panels.

use serde::Serialize;
use shared::{
    domain::{HealthSample, IconKey, LogId, LogKind, ServiceId, ServiceStatus, FLEET},
    state::SimulationState,
};

pub const INJECT_CHAOS_LABEL: &str = "INJECT CHAOS / SIMULATE FAILURE";
pub const SIMULATING_LABEL: &str = "SIMULATION IN PROGRESS...";
pub const TERMINAL_PLACEHOLDER: &str = "Awaiting system events... All services operational.";
pub const DIMMED_OPACITY: f32 = 0.3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetRow {
    pub id: ServiceId,
    pub name: &'static str,
    pub icon: IconKey,
    pub status: ServiceStatus,
    pub failing: bool,
    pub status_label: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FleetView {
    pub rows: Vec<FleetRow>,
    pub button_disabled: bool,
    pub button_label: &'static str,
}

impl FleetView {
    pub fn from_state(state: &SimulationState) -> Self {
        let rows = FLEET
            .iter()
            .map(|service| {
                let failing = state.chaos_service == Some(service.id);
                FleetRow {
                    id: service.id,
                    name: service.name,
                    icon: service.icon,
                    status: if failing {
                        ServiceStatus::Error
                    } else {
                        service.status
                    },
                    failing,
                    status_label: if failing {
                        "CRITICAL FAILURE"
                    } else {
                        "Operational"
                    },
                }
            })
            .collect();
        Self {
            rows,
            button_disabled: state.is_simulating,
            button_label: if state.is_simulating {
                SIMULATING_LABEL
            } else {
                INJECT_CHAOS_LABEL
            },
        }
    }

    pub fn failing_services(&self) -> impl Iterator<Item = ServiceId> + '_ {
        self.rows.iter().filter(|row| row.failing).map(|row| row.id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerminalLine {
    pub id: LogId,
    pub timestamp: String,
    pub prefix: &'static str,
    pub kind: LogKind,
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TerminalView {
    pub lines: Vec<TerminalLine>,
    pub placeholder: Option<&'static str>,
    pub active: bool,
    pub status_label: &'static str,
}

pub fn log_prefix(kind: LogKind) -> &'static str {
    match kind {
        LogKind::Agent => "[AGENT]",
        LogKind::System | LogKind::Success | LogKind::Error => "[SYSTEM]",
    }
}

impl TerminalView {
    pub fn from_state(state: &SimulationState) -> Self {
        let lines = state
            .logs
            .iter()
            .map(|log| TerminalLine {
                id: log.id,
                timestamp: log.timestamp.clone(),
                prefix: log_prefix(log.kind),
                kind: log.kind,
                message: log.message.clone(),
            })
            .collect::<Vec<_>>();
        Self {
            placeholder: lines.is_empty().then_some(TERMINAL_PLACEHOLDER),
            lines,
            active: state.is_simulating,
            status_label: if state.is_simulating {
                "Active Observation"
            } else {
                "Standby"
            },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PatchView {
    pub diff_opacity: f32,
    pub card_opacity: f32,
    pub approved_badge: bool,
}

impl PatchView {
    pub fn from_state(state: &SimulationState) -> Self {
        Self {
            diff_opacity: if state.patch_visible {
                1.0
            } else {
                DIMMED_OPACITY
            },
            card_opacity: if state.patch_complete {
                1.0
            } else {
                DIMMED_OPACITY
            },
            approved_badge: state.patch_complete,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HealthView {
    pub samples: Vec<HealthSample>,
    pub in_crash: bool,
    pub status_label: &'static str,
    pub current: f64,
}

impl HealthView {
    pub fn from_state(state: &SimulationState) -> Self {
        let in_crash = state.chaos_service.is_some();
        Self {
            samples: state.health_window.iter().cloned().collect(),
            in_crash,
            status_label: if in_crash { "DEGRADED" } else { "HEALTHY" },
            current: state
                .health_window
                .latest()
                .map(|sample| sample.health)
                .unwrap_or_default(),
        }
    }
}

/// Everything the dashboard draws for one frame.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardView {
    pub is_simulating: bool,
    pub fleet: FleetView,
    pub terminal: TerminalView,
    pub patch: PatchView,
    pub health: HealthView,
}

impl DashboardView {
    pub fn from_state(state: &SimulationState) -> Self {
        Self {
            is_simulating: state.is_simulating,
            fleet: FleetView::from_state(state),
            terminal: TerminalView::from_state(state),
            patch: PatchView::from_state(state),
            health: HealthView::from_state(state),
        }
    }
}
