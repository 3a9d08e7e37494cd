//! Text rendering for the console runner.

use shared::{domain::CHAOS_TARGET, protocol::HealthPhase, protocol::SimulationEvent};
use sim_core::{content::PATCH, views::log_prefix, views::DashboardView};

fn phase_label(phase: HealthPhase) -> &'static str {
    match phase {
        HealthPhase::Dip => "dip",
        HealthPhase::Recovery => "recovery",
        HealthPhase::Restored => "restored",
    }
}

pub fn render_event(event: &SimulationEvent) -> String {
    match event {
        SimulationEvent::RunStarted { dip } => {
            format!("chaos injected into {CHAOS_TARGET}, health dipped to {:.1}", dip.health)
        }
        SimulationEvent::LogAppended { log, .. } => {
            format!("{} {} {}", log.timestamp, log_prefix(log.kind), log.message)
        }
        SimulationEvent::PatchRevealed => format!("patch revealed: {}", PATCH.file_label),
        SimulationEvent::HealthSampled { phase, sample } => format!(
            "health {:<8} {:>4} {:.1}",
            phase_label(*phase),
            sample.label,
            sample.health
        ),
        SimulationEvent::RunSettled => "run settled, fleet operational".to_string(),
        SimulationEvent::RunCancelled => "run cancelled".to_string(),
    }
}

pub fn render_summary(view: &DashboardView, completed: u32, requested: u32) -> Vec<String> {
    let failing = view
        .fleet
        .failing_services()
        .map(|id| id.as_str())
        .collect::<Vec<_>>();
    vec![
        "--- summary ---".to_string(),
        format!("runs completed: {completed}/{requested}"),
        format!(
            "terminal: {} lines ({})",
            view.terminal.lines.len(),
            view.terminal.status_label
        ),
        format!(
            "patch: {}",
            if view.patch.approved_badge {
                PATCH.approved_label
            } else {
                "pending"
            }
        ),
        format!(
            "health: {:.1} ({})",
            view.health.current, view.health.status_label
        ),
        format!(
            "failing services: {}",
            if failing.is_empty() {
                "none".to_string()
            } else {
                failing.join(", ")
            }
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::{
        domain::{HealthSample, LogId, LogKind, ServiceId, TerminalLog},
        state::{HealthWindow, SimulationState},
    };

    #[test]
    fn agent_logs_render_with_timestamp_and_prefix() {
        let event = SimulationEvent::LogAppended {
            index: 2,
            log: TerminalLog {
                id: LogId(3),
                kind: LogKind::Agent,
                message: "diagnosing".to_string(),
                timestamp: "10:00:02".to_string(),
            },
        };
        assert_eq!(render_event(&event), "10:00:02 [AGENT] diagnosing");
    }

    #[test]
    fn health_samples_render_with_one_decimal() {
        let event = SimulationEvent::HealthSampled {
            phase: HealthPhase::Recovery,
            sample: HealthSample {
                label: "25s".to_string(),
                health: 87.34,
            },
        };
        assert_eq!(render_event(&event), "health recovery  25s 87.3");
    }

    #[test]
    fn summary_lists_the_failing_service_mid_run() {
        let mut state = SimulationState::new(HealthWindow::seeded(|| 99.0));
        state.is_simulating = true;
        state.chaos_service = Some(ServiceId::Tax);
        state.health_window.push(40.0);
        let lines = render_summary(&DashboardView::from_state(&state), 0, 1);
        assert!(lines.contains(&"failing services: tax".to_string()));
        assert!(lines.contains(&"health: 40.0 (DEGRADED)".to_string()));
        assert!(lines.contains(&"patch: pending".to_string()));
    }

    #[test]
    fn idle_summary_reports_no_failures() {
        let state = SimulationState::new(HealthWindow::seeded(|| 98.0));
        let lines = render_summary(&DashboardView::from_state(&state), 1, 1);
        assert_eq!(lines[1], "runs completed: 1/1");
        assert_eq!(lines[2], "terminal: 0 lines (Standby)");
        assert_eq!(lines[5], "failing services: none");
    }
}
