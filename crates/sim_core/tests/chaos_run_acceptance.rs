use std::sync::Arc;

use futures::StreamExt;
use shared::{
    domain::{LogKind, ServiceId},
    protocol::SimulationEvent,
};
use sim_core::{
    script::CHAOS_SCRIPT,
    views::{DashboardView, TERMINAL_PLACEHOLDER},
    RunOutcome, ScriptTiming, SeededEntropy, SimulationController,
};
use tokio_stream::wrappers::BroadcastStream;

const EXPECTED_MESSAGES: [&str; 8] = [
    "CRITICAL: 500 Internal Server Error in Tax-Calculator.",
    "LOG: ZeroDivisionError at tax_engine.py:42.",
    "🔍 Spawning Diagnosis Agent... Analyzing stack trace.",
    "🧠 Root Cause: Guard clause missing for zero-value input in calculation.",
    "🛠️ Spawning Coding Agent... Generating patch.",
    "🧪 Spawning Test Agent... Initializing Docker Sandbox.",
    "✅ Test Pass: 14/14 unit tests successful.",
    "🚀 Patch Deployed via Automated CI/CD. Service Restored.",
];

#[tokio::test(start_paused = true)]
async fn cold_trigger_plays_the_scripted_incident_end_to_end() {
    let controller = SimulationController::new_with_dependencies(
        ScriptTiming::default(),
        Arc::new(SeededEntropy::new(42)),
        Arc::new(sim_core::LocalClock),
    );
    let before = DashboardView::from_state(&controller.snapshot());
    assert_eq!(before.terminal.placeholder, Some(TERMINAL_PLACEHOLDER));
    assert!(!before.health.in_crash);

    let stream = BroadcastStream::new(controller.subscribe_events());
    let collector = tokio::spawn(async move {
        stream
            .filter_map(|item| async move { item.ok() })
            .take_while(|event| {
                let done = matches!(event, SimulationEvent::RunSettled);
                async move { !done }
            })
            .collect::<Vec<_>>()
            .await
    });

    assert_eq!(controller.trigger().await, RunOutcome::Completed);
    let events = collector.await.expect("collector");

    let messages: Vec<String> = events
        .iter()
        .filter_map(|event| match event {
            SimulationEvent::LogAppended { log, .. } => Some(log.message.clone()),
            _ => None,
        })
        .collect();
    assert_eq!(messages, EXPECTED_MESSAGES);

    let state = controller.snapshot();
    let kinds: Vec<LogKind> = state.logs.iter().map(|l| l.kind).collect();
    let expected_kinds: Vec<LogKind> = CHAOS_SCRIPT.iter().map(|s| s.kind).collect();
    assert_eq!(kinds, expected_kinds);

    let after = DashboardView::from_state(&state);
    assert!(!after.is_simulating);
    assert!(after.patch.approved_badge);
    assert_eq!(after.fleet.failing_services().count(), 0);
    assert_eq!(after.terminal.lines.len(), 8);
    assert!(after.health.current >= 97.0 && after.health.current <= 100.0);
    assert_eq!(after.health.status_label, "HEALTHY");
}

#[tokio::test(start_paused = true)]
async fn events_render_as_json_lines() {
    let controller = SimulationController::new_with_dependencies(
        ScriptTiming::default(),
        Arc::new(SeededEntropy::new(7)),
        Arc::new(sim_core::LocalClock),
    );
    let mut rx = controller.subscribe_events();
    controller.trigger().await;

    let first = rx.recv().await.expect("run started");
    let line = serde_json::to_string(&first).expect("serialize");
    let value: serde_json::Value = serde_json::from_str(&line).expect("parse");
    assert_eq!(value["type"], "run_started");
    let dip = value["payload"]["dip"]["health"].as_f64().expect("dip health");
    assert!((35.0..45.0).contains(&dip));

    let state_json = serde_json::to_value(controller.snapshot()).expect("state");
    assert_eq!(state_json["chaos_service"], serde_json::Value::Null);
    assert_eq!(state_json["logs"].as_array().map(Vec::len), Some(8));
    assert_eq!(
        serde_json::to_value(ServiceId::Tax).expect("id"),
        serde_json::json!("tax")
    );
}
