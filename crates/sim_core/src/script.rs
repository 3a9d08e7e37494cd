//! The canned failure-and-recovery narrative played by every chaos run.
//!
//! Side effects are part of the table: the run loop only reads `reveals_patch`
//! and `recovery` and never branches on the step index.

use shared::domain::LogKind;

use crate::entropy::HealthRange;

/// Baseline health of a quiet fleet; seeds the initial window.
pub const BASELINE_RANGE: HealthRange = HealthRange::new(95.0, 100.0);
/// Pushed once when a run starts.
pub const DIP_RANGE: HealthRange = HealthRange::new(35.0, 45.0);
/// Pushed once after the settle delay.
pub const RESTORED_RANGE: HealthRange = HealthRange::new(97.0, 100.0);

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScriptStep {
    pub kind: LogKind,
    pub message: &'static str,
    pub reveals_patch: bool,
    pub recovery: Option<HealthRange>,
}

impl ScriptStep {
    const fn log(kind: LogKind, message: &'static str) -> Self {
        Self {
            kind,
            message,
            reveals_patch: false,
            recovery: None,
        }
    }

    const fn revealing_patch(self) -> Self {
        Self {
            reveals_patch: true,
            ..self
        }
    }

    const fn recovering(self, low: f64, high: f64) -> Self {
        Self {
            recovery: Some(HealthRange::new(low, high)),
            ..self
        }
    }
}

pub const CHAOS_SCRIPT: [ScriptStep; 8] = [
    ScriptStep::log(
        LogKind::Error,
        "CRITICAL: 500 Internal Server Error in Tax-Calculator.",
    ),
    ScriptStep::log(
        LogKind::System,
        "LOG: ZeroDivisionError at tax_engine.py:42.",
    ),
    ScriptStep::log(
        LogKind::Agent,
        "🔍 Spawning Diagnosis Agent... Analyzing stack trace.",
    ),
    ScriptStep::log(
        LogKind::Agent,
        "🧠 Root Cause: Guard clause missing for zero-value input in calculation.",
    )
    .revealing_patch(),
    ScriptStep::log(
        LogKind::Agent,
        "🛠️ Spawning Coding Agent... Generating patch.",
    ),
    ScriptStep::log(
        LogKind::Agent,
        "🧪 Spawning Test Agent... Initializing Docker Sandbox.",
    )
    .recovering(85.0, 90.0),
    ScriptStep::log(
        LogKind::Success,
        "✅ Test Pass: 14/14 unit tests successful.",
    )
    .recovering(90.0, 95.0),
    ScriptStep::log(
        LogKind::Success,
        "🚀 Patch Deployed via Automated CI/CD. Service Restored.",
    )
    .recovering(95.0, 100.0),
];
