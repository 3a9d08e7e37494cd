use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    Validation,
    Clipboard,
    Runtime,
    Internal,
}

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[error("{code:?}: {message}")]
pub struct DashboardError {
    pub code: ErrorCode,
    pub message: String,
}

impl DashboardError {
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
        }
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Validation, message)
    }
}

/// A broken state invariant, reported by [`crate::state::SimulationState::check_invariants`].
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InvariantViolation {
    #[error("health window holds {len} samples, expected {expected}")]
    WindowLength { len: usize, expected: usize },
    #[error("health sample {label} is out of range: {health}")]
    HealthOutOfRange { label: String, health: f64 },
    #[error("log ids are not strictly increasing at position {position}")]
    LogOrder { position: usize },
    #[error("patch marked complete while hidden")]
    PatchCompleteWhileHidden,
    #[error("chaos service {service} set while no run is active")]
    ChaosWhileIdle { service: String },
}
