//! UI/backend events and error modeling for the dashboard controller.

use shared::{
    error::{DashboardError, ErrorCode},
    state::SimulationState,
};

pub enum UiEvent {
    Info(String),
    StateChanged(SimulationState),
    Error(UiError),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorCategory {
    Runtime,
    Transport,
    Validation,
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiErrorContext {
    BackendStartup,
    InjectChaos,
    General,
}

#[derive(Debug, Clone)]
pub struct UiError {
    category: UiErrorCategory,
    context: UiErrorContext,
    message: String,
}

impl UiError {
    pub fn from_message(context: UiErrorContext, message: impl Into<String>) -> Self {
        let message = message.into();
        let lower = message.to_ascii_lowercase();
        let category = if lower.contains("runtime") || lower.contains("startup failure") {
            UiErrorCategory::Runtime
        } else if lower.contains("invalid")
            || lower.contains("must be")
            || lower.contains("overflow")
        {
            UiErrorCategory::Validation
        } else if lower.contains("disconnect")
            || lower.contains("queue")
            || lower.contains("unavailable")
        {
            UiErrorCategory::Transport
        } else {
            UiErrorCategory::Unknown
        };

        Self {
            category,
            context,
            message,
        }
    }

    pub fn from_dashboard_error(context: UiErrorContext, err: &DashboardError) -> Self {
        let category = match err.code {
            ErrorCode::Validation => UiErrorCategory::Validation,
            ErrorCode::Runtime => UiErrorCategory::Runtime,
            ErrorCode::Clipboard | ErrorCode::Internal => UiErrorCategory::Unknown,
        };
        Self {
            category,
            context,
            message: err.message.clone(),
        }
    }

    pub fn category(&self) -> UiErrorCategory {
        self.category
    }

    pub fn context(&self) -> UiErrorContext {
        self.context
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

pub fn category_label(category: UiErrorCategory) -> &'static str {
    match category {
        UiErrorCategory::Runtime => "Backend",
        UiErrorCategory::Transport => "Transport",
        UiErrorCategory::Validation => "Configuration",
        UiErrorCategory::Unknown => "Unexpected",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_runtime_build_failure_as_runtime() {
        let err = UiError::from_message(
            UiErrorContext::BackendStartup,
            "backend worker startup failure: failed to build runtime: no threads",
        );
        assert_eq!(err.category(), UiErrorCategory::Runtime);
        assert_eq!(err.context(), UiErrorContext::BackendStartup);
    }

    #[test]
    fn classifies_queue_problems_as_transport() {
        let err = UiError::from_message(
            UiErrorContext::InjectChaos,
            "simulation command queue is full; please retry",
        );
        assert_eq!(err.category(), UiErrorCategory::Transport);
    }

    #[test]
    fn dashboard_validation_errors_keep_their_message() {
        let err = UiError::from_dashboard_error(
            UiErrorContext::BackendStartup,
            &DashboardError::validation("time scale must be a positive finite number, got 0"),
        );
        assert_eq!(err.category(), UiErrorCategory::Validation);
        assert!(err.message().starts_with("time scale"));
        assert_eq!(category_label(err.category()), "Configuration");
    }
}
