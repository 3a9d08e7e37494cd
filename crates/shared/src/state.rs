use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::{
    domain::{HealthSample, ServiceId, TerminalLog},
    error::InvariantViolation,
};

pub const HEALTH_WINDOW_LEN: usize = 20;
pub const HEALTH_MIN: f64 = 0.0;
pub const HEALTH_MAX: f64 = 100.0;

pub fn clamp_health(value: f64) -> f64 {
    if value.is_nan() {
        return HEALTH_MIN;
    }
    value.clamp(HEALTH_MIN, HEALTH_MAX)
}

/// Fixed-length FIFO of health samples. Every push evicts the oldest sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthWindow {
    samples: VecDeque<HealthSample>,
    pushed: u64,
}

impl HealthWindow {
    /// Fills the window with [`HEALTH_WINDOW_LEN`] samples labelled `0s`.. from `health`.
    pub fn seeded(mut health: impl FnMut() -> f64) -> Self {
        let samples = (0..HEALTH_WINDOW_LEN)
            .map(|i| HealthSample {
                label: format!("{i}s"),
                health: clamp_health(health()),
            })
            .collect();
        Self {
            samples,
            pushed: HEALTH_WINDOW_LEN as u64,
        }
    }

    /// Appends a clamped sample and returns it as stored.
    pub fn push(&mut self, health: f64) -> HealthSample {
        let sample = HealthSample {
            label: format!("{}s", self.pushed),
            health: clamp_health(health),
        };
        self.pushed += 1;
        self.samples.pop_front();
        self.samples.push_back(sample.clone());
        sample
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn latest(&self) -> Option<&HealthSample> {
        self.samples.back()
    }

    pub fn iter(&self) -> impl Iterator<Item = &HealthSample> {
        self.samples.iter()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub is_simulating: bool,
    pub chaos_service: Option<ServiceId>,
    pub logs: Vec<TerminalLog>,
    pub health_window: HealthWindow,
    pub patch_visible: bool,
    pub patch_complete: bool,
}

impl SimulationState {
    pub fn new(health_window: HealthWindow) -> Self {
        Self {
            is_simulating: false,
            chaos_service: None,
            logs: Vec::new(),
            health_window,
            patch_visible: false,
            patch_complete: false,
        }
    }

    pub fn is_idle(&self) -> bool {
        !self.is_simulating && self.chaos_service.is_none()
    }

    pub fn check_invariants(&self) -> Result<(), InvariantViolation> {
        if self.health_window.len() != HEALTH_WINDOW_LEN {
            return Err(InvariantViolation::WindowLength {
                len: self.health_window.len(),
                expected: HEALTH_WINDOW_LEN,
            });
        }
        if let Some(sample) = self
            .health_window
            .iter()
            .find(|s| !(HEALTH_MIN..=HEALTH_MAX).contains(&s.health))
        {
            return Err(InvariantViolation::HealthOutOfRange {
                label: sample.label.clone(),
                health: sample.health,
            });
        }
        if let Some(position) = self
            .logs
            .windows(2)
            .position(|pair| pair[0].id >= pair[1].id)
        {
            return Err(InvariantViolation::LogOrder {
                position: position + 1,
            });
        }
        if self.patch_complete && !self.patch_visible {
            return Err(InvariantViolation::PatchCompleteWhileHidden);
        }
        if let (Some(service), false) = (self.chaos_service, self.is_simulating) {
            return Err(InvariantViolation::ChaosWhileIdle {
                service: service.to_string(),
            });
        }
        Ok(())
    }
}
