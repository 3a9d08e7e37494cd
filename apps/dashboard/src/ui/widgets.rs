//! Small reusable widgets: clipboard copy buttons and status pills.

use std::time::{Duration, Instant};

use arboard::Clipboard;
use eframe::egui;
use shared::error::{DashboardError, ErrorCode};
use tracing::debug;

use crate::ui::theme;

pub const COPIED_FEEDBACK: Duration = Duration::from_millis(2000);

pub trait ClipboardSink {
    fn set_text(&mut self, text: &str) -> Result<(), DashboardError>;
}

/// System clipboard via arboard; opens a handle per write.
pub struct ArboardClipboard;

impl ClipboardSink for ArboardClipboard {
    fn set_text(&mut self, text: &str) -> Result<(), DashboardError> {
        let clipboard_error =
            |err: arboard::Error| DashboardError::new(ErrorCode::Clipboard, err.to_string());
        let mut clipboard = Clipboard::new().map_err(clipboard_error)?;
        clipboard.set_text(text).map_err(clipboard_error)
    }
}

/// "Copied" feedback for one copy button.
#[derive(Debug, Clone, Copy, Default)]
pub struct CopyIndicator {
    copied_at: Option<Instant>,
}

impl CopyIndicator {
    /// Writes `text` to `sink`; flips to copied only if the write succeeds.
    pub fn copy(&mut self, sink: &mut dyn ClipboardSink, text: &str, now: Instant) -> bool {
        match sink.set_text(text) {
            Ok(()) => {
                self.copied_at = Some(now);
                true
            }
            Err(err) => {
                debug!(error = %err, "clipboard write rejected");
                false
            }
        }
    }

    pub fn is_copied(&self, now: Instant) -> bool {
        self.copied_at
            .is_some_and(|at| now.saturating_duration_since(at) < COPIED_FEEDBACK)
    }

    pub fn label(&self, now: Instant) -> &'static str {
        if self.is_copied(now) {
            "✓ Copied"
        } else {
            "Copy"
        }
    }
}

pub fn copy_button(
    ui: &mut egui::Ui,
    indicator: &mut CopyIndicator,
    sink: &mut dyn ClipboardSink,
    text: &str,
    now: Instant,
) {
    let copied = indicator.is_copied(now);
    let color = if copied {
        theme::HEALTHY
    } else {
        theme::TEXT_PRIMARY
    };
    let button = egui::Button::new(egui::RichText::new(indicator.label(now)).color(color).small())
        .min_size(egui::vec2(72.0, 22.0));
    if ui.add(button).on_hover_text(text).clicked() {
        indicator.copy(sink, text, now);
    }
}

pub fn status_pill(ui: &mut egui::Ui, text: &str, color: egui::Color32) {
    egui::Frame::NONE
        .fill(color.gamma_multiply(0.15))
        .stroke(egui::Stroke::new(1.0, color.gamma_multiply(0.6)))
        .corner_radius(10.0)
        .inner_margin(egui::Margin::symmetric(8, 2))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).color(color).small().strong());
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingSink {
        writes: Vec<String>,
    }

    impl ClipboardSink for RecordingSink {
        fn set_text(&mut self, text: &str) -> Result<(), DashboardError> {
            self.writes.push(text.to_string());
            Ok(())
        }
    }

    struct DeniedSink;

    impl ClipboardSink for DeniedSink {
        fn set_text(&mut self, _text: &str) -> Result<(), DashboardError> {
            Err(DashboardError::new(ErrorCode::Clipboard, "permission denied"))
        }
    }

    #[test]
    fn successful_copy_shows_feedback_for_two_seconds() {
        let mut sink = RecordingSink::default();
        let mut indicator = CopyIndicator::default();
        let start = Instant::now();

        assert!(indicator.copy(&mut sink, "pip install aegis-monitor", start));
        assert_eq!(sink.writes, ["pip install aegis-monitor"]);
        assert!(indicator.is_copied(start));
        assert!(indicator.is_copied(start + Duration::from_millis(1999)));
        assert!(!indicator.is_copied(start + COPIED_FEEDBACK));
        assert_eq!(indicator.label(start + COPIED_FEEDBACK), "Copy");
    }

    #[test]
    fn rejected_write_suppresses_the_flip() {
        let mut indicator = CopyIndicator::default();
        let now = Instant::now();

        assert!(!indicator.copy(&mut DeniedSink, "https://example.invalid", now));
        assert!(!indicator.is_copied(now));
        assert_eq!(indicator.label(now), "Copy");
    }

    #[test]
    fn copying_again_restarts_the_feedback_window() {
        let mut sink = RecordingSink::default();
        let mut indicator = CopyIndicator::default();
        let start = Instant::now();

        indicator.copy(&mut sink, "a", start);
        let again = start + Duration::from_millis(1500);
        indicator.copy(&mut sink, "a", again);
        assert!(indicator.is_copied(start + Duration::from_millis(3000)));
        assert!(!indicator.is_copied(again + COPIED_FEEDBACK));
    }

    #[test]
    fn indicators_are_independent() {
        let mut sink = RecordingSink::default();
        let mut install = CopyIndicator::default();
        let pull_request = CopyIndicator::default();
        let now = Instant::now();

        install.copy(&mut sink, "install", now);
        assert!(install.is_copied(now));
        assert!(!pull_request.is_copied(now));
    }
}
