//! Dark "operations console" palette and frame helpers.

use eframe::egui;
use shared::domain::{LogKind, ServiceStatus};

pub const APP_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(9, 11, 17);
pub const CARD_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(17, 21, 30);
pub const CARD_STROKE: egui::Color32 = egui::Color32::from_rgb(38, 45, 61);
pub const TERMINAL_BACKGROUND: egui::Color32 = egui::Color32::from_rgb(5, 7, 11);
pub const TEXT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(226, 232, 240);
pub const TEXT_MUTED: egui::Color32 = egui::Color32::from_rgb(115, 128, 150);
pub const ACCENT: egui::Color32 = egui::Color32::from_rgb(34, 211, 238);
pub const HEALTHY: egui::Color32 = egui::Color32::from_rgb(52, 211, 153);
pub const CRITICAL: egui::Color32 = egui::Color32::from_rgb(248, 113, 113);
pub const AGENT: egui::Color32 = egui::Color32::from_rgb(167, 139, 250);
pub const WARNING: egui::Color32 = egui::Color32::from_rgb(251, 191, 36);
pub const DIFF_REMOVED_BG: egui::Color32 = egui::Color32::from_rgb(63, 22, 28);
pub const DIFF_ADDED_BG: egui::Color32 = egui::Color32::from_rgb(18, 54, 38);

pub fn dashboard_visuals() -> egui::Visuals {
    let mut visuals = egui::Visuals::dark();
    visuals.override_text_color = Some(TEXT_PRIMARY);
    visuals.window_fill = CARD_BACKGROUND;
    visuals.panel_fill = APP_BACKGROUND;
    visuals.extreme_bg_color = TERMINAL_BACKGROUND;
    visuals.faint_bg_color = lighten_color(CARD_BACKGROUND, 0.04);
    visuals.hyperlink_color = ACCENT;
    visuals.selection.bg_fill = ACCENT.gamma_multiply(0.6);
    visuals.window_corner_radius = egui::CornerRadius::same(10);
    visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, CARD_STROKE);
    visuals.widgets.inactive.bg_fill = lighten_color(CARD_BACKGROUND, 0.06);
    visuals.widgets.hovered.bg_fill = lighten_color(CARD_BACKGROUND, 0.12);
    visuals
}

pub fn install(ctx: &egui::Context) {
    ctx.set_visuals(dashboard_visuals());
    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(8.0, 6.0);
        style.spacing.button_padding = egui::vec2(12.0, 6.0);
    });
}

pub fn card_frame() -> egui::Frame {
    egui::Frame::NONE
        .fill(CARD_BACKGROUND)
        .stroke(egui::Stroke::new(1.0, CARD_STROKE))
        .corner_radius(10.0)
        .inner_margin(egui::Margin::symmetric(14, 12))
}

pub fn inset_frame(fill: egui::Color32) -> egui::Frame {
    egui::Frame::NONE
        .fill(fill)
        .corner_radius(6.0)
        .inner_margin(egui::Margin::symmetric(10, 8))
}

pub fn lighten_color(c: egui::Color32, t: f32) -> egui::Color32 {
    let t = t.clamp(0.0, 1.0);
    let mix = |channel: u8| -> u8 {
        let channel = channel as f32;
        (channel + (255.0 - channel) * t).round().clamp(0.0, 255.0) as u8
    };
    egui::Color32::from_rgba_unmultiplied(mix(c.r()), mix(c.g()), mix(c.b()), c.a())
}

pub fn log_color(kind: LogKind) -> egui::Color32 {
    match kind {
        LogKind::System => TEXT_MUTED,
        LogKind::Agent => AGENT,
        LogKind::Success => HEALTHY,
        LogKind::Error => CRITICAL,
    }
}

pub fn status_color(status: ServiceStatus) -> egui::Color32 {
    match status {
        ServiceStatus::Live => HEALTHY,
        ServiceStatus::Error => CRITICAL,
        ServiceStatus::Healing => WARNING,
    }
}

pub fn health_color(in_crash: bool) -> egui::Color32 {
    if in_crash {
        CRITICAL
    } else {
        HEALTHY
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lighten_moves_toward_white_and_keeps_alpha() {
        let base = egui::Color32::from_rgb(0, 100, 200);
        assert_eq!(lighten_color(base, 0.0), base);
        assert_eq!(lighten_color(base, 1.0), egui::Color32::WHITE);
        assert_eq!(lighten_color(base, 0.5).a(), 255);
    }

    #[test]
    fn error_logs_and_failing_services_share_the_critical_color() {
        assert_eq!(log_color(LogKind::Error), status_color(ServiceStatus::Error));
        assert_ne!(log_color(LogKind::Agent), log_color(LogKind::System));
    }
}
