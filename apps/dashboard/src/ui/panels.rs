//! The dashboard's panels. Each draws one view projection.

use std::time::Instant;

use eframe::egui;
use shared::{
    domain::{HealthSample, IconKey, LogKind},
    state::{HEALTH_MAX, HEALTH_MIN},
};
use sim_core::{
    content::{
        IntegrationBody, HEADER_STATUS, INTEGRATIONS, PATCH, PRODUCT_NAME, PRODUCT_TAGLINE,
        PULL_REQUEST_URL, REGION,
    },
    views::{FleetView, HealthView, PatchView, TerminalView},
};

use crate::ui::{
    theme,
    widgets::{copy_button, status_pill, ClipboardSink, CopyIndicator},
};

const TERMINAL_HEIGHT: f32 = 260.0;
const CHART_HEIGHT: f32 = 170.0;

fn icon_glyph(icon: IconKey) -> &'static str {
    match icon {
        IconKey::ShieldCheck => "🛡",
        IconKey::Server => "🖧",
        IconKey::Calculator => "🖩",
        IconKey::CreditCard => "💳",
        IconKey::Database => "🗄",
    }
}

fn section_title(ui: &mut egui::Ui, title: &str) {
    ui.label(egui::RichText::new(title).strong().size(15.0));
}

pub fn header(ui: &mut egui::Ui) {
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("🛡").size(28.0).color(theme::ACCENT));
        ui.vertical(|ui| {
            ui.label(egui::RichText::new(PRODUCT_NAME).size(22.0).strong());
            ui.label(
                egui::RichText::new(PRODUCT_TAGLINE)
                    .color(theme::TEXT_MUTED)
                    .small(),
            );
        });
        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            status_pill(ui, HEADER_STATUS, theme::HEALTHY);
            ui.label(
                egui::RichText::new(format!("Region: {REGION}"))
                    .monospace()
                    .color(theme::TEXT_MUTED),
            );
        });
    });
}

/// Returns `true` when the chaos button was clicked this frame.
pub fn fleet_panel(ui: &mut egui::Ui, view: &FleetView) -> bool {
    theme::card_frame()
        .show(ui, |ui| {
            section_title(ui, "Service Fleet");
            ui.add_space(4.0);
            for row in &view.rows {
                let color = theme::status_color(row.status);
                let fill = if row.failing {
                    theme::CRITICAL.gamma_multiply(0.12)
                } else {
                    theme::lighten_color(theme::CARD_BACKGROUND, 0.03)
                };
                theme::inset_frame(fill).show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.horizontal(|ui| {
                        ui.label(egui::RichText::new(icon_glyph(row.icon)).size(16.0).color(color));
                        ui.label(egui::RichText::new(row.name).monospace());
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            status_pill(ui, row.status_label, color);
                        });
                    });
                });
            }

            ui.add_space(8.0);
            let fill = if view.button_disabled {
                theme::lighten_color(theme::CARD_BACKGROUND, 0.08)
            } else {
                theme::CRITICAL.gamma_multiply(0.85)
            };
            let button = egui::Button::new(
                egui::RichText::new(view.button_label)
                    .strong()
                    .color(egui::Color32::WHITE),
            )
            .fill(fill)
            .min_size(egui::vec2(ui.available_width(), 38.0));
            ui.add_enabled(!view.button_disabled, button).clicked()
        })
        .inner
}

pub fn terminal_panel(ui: &mut egui::Ui, view: &TerminalView) {
    theme::card_frame().show(ui, |ui| {
        ui.horizontal(|ui| {
            section_title(ui, "Agent Terminal");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                let color = if view.active {
                    theme::ACCENT
                } else {
                    theme::TEXT_MUTED
                };
                status_pill(ui, view.status_label, color);
            });
        });
        ui.add_space(4.0);
        theme::inset_frame(theme::TERMINAL_BACKGROUND).show(ui, |ui| {
            ui.set_min_height(TERMINAL_HEIGHT);
            egui::ScrollArea::vertical()
                .id_salt("agent_terminal")
                .max_height(TERMINAL_HEIGHT)
                .auto_shrink([false, false])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    if let Some(placeholder) = view.placeholder {
                        ui.label(
                            egui::RichText::new(placeholder)
                                .monospace()
                                .color(theme::TEXT_MUTED),
                        );
                    }
                    for line in &view.lines {
                        ui.horizontal_wrapped(|ui| {
                            ui.label(
                                egui::RichText::new(&line.timestamp)
                                    .monospace()
                                    .color(theme::TEXT_MUTED),
                            );
                            let prefix_color = if line.kind == LogKind::Agent {
                                theme::AGENT
                            } else {
                                theme::ACCENT
                            };
                            ui.label(
                                egui::RichText::new(line.prefix)
                                    .monospace()
                                    .color(prefix_color),
                            );
                            ui.label(
                                egui::RichText::new(&line.message)
                                    .monospace()
                                    .color(theme::log_color(line.kind)),
                            );
                        });
                    }
                    if view.active {
                        ui.label(egui::RichText::new("▌").monospace().color(theme::ACCENT));
                    }
                });
        });
    });
}

fn diff_line(
    ui: &mut egui::Ui,
    marker: &str,
    text: &str,
    fill: egui::Color32,
    color: egui::Color32,
) {
    egui::Frame::NONE
        .fill(fill)
        .inner_margin(egui::Margin::symmetric(6, 2))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.label(
                egui::RichText::new(format!("{marker} {text}"))
                    .monospace()
                    .color(color),
            );
        });
}

pub fn patch_panel(
    ui: &mut egui::Ui,
    view: &PatchView,
    pr_copy: &mut CopyIndicator,
    clipboard: &mut dyn ClipboardSink,
    now: Instant,
) {
    theme::card_frame().show(ui, |ui| {
        ui.horizontal(|ui| {
            section_title(ui, "Auto-Generated Patch");
            if view.approved_badge {
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    status_pill(ui, PATCH.approved_label, theme::HEALTHY);
                });
            }
        });
        ui.add_space(4.0);

        ui.scope(|ui| {
            ui.multiply_opacity(view.diff_opacity);
            theme::inset_frame(theme::TERMINAL_BACKGROUND).show(ui, |ui| {
                ui.label(
                    egui::RichText::new(PATCH.file_label)
                        .monospace()
                        .color(theme::TEXT_MUTED),
                );
                ui.label(
                    egui::RichText::new(PATCH.hunk_header)
                        .monospace()
                        .small()
                        .color(theme::ACCENT),
                );
                diff_line(ui, "-", PATCH.removed_line, theme::DIFF_REMOVED_BG, theme::CRITICAL);
                diff_line(ui, "+", PATCH.added_line, theme::DIFF_ADDED_BG, theme::HEALTHY);
                diff_line(ui, "+", PATCH.comment, theme::DIFF_ADDED_BG, theme::TEXT_MUTED);
            });
        });

        ui.add_space(8.0);
        ui.scope(|ui| {
            ui.multiply_opacity(view.card_opacity);
            theme::inset_frame(theme::lighten_color(theme::CARD_BACKGROUND, 0.03)).show(ui, |ui| {
                ui.set_width(ui.available_width());
                ui.horizontal(|ui| {
                    ui.label(
                        egui::RichText::new(PATCH.pr_number)
                            .strong()
                            .color(theme::ACCENT),
                    );
                    ui.label(PATCH.pr_title);
                });
                ui.horizontal_wrapped(|ui| {
                    for badge in &PATCH.badges {
                        let text = format!("{}: {}", badge.label, badge.status);
                        status_pill(ui, &text, theme::HEALTHY);
                    }
                });
                ui.horizontal(|ui| {
                    ui.hyperlink_to(PATCH.pr_link_label, PULL_REQUEST_URL);
                    copy_button(ui, pr_copy, clipboard, PULL_REQUEST_URL, now);
                });
            });
        });
    });
}

fn value_to_y(plot: egui::Rect, health: f64) -> f32 {
    let t = (health.clamp(HEALTH_MIN, HEALTH_MAX) / HEALTH_MAX) as f32;
    plot.bottom() - plot.height() * t
}

/// Maps samples onto `plot`, oldest at the left edge, 100 at the top.
pub fn chart_points(plot: egui::Rect, samples: &[HealthSample]) -> Vec<egui::Pos2> {
    let span = samples.len().saturating_sub(1).max(1) as f32;
    samples
        .iter()
        .enumerate()
        .map(|(i, sample)| {
            egui::pos2(
                plot.left() + plot.width() * i as f32 / span,
                value_to_y(plot, sample.health),
            )
        })
        .collect()
}

fn health_chart(ui: &mut egui::Ui, samples: &[HealthSample], color: egui::Color32) {
    let (rect, _) = ui.allocate_exact_size(
        egui::vec2(ui.available_width(), CHART_HEIGHT),
        egui::Sense::hover(),
    );
    let painter = ui.painter_at(rect);
    painter.rect_filled(rect, egui::CornerRadius::same(6), theme::TERMINAL_BACKGROUND);

    let plot = egui::Rect::from_min_max(
        rect.min + egui::vec2(10.0, 10.0),
        rect.max - egui::vec2(10.0, 20.0),
    );
    for level in [25.0, 50.0, 75.0, 100.0] {
        let y = value_to_y(plot, level);
        painter.line_segment(
            [egui::pos2(plot.left(), y), egui::pos2(plot.right(), y)],
            egui::Stroke::new(1.0, theme::CARD_STROKE),
        );
    }

    let points = chart_points(plot, samples);
    if points.len() >= 2 {
        painter.add(egui::Shape::line(points.clone(), egui::Stroke::new(2.0, color)));
    }
    if let Some(last) = points.last() {
        painter.circle_filled(*last, 3.5, color);
    }

    let label_font = egui::FontId::monospace(10.0);
    if let (Some(first), Some(last)) = (samples.first(), samples.last()) {
        painter.text(
            egui::pos2(plot.left(), rect.bottom() - 4.0),
            egui::Align2::LEFT_BOTTOM,
            &first.label,
            label_font.clone(),
            theme::TEXT_MUTED,
        );
        painter.text(
            egui::pos2(plot.right(), rect.bottom() - 4.0),
            egui::Align2::RIGHT_BOTTOM,
            &last.label,
            label_font,
            theme::TEXT_MUTED,
        );
    }
}

pub fn health_panel(ui: &mut egui::Ui, view: &HealthView) {
    let color = theme::health_color(view.in_crash);
    theme::card_frame().show(ui, |ui| {
        ui.horizontal(|ui| {
            section_title(ui, "System Health");
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                status_pill(ui, view.status_label, color);
                ui.label(
                    egui::RichText::new(format!("{:.1}%", view.current))
                        .size(20.0)
                        .strong()
                        .color(color),
                );
            });
        });
        ui.add_space(4.0);
        health_chart(ui, &view.samples, color);
    });
}

pub fn integrations_panel(
    ui: &mut egui::Ui,
    install_copy: &mut CopyIndicator,
    clipboard: &mut dyn ClipboardSink,
    now: Instant,
) {
    theme::card_frame().show(ui, |ui| {
        section_title(ui, "Integrations");
        ui.add_space(4.0);
        ui.columns(INTEGRATIONS.len(), |columns| {
            for (column, card) in columns.iter_mut().zip(INTEGRATIONS.iter()) {
                theme::inset_frame(theme::lighten_color(theme::CARD_BACKGROUND, 0.03)).show(
                    column,
                    |ui| {
                        ui.set_width(ui.available_width());
                        ui.label(egui::RichText::new(card.title).strong());
                        ui.label(
                            egui::RichText::new(card.description)
                                .small()
                                .color(theme::TEXT_MUTED),
                        );
                        ui.add_space(4.0);
                        match card.body {
                            IntegrationBody::Providers(items) => {
                                ui.horizontal_wrapped(|ui| {
                                    for item in items {
                                        ui.label(format!("{} {}", item.logo, item.name));
                                    }
                                });
                            }
                            IntegrationBody::Command(command) => {
                                ui.label(egui::RichText::new(command).monospace().small());
                                copy_button(ui, install_copy, clipboard, command, now);
                            }
                        }
                    },
                );
            }
        });
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(health: f64) -> HealthSample {
        HealthSample {
            label: "0s".to_string(),
            health,
        }
    }

    #[test]
    fn chart_spans_the_plot_and_scales_health() {
        let plot = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(190.0, 100.0));
        let samples: Vec<HealthSample> = (0..20)
            .map(|i| sample(if i == 0 { 100.0 } else { 0.0 }))
            .collect();
        let points = chart_points(plot, &samples);
        assert_eq!(points.len(), 20);
        assert_eq!(points[0], egui::pos2(0.0, 0.0));
        assert_eq!(points[19], egui::pos2(190.0, 100.0));
        assert_eq!(points[1].x, 10.0);
    }

    #[test]
    fn out_of_range_values_stay_inside_the_plot() {
        let plot = egui::Rect::from_min_max(egui::pos2(0.0, 0.0), egui::pos2(100.0, 100.0));
        let points = chart_points(plot, &[sample(140.0), sample(-5.0)]);
        assert_eq!(points[0].y, 0.0);
        assert_eq!(points[1].y, 100.0);
    }
}
