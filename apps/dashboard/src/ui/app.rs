use std::time::{Duration, Instant};

use crossbeam_channel::{Receiver, Sender};
use eframe::egui;
use sim_core::views::DashboardView;
use tracing::{debug, warn};

use crate::backend_bridge::commands::BackendCommand;
use crate::controller::events::{category_label, UiError, UiEvent};
use crate::controller::orchestration::dispatch_backend_command;
use crate::ui::{
    panels, theme,
    widgets::{ClipboardSink, CopyIndicator},
};

pub struct DashboardApp {
    cmd_tx: Sender<BackendCommand>,
    ui_rx: Receiver<UiEvent>,
    clipboard: Box<dyn ClipboardSink>,
    view: Option<DashboardView>,
    status: String,
    status_banner: Option<UiError>,
    install_copy: CopyIndicator,
    pr_copy: CopyIndicator,
}

impl DashboardApp {
    pub fn new(
        cmd_tx: Sender<BackendCommand>,
        ui_rx: Receiver<UiEvent>,
        clipboard: Box<dyn ClipboardSink>,
    ) -> Self {
        Self {
            cmd_tx,
            ui_rx,
            clipboard,
            view: None,
            status: "Waiting for simulation backend...".to_string(),
            status_banner: None,
            install_copy: CopyIndicator::default(),
            pr_copy: CopyIndicator::default(),
        }
    }

    fn process_ui_events(&mut self) {
        while let Ok(event) = self.ui_rx.try_recv() {
            match event {
                UiEvent::StateChanged(state) => {
                    self.view = Some(DashboardView::from_state(&state));
                }
                UiEvent::Info(message) => {
                    debug!(%message, "backend status");
                    self.status = message;
                }
                UiEvent::Error(err) => {
                    warn!(context = ?err.context(), "backend error: {}", err.message());
                    self.status = err.message().to_string();
                    self.status_banner = Some(err);
                }
            }
        }
    }

    fn inject_chaos(&mut self) {
        if let Err(err) = dispatch_backend_command(&self.cmd_tx, BackendCommand::InjectChaos) {
            warn!("failed to queue chaos trigger: {}", err.message());
            self.status_banner = Some(err);
        }
    }

    fn show_status_banner(&mut self, ui: &mut egui::Ui) {
        let Some(banner) = self.status_banner.clone() else {
            return;
        };
        egui::Frame::NONE
            .fill(egui::Color32::from_rgb(111, 53, 53))
            .stroke(egui::Stroke::new(1.0, egui::Color32::from_rgb(175, 96, 96)))
            .corner_radius(8.0)
            .inner_margin(egui::Margin::symmetric(10, 8))
            .show(ui, |ui| {
                ui.horizontal_wrapped(|ui| {
                    ui.label(
                        egui::RichText::new(format!(
                            "{} error: {}",
                            category_label(banner.category()),
                            banner.message()
                        ))
                        .color(egui::Color32::WHITE),
                    );
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        if ui.button("Dismiss").clicked() {
                            self.status_banner = None;
                        }
                    });
                });
            });
        ui.add_space(8.0);
    }

    fn show_dashboard(&mut self, ctx: &egui::Context, now: Instant) {
        egui::TopBottomPanel::top("dashboard_header")
            .frame(
                egui::Frame::NONE
                    .fill(theme::APP_BACKGROUND)
                    .inner_margin(egui::Margin::symmetric(20, 12)),
            )
            .show(ctx, panels::header);

        egui::TopBottomPanel::bottom("dashboard_status")
            .frame(
                egui::Frame::NONE
                    .fill(theme::APP_BACKGROUND)
                    .inner_margin(egui::Margin::symmetric(20, 4)),
            )
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(&self.status)
                        .small()
                        .color(theme::TEXT_MUTED),
                );
            });

        egui::CentralPanel::default()
            .frame(
                egui::Frame::NONE
                    .fill(theme::APP_BACKGROUND)
                    .inner_margin(egui::Margin::symmetric(20, 12)),
            )
            .show(ctx, |ui| {
                self.show_status_banner(ui);
                let Some(view) = self.view.clone() else {
                    ui.centered_and_justified(|ui| {
                        ui.label(egui::RichText::new(&self.status).color(theme::TEXT_MUTED));
                    });
                    return;
                };

                let inject = egui::ScrollArea::vertical()
                    .id_salt("dashboard_scroll")
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let mut inject = false;
                        ui.columns(2, |columns| {
                            inject = panels::fleet_panel(&mut columns[0], &view.fleet);
                            panels::terminal_panel(&mut columns[1], &view.terminal);
                        });
                        ui.add_space(12.0);
                        ui.columns(2, |columns| {
                            panels::patch_panel(
                                &mut columns[0],
                                &view.patch,
                                &mut self.pr_copy,
                                self.clipboard.as_mut(),
                                now,
                            );
                            panels::health_panel(&mut columns[1], &view.health);
                        });
                        ui.add_space(12.0);
                        panels::integrations_panel(
                            ui,
                            &mut self.install_copy,
                            self.clipboard.as_mut(),
                            now,
                        );
                        inject
                    })
                    .inner;

                if inject {
                    self.inject_chaos();
                }
            });
    }

    fn animating(&self, now: Instant) -> bool {
        self.view.as_ref().is_some_and(|view| view.is_simulating)
            || self.install_copy.is_copied(now)
            || self.pr_copy.is_copied(now)
    }
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let now = Instant::now();
        self.process_ui_events();
        self.show_dashboard(ctx, now);

        if self.animating(now) {
            ctx.request_repaint_after(Duration::from_millis(16));
        } else {
            ctx.request_repaint_after(Duration::from_millis(100));
        }
    }
}

impl Drop for DashboardApp {
    fn drop(&mut self) {
        // Also covered by the backend seeing the command channel disconnect.
        if dispatch_backend_command(&self.cmd_tx, BackendCommand::Shutdown).is_err() {
            debug!("backend already gone at dashboard teardown");
        }
    }
}

#[cfg(test)]
mod tests {
    use crossbeam_channel::bounded;
    use shared::{
        error::DashboardError,
        state::{HealthWindow, SimulationState},
    };

    use super::*;
    use crate::controller::events::UiErrorContext;

    struct NullClipboard;

    impl ClipboardSink for NullClipboard {
        fn set_text(&mut self, _text: &str) -> Result<(), DashboardError> {
            Ok(())
        }
    }

    fn app() -> (DashboardApp, Receiver<BackendCommand>, Sender<UiEvent>) {
        let (cmd_tx, cmd_rx) = bounded(8);
        let (ui_tx, ui_rx) = bounded(8);
        let app = DashboardApp::new(cmd_tx, ui_rx, Box::new(NullClipboard));
        (app, cmd_rx, ui_tx)
    }

    #[test]
    fn state_snapshots_replace_the_view() {
        let (mut app, _cmd_rx, ui_tx) = app();
        assert!(app.view.is_none());

        let mut state = SimulationState::new(HealthWindow::seeded(|| 97.0));
        state.is_simulating = true;
        ui_tx.try_send(UiEvent::StateChanged(state)).expect("send");
        ui_tx
            .try_send(UiEvent::Info("Simulation backend ready".to_string()))
            .expect("send");
        app.process_ui_events();

        let view = app.view.as_ref().expect("view");
        assert!(view.fleet.button_disabled);
        assert_eq!(app.status, "Simulation backend ready");
        assert!(app.animating(Instant::now()));
    }

    #[test]
    fn backend_errors_raise_the_banner() {
        let (mut app, _cmd_rx, ui_tx) = app();
        ui_tx
            .try_send(UiEvent::Error(UiError::from_message(
                UiErrorContext::BackendStartup,
                "backend worker startup failure: failed to build runtime",
            )))
            .expect("send");
        app.process_ui_events();
        assert!(app.status_banner.is_some());
    }

    #[test]
    fn inject_queues_a_command_and_drop_sends_shutdown() {
        let (mut app, cmd_rx, _ui_tx) = app();
        app.inject_chaos();
        drop(app);
        assert_eq!(
            cmd_rx.try_iter().collect::<Vec<_>>(),
            [BackendCommand::InjectChaos, BackendCommand::Shutdown]
        );
    }

    #[test]
    fn inject_with_backend_gone_shows_banner() {
        let (mut app, cmd_rx, _ui_tx) = app();
        drop(cmd_rx);
        app.inject_chaos();
        assert!(app.status_banner.is_some());
    }
}
