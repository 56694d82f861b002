// VcfSheet - gui.rs
//
// Top-level eframe::App implementation.
// Wires together the toolbar, contact table, status bar, and About dialog,
// and carries out the load/export requests the panels leave in AppState.

use crate::app::state::AppState;
use crate::platform::fs;
use crate::ui;

/// The VcfSheet application.
pub struct VcfSheetApp {
    pub state: AppState,
    /// Font size last pushed to the egui style.
    applied_font_size: Option<f32>,
}

impl VcfSheetApp {
    /// Create a new application instance with the given state.
    pub fn new(state: AppState) -> Self {
        Self {
            state,
            applied_font_size: None,
        }
    }
}

impl eframe::App for VcfSheetApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        if self.applied_font_size != Some(self.state.config.font_size) {
            ui::theme::apply(ctx, self.state.config.dark_mode, self.state.config.font_size);
            self.applied_font_size = Some(self.state.config.font_size);
        }

        // ---- Handle requests set by the toolbar ----
        if let Some(path) = self.state.pending_open.take() {
            self.state.load_file(&path);
        }
        if let Some(dest) = self.state.pending_export.take() {
            // Outcome is reported through the status bar.
            let _ = self.state.export_to(&dest);
        }

        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.add_space(4.0);
            ui::panels::toolbar::render(ui, &mut self.state);
            ui.add_space(4.0);
        });

        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let status = egui::RichText::new(&self.state.status_message);
                let status = if self.state.status_is_error {
                    status.color(ui::theme::ERROR_TEXT)
                } else {
                    status
                };
                ui.label(status);

                if let Some(ref dest) = self.state.last_export {
                    if ui
                        .small_button("Show in folder")
                        .on_hover_text(dest.display().to_string())
                        .clicked()
                    {
                        fs::reveal_in_file_manager(dest);
                    }
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if let Some(label) = self.state.count_label() {
                        ui.label(label);
                    }
                });
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            ui::panels::contacts::render(ui, &self.state);
        });

        ui::panels::about::render(ctx, &mut self.state);
    }

    /// Called by eframe when the application window is about to close.
    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.state.save_session();
    }
}
