// VcfSheet - ui/panels/toolbar.rs
//
// Top toolbar: Open VCF and the loaded file name, search box, Export, About.
//
// Dialogs run here; the chosen paths are written to `state.pending_open` and
// `state.pending_export` and consumed by gui.rs after the frame's panels are
// laid out. Search edits update the filtered view immediately.

use crate::app::state::AppState;
use crate::ui::theme;
use crate::util::constants::VCF_EXTENSIONS;

/// Render the toolbar contents.
pub fn render(ui: &mut egui::Ui, state: &mut AppState) {
    ui.horizontal(|ui| {
        if ui
            .button("Open VCF\u{2026}")
            .on_hover_text("Load contacts from a vCard file")
            .clicked()
        {
            let mut dialog = rfd::FileDialog::new()
                .set_title("Select a vCard file")
                .add_filter("vCard files", VCF_EXTENSIONS);
            if let Some(ref dir) = state.last_open_dir {
                dialog = dialog.set_directory(dir);
            }
            if let Some(path) = dialog.pick_file() {
                state.pending_open = Some(path);
            }
        }

        if let (Some(label), Some(path)) = (state.source_label(), state.source_path.as_deref()) {
            ui.label(egui::RichText::new(label).strong())
                .on_hover_text(path.display().to_string());
        }

        ui.separator();

        ui.label("Search:");
        let mut query = state.search_query.clone();
        let response = ui.add(
            egui::TextEdit::singleline(&mut query)
                .hint_text("Name contains\u{2026}")
                .desired_width(theme::SEARCH_BOX_WIDTH),
        );
        if response.changed() {
            state.set_query(query);
        }
        if !state.search_query.is_empty() && ui.small_button("\u{2715}").clicked() {
            state.set_query(String::new());
        }

        ui.separator();

        if ui
            .add_enabled(state.can_export(), egui::Button::new("Export\u{2026}"))
            .on_hover_text("Save the contacts shown below as a spreadsheet")
            .on_disabled_hover_text("No contacts to export")
            .clicked()
        {
            let mut dialog = rfd::FileDialog::new()
                .set_title("Export contacts")
                .add_filter("Excel workbook", &["xlsx"])
                .add_filter("CSV", &["csv"])
                .set_file_name(&state.config.default_file_name);
            if let Some(ref dir) = state.last_export_dir {
                dialog = dialog.set_directory(dir);
            }
            if let Some(dest) = dialog.save_file() {
                state.pending_export = Some(dest);
            }
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("About").clicked() {
                state.show_about = true;
            }
        });
    });
}
