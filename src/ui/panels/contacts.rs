// VcfSheet - ui/panels/contacts.rs
//
// Virtual-scrolling contact table for the central panel.
//
// Uses egui's `ScrollArea::show_rows`, so only visible rows are laid out no
// matter how many contacts are loaded. Reads `state.table`, which is rebuilt
// by `AppState::apply_filters` whenever the view changes.

use crate::app::state::AppState;
use crate::ui::theme;

/// Render the contact table.
pub fn render(ui: &mut egui::Ui, state: &AppState) {
    let table = &state.table;

    if table.is_empty() {
        ui.centered_and_justified(|ui| {
            if state.contacts.is_empty() {
                ui.label("No contacts loaded.\nUse Open VCF\u{2026} to choose a vCard file.");
            } else {
                ui.label("No contacts match the search.");
            }
        });
        return;
    }

    let row_height = theme::row_height(state.config.font_size);
    let widths: Vec<f32> = (0..table.width())
        .map(|col| {
            if col == 0 {
                theme::NAME_COLUMN_WIDTH
            } else {
                theme::PHONE_COLUMN_WIDTH
            }
        })
        .collect();

    egui::ScrollArea::horizontal()
        .id_salt("contacts_h")
        .auto_shrink([false; 2])
        .show(ui, |ui| {
            egui::Frame::new()
                .fill(theme::header_bg(state.config.dark_mode))
                .show(ui, |ui| {
                    row_cells(ui, &table.header, &widths, row_height, true);
                });

            egui::ScrollArea::vertical()
                .id_salt("contacts_v")
                .auto_shrink([false; 2])
                .show_rows(ui, row_height, table.rows.len(), |ui, row_range| {
                    for idx in row_range {
                        let Some(cells) = table.rows.get(idx) else {
                            continue;
                        };
                        row_cells(ui, cells, &widths, row_height, false);
                    }
                });
        });
}

fn row_cells(ui: &mut egui::Ui, cells: &[String], widths: &[f32], height: f32, header: bool) {
    ui.horizontal(|ui| {
        for (cell, &width) in cells.iter().zip(widths) {
            let text = if header {
                egui::RichText::new(cell).strong()
            } else {
                egui::RichText::new(cell)
            };
            ui.add_sized(
                [width, height],
                egui::Label::new(text).truncate().halign(egui::Align::Min),
            )
            .on_hover_text(cell.as_str());
        }
    });
}
