// VcfSheet - ui/theme.rs
//
// Colour scheme, text sizing, and layout constants.
// No dependencies on app state or business logic.

use egui::{Color32, FontId, TextStyle};

/// Status text colour for failures.
pub const ERROR_TEXT: Color32 = Color32::from_rgb(239, 68, 68); // Red 500

/// Header row background tint.
pub const HEADER_BG_DARK: Color32 = Color32::from_rgb(31, 41, 55); // Gray 800
pub const HEADER_BG_LIGHT: Color32 = Color32::from_rgb(229, 231, 235); // Gray 200

/// Layout constants.
pub const NAME_COLUMN_WIDTH: f32 = 240.0;
pub const PHONE_COLUMN_WIDTH: f32 = 150.0;
pub const SEARCH_BOX_WIDTH: f32 = 220.0;

/// Height of one table row for the given body font size.
pub fn row_height(font_size: f32) -> f32 {
    (font_size * 1.5).round()
}

/// Header background for the active theme.
pub fn header_bg(dark_mode: bool) -> Color32 {
    if dark_mode {
        HEADER_BG_DARK
    } else {
        HEADER_BG_LIGHT
    }
}

/// Apply light/dark visuals and scale every text style to `font_size`.
pub fn apply(ctx: &egui::Context, dark_mode: bool, font_size: f32) {
    ctx.set_visuals(if dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });

    let mut style = (*ctx.style()).clone();
    style.text_styles = [
        (TextStyle::Small, FontId::proportional(font_size * 0.75)),
        (TextStyle::Body, FontId::proportional(font_size)),
        (TextStyle::Button, FontId::proportional(font_size)),
        (TextStyle::Monospace, FontId::monospace(font_size)),
        (TextStyle::Heading, FontId::proportional(font_size * 1.4)),
    ]
    .into();
    ctx.set_style(style);
}
