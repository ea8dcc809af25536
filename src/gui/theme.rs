/// Visual style for the viewer window

/// Colors the viewer draws with
#[derive(Debug, Clone)]
pub struct ThemeColors {
    pub panel_fill: egui::Color32,
    pub window_fill: egui::Color32,
    pub widget_inactive_bg: egui::Color32,
    pub widget_hovered_bg: egui::Color32,
    pub selection_bg: egui::Color32,
    pub text_primary: egui::Color32,
    pub text_muted: egui::Color32,
    /// Fill of the Plot / Save Plot buttons
    pub accent: egui::Color32,
    pub accent_text: egui::Color32,
    pub error: egui::Color32,
    pub trace: egui::Color32,
    pub status_bar_bg: egui::Color32,
}

impl Default for ThemeColors {
    fn default() -> Self {
        Self {
            panel_fill: egui::Color32::from_rgb(0xF7, 0xF8, 0xFA),
            window_fill: egui::Color32::WHITE,
            widget_inactive_bg: egui::Color32::from_rgb(0xE8, 0xEB, 0xEF),
            widget_hovered_bg: egui::Color32::from_rgb(0xD6, 0xEE, 0xF1),
            selection_bg: egui::Color32::from_rgb(0xB2, 0xE0, 0xE6),
            text_primary: egui::Color32::from_rgb(0x1E, 0x22, 0x28),
            text_muted: egui::Color32::from_rgb(0x70, 0x75, 0x80),
            accent: egui::Color32::from_rgb(0x00, 0x97, 0xA7),
            accent_text: egui::Color32::WHITE,
            error: egui::Color32::from_rgb(0xC6, 0x28, 0x28),
            trace: egui::Color32::from_rgb(0x1F, 0x77, 0xB4),
            status_bar_bg: egui::Color32::from_rgb(0xEC, 0xEE, 0xF2),
        }
    }
}

pub fn apply_theme(ctx: &egui::Context, c: &ThemeColors) {
    let mut visuals = egui::Visuals::light();

    visuals.panel_fill = c.panel_fill;
    visuals.window_fill = c.window_fill;
    visuals.override_text_color = Some(c.text_primary);

    visuals.widgets.inactive.bg_fill = c.widget_inactive_bg;
    visuals.widgets.inactive.weak_bg_fill = c.widget_inactive_bg;
    visuals.widgets.inactive.corner_radius = egui::CornerRadius::same(4);
    visuals.widgets.hovered.bg_fill = c.widget_hovered_bg;
    visuals.widgets.hovered.weak_bg_fill = c.widget_hovered_bg;
    visuals.widgets.hovered.bg_stroke = egui::Stroke::new(1.0, c.accent);

    visuals.selection.bg_fill = c.selection_bg;
    visuals.selection.stroke = egui::Stroke::new(1.5, c.accent);

    ctx.set_visuals(visuals);
}

/// The rounded accent button used for Plot and Save Plot.
pub fn accent_button(text: &str, c: &ThemeColors) -> egui::Button<'static> {
    egui::Button::new(egui::RichText::new(text.to_string()).color(c.accent_text).strong())
        .fill(c.accent)
        .corner_radius(5.0)
        .min_size(egui::vec2(120.0, 28.0))
}
