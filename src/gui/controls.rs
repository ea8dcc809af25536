/// Side-panel controls: column and axis-style dropdowns plus the Plot and
/// Save Plot buttons.

use crate::plot::request::{AxisSelection, PlotRequest, ScaleMode};

use super::theme::{self, ThemeColors};

/// Actions the controls can trigger
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ControlAction {
    None,
    Plot,
    SavePlot,
}

/// Current dropdown selections
#[derive(Debug, Clone)]
pub struct ControlState {
    /// Column names in table order
    columns: Vec<String>,
    pub x_index: usize,
    pub y_index: usize,
    pub x_scale: ScaleMode,
    pub y_scale: ScaleMode,
}

impl ControlState {
    /// Both axes start on the first column, linear.
    pub fn new(columns: Vec<String>) -> Self {
        Self {
            columns,
            x_index: 0,
            y_index: 0,
            x_scale: ScaleMode::Linear,
            y_scale: ScaleMode::Linear,
        }
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Snapshot the selections; `None` when there is nothing to pick.
    pub fn request(&self) -> Option<PlotRequest> {
        let x = self.columns.get(self.x_index)?;
        let y = self.columns.get(self.y_index)?;
        Some(PlotRequest::new(
            AxisSelection::new(x.clone(), self.x_scale),
            AxisSelection::new(y.clone(), self.y_scale),
        ))
    }
}

/// Render the controls and return any triggered action
pub fn show_controls(ui: &mut egui::Ui, state: &mut ControlState, colors: &ThemeColors) -> ControlAction {
    let mut action = ControlAction::None;

    ui.label("x axis:");
    column_combo(ui, "x_column", &state.columns, &mut state.x_index);
    ui.add_space(4.0);

    ui.label("y axis:");
    column_combo(ui, "y_column", &state.columns, &mut state.y_index);
    ui.add_space(4.0);

    ui.label("x axis style:");
    scale_combo(ui, "x_style", &mut state.x_scale);
    ui.add_space(4.0);

    ui.label("y axis style:");
    scale_combo(ui, "y_style", &mut state.y_scale);
    ui.add_space(10.0);

    let has_columns = !state.columns.is_empty();
    if ui
        .add_enabled(has_columns, theme::accent_button("Plot", colors))
        .clicked()
    {
        action = ControlAction::Plot;
    }
    ui.add_space(4.0);
    if ui.add(theme::accent_button("Save Plot", colors)).clicked() {
        action = ControlAction::SavePlot;
    }

    action
}

fn column_combo(ui: &mut egui::Ui, id: &str, columns: &[String], selected: &mut usize) {
    let text = columns.get(*selected).map(String::as_str).unwrap_or("-");
    egui::ComboBox::from_id_salt(id)
        .selected_text(text)
        .width(ui.available_width())
        .height(400.0)
        .show_ui(ui, |ui| {
            for (idx, name) in columns.iter().enumerate() {
                ui.selectable_value(selected, idx, name.as_str());
            }
        });
}

fn scale_combo(ui: &mut egui::Ui, id: &str, selected: &mut ScaleMode) {
    egui::ComboBox::from_id_salt(id)
        .selected_text(selected.label())
        .width(ui.available_width())
        .show_ui(ui, |ui| {
            for mode in ScaleMode::ALL {
                ui.selectable_value(selected, mode, mode.label());
            }
        });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<String> {
        ["model_number", "star_age", "log_L"]
            .iter()
            .map(|s| s.to_string())
            .collect()
    }

    #[test]
    fn test_initial_selection() {
        let state = ControlState::new(columns());
        let req = state.request().unwrap();
        assert_eq!(req.x.column, "model_number");
        assert_eq!(req.y.column, "model_number");
        assert_eq!(req.x.scale, ScaleMode::Linear);
        assert_eq!(req.y.scale, ScaleMode::Linear);
    }

    #[test]
    fn test_request_reflects_current_selection() {
        let mut state = ControlState::new(columns());
        state.x_index = 1;
        state.y_index = 2;
        state.y_scale = ScaleMode::Log;
        let req = state.request().unwrap();
        assert_eq!(req.x, AxisSelection::new("star_age", ScaleMode::Linear));
        assert_eq!(req.y, AxisSelection::new("log_L", ScaleMode::Log));
    }

    #[test]
    fn test_no_columns_no_request() {
        assert!(ControlState::new(Vec::new()).request().is_none());
    }
}
