/// Main application state and eframe::App implementation
///
/// Two user actions drive everything: Plot redraws the figure from the
/// current dropdowns, Save Plot prompts for a name and writes the figure.

use std::path::Path;

use eframe::egui;

use crate::config::ViewerConfig;
use crate::data::loader::RunData;
use crate::gui::controls::{self, ControlAction, ControlState};
use crate::gui::plot_view;
use crate::gui::run_info;
use crate::gui::save_dialog::{self, SaveAction, SaveDialogState};
use crate::gui::theme::{self, ThemeColors};
use crate::plot::export::{self, ExportSettings};
use crate::plot::figure::Figure;

pub struct PlotterApp {
    /// Loaded once at startup, read-only afterwards
    run: RunData,
    controls: ControlState,
    figure: Figure,
    save_dialog: SaveDialogState,
    export_settings: ExportSettings,
    status_message: String,
    status_is_error: bool,
    colors: ThemeColors,
}

impl PlotterApp {
    pub fn new(cc: &eframe::CreationContext<'_>, run: RunData, config: &ViewerConfig) -> Self {
        let colors = ThemeColors::default();
        theme::apply_theme(&cc.egui_ctx, &colors);
        Self::with_run(run, config, colors)
    }

    fn with_run(run: RunData, config: &ViewerConfig, colors: ThemeColors) -> Self {
        let controls = ControlState::new(run.table.names().to_vec());
        let status_message = format!(
            "Loaded {}: {} columns, {} rows",
            run.path.display(),
            run.table.len(),
            run.table.row_count().unwrap_or(0)
        );
        Self {
            run,
            controls,
            figure: Figure::new(),
            save_dialog: SaveDialogState::new(&config.default_save_name),
            export_settings: config.export,
            status_message,
            status_is_error: false,
            colors,
        }
    }

    fn set_status(&mut self, message: String, is_error: bool) {
        self.status_message = message;
        self.status_is_error = is_error;
    }

    fn plot(&mut self) {
        let Some(request) = self.controls.request() else {
            return;
        };
        match self.figure.render(&self.run.table, &request) {
            Ok(()) => {
                let msg = format!(
                    "Plotted {} vs {} ({})",
                    request.y.column,
                    request.x.column,
                    self.figure.projection()
                );
                self.set_status(msg, false);
            }
            Err(e) => {
                log::error!("Plot failed: {}", e);
                self.set_status(format!("Plot failed: {}", e), true);
            }
        }
    }

    fn save(&mut self, path: &Path) {
        match export::save_figure(&self.figure, path, &self.export_settings) {
            Ok(written) => self.set_status(format!("Saved plot: {}", written.display()), false),
            Err(e) => {
                log::error!("Saving {} failed: {}", path.display(), e);
                self.set_status(format!("Save failed: {}", e), true);
            }
        }
    }

    fn handle_control_action(&mut self, action: ControlAction) {
        match action {
            ControlAction::Plot => self.plot(),
            ControlAction::SavePlot => self.save_dialog.open(),
            ControlAction::None => {}
        }
    }
}

impl eframe::App for PlotterApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // ── Save prompt ──
        match save_dialog::show_save_dialog(ctx, &mut self.save_dialog) {
            SaveAction::Save(path) => {
                self.save_dialog.open = false;
                self.save(&path);
            }
            SaveAction::Cancel => self.save_dialog.open = false,
            SaveAction::None => {}
        }

        // ── Status bar ──
        let status_color = if self.status_is_error {
            self.colors.error
        } else {
            self.colors.text_muted
        };
        egui::TopBottomPanel::bottom("status_bar")
            .frame(
                egui::Frame::new()
                    .fill(self.colors.status_bar_bg)
                    .inner_margin(egui::Margin::symmetric(12, 4)),
            )
            .show(ctx, |ui| {
                ui.label(
                    egui::RichText::new(&self.status_message)
                        .size(11.5)
                        .color(status_color),
                );
            });

        // ── Controls ──
        let mut action = ControlAction::None;
        egui::SidePanel::left("controls")
            .resizable(true)
            .default_width(240.0)
            .show(ctx, |ui| {
                ui.heading("MESA Data Plotter");
                ui.separator();
                action = controls::show_controls(ui, &mut self.controls, &self.colors);
                ui.add_space(12.0);
                ui.separator();
                run_info::show_run_info(ui, &self.run.attributes);
            });
        self.handle_control_action(action);

        // ── Figure ──
        egui::CentralPanel::default().show(ctx, |ui| {
            plot_view::show_figure(ui, &self.figure, &self.colors);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::table::ColumnTable;
    use crate::plot::request::{Projection, ScaleMode};
    use std::path::PathBuf;

    fn app() -> PlotterApp {
        let mut table = ColumnTable::new();
        table.insert("star_age", vec![1.0, 10.0, 100.0]).unwrap();
        table.insert("log_L", vec![0.1, 0.2, 0.3]).unwrap();
        let run = RunData {
            path: PathBuf::from("LOGS/history.data"),
            attributes: Vec::new(),
            table,
        };
        PlotterApp::with_run(run, &ViewerConfig::default(), ThemeColors::default())
    }

    #[test]
    fn test_starts_idle_with_blank_figure() {
        let app = app();
        assert!(app.figure.is_blank());
        assert_eq!(app.controls.columns(), &["star_age".to_string(), "log_L".to_string()]);
        assert!(!app.save_dialog.open);
    }

    #[test]
    fn test_plot_action_reads_current_selection() {
        let mut app = app();
        app.controls.y_index = 1;
        app.controls.x_scale = ScaleMode::Log;
        app.handle_control_action(ControlAction::Plot);
        assert_eq!(app.figure.projection(), Projection::SemilogX);
        assert_eq!(app.figure.y_label(), "log_L");

        app.controls.x_scale = ScaleMode::Linear;
        app.handle_control_action(ControlAction::Plot);
        assert_eq!(app.figure.projection(), Projection::Linear);
        assert_eq!(app.figure.segments().len(), 1);
    }

    #[test]
    fn test_save_action_opens_prefilled_prompt() {
        let mut app = app();
        app.handle_control_action(ControlAction::SavePlot);
        assert!(app.save_dialog.open);
        assert_eq!(app.save_dialog.file_name, "plot.png");
    }

    #[test]
    fn test_save_without_plot_writes_file() {
        let mut app = app();
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("plot.png");
        app.save(&path);
        assert!(path.exists());
        assert!(!app.status_is_error);
    }

    #[test]
    fn test_save_without_extension_reports_png_path() {
        let mut app = app();
        let dir = tempfile::tempdir().unwrap();
        app.save(&dir.path().join("hr_diagram"));
        assert!(dir.path().join("hr_diagram.png").exists());
        assert!(app.status_message.ends_with("hr_diagram.png"));
    }

    #[test]
    fn test_failed_save_is_reported() {
        let mut app = app();
        app.save(Path::new("plot.unknown"));
        assert!(app.status_is_error);
        assert!(app.status_message.starts_with("Save failed"));
    }
}
