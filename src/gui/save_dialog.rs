/// "Save Plot" prompt: asks for a file name, pre-filled with the default

use std::path::PathBuf;

/// Dialog state
#[derive(Debug, Clone)]
pub struct SaveDialogState {
    pub open: bool,
    pub file_name: String,
    default_name: String,
}

impl SaveDialogState {
    pub fn new(default_name: &str) -> Self {
        Self {
            open: false,
            file_name: default_name.to_string(),
            default_name: default_name.to_string(),
        }
    }

    /// Show the prompt with the default name filled in.
    pub fn open(&mut self) {
        self.file_name = self.default_name.clone();
        self.open = true;
    }

    /// The path to save to, or `None` while the name is blank.
    pub fn confirmed_path(&self) -> Option<PathBuf> {
        let name = self.file_name.trim();
        (!name.is_empty()).then(|| PathBuf::from(name))
    }
}

/// Action from the save dialog
#[derive(Debug, Clone, PartialEq)]
pub enum SaveAction {
    None,
    Save(PathBuf),
    Cancel,
}

/// Show the save prompt. Returns the action taken.
pub fn show_save_dialog(ctx: &egui::Context, state: &mut SaveDialogState) -> SaveAction {
    if !state.open {
        return SaveAction::None;
    }

    let mut action = SaveAction::None;
    let mut window_open = true;

    egui::Window::new("Save Plot")
        .open(&mut window_open)
        .collapsible(false)
        .resizable(false)
        .default_width(360.0)
        .anchor(egui::Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .show(ctx, |ui| {
            ui.label("File name:");
            ui.horizontal(|ui| {
                let edit = ui.add(
                    egui::TextEdit::singleline(&mut state.file_name).desired_width(260.0),
                );
                if ui.button("Browse…").clicked() {
                    if let Some(path) = browse_dialog(&state.file_name) {
                        state.file_name = path.display().to_string();
                    }
                }
                if edit.lost_focus() && ui.input(|i| i.key_pressed(egui::Key::Enter)) {
                    if let Some(path) = state.confirmed_path() {
                        action = SaveAction::Save(path);
                    }
                }
            });
            ui.label(
                egui::RichText::new("Format follows the extension: png, jpg, bmp, tif, svg")
                    .small()
                    .weak(),
            );
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                let path = state.confirmed_path();
                if ui
                    .add_enabled(path.is_some(), egui::Button::new("Save"))
                    .clicked()
                {
                    if let Some(path) = path {
                        action = SaveAction::Save(path);
                    }
                }
                if ui.button("Cancel").clicked() {
                    action = SaveAction::Cancel;
                }
            });
        });

    if !window_open && action == SaveAction::None {
        action = SaveAction::Cancel;
    }
    action
}

/// Native save dialog, starting from the typed name
fn browse_dialog(current: &str) -> Option<PathBuf> {
    rfd::FileDialog::new()
        .set_title("Save Plot")
        .set_file_name(current)
        .add_filter("PNG Image", &["png"])
        .add_filter("SVG Image", &["svg"])
        .add_filter("JPEG Image", &["jpg", "jpeg"])
        .add_filter("All Files", &["*"])
        .save_file()
}
