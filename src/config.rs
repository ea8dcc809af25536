/// Fixed viewer settings. There are no flags or config files; everything
/// the viewer needs is gathered here and built once in `main`.

use std::path::PathBuf;

use crate::plot::export::ExportSettings;

/// File name offered by the save prompt.
pub const DEFAULT_SAVE_NAME: &str = "plot.png";

#[derive(Debug, Clone)]
pub struct ViewerConfig {
    /// Run directory; the history log is resolved relative to it.
    pub base_dir: PathBuf,
    pub default_save_name: String,
    pub window_size: [f32; 2],
    pub min_window_size: [f32; 2],
    pub export: ExportSettings,
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            base_dir: PathBuf::from("."),
            default_save_name: DEFAULT_SAVE_NAME.to_string(),
            window_size: [1100.0, 750.0],
            min_window_size: [640.0, 480.0],
            export: ExportSettings::default(),
        }
    }
}
