pub mod controls;
pub mod plot_view;
pub mod run_info;
pub mod save_dialog;
pub mod theme;
