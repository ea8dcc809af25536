/// Figure view: draws the rendered figure with egui_plot
///
/// Log axes arrive already in log10 space; this view only changes the grid
/// spacing to whole decades and labels ticks as `1e<k>`.

use egui_plot::{GridInput, GridMark, Line, Plot, PlotPoint, PlotPoints};

use crate::plot::figure::Figure;
use crate::plot::ticks;

use super::theme::ThemeColors;

pub fn show_figure(ui: &mut egui::Ui, figure: &Figure, colors: &ThemeColors) {
    let projection = figure.projection();

    ui.horizontal(|ui| {
        if figure.is_blank() {
            ui.colored_label(colors.text_muted, "Nothing plotted yet. Choose columns and press Plot.");
        } else {
            ui.label(format!(
                "{} vs {} | {} | {} pts",
                figure.y_label(),
                figure.x_label(),
                projection,
                figure.point_count()
            ));
            if figure.omitted() > 0 {
                ui.separator();
                ui.colored_label(
                    colors.error,
                    format!("{} point(s) not shown on log axis", figure.omitted()),
                );
            }
        }
    });

    // A fresh id per render drops the previous zoom/pan
    let mut plot = Plot::new(("figure", figure.generation()))
        .height(ui.available_height() - 4.0)
        .x_axis_label(figure.x_label().to_string())
        .y_axis_label(figure.y_label().to_string())
        .show_grid([true, true])
        .allow_boxed_zoom(true);

    if projection.x_log() {
        plot = plot
            .x_grid_spacer(egui_plot::uniform_grid_spacer(decade_steps))
            .x_axis_formatter(|mark: GridMark, _range| ticks::format_log(mark.value));
    }
    if projection.y_log() {
        plot = plot
            .y_grid_spacer(egui_plot::uniform_grid_spacer(decade_steps))
            .y_axis_formatter(|mark: GridMark, _range| ticks::format_log(mark.value));
    }

    let (x_log, y_log) = (projection.x_log(), projection.y_log());
    let x_name = figure.x_label().to_string();
    let y_name = figure.y_label().to_string();
    plot = plot.label_formatter(move |_name, value: &PlotPoint| {
        if x_name.is_empty() {
            return String::new();
        }
        format!(
            "{} = {}\n{} = {}",
            x_name,
            readout(value.x, x_log),
            y_name,
            readout(value.y, y_log)
        )
    });

    plot.show(ui, |plot_ui| {
        for segment in figure.segments() {
            plot_ui.line(
                Line::new(PlotPoints::from(segment.clone()))
                    .color(colors.trace)
                    .width(1.5),
            );
        }
    });
}

/// Grid steps for a log axis: whole decades only.
fn decade_steps(input: GridInput) -> [f64; 3] {
    let span = input.bounds.1 - input.bounds.0;
    let base = ticks::nice_step(span, 8.0).max(1.0).round();
    [base, base * 5.0, base * 10.0]
}

/// Cursor readout in data units
fn readout(projected: f64, log: bool) -> String {
    let value = if log { 10f64.powf(projected) } else { projected };
    let magnitude = value.abs();
    if value != 0.0 && !(1e-3..1e5).contains(&magnitude) {
        ticks::format_sci(value)
    } else {
        format!("{:.4}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_readout_undoes_log() {
        assert_eq!(readout(2.0, true), "100.0000");
        assert_eq!(readout(2.0, false), "2.0000");
        assert!(readout(7.0, true).contains('e'));
    }

    #[test]
    fn test_decade_steps_are_whole() {
        let steps = decade_steps(GridInput {
            bounds: (-3.0, 40.0),
            base_step_size: 0.01,
        });
        assert!(steps.iter().all(|s| *s >= 1.0 && s.fract() == 0.0));
    }
}
