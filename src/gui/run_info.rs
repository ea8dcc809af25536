/// Collapsible table of the run's global header attributes

use egui_extras::{Column, TableBuilder};

pub fn show_run_info(ui: &mut egui::Ui, attributes: &[(String, String)]) {
    egui::CollapsingHeader::new("Run info")
        .default_open(false)
        .show(ui, |ui| {
            if attributes.is_empty() {
                ui.weak("No header attributes");
                return;
            }
            TableBuilder::new(ui)
                .id_salt("run_info")
                .striped(true)
                .max_scroll_height(240.0)
                .column(Column::auto().at_least(90.0))
                .column(Column::remainder())
                .header(18.0, |mut header| {
                    header.col(|ui| {
                        ui.strong("Attribute");
                    });
                    header.col(|ui| {
                        ui.strong("Value");
                    });
                })
                .body(|mut body| {
                    for (name, value) in attributes {
                        body.row(18.0, |mut row| {
                            row.col(|ui| {
                                ui.label(name);
                            });
                            row.col(|ui| {
                                ui.label(value);
                            });
                        });
                    }
                });
        });
}
