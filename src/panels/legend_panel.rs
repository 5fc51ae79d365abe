use egui::{Align2, Color32, Sense, Ui, vec2};

use crate::ClusterMapApp;
use crate::cluster::Cluster;
use crate::color::hex_to_rgb;
use crate::command::Command;

const SWATCH_SIZE: egui::Vec2 = egui::vec2(20.0, 10.0);

/// One row per cluster, in registry order. Clicking a row toggles the
/// cluster's visibility.
pub fn legend_panel(app: &mut ClusterMapApp, ctx: &egui::Context) {
    let mut toggled = None;

    egui::Area::new(egui::Id::new("legend_panel"))
        .anchor(Align2::LEFT_CENTER, vec2(10.0, 0.0))
        .show(ctx, |ui| {
            egui::Frame::popup(ui.style()).show(ui, |ui| {
                for cluster in app.state.registry().clusters() {
                    let hidden = app.state.visibility().is_hidden(&cluster.name);
                    if legend_row(ui, cluster, hidden).clicked() {
                        toggled = Some(cluster.name.clone());
                    }
                }
            });
        });

    if let Some(name) = toggled {
        log::info!("Toggling cluster {}", name);
        app.push_command(Command::ToggleCluster(name));
    }
}

fn legend_row(ui: &mut Ui, cluster: &Cluster, hidden: bool) -> egui::Response {
    let swatch = if hidden {
        Color32::TRANSPARENT
    } else {
        hex_to_rgb(&cluster.color)
    };
    let text_color = if hidden {
        ui.visuals().text_color().gamma_multiply(0.5)
    } else {
        ui.visuals().text_color()
    };

    let row = ui.horizontal(|ui| {
        let (rect, _) = ui.allocate_exact_size(SWATCH_SIZE, Sense::hover());
        ui.painter().rect_filled(rect, 5.0, swatch);
        ui.label(egui::RichText::new(format!("Cluster {}", cluster.name)).color(text_color));
    });
    ui.interact(row.response.rect, ui.id().with(&cluster.name), Sense::click())
        .on_hover_cursor(egui::CursorIcon::PointingHand)
}
