use egui::{Align2, vec2};

use crate::ClusterMapApp;
use crate::command::Command;
use crate::components::ModeButton;
use crate::geometry::FeatureCollection;
use crate::mode::{BooleanOperation, MODE_GROUPS, ModeConfig};

/// UI-only toolbox state; none of it feeds the layers.
#[derive(Debug, Default)]
pub struct ToolboxState {
    /// Index into [`MODE_GROUPS`] of the group showing its sub tools
    pub expanded: Option<usize>,
    pub show_import: bool,
    pub import_text: String,
    /// Last import failure, shown under the text box
    pub import_error: Option<String>,
}

pub fn toolbox_panel(app: &mut ClusterMapApp, ctx: &egui::Context) {
    let tool = app.state.tool().clone();
    let mut commands = Vec::new();

    egui::Window::new("Toolbox")
        .anchor(Align2::RIGHT_TOP, vec2(-10.0, 10.0))
        .title_bar(false)
        .resizable(false)
        .show(ctx, |ui| {
            for (index, group) in MODE_GROUPS.iter().enumerate() {
                ui.horizontal(|ui| {
                    let current = group.current(tool.mode(), tool.selection());
                    let selected = group
                        .modes
                        .iter()
                        .any(|b| tool.is_active(b.mode, b.selection));
                    let clicked = ModeButton::new(current, selected)
                        .expandable(group.is_expandable())
                        .show(ui)
                        .clicked();
                    if clicked {
                        if group.is_expandable() {
                            app.toolbox.expanded = match app.toolbox.expanded {
                                Some(open) if open == index => None,
                                _ => Some(index),
                            };
                        }
                        commands.push(Command::SetMode {
                            mode: current.mode,
                            selection: current.selection,
                        });
                    }

                    if app.toolbox.expanded == Some(index) {
                        for button in group.modes {
                            let active = tool.is_active(button.mode, button.selection);
                            if ModeButton::new(button, active).show(ui).clicked() {
                                app.toolbox.expanded = None;
                                commands.push(Command::SetMode {
                                    mode: button.mode,
                                    selection: button.selection,
                                });
                            }
                        }
                    }
                });
            }

            if tool.mode().supports_boolean_operation() {
                ui.separator();
                ui.label("Boolean operation");
                let current = tool.config().boolean_operation;
                if ui.selectable_label(current.is_none(), "None").clicked() {
                    commands.push(Command::SetModeConfig(ModeConfig::default()));
                }
                for operation in BooleanOperation::ALL {
                    if ui
                        .selectable_label(current == Some(operation), operation.label())
                        .clicked()
                    {
                        commands.push(Command::SetModeConfig(ModeConfig::with_boolean_operation(
                            operation,
                        )));
                    }
                }
            }

            ui.separator();
            ui.label(format!("{} features", app.state.geometry().len()));
            ui.horizontal(|ui| {
                if ui.button("Clear").clicked() {
                    commands.push(Command::ClearGeometry);
                }
                if ui.button("Export").on_hover_text("Copy as GeoJSON").clicked() {
                    export_geometry(ctx, app.state.geometry());
                }
                if ui.selectable_label(app.toolbox.show_import, "Import").clicked() {
                    app.toolbox.show_import = !app.toolbox.show_import;
                }
            });

            if app.toolbox.show_import {
                import_box(ui, &mut app.toolbox, &mut commands);
            }
        });

    for command in commands {
        app.push_command(command);
    }
}

fn export_geometry(ctx: &egui::Context, geometry: &FeatureCollection) {
    match geometry.to_geojson_string() {
        Ok(text) => {
            log::info!("Copied {} features to the clipboard", geometry.len());
            ctx.copy_text(text);
        }
        Err(err) => log::error!("Failed to export geometry: {}", err),
    }
}

fn import_box(ui: &mut egui::Ui, toolbox: &mut ToolboxState, commands: &mut Vec<Command>) {
    ui.add(
        egui::TextEdit::multiline(&mut toolbox.import_text)
            .hint_text("Paste a GeoJSON FeatureCollection")
            .desired_rows(4)
            .code_editor(),
    );
    if ui.button("Load").clicked() {
        match FeatureCollection::from_geojson_str(&toolbox.import_text) {
            Ok(collection) => {
                log::info!("Importing {} features", collection.len());
                commands.push(Command::ImportGeometry(collection));
                toolbox.import_text.clear();
                toolbox.import_error = None;
                toolbox.show_import = false;
            }
            Err(err) => {
                log::warn!("Import rejected: {}", err);
                toolbox.import_error = Some(err.to_string());
            }
        }
    }
    if let Some(error) = &toolbox.import_error {
        ui.colored_label(ui.visuals().error_fg_color, error);
    }
}
