use egui::{Key, PointerButton, Pos2, Rect, Response, Sense, Ui};

use crate::ClusterMapApp;
use crate::event::MapEvent;
use crate::mode::{ToolMode, ToolModeController};
use crate::tools::{MapTool, PointerInput, pick_nearest};
use crate::view::ViewState;

/// Scroll pixels per zoom level.
const SCROLL_PER_ZOOM_LEVEL: f64 = 200.0;

/// The map surface. Shows a status label instead until the dataset is loaded.
pub fn map_panel(app: &mut ClusterMapApp, ctx: &egui::Context) {
    egui::CentralPanel::default()
        .frame(egui::Frame::none())
        .show(ctx, |ui| {
            if !app.state.is_loaded() {
                ui.centered_and_justified(|ui| ui.label(app.status_text()));
                return;
            }

            let (response, painter) = ui.allocate_painter(ui.available_size(), Sense::click_and_drag());
            let rect = response.rect;
            let tool = app.state.tool().clone();
            let primary_pans = pans_with_primary(&tool);

            update_camera(ui, &response, &mut app.view, rect, primary_pans);
            let inputs = pointer_inputs(ui, &response, &app.view, rect, primary_pans);

            let Some(layers) = app.state.layers() else {
                return;
            };

            let mut events = Vec::new();
            for input in inputs {
                let event = if tool.selection().is_active() {
                    app.selection_tool.on_input(input, layers)
                } else {
                    app.editor.on_input(input, layers)
                };
                events.extend(event);
            }

            let preview = if tool.selection().is_active() {
                app.selection_tool.preview()
            } else {
                app.editor.preview()
            };
            app.renderer.render(&painter, rect, &app.view, layers, preview.as_ref());

            let picked = response
                .hover_pos()
                .and_then(|p| pick_nearest(layers, &app.view, rect, p, app.config.pick_radius_px));
            if let Some(object) = picked {
                response.on_hover_text_at_pointer(object.tooltip.clone());
                events.push(MapEvent::Pick {
                    object: Some(object),
                });
            }

            for event in &events {
                app.state.handle_event(event);
            }
        });
}

/// Primary drag is free for panning only when no tool wants it.
fn pans_with_primary(tool: &ToolModeController) -> bool {
    tool.mode() == ToolMode::View && !tool.selection().is_active()
}

fn update_camera(ui: &Ui, response: &Response, view: &mut ViewState, rect: Rect, primary_pans: bool) {
    if response.dragged_by(PointerButton::Secondary)
        || (primary_pans && response.dragged_by(PointerButton::Primary))
    {
        view.pan(response.drag_delta());
    }

    let Some(anchor) = response.hover_pos() else {
        return;
    };
    let (scroll, pinch) = ui.input(|i| (i.smooth_scroll_delta.y, i.zoom_delta()));
    if scroll != 0.0 {
        view.zoom_around(f64::from(scroll) / SCROLL_PER_ZOOM_LEVEL, anchor, rect);
    }
    if pinch != 1.0 {
        view.zoom_around(f64::from(pinch).log2(), anchor, rect);
    }
}

/// Converts this frame's pointer and key activity into map-space input.
fn pointer_inputs(
    ui: &Ui,
    response: &Response,
    view: &ViewState,
    rect: Rect,
    primary_pans: bool,
) -> Vec<PointerInput> {
    let to_map = |p: Pos2| view.unproject(p, rect);
    let pointer = response.interact_pointer_pos().or(response.hover_pos());
    let mut inputs = Vec::new();

    if let Some(p) = response.hover_pos() {
        inputs.push(PointerInput::Hover(to_map(p)));
    }

    if !primary_pans {
        if response.drag_started_by(PointerButton::Primary) {
            let origin = ui.input(|i| i.pointer.press_origin()).or(pointer);
            inputs.extend(origin.map(|p| PointerInput::DragStart(to_map(p))));
        } else if response.dragged_by(PointerButton::Primary) {
            inputs.extend(pointer.map(|p| PointerInput::Drag(to_map(p))));
        }
        if response.drag_stopped_by(PointerButton::Primary) {
            inputs.extend(pointer.map(|p| PointerInput::DragEnd(to_map(p))));
        }
    }

    // a double click also reports the second click; only the double click counts
    if response.double_clicked() {
        inputs.extend(pointer.map(|p| PointerInput::DoubleClick(to_map(p))));
    } else if response.clicked() {
        inputs.extend(pointer.map(|p| PointerInput::Click(to_map(p))));
    }

    if !ui.ctx().wants_keyboard_input() {
        let (enter, escape) = ui.input(|i| (i.key_pressed(Key::Enter), i.key_pressed(Key::Escape)));
        if enter {
            inputs.push(PointerInput::Finish);
        }
        if escape {
            inputs.push(PointerInput::Cancel);
        }
    }

    inputs
}
