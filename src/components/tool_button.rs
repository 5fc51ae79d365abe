use egui::{Align2, Color32, FontId, Response, Sense, Stroke, Ui, vec2};

use crate::mode::ModeButtonConfig;

const BUTTON_SIZE: f32 = 32.0;

/// Square toolbox button showing a mode's glyph.
pub struct ModeButton<'a> {
    pub config: &'a ModeButtonConfig,
    pub selected: bool,
    /// Draws a small marker when the button opens a group of sub tools
    pub expandable: bool,
}

impl<'a> ModeButton<'a> {
    pub fn new(config: &'a ModeButtonConfig, selected: bool) -> Self {
        Self {
            config,
            selected,
            expandable: false,
        }
    }

    pub fn expandable(mut self, expandable: bool) -> Self {
        self.expandable = expandable;
        self
    }

    pub fn show(&self, ui: &mut Ui) -> Response {
        let (rect, response) = ui.allocate_exact_size(vec2(BUTTON_SIZE, BUTTON_SIZE), Sense::click());

        if ui.is_rect_visible(rect) {
            let bg_color = if self.selected {
                Color32::from_rgb(100, 181, 246)
            } else if response.hovered() {
                Color32::from_gray(40)
            } else {
                Color32::from_gray(30)
            };
            ui.painter().rect_filled(rect, 4.0, bg_color);

            let text_color = if self.selected {
                Color32::BLACK
            } else {
                Color32::WHITE
            };
            ui.painter().text(
                rect.center(),
                Align2::CENTER_CENTER,
                self.config.icon,
                FontId::proportional(20.0),
                text_color,
            );

            if self.expandable {
                let corner = rect.right_bottom() - vec2(4.0, 4.0);
                ui.painter().add(egui::Shape::convex_polygon(
                    vec![corner, corner - vec2(6.0, 0.0), corner - vec2(0.0, 6.0)],
                    text_color,
                    Stroke::NONE,
                ));
            }

            if self.selected {
                ui.painter().rect_stroke(
                    rect,
                    4.0,
                    Stroke::new(2.0, Color32::from_rgb(33, 150, 243)),
                );
            }
        }

        response.on_hover_text(self.config.tooltip)
    }
}
