use egui::{epaint, Color32, Painter, Pos2, Rect, TextureHandle, Vec2};

use crate::context::EditorContext;
use crate::layer::{Fill, Layer, LayerContent, PaintElement};
use crate::stroke::Stroke;
use crate::view::View;

/// Tint used by the rubylith mask overlay.
const RUBYLITH: Color32 = Color32::from_rgba_premultiplied(128, 0, 0, 128);

/// Paints the document into the canvas area, honoring the view's pan/zoom
/// and its mask view mode.
pub struct Renderer {
    ctx: egui::Context,
}

impl Renderer {
    pub fn new(cc: &eframe::CreationContext<'_>) -> Self {
        Self {
            ctx: cc.egui_ctx.clone(),
        }
    }

    pub fn create_texture(&self, image: egui::ColorImage, name: &str) -> TextureHandle {
        self.ctx
            .load_texture(name, image, egui::TextureOptions::default())
    }

    pub fn render(&self, ectx: &EditorContext, painter: &Painter, canvas_rect: Rect) {
        let view = &ectx.view;
        let mode = view.mask_view_mode();
        let canvas = transform_rect(ectx.document.canvas(), view, canvas_rect);
        painter.rect_filled(canvas, 0.0, Color32::WHITE);

        let active = ectx.document.active_index();
        for (i, layer) in ectx.document.layers().iter().enumerate() {
            if !layer.visible {
                continue;
            }
            let is_active = i == active;

            if is_active && mode.show_mask() {
                // The mask replaces the layer on screen.
                if let Some(mask) = layer.mask() {
                    self.paint_elements(
                        mask.elements(),
                        layer.offset,
                        painter,
                        view,
                        canvas_rect,
                        canvas,
                    );
                }
                continue;
            }

            self.paint_layer(layer, painter, view, canvas_rect, canvas);

            if is_active && mode.show_ruby() {
                if let Some(mask) = layer.mask() {
                    painter.rect_filled(canvas, 0.0, RUBYLITH);
                    self.paint_elements(
                        mask.elements(),
                        layer.offset,
                        painter,
                        view,
                        canvas_rect,
                        canvas,
                    );
                }
            }
        }

        if let Some(preview) = ectx.preview_stroke() {
            self.paint_stroke(preview, Vec2::ZERO, painter, view, canvas_rect);
        }

        if let Some(selection) = ectx.document.selection() {
            let rect = transform_rect(selection, view, canvas_rect);
            painter.rect_stroke(rect, 0.0, egui::Stroke::new(1.0, Color32::LIGHT_BLUE));
        }
    }

    fn paint_layer(
        &self,
        layer: &Layer,
        painter: &Painter,
        view: &View,
        canvas_rect: Rect,
        doc_rect: Rect,
    ) {
        match &layer.content {
            LayerContent::Paint(elements) => {
                self.paint_elements(elements, layer.offset, painter, view, canvas_rect, doc_rect);
            }
            LayerContent::Image { texture, size } => {
                if let Some(texture) = texture {
                    let min = view.canvas_to_screen(Pos2::ZERO + layer.offset, canvas_rect);
                    let max = view.canvas_to_screen(
                        Pos2::new(size[0] as f32, size[1] as f32) + layer.offset,
                        canvas_rect,
                    );
                    painter.image(
                        texture.id(),
                        Rect::from_min_max(min, max),
                        Rect::from_min_max(Pos2::ZERO, Pos2::new(1.0, 1.0)),
                        Color32::WHITE,
                    );
                }
            }
        }
    }

    fn paint_elements(
        &self,
        elements: &[PaintElement],
        offset: Vec2,
        painter: &Painter,
        view: &View,
        canvas_rect: Rect,
        doc_rect: Rect,
    ) {
        for element in elements {
            match element {
                PaintElement::Stroke(stroke) => {
                    self.paint_stroke(stroke, offset, painter, view, canvas_rect);
                }
                PaintElement::Fill(fill) => {
                    painter.add(fill_shape(fill, doc_rect, view, canvas_rect));
                }
            }
        }
    }

    fn paint_stroke(
        &self,
        stroke: &Stroke,
        offset: Vec2,
        painter: &Painter,
        view: &View,
        canvas_rect: Rect,
    ) {
        let points: Vec<Pos2> = stroke
            .points()
            .iter()
            .map(|p| view.canvas_to_screen(*p + offset, canvas_rect))
            .collect();
        let width = stroke.thickness() * view.zoom();
        match points.as_slice() {
            [] => {}
            [point] => {
                painter.circle_filled(*point, width * 0.5, stroke.color());
            }
            _ => {
                painter.add(epaint::PathShape::line(
                    points,
                    egui::Stroke::new(width, stroke.color()),
                ));
            }
        }
    }

}

/// Fills cover the document canvas, not the whole panel the painter clips
/// to, so `doc_rect` bounds both variants.
fn fill_shape(fill: &Fill, doc_rect: Rect, view: &View, canvas_rect: Rect) -> epaint::Shape {
    match fill {
        Fill::Solid(color) => epaint::Shape::rect_filled(doc_rect, 0.0, *color),
        Fill::Linear {
            start,
            end,
            from,
            to,
        } => {
            let start = view.canvas_to_screen(*start, canvas_rect);
            let end = view.canvas_to_screen(*end, canvas_rect);
            epaint::Shape::mesh(gradient_mesh(doc_rect, start, end, *from, *to))
        }
    }
}

fn transform_rect(rect: Rect, view: &View, canvas_rect: Rect) -> Rect {
    Rect::from_min_max(
        view.canvas_to_screen(rect.min, canvas_rect),
        view.canvas_to_screen(rect.max, canvas_rect),
    )
}

/// A screen-space quad whose vertex colors interpolate `from` -> `to`
/// along the start/end axis.
fn gradient_mesh(rect: Rect, start: Pos2, end: Pos2, from: Color32, to: Color32) -> epaint::Mesh {
    let axis = end - start;
    let len_sq = axis.length_sq().max(f32::EPSILON);
    let color_at = |p: Pos2| {
        let t = ((p - start).dot(axis) / len_sq).clamp(0.0, 1.0);
        lerp_color(from, to, t)
    };

    let mut mesh = epaint::Mesh::default();
    for corner in [
        rect.left_top(),
        rect.right_top(),
        rect.right_bottom(),
        rect.left_bottom(),
    ] {
        mesh.colored_vertex(corner, color_at(corner));
    }
    mesh.add_triangle(0, 1, 2);
    mesh.add_triangle(0, 2, 3);
    mesh
}

fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let lerp = |x: u8, y: u8| (x as f32 + (y as f32 - x as f32) * t).round() as u8;
    Color32::from_rgba_premultiplied(
        lerp(a.r(), b.r()),
        lerp(a.g(), b.g()),
        lerp(a.b(), b.b()),
        lerp(a.a(), b.a()),
    )
}
