pub mod crop;
pub mod draw;
pub mod fill;
pub mod gradient;
pub mod move_tool;
pub mod nav;
pub mod pen;
pub mod picker;
pub mod selection;
pub mod shapes;

pub use crop::CropTool;
pub use draw::{BrushKind, DrawTool};
pub use fill::PaintBucketTool;
pub use gradient::GradientTool;
pub use move_tool::MoveTool;
pub use nav::{HandTool, ZoomTool};
pub use pen::PenTool;
pub use picker::ColorPickerTool;
pub use selection::SelectionTool;
pub use shapes::{ShapeKind, ShapesTool};

use egui::{Color32, Pos2, Rect};

use crate::stroke::Stroke;

/// Closed outline of `rect` as a stroke, used for drag previews and the
/// shapes tool.
pub(crate) fn rect_outline_stroke(rect: Rect, color: Color32, thickness: f32) -> Stroke {
    Stroke::new(
        color,
        thickness,
        vec![
            rect.left_top(),
            rect.right_top(),
            rect.right_bottom(),
            rect.left_bottom(),
            rect.left_top(),
        ],
    )
}

/// Ellipse inscribed in `rect`, sampled as a polyline.
pub(crate) fn ellipse_outline_stroke(rect: Rect, color: Color32, thickness: f32) -> Stroke {
    let center = rect.center();
    let (rx, ry) = (rect.width() * 0.5, rect.height() * 0.5);
    let points: Vec<Pos2> = (0..=32)
        .map(|i| {
            let t = i as f32 / 32.0 * std::f32::consts::TAU;
            Pos2::new(center.x + rx * t.cos(), center.y + ry * t.sin())
        })
        .collect();
    Stroke::new(color, thickness, points)
}
