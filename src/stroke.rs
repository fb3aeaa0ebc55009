use egui::{Color32, Pos2};
use serde::{Deserialize, Serialize};

/// A finished, immutable stroke as stored in a layer or mask.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
}

/// A stroke that is still being drawn by a tool.
pub struct MutableStroke {
    points: Vec<Pos2>,
    color: Color32,
    thickness: f32,
}

impl Stroke {
    pub fn new(color: Color32, thickness: f32, points: Vec<Pos2>) -> Self {
        Self {
            points,
            color,
            thickness,
        }
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    pub fn color(&self) -> Color32 {
        self.color
    }

    pub fn thickness(&self) -> f32 {
        self.thickness
    }

    /// Returns true if `pos` lies on the stroke, within its thickness.
    pub fn hit_test(&self, pos: Pos2) -> bool {
        let radius = (self.thickness * 0.5).max(1.0);
        if self.points.len() == 1 {
            return self.points[0].distance(pos) <= radius;
        }
        self.points
            .windows(2)
            .any(|seg| distance_to_segment(pos, seg[0], seg[1]) <= radius)
    }
}

impl MutableStroke {
    pub fn new(color: Color32, thickness: f32) -> Self {
        Self {
            points: Vec::new(),
            color,
            thickness,
        }
    }

    pub fn add_point(&mut self, point: Pos2) {
        self.points.push(point);
    }

    pub fn points(&self) -> &[Pos2] {
        &self.points
    }

    /// Freezes the in-progress stroke into an immutable one.
    pub fn to_stroke(&self) -> Stroke {
        Stroke::new(self.color, self.thickness, self.points.clone())
    }
}

fn distance_to_segment(p: Pos2, a: Pos2, b: Pos2) -> f32 {
    let ab = b - a;
    let len_sq = ab.length_sq();
    if len_sq == 0.0 {
        return a.distance(p);
    }
    let t = ((p - a).dot(ab) / len_sq).clamp(0.0, 1.0);
    (a + ab * t).distance(p)
}
