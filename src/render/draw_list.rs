// render/draw_list.rs

use super::Surface;
use crate::settings::Stroke;
use bevy::color::Color;
use bevy::math::Vec2;
use bevy::prelude::Resource;

#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Clear { size: Vec2 },
    Image { image_ref: String, size: Vec2 },
    StrokePath { points: Vec<Vec2>, stroke: Stroke },
    StrokeCircle { center: Vec2, radius: f32, stroke: Stroke },
    FillCircle { center: Vec2, radius: f32, color: Color },
    Text { text: String, at: Vec2, color: Color },
}

/// Surface that records what was drawn, replayed later by a backend
#[derive(Resource, Debug, Clone, Default, PartialEq)]
pub struct DrawList {
    ops: Vec<DrawOp>,
}

impl DrawList {
    pub fn ops(&self) -> &[DrawOp] {
        &self.ops
    }

    /// Background image drawn this frame and its native size
    pub fn image(&self) -> Option<(&str, Vec2)> {
        self.ops.iter().find_map(|op| match op {
            DrawOp::Image { image_ref, size } => Some((image_ref.as_str(), *size)),
            _ => None,
        })
    }
}

impl Surface for DrawList {
    fn clear(&mut self, size: Vec2) {
        self.ops.clear();
        self.ops.push(DrawOp::Clear { size });
    }

    fn draw_image(&mut self, image_ref: &str, size: Vec2) {
        self.ops.push(DrawOp::Image {
            image_ref: image_ref.to_string(),
            size,
        });
    }

    fn stroke_path(&mut self, points: &[Vec2], stroke: Stroke) {
        self.ops.push(DrawOp::StrokePath {
            points: points.to_vec(),
            stroke,
        });
    }

    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: Stroke) {
        self.ops.push(DrawOp::StrokeCircle {
            center,
            radius,
            stroke,
        });
    }

    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color) {
        self.ops.push(DrawOp::FillCircle {
            center,
            radius,
            color,
        });
    }

    fn fill_text(&mut self, text: &str, at: Vec2, color: Color) {
        self.ops.push(DrawOp::Text {
            text: text.to_string(),
            at,
            color,
        });
    }
}
