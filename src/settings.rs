// settings.rs

use bevy::color::Color;
use bevy::math::Vec2;
use bevy::prelude::Resource;

/// Tunables for hit-testing, layout and drawing. Distances are in native
/// image pixels unless noted.
#[derive(Resource, Debug, Clone)]
pub struct PuzzleSettings {
    /// Tolerance for discrete clicks
    pub click_hit_radius: f32,
    /// Tolerance for drag samples; larger because a fast drag can skip a
    /// point's center between two samples
    pub drag_hit_radius: f32,
    /// Ring drawn around the next point
    pub highlight_radius: f32,
    /// Creator mode markers
    pub marker_radius: f32,
    pub label_offset: Vec2,
    /// Inset from the window edges, in viewport pixels
    pub surface_margin: f32,
    /// Space reserved above the surface for the status line, in viewport pixels
    pub hud_height: f32,
    pub style: RenderStyle,
}

impl Default for PuzzleSettings {
    fn default() -> Self {
        Self {
            click_hit_radius: 20.0,
            drag_hit_radius: 30.0,
            highlight_radius: 25.0,
            marker_radius: 4.0,
            label_offset: Vec2::new(5.0, -5.0),
            surface_margin: 16.0,
            hud_height: 48.0,
            style: RenderStyle::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Stroke {
    pub color: Color,
    pub width: f32,
    pub dashed: bool,
}

impl Stroke {
    pub const fn solid(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dashed: false,
        }
    }

    pub const fn dashed(color: Color, width: f32) -> Self {
        Self {
            color,
            width,
            dashed: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderStyle {
    /// Player's freehand trail of the last gesture
    pub trail: Stroke,
    /// Segments between satisfied points
    pub connector: Stroke,
    /// Ring around the next unsatisfied point
    pub highlight: Stroke,
    /// Lines between recorded points in creator mode
    pub recording: Stroke,
    pub marker: Color,
    pub label: Color,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            trail: Stroke::solid(Color::srgb_u8(0x4a, 0x90, 0xe2), 3.0),
            connector: Stroke::dashed(Color::srgba(0.29, 0.565, 0.886, 0.6), 3.0),
            highlight: Stroke::solid(Color::srgba(1.0, 200.0 / 255.0, 0.0, 0.6), 2.0),
            recording: Stroke::solid(Color::srgb_u8(0x4a, 0x90, 0xe2), 3.0),
            marker: Color::srgb(1.0, 0.0, 0.0),
            label: Color::BLACK,
        }
    }
}
