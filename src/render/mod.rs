//! Rendering contract: a pure projection of a [`PuzzleSession`] onto an
//! immediate-mode 2D [`Surface`].
//!
//! All coordinates handed to the surface are in native image space. Backends
//! map them to the screen; see `visual::present` for the bevy backend.

mod draw_list;

pub use draw_list::{DrawList, DrawOp};

use crate::game::session::{Background, PuzzleSession};
use crate::settings::{PuzzleSettings, Stroke};
use bevy::color::Color;
use bevy::math::Vec2;

/// Drawing primitives the session needs from the host
pub trait Surface {
    fn clear(&mut self, size: Vec2);
    fn draw_image(&mut self, image_ref: &str, size: Vec2);
    fn stroke_path(&mut self, points: &[Vec2], stroke: Stroke);
    fn stroke_circle(&mut self, center: Vec2, radius: f32, stroke: Stroke);
    fn fill_circle(&mut self, center: Vec2, radius: f32, color: Color);
    fn fill_text(&mut self, text: &str, at: Vec2, color: Color);
}

/// Draw the whole session. Reads only; safe to call any number of times.
pub fn render(session: &PuzzleSession, settings: &PuzzleSettings, surface: &mut impl Surface) {
    let style = &settings.style;
    surface.clear(session.layout().surface_size());

    if let Background::Ready {
        image_ref,
        native_size,
    } = session.background()
    {
        surface.draw_image(image_ref, *native_size);
    }

    if session.is_creator_mode() {
        let recording = session.recording();
        if recording.len() > 1 {
            let path: Vec<Vec2> = recording.iter().map(|p| p.position()).collect();
            surface.stroke_path(&path, style.recording);
        }
        for point in recording {
            surface.fill_circle(point.position(), settings.marker_radius, style.marker);
            surface.fill_text(
                &point.id.to_string(),
                point.position() + settings.label_offset,
                style.label,
            );
        }
        return;
    }

    let satisfied = session.satisfied_points();
    if satisfied.len() > 1 {
        let path: Vec<Vec2> = satisfied.iter().map(|p| p.position()).collect();
        surface.stroke_path(&path, style.connector);
    }

    // The last gesture's trail stays up until the next pointer down or reset
    let trail = session.freehand_path();
    if trail.len() > 1 {
        surface.stroke_path(trail, style.trail);
    }

    if !session.is_completed() {
        if let Some(next) = session.next_point() {
            surface.stroke_circle(next.position(), settings.highlight_radius, style.highlight);
        }
    }
}
