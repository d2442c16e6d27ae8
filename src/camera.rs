use bevy::prelude::*;
use bevy::window::{PrimaryWindow, WindowResized};

use crate::game::session::PuzzleSession;
use crate::settings::PuzzleSettings;

pub struct CameraPlugin;

impl Plugin for CameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HostBounds>()
            .add_systems(Startup, setup_camera)
            .add_systems(PreUpdate, (track_host_bounds, apply_host_bounds).chain());
    }
}

/// Area of the window the puzzle surface may occupy, in viewport pixels
/// (logical, top-left origin)
#[derive(Resource, Debug, Clone, Copy, PartialEq, Default)]
pub struct HostBounds {
    pub rect: Rect,
    /// Full window size, needed to map viewport pixels to world space
    pub window: Vec2,
}

impl HostBounds {
    pub fn from_window(window: Vec2, settings: &PuzzleSettings) -> Self {
        let margin = settings.surface_margin;
        let min = Vec2::new(margin, margin + settings.hud_height);
        let max = (window - Vec2::splat(margin)).max(min);
        Self {
            rect: Rect::from_corners(min, max),
            window,
        }
    }

    /// Viewport position -> 2D world position (camera at the origin, y up)
    pub fn viewport_to_world(&self, viewport: Vec2) -> Vec2 {
        Vec2::new(
            viewport.x - self.window.x * 0.5,
            self.window.y * 0.5 - viewport.y,
        )
    }
}

/// 2D camera at the origin: one world unit per logical pixel
fn setup_camera(mut commands: Commands) {
    commands.spawn(Camera2d);
}

/// Pick up the initial window size and every resize notification
fn track_host_bounds(
    mut resized: MessageReader<WindowResized>,
    windows: Query<&Window, With<PrimaryWindow>>,
    settings: Res<PuzzleSettings>,
    mut bounds: ResMut<HostBounds>,
) {
    let resize_seen = resized.read().last().is_some();
    if !resize_seen && bounds.window != Vec2::ZERO {
        return;
    }
    let Ok(window) = windows.single() else {
        return;
    };

    let updated = HostBounds::from_window(Vec2::new(window.width(), window.height()), &settings);
    if updated != *bounds {
        debug!("Host bounds updated: {:?}", updated.rect);
        *bounds = updated;
    }
}

fn apply_host_bounds(bounds: Res<HostBounds>, session: Option<ResMut<PuzzleSession>>) {
    if !bounds.is_changed() {
        return;
    }
    if let Some(mut session) = session {
        session.resize_surface(bounds.rect);
    }
}
