use bevy::prelude::*;

mod camera;
mod game;
mod host;
mod input;
mod level;
mod render;
mod settings;
mod view;
mod visual;

use camera::CameraPlugin;
use host::HostPlugin;
use input::InputPlugin;
use settings::PuzzleSettings;

use crate::visual::plugin::PuzzlePlugin;

fn main() {
    let mut app = App::new();

    app.add_plugins(DefaultPlugins.set(WindowPlugin {
        primary_window: Some(primary_window()),
        ..default()
    }))
    .insert_resource(ClearColor(Color::srgb(0.12, 0.12, 0.14)))
    .init_resource::<PuzzleSettings>()
    .add_plugins(CameraPlugin)
    .add_plugins(InputPlugin)
    .add_plugins(PuzzlePlugin)
    .add_plugins(HostPlugin);

    app.run();
}

#[cfg(not(target_arch = "wasm32"))]
fn primary_window() -> Window {
    Window {
        title: "Dot Trace".into(),
        resolution: bevy::window::WindowResolution::new(1280, 900),
        resizable: true,
        ..default()
    }
}

/// In the browser the host page owns the canvas and its size
#[cfg(target_arch = "wasm32")]
fn primary_window() -> Window {
    Window {
        title: "Dot Trace".into(),
        canvas: Some("#game-canvas".into()),
        fit_canvas_to_parent: true,
        prevent_default_event_handling: true,
        ..default()
    }
}
