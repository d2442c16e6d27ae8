pub mod controls;
pub mod hud;

use bevy::prelude::*;

use crate::visual::plugin::PuzzleSystems;
use controls::handle_controls;
use hud::{
    Notice, announce_solved, mirror_recording, spawn_hud, update_notice, update_overlay,
    update_status,
};

/// Controls and HUD around the puzzle surface
pub struct HostPlugin;

impl Plugin for HostPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<Notice>()
            .add_systems(Startup, spawn_hud)
            .add_systems(Update, handle_controls.before(PuzzleSystems))
            .add_systems(
                Update,
                (
                    announce_solved,
                    mirror_recording,
                    update_status,
                    update_overlay,
                    update_notice,
                )
                    .chain()
                    .after(PuzzleSystems),
            );
    }
}
