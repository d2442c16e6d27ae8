use crate::input::collect_pointer_events;
use crate::render::DrawList;
use crate::visual::background::{BackgroundImage, load_background};
use crate::visual::events::{PuzzleSolved, RecordingChanged, SessionOutbox, forward_session_events};
use crate::visual::interactions::handle_pointer_input;
use crate::visual::present::{
    RingGizmos, configure_gizmos, present_draw_list, redraw, sync_background_sprite, sync_labels,
};
use crate::visual::setup::{setup_levels, setup_session};
use bevy::prelude::*;

pub struct PuzzlePlugin;

impl Plugin for PuzzlePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DrawList>()
            .init_resource::<BackgroundImage>()
            .init_resource::<SessionOutbox>()
            .init_gizmo_group::<RingGizmos>()
            .add_message::<PuzzleSolved>()
            .add_message::<RecordingChanged>()
            // Levels first, then the session that loads the first one
            .add_systems(
                Startup,
                (setup_levels, setup_session, configure_gizmos).chain(),
            )
            .add_systems(
                Update,
                (
                    handle_pointer_input,
                    load_background,
                    forward_session_events,
                    // Session -> draw list, then draw list -> screen
                    redraw,
                    present_draw_list,
                    sync_background_sprite,
                    sync_labels,
                )
                    .chain()
                    .in_set(PuzzleSystems)
                    .after(collect_pointer_events),
            );
    }
}

/// Session update and drawing; host controls run before it
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct PuzzleSystems;
