use bevy::prelude::*;

use crate::{
    game::session::PuzzleSession,
    input::{PointerEvent, PointerEventType},
};

/// System: Feed pointer input into the session in native image space
///
/// Single pointer: while one mouse button or finger is down, events from
/// other pointers are ignored.
pub fn handle_pointer_input(
    mut pointer_events: MessageReader<PointerEvent>,
    mut session: ResMut<PuzzleSession>,
    mut active_pointer: Local<Option<u64>>,
) {
    for event in pointer_events.read() {
        match (*active_pointer, event.event_type) {
            (None, PointerEventType::Down) => *active_pointer = Some(event.id),
            (Some(active), _) if active != event.id => continue,
            (Some(_), PointerEventType::Up) => *active_pointer = None,
            _ => {}
        }

        let on_surface = session.layout().display_rect().contains(event.position);
        let pos = session.to_native(event.position);

        match event.event_type {
            // Gestures only start on the surface; a drag may leave it
            PointerEventType::Down if on_surface => {
                session.handle_pointer_down(pos);
            }
            PointerEventType::Move => {
                if session.handle_pointer_move(pos) {
                    log_progress(&session);
                }
            }
            PointerEventType::Up => {
                session.handle_pointer_up();
            }
            PointerEventType::Click if on_surface => {
                if session.handle_click(pos) {
                    if session.is_creator_mode() {
                        info!(
                            "Recorded point {} at ({:.0}, {:.0})",
                            session.recording().len(),
                            pos.x,
                            pos.y
                        );
                    } else {
                        log_progress(&session);
                    }
                }
            }
            _ => {}
        }
    }
}

fn log_progress(session: &PuzzleSession) {
    if let Some(level) = session.level() {
        info!(
            "Progress: {}/{} on '{}'",
            session.satisfied_count(),
            level.point_count(),
            level.name
        );
    }
}
