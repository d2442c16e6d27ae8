use bevy::prelude::*;

use crate::{
    game::{
        progression::{LevelSelection, SelectionError},
        session::PuzzleSession,
    },
    host::hud::Notice,
    level::{LevelRepository, export_points},
};

const LEVEL_KEYS: [KeyCode; 9] = [
    KeyCode::Digit1,
    KeyCode::Digit2,
    KeyCode::Digit3,
    KeyCode::Digit4,
    KeyCode::Digit5,
    KeyCode::Digit6,
    KeyCode::Digit7,
    KeyCode::Digit8,
    KeyCode::Digit9,
];

/// What a key press asks the host to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostAction {
    SelectLevel(usize),
    NextLevel,
    Reset,
    ToggleCreatorMode,
    ExportRecording,
}

fn action_for_key(key: KeyCode) -> Option<HostAction> {
    if let Some(index) = LEVEL_KEYS.iter().position(|&k| k == key) {
        return Some(HostAction::SelectLevel(index));
    }
    match key {
        KeyCode::KeyN => Some(HostAction::NextLevel),
        KeyCode::KeyR => Some(HostAction::Reset),
        KeyCode::KeyC => Some(HostAction::ToggleCreatorMode),
        KeyCode::KeyE => Some(HostAction::ExportRecording),
        _ => None,
    }
}

/// System: Keyboard controls standing in for the host page's buttons
pub fn handle_controls(
    keys: Res<ButtonInput<KeyCode>>,
    repository: Res<LevelRepository>,
    mut selection: ResMut<LevelSelection>,
    mut session: ResMut<PuzzleSession>,
    mut notice: ResMut<Notice>,
) {
    for action in keys.get_just_pressed().filter_map(|key| action_for_key(*key)) {
        match action {
            HostAction::SelectLevel(index) => {
                let result = selection.select(&repository, index);
                apply_selection(result, &mut session, &mut notice);
            }
            HostAction::NextLevel => {
                let result = selection.advance(&repository);
                apply_selection(result, &mut session, &mut notice);
            }
            HostAction::Reset => {
                info!("Reset");
                session.reset();
            }
            HostAction::ToggleCreatorMode => {
                let enabled = !session.is_creator_mode();
                session.set_creator_mode(enabled);
                notice.show(if enabled {
                    "Creator mode: click to record points"
                } else {
                    "Game mode"
                });
            }
            HostAction::ExportRecording => export_recording(&session, &mut notice),
        }
    }
}

/// Export the recording; the JSON goes to the log
fn export_recording(session: &PuzzleSession, notice: &mut Notice) {
    match export_points(session.recording()) {
        Ok(text) => {
            info!("Exported {} points: {}", session.recording().len(), text);
            notice.show("Coordinates copied!");
        }
        Err(err) => warn!("Export failed: {}", err),
    }
}

fn apply_selection(
    result: Result<&crate::level::Level, SelectionError>,
    session: &mut PuzzleSession,
    notice: &mut Notice,
) {
    match result {
        Ok(level) => {
            info!("Selected level '{}'", level.name);
            session.load_level(level.clone());
        }
        Err(err @ SelectionError::NoMoreLevels { .. }) => {
            warn!("{}", err);
            notice.show("No more levels! Great job!");
        }
        Err(err) => {
            warn!("{}", err);
            notice.show(err.to_string());
        }
    }
}
