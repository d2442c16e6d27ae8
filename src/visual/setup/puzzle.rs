use bevy::prelude::*;

use crate::{
    game::{
        progression::LevelSelection,
        session::{HitRadii, PuzzleSession},
    },
    level::LevelRepository,
    settings::PuzzleSettings,
    visual::events::SessionOutbox,
};

/// System: Load the level table
pub fn setup_levels(mut commands: Commands) {
    let repository = LevelRepository::builtin();
    info!("✓ {} levels available:", repository.len());
    for (index, level) in repository.iter().enumerate() {
        info!("  {}. {} ({} points)", index + 1, level.name, level.point_count());
        if !level.has_sequential_ids() {
            warn!("Level '{}' ids are not 1..n in order", level.name);
        }
    }
    commands.insert_resource(repository);
    commands.insert_resource(LevelSelection::default());
}

/// System: Create the session with its hooks and select the first level
pub fn setup_session(
    mut commands: Commands,
    settings: Res<PuzzleSettings>,
    outbox: Res<SessionOutbox>,
    repository: Res<LevelRepository>,
    mut selection: ResMut<LevelSelection>,
) {
    let mut session = PuzzleSession::new(HitRadii::from(&*settings), outbox.hooks());

    match selection.advance(&repository) {
        Ok(level) => session.load_level(level.clone()),
        Err(err) => warn!("Starting without a level: {}", err),
    }

    commands.insert_resource(session);
}
