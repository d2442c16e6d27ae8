use bevy::asset::LoadState;
use bevy::prelude::*;

use crate::game::session::{Background, PuzzleSession};

/// Handle of the most recently requested background image
#[derive(Resource, Default)]
pub struct BackgroundImage {
    pub image_ref: Option<String>,
    pub handle: Option<Handle<Image>>,
}

/// System: Start the fetch the session asked for and report the one-shot
/// outcome back to it
pub fn load_background(
    mut session: ResMut<PuzzleSession>,
    asset_server: Res<AssetServer>,
    images: Res<Assets<Image>>,
    mut background: ResMut<BackgroundImage>,
) {
    let Background::Requested(image_ref) = session.background() else {
        return;
    };
    let image_ref = image_ref.clone();

    if background.image_ref.as_deref() != Some(image_ref.as_str()) {
        info!("Requesting background '{}'", image_ref);
        background.handle = Some(asset_server.load(image_ref.clone()));
        background.image_ref = Some(image_ref.clone());
    }

    let Some(handle) = background.handle.clone() else {
        return;
    };

    match asset_server.load_state(handle.id()) {
        LoadState::Loaded => {
            if let Some(image) = images.get(&handle) {
                let size = image.size().as_vec2();
                info!("Background '{}' loaded ({}x{})", image_ref, size.x, size.y);
                session.background_loaded(&image_ref, size);
            }
        }
        LoadState::Failed(err) => {
            warn!("Background '{}' failed to load: {}", image_ref, err);
            session.background_failed(&image_ref);
        }
        _ => {}
    }
}
