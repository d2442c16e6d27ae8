//! Bevy backend for the [`DrawList`]: strokes and circles go through
//! gizmos every frame, the background is a sprite and labels are `Text2d`
//! entities rebuilt whenever the list changes.

use bevy::prelude::*;

use crate::{
    camera::HostBounds,
    game::session::PuzzleSession,
    render::{DrawList, DrawOp, render},
    settings::PuzzleSettings,
    visual::background::BackgroundImage,
};

/// Dash and gap length for dashed strokes, native pixels
const DASH_LENGTH: f32 = 12.0;

const LABEL_FONT_SIZE: f32 = 14.0;

/// Outline of the surface, visible even without a background
const SURFACE_OUTLINE: Color = Color::srgba(1.0, 1.0, 1.0, 0.15);

/// Gizmo group for thin strokes (the next-point ring)
#[derive(Default, Reflect, GizmoConfigGroup)]
pub struct RingGizmos;

#[derive(Component)]
pub struct BackgroundSprite;

#[derive(Component)]
pub struct DotLabel;

/// System: Match gizmo line widths to the configured strokes
pub fn configure_gizmos(mut config_store: ResMut<GizmoConfigStore>, settings: Res<PuzzleSettings>) {
    let (config, _) = config_store.config_mut::<DefaultGizmoConfigGroup>();
    config.line.width = settings.style.trail.width;

    let (config, _) = config_store.config_mut::<RingGizmos>();
    config.line.width = settings.style.highlight.width;
}

/// System: Re-render the session whenever it changed
pub fn redraw(
    session: Res<PuzzleSession>,
    settings: Res<PuzzleSettings>,
    mut draw_list: ResMut<DrawList>,
) {
    if !session.is_changed() && !settings.is_changed() {
        return;
    }
    render(&session, &settings, &mut *draw_list);
}

/// System: Draw strokes and circles of the current list
pub fn present_draw_list(
    draw_list: Res<DrawList>,
    session: Res<PuzzleSession>,
    bounds: Res<HostBounds>,
    mut gizmos: Gizmos,
    mut rings: Gizmos<RingGizmos>,
) {
    let layout = session.layout();
    let to_world = |p: Vec2| bounds.viewport_to_world(layout.native_to_viewport(p));
    let scale = layout.display_scale();

    for op in draw_list.ops() {
        match op {
            DrawOp::Clear { size } => {
                gizmos.rect_2d(
                    Isometry2d::from_translation(to_world(*size * 0.5)),
                    *size * scale,
                    SURFACE_OUTLINE,
                );
            }
            DrawOp::StrokePath { points, stroke } if stroke.dashed => {
                for (a, b) in dash_segments(points, DASH_LENGTH) {
                    gizmos.line_2d(to_world(a), to_world(b), stroke.color);
                }
            }
            DrawOp::StrokePath { points, stroke } => {
                gizmos.linestrip_2d(points.iter().map(|p| to_world(*p)), stroke.color);
            }
            DrawOp::StrokeCircle {
                center,
                radius,
                stroke,
            } => {
                rings.circle_2d(
                    Isometry2d::from_translation(to_world(*center)),
                    radius * scale,
                    stroke.color,
                );
            }
            DrawOp::FillCircle {
                center,
                radius,
                color,
            } => {
                // Gizmos only stroke; fill with concentric rings
                let iso = Isometry2d::from_translation(to_world(*center));
                let mut r = 0.5;
                while r <= (radius * scale).max(1.0) {
                    gizmos.circle_2d(iso, r, *color);
                    r += 1.0;
                }
            }
            DrawOp::Image { .. } | DrawOp::Text { .. } => {}
        }
    }
}

/// System: Keep one sprite showing the background at the displayed size
pub fn sync_background_sprite(
    mut commands: Commands,
    draw_list: Res<DrawList>,
    session: Res<PuzzleSession>,
    bounds: Res<HostBounds>,
    background: Res<BackgroundImage>,
    mut sprites: Query<(Entity, &mut Sprite, &mut Transform), With<BackgroundSprite>>,
) {
    if !draw_list.is_changed() && !bounds.is_changed() {
        return;
    }

    let (handle, native_size) = match (draw_list.image(), &background.handle) {
        (Some((image_ref, size)), Some(handle))
            if background.image_ref.as_deref() == Some(image_ref) =>
        {
            (handle.clone(), size)
        }
        _ => {
            for (entity, _, _) in &sprites {
                commands.entity(entity).despawn();
            }
            return;
        }
    };

    let layout = session.layout();
    let display_size = native_size * layout.display_scale();
    let center = bounds
        .viewport_to_world(layout.native_to_viewport(native_size * 0.5))
        .extend(0.0);

    if let Some((_, mut sprite, mut transform)) = sprites.iter_mut().next() {
        sprite.image = handle;
        sprite.custom_size = Some(display_size);
        transform.translation = center;
    } else {
        commands.spawn((
            Sprite {
                image: handle,
                custom_size: Some(display_size),
                ..default()
            },
            Transform::from_translation(center),
            BackgroundSprite,
        ));
    }
}

/// System: Rebuild the id labels of creator markers
pub fn sync_labels(
    mut commands: Commands,
    draw_list: Res<DrawList>,
    session: Res<PuzzleSession>,
    bounds: Res<HostBounds>,
    labels: Query<Entity, With<DotLabel>>,
) {
    if !draw_list.is_changed() && !bounds.is_changed() {
        return;
    }
    for entity in &labels {
        commands.entity(entity).despawn();
    }

    let layout = session.layout();
    for op in draw_list.ops() {
        if let DrawOp::Text { text, at, color } = op {
            let world = bounds.viewport_to_world(layout.native_to_viewport(*at));
            commands.spawn((
                Text2d::new(text.clone()),
                TextFont {
                    font_size: LABEL_FONT_SIZE,
                    ..default()
                },
                TextColor(*color),
                Transform::from_translation(world.extend(2.0)),
                DotLabel,
            ));
        }
    }
}

/// Split a polyline into the "on" pieces of a dash pattern that continues
/// across vertices
pub fn dash_segments(points: &[Vec2], dash: f32) -> Vec<(Vec2, Vec2)> {
    let mut segments = Vec::new();
    if dash <= 0.0 {
        return segments;
    }

    let mut drawing = true;
    // Length left in the current dash or gap
    let mut remaining = dash;

    for pair in points.windows(2) {
        let (mut start, end) = (pair[0], pair[1]);
        let mut length = start.distance(end);
        if length <= f32::EPSILON {
            continue;
        }
        let direction = (end - start) / length;

        while length > 0.0 {
            let step = remaining.min(length);
            let next = start + direction * step;
            if drawing {
                segments.push((start, next));
            }
            start = next;
            length -= step;
            remaining -= step;
            if remaining <= f32::EPSILON {
                drawing = !drawing;
                remaining = dash;
            }
        }
    }
    segments
}
