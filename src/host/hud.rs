//! On-screen stand-ins for the host page: status line, completion overlay,
//! export panel and transient notices.

use bevy::prelude::*;

use crate::{
    game::session::{PuzzleSession, SessionState},
    level::export_points,
    visual::events::{PuzzleSolved, RecordingChanged},
};

const NOTICE_SECONDS: f32 = 3.0;

const CONTROLS_HINT: &str = "1-9 level  N next  R reset  C creator  E export";

/// A message shown for a few seconds
#[derive(Resource, Debug)]
pub struct Notice {
    text: Option<String>,
    timer: Timer,
}

impl Default for Notice {
    fn default() -> Self {
        Self {
            text: None,
            timer: Timer::from_seconds(NOTICE_SECONDS, TimerMode::Once),
        }
    }
}

impl Notice {
    pub fn show(&mut self, text: impl Into<String>) {
        self.text = Some(text.into());
        self.timer.reset();
    }

    pub fn text(&self) -> Option<&str> {
        self.text.as_deref()
    }
}

#[derive(Component)]
pub struct StatusText;

#[derive(Component)]
pub struct NoticeText;

#[derive(Component)]
pub struct CompletionOverlay;

#[derive(Component)]
pub struct ExportPanel;

pub fn spawn_hud(mut commands: Commands) {
    info!("Spawning HUD");

    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::WHITE),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            left: Val::Px(16.0),
            ..default()
        },
        StatusText,
    ));

    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 18.0,
            ..default()
        },
        TextColor(Color::srgb(1.0, 0.85, 0.3)),
        Node {
            position_type: PositionType::Absolute,
            top: Val::Px(12.0),
            right: Val::Px(16.0),
            ..default()
        },
        NoticeText,
    ));

    commands.spawn((
        Text::new(""),
        TextFont {
            font_size: 12.0,
            ..default()
        },
        TextColor(Color::WHITE),
        BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.6)),
        Node {
            position_type: PositionType::Absolute,
            bottom: Val::Px(16.0),
            left: Val::Px(16.0),
            right: Val::Px(16.0),
            padding: UiRect::all(Val::Px(6.0)),
            ..default()
        },
        Visibility::Hidden,
        ExportPanel,
    ));

    commands
        .spawn((
            Node {
                position_type: PositionType::Absolute,
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgba(0.0, 0.0, 0.0, 0.45)),
            Visibility::Hidden,
            CompletionOverlay,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("Puzzle solved!"),
                TextFont {
                    font_size: 48.0,
                    ..default()
                },
                TextColor(Color::WHITE),
            ));
        });
}

/// One-line summary of the session
pub fn status_line(session: &PuzzleSession) -> String {
    let Some(level) = session.level() else {
        return format!("No level loaded    {}", CONTROLS_HINT);
    };
    let detail = if session.is_creator_mode() {
        format!("creator: {} recorded", session.recording().len())
    } else {
        format!("{}/{}", session.satisfied_count(), level.point_count())
    };
    format!("{}  [{}]    {}", level.name, detail, CONTROLS_HINT)
}

pub fn update_status(session: Res<PuzzleSession>, mut texts: Query<&mut Text, With<StatusText>>) {
    if !session.is_changed() {
        return;
    }
    for mut text in &mut texts {
        text.0 = status_line(&session);
    }
}

/// Overlay is up while a game-mode puzzle is solved
pub fn update_overlay(
    session: Res<PuzzleSession>,
    mut overlays: Query<&mut Visibility, With<CompletionOverlay>>,
) {
    if !session.is_changed() {
        return;
    }
    let show = session.state() == SessionState::Completed && !session.is_creator_mode();
    for mut visibility in &mut overlays {
        *visibility = if show {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

/// Export sink: mirror every recording change into the panel
pub fn mirror_recording(
    mut changes: MessageReader<RecordingChanged>,
    mut panels: Query<(&mut Text, &mut Visibility), With<ExportPanel>>,
) {
    let Some(change) = changes.read().last() else {
        return;
    };
    let export = match export_points(&change.recording) {
        Ok(export) => export,
        Err(err) => {
            warn!("Export failed: {}", err);
            return;
        }
    };
    for (mut text, mut visibility) in &mut panels {
        *visibility = if change.recording.is_empty() {
            Visibility::Hidden
        } else {
            Visibility::Inherited
        };
        text.0 = export.clone();
    }
}

pub fn announce_solved(mut solved: MessageReader<PuzzleSolved>, mut notice: ResMut<Notice>) {
    for message in solved.read() {
        info!("🎉 '{}' solved!", message.level);
        notice.show(format!("{} solved!", message.level));
    }
}

pub fn update_notice(
    time: Res<Time>,
    mut notice: ResMut<Notice>,
    mut texts: Query<&mut Text, With<NoticeText>>,
) {
    if notice.text.is_some() {
        notice.timer.tick(time.delta());
        if notice.timer.is_finished() {
            notice.text = None;
        }
    }
    if !notice.is_changed() {
        return;
    }
    let shown = notice.text.clone().unwrap_or_default();
    for mut text in &mut texts {
        text.0 = shown.clone();
    }
}
