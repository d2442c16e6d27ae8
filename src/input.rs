use bevy::input::touch::{TouchInput, TouchPhase};
use bevy::prelude::*;
use bevy::window::CursorMoved;

pub struct InputPlugin;
impl Plugin for InputPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CursorPos>()
            .add_message::<PointerEvent>()
            .add_systems(Update, collect_pointer_events);
    }
}

#[derive(Message, Debug, Clone, Copy, PartialEq)]
pub struct PointerEvent {
    /// Viewport (logical) coordinates: pixels from top-left
    pub position: Vec2,
    pub event_type: PointerEventType,
    /// 0 = mouse, >0 = touch id
    pub id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointerEventType {
    Down,
    Move,
    Up,
    /// Press and release on the surface; follows the matching `Up`
    Click,
}

#[derive(Resource, Default, Debug, Clone, Copy)]
pub struct CursorPos(pub Option<Vec2>);

pub fn collect_pointer_events(
    mouse_buttons: Res<ButtonInput<MouseButton>>,
    mut cursor: ResMut<CursorPos>,
    mut ev_cursor: MessageReader<CursorMoved>,
    mut touch_events: MessageReader<TouchInput>,
    mut out: MessageWriter<PointerEvent>,
) {
    for e in ev_cursor.read() {
        cursor.0 = Some(e.position);
        // Only real movement extends a drag
        if mouse_buttons.pressed(MouseButton::Left) && !mouse_buttons.just_pressed(MouseButton::Left) {
            out.write(pointer(e.position, PointerEventType::Move, 0));
        }
    }

    if let Some(p) = cursor.0 {
        if mouse_buttons.just_pressed(MouseButton::Left) {
            out.write(pointer(p, PointerEventType::Down, 0));
        }
        if mouse_buttons.just_released(MouseButton::Left) {
            out.write(pointer(p, PointerEventType::Up, 0));
            out.write(pointer(p, PointerEventType::Click, 0));
        }
    }

    for ev in touch_events.read() {
        for event_type in touch_pointer_types(ev.phase) {
            out.write(pointer(ev.position, *event_type, ev.id + 1));
        }
    }
}

fn pointer(position: Vec2, event_type: PointerEventType, id: u64) -> PointerEvent {
    PointerEvent {
        position,
        event_type,
        id,
    }
}

/// Pointer events produced by one touch phase
fn touch_pointer_types(phase: TouchPhase) -> &'static [PointerEventType] {
    match phase {
        TouchPhase::Started => &[PointerEventType::Down],
        TouchPhase::Moved => &[PointerEventType::Move],
        TouchPhase::Ended => &[PointerEventType::Up, PointerEventType::Click],
        // A canceled touch is not a click
        TouchPhase::Canceled => &[PointerEventType::Up],
    }
}
