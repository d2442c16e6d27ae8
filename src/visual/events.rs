//! Bridges [`SessionHooks`] into bevy messages.
//!
//! The session calls its hooks synchronously from inside a mutation; the
//! hooks queue what happened and a system forwards the queue as messages
//! the host UI reacts to.

use bevy::prelude::*;
use std::sync::{Arc, Mutex};

use crate::game::session::SessionHooks;
use crate::level::{Level, Point};

/// The last point of a level was reached
#[derive(Message, Debug, Clone, PartialEq)]
pub struct PuzzleSolved {
    pub level: String,
}

/// The creator recording changed; carries the full recording
#[derive(Message, Debug, Clone, PartialEq)]
pub struct RecordingChanged {
    pub recording: Vec<Point>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    Solved(PuzzleSolved),
    Recording(RecordingChanged),
}

/// Queue shared between the session's hooks and the forwarding system
#[derive(Resource, Clone, Default)]
pub struct SessionOutbox(Arc<Mutex<Vec<SessionEvent>>>);

impl SessionOutbox {
    pub fn hooks(&self) -> Box<dyn SessionHooks> {
        Box::new(OutboxHooks(self.0.clone()))
    }

    pub fn drain(&self) -> Vec<SessionEvent> {
        match self.0.lock() {
            Ok(mut queue) => std::mem::take(&mut *queue),
            Err(_) => Vec::new(),
        }
    }
}

struct OutboxHooks(Arc<Mutex<Vec<SessionEvent>>>);

impl OutboxHooks {
    fn push(&self, event: SessionEvent) {
        if let Ok(mut queue) = self.0.lock() {
            queue.push(event);
        }
    }
}

impl SessionHooks for OutboxHooks {
    fn on_completed(&mut self, level: &Level) {
        self.push(SessionEvent::Solved(PuzzleSolved {
            level: level.name.clone(),
        }));
    }

    fn on_recording_changed(&mut self, recording: &[Point]) {
        self.push(SessionEvent::Recording(RecordingChanged {
            recording: recording.to_vec(),
        }));
    }
}

/// System: Forward queued session events as messages
pub fn forward_session_events(
    outbox: Res<SessionOutbox>,
    mut solved: MessageWriter<PuzzleSolved>,
    mut recordings: MessageWriter<RecordingChanged>,
) {
    for event in outbox.drain() {
        match event {
            SessionEvent::Solved(message) => {
                solved.write(message);
            }
            SessionEvent::Recording(message) => {
                recordings.write(message);
            }
        }
    }
}
