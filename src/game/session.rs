// game/session.rs

use crate::level::{Level, Point};
use crate::settings::PuzzleSettings;
use crate::view::SurfaceLayout;
use bevy::math::{Rect, Vec2};
use bevy::prelude::Resource;

/// Where the session is in a puzzle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionState {
    /// No level loaded
    Idle,
    /// Level set, nothing satisfied yet
    Loaded,
    /// Some but not all points satisfied
    InProgress,
    /// Every point satisfied (immediately, for a level with no points)
    Completed,
}

/// Background image for the current level
#[derive(Debug, Clone, PartialEq)]
pub enum Background {
    /// No level loaded
    None,
    /// Fetch requested, waiting for the one-shot load signal
    Requested(String),
    Ready { image_ref: String, native_size: Vec2 },
    /// The load failed; the session keeps working without a background
    Failed(String),
}

/// Output side of the session. The host adapts these to concrete UI.
pub trait SessionHooks: Send + Sync {
    /// The last point of the level was just satisfied
    fn on_completed(&mut self, _level: &Level) {}

    /// The creator recording changed; receives the whole recording
    fn on_recording_changed(&mut self, _recording: &[Point]) {}
}

struct NoHooks;

impl SessionHooks for NoHooks {}

/// Hit tolerances, see [`PuzzleSettings`]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitRadii {
    pub click: f32,
    pub drag: f32,
}

impl From<&PuzzleSettings> for HitRadii {
    fn from(settings: &PuzzleSettings) -> Self {
        HitRadii {
            click: settings.click_hit_radius,
            drag: settings.drag_hit_radius,
        }
    }
}

/// One puzzle session: the loaded level, the player's progress, the
/// creator recording and the drawable surface's layout.
///
/// Pointer positions passed to the `handle_*` methods are in native image
/// space; use [`PuzzleSession::to_native`] to convert viewport positions.
#[derive(Resource)]
pub struct PuzzleSession {
    level: Option<Level>,
    /// Leading points satisfied in order
    satisfied: usize,
    freehand: Vec<Vec2>,
    dragging: bool,
    creator_mode: bool,
    recording: Vec<Point>,
    background: Background,
    layout: SurfaceLayout,
    radii: HitRadii,
    hooks: Box<dyn SessionHooks>,
}

impl PuzzleSession {
    pub fn new(radii: HitRadii, hooks: Box<dyn SessionHooks>) -> Self {
        PuzzleSession {
            level: None,
            satisfied: 0,
            freehand: Vec::new(),
            dragging: false,
            creator_mode: false,
            recording: Vec::new(),
            background: Background::None,
            layout: SurfaceLayout::default(),
            radii,
            hooks,
        }
    }

    /// Session that reports to nobody
    pub fn without_hooks(radii: HitRadii) -> Self {
        Self::new(radii, Box::new(NoHooks))
    }

    // === Query Methods ===

    pub fn state(&self) -> SessionState {
        let Some(level) = &self.level else {
            return SessionState::Idle;
        };
        if self.satisfied >= level.points.len() {
            SessionState::Completed
        } else if self.satisfied == 0 {
            SessionState::Loaded
        } else {
            SessionState::InProgress
        }
    }

    pub fn is_completed(&self) -> bool {
        self.state() == SessionState::Completed
    }

    pub fn level(&self) -> Option<&Level> {
        self.level.as_ref()
    }

    pub fn satisfied_count(&self) -> usize {
        self.satisfied
    }

    /// Points satisfied so far, in order
    pub fn satisfied_points(&self) -> &[Point] {
        match &self.level {
            Some(level) => &level.points[..self.satisfied.min(level.points.len())],
            None => &[],
        }
    }

    /// The point the player has to reach next
    pub fn next_point(&self) -> Option<&Point> {
        self.level.as_ref()?.points.get(self.satisfied)
    }

    pub fn freehand_path(&self) -> &[Vec2] {
        &self.freehand
    }

    pub fn is_dragging(&self) -> bool {
        self.dragging
    }

    pub fn is_creator_mode(&self) -> bool {
        self.creator_mode
    }

    pub fn recording(&self) -> &[Point] {
        &self.recording
    }

    pub fn background(&self) -> &Background {
        &self.background
    }

    pub fn layout(&self) -> &SurfaceLayout {
        &self.layout
    }

    /// Viewport position -> native image space
    pub fn to_native(&self, viewport: Vec2) -> Vec2 {
        self.layout.viewport_to_native(viewport)
    }

    // === Level & Mode ===

    /// Make `level` current, clear transient state and request its image
    pub fn load_level(&mut self, level: Level) {
        log::info!(
            "Loading level '{}' ({} points)",
            level.name,
            level.points.len()
        );
        self.background = Background::Requested(level.image_ref.clone());
        self.layout.set_native_size(None);
        self.level = Some(level);
        self.reset();
    }

    /// Back to the start of the current level
    pub fn reset(&mut self) {
        self.satisfied = 0;
        self.freehand.clear();
        self.dragging = false;
        self.clear_recording();

        if !self.creator_mode {
            if let Some(level) = self.level.as_ref().filter(|level| level.points.is_empty()) {
                log::info!("Level '{}' has no points, nothing to trace", level.name);
                self.hooks.on_completed(level);
            }
        }
    }

    pub fn set_creator_mode(&mut self, enabled: bool) {
        log::info!("Creator mode {}", if enabled { "on" } else { "off" });
        self.creator_mode = enabled;
        self.reset();
    }

    // === Surface ===

    /// Host bounds changed (window resize)
    pub fn resize_surface(&mut self, bounds: Rect) {
        self.layout.set_bounds(bounds);
    }

    /// One-shot load signal for the background image
    ///
    /// Ignored if it belongs to a level that is no longer current.
    pub fn background_loaded(&mut self, image_ref: &str, native_size: Vec2) {
        if !self.is_requested(image_ref) {
            return;
        }
        log::info!("Background '{}' ready at {}x{}", image_ref, native_size.x, native_size.y);
        self.layout.set_native_size(Some(native_size));
        self.background = Background::Ready {
            image_ref: image_ref.to_string(),
            native_size,
        };
    }

    pub fn background_failed(&mut self, image_ref: &str) {
        if !self.is_requested(image_ref) {
            return;
        }
        log::warn!("Background '{}' failed to load, continuing without it", image_ref);
        self.background = Background::Failed(image_ref.to_string());
    }

    fn is_requested(&self, image_ref: &str) -> bool {
        matches!(&self.background, Background::Requested(requested) if requested == image_ref)
    }

    // === Pointer Input ===

    /// Start a drag gesture (game mode only)
    pub fn handle_pointer_down(&mut self, pos: Vec2) {
        if self.creator_mode || self.level.is_none() || self.is_completed() {
            return;
        }
        self.dragging = true;
        self.freehand.clear();
        self.freehand.push(pos);
    }

    /// Extend the drag trail and test the next point
    pub fn handle_pointer_move(&mut self, pos: Vec2) -> bool {
        if !self.dragging || self.creator_mode || self.is_completed() {
            return false;
        }
        self.freehand.push(pos);
        self.try_advance(pos, self.radii.drag)
    }

    /// End the drag gesture; the trail stays visible
    pub fn handle_pointer_up(&mut self) {
        self.dragging = false;
    }

    /// Creator mode: record a point. Game mode: test the next point with
    /// the click tolerance.
    pub fn handle_click(&mut self, pos: Vec2) -> bool {
        if self.creator_mode {
            self.record_point(pos);
            true
        } else {
            self.try_advance(pos, self.radii.click)
        }
    }

    fn record_point(&mut self, pos: Vec2) {
        let point = Point::new(
            self.recording.len() as u32 + 1,
            pos.x.round(),
            pos.y.round(),
        );
        log::debug!("Recorded point {} at ({}, {})", point.id, point.x, point.y);
        self.recording.push(point);
        self.hooks.on_recording_changed(&self.recording);
    }

    fn clear_recording(&mut self) {
        if self.recording.is_empty() {
            return;
        }
        self.recording.clear();
        self.hooks.on_recording_changed(&self.recording);
    }

    /// Only the next point is ever tested, so progress moves by at most
    /// one per event and strictly in order.
    fn try_advance(&mut self, pos: Vec2, radius: f32) -> bool {
        let Some(level) = &self.level else {
            return false;
        };
        let Some(target) = level.points.get(self.satisfied) else {
            return false;
        };
        if pos.distance(target.position()) >= radius {
            return false;
        }

        self.satisfied += 1;
        log::debug!(
            "Reached point {} ({}/{})",
            target.id,
            self.satisfied,
            level.points.len()
        );

        if self.satisfied == level.points.len() {
            log::info!("Level '{}' completed", level.name);
            self.dragging = false;
            self.hooks.on_completed(level);
        }
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::sync::{Arc, Mutex};

    #[derive(Default)]
    struct Calls {
        completed: Vec<String>,
        recordings: Vec<Vec<Point>>,
    }

    struct Spy(Arc<Mutex<Calls>>);

    impl SessionHooks for Spy {
        fn on_completed(&mut self, level: &Level) {
            self.0.lock().unwrap().completed.push(level.name.clone());
        }

        fn on_recording_changed(&mut self, recording: &[Point]) {
            self.0.lock().unwrap().recordings.push(recording.to_vec());
        }
    }

    const RADII: HitRadii = HitRadii {
        click: 20.0,
        drag: 20.0,
    };

    fn spied_session() -> (PuzzleSession, Arc<Mutex<Calls>>) {
        let calls = Arc::new(Mutex::new(Calls::default()));
        let session = PuzzleSession::new(RADII, Box::new(Spy(calls.clone())));
        (session, calls)
    }

    fn line_level() -> Level {
        Level::new(
            "Line",
            "line.png",
            vec![
                Point::new(1, 100.0, 100.0),
                Point::new(2, 200.0, 100.0),
                Point::new(3, 300.0, 100.0),
            ],
        )
    }

    fn start_drag(session: &mut PuzzleSession) {
        session.handle_pointer_down(Vec2::new(0.0, 0.0));
    }

    #[test]
    fn test_new_session_is_idle() {
        let session = PuzzleSession::without_hooks(RADII);
        assert_eq!(session.state(), SessionState::Idle);
        assert!(session.next_point().is_none());
        assert_eq!(session.background(), &Background::None);
    }

    #[test]
    fn test_load_level_requests_background() {
        let mut session = PuzzleSession::without_hooks(RADII);
        session.load_level(line_level());

        assert_eq!(session.state(), SessionState::Loaded);
        assert_eq!(session.background(), &Background::Requested("line.png".into()));
        assert_eq!(session.next_point().map(|p| p.id), Some(1));
    }

    #[test]
    fn test_drag_scenario() {
        let (mut session, calls) = spied_session();
        session.load_level(line_level());
        start_drag(&mut session);

        assert!(session.handle_pointer_move(Vec2::new(105.0, 100.0)));
        assert_eq!(session.satisfied_count(), 1);
        assert_eq!(session.state(), SessionState::InProgress);

        assert!(!session.handle_pointer_move(Vec2::new(250.0, 250.0)));
        assert_eq!(session.satisfied_count(), 1);

        assert!(session.handle_pointer_move(Vec2::new(205.0, 100.0)));
        assert_eq!(session.satisfied_count(), 2);
        assert!(calls.lock().unwrap().completed.is_empty());

        assert!(session.handle_pointer_move(Vec2::new(295.0, 100.0)));
        assert_eq!(session.satisfied_count(), 3);
        assert_eq!(session.state(), SessionState::Completed);
        assert_eq!(calls.lock().unwrap().completed, vec!["Line".to_string()]);
    }

    #[test]
    fn test_skipping_ahead_never_advances() {
        let mut session = PuzzleSession::without_hooks(RADII);
        session.load_level(line_level());
        start_drag(&mut session);

        // Right on top of points 2 and 3 while point 1 is next
        session.handle_pointer_move(Vec2::new(200.0, 100.0));
        session.handle_pointer_move(Vec2::new(300.0, 100.0));
        assert_eq!(session.satisfied_count(), 0);

        session.handle_pointer_move(Vec2::new(100.0, 100.0));
        session.handle_pointer_move(Vec2::new(300.0, 100.0));
        assert_eq!(session.satisfied_count(), 1);
    }

    #[test]
    fn test_one_advance_per_event() {
        // Two points closer together than the hit radius
        let level = Level::new(
            "Pair",
            "pair.png",
            vec![Point::new(1, 10.0, 10.0), Point::new(2, 12.0, 10.0)],
        );
        let mut session = PuzzleSession::without_hooks(RADII);
        session.load_level(level);
        start_drag(&mut session);

        session.handle_pointer_move(Vec2::new(11.0, 10.0));
        assert_eq!(session.satisfied_count(), 1);
        session.handle_pointer_move(Vec2::new(11.0, 10.0));
        assert_eq!(session.satisfied_count(), 2);
    }

    #[test]
    fn test_hit_radius_is_strict() {
        let mut session = PuzzleSession::without_hooks(RADII);
        session.load_level(line_level());
        start_drag(&mut session);

        session.handle_pointer_move(Vec2::new(120.0, 100.0));
        assert_eq!(session.satisfied_count(), 0);
        session.handle_pointer_move(Vec2::new(119.9, 100.0));
        assert_eq!(session.satisfied_count(), 1);
    }

    #[test]
    fn test_drag_uses_larger_radius_than_click() {
        let radii = HitRadii {
            click: 20.0,
            drag: 30.0,
        };
        let mut session = PuzzleSession::without_hooks(radii);
        session.load_level(line_level());

        assert!(!session.handle_click(Vec2::new(125.0, 100.0)));
        start_drag(&mut session);
        assert!(session.handle_pointer_move(Vec2::new(125.0, 100.0)));
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut session = PuzzleSession::without_hooks(RADII);
        session.load_level(line_level());

        session.handle_pointer_move(Vec2::new(100.0, 100.0));
        assert_eq!(session.satisfied_count(), 0);
        assert!(session.freehand_path().is_empty());
    }

    #[test]
    fn test_pointer_up_keeps_trail() {
        let mut session = PuzzleSession::without_hooks(RADII);
        session.load_level(line_level());
        session.handle_pointer_down(Vec2::new(1.0, 2.0));
        session.handle_pointer_move(Vec2::new(3.0, 4.0));
        session.handle_pointer_up();

        assert!(!session.is_dragging());
        assert_eq!(session.freehand_path(), &[Vec2::new(1.0, 2.0), Vec2::new(3.0, 4.0)]);

        // Next gesture starts a fresh trail
        session.handle_pointer_down(Vec2::new(5.0, 6.0));
        assert_eq!(session.freehand_path(), &[Vec2::new(5.0, 6.0)]);
    }

    #[test]
    fn test_completed_ignores_pointer_down() {
        let mut session = PuzzleSession::without_hooks(RADII);
        session.load_level(line_level());
        for point in line_level().points {
            session.handle_click(point.position());
        }
        assert!(session.is_completed());

        session.handle_pointer_down(Vec2::new(1.0, 1.0));
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_in_order_prefixes() {
        let mut rng = StdRng::seed_from_u64(42);
        let level = Level::new(
            "Random",
            "random.png",
            (1..=12)
                .map(|id| Point::new(id, id as f32 * 80.0, rng.random_range(0.0..500.0)))
                .collect(),
        );

        for k in 0..=level.points.len() {
            let mut session = PuzzleSession::without_hooks(RADII);
            session.load_level(level.clone());
            start_drag(&mut session);

            for point in &level.points[..k] {
                let jitter = Vec2::new(rng.random_range(-10.0..10.0), rng.random_range(-10.0..10.0));
                session.handle_pointer_move(point.position() + jitter);
            }

            assert_eq!(session.satisfied_count(), k);
            assert_eq!(session.is_completed(), k == level.points.len());
        }
    }

    #[test]
    fn test_random_far_pointer_noise_never_advances() {
        let mut rng = StdRng::seed_from_u64(9);
        let mut session = PuzzleSession::without_hooks(RADII);
        session.load_level(line_level());
        start_drag(&mut session);
        session.handle_pointer_move(Vec2::new(100.0, 100.0));

        for _ in 0..500 {
            let pos = Vec2::new(rng.random_range(0.0..400.0), rng.random_range(0.0..400.0));
            if pos.distance(Vec2::new(200.0, 100.0)) < RADII.drag {
                continue;
            }
            session.handle_pointer_move(pos);
            assert_eq!(session.satisfied_count(), 1);
        }
    }

    #[test]
    fn test_reset_clears_everything() {
        let mut session = PuzzleSession::without_hooks(RADII);
        session.load_level(line_level());
        start_drag(&mut session);
        session.handle_pointer_move(Vec2::new(100.0, 100.0));
        session.handle_pointer_move(Vec2::new(200.0, 100.0));

        session.reset();

        assert_eq!(session.satisfied_count(), 0);
        assert!(session.freehand_path().is_empty());
        assert!(!session.is_dragging());
        assert_eq!(session.state(), SessionState::Loaded);
        assert_eq!(session.level().map(|l| l.name.as_str()), Some("Line"));
    }

    #[test]
    fn test_creator_scenario() {
        let (mut session, calls) = spied_session();
        session.load_level(line_level());
        session.set_creator_mode(true);

        session.handle_click(Vec2::new(10.0, 10.0));
        session.handle_click(Vec2::new(50.0, 50.0));
        session.handle_click(Vec2::new(90.0, 10.0));

        let expected = vec![
            Point::new(1, 10.0, 10.0),
            Point::new(2, 50.0, 50.0),
            Point::new(3, 90.0, 10.0),
        ];
        assert_eq!(session.recording(), expected.as_slice());

        let calls = calls.lock().unwrap();
        assert_eq!(calls.recordings.len(), 3);
        assert_eq!(calls.recordings[0], expected[..1].to_vec());
        assert_eq!(calls.recordings[1], expected[..2].to_vec());
        assert_eq!(calls.recordings[2], expected);
    }

    #[test]
    fn test_creator_rounds_coordinates() {
        let mut session = PuzzleSession::without_hooks(RADII);
        session.set_creator_mode(true);
        session.handle_click(Vec2::new(10.4, 20.6));

        assert_eq!(session.recording(), &[Point::new(1, 10.0, 21.0)]);
    }

    #[test]
    fn test_creator_ids_have_no_gaps() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut session = PuzzleSession::without_hooks(RADII);
        session.load_level(line_level());
        session.set_creator_mode(true);

        for _ in 0..40 {
            session.handle_click(Vec2::new(rng.random_range(0.0..1000.0), rng.random_range(0.0..1000.0)));
        }

        let ids: Vec<u32> = session.recording().iter().map(|p| p.id).collect();
        assert_eq!(ids, (1..=40).collect::<Vec<_>>());
    }

    #[test]
    fn test_creator_mode_suppresses_progress() {
        let mut session = PuzzleSession::without_hooks(RADII);
        session.load_level(line_level());
        session.set_creator_mode(true);

        session.handle_pointer_down(Vec2::new(100.0, 100.0));
        session.handle_pointer_move(Vec2::new(100.0, 100.0));
        session.handle_click(Vec2::new(100.0, 100.0));

        assert!(!session.is_dragging());
        assert!(session.freehand_path().is_empty());
        assert_eq!(session.satisfied_count(), 0);
        assert_eq!(session.recording().len(), 1);
    }

    #[test]
    fn test_mode_toggle_resets() {
        let (mut session, calls) = spied_session();
        session.load_level(line_level());
        session.handle_click(Vec2::new(100.0, 100.0));
        assert_eq!(session.satisfied_count(), 1);

        session.set_creator_mode(true);
        assert_eq!(session.satisfied_count(), 0);

        session.handle_click(Vec2::new(1.0, 1.0));
        session.set_creator_mode(false);

        assert!(session.recording().is_empty());
        // One click, then the clear on toggle
        let calls = calls.lock().unwrap();
        assert_eq!(calls.recordings.len(), 2);
        assert!(calls.recordings[1].is_empty());
    }

    #[test]
    fn test_reset_in_creator_mode_clears_recording() {
        let mut session = PuzzleSession::without_hooks(RADII);
        session.load_level(line_level());
        session.set_creator_mode(true);
        session.handle_click(Vec2::new(1.0, 1.0));

        session.reset();

        assert!(session.recording().is_empty());
        assert!(session.is_creator_mode());
    }

    #[test]
    fn test_empty_level_is_completed_on_load() {
        let (mut session, calls) = spied_session();
        session.load_level(Level::new("Empty", "empty.png", Vec::new()));

        assert_eq!(session.state(), SessionState::Completed);
        assert!(session.next_point().is_none());
        assert_eq!(calls.lock().unwrap().completed, vec!["Empty".to_string()]);

        // Input is harmless
        assert!(!session.handle_click(Vec2::ZERO));
        session.handle_pointer_down(Vec2::ZERO);
        assert!(!session.is_dragging());
    }

    #[test]
    fn test_loading_new_level_restarts() {
        let mut session = PuzzleSession::without_hooks(RADII);
        session.load_level(line_level());
        session.handle_click(Vec2::new(100.0, 100.0));

        let other = Level::new("Other", "other.png", vec![Point::new(1, 5.0, 5.0)]);
        session.load_level(other);

        assert_eq!(session.satisfied_count(), 0);
        assert_eq!(session.next_point(), Some(&Point::new(1, 5.0, 5.0)));
    }

    #[test]
    fn test_loading_level_in_creator_mode_clears_recording() {
        let (mut session, calls) = spied_session();
        session.load_level(line_level());
        session.set_creator_mode(true);
        session.handle_click(Vec2::new(10.0, 10.0));
        session.handle_click(Vec2::new(50.0, 50.0));

        session.load_level(Level::new("Other", "other.png", vec![Point::new(1, 5.0, 5.0)]));

        assert!(session.recording().is_empty());
        assert!(session.is_creator_mode());
        assert_eq!(session.level().map(|l| l.name.as_str()), Some("Other"));

        let calls = calls.lock().unwrap();
        assert_eq!(calls.recordings.len(), 3);
        assert!(calls.recordings[2].is_empty());

        // Numbering starts over on the new level
        drop(calls);
        session.handle_click(Vec2::new(7.0, 8.0));
        assert_eq!(session.recording(), &[Point::new(1, 7.0, 8.0)]);
    }

    #[test]
    fn test_background_signals() {
        let mut session = PuzzleSession::without_hooks(RADII);
        session.load_level(line_level());

        // A late signal for some other image is ignored
        session.background_loaded("stale.png", Vec2::new(10.0, 10.0));
        assert_eq!(session.background(), &Background::Requested("line.png".into()));

        session.background_loaded("line.png", Vec2::new(1024.0, 512.0));
        assert_eq!(session.layout().native_size(), Some(Vec2::new(1024.0, 512.0)));
        assert!(matches!(session.background(), Background::Ready { .. }));
    }

    #[test]
    fn test_failed_background_keeps_input_working() {
        let mut session = PuzzleSession::without_hooks(RADII);
        session.load_level(line_level());
        session.background_failed("line.png");

        assert_eq!(session.background(), &Background::Failed("line.png".into()));
        assert!(session.handle_click(Vec2::new(100.0, 100.0)));
        assert_eq!(session.satisfied_count(), 1);
    }

    #[test]
    fn test_viewport_clicks_are_normalized() {
        let mut session = PuzzleSession::without_hooks(RADII);
        session.load_level(line_level());
        session.resize_surface(Rect::new(0.0, 0.0, 200.0, 100.0));
        session.background_loaded("line.png", Vec2::new(400.0, 200.0));
        session.set_creator_mode(true);

        let native = session.to_native(Vec2::new(50.0, 50.0));
        session.handle_click(native);

        assert_eq!(session.recording(), &[Point::new(1, 100.0, 100.0)]);
    }
}
