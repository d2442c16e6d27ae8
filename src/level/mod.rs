// level/mod.rs

mod builtin;
mod export;

use bevy::math::Vec2;
use bevy::prelude::Resource;
use serde::{Deserialize, Serialize};

pub use export::export_points;

/// A target point in native image space
///
/// `id` is the 1-based sequence number. Traversal order is the position in
/// the level's point list; the id is only carried for display and export.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub id: u32,
    pub x: f32,
    pub y: f32,
}

impl Point {
    pub const fn new(id: u32, x: f32, y: f32) -> Self {
        Point { id, x, y }
    }

    pub fn position(&self) -> Vec2 {
        Vec2::new(self.x, self.y)
    }
}

/// A named puzzle: background image plus the ordered points to trace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Level {
    pub name: String,
    pub image_ref: String,
    pub points: Vec<Point>,
}

impl Level {
    pub fn new(name: impl Into<String>, image_ref: impl Into<String>, points: Vec<Point>) -> Self {
        Level {
            name: name.into(),
            image_ref: image_ref.into(),
            points,
        }
    }

    pub fn point_count(&self) -> usize {
        self.points.len()
    }

    /// Ids run exactly `1..=n` in list order
    pub fn has_sequential_ids(&self) -> bool {
        self.points
            .iter()
            .enumerate()
            .all(|(index, point)| point.id as usize == index + 1)
    }
}

/// Read-only, ordered collection of levels
#[derive(Resource, Debug, Clone, Default)]
pub struct LevelRepository {
    levels: Vec<Level>,
}

impl LevelRepository {
    pub fn new(levels: Vec<Level>) -> Self {
        LevelRepository { levels }
    }

    /// The levels shipped with the game
    pub fn builtin() -> Self {
        Self::new(builtin::levels())
    }

    pub fn len(&self) -> usize {
        self.levels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&Level> {
        self.levels.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Level> {
        self.levels.iter()
    }
}
