// level/builtin.rs

use super::{Level, Point};

struct LevelDef {
    name: &'static str,
    image_ref: &'static str,
    /// (id, x, y) in the image's native pixel space
    points: &'static [(u32, f32, f32)],
}

/// 1024x1024 image
const SEA_TURTLE: LevelDef = LevelDef {
    name: "Sea Turtle",
    image_ref: "sea_turtle_puzzle.png",
    points: &[
        (1, 655.0, 245.0),
        (2, 620.0, 245.0),
        (3, 600.0, 260.0),
        (4, 920.0, 220.0),
        (5, 960.0, 110.0),
        (6, 920.0, 90.0),
        (7, 860.0, 70.0),
        (8, 540.0, 200.0),
        (9, 510.0, 160.0),
        (10, 810.0, 85.0),
    ],
};

/// 1536x1024 image
const PYRAMID: LevelDef = LevelDef {
    name: "Pyramid",
    image_ref: "piramid.png",
    points: &[
        (1, 768.0, 125.0),
        (2, 720.0, 165.0),
        (3, 815.0, 165.0),
        (4, 900.0, 220.0),
        (5, 950.0, 260.0),
        (6, 1000.0, 310.0),
        (7, 1050.0, 360.0),
        (8, 1100.0, 410.0),
    ],
};

const BUILTIN_LEVELS: &[LevelDef] = &[SEA_TURTLE, PYRAMID];

pub(super) fn levels() -> Vec<Level> {
    BUILTIN_LEVELS
        .iter()
        .map(|def| {
            let points = def
                .points
                .iter()
                .map(|&(id, x, y)| Point::new(id, x, y))
                .collect();
            Level::new(def.name, def.image_ref, points)
        })
        .collect()
}
