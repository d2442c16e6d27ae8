// level/export.rs

use super::Point;
use std::fmt;

#[derive(Debug)]
pub enum ExportError {
    Serialize(serde_json::Error),
}

impl fmt::Display for ExportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExportError::Serialize(e) => write!(f, "Could not serialize recorded points: {}", e),
        }
    }
}

impl std::error::Error for ExportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ExportError::Serialize(e) => Some(e),
        }
    }
}

/// Clipboard export: a flat JSON array of `{id, x, y}` records in order
///
/// Whole-number coordinates are written without a fractional part so the
/// output can be pasted straight into a level table.
pub fn export_points(points: &[Point]) -> Result<String, ExportError> {
    let records: Vec<ExportRecord> = points.iter().map(ExportRecord::from).collect();
    serde_json::to_string(&records).map_err(ExportError::Serialize)
}

#[derive(serde::Serialize)]
struct ExportRecord {
    id: u32,
    x: serde_json::Number,
    y: serde_json::Number,
}

impl From<&Point> for ExportRecord {
    fn from(point: &Point) -> Self {
        ExportRecord {
            id: point.id,
            x: coordinate(point.x),
            y: coordinate(point.y),
        }
    }
}

fn coordinate(value: f32) -> serde_json::Number {
    if value.fract() == 0.0 && value.abs() < i64::MAX as f32 {
        serde_json::Number::from(value as i64)
    } else {
        serde_json::Number::from_f64(value as f64).unwrap_or_else(|| serde_json::Number::from(0))
    }
}
