use crate::scaling::ScalingConfig;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Size of the surface the pointer is tracked over, in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Viewport {
    pub width: f64,
    pub height: f64,
}

impl Viewport {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }

    pub fn center(&self) -> Point {
        Point::new(self.width / 2.0, self.height / 2.0)
    }

    pub fn corner(&self) -> Point {
        Point::new(self.width, self.height)
    }

    /// Bounds are inclusive on both ends.
    pub fn contains(&self, p: Point) -> bool {
        (0.0..=self.width).contains(&p.x) && (0.0..=self.height).contains(&p.y)
    }
}

pub fn distance(a: Point, b: Point) -> f64 {
    let (dx, dy) = (b.x - a.x, b.y - a.y);
    (dx * dx + dy * dy).sqrt()
}

/// Distance from the viewport center to its bottom-right corner.
pub fn max_corner_distance(width: f64, height: f64) -> f64 {
    let viewport = Viewport::new(width, height);
    distance(viewport.center(), viewport.corner())
}

/// Icon size for a cursor position: `max_size` at the center, shrinking
/// linearly to `min_size` at the corners.
///
/// A zero-sized viewport yields `max_size`.
pub fn icon_size(cursor: Point, viewport: Viewport, config: &ScalingConfig) -> f64 {
    let max_distance = max_corner_distance(viewport.width, viewport.height);
    let normalized = if max_distance > 0.0 {
        distance(cursor, viewport.center()) / max_distance
    } else {
        0.0
    };

    let range = config.max_size() - config.min_size();
    let size = config.max_size() - normalized * range;

    size.clamp(config.min_size(), config.max_size())
}

/// Per-axis comparison: a large move on one axis counts even if the other
/// axis did not change.
pub fn has_moved_beyond(current: Point, last: Point, threshold: f64) -> bool {
    (current.x - last.x).abs() > threshold || (current.y - last.y).abs() > threshold
}
