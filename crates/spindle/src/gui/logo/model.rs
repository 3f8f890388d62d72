use cursorkit::geometry::distance;
use cursorkit::{IdleState, Point, RotationState, Viewport};

/// Everything the draw function needs for one paint.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogoFrame {
    pub size: f64,
    pub angle: f64,
}

impl LogoFrame {
    pub fn new(size: f64, angle: f64) -> Self {
        Self { size, angle }
    }

    pub fn radius(&self) -> f64 {
        self.size / 2.0
    }

    /// Whether `point` falls on the logo when it is centered in `viewport`.
    pub fn hit(&self, viewport: Viewport, point: Point) -> bool {
        distance(point, viewport.center()) <= self.radius()
    }
}

pub fn idle_text(state: &IdleState) -> String {
    format!("Idle time: {}", state.idle_time)
}

pub fn rotation_text(state: &RotationState) -> String {
    format!(
        "{:.0}° {}",
        state.angle.rem_euclid(360.0),
        state.direction
    )
}
