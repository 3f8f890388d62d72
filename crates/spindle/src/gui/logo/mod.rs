use std::f64::consts::PI;

pub mod model;
pub mod view;

pub use model::{LogoFrame, idle_text, rotation_text};
pub use view::draw;

pub const ORBIT_COUNT: usize = 3;
pub const ORBIT_STEP: f64 = PI / ORBIT_COUNT as f64;
pub const ORBIT_RX_FACTOR: f64 = 0.48; // relative to icon size
pub const ORBIT_RY_FACTOR: f64 = 0.185;
pub const NUCLEUS_FACTOR: f64 = 0.085;
pub const STROKE_FACTOR: f64 = 0.035;
