use crate::host::{Host, Subscription};
use derive_more::Display;
use std::time::Duration;

pub const ANGLE_INCREMENT: f64 = 2.0; // degrees per tick
pub const TICK_INTERVAL: Duration = Duration::from_millis(16);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Display)]
pub enum Direction {
    #[default]
    #[display("clockwise")]
    Clockwise,
    #[display("counter-clockwise")]
    CounterClockwise,
}

impl Direction {
    pub fn sign(self) -> f64 {
        match self {
            Self::Clockwise => 1.0,
            Self::CounterClockwise => -1.0,
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Self::Clockwise => Self::CounterClockwise,
            Self::CounterClockwise => Self::Clockwise,
        }
    }
}

/// `angle` is in degrees and never wrapped; renderers take it modulo 360.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct RotationState {
    pub angle: f64,
    pub direction: Direction,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RotationConfig {
    pub increment: f64,
    pub interval: Duration,
}

impl Default for RotationConfig {
    fn default() -> Self {
        Self {
            increment: ANGLE_INCREMENT,
            interval: TICK_INTERVAL,
        }
    }
}

#[derive(Debug, Default)]
pub struct RotationController {
    config: RotationConfig,
    state: RotationState,
    ticker: Option<Subscription>,
}

impl RotationController {
    pub fn new(config: RotationConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn state(&self) -> RotationState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.ticker.is_some()
    }

    pub fn enable(&mut self, host: &impl Host, on_tick: impl FnMut() + 'static) {
        if self.is_enabled() {
            return;
        }
        log::debug!("rotation enabled at {:.1}°", self.state.angle);
        self.ticker = Some(host.every(self.config.interval, Box::new(on_tick)));
    }

    /// Stops ticking. Angle and direction are kept.
    pub fn disable(&mut self) {
        if self.ticker.take().is_some() {
            log::debug!("rotation disabled at {:.1}°", self.state.angle);
        }
    }

    pub fn tick(&mut self) {
        if !self.is_enabled() {
            return;
        }
        self.state.angle += self.state.direction.sign() * self.config.increment;
    }

    /// Returns whether the direction changed.
    pub fn toggle_direction(&mut self) -> bool {
        if !self.is_enabled() {
            return false;
        }
        self.state.direction = self.state.direction.flipped();
        log::debug!("rotation direction now {}", self.state.direction);
        true
    }
}
