use crate::geometry::{self, Point};
use crate::host::{Host, Notify, PointerEvent, Scope, Visibility};
use derive_more::{Deref, Display, From, Into};
use std::time::{Duration, Instant};

pub const POLL_INTERVAL: Duration = Duration::from_millis(100);
pub const TIME_UNIT: Duration = Duration::from_millis(1000);
pub const MOVEMENT_THRESHOLD: f64 = 5.0; // px per axis

/// Whole seconds without qualifying pointer activity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Display, Deref, From, Into)]
#[display("{_0}s")]
pub struct IdleTime(u64);

impl IdleTime {
    pub const ZERO: Self = Self(0);

    pub fn as_secs(self) -> u64 {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IdleState {
    pub idle_time: IdleTime,
    pub is_mouse_on_page: bool,
}

impl Default for IdleState {
    fn default() -> Self {
        Self {
            idle_time: IdleTime::ZERO,
            is_mouse_on_page: true,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IdleConfig {
    pub poll_interval: Duration,
    pub time_unit: Duration,
    pub movement_threshold: f64,
}

impl Default for IdleConfig {
    fn default() -> Self {
        Self {
            poll_interval: POLL_INTERVAL,
            time_unit: TIME_UNIT,
            movement_threshold: MOVEMENT_THRESHOLD,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum IdleInput {
    Pointer(PointerEvent),
    Visibility(Visibility),
    Poll,
}

#[derive(Debug, Default)]
pub struct IdleController {
    config: IdleConfig,
    state: IdleState,
    last_activity: Option<Instant>,
    last_position: Point,
    scope: Scope,
}

impl IdleController {
    pub fn new(config: IdleConfig) -> Self {
        Self {
            config,
            ..Self::default()
        }
    }

    pub fn state(&self) -> IdleState {
        self.state
    }

    pub fn is_enabled(&self) -> bool {
        self.last_activity.is_some()
    }

    pub fn enable(&mut self, host: &impl Host, notify: Notify<IdleInput>) {
        if self.is_enabled() {
            return;
        }
        self.last_activity = Some(host.now());
        self.state = IdleState::default();

        let pointer = notify.clone();
        self.scope.hold(
            host.pointer_events(Box::new(move |event| pointer(IdleInput::Pointer(event)))),
        );
        let visibility = notify.clone();
        self.scope.hold(host.visibility_events(Box::new(move |v| {
            visibility(IdleInput::Visibility(v))
        })));
        self.scope.hold(host.every(
            self.config.poll_interval,
            Box::new(move || notify(IdleInput::Poll)),
        ));
        log::debug!("idle timer enabled");
    }

    pub fn disable(&mut self) {
        if !self.is_enabled() {
            return;
        }
        self.scope.release();
        self.last_activity = None;
        self.state.idle_time = IdleTime::ZERO;
        log::debug!("idle timer disabled");
    }

    pub fn handle(&mut self, host: &impl Host, input: IdleInput) {
        if !self.is_enabled() {
            return;
        }

        match input {
            IdleInput::Pointer(PointerEvent::Moved(position)) => {
                self.on_pointer_moved(host, position)
            }
            IdleInput::Pointer(PointerEvent::Left) => self.leave_page(),
            IdleInput::Visibility(Visibility::Hidden) => self.leave_page(),
            IdleInput::Visibility(Visibility::Visible) => {
                self.state.is_mouse_on_page = true;
                self.mark_active(host.now());
            }
            IdleInput::Poll => self.poll(host.now()),
        }
    }

    fn on_pointer_moved(&mut self, host: &impl Host, position: Point) {
        if !host.viewport().contains(position) {
            self.leave_page();
            return;
        }

        if !self.state.is_mouse_on_page {
            self.state.is_mouse_on_page = true;
            self.mark_active(host.now());
            self.last_position = position;
            return;
        }

        // jitter inside the threshold keeps the timer running
        if geometry::has_moved_beyond(position, self.last_position, self.config.movement_threshold) {
            self.mark_active(host.now());
            self.last_position = position;
        }
    }

    /// Leaving zeroes the counter right away rather than freezing it.
    fn leave_page(&mut self) {
        if self.state.is_mouse_on_page {
            log::trace!("pointer left the page");
        }
        self.state.is_mouse_on_page = false;
        self.state.idle_time = IdleTime::ZERO;
    }

    fn mark_active(&mut self, now: Instant) {
        self.last_activity = Some(now);
        self.state.idle_time = IdleTime::ZERO;
    }

    fn poll(&mut self, now: Instant) {
        if !self.state.is_mouse_on_page {
            return;
        }
        let Some(last) = self.last_activity else {
            return;
        };
        let elapsed = now.saturating_duration_since(last);
        let units = elapsed.as_millis() / self.config.time_unit.as_millis().max(1);
        self.state.idle_time = IdleTime(units as u64);
    }
}
