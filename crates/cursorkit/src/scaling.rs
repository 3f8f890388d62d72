use crate::coalesce::Coalescer;
use crate::geometry::{self, Point};
use crate::host::{Host, Notify, PointerEvent, Subscription};
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const MIN_SIZE: f64 = 50.0;
pub const MAX_SIZE: f64 = 500.0;
pub const BASE_SIZE: f64 = 100.0;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ScalingConfigError {
    #[error("{name} must be a positive finite number, got {value}")]
    NotPositive { name: &'static str, value: f64 },
    #[error("sizes must satisfy min <= base <= max, got {min} / {base} / {max}")]
    Unordered { min: f64, base: f64, max: f64 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
struct RawScalingConfig {
    min_size: f64,
    base_size: f64,
    max_size: f64,
}

impl Default for RawScalingConfig {
    fn default() -> Self {
        ScalingConfig::default().into()
    }
}

/// Icon size bounds in pixels. Always satisfies `min <= base <= max`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScalingConfig", into = "RawScalingConfig")]
pub struct ScalingConfig {
    min_size: f64,
    base_size: f64,
    max_size: f64,
}

impl ScalingConfig {
    pub fn new(min_size: f64, base_size: f64, max_size: f64) -> Result<Self, ScalingConfigError> {
        for (name, value) in [
            ("min_size", min_size),
            ("base_size", base_size),
            ("max_size", max_size),
        ] {
            if !(value.is_finite() && value > 0.0) {
                return Err(ScalingConfigError::NotPositive { name, value });
            }
        }

        if !(min_size <= base_size && base_size <= max_size) {
            return Err(ScalingConfigError::Unordered {
                min: min_size,
                base: base_size,
                max: max_size,
            });
        }

        Ok(Self {
            min_size,
            base_size,
            max_size,
        })
    }

    pub fn min_size(&self) -> f64 {
        self.min_size
    }

    pub fn base_size(&self) -> f64 {
        self.base_size
    }

    pub fn max_size(&self) -> f64 {
        self.max_size
    }
}

impl Default for ScalingConfig {
    fn default() -> Self {
        Self {
            min_size: MIN_SIZE,
            base_size: BASE_SIZE,
            max_size: MAX_SIZE,
        }
    }
}

impl TryFrom<RawScalingConfig> for ScalingConfig {
    type Error = ScalingConfigError;

    fn try_from(raw: RawScalingConfig) -> Result<Self, Self::Error> {
        Self::new(raw.min_size, raw.base_size, raw.max_size)
    }
}

impl From<ScalingConfig> for RawScalingConfig {
    fn from(config: ScalingConfig) -> Self {
        Self {
            min_size: config.min_size,
            base_size: config.base_size,
            max_size: config.max_size,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScalingState {
    pub mouse_position: Point,
    pub icon_size: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScalingInput {
    Pointer(PointerEvent),
    /// The paint-synchronized request scheduled by a pointer move came due.
    Frame,
}

pub struct ScalingController {
    config: ScalingConfig,
    state: ScalingState,
    listener: Option<Subscription>,
    notify: Option<Notify<ScalingInput>>,
    pending: Coalescer<Point>,
}

impl std::fmt::Debug for ScalingController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ScalingController")
            .field("config", &self.config)
            .field("state", &self.state)
            .field("enabled", &self.is_enabled())
            .field("pending", &self.pending.is_pending())
            .finish()
    }
}

impl Default for ScalingController {
    fn default() -> Self {
        Self::new(ScalingConfig::default())
    }
}

impl ScalingController {
    pub fn new(config: ScalingConfig) -> Self {
        Self {
            config,
            state: ScalingState {
                mouse_position: Point::default(),
                icon_size: config.base_size(),
            },
            listener: None,
            notify: None,
            pending: Coalescer::default(),
        }
    }

    pub fn config(&self) -> &ScalingConfig {
        &self.config
    }

    pub fn state(&self) -> ScalingState {
        self.state
    }

    pub fn icon_size(&self) -> f64 {
        self.state.icon_size
    }

    pub fn is_enabled(&self) -> bool {
        self.notify.is_some()
    }

    pub fn enable(&mut self, host: &impl Host, notify: Notify<ScalingInput>) {
        if self.is_enabled() {
            return;
        }
        let forward = notify.clone();
        self.listener = Some(host.pointer_events(Box::new(move |event| {
            forward(ScalingInput::Pointer(event))
        })));
        self.notify = Some(notify);
        log::debug!("scaling enabled");
    }

    /// Unsubscribes, drops any pending frame and falls back to the base size.
    pub fn disable(&mut self) {
        if !self.is_enabled() {
            return;
        }
        self.listener = None;
        self.notify = None;
        self.pending.cancel();
        self.state.icon_size = self.config.base_size();
        log::debug!("scaling disabled");
    }

    pub fn set_config(&mut self, config: ScalingConfig) {
        self.config = config;
        self.state.icon_size = if self.is_enabled() {
            self.state
                .icon_size
                .clamp(config.min_size(), config.max_size())
        } else {
            config.base_size()
        };
    }

    pub fn handle(&mut self, host: &impl Host, input: ScalingInput) {
        let Some(notify) = self.notify.clone() else {
            return;
        };

        match input {
            ScalingInput::Pointer(PointerEvent::Moved(position)) => {
                self.state.mouse_position = position;
                self.pending.submit(position, || {
                    host.next_frame(Box::new(move || notify(ScalingInput::Frame)))
                });
            }
            ScalingInput::Pointer(PointerEvent::Left) => {}
            ScalingInput::Frame => {
                if let Some(position) = self.pending.take() {
                    let viewport = host.viewport();
                    self.state.icon_size = geometry::icon_size(position, viewport, &self.config);
                    log::trace!("icon size {:.1} at {:?}", self.state.icon_size, position);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::Viewport;
    use crate::testing::{Inbox, ManualHost};

    struct Harness {
        host: ManualHost,
        inbox: Inbox<ScalingInput>,
        scaling: ScalingController,
    }

    impl Harness {
        fn new() -> Self {
            let host = ManualHost::new(Viewport::new(1920.0, 1080.0));
            let inbox = Inbox::new();
            let mut scaling = ScalingController::default();
            scaling.enable(&host, inbox.notify());
            Self {
                host,
                inbox,
                scaling,
            }
        }

        fn pump(&mut self) -> usize {
            let inputs = self.inbox.drain();
            let count = inputs.len();
            for input in inputs {
                self.scaling.handle(&self.host, input);
            }
            count
        }

        fn move_to(&mut self, x: f64, y: f64) {
            self.host.pointer(PointerEvent::Moved(Point::new(x, y)));
            self.pump();
        }

        fn paint(&mut self) -> usize {
            let ran = self.host.run_frame();
            self.pump();
            ran
        }
    }

    #[test]
    fn test_starts_at_base_size() {
        let harness = Harness::new();
        assert_eq!(harness.scaling.icon_size(), BASE_SIZE);
        assert_eq!(harness.scaling.state().mouse_position, Point::default());
    }

    #[test]
    fn test_size_follows_cursor_after_paint() {
        let mut h = Harness::new();

        h.move_to(960.0, 540.0);
        assert_eq!(h.scaling.icon_size(), BASE_SIZE);
        assert_eq!(h.paint(), 1);
        assert_eq!(h.scaling.icon_size(), MAX_SIZE);

        h.move_to(1920.0, 1080.0);
        h.paint();
        assert_eq!(h.scaling.icon_size(), MIN_SIZE);
    }

    #[test]
    fn test_burst_coalesces_to_one_computation() {
        let mut h = Harness::new();

        for i in 0..50 {
            h.move_to(i as f64 * 10.0, i as f64 * 5.0);
            assert_eq!(h.host.pending_frames(), 1);
        }
        h.move_to(960.0, 540.0);

        assert_eq!(h.scaling.state().mouse_position, Point::new(960.0, 540.0));
        assert_eq!(h.paint(), 1);
        assert_eq!(h.scaling.icon_size(), MAX_SIZE);
        assert_eq!(h.host.pending_frames(), 0);
        assert_eq!(h.paint(), 0);
    }

    #[test]
    fn test_viewport_is_read_at_paint_time() {
        let mut h = Harness::new();

        h.move_to(400.0, 300.0);
        h.host.set_viewport(Viewport::new(800.0, 600.0));
        h.paint();
        assert_eq!(h.scaling.icon_size(), MAX_SIZE);
    }

    #[test]
    fn test_disable_cancels_pending_and_resets() {
        let mut h = Harness::new();
        h.move_to(960.0, 540.0);
        h.paint();
        h.move_to(1920.0, 1080.0);

        h.scaling.disable();
        assert_eq!(h.scaling.icon_size(), BASE_SIZE);
        assert_eq!(h.host.pending_frames(), 0);
        assert_eq!(h.host.live_listeners(), 0);

        h.host.pointer(PointerEvent::Moved(Point::new(0.0, 0.0)));
        assert_eq!(h.paint(), 0);
        assert_eq!(h.scaling.icon_size(), BASE_SIZE);
    }

    #[test]
    fn test_inputs_queued_before_disable_are_ignored() {
        let mut h = Harness::new();
        h.host.pointer(PointerEvent::Moved(Point::new(960.0, 540.0)));

        h.scaling.disable();
        h.pump();
        h.host.run_frame();
        h.pump();
        assert_eq!(h.scaling.icon_size(), BASE_SIZE);
    }

    #[test]
    fn test_set_config_reclamps() {
        let mut h = Harness::new();
        h.move_to(960.0, 540.0);
        h.paint();

        h.scaling
            .set_config(ScalingConfig::new(20.0, 80.0, 200.0).unwrap());
        assert_eq!(h.scaling.icon_size(), 200.0);

        h.scaling.disable();
        assert_eq!(h.scaling.icon_size(), 80.0);
    }

    #[test]
    fn test_config_validation() {
        assert!(ScalingConfig::new(50.0, 100.0, 500.0).is_ok());
        assert!(ScalingConfig::new(100.0, 100.0, 100.0).is_ok());
        assert_eq!(
            ScalingConfig::new(0.0, 100.0, 500.0),
            Err(ScalingConfigError::NotPositive {
                name: "min_size",
                value: 0.0
            })
        );
        assert!(matches!(
            ScalingConfig::new(50.0, 600.0, 500.0),
            Err(ScalingConfigError::Unordered { .. })
        ));
        assert!(ScalingConfig::new(50.0, 100.0, f64::INFINITY).is_err());
    }

    #[test]
    fn test_config_deserialization_validates() {
        let config: ScalingConfig =
            serde_json::from_str(r#"{"min_size": 10, "base_size": 20, "max_size": 30}"#).unwrap();
        assert_eq!(config.max_size(), 30.0);

        let partial: ScalingConfig = serde_json::from_str(r#"{"max_size": 300}"#).unwrap();
        assert_eq!(partial.max_size(), 300.0);
        assert_eq!(partial.min_size(), MIN_SIZE);

        let broken = serde_json::from_str::<ScalingConfig>(
            r#"{"min_size": 40, "base_size": 20, "max_size": 30}"#,
        );
        assert!(broken.is_err());
    }
}
