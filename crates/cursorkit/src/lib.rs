//! Interactive state behind a spinning, cursor-scaled logo.
//!
//! Three independent controllers ([`rotation`], [`scaling`], [`idle`]) own
//! their state and the host resources they need while enabled. They never
//! talk to a UI toolkit directly; a [`host::Host`] implementation supplies
//! timers, frames and input subscriptions, and the owner feeds the
//! controllers' own notifications back through their `handle`/`tick` methods.

pub mod coalesce;
pub mod features;
pub mod geometry;
pub mod host;
pub mod idle;
pub mod rotation;
pub mod scaling;

#[cfg(test)]
mod testing;

pub use features::{Feature, FeatureToggle};
pub use geometry::{Point, Viewport};
pub use host::{Host, Notify, PointerEvent, Scope, Subscription, Visibility};
pub use idle::{IdleController, IdleInput, IdleState, IdleTime};
pub use rotation::{Direction, RotationController, RotationState};
pub use scaling::{ScalingConfig, ScalingConfigError, ScalingController, ScalingInput, ScalingState};
