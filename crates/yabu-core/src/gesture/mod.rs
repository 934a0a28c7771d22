//! Gesture interpretation: swipe, double tap, and shake to editing commands.
//!
//! Three detectors share one controller and may fire on the same event:
//!
//! ```text
//!   touch_start ──→ [swipe: Idle → TouchActive]
//!   touch_end ────→ [swipe: TouchActive → Idle]  ──→ NextFilter / PrevFilter
//!              └──→ [double tap: gap in (0, window)] ──→ Reset
//!   motion ───────→ [shake: |a| > threshold, cooldown elapsed] ──→ Reset
//! ```
//!
//! The swipe and double-tap detectors are deliberately independent: a quick
//! second swipe can emit both a filter change and a reset.

pub mod clock;

use std::time::Duration;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::error::CoreError;

pub use clock::{Clock, ManualClock, MonotonicClock};

/// A discrete editing command produced by a gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GestureCommand {
    NextFilter,
    PrevFilter,
    Reset,
}

/// Result of asking the platform for motion-sensor access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PermissionOutcome {
    Granted,
    Denied,
    /// The platform delivers motion events without a prompt.
    NotRequired,
}

/// Whether motion samples are being interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ShakeMonitor {
    #[default]
    Inactive,
    Active,
    Denied,
}

/// Gesture thresholds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Horizontal travel in pixels beyond which a touch counts as a swipe.
    pub swipe_threshold: f32,
    /// Two touch-ends closer than this are a double tap.
    #[serde(with = "millis")]
    pub double_tap_window: Duration,
    /// Acceleration magnitude (including gravity) that counts as a shake.
    pub shake_threshold: f32,
    /// Minimum time between two shake resets.
    #[serde(with = "millis")]
    pub shake_cooldown: Duration,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            swipe_threshold: 50.0,
            double_tap_window: Duration::from_millis(300),
            shake_threshold: 15.0,
            shake_cooldown: Duration::from_millis(1000),
        }
    }
}

/// Durations as integer milliseconds in config files.
mod millis {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(value.as_millis() as u64)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_millis)
    }
}

/// Event-to-command state machine.
///
/// Owns all gesture state; nothing else mutates it. Feed it raw events,
/// act on the returned commands.
#[derive(Debug)]
pub struct GestureController<C: Clock = MonotonicClock> {
    config: GestureConfig,
    clock: C,
    touch_start_x: Option<f32>,
    last_tap: Option<Duration>,
    last_shake: Option<Duration>,
    shake: ShakeMonitor,
}

impl GestureController<MonotonicClock> {
    pub fn new(config: GestureConfig) -> Self {
        Self::with_clock(config, MonotonicClock::new())
    }
}

impl Default for GestureController<MonotonicClock> {
    fn default() -> Self {
        Self::new(GestureConfig::default())
    }
}

impl<C: Clock> GestureController<C> {
    pub fn with_clock(config: GestureConfig, clock: C) -> Self {
        Self {
            config,
            clock,
            touch_start_x: None,
            last_tap: None,
            last_shake: None,
            shake: ShakeMonitor::Inactive,
        }
    }

    pub fn config(&self) -> &GestureConfig {
        &self.config
    }

    pub fn clock(&self) -> &C {
        &self.clock
    }

    pub fn shake_monitor(&self) -> ShakeMonitor {
        self.shake
    }

    /// Whether a touch is in progress.
    pub fn is_touch_active(&self) -> bool {
        self.touch_start_x.is_some()
    }

    /// A touch began at `x` with `touches` simultaneous contacts.
    ///
    /// Only single-finger touches start a swipe.
    pub fn touch_start(&mut self, x: f32, touches: usize) {
        if touches == 1 {
            self.touch_start_x = Some(x);
        }
    }

    /// A touch ended at `x`. Returns swipe and double-tap commands, in that order.
    pub fn touch_end(&mut self, x: f32) -> Vec<GestureCommand> {
        let mut commands = Vec::with_capacity(2);

        if let Some(start) = self.touch_start_x.take() {
            let delta = x - start;
            if delta > self.config.swipe_threshold {
                commands.push(GestureCommand::PrevFilter);
            } else if delta < -self.config.swipe_threshold {
                commands.push(GestureCommand::NextFilter);
            }
        }

        let now = self.clock.now();
        if let Some(last) = self.last_tap {
            let gap = now.saturating_sub(last);
            if !gap.is_zero() && gap < self.config.double_tap_window {
                commands.push(GestureCommand::Reset);
            }
        }
        self.last_tap = Some(now);

        commands
    }

    /// Process one accelerometer sample (gravity included).
    pub fn motion_sample(&mut self, ax: f32, ay: f32, az: f32) -> Option<GestureCommand> {
        if self.shake != ShakeMonitor::Active {
            return None;
        }

        let magnitude = Vec3::new(ax, ay, az).length();
        if magnitude.is_nan() || magnitude <= self.config.shake_threshold {
            return None;
        }

        let now = self.clock.now();
        let cooled_down = self
            .last_shake
            .is_none_or(|last| now.saturating_sub(last) > self.config.shake_cooldown);
        if !cooled_down {
            return None;
        }

        self.last_shake = Some(now);
        Some(GestureCommand::Reset)
    }

    /// Turn on shake detection once the platform has answered the permission prompt.
    ///
    /// A denial leaves monitoring off and is reported as
    /// [`CoreError::PermissionDenied`]; calling again with a grant activates it.
    pub fn enable_shake(&mut self, outcome: PermissionOutcome) -> Result<(), CoreError> {
        match outcome {
            PermissionOutcome::Granted | PermissionOutcome::NotRequired => {
                self.shake = ShakeMonitor::Active;
                Ok(())
            }
            PermissionOutcome::Denied => {
                if self.shake != ShakeMonitor::Active {
                    self.shake = ShakeMonitor::Denied;
                }
                Err(CoreError::PermissionDenied)
            }
        }
    }
}
