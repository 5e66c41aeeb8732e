//! Animation primitives - easing, progress and per-piece channel state
//!
//! All time is injected as monotonic milliseconds (`now_ms`), so every channel
//! is deterministic under test.

use crate::types::{RotateDirection, MOVE_MS, ROTATE_MS};

/// Smoothstep easing: `t^2 * (3 - 2t)`.
pub fn ease(t: f32) -> f32 {
    t * t * (3.0 - 2.0 * t)
}

/// Linear progress of a channel started at `start_ms` lasting `duration_ms`.
///
/// Not clamped above 1 (callers finalize at `>= 1`); clamped below at 0.
/// A zero duration is always complete.
pub fn progress(now_ms: u64, start_ms: u64, duration_ms: u32) -> f32 {
    if duration_ms == 0 {
        return 1.0;
    }
    let elapsed = now_ms.saturating_sub(start_ms);
    elapsed as f32 / duration_ms as f32
}

/// Durations and direction shared by every piece of an engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timing {
    pub rotate_ms: u32,
    pub move_ms: u32,
    pub direction: RotateDirection,
}

impl Default for Timing {
    fn default() -> Self {
        Self {
            rotate_ms: ROTATE_MS,
            move_ms: MOVE_MS,
            direction: RotateDirection::Clockwise,
        }
    }
}

/// Rotation channel: angle animates from `from_deg` to `from_deg + delta_deg`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Spin {
    pub start_ms: u64,
    pub from_deg: f32,
    pub delta_deg: f32,
}

impl Spin {
    pub fn end_deg(&self) -> f32 {
        self.from_deg + self.delta_deg
    }
}

/// Position channel. At most one tween kind is active per piece.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum Motion {
    #[default]
    Rest,
    /// Eased move from `from` by `delta`.
    Tween {
        from: (f32, f32),
        delta: (f32, f32),
        start_ms: u64,
    },
    /// Eased move from `from` toward the live pointer-derived position.
    Detach { from: (f32, f32), start_ms: u64 },
}

impl Motion {
    pub fn is_rest(&self) -> bool {
        matches!(self, Motion::Rest)
    }

    pub fn is_tween(&self) -> bool {
        matches!(self, Motion::Tween { .. })
    }

    pub fn is_detach(&self) -> bool {
        matches!(self, Motion::Detach { .. })
    }

    /// Final position of an in-flight tween.
    pub fn tween_target(&self) -> Option<(f32, f32)> {
        match *self {
            Motion::Tween { from, delta, .. } => Some((from.0 + delta.0, from.1 + delta.1)),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ease_endpoints_and_midpoint() {
        assert_eq!(ease(0.0), 0.0);
        assert_eq!(ease(1.0), 1.0);
        assert_eq!(ease(0.5), 0.5);
        assert!(ease(0.25) < 0.25);
        assert!(ease(0.75) > 0.75);
    }

    #[test]
    fn progress_handles_clock_edges() {
        assert_eq!(progress(100, 100, 200), 0.0);
        assert_eq!(progress(200, 100, 200), 0.5);
        assert_eq!(progress(50, 100, 200), 0.0);
        assert_eq!(progress(0, 0, 0), 1.0);
    }

    #[test]
    fn tween_target_sums_delta() {
        let m = Motion::Tween {
            from: (10.0, 20.0),
            delta: (5.0, -5.0),
            start_ms: 0,
        };
        assert_eq!(m.tween_target(), Some((15.0, 15.0)));
        assert_eq!(Motion::Rest.tween_target(), None);
    }
}
