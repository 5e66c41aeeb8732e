use std::env;

use tui_tiles_core::Timing;
use tui_tiles_types::{RotateDirection, MOVE_MS, ROTATE_MS, STICK_THRESHOLD, UNSTICK_THRESHOLD};

/// Engine tuning knobs.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EngineConfig {
    pub stick_threshold: f32,
    /// Never larger than `stick_threshold`.
    pub unstick_threshold: f32,
    pub rotate_ms: u32,
    pub move_ms: u32,
    pub rotate_direction: RotateDirection,
    pub celebrate: bool,
    pub seed: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            stick_threshold: STICK_THRESHOLD,
            unstick_threshold: UNSTICK_THRESHOLD,
            rotate_ms: ROTATE_MS,
            move_ms: MOVE_MS,
            rotate_direction: RotateDirection::Clockwise,
            celebrate: true,
            seed: 1,
        }
    }
}

impl EngineConfig {
    /// Create from `TILES_*` environment variables, falling back to defaults.
    pub fn from_env() -> Self {
        Self::from_vars(|key| env::var(key).ok())
    }

    /// Same as [`EngineConfig::from_env`] with an injected variable lookup.
    pub fn from_vars(get: impl Fn(&str) -> Option<String>) -> Self {
        let d = Self::default();

        let stick_threshold = get("TILES_STICK_THRESHOLD")
            .and_then(|s| s.trim().parse::<f32>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(d.stick_threshold);

        let unstick_threshold = get("TILES_UNSTICK_THRESHOLD")
            .and_then(|s| s.trim().parse::<f32>().ok())
            .filter(|v| v.is_finite() && *v > 0.0)
            .unwrap_or(d.unstick_threshold);

        let rotate_ms = get("TILES_ROTATE_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(d.rotate_ms);

        let move_ms = get("TILES_MOVE_MS")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(d.move_ms);

        let rotate_direction = get("TILES_ROTATE_DIR")
            .and_then(|s| RotateDirection::from_str(&s))
            .unwrap_or(d.rotate_direction);

        let celebrate = get("TILES_CELEBRATE")
            .map(|s| !matches!(s.trim().to_lowercase().as_str(), "0" | "false" | "off" | "no"))
            .unwrap_or(d.celebrate);

        let seed = get("TILES_SEED")
            .and_then(|s| s.trim().parse().ok())
            .unwrap_or(d.seed);

        Self {
            stick_threshold,
            unstick_threshold,
            rotate_ms,
            move_ms,
            rotate_direction,
            celebrate,
            seed,
        }
        .normalized()
    }

    /// Clamp the exit threshold so it never exceeds the entry threshold.
    pub fn normalized(mut self) -> Self {
        if self.unstick_threshold > self.stick_threshold {
            self.unstick_threshold = self.stick_threshold;
        }
        self
    }

    pub fn timing(&self) -> Timing {
        Timing {
            rotate_ms: self.rotate_ms,
            move_ms: self.move_ms,
            direction: self.rotate_direction,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn vars(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |k| map.get(k).cloned()
    }

    #[test]
    fn empty_env_gives_defaults() {
        assert_eq!(EngineConfig::from_vars(vars(&[])), EngineConfig::default());
    }

    #[test]
    fn parses_overrides() {
        let cfg = EngineConfig::from_vars(vars(&[
            ("TILES_STICK_THRESHOLD", "40"),
            ("TILES_UNSTICK_THRESHOLD", "20"),
            ("TILES_ROTATE_MS", "120"),
            ("TILES_MOVE_MS", "0"),
            ("TILES_ROTATE_DIR", "ccw"),
            ("TILES_CELEBRATE", "off"),
            ("TILES_SEED", "77"),
        ]));
        assert_eq!(cfg.stick_threshold, 40.0);
        assert_eq!(cfg.unstick_threshold, 20.0);
        assert_eq!(cfg.rotate_ms, 120);
        assert_eq!(cfg.move_ms, 0);
        assert_eq!(cfg.rotate_direction, RotateDirection::CounterClockwise);
        assert!(!cfg.celebrate);
        assert_eq!(cfg.seed, 77);
    }

    #[test]
    fn unstick_is_clamped_to_stick() {
        let cfg = EngineConfig::from_vars(vars(&[("TILES_UNSTICK_THRESHOLD", "50")]));
        assert_eq!(cfg.unstick_threshold, cfg.stick_threshold);
    }

    #[test]
    fn garbage_values_fall_back() {
        let cfg = EngineConfig::from_vars(vars(&[
            ("TILES_STICK_THRESHOLD", "-3"),
            ("TILES_ROTATE_MS", "fast"),
            ("TILES_ROTATE_DIR", "sideways"),
        ]));
        assert_eq!(cfg, EngineConfig::default());
    }
}
