// Named continuous axes driven by a pair of digital inputs

use crate::core::math::{apply_dead_zone, move_toward};
use winit::keyboard::KeyCode;

/// Tuning for a single virtual axis
///
/// Mirrors the classic "button axis" model: holding a key ramps the value
/// toward -1 or 1, releasing lets it fall back to 0.
#[derive(Debug, Clone, PartialEq)]
pub struct AxisSettings {
    /// Keys that push the axis toward -1
    pub negative: Vec<KeyCode>,
    /// Keys that push the axis toward +1
    pub positive: Vec<KeyCode>,
    /// Units per second the value moves toward a held direction
    pub sensitivity: f32,
    /// Units per second the value returns to 0 when nothing is held
    pub gravity: f32,
    /// Magnitudes below this read as exactly 0
    pub dead: f32,
    /// Reset to 0 before ramping when the opposite direction is pressed
    pub snap: bool,
}

impl AxisSettings {
    /// Axis with the usual keyboard tuning (sensitivity 3, gravity 3, snap on)
    pub fn keys(negative: &[KeyCode], positive: &[KeyCode]) -> Self {
        Self {
            negative: negative.to_vec(),
            positive: positive.to_vec(),
            sensitivity: 3.0,
            gravity: 3.0,
            dead: 0.001,
            snap: true,
        }
    }
}

/// Current value of one axis
#[derive(Debug, Clone, Copy, Default)]
pub struct AxisState {
    raw: f32,
}

impl AxisState {
    /// Advance the axis by `dt` seconds given which directions are held
    pub fn advance(
        &mut self,
        settings: &AxisSettings,
        negative_held: bool,
        positive_held: bool,
        dt: f32,
    ) {
        let target = match (negative_held, positive_held) {
            (true, false) => -1.0,
            (false, true) => 1.0,
            _ => 0.0,
        };

        if target == 0.0 {
            self.raw = move_toward(self.raw, 0.0, settings.gravity * dt);
            return;
        }

        if settings.snap && self.raw != 0.0 && self.raw.signum() != target {
            self.raw = 0.0;
        }
        self.raw = move_toward(self.raw, target, settings.sensitivity * dt);
    }

    /// Value as seen by gameplay code
    pub fn value(&self, settings: &AxisSettings) -> f32 {
        apply_dead_zone(self.raw, settings.dead)
    }

    pub fn reset(&mut self) {
        self.raw = 0.0;
    }
}
