// Character controller tunables

use crate::engine::input::HORIZONTAL_AXIS;
use winit::keyboard::KeyCode;

/// Movement and input settings of one controller
#[derive(Debug, Clone, PartialEq)]
pub struct ControllerConfig {
    /// Horizontal speed at full axis deflection (units/second)
    pub move_speed: f32,
    /// Magnitude of the upward jump impulse
    pub jump_force: f32,
    /// Name of the axis driving horizontal movement
    pub horizontal_axis: &'static str,
    /// Key whose key-down edge triggers a jump
    pub jump_key: KeyCode,

    // Dimensions (for physics collider)
    /// Character width in world units
    pub width: f32,
    /// Character height in world units
    pub height: f32,
}

pub const DEFAULT_CONFIG: ControllerConfig = ControllerConfig {
    move_speed: 5.0,
    jump_force: 12.0,
    horizontal_axis: HORIZONTAL_AXIS,
    jump_key: KeyCode::Space,

    width: 1.0,
    height: 2.0,
};

impl Default for ControllerConfig {
    fn default() -> Self {
        DEFAULT_CONFIG
    }
}
