// Math utilities and helper functions

/// Move `current` toward `target` by at most `max_delta`, never overshooting
pub fn move_toward(current: f32, target: f32, max_delta: f32) -> f32 {
    let delta = target - current;
    if delta.abs() <= max_delta {
        target
    } else {
        current + max_delta * delta.signum()
    }
}

/// Flush values inside the dead zone to exactly zero
pub fn apply_dead_zone(value: f32, dead: f32) -> f32 {
    if value.abs() < dead {
        0.0
    } else {
        value
    }
}
