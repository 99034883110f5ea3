// Input configuration: named axes and their key bindings

use super::axis::AxisSettings;
use std::collections::HashMap;
use winit::keyboard::KeyCode;

/// Name of the horizontal movement axis
pub const HORIZONTAL_AXIS: &str = "Horizontal";

/// Mapping from axis names to their settings
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    axes: HashMap<String, AxisSettings>,
}

impl InputConfig {
    /// Create an empty configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Standard keyboard layout: A/D and the left/right arrow keys
    pub fn standard() -> Self {
        Self::new().with_axis(
            HORIZONTAL_AXIS,
            AxisSettings::keys(
                &[KeyCode::KeyA, KeyCode::ArrowLeft],
                &[KeyCode::KeyD, KeyCode::ArrowRight],
            ),
        )
    }

    /// Add or replace an axis binding
    pub fn with_axis(mut self, name: &str, settings: AxisSettings) -> Self {
        self.bind_axis(name, settings);
        self
    }

    /// Add or replace an axis binding
    pub fn bind_axis(&mut self, name: &str, settings: AxisSettings) {
        self.axes.insert(name.to_string(), settings);
    }

    /// Get the settings for an axis
    pub fn axis(&self, name: &str) -> Option<&AxisSettings> {
        self.axes.get(name)
    }

    /// Iterate over all configured axes
    pub fn axes(&self) -> impl Iterator<Item = (&str, &AxisSettings)> {
        self.axes.iter().map(|(name, settings)| (name.as_str(), settings))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_has_horizontal_axis() {
        let config = InputConfig::standard();
        let horizontal = config.axis(HORIZONTAL_AXIS).unwrap();
        assert!(horizontal.negative.contains(&KeyCode::KeyA));
        assert!(horizontal.positive.contains(&KeyCode::ArrowRight));
    }

    #[test]
    fn test_rebind_replaces_axis() {
        let mut config = InputConfig::standard();
        config.bind_axis(
            HORIZONTAL_AXIS,
            AxisSettings::keys(&[KeyCode::KeyJ], &[KeyCode::KeyL]),
        );
        let horizontal = config.axis(HORIZONTAL_AXIS).unwrap();
        assert_eq!(horizontal.negative, vec![KeyCode::KeyJ]);
        assert_eq!(config.axes().count(), 1);
    }

    #[test]
    fn test_standard_binds_only_horizontal() {
        let config = InputConfig::standard();
        let names: Vec<&str> = config.axes().map(|(name, _)| name).collect();
        assert_eq!(names, [HORIZONTAL_AXIS]);
    }

    #[test]
    fn test_unknown_axis() {
        let config = InputConfig::new();
        assert!(config.axis("Fire1").is_none());
    }
}
