// Input manager - keyboard state, edge detection and axis sampling

use super::axis::AxisState;
use super::config::InputConfig;
use std::collections::{HashMap, HashSet};
use winit::event::{ElementState, KeyEvent};
use winit::keyboard::{KeyCode, PhysicalKey};

/// Collects keyboard events between frames and exposes them as
/// key-down edges and named continuous axes
#[derive(Debug)]
pub struct InputManager {
    /// Axis bindings
    config: InputConfig,

    /// Current value of each configured axis
    axes: HashMap<String, AxisState>,

    /// Keys currently held down
    held: HashSet<KeyCode>,

    /// Keys pressed since the last `end_frame`
    just_pressed: HashSet<KeyCode>,
}

impl InputManager {
    /// Create a new input manager
    pub fn new(config: InputConfig) -> Self {
        let axes = config
            .axes()
            .map(|(name, _)| (name.to_string(), AxisState::default()))
            .collect();

        Self {
            config,
            axes,
            held: HashSet::new(),
            just_pressed: HashSet::new(),
        }
    }

    /// Process a keyboard event from winit
    pub fn process_keyboard_event(&mut self, event: &KeyEvent) {
        let PhysicalKey::Code(key_code) = event.physical_key else {
            return;
        };

        match event.state {
            // Key repeat is not a new edge
            ElementState::Pressed if !event.repeat => self.press_key(key_code),
            ElementState::Pressed => {}
            ElementState::Released => self.release_key(key_code),
        }
    }

    /// Register a key press
    pub(crate) fn press_key(&mut self, key: KeyCode) {
        if self.held.insert(key) {
            self.just_pressed.insert(key);
        }
    }

    /// Register a key release
    pub(crate) fn release_key(&mut self, key: KeyCode) {
        self.held.remove(&key);
    }

    /// Advance every axis by `dt` seconds from the currently held keys.
    /// Call once per tick before gameplay reads the axes.
    pub fn begin_frame(&mut self, dt: f32) {
        for (name, settings) in self.config.axes() {
            let negative = settings.negative.iter().any(|k| self.held.contains(k));
            let positive = settings.positive.iter().any(|k| self.held.contains(k));
            self.axes
                .entry(name.to_string())
                .or_default()
                .advance(settings, negative, positive, dt);
        }
    }

    /// Drop the edges collected for this frame.
    /// Call once per tick after gameplay consumed them.
    pub fn end_frame(&mut self) {
        self.just_pressed.clear();
    }

    /// Value of a named axis, 0 for unknown axes
    pub fn axis(&self, name: &str) -> f32 {
        match (self.config.axis(name), self.axes.get(name)) {
            (Some(settings), Some(state)) => state.value(settings),
            _ => 0.0,
        }
    }

    /// Whether the key went down this frame
    pub fn key_down(&self, key: KeyCode) -> bool {
        self.just_pressed.contains(&key)
    }

    /// Forget every held key and zero every axis (e.g. on focus loss)
    pub fn reset(&mut self) {
        self.held.clear();
        self.just_pressed.clear();
        for axis in self.axes.values_mut() {
            axis.reset();
        }
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new(InputConfig::standard())
    }
}
