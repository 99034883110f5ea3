// Input handling system
//
// Turns winit keyboard events into the two things gameplay code reads:
// key-down edges and named continuous axes.
//
// ## Architecture
//
// - `axis`: Per-axis smoothing (sensitivity, gravity, dead zone, snap)
// - `config`: Axis names and their key bindings
// - `manager`: Main input manager coordinating everything
//
// ## Usage Example
//
// ```rust
// use engine::input::{InputManager, HORIZONTAL_AXIS};
//
// let mut input = InputManager::default();
//
// // In your event loop, process keyboard events
// input.process_keyboard_event(&key_event);
//
// // Once per tick
// input.begin_frame(dt);
// let x = input.axis(HORIZONTAL_AXIS);
// if input.key_down(KeyCode::Space) {
//     // jump
// }
// input.end_frame();
// ```

pub mod axis;
pub mod config;
pub mod manager;

// Re-export commonly used types
pub use config::HORIZONTAL_AXIS;
pub use manager::InputManager;

#[allow(unused_imports)]
pub use axis::{AxisSettings, AxisState};
#[allow(unused_imports)]
pub use config::InputConfig;
