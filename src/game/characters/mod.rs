// Character system
//
// This module contains everything related to playable characters:
// - State enum, transition rule and facing
// - Clip catalog, state prefixes and random clip selection
// - The platformer controller and its tunables
// - Binding of controllers to physics bodies

pub mod animation;
pub mod character;
pub mod config;
pub mod controller;
pub mod state;

// Re-export commonly used types
pub use animation::SkeletonAnimation;
pub use character::{CharacterId, CharacterManager};
pub use config::ControllerConfig;

// Re-export for hosts driving a controller directly
#[allow(unused_imports)]
pub use animation::{AnimationError, AnimationRuntime, ClipResolver, PrefixTable};
#[allow(unused_imports)]
pub use character::Character;
#[allow(unused_imports)]
pub use controller::{AxisInput, PhysicsBody, PlayerController};
#[allow(unused_imports)]
pub use state::PlayerState;
