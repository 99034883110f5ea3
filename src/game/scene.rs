// Demo level: a floor and a ledge, each with a ground trigger on top

use log::info;

use crate::engine::physics::{presets, PhysicsWorld, RigidBodyHandle, GROUND_TAG};

use super::characters::{CharacterId, CharacterManager, ControllerConfig, SkeletonAnimation};

/// Thickness of the ground trigger strip laid on every platform
const GROUND_TRIGGER_THICKNESS: f32 = 0.2;

/// A static platform
#[derive(Debug, Clone, Copy)]
pub struct PlatformLayout {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Demo platforms: a wide floor and a raised ledge to the right
pub const DEMO_PLATFORMS: [PlatformLayout; 2] = [
    PlatformLayout {
        x: 0.0,
        y: 0.0,
        width: 40.0,
        height: 1.0,
    },
    PlatformLayout {
        x: 8.0,
        y: 3.0,
        width: 6.0,
        height: 0.5,
    },
];

/// Add a solid platform with a "Ground" trigger on its top surface
pub fn spawn_platform(physics: &mut PhysicsWorld, layout: &PlatformLayout) -> RigidBodyHandle {
    let body = physics.add_rigid_body(presets::platform_body(layout.x, layout.y));
    physics.add_collider(presets::platform_collider(layout.width, layout.height), body);
    physics.add_tagged_collider(
        presets::ground_trigger(layout.width, layout.height, GROUND_TRIGGER_THICKNESS),
        body,
        GROUND_TAG,
    );
    body
}

/// Build the demo level and spawn the hero above the floor
pub fn build_demo_scene(physics: &mut PhysicsWorld, characters: &mut CharacterManager) -> CharacterId {
    for layout in &DEMO_PLATFORMS {
        spawn_platform(physics, layout);
    }
    info!("Demo scene: {} platforms", DEMO_PLATFORMS.len());

    characters.spawn_character(
        "hero",
        ControllerConfig::default(),
        SkeletonAnimation::sample_hero(),
        physics,
        0.0,
        3.0,
    )
}
