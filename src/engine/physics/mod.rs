// Physics system using rapier2d

pub mod body;
mod collision;
mod world;

pub use body::{presets, ColliderHandle, RigidBodyHandle};
pub use collision::TriggerEvent;
pub use world::PhysicsWorld;

// Re-export commonly used rapier types for convenience
pub use rapier2d::prelude::RigidBody;

#[allow(unused_imports)]
pub use collision::CollisionGroups;

/// Tag carried by trigger volumes the characters can stand on
pub const GROUND_TAG: &str = "Ground";

/// Physics lookup errors
#[derive(Debug, thiserror::Error)]
pub enum PhysicsError {
    #[error("Rigid body {0:?} is not in the physics world")]
    MissingBody(RigidBodyHandle),

    #[error("Collider {0:?} is not in the physics world")]
    MissingCollider(ColliderHandle),
}
