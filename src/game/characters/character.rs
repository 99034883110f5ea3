// Character entity and management

use glam::Vec2;
use log::{info, warn};
use rapier2d::prelude::{nalgebra, vector};
use winit::keyboard::KeyCode;

use crate::engine::input::InputManager;
use crate::engine::physics::{
    presets, ColliderHandle, PhysicsError, PhysicsWorld, RigidBody, RigidBodyHandle, TriggerEvent,
};

use super::animation::{AnimationRuntime, PrefixTable, SkeletonAnimation};
use super::config::ControllerConfig;
use super::controller::{AxisInput, PhysicsBody, PlayerController};
use super::state::PlayerState;

impl PhysicsBody for RigidBody {
    fn velocity(&self) -> Vec2 {
        let v = self.linvel();
        Vec2::new(v.x, v.y)
    }

    fn set_horizontal_velocity(&mut self, vx: f32) {
        let vy = self.linvel().y;
        self.set_linvel(vector![vx, vy], true);
    }

    fn apply_impulse(&mut self, impulse: Vec2) {
        RigidBody::apply_impulse(self, vector![impulse.x, impulse.y], true);
    }
}

impl AxisInput for InputManager {
    fn axis(&self, name: &str) -> f32 {
        InputManager::axis(self, name)
    }

    fn key_down(&self, key: KeyCode) -> bool {
        InputManager::key_down(self, key)
    }
}

/// Unique identifier for a character
pub type CharacterId = u32;

/// A controller bound to a rapier body and a skeleton
#[derive(Debug)]
pub struct Character {
    /// Unique identifier
    pub id: CharacterId,
    /// Character name (for display)
    pub name: String,

    // Physics
    /// Handle to the character's rigid body in the physics world
    pub body_handle: RigidBodyHandle,
    /// Handle to the character's collider
    pub collider_handle: ColliderHandle,

    /// Movement, ground contact and state
    pub controller: PlayerController,
    /// Clip catalog, playing clip and facing
    pub skeleton: SkeletonAnimation,
}

impl Character {
    /// Create a new character and add it to the physics world
    pub fn new(
        id: CharacterId,
        name: &str,
        controller: PlayerController,
        skeleton: SkeletonAnimation,
        physics: &mut PhysicsWorld,
        spawn_x: f32,
        spawn_y: f32,
    ) -> Self {
        let config = controller.config();
        let body_handle = physics.add_rigid_body(presets::player_body(spawn_x, spawn_y));
        let collider_handle =
            physics.add_collider(presets::player_collider(config.width, config.height), body_handle);

        Self {
            id,
            name: name.to_string(),
            body_handle,
            collider_handle,
            controller,
            skeleton,
        }
    }

    /// Run one controller update against the character's body
    pub fn update<I>(&mut self, physics: &mut PhysicsWorld, input: &I) -> Result<(), PhysicsError>
    where
        I: AxisInput + ?Sized,
    {
        let body = physics
            .get_rigid_body_mut(self.body_handle)
            .ok_or(PhysicsError::MissingBody(self.body_handle))?;

        self.controller.update(input, body, &mut self.skeleton);
        Ok(())
    }

    /// Forward the trigger events involving this character's collider to the controller.
    /// A stay against a collider missing from the world is logged and skipped.
    pub fn handle_trigger_events(
        &mut self,
        physics: &PhysicsWorld,
        events: &[TriggerEvent],
    ) -> Result<(), PhysicsError> {
        for event in events {
            let Some(other) = event.other(self.collider_handle) else {
                continue;
            };

            match event {
                TriggerEvent::Stay { .. } => {
                    let Some(collider) = physics.get_collider(other) else {
                        warn!("{}: {}", self.name, PhysicsError::MissingCollider(other));
                        continue;
                    };
                    let Some(tag) = physics.collider_tag(other) else {
                        continue;
                    };
                    let own_y = self.position(physics)?.y;
                    self.controller.on_trigger_stay(tag, collider.translation().y, own_y);
                }
                TriggerEvent::Exit { .. } => {
                    if let Some(tag) = physics.collider_tag(other) {
                        self.controller.on_trigger_exit(tag);
                    }
                }
            }
        }
        Ok(())
    }

    /// Get character's current position
    pub fn position(&self, physics: &PhysicsWorld) -> Result<Vec2, PhysicsError> {
        physics
            .get_rigid_body(self.body_handle)
            .map(|body| Vec2::new(body.translation().x, body.translation().y))
            .ok_or(PhysicsError::MissingBody(self.body_handle))
    }

    /// Get the current state
    pub fn state(&self) -> PlayerState {
        self.controller.state()
    }

    /// Whether the sprite faces left
    pub fn is_flipped(&self) -> bool {
        self.skeleton.is_flipped()
    }

    /// Name of the playing clip
    pub fn current_clip(&self) -> Option<&str> {
        self.skeleton.current_clip()
    }
}

/// Manages all characters in the game
#[derive(Debug, Default)]
pub struct CharacterManager {
    characters: Vec<Character>,
    next_id: CharacterId,
}

impl CharacterManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn a character with the standard prefixes and the given skeleton
    pub fn spawn_character(
        &mut self,
        name: &str,
        config: ControllerConfig,
        skeleton: SkeletonAnimation,
        physics: &mut PhysicsWorld,
        spawn_x: f32,
        spawn_y: f32,
    ) -> CharacterId {
        let controller = PlayerController::new(config, PrefixTable::standard());
        self.spawn_with_controller(name, controller, skeleton, physics, spawn_x, spawn_y)
    }

    /// Spawn a character around an already configured controller
    pub fn spawn_with_controller(
        &mut self,
        name: &str,
        controller: PlayerController,
        skeleton: SkeletonAnimation,
        physics: &mut PhysicsWorld,
        spawn_x: f32,
        spawn_y: f32,
    ) -> CharacterId {
        let id = self.next_id;
        self.next_id += 1;

        let character = Character::new(id, name, controller, skeleton, physics, spawn_x, spawn_y);
        info!("Spawned character {} '{}' at ({}, {})", id, name, spawn_x, spawn_y);
        self.characters.push(character);

        id
    }

    /// Get a character by ID
    pub fn get(&self, id: CharacterId) -> Option<&Character> {
        self.characters.iter().find(|c| c.id == id)
    }

    /// Update all characters. A character whose body vanished is skipped.
    pub fn update<I>(&mut self, physics: &mut PhysicsWorld, input: &I)
    where
        I: AxisInput + ?Sized,
    {
        for character in &mut self.characters {
            if let Err(err) = character.update(physics, input) {
                warn!("{} skipped update: {}", character.name, err);
            }
        }
    }

    /// Dispatch the last physics step's trigger events to every character
    pub fn handle_trigger_events(&mut self, physics: &PhysicsWorld) {
        let events = physics.trigger_events();
        for character in &mut self.characters {
            if let Err(err) = character.handle_trigger_events(physics, events) {
                warn!("{} dropped trigger events: {}", character.name, err);
            }
        }
    }
}
