use rapier2d::prelude::*;
use std::sync::{Arc, Mutex};

/// Collision groups for filtering what objects can collide with each other
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollisionGroups {
    /// Default group - interacts with everything
    Default = 0b0000_0001,

    /// Player characters
    Player = 0b0000_0010,

    /// Static platforms and walls
    Platform = 0b0000_1000,

    /// Trigger volumes (ground sensors, etc.) - never cause physical collision
    Trigger = 0b1000_0000,
}

impl CollisionGroups {
    /// Convert to rapier2d's InteractionGroups
    pub fn to_interaction_groups(self) -> InteractionGroups {
        let memberships = Group::from_bits_truncate(self as u32);

        let filter = match self {
            // Players stand on platforms and overlap triggers, but pass through each other
            CollisionGroups::Player => Group::from_bits_truncate(
                CollisionGroups::Platform as u32 | CollisionGroups::Trigger as u32,
            ),

            CollisionGroups::Platform => Group::from_bits_truncate(
                CollisionGroups::Player as u32 | CollisionGroups::Platform as u32,
            ),

            // Triggers only report players
            CollisionGroups::Trigger => Group::from_bits_truncate(CollisionGroups::Player as u32),

            CollisionGroups::Default => Group::ALL,
        };

        InteractionGroups::new(memberships, filter)
    }
}

/// Overlap event between a trigger volume and another collider.
///
/// `Stay` is reported on every physics step while the overlap persists,
/// starting with the step on which it began. `Exit` is reported once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TriggerEvent {
    Stay {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
    Exit {
        collider1: ColliderHandle,
        collider2: ColliderHandle,
    },
}

impl TriggerEvent {
    /// Both colliders of the pair
    pub fn colliders(&self) -> (ColliderHandle, ColliderHandle) {
        match *self {
            TriggerEvent::Stay {
                collider1,
                collider2,
            }
            | TriggerEvent::Exit {
                collider1,
                collider2,
            } => (collider1, collider2),
        }
    }

    /// If `handle` is part of the pair, the other collider
    pub fn other(&self, handle: ColliderHandle) -> Option<ColliderHandle> {
        let (c1, c2) = self.colliders();
        if c1 == handle {
            Some(c2)
        } else if c2 == handle {
            Some(c1)
        } else {
            None
        }
    }
}

/// Raw sensor start/stop notifications collected during one physics step
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SensorChange {
    Started(ColliderHandle, ColliderHandle),
    Stopped(ColliderHandle, ColliderHandle),
}

/// Queue for storing sensor events during physics step.
///
/// rapier calls the handler through `&self`, hence the mutex.
pub struct SensorEventQueue {
    changes: Arc<Mutex<Vec<SensorChange>>>,
}

impl SensorEventQueue {
    pub fn new() -> Self {
        Self {
            changes: Arc::new(Mutex::new(Vec::with_capacity(16))),
        }
    }

    /// Take every change collected so far
    pub(crate) fn drain(&self) -> Vec<SensorChange> {
        self.changes
            .lock()
            .map(|mut changes| std::mem::take(&mut *changes))
            .unwrap_or_default()
    }

    fn push(&self, change: SensorChange) {
        if let Ok(mut changes) = self.changes.lock() {
            changes.push(change);
        }
    }
}

impl Default for SensorEventQueue {
    fn default() -> Self {
        Self::new()
    }
}

impl EventHandler for SensorEventQueue {
    fn handle_collision_event(
        &self,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        event: CollisionEvent,
        _contact_pair: Option<&ContactPair>,
    ) {
        // Solid contacts are resolved by the solver; only overlaps matter here
        if !event.sensor() {
            return;
        }

        match event {
            CollisionEvent::Started(h1, h2, _flags) => self.push(SensorChange::Started(h1, h2)),
            CollisionEvent::Stopped(h1, h2, _flags) => self.push(SensorChange::Stopped(h1, h2)),
        }
    }

    fn handle_contact_force_event(
        &self,
        _dt: Real,
        _bodies: &RigidBodySet,
        _colliders: &ColliderSet,
        _contact_pair: &ContactPair,
        _total_force_magnitude: Real,
    ) {
    }
}

/// Set of sensor pairs currently overlapping, in the order they began
#[derive(Debug, Default)]
pub(crate) struct ActiveOverlaps {
    pairs: Vec<(ColliderHandle, ColliderHandle)>,
}

impl ActiveOverlaps {
    /// Fold one step's changes into the active set and produce the
    /// trigger events for that step: one `Exit` per stopped pair, then
    /// one `Stay` per pair still overlapping.
    pub(crate) fn apply(&mut self, changes: &[SensorChange]) -> Vec<TriggerEvent> {
        let mut events = Vec::new();

        for change in changes {
            match *change {
                SensorChange::Started(h1, h2) => {
                    if !self.contains(h1, h2) {
                        self.pairs.push((h1, h2));
                    }
                }
                SensorChange::Stopped(h1, h2) => {
                    let before = self.pairs.len();
                    self.pairs
                        .retain(|&(a, b)| !((a == h1 && b == h2) || (a == h2 && b == h1)));
                    if self.pairs.len() != before {
                        events.push(TriggerEvent::Exit {
                            collider1: h1,
                            collider2: h2,
                        });
                    }
                }
            }
        }

        events.extend(self.pairs.iter().map(|&(collider1, collider2)| TriggerEvent::Stay {
            collider1,
            collider2,
        }));
        events
    }

    fn contains(&self, h1: ColliderHandle, h2: ColliderHandle) -> bool {
        self.pairs
            .iter()
            .any(|&(a, b)| (a == h1 && b == h2) || (a == h2 && b == h1))
    }
}
