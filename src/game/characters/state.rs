// Character state machine

/// Yaw (degrees) of the skeleton root when facing right
pub const FACING_RIGHT_YAW: f32 = 0.0;

/// Yaw (degrees) of the skeleton root when facing left
pub const FACING_LEFT_YAW: f32 = 180.0;

/// Represents the current state of a character
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PlayerState {
    /// Standing still on ground
    #[default]
    Idle,
    /// Running on ground
    Move,
    /// In the air, moving upward
    JumpUp,
    /// In the air, not moving upward
    Falling,
    /// Attacking (driven externally)
    Attack,
    /// Dead (driven externally)
    Dead,
}

/// Decide the next state from this frame's horizontal input, ground contact
/// and vertical velocity. Never yields `Attack` or `Dead`.
pub fn next_state(horizontal: f32, grounded: bool, velocity_y: f32) -> PlayerState {
    if grounded {
        if horizontal != 0.0 {
            PlayerState::Move
        } else {
            PlayerState::Idle
        }
    } else if velocity_y > 0.0 {
        PlayerState::JumpUp
    } else {
        PlayerState::Falling
    }
}

/// Root yaw for the given horizontal input, `None` leaves facing unchanged
pub fn facing_yaw(horizontal: f32) -> Option<f32> {
    if horizontal == 0.0 {
        None
    } else if horizontal > 0.0 {
        Some(FACING_RIGHT_YAW)
    } else {
        Some(FACING_LEFT_YAW)
    }
}

/// Holds the active state and guards against redundant transitions
#[derive(Debug, Default)]
pub struct StateMachine {
    current_state: PlayerState,
}

impl StateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get the current state
    pub fn state(&self) -> PlayerState {
        self.current_state
    }

    /// Transition to a new state. Returns false (and does nothing) when
    /// `new_state` is already active.
    pub fn transition(&mut self, new_state: PlayerState) -> bool {
        if self.current_state == new_state {
            return false;
        }
        self.current_state = new_state;
        true
    }
}
