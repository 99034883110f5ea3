// Character animation: clip catalog, state-to-clip prefixes and random clip selection

use super::state::{PlayerState, FACING_LEFT_YAW};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Reasons a state change leaves the current clip playing
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AnimationError {
    #[error("State {state:?} has no clip prefix configured")]
    MissingPrefixMapping { state: PlayerState },

    #[error("No animation found with prefix '{prefix}' for state {state:?}")]
    NoMatchingClip { state: PlayerState, prefix: String },
}

/// Fixed mapping from state to the name prefix of its clips
#[derive(Debug, Clone, Default)]
pub struct PrefixTable {
    prefixes: HashMap<PlayerState, String>,
}

impl PrefixTable {
    /// Create an empty table
    pub fn new() -> Self {
        Self::default()
    }

    /// The prefixes used by the stock character skeletons.
    /// `Attack` is mapped even though the sample catalog has no attack clip.
    pub fn standard() -> Self {
        Self::new()
            .with_prefix(PlayerState::Idle, "idle")
            .with_prefix(PlayerState::Move, "run")
            .with_prefix(PlayerState::JumpUp, "jump")
            .with_prefix(PlayerState::Falling, "falldown")
            .with_prefix(PlayerState::Attack, "attack")
            .with_prefix(PlayerState::Dead, "die")
    }

    /// Add or replace the prefix for a state
    pub fn with_prefix(mut self, state: PlayerState, prefix: &str) -> Self {
        self.prefixes.insert(state, prefix.to_string());
        self
    }

    /// Prefix configured for a state
    pub fn prefix(&self, state: PlayerState) -> Option<&str> {
        self.prefixes.get(&state).map(String::as_str)
    }
}

/// What the controller needs from a skeletal animation runtime
pub trait AnimationRuntime {
    /// Names of every clip in the loaded skeleton, in runtime order
    fn clip_names(&self) -> &[String];

    /// Replace the playing clip
    fn play(&mut self, name: &str);

    /// Name of the playing clip
    fn current_clip(&self) -> Option<&str>;

    /// Yaw of the skeleton root, in degrees
    fn root_yaw(&self) -> f32;

    fn set_root_yaw(&mut self, yaw: f32);
}

/// In-process skeleton animation: a clip catalog, the name of the clip
/// currently playing and the root yaw used for facing.
#[derive(Debug, Default)]
pub struct SkeletonAnimation {
    /// Clip names in catalog order
    names: Vec<String>,
    current: Option<usize>,
    root_yaw: f32,
}

impl SkeletonAnimation {
    pub fn new() -> Self {
        Self::default()
    }

    /// Skeleton with the given clip catalog
    pub fn from_names(names: &[&str]) -> Self {
        let mut skeleton = Self::new();
        for name in names {
            skeleton.add_clip(name);
        }
        skeleton
    }

    /// The demo hero: several idle and run variants, no attack clip
    pub fn sample_hero() -> Self {
        Self::from_names(&[
            "idle_1",
            "idle_2",
            "idle_3",
            "run_1",
            "run_2",
            "jump_1",
            "falldown_1",
            "die_1",
        ])
    }

    /// Append a clip to the catalog, ignoring names already present
    pub fn add_clip(&mut self, name: &str) {
        if !self.names.iter().any(|clip| clip == name) {
            self.names.push(name.to_string());
        }
    }

    /// Whether the skeleton is turned to face left
    pub fn is_flipped(&self) -> bool {
        self.root_yaw().rem_euclid(360.0) == FACING_LEFT_YAW
    }
}

impl AnimationRuntime for SkeletonAnimation {
    fn clip_names(&self) -> &[String] {
        &self.names
    }

    fn play(&mut self, name: &str) {
        match self.names.iter().position(|clip| clip == name) {
            Some(index) => self.current = Some(index),
            None => log::warn!("Skeleton has no animation named '{}'", name),
        }
    }

    fn current_clip(&self) -> Option<&str> {
        self.current.map(|index| self.names[index].as_str())
    }

    fn root_yaw(&self) -> f32 {
        self.root_yaw
    }

    fn set_root_yaw(&mut self, yaw: f32) {
        self.root_yaw = yaw;
    }
}

/// Picks a random clip among the ones whose name starts with a state's prefix.
///
/// The match buffer is reused across calls and holds the candidates of the
/// last resolution.
#[derive(Debug)]
pub struct ClipResolver {
    matches: Vec<String>,
    rng: StdRng,
}

impl ClipResolver {
    pub fn new() -> Self {
        Self::with_rng(StdRng::from_entropy())
    }

    pub fn with_rng(rng: StdRng) -> Self {
        Self {
            matches: Vec::new(),
            rng,
        }
    }

    /// Play a uniformly chosen clip for `state` and return its name.
    /// On error nothing is played and the runtime keeps its current clip.
    pub fn play_random<A: AnimationRuntime + ?Sized>(
        &mut self,
        state: PlayerState,
        prefixes: &PrefixTable,
        runtime: &mut A,
    ) -> Result<&str, AnimationError> {
        let prefix = prefixes
            .prefix(state)
            .ok_or(AnimationError::MissingPrefixMapping { state })?;

        self.matches.clear();
        self.matches.extend(
            runtime
                .clip_names()
                .iter()
                .filter(|name| name.starts_with(prefix))
                .cloned(),
        );

        if self.matches.is_empty() {
            return Err(AnimationError::NoMatchingClip {
                state,
                prefix: prefix.to_string(),
            });
        }

        let clip = &self.matches[self.rng.gen_range(0..self.matches.len())];
        runtime.play(clip);
        Ok(clip)
    }

    /// Candidates found by the last resolution
    pub fn matches(&self) -> &[String] {
        &self.matches
    }
}

impl Default for ClipResolver {
    fn default() -> Self {
        Self::new()
    }
}
