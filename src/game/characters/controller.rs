// Platformer controller: input to movement, state changes and clip selection

use super::animation::{AnimationRuntime, ClipResolver, PrefixTable};
use super::config::ControllerConfig;
use super::state::{facing_yaw, next_state, PlayerState, StateMachine};
use crate::engine::physics::GROUND_TAG;
use glam::Vec2;
use log::{debug, warn};
use winit::keyboard::KeyCode;

/// What the controller needs from a physics body
pub trait PhysicsBody {
    fn velocity(&self) -> Vec2;

    /// Replace the horizontal velocity, keeping the vertical one
    fn set_horizontal_velocity(&mut self, vx: f32);

    fn apply_impulse(&mut self, impulse: Vec2);
}

/// What the controller needs from the input system
pub trait AxisInput {
    /// Value of a named continuous axis, conventionally in [-1, 1]
    fn axis(&self, name: &str) -> f32;

    /// Whether the key went down this frame
    fn key_down(&self, key: KeyCode) -> bool;
}

/// Drives one character: reads input, moves the body, tracks ground
/// contact and plays a random clip whenever the state changes.
#[derive(Debug)]
pub struct PlayerController {
    config: ControllerConfig,
    prefixes: PrefixTable,
    state_machine: StateMachine,
    resolver: ClipResolver,
    grounded: bool,
}

impl PlayerController {
    pub fn new(config: ControllerConfig, prefixes: PrefixTable) -> Self {
        Self::with_resolver(config, prefixes, ClipResolver::new())
    }

    pub fn with_resolver(
        config: ControllerConfig,
        prefixes: PrefixTable,
        resolver: ClipResolver,
    ) -> Self {
        Self {
            config,
            prefixes,
            state_machine: StateMachine::new(),
            resolver,
            grounded: false,
        }
    }

    /// Per-frame update: movement and facing, state change, then jump
    pub fn update<I, B, A>(&mut self, input: &I, body: &mut B, skeleton: &mut A)
    where
        I: AxisInput + ?Sized,
        B: PhysicsBody + ?Sized,
        A: AnimationRuntime + ?Sized,
    {
        self.update_movement(input, body, skeleton);
        self.update_jump(input, body);
    }

    fn update_movement<I, B, A>(&mut self, input: &I, body: &mut B, skeleton: &mut A)
    where
        I: AxisInput + ?Sized,
        B: PhysicsBody + ?Sized,
        A: AnimationRuntime + ?Sized,
    {
        let horizontal = input.axis(self.config.horizontal_axis);
        body.set_horizontal_velocity(horizontal * self.config.move_speed);

        let next = next_state(horizontal, self.grounded, body.velocity().y);
        self.change_state(next, skeleton);

        if let Some(yaw) = facing_yaw(horizontal) {
            skeleton.set_root_yaw(yaw);
        }
    }

    fn update_jump<I, B>(&mut self, input: &I, body: &mut B)
    where
        I: AxisInput + ?Sized,
        B: PhysicsBody + ?Sized,
    {
        if self.grounded && input.key_down(self.config.jump_key) {
            body.apply_impulse(Vec2::new(0.0, self.config.jump_force));
            debug!("Jump impulse {}", self.config.jump_force);
        }
    }

    /// Switch to `new_state` and play a random clip for it.
    ///
    /// Returns false without touching the skeleton when `new_state` is
    /// already active. A state without a usable clip is logged and the
    /// previous clip keeps playing.
    pub fn change_state<A>(&mut self, new_state: PlayerState, skeleton: &mut A) -> bool
    where
        A: AnimationRuntime + ?Sized,
    {
        let previous = self.state_machine.state();
        if !self.state_machine.transition(new_state) {
            return false;
        }

        match self.resolver.play_random(new_state, &self.prefixes, skeleton) {
            Ok(clip) => debug!("{:?} -> {:?}, playing '{}'", previous, new_state, clip),
            Err(err) => warn!("{}", err),
        }
        true
    }

    /// Overlap with a trigger persisted through a physics step.
    /// Ground counts only when its reference point is below the character's.
    pub fn on_trigger_stay(&mut self, tag: &str, other_y: f32, own_y: f32) {
        if tag == GROUND_TAG && other_y < own_y {
            self.grounded = true;
        }
    }

    /// Overlap with a trigger ended
    pub fn on_trigger_exit(&mut self, tag: &str) {
        if tag == GROUND_TAG {
            self.grounded = false;
        }
    }

    /// Get the current state
    pub fn state(&self) -> PlayerState {
        self.state_machine.state()
    }

    pub fn is_grounded(&self) -> bool {
        self.grounded
    }

    /// Clips that matched the last resolved state
    pub fn matched_clips(&self) -> &[String] {
        self.resolver.matches()
    }

    pub fn config(&self) -> &ControllerConfig {
        &self.config
    }
}

#[cfg(test)]
mod tests {
    use super::super::animation::SkeletonAnimation;
    use super::super::state::{FACING_LEFT_YAW, FACING_RIGHT_YAW};
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::cell::Cell;
    use std::sync::Once;

    thread_local! {
        static WARNINGS: Cell<usize> = Cell::new(0);
    }

    /// Logger counting `Warn` records emitted on the current thread
    struct WarningCounter;

    impl log::Log for WarningCounter {
        fn enabled(&self, metadata: &log::Metadata) -> bool {
            metadata.level() <= log::Level::Warn
        }

        fn log(&self, record: &log::Record) {
            if record.level() == log::Level::Warn {
                WARNINGS.with(|count| count.set(count.get() + 1));
            }
        }

        fn flush(&self) {}
    }

    static WARNING_COUNTER: WarningCounter = WarningCounter;

    /// Number of warnings logged by `f` on this thread
    fn count_warnings(f: impl FnOnce()) -> usize {
        static INSTALL: Once = Once::new();
        INSTALL.call_once(|| {
            if log::set_logger(&WARNING_COUNTER).is_ok() {
                log::set_max_level(log::LevelFilter::Warn);
            }
        });

        WARNINGS.with(|count| count.set(0));
        f();
        WARNINGS.with(|count| count.get())
    }

    #[derive(Default)]
    struct FakeBody {
        velocity: Vec2,
        impulses: Vec<Vec2>,
    }

    impl PhysicsBody for FakeBody {
        fn velocity(&self) -> Vec2 {
            self.velocity
        }

        fn set_horizontal_velocity(&mut self, vx: f32) {
            self.velocity.x = vx;
        }

        fn apply_impulse(&mut self, impulse: Vec2) {
            self.impulses.push(impulse);
        }
    }

    #[derive(Default)]
    struct FakeInput {
        horizontal: f32,
        jump: bool,
    }

    impl AxisInput for FakeInput {
        fn axis(&self, name: &str) -> f32 {
            if name == "Horizontal" {
                self.horizontal
            } else {
                0.0
            }
        }

        fn key_down(&self, key: KeyCode) -> bool {
            self.jump && key == KeyCode::Space
        }
    }

    /// Skeleton wrapper counting how often a clip is requested
    struct CountingSkeleton {
        inner: SkeletonAnimation,
        plays: usize,
    }

    impl CountingSkeleton {
        fn new(names: &[&str]) -> Self {
            Self {
                inner: SkeletonAnimation::from_names(names),
                plays: 0,
            }
        }
    }

    impl AnimationRuntime for CountingSkeleton {
        fn clip_names(&self) -> &[String] {
            self.inner.clip_names()
        }

        fn play(&mut self, name: &str) {
            self.plays += 1;
            self.inner.play(name);
        }

        fn current_clip(&self) -> Option<&str> {
            self.inner.current_clip()
        }

        fn root_yaw(&self) -> f32 {
            self.inner.root_yaw()
        }

        fn set_root_yaw(&mut self, yaw: f32) {
            self.inner.set_root_yaw(yaw);
        }
    }

    fn controller() -> PlayerController {
        PlayerController::with_resolver(
            ControllerConfig::default(),
            PrefixTable::standard(),
            ClipResolver::with_rng(StdRng::seed_from_u64(11)),
        )
    }

    fn hero() -> CountingSkeleton {
        CountingSkeleton::new(&["idle_a", "idle_b", "run_a", "jump_a", "falldown_a", "die_a"])
    }

    fn land(controller: &mut PlayerController) {
        controller.on_trigger_stay("Ground", 0.0, 1.0);
    }

    #[test]
    fn test_starts_idle_and_airborne() {
        let controller = controller();
        assert_eq!(controller.state(), PlayerState::Idle);
        assert!(!controller.is_grounded());
    }

    #[test]
    fn test_falls_when_not_grounded() {
        let mut controller = controller();
        let mut body = FakeBody::default();
        let mut skeleton = hero();

        controller.update(&FakeInput::default(), &mut body, &mut skeleton);
        assert_eq!(controller.state(), PlayerState::Falling);
        assert_eq!(skeleton.current_clip(), Some("falldown_a"));
    }

    #[test]
    fn test_no_matching_clip_warns_once() {
        let mut controller = controller();
        let mut skeleton = hero();
        controller.change_state(PlayerState::Move, &mut skeleton);

        let warnings = count_warnings(|| {
            controller.change_state(PlayerState::Attack, &mut skeleton);
            controller.change_state(PlayerState::Attack, &mut skeleton);
        });
        assert_eq!(warnings, 1);
        assert_eq!(skeleton.current_clip(), Some("run_a"));
    }

    #[test]
    fn test_missing_prefix_warns_once() {
        let mut controller = PlayerController::with_resolver(
            ControllerConfig::default(),
            PrefixTable::new().with_prefix(PlayerState::Move, "run"),
            ClipResolver::with_rng(StdRng::seed_from_u64(2)),
        );
        let mut skeleton = hero();
        controller.change_state(PlayerState::Move, &mut skeleton);

        let warnings = count_warnings(|| {
            controller.change_state(PlayerState::Dead, &mut skeleton);
        });
        assert_eq!(warnings, 1);
        assert_eq!(skeleton.current_clip(), Some("run_a"));
    }

    #[test]
    fn test_successful_change_does_not_warn() {
        let mut controller = controller();
        let mut skeleton = hero();

        let warnings = count_warnings(|| {
            controller.change_state(PlayerState::Falling, &mut skeleton);
        });
        assert_eq!(warnings, 0);
    }

    #[test]
    fn test_runs_when_grounded_with_input() {
        let mut controller = controller();
        let mut body = FakeBody::default();
        let mut skeleton = hero();
        land(&mut controller);

        let input = FakeInput {
            horizontal: 0.5,
            jump: false,
        };
        controller.update(&input, &mut body, &mut skeleton);

        assert_eq!(controller.state(), PlayerState::Move);
        assert_eq!(skeleton.current_clip(), Some("run_a"));
        assert_eq!(body.velocity.x, 0.5 * controller.config().move_speed);
    }

    #[test]
    fn test_horizontal_velocity_keeps_vertical_component() {
        let mut controller = controller();
        let mut body = FakeBody {
            velocity: Vec2::new(3.0, -4.0),
            impulses: Vec::new(),
        };
        let mut skeleton = hero();

        controller.update(&FakeInput::default(), &mut body, &mut skeleton);
        assert_eq!(body.velocity, Vec2::new(0.0, -4.0));
    }

    #[test]
    fn test_rising_is_jump_up() {
        let mut controller = controller();
        let mut body = FakeBody {
            velocity: Vec2::new(0.0, 2.0),
            impulses: Vec::new(),
        };
        let mut skeleton = hero();

        let input = FakeInput {
            horizontal: -1.0,
            jump: false,
        };
        controller.update(&input, &mut body, &mut skeleton);
        assert_eq!(controller.state(), PlayerState::JumpUp);
        assert_eq!(skeleton.current_clip(), Some("jump_a"));
    }

    #[test]
    fn test_same_state_resolves_once() {
        let mut controller = controller();
        let mut skeleton = hero();

        assert!(controller.change_state(PlayerState::Move, &mut skeleton));
        assert!(!controller.change_state(PlayerState::Move, &mut skeleton));
        assert_eq!(skeleton.plays, 1);
    }

    #[test]
    fn test_steady_conditions_do_not_reselect_clips() {
        let mut controller = controller();
        let mut body = FakeBody::default();
        let mut skeleton = hero();
        land(&mut controller);

        let input = FakeInput {
            horizontal: 1.0,
            jump: false,
        };
        for _ in 0..30 {
            controller.update(&input, &mut body, &mut skeleton);
        }
        assert_eq!(skeleton.plays, 1);
        assert_eq!(controller.state(), PlayerState::Move);
    }

    #[test]
    fn test_initial_idle_plays_nothing() {
        let mut controller = controller();
        let mut body = FakeBody::default();
        let mut skeleton = hero();
        land(&mut controller);

        controller.update(&FakeInput::default(), &mut body, &mut skeleton);
        assert_eq!(controller.state(), PlayerState::Idle);
        assert_eq!(skeleton.plays, 0);
        assert_eq!(skeleton.current_clip(), None);
    }

    #[test]
    fn test_idle_picks_an_idle_variant() {
        let mut controller = controller();
        let mut skeleton = hero();

        controller.change_state(PlayerState::Move, &mut skeleton);
        controller.change_state(PlayerState::Idle, &mut skeleton);

        let clip = skeleton.current_clip().unwrap();
        assert!(clip == "idle_a" || clip == "idle_b");
        assert_eq!(controller.matched_clips(), ["idle_a", "idle_b"]);
    }

    #[test]
    fn test_attack_without_clip_keeps_current_clip() {
        let mut controller = controller();
        let mut skeleton = hero();
        controller.change_state(PlayerState::Move, &mut skeleton);

        assert!(controller.change_state(PlayerState::Attack, &mut skeleton));
        assert_eq!(controller.state(), PlayerState::Attack);
        assert_eq!(skeleton.current_clip(), Some("run_a"));
        assert_eq!(skeleton.plays, 1);
    }

    #[test]
    fn test_missing_prefix_keeps_current_clip() {
        let mut controller = PlayerController::with_resolver(
            ControllerConfig::default(),
            PrefixTable::new().with_prefix(PlayerState::Falling, "falldown"),
            ClipResolver::with_rng(StdRng::seed_from_u64(1)),
        );
        let mut skeleton = hero();
        controller.change_state(PlayerState::Falling, &mut skeleton);

        controller.change_state(PlayerState::Dead, &mut skeleton);
        assert_eq!(controller.state(), PlayerState::Dead);
        assert_eq!(skeleton.current_clip(), Some("falldown_a"));
    }

    #[test]
    fn test_facing_follows_input_sign() {
        let mut controller = controller();
        let mut body = FakeBody::default();
        let mut skeleton = hero();
        land(&mut controller);

        let mut input = FakeInput {
            horizontal: -0.3,
            jump: false,
        };
        controller.update(&input, &mut body, &mut skeleton);
        assert_eq!(skeleton.root_yaw(), FACING_LEFT_YAW);

        input.horizontal = 0.0;
        controller.update(&input, &mut body, &mut skeleton);
        assert_eq!(skeleton.root_yaw(), FACING_LEFT_YAW);

        input.horizontal = 0.7;
        controller.update(&input, &mut body, &mut skeleton);
        assert_eq!(skeleton.root_yaw(), FACING_RIGHT_YAW);
    }

    #[test]
    fn test_jump_only_when_grounded() {
        let mut controller = controller();
        let mut body = FakeBody::default();
        let mut skeleton = hero();
        let input = FakeInput {
            horizontal: 0.0,
            jump: true,
        };

        controller.update(&input, &mut body, &mut skeleton);
        assert!(body.impulses.is_empty());

        land(&mut controller);
        controller.update(&input, &mut body, &mut skeleton);
        assert_eq!(body.impulses, vec![Vec2::new(0.0, controller.config().jump_force)]);
    }

    #[test]
    fn test_ground_requires_volume_below() {
        let mut controller = controller();

        controller.on_trigger_stay("Ground", 5.0, 1.0);
        assert!(!controller.is_grounded());

        controller.on_trigger_stay("Ground", 1.0, 1.0);
        assert!(!controller.is_grounded());

        controller.on_trigger_stay("Ground", 0.5, 1.0);
        assert!(controller.is_grounded());
    }

    #[test]
    fn test_other_tags_are_ignored() {
        let mut controller = controller();
        controller.on_trigger_stay("Water", 0.0, 1.0);
        assert!(!controller.is_grounded());

        land(&mut controller);
        controller.on_trigger_exit("Water");
        assert!(controller.is_grounded());
    }

    #[test]
    fn test_any_ground_exit_clears_flag() {
        let mut controller = controller();
        land(&mut controller);
        controller.on_trigger_stay("Ground", -3.0, 1.0);

        controller.on_trigger_exit("Ground");
        assert!(!controller.is_grounded());
    }
}
