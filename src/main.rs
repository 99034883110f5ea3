use anyhow::Result;
use log::{debug, info};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    keyboard::{KeyCode, PhysicalKey},
    window::WindowBuilder,
};

mod core;
mod engine;
mod game;

use engine::game_loop::GameLoop;
use engine::input::InputManager;
use engine::physics::PhysicsWorld;
use game::characters::CharacterManager;
use game::scene;

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting Spine Platformer...");

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let window = WindowBuilder::new()
        .with_title("Spine Platformer")
        .with_inner_size(winit::dpi::LogicalSize::new(1280, 720))
        .with_resizable(true)
        .build(&event_loop)?;

    info!("Window created successfully");

    let mut physics = PhysicsWorld::new();
    let mut characters = CharacterManager::new();
    let hero = scene::build_demo_scene(&mut physics, &mut characters);
    let mut input = InputManager::default();
    let mut game_loop = GameLoop::new();
    let dt = game_loop.fixed_timestep();
    physics.set_timestep(dt);

    info!("Controls: A/D or arrows to move, Space to jump, P to pause");

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent {
                event: WindowEvent::CloseRequested,
                ..
            } => {
                info!("Close requested, shutting down...");
                elwt.exit();
            }
            Event::WindowEvent {
                event: WindowEvent::Focused(false),
                ..
            } => {
                // Keys released while unfocused never reach us
                input.reset();
            }
            Event::WindowEvent {
                event: WindowEvent::KeyboardInput { event, .. },
                ..
            } => {
                if event.physical_key == PhysicalKey::Code(KeyCode::KeyP)
                    && event.state.is_pressed()
                    && !event.repeat
                {
                    game_loop.toggle_pause();
                }
                input.process_keyboard_event(&event);
            }
            Event::WindowEvent {
                event: WindowEvent::RedrawRequested,
                ..
            } => {
                for _ in 0..game_loop.begin_frame() {
                    input.begin_frame(dt);
                    characters.update(&mut physics, &input);
                    physics.step();
                    characters.handle_trigger_events(&physics);
                    input.end_frame();
                }

                if game_loop.is_paused() {
                    return;
                }
                if let Some(character) = characters.get(hero) {
                    debug!(
                        "tick {} {:?} grounded={} flipped={} clip={:?} candidates={:?}",
                        game_loop.tick_count(),
                        character.state(),
                        character.controller.is_grounded(),
                        character.is_flipped(),
                        character.current_clip(),
                        character.controller.matched_clips()
                    );
                }
            }
            Event::AboutToWait => {
                // Request redraw on next frame
                window.request_redraw();
            }
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
