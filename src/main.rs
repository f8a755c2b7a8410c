use anyhow::Result;
use log::{error, info, warn};
use std::path::{Path, PathBuf};
use winit::{
    event::{Event, WindowEvent},
    event_loop::EventLoop,
    window::WindowBuilder,
};

mod core;
mod engine;

use engine::input::{
    winit_adapter, BindingContext, ConfigFile, DispatchedCommand, InputEvent, InputManager,
};

const GAME_NAME: &str = "Game";
const DEFAULT_CONFIG_PATH: &str = "bindings.toml";

/// Config from `path`, or a fresh one when the file does not exist yet
fn load_config(path: &Path) -> Result<Option<ConfigFile>> {
    if !path.exists() {
        return Ok(None);
    }
    ConfigFile::load(path).map(Some)
}

fn save_config(input: &mut InputManager, config: &mut ConfigFile, path: &Path) -> Result<()> {
    input.archive(config, GAME_NAME, &[]);
    config.save(path)
}

/// Commands the demo handles itself; everything else is just logged
fn run_command(input: &mut InputManager, command: &DispatchedCommand) {
    match command.command.as_str() {
        "togglemap" => {
            let context = match input.context() {
                BindingContext::Game => BindingContext::Automap,
                BindingContext::Automap => BindingContext::Game,
            };
            info!("Switching to {:?} bindings", context);
            input.set_context(context);
        }
        "messagemode" => {
            info!("Chat mode on, press Escape to leave");
            input.set_chat_mode(true);
        }
        "menu_main" if input.chat_mode() => {
            info!("Chat mode off");
            input.set_chat_mode(false);
        }
        other => info!(
            "Command: {} (key {}, double click: {})",
            other, command.origin.code, command.origin.double_click
        ),
    }
}

fn handle_input(input: &mut InputManager, events: impl IntoIterator<Item = InputEvent>) {
    let mut commands = Vec::new();
    for event in events {
        input.handle_event(&event, &mut commands);
    }
    for command in &commands {
        run_command(input, command);
    }
}

fn main() -> Result<()> {
    // Initialize logger
    env_logger::Builder::from_default_env()
        .filter_level(log::LevelFilter::Info)
        .init();

    info!("Starting binding demo...");

    let config_path = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(DEFAULT_CONFIG_PATH));

    // Start from the defaults unless the config already has bindings
    let mut input = InputManager::new();
    let mut config = match load_config(&config_path)? {
        Some(config) => config,
        None => ConfigFile::new(),
    };
    if input.load_config(&config, GAME_NAME, &[]) {
        info!("Loaded bindings from {}", config_path.display());
    } else {
        info!("No saved bindings, using defaults");
        input.set_default_bindings()?;
    }

    // Create event loop and window
    let event_loop = EventLoop::new()?;
    let _window = WindowBuilder::new()
        .with_title("Binding Demo")
        .with_inner_size(winit::dpi::LogicalSize::new(640, 360))
        .build(&event_loop)?;

    info!("Window created successfully");

    // Main event loop
    event_loop
        .run(move |event, elwt| match event {
            Event::WindowEvent { event, .. } => match event {
                WindowEvent::CloseRequested => {
                    info!("Close requested, saving bindings to {}", config_path.display());
                    if let Err(e) = save_config(&mut input, &mut config, &config_path) {
                        error!("Failed to save bindings: {:#}", e);
                    }
                    elwt.exit();
                }
                WindowEvent::Focused(false) => {
                    input.reset_clicks();
                }
                WindowEvent::KeyboardInput { event, .. } => {
                    handle_input(&mut input, winit_adapter::key_event(&event));
                }
                WindowEvent::MouseInput { state, button, .. } => {
                    match winit_adapter::mouse_button_event(state, button) {
                        Some(event) => handle_input(&mut input, Some(event)),
                        None => warn!("Ignoring unbindable mouse button {:?}", button),
                    }
                }
                WindowEvent::MouseWheel { delta, .. } => {
                    handle_input(&mut input, winit_adapter::wheel_events(delta));
                }
                _ => {}
            },
            _ => {}
        })
        .map_err(|e| anyhow::anyhow!("Event loop error: {}", e))?;

    Ok(())
}
