// Input binding system
//
// This module maps physical input (keyboard, mouse, joystick and gamepad
// buttons) to console command strings, detects double clicks, and keeps the
// bindings in sync with the config file.
//
// ## Architecture
//
// - `keys`: Key code space, canonical key names and config-safe aliases
// - `binding`: Binding tables (one command per key code)
// - `click`: Per-key double-click timing
// - `dispatch`: Turns key events into commands for the command interpreter
// - `script`: Token stream and record reader for binding scripts
// - `defaults`: Built-in default binding scripts
// - `config`: Config store and archiving of binding tables
// - `manager`: Main input manager owning the tables and dispatcher
// - `winit_adapter`: Translation of winit events into raw input events
//
// ## Usage Example
//
// ```rust
// use engine::input::{InputManager, BindingSet, InputEvent, KeyCode};
//
// let mut input = InputManager::new();
// input.set_default_bindings()?;
// input.table_mut(BindingSet::Normal).set_binding(KeyCode::SPACE, "+jump");
//
// // In your event loop, hand every key event to the manager
// let mut commands = Vec::new();
// if input.handle_event(&InputEvent::key_down(KeyCode::SPACE), &mut commands) {
//     // commands[0].command == "+jump"
// }
//
// // On shutdown, write the bindings back
// input.archive(&mut config, "Game", &[]);
// ```

pub mod binding;
pub mod click;
pub mod config;
pub mod defaults;
pub mod dispatch;
pub mod keys;
pub mod manager;
pub mod script;
pub mod winit_adapter;

// Re-export commonly used types
pub use binding::{Binding, BindingSet, BindingTable};
pub use config::{ConfigFile, ConfigSection, ConfigStore, KeySection};
pub use defaults::DefaultPreset;
pub use dispatch::{CommandSink, DispatchedCommand, EventKind, InputEvent, KeyPress};
pub use keys::KeyCode;
pub use manager::{BindingContext, InputManager};

/// Binding errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindError {
    #[error("Unknown key \"{0}\"")]
    UnknownKeyName(String),

    #[error("Line {line}: expected {expected}")]
    MalformedRecord { line: usize, expected: &'static str },

    #[error("Rebind cannot be used from the console")]
    NoOriginKey,

    #[error("Usage: {0}")]
    Usage(&'static str),
}
