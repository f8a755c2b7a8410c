// Event dispatch: raw key events to bound command strings

use super::binding::BindingTable;
use super::click::{ClickDisambiguator, TableChoice};
use super::keys::KeyCode;
use crate::core::clock::Clock;
use log::debug;

/// Kind of raw input event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    KeyDown,
    KeyUp,
    /// Text input; never dispatched to bindings
    Char,
    MouseMove,
}

/// Raw input event as delivered by the platform layer.
///
/// `code` is unvalidated; events with codes outside the key range are
/// ignored by the dispatcher.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputEvent {
    pub kind: EventKind,
    pub code: u32,
}

impl InputEvent {
    pub fn new(kind: EventKind, code: u32) -> Self {
        Self { kind, code }
    }

    pub fn key_down(code: KeyCode) -> Self {
        Self::new(EventKind::KeyDown, code.raw() as u32)
    }

    pub fn key_up(code: KeyCode) -> Self {
        Self::new(EventKind::KeyUp, code.raw() as u32)
    }
}

/// The key that fired a command
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyPress {
    pub code: KeyCode,
    pub double_click: bool,
}

impl KeyPress {
    pub fn new(code: KeyCode, double_click: bool) -> Self {
        Self { code, double_click }
    }
}

/// A command ready for the command interpreter
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchedCommand {
    pub command: String,
    pub origin: KeyPress,
}

/// Receives dispatched commands. Implemented by the console / command
/// interpreter that actually executes them.
pub trait CommandSink {
    fn add_command(&mut self, command: &str, origin: KeyPress);
}

impl CommandSink for Vec<DispatchedCommand> {
    fn add_command(&mut self, command: &str, origin: KeyPress) {
        self.push(DispatchedCommand {
            command: command.to_string(),
            origin,
        });
    }
}

/// Turns key events into commands, tracking double clicks along the way
pub struct Dispatcher {
    clicks: ClickDisambiguator,
    clock: Box<dyn Clock>,
}

impl Dispatcher {
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clicks: ClickDisambiguator::new(),
            clock: Box::new(clock),
        }
    }

    /// Resolve an event against `binds`, and against `doublebinds` for
    /// double clicks. Without `doublebinds` every press is a single press.
    ///
    /// In chat mode only keyboard keys produce commands. Releases only
    /// produce a command for `+` bindings, with the `+` turned into `-`.
    pub fn resolve(
        &mut self,
        event: &InputEvent,
        binds: &BindingTable,
        doublebinds: Option<&BindingTable>,
        chat_mode: bool,
    ) -> Option<DispatchedCommand> {
        let pressed = match event.kind {
            EventKind::KeyDown => true,
            EventKind::KeyUp => false,
            _ => return None,
        };
        let code = KeyCode::new(event.code)?;

        let detect_double = doublebinds.is_some();
        let choice = if pressed {
            let now = self.clock.now_ms();
            self.clicks.key_down(code, now, detect_double)
        } else {
            self.clicks.key_up(code, detect_double)
        };

        let (mut binding, mut double_click) = match (choice, doublebinds) {
            (TableChoice::Double, Some(doublebinds)) => (doublebinds.binding(code), true),
            _ => (binds.binding(code), false),
        };

        // Nothing in the double-click table: the normal binding fires instead
        if binding.is_empty() {
            binding = binds.binding(code);
            double_click = false;
        }

        if !pressed && !binding.starts_with('+') {
            return None;
        }
        if binding.is_empty() || (chat_mode && !code.is_keyboard()) {
            return None;
        }

        let command = if pressed {
            binding.to_string()
        } else {
            format!("-{}", &binding[1..])
        };

        Some(DispatchedCommand {
            command,
            origin: KeyPress::new(code, double_click),
        })
    }

    /// Resolve an event and hand the command to `sink`.
    ///
    /// Returns whether the event produced a command.
    pub fn dispatch(
        &mut self,
        event: &InputEvent,
        binds: &BindingTable,
        doublebinds: Option<&BindingTable>,
        chat_mode: bool,
        sink: &mut dyn CommandSink,
    ) -> bool {
        match self.resolve(event, binds, doublebinds, chat_mode) {
            Some(dispatched) => {
                debug!(
                    "{} -> \"{}\"{}",
                    dispatched.origin.code,
                    dispatched.command,
                    if dispatched.origin.double_click { " (double click)" } else { "" }
                );
                sink.add_command(&dispatched.command, dispatched.origin);
                true
            }
            None => false,
        }
    }

    /// Click state, for inspection
    pub fn clicks(&self) -> &ClickDisambiguator {
        &self.clicks
    }

    /// Forget pending double-click gestures
    pub fn reset(&mut self) {
        self.clicks.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::clock::ManualClock;

    fn setup() -> (Dispatcher, ManualClock) {
        let clock = ManualClock::new(1000);
        (Dispatcher::new(clock.clone()), clock)
    }

    fn command(result: Option<DispatchedCommand>) -> Option<String> {
        result.map(|dispatched| dispatched.command)
    }

    #[test]
    fn test_key_down_fires_binding() {
        let (mut dispatcher, _) = setup();
        let binds = BindingTable::from_bindings([(KeyCode::TAB, "togglemap")]);

        let result = dispatcher.resolve(&InputEvent::key_down(KeyCode::TAB), &binds, None, false);
        assert_eq!(
            result,
            Some(DispatchedCommand {
                command: "togglemap".to_string(),
                origin: KeyPress::new(KeyCode::TAB, false),
            })
        );
    }

    #[test]
    fn test_unbound_key_is_not_consumed() {
        let (mut dispatcher, _) = setup();
        let binds = BindingTable::new();
        let mut sink = Vec::new();

        assert!(!dispatcher.dispatch(&InputEvent::key_down(KeyCode::TAB), &binds, None, false, &mut sink));
        assert!(sink.is_empty());
    }

    #[test]
    fn test_non_key_events_are_ignored() {
        let (mut dispatcher, _) = setup();
        let binds = BindingTable::from_bindings([(KeyCode::TAB, "togglemap")]);

        for kind in [EventKind::Char, EventKind::MouseMove] {
            let event = InputEvent::new(kind, KeyCode::TAB.raw() as u32);
            assert!(dispatcher.resolve(&event, &binds, None, false).is_none());
        }
    }

    #[test]
    fn test_out_of_range_code_is_ignored() {
        let (mut dispatcher, _) = setup();
        let binds = BindingTable::new();
        let event = InputEvent::new(EventKind::KeyDown, 100_000);
        assert!(dispatcher.resolve(&event, &binds, None, false).is_none());
    }

    #[test]
    fn test_release_of_plain_binding_emits_nothing() {
        let (mut dispatcher, _) = setup();
        let binds = BindingTable::from_bindings([(KeyCode::TAB, "togglemap")]);

        dispatcher.resolve(&InputEvent::key_down(KeyCode::TAB), &binds, None, false);
        assert!(dispatcher
            .resolve(&InputEvent::key_up(KeyCode::TAB), &binds, None, false)
            .is_none());
    }

    #[test]
    fn test_release_of_sticky_binding_emits_minus() {
        let (mut dispatcher, _) = setup();
        let binds = BindingTable::from_bindings([(KeyCode::UP_ARROW, "+move")]);

        assert_eq!(
            command(dispatcher.resolve(&InputEvent::key_down(KeyCode::UP_ARROW), &binds, None, false)),
            Some("+move".to_string())
        );
        assert_eq!(
            command(dispatcher.resolve(&InputEvent::key_up(KeyCode::UP_ARROW), &binds, None, false)),
            Some("-move".to_string())
        );
    }

    #[test]
    fn test_double_click_uses_double_table() {
        let (mut dispatcher, clock) = setup();
        let binds = BindingTable::from_bindings([(KeyCode::MOUSE1, "+attack")]);
        let doubles = BindingTable::from_bindings([(KeyCode::MOUSE1, "+altattack")]);
        let down = InputEvent::key_down(KeyCode::MOUSE1);
        let up = InputEvent::key_up(KeyCode::MOUSE1);

        let first = dispatcher.resolve(&down, &binds, Some(&doubles), false).unwrap();
        assert_eq!(first.command, "+attack");
        assert!(!first.origin.double_click);
        dispatcher.resolve(&up, &binds, Some(&doubles), false);

        clock.advance(100);
        let second = dispatcher.resolve(&down, &binds, Some(&doubles), false).unwrap();
        assert_eq!(second.command, "+altattack");
        assert!(second.origin.double_click);

        let release = dispatcher.resolve(&up, &binds, Some(&doubles), false).unwrap();
        assert_eq!(release.command, "-altattack");
        assert!(release.origin.double_click);
    }

    #[test]
    fn test_slow_second_press_is_single() {
        let (mut dispatcher, clock) = setup();
        let binds = BindingTable::from_bindings([(KeyCode::MOUSE1, "+attack")]);
        let doubles = BindingTable::from_bindings([(KeyCode::MOUSE1, "+altattack")]);
        let down = InputEvent::key_down(KeyCode::MOUSE1);

        dispatcher.resolve(&down, &binds, Some(&doubles), false);
        clock.advance(600);
        let second = dispatcher.resolve(&down, &binds, Some(&doubles), false).unwrap();
        assert_eq!(second.command, "+attack");
        assert!(!second.origin.double_click);
    }

    #[test]
    fn test_empty_double_binding_falls_back_to_normal() {
        let (mut dispatcher, clock) = setup();
        let binds = BindingTable::from_bindings([(KeyCode::SPACE, "+jump")]);
        let doubles = BindingTable::new();
        let down = InputEvent::key_down(KeyCode::SPACE);
        let up = InputEvent::key_up(KeyCode::SPACE);

        dispatcher.resolve(&down, &binds, Some(&doubles), false);
        dispatcher.resolve(&up, &binds, Some(&doubles), false);
        clock.advance(50);

        let second = dispatcher.resolve(&down, &binds, Some(&doubles), false).unwrap();
        assert_eq!(second.command, "+jump");
        assert!(!second.origin.double_click);

        let release = dispatcher.resolve(&up, &binds, Some(&doubles), false).unwrap();
        assert_eq!(release.command, "-jump");
        assert!(!release.origin.double_click);
    }

    #[test]
    fn test_double_only_binding() {
        let (mut dispatcher, clock) = setup();
        let binds = BindingTable::new();
        let doubles = BindingTable::from_bindings([(KeyCode::TAB, "am_togglefollow")]);
        let down = InputEvent::key_down(KeyCode::TAB);

        assert!(dispatcher.resolve(&down, &binds, Some(&doubles), false).is_none());
        clock.advance(100);
        let second = dispatcher.resolve(&down, &binds, Some(&doubles), false).unwrap();
        assert_eq!(second.command, "am_togglefollow");
        assert!(second.origin.double_click);
    }

    #[test]
    fn test_no_double_table_disables_detection() {
        let (mut dispatcher, clock) = setup();
        let binds = BindingTable::from_bindings([(KeyCode::MOUSE1, "+attack")]);
        let down = InputEvent::key_down(KeyCode::MOUSE1);

        dispatcher.resolve(&down, &binds, None, false);
        clock.advance(10);
        let second = dispatcher.resolve(&down, &binds, None, false).unwrap();
        assert!(!second.origin.double_click);
    }

    #[test]
    fn test_chat_mode_blocks_non_keyboard_keys() {
        let (mut dispatcher, _) = setup();
        let binds = BindingTable::from_bindings([(KeyCode::MOUSE1, "+attack"), (KeyCode::ESCAPE, "menu_main")]);

        assert!(dispatcher
            .resolve(&InputEvent::key_down(KeyCode::MOUSE1), &binds, None, true)
            .is_none());
        assert_eq!(
            command(dispatcher.resolve(&InputEvent::key_down(KeyCode::ESCAPE), &binds, None, true)),
            Some("menu_main".to_string())
        );
        assert!(dispatcher
            .resolve(&InputEvent::key_down(KeyCode::MOUSE1), &binds, None, false)
            .is_some());
    }

    #[test]
    fn test_dispatch_feeds_sink() {
        let (mut dispatcher, _) = setup();
        let binds = BindingTable::from_bindings([(KeyCode::SPACE, "+jump")]);
        let mut sink: Vec<DispatchedCommand> = Vec::new();

        assert!(dispatcher.dispatch(&InputEvent::key_down(KeyCode::SPACE), &binds, None, false, &mut sink));
        assert!(dispatcher.dispatch(&InputEvent::key_up(KeyCode::SPACE), &binds, None, false, &mut sink));

        let commands: Vec<&str> = sink.iter().map(|d| d.command.as_str()).collect();
        assert_eq!(commands, vec!["+jump", "-jump"]);
        assert!(sink.iter().all(|d| d.origin.code == KeyCode::SPACE));
    }
}
