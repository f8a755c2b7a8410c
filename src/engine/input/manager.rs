// Input manager - Owns the binding tables and routes key events to commands

use super::binding::{BindingSet, BindingTable};
use super::config::{archive_bindings, load_bindings, ConfigFile, KeySection};
use super::defaults::{DefaultPreset, COMMON_BINDINGS};
use super::dispatch::{CommandSink, Dispatcher, InputEvent, KeyPress};
use super::keys::{config_code_for_name, name_keys};
use super::script::ScriptReader;
use super::BindError;
use crate::core::clock::{Clock, SystemClock};
use log::{debug, info, warn};

/// Which bindings are live for incoming events
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BindingContext {
    /// Normal play: regular and double-click bindings
    #[default]
    Game,
    /// Automap overlay: automap bindings, no double clicks
    Automap,
}

/// Main input manager that owns every binding table and the dispatcher
pub struct InputManager {
    bindings: BindingTable,
    double_bindings: BindingTable,
    automap_bindings: BindingTable,

    dispatcher: Dispatcher,

    /// Text entry is active; only keyboard keys reach the bindings
    chat_mode: bool,

    context: BindingContext,

    /// Layout applied by `bind_defaults`
    preset: DefaultPreset,
}

impl InputManager {
    /// Create an input manager with empty tables
    pub fn new() -> Self {
        Self::with_clock(SystemClock::new())
    }

    /// Create an input manager timing double clicks with `clock`
    pub fn with_clock(clock: impl Clock + 'static) -> Self {
        Self {
            bindings: BindingTable::new(),
            double_bindings: BindingTable::new(),
            automap_bindings: BindingTable::new(),
            dispatcher: Dispatcher::new(clock),
            chat_mode: false,
            context: BindingContext::Game,
            preset: DefaultPreset::default(),
        }
    }

    pub fn table(&self, set: BindingSet) -> &BindingTable {
        match set {
            BindingSet::Normal => &self.bindings,
            BindingSet::Double => &self.double_bindings,
            BindingSet::Automap => &self.automap_bindings,
        }
    }

    pub fn table_mut(&mut self, set: BindingSet) -> &mut BindingTable {
        match set {
            BindingSet::Normal => &mut self.bindings,
            BindingSet::Double => &mut self.double_bindings,
            BindingSet::Automap => &mut self.automap_bindings,
        }
    }

    pub fn chat_mode(&self) -> bool {
        self.chat_mode
    }

    pub fn set_chat_mode(&mut self, enabled: bool) {
        self.chat_mode = enabled;
    }

    pub fn context(&self) -> BindingContext {
        self.context
    }

    pub fn set_context(&mut self, context: BindingContext) {
        if self.context != context {
            debug!("Binding context switched to {:?}", context);
            self.context = context;
        }
    }

    pub fn preset(&self) -> DefaultPreset {
        self.preset
    }

    pub fn set_preset(&mut self, preset: DefaultPreset) {
        self.preset = preset;
    }

    /// Route an input event through the bindings of the current context.
    ///
    /// Returns whether a command was sent to `sink`; unconsumed events are
    /// free for other input handling.
    pub fn handle_event(&mut self, event: &InputEvent, sink: &mut dyn CommandSink) -> bool {
        let (binds, doublebinds) = match self.context {
            BindingContext::Game => (&self.bindings, Some(&self.double_bindings)),
            BindingContext::Automap => (&self.automap_bindings, None),
        };
        self.dispatcher
            .dispatch(event, binds, doublebinds, self.chat_mode, sink)
    }

    /// Forget pending double-click gestures, e.g. after losing focus
    pub fn reset_clicks(&mut self) {
        self.dispatcher.reset();
    }

    /// `bind`, `doublebind` and `mapbind`: list, show or set bindings
    pub fn bind(&mut self, set: BindingSet, args: &[&str]) -> Result<Vec<String>, BindError> {
        let result = self.table_mut(set).describe_or_show(args, set.label());
        match &result {
            Ok(lines) => lines.iter().for_each(|line| info!("{}", line)),
            Err(err) => warn!("{}", err),
        }
        result
    }

    /// `unbind`, `undoublebind` and `unmapbind`
    pub fn unbind(&mut self, set: BindingSet, name: &str) -> Result<(), BindError> {
        self.table_mut(set)
            .unbind(name)
            .map(|_| ())
            .inspect_err(|err| warn!("{}", err))
    }

    /// Clear all three tables
    pub fn unbind_all(&mut self) {
        for set in BindingSet::ALL {
            self.table_mut(set).clear_all();
        }
    }

    /// `defaultbind <key> <command>`: bind unless the key or the command is
    /// already taken
    pub fn default_bind(&mut self, args: &[&str]) -> Result<bool, BindError> {
        let [name, command, ..] = args else {
            let err = BindError::Usage("defaultbind <key> <command>");
            warn!("{}", err);
            return Err(err);
        };
        self.bindings
            .bind_default(name, command)
            .inspect_err(|err| warn!("{}", err))
    }

    /// `rebind <command>`: rebind the key whose binding invoked this command.
    ///
    /// A double-click origin rebinds the double-click binding.
    pub fn rebind(&mut self, origin: Option<KeyPress>, args: &[&str]) -> Result<(), BindError> {
        let origin = match origin {
            Some(origin) if !origin.code.is_none() => origin,
            _ => {
                warn!("{}", BindError::NoOriginKey);
                return Err(BindError::NoOriginKey);
            }
        };

        if let Some(command) = args.first() {
            let set = if origin.double_click {
                BindingSet::Double
            } else {
                BindingSet::Normal
            };
            self.table_mut(set).set_binding(origin.code, command);
        }
        Ok(())
    }

    /// Comma separated names of the keys bound to `command`
    pub fn describe_keys_for(&self, set: BindingSet, command: &str) -> String {
        name_keys(&self.table(set).find_all_keys_for_command(command))
    }

    /// Apply a binding script. Records with unknown keys are skipped; a
    /// truncated record aborts the script, keeping the records before it.
    ///
    /// Returns the number of bindings applied.
    pub fn load_script(&mut self, text: &str) -> Result<usize, BindError> {
        let mut applied = 0;

        for record in ScriptReader::new(text) {
            let record = record.inspect_err(|err| warn!("Binding script aborted: {}", err))?;
            match config_code_for_name(&record.key) {
                Some(code) => {
                    self.table_mut(record.target)
                        .set_binding(code, &record.command);
                    applied += 1;
                }
                None => warn!(
                    "Line {}: {}",
                    record.line,
                    BindError::UnknownKeyName(record.key)
                ),
            }
        }

        Ok(applied)
    }

    /// `binddefaults`: apply the common bindings, then the preset's
    pub fn bind_defaults(&mut self) -> Result<(), BindError> {
        self.load_script(COMMON_BINDINGS)?;
        self.load_script(self.preset.script())?;
        info!("Applied {:?} default bindings", self.preset);
        Ok(())
    }

    /// Replace every binding with the defaults
    pub fn set_default_bindings(&mut self) -> Result<(), BindError> {
        self.unbind_all();
        self.bind_defaults()
    }

    /// Write all bindings into `config` under `<game>.*` sections.
    ///
    /// Each custom section first takes the keys bound to its commands; the
    /// general sections then receive everything else.
    pub fn archive(&mut self, config: &mut ConfigFile, game: &str, custom: &[KeySection]) {
        for section in custom {
            let store = config.section_mut(&section.name);
            for command in &section.commands {
                archive_bindings(&mut self.bindings, &mut *store, Some(command.as_str()));
            }
        }

        for set in BindingSet::ALL {
            let name = section_name(game, set);
            let written = archive_bindings(self.table_mut(set), config.section_mut(&name), None);
            debug!("Archived {} bindings to [{}]", written, name);
        }
    }

    /// Read bindings from the `<game>.*` sections and any custom sections
    /// into the tables, on top of whatever is bound now.
    ///
    /// Returns false when the config holds no bindings section for `game`.
    pub fn load_config(&mut self, config: &ConfigFile, game: &str, custom: &[KeySection]) -> bool {
        let mut found = false;

        for set in BindingSet::ALL {
            if let Some(section) = config.section(&section_name(game, set)) {
                let applied = load_bindings(self.table_mut(set), section);
                debug!("Loaded {} bindings from [{}]", applied, section.name());
                found = true;
            }
        }

        for custom in custom {
            if let Some(section) = config.section(&custom.name) {
                load_bindings(&mut self.bindings, section);
            }
        }

        found
    }
}

impl Default for InputManager {
    fn default() -> Self {
        Self::new()
    }
}

fn section_name(game: &str, set: BindingSet) -> String {
    format!("{}.{}", game, set.section_suffix())
}
