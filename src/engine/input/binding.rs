// Binding tables: one command string per key code

use super::keys::{code_for_name, KeyCode, NUM_KEYS};
use super::BindError;

/// Which of the binding tables an operation targets
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BindingSet {
    /// Regular presses
    Normal,
    /// Second press inside the double-click window
    Double,
    /// Automap overlay
    Automap,
}

impl BindingSet {
    pub const ALL: [BindingSet; 3] = [BindingSet::Normal, BindingSet::Double, BindingSet::Automap];

    /// Console command / script keyword that targets this table
    pub fn keyword(self) -> &'static str {
        match self {
            BindingSet::Normal => "bind",
            BindingSet::Double => "doublebind",
            BindingSet::Automap => "mapbind",
        }
    }

    pub fn from_keyword(word: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|set| set.keyword().eq_ignore_ascii_case(word))
    }

    /// Heading used when listing the table
    pub fn label(self) -> &'static str {
        match self {
            BindingSet::Normal => "Current key bindings",
            BindingSet::Double => "Current key doublebindings",
            BindingSet::Automap => "Current automap key bindings",
        }
    }

    /// Suffix of the config section holding this table
    pub fn section_suffix(self) -> &'static str {
        match self {
            BindingSet::Normal => "Bindings",
            BindingSet::Double => "DoubleBindings",
            BindingSet::Automap => "AutomapBindings",
        }
    }
}

/// State of a single key slot
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Binding {
    #[default]
    Unbound,

    /// Key runs this command (never empty)
    Bound(String),

    /// Already written to a custom config section during the current save.
    /// Reads as unbound; the next unfiltered archive pass resets it.
    PendingSuppressed,
}

impl Binding {
    /// The bound command, if any
    pub fn command(&self) -> Option<&str> {
        match self {
            Binding::Bound(command) => Some(command.as_str()),
            _ => None,
        }
    }
}

/// Maps every key code to a command string.
///
/// Several independent tables exist side by side (normal, double-click,
/// automap); none of them share slots.
#[derive(Debug, Clone)]
pub struct BindingTable {
    slots: Vec<Binding>,
}

impl BindingTable {
    /// Create a table with every key unbound
    pub fn new() -> Self {
        Self {
            slots: vec![Binding::Unbound; NUM_KEYS],
        }
    }

    /// Create a table from a list of bindings
    pub fn from_bindings<'a>(bindings: impl IntoIterator<Item = (KeyCode, &'a str)>) -> Self {
        let mut table = Self::new();
        for (code, command) in bindings {
            table.set_binding(code, command);
        }
        table
    }

    /// Command bound to a key; empty when unbound
    pub fn binding(&self, code: KeyCode) -> &str {
        self.slots[code.index()].command().unwrap_or("")
    }

    /// Raw slot state, including the save-time suppression marker
    pub fn slot(&self, code: KeyCode) -> &Binding {
        &self.slots[code.index()]
    }

    /// Check if a key has a command
    pub fn is_bound(&self, code: KeyCode) -> bool {
        self.slots[code.index()].command().is_some()
    }

    /// Overwrite a key's binding. An empty command unbinds.
    pub fn set_binding(&mut self, code: KeyCode, command: &str) {
        self.slots[code.index()] = if command.is_empty() {
            Binding::Unbound
        } else {
            Binding::Bound(command.to_string())
        };
    }

    /// Unbind a single key
    pub fn unbind_key(&mut self, code: KeyCode) {
        self.slots[code.index()] = Binding::Unbound;
    }

    /// Clear all bindings
    pub fn clear_all(&mut self) {
        self.slots.fill(Binding::Unbound);
    }

    /// Unbind a key by name
    pub fn unbind(&mut self, name: &str) -> Result<KeyCode, BindError> {
        let code = resolve(name)?;
        self.unbind_key(code);
        Ok(code)
    }

    /// Unbind every key whose command matches, ignoring case
    pub fn unbind_command(&mut self, command: &str) {
        for slot in &mut self.slots {
            if matches_command(slot, command) {
                *slot = Binding::Unbound;
            }
        }
    }

    /// Bind `command` to `name` unless the key already has a binding or the
    /// command is already reachable from another key.
    ///
    /// Returns whether the binding was made.
    pub fn bind_default(&mut self, name: &str, command: &str) -> Result<bool, BindError> {
        let code = resolve(name)?;

        // A slot held by a pending save counts as taken
        if !matches!(self.slots[code.index()], Binding::Unbound) {
            return Ok(false);
        }
        if self.slots.iter().any(|slot| matches_command(slot, command)) {
            return Ok(false);
        }

        self.set_binding(code, command);
        Ok(true)
    }

    /// First two keys bound to `command`, in key code order
    pub fn find_keys_for_command(&self, command: &str) -> (Option<KeyCode>, Option<KeyCode>) {
        let mut found = self.keys_for_command(command);
        (found.next(), found.next())
    }

    /// All keys bound to `command`, in key code order
    pub fn find_all_keys_for_command(&self, command: &str) -> Vec<KeyCode> {
        self.keys_for_command(command).collect()
    }

    fn keys_for_command<'a>(&'a self, command: &'a str) -> impl Iterator<Item = KeyCode> + 'a {
        KeyCode::all()
            .zip(&self.slots)
            .filter(move |(_, slot)| matches_command(slot, command))
            .map(|(code, _)| code)
    }

    /// Iterate over every bound key in key code order
    pub fn iter_bound(&self) -> impl Iterator<Item = (KeyCode, &str)> {
        KeyCode::all()
            .zip(&self.slots)
            .filter_map(|(code, slot)| slot.command().map(|command| (code, command)))
    }

    /// Number of bound keys
    pub fn bound_count(&self) -> usize {
        self.iter_bound().count()
    }

    /// Console-style bind command.
    ///
    /// With no arguments, lists every binding under `label`. With a key name,
    /// shows that key's binding. With a key name and a command, binds it.
    /// Returns the lines to display.
    pub fn describe_or_show(&mut self, args: &[&str], label: &str) -> Result<Vec<String>, BindError> {
        let Some(&name) = args.first() else {
            let mut lines = vec![format!("{}:", label)];
            lines.extend(
                self.iter_bound()
                    .map(|(code, command)| format!("{} \"{}\"", code, command)),
            );
            return Ok(lines);
        };

        let code = resolve(name)?;
        match args.get(1) {
            None => Ok(vec![format!("\"{}\" = \"{}\"", name, self.binding(code))]),
            Some(command) => {
                self.set_binding(code, command);
                Ok(Vec::new())
            }
        }
    }

    pub(crate) fn slots_mut(&mut self) -> impl Iterator<Item = (KeyCode, &mut Binding)> {
        KeyCode::all().zip(self.slots.iter_mut())
    }
}

impl Default for BindingTable {
    fn default() -> Self {
        Self::new()
    }
}

fn resolve(name: &str) -> Result<KeyCode, BindError> {
    code_for_name(name).ok_or_else(|| BindError::UnknownKeyName(name.to_string()))
}

pub(crate) fn matches_command(slot: &Binding, command: &str) -> bool {
    slot.command()
        .is_some_and(|bound| bound.eq_ignore_ascii_case(command))
}
