// Binding persistence: config store and archiving of binding tables

use super::binding::{Binding, BindingTable};
use super::keys::{config_code_for_name, config_name_for_code};
use anyhow::{Context, Result};
use log::warn;
use serde::ser::{Serialize, SerializeMap, Serializer};
use serde::Deserialize;
use std::path::Path;

/// Key-value store that binding tables are written to and read from.
///
/// Keys are config-safe key names and compare case-insensitively.
pub trait ConfigStore {
    fn set_value_for_key(&mut self, key: &str, value: &str);

    /// Remove a key; returns whether it was present
    fn clear_key(&mut self, key: &str) -> bool;

    fn get_value(&self, key: &str) -> Option<&str>;

    /// All entries in insertion order
    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_>;
}

/// A named group of key-value entries
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSection {
    name: String,
    entries: Vec<(String, String)>,
}

impl ConfigSection {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn position(&self, key: &str) -> Option<usize> {
        self.entries
            .iter()
            .position(|(existing, _)| existing.eq_ignore_ascii_case(key))
    }
}

impl ConfigStore for ConfigSection {
    fn set_value_for_key(&mut self, key: &str, value: &str) {
        match self.position(key) {
            Some(index) => self.entries[index].1 = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    fn clear_key(&mut self, key: &str) -> bool {
        match self.position(key) {
            Some(index) => {
                self.entries.remove(index);
                true
            }
            None => false,
        }
    }

    fn get_value(&self, key: &str) -> Option<&str> {
        self.position(key).map(|index| self.entries[index].1.as_str())
    }

    fn entries(&self) -> Box<dyn Iterator<Item = (&str, &str)> + '_> {
        Box::new(
            self.entries
                .iter()
                .map(|(key, value)| (key.as_str(), value.as_str())),
        )
    }
}

/// Bindings config file: one TOML table of string values per section.
///
/// Sections keep their order; values are escaped by the TOML writer, so any
/// command text survives a save and reload unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(from = "toml::Table")]
pub struct ConfigFile {
    sections: Vec<ConfigSection>,
}

impl ConfigFile {
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse TOML config text. Entries outside a table and non-string
    /// values are skipped with a warning.
    pub fn parse(text: &str) -> Result<Self> {
        let config = toml::from_str(text).context("Invalid bindings config")?;
        Ok(config)
    }

    /// Render the config as TOML text
    pub fn to_toml_string(&self) -> Result<String> {
        let text = toml::to_string(self).context("Failed to serialize bindings config")?;
        Ok(text)
    }

    /// Read and parse a config file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&text)
    }

    /// Write the config to disk
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();
        std::fs::write(path, self.to_toml_string()?)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        Ok(())
    }

    fn section_index(&self, name: &str) -> Option<usize> {
        self.sections
            .iter()
            .position(|section| section.name.eq_ignore_ascii_case(name))
    }

    pub fn section(&self, name: &str) -> Option<&ConfigSection> {
        self.section_index(name).map(|index| &self.sections[index])
    }

    /// Get a section, creating it if missing
    pub fn section_mut(&mut self, name: &str) -> &mut ConfigSection {
        let index = match self.section_index(name) {
            Some(index) => index,
            None => {
                self.sections.push(ConfigSection::new(name));
                self.sections.len() - 1
            }
        };
        &mut self.sections[index]
    }

    pub fn sections(&self) -> impl Iterator<Item = &ConfigSection> {
        self.sections.iter()
    }
}

impl From<toml::Table> for ConfigFile {
    fn from(table: toml::Table) -> Self {
        let mut config = Self::new();

        for (name, value) in table {
            let toml::Value::Table(entries) = value else {
                warn!("Config key \"{}\" is outside any section", name);
                continue;
            };

            let section = config.section_mut(&name);
            for (key, value) in entries {
                match value {
                    toml::Value::String(command) => section.set_value_for_key(&key, &command),
                    other => warn!(
                        "Config key \"{}\" in [{}] is a {}, not a string",
                        key,
                        name,
                        other.type_str()
                    ),
                }
            }
        }

        config
    }
}

impl Serialize for ConfigSection {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (key, value) in &self.entries {
            map.serialize_entry(key, value)?;
        }
        map.end()
    }
}

impl Serialize for ConfigFile {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.sections.len()))?;
        for section in &self.sections {
            map.serialize_entry(&section.name, section)?;
        }
        map.end()
    }
}

/// Config section that collects the keys bound to a fixed set of commands,
/// separately from the general bindings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeySection {
    pub name: String,
    pub commands: Vec<String>,
}

impl KeySection {
    pub fn new(name: &str, commands: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            commands: commands.iter().map(|c| c.to_string()).collect(),
        }
    }
}

/// Write a binding table to a store.
///
/// With `match_command`, only keys bound to that command are written, and
/// they are marked so the following unfiltered pass leaves them out.
///
/// Without it, every bound key is written and every unbound key is removed
/// from the store, so the store follows unbinds without being cleared first.
/// Keys marked by an earlier filtered pass are skipped and reset to unbound.
///
/// Returns the number of entries written.
pub fn archive_bindings(
    table: &mut BindingTable,
    store: &mut dyn ConfigStore,
    match_command: Option<&str>,
) -> usize {
    let mut written = 0;

    for (code, slot) in table.slots_mut() {
        let key = config_name_for_code(code);

        let replacement = match (&*slot, match_command) {
            (Binding::Unbound, None) => {
                store.clear_key(&key);
                None
            }
            (Binding::PendingSuppressed, None) => Some(Binding::Unbound),
            (Binding::Bound(command), None) => {
                store.set_value_for_key(&key, command);
                written += 1;
                None
            }
            (Binding::Bound(command), Some(wanted)) if command.eq_ignore_ascii_case(wanted) => {
                store.set_value_for_key(&key, command);
                written += 1;
                Some(Binding::PendingSuppressed)
            }
            _ => None,
        };

        if let Some(replacement) = replacement {
            *slot = replacement;
        }
    }

    written
}

/// Read bindings from a store into a table. Later entries for the same key
/// win; entries whose key does not resolve are skipped.
///
/// Returns the number of bindings applied.
pub fn load_bindings(table: &mut BindingTable, store: &dyn ConfigStore) -> usize {
    let mut applied = 0;

    for (key, command) in store.entries() {
        match config_code_for_name(key) {
            Some(code) => {
                table.set_binding(code, command);
                applied += 1;
            }
            None => warn!("Unknown key \"{}\" in bindings config", key),
        }
    }

    applied
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::keys::{code_for_name, KeyCode};

    #[test]
    fn test_section_keys_are_case_insensitive() {
        let mut section = ConfigSection::new("Game.Bindings");
        section.set_value_for_key("Space", "+jump");
        section.set_value_for_key("space", "+use");

        assert_eq!(section.len(), 1);
        assert_eq!(section.get_value("SPACE"), Some("+use"));
        assert!(section.clear_key("Space"));
        assert!(!section.clear_key("Space"));
        assert!(section.is_empty());
    }

    #[test]
    fn test_parse_and_print() {
        let text = "# saved bindings\n[\"Game.Bindings\"]\nSpace = \"+jump\"\nLeftBracket = \"weapprev\"\n\n[\"Game.AutomapBindings\"]\nF = \"am_togglefollow\"\n";
        let config = ConfigFile::parse(text).unwrap();

        let bindings = config.section("game.bindings").unwrap();
        assert_eq!(bindings.get_value("Space"), Some("+jump"));
        assert_eq!(bindings.get_value("LeftBracket"), Some("weapprev"));
        assert_eq!(config.sections().count(), 2);

        // File order is kept for sections and keys
        let names: Vec<&str> = config.sections().map(|section| section.name()).collect();
        assert_eq!(names, vec!["Game.Bindings", "Game.AutomapBindings"]);
        let keys: Vec<&str> = bindings.entries().map(|(key, _)| key).collect();
        assert_eq!(keys, vec!["Space", "LeftBracket"]);

        let printed = config.to_toml_string().unwrap();
        assert_eq!(ConfigFile::parse(&printed).unwrap(), config);
    }

    #[test]
    fn test_values_survive_escaping() {
        let mut config = ConfigFile::new();
        let section = config.section_mut("Game.Bindings");
        section.set_value_for_key("Space", "say hi\n[\"Game.Bindings\"]\nTab = \"quit\"");
        section.set_value_for_key("Enter", "echo ");
        section.set_value_for_key("`", "say \"quoted\" \\ path");
        section.set_value_for_key("#57", "  padded");

        let printed = config.to_toml_string().unwrap();
        let reloaded = ConfigFile::parse(&printed).unwrap();

        assert_eq!(reloaded, config);
        let bindings = reloaded.section("Game.Bindings").unwrap();
        assert_eq!(bindings.len(), 4);
        assert_eq!(bindings.get_value("Tab"), None);
        assert_eq!(bindings.get_value("Enter"), Some("echo "));
    }

    #[test]
    fn test_parse_skips_stray_entries() {
        let config = ConfigFile::parse("orphan = \"1\"\n[S]\ncount = 3\nkey = \"value=with=equals\"\n").unwrap();
        assert!(config.section("orphan").is_none());
        let section = config.section("S").unwrap();
        assert_eq!(section.len(), 1);
        assert_eq!(section.get_value("key"), Some("value=with=equals"));
    }

    #[test]
    fn test_parse_rejects_invalid_toml() {
        assert!(ConfigFile::parse("[Game.Bindings\nSpace = +jump").is_err());
        assert!(ConfigFile::parse("[S]\na = \"1\"\na = \"2\"\n").is_err());
    }

    #[test]
    fn test_empty_sections_are_kept() {
        let mut config = ConfigFile::new();
        config.section_mut("Game.DoubleBindings");
        let reloaded = ConfigFile::parse(&config.to_toml_string().unwrap()).unwrap();
        assert!(reloaded.section("Game.DoubleBindings").unwrap().is_empty());
    }

    #[test]
    fn test_save_and_load() {
        let path = std::env::temp_dir().join("rusted_binds_config_test.toml");
        let mut config = ConfigFile::new();
        config.section_mut("Game.Bindings").set_value_for_key("Tab", "togglemap");

        config.save(&path).unwrap();
        let loaded = ConfigFile::load(&path).unwrap();
        assert_eq!(loaded, config);

        let _ = std::fs::remove_file(path);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(ConfigFile::load("/nonexistent/bindings.toml").is_err());
    }

    #[test]
    fn test_archive_uses_config_safe_names() {
        let left_bracket = code_for_name("[").unwrap();
        let mut table = BindingTable::from_bindings([(left_bracket, "weapprev"), (KeyCode::SPACE, "+jump")]);
        let mut section = ConfigSection::new("Game.Bindings");

        assert_eq!(archive_bindings(&mut table, &mut section, None), 2);
        assert_eq!(section.get_value("LeftBracket"), Some("weapprev"));
        assert_eq!(section.get_value("Space"), Some("+jump"));
        assert_eq!(section.get_value("["), None);
    }

    #[test]
    fn test_archive_removes_unbound_keys() {
        let mut table = BindingTable::from_bindings([(KeyCode::SPACE, "+jump")]);
        let mut section = ConfigSection::new("Game.Bindings");
        section.set_value_for_key("Tab", "togglemap");
        section.set_value_for_key("Unrelated", "kept");

        archive_bindings(&mut table, &mut section, None);

        assert_eq!(section.get_value("Tab"), None);
        assert_eq!(section.get_value("Space"), Some("+jump"));
        // Names that are not keys are left alone
        assert_eq!(section.get_value("Unrelated"), Some("kept"));
    }

    #[test]
    fn test_archive_round_trip() {
        let mut table = BindingTable::from_bindings([(KeyCode::SPACE, "jump")]);
        let mut section = ConfigSection::new("Game.Bindings");
        archive_bindings(&mut table, &mut section, None);

        let mut reloaded = BindingTable::new();
        assert_eq!(load_bindings(&mut reloaded, &section), 1);
        assert_eq!(reloaded.binding(KeyCode::SPACE), "jump");
    }

    #[test]
    fn test_filtered_archive_suppresses_general_pass() {
        let mut table = BindingTable::from_bindings([(KeyCode::SPACE, "jump"), (KeyCode::TAB, "togglemap")]);
        let mut custom = ConfigSection::new("Game.CustomBindings");
        let mut general = ConfigSection::new("Game.Bindings");

        assert_eq!(archive_bindings(&mut table, &mut custom, Some("JUMP")), 1);
        assert_eq!(custom.get_value("Space"), Some("jump"));
        assert_eq!(custom.len(), 1);
        assert_eq!(table.slot(KeyCode::SPACE), &Binding::PendingSuppressed);

        archive_bindings(&mut table, &mut general, None);
        assert_eq!(general.get_value("Space"), None);
        assert_eq!(general.get_value("Tab"), Some("togglemap"));
        assert_eq!(table.slot(KeyCode::SPACE), &Binding::Unbound);

        archive_bindings(&mut table, &mut general, None);
        assert!(!table.is_bound(KeyCode::SPACE));
        assert_eq!(general.get_value("Space"), None);
        assert_eq!(custom.get_value("Space"), Some("jump"));
    }

    #[test]
    fn test_filtered_archive_leaves_markers_for_other_commands() {
        let mut table = BindingTable::from_bindings([(KeyCode::SPACE, "jump"), (KeyCode::TAB, "togglemap")]);
        let mut first = ConfigSection::new("First");
        let mut second = ConfigSection::new("Second");

        archive_bindings(&mut table, &mut first, Some("jump"));
        archive_bindings(&mut table, &mut second, Some("togglemap"));

        assert_eq!(table.slot(KeyCode::SPACE), &Binding::PendingSuppressed);
        assert_eq!(table.slot(KeyCode::TAB), &Binding::PendingSuppressed);
        assert_eq!(second.get_value("Space"), None);
    }

    #[test]
    fn test_load_later_entries_win_and_unknown_skipped() {
        let mut section = ConfigSection::new("Game.Bindings");
        section.set_value_for_key("Space", "+jump");
        section.set_value_for_key("Bogus", "nothing");
        section.set_value_for_key("#57", "+use");
        section.set_value_for_key("Equals", "sizeup");

        let mut table = BindingTable::new();
        assert_eq!(load_bindings(&mut table, &section), 3);
        assert_eq!(table.binding(KeyCode::SPACE), "+use");
        assert_eq!(table.binding(code_for_name("=").unwrap()), "sizeup");
    }
}
