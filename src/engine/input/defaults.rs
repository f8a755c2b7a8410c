// Built-in default bindings

/// Bindings shared by every preset
pub const COMMON_BINDINGS: &str = r#"
// Menus and system
bind Escape menu_main
bind F1 menu_help
bind F2 menu_save
bind F3 menu_load
bind F4 menu_options
bind F5 menu_display
bind F6 quicksave
bind F7 menu_endgame
bind F8 togglemessages
bind F9 quickload
bind F10 menu_quit
bind F11 bumpgamma
bind F12 spynext
bind SysRq screenshot
bind Pause pause
bind ` toggleconsole
bind Tab togglemap
bind T messagemode
bind - sizedown
bind = sizeup

// Weapons
bind 1 "slot 1"
bind 2 "slot 2"
bind 3 "slot 3"
bind 4 "slot 4"
bind 5 "slot 5"
bind 6 "slot 6"
bind 7 "slot 7"
bind 8 "slot 8"
bind 9 "slot 9"
bind 0 "slot 0"
bind [ invprev
bind ] invnext
bind Enter invuse
bind MWheelUp weapprev
bind MWheelDown weapnext

// Gamepad
bind Pad_A +use
bind Pad_B +crouch
bind Pad_X +reload
bind Pad_Y +jump
bind RTrigger +attack
bind LTrigger +altattack
bind LShoulder weapprev
bind RShoulder weapnext
bind Pad_Start menu_main
bind Pad_Back togglemap
bind DPadUp invuse
bind DPadLeft invprev
bind DPadRight invnext

// Automap
mapbind F am_togglefollow
mapbind G am_togglegrid
mapbind P am_toggletexture
mapbind M am_setmark
mapbind C am_clearmarks
mapbind 0 am_gobig
mapbind KP- +am_zoomout
mapbind KP+ +am_zoomin
mapbind - +am_zoomout
mapbind = +am_zoomin
mapbind MWheelUp "am_zoom 1.2"
mapbind MWheelDown "am_zoom -1.2"
"#;

const CLASSIC_BINDINGS: &str = r#"
bind UpArrow +forward
bind DownArrow +back
bind LeftArrow +left
bind RightArrow +right
bind LCtrl +attack
bind RCtrl +attack
bind LAlt +strafe
bind RAlt +strafe
bind LShift +speed
bind RShift +speed
bind Space +use
bind , +moveleft
bind . +moveright
bind Mouse1 +attack
bind Mouse2 +strafe
bind Mouse3 +forward
"#;

const MODERN_BINDINGS: &str = r#"
bind W +forward
bind S +back
bind A +moveleft
bind D +moveright
bind UpArrow +forward
bind DownArrow +back
bind LeftArrow +left
bind RightArrow +right
bind Mouse1 +attack
bind Mouse2 +altattack
bind E +use
bind Space +jump
bind C +crouch
bind R +reload
bind LShift +speed
bind Q "weapon next"
doublebind E +user1
"#;

const LEFT_HANDED_BINDINGS: &str = r#"
bind KP8 +forward
bind KP5 +back
bind KP4 +moveleft
bind KP6 +moveright
bind KP7 +left
bind KP9 +right
bind KP0 +use
bind KP-Enter +jump
bind KP. +crouch
bind Mouse1 +attack
bind Mouse2 +altattack
bind RShift +speed
bind RCtrl +reload
"#;

const ARROW_BINDINGS: &str = r#"
bind UpArrow +forward
bind DownArrow +back
bind LeftArrow +moveleft
bind RightArrow +moveright
bind Mouse1 +attack
bind Mouse2 +altattack
bind RCtrl +use
bind Ins +jump
bind Del +crouch
bind RShift +speed
bind PgUp +lookup
bind PgDn +lookdown
bind End centerview
"#;

/// Default control layouts; the chosen preset runs after the common bindings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DefaultPreset {
    Classic,
    #[default]
    Modern,
    LeftHanded,
    Arrows,
}

impl DefaultPreset {
    /// Preset stored under a numeric setting; unknown values fall back to
    /// the default preset
    pub fn from_index(index: i32) -> Self {
        match index {
            0 => DefaultPreset::Classic,
            2 => DefaultPreset::LeftHanded,
            3 => DefaultPreset::Arrows,
            _ => DefaultPreset::Modern,
        }
    }

    pub fn index(self) -> i32 {
        match self {
            DefaultPreset::Classic => 0,
            DefaultPreset::Modern => 1,
            DefaultPreset::LeftHanded => 2,
            DefaultPreset::Arrows => 3,
        }
    }

    /// Binding script for this preset
    pub fn script(self) -> &'static str {
        match self {
            DefaultPreset::Classic => CLASSIC_BINDINGS,
            DefaultPreset::Modern => MODERN_BINDINGS,
            DefaultPreset::LeftHanded => LEFT_HANDED_BINDINGS,
            DefaultPreset::Arrows => ARROW_BINDINGS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::input::keys::config_code_for_name;
    use crate::engine::input::script::ScriptReader;
    use std::collections::HashSet;

    const ALL_PRESETS: [DefaultPreset; 4] = [
        DefaultPreset::Classic,
        DefaultPreset::Modern,
        DefaultPreset::LeftHanded,
        DefaultPreset::Arrows,
    ];

    fn assert_script_valid(script: &str) {
        for record in ScriptReader::new(script) {
            let record = record.expect("default script should parse");
            assert!(
                config_code_for_name(&record.key).is_some(),
                "unknown key {} on line {}",
                record.key,
                record.line
            );
        }
    }

    #[test]
    fn test_common_bindings_parse() {
        assert_script_valid(COMMON_BINDINGS);
    }

    #[test]
    fn test_presets_parse() {
        for preset in ALL_PRESETS {
            assert_script_valid(preset.script());
        }
    }

    #[test]
    fn test_preset_index_round_trip() {
        for preset in ALL_PRESETS {
            assert_eq!(DefaultPreset::from_index(preset.index()), preset);
        }
        assert_eq!(DefaultPreset::from_index(42), DefaultPreset::Modern);
    }

    #[test]
    fn test_no_duplicate_keys_in_presets() {
        for preset in ALL_PRESETS {
            let mut seen = HashSet::new();
            for record in ScriptReader::new(preset.script()) {
                let record = record.unwrap();
                assert!(
                    seen.insert((record.target, record.key.to_ascii_lowercase())),
                    "Duplicate key {} in {:?}",
                    record.key,
                    preset
                );
            }
        }
    }
}
