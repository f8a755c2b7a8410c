// Key code registry: canonical key names and config-safe aliases
//
// Key codes share one flat space. Codes below 256 are keyboard scan codes
// (DirectInput layout, qwerty assumed); above that come mouse buttons,
// joystick buttons, POV hats, the mouse wheel, joystick axes and gamepads.

use std::borrow::Cow;
use std::fmt;

/// Number of keyboard scan codes; also the range that stays live in chat mode
pub const NUM_KEYBOARD_KEYS: usize = 256;

/// Total number of bindable key codes
pub const NUM_KEYS: usize = NUM_KEYBOARD_KEYS + BUTTON_NAMES.len();

/// Prefix of the names synthesized for codes without a table entry
const SYNTHETIC_PREFIX: &str = "Key_";

/// Single-character names that cannot be used as config keys, and the alias
/// written in their place
const CONFIG_ALIASES: [(&str, &str); 4] = [
    ("[", "LeftBracket"),
    ("]", "RightBracket"),
    ("=", "Equals"),
    ("KP=", "KP-Equals"),
];

/// Identifier of a bindable key, mouse button or controller button.
///
/// Always inside `0..NUM_KEYS`. Code 0 is reserved to mean "no key".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct KeyCode(u16);

impl KeyCode {
    pub const NONE: KeyCode = KeyCode(0);
    pub const ESCAPE: KeyCode = KeyCode(0x01);
    pub const TAB: KeyCode = KeyCode(0x0f);
    pub const ENTER: KeyCode = KeyCode(0x1c);
    pub const SPACE: KeyCode = KeyCode(0x39);
    pub const UP_ARROW: KeyCode = KeyCode(0xc8);
    pub const LEFT_ARROW: KeyCode = KeyCode(0xcb);
    pub const RIGHT_ARROW: KeyCode = KeyCode(0xcd);
    pub const DOWN_ARROW: KeyCode = KeyCode(0xd0);
    pub const MOUSE1: KeyCode = KeyCode(0x100);
    pub const MOUSE2: KeyCode = KeyCode(0x101);
    pub const MOUSE3: KeyCode = KeyCode(0x102);
    pub const MOUSE4: KeyCode = KeyCode(0x103);
    pub const MOUSE5: KeyCode = KeyCode(0x104);
    pub const JOY1: KeyCode = KeyCode(0x108);
    pub const MWHEEL_UP: KeyCode = KeyCode(0x198);
    pub const MWHEEL_DOWN: KeyCode = KeyCode(0x199);
    pub const MWHEEL_RIGHT: KeyCode = KeyCode(0x19a);
    pub const MWHEEL_LEFT: KeyCode = KeyCode(0x19b);

    /// Validate a raw code coming from outside the registry
    pub fn new(raw: u32) -> Option<Self> {
        if (raw as usize) < NUM_KEYS {
            Some(Self(raw as u16))
        } else {
            None
        }
    }

    pub fn raw(self) -> u16 {
        self.0
    }

    /// Slot index into per-key tables
    pub fn index(self) -> usize {
        self.0 as usize
    }

    pub fn is_none(self) -> bool {
        self.0 == 0
    }

    /// Whether this code is a keyboard scan code
    pub fn is_keyboard(self) -> bool {
        self.index() < NUM_KEYBOARD_KEYS
    }

    /// Every code in ascending order, including `NONE`
    pub fn all() -> impl Iterator<Item = KeyCode> {
        (0..NUM_KEYS as u16).map(KeyCode)
    }

    pub fn name(self) -> Cow<'static, str> {
        name_for_code(self)
    }

    pub fn config_name(self) -> Cow<'static, str> {
        config_name_for_code(self)
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

fn table_name(code: KeyCode) -> Option<&'static str> {
    let index = code.index();
    if index < NUM_KEYBOARD_KEYS {
        KEYBOARD_NAMES[index]
    } else {
        BUTTON_NAMES.get(index - NUM_KEYBOARD_KEYS).copied()
    }
}

/// Canonical name of a key, or a synthesized `Key_<code>` when the table
/// has none
pub fn name_for_code(code: KeyCode) -> Cow<'static, str> {
    match table_name(code) {
        Some(name) => Cow::Borrowed(name),
        None => Cow::Owned(format!("{}{}", SYNTHETIC_PREFIX, code.raw())),
    }
}

/// Resolve a key name, ignoring case.
///
/// `#<digits>` is taken as a literal key code. Synthesized `Key_<code>` names
/// resolve back to their code. Returns `None` when nothing matches or the
/// result would be the reserved no-key code.
pub fn code_for_name(name: &str) -> Option<KeyCode> {
    if let Some(digits) = name.strip_prefix('#') {
        if !digits.is_empty() {
            return literal_code(digits);
        }
    }

    if let Some(code) = KeyCode::all().find(|&code| {
        table_name(code).is_some_and(|candidate| candidate.eq_ignore_ascii_case(name))
    }) {
        return Some(code);
    }

    synthetic_code(name)
}

/// Leading decimal digits as a key code; trailing junk is ignored
fn literal_code(text: &str) -> Option<KeyCode> {
    let end = text
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(text.len());
    let raw: u32 = text[..end].parse().ok()?;
    KeyCode::new(raw).filter(|code| !code.is_none())
}

fn synthetic_code(name: &str) -> Option<KeyCode> {
    let prefix = name.get(..SYNTHETIC_PREFIX.len())?;
    if !prefix.eq_ignore_ascii_case(SYNTHETIC_PREFIX) {
        return None;
    }
    let digits = &name[SYNTHETIC_PREFIX.len()..];
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let code = KeyCode::new(digits.parse().ok()?)?;
    // Only codes that really are anonymous carry a synthetic name
    (table_name(code).is_none() && !code.is_none()).then_some(code)
}

/// Key name safe for use as a config file key
pub fn config_name_for_code(code: KeyCode) -> Cow<'static, str> {
    let name = name_for_code(code);
    for (unsafe_name, alias) in CONFIG_ALIASES {
        if name == unsafe_name {
            return Cow::Borrowed(alias);
        }
    }
    name
}

/// Inverse of [`config_name_for_code`]: plain names first, then the aliases
pub fn config_code_for_name(name: &str) -> Option<KeyCode> {
    code_for_name(name).or_else(|| {
        CONFIG_ALIASES
            .iter()
            .find(|(_, alias)| alias.eq_ignore_ascii_case(name))
            .and_then(|(unsafe_name, _)| code_for_name(unsafe_name))
    })
}

/// Comma separated names of the distinct, non-zero keys in `keys`
pub fn name_keys(keys: &[KeyCode]) -> String {
    let mut seen: Vec<KeyCode> = Vec::with_capacity(keys.len());
    for &key in keys {
        if !key.is_none() && !seen.contains(&key) {
            seen.push(key);
        }
    }
    seen.iter()
        .map(|key| key.name())
        .collect::<Vec<_>>()
        .join(", ")
}

const KEYBOARD_NAMES: [Option<&str>; 256] = [
    None, Some("Escape"), Some("1"), Some("2"), Some("3"), Some("4"), Some("5"), Some("6"),
    Some("7"), Some("8"), Some("9"), Some("0"), Some("-"), Some("="), Some("Backspace"), Some("Tab"),
    Some("Q"), Some("W"), Some("E"), Some("R"), Some("T"), Some("Y"), Some("U"), Some("I"),
    Some("O"), Some("P"), Some("["), Some("]"), Some("Enter"), Some("LCtrl"), Some("A"), Some("S"),
    Some("D"), Some("F"), Some("G"), Some("H"), Some("J"), Some("K"), Some("L"), Some(";"),
    Some("'"), Some("`"), Some("LShift"), Some("\\"), Some("Z"), Some("X"), Some("C"), Some("V"),
    Some("B"), Some("N"), Some("M"), Some(","), Some("."), Some("/"), Some("RShift"), Some("KP*"),
    Some("LAlt"), Some("Space"), Some("CapsLock"), Some("F1"), Some("F2"), Some("F3"), Some("F4"), Some("F5"),
    Some("F6"), Some("F7"), Some("F8"), Some("F9"), Some("F10"), Some("NumLock"), Some("Scroll"), Some("KP7"),
    Some("KP8"), Some("KP9"), Some("KP-"), Some("KP4"), Some("KP5"), Some("KP6"), Some("KP+"), Some("KP1"),
    Some("KP2"), Some("KP3"), Some("KP0"), Some("KP."), None, None, Some("OEM102"), Some("F11"),
    Some("F12"), None, None, None, None, None, None, None,
    None, None, None, None, Some("F13"), Some("F14"), Some("F15"), Some("F16"),
    None, None, None, None, None, None, None, None,
    Some("Kana"), None, None, Some("Abnt_C1"), None, None, None, None,
    None, Some("Convert"), None, Some("NoConvert"), None, Some("Yen"), Some("Abnt_C2"), None,
    None, None, None, None, None, None, None, None,
    None, None, None, None, None, Some("KP="), None, None,
    Some("Circumflex"), Some("@"), Some(":"), Some("_"), Some("Kanji"), Some("Stop"), Some("Ax"), Some("Unlabeled"),
    None, Some("PrevTrack"), None, None, Some("KP-Enter"), Some("RCtrl"), None, None,
    Some("Mute"), Some("Calculator"), Some("Play"), None, Some("MediaStop"), None, None, None,
    None, None, None, None, None, None, Some("VolDown"), None,
    Some("VolUp"), None, Some("WebHome"), Some("KP,"), None, Some("KP/"), None, Some("SysRq"),
    Some("RAlt"), None, None, None, None, None, None, None,
    None, None, None, None, None, Some("Pause"), None, Some("Home"),
    Some("UpArrow"), Some("PgUp"), None, Some("LeftArrow"), None, Some("RightArrow"), None, Some("End"),
    Some("DownArrow"), Some("PgDn"), Some("Ins"), Some("Del"), None, None, None, None,
    None, None, None, Some("LWin"), Some("RWin"), Some("Apps"), Some("Power"), Some("Sleep"),
    None, None, None, Some("Wake"), None, Some("Search"), Some("Favorites"), Some("Refresh"),
    Some("WebStop"), Some("WebForward"), Some("WebBack"), Some("MyComputer"), Some("Mail"), Some("MediaSelect"), None, None,
    None, None, None, None, None, None, None, None,
    None, None, None, None, None, None, None, None,
];

const BUTTON_NAMES: [&str; 364] = [
    "Mouse1", "Mouse2", "Mouse3", "Mouse4", "Mouse5", "Mouse6", "Mouse7", "Mouse8",
    "Joy1", "Joy2", "Joy3", "Joy4", "Joy5", "Joy6", "Joy7", "Joy8",
    "Joy9", "Joy10", "Joy11", "Joy12", "Joy13", "Joy14", "Joy15", "Joy16",
    "Joy17", "Joy18", "Joy19", "Joy20", "Joy21", "Joy22", "Joy23", "Joy24",
    "Joy25", "Joy26", "Joy27", "Joy28", "Joy29", "Joy30", "Joy31", "Joy32",
    "Joy2_1", "Joy2_2", "Joy2_3", "Joy2_4", "Joy2_5", "Joy2_6", "Joy2_7", "Joy2_8",
    "Joy2_9", "Joy2_10", "Joy2_11", "Joy2_12", "Joy2_13", "Joy2_14", "Joy2_15", "Joy2_16",
    "Joy2_17", "Joy2_18", "Joy2_19", "Joy2_20", "Joy2_21", "Joy2_22", "Joy2_23", "Joy2_24",
    "Joy2_25", "Joy2_26", "Joy2_27", "Joy2_28", "Joy2_29", "Joy2_30", "Joy2_31", "Joy2_32",
    "Joy3_1", "Joy3_2", "Joy3_3", "Joy3_4", "Joy3_5", "Joy3_6", "Joy3_7", "Joy3_8",
    "Joy3_9", "Joy3_10", "Joy3_11", "Joy3_12", "Joy3_13", "Joy3_14", "Joy3_15", "Joy3_16",
    "Joy3_17", "Joy3_18", "Joy3_19", "Joy3_20", "Joy3_21", "Joy3_22", "Joy3_23", "Joy3_24",
    "Joy3_25", "Joy3_26", "Joy3_27", "Joy3_28", "Joy3_29", "Joy3_30", "Joy3_31", "Joy3_32",
    "Joy4_1", "Joy4_2", "Joy4_3", "Joy4_4", "Joy4_5", "Joy4_6", "Joy4_7", "Joy4_8",
    "Joy4_9", "Joy4_10", "Joy4_11", "Joy4_12", "Joy4_13", "Joy4_14", "Joy4_15", "Joy4_16",
    "Joy4_17", "Joy4_18", "Joy4_19", "Joy4_20", "Joy4_21", "Joy4_22", "Joy4_23", "Joy4_24",
    "Joy4_25", "Joy4_26", "Joy4_27", "Joy4_28", "Joy4_29", "Joy4_30", "Joy4_31", "Joy4_32",
    "POV1Up", "POV1Right", "POV1Down", "POV1Left", "POV2Up", "POV2Right", "POV2Down", "POV2Left",
    "POV3Up", "POV3Right", "POV3Down", "POV3Left", "POV4Up", "POV4Right", "POV4Down", "POV4Left",
    "MWheelUp", "MWheelDown", "MWheelRight", "MWheelLeft", "Axis1Plus", "Axis1Minus", "Axis2Plus", "Axis2Minus",
    "Axis3Plus", "Axis3Minus", "Axis4Plus", "Axis4Minus", "Axis5Plus", "Axis5Minus", "Axis6Plus", "Axis6Minus",
    "Axis7Plus", "Axis7Minus", "Axis8Plus", "Axis8Minus", "LStickRight", "LStickLeft", "LStickDown", "LStickUp",
    "RStickRight", "RStickLeft", "RStickDown", "RStickUp", "DPadUp", "DPadDown", "DPadLeft", "DPadRight",
    "Pad_Start", "Pad_Back", "LThumb", "RThumb", "LShoulder", "RShoulder", "LTrigger", "RTrigger",
    "Pad_A", "Pad_B", "Pad_X", "Pad_Y", "POV21Up", "POV21Right", "POV21Down", "POV21Left",
    "POV22Up", "POV22Right", "POV22Down", "POV22Left", "POV23Up", "POV23Right", "POV23Down", "POV23Left",
    "POV24Up", "POV24Right", "POV24Down", "POV24Left", "POV31Up", "POV31Right", "POV31Down", "POV31Left",
    "POV32Up", "POV32Right", "POV32Down", "POV32Left", "POV33Up", "POV33Right", "POV33Down", "POV33Left",
    "POV34Up", "POV34Right", "POV34Down", "POV34Left", "POV41Up", "POV41Right", "POV41Down", "POV41Left",
    "POV42Up", "POV42Right", "POV42Down", "POV42Left", "POV43Up", "POV43Right", "POV43Down", "POV43Left",
    "POV44Up", "POV44Right", "POV44Down", "POV44Left", "Axis21Plus", "Axis21Minus", "Axis22Plus", "Axis22Minus",
    "Axis23Plus", "Axis23Minus", "Axis24Plus", "Axis24Minus", "Axis25Plus", "Axis25Minus", "Axis26Plus", "Axis26Minus",
    "Axis27Plus", "Axis27Minus", "Axis28Plus", "Axis28Minus", "Axis31Plus", "Axis31Minus", "Axis32Plus", "Axis32Minus",
    "Axis33Plus", "Axis33Minus", "Axis34Plus", "Axis34Minus", "Axis35Plus", "Axis35Minus", "Axis36Plus", "Axis36Minus",
    "Axis37Plus", "Axis37Minus", "Axis38Plus", "Axis38Minus", "Axis41Plus", "Axis41Minus", "Axis42Plus", "Axis42Minus",
    "Axis43Plus", "Axis43Minus", "Axis44Plus", "Axis44Minus", "Axis45Plus", "Axis45Minus", "Axis46Plus", "Axis46Minus",
    "Axis47Plus", "Axis47Minus", "Axis48Plus", "Axis48Minus", "LStick2Right", "LStick2Left", "LStick2Down", "LStick2Up",
    "RStick2Right", "RStick2Left", "RStick2Down", "RStick2Up", "DPad2Up", "DPad2Down", "DPad2Left", "DPad2Right",
    "Pad2_Start", "Pad2_Back", "LThumb2", "RThumb2", "LShoulder2", "RShoulder2", "LTrigger2", "RTrigger2",
    "Pad2_A", "Pad2_B", "Pad2_X", "Pad2_Y", "LStick3Right", "LStick3Left", "LStick3Down", "LStick3Up",
    "RStick3Right", "RStick3Left", "RStick3Down", "RStick3Up", "DPad3Up", "DPad3Down", "DPad3Left", "DPad3Right",
    "Pad3_Start", "Pad3_Back", "LThumb3", "RThumb3", "LShoulder3", "RShoulder3", "LTrigger3", "RTrigger3",
    "Pad3_A", "Pad3_B", "Pad3_X", "Pad3_Y", "LStick4Right", "LStick4Left", "LStick4Down", "LStick4Up",
    "RStick4Right", "RStick4Left", "RStick4Down", "RStick4Up", "DPad4Up", "DPad4Down", "DPad4Left", "DPad4Right",
    "Pad4_Start", "Pad4_Back", "LThumb4", "RThumb4", "LShoulder4", "RShoulder4", "LTrigger4", "RTrigger4",
    "Pad4_A", "Pad4_B", "Pad4_X", "Pad4_Y",
];
