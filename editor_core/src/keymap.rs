//! Platform-independent key chords and command bindings

/// Key pressed in a chord
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Char(char),
    Enter,
    Tab,
    Escape,
    Backspace,
}

impl Key {
    fn parse(name: &str) -> Option<Self> {
        match name {
            "Enter" => Some(Key::Enter),
            "Tab" => Some(Key::Tab),
            "Escape" | "Esc" => Some(Key::Escape),
            "Backspace" => Some(Key::Backspace),
            _ => {
                let mut chars = name.chars();
                match (chars.next(), chars.next()) {
                    (Some(ch), None) => Some(Key::Char(ch)),
                    _ => None,
                }
            }
        }
    }

    fn matches(&self, other: &Key) -> bool {
        match (self, other) {
            (Key::Char(a), Key::Char(b)) => a.eq_ignore_ascii_case(b),
            _ => self == other,
        }
    }
}

/// Modifier state of a key event
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub meta: bool,
}

impl Modifiers {
    pub const NONE: Modifiers = Modifiers {
        ctrl: false,
        shift: false,
        alt: false,
        meta: false,
    };

    pub const CTRL: Modifiers = Modifiers {
        ctrl: true,
        ..Self::NONE
    };

    pub const META: Modifiers = Modifiers {
        meta: true,
        ..Self::NONE
    };

    pub fn with_shift(mut self) -> Self {
        self.shift = true;
        self
    }

    pub fn with_alt(mut self) -> Self {
        self.alt = true;
        self
    }
}

/// A key event as delivered by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Chord {
    pub key: Key,
    pub modifiers: Modifiers,
}

impl Chord {
    pub fn new(key: Key, modifiers: Modifiers) -> Self {
        Self { key, modifiers }
    }
}

/// Which text an execute command runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecuteScope {
    All,
    Selection,
}

/// Commands reachable from the keymap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditorCommand {
    Execute(ExecuteScope),
    FormatBasic,
    Undo,
    Redo,
}

/// A chord pattern. `Mod` stands for Ctrl or Meta, so one binding covers
/// both platforms.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Binding {
    pub key: Key,
    pub mod_key: bool,
    pub shift: bool,
    pub alt: bool,
}

impl Binding {
    /// Parses patterns such as `Mod-Enter` or `Shift-Alt-f`
    pub fn parse(pattern: &str) -> Option<Self> {
        let mut parts: Vec<&str> = pattern.split('-').collect();
        let key = Key::parse(parts.pop()?)?;
        let mut binding = Binding {
            key,
            mod_key: false,
            shift: false,
            alt: false,
        };
        for modifier in parts {
            match modifier {
                "Mod" | "Ctrl" | "Cmd" => binding.mod_key = true,
                "Shift" => binding.shift = true,
                "Alt" => binding.alt = true,
                _ => return None,
            }
        }
        Some(binding)
    }

    pub fn matches(&self, chord: &Chord) -> bool {
        let modifiers = chord.modifiers;
        self.key.matches(&chord.key)
            && self.mod_key == (modifiers.ctrl || modifiers.meta)
            && self.shift == modifiers.shift
            && self.alt == modifiers.alt
    }
}

/// Ordered chord bindings; the first match wins
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Keymap {
    bindings: Vec<(Binding, EditorCommand)>,
}

impl Keymap {
    pub fn empty() -> Self {
        Self {
            bindings: Vec::new(),
        }
    }

    /// Default bindings of the query editor
    pub fn sql_defaults() -> Self {
        let patterns = [
            ("Mod-Enter", EditorCommand::Execute(ExecuteScope::Selection)),
            ("Shift-Mod-Enter", EditorCommand::Execute(ExecuteScope::All)),
            ("Shift-Alt-f", EditorCommand::FormatBasic),
            ("Mod-z", EditorCommand::Undo),
            ("Mod-y", EditorCommand::Redo),
            ("Shift-Mod-z", EditorCommand::Redo),
        ];
        let mut keymap = Self::empty();
        for (pattern, command) in patterns {
            if let Some(binding) = Binding::parse(pattern) {
                keymap.bind(binding, command);
            }
        }
        keymap
    }

    pub fn bind(&mut self, binding: Binding, command: EditorCommand) {
        self.bindings.push((binding, command));
    }

    pub fn resolve(&self, chord: &Chord) -> Option<EditorCommand> {
        self.bindings
            .iter()
            .find(|(binding, _)| binding.matches(chord))
            .map(|(_, command)| *command)
    }

    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }
}

impl Default for Keymap {
    fn default() -> Self {
        Self::sql_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_binding() {
        let binding = Binding::parse("Shift-Mod-Enter").unwrap();
        assert_eq!(binding.key, Key::Enter);
        assert!(binding.mod_key);
        assert!(binding.shift);
        assert!(!binding.alt);

        assert!(Binding::parse("Hyper-x").is_none());
        assert!(Binding::parse("Mod-PageDown").is_none());
    }

    #[test]
    fn test_all_defaults_parse() {
        assert_eq!(Keymap::sql_defaults().len(), 6);
    }

    #[test]
    fn test_mod_matches_ctrl_and_meta() {
        let keymap = Keymap::sql_defaults();
        let expected = Some(EditorCommand::Execute(ExecuteScope::Selection));
        assert_eq!(
            keymap.resolve(&Chord::new(Key::Enter, Modifiers::CTRL)),
            expected
        );
        assert_eq!(
            keymap.resolve(&Chord::new(Key::Enter, Modifiers::META)),
            expected
        );
    }

    #[test]
    fn test_shift_selects_execute_all() {
        let keymap = Keymap::sql_defaults();
        assert_eq!(
            keymap.resolve(&Chord::new(Key::Enter, Modifiers::CTRL.with_shift())),
            Some(EditorCommand::Execute(ExecuteScope::All))
        );
    }

    #[test]
    fn test_char_keys_ignore_case() {
        let keymap = Keymap::sql_defaults();
        assert_eq!(
            keymap.resolve(&Chord::new(Key::Char('F'), Modifiers::NONE.with_shift().with_alt())),
            Some(EditorCommand::FormatBasic)
        );
        assert_eq!(
            keymap.resolve(&Chord::new(Key::Char('Z'), Modifiers::CTRL.with_shift())),
            Some(EditorCommand::Redo)
        );
    }

    #[test]
    fn test_unbound_chord() {
        let keymap = Keymap::sql_defaults();
        assert_eq!(keymap.resolve(&Chord::new(Key::Enter, Modifiers::NONE)), None);
        assert_eq!(keymap.resolve(&Chord::new(Key::Char('x'), Modifiers::CTRL)), None);
    }
}
