//! Composable editing behaviours

use crate::theme::ThemeMode;

/// Language mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Language {
    Sql,
}

/// One unit of editing behaviour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Extension {
    /// Undo/redo
    History,
    /// Keyword and template completions
    Autocompletion,
    BracketMatching,
    Search,
    /// Chord to command bindings
    Keymap,
    Language(Language),
    /// Visual styling for the given mode
    Theme(ThemeMode),
}

impl Extension {
    pub fn name(&self) -> &'static str {
        match self {
            Extension::History => "history",
            Extension::Autocompletion => "autocompletion",
            Extension::BracketMatching => "bracketMatching",
            Extension::Search => "search",
            Extension::Keymap => "keymap",
            Extension::Language(Language::Sql) => "language:sql",
            Extension::Theme(ThemeMode::Light) => "theme:light",
            Extension::Theme(ThemeMode::Dark) => "theme:dark",
        }
    }
}

/// Ordered extension list bound to one rendering surface.
///
/// A set is never edited in place: changing the theme produces a new set
/// for a new surface (see [`ExtensionSet::rethemed`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtensionSet {
    extensions: Vec<Extension>,
    surface: u64,
}

impl ExtensionSet {
    /// The full SQL editing set styled for `theme`
    pub fn standard(theme: ThemeMode) -> Self {
        Self::new(vec![
            Extension::History,
            Extension::Autocompletion,
            Extension::BracketMatching,
            Extension::Search,
            Extension::Keymap,
            Extension::Language(Language::Sql),
            Extension::Theme(theme),
        ])
    }

    /// A custom set; a missing theme extension means light styling
    pub fn new(extensions: Vec<Extension>) -> Self {
        Self {
            extensions,
            surface: 0,
        }
    }

    pub fn contains(&self, extension: Extension) -> bool {
        self.extensions.contains(&extension)
    }

    pub fn theme(&self) -> ThemeMode {
        self.extensions
            .iter()
            .find_map(|extension| match extension {
                Extension::Theme(mode) => Some(*mode),
                _ => None,
            })
            .unwrap_or_default()
    }

    /// Generation of the surface this set is attached to
    pub fn surface(&self) -> u64 {
        self.surface
    }

    pub fn iter(&self) -> impl Iterator<Item = &Extension> {
        self.extensions.iter()
    }

    pub fn len(&self) -> usize {
        self.extensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.extensions.is_empty()
    }

    /// Builds a fresh set for the next surface, with every theme extension
    /// replaced by `theme`. A set without a theme extension gains one.
    pub fn rethemed(&self, theme: ThemeMode) -> Self {
        let mut extensions: Vec<Extension> = self
            .extensions
            .iter()
            .map(|extension| match extension {
                Extension::Theme(_) => Extension::Theme(theme),
                other => *other,
            })
            .collect();
        if !extensions.contains(&Extension::Theme(theme)) {
            extensions.push(Extension::Theme(theme));
        }
        Self {
            extensions,
            surface: self.surface + 1,
        }
    }
}
