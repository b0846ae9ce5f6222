use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::input::KeyAction;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
/// Configurable keyboard shortcuts mapping actions to keys.
pub struct KeybindingOptions {
    /// Maps action → key string (e.g. `CycleStyle` → `"s"`).
    pub bindings: HashMap<KeyAction, String>,
    /// Reverse lookup cache (normalized key → action). Rebuilt on load.
    #[serde(skip)]
    key_to_action: HashMap<String, KeyAction>,
}

impl Default for KeybindingOptions {
    fn default() -> Self {
        let bindings = HashMap::from([
            (KeyAction::FocusSearch, "/".into()),
            (KeyAction::Back, "Escape".into()),
            (KeyAction::ResetCamera, "r".into()),
            (KeyAction::CycleStyle, "s".into()),
            (KeyAction::CycleColorScheme, "c".into()),
            (KeyAction::ExportImage, "e".into()),
            (KeyAction::ToggleMeasure, "m".into()),
            (KeyAction::ShowShortcuts, "?".into()),
            (KeyAction::ToggleTheme, "t".into()),
        ]);

        let mut opts = Self {
            bindings,
            key_to_action: HashMap::new(),
        };
        opts.rebuild_reverse_map();
        opts
    }
}

/// Single-character keys match case-insensitively; named keys do not.
fn normalize(key: &str) -> String {
    if key.chars().count() == 1 {
        key.to_lowercase()
    } else {
        key.to_owned()
    }
}

impl KeybindingOptions {
    /// Rebuild the reverse lookup map (key string → action).
    pub fn rebuild_reverse_map(&mut self) {
        self.key_to_action.clear();
        for (action, key) in &self.bindings {
            let _ = self.key_to_action.insert(normalize(key), *action);
        }
    }

    /// Look up the action for a key string.
    #[must_use]
    pub fn lookup(&self, key: &str) -> Option<KeyAction> {
        self.key_to_action.get(&normalize(key)).copied()
    }

    /// Bound key for `action`, if any.
    #[must_use]
    pub fn key_for(&self, action: KeyAction) -> Option<&str> {
        self.bindings.get(&action).map(String::as_str)
    }
}
