use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NavAction {
    SelectPrevious,
    SelectNext,
    SelectFirst,
    SelectLast,
    SelectCurrent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyOutcome {
    Action(NavAction),
    /// Not bound here; goes to the underlying input system untouched.
    PassThrough(String),
}

/// Key names as reported by the terminal layer, e.g. `Rune[j]`, `Up`, `Enter`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct KeyBindings {
    pub select_previous: String,
    pub select_next: String,
    pub select_first: String,
    pub select_last: String,
    pub select_current: String,
}

impl Default for KeyBindings {
    fn default() -> Self {
        Self {
            select_previous: "Rune[k]".into(),
            select_next: "Rune[j]".into(),
            select_first: "Rune[g]".into(),
            select_last: "Rune[G]".into(),
            select_current: "Enter".into(),
        }
    }
}

impl KeyBindings {
    fn entries(&self) -> [(&str, NavAction); 5] {
        [
            (self.select_previous.as_str(), NavAction::SelectPrevious),
            (self.select_next.as_str(), NavAction::SelectNext),
            (self.select_first.as_str(), NavAction::SelectFirst),
            (self.select_last.as_str(), NavAction::SelectLast),
            (self.select_current.as_str(), NavAction::SelectCurrent),
        ]
    }

    /// When two actions share a key name the earlier entry wins.
    pub fn translate(&self, key_name: &str) -> KeyOutcome {
        self.entries()
            .into_iter()
            .find(|(bound, _)| !bound.is_empty() && *bound == key_name)
            .map(|(_, action)| KeyOutcome::Action(action))
            .unwrap_or_else(|| KeyOutcome::PassThrough(key_name.to_string()))
    }

    /// Key names bound to more than one action.
    pub fn duplicate_bindings(&self) -> Vec<String> {
        let entries = self.entries();
        let mut duplicates: Vec<String> = Vec::new();
        for (index, (name, _)) in entries.iter().enumerate() {
            if name.is_empty() || duplicates.iter().any(|seen| seen == name) {
                continue;
            }
            if entries[index + 1..].iter().any(|(other, _)| other == name) {
                duplicates.push(name.to_string());
            }
        }
        duplicates
    }
}
