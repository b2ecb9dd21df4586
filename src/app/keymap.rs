//! Key mapping and action dispatch system for atax
//!
//! Defines key to an action, parsing from the config, and enum variants
//! for all navigation, file, view and system actions used by atax.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use std::collections::HashMap;

/// Represents any action in the app: navigation, file, view or system.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Action {
    Nav(NavAction),
    File(FileAction),
    View(ViewAction),
    System(SystemAction),
}

/// Navigation actions (move, into_parent, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum NavAction {
    GoUp,
    GoDown,
    PageUp,
    PageDown,
    GoToTop,
    GoToBottom,
    GoParent,
    GoIntoDir,
    ClearFilter,
}

/// File actions (rename, copy, paste, delete, etc.)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum FileAction {
    Rename,
    View,
    Edit,
    Copy,
    Cut,
    Paste,
    CreateDirectory,
    Delete,
}

/// Listing presentation actions (sort, hidden files, search)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ViewAction {
    CycleSort,
    ToggleHidden,
    ToggleReverse,
    Search,
}

/// System actions (quit, help)
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SystemAction {
    Quit,
    Help,
}

/// Key + modifiers as used in keybind/keymap
#[derive(Hash, Eq, PartialEq, Copy, Clone, Debug)]
pub struct Key {
    pub code: KeyCode,
    pub modifiers: KeyModifiers,
}

/// Stores the mapping from Key to action, which is built in the config
pub struct Keymap {
    map: HashMap<Key, Action>,
}

impl Keymap {
    /// Builds the keymap from the config
    #[rustfmt::skip]
    pub fn from_config(config: &crate::config::Config) -> Self {
        let mut map = HashMap::new();
        let keys = config.keys();

        macro_rules! bind {
            ($keys:expr, $action:expr) => {
                bind($keys, $action, &mut map);
            };
        }

        use NavAction as N;
        use FileAction as F;
        use ViewAction as V;
        use SystemAction as S;

        // NavActions
        bind!(keys.go_up(),             Action::Nav(N::GoUp));
        bind!(keys.go_down(),           Action::Nav(N::GoDown));
        bind!(keys.page_up(),           Action::Nav(N::PageUp));
        bind!(keys.page_down(),         Action::Nav(N::PageDown));
        bind!(keys.go_to_top(),         Action::Nav(N::GoToTop));
        bind!(keys.go_to_bottom(),      Action::Nav(N::GoToBottom));
        bind!(keys.go_parent(),         Action::Nav(N::GoParent));
        bind!(keys.go_into_dir(),       Action::Nav(N::GoIntoDir));
        bind!(keys.clear_filter(),      Action::Nav(N::ClearFilter));

        // FileActions
        bind!(keys.rename(),            Action::File(F::Rename));
        bind!(keys.view(),              Action::File(F::View));
        bind!(keys.edit(),              Action::File(F::Edit));
        bind!(keys.copy(),              Action::File(F::Copy));
        bind!(keys.cut(),               Action::File(F::Cut));
        bind!(keys.paste(),             Action::File(F::Paste));
        bind!(keys.create_directory(),  Action::File(F::CreateDirectory));
        bind!(keys.delete(),            Action::File(F::Delete));

        // ViewActions
        bind!(keys.cycle_sort(),        Action::View(V::CycleSort));
        bind!(keys.toggle_hidden(),     Action::View(V::ToggleHidden));
        bind!(keys.toggle_reverse(),    Action::View(V::ToggleReverse));
        bind!(keys.search(),            Action::View(V::Search));

        // SystemActions
        bind!(keys.help(),              Action::System(S::Help));
        bind!(keys.quit(),              Action::System(S::Quit));

        Keymap { map }
    }

    /// Looks up the action for a given key event
    pub fn lookup(&self, key: KeyEvent) -> Option<Action> {
        let k = Key {
            code: key.code,
            modifiers: key.modifiers,
        };

        if let Some(action) = self.map.get(&k).copied() {
            return Some(action);
        }

        if matches!(key.code, KeyCode::Char(_)) && key.modifiers.contains(KeyModifiers::SHIFT) {
            let k2 = Key {
                code: key.code,
                modifiers: key.modifiers - KeyModifiers::SHIFT,
            };
            return self.map.get(&k2).copied();
        }
        None
    }

    /// All bindings grouped per action, as display strings. Used by the help overlay.
    pub fn bindings(&self) -> Vec<(Action, Vec<String>)> {
        let mut grouped: Vec<(Action, Vec<String>)> = Vec::new();
        for (key, action) in &self.map {
            let label = key_label(key);
            match grouped.iter_mut().find(|(a, _)| a == action) {
                Some((_, labels)) => labels.push(label),
                None => grouped.push((*action, vec![label])),
            }
        }
        for (_, labels) in &mut grouped {
            labels.sort();
        }
        grouped.sort_by_key(|(action, _)| action_label(*action));
        grouped
    }
}

/// Human readable name of an action, as shown in the help overlay and `--keybinds`.
pub fn action_label(action: Action) -> &'static str {
    use FileAction as F;
    use NavAction as N;
    use SystemAction as S;
    use ViewAction as V;
    match action {
        Action::Nav(N::GoUp) => "Move up",
        Action::Nav(N::GoDown) => "Move down",
        Action::Nav(N::PageUp) => "Page up",
        Action::Nav(N::PageDown) => "Page down",
        Action::Nav(N::GoToTop) => "First entry",
        Action::Nav(N::GoToBottom) => "Last entry",
        Action::Nav(N::GoParent) => "Parent directory",
        Action::Nav(N::GoIntoDir) => "Enter directory",
        Action::Nav(N::ClearFilter) => "Clear search filter",
        Action::File(F::Rename) => "Rename",
        Action::File(F::View) => "View file",
        Action::File(F::Edit) => "Edit file",
        Action::File(F::Copy) => "Copy to clipboard",
        Action::File(F::Cut) => "Cut to clipboard",
        Action::File(F::Paste) => "Paste",
        Action::File(F::CreateDirectory) => "New directory",
        Action::File(F::Delete) => "Delete",
        Action::View(V::CycleSort) => "Cycle sort",
        Action::View(V::ToggleHidden) => "Toggle hidden files",
        Action::View(V::ToggleReverse) => "Reverse sort",
        Action::View(V::Search) => "Search",
        Action::System(S::Help) => "Help",
        Action::System(S::Quit) => "Quit",
    }
}

fn key_label(key: &Key) -> String {
    let mut out = String::new();
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        out.push_str("Ctrl+");
    }
    if key.modifiers.contains(KeyModifiers::ALT) {
        out.push_str("Alt+");
    }
    if key.modifiers.contains(KeyModifiers::SHIFT) {
        out.push_str("Shift+");
    }
    match key.code {
        KeyCode::Char(' ') => out.push_str("Space"),
        KeyCode::Char(c) => out.push(c),
        KeyCode::F(n) => out.push_str(&format!("F{n}")),
        KeyCode::PageUp => out.push_str("PageUp"),
        KeyCode::PageDown => out.push_str("PageDown"),
        other => out.push_str(&format!("{other:?}")),
    }
    out
}

pub(crate) fn parse_key(s: &str) -> Option<Key> {
    let mut modifiers = KeyModifiers::NONE;
    let mut code: Option<KeyCode> = None;

    let is_bracketed = s.starts_with('<') && s.ends_with('>');
    let mut input = s.trim_start_matches('<').trim_end_matches('>').to_string();

    if is_bracketed && input.contains('-') {
        let parts: Vec<&str> = input.split('-').collect();

        for &prefix in parts.iter().take(parts.len().saturating_sub(1)) {
            match prefix.to_lowercase().as_str() {
                "c" | "ctrl" => modifiers |= KeyModifiers::CONTROL,
                "a" | "m" | "alt" => modifiers |= KeyModifiers::ALT,
                "s" | "shift" => modifiers |= KeyModifiers::SHIFT,
                _ => return None,
            }
        }
        input = parts.last()?.to_string();
    }

    // A lone "+" or "-" is the key itself, not a separator.
    if input.len() == 1 {
        let c = input.chars().next()?;
        return Some(Key {
            code: KeyCode::Char(c),
            modifiers,
        });
    }

    let normalized = input.replace('-', "+");
    for part in normalized.split('+') {
        let p_low = part.to_lowercase();
        match p_low.as_str() {
            "ctrl" | "control" => modifiers |= KeyModifiers::CONTROL,
            "alt" | "meta" => modifiers |= KeyModifiers::ALT,
            "shift" => modifiers |= KeyModifiers::SHIFT,

            "up" => code = Some(KeyCode::Up),
            "down" => code = Some(KeyCode::Down),
            "left" => code = Some(KeyCode::Left),
            "right" => code = Some(KeyCode::Right),
            "pageup" | "pgup" => code = Some(KeyCode::PageUp),
            "pagedown" | "pgdn" => code = Some(KeyCode::PageDown),
            "home" => code = Some(KeyCode::Home),
            "end" => code = Some(KeyCode::End),
            "enter" => code = Some(KeyCode::Enter),
            "esc" => code = Some(KeyCode::Esc),
            "backspace" | "back" => code = Some(KeyCode::Backspace),
            "delete" | "del" => code = Some(KeyCode::Delete),
            "tab" => code = Some(KeyCode::Tab),
            "space" | "spc" => code = Some(KeyCode::Char(' ')),

            _ => {
                if part.chars().count() == 1 {
                    let mut c = part.chars().next()?;
                    if modifiers.contains(KeyModifiers::SHIFT) {
                        c = c.to_ascii_uppercase();
                    }
                    code = Some(KeyCode::Char(c));
                } else if p_low.starts_with('f')
                    && p_low.len() > 1
                    && p_low[1..].chars().all(|c| c.is_ascii_digit())
                {
                    let n = p_low[1..].parse().ok()?;
                    code = Some(KeyCode::F(n));
                } else if part.is_empty() {
                    continue;
                } else {
                    return None;
                }
            }
        }
    }

    Some(Key {
        code: code?,
        modifiers,
    })
}

fn bind(key_list: &[String], action: Action, map: &mut HashMap<Key, Action>) {
    for k in key_list {
        match parse_key(k) {
            Some(key) => {
                map.insert(key, action);
            }
            None => tracing::warn!(key = %k, "ignoring unparsable key binding"),
        }
    }
}
