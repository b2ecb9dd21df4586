//! Input configuration options for atax
//!
//! Key bindings (`[keys]`) and the external program candidates (`[programs]`)
//! read from the optional atax.toml configuration file.

use serde::Deserialize;

/// Input configuration options of all actions
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Keys {
    go_up: Vec<String>,
    go_down: Vec<String>,
    page_up: Vec<String>,
    page_down: Vec<String>,
    go_to_top: Vec<String>,
    go_to_bottom: Vec<String>,
    go_parent: Vec<String>,
    go_into_dir: Vec<String>,
    clear_filter: Vec<String>,

    rename: Vec<String>,
    view: Vec<String>,
    edit: Vec<String>,
    copy: Vec<String>,
    cut: Vec<String>,
    paste: Vec<String>,
    create_directory: Vec<String>,
    delete: Vec<String>,

    cycle_sort: Vec<String>,
    toggle_hidden: Vec<String>,
    toggle_reverse: Vec<String>,
    search: Vec<String>,

    help: Vec<String>,
    quit: Vec<String>,
}

macro_rules! accessor {
    ($($name:ident),+ $(,)?) => {
        impl Keys {
            $(
                #[inline]
                pub fn $name(&self) -> &[String] {
                    &self.$name
                }
            )+
        }
    };
}

accessor!(
    go_up,
    go_down,
    page_up,
    page_down,
    go_to_top,
    go_to_bottom,
    go_parent,
    go_into_dir,
    clear_filter,
    rename,
    view,
    edit,
    copy,
    cut,
    paste,
    create_directory,
    delete,
    cycle_sort,
    toggle_hidden,
    toggle_reverse,
    search,
    help,
    quit,
);

fn keys(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

/// Default input configuration options
impl Default for Keys {
    fn default() -> Self {
        Keys {
            go_up: keys(&["Up", "k"]),
            go_down: keys(&["Down", "j"]),
            page_up: keys(&["PageUp"]),
            page_down: keys(&["PageDown"]),
            go_to_top: keys(&["Home"]),
            go_to_bottom: keys(&["End"]),
            go_parent: keys(&["Backspace", "Left", "h"]),
            go_into_dir: keys(&["Enter", "Right", "l"]),
            clear_filter: keys(&["Esc", "Ctrl+f"]),

            rename: keys(&["F2"]),
            view: keys(&["F3"]),
            edit: keys(&["F4"]),
            copy: keys(&["F5"]),
            cut: keys(&["F6"]),
            paste: keys(&["v", "p"]),
            create_directory: keys(&["F7"]),
            delete: keys(&["F8"]),

            cycle_sort: keys(&["F9"]),
            toggle_hidden: keys(&[".", "Ctrl+h"]),
            toggle_reverse: keys(&["R", "Ctrl+r"]),
            search: keys(&["/"]),

            help: keys(&["F1"]),
            quit: keys(&["q", "F10"]),
        }
    }
}

/// External viewer and editor candidates, tried in order.
///
/// Entries starting with `$` name an environment variable holding the command.
#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Programs {
    viewers: Vec<String>,
    editors: Vec<String>,
}

impl Programs {
    #[inline]
    pub fn viewers(&self) -> &[String] {
        &self.viewers
    }

    #[inline]
    pub fn editors(&self) -> &[String] {
        &self.editors
    }
}

impl Default for Programs {
    fn default() -> Self {
        Programs {
            viewers: keys(&["$PAGER", "less", "more"]),
            editors: keys(&["$VISUAL", "$EDITOR", "vim", "nano", "vi"]),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_tables_keep_defaults() -> Result<(), Box<dyn std::error::Error>> {
        let keys: Keys = toml::from_str(r#"quit = ["x"]"#)?;
        assert_eq!(keys.quit(), &["x".to_string()]);
        assert_eq!(keys.rename(), &["F2".to_string()]);

        let programs: Programs = toml::from_str(r#"editors = ["hx"]"#)?;
        assert_eq!(programs.editors(), &["hx".to_string()]);
        assert_eq!(programs.viewers()[0], "$PAGER");
        Ok(())
    }
}
