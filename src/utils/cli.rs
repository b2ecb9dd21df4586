//! Command-line argument parsing and help for atax.
//!
//! When invoked with no args/flags (atax), atax simply launches the TUI in the home
//! directory with the internal defaults.

use crate::app::keymap::{Keymap, action_label};
use crate::config::{CONFIG_ENV, Config};

use std::path::PathBuf;

#[derive(Debug, PartialEq, Eq)]
pub enum CliAction {
    RunApp { config: Option<PathBuf> },
    Exit,
}

/// Parses the process arguments. Help, version and key listings are printed here.
pub fn handle_args() -> CliAction {
    let args: Vec<String> = std::env::args().skip(1).collect();
    parse_args(&args)
}

/// Parses the arguments after the program name.
pub fn parse_args(args: &[String]) -> CliAction {
    let mut config = None;
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--version" | "-v" => {
                print_version();
                return CliAction::Exit;
            }
            "-h" | "--help" => {
                print_help();
                return CliAction::Exit;
            }
            "--keybinds" | "--keybind" | "--key" => {
                print_keybinds();
                return CliAction::Exit;
            }
            "--config" | "-c" => match iter.next() {
                Some(path) if !path.trim().is_empty() => config = Some(PathBuf::from(path)),
                _ => {
                    eprintln!("Error: --config requires a file path");
                    return CliAction::Exit;
                }
            },
            arg => {
                if let Some(path) = arg.strip_prefix("--config=") {
                    config = Some(PathBuf::from(path));
                    continue;
                }
                eprintln!("Unknown argument: {}", arg);
                eprintln!("Try --help for available options");
                return CliAction::Exit;
            }
        }
    }
    CliAction::RunApp { config }
}

fn print_version() {
    println!("atax {}", env!("CARGO_PKG_VERSION"));
}

fn print_help() {
    print!("{}", help_text());
}

fn help_text() -> String {
    format!(
        r##"atax - A keyboard-driven terminal file browser

USAGE:
  atax [OPTIONS]

OPTIONS:
  -c, --config <FILE>     Read settings from FILE (toml)
      --keybinds          Display all the default keybinds
  -h, --help              Print help information
  -v, --version           Display the current installed version of atax

ENVIRONMENT:
  {CONFIG_ENV}             Config file to read when --config is not given
  ATAX_LOG                File to write debug logs to
  PAGER, VISUAL, EDITOR   Preferred viewer and editor

CONFIG (all tables optional):
  [general]   message_secs = 3
  [programs]  viewers = ["$PAGER", "less", "more"]
              editors = ["$VISUAL", "$EDITOR", "vim", "nano", "vi"]
  [theme]     directory, symlink, executable, selection, header, title,
              status_line, command_bar = {{ fg = "blue", bg = "#000000" }}
  [keys]      <action> = ["F2", "ctrl+r", "<c-x>", ...]   (see --keybinds)
"##
    )
}

fn print_keybinds() {
    let keymap = Keymap::from_config(&Config::default());
    println!("Key Bindings\n");
    for (action, keys) in keymap.bindings() {
        println!("  {:<24} {}", action_label(action), keys.join(", "));
    }
    println!(
        r#"
Search mode: type to filter, Backspace to erase, Enter to keep the filter, Esc to cancel.

Syntax Reference:
  Modifiers: <c-x> (Ctrl), <m-x>/<a-x> (Alt/Meta), <s-x> (Shift)
  Standard:  ctrl+x, alt+x, shift+x, meta+x
  Special:   "space", "back", "enter", "esc", "tab", "pageup", "pagedown", "home", "end", "f1".."f12""#
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn no_arguments_runs_with_defaults() {
        assert_eq!(parse_args(&[]), CliAction::RunApp { config: None });
    }

    #[test]
    fn config_flag_forms() {
        let expected = CliAction::RunApp {
            config: Some(PathBuf::from("/tmp/a.toml")),
        };
        assert_eq!(parse_args(&args(&["--config", "/tmp/a.toml"])), expected);
        assert_eq!(parse_args(&args(&["-c", "/tmp/a.toml"])), expected);
        assert_eq!(parse_args(&args(&["--config=/tmp/a.toml"])), expected);
        assert_eq!(parse_args(&args(&["--config"])), CliAction::Exit);
    }

    #[test]
    fn help_lists_env_and_colour_syntax() {
        let help = help_text();
        assert!(help.contains(CONFIG_ENV));
        assert!(help.contains(r##"{ fg = "blue", bg = "#000000" }"##));
        assert!(help.trim_end().ends_with("(see --keybinds)"));
    }

    #[test]
    fn unknown_arguments_exit() {
        assert_eq!(parse_args(&args(&["/some/path"])), CliAction::Exit);
        assert_eq!(parse_args(&args(&["--bogus"])), CliAction::Exit);
    }
}
