//! Theme configuration options for atax
//!
//! This module defines the `[theme]` table of the atax.toml configuration file.
//! Every role is a foreground/background [ColorPair]; unset colors fall back to the
//! internal defaults. Modifiers (bold directories, reverse-video selection and bars)
//! are applied by the UI on top of these colors.
//!
//! ```toml
//! [theme]
//! directory = { fg = "blue" }
//! symlink.fg = "#00afaf"
//! selection = { fg = "black", bg = "white" }
//! ```

use crate::utils::parse_color;

use ratatui::style::{Color, Style};
use serde::Deserialize;

use std::sync::LazyLock;

#[derive(Deserialize, Debug)]
#[serde(default)]
pub struct Theme {
    directory: ColorPair,
    symlink: ColorPair,
    executable: ColorPair,
    selection: ColorPair,
    header: ColorPair,
    title: ColorPair,
    status_line: ColorPair,
    command_bar: ColorPair,
}

impl Default for Theme {
    fn default() -> Self {
        Theme {
            directory: ColorPair {
                fg: Color::Blue,
                ..ColorPair::default()
            },
            symlink: ColorPair {
                fg: Color::Cyan,
                ..ColorPair::default()
            },
            executable: ColorPair {
                fg: Color::Green,
                ..ColorPair::default()
            },
            selection: ColorPair::default(),
            header: ColorPair::default(),
            title: ColorPair::default(),
            status_line: ColorPair::default(),
            command_bar: ColorPair::default(),
        }
    }
}

impl Theme {
    /// Internal default theme, used as fallback when a color is left at Reset.
    pub fn internal_defaults() -> &'static Self {
        static DEFAULT: LazyLock<Theme> = LazyLock::new(Theme::default);
        &DEFAULT
    }

    pub fn directory_style(&self) -> Style {
        self.directory
            .style_or(&Theme::internal_defaults().directory)
    }

    pub fn symlink_style(&self) -> Style {
        self.symlink.style_or(&Theme::internal_defaults().symlink)
    }

    pub fn executable_style(&self) -> Style {
        self.executable
            .style_or(&Theme::internal_defaults().executable)
    }

    pub fn selection_style(&self) -> Style {
        self.selection
            .style_or(&Theme::internal_defaults().selection)
    }

    pub fn header_style(&self) -> Style {
        self.header.style_or(&Theme::internal_defaults().header)
    }

    pub fn title_style(&self) -> Style {
        self.title.style_or(&Theme::internal_defaults().title)
    }

    pub fn status_line_style(&self) -> Style {
        self.status_line
            .style_or(&Theme::internal_defaults().status_line)
    }

    pub fn command_bar_style(&self) -> Style {
        self.command_bar
            .style_or(&Theme::internal_defaults().command_bar)
    }
}

/// Foreground/background color pair of one theme role.
#[derive(Deserialize, Debug, PartialEq, Clone, Copy)]
pub struct ColorPair {
    #[serde(default, deserialize_with = "deserialize_color_field")]
    fg: Color,
    #[serde(default, deserialize_with = "deserialize_color_field")]
    bg: Color,
}

/// Sets both foreground and background to Color::Reset
impl Default for ColorPair {
    fn default() -> Self {
        Self {
            fg: Color::Reset,
            bg: Color::Reset,
        }
    }
}

impl ColorPair {
    /// Resolves the ColorPair by replacing Reset colors with those from another ColorPair.
    pub fn resolve(&self, other: &ColorPair) -> Self {
        Self {
            fg: if self.fg == Color::Reset {
                other.fg
            } else {
                self.fg
            },
            bg: if self.bg == Color::Reset {
                other.bg
            } else {
                self.bg
            },
        }
    }

    /// Converts the ColorPair to a Style, falling back to `fallback` for Reset colors.
    pub fn style_or(&self, fallback: &ColorPair) -> Style {
        let resolved = self.resolve(fallback);
        Style::default().fg(resolved.fg).bg(resolved.bg)
    }
}

fn deserialize_color_field<'de, D>(deserializer: D) -> Result<Color, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    Ok(parse_color(&s))
}
