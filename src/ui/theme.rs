use ratatui::style::Color;
use serde::{Deserialize, Serialize};

/// Theme color palette defining all colors used in the application.
///
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Theme {
    pub name: String,
    pub primary: ColorSpec,
    pub accent: ColorSpec,

    // Text colors
    pub text: ColorSpec,
    pub text_muted: ColorSpec,

    // Background colors
    pub background: ColorSpec,
    pub surface: ColorSpec,

    // Status colors
    pub warning: ColorSpec,
    pub error: ColorSpec,

    // UI element colors
    pub border_active: ColorSpec,
    pub border_normal: ColorSpec,
    pub drop_target: ColorSpec,
    pub highlight_bg: ColorSpec,
    pub highlight_fg: ColorSpec,

    // Footer mode colors
    pub footer_board: ColorSpec,
    pub footer_search: ColorSpec,
    pub footer_compose: ColorSpec,
    pub footer_delete: ColorSpec,
    pub footer_drag: ColorSpec,
}

/// Color specification that can be serialized/deserialized.
///
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColorSpec {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl ColorSpec {
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        ColorSpec { r, g, b }
    }

    pub fn to_color(&self) -> Color {
        Color::Rgb(self.r, self.g, self.b)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    /// Tokyo Night palette.
    ///
    pub fn dark() -> Self {
        Theme {
            name: "dark".to_string(),
            primary: ColorSpec::rgb(125, 207, 255),       // Blue
            accent: ColorSpec::rgb(255, 159, 196),        // Magenta
            text: ColorSpec::rgb(169, 177, 214),          // Foreground
            text_muted: ColorSpec::rgb(117, 121, 148),    // Comment
            background: ColorSpec::rgb(26, 27, 38),       // Background
            surface: ColorSpec::rgb(36, 40, 59),          // Selection
            warning: ColorSpec::rgb(255, 202, 40),        // Yellow
            error: ColorSpec::rgb(247, 118, 142),         // Red
            border_active: ColorSpec::rgb(125, 207, 255), // Blue
            border_normal: ColorSpec::rgb(117, 121, 148), // Comment
            drop_target: ColorSpec::rgb(158, 206, 106),   // Green
            highlight_bg: ColorSpec::rgb(125, 207, 255),
            highlight_fg: ColorSpec::rgb(26, 27, 38),
            footer_board: ColorSpec::rgb(125, 207, 255),
            footer_search: ColorSpec::rgb(255, 202, 40),
            footer_compose: ColorSpec::rgb(158, 206, 106),
            footer_delete: ColorSpec::rgb(247, 118, 142),
            footer_drag: ColorSpec::rgb(255, 159, 196),
        }
    }

    /// Tokyo Night Day palette.
    ///
    pub fn light() -> Self {
        Theme {
            name: "light".to_string(),
            primary: ColorSpec::rgb(46, 126, 233),        // Blue
            accent: ColorSpec::rgb(152, 84, 241),         // Magenta
            text: ColorSpec::rgb(55, 96, 191),            // Foreground
            text_muted: ColorSpec::rgb(132, 140, 181),    // Comment
            background: ColorSpec::rgb(225, 226, 231),    // Background
            surface: ColorSpec::rgb(196, 200, 218),       // Selection
            warning: ColorSpec::rgb(140, 108, 62),        // Yellow
            error: ColorSpec::rgb(245, 42, 101),          // Red
            border_active: ColorSpec::rgb(46, 126, 233),  // Blue
            border_normal: ColorSpec::rgb(132, 140, 181), // Comment
            drop_target: ColorSpec::rgb(88, 117, 57),     // Green
            highlight_bg: ColorSpec::rgb(46, 126, 233),
            highlight_fg: ColorSpec::rgb(225, 226, 231),
            footer_board: ColorSpec::rgb(46, 126, 233),
            footer_search: ColorSpec::rgb(140, 108, 62),
            footer_compose: ColorSpec::rgb(88, 117, 57),
            footer_delete: ColorSpec::rgb(245, 42, 101),
            footer_drag: ColorSpec::rgb(152, 84, 241),
        }
    }

    /// Get theme by name.
    ///
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "dark" => Some(Self::dark()),
            "light" => Some(Self::light()),
            _ => None,
        }
    }

    /// Return the other theme of the light/dark pair.
    ///
    pub fn toggled(&self) -> Self {
        if self.name == "light" {
            Self::dark()
        } else {
            Self::light()
        }
    }
}
