//! Color theme constants.
//!
//! Green phosphor on black.

use ratatui::style::Color;

/// Screen background
pub const COLOR_BG: Color = Color::Black;

/// Body text
pub const COLOR_FG: Color = Color::Rgb(51, 255, 102);

/// Borders and less important text
pub const COLOR_DIM: Color = Color::Rgb(0, 128, 48);

/// Title, buttons and the typing cursor
pub const COLOR_ACCENT: Color = Color::Rgb(170, 255, 170);

/// The user's own lines
pub const COLOR_USER: Color = Color::Rgb(255, 214, 64);

/// System notices such as errors
pub const COLOR_ERROR: Color = Color::Rgb(255, 85, 85);
