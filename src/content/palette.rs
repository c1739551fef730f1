//! Brand palette shared by charts and page chrome.

use crate::render::Color;

pub const PRIMARY_DARK_PURPLE: Color = Color::rgb8(0x43, 0x07, 0x47);
pub const SECONDARY_PURPLE: Color = Color::rgb8(0x3f, 0x00, 0x7d);
pub const LIGHT_PURPLE: Color = Color::rgb8(0xfa, 0xf8, 0xff);
pub const PALE_PURPLE: Color = Color::rgb8(0xf3, 0xed, 0xf9);

pub const ACCENT_PINK: Color = Color::rgb8(0xff, 0x40, 0x81);
pub const ACCENT_BLUE: Color = Color::rgb8(0x43, 0x07, 0x47);
pub const ACCENT_GREEN: Color = Color::rgb8(0x8b, 0xc3, 0x4a);

pub const TEXT_DARK: Color = Color::rgb8(0x1a, 0x1a, 0x1a);
pub const TEXT_MEDIUM: Color = Color::rgb8(0x4a, 0x4a, 0x4a);
pub const WHITE: Color = Color::rgb8(0xff, 0xff, 0xff);
pub const BORDER_LIGHT: Color = Color::rgb8(0xe0, 0xe0, 0xe0);
