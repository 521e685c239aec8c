use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 120, g: 200, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 200, b: 90 };
pub const SEPARATOR: Color = Color::BrightBlack;
pub const TEXT_DEFAULT: Color = Color::White;

pub const IPV4_ADDR: Color = Color::TrueColor { r: 110, g: 220, b: 140 };
pub const IPV4_PREFIX: Color = Color::TrueColor { r: 80, g: 160, b: 100 };
pub const MAC_ADDR: Color = Color::TrueColor { r: 200, g: 150, b: 255 };

pub const GATEWAY: Color = Color::BrightRed;
pub const INFRASTRUCTURE: Color = Color::BrightYellow;
pub const ENDPOINT: Color = Color::BrightCyan;
pub const UNCLASSIFIED: Color = Color::BrightBlack;
