use colored::Color;

pub const PRIMARY: Color = Color::TrueColor { r: 120, g: 200, b: 255 };
pub const SECONDARY: Color = Color::TrueColor { r: 170, g: 140, b: 255 };
pub const ACCENT: Color = Color::TrueColor { r: 255, g: 200, b: 90 };
pub const SEPARATOR: Color = Color::TrueColor { r: 100, g: 100, b: 110 };
pub const TEXT_DEFAULT: Color = Color::TrueColor { r: 220, g: 220, b: 225 };

pub const IPV4_ADDR: Color = Color::TrueColor { r: 110, g: 230, b: 160 };
pub const MAC_ADDR: Color = Color::TrueColor { r: 240, g: 160, b: 200 };

pub const RISK_LOW: Color = Color::TrueColor { r: 90, g: 210, b: 120 };
pub const RISK_HIGH: Color = Color::TrueColor { r: 255, g: 85, b: 85 };
