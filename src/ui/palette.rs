use ratatui::style::Color;

pub const BG: Color = Color::Reset;
pub const FG: Color = Color::White;
pub const HEADER_FG: Color = Color::Black;
pub const ACCENT: Color = Color::Cyan;
pub const MUTED: Color = Color::DarkGray;
pub const BORDER: Color = Color::Gray;
pub const TILE_BG: Color = Color::Blue;
pub const TILE_SELECTED_BG: Color = Color::LightBlue;
pub const SUCCESS: Color = Color::Green;
pub const ERROR: Color = Color::Red;
pub const WARNING: Color = Color::Yellow;
