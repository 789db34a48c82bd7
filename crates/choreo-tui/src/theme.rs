use ratatui::style::Color;
use tracing::warn;

/// Colors used by the preview widgets
#[derive(Debug, Clone)]
pub struct Theme {
    pub bg0: Color,
    pub bg1: Color,
    pub bg2: Color,
    pub fg0: Color,
    pub fg1: Color,
    pub grey0: Color,
    pub grey1: Color,

    /// Pinned section borders and snap markers
    pub accent: Color,
    /// Elements mid-animation
    pub moving: Color,
    pub success: Color,
    pub warning: Color,
    pub error: Color,
}

impl Default for Theme {
    fn default() -> Self {
        midnight()
    }
}

/// Dark navy with the site's cyan accent
pub fn midnight() -> Theme {
    Theme {
        bg0: Color::Rgb(0x0b, 0x0f, 0x17),
        bg1: Color::Rgb(0x12, 0x18, 0x24),
        bg2: Color::Rgb(0x1c, 0x24, 0x33),
        fg0: Color::Rgb(0xe6, 0xed, 0xf3),
        fg1: Color::Rgb(0xb8, 0xc2, 0xcc),
        grey0: Color::Rgb(0x4b, 0x55, 0x63),
        grey1: Color::Rgb(0x8b, 0x94, 0x9e),
        accent: Color::Rgb(0x22, 0xd3, 0xee),
        moving: Color::Rgb(0xfb, 0xbf, 0x24),
        success: Color::Rgb(0x34, 0xd3, 0x99),
        warning: Color::Rgb(0xf5, 0x9e, 0x0b),
        error: Color::Rgb(0xf8, 0x71, 0x71),
    }
}

pub fn gruvbox() -> Theme {
    Theme {
        bg0: Color::Rgb(0x28, 0x28, 0x28),
        bg1: Color::Rgb(0x32, 0x30, 0x2f),
        bg2: Color::Rgb(0x45, 0x40, 0x3d),
        fg0: Color::Rgb(0xd4, 0xbe, 0x98),
        fg1: Color::Rgb(0xdd, 0xc7, 0xa1),
        grey0: Color::Rgb(0x7c, 0x6f, 0x64),
        grey1: Color::Rgb(0x92, 0x83, 0x74),
        accent: Color::Rgb(0x89, 0xb4, 0x82),
        moving: Color::Rgb(0xd8, 0xa6, 0x57),
        success: Color::Rgb(0xa9, 0xb6, 0x65),
        warning: Color::Rgb(0xe7, 0x8a, 0x4e),
        error: Color::Rgb(0xea, 0x69, 0x62),
    }
}

pub fn nord() -> Theme {
    Theme {
        bg0: Color::Rgb(0x2e, 0x34, 0x40),
        bg1: Color::Rgb(0x3b, 0x42, 0x52),
        bg2: Color::Rgb(0x43, 0x4c, 0x5e),
        fg0: Color::Rgb(0xec, 0xef, 0xf4),
        fg1: Color::Rgb(0xe5, 0xe9, 0xf0),
        grey0: Color::Rgb(0x4c, 0x56, 0x6a),
        grey1: Color::Rgb(0x61, 0x6e, 0x88),
        accent: Color::Rgb(0x88, 0xc0, 0xd0),
        moving: Color::Rgb(0xeb, 0xcb, 0x8b),
        success: Color::Rgb(0xa3, 0xbe, 0x8c),
        warning: Color::Rgb(0xd0, 0x87, 0x70),
        error: Color::Rgb(0xbf, 0x61, 0x6a),
    }
}

/// Look up a theme by name, falling back to `midnight`
pub fn load_theme(name: &str) -> Theme {
    match name.to_lowercase().as_str() {
        "midnight" => midnight(),
        "gruvbox" | "gruvbox-dark" => gruvbox(),
        "nord" => nord(),
        other => {
            warn!("Unknown theme '{}', using midnight", other);
            midnight()
        }
    }
}
