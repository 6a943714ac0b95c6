use ratatui::style::Color;
use stat_lens_core::ConfidenceLevel;

pub struct Theme {
    pub bg: Color,
    pub fg: Color,
    pub highlight: Color,
    pub bar: Color,
    pub mean: Color,
    pub band_90: Color,
    pub band_95: Color,
    pub band_99: Color,
    pub error: Color,
    pub success: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            highlight: Color::Yellow,
            bar: Color::Cyan,
            mean: Color::Red,
            band_90: Color::Blue,
            band_95: Color::Green,
            band_99: Color::Magenta,
            error: Color::Red,
            success: Color::LightGreen,
        }
    }
    pub fn light() -> Self {
        Self {
            bg: Color::White,
            fg: Color::Black,
            highlight: Color::Blue,
            bar: Color::DarkGray,
            mean: Color::Red,
            band_90: Color::Blue,
            band_95: Color::Green,
            band_99: Color::Magenta,
            error: Color::Red,
            success: Color::Green,
        }
    }
    pub fn nord() -> Self {
        Self {
            bg: Color::Rgb(46, 52, 64),
            fg: Color::Rgb(216, 222, 233),
            highlight: Color::Rgb(136, 192, 208),
            bar: Color::Rgb(129, 161, 193),
            mean: Color::Rgb(191, 97, 106),
            band_90: Color::Rgb(94, 129, 172),
            band_95: Color::Rgb(163, 190, 140),
            band_99: Color::Rgb(180, 142, 173),
            error: Color::Rgb(191, 97, 106),
            success: Color::Rgb(163, 190, 140),
        }
    }
    pub fn catppuccin() -> Self {
        Self {
            bg: Color::Rgb(30, 30, 46),
            fg: Color::Rgb(205, 214, 244),
            highlight: Color::Rgb(137, 180, 250),
            bar: Color::Rgb(137, 220, 235),
            mean: Color::Rgb(243, 139, 168),
            band_90: Color::Rgb(137, 180, 250),
            band_95: Color::Rgb(166, 227, 161),
            band_99: Color::Rgb(203, 166, 247),
            error: Color::Rgb(243, 139, 168),
            success: Color::Rgb(166, 227, 161),
        }
    }
    pub fn colorblind() -> Self {
        Self {
            bg: Color::Black,
            fg: Color::White,
            highlight: Color::Yellow,
            bar: Color::Cyan,
            mean: Color::Rgb(0xFF, 0x8C, 0x00), // orange instead of red
            band_90: Color::Rgb(0x00, 0x80, 0xFF),
            band_95: Color::Yellow,
            band_99: Color::Magenta,
            error: Color::Rgb(0xFF, 0x8C, 0x00),
            success: Color::Rgb(0x00, 0x80, 0xFF),
        }
    }
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            "nord" => Self::nord(),
            "catppuccin" => Self::catppuccin(),
            "colorblind" => Self::colorblind(),
            _ => Self::dark(),
        }
    }
    pub fn band(&self, level: ConfidenceLevel) -> Color {
        match level {
            ConfidenceLevel::P90 => self.band_90,
            ConfidenceLevel::P95 => self.band_95,
            ConfidenceLevel::P99 => self.band_99,
        }
    }
}
