use ratatui::style::Color;

pub struct Theme {
    pub name: &'static str,
    pub bg: Color,
    pub fg: Color,
    pub highlight: Color,
    pub bar: Color,
    pub line: Color,
    pub muted: Color,
    pub error: Color,
    pub warning: Color,
    pub success: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            name: "dark",
            bg: Color::Black,
            fg: Color::White,
            highlight: Color::Yellow,
            bar: Color::Cyan,
            line: Color::Magenta,
            muted: Color::DarkGray,
            error: Color::Red,
            warning: Color::LightYellow,
            success: Color::LightGreen,
        }
    }
    pub fn light() -> Self {
        Self {
            name: "light",
            bg: Color::White,
            fg: Color::Black,
            highlight: Color::Blue,
            bar: Color::DarkGray,
            line: Color::Magenta,
            muted: Color::Gray,
            error: Color::Red,
            warning: Color::Rgb(0xB3, 0x6B, 0x00),
            success: Color::Green,
        }
    }
    pub fn from_name(name: &str) -> Self {
        match name {
            "light" => Self::light(),
            _ => Self::dark(),
        }
    }
    pub fn toggled(&self) -> Self {
        if self.name == "light" { Self::dark() } else { Self::light() }
    }
}
