use ratatui::style::Color;

/// Fixed color palette for one theme variant. The flag lives in memory
/// only; toggling re-renders everything with the other palette and nothing
/// is persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Theme {
    pub dark: bool,
    pub background: Color,
    pub card: Color,
    pub text: Color,
    pub subtext: Color,
    pub border: Color,
    pub primary: Color,
    pub checkbox: Color,
    pub danger: Color,
    pub badge_completed: Color,
    pub badge_pending: Color,
}

impl Theme {
    pub fn dark() -> Self {
        Self {
            dark: true,
            background: Color::Rgb(0x12, 0x12, 0x12),
            card: Color::Rgb(0x1e, 0x1e, 0x1e),
            text: Color::Rgb(0xff, 0xff, 0xff),
            subtext: Color::Rgb(0xa0, 0xa0, 0xa0),
            border: Color::Rgb(0x33, 0x33, 0x33),
            primary: Color::Rgb(0x64, 0xb5, 0xf6),
            checkbox: Color::Rgb(0x4c, 0xaf, 0x50),
            danger: Color::Rgb(0xf4, 0x43, 0x36),
            badge_completed: Color::Rgb(0x1b, 0x5e, 0x20),
            badge_pending: Color::Rgb(0x55, 0x2a, 0x00),
        }
    }

    pub fn light() -> Self {
        Self {
            dark: false,
            background: Color::Rgb(0xf5, 0xf5, 0xf5),
            card: Color::Rgb(0xff, 0xff, 0xff),
            text: Color::Rgb(0x33, 0x33, 0x33),
            subtext: Color::Rgb(0x66, 0x66, 0x66),
            border: Color::Rgb(0xe0, 0xe0, 0xe0),
            primary: Color::Rgb(0x21, 0x96, 0xf3),
            checkbox: Color::Rgb(0x4c, 0xaf, 0x50),
            danger: Color::Rgb(0xf4, 0x43, 0x36),
            badge_completed: Color::Rgb(0xe8, 0xf5, 0xe9),
            badge_pending: Color::Rgb(0xff, 0xf3, 0xe0),
        }
    }

    pub fn toggled(&self) -> Self {
        if self.dark {
            Self::light()
        } else {
            Self::dark()
        }
    }
}
