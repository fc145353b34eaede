use crate::ui::style::theme::{Theme, ThemeDefinition};
use ratatui::style::{Color, Modifier, Style};

pub const NAME: &str = "light";

pub const LIGHT: Theme = Theme {
    header: Style::new()
        .fg(Color::Rgb(15, 23, 42))
        .bg(Color::Rgb(226, 232, 240)),
    row_highlight: Style::new()
        .bg(Color::Rgb(203, 213, 225))
        .fg(Color::Rgb(120, 113, 0)),
    prompt: Style::new().fg(Color::Rgb(0, 102, 153)),
    empty: Style::new().fg(Color::Rgb(100, 116, 139)),
    highlight: Style::new()
        .fg(Color::Rgb(120, 113, 0))
        .add_modifier(Modifier::BOLD),
    error: Style::new()
        .fg(Color::Rgb(185, 28, 28))
        .add_modifier(Modifier::BOLD),
};

pub const DEFINITION: ThemeDefinition = ThemeDefinition::new(NAME, LIGHT);
