use crate::ui::style::theme::{Theme, ThemeDefinition};
use ratatui::style::{Color, Modifier, Style};

pub const NAME: &str = "slate";

pub const SLATE: Theme = Theme {
    header: Style::new()
        .fg(Color::Rgb(226, 232, 240))
        .bg(Color::Rgb(30, 41, 59)),
    row_highlight: Style::new()
        .bg(Color::Rgb(51, 65, 85))
        .fg(Color::Rgb(250, 204, 21)),
    prompt: Style::new().fg(Color::Rgb(129, 140, 248)),
    empty: Style::new().fg(Color::Rgb(100, 116, 139)),
    highlight: Style::new()
        .fg(Color::Rgb(250, 204, 21))
        .add_modifier(Modifier::BOLD),
    error: Style::new()
        .fg(Color::Rgb(248, 113, 113))
        .add_modifier(Modifier::BOLD),
};

pub const DEFINITION: ThemeDefinition =
    ThemeDefinition::new(NAME, SLATE).with_aliases(&["dark", "default"]);
