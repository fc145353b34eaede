use clap::Arg;
use clap::builder::{
    StyledStr,
    styling::{AnsiColor, Color, Style},
};

/// Move clap's metadata annotations into the help text with muted styling so
/// the generated help reads as one line per flag.
pub(crate) fn dim_cli_annotations(mut arg: Arg) -> Arg {
    let help_text = arg
        .get_help()
        .map(|help| help.to_string())
        .unwrap_or_default();
    let mentions_default = help_text.contains("(default:");

    let mut annotations = Vec::new();
    if let Some(values) = render_possible_values_annotation(&arg) {
        arg = arg.hide_possible_values(true);
        annotations.push(values);
    }
    if !mentions_default && let Some(default) = render_default_value_annotation(&arg) {
        arg = arg.hide_default_value(true);
        annotations.push(default);
    }
    if let Some(env) = render_env_annotation(&arg) {
        arg = arg.hide_env(true);
        annotations.push(env);
    }

    if help_text.is_empty() && annotations.is_empty() {
        return arg;
    }

    let mut styled = style_base_help(&help_text);
    let mut has_help = !help_text.is_empty();
    for annotation in annotations {
        if has_help {
            styled.push_str(" ");
        }
        append_muted(&mut styled, &annotation);
        has_help = true;
    }

    arg.help(styled)
}

/// Restyle inline `(default: ...)` notes in hand-written help text.
fn highlight_default_notes(text: &str) -> Option<StyledStr> {
    let start = text.find("(default: ")?;
    let end = start + text[start..].find(')')? + 1;

    let mut styled = StyledStr::new();
    styled.push_str(&text[..start]);
    let style = muted_style();
    std::fmt::write(
        &mut styled,
        format_args!("{style}{}{style:#}", &text[start..end]),
    )
    .ok()?;
    styled.push_str(&text[end..]);
    Some(styled)
}

fn muted_style() -> Style {
    Style::new()
        .fg_color(Some(Color::Ansi(AnsiColor::BrightBlack)))
        .dimmed()
}

fn style_base_help(text: &str) -> StyledStr {
    if text.is_empty() {
        return StyledStr::new();
    }

    highlight_default_notes(text).unwrap_or_else(|| {
        let mut styled = StyledStr::new();
        styled.push_str(text);
        styled
    })
}

fn append_muted(target: &mut StyledStr, annotation: &str) {
    let style = muted_style();
    let _ = std::fmt::write(target, format_args!("{style}{annotation}{style:#}"));
}

fn render_possible_values_annotation(arg: &Arg) -> Option<String> {
    if !arg.get_action().takes_values() {
        return None;
    }

    let visible: Vec<String> = arg
        .get_possible_values()
        .into_iter()
        .filter(|value| !value.is_hide_set())
        .map(|value| {
            let name = value.get_name();
            if name.chars().any(char::is_whitespace) {
                format!("{name:?}")
            } else {
                name.to_string()
            }
        })
        .collect();

    if visible.is_empty() {
        None
    } else {
        Some(format!("[possible values: {}]", visible.join(", ")))
    }
}

fn render_default_value_annotation(arg: &Arg) -> Option<String> {
    let rendered: Vec<String> = arg
        .get_default_values()
        .iter()
        .map(|value| value.to_string_lossy())
        .filter(|text| !text.trim().is_empty())
        .map(|text| {
            if text.chars().any(char::is_whitespace) {
                format!("{text:?}")
            } else {
                text.to_string()
            }
        })
        .collect();

    if rendered.is_empty() {
        None
    } else {
        Some(format!("(default: {})", rendered.join(", ")))
    }
}

fn render_env_annotation(arg: &Arg) -> Option<String> {
    let env = arg.get_env()?;
    let name = env.to_string_lossy();
    if name.trim().is_empty() {
        None
    } else {
        Some(format!("[env: {name}=]"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn possible_values_skip_hidden_and_quote_whitespace() {
        let arg = Arg::new("output").value_parser(["plain", "pretty json"]);

        let annotation = render_possible_values_annotation(&arg).expect("annotation");
        assert_eq!(annotation, "[possible values: plain, \"pretty json\"]");
    }

    #[test]
    fn default_values_ignore_blank_entries() {
        let arg = Arg::new("limit").default_values(["5", " "]);

        let annotation = render_default_value_annotation(&arg).expect("annotation");
        assert_eq!(annotation, "(default: 5)");
    }

    #[test]
    fn env_annotations_keep_the_variable_name() {
        let arg = Arg::new("config").env("REEL_CONFIG");
        let annotation = render_env_annotation(&arg).expect("annotation");
        assert_eq!(annotation, "[env: REEL_CONFIG=]");
    }

    #[test]
    fn highlight_preserves_the_help_text() {
        let text = "Set the window (default: 500) in milliseconds";
        let styled = highlight_default_notes(text).expect("highlighted");
        assert_eq!(styled.to_string(), text);
    }
}
