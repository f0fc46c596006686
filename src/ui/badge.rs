//! Badge host that draws into the terminal

use super::context::UiContext;
use super::progress::TaskSpinner;
use super::theme::ansi256;
use crate::badge::{self, BadgeHost, BadgeState, Rgba, TabId};
use console::{style, Style};
use std::sync::Mutex;

/// Shows `Loading` as a spinner and every other state as one status line
pub struct TerminalBadge {
    spinner: Mutex<TaskSpinner>,
}

impl TerminalBadge {
    pub fn new(ctx: &UiContext) -> Self {
        Self {
            spinner: Mutex::new(TaskSpinner::new(ctx)),
        }
    }
}

fn badge_style(color: Option<Rgba>) -> Style {
    match color {
        Some(badge::GRAY) | None => Style::new().black().on_color256(ansi256(badge::GRAY)),
        Some(color) => Style::new().white().on_color256(ansi256(color)).bold(),
    }
}

/// Badge text in its colour, followed by the tooltip
pub fn badge_line(state: &BadgeState) -> String {
    let view = state.view();
    let text = if view.text.is_empty() { " " } else { view.text.as_str() };
    format!(
        "{} {}",
        badge_style(view.color).apply_to(format!(" {} ", text)),
        view.title
    )
}

impl BadgeHost for TerminalBadge {
    fn show(&self, _tab_id: TabId, state: &BadgeState) {
        let Ok(mut spinner) = self.spinner.lock() else {
            eprintln!("{}", badge_line(state));
            return;
        };

        match state {
            BadgeState::Loading => spinner.start(&state.view().title),
            BadgeState::Error(_) => spinner.stop_error(&badge_line(state)),
            BadgeState::Default | BadgeState::Ignored => {
                spinner.clear();
                println!("{}", style(badge_line(state)).dim());
            }
            BadgeState::Populated(_) => spinner.stop(&badge_line(state)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::badge::Populated;

    #[test]
    fn badge_line_has_text_and_title() {
        let line = console::strip_ansi_codes(&badge_line(&BadgeState::Populated(Populated::Found {
            count: 3,
        })))
        .to_string();
        assert_eq!(line, " 3  Submitted 3 times.");
    }

    #[test]
    fn terminal_badge_non_interactive() {
        let host = TerminalBadge::new(&UiContext::non_interactive());
        host.show(1, &BadgeState::Loading);
        host.show(1, &BadgeState::Populated(Populated::NoneFound));
        host.show(1, &BadgeState::Error("reddit API error: HTTP 500".to_string()));
    }
}
