//! Terminal palette derived from the badge colours

use crate::badge::{self, Rgba};
use cliclack::ThemeState;
use console::Style;

/// Nearest xterm-256 index for a badge colour
pub fn ansi256([r, g, b, _]: Rgba) -> u8 {
    if r == g && g == b {
        return match r {
            0..=7 => 16,
            248..=255 => 231,
            v => 232 + (v - 8) / 10,
        };
    }

    let level = |c: u8| match c {
        0..=47 => 0,
        48..=114 => 1,
        c => (c - 35) / 40,
    };
    16 + 36 * level(r) + 6 * level(g) + level(b)
}

/// Foreground style in a badge colour
pub fn fg(color: Rgba) -> Style {
    Style::new().color256(ansi256(color))
}

/// Prompts drawn in the found-badge orange, errors in the error-badge red
#[derive(Debug, Clone, Default)]
pub struct HarmlessTheme;

impl cliclack::Theme for HarmlessTheme {
    fn bar_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => fg(badge::ORANGE),
            ThemeState::Error(_) => fg(badge::RED),
            ThemeState::Cancel => fg(badge::GRAY).dim(),
            ThemeState::Submit => fg(badge::BLUE),
        }
    }

    fn state_symbol_color(&self, state: &ThemeState) -> Style {
        match state {
            ThemeState::Active => fg(badge::ORANGE),
            ThemeState::Error(_) => fg(badge::RED),
            ThemeState::Cancel => fg(badge::GRAY),
            ThemeState::Submit => fg(badge::BLUE).bold(),
        }
    }
}

pub fn init_theme() {
    cliclack::set_theme(HarmlessTheme);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn badge_colours_map_to_palette() {
        assert_eq!(ansi256(badge::ORANGE), 202);
        assert_eq!(ansi256(badge::BLUE), 68);
        assert_eq!(ansi256(badge::RED), 160);
        assert_eq!(ansi256(badge::GRAY), 250);
        assert_eq!(ansi256(badge::BLACK), 16);
        assert_eq!(ansi256([255, 255, 255, 255]), 231);
    }
}
