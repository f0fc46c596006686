//! Terminal UI for the CLI host
//!
//! Uses `cliclack` for spinners and prompts with automatic fallback to
//! plain output in CI/non-interactive environments. [`TerminalBadge`]
//! draws badge states the way the toolbar would.

mod badge;
mod context;
mod output;
mod progress;
mod prompts;
mod theme;

pub use badge::{badge_line, TerminalBadge};
pub use context::UiContext;
pub use output::{intro, key_value, remark, step_info, step_ok, step_ok_detail, step_warn_hint};
pub use progress::TaskSpinner;
pub use prompts::{confirm, input};
pub use theme::{ansi256, fg, init_theme, HarmlessTheme};
