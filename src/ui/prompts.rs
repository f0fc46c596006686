//! Interactive prompts with CI/non-interactive fallback

use super::context::UiContext;
use crate::error::{HarmlessError, HarmlessResult};

/// Ask a yes/no question.
///
/// Auto-yes answers `true`; a non-interactive context answers `default`.
pub async fn confirm(ctx: &UiContext, message: &str, default: bool) -> HarmlessResult<bool> {
    if ctx.auto_yes() {
        println!("  {} (auto-approved)", message);
        return Ok(true);
    }

    if !ctx.is_interactive() {
        return Ok(default);
    }

    let message = message.to_string();
    tokio::task::spawn_blocking(move || {
        cliclack::confirm(&message)
            .initial_value(default)
            .interact()
    })
    .await
    .map_err(|e| HarmlessError::User(format!("Prompt task failed: {}", e)))?
    .map_err(|e| HarmlessError::User(format!("Prompt failed: {}", e)))
}

/// Ask for a line of text, pre-filled with `initial`.
///
/// A non-interactive context returns `initial` unchanged.
pub async fn input(ctx: &UiContext, message: &str, initial: &str) -> HarmlessResult<String> {
    if !ctx.is_interactive() || ctx.auto_yes() {
        return Ok(initial.to_string());
    }

    let message = message.to_string();
    let initial = initial.to_string();
    tokio::task::spawn_blocking(move || {
        cliclack::input(&message)
            .default_input(&initial)
            .required(false)
            .interact::<String>()
    })
    .await
    .map_err(|e| HarmlessError::User(format!("Prompt task failed: {}", e)))?
    .map_err(|e| HarmlessError::User(format!("Prompt failed: {}", e)))
}
