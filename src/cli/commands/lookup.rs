//! Lookup command - fetch reddit data for a page and show its badge

use super::App;
use crate::badge::{BadgeController, BadgeState};
use crate::cli::args::LookupArgs;
use crate::error::HarmlessResult;
use crate::lifecycle::{Background, TabUpdate};
use crate::ui::{self, TerminalBadge, UiContext};
use std::sync::Arc;

/// Execute the lookup command
pub async fn execute(args: LookupArgs, app: &App) -> HarmlessResult<()> {
    let ctx = UiContext::detect();
    let client = app.client()?;
    let badge = BadgeController::new(Arc::new(TerminalBadge::new(&ctx)), app.cache());
    let background = Background::new(client, badge);
    background.tab_opened(args.tab);

    let state = if args.force {
        background.button_clicked(args.tab, &args.url).await?;
        None
    } else {
        background
            .prepare_browser_action(args.tab, &TabUpdate::loading(&args.url))
            .await?
    };

    if !matches!(state, Some(BadgeState::Ignored)) {
        ui::remark(&ctx, &format!("Run: mostly-harmless show {}", args.url));
    }

    Ok(())
}
