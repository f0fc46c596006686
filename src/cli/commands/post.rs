//! Post commands - vote, save, hide, report and comment on a submission
//!
//! Each command fires the same control the popup renders for the post,
//! through [`EventDispatcher`].

use super::App;
use crate::api::ApiClient;
use crate::cache::VoteDir;
use crate::cli::args::{CommentArgs, Direction, DraftArgs, PostArgs, ReportArgs, VoteArgs};
use crate::error::{HarmlessError, HarmlessResult};
use crate::i18n;
use crate::popup::{Control, EventDispatcher, Outcome, PopupAction};
use crate::ui::{self, UiContext};

/// Fire `action` on the post and return what changed
async fn fire(
    client: &ApiClient,
    post: &PostArgs,
    action: PopupAction,
    input: Option<&str>,
) -> HarmlessResult<Outcome> {
    let dispatcher = EventDispatcher::new(client, post.url.as_str());
    let reaction = dispatcher
        .dispatch(&Control::new(action, &post.fullname), input)
        .await;

    match reaction.outcome {
        Some(outcome) => Ok(outcome),
        None => Err(HarmlessError::User(
            reaction.status.unwrap_or_else(|| format!("{} failed", reaction.element_id)),
        )),
    }
}

/// Execute the vote command
pub async fn vote(args: VoteArgs, app: &App) -> HarmlessResult<()> {
    let client = app.client()?;
    let action = match args.direction {
        Direction::Up => PopupAction::VoteUp,
        Direction::Down => PopupAction::VoteDown,
    };

    if let Outcome::Voted(dir) = fire(&client, &args.post, action, None).await? {
        let label = match dir {
            VoteDir::Up => "upvoted",
            VoteDir::Down => "downvoted",
            VoteDir::Neutral => "not voted",
        };
        ui::step_ok(&UiContext::detect(), &format!("{} is {}", args.post.fullname, label));
    }
    Ok(())
}

/// Execute save, unsave, hide or unhide
pub async fn toggle(action: PopupAction, args: PostArgs, app: &App) -> HarmlessResult<()> {
    let client = app.client()?;
    fire(&client, &args, action, None).await?;

    let done = match action {
        PopupAction::Save => "Saved",
        PopupAction::Unsave => "Unsaved",
        PopupAction::Hide => "Hid",
        PopupAction::Unhide => "Unhid",
        other => return Err(HarmlessError::Internal(format!("{:?} is not a toggle", other))),
    };
    ui::step_ok(&UiContext::detect(), &format!("{} {}", done, args.fullname));
    Ok(())
}

/// Execute the report command
pub async fn report(args: ReportArgs, app: &App) -> HarmlessResult<()> {
    let ctx = UiContext::detect().with_auto_yes(args.yes);
    let client = app.client()?;

    let Outcome::ConfirmReport { yes, no } =
        fire(&client, &args.post, PopupAction::ConfirmReport, None).await?
    else {
        return Err(HarmlessError::Internal("report did not ask for confirmation".into()));
    };

    let question = format!("{} {}", args.post.fullname, i18n::message("report_confirm", &[]));
    let confirmed = ui::confirm(&ctx, &question, false).await?;
    let chosen = if confirmed { yes } else { no };

    match fire(&client, &args.post, chosen.action, None).await? {
        Outcome::Reported => ui::step_ok(
            &ctx,
            &format!("{} {}", args.post.fullname, i18n::message("action_reported", &[])),
        ),
        _ => ui::step_warn_hint(&ctx, "Report cancelled", "Pass --yes to skip the prompt"),
    }
    Ok(())
}

/// Execute the comment command
pub async fn comment(args: CommentArgs, app: &App) -> HarmlessResult<()> {
    let ctx = UiContext::detect();
    let client = app.client()?;

    ui::step_info(&ctx, &i18n::message("submitting", &[]));
    fire(&client, &args.post, PopupAction::SubmitComment, args.text.as_deref()).await?;

    ui::step_ok(&ctx, &format!("Commented on {}", args.post.fullname));
    Ok(())
}

/// Execute the draft command
pub async fn draft(args: DraftArgs, app: &App) -> HarmlessResult<()> {
    let ctx = UiContext::detect();
    let client = app.client()?;

    let text = match args.text {
        Some(text) => text,
        None => {
            let record = client.cache().require_record(&args.post.url)?;
            let current = record
                .posts
                .get(&args.post.fullname)
                .and_then(|entry| entry.saved_comment_text.clone())
                .unwrap_or_default();
            ui::input(&ctx, &i18n::message("leave_comment", &[]), &current).await?
        }
    };

    fire(&client, &args.post, PopupAction::CacheComment, Some(&text)).await?;
    ui::step_ok(&ctx, &format!("Draft saved for {}", args.post.fullname));
    Ok(())
}
