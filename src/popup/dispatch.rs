//! Routes popup controls to client actions

use super::{Control, PopupAction};
use crate::api::{self, ApiClient, VoteAction};
use crate::cache::VoteDir;
use crate::error::{HarmlessError, HarmlessResult};
use crate::i18n;
use tracing::{debug, warn};

/// What changed after a control fired
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// The post's vote direction is now this
    Voted(VoteDir),
    /// Expand the post's comment form
    ShowCommentForm,
    /// Collapse the post's comment form
    HideCommentForm,
    /// Permalink to hand to the user
    Share { link: String },
    /// The control now reads `label` and triggers `next`
    Toggled { label: String, next: PopupAction },
    /// Ask for confirmation with these two controls
    ConfirmReport { yes: Control, no: Control },
    Reported,
    ReportCancelled,
    DraftCached,
    CommentPosted,
    /// Re-render with stale posts revealed
    RevealStale,
}

/// Result of dispatching one control
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reaction {
    pub element_id: String,
    /// `None` when the action failed
    pub outcome: Option<Outcome>,
    /// Status text to show next to the control
    pub status: Option<String>,
}

/// Dispatches controls rendered for one page
pub struct EventDispatcher<'a> {
    client: &'a ApiClient,
    url: String,
}

impl<'a> EventDispatcher<'a> {
    pub fn new(client: &'a ApiClient, url: impl Into<String>) -> Self {
        Self {
            client,
            url: url.into(),
        }
    }

    /// Run the action behind `control`.
    ///
    /// `input` is the current text of the comment box for comment
    /// controls; a submit without input falls back to the saved draft.
    /// Failures are reported through [`Reaction::status`].
    pub async fn dispatch(&self, control: &Control, input: Option<&str>) -> Reaction {
        debug!("Dispatching {:?} on {}", control.action, control.element_id);

        match self.run(control, input).await {
            Ok(outcome) => Reaction {
                element_id: control.element_id.clone(),
                outcome: Some(outcome),
                status: None,
            },
            Err(e) => {
                warn!("{:?} on {} failed: {}", control.action, control.target, e);
                Reaction {
                    element_id: control.element_id.clone(),
                    outcome: None,
                    status: Some(status_text(&e)),
                }
            }
        }
    }

    async fn run(&self, control: &Control, input: Option<&str>) -> HarmlessResult<Outcome> {
        let url = self.url.as_str();
        let target = control.target.as_str();

        let outcome = match control.action {
            PopupAction::VoteUp => Outcome::Voted(self.client.vote(url, target, VoteAction::Up).await?),
            PopupAction::VoteDown => Outcome::Voted(self.client.vote(url, target, VoteAction::Down).await?),
            PopupAction::ShowCommentForm => Outcome::ShowCommentForm,
            PopupAction::CancelComment => Outcome::HideCommentForm,
            PopupAction::Share => {
                let record = self.client.cache().require_record(url)?;
                let entry = record.posts.get(target).ok_or_else(|| HarmlessError::UnknownPost {
                    url: url.to_string(),
                    fullname: target.to_string(),
                })?;
                Outcome::Share {
                    link: self.client.endpoint(&entry.data.permalink),
                }
            }
            PopupAction::Save => {
                self.client.save(url, target).await?;
                toggled("action_unsave", PopupAction::Unsave)
            }
            PopupAction::Unsave => {
                self.client.unsave(url, target).await?;
                toggled("action_save", PopupAction::Save)
            }
            PopupAction::Hide => {
                self.client.hide(url, target).await?;
                toggled("action_unhide", PopupAction::Unhide)
            }
            PopupAction::Unhide => {
                self.client.unhide(url, target).await?;
                toggled("action_hide", PopupAction::Hide)
            }
            PopupAction::ConfirmReport => Outcome::ConfirmReport {
                yes: Control::new(PopupAction::Report, target),
                no: Control::new(PopupAction::DenyReport, target),
            },
            PopupAction::Report => {
                self.client.report(url, target).await?;
                Outcome::Reported
            }
            PopupAction::DenyReport => Outcome::ReportCancelled,
            PopupAction::CacheComment => {
                self.client.cache_comment(url, target, input.unwrap_or_default())?;
                Outcome::DraftCached
            }
            PopupAction::SubmitComment => {
                let text = match input {
                    Some(text) => text.to_string(),
                    None => self.draft(target)?,
                };
                self.client.submit_comment(url, target, &text).await?;
                Outcome::CommentPosted
            }
            PopupAction::ShowStale => Outcome::RevealStale,
        };

        Ok(outcome)
    }

    fn draft(&self, fullname: &str) -> HarmlessResult<String> {
        let record = self.client.cache().require_record(&self.url)?;
        Ok(record
            .posts
            .get(fullname)
            .and_then(|entry| entry.saved_comment_text.clone())
            .unwrap_or_default())
    }
}

fn toggled(key: &str, next: PopupAction) -> Outcome {
    Outcome::Toggled {
        label: i18n::message(key, &[]),
        next,
    }
}

fn status_text(err: &HarmlessError) -> String {
    match err {
        HarmlessError::EmptyInput => i18n::message("error_empty", &[]),
        HarmlessError::NotCached(_) => i18n::message("error_not_cached", &[]),
        other if other.is_retryable() => {
            format!("{} {}", api::error_text(other), i18n::message("error_retry", &[]))
        }
        other => api::error_text(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::*;
    use crate::api::transport::mock::{Reply, ScriptedTransport};
    use crate::cache::fixtures;
    use crate::popup::{render_list, RenderOptions};
    use crate::store::Settings;
    use chrono::Utc;

    const URL: &str = "https://example.com/story";

    fn seeded(replies: Vec<Reply>) -> Harness {
        let h = harness(ScriptedTransport::new(replies));
        h.client
            .cache()
            .put_record(URL, &fixtures::record(URL, &["t3_a"]))
            .unwrap();
        h
    }

    fn control(h: &Harness, id: &str) -> Control {
        let record = h.client.cache().require_record(URL).unwrap();
        let view = render_list(
            URL,
            &record,
            &Settings::default(),
            "https://www.reddit.com",
            RenderOptions::default(),
            Utc::now(),
        );
        view.control(id).cloned().unwrap()
    }

    #[tokio::test]
    async fn vote_controls() {
        let h = seeded(vec![]);
        let dispatcher = EventDispatcher::new(&h.client, URL);

        let up = dispatcher.dispatch(&control(&h, "upmod_t3_a"), None).await;
        assert_eq!(up.outcome, Some(Outcome::Voted(VoteDir::Up)));

        let down = dispatcher.dispatch(&control(&h, "downmod_t3_a"), None).await;
        assert_eq!(down.outcome, Some(Outcome::Voted(VoteDir::Down)));
        assert_eq!(down.element_id, "downmod_t3_a");
    }

    #[tokio::test]
    async fn save_toggles_label_and_action() {
        let h = seeded(vec![]);
        let dispatcher = EventDispatcher::new(&h.client, URL);

        let reaction = dispatcher.dispatch(&control(&h, "save_t3_a"), None).await;
        assert_eq!(
            reaction.outcome,
            Some(Outcome::Toggled {
                label: "unsave".to_string(),
                next: PopupAction::Unsave
            })
        );
        // The re-rendered control now unsaves
        assert_eq!(control(&h, "save_t3_a").action, PopupAction::Unsave);
    }

    #[tokio::test]
    async fn report_requires_confirmation() {
        let h = seeded(vec![]);
        let dispatcher = EventDispatcher::new(&h.client, URL);

        let reaction = dispatcher.dispatch(&control(&h, "report_t3_a"), None).await;
        let Some(Outcome::ConfirmReport { yes, no }) = reaction.outcome else {
            panic!("expected a report confirmation");
        };
        assert!(h.transport.requests().is_empty());

        let denied = dispatcher.dispatch(&no, None).await;
        assert_eq!(denied.outcome, Some(Outcome::ReportCancelled));
        assert!(h.transport.requests().is_empty());

        let confirmed = dispatcher.dispatch(&yes, None).await;
        assert_eq!(confirmed.outcome, Some(Outcome::Reported));
        assert_eq!(h.transport.requests()[0].url, "https://www.reddit.com/api/report");
    }

    #[tokio::test]
    async fn share_yields_permalink() {
        let h = seeded(vec![]);
        let dispatcher = EventDispatcher::new(&h.client, URL);

        let reaction = dispatcher.dispatch(&control(&h, "share_t3_a"), None).await;
        assert_eq!(
            reaction.outcome,
            Some(Outcome::Share {
                link: "https://www.reddit.com/r/rust/comments/a/post/".to_string()
            })
        );
    }

    #[tokio::test]
    async fn submit_falls_back_to_draft() {
        let h = seeded(vec![]);
        let dispatcher = EventDispatcher::new(&h.client, URL);

        let cached = dispatcher
            .dispatch(&control(&h, "textarea_t3_a"), Some("typed so far"))
            .await;
        assert_eq!(cached.outcome, Some(Outcome::DraftCached));

        let posted = dispatcher.dispatch(&control(&h, "submit_t3_a"), None).await;
        assert_eq!(posted.outcome, Some(Outcome::CommentPosted));
        assert_eq!(h.transport.requests()[0].field("text"), Some("typed so far"));
    }

    #[tokio::test]
    async fn empty_comment_reports_status() {
        let h = seeded(vec![]);
        let dispatcher = EventDispatcher::new(&h.client, URL);

        let reaction = dispatcher.dispatch(&control(&h, "submit_t3_a"), Some("  ")).await;
        assert_eq!(reaction.outcome, None);
        assert_eq!(reaction.status, Some(i18n::message("error_empty", &[])));
    }

    #[tokio::test]
    async fn api_failure_reports_status() {
        let h = seeded(vec![Reply::Respond(502, String::new())]);
        let dispatcher = EventDispatcher::new(&h.client, URL);

        let reaction = dispatcher.dispatch(&control(&h, "hide_t3_a"), None).await;
        assert_eq!(reaction.outcome, None);
        assert_eq!(
            reaction.status.as_deref(),
            Some("reddit API error: HTTP 502 Try again in a moment.")
        );
    }

    #[tokio::test]
    async fn login_failure_is_not_retryable() {
        let body = serde_json::json!({"jquery": [[0, 1, "call", []], [1, 2, "x", []], [2, 3, "y", []], [3, 4, "call", [".error.USER_REQUIRED"]]]});
        let h = seeded(vec![Reply::Respond(200, body.to_string())]);
        let dispatcher = EventDispatcher::new(&h.client, URL);

        let reaction = dispatcher.dispatch(&control(&h, "save_t3_a"), None).await;
        assert_eq!(reaction.status, Some(i18n::message("login", &[])));
    }

    #[tokio::test]
    async fn local_controls_send_nothing() {
        let h = seeded(vec![]);
        let dispatcher = EventDispatcher::new(&h.client, URL);

        let show = dispatcher.dispatch(&control(&h, "comments_t3_a"), None).await;
        assert_eq!(show.outcome, Some(Outcome::ShowCommentForm));
        let hide = dispatcher.dispatch(&control(&h, "cancel_t3_a"), None).await;
        assert_eq!(hide.outcome, Some(Outcome::HideCommentForm));
        assert!(h.transport.requests().is_empty());
    }
}
