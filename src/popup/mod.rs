//! Popup list
//!
//! [`render_list`] turns a cache record into markup plus one
//! [`Control`] descriptor per interactive element. The markup carries no
//! inline handlers; [`EventDispatcher`] maps a control back to the action
//! it triggers.

mod dispatch;

pub use dispatch::{EventDispatcher, Outcome, Reaction};

use crate::api::encode_uri_component;
use crate::cache::{CacheRecord, PageCache, PostEntry, VoteDir};
use crate::error::HarmlessResult;
use crate::i18n;
use crate::store::{Settings, Store};
use crate::util;
use chrono::{DateTime, Utc};
use std::fmt::Write;
use std::sync::Arc;

/// Element id of the stale-posts banner
pub const INFORMATION_ID: &str = "information";

/// Action bound to an interactive element
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PopupAction {
    VoteUp,
    VoteDown,
    ShowCommentForm,
    Share,
    Save,
    Unsave,
    Hide,
    Unhide,
    ConfirmReport,
    Report,
    DenyReport,
    CacheComment,
    SubmitComment,
    CancelComment,
    ShowStale,
}

/// One interactive element in the rendered markup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Control {
    /// `id` attribute of the element
    pub element_id: String,
    pub action: PopupAction,
    /// Fullname of the post the element belongs to (empty for page-level controls)
    pub target: String,
}

impl Control {
    /// Control for `action` on the post `target` (empty for page-level controls)
    pub fn new(action: PopupAction, target: &str) -> Self {
        let prefix = action.id_prefix();
        let element_id = if target.is_empty() {
            prefix.to_string()
        } else {
            format!("{}_{}", prefix, target)
        };

        Self {
            element_id,
            action,
            target: target.to_string(),
        }
    }
}

impl PopupAction {
    /// Element id prefix; toggled pairs share one element
    fn id_prefix(self) -> &'static str {
        match self {
            Self::VoteUp => "upmod",
            Self::VoteDown => "downmod",
            Self::ShowCommentForm => "comments",
            Self::Share => "share",
            Self::Save | Self::Unsave => "save",
            Self::Hide | Self::Unhide => "hide",
            Self::ConfirmReport => "report",
            Self::Report => "report_yes",
            Self::DenyReport => "report_no",
            Self::CacheComment => "textarea",
            Self::SubmitComment => "submit",
            Self::CancelComment => "cancel",
            Self::ShowStale => "show_stale",
        }
    }
}

/// Rendering switches
#[derive(Debug, Clone, Copy, Default)]
pub struct RenderOptions {
    /// Show stale entries instead of flagging them hidden
    pub reveal_stale: bool,
}

/// Rendered popup
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PopupView {
    pub markup: String,
    pub controls: Vec<Control>,
    /// Entries older than the freshness cutoff
    pub stale_count: usize,
}

impl PopupView {
    /// Descriptor for `element_id`, if rendered
    pub fn control(&self, element_id: &str) -> Option<&Control> {
        self.controls.iter().find(|c| c.element_id == element_id)
    }
}

/// Reads cached records and renders them
pub struct Popup {
    cache: PageCache,
    settings: Arc<Store>,
    origin: String,
}

impl Popup {
    pub fn new(cache: PageCache, settings: Arc<Store>, origin: impl Into<String>) -> Self {
        Self {
            cache,
            settings,
            origin: origin.into(),
        }
    }

    /// Render the list for `url`; fails with `NotCached` if it was never looked up
    pub fn create_list(&self, url: &str, options: RenderOptions) -> HarmlessResult<PopupView> {
        let record = self.cache.require_record(url)?;
        let settings = Settings::load(&self.settings)?;
        Ok(render_list(url, &record, &settings, &self.origin, options, Utc::now()))
    }

    /// Markup inviting the user to submit `url`
    pub fn create_submit_form(&self, url: &str) -> String {
        create_submit_form(url, &self.origin)
    }
}

/// Render `record` (cached for `url`) as of `now`
pub fn render_list(
    url: &str,
    record: &CacheRecord,
    settings: &Settings,
    origin: &str,
    options: RenderOptions,
    now: DateTime<Utc>,
) -> PopupView {
    let mut markup = String::new();
    let mut controls = Vec::new();
    let mut stale_count = 0;

    let _ = write!(
        markup,
        r#"<ol id="posts" data-url="{}" data-commentspage="{}">"#,
        escape(url),
        record.is_comments_page
    );

    util::for_each_in(&record.posts, |_, entry| {
        let fresh = settings.is_fresh(entry.data.created_utc, now.timestamp());
        if !fresh {
            stale_count += 1;
        }
        let class = match (fresh, options.reveal_stale) {
            (true, _) => "fresh",
            (false, false) => "stale",
            (false, true) => "stale-shown",
        };
        render_entry(&mut markup, &mut controls, entry, class, settings, origin, now);
    });

    markup.push_str("</ol>");

    if stale_count > 0 {
        let (key, prefix) = if options.reveal_stale {
            ("stale_posts_showing", "")
        } else {
            ("stale_posts_hiding", "<a id=\"show_stale\">")
        };
        let text = escape(&i18n::message(key, &[&stale_count.to_string()]));
        if prefix.is_empty() {
            let _ = write!(markup, r#"<div id="{}">{}</div>"#, INFORMATION_ID, text);
        } else {
            let _ = write!(markup, r#"<div id="{}">{}{}</a></div>"#, INFORMATION_ID, prefix, text);
            controls.push(Control::new(PopupAction::ShowStale, ""));
        }
    }

    PopupView {
        markup,
        controls,
        stale_count,
    }
}

fn render_entry(
    out: &mut String,
    controls: &mut Vec<Control>,
    entry: &PostEntry,
    class: &str,
    settings: &Settings,
    origin: &str,
    now: DateTime<Utc>,
) {
    let data = &entry.data;
    let name = data.name.as_str();
    let link = format!("{}{}", origin, data.permalink);
    let view_on_reddit = escape(&i18n::message("view_on_reddit", &[]));
    let thumb = if data.thumbnail.starts_with('/') {
        format!("{}{}", origin, data.thumbnail)
    } else {
        data.thumbnail.clone()
    };
    let created = DateTime::<Utc>::from_timestamp(data.created_utc as i64, 0).unwrap_or(now);
    let when = util::pretty_date_at(&util::iso_date_string(&created), now);

    let _ = write!(
        out,
        r#"<li id="{name}" class="{class}" data-dir="{dir}" data-savestatus="{saved}" data-hidestatus="{hidden}">"#,
        name = escape(name),
        class = class,
        dir = entry.vote_dir().as_i8(),
        saved = data.saved,
        hidden = data.hidden,
    );

    // Votes
    let _ = write!(
        out,
        r#"<div class="votes"><a class="upmod{up}" id="upmod_{n}"></a><span class="count" id="count_{n}" title="{title}">{score}</span><a class="downmod{down}" id="downmod_{n}"></a></div>"#,
        n = escape(name),
        up = if entry.vote_dir() == VoteDir::Up { " active" } else { "" },
        down = if entry.vote_dir() == VoteDir::Down { " active" } else { "" },
        title = escape(&i18n::message("score", &[&data.ups.to_string(), &data.downs.to_string()])),
        score = data.score,
    );
    controls.push(Control::new(PopupAction::VoteUp, name));
    controls.push(Control::new(PopupAction::VoteDown, name));

    // Thumbnail and title
    let _ = write!(
        out,
        r#"<a class="thumblink" href="{link}" target="_blank" title="{view}"><img class="thumb" src="{thumb}" alt="{title}" width="70"/></a>"#,
        link = escape(&link),
        view = view_on_reddit,
        thumb = escape(&thumb),
        title = escape(&data.title),
    );
    let _ = write!(
        out,
        r#"<div class="post"><a class="link" href="{link}" target="_blank" title="{view}">{title}</a> <a class="domain" href="{origin}/domain/{domain}" target="_blank">({domain})</a>"#,
        link = escape(&link),
        view = view_on_reddit,
        title = escape(&data.title),
        origin = escape(origin),
        domain = escape(&data.domain),
    );

    // Meta line
    let _ = write!(
        out,
        r#"<div class="meta"><span class="timestamp">{when}</span> {by} <a class="submitter" href="{origin}/user/{author}" target="_blank">{author}</a> {to} <a class="subreddit" href="{origin}/r/{sub}/" target="_blank">{sub}</a></div>"#,
        when = escape(&i18n::message("submitted_when", &[&when])),
        by = escape(&i18n::message("by", &[])),
        to = escape(&i18n::message("to", &[])),
        origin = escape(origin),
        author = escape(&data.author),
        sub = escape(&data.subreddit),
    );

    // Actions
    let comments_text = match data.num_comments {
        0 => i18n::message("add_comment_zero", &[]),
        1 => i18n::message("add_comment_one", &[]),
        n => i18n::message("add_comment_many", &[&n.to_string()]),
    };
    let (save_action, save_key) = if data.saved {
        (PopupAction::Unsave, "action_unsave")
    } else {
        (PopupAction::Save, "action_save")
    };
    let (hide_action, hide_key) = if data.hidden {
        (PopupAction::Unhide, "action_unhide")
    } else {
        (PopupAction::Hide, "action_hide")
    };
    let n = escape(name);
    let _ = write!(
        out,
        r#"<div class="actions"><a class="comments" id="comments_{n}">{comments}</a><a class="share" id="share_{n}">{share}</a><a class="save" id="save_{n}">{save}</a><a class="hide" id="hide_{n}">{hide}</a><a class="report" id="report_{n}">{report}</a></div></div>"#,
        n = n,
        comments = escape(&comments_text),
        share = escape(&i18n::message("action_share", &[])),
        save = escape(&i18n::message(save_key, &[])),
        hide = escape(&i18n::message(hide_key, &[])),
        report = escape(&i18n::message("action_report", &[])),
    );
    controls.push(Control::new(PopupAction::ShowCommentForm, name));
    controls.push(Control::new(PopupAction::Share, name));
    controls.push(Control::new(save_action, name));
    controls.push(Control::new(hide_action, name));
    controls.push(Control::new(PopupAction::ConfirmReport, name));

    // Collapsed comment form
    let _ = write!(
        out,
        r#"<form class="comment" id="form_{n}"><fieldset><legend>{legend}</legend><textarea id="textarea_{n}" rows="8" style="width:{width}px;">{draft}</textarea><button type="button" class="submit" id="submit_{n}">{submit}</button><button type="button" class="cancel" id="cancel_{n}">{cancel}</button><span class="status" id="status_{n}"></span></fieldset></form></li>"#,
        n = n,
        legend = escape(&i18n::message("leave_comment", &[])),
        width = settings.popup_width.saturating_sub(10),
        draft = escape(entry.saved_comment_text.as_deref().unwrap_or_default()),
        submit = escape(&i18n::message("button_submit", &[])),
        cancel = escape(&i18n::message("button_hide", &[])),
    );
    controls.push(Control::new(PopupAction::CacheComment, name));
    controls.push(Control::new(PopupAction::SubmitComment, name));
    controls.push(Control::new(PopupAction::CancelComment, name));
}

/// The site's submit page, pre-filled with `url`
pub fn submit_url(url: &str, origin: &str) -> String {
    format!("{}/submit?url={}", origin, encode_uri_component(url))
}

/// Markup linking to the site's submit page for `url`
pub fn create_submit_form(url: &str, origin: &str) -> String {
    format!(
        r#"<div id="submit"><a class="submit" href="{}" target="_blank">{}</a></div>"#,
        escape(&submit_url(url, origin)),
        escape(&i18n::message("submit_link", &[]))
    )
}

/// Escape text for use in HTML content and double-quoted attributes
fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}
