//! Toolbar badge
//!
//! The badge is a pure projection of the cache record for the active
//! tab. [`BadgeState`] names the visual states, [`BadgeView`] is the
//! concrete icon/text/colour/tooltip/popup/click combination for one of
//! them, and a [`BadgeHost`] draws it.

use crate::cache::{CacheRecord, PageCache};
use crate::error::HarmlessResult;
use crate::i18n;
use std::sync::Arc;
use tracing::debug;

/// Host tab identifier
pub type TabId = u32;

/// RGBA badge background colour
pub type Rgba = [u8; 4];

pub const GRAY: Rgba = [192, 192, 192, 255];
pub const RED: Rgba = [200, 0, 0, 255];
pub const BLUE: Rgba = [95, 153, 207, 255];
pub const BLACK: Rgba = [0, 0, 0, 255];
pub const ORANGE: Rgba = [255, 69, 0, 255];

/// Page hosting the popup list
pub const POPUP_PAGE: &str = "/html/popup.html";

/// Toolbar icon variant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    /// Dimmed icon: nothing loaded
    Faded,
    /// Full-colour icon: loading or loaded
    Active,
}

impl Icon {
    pub fn path(self) -> &'static str {
        match self {
            Self::Faded => "/pix/alien-fade.png",
            Self::Active => "/pix/alien.png",
        }
    }
}

/// What clicking the toolbar button does
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClickAction {
    /// Look up the tab's page
    FetchInfo,
}

/// Result of a lookup, as shown on the badge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Populated {
    /// The page is itself a submission's comments page
    CommentsPage,
    /// Nobody has submitted the page yet
    NoneFound,
    /// The page was submitted `count` times
    Found { count: usize },
}

impl Populated {
    pub fn from_record(record: &CacheRecord) -> Self {
        if record.is_comments_page {
            Self::CommentsPage
        } else if record.count == 0 {
            Self::NoneFound
        } else {
            Self::Found {
                count: record.count,
            }
        }
    }
}

/// Visual badge states
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BadgeState {
    Default,
    Ignored,
    Loading,
    Error(String),
    Populated(Populated),
}

/// Concrete badge presentation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BadgeView {
    pub icon: Icon,
    pub text: String,
    /// Background colour; `None` keeps the previous one
    pub color: Option<Rgba>,
    pub title: String,
    /// Popup page, `None` when clicking should not open a popup
    pub popup: Option<&'static str>,
    /// Click handler, `None` when clicks are ignored
    pub on_click: Option<ClickAction>,
}

impl BadgeState {
    /// Project the state onto its presentation
    pub fn view(&self) -> BadgeView {
        match self {
            Self::Default => BadgeView {
                icon: Icon::Faded,
                text: "?".to_string(),
                color: Some(GRAY),
                title: i18n::message("click_to_load", &[]),
                popup: None,
                on_click: Some(ClickAction::FetchInfo),
            },
            Self::Ignored => BadgeView {
                icon: Icon::Faded,
                text: String::new(),
                color: None,
                title: i18n::message("not_activated", &[]),
                popup: None,
                on_click: Some(ClickAction::FetchInfo),
            },
            Self::Loading => BadgeView {
                icon: Icon::Active,
                text: String::new(),
                color: None,
                title: i18n::message("loading", &[]),
                popup: None,
                on_click: None,
            },
            Self::Error(message) => BadgeView {
                icon: Icon::Faded,
                text: "×".to_string(),
                color: Some(RED),
                title: message.clone(),
                popup: None,
                on_click: Some(ClickAction::FetchInfo),
            },
            Self::Populated(Populated::CommentsPage) => BadgeView {
                icon: Icon::Active,
                text: "…".to_string(),
                color: Some(BLUE),
                title: i18n::message("viewing_comments", &[]),
                popup: Some(POPUP_PAGE),
                on_click: None,
            },
            Self::Populated(Populated::NoneFound) => BadgeView {
                icon: Icon::Active,
                text: "+".to_string(),
                color: Some(BLACK),
                title: i18n::message("submit_page", &[]),
                popup: Some(POPUP_PAGE),
                on_click: None,
            },
            Self::Populated(Populated::Found { count }) => BadgeView {
                icon: Icon::Active,
                text: count.to_string(),
                color: Some(ORANGE),
                title: i18n::message("submitted_num_times", &[&count.to_string()]),
                popup: Some(POPUP_PAGE),
                on_click: None,
            },
        }
    }
}

/// Draws badge states for a tab (the browser's toolbar, a terminal, ...)
pub trait BadgeHost: Send + Sync {
    fn show(&self, tab_id: TabId, state: &BadgeState);
}

/// Pushes badge states to a host
pub struct BadgeController {
    host: Arc<dyn BadgeHost>,
    cache: PageCache,
}

impl BadgeController {
    pub fn new(host: Arc<dyn BadgeHost>, cache: PageCache) -> Self {
        Self { host, cache }
    }

    fn show(&self, tab_id: TabId, state: BadgeState) -> BadgeState {
        debug!("Tab {} badge -> {:?}", tab_id, state);
        self.host.show(tab_id, &state);
        state
    }

    pub fn set_defaults(&self, tab_id: TabId) {
        self.show(tab_id, BadgeState::Default);
    }

    pub fn set_ignore(&self, tab_id: TabId) {
        self.show(tab_id, BadgeState::Ignored);
    }

    pub fn set_loading(&self, tab_id: TabId) {
        self.show(tab_id, BadgeState::Loading);
    }

    pub fn set_error(&self, tab_id: TabId, message: &str) {
        self.show(tab_id, BadgeState::Error(message.to_string()));
    }

    /// Show the populated state derived from the cache record for `url`.
    ///
    /// Fails with `NotCached` when `url` has no record.
    pub fn set_for(&self, url: &str, tab_id: TabId) -> HarmlessResult<BadgeState> {
        let record = self.cache.require_record(url)?;
        Ok(self.show(tab_id, BadgeState::Populated(Populated::from_record(&record))))
    }
}
