//! Mostly Harmless - reddit companion for the pages you visit
//!
//! Looks up the page in the active tab on reddit, caches the submissions
//! found for it and shows a count badge. A popup list lets the user vote,
//! save, hide, report and comment on each submission.

pub mod api;
pub mod badge;
pub mod cache;
pub mod cli;
pub mod config;
pub mod error;
pub mod i18n;
pub mod lifecycle;
pub mod popup;
pub mod store;
pub mod ui;
pub mod util;

pub use error::{HarmlessError, HarmlessResult};
