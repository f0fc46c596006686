//! Cached lookup results for a single page URL

use crate::api::schema::{Listing, Submission};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Direction of the current user's vote on a submission
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteDir {
    Up,
    Neutral,
    Down,
}

impl VoteDir {
    /// Derive the direction from the tri-state `likes` field
    pub fn from_likes(likes: Option<bool>) -> Self {
        match likes {
            Some(true) => Self::Up,
            None => Self::Neutral,
            Some(false) => Self::Down,
        }
    }

    /// The `likes` value this direction corresponds to
    pub fn likes(self) -> Option<bool> {
        match self {
            Self::Up => Some(true),
            Self::Neutral => None,
            Self::Down => Some(false),
        }
    }

    /// Numeric form used by the vote API (`1`, `0`, `-1`)
    pub fn as_i8(self) -> i8 {
        match self {
            Self::Up => 1,
            Self::Neutral => 0,
            Self::Down => -1,
        }
    }
}

/// One cached submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PostEntry {
    /// Page URL this submission was found for
    pub url: String,

    /// Submission fields as returned by the API (with local optimistic edits)
    pub data: Submission,

    /// Draft comment text typed into this entry's form
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub saved_comment_text: Option<String>,
}

impl PostEntry {
    /// Current vote direction
    pub fn vote_dir(&self) -> VoteDir {
        VoteDir::from_likes(self.data.likes)
    }
}

/// Everything known about one page URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CacheRecord {
    /// Number of submissions, always `posts.len()`
    pub count: usize,

    /// Submissions keyed by fullname, in API order
    pub posts: IndexMap<String, PostEntry>,

    /// Epoch seconds of the fetch that produced this record
    pub cache_date: i64,

    /// Whether the page itself is a submission's comments page
    pub is_comments_page: bool,
}

impl CacheRecord {
    /// Build a fresh record from a lookup response
    pub fn from_listing(url: &str, listing: Listing, is_comments_page: bool, now: i64) -> Self {
        let posts: IndexMap<String, PostEntry> = listing
            .data
            .children
            .into_iter()
            .map(|child| {
                (
                    child.data.name.clone(),
                    PostEntry {
                        url: url.to_string(),
                        data: child.data,
                        saved_comment_text: None,
                    },
                )
            })
            .collect();

        Self {
            count: posts.len(),
            posts,
            cache_date: now,
            is_comments_page,
        }
    }
}
