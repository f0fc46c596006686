//! Typed response schemas for the remote API
//!
//! Responses are validated at the boundary: a body that does not match
//! the expected shape is a [`HarmlessError::Schema`] rather than a value
//! with silently missing fields. Fields the client never reads are ignored.

use crate::error::{HarmlessError, HarmlessResult};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Marker the API embeds in `jquery` responses when no user is logged in
const USER_REQUIRED_JQUERY: &str = ".error.USER_REQUIRED";

/// Error code used by `json` envelope responses when no user is logged in
const USER_REQUIRED_CODE: &str = "USER_REQUIRED";

/// Lookup response (`/api/info.json`, `/by_id/{fullname}.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Listing {
    pub kind: String,
    pub data: ListingData,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingData {
    /// Session anti-forgery token; empty or null when logged out
    #[serde(default)]
    pub modhash: Option<String>,

    pub children: Vec<Thing>,
}

/// A typed wrapper around one submission
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Thing {
    pub kind: String,
    pub data: Submission,
}

/// Submission fields used by the badge and popup
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Submission {
    /// Fullname, e.g. `t3_abc123`
    pub name: String,
    pub score: i64,
    pub ups: i64,
    pub downs: i64,
    /// `true` upvoted, `false` downvoted, `None` no vote
    pub likes: Option<bool>,
    pub hidden: bool,
    pub saved: bool,
    pub thumbnail: String,
    pub title: String,
    pub permalink: String,
    pub domain: String,
    pub author: String,
    pub subreddit: String,
    pub num_comments: u64,
    pub created_utc: f64,
}

/// Response to vote, save, hide, report and comment requests
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MutationResponse {
    /// Legacy jQuery-command response body
    #[serde(default)]
    pub jquery: Vec<Value>,

    /// `api_type=json` response envelope
    #[serde(default)]
    pub json: Option<JsonEnvelope>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct JsonEnvelope {
    #[serde(default)]
    pub errors: Vec<Vec<Value>>,

    #[serde(default)]
    pub data: Option<Value>,
}

impl MutationResponse {
    /// Whether the response says the session is not authenticated
    pub fn login_required(&self) -> bool {
        let in_jquery = self.jquery.iter().any(|command| {
            command
                .get(3)
                .and_then(|args| args.get(0))
                .and_then(Value::as_str)
                == Some(USER_REQUIRED_JQUERY)
        });

        let in_envelope = self.json.as_ref().is_some_and(|envelope| {
            envelope
                .errors
                .iter()
                .any(|error| error.first().and_then(Value::as_str) == Some(USER_REQUIRED_CODE))
        });

        in_jquery || in_envelope
    }
}

/// Parse a JSON object body into `T`
pub fn parse_object<T: DeserializeOwned>(body: &str) -> HarmlessResult<T> {
    let value: Value = serde_json::from_str(body).map_err(HarmlessError::schema)?;
    if !value.is_object() {
        return Err(HarmlessError::schema("expected a JSON object"));
    }
    serde_json::from_value(value).map_err(HarmlessError::schema)
}
