//! Post actions: vote, save, hide, report and comment
//!
//! Every action first applies an optimistic edit to the cached post and
//! persists the whole record, then sends the request. A failed request
//! leaves the optimistic edit in place; the error is returned so the
//! caller can show it next to the control that triggered it.

use super::{ApiClient, Method, MutationResponse};
use crate::cache::{PageCache, PostEntry, VoteDir};
use crate::error::{HarmlessError, HarmlessResult};
use tracing::{debug, info};

/// Footer appended to comments when `shamelessPlug` is enabled
pub const SHAMELESS_PLUG: &str = "\n\n*Posted from [Mostly Harmless](http://kerrick.github.com/Mostly-Harmless), a Google Chrome extension for awesome redditors.*";

/// Vote button pressed by the user
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VoteAction {
    Up,
    Down,
}

impl VoteAction {
    /// Direction after pressing this button from `current`; `None` means nothing changes
    pub fn apply(self, current: VoteDir) -> Option<VoteDir> {
        match (self, current) {
            (Self::Up, VoteDir::Up) => None,
            (Self::Up, VoteDir::Neutral | VoteDir::Down) => Some(VoteDir::Up),
            (Self::Down, VoteDir::Up | VoteDir::Neutral) => Some(VoteDir::Down),
            (Self::Down, VoteDir::Down) => Some(VoteDir::Neutral),
        }
    }
}

fn lookup_post(cache: &PageCache, url: &str, fullname: &str) -> HarmlessResult<PostEntry> {
    let mut record = cache.require_record(url)?;
    record
        .posts
        .swap_remove(fullname)
        .ok_or_else(|| HarmlessError::UnknownPost {
            url: url.to_string(),
            fullname: fullname.to_string(),
        })
}

impl ApiClient {
    /// Vote on `fullname` and return the resulting direction
    pub async fn vote(&self, url: &str, fullname: &str, action: VoteAction) -> HarmlessResult<VoteDir> {
        let current = lookup_post(self.cache(), url, fullname)?.vote_dir();

        let Some(next) = action.apply(current) else {
            debug!("Vote on {} unchanged at {:?}", fullname, current);
            return Ok(current);
        };

        self.cache()
            .update_post(url, fullname, |entry| entry.data.likes = next.likes())?;

        info!("Voting {} on {}", next.as_i8(), fullname);
        let form = vec![
            ("id".to_string(), fullname.to_string()),
            ("dir".to_string(), next.as_i8().to_string()),
            self.token_field(),
        ];
        self.api_transmit(Method::Post, &self.endpoint("/api/vote"), form)
            .await?;
        Ok(next)
    }

    /// Save `fullname`
    pub async fn save(&self, url: &str, fullname: &str) -> HarmlessResult<MutationResponse> {
        self.simple_action(url, fullname, "/api/save", |e| e.data.saved = true)
            .await
    }

    /// Unsave `fullname`
    pub async fn unsave(&self, url: &str, fullname: &str) -> HarmlessResult<MutationResponse> {
        self.simple_action(url, fullname, "/api/unsave", |e| e.data.saved = false)
            .await
    }

    /// Hide `fullname`
    pub async fn hide(&self, url: &str, fullname: &str) -> HarmlessResult<MutationResponse> {
        self.simple_action(url, fullname, "/api/hide", |e| e.data.hidden = true)
            .await
    }

    /// Unhide `fullname`
    pub async fn unhide(&self, url: &str, fullname: &str) -> HarmlessResult<MutationResponse> {
        self.simple_action(url, fullname, "/api/unhide", |e| e.data.hidden = false)
            .await
    }

    /// Report `fullname`; a reported post is also hidden
    pub async fn report(&self, url: &str, fullname: &str) -> HarmlessResult<MutationResponse> {
        self.simple_action(url, fullname, "/api/report", |e| e.data.hidden = true)
            .await
    }

    async fn simple_action<F>(
        &self,
        url: &str,
        fullname: &str,
        path: &str,
        edit: F,
    ) -> HarmlessResult<MutationResponse>
    where
        F: FnOnce(&mut PostEntry),
    {
        self.cache().update_post(url, fullname, edit)?;

        info!("POST {} for {}", path, fullname);
        let form = vec![("id".to_string(), fullname.to_string()), self.token_field()];
        self.api_transmit(Method::Post, &self.endpoint(path), form)
            .await
    }

    /// Submit `text` as a comment on `fullname`.
    ///
    /// Blank text is rejected before any request is made. On success the
    /// entry's saved draft is cleared.
    pub async fn submit_comment(
        &self,
        url: &str,
        fullname: &str,
        text: &str,
    ) -> HarmlessResult<MutationResponse> {
        if text.trim().is_empty() {
            return Err(HarmlessError::EmptyInput);
        }
        lookup_post(self.cache(), url, fullname)?;

        let mut comment = text.to_string();
        if self.settings()?.shameless_plug {
            comment.push_str(SHAMELESS_PLUG);
        }

        info!("Commenting on {}", fullname);
        let form = vec![
            ("thing_id".to_string(), fullname.to_string()),
            ("text".to_string(), comment),
            self.token_field(),
        ];
        let response = self
            .api_transmit(Method::Post, &self.endpoint("/api/comment"), form)
            .await?;

        self.cache()
            .update_post(url, fullname, |e| e.saved_comment_text = None)?;
        Ok(response)
    }

    /// Persist draft comment text for `fullname`
    pub fn cache_comment(&self, url: &str, fullname: &str, text: &str) -> HarmlessResult<()> {
        self.cache()
            .update_post(url, fullname, |e| e.saved_comment_text = Some(text.to_string()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::test_support::*;
    use crate::api::transport::mock::{Reply, ScriptedTransport};
    use crate::cache::fixtures;
    use serde_json::json;

    const URL: &str = "https://example.com/story";

    fn seeded(replies: Vec<Reply>) -> Harness {
        let h = harness(ScriptedTransport::new(replies));
        h.client
            .cache()
            .put_record(URL, &fixtures::record(URL, &["t3_a", "t3_b"]))
            .unwrap();
        h.client.cache().set_modhash(Some("token")).unwrap();
        h
    }

    fn set_likes(h: &Harness, likes: Option<bool>) {
        h.client
            .cache()
            .update_post(URL, "t3_a", |e| e.data.likes = likes)
            .unwrap();
    }

    fn likes(h: &Harness) -> Option<bool> {
        h.client.cache().require_record(URL).unwrap().posts["t3_a"].data.likes
    }

    #[test]
    fn vote_table() {
        use VoteDir::*;
        assert_eq!(VoteAction::Up.apply(Up), None);
        assert_eq!(VoteAction::Up.apply(Neutral), Some(Up));
        assert_eq!(VoteAction::Up.apply(Down), Some(Up));
        assert_eq!(VoteAction::Down.apply(Up), Some(Down));
        assert_eq!(VoteAction::Down.apply(Neutral), Some(Down));
        assert_eq!(VoteAction::Down.apply(Down), Some(Neutral));
    }

    #[tokio::test]
    async fn upvote_from_down_goes_up() {
        let h = seeded(vec![]);
        set_likes(&h, Some(false));

        let dir = h.client.vote(URL, "t3_a", VoteAction::Up).await.unwrap();

        assert_eq!(dir, VoteDir::Up);
        assert_eq!(likes(&h), Some(true));
        let request = &h.transport.requests()[0];
        assert_eq!(request.url, "https://www.reddit.com/api/vote");
        assert_eq!(request.field("dir"), Some("1"));
        assert_eq!(request.field("id"), Some("t3_a"));
        assert_eq!(request.field("uh"), Some("token"));
    }

    #[tokio::test]
    async fn upvote_twice_stays_up() {
        let h = seeded(vec![]);

        assert_eq!(h.client.vote(URL, "t3_a", VoteAction::Up).await.unwrap(), VoteDir::Up);
        assert_eq!(h.client.vote(URL, "t3_a", VoteAction::Up).await.unwrap(), VoteDir::Up);

        assert_eq!(likes(&h), Some(true));
        assert_eq!(h.transport.requests().len(), 1);
    }

    #[tokio::test]
    async fn downvote_from_down_clears_vote() {
        let h = seeded(vec![]);
        set_likes(&h, Some(false));

        let dir = h.client.vote(URL, "t3_a", VoteAction::Down).await.unwrap();

        assert_eq!(dir, VoteDir::Neutral);
        assert_eq!(likes(&h), None);
        assert_eq!(h.transport.requests()[0].field("dir"), Some("0"));
    }

    #[tokio::test]
    async fn hide_keeps_count() {
        let h = seeded(vec![]);

        h.client.hide(URL, "t3_a").await.unwrap();

        let record = h.client.cache().require_record(URL).unwrap();
        assert!(record.posts["t3_a"].data.hidden);
        assert_eq!(record.count, 2);
        assert_eq!(h.transport.requests()[0].url, "https://www.reddit.com/api/hide");
    }

    #[tokio::test]
    async fn save_and_unsave() {
        let h = seeded(vec![]);

        h.client.save(URL, "t3_b").await.unwrap();
        assert!(h.client.cache().require_record(URL).unwrap().posts["t3_b"].data.saved);

        h.client.unsave(URL, "t3_b").await.unwrap();
        assert!(!h.client.cache().require_record(URL).unwrap().posts["t3_b"].data.saved);

        let urls: Vec<String> = h.transport.requests().into_iter().map(|r| r.url).collect();
        assert_eq!(
            urls,
            vec!["https://www.reddit.com/api/save", "https://www.reddit.com/api/unsave"]
        );
    }

    #[tokio::test]
    async fn report_hides_post() {
        let h = seeded(vec![]);

        h.client.report(URL, "t3_a").await.unwrap();

        assert!(h.client.cache().require_record(URL).unwrap().posts["t3_a"].data.hidden);
        assert_eq!(h.transport.requests()[0].url, "https://www.reddit.com/api/report");
    }

    #[tokio::test]
    async fn failed_request_keeps_optimistic_state() {
        let h = seeded(vec![Reply::Respond(500, String::new())]);

        let err = h.client.hide(URL, "t3_a").await.unwrap_err();

        assert!(matches!(err, HarmlessError::Http { status: 500 }));
        assert!(h.client.cache().require_record(URL).unwrap().posts["t3_a"].data.hidden);
    }

    #[tokio::test]
    async fn action_without_modhash_sends_empty_token() {
        let h = seeded(vec![]);
        h.stores.cache.set("modhash", serde_json::Value::Null).unwrap();

        h.client.save(URL, "t3_a").await.unwrap();
        assert_eq!(h.transport.requests()[0].field("uh"), Some(""));
    }

    #[tokio::test]
    async fn action_on_uncached_page() {
        let h = seeded(vec![]);

        let err = h.client.hide("https://other.example/", "t3_a").await.unwrap_err();
        assert!(matches!(err, HarmlessError::NotCached(_)));
        assert!(h.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn empty_comment_is_rejected() {
        let h = seeded(vec![]);

        let err = h.client.submit_comment(URL, "t3_a", "   ").await.unwrap_err();
        assert!(matches!(err, HarmlessError::EmptyInput));
        assert!(h.transport.requests().is_empty());
    }

    #[tokio::test]
    async fn comment_clears_draft_on_success() {
        let h = seeded(vec![]);
        h.client.cache_comment(URL, "t3_a", "great post").unwrap();
        assert_eq!(
            h.client.cache().require_record(URL).unwrap().posts["t3_a"]
                .saved_comment_text
                .as_deref(),
            Some("great post")
        );

        h.client.submit_comment(URL, "t3_a", "great post").await.unwrap();

        let request = &h.transport.requests()[0];
        assert_eq!(request.url, "https://www.reddit.com/api/comment");
        assert_eq!(request.field("thing_id"), Some("t3_a"));
        assert_eq!(request.field("text"), Some("great post"));
        assert!(h.client.cache().require_record(URL).unwrap().posts["t3_a"]
            .saved_comment_text
            .is_none());
    }

    #[tokio::test]
    async fn comment_keeps_draft_on_login_required() {
        let body = json!({"json": {"errors": [["USER_REQUIRED", "please login", null]]}});
        let h = seeded(vec![Reply::Respond(200, body.to_string())]);
        h.client.cache_comment(URL, "t3_a", "draft").unwrap();

        let err = h.client.submit_comment(URL, "t3_a", "draft").await.unwrap_err();

        assert!(matches!(err, HarmlessError::AuthRequired));
        assert_eq!(
            h.client.cache().require_record(URL).unwrap().posts["t3_a"]
                .saved_comment_text
                .as_deref(),
            Some("draft")
        );
    }

    #[tokio::test]
    async fn comment_appends_plug_when_enabled() {
        let h = seeded(vec![]);
        h.stores.settings.set("shamelessPlug", json!(true)).unwrap();

        h.client.submit_comment(URL, "t3_a", "hello").await.unwrap();

        let text = h.transport.requests()[0].field("text").unwrap().to_string();
        assert!(text.starts_with("hello\n\n*Posted from [Mostly Harmless]"));
    }
}
