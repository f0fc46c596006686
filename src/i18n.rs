//! Message catalog
//!
//! Stands in for the host's localization lookup. Messages use `$1`, `$2`
//! placeholders which are filled from the substitution list in order.
//! Unknown keys resolve to the key itself.

/// Look up `key` and fill its placeholders from `substitutions`
pub fn message(key: &str, substitutions: &[&str]) -> String {
    let mut text = template(key).unwrap_or(key).to_string();
    for (i, sub) in substitutions.iter().enumerate().rev() {
        text = text.replace(&format!("${}", i + 1), sub);
    }
    text
}

fn template(key: &str) -> Option<&'static str> {
    let text = match key {
        // Relative dates
        "just_now_ago" => "just now",
        "just_now_from_now" => "in a moment",
        "a_minute_ago" => "a minute ago",
        "a_minute_from_now" => "in a minute",
        "minutes_ago" => "$1 minutes ago",
        "minutes_from_now" => "in $1 minutes",
        "an_hour_ago" => "an hour ago",
        "an_hour_from_now" => "in an hour",
        "hours_ago" => "$1 hours ago",
        "hours_from_now" => "in $1 hours",
        "yesterday" => "yesterday",
        "tomorrow" => "tomorrow",
        "days_ago" => "$1 days ago",
        "days_from_now" => "in $1 days",
        "last_week" => "last week",
        "next_week" => "next week",
        "weeks_ago" => "$1 weeks ago",
        "weeks_from_now" => "in $1 weeks",
        "last_month" => "last month",
        "next_month" => "next month",
        "months_ago" => "$1 months ago",
        "months_from_now" => "in $1 months",
        "last_year" => "last year",
        "next_year" => "next year",
        "years_ago" => "$1 years ago",
        "years_from_now" => "in $1 years",
        "last_century" => "last century",
        "next_century" => "next century",
        "centuries_ago" => "$1 centuries ago",
        "centuries_from_now" => "in $1 centuries",

        // Badge
        "click_to_load" => "Click to load data.",
        "not_activated" => "Not activated on this page. Click to load data.",
        "loading" => "Loading...",
        "viewing_comments" => "You are viewing the comments for this post.",
        "submit_page" => "Not submitted yet. Click to submit this page.",
        "submitted_num_times" => "Submitted $1 times.",
        "api_error" => "reddit API error: HTTP $1",
        "api_timeout" => "reddit took longer than $1 seconds to respond.",
        "login" => "You must be logged in to reddit to do that.",

        // Popup
        "score" => "$1 up, $2 down",
        "view_on_reddit" => "View on reddit",
        "submitted_when" => "submitted $1",
        "by" => "by",
        "to" => "to",
        "add_comment_zero" => "comment",
        "add_comment_one" => "1 comment",
        "add_comment_many" => "$1 comments",
        "action_share" => "share",
        "action_save" => "save",
        "action_unsave" => "unsave",
        "action_hide" => "hide",
        "action_unhide" => "unhide",
        "action_report" => "report",
        "action_reported" => "reported",
        "report_confirm" => "are you sure?",
        "leave_comment" => "Leave a comment",
        "button_submit" => "submit",
        "button_hide" => "hide",
        "submitting" => "submitting...",
        "error_empty" => "You can't submit an empty comment.",
        "error_not_cached" => "This page has not been looked up yet.",
        "error_retry" => "Try again in a moment.",
        "stale_posts_hiding" => "$1 older posts are hidden. Show them.",
        "stale_posts_showing" => "Showing older posts.",
        "submit_link" => "Submit this page to reddit",
        _ => return None,
    };
    Some(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fills_placeholders_in_order() {
        assert_eq!(message("score", &["10", "2"]), "10 up, 2 down");
        assert_eq!(message("minutes_ago", &["5"]), "5 minutes ago");
    }

    #[test]
    fn unknown_key_falls_back_to_key() {
        assert_eq!(message("no_such_key", &[]), "no_such_key");
    }
}
