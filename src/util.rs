//! Stateless helpers: URL parsing, regex escaping, epoch time and
//! relative-date formatting.

use crate::i18n;
use chrono::{DateTime, NaiveDateTime, Utc};
use indexmap::IndexMap;
use regex::Regex;
use std::sync::LazyLock;

/// Characters escaped by [`regex_escape`]
const REGEX_SPECIAL: &str = ".?*+^$[]\\(){}-";

/// Build a membership map whose keys are `items` and whose values are empty
pub fn obj_convert<I, S>(items: I) -> IndexMap<String, String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    items
        .into_iter()
        .map(|item| (item.into(), String::new()))
        .collect()
}

/// Backslash-escape regex metacharacters so `s` matches literally
pub fn regex_escape(s: &str) -> String {
    let mut escaped = String::with_capacity(s.len());
    for c in s.chars() {
        if REGEX_SPECIAL.contains(c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Current UTC time in whole seconds since the Unix epoch
pub fn epoch() -> i64 {
    Utc::now().timestamp()
}

/// Visit every entry of `map` in insertion order
pub fn for_each_in<K, V>(map: &IndexMap<K, V>, mut action: impl FnMut(&K, &V)) {
    for (key, value) in map {
        action(key, value);
    }
}

/// Visit every element of `items` in index order
pub fn for_each<T>(items: &[T], action: impl FnMut(&T)) {
    items.iter().for_each(action);
}

/// Components of a parsed URL
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedUrl {
    pub source: String,
    /// Scheme without the trailing colon
    pub protocol: String,
    pub host: String,
    /// Explicit port, empty when absent
    pub port: String,
    /// Raw query including the leading `?`, empty when absent
    pub query: String,
    /// Query parameters; a repeated name keeps its last value
    pub params: IndexMap<String, String>,
    /// Last path segment
    pub file: String,
    /// Fragment without the `#`
    pub hash: String,
    /// Path, always starting with `/`
    pub path: String,
    /// Everything after the host
    pub relative: String,
    /// Path split on `/` after stripping the leading slash
    pub segments: Vec<String>,
}

static URL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?:([A-Za-z][A-Za-z0-9+.\-]*):)?(?://(?:[^/?#@]*@)?([^/?#:]*)(?::(\d*))?)?([^?#]*)(\?[^#]*)?(?:#(.*))?$",
    )
    .expect("URL pattern is valid")
});

/// Decompose `url` into its components
pub fn parse_url(url: &str) -> ParsedUrl {
    let caps = URL_PATTERN.captures(url);
    let group = |i: usize| {
        caps.as_ref()
            .and_then(|c| c.get(i))
            .map(|m| m.as_str())
            .unwrap_or("")
    };

    let protocol = group(1).to_lowercase();
    let host = group(2).to_lowercase();
    let port = group(3).to_string();
    let raw_path = group(4);
    let query = match group(5) {
        "?" => String::new(),
        q => q.to_string(),
    };
    let hash = group(6).to_string();

    let path = if raw_path.starts_with('/') {
        raw_path.to_string()
    } else {
        format!("/{}", raw_path)
    };

    let mut params = IndexMap::new();
    for pair in query.trim_start_matches('?').split('&') {
        if pair.is_empty() {
            continue;
        }
        let mut parts = pair.splitn(2, '=');
        let name = parts.next().unwrap_or_default();
        let value = parts.next().unwrap_or_default();
        // Re-inserting keeps the first position but takes the last value
        params.insert(name.to_string(), value.to_string());
    }

    let file = path
        .rsplit('/')
        .next()
        .filter(|f| !f.is_empty())
        .unwrap_or_default()
        .to_string();

    let mut relative = path.clone();
    relative.push_str(&query);
    if !hash.is_empty() {
        relative.push('#');
        relative.push_str(&hash);
    }

    let segments = path
        .strip_prefix('/')
        .unwrap_or(&path)
        .split('/')
        .map(str::to_string)
        .collect();

    ParsedUrl {
        source: url.to_string(),
        protocol,
        host,
        port,
        query,
        params,
        file,
        hash,
        path,
        relative,
        segments,
    }
}

/// How a relative-time bucket is phrased
#[derive(Debug, Clone, Copy)]
enum Phrase {
    /// Fixed message for past and future
    Fixed(&'static str, &'static str),
    /// Counted message `{key}_ago` / `{key}_from_now`, count = seconds / divisor
    Counted(&'static str, u64),
}

/// Upper bounds in seconds (exclusive) and the phrase used below each
const TIME_FORMATS: [(u64, Phrase); 15] = [
    (60, Phrase::Counted("just_now", 1)),
    (120, Phrase::Fixed("a_minute_ago", "a_minute_from_now")),
    (3_600, Phrase::Counted("minutes", 60)),
    (7_200, Phrase::Fixed("an_hour_ago", "an_hour_from_now")),
    (86_400, Phrase::Counted("hours", 3_600)),
    (172_800, Phrase::Fixed("yesterday", "tomorrow")),
    (604_800, Phrase::Counted("days", 86_400)),
    (1_209_600, Phrase::Fixed("last_week", "next_week")),
    (2_419_200, Phrase::Counted("weeks", 604_800)),
    (4_838_400, Phrase::Fixed("last_month", "next_month")),
    (29_030_400, Phrase::Counted("months", 2_419_200)),
    (58_060_800, Phrase::Fixed("last_year", "next_year")),
    (2_903_040_000, Phrase::Counted("years", 29_030_400)),
    (5_806_080_000, Phrase::Fixed("last_century", "next_century")),
    (58_060_800_000, Phrase::Counted("centuries", 2_903_040_000)),
];

/// Index of the relative-time bucket for an absolute delta in seconds
pub fn bucket_index(seconds: f64) -> Option<usize> {
    TIME_FORMATS
        .iter()
        .position(|(limit, _)| seconds < *limit as f64)
}

/// Describe how long ago (or how far ahead) `date_str` is, relative to now
pub fn pretty_date(date_str: &str) -> String {
    pretty_date_at(date_str, Utc::now())
}

/// Like [`pretty_date`] with an explicit reference time.
///
/// Returns `date_str` unchanged when it cannot be parsed or the delta is
/// beyond the largest bucket.
pub fn pretty_date_at(date_str: &str, now: DateTime<Utc>) -> String {
    let Some(then) = parse_timestamp(date_str) else {
        return date_str.to_string();
    };

    let millis = (now - then).num_milliseconds();
    let future = millis < 0;
    let seconds = millis.unsigned_abs() as f64 / 1000.0;

    let Some(index) = bucket_index(seconds) else {
        return date_str.to_string();
    };

    match TIME_FORMATS[index].1 {
        Phrase::Fixed(past, ahead) => i18n::message(if future { ahead } else { past }, &[]),
        Phrase::Counted(key, divisor) => {
            let token = if future { "from_now" } else { "ago" };
            let count = (seconds / divisor as f64).floor() as u64;
            i18n::message(&format!("{}_{}", key, token), &[&count.to_string()])
        }
    }
}

fn parse_timestamp(s: &str) -> Option<DateTime<Utc>> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    let trimmed = s.trim().trim_end_matches('Z');
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y/%m/%d %H:%M:%S"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(trimmed, fmt).ok())
        .map(|naive| naive.and_utc())
}

/// Format `date` as `YYYY-MM-DDTHH:MM:SSZ` in UTC
pub fn iso_date_string(date: &DateTime<Utc>) -> String {
    date.format("%Y-%m-%dT%H:%M:%SZ").to_string()
}
