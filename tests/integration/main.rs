//! Integration tests for Mostly Harmless

mod cli_tests {
    use assert_cmd::{cargo::cargo_bin_cmd, Command};
    use predicates::prelude::*;
    use tempfile::TempDir;

    /// Command isolated from the user's config and state
    fn harmless(temp: &TempDir) -> Command {
        let mut cmd = cargo_bin_cmd!("mostly-harmless");
        cmd.env("MOSTLY_HARMLESS_CONFIG", temp.path().join("config.toml"))
            .env("MOSTLY_HARMLESS_STATE_DIR", temp.path().join("state"));
        cmd
    }

    fn seed_cache(temp: &TempDir) {
        let state = temp.path().join("state");
        std::fs::create_dir_all(&state).unwrap();
        let cache = serde_json::json!({
            "https://example.com/story": {
                "count": 1,
                "posts": {
                    "t3_abc": {
                        "url": "https://example.com/story",
                        "data": {
                            "name": "t3_abc", "score": 42, "ups": 50, "downs": 8, "likes": null,
                            "hidden": false, "saved": false, "thumbnail": "self",
                            "title": "A story worth reading",
                            "permalink": "/r/rust/comments/abc/a_story/",
                            "domain": "example.com", "author": "someone", "subreddit": "rust",
                            "num_comments": 3, "created_utc": 4102444800.0
                        }
                    }
                },
                "cacheDate": 1700000000,
                "isCommentsPage": false
            }
        });
        std::fs::write(state.join("cache.json"), cache.to_string()).unwrap();
    }

    #[test]
    fn help_displays() {
        let temp = TempDir::new().unwrap();
        harmless(&temp)
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("see what reddit says about a page"));
    }

    #[test]
    fn version_displays() {
        let temp = TempDir::new().unwrap();
        harmless(&temp)
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("mostly-harmless"));
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();
        harmless(&temp)
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("config.toml"));
    }

    #[test]
    fn config_show() {
        let temp = TempDir::new().unwrap();
        harmless(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[api]").and(predicate::str::contains("www.reddit.com")));
    }

    #[test]
    fn config_set_then_show() {
        let temp = TempDir::new().unwrap();
        harmless(&temp)
            .args(["config", "set", "api.domain", "old.reddit.com"])
            .assert()
            .success();
        harmless(&temp)
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("old.reddit.com"));
    }

    #[test]
    fn settings_show_defaults() {
        let temp = TempDir::new().unwrap();
        harmless(&temp)
            .args(["settings", "show"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("cacheTime")
                    .and(predicate::str::contains("5 seconds"))
                    .and(predicate::str::contains("640 px")),
            );
    }

    #[test]
    fn settings_set_and_get() {
        let temp = TempDir::new().unwrap();
        harmless(&temp)
            .args(["settings", "set", "freshCutoff", "91"])
            .assert()
            .success();
        harmless(&temp)
            .args(["settings", "get", "freshCutoff"])
            .assert()
            .success()
            .stdout(predicate::str::diff("91\n"));
    }

    #[test]
    fn settings_rejects_unknown_key() {
        let temp = TempDir::new().unwrap();
        harmless(&temp)
            .args(["settings", "set", "colour", "red"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Unknown setting"));
    }

    #[test]
    fn show_uncached_page_fails() {
        let temp = TempDir::new().unwrap();
        harmless(&temp)
            .args(["show", "https://example.com/never-seen"])
            .assert()
            .failure()
            .stderr(
                predicate::str::contains("No reddit data cached")
                    .and(predicate::str::contains("mostly-harmless lookup")),
            );
    }

    #[test]
    fn show_cached_page() {
        let temp = TempDir::new().unwrap();
        seed_cache(&temp);
        harmless(&temp)
            .args(["show", "https://example.com/story"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("A story worth reading")
                    .and(predicate::str::contains("1 submission(s)")),
            );
    }

    #[test]
    fn show_cached_page_as_html() {
        let temp = TempDir::new().unwrap();
        seed_cache(&temp);
        harmless(&temp)
            .args(["show", "https://example.com/story", "--format", "html"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains(r#"<li id="t3_abc""#)
                    .and(predicate::str::contains(r#"id="upmod_t3_abc""#)),
            );
    }

    #[test]
    fn draft_is_saved_without_network() {
        let temp = TempDir::new().unwrap();
        seed_cache(&temp);
        harmless(&temp)
            .args(["draft", "https://example.com/story", "t3_abc", "half a thought"])
            .assert()
            .success();
        harmless(&temp)
            .args(["show", "https://example.com/story", "--format", "json"])
            .assert()
            .success()
            .stdout(predicate::str::contains("\"savedCommentText\": \"half a thought\""));
    }

    #[test]
    fn empty_comment_is_rejected() {
        let temp = TempDir::new().unwrap();
        seed_cache(&temp);
        harmless(&temp)
            .args(["comment", "https://example.com/story", "t3_abc", "   "])
            .assert()
            .failure()
            .stderr(predicate::str::contains("You can't submit an empty comment."));
    }

    #[test]
    fn report_without_confirmation_is_cancelled() {
        let temp = TempDir::new().unwrap();
        seed_cache(&temp);
        harmless(&temp)
            .args(["report", "https://example.com/story", "t3_abc"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Report cancelled"));
    }

    #[test]
    fn lookup_ignores_unsupported_pages() {
        let temp = TempDir::new().unwrap();
        harmless(&temp)
            .args(["lookup", "chrome://extensions/"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("Click to load data.")
                    .and(predicate::str::contains("Not activated on this page")),
            );
    }
}
