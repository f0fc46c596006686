//! Show command - list the cached submissions for a page

use super::App;
use crate::badge;
use crate::cache::{CacheRecord, PostEntry, VoteDir};
use crate::cli::args::{OutputFormat, ShowArgs};
use crate::error::HarmlessResult;
use crate::i18n;
use crate::popup::{self, RenderOptions};
use crate::store::Settings;
use crate::ui::{self, UiContext};
use crate::util;
use chrono::{DateTime, Utc};
use console::style;

/// Execute the show command
pub async fn execute(args: ShowArgs, app: &App) -> HarmlessResult<()> {
    let record = app.cache().require_record(&args.url)?;
    let origin = app.config.api.origin();

    match args.format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&record)?),
        OutputFormat::Html if record.count == 0 => {
            println!("{}", app.popup().create_submit_form(&args.url))
        }
        OutputFormat::Html => {
            let view = app.popup().create_list(
                &args.url,
                RenderOptions {
                    reveal_stale: args.all,
                },
            )?;
            println!("{}", view.markup);
        }
        OutputFormat::Table => {
            let settings = app.stores.settings()?;
            print_table(&args.url, &record, &settings, &origin, args.all);
        }
    }

    Ok(())
}

fn print_table(url: &str, record: &CacheRecord, settings: &Settings, origin: &str, all: bool) {
    let ctx = UiContext::detect();
    ui::intro(&ctx, url);

    if record.count == 0 {
        ui::step_info(&ctx, &i18n::message("submit_page", &[]));
        ui::remark(&ctx, &popup::submit_url(url, origin));
        return;
    }

    if record.is_comments_page {
        ui::step_info(&ctx, &i18n::message("viewing_comments", &[]));
    }

    let now = Utc::now();
    let mut stale = 0;
    util::for_each_in(&record.posts, |_, entry| {
        if !settings.is_fresh(entry.data.created_utc, now.timestamp()) {
            stale += 1;
            if !all {
                return;
            }
        }
        print_entry(entry, origin, now);
    });

    println!();
    println!("{} submission(s)", record.count);
    if stale > 0 && !all {
        ui::remark(
            &ctx,
            &format!("{} older posts are hidden. Use --all to show them.", stale),
        );
    }
}

fn print_entry(entry: &PostEntry, origin: &str, now: DateTime<Utc>) {
    let data = &entry.data;

    let score = match entry.vote_dir() {
        VoteDir::Up => ui::fg(badge::ORANGE).apply_to(format!("▲ {:>5}", data.score)),
        VoteDir::Down => ui::fg(badge::BLUE).apply_to(format!("▼ {:>5}", data.score)),
        VoteDir::Neutral => style(format!("  {:>5}", data.score)).bold(),
    };

    let mut flags = vec![];
    if data.saved {
        flags.push("saved");
    }
    if data.hidden {
        flags.push("hidden");
    }
    if entry.saved_comment_text.is_some() {
        flags.push("draft");
    }

    let created = DateTime::<Utc>::from_timestamp(data.created_utc as i64, 0).unwrap_or(now);
    let when = util::pretty_date_at(&util::iso_date_string(&created), now);

    println!();
    println!("{} {}", score, style(&data.title).bold());
    println!(
        "        {} {} /r/{} · {} comments · {}",
        when,
        style(format!("by {}", data.author)).dim(),
        data.subreddit,
        data.num_comments,
        style(&data.name).dim()
    );
    println!("        {}{}", origin, data.permalink);
    if !flags.is_empty() {
        println!("        [{}]", flags.join(", "));
    }
}
