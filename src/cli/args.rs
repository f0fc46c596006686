//! CLI argument definitions using clap derive

use clap::{ArgAction, Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Mostly Harmless - see what reddit says about a page
///
/// Looks up a URL on reddit, caches the submissions found for it and lets
/// you vote, save, hide, report and comment on them.
#[derive(Parser, Debug)]
#[command(name = "mostly-harmless")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Increase verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    pub verbose: u8,

    /// Configuration file path
    #[arg(short, long, global = true, env = "MOSTLY_HARMLESS_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the settings and cache stores
    #[arg(long, global = true, env = "MOSTLY_HARMLESS_STATE_DIR")]
    pub state_dir: Option<PathBuf>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Look up a page on reddit and show its badge
    Lookup(LookupArgs),

    /// Show the cached submissions for a page
    Show(ShowArgs),

    /// Vote on a submission
    Vote(VoteArgs),

    /// Save a submission
    Save(PostArgs),

    /// Unsave a submission
    Unsave(PostArgs),

    /// Hide a submission
    Hide(PostArgs),

    /// Unhide a submission
    Unhide(PostArgs),

    /// Report a submission (also hides it)
    Report(ReportArgs),

    /// Comment on a submission
    Comment(CommentArgs),

    /// Save draft comment text for a submission
    Draft(DraftArgs),

    /// Show or change extension settings
    Settings(SettingsArgs),

    /// Show or edit configuration
    Config(ConfigArgs),
}

/// Arguments for the lookup command
#[derive(Args, Debug)]
pub struct LookupArgs {
    /// Page URL
    pub url: String,

    /// Tab the lookup is attributed to
    #[arg(long, default_value_t = 1)]
    pub tab: u32,

    /// Fetch even if a fresh cache record exists
    #[arg(short, long)]
    pub force: bool,
}

/// Output format for show
#[derive(ValueEnum, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable list
    #[default]
    Table,
    /// Cache record as JSON
    Json,
    /// Popup markup
    Html,
}

/// Arguments for the show command
#[derive(Args, Debug)]
pub struct ShowArgs {
    /// Page URL
    pub url: String,

    /// Output format
    #[arg(short, long, value_enum, default_value_t = OutputFormat::Table)]
    pub format: OutputFormat,

    /// Include posts older than the freshness cutoff
    #[arg(short, long)]
    pub all: bool,
}

/// A submission found for a page
#[derive(Args, Debug)]
pub struct PostArgs {
    /// Page URL the submission was found for
    pub url: String,

    /// Submission fullname (e.g. t3_abc123)
    pub fullname: String,
}

/// Vote direction
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Up,
    Down,
}

/// Arguments for the vote command
#[derive(Args, Debug)]
pub struct VoteArgs {
    #[command(flatten)]
    pub post: PostArgs,

    /// Vote direction; repeating a downvote clears it
    #[arg(value_enum)]
    pub direction: Direction,
}

/// Arguments for the report command
#[derive(Args, Debug)]
pub struct ReportArgs {
    #[command(flatten)]
    pub post: PostArgs,

    /// Skip the confirmation prompt
    #[arg(short, long)]
    pub yes: bool,
}

/// Arguments for the comment command
#[derive(Args, Debug)]
pub struct CommentArgs {
    #[command(flatten)]
    pub post: PostArgs,

    /// Comment text (defaults to the saved draft)
    pub text: Option<String>,
}

/// Arguments for the draft command
#[derive(Args, Debug)]
pub struct DraftArgs {
    #[command(flatten)]
    pub post: PostArgs,

    /// Draft text (prompted for when omitted)
    pub text: Option<String>,
}

/// Arguments for the settings command
#[derive(Args, Debug)]
pub struct SettingsArgs {
    #[command(subcommand)]
    pub action: Option<SettingsAction>,
}

/// Settings subcommands
#[derive(Subcommand, Debug)]
pub enum SettingsAction {
    /// Show all settings
    Show,

    /// Print one setting
    Get {
        /// Setting key (e.g. timeoutLength)
        key: String,
    },

    /// Change one setting
    Set {
        /// Setting key (e.g. timeoutLength)
        key: String,

        /// New value, as JSON (`5`, `true`) or a bare string
        value: String,
    },
}

/// Arguments for the config command
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: Option<ConfigAction>,
}

/// Config subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Show current configuration
    Show,

    /// Show configuration file path
    Path,

    /// Initialize default configuration
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },

    /// Set a configuration value
    Set {
        /// Configuration key (e.g., api.domain)
        key: String,

        /// Value to set
        value: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_parses_lookup() {
        let cli = Cli::parse_from(["mostly-harmless", "lookup", "https://example.com/"]);
        match cli.command {
            Commands::Lookup(args) => {
                assert_eq!(args.url, "https://example.com/");
                assert_eq!(args.tab, 1);
                assert!(!args.force);
            }
            _ => panic!("expected Lookup command"),
        }
    }

    #[test]
    fn cli_parses_show_format() {
        let cli = Cli::parse_from([
            "mostly-harmless",
            "show",
            "https://example.com/",
            "--format",
            "html",
            "--all",
        ]);
        match cli.command {
            Commands::Show(args) => {
                assert_eq!(args.format, OutputFormat::Html);
                assert!(args.all);
            }
            _ => panic!("expected Show command"),
        }
    }

    #[test]
    fn cli_parses_vote() {
        let cli = Cli::parse_from([
            "mostly-harmless",
            "vote",
            "https://example.com/",
            "t3_abc",
            "down",
        ]);
        match cli.command {
            Commands::Vote(args) => {
                assert_eq!(args.post.fullname, "t3_abc");
                assert_eq!(args.direction, Direction::Down);
            }
            _ => panic!("expected Vote command"),
        }
    }

    #[test]
    fn cli_parses_report_yes() {
        let cli = Cli::parse_from(["mostly-harmless", "report", "https://example.com/", "t3_a", "-y"]);
        match cli.command {
            Commands::Report(args) => assert!(args.yes),
            _ => panic!("expected Report command"),
        }
    }

    #[test]
    fn cli_comment_text_is_optional() {
        let cli = Cli::parse_from(["mostly-harmless", "comment", "https://example.com/", "t3_a"]);
        match cli.command {
            Commands::Comment(args) => assert_eq!(args.text, None),
            _ => panic!("expected Comment command"),
        }
    }

    #[test]
    fn cli_parses_settings_set() {
        let cli = Cli::parse_from(["mostly-harmless", "settings", "set", "timeoutLength", "16"]);
        match cli.command {
            Commands::Settings(SettingsArgs {
                action: Some(SettingsAction::Set { key, value }),
            }) => {
                assert_eq!(key, "timeoutLength");
                assert_eq!(value, "16");
            }
            _ => panic!("expected Settings set command"),
        }
    }

    #[test]
    fn cli_global_flags() {
        let cli = Cli::parse_from(["mostly-harmless", "--state-dir", "/tmp/mh", "-vv", "settings"]);
        assert_eq!(cli.state_dir, Some(PathBuf::from("/tmp/mh")));
        assert_eq!(cli.verbose, 2);
    }
}
