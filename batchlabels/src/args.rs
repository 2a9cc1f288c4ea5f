use clap::{ArgAction, Parser, ValueEnum};

pub const DEFAULT_API_URL: &str = "https://api.github.com/";

const AFTER_HELP: &str = "\
LABEL can be one of: label, label#color, issue:label#color or issue1,issue2:labelA#color,labelB#color
color is the hex color of the label, without the leading #.
A label without issues is added to or removed from every open issue in the repositories that follow it.
With --hacktoberfest, labels that are plain integers are treated as the issue IDs to label.

REPO must be given in owner/name format.";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Command {
    Add,
    Remove,
}

#[derive(Debug, Parser)]
#[clap(
    name = "batchlabels",
    version,
    disable_version_flag = true,
    about = "Add or remove labels in batches to/from GitHub issues and pull requests",
    after_help = AFTER_HELP
)]
pub struct Args {
    #[clap(
        short = 'a',
        long = "auth",
        help = "Repository auth token",
        env = "BATCHLABELS_AUTH_TOKEN",
        hide_env_values = true
    )]
    pub auth_token: Option<String>,

    #[clap(
        short = 'i',
        long = "issues",
        help = "Only apply labels to issues and not pull requests",
        conflicts_with = "only_pull_requests"
    )]
    pub only_issues: bool,

    #[clap(
        short = 'p',
        long = "pull-requests",
        help = "Only apply labels to pull requests"
    )]
    pub only_pull_requests: bool,

    #[clap(
        long = "hacktoberfest",
        help = "Add the \"hacktoberfest\" label to the given issue IDs or, if none are given, to all open issues (not pull requests)"
    )]
    pub hacktoberfest: bool,

    #[clap(
        long = "api-url",
        help = "GitHub REST API base URL",
        env = "BATCHLABELS_API_URL",
        default_value = DEFAULT_API_URL
    )]
    pub api_url: String,

    #[clap(short = 'v', long = "version", help = "Print version", action = ArgAction::Version)]
    version: (),

    #[clap(value_enum, help = "What to do with the labels")]
    pub command: Command,

    #[clap(
        required = true,
        value_name = "LABEL|REPO",
        help = "Labels to apply, each followed by the repositories they apply to"
    )]
    pub targets: Vec<String>,
}
