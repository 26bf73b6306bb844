use clap::Parser;
use std::path::PathBuf;

/// Turn twitter lists and searches into a single Atom feed on stdout.
#[derive(Parser, Debug)]
#[command(name = "birdfeed")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Feed name, used as the Atom id and title.
    ///
    /// Optional at the parser level so a missing name is reported as an
    /// invocation error with its own exit status.
    #[arg(short = 'n', long = "name")]
    pub name: Option<String>,

    /// Name of a list owned by the configured account (repeatable).
    #[arg(short = 'l', long = "list")]
    pub lists: Vec<String>,

    /// Search query (repeatable).
    #[arg(short = 's', long = "search")]
    pub searches: Vec<String>,

    /// Keep tweets starting with "RT @handle: ".
    #[arg(long)]
    pub retweets: bool,

    /// Accepted language code; repeat or separate with commas.
    #[arg(long = "lang", value_delimiter = ',')]
    pub languages: Vec<String>,

    /// Configuration file; defaults to the per-user config.yaml when present.
    #[arg(long, env = "BIRDFEED_CONFIG")]
    pub config: Option<PathBuf>,

    /// Duplicate logs to stderr at debug level.
    #[arg(short, long)]
    pub verbose: bool,

    /// Emit JSON log lines.
    #[arg(long)]
    pub log_json: bool,
}
