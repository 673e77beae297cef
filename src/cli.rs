use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "insayt-track",
    about = "Send server-side analytics events to an Insayt collector",
    version = env!("GIT_DESCRIBE"),
    after_help = "Logs are written to: ~/.local/share/insayt/logs/insayt-track.log\n\nThe collector URL is read from INSAYT_URL (default: http://localhost:3002)"
)]
pub struct Cli {
    /// Path to config file
    #[arg(short, long, global = true, help = "Path to insayt.yaml config file")]
    pub config: Option<PathBuf>,

    /// Collector base URL, overrides INSAYT_URL and the config file
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Site ID to attribute events to
    #[arg(long, global = true)]
    pub site_id: Option<String>,

    /// Visitor ID to attach to events
    #[arg(long, global = true)]
    pub visitor_id: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Track a pageview
    Pageview {
        /// Page URL or path
        #[arg(value_name = "URL")]
        page_url: String,

        /// Referring URL
        #[arg(long)]
        referrer: Option<String>,

        /// Page title
        #[arg(long)]
        title: Option<String>,
    },

    /// Track a custom event
    Event {
        /// Event name
        name: String,

        /// Event property as key=value (value parsed as JSON when possible)
        #[arg(short, long = "property", value_name = "KEY=VALUE")]
        properties: Vec<String>,
    },

    /// Identify a user
    Identify {
        /// User ID
        user_id: String,

        /// User trait as key=value (value parsed as JSON when possible)
        #[arg(short, long = "trait", value_name = "KEY=VALUE")]
        traits: Vec<String>,
    },

    /// Send a sample pageview, event and identify
    Demo,

    /// Show the effective configuration
    Config,

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}
