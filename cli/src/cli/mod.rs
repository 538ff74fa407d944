use clap::{Parser, Subcommand};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Interactive monitor (default)
    #[command(alias = "tui")]
    Ui,

    /// Print snapshots as JSON lines
    #[command(alias = "raw")]
    Pipe {
        /// Stop after this many snapshots (0 = run forever)
        #[arg(short, long, default_value_t = 0)]
        samples: u32,

        /// Milliseconds between snapshots (defaults to the fast interval)
        #[arg(short, long)]
        interval: Option<u64>,

        #[arg(short, long)]
        compact: bool,
    },

    /// Run each probe once and print what it returned
    Debug,

    /// Show or reset the config file
    Config {
        #[arg(long)]
        path: bool,

        #[arg(long)]
        reset: bool,
    },
}

/// Battery monitor for macOS.
///
/// Samples charge and state every few seconds and battery health about once
/// a minute, and merges both into one view.
#[derive(Debug, Parser)]
#[command(name = "battmon", version, verbatim_doc_comment)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Fast interval in milliseconds
    #[arg(long, global = true)]
    pub fast_ms: Option<u64>,

    /// Slow interval in seconds
    #[arg(long, global = true)]
    pub slow_secs: Option<u64>,

    /// Per-command timeout in milliseconds
    #[arg(long, global = true)]
    pub timeout_ms: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_no_subcommand_means_ui() {
        let cli = Cli::parse_from(["battmon"]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_global_overrides_after_subcommand() {
        let cli = Cli::parse_from(["battmon", "pipe", "-s", "3", "--compact", "--fast-ms", "500"]);
        assert_eq!(cli.fast_ms, Some(500));
        match cli.command {
            Some(Commands::Pipe {
                samples,
                interval,
                compact,
            }) => {
                assert_eq!(samples, 3);
                assert_eq!(interval, None);
                assert!(compact);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }
}
