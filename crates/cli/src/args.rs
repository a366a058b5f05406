use clap::{Parser, Subcommand, ValueEnum};
use folio_core::{RevealPace, Theme};

#[derive(Parser)]
#[command(name = "folio", version, about = "Terminal front end for the folio portfolio site")]
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Reveal text one token at a time, then print it styled
    Reveal(RevealArgs),
    /// Ask the portfolio assistant
    Ask(AskArgs),
    /// Cache router lifecycle
    #[command(subcommand)]
    Cache(CacheCommand),
}

#[derive(clap::Args)]
pub struct RevealArgs {
    pub text: String,

    /// Show the whole text at once
    #[arg(long)]
    pub instant: bool,

    #[arg(long, value_enum, default_value_t = PaceArg::Reply)]
    pub pace: PaceArg,

    /// Theme id (vulcan, emerald, nebula, midnight); defaults to the configured theme
    #[arg(long)]
    pub theme: Option<Theme>,
}

#[derive(clap::Args)]
pub struct AskArgs {
    /// Without a question the assistant's greeting is shown
    pub question: Option<String>,

    #[arg(long)]
    pub theme: Option<Theme>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum CacheCommand {
    /// Precache the application shell into the current static set
    Install,
    /// Install, then delete cache sets from older generations
    Activate,
    /// List cache sets with their entry counts
    Sets,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum PaceArg {
    Reply,
    Notice,
}

impl From<PaceArg> for RevealPace {
    fn from(pace: PaceArg) -> Self {
        match pace {
            PaceArg::Reply => RevealPace::Reply,
            PaceArg::Notice => RevealPace::Notice,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_debug_assert() {
        Cli::command().debug_assert();
    }

    #[test]
    fn reveal_parses_with_defaults() {
        let cli = Cli::try_parse_from(["folio", "reveal", "hello **there**"]).expect("parse should succeed");
        match cli.cmd {
            Command::Reveal(args) => {
                assert_eq!(args.text, "hello **there**");
                assert!(!args.instant);
                assert_eq!(args.pace, PaceArg::Reply);
                assert_eq!(args.theme, None);
            }
            _ => panic!("expected Command::Reveal"),
        }
    }

    #[test]
    fn reveal_parses_explicit_values() {
        let cli = Cli::try_parse_from(["folio", "reveal", "x", "--instant", "--pace", "notice", "--theme", "Nebula"])
            .expect("parse should succeed");
        match cli.cmd {
            Command::Reveal(args) => {
                assert!(args.instant);
                assert_eq!(RevealPace::from(args.pace), RevealPace::Notice);
                assert_eq!(args.theme, Some(Theme::Nebula));
            }
            _ => panic!("expected Command::Reveal"),
        }
    }

    #[test]
    fn ask_question_is_optional() {
        let cli = Cli::try_parse_from(["folio", "ask"]).expect("parse should succeed");
        match cli.cmd {
            Command::Ask(args) => assert_eq!(args.question, None),
            _ => panic!("expected Command::Ask"),
        }

        let cli = Cli::try_parse_from(["folio", "ask", "Where do you study?"]).expect("parse should succeed");
        match cli.cmd {
            Command::Ask(args) => assert_eq!(args.question.as_deref(), Some("Where do you study?")),
            _ => panic!("expected Command::Ask"),
        }
    }

    #[test]
    fn unknown_theme_is_rejected() {
        assert!(Cli::try_parse_from(["folio", "reveal", "x", "--theme", "sepia"]).is_err());
    }

    #[test]
    fn cache_subcommands_parse() {
        let cli = Cli::try_parse_from(["folio", "cache", "activate"]).expect("parse should succeed");
        match cli.cmd {
            Command::Cache(cmd) => assert_eq!(cmd, CacheCommand::Activate),
            _ => panic!("expected Command::Cache"),
        }
    }
}
