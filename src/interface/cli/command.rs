//! CLI 명령 파싱 모듈.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::domain::review::RunOptions;
use crate::domain::snippet::{ActionKind, Language};

#[derive(Debug, Parser)]
#[command(name = "codepilot")]
#[command(about = "AI code review and rewrite from the terminal")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Only print warnings, errors and results
    #[arg(short, long, global = true)]
    quiet: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Review code and report findings by severity
    Review(ActionArgs),
    /// Rewrite code into an optimized, production-ready version
    Rewrite(ActionArgs),
    /// Show effective merged config and credential status
    Config,
}

#[derive(Debug, Args)]
struct ActionArgs {
    /// Python, Java, C++, JavaScript, C or Other
    #[arg(short, long, default_value = "Python")]
    language: Language,

    /// Read code from this file instead of stdin
    #[arg(short, long)]
    file: Option<PathBuf>,
}

#[derive(Debug, PartialEq)]
pub enum CliAction {
    Interactive,
    InspectConfig,
    Run { options: RunOptions, quiet: bool },
}

impl Cli {
    pub fn parse_action() -> CliAction {
        Cli::parse().into_action()
    }

    fn into_action(self) -> CliAction {
        let quiet = self.quiet;
        let run = |kind, args: ActionArgs| CliAction::Run {
            options: RunOptions {
                kind,
                language: args.language,
                file: args.file,
            },
            quiet,
        };

        match self.command {
            None => CliAction::Interactive,
            Some(Commands::Config) => CliAction::InspectConfig,
            Some(Commands::Review(args)) => run(ActionKind::Review, args),
            Some(Commands::Rewrite(args)) => run(ActionKind::Rewrite, args),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliAction {
        Cli::try_parse_from(args).unwrap().into_action()
    }

    #[test]
    fn no_subcommand_starts_shell() {
        assert_eq!(parse(&["codepilot"]), CliAction::Interactive);
        assert_eq!(parse(&["codepilot", "config"]), CliAction::InspectConfig);
    }

    #[test]
    fn review_defaults_to_python_and_stdin() {
        assert_eq!(
            parse(&["codepilot", "review"]),
            CliAction::Run {
                options: RunOptions {
                    kind: ActionKind::Review,
                    language: Language::Python,
                    file: None,
                },
                quiet: false,
            }
        );
    }

    #[test]
    fn rewrite_accepts_language_alias_and_file() {
        assert_eq!(
            parse(&["codepilot", "rewrite", "-l", "c++", "--file", "main.cpp", "-q"]),
            CliAction::Run {
                options: RunOptions {
                    kind: ActionKind::Rewrite,
                    language: Language::Cpp,
                    file: Some(PathBuf::from("main.cpp")),
                },
                quiet: true,
            }
        );
    }

    #[test]
    fn unknown_language_is_rejected() {
        let err = Cli::try_parse_from(["codepilot", "review", "--language", "cobol"]).unwrap_err();
        assert!(err.to_string().contains("unknown language `cobol`"));
    }
}
