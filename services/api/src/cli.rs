use crate::demo::{run_demo, run_quiz, run_score, run_topics, QuizArgs, ScoreArgs};
use crate::server;
use clap::{Args, Parser, Subcommand};
use lingo_coach::error::AppError;

#[derive(Parser, Debug)]
#[command(
    name = "Lingo Coach",
    about = "Score free-text answers and drill vocabulary from the command line",
    version
)]
struct Cli {
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP service (default command)
    Serve(ServeArgs),
    /// Score a free-text answer against a topic
    Score(ScoreArgs),
    /// List the topics available for scoring
    Topics,
    /// Build a multiple-choice quiz from a flashcard deck
    Quiz(QuizArgs),
    /// Score sample answers for every topic
    Demo,
}

#[derive(Args, Debug, Default)]
pub(crate) struct ServeArgs {
    /// Override the configured host for the HTTP server
    #[arg(long)]
    pub(crate) host: Option<String>,
    /// Override the configured port for the HTTP server
    #[arg(long)]
    pub(crate) port: Option<u16>,
}

pub(crate) async fn run() -> Result<(), AppError> {
    let cli = Cli::parse();
    let command = cli
        .command
        .unwrap_or_else(|| Command::Serve(ServeArgs::default()));

    match command {
        Command::Serve(args) => server::run(args).await,
        Command::Score(args) => run_score(args),
        Command::Topics => run_topics(),
        Command::Quiz(args) => run_quiz(args),
        Command::Demo => run_demo(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_serve() {
        let cli = Cli::try_parse_from(["lingo-coach"]).expect("parses");
        assert!(cli.command.is_none());
    }

    #[test]
    fn score_requires_text_or_file() {
        assert!(Cli::try_parse_from(["lingo-coach", "score", "--topic", "security"]).is_err());
        assert!(Cli::try_parse_from([
            "lingo-coach",
            "score",
            "--topic",
            "security",
            "--text",
            "The commander leads.",
            "--file",
            "answer.txt",
        ])
        .is_err());
    }

    #[test]
    fn parses_quiz_options() {
        let cli = Cli::try_parse_from([
            "lingo-coach",
            "quiz",
            "--deck",
            "decks/security.csv",
            "--count",
            "3",
            "--seed",
            "9",
        ])
        .expect("parses");

        match cli.command {
            Some(Command::Quiz(args)) => {
                assert_eq!(args.count, 3);
                assert_eq!(args.seed, Some(9));
            }
            other => panic!("expected quiz command, got {other:?}"),
        }
    }
}
