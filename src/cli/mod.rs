//! CLI module for the parameter lab
//!
//! - `serve`: run the HTTP API
//! - `score`: score a text offline and print its quality metrics

pub mod score;
pub mod serve;

use clap::{Parser, Subcommand};

/// LLM Parameter Lab - compare generation parameters side by side
#[derive(Parser)]
#[command(name = "llm-param-lab")]
#[command(version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Run the HTTP API server
    Serve,

    /// Print the quality metrics of a text read from a file or stdin
    Score(score::ScoreArgs),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_serve() {
        let cli = Cli::try_parse_from(["llm-param-lab", "serve"]).unwrap();
        assert!(matches!(cli.command, Command::Serve));
    }

    #[test]
    fn test_parse_score() {
        let cli =
            Cli::try_parse_from(["llm-param-lab", "score", "--tokens", "120", "answer.txt"])
                .unwrap();

        match cli.command {
            Command::Score(args) => {
                assert_eq!(args.tokens, Some(120));
                assert_eq!(args.file.as_deref(), Some(std::path::Path::new("answer.txt")));
            }
            Command::Serve => panic!("expected score"),
        }
    }

    #[test]
    fn test_score_reads_stdin_by_default() {
        let cli = Cli::try_parse_from(["llm-param-lab", "score"]).unwrap();
        assert!(matches!(cli.command, Command::Score(ref args) if args.file.is_none()));
    }
}
