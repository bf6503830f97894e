use clap::Parser;
use llm_param_lab::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Serve => cli::serve::run().await,
        Command::Score(args) => cli::score::run(args),
    }
}
