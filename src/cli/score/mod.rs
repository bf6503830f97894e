//! Score command - runs the quality metrics on a text without any provider

use std::io::Read;
use std::path::PathBuf;

use anyhow::Context;
use clap::Args;

use crate::domain::QualityScorer;

#[derive(Args, Debug)]
pub struct ScoreArgs {
    /// Tokens the text used; estimated from its length when omitted
    #[arg(long)]
    pub tokens: Option<u32>,

    /// File to score; stdin when omitted
    pub file: Option<PathBuf>,
}

pub fn run(args: ScoreArgs) -> anyhow::Result<()> {
    let text = match &args.file {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read stdin")?;
            buf
        }
    };

    let tokens = args.tokens.unwrap_or_else(|| estimate_tokens(&text));
    let metrics = QualityScorer::default().score(&text, tokens);

    println!("{}", serde_json::to_string_pretty(&metrics)?);
    Ok(())
}

/// Roughly four characters per token
fn estimate_tokens(text: &str) -> u32 {
    let chars = text.trim().chars().count();
    u32::try_from(chars.div_ceil(4)).unwrap_or(u32::MAX)
}
