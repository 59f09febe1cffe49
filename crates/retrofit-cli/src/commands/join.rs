use std::path::PathBuf;

use anyhow::ensure;
use clap::Args;
use retrofit_core::config::CliOverrides;
use retrofit_lexicon::phrases::join_phrases;

use super::Globals;

#[derive(Args, Debug)]
pub struct JoinPhrasesArgs {
    /// Vector file to rewrite in place (plain or .gz)
    file: PathBuf,

    /// Number of components per vector
    #[arg(long)]
    dim: usize,
}

pub fn run(args: JoinPhrasesArgs, globals: &Globals) -> anyhow::Result<()> {
    globals.configure(CliOverrides::default())?;
    ensure!(args.dim > 0, "dimension must be positive");
    let report = join_phrases(&args.file, args.dim)?;
    if !report.passed_through.is_empty() {
        eprintln!(
            "{} of {} lines had too few tokens and were copied unchanged",
            report.passed_through.len(),
            report.lines
        );
    }
    Ok(())
}
