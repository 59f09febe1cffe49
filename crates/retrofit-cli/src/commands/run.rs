use std::path::PathBuf;

use clap::Args;
use retrofit_core::config::{CliOverrides, RunSettings};
use retrofit_core::constants::VERSION;
use retrofit_engine::{retrofit, RetrofitReport};
use retrofit_lexicon::{AlignmentIndex, Lexicon, LoadOptions, VectorStore};
use tracing::info;

use super::Globals;

#[derive(Args, Debug)]
pub struct RunArgs {
    /// Input vector file (plain or .gz)
    #[arg(short, long)]
    input: Option<PathBuf>,

    /// Lexicon file: a head word and its related words per line
    #[arg(short, long)]
    lexicon: Option<PathBuf>,

    /// Alignment index JSON
    #[arg(short = 't', long)]
    alignment: Option<PathBuf>,

    /// Output vector file (.gz for compressed output)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Number of iterations [default: 10]
    #[arg(short = 'n', long)]
    iterations: Option<usize>,

    /// Vector lines hold multi-token words followed by this many values
    #[arg(long)]
    phrase_dimension: Option<usize>,
}

impl RunArgs {
    pub fn overrides(&self) -> CliOverrides {
        CliOverrides {
            vectors: self.input.clone(),
            lexicon: self.lexicon.clone(),
            alignment: self.alignment.clone(),
            output: self.output.clone(),
            iterations: self.iterations,
            phrase_dimension: self.phrase_dimension,
            log_level: None,
        }
    }
}

pub fn run(args: RunArgs, globals: &Globals) -> anyhow::Result<()> {
    let config = globals.configure(args.overrides())?;
    // Rejects a run without lexicon and alignment before any file is read.
    let settings = config.run.resolve()?;
    execute(&settings)?;
    Ok(())
}

/// Load inputs, retrofit, write the result.
pub fn execute(settings: &RunSettings) -> anyhow::Result<RetrofitReport> {
    info!(version = VERSION, iterations = settings.iterations, "starting retrofit run");
    let options = LoadOptions {
        phrase_dimension: settings.phrase_dimension,
        ..Default::default()
    };
    let (anchor, loaded) = VectorStore::load(&settings.vectors, &options)?;
    let lexicon = settings.lexicon.as_deref().map(Lexicon::load).transpose()?;
    let alignment = settings.alignment.as_deref().map(AlignmentIndex::load).transpose()?;

    let (retrofitted, report) = retrofit(&anchor, lexicon.as_ref(), alignment.as_ref(), settings.iterations)?;
    retrofitted.write(&settings.output)?;

    info!(
        words = loaded.accepted,
        skipped_records = loaded.skipped.len(),
        loop_vocabulary = report.loop_vocabulary,
        updated = report.updated,
        iterations = report.iterations,
        output = %settings.output.display(),
        "retrofitted vectors written"
    );
    Ok(report)
}
