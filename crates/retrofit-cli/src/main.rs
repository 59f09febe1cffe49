use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

mod commands;

use commands::Globals;

#[derive(Parser, Debug)]
#[command(name = "retrofit")]
#[command(version)]
#[command(about = "Retrofit word vectors to lexicons and morphological alignments", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to a TOML configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log filter (e.g. `info`, `retrofit_engine=debug`)
    #[arg(long, global = true)]
    log_level: Option<String>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Retrofit a vector file
    Run(commands::run::RunArgs),

    /// Build an alignment index from a CatVar morph file
    Index(commands::index::IndexArgs),

    /// Join multi-token words in a vector file, in place
    JoinPhrases(commands::join::JoinPhrasesArgs),
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    let globals = Globals {
        config: cli.config,
        log_level: cli.log_level,
    };

    let result = match cli.command {
        Commands::Run(args) => commands::run::run(args, &globals),
        Commands::Index(args) => commands::index::run(args, &globals),
        Commands::JoinPhrases(args) => commands::join::run(args, &globals),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {}", commands::diagnostic(&err));
            ExitCode::FAILURE
        }
    }
}
