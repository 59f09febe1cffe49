use std::collections::BTreeSet;
use std::path::PathBuf;

use clap::Args;
use retrofit_core::config::CliOverrides;
use retrofit_lexicon::{AlignmentIndex, MatchMode, MorphQuery, MorphRelation};
use tracing::{debug, info};

use super::Globals;

#[derive(Args, Debug)]
pub struct IndexArgs {
    /// CatVar morph file: forms, base and pattern, tab-separated
    #[arg(short, long)]
    morph: PathBuf,

    /// Output index JSON
    #[arg(short, long)]
    output: PathBuf,

    /// Keep relations with this pattern label
    #[arg(long)]
    pattern: Option<String>,

    /// Keep relations with this base form
    #[arg(long)]
    base: Option<String>,

    /// Keep relations listing this surface form (repeatable)
    #[arg(long = "form")]
    forms: Vec<String>,

    /// Keep relations matching any given filter instead of all of them
    #[arg(long)]
    any: bool,
}

impl IndexArgs {
    pub fn query(&self) -> MorphQuery {
        MorphQuery {
            forms: (!self.forms.is_empty()).then(|| self.forms.iter().cloned().collect::<BTreeSet<_>>()),
            base: self.base.clone(),
            pattern: self.pattern.clone(),
            mode: if self.any { MatchMode::Any } else { MatchMode::All },
        }
    }
}

pub fn run(args: IndexArgs, globals: &Globals) -> anyhow::Result<()> {
    globals.configure(CliOverrides::default())?;
    build_index(&args)?;
    Ok(())
}

/// Read relations, keep the ones the filters select, save the index.
pub fn build_index(args: &IndexArgs) -> anyhow::Result<AlignmentIndex> {
    let (relations, skipped) = MorphRelation::load(&args.morph)?;
    let query = args.query();
    if query.is_unconstrained() {
        debug!("no filters given, indexing every relation");
    }
    let selected = query.search(&relations);
    let index = AlignmentIndex::build(selected.iter().copied());
    index.save(&args.output)?;

    info!(
        relations = relations.len(),
        selected = selected.len(),
        skipped = skipped.len(),
        patterns = index.pattern_count(),
        pairs = index.pair_count(),
        output = %args.output.display(),
        "alignment index saved"
    );
    Ok(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use retrofit_fixtures::fixture_path;

    fn args(output: PathBuf) -> IndexArgs {
        IndexArgs {
            morph: fixture_path("catvar_morph.txt"),
            output,
            pattern: None,
            base: None,
            forms: Vec::new(),
            any: false,
        }
    }

    #[test]
    fn unfiltered_index_round_trips() {
        let dir = tempfile::TempDir::new().unwrap();
        let output = dir.path().join("index.json");
        let built = build_index(&args(output.clone())).unwrap();
        let loaded = AlignmentIndex::load(&output).unwrap();
        assert_eq!(built.pattern_count(), loaded.pattern_count());
        assert_eq!(built.pair_count(), loaded.pair_count());
    }

    #[test]
    fn pattern_filter_narrows_the_index() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut args = args(dir.path().join("plural.json"));
        args.pattern = Some("plural".into());
        let index = build_index(&args).unwrap();
        let patterns: Vec<&str> = index.patterns().map(|(p, _)| p).collect();
        assert_eq!(patterns, vec!["plural", "rplural"]);
    }

    #[test]
    fn any_mode_unions_filters() {
        let dir = tempfile::TempDir::new().unwrap();
        let mut args = args(dir.path().join("union.json"));
        args.pattern = Some("past".into());
        args.forms = vec!["cats".into()];
        args.any = true;
        let index = build_index(&args).unwrap();
        let patterns: Vec<&str> = index.patterns().map(|(p, _)| p).collect();
        assert_eq!(patterns, vec!["past", "plural", "rpast", "rplural"]);
        assert_eq!(index.pairs("plural").unwrap().len(), 1);
    }
}
