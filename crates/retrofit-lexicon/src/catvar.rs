//! CatVar morph relations.
//!
//! Each line of `English-Morph.txt` is tab-separated:
//! `form_1 \t ... \t form_k \t base \t pattern`.

use std::collections::BTreeSet;
use std::io::BufRead;
use std::path::Path;

use retrofit_core::errors::{LoadError, RecordError};
use tracing::{info, warn};

use crate::io::{open_reader, read_line_lossy};

/// One word family: surface forms derived from `base` by `pattern`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MorphRelation {
    pub forms: Vec<String>,
    pub base: String,
    pub pattern: String,
}

impl MorphRelation {
    /// Parse one tab-separated line. Needs at least one form, a base and a
    /// pattern.
    pub fn parse(line: &str) -> Result<Self, String> {
        let fields: Vec<&str> = line.trim().split('\t').collect();
        if fields.len() < 3 {
            return Err(format!("expected at least 3 tab-separated fields, found {}", fields.len()));
        }
        let n = fields.len();
        Ok(Self {
            forms: fields[..n - 2].iter().map(|f| f.to_string()).collect(),
            base: fields[n - 2].to_string(),
            pattern: fields[n - 1].to_string(),
        })
    }

    /// Read every relation from a morph file. Unparseable lines are logged
    /// and returned alongside.
    pub fn load(path: &Path) -> Result<(Vec<Self>, Vec<RecordError>), LoadError> {
        let mut reader = open_reader(path)?;
        let (relations, skipped) = Self::read(reader.as_mut()).map_err(|e| LoadError::io(path, e))?;
        for record in &skipped {
            warn!(path = %path.display(), line = record.line, reason = %record.reason, "skipping morph relation");
        }
        info!(path = %path.display(), relations = relations.len(), "morph relations read");
        Ok((relations, skipped))
    }

    pub fn read(reader: &mut dyn BufRead) -> std::io::Result<(Vec<Self>, Vec<RecordError>)> {
        let mut relations = Vec::new();
        let mut skipped = Vec::new();
        let (mut raw, mut line) = (Vec::new(), String::new());
        let mut line_no = 0;
        while read_line_lossy(reader, &mut raw, &mut line)? {
            line_no += 1;
            if line.trim().is_empty() {
                continue;
            }
            match Self::parse(&line) {
                Ok(relation) => relations.push(relation),
                Err(reason) => skipped.push(RecordError { line: line_no, reason }),
            }
        }
        Ok((relations, skipped))
    }
}

/// How the criteria of a [`MorphQuery`] combine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MatchMode {
    /// Every given criterion must match.
    #[default]
    All,
    /// At least one given criterion must match.
    Any,
}

/// Filter over morph relations. Unset criteria are ignored; a query with
/// no criteria matches everything.
#[derive(Debug, Clone, Default)]
pub struct MorphQuery {
    /// Matches if any of these appears among the relation's forms.
    pub forms: Option<BTreeSet<String>>,
    pub base: Option<String>,
    pub pattern: Option<String>,
    pub mode: MatchMode,
}

impl MorphQuery {
    pub fn is_unconstrained(&self) -> bool {
        self.forms.is_none() && self.base.is_none() && self.pattern.is_none()
    }

    pub fn matches(&self, relation: &MorphRelation) -> bool {
        let checks = [
            self.forms
                .as_ref()
                .map(|forms| relation.forms.iter().any(|f| forms.contains(f))),
            self.base.as_ref().map(|base| *base == relation.base),
            self.pattern.as_ref().map(|pattern| *pattern == relation.pattern),
        ];
        let mut given = checks.iter().flatten().peekable();
        if given.peek().is_none() {
            return true;
        }
        match self.mode {
            MatchMode::All => given.all(|&hit| hit),
            MatchMode::Any => given.any(|&hit| hit),
        }
    }

    pub fn search<'a>(&self, relations: &'a [MorphRelation]) -> Vec<&'a MorphRelation> {
        relations.iter().filter(|r| self.matches(r)).collect()
    }
}
