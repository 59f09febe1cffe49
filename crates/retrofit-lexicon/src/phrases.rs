//! In-place repair of vector files whose words contain spaces.
//!
//! Some embedding dumps write multi-word phrases verbatim (`new york 0.1 ...`),
//! which breaks the one-token-per-word format. Given the true dimension, the
//! leading tokens of each line are joined with `_`.

use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use retrofit_core::errors::{LoadError, RecordError};
use tracing::{info, warn};

use crate::io::{is_gzip, open_reader, read_line_lossy, OutputSink};

/// Summary of a rewrite.
#[derive(Debug, Default, Clone)]
pub struct JoinReport {
    pub lines: usize,
    /// Lines whose word had more than one token.
    pub joined: usize,
    /// Lines with too few tokens, copied through unchanged.
    pub passed_through: Vec<RecordError>,
}

/// Join the word tokens of one line. `None` if the line has no word part.
pub fn join_line(line: &str, dimension: usize) -> Option<(String, bool)> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    if tokens.len() <= dimension {
        return None;
    }
    let split = tokens.len() - dimension;
    let mut out = tokens[..split].join("_");
    for value in &tokens[split..] {
        out.push(' ');
        out.push_str(value);
    }
    Some((out, split > 1))
}

/// Rewrite `path` in place via a hidden sibling temp file and a rename.
pub fn join_phrases(path: &Path, dimension: usize) -> Result<JoinReport, LoadError> {
    let temp = temp_path(path);
    let mut report = JoinReport::default();

    {
        let mut reader = open_reader(path)?;
        let mut sink = OutputSink::create_with(&temp, is_gzip(path))?;
        let (mut raw, mut line) = (Vec::new(), String::new());
        while read_line_lossy(reader.as_mut(), &mut raw, &mut line).map_err(|e| LoadError::io(path, e))? {
            report.lines += 1;
            let trimmed = line.trim_end_matches(|c: char| c == '\n' || c == '\r');
            let rewritten = match join_line(trimmed, dimension) {
                Some((text, joined)) => {
                    if joined {
                        report.joined += 1;
                    }
                    text
                }
                None => {
                    if !trimmed.trim().is_empty() {
                        report.passed_through.push(RecordError {
                            line: report.lines,
                            reason: format!("fewer than {} tokens", dimension + 1),
                        });
                    }
                    trimmed.to_string()
                }
            };
            writeln!(sink, "{rewritten}").map_err(|e| LoadError::io(&temp, e))?;
        }
        sink.finish().map_err(|e| LoadError::io(&temp, e))?;
    }

    fs::rename(&temp, path).map_err(|e| LoadError::io(path, e))?;
    for record in &report.passed_through {
        warn!(path = %path.display(), line = record.line, reason = %record.reason, "line copied unchanged");
    }
    info!(path = %path.display(), lines = report.lines, joined = report.joined, "phrases joined");
    Ok(report)
}

fn temp_path(path: &Path) -> PathBuf {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    path.with_file_name(format!(".{name}.tmp"))
}
