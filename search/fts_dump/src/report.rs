//! Per-file reports.
//!
//! Each file is read as raw bytes (no charset decoding), tokenized once,
//! and rendered to a string according to the command. Rendering is kept
//! separate from printing so files can be processed in parallel and printed
//! in argument order.

use std::fmt::Write;
use std::ops::ControlFlow;
use std::path::{Path, PathBuf};

use fts_tokenizer::{Completion, MarkerIndex, Token, Tokenizer, TOKEN_BUF_SIZE};
use rayon::prelude::*;
use rustc_hash::FxHashMap;
use tracing::debug;

use crate::{Command, DumpError, DumpOptions};

/// The outcome for one input file.
#[derive(Debug)]
pub struct FileReport {
    pub path: PathBuf,
    pub result: Result<String, DumpError>,
}

/// Process every file in `options`, in parallel, one tokenizer per file.
///
/// Reports come back in argument order.
pub fn run(options: &DumpOptions) -> Vec<FileReport> {
    options
        .paths
        .par_iter()
        .map(|path| FileReport {
            path: path.clone(),
            result: run_file(path, options),
        })
        .collect()
}

/// Read and report a single file.
pub fn run_file(path: &Path, options: &DumpOptions) -> Result<String, DumpError> {
    let input = std::fs::read(path).map_err(|e| DumpError::from_io(path, e))?;
    debug!(path = %path.display(), bytes = input.len(), "tokenizing");
    render(path, &input, options)
}

/// Tokens pulled from one input, and whether the scan ran to the end.
struct Scan {
    tokens: Vec<Token>,
    completion: Completion,
}

fn scan(input: &[u8], limit: Option<usize>) -> Scan {
    if limit == Some(0) {
        return Scan {
            tokens: Vec::new(),
            completion: Completion::Stopped,
        };
    }
    let mut tokens = Vec::new();
    let completion = Tokenizer::new(input).drive(|token| {
        tokens.push(token);
        if limit.is_some_and(|n| tokens.len() >= n) {
            ControlFlow::Break(())
        } else {
            ControlFlow::Continue(())
        }
    });
    Scan { tokens, completion }
}

/// Render the report for `input` (read from `path`).
pub fn render(path: &Path, input: &[u8], options: &DumpOptions) -> Result<String, DumpError> {
    let scan = scan(input, options.limit);
    match options.command {
        Command::Tokens => render_tokens(&scan.tokens),
        Command::Markers => match options.between {
            Some((from, to)) => render_between(path, input, &scan.tokens, from, to),
            None => render_markers(input, &scan.tokens),
        },
        Command::Stats => render_stats(input, &scan, options.top),
    }
}

/// `position<TAB>payload` for content, `@offset<TAB>payload` for markers.
fn render_tokens(tokens: &[Token]) -> Result<String, DumpError> {
    let mut out = String::new();
    for token in tokens {
        if token.is_marker() {
            writeln!(out, "@{}\t{token}", token.position())?;
        } else {
            writeln!(out, "{}\t{token}", token.position())?;
        }
    }
    Ok(out)
}

/// `threshold<TAB>offset<TAB>span-length` per marker.
fn render_markers(input: &[u8], tokens: &[Token]) -> Result<String, DumpError> {
    let index = MarkerIndex::from_tokens(tokens.iter().copied(), input.len());
    let mut out = String::new();
    for (threshold, offset) in index.iter() {
        let span = index.span_for(threshold);
        writeln!(out, "{threshold}\t{offset}\t{}", span.len())?;
    }
    Ok(out)
}

/// The input text between two markers.
fn render_between(
    path: &Path,
    input: &[u8],
    tokens: &[Token],
    from: i64,
    to: i64,
) -> Result<String, DumpError> {
    let index = MarkerIndex::from_tokens(tokens.iter().copied(), input.len());
    let span = index.span_between(from, to).ok_or_else(|| {
        let threshold = if index.offset_of(from).is_none() { from } else { to };
        DumpError::MarkerNotFound {
            threshold,
            path: path.to_path_buf(),
        }
    })?;
    Ok(String::from_utf8_lossy(&input[span]).into_owned())
}

fn render_stats(input: &[u8], scan: &Scan, top: usize) -> Result<String, DumpError> {
    let mut frequency: FxHashMap<[u8; TOKEN_BUF_SIZE], u64> = FxHashMap::default();
    let mut markers = 0usize;
    let mut max_position = None;
    for token in &scan.tokens {
        if token.is_marker() {
            markers += 1;
        } else {
            *frequency.entry(*token.as_raw()).or_default() += 1;
            max_position = max_position.max(Some(token.position()));
        }
    }

    let mut out = String::new();
    writeln!(out, "bytes\t{}", input.len())?;
    writeln!(out, "tokens\t{}", scan.tokens.len() - markers)?;
    writeln!(out, "markers\t{markers}")?;
    writeln!(out, "distinct\t{}", frequency.len())?;
    match max_position {
        Some(pos) => writeln!(out, "max_position\t{pos}")?,
        None => writeln!(out, "max_position\t-")?,
    }
    let completion = match scan.completion {
        Completion::Finished => "finished",
        Completion::Stopped => "stopped",
    };
    writeln!(out, "scan\t{completion}")?;

    let mut ranked: Vec<([u8; TOKEN_BUF_SIZE], u64)> = frequency.into_iter().collect();
    // Most frequent first, ties broken by payload bytes for stable output.
    ranked.sort_unstable_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));
    for (raw, count) in ranked.into_iter().take(top) {
        let len = usize::from(raw[0]);
        writeln!(out, "top\t{count}\t{}", String::from_utf8_lossy(&raw[1..=len]))?;
    }
    Ok(out)
}
