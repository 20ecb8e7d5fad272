//! Command-line options.

use std::path::PathBuf;

use crate::DumpError;

/// What to print for each file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Command {
    /// Every token, one per line.
    Tokens,
    /// The marker table, or the text between two markers.
    Markers,
    /// Counts and the most frequent payloads.
    Stats,
}

impl Command {
    /// Parse from command line string.
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "tokens" => Some(Command::Tokens),
            "markers" => Some(Command::Markers),
            "stats" => Some(Command::Stats),
            _ => None,
        }
    }
}

/// Options parsed from command line arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DumpOptions {
    pub command: Command,
    /// Input files, reported in this order.
    pub paths: Vec<PathBuf>,
    /// Stop each file after this many tokens (--limit=N)
    pub limit: Option<usize>,
    /// Print the text between two marker thresholds (--between=A,B)
    pub between: Option<(i64, i64)>,
    /// Most frequent payloads listed by `stats` (--top=N)
    pub top: usize,
}

impl Default for DumpOptions {
    fn default() -> Self {
        Self {
            command: Command::Tokens,
            paths: Vec::new(),
            limit: None,
            between: None,
            top: 10,
        }
    }
}

/// Parse `<command> [options] <file>...`.
///
/// Options and paths may be interleaved after the command. An argument of
/// `--` ends option parsing.
pub fn parse_options(args: &[String]) -> Result<DumpOptions, DumpError> {
    let (command, rest) = args.split_first().ok_or(DumpError::MissingCommand)?;
    let mut options = DumpOptions {
        command: Command::parse(command)
            .ok_or_else(|| DumpError::UnknownCommand(command.clone()))?,
        ..DumpOptions::default()
    };

    let mut only_paths = false;
    for arg in rest {
        if only_paths || !arg.starts_with('-') {
            options.paths.push(PathBuf::from(arg));
        } else if arg == "--" {
            only_paths = true;
        } else if let Some(limit) = arg.strip_prefix("--limit=") {
            options.limit = Some(parse_number("--limit", limit)?);
        } else if let Some(top) = arg.strip_prefix("--top=") {
            options.top = parse_number("--top", top)?;
        } else if let Some(range) = arg.strip_prefix("--between=") {
            options.between = Some(parse_between(range)?);
        } else {
            return Err(DumpError::UnknownOption(arg.clone()));
        }
    }

    if options.paths.is_empty() {
        return Err(DumpError::MissingPath);
    }
    Ok(options)
}

fn parse_number<T: std::str::FromStr>(flag: &'static str, value: &str) -> Result<T, DumpError> {
    value.parse().map_err(|_| DumpError::InvalidValue {
        flag,
        value: value.to_string(),
    })
}

/// `A,B` with `A <= B`.
fn parse_between(value: &str) -> Result<(i64, i64), DumpError> {
    let invalid = || DumpError::InvalidValue {
        flag: "--between",
        value: value.to_string(),
    };
    let (from, to) = value.split_once(',').ok_or_else(invalid)?;
    let from: i64 = from.trim().parse().map_err(|_| invalid())?;
    let to: i64 = to.trim().parse().map_err(|_| invalid())?;
    if from > to {
        return Err(invalid());
    }
    Ok((from, to))
}
