use std::env;
use std::path::{Path, PathBuf};

use crate::error::{Result, SampleRmsError};

pub const USAGE: &str = "Usage: samplerms --path <wav_directory> --output <report_file> \
[--channel <index>] [--ext <extension>]... [--keep-going]";

/// Everything a run needs, resolved once from the command line.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub input_dir: PathBuf,
    pub output_path: PathBuf,
    /// Channel analyzed in every file.
    pub channel_index: usize,
    /// Accepted file extensions, compared case-insensitively.
    pub extensions: Vec<String>,
    /// Skip files that fail to decode instead of aborting the batch.
    pub keep_going: bool,
}

impl Config {
    pub fn new(input_dir: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Config {
            input_dir: input_dir.into(),
            output_path: output_path.into(),
            channel_index: 0,
            extensions: vec!["wav".to_string()],
            keep_going: false,
        }
    }

    /// Builds a config from a full argument list, program name first.
    pub fn from_args(args: &[String]) -> Result<Self> {
        let args = args.get(1..).unwrap_or_default();

        let path = flag_value(args, "--path")
            .ok_or_else(|| missing("--path", "Need to pass in a directory for --path"))?;
        let output = flag_value(args, "--output")
            .ok_or_else(|| missing("--output", "Need to pass in a name for the output file"))?;

        let mut config = Config::new(expand_home(path, home_dir().as_deref()), output);

        if let Some(channel) = flag_value(args, "--channel") {
            config.channel_index = channel.parse().map_err(|_| {
                SampleRmsError::Usage(format!("--channel expects a channel index, got {channel:?}"))
            })?;
        } else if args.iter().any(|a| a == "--channel") {
            return Err(missing("--channel", "--channel needs a value"));
        }

        let extensions = flag_values(args, "--ext")?;
        if !extensions.is_empty() {
            config.extensions = extensions
                .into_iter()
                .map(|e| e.trim_start_matches('.').to_string())
                .collect();
        }

        config.keep_going = args.iter().any(|a| a == "--keep-going");

        Ok(config)
    }
}

pub fn wants_help(args: &[String]) -> bool {
    args.iter().skip(1).any(|a| a == "--help" || a == "-h")
}

fn missing(flag: &str, message: &str) -> SampleRmsError {
    SampleRmsError::Usage(format!("{message} ({flag} <value>)\n{USAGE}"))
}

/// Value following the first occurrence of `flag`.
fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    let index = args.iter().position(|a| a == flag)?;
    args.get(index + 1).map(String::as_str)
}

fn flag_values<'a>(args: &'a [String], flag: &str) -> Result<Vec<&'a str>> {
    let mut values = Vec::new();
    for (index, arg) in args.iter().enumerate() {
        if arg == flag {
            let value = args
                .get(index + 1)
                .ok_or_else(|| missing(flag, &format!("{flag} needs a value")))?;
            values.push(value.as_str());
        }
    }
    Ok(values)
}

fn home_dir() -> Option<PathBuf> {
    env::var_os("HOME")
        .or_else(|| env::var_os("USERPROFILE"))
        .filter(|h| !h.is_empty())
        .map(PathBuf::from)
}

/// Expands a leading `~` or `~/`. Other paths are returned untouched.
pub fn expand_home(path: &str, home: Option<&Path>) -> PathBuf {
    match (path, home) {
        ("~", Some(home)) => home.to_path_buf(),
        (p, Some(home)) if p.starts_with("~/") || p.starts_with("~\\") => home.join(&p[2..]),
        (p, _) => PathBuf::from(p),
    }
}
