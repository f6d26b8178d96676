use std::path::Path;
use std::time::Instant;
use tracing::{debug, info, warn};

use crate::args::Config;
use crate::error::{Result, SampleRmsError};
use crate::report::write_report;
use crate::rms::{calculate_rms, to_dbfs};
use crate::scan::find_sample_files;
use crate::wav::read_channel;

/// Loudness of a single file.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisResult {
    pub file_name: String,
    pub raw_rms: f32,
    pub rms_dbfs: f32,
}

impl AnalysisResult {
    pub fn new(file_name: impl Into<String>, raw_rms: f32) -> Self {
        AnalysisResult {
            file_name: file_name.into(),
            raw_rms,
            rms_dbfs: to_dbfs(raw_rms),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    pub analyzed: usize,
    pub skipped: usize,
}

pub fn analyze_file(path: &Path, channel: usize) -> Result<AnalysisResult> {
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string());

    let samples = read_channel(path, channel)?;
    if samples.is_empty() {
        warn!("{} has no sample data", path.display());
    }
    let result = AnalysisResult::new(file_name, calculate_rms(&samples));
    debug!("{:?}", result);
    Ok(result)
}

/// Scans, analyzes every file in walk order, then writes the report.
///
/// Without `keep_going` the first failure aborts the run before any report is
/// written. With it, files that fail to decode are left out of the report.
pub fn run(config: &Config) -> Result<RunSummary> {
    let start = Instant::now();
    let files = find_sample_files(&config.input_dir, &config.extensions)?;
    info!(
        "Found {} sample files under {}",
        files.len(),
        config.input_dir.display()
    );

    let mut results = Vec::with_capacity(files.len());
    let mut skipped = 0;
    for path in &files {
        println!("File: {}", path.display());
        match analyze_file(path, config.channel_index) {
            Ok(result) => {
                println!("RMS: {:?}", result.raw_rms);
                println!("RMS dBFS: {:?}\n", result.rms_dbfs);
                results.push(result);
            }
            Err(err @ SampleRmsError::Decode { .. }) if config.keep_going => {
                warn!("Skipping: {}", err);
                skipped += 1;
            }
            Err(err) => return Err(err),
        }
    }

    write_report(&config.output_path, &results)?;

    info!(
        "Analyzed {} files ({} skipped) in {:.2?}",
        results.len(),
        skipped,
        start.elapsed()
    );
    Ok(RunSummary {
        analyzed: results.len(),
        skipped,
    })
}
