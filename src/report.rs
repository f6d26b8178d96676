use std::fs;
use std::path::Path;
use tracing::debug;

use crate::analyze::AnalysisResult;
use crate::error::{Result, SampleRmsError};

pub const HEADER: [&str; 3] = ["File Name", "Raw RMS", "RMS dBFS"];

/// Renders the report: header line, then one line per result in the given
/// order. Every line, including the last, ends in `\n`.
pub fn render(results: &[AnalysisResult]) -> std::result::Result<String, csv::Error> {
    let mut writer = csv::WriterBuilder::new()
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(Vec::new());

    writer.write_record(HEADER)?;
    for result in results {
        writer.write_record([
            result.file_name.clone(),
            format_value(result.raw_rms),
            format_value(result.rms_dbfs),
        ])?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    // Only ever fed `String` fields.
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Shortest text that parses back to the same value, always with a decimal
/// point for finite numbers (`1.0`, `-6.0206`, `-inf`, `NaN`).
fn format_value(value: f32) -> String {
    format!("{value:?}")
}

/// Replaces whatever is at `path` with the rendered report.
pub fn write_report(path: &Path, results: &[AnalysisResult]) -> Result<()> {
    let content = render(results).map_err(|e| SampleRmsError::write(path, e))?;
    println!("CSV file content\n{}", content);

    if path.exists() {
        debug!("Removing existing file at {}", path.display());
        fs::remove_file(path).map_err(|e| SampleRmsError::write(path, e))?;
    }

    println!("Saving to file at path: {}", path.display());
    fs::write(path, content).map_err(|e| SampleRmsError::write(path, e))?;
    Ok(())
}
