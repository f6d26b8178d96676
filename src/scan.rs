use std::path::{Path, PathBuf};
use tracing::debug;
use walkdir::WalkDir;

use crate::error::{Result, SampleRmsError};

/// Recursively collects files under `dir` whose extension is in `extensions`.
///
/// Matching ignores case. Entries come back in walk order. Any directory that
/// can't be read fails the whole scan.
pub fn find_sample_files(dir: &Path, extensions: &[String]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();

    for entry in WalkDir::new(dir) {
        let entry = entry.map_err(|source| SampleRmsError::Discovery {
            path: source
                .path()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| dir.to_path_buf()),
            source,
        })?;
        // Links are not followed while walking, but a link to a file still counts.
        let is_file = entry.file_type().is_file()
            || (entry.path_is_symlink() && entry.path().is_file());
        if !is_file {
            continue;
        }

        let path = entry.path();
        if has_extension(path, extensions) {
            debug!("Found {}", path.display());
            files.push(path.to_path_buf());
        }
    }

    Ok(files)
}

fn has_extension(path: &Path, extensions: &[String]) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| extensions.iter().any(|e| e.eq_ignore_ascii_case(ext)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn wav() -> Vec<String> {
        vec!["wav".to_string()]
    }

    fn names(files: &[PathBuf]) -> Vec<String> {
        let mut names: Vec<String> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        names.sort();
        names
    }

    #[test]
    fn walks_nested_directories() {
        let dir = tempfile::tempdir().unwrap();
        let nested = dir.path().join("kicks").join("acoustic");
        fs::create_dir_all(&nested).unwrap();
        fs::write(dir.path().join("snare.wav"), b"").unwrap();
        fs::write(nested.join("kick.wav"), b"").unwrap();
        fs::write(nested.join("notes.txt"), b"").unwrap();

        let files = find_sample_files(dir.path(), &wav()).unwrap();
        assert_eq!(names(&files), vec!["kick.wav", "snare.wav"]);
    }

    #[test]
    fn extension_match_ignores_case() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("LOUD.WAV"), b"").unwrap();
        fs::write(dir.path().join("quiet.Wav"), b"").unwrap();
        fs::write(dir.path().join("wav"), b"").unwrap();
        fs::write(dir.path().join("take.wav.bak"), b"").unwrap();

        let files = find_sample_files(dir.path(), &wav()).unwrap();
        assert_eq!(names(&files), vec!["LOUD.WAV", "quiet.Wav"]);
    }

    #[test]
    fn directories_named_like_samples_are_skipped() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("folder.wav")).unwrap();

        assert!(find_sample_files(dir.path(), &wav()).unwrap().is_empty());
    }

    #[cfg(unix)]
    #[test]
    fn keeps_symlinked_samples() {
        let dir = tempfile::tempdir().unwrap();
        let elsewhere = tempfile::tempdir().unwrap();
        let target = elsewhere.path().join("take.wav");
        fs::write(&target, b"").unwrap();
        std::os::unix::fs::symlink(&target, dir.path().join("link.wav")).unwrap();
        std::os::unix::fs::symlink(elsewhere.path().join("gone.wav"), dir.path().join("dangling.wav"))
            .unwrap();

        let files = find_sample_files(dir.path(), &wav()).unwrap();
        assert_eq!(names(&files), vec!["link.wav"]);
    }

    #[test]
    fn custom_extensions() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("a.wav"), b"").unwrap();
        fs::write(dir.path().join("b.wave"), b"").unwrap();

        let files = find_sample_files(dir.path(), &["wave".to_string()]).unwrap();
        assert_eq!(names(&files), vec!["b.wave"]);
    }

    #[test]
    fn missing_directory_is_discovery_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = find_sample_files(&dir.path().join("nope"), &wav()).unwrap_err();
        assert!(matches!(err, SampleRmsError::Discovery { .. }));
    }
}
