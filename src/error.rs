use std::path::PathBuf;

#[derive(Debug, thiserror::Error)]
pub enum SampleRmsError {
    #[error("usage error: {0}")]
    Usage(String),

    #[error("failed to scan {}: {source}", path.display())]
    Discovery {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    #[error("failed to decode {}: {reason}", path.display())]
    Decode { path: PathBuf, reason: String },

    #[error("failed to write report to {}: {reason}", path.display())]
    Write { path: PathBuf, reason: String },
}

impl SampleRmsError {
    pub fn decode(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        SampleRmsError::Decode {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    pub fn write(path: impl Into<PathBuf>, reason: impl ToString) -> Self {
        SampleRmsError::Write {
            path: path.into(),
            reason: reason.to_string(),
        }
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        match self {
            SampleRmsError::Usage(_) => 2,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, SampleRmsError>;
