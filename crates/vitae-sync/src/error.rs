//! Error types for the sync pipeline

/// Errors that abort a sync run.
///
/// Per-record problems (missing dates, missing DOIs) are never errors; they
/// degrade to neutral defaults inside the reconciler.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    /// Missing or invalid local configuration; reported before any work.
    #[error("configuration error: {0}")]
    Config(String),

    /// The metadata request itself failed (connection, timeout, bad URL).
    #[error("metadata fetch failed: {0}")]
    Fetch(#[from] reqwest::Error),

    /// The API answered with a non-success status.
    #[error("metadata API returned HTTP {status} for {url}")]
    Api { status: u16, url: String },

    /// JSON of an unexpected shape, either from the API or while encoding
    /// the web output.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A manual bibliography file exists but could not be parsed.
    #[error("manual bibliography {path}: {source}")]
    Bib {
        path: String,
        #[source]
        source: vitae_bibtex::ParseError,
    },

    /// Reading a manual file or writing an output file failed.
    #[error("I/O error on {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl SyncError {
    pub(crate) fn io(path: impl Into<String>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
