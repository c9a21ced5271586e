//! Error types for the fetch and combine pipeline.
//!
//! Every variant carries enough context (file, URL, path) to diagnose and
//! re-run. Nothing is retried internally; re-invocation is the retry
//! mechanism, made safe by the skip-if-exists checks in both phases.

use crate::download::DownloadError;
use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Fatal error while locating or downloading a component's parts.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The first part (`<prefix>.aa`) is absent: the component has no data
    /// on the mirror at all.
    #[error("first part {filename} does not exist at {url}")]
    FirstPartMissing { filename: String, url: String },

    /// Transport failure (DNS, connect, timeout) while probing a part URL.
    #[error("existence probe for {url} failed")]
    Probe {
        url: String,
        #[source]
        source: curl::Error,
    },

    /// A part that probed as present could not be fully downloaded.
    #[error("failed to download {filename} from {url}")]
    Download {
        filename: String,
        url: String,
        #[source]
        source: DownloadError,
    },
}

/// Fatal error while assembling a component's parts into the combined file.
#[derive(Debug, Error)]
pub enum CombineError {
    /// The fetch directory could not be listed.
    #[error("failed to read fetch directory {}", .dir.display())]
    ListParts {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    /// No local file matched `<prefix>.*` in the fetch directory.
    #[error("no part files matching {prefix}.* found in {}", .dir.display())]
    NoPartsFound { prefix: String, dir: PathBuf },

    /// The combine output directory could not be created.
    #[error("failed to create combine directory {}", .dir.display())]
    CreateDir {
        dir: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A part could not be opened or read during concatenation.
    #[error("failed to read part {}", .path.display())]
    PartRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The combined output (temp file or final rename) could not be written.
    #[error("failed to write combined file {}", .path.display())]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
