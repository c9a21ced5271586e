//! Assembly of downloaded parts into the combined archive.
//!
//! Driven purely by the files present in the fetch directory at combine
//! time, independent of what the fetcher downloaded in the same run, so a
//! combine-only re-run works.

use crate::config::{ArchiveConfig, Component};
use crate::error::CombineError;
use crate::storage::TempFileWriter;
use std::fs::{self, File};
use std::io::Read;
use std::path::{Path, PathBuf};

/// Suffix appended to the combined filename while assembly is in progress.
pub const COMBINE_SUFFIX: &str = ".tmp";

const BUF_SIZE: usize = 64 * 1024;

/// Concatenates `component`'s parts, in suffix order, into the combined
/// output file. Returns immediately when the output already exists.
pub fn combine_split_files(
    cfg: &ArchiveConfig,
    component: &Component,
    output_root: &Path,
) -> Result<(), CombineError> {
    let combined = cfg.combined_file_path(output_root, component);
    if combined.exists() {
        tracing::info!(
            component = %component.directory,
            path = %combined.display(),
            "combined file already exists, skipping combine"
        );
        return Ok(());
    }

    let fetch_dir = cfg.fetch_dir(output_root, component);
    let parts = list_parts(&fetch_dir, &component.file_prefix)?;
    if parts.is_empty() {
        return Err(CombineError::NoPartsFound {
            prefix: component.file_prefix.clone(),
            dir: fetch_dir,
        });
    }

    tracing::info!(
        component = %component.directory,
        parts = parts.len(),
        output = %combined.display(),
        "combining split files"
    );

    let combine_dir = cfg.combine_dir(output_root);
    fs::create_dir_all(&combine_dir).map_err(|e| CombineError::CreateDir {
        dir: combine_dir,
        source: e,
    })?;

    concat_parts(&parts, &combined)?;
    tracing::info!(path = %combined.display(), "combined file written");
    Ok(())
}

/// Regular files in `dir` named `<prefix>.<anything>`, sorted ascending.
/// The fixed-width two-letter suffix makes lexical filename order the part
/// order.
pub fn list_parts(dir: &Path, prefix: &str) -> Result<Vec<PathBuf>, CombineError> {
    let list_err = |e| CombineError::ListParts {
        dir: dir.to_path_buf(),
        source: e,
    };
    let entries = fs::read_dir(dir).map_err(list_err)?;

    let wanted = format!("{prefix}.");
    let mut parts = Vec::new();
    for entry in entries {
        let entry = entry.map_err(list_err)?;
        if !entry.file_type().map_err(list_err)?.is_file() {
            continue;
        }
        if entry.file_name().to_string_lossy().starts_with(&wanted) {
            parts.push(entry.path());
        }
    }
    parts.sort();
    Ok(parts)
}

/// Streams each part, in the given order, into a temp file next to `output`
/// and renames it into place. The temp file is removed on every error path.
fn concat_parts(parts: &[PathBuf], output: &Path) -> Result<(), CombineError> {
    let output_err = |e| CombineError::OutputWrite {
        path: output.to_path_buf(),
        source: e,
    };
    let mut out = TempFileWriter::create(output, COMBINE_SUFFIX).map_err(output_err)?;

    let mut buf = [0u8; BUF_SIZE];
    for part in parts {
        tracing::debug!(part = %part.display(), "appending part");
        let part_err = |e| CombineError::PartRead {
            path: part.clone(),
            source: e,
        };
        let mut file = File::open(part).map_err(part_err)?;
        loop {
            let n = file.read(&mut buf).map_err(part_err)?;
            if n == 0 {
                break;
            }
            out.write_all(&buf[..n]).map_err(output_err)?;
        }
    }

    out.commit(output).map_err(output_err)
}
