//! Part discovery and download for one component.
//!
//! Walks the two-letter suffix sequence in order, probing the mirror for
//! each part and downloading the ones not already present locally. The
//! first absent suffix after `aa` ends the walk successfully; an absent
//! `aa` means the component has no data on the mirror.

use crate::config::{ArchiveConfig, Component};
use crate::download;
use crate::error::FetchError;
use crate::probe::{self, ProbeStatus};
use crate::suffix;
use std::path::Path;

/// Ensures every remote part of `component` is present in the fetch
/// directory under `output_root`, downloading missing parts in suffix
/// order.
///
/// Returns immediately when the combined output already exists. Parts
/// already on disk are trusted as-is and never re-probed or re-fetched, so
/// an interrupted run resumes where it left off.
pub fn fetch_split_files(
    cfg: &ArchiveConfig,
    component: &Component,
    output_root: &Path,
) -> Result<(), FetchError> {
    let combined = cfg.combined_file_path(output_root, component);
    if combined.exists() {
        tracing::info!(
            component = %component.directory,
            path = %combined.display(),
            "combined file already exists, skipping fetch"
        );
        return Ok(());
    }

    let fetch_dir = cfg.fetch_dir(output_root, component);
    let base_url = cfg.component_base_url(component);
    tracing::info!(
        component = %component.directory,
        url = %base_url,
        dest = %fetch_dir.display(),
        "fetching split files"
    );

    for suffix in suffix::part_suffixes() {
        let filename = component.part_filename(&suffix);
        let file_url = format!("{base_url}/{filename}");
        let dest = fetch_dir.join(&filename);

        if dest.exists() {
            tracing::debug!(file = %filename, "using existing file");
            continue;
        }

        match probe::probe(&file_url) {
            Err(e) => {
                return Err(FetchError::Probe {
                    url: file_url,
                    source: e,
                });
            }
            Ok(ProbeStatus::Absent) if suffix == suffix::FIRST => {
                return Err(FetchError::FirstPartMissing {
                    filename,
                    url: file_url,
                });
            }
            Ok(ProbeStatus::Absent) => {
                tracing::info!(
                    component = %component.directory,
                    "no more parts to download"
                );
                return Ok(());
            }
            Ok(ProbeStatus::Found) => {}
        }

        tracing::info!(file = %filename, url = %file_url, "downloading");
        download::download_to(&file_url, &dest).map_err(|e| FetchError::Download {
            filename,
            url: file_url,
            source: e,
        })?;
    }

    // All 676 suffixes exist; treat the set as complete.
    Ok(())
}
