//! `fac combine` – assemble already-fetched parts without touching the
//! network. Works from whatever part files are on disk, so it can re-run
//! after a fetch-only invocation or a crash.

use anyhow::{Context, Result};
use fac_core::combiner;
use fac_core::config;
use std::path::Path;

use super::{selected, OUTPUT_ROOT};

pub fn run_combine(config_path: &Path, only: Option<&str>) -> Result<()> {
    let cfg = config::load(config_path)?;
    let root = Path::new(OUTPUT_ROOT);

    for component in selected(&cfg, only)? {
        println!("Combining component: {}", component.directory);
        combiner::combine_split_files(&cfg, component, root)
            .with_context(|| format!("combining files for {}", component.directory))?;
    }
    Ok(())
}
