//! `fac fetch` – download missing parts without combining them.

use anyhow::{Context, Result};
use fac_core::config;
use fac_core::fetcher;
use std::path::Path;

use super::{selected, OUTPUT_ROOT};

pub fn run_fetch(config_path: &Path, only: Option<&str>) -> Result<()> {
    let cfg = config::load(config_path)?;
    let root = Path::new(OUTPUT_ROOT);
    config::ensure_output_dirs(&cfg, root)?;

    for component in selected(&cfg, only)? {
        println!("Fetching component: {}", component.directory);
        fetcher::fetch_split_files(&cfg, component, root)
            .with_context(|| format!("fetching files for {}", component.directory))?;
    }
    Ok(())
}
