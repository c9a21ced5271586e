//! `fac status` – show per-component fetch/combine state.

use anyhow::Result;
use fac_core::combiner;
use fac_core::config;
use std::path::Path;

use super::OUTPUT_ROOT;

pub fn run_status(config_path: &Path) -> Result<()> {
    let cfg = config::load(config_path)?;
    let root = Path::new(OUTPUT_ROOT);

    println!(
        "{:<16} {:>6} {:<10} {}",
        "COMPONENT", "PARTS", "STATE", "COMBINED FILE"
    );
    for component in &cfg.components {
        let combined = cfg.combined_file_path(root, component);
        let parts = combiner::list_parts(&cfg.fetch_dir(root, component), &component.file_prefix)
            .map(|p| p.len())
            .unwrap_or(0);
        let state = if combined.exists() {
            "combined"
        } else if parts > 0 {
            "fetching"
        } else {
            "pending"
        };
        let combined_col = if combined.exists() {
            combined.display().to_string()
        } else {
            "-".to_string()
        };
        println!(
            "{:<16} {:>6} {:<10} {}",
            component.directory, parts, state, combined_col
        );
    }
    Ok(())
}
