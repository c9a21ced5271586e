//! `fac run` – fetch and combine every component in the configuration.

use anyhow::{bail, Context, Result};
use fac_core::combiner;
use fac_core::config::{self, ArchiveConfig, Component};
use fac_core::fetcher;
use std::path::Path;

use super::OUTPUT_ROOT;

pub fn run_pipeline(config_path: &Path, keep_going: bool) -> Result<()> {
    let cfg = config::load(config_path)?;
    let root = Path::new(OUTPUT_ROOT);
    config::ensure_output_dirs(&cfg, root)?;

    println!(
        "Processing FreeBSD {} for {} architecture",
        cfg.version, cfg.architecture
    );

    let mut failed = 0usize;
    for component in &cfg.components {
        println!("\n=== Processing component: {} ===", component.directory);
        if let Err(err) = process_component(&cfg, component, root) {
            if !keep_going {
                return Err(err);
            }
            tracing::error!(component = %component.directory, "component failed: {:#}", err);
            eprintln!("Error processing {}: {:#}", component.directory, err);
            failed += 1;
        }
    }

    if failed > 0 {
        bail!("{} component(s) failed", failed);
    }
    println!("\nAll components processed successfully.");
    println!(
        "Combined files are available in: {}",
        cfg.combine_dir(root).display()
    );
    Ok(())
}

fn process_component(cfg: &ArchiveConfig, component: &Component, root: &Path) -> Result<()> {
    fetcher::fetch_split_files(cfg, component, root)
        .with_context(|| format!("fetching files for {}", component.directory))?;
    combiner::combine_split_files(cfg, component, root)
        .with_context(|| format!("combining files for {}", component.directory))?;
    Ok(())
}
