//! One module per `fac` subcommand.

mod combine;
mod fetch;
mod run;
mod status;

pub use combine::run_combine;
pub use fetch::run_fetch;
pub use run::run_pipeline;
pub use status::run_status;

use anyhow::{bail, Result};
use fac_core::config::{ArchiveConfig, Component};

/// Root of the derived output tree, relative to the working directory.
pub(crate) const OUTPUT_ROOT: &str = "output";

/// Components to operate on: all of them, or the one named by `--component`.
pub(crate) fn selected<'a>(
    cfg: &'a ArchiveConfig,
    only: Option<&str>,
) -> Result<Vec<&'a Component>> {
    match only {
        None => Ok(cfg.components.iter().collect()),
        Some(name) => {
            let found: Vec<&Component> = cfg
                .components
                .iter()
                .filter(|c| c.directory == name)
                .collect();
            if found.is_empty() {
                bail!("no component named {} in the configuration", name);
            }
            Ok(found)
        }
    }
}
