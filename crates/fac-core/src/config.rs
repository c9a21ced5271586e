//! Release configuration: which archive to pull from, which components to
//! reassemble, and where fetched and combined files live on disk.

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One split-archive set: a directory on the mirror plus the filename stem
/// shared by all of its parts and by the combined output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Component {
    /// Remote/local subdirectory holding the parts, e.g. `base`.
    #[serde(default)]
    pub directory: String,
    /// Shared filename stem, e.g. `base` for `base.aa`, `base.ab`, ...
    #[serde(default)]
    pub file_prefix: String,
}

impl Component {
    /// Filename of one part, e.g. `base.aa`.
    pub fn part_filename(&self, suffix: &str) -> String {
        format!("{}.{}", self.file_prefix, suffix)
    }

    /// Filename of the reassembled archive, e.g. `base.tgz`.
    pub fn combined_filename(&self) -> String {
        format!("{}.tgz", self.file_prefix)
    }
}

/// Run configuration loaded from the TOML file passed on the command line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ArchiveConfig {
    /// Release version, e.g. `8.4-RELEASE`.
    #[serde(default)]
    pub version: String,
    /// Target architecture, e.g. `amd64`.
    #[serde(default)]
    pub architecture: String,
    /// Root URL of the archive mirror.
    #[serde(default)]
    pub archive_url: String,
    /// Components to fetch and combine, processed strictly in order.
    #[serde(default)]
    pub components: Vec<Component>,
}

impl ArchiveConfig {
    fn base_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.version).join(&self.architecture)
    }

    /// Directory holding the downloaded parts of `component`.
    pub fn fetch_dir(&self, root: &Path, component: &Component) -> PathBuf {
        self.base_dir(root).join("fetch").join(&component.directory)
    }

    /// Directory holding the combined output files.
    pub fn combine_dir(&self, root: &Path) -> PathBuf {
        self.base_dir(root).join("combine")
    }

    /// Final path of `component`'s reassembled archive.
    pub fn combined_file_path(&self, root: &Path, component: &Component) -> PathBuf {
        self.combine_dir(root).join(component.combined_filename())
    }

    /// Remote directory holding `component`'s parts:
    /// `<archive_url>/<architecture>/<version>/<directory>`.
    pub fn component_base_url(&self, component: &Component) -> String {
        format!(
            "{}/{}/{}/{}",
            self.archive_url, self.architecture, self.version, component.directory
        )
    }
}

/// Reads and validates the configuration at `path`.
pub fn load(path: &Path) -> Result<ArchiveConfig> {
    let data = fs::read_to_string(path)
        .with_context(|| format!("failed to read config file {}", path.display()))?;
    let cfg: ArchiveConfig = toml::from_str(&data)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    validate(&cfg)?;
    Ok(cfg)
}

fn validate(cfg: &ArchiveConfig) -> Result<()> {
    if cfg.version.is_empty() {
        bail!("version is required in config");
    }
    if cfg.architecture.is_empty() {
        bail!("architecture is required in config");
    }
    if cfg.archive_url.is_empty() {
        bail!("archive_url is required in config");
    }
    url::Url::parse(&cfg.archive_url)
        .with_context(|| format!("archive_url {} is not a valid URL", cfg.archive_url))?;
    if cfg.components.is_empty() {
        bail!("at least one component must be defined");
    }
    for (i, comp) in cfg.components.iter().enumerate() {
        if comp.directory.is_empty() {
            bail!("component[{}] has no directory", i);
        }
        if comp.file_prefix.is_empty() {
            bail!("component[{}] ({}) has no file_prefix", i, comp.directory);
        }
    }
    Ok(())
}

/// Creates the fetch and combine directory trees under `root`, including one
/// fetch subdirectory per component. The core assumes these exist.
pub fn ensure_output_dirs(cfg: &ArchiveConfig, root: &Path) -> Result<()> {
    let fetch_base = cfg.base_dir(root).join("fetch");
    let combine = cfg.combine_dir(root);
    for dir in [&fetch_base, &combine] {
        fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    for comp in &cfg.components {
        let dir = cfg.fetch_dir(root, comp);
        fs::create_dir_all(&dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"
        version = "8.4-RELEASE"
        architecture = "amd64"
        archive_url = "http://archive.freebsd.org/old-releases"

        [[components]]
        directory = "base"
        file_prefix = "base"

        [[components]]
        directory = "kernels"
        file_prefix = "generic"
    "#;

    #[test]
    fn parses_full_config() {
        let cfg: ArchiveConfig = toml::from_str(SAMPLE).unwrap();
        validate(&cfg).unwrap();
        assert_eq!(cfg.version, "8.4-RELEASE");
        assert_eq!(cfg.architecture, "amd64");
        assert_eq!(cfg.components.len(), 2);
        assert_eq!(cfg.components[1].file_prefix, "generic");
    }

    #[test]
    fn load_reads_file_from_disk() {
        let mut f = tempfile::NamedTempFile::new().unwrap();
        f.write_all(SAMPLE.as_bytes()).unwrap();
        f.flush().unwrap();
        let cfg = load(f.path()).unwrap();
        assert_eq!(cfg.components[0].directory, "base");
    }

    #[test]
    fn missing_version_rejected() {
        let cfg: ArchiveConfig = toml::from_str(
            r#"
            architecture = "amd64"
            archive_url = "http://example.com"
            [[components]]
            directory = "base"
            file_prefix = "base"
        "#,
        )
        .unwrap();
        let err = validate(&cfg).unwrap_err();
        assert!(err.to_string().contains("version is required"));
    }

    #[test]
    fn invalid_archive_url_rejected() {
        let cfg: ArchiveConfig = toml::from_str(
            r#"
            version = "8.4-RELEASE"
            architecture = "amd64"
            archive_url = "not a url"
            [[components]]
            directory = "base"
            file_prefix = "base"
        "#,
        )
        .unwrap();
        let err = validate(&cfg).unwrap_err();
        assert!(err.to_string().contains("not a valid URL"));
    }

    #[test]
    fn empty_components_rejected() {
        let cfg: ArchiveConfig = toml::from_str(
            r#"
            version = "8.4-RELEASE"
            architecture = "amd64"
            archive_url = "http://example.com"
        "#,
        )
        .unwrap();
        let err = validate(&cfg).unwrap_err();
        assert!(err.to_string().contains("at least one component"));
    }

    #[test]
    fn component_without_prefix_named_in_error() {
        let cfg: ArchiveConfig = toml::from_str(
            r#"
            version = "8.4-RELEASE"
            architecture = "amd64"
            archive_url = "http://example.com"
            [[components]]
            directory = "kernels"
        "#,
        )
        .unwrap();
        let err = validate(&cfg).unwrap_err();
        assert!(err.to_string().contains("kernels"));
    }

    #[test]
    fn derives_paths_and_urls() {
        let cfg: ArchiveConfig = toml::from_str(SAMPLE).unwrap();
        let base = &cfg.components[0];
        let root = Path::new("output");

        assert_eq!(
            cfg.fetch_dir(root, base),
            Path::new("output/8.4-RELEASE/amd64/fetch/base")
        );
        assert_eq!(
            cfg.combine_dir(root),
            Path::new("output/8.4-RELEASE/amd64/combine")
        );
        assert_eq!(
            cfg.combined_file_path(root, base),
            Path::new("output/8.4-RELEASE/amd64/combine/base.tgz")
        );
        assert_eq!(
            cfg.component_base_url(base),
            "http://archive.freebsd.org/old-releases/amd64/8.4-RELEASE/base"
        );
        assert_eq!(base.part_filename("aa"), "base.aa");
        assert_eq!(base.combined_filename(), "base.tgz");
    }

    #[test]
    fn ensure_output_dirs_creates_tree() {
        let cfg: ArchiveConfig = toml::from_str(SAMPLE).unwrap();
        let root = tempfile::tempdir().unwrap();
        ensure_output_dirs(&cfg, root.path()).unwrap();
        assert!(cfg.fetch_dir(root.path(), &cfg.components[0]).is_dir());
        assert!(cfg.fetch_dir(root.path(), &cfg.components[1]).is_dir());
        assert!(cfg.combine_dir(root.path()).is_dir());
    }
}
