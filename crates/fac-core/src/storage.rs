//! Temp-then-rename writing for part downloads and combined output.
//!
//! A file only ever appears at its final name after a completed write;
//! every other exit path removes the temp file.

use std::fs::{self, File};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Sequential writer for a temp file named `<final_path><suffix>`.
///
/// Dropping the writer without calling [`commit`](TempFileWriter::commit)
/// removes the temp file, so an aborted transfer leaves nothing at the
/// final name and at most a temp file that the next run truncates.
pub struct TempFileWriter {
    file: Option<File>,
    temp_path: PathBuf,
    committed: bool,
}

impl TempFileWriter {
    /// Creates the temp file next to `final_path`, truncating any stray
    /// left by an interrupted run.
    pub fn create(final_path: &Path, suffix: &str) -> io::Result<Self> {
        let temp_path = temp_path_for(final_path, suffix);
        let file = File::options()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&temp_path)?;
        Ok(Self {
            file: Some(file),
            temp_path,
            committed: false,
        })
    }

    /// Path of the temp file while the write is in progress.
    pub fn temp_path(&self) -> &Path {
        &self.temp_path
    }

    /// Appends `data` to the temp file.
    pub fn write_all(&mut self, data: &[u8]) -> io::Result<()> {
        match self.file.as_mut() {
            Some(f) => f.write_all(data),
            None => Err(io::Error::other("temp file already committed")),
        }
    }

    /// Syncs the temp file and atomically renames it onto `final_path`.
    /// An existing file at `final_path` is replaced. On error the temp
    /// file is removed when the writer drops.
    pub fn commit(mut self, final_path: &Path) -> io::Result<()> {
        if let Some(file) = self.file.take() {
            file.sync_all()?;
        }
        fs::rename(&self.temp_path, final_path)?;
        self.committed = true;
        Ok(())
    }
}

impl Drop for TempFileWriter {
    fn drop(&mut self) {
        if !self.committed {
            self.file.take();
            let _ = fs::remove_file(&self.temp_path);
        }
    }
}

fn temp_path_for(final_path: &Path, suffix: &str) -> PathBuf {
    let mut os = final_path.as_os_str().to_os_string();
    os.push(suffix);
    PathBuf::from(os)
}
