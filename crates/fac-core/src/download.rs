//! Single-stream HTTP GET of one part into the fetch directory.
//!
//! The body is written to `<dest>.download` and renamed onto `dest` only
//! after the transfer finished with a 2xx status, so an aborted transfer
//! never leaves a partial file at the destination name.

use crate::storage::TempFileWriter;
use std::io;
use std::path::Path;
use std::time::Duration;
use thiserror::Error;

/// Suffix appended to the destination name while a download is in progress.
pub const DOWNLOAD_SUFFIX: &str = ".download";

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);
const TRANSFER_TIMEOUT: Duration = Duration::from_secs(3600);
// Abort transfers slower than 1 KiB/s for a minute.
const LOW_SPEED_LIMIT: u32 = 1024;
const LOW_SPEED_TIME: Duration = Duration::from_secs(60);

/// Why a part download failed (transport, HTTP status, or local storage).
#[derive(Debug, Error)]
pub enum DownloadError {
    /// Curl reported an error (timeout, connection, etc.).
    #[error(transparent)]
    Curl(#[from] curl::Error),
    /// The response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// The body could not be written to the fetch directory.
    #[error("storage: {0}")]
    Storage(#[from] io::Error),
}

/// Downloads `url` into `dest` through a temp file.
pub fn download_to(url: &str, dest: &Path) -> Result<(), DownloadError> {
    let mut writer = TempFileWriter::create(dest, DOWNLOAD_SUFFIX)?;
    let mut write_err: Option<io::Error> = None;

    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(CONNECT_TIMEOUT)?;
    easy.low_speed_limit(LOW_SPEED_LIMIT)?;
    easy.low_speed_time(LOW_SPEED_TIME)?;
    easy.timeout(TRANSFER_TIMEOUT)?;

    let performed = {
        let mut transfer = easy.transfer();
        transfer.write_function(|data| match writer.write_all(data) {
            Ok(()) => Ok(data.len()),
            Err(e) => {
                write_err = Some(e);
                Ok(0) // abort the transfer
            }
        })?;
        transfer.perform()
    };
    if let Err(e) = performed {
        // A write-aborted transfer surfaces as a curl error; report the
        // underlying storage failure instead.
        return Err(match write_err.take() {
            Some(io_err) => DownloadError::Storage(io_err),
            None => DownloadError::Curl(e),
        });
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(DownloadError::Http(code));
    }

    writer.commit(dest)?;
    Ok(())
}
