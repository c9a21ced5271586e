//! Remote part existence probing.
//!
//! The mirror offers no directory listing, so part discovery works by
//! probing each candidate URL with a HEAD request (no body transfer).

use std::time::Duration;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);
const PROBE_TIMEOUT: Duration = Duration::from_secs(30);

/// Outcome of probing one remote part URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProbeStatus {
    /// 2xx response: the part exists and can be downloaded.
    Found,
    /// Non-2xx response: the part is not on the mirror.
    Absent,
}

/// Issues a HEAD request against `url` and reports whether the file exists.
///
/// Transport failures (DNS, connect, timeout) are errors; an HTTP status
/// outside the 2xx range is `Absent`, not an error.
pub fn probe(url: &str) -> Result<ProbeStatus, curl::Error> {
    let mut easy = curl::easy::Easy::new();
    easy.url(url)?;
    easy.nobody(true)?; // HEAD request
    easy.follow_location(true)?;
    easy.connect_timeout(CONNECT_TIMEOUT)?;
    easy.timeout(PROBE_TIMEOUT)?;
    easy.perform()?;

    let code = easy.response_code()?;
    Ok(if (200..300).contains(&code) {
        ProbeStatus::Found
    } else {
        ProbeStatus::Absent
    })
}
