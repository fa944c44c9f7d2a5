//! Byte transfer for a catalog entry's locator.
//!
//! One HTTP GET, body streamed to the sink, progress reported per chunk.
//! There is no retry at this layer: a failure is terminal for the call and
//! the user retries manually.

use std::cell::{Cell, RefCell};
use std::io::Write;
use std::str;
use std::time::Duration;

use thiserror::Error;

/// Referer sent with every fetch; the CDN rejects bare requests.
const REFERER: &str = "https://www.douyin.com/";

/// Terminal failure of one transfer.
#[derive(Debug, Error)]
pub enum TransferError {
    /// Response had a non-2xx status.
    #[error("HTTP {0}")]
    Http(u32),
    /// Transport-level failure (timeout, connection, TLS, ...).
    #[error(transparent)]
    Curl(#[from] curl::Error),
    /// The sink refused the bytes (disk full, closed pipe, ...).
    #[error("write failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Downloads `locator` into `sink`, reporting `(bytes_done, total)` after
/// every chunk; `total` is known once the response announces its
/// Content-Length. Returns the number of bytes written.
pub fn fetch(
    locator: &str,
    sink: &mut dyn Write,
    mut progress: impl FnMut(u64, Option<u64>),
) -> Result<u64, TransferError> {
    let mut easy = curl::easy::Easy::new();
    easy.url(locator)?;
    easy.follow_location(true)?;
    easy.max_redirections(10)?;
    easy.connect_timeout(Duration::from_secs(30))?;
    easy.timeout(Duration::from_secs(3600))?;

    let mut headers = curl::easy::List::new();
    headers.append(&format!("Referer: {REFERER}"))?;
    easy.http_headers(headers)?;

    let written = Cell::new(0u64);
    let total = Cell::new(None::<u64>);
    let sink_error = RefCell::new(None::<std::io::Error>);

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|line| {
            if let Ok(line) = str::from_utf8(line) {
                let lower = line.to_ascii_lowercase();
                if let Some(value) = lower.strip_prefix("content-length:") {
                    if let Ok(n) = value.trim().parse::<u64>() {
                        total.set(Some(n));
                    }
                }
            }
            true
        })?;
        transfer.write_function(|data| {
            if let Err(e) = sink.write_all(data) {
                *sink_error.borrow_mut() = Some(e);
                return Ok(0); // aborts the transfer
            }
            written.set(written.get() + data.len() as u64);
            progress(written.get(), total.get());
            Ok(data.len())
        })?;

        let performed = transfer.perform();
        if let Some(e) = sink_error.borrow_mut().take() {
            return Err(e.into());
        }
        performed?;
    }

    let code = easy.response_code()?;
    if !(200..300).contains(&code) {
        return Err(TransferError::Http(code));
    }
    Ok(written.get())
}
