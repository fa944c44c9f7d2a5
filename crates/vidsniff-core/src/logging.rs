//! Logging init: file under the XDG state dir, stderr fallback.

use std::fs;
use std::io;
use std::path::PathBuf;

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

/// Writer that is either the log file or stderr (when the file is
/// unavailable or a clone fails).
enum LogSink {
    File(fs::File),
    Stderr,
}

impl io::Write for LogSink {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            LogSink::File(f) => f.write(buf),
            LogSink::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            LogSink::File(f) => f.flush(),
            LogSink::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct MakeLogSink(Option<fs::File>);

impl<'a> MakeWriter<'a> for MakeLogSink {
    type Writer = LogSink;

    fn make_writer(&'a self) -> LogSink {
        match &self.0 {
            Some(file) => file
                .try_clone()
                .map(LogSink::File)
                .unwrap_or(LogSink::Stderr),
            None => LogSink::Stderr,
        }
    }
}

/// Initialize structured logging to `~/.local/state/vidsniff/vidsniff.log`,
/// degrading to stderr when the state dir is unavailable.
pub fn init() {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vidsniff=debug,vidsniff_core=debug"));

    let file = open_log_file().ok();
    let to_file = file.is_some();

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(MakeLogSink(file))
        .with_ansi(false)
        .init();

    if to_file {
        tracing::debug!("logging to state dir");
    } else {
        tracing::warn!("state dir unavailable, logging to stderr");
    }
}

fn open_log_file() -> io::Result<fs::File> {
    let dir = xdg::BaseDirectories::with_prefix("vidsniff")
        .map_err(|e| io::Error::new(io::ErrorKind::NotFound, e))?
        .get_state_home();
    fs::create_dir_all(&dir)?;
    let path: PathBuf = dir.join("vidsniff.log");
    fs::OpenOptions::new().create(true).append(true).open(path)
}
