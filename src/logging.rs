//! Log output setup.
//!
//! Logs go to stderr, filtered by `RUST_LOG` (default `warn`, or `debug`
//! with `--verbose`). When a log file is configured every line is appended
//! there as well.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::fmt::writer::MakeWriterExt;

fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

/// Stderr plus `file`, one line to each per event.
fn stderr_and(file: File) -> impl for<'a> MakeWriter<'a> + Send + Sync + 'static {
    io::stderr.and(Mutex::new(file))
}

/// Install the global subscriber. Safe to call more than once; later calls
/// are ignored.
pub fn init(verbose: bool, log_file: Option<&Path>) {
    let default_level = if verbose { "debug" } else { "warn" };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    let file = log_file.and_then(|path| match open_log_file(path) {
        Ok(file) => Some(file),
        Err(e) => {
            eprintln!("Could not open log file {}: {}", path.display(), e);
            None
        }
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false);
    let _ = match file {
        Some(file) => builder.with_writer(stderr_and(file)).try_init(),
        None => builder.with_writer(io::stderr).try_init(),
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn log_file_is_created_with_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("logs").join("tracker.log");

        open_log_file(&path).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn events_are_appended_to_the_log_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tracker.log");
        std::fs::write(&path, "earlier line\n").unwrap();

        let subscriber = tracing_subscriber::fmt()
            .with_writer(stderr_and(open_log_file(&path).unwrap()))
            .with_ansi(false)
            .with_target(false)
            .finish();
        tracing::subscriber::with_default(subscriber, || {
            tracing::warn!(id = 7, "event deleted");
        });

        let contents = std::fs::read_to_string(&path).unwrap();
        assert!(contents.starts_with("earlier line\n"));
        assert!(contents.contains("event deleted"), "{}", contents);
        assert!(contents.contains("id=7"), "{}", contents);
    }
}
