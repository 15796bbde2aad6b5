//! Opening the finished deck with the host's default application.

use std::io;
use std::path::Path;
use std::process::Command;

/// Capability to hand a file to the default file-association handler.
///
/// Opening is always best-effort: callers log failures and move on.
pub trait FileOpener {
    fn open(&self, path: &Path) -> io::Result<()>;
}

/// Opener backed by the platform's shell helper.
///
/// On platforms without a default-application concept this degrades to a
/// no-op.
pub struct SystemOpener;

impl FileOpener for SystemOpener {
    #[cfg(target_os = "macos")]
    fn open(&self, path: &Path) -> io::Result<()> {
        Command::new("open").arg(path).spawn().map(|_| ())
    }

    #[cfg(target_os = "windows")]
    fn open(&self, path: &Path) -> io::Result<()> {
        // An empty first argument keeps `start` from treating the path as
        // the window title.
        Command::new("cmd")
            .args(["/C", "start", ""])
            .arg(path)
            .spawn()
            .map(|_| ())
    }

    #[cfg(target_os = "linux")]
    fn open(&self, path: &Path) -> io::Result<()> {
        Command::new("xdg-open").arg(path).spawn().map(|_| ())
    }

    #[cfg(not(any(target_os = "macos", target_os = "windows", target_os = "linux")))]
    fn open(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}

/// Opener that does nothing, for `--no-open` runs.
pub struct NoopOpener;

impl FileOpener for NoopOpener {
    fn open(&self, _path: &Path) -> io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_noop_opener_always_succeeds() {
        assert!(NoopOpener.open(Path::new("/does/not/exist.pptx")).is_ok());
    }
}
