use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};

use crate::error::Result;

/// The environment the installer reports to and registers tools with
pub trait Host: Send + Sync {
    /// Make executables in `dir` callable by later steps of the same session
    fn add_path(&self, dir: &Path) -> Result<()>;

    fn info(&self, message: &str);

    fn warning(&self, message: &str);

    fn error(&self, message: &str);

    /// Report a failure that should make the whole run exit unsuccessfully
    fn set_failed(&self, message: &str);
}

/// Host backed by a CI runner: a path file read between steps plus
/// workflow-command annotations on stdout.
#[derive(Debug, Default)]
pub struct ActionsHost {
    path_file: Option<PathBuf>,
    annotate: bool,
    failed: AtomicBool,
}

impl ActionsHost {
    pub fn new(path_file: Option<PathBuf>, annotate: bool) -> Self {
        Self {
            path_file,
            annotate,
            failed: AtomicBool::new(false),
        }
    }

    pub fn failed(&self) -> bool {
        self.failed.load(Ordering::SeqCst)
    }

    fn annotation(&self, command: &str, message: &str) {
        if self.annotate {
            println!("::{command}::{}", escape_data(message));
        }
    }
}

/// Escape a workflow command message
fn escape_data(message: &str) -> String {
    message
        .replace('%', "%25")
        .replace('\r', "%0D")
        .replace('\n', "%0A")
}

impl Host for ActionsHost {
    fn add_path(&self, dir: &Path) -> Result<()> {
        if let Some(path_file) = &self.path_file {
            let mut file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path_file)?;
            writeln!(file, "{}", dir.display())?;
        }

        let mut paths = vec![dir.to_path_buf()];
        if let Some(current) = std::env::var_os("PATH") {
            paths.extend(std::env::split_paths(&current));
        }
        let joined = std::env::join_paths(paths).map_err(std::io::Error::other)?;
        std::env::set_var("PATH", joined);

        tracing::info!("Added {} to PATH", dir.display());
        Ok(())
    }

    fn info(&self, message: &str) {
        tracing::info!("{}", message);
    }

    fn warning(&self, message: &str) {
        tracing::warn!("{}", message);
        self.annotation("warning", message);
    }

    fn error(&self, message: &str) {
        tracing::error!("{}", message);
        self.annotation("error", message);
    }

    fn set_failed(&self, message: &str) {
        self.failed.store(true, Ordering::SeqCst);
        self.error(message);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    #[test]
    fn test_escape_data() {
        assert_eq!(escape_data("50% done\r\nnext"), "50%25 done%0D%0Anext");
        assert_eq!(escape_data("plain"), "plain");
    }

    #[test]
    fn test_add_path_appends_to_path_file() {
        let dir = tempdir().unwrap();
        let path_file = dir.path().join("github_path");
        let host = ActionsHost::new(Some(path_file.clone()), false);

        let first = dir.path().join("mq").join("0.1.0").join("x64");
        let second = dir.path().join("bin");
        host.add_path(&first).unwrap();
        host.add_path(&second).unwrap();

        let content = fs::read_to_string(&path_file).unwrap();
        assert_eq!(
            content,
            format!("{}\n{}\n", first.display(), second.display())
        );

        let path = std::env::var_os("PATH").unwrap();
        assert!(std::env::split_paths(&path).any(|p| p == second));
    }

    #[test]
    fn test_set_failed_marks_host() {
        let host = ActionsHost::new(None, false);
        assert!(!host.failed());

        host.warning("just a warning");
        assert!(!host.failed());

        host.set_failed("boom");
        assert!(host.failed());
    }
}
