//! Persistent tool cache keyed by (tool, version, architecture).
//!
//! Entries live under `<root>/<tool>/<version>/<arch>/`. A sibling
//! `<arch>.complete` marker is written after the copy finishes, so an
//! interrupted store is never reported by [`ToolCache::find`].

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{Result, SetupError};
use crate::platform::Arch;

pub trait ToolCache: Send + Sync {
    /// Directory holding a previously stored tool, if any
    fn find(&self, tool: &str, version: &str, arch: Arch) -> Option<PathBuf>;

    /// Copy the contents of `source_dir` into the cache and return the entry directory
    fn store(&self, source_dir: &Path, tool: &str, version: &str, arch: Arch) -> Result<PathBuf>;
}

#[derive(Debug, Clone)]
pub struct DirToolCache {
    root: PathBuf,
}

impl DirToolCache {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn version_dir(&self, tool: &str, version: &str) -> PathBuf {
        self.root.join(tool).join(cache_version(version))
    }

    fn entry_dir(&self, tool: &str, version: &str, arch: Arch) -> PathBuf {
        self.version_dir(tool, version).join(arch.as_str())
    }

    fn marker(&self, tool: &str, version: &str, arch: Arch) -> PathBuf {
        self.version_dir(tool, version)
            .join(format!("{}.complete", arch.as_str()))
    }
}

/// `v1.2.3` and `1.2.3` share one cache entry
fn cache_version(version: &str) -> &str {
    version.strip_prefix('v').unwrap_or(version)
}

impl ToolCache for DirToolCache {
    fn find(&self, tool: &str, version: &str, arch: Arch) -> Option<PathBuf> {
        let entry = self.entry_dir(tool, version, arch);
        if self.marker(tool, version, arch).is_file() && entry.is_dir() {
            tracing::debug!("Found {} {} ({}) in tool cache", tool, version, arch);
            Some(entry)
        } else {
            None
        }
    }

    fn store(&self, source_dir: &Path, tool: &str, version: &str, arch: Arch) -> Result<PathBuf> {
        if !source_dir.is_dir() {
            return Err(SetupError::Installation {
                message: "cache source is not a directory".to_string(),
                path: source_dir.display().to_string(),
            });
        }

        let entry = self.entry_dir(tool, version, arch);
        let marker = self.marker(tool, version, arch);

        // Leftovers from an interrupted store
        if marker.exists() {
            fs::remove_file(&marker)?;
        }
        if entry.exists() {
            fs::remove_dir_all(&entry)?;
        }
        fs::create_dir_all(&entry)?;

        for item in walkdir::WalkDir::new(source_dir).min_depth(1) {
            let item = item.map_err(std::io::Error::from)?;
            let relative = item.path().strip_prefix(source_dir).map_err(|_| {
                SetupError::Installation {
                    message: "cache source escaped its directory".to_string(),
                    path: item.path().display().to_string(),
                }
            })?;
            let dest = entry.join(relative);

            if item.file_type().is_dir() {
                fs::create_dir_all(&dest)?;
            } else {
                fs::copy(item.path(), &dest)?;
            }
        }

        fs::write(&marker, "")?;
        tracing::debug!("Cached {} {} ({}) at {}", tool, version, arch, entry.display());

        Ok(entry)
    }
}
