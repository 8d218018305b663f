use std::path::{Path, PathBuf};

use tempfile::TempDir;
use thiserror::Error;

/// Sub-directories identifying the project root by default.
pub const DEFAULT_ROOT_MARKERS: &[&str] = &["cpu", "hil"];

/// Prefix of the temporary build directory created inside the root.
pub const BUILD_DIR_PREFIX: &str = "temp_build";

#[derive(Debug, Error)]
pub enum LayoutError {
    #[error("Failed to find project root from {start} (looked for directories: {markers})")]
    RootNotFound { start: PathBuf, markers: String },
    #[error("Failed to create build directory in {root}: {source}")]
    BuildDir {
        root: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Walk from `start` up to the filesystem root and return the first directory
/// containing every marker sub-directory.
pub fn find_project_root(start: &Path, markers: &[String]) -> Result<PathBuf, LayoutError> {
    let start = start.canonicalize().unwrap_or_else(|_| start.to_path_buf());
    start
        .ancestors()
        .find(|dir| markers.iter().all(|m| dir.join(m).is_dir()))
        .map(Path::to_path_buf)
        .ok_or_else(|| LayoutError::RootNotFound {
            start: start.clone(),
            markers: markers.join(", "),
        })
}

/// Default markers as owned strings (convenient for config defaults).
pub fn default_root_markers() -> Vec<String> {
    DEFAULT_ROOT_MARKERS.iter().map(|m| m.to_string()).collect()
}

/// Where object files and listings for a run live.
///
/// Created fresh inside the project root and removed on drop, unless built
/// with [`BuildLayout::prebuilt`] or kept with [`BuildLayout::keep`].
#[derive(Debug)]
pub struct BuildLayout {
    dir: PathBuf,
    temp: Option<TempDir>,
}

impl BuildLayout {
    /// Create a new temporary build directory inside `root`.
    pub fn create_in(root: &Path) -> Result<Self, LayoutError> {
        let temp = tempfile::Builder::new()
            .prefix(BUILD_DIR_PREFIX)
            .tempdir_in(root)
            .map_err(|source| LayoutError::BuildDir { root: root.to_path_buf(), source })?;
        Ok(Self { dir: temp.path().to_path_buf(), temp: Some(temp) })
    }

    /// Use an existing directory of listings; nothing is created or removed.
    pub fn prebuilt(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into(), temp: None }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Whether the directory is removed when the layout is dropped.
    pub fn is_temporary(&self) -> bool {
        self.temp.is_some()
    }

    /// Disable cleanup and return the directory path.
    pub fn keep(mut self) -> PathBuf {
        if let Some(temp) = self.temp.take() {
            return temp.keep();
        }
        self.dir
    }

    /// Flattened file stem for a root-relative source path
    /// (`hil/nvme/dma.cc` -> `hil_nvme_dma`).
    pub fn stem(source_file: &str) -> String {
        let flat = source_file.replace(['/', '\\'], "_");
        Path::new(&flat)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or(flat)
    }

    pub fn object_path(&self, source_file: &str) -> PathBuf {
        self.dir.join(format!("{}.o", Self::stem(source_file)))
    }

    pub fn listing_path(&self, source_file: &str) -> PathBuf {
        self.dir.join(format!("{}.asm", Self::stem(source_file)))
    }
}
