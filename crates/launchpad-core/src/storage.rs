//! Storage locations handed to the native runtime.

use std::path::{Path, PathBuf};

/// Where the native runtime may write persistent and temporary files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoragePaths {
    pub external_dir: PathBuf,
    pub temp_dir: PathBuf,
}

impl StoragePaths {
    /// Build storage paths from the host's per-app directories.
    ///
    /// The per-app external directory (`<root>/Android/data/<pkg>/files`) is
    /// not reliably writable by the user, so files go to
    /// `<root>/<package_name>` instead, where `<root>` is everything before
    /// the first `Android` component. Returns `None` if either directory is
    /// unavailable.
    pub fn resolve(
        external_files_dir: Option<&Path>,
        temp_dir: Option<&Path>,
        package_name: &str,
    ) -> Option<Self> {
        let external = external_files_dir?;
        let temp = temp_dir?;

        let shared_root: PathBuf = external
            .components()
            .take_while(|c| c.as_os_str() != "Android")
            .collect();

        Some(Self {
            external_dir: shared_root.join(package_name),
            temp_dir: temp.to_path_buf(),
        })
    }
}
