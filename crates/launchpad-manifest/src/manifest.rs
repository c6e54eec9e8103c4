//! Launcher manifest schema.
//!
//! A `LauncherManifest` is deserialized from TOML and names the native
//! library to load, the capabilities to request (in request order), and the
//! installed sample catalog.
//!
//! Example:
//! ```toml
//! native_library = "vulkan_guide"
//! package_name = "com.georgebig2.vulkan"
//!
//! [[capabilities]]
//! id = "write-external-storage"
//! permission = "android.permission.WRITE_EXTERNAL_STORAGE"
//! request_code = 1
//!
//! [[samples]]
//! id = "triangle"
//! name = "Hello Triangle"
//! category = "api"
//! ```

use std::{collections::HashSet, path::Path};

use serde::{Deserialize, Serialize};
use tracing::debug;

use launchpad_contracts::{
    capability::Capability,
    error::{LaunchError, LaunchResult},
    sample::Sample,
};

/// The top-level structure deserialized from a launcher manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LauncherManifest {
    /// Name of the native library that hosts the rendering runtime.
    pub native_library: String,

    /// Application package name, used to place shared-storage files.
    #[serde(default)]
    pub package_name: Option<String>,

    /// Required capabilities, requested in this order. Defaults to shared
    /// storage write then read.
    #[serde(default = "default_capabilities")]
    pub capabilities: Vec<Capability>,

    /// Installed samples.
    #[serde(default)]
    pub samples: Vec<Sample>,
}

fn default_capabilities() -> Vec<Capability> {
    Capability::storage_defaults()
}

impl Default for LauncherManifest {
    fn default() -> Self {
        Self {
            native_library: "vulkan_guide".to_string(),
            package_name: Some("com.georgebig2.vulkan".to_string()),
            capabilities: default_capabilities(),
            samples: Vec::new(),
        }
    }
}

impl LauncherManifest {
    /// Parse `s` as TOML and validate the result.
    ///
    /// Returns `LaunchError::ConfigError` if the TOML is malformed, does not
    /// match the schema, or fails validation.
    pub fn from_toml_str(s: &str) -> LaunchResult<Self> {
        let manifest: LauncherManifest = toml::from_str(s).map_err(|e| LaunchError::ConfigError {
            reason: format!("failed to parse launcher manifest: {}", e),
        })?;
        manifest.validate()?;
        debug!(
            native_library = %manifest.native_library,
            capabilities = manifest.capabilities.len(),
            samples = manifest.samples.len(),
            "launcher manifest loaded"
        );
        Ok(manifest)
    }

    /// Read the file at `path` and parse it as a launcher manifest.
    pub fn from_file(path: &Path) -> LaunchResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| LaunchError::ConfigError {
            reason: format!("failed to read manifest '{}': {}", path.display(), e),
        })?;
        Self::from_toml_str(&contents)
    }

    /// Check the invariants the launcher relies on.
    ///
    /// - the native library name is not blank
    /// - capability ids and request codes are unique (callbacks are
    ///   correlated by code)
    /// - sample ids are non-empty and unique
    pub fn validate(&self) -> LaunchResult<()> {
        if self.native_library.trim().is_empty() {
            return Err(config_error("native_library must not be empty"));
        }

        let mut ids = HashSet::new();
        let mut codes = HashSet::new();
        for capability in &self.capabilities {
            if !ids.insert(&capability.id) {
                return Err(config_error(format!("duplicate capability id '{}'", capability.id)));
            }
            if !codes.insert(capability.request_code) {
                return Err(config_error(format!(
                    "duplicate request code {} on capability '{}'",
                    capability.request_code, capability.id
                )));
            }
        }

        let mut sample_ids = HashSet::new();
        for sample in &self.samples {
            if sample.id.is_empty() {
                return Err(config_error(format!("sample '{}' has an empty id", sample.name)));
            }
            if !sample_ids.insert(sample.id.as_str()) {
                return Err(config_error(format!("duplicate sample id '{}'", sample.id)));
            }
        }

        Ok(())
    }
}

fn config_error(reason: impl Into<String>) -> LaunchError {
    LaunchError::ConfigError { reason: reason.into() }
}
