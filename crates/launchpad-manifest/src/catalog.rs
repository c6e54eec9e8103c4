//! Manifest-backed sample catalog.
//!
//! `TomlSampleCatalog` serves the `[[samples]]` table of a launcher manifest
//! through the `SampleCatalog` trait from launchpad-core.

use std::path::Path;

use launchpad_contracts::{error::LaunchResult, sample::Sample};
use launchpad_core::traits::SampleCatalog;

use crate::manifest::LauncherManifest;

/// A `SampleCatalog` over the samples declared in a manifest.
#[derive(Debug, Clone, Default)]
pub struct TomlSampleCatalog {
    samples: Vec<Sample>,
}

impl TomlSampleCatalog {
    pub fn from_manifest(manifest: &LauncherManifest) -> Self {
        Self { samples: manifest.samples.clone() }
    }

    pub fn from_toml_str(s: &str) -> LaunchResult<Self> {
        LauncherManifest::from_toml_str(s).map(|m| Self::from_manifest(&m))
    }

    pub fn from_file(path: &Path) -> LaunchResult<Self> {
        LauncherManifest::from_file(path).map(|m| Self::from_manifest(&m))
    }

    /// Distinct categories in first-appearance order.
    pub fn categories(&self) -> Vec<&str> {
        let mut categories: Vec<&str> = Vec::new();
        for sample in &self.samples {
            if !categories.contains(&sample.category.as_str()) {
                categories.push(&sample.category);
            }
        }
        categories
    }

    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a Sample> + 'a {
        self.samples.iter().filter(move |s| s.category == category)
    }
}

impl SampleCatalog for TomlSampleCatalog {
    fn find_by_id(&self, id: &str) -> Option<Sample> {
        self.samples.iter().find(|s| s.id == id).cloned()
    }

    fn samples(&self) -> Vec<Sample> {
        self.samples.clone()
    }
}
