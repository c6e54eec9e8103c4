//! # launchpad-manifest
//!
//! The TOML launcher manifest for the launchpad sample launcher.
//!
//! ## Overview
//!
//! This crate provides [`LauncherManifest`], which declares the native
//! library, the capabilities to request and the installed samples, and
//! [`TomlSampleCatalog`], which implements the
//! [`SampleCatalog`](launchpad_core::traits::SampleCatalog) trait over the
//! manifest's samples.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use launchpad_manifest::{LauncherManifest, TomlSampleCatalog};
//!
//! let manifest = LauncherManifest::from_file(Path::new("launchpad.toml"))?;
//! let catalog = TomlSampleCatalog::from_manifest(&manifest);
//! ```

pub mod catalog;
pub mod manifest;

pub use catalog::TomlSampleCatalog;
pub use manifest::LauncherManifest;

// ── Tests ─────────────────────────────────────────────────────────────────────
