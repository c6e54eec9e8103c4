//! Collaborator traits for the launch pipeline.
//!
//! These four traits are the boundary between the launcher and its host:
//!
//! - `AccessControl`  — the platform permission subsystem
//! - `SampleCatalog`  — lookup of installed samples
//! - `NativeRuntime`  — the native rendering runtime that consumes arguments
//! - `SessionSurface` — the hosting UI (notices, orientation, teardown)
//!
//! The launcher owns none of the state behind them. Grant state in
//! particular is always read live through `AccessControl::is_granted`.

use launchpad_contracts::{
    capability::{Capability, CapabilityId},
    error::LaunchResult,
    sample::Sample,
};

use crate::storage::StoragePaths;

/// The host's access-control layer.
pub trait AccessControl: Send + Sync {
    /// Return true if `permission` is currently granted.
    ///
    /// Must be synchronous and total. Called on every scan of the chain.
    fn is_granted(&self, permission: &str) -> bool;

    /// Show the system prompt for `capability`.
    ///
    /// Returns immediately. The host later reports the user's answer by
    /// re-entering the coordinator with `capability.request_code`.
    fn request(&self, capability: &Capability);
}

/// The installed sample catalog.
pub trait SampleCatalog: Send + Sync {
    /// Look up a sample by its identifier.
    fn find_by_id(&self, id: &str) -> Option<Sample>;

    /// All samples, in catalog order.
    fn samples(&self) -> Vec<Sample>;
}

/// The native rendering runtime.
///
/// `NativeBridge` guarantees `load` is called at most once and that
/// `send_arguments` is never called before a successful load.
pub trait NativeRuntime: Send + Sync {
    /// Load the native library named `library`.
    fn load(&self, library: &str) -> LaunchResult<()>;

    /// Tell the runtime where it may write files.
    fn init_file_paths(&self, paths: &StoragePaths) -> LaunchResult<()>;

    /// Hand the final argument list to the runtime.
    fn send_arguments(&self, args: &[String]) -> LaunchResult<()>;
}

/// The hosting UI session.
pub trait SessionSurface: Send + Sync {
    /// Lock display orientation to landscape before the runtime starts.
    fn lock_landscape(&self);

    /// Return the user to the sample list (the request-entry surface).
    fn show_samples(&self);

    /// Show the remediation view listing every capability still missing.
    fn show_permissions_message(&self, missing: &[CapabilityId]);

    /// Show a short user-visible notice.
    fn notify(&self, message: &str);

    /// Close the whole session so it cannot be re-entered.
    fn finish_session(&self);
}
