//! # launchpad-core
//!
//! The launch-sequencing runtime for the launchpad sample launcher.
//!
//! This crate provides:
//! - The four collaborator traits (`AccessControl`, `SampleCatalog`,
//!   `NativeRuntime`, `SessionSurface`)
//! - `PermissionLedger` and `PermissionChainer`, which acquire capabilities
//!   one prompt at a time
//! - `RequestInterpreter`, which turns a request into an argument vector
//! - `NativeBridge`, the once-per-process native library bootstrap
//! - `LaunchCoordinator`, the session state machine that dispatches at most
//!   once
//!
//! ## Usage
//!
//! ```rust,ignore
//! let mut coordinator = LaunchCoordinator::new(chainer, interpreter, native, surface)
//!     .with_request(fields.into_request());
//! let outcome = coordinator.start()?;
//! // ...later, from the host's permission callback:
//! let outcome = coordinator.on_permission_result(request_code)?;
//! ```

pub mod chainer;
pub mod coordinator;
pub mod interpreter;
pub mod ledger;
pub mod native;
pub mod storage;
pub mod traits;

#[cfg(test)]
mod testing;

pub use chainer::{ChainStatus, PermissionChainer};
pub use coordinator::{LaunchCoordinator, LaunchState};
pub use interpreter::{Interpretation, RequestInterpreter};
pub use ledger::PermissionLedger;
pub use native::NativeBridge;
pub use storage::StoragePaths;
