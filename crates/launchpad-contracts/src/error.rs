//! Error types for the launch pipeline.
//!
//! Rejections a user can recover from (`EmptyCommand`, `UnknownSample`,
//! `PermissionsDenied`) travel inside `LaunchOutcome::Rejected`. The rest are
//! returned as `Err` from coordinator operations.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::capability::CapabilityId;

/// The unified error type for the launcher.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
pub enum LaunchError {
    /// A command request carried no tokens.
    #[error("command request contains no arguments")]
    EmptyCommand,

    /// The requested sample is not in the catalog.
    #[error("could not find sample {id}")]
    UnknownSample { id: String },

    /// The permission chain finished with capabilities still ungranted.
    #[error("required permissions not granted: {}", join_ids(.missing))]
    PermissionsDenied { missing: Vec<CapabilityId> },

    /// The native runtime could not be reached.
    ///
    /// Fatal to the session; never retried automatically.
    #[error("native dispatch failed: {reason}")]
    NativeDispatchFailure { reason: String },

    /// The launcher manifest is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// An operation was invoked in a state that does not allow it.
    #[error("state machine error: {reason}")]
    StateMachineError { reason: String },
}

fn join_ids(ids: &[CapabilityId]) -> String {
    ids.iter()
        .map(|id| id.0.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Convenience alias used throughout the launchpad crates.
pub type LaunchResult<T> = Result<T, LaunchError>;
