//! Launch session types: argument vectors, mode flags and outcomes.
//!
//! `LaunchOutcome` is what the coordinator returns to the caller after every
//! event. `DispatchRecord` is the single record of a hand-off to the native
//! runtime; a session produces at most one.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::LaunchError;

/// Unique identifier for one launcher session.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub uuid::Uuid);

impl SessionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4())
    }
}

impl Default for SessionId {
    fn default() -> Self {
        Self::new()
    }
}

/// The canonical ordered argument list handed to the native runtime.
///
/// Immutable once built. Mode flags, when present, are always the last
/// entries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArgumentVector(Vec<String>);

impl ArgumentVector {
    pub const BENCHMARK_FLAG: &'static str = "--benchmark";
    pub const HEADLESS_FLAG: &'static str = "--headless";

    /// Build a vector from `tokens`, then append the flags enabled in `flags`
    /// (benchmark before headless).
    pub fn with_flags(tokens: Vec<String>, flags: ModeFlags) -> Self {
        let mut args = tokens;
        if flags.benchmark {
            args.push(Self::BENCHMARK_FLAG.to_string());
        }
        if flags.headless {
            args.push(Self::HEADLESS_FLAG.to_string());
        }
        Self(args)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.0.iter()
    }

    pub fn into_vec(self) -> Vec<String> {
        self.0
    }
}

/// Session-scoped run modes. Never persisted beyond the current session.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeFlags {
    pub benchmark: bool,
    pub headless: bool,
}

impl ModeFlags {
    /// Flip benchmark mode and return the new value.
    pub fn toggle_benchmark(&mut self) -> bool {
        self.benchmark = !self.benchmark;
        self.benchmark
    }

    /// Flip headless mode and return the new value.
    pub fn toggle_headless(&mut self) -> bool {
        self.headless = !self.headless;
        self.headless
    }
}

/// The result of feeding one event into the coordinator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaunchOutcome {
    /// A permission prompt is outstanding. Nothing happens until the host
    /// delivers its grant/deny callback.
    AwaitingPermissions,

    /// Permissions are satisfied but there is no request to launch yet.
    /// The user is looking at the sample list.
    Ready,

    /// The request was handed to the native runtime. The session is over.
    Dispatched(ArgumentVector),

    /// The request (or the permission chain) was rejected. The reason has
    /// already been surfaced to the user.
    Rejected(LaunchError),
}

/// The record of the one hand-off a session is allowed to make.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchRecord {
    pub session_id: SessionId,
    pub arguments: ArgumentVector,
    /// Whether the host was asked to lock landscape orientation first.
    pub landscape: bool,
    pub dispatched_at: DateTime<Utc>,
}
