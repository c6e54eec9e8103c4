//! Request interpretation: `LaunchRequest` → `ArgumentVector`.
//!
//! | Request              | Vector                 | Landscape |
//! |----------------------|------------------------|-----------|
//! | `CommandTokens(t)`   | `t` (rejected if empty)| if `t` contains `"test"` |
//! | `SampleId(id)`       | `["sample", id]` (rejected if not in catalog) | no |
//! | `TestId(id)`         | `["test", id]`         | yes       |
//!
//! Mode flags are appended last, benchmark before headless, whatever the
//! request shape.

use tracing::{debug, warn};

use launchpad_contracts::{
    error::{LaunchError, LaunchResult},
    launch::{ArgumentVector, ModeFlags},
    request::LaunchRequest,
};

use crate::traits::SampleCatalog;

/// The interpreter's answer for an accepted request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Interpretation {
    /// The exact arguments to hand to the native runtime.
    pub arguments: ArgumentVector,
    /// The host should lock landscape orientation before dispatch.
    pub lock_landscape: bool,
}

/// Maps requests to argument vectors, validating samples against a catalog.
pub struct RequestInterpreter {
    catalog: Box<dyn SampleCatalog>,
}

impl RequestInterpreter {
    pub const SAMPLE_TOKEN: &'static str = "sample";
    pub const TEST_TOKEN: &'static str = "test";

    pub fn new(catalog: Box<dyn SampleCatalog>) -> Self {
        Self { catalog }
    }

    /// Interpret `request` under the session's `flags`.
    ///
    /// # Errors
    ///
    /// `EmptyCommand` for a command request with no tokens, `UnknownSample`
    /// for a sample id the catalog does not know.
    pub fn interpret(
        &self,
        request: &LaunchRequest,
        flags: ModeFlags,
    ) -> LaunchResult<Interpretation> {
        let (tokens, lock_landscape) = match request {
            LaunchRequest::CommandTokens(tokens) => {
                if tokens.is_empty() {
                    warn!("rejecting empty command request");
                    return Err(LaunchError::EmptyCommand);
                }
                let lock = tokens.iter().any(|t| t == Self::TEST_TOKEN);
                (tokens.clone(), lock)
            }

            LaunchRequest::SampleId(id) => {
                if self.catalog.find_by_id(id).is_none() {
                    warn!(sample = %id, "rejecting unknown sample");
                    return Err(LaunchError::UnknownSample { id: id.clone() });
                }
                (vec![Self::SAMPLE_TOKEN.to_string(), id.clone()], false)
            }

            LaunchRequest::TestId(id) => (vec![Self::TEST_TOKEN.to_string(), id.clone()], true),
        };

        let arguments = ArgumentVector::with_flags(tokens, flags);
        debug!(
            argc = arguments.len(),
            lock_landscape,
            benchmark = flags.benchmark,
            headless = flags.headless,
            "request interpreted"
        );

        Ok(Interpretation { arguments, lock_landscape })
    }
}
