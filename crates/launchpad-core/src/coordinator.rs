//! The launch coordinator: the session state machine.
//!
//!   Idle → AwaitingPermissions → Interpreting → Dispatched
//!                  │                   │
//!                  ↓                   ↓
//!          PermissionsDenied        Rejected
//!
//! `Ready` sits between AwaitingPermissions and Interpreting when the session
//! started without a request; `DispatchFailed` is the terminal state for a
//! native runtime that could not be reached.
//!
//! The single-shot invariant is structural: the native runtime is only
//! reached from `dispatch()`, which always leaves the session in a terminal
//! state, and no operation leaves a terminal state.

use std::sync::Arc;

use chrono::Utc;
use tracing::{debug, error, info, warn};

use launchpad_contracts::{
    capability::CapabilityId,
    error::{LaunchError, LaunchResult},
    launch::{DispatchRecord, LaunchOutcome, ModeFlags, SessionId},
    request::LaunchRequest,
};

use crate::{
    chainer::{ChainStatus, PermissionChainer},
    interpreter::{Interpretation, RequestInterpreter},
    native::NativeBridge,
    traits::SessionSurface,
};

/// Where a session is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchState {
    Idle,
    AwaitingPermissions,
    /// Permissions satisfied, no request yet; the user is browsing samples.
    Ready,
    Interpreting,
    Dispatched,
    /// The request was invalid. The session stays open for a corrected retry.
    Rejected,
    /// The chain ended with denials. A new `start()` re-prompts.
    PermissionsDenied,
    DispatchFailed,
}

impl LaunchState {
    /// Terminal states admit no further operations.
    pub fn is_terminal(self) -> bool {
        matches!(self, LaunchState::Dispatched | LaunchState::DispatchFailed)
    }
}

/// Drives one launcher session from start to hand-off.
pub struct LaunchCoordinator {
    session_id: SessionId,
    chainer: PermissionChainer,
    interpreter: RequestInterpreter,
    native: Arc<NativeBridge>,
    surface: Box<dyn SessionSurface>,
    flags: ModeFlags,
    pending: Option<LaunchRequest>,
    state: LaunchState,
    last_outcome: Option<LaunchOutcome>,
    record: Option<DispatchRecord>,
}

impl LaunchCoordinator {
    pub fn new(
        chainer: PermissionChainer,
        interpreter: RequestInterpreter,
        native: Arc<NativeBridge>,
        surface: Box<dyn SessionSurface>,
    ) -> Self {
        Self {
            session_id: SessionId::new(),
            chainer,
            interpreter,
            native,
            surface,
            flags: ModeFlags::default(),
            pending: None,
            state: LaunchState::Idle,
            last_outcome: None,
            record: None,
        }
    }

    /// Attach the request delivered with the session, if any.
    pub fn with_request(mut self, request: Option<LaunchRequest>) -> Self {
        self.pending = request;
        self
    }

    pub fn with_flags(mut self, flags: ModeFlags) -> Self {
        self.flags = flags;
        self
    }

    pub fn session_id(&self) -> &SessionId {
        &self.session_id
    }

    pub fn state(&self) -> LaunchState {
        self.state
    }

    pub fn flags(&self) -> ModeFlags {
        self.flags
    }

    /// Mode flags are toggled by the user independently of any request.
    pub fn flags_mut(&mut self) -> &mut ModeFlags {
        &mut self.flags
    }

    /// The hand-off this session made, if it made one.
    pub fn dispatch_record(&self) -> Option<&DispatchRecord> {
        self.record.as_ref()
    }

    /// Begin (or, after a denial, restart) the session.
    ///
    /// If every capability is already granted the chain is never consulted
    /// for a request and the session proceeds straight to interpretation.
    ///
    /// # Errors
    ///
    /// `StateMachineError` unless the session is `Idle` or
    /// `PermissionsDenied`; `NativeDispatchFailure` if dispatch was reached
    /// and the runtime could not be called.
    pub fn start(&mut self) -> LaunchResult<LaunchOutcome> {
        match self.state {
            LaunchState::Idle | LaunchState::PermissionsDenied => {}
            other => return Err(state_error("start", other)),
        }

        info!(
            session_id = %self.session_id.0,
            has_request = self.pending.is_some(),
            "launch session starting"
        );

        if self.chainer.all_granted() {
            debug!(session_id = %self.session_id.0, "permissions already granted");
            return self.after_permissions();
        }

        self.state = LaunchState::AwaitingPermissions;
        let status = self.chainer.advance();
        self.apply_chain(status)
    }

    /// Re-enter the session from the host's grant/deny callback.
    ///
    /// Only a session in `AwaitingPermissions` acts on the callback, and it
    /// always re-scans the ledger rather than trusting the callback. In any
    /// other started state the callback is stale or duplicated: it is
    /// ignored and the last outcome is returned unchanged.
    pub fn on_permission_result(&mut self, request_code: u32) -> LaunchResult<LaunchOutcome> {
        match self.state {
            LaunchState::AwaitingPermissions => {
                let status = self.chainer.on_permission_result(request_code);
                self.apply_chain(status)
            }
            LaunchState::Idle => Err(state_error("on_permission_result", LaunchState::Idle)),
            other => {
                debug!(
                    session_id = %self.session_id.0,
                    request_code,
                    state = ?other,
                    "ignoring permission callback outside the permission chain"
                );
                self.last_outcome
                    .clone()
                    .ok_or_else(|| state_error("on_permission_result", other))
            }
        }
    }

    /// Launch a request chosen after the session started: a sample picked
    /// from the list, or a corrected retry after a rejection.
    ///
    /// # Errors
    ///
    /// `StateMachineError` unless the session is `Ready` or `Rejected`.
    pub fn launch(&mut self, request: LaunchRequest) -> LaunchResult<LaunchOutcome> {
        match self.state {
            LaunchState::Ready | LaunchState::Rejected => self.interpret_and_dispatch(request),
            other => Err(state_error("launch", other)),
        }
    }

    fn apply_chain(&mut self, status: ChainStatus) -> LaunchResult<LaunchOutcome> {
        match status {
            ChainStatus::AwaitingPermission(capability) => {
                debug!(
                    session_id = %self.session_id.0,
                    capability = %capability.id,
                    "waiting for permission callback"
                );
                self.state = LaunchState::AwaitingPermissions;
                Ok(self.settle(LaunchOutcome::AwaitingPermissions))
            }
            ChainStatus::AllGranted => self.after_permissions(),
            ChainStatus::Denied(missing) => Ok(self.deny(missing)),
        }
    }

    fn deny(&mut self, missing: Vec<CapabilityId>) -> LaunchOutcome {
        warn!(
            session_id = %self.session_id.0,
            missing = missing.len(),
            "permissions denied; showing remediation"
        );
        self.state = LaunchState::PermissionsDenied;
        self.surface.show_permissions_message(&missing);
        self.settle(LaunchOutcome::Rejected(LaunchError::PermissionsDenied { missing }))
    }

    fn after_permissions(&mut self) -> LaunchResult<LaunchOutcome> {
        match self.pending.take() {
            Some(request) => self.interpret_and_dispatch(request),
            None => {
                info!(session_id = %self.session_id.0, "no pending request; showing samples");
                self.state = LaunchState::Ready;
                self.surface.show_samples();
                Ok(self.settle(LaunchOutcome::Ready))
            }
        }
    }

    fn interpret_and_dispatch(&mut self, request: LaunchRequest) -> LaunchResult<LaunchOutcome> {
        self.state = LaunchState::Interpreting;

        match self.interpreter.interpret(&request, self.flags) {
            Ok(interpretation) => self.dispatch(interpretation),
            Err(err) => {
                warn!(session_id = %self.session_id.0, error = %err, "launch request rejected");
                self.state = LaunchState::Rejected;
                self.surface.notify(&err.to_string());
                self.surface.show_samples();
                Ok(self.settle(LaunchOutcome::Rejected(err)))
            }
        }
    }

    /// The only call site of `NativeBridge::dispatch`.
    fn dispatch(&mut self, interpretation: Interpretation) -> LaunchResult<LaunchOutcome> {
        let Interpretation { arguments, lock_landscape } = interpretation;

        if lock_landscape {
            self.surface.lock_landscape();
        }

        // Either way the session is over once this returns; closing it is
        // what keeps a second pass through Interpreting from ever happening.
        match self.native.dispatch(&arguments) {
            Ok(()) => {
                info!(
                    session_id = %self.session_id.0,
                    argc = arguments.len(),
                    "arguments dispatched to native runtime"
                );
                self.state = LaunchState::Dispatched;
                self.record = Some(DispatchRecord {
                    session_id: self.session_id.clone(),
                    arguments: arguments.clone(),
                    landscape: lock_landscape,
                    dispatched_at: Utc::now(),
                });
                self.surface.finish_session();
                Ok(self.settle(LaunchOutcome::Dispatched(arguments)))
            }
            Err(err) => {
                error!(session_id = %self.session_id.0, error = %err, "native dispatch failed");
                self.state = LaunchState::DispatchFailed;
                // The notice must reach the user before the session closes.
                self.surface.notify(&err.to_string());
                self.surface.finish_session();
                self.settle(LaunchOutcome::Rejected(err.clone()));
                Err(err)
            }
        }
    }

    fn settle(&mut self, outcome: LaunchOutcome) -> LaunchOutcome {
        self.last_outcome = Some(outcome.clone());
        outcome
    }
}

fn state_error(operation: &str, state: LaunchState) -> LaunchError {
    LaunchError::StateMachineError {
        reason: format!("'{}' is not allowed in state {:?}", operation, state),
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
