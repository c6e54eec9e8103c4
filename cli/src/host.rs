//! A simulated host for driving a session from the terminal.
//!
//! `SimulatedAccess` queues each prompt the chainer issues; the CLI answers
//! queued prompts one at a time (granting unless the capability was passed
//! with `--deny`) and feeds the request code back to the coordinator, the way
//! the platform's permission callback would.

use std::{
    collections::{HashSet, VecDeque},
    sync::{Arc, Mutex},
};

use tracing::info;

use launchpad_contracts::{
    capability::{Capability, CapabilityId},
    error::{LaunchError, LaunchResult},
};
use launchpad_core::{traits::{AccessControl, NativeRuntime, SessionSurface}, StoragePaths};

#[derive(Default)]
struct AccessState {
    granted: HashSet<String>,
    prompts: VecDeque<Capability>,
}

/// Access control backed by scripted user answers.
#[derive(Clone)]
pub struct SimulatedAccess {
    denied: Arc<HashSet<CapabilityId>>,
    state: Arc<Mutex<AccessState>>,
}

impl SimulatedAccess {
    pub fn new(denied: impl IntoIterator<Item = CapabilityId>) -> Self {
        Self {
            denied: Arc::new(denied.into_iter().collect()),
            state: Arc::new(Mutex::new(AccessState::default())),
        }
    }

    /// Mark `capabilities` as granted before the session starts.
    pub fn pre_grant<'a>(&self, capabilities: impl IntoIterator<Item = &'a Capability>) {
        if let Ok(mut state) = self.state.lock() {
            for capability in capabilities {
                state.granted.insert(capability.permission.clone());
            }
        }
    }

    /// Answer the oldest unanswered prompt and return its request code.
    pub fn answer_next(&self) -> Option<u32> {
        let mut state = self.state.lock().ok()?;
        let capability = state.prompts.pop_front()?;
        let grant = !self.denied.contains(&capability.id);
        if grant {
            state.granted.insert(capability.permission.clone());
        }
        info!(capability = %capability.id, granted = grant, "simulated user answered prompt");
        eprintln!(
            "[prompt] {} ({}): {}",
            capability.id,
            capability.permission,
            if grant { "allowed" } else { "denied" }
        );
        Some(capability.request_code)
    }
}

impl AccessControl for SimulatedAccess {
    fn is_granted(&self, permission: &str) -> bool {
        self.state
            .lock()
            .map(|state| state.granted.contains(permission))
            .unwrap_or(false)
    }

    fn request(&self, capability: &Capability) {
        if let Ok(mut state) = self.state.lock() {
            state.prompts.push_back(capability.clone());
        }
    }
}

/// Native runtime stand-in that prints what it receives.
pub struct ConsoleRuntime {
    available: bool,
}

impl ConsoleRuntime {
    pub fn new(available: bool) -> Self {
        Self { available }
    }
}

impl NativeRuntime for ConsoleRuntime {
    fn load(&self, library: &str) -> LaunchResult<()> {
        if !self.available {
            return Err(LaunchError::NativeDispatchFailure {
                reason: format!("native code library '{}' failed to load", library),
            });
        }
        eprintln!("[native] loaded lib{}.so", library);
        Ok(())
    }

    fn init_file_paths(&self, paths: &StoragePaths) -> LaunchResult<()> {
        eprintln!(
            "[native] storage: external={} temp={}",
            paths.external_dir.display(),
            paths.temp_dir.display()
        );
        Ok(())
    }

    fn send_arguments(&self, args: &[String]) -> LaunchResult<()> {
        eprintln!("[native] arguments: {}", args.join(" "));
        Ok(())
    }
}

/// Session surface that writes to stderr.
pub struct ConsoleSurface;

impl SessionSurface for ConsoleSurface {
    fn lock_landscape(&self) {
        eprintln!("[ui] orientation locked to landscape");
    }

    fn show_samples(&self) {
        eprintln!("[ui] showing sample list");
    }

    fn show_permissions_message(&self, missing: &[CapabilityId]) {
        eprintln!("[ui] the launcher cannot run without these permissions:");
        for id in missing {
            eprintln!("       - {}", id);
        }
        eprintln!("     grant them in system settings and try again");
    }

    fn notify(&self, message: &str) {
        eprintln!("[ui] {}", message);
    }

    fn finish_session(&self) {
        eprintln!("[ui] session finished");
    }
}
