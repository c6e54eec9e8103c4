//! Mock collaborators shared by the unit tests in this crate.
//!
//! Each mock is `Clone` and keeps its state behind `Arc<Mutex<_>>`, so a test
//! keeps one clone for assertions and boxes the other into the component.

use std::{
    collections::HashSet,
    sync::{Arc, Mutex},
};

use launchpad_contracts::{
    capability::{Capability, CapabilityId},
    error::{LaunchError, LaunchResult},
    sample::Sample,
};

use crate::{
    storage::StoragePaths,
    traits::{AccessControl, NativeRuntime, SampleCatalog, SessionSurface},
};

/// Access control whose grants are flipped by the test.
#[derive(Clone, Default)]
pub(crate) struct MockAccess {
    granted: Arc<Mutex<HashSet<String>>>,
    requests: Arc<Mutex<Vec<u32>>>,
}

impl MockAccess {
    pub(crate) fn granting(permissions: &[&str]) -> Self {
        let access = Self::default();
        for p in permissions {
            access.grant(p);
        }
        access
    }

    pub(crate) fn grant(&self, permission: &str) {
        self.granted.lock().unwrap().insert(permission.to_string());
    }

    /// Request codes of every prompt shown, in order.
    pub(crate) fn requests(&self) -> Vec<u32> {
        self.requests.lock().unwrap().clone()
    }
}

impl AccessControl for MockAccess {
    fn is_granted(&self, permission: &str) -> bool {
        self.granted.lock().unwrap().contains(permission)
    }

    fn request(&self, capability: &Capability) {
        self.requests.lock().unwrap().push(capability.request_code);
    }
}

pub(crate) struct MockCatalog {
    samples: Vec<Sample>,
}

impl MockCatalog {
    pub(crate) fn with_ids(ids: &[&str]) -> Self {
        Self {
            samples: ids.iter().map(|id| Sample::new(*id, *id)).collect(),
        }
    }
}

impl SampleCatalog for MockCatalog {
    fn find_by_id(&self, id: &str) -> Option<Sample> {
        self.samples.iter().find(|s| s.id == id).cloned()
    }

    fn samples(&self) -> Vec<Sample> {
        self.samples.clone()
    }
}

/// Native runtime that records loads and argument hand-offs.
#[derive(Clone, Default)]
pub(crate) struct MockRuntime {
    fail_load: bool,
    fail_send: bool,
    loads: Arc<Mutex<u32>>,
    sent: Arc<Mutex<Vec<Vec<String>>>>,
    storage: Arc<Mutex<Vec<StoragePaths>>>,
}

impl MockRuntime {
    pub(crate) fn failing_load() -> Self {
        Self { fail_load: true, ..Self::default() }
    }

    /// Loads fine, but every argument hand-off fails.
    pub(crate) fn failing_send() -> Self {
        Self { fail_send: true, ..Self::default() }
    }

    pub(crate) fn load_count(&self) -> u32 {
        *self.loads.lock().unwrap()
    }

    pub(crate) fn sent(&self) -> Vec<Vec<String>> {
        self.sent.lock().unwrap().clone()
    }

    pub(crate) fn storage(&self) -> Vec<StoragePaths> {
        self.storage.lock().unwrap().clone()
    }
}

impl NativeRuntime for MockRuntime {
    fn load(&self, library: &str) -> LaunchResult<()> {
        *self.loads.lock().unwrap() += 1;
        if self.fail_load {
            return Err(LaunchError::NativeDispatchFailure {
                reason: format!("library {library} not found"),
            });
        }
        Ok(())
    }

    fn init_file_paths(&self, paths: &StoragePaths) -> LaunchResult<()> {
        self.storage.lock().unwrap().push(paths.clone());
        Ok(())
    }

    fn send_arguments(&self, args: &[String]) -> LaunchResult<()> {
        if self.fail_send {
            return Err(LaunchError::NativeDispatchFailure {
                reason: "native entry point unreachable".to_string(),
            });
        }
        self.sent.lock().unwrap().push(args.to_vec());
        Ok(())
    }
}

/// Surface that records every call as a short event string.
#[derive(Clone, Default)]
pub(crate) struct MockSurface {
    events: Arc<Mutex<Vec<String>>>,
}

impl MockSurface {
    pub(crate) fn events(&self) -> Vec<String> {
        self.events.lock().unwrap().clone()
    }

    fn push(&self, event: String) {
        self.events.lock().unwrap().push(event);
    }
}

impl SessionSurface for MockSurface {
    fn lock_landscape(&self) {
        self.push("landscape".to_string());
    }

    fn show_samples(&self) {
        self.push("samples".to_string());
    }

    fn show_permissions_message(&self, missing: &[CapabilityId]) {
        let ids: Vec<&str> = missing.iter().map(|id| id.0.as_str()).collect();
        self.push(format!("permissions:{}", ids.join(",")));
    }

    fn notify(&self, message: &str) {
        self.push(format!("notify:{message}"));
    }

    fn finish_session(&self) {
        self.push("finish".to_string());
    }
}
