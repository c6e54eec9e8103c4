//! The bridge to the native rendering runtime.
//!
//! Loading the native library is a once-per-process event. `NativeBridge`
//! performs it lazily on the first dispatch attempt and caches the result,
//! success or failure, so every later attempt sees the same answer instead of
//! an invisible static-initializer failure. Construct one bridge per process
//! and share it between sessions through an `Arc`.

use std::sync::OnceLock;

use tracing::{error, info};

use launchpad_contracts::{
    error::{LaunchError, LaunchResult},
    launch::ArgumentVector,
};

use crate::{storage::StoragePaths, traits::NativeRuntime};

pub struct NativeBridge {
    library: String,
    runtime: Box<dyn NativeRuntime>,
    storage: Option<StoragePaths>,
    loaded: OnceLock<Result<(), String>>,
}

impl NativeBridge {
    pub fn new(library: impl Into<String>, runtime: Box<dyn NativeRuntime>) -> Self {
        Self {
            library: library.into(),
            runtime,
            storage: None,
            loaded: OnceLock::new(),
        }
    }

    /// Pass `paths` to the runtime right after the library loads.
    pub fn with_storage(mut self, paths: StoragePaths) -> Self {
        self.storage = Some(paths);
        self
    }

    /// `None` until a load has been attempted.
    pub fn is_loaded(&self) -> Option<bool> {
        self.loaded.get().map(Result::is_ok)
    }

    /// Load the library if that has not been attempted yet.
    ///
    /// # Errors
    ///
    /// `NativeDispatchFailure` carrying the first load failure, on this
    /// and every subsequent call.
    pub fn ensure_loaded(&self) -> LaunchResult<()> {
        self.loaded
            .get_or_init(|| self.load())
            .clone()
            .map_err(|reason| LaunchError::NativeDispatchFailure { reason })
    }

    /// Hand `arguments` to the runtime, loading it first if needed.
    pub fn dispatch(&self, arguments: &ArgumentVector) -> LaunchResult<()> {
        self.ensure_loaded()?;
        self.runtime
            .send_arguments(arguments.as_slice())
            .map_err(into_dispatch_failure)
    }

    fn load(&self) -> Result<(), String> {
        if let Err(e) = self.runtime.load(&self.library) {
            error!(library = %self.library, error = %e, "native library failed to load");
            return Err(failure_reason(e));
        }
        if let Some(paths) = &self.storage {
            if let Err(e) = self.runtime.init_file_paths(paths) {
                error!(library = %self.library, error = %e, "native file path setup failed");
                return Err(failure_reason(e));
            }
        }
        info!(library = %self.library, "native library loaded");
        Ok(())
    }
}

fn failure_reason(err: LaunchError) -> String {
    match err {
        LaunchError::NativeDispatchFailure { reason } => reason,
        other => other.to_string(),
    }
}

fn into_dispatch_failure(err: LaunchError) -> LaunchError {
    LaunchError::NativeDispatchFailure { reason: failure_reason(err) }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use launchpad_contracts::{
        error::LaunchError,
        launch::{ArgumentVector, ModeFlags},
    };

    use crate::{storage::StoragePaths, testing::MockRuntime};

    use super::NativeBridge;

    fn args(items: &[&str]) -> ArgumentVector {
        ArgumentVector::with_flags(items.iter().map(|s| s.to_string()).collect(), ModeFlags::default())
    }

    #[test]
    fn test_library_is_loaded_once_across_dispatches() {
        let runtime = MockRuntime::default();
        let bridge = NativeBridge::new("vulkan_guide", Box::new(runtime.clone()));

        assert_eq!(bridge.is_loaded(), None);
        bridge.dispatch(&args(&["sample", "a"])).unwrap();
        bridge.dispatch(&args(&["sample", "b"])).unwrap();

        assert_eq!(bridge.is_loaded(), Some(true));
        assert_eq!(runtime.load_count(), 1);
        assert_eq!(runtime.sent().len(), 2);
    }

    #[test]
    fn test_load_failure_is_cached_and_reported() {
        let runtime = MockRuntime::failing_load();
        let bridge = NativeBridge::new("vulkan_guide", Box::new(runtime.clone()));

        let first = bridge.dispatch(&args(&["test", "T1"]));
        let second = bridge.ensure_loaded();

        assert!(matches!(first, Err(LaunchError::NativeDispatchFailure { .. })));
        assert_eq!(first, second);
        assert_eq!(runtime.load_count(), 1, "a failed load is not retried");
        assert!(runtime.sent().is_empty(), "nothing is sent to an unloaded runtime");
    }

    #[test]
    fn test_send_failure_is_a_dispatch_failure() {
        let runtime = MockRuntime::failing_send();
        let bridge = NativeBridge::new("vulkan_guide", Box::new(runtime.clone()));

        let result = bridge.dispatch(&args(&["sample", "a"]));

        match result {
            Err(LaunchError::NativeDispatchFailure { reason }) => {
                assert!(reason.contains("unreachable"), "unexpected reason: {reason}");
            }
            other => panic!("expected NativeDispatchFailure, got {:?}", other),
        }
        // The library itself loaded; only the hand-off failed.
        assert_eq!(bridge.is_loaded(), Some(true));
        assert!(runtime.sent().is_empty());
    }

    #[test]
    fn test_storage_paths_are_passed_after_load() {
        let runtime = MockRuntime::default();
        let paths = StoragePaths {
            external_dir: PathBuf::from("/sdcard/pkg"),
            temp_dir: PathBuf::from("/cache"),
        };
        let bridge = NativeBridge::new("vulkan_guide", Box::new(runtime.clone()))
            .with_storage(paths.clone());

        bridge.ensure_loaded().unwrap();
        bridge.ensure_loaded().unwrap();

        assert_eq!(runtime.storage(), vec![paths]);
    }
}
