//! # launchpad-contracts
//!
//! Shared types and error contracts for the launchpad sample launcher.
//!
//! Every crate in the workspace imports from here. No launch logic lives in
//! this crate, only data definitions and conversions.

pub mod capability;
pub mod error;
pub mod launch;
pub mod request;
pub mod sample;

#[cfg(test)]
mod tests {
    use super::*;
    use capability::{Capability, CapabilityId};
    use error::LaunchError;
    use launch::{ArgumentVector, LaunchOutcome, ModeFlags, SessionId};
    use request::{CommandField, LaunchRequest, RequestFields};

    fn tokens(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    // ── RequestFields priority ───────────────────────────────────────────────

    #[test]
    fn cmd_wins_over_sample_and_test() {
        let fields = RequestFields {
            cmd: Some(CommandField::Tokens(tokens(&["sample", "a"]))),
            sample: Some("b".to_string()),
            test: Some("c".to_string()),
        };
        assert_eq!(
            fields.into_request(),
            Some(LaunchRequest::CommandTokens(tokens(&["sample", "a"])))
        );
    }

    #[test]
    fn sample_wins_over_test() {
        let fields = RequestFields {
            cmd: None,
            sample: Some("triangle".to_string()),
            test: Some("T1".to_string()),
        };
        assert_eq!(
            fields.into_request(),
            Some(LaunchRequest::SampleId("triangle".to_string()))
        );
    }

    #[test]
    fn test_field_alone_resolves_to_test_id() {
        let fields = RequestFields {
            test: Some("T1".to_string()),
            ..RequestFields::default()
        };
        assert_eq!(fields.into_request(), Some(LaunchRequest::TestId("T1".to_string())));
    }

    #[test]
    fn no_fields_resolves_to_none() {
        assert_eq!(RequestFields::default().into_request(), None);
    }

    // ── CommandField parsing ─────────────────────────────────────────────────

    #[test]
    fn command_line_splits_on_runs_of_spaces() {
        let field = CommandField::Line("batch   --category  api".to_string());
        assert_eq!(field.into_tokens(), tokens(&["batch", "--category", "api"]));
    }

    #[test]
    fn blank_command_line_yields_no_tokens() {
        assert!(CommandField::Line("   ".to_string()).into_tokens().is_empty());
    }

    #[test]
    fn cmd_field_accepts_string_or_array_json() {
        let line: RequestFields = serde_json::from_str(r#"{"cmd": "test T1"}"#).unwrap();
        assert_eq!(
            line.into_request(),
            Some(LaunchRequest::CommandTokens(tokens(&["test", "T1"])))
        );

        let array: RequestFields =
            serde_json::from_str(r#"{"cmd": ["sample", "with space"]}"#).unwrap();
        assert_eq!(
            array.into_request(),
            Some(LaunchRequest::CommandTokens(tokens(&["sample", "with space"])))
        );
    }

    #[test]
    fn null_cmd_key_still_selects_the_command_branch() {
        let fields: RequestFields =
            serde_json::from_str(r#"{"cmd": null, "sample": "triangle"}"#).unwrap();
        assert_eq!(fields.into_request(), Some(LaunchRequest::CommandTokens(vec![])));

        let absent: RequestFields = serde_json::from_str(r#"{"sample": "triangle"}"#).unwrap();
        assert_eq!(absent.into_request(), Some(LaunchRequest::SampleId("triangle".into())));
    }

    #[test]
    fn batch_request_puts_category_before_filter() {
        let request = LaunchRequest::batch("performance", ["--tag", "gpu"]);
        assert_eq!(
            request,
            LaunchRequest::CommandTokens(tokens(&[
                "batch",
                "--category",
                "performance",
                "--tag",
                "gpu"
            ]))
        );
    }

    // ── ArgumentVector flags ─────────────────────────────────────────────────

    #[test]
    fn flags_are_appended_benchmark_then_headless() {
        let flags = ModeFlags { benchmark: true, headless: true };
        let args = ArgumentVector::with_flags(tokens(&["a", "b"]), flags);
        assert_eq!(args.as_slice(), tokens(&["a", "b", "--benchmark", "--headless"]).as_slice());
    }

    #[test]
    fn no_flags_leaves_tokens_unchanged() {
        let args = ArgumentVector::with_flags(tokens(&["sample", "X"]), ModeFlags::default());
        assert_eq!(args.into_vec(), tokens(&["sample", "X"]));
    }

    #[test]
    fn headless_only_is_appended_alone() {
        let flags = ModeFlags { benchmark: false, headless: true };
        let args = ArgumentVector::with_flags(tokens(&["test", "T1"]), flags);
        assert_eq!(args.len(), 3);
        assert_eq!(args.as_slice()[2], "--headless");
    }

    #[test]
    fn mode_flag_toggles_return_new_value() {
        let mut flags = ModeFlags::default();
        assert!(flags.toggle_benchmark());
        assert!(!flags.toggle_benchmark());
        assert!(flags.toggle_headless());
        assert!(flags.headless);
    }

    // ── Capability defaults ──────────────────────────────────────────────────

    #[test]
    fn storage_defaults_are_write_then_read() {
        let caps = Capability::storage_defaults();
        assert_eq!(caps.len(), 2);
        assert_eq!(caps[0].id, CapabilityId::new("write-external-storage"));
        assert_eq!(caps[0].request_code, 1);
        assert_eq!(caps[1].id, CapabilityId::new("read-external-storage"));
        assert_eq!(caps[1].request_code, 2);
    }

    // ── SessionId ────────────────────────────────────────────────────────────

    #[test]
    fn session_ids_are_unique() {
        let ids: std::collections::HashSet<String> =
            (0..50).map(|_| SessionId::new().0.to_string()).collect();
        assert_eq!(ids.len(), 50);
    }

    // ── LaunchError display messages ─────────────────────────────────────────

    #[test]
    fn error_unknown_sample_display() {
        let err = LaunchError::UnknownSample { id: "missing".to_string() };
        assert_eq!(err.to_string(), "could not find sample missing");
    }

    #[test]
    fn error_permissions_denied_lists_every_capability() {
        let err = LaunchError::PermissionsDenied {
            missing: vec![CapabilityId::new("camera"), CapabilityId::new("storage")],
        };
        let msg = err.to_string();
        assert!(msg.contains("camera, storage"), "unexpected message: {msg}");
    }

    #[test]
    fn error_native_dispatch_failure_display() {
        let err = LaunchError::NativeDispatchFailure {
            reason: "library vulkan_guide not found".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("native dispatch failed"));
        assert!(msg.contains("vulkan_guide"));
    }

    #[test]
    fn rejected_outcome_round_trips_through_json() {
        let original = LaunchOutcome::Rejected(LaunchError::EmptyCommand);
        let json = serde_json::to_string(&original).unwrap();
        let decoded: LaunchOutcome = serde_json::from_str(&json).unwrap();
        assert_eq!(original, decoded);
    }
}
