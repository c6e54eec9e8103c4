//! Launch request types.
//!
//! The hosting UI delivers a request as a bag of optional keyed fields
//! (`RequestFields`). The launcher normalizes that bag into exactly one
//! `LaunchRequest` shape before interpretation.

use serde::{Deserialize, Deserializer, Serialize};

/// An external instruction to start a sample, a test, or an arbitrary
/// command sequence.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum LaunchRequest {
    /// Raw tokens forwarded verbatim to the native runtime.
    CommandTokens(Vec<String>),
    /// A sample identifier that must exist in the catalog.
    SampleId(String),
    /// A test identifier. Tests are named by convention, never looked up.
    TestId(String),
}

impl LaunchRequest {
    /// Build a command request from anything yielding string-like tokens.
    pub fn command<I, S>(tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::CommandTokens(tokens.into_iter().map(Into::into).collect())
    }

    /// Run every sample in `category`, optionally narrowed by `filter` tokens.
    pub fn batch<I, S>(category: impl Into<String>, filter: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut tokens = vec![
            "batch".to_string(),
            "--category".to_string(),
            category.into(),
        ];
        tokens.extend(filter.into_iter().map(Into::into));
        Self::CommandTokens(tokens)
    }
}

/// The `cmd` field as the host may deliver it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CommandField {
    /// Already tokenized.
    Tokens(Vec<String>),
    /// A single command line; split on runs of spaces.
    Line(String),
}

impl CommandField {
    /// Tokenize the field. Empty fragments from repeated spaces are dropped.
    pub fn into_tokens(self) -> Vec<String> {
        match self {
            CommandField::Tokens(tokens) => tokens,
            CommandField::Line(line) => line
                .split(' ')
                .filter(|fragment| !fragment.is_empty())
                .map(str::to_string)
                .collect(),
        }
    }
}

// The key alone selects the command branch; a null payload carries no tokens.
fn present_cmd<'de, D>(deserializer: D) -> Result<Option<CommandField>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<CommandField>::deserialize(deserializer)?;
    Ok(Some(value.unwrap_or(CommandField::Tokens(Vec::new()))))
}

/// Raw keyed fields of an incoming request.
///
/// Example JSON: `{"cmd": "sample triangle"}` or `{"test": "T1"}`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestFields {
    /// `Some` whenever the key is present, even with a `null` value.
    #[serde(default, deserialize_with = "present_cmd")]
    pub cmd: Option<CommandField>,
    #[serde(default)]
    pub sample: Option<String>,
    #[serde(default)]
    pub test: Option<String>,
}

impl RequestFields {
    /// Resolve the fields into a single request.
    ///
    /// Priority is `cmd > sample > test`; the first present field wins and the
    /// others are ignored. Returns `None` when no field is present.
    pub fn into_request(self) -> Option<LaunchRequest> {
        if let Some(cmd) = self.cmd {
            return Some(LaunchRequest::CommandTokens(cmd.into_tokens()));
        }
        if let Some(sample) = self.sample {
            return Some(LaunchRequest::SampleId(sample));
        }
        self.test.map(LaunchRequest::TestId)
    }
}
