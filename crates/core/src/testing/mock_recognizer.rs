//! Mock recognizer for testing.

use async_trait::async_trait;
use std::path::Path;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::pipeline::SPACE_PLACEHOLDER;
use crate::recognizer::{Recognizer, RecognizerError};

#[derive(Debug, Clone)]
enum Behavior {
    /// Return this text verbatim.
    Fixed(String),
    /// Decode each manifest entry to the name it was downloaded under.
    Echo,
    /// Exit unsuccessfully with this output.
    Fail(String),
}

/// Mock implementation of the Recognizer trait.
///
/// Records the manifest contents of every invocation.
///
/// In echo mode each manifest entry `<dir>/<batch>-<ordinal>-<name>.<ext>`
/// produces the line `<batch>-<ordinal>-<name> <name spaced out>`, which
/// mimics Laia's output format.
#[derive(Debug, Clone)]
pub struct MockRecognizer {
    behavior: Arc<RwLock<Behavior>>,
    manifests: Arc<RwLock<Vec<Vec<String>>>>,
}

impl Default for MockRecognizer {
    fn default() -> Self {
        Self::new()
    }
}

impl MockRecognizer {
    /// Create a mock that returns empty output.
    pub fn new() -> Self {
        Self::with_behavior(Behavior::Fixed(String::new()))
    }

    /// Create a mock that always returns `output`.
    pub fn with_output(output: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Fixed(output.into()))
    }

    /// Create a mock that transcribes each image as its URL file name.
    pub fn echoing() -> Self {
        Self::with_behavior(Behavior::Echo)
    }

    /// Create a mock that always fails with `output`.
    pub fn failing(output: impl Into<String>) -> Self {
        Self::with_behavior(Behavior::Fail(output.into()))
    }

    fn with_behavior(behavior: Behavior) -> Self {
        Self {
            behavior: Arc::new(RwLock::new(behavior)),
            manifests: Arc::new(RwLock::new(Vec::new())),
        }
    }

    /// Replace the output returned by future invocations.
    pub async fn set_output(&self, output: impl Into<String>) {
        *self.behavior.write().await = Behavior::Fixed(output.into());
    }

    /// Get the manifest lines seen by each invocation.
    pub async fn recorded_manifests(&self) -> Vec<Vec<String>> {
        self.manifests.read().await.clone()
    }

    /// Get the number of invocations.
    pub async fn invocation_count(&self) -> usize {
        self.manifests.read().await.len()
    }

    fn echo_line(entry: &str) -> String {
        let stem = Path::new(entry)
            .file_stem()
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
        let name = stem.splitn(3, '-').nth(2).unwrap_or_default();
        format!("{} {}", stem, encode_spaced(name))
    }
}

/// Spaces out `text` one symbol at a time the way Laia prints it.
pub fn encode_spaced(text: &str) -> String {
    text.chars()
        .map(|c| {
            if c == ' ' {
                SPACE_PLACEHOLDER.to_string()
            } else {
                c.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[async_trait]
impl Recognizer for MockRecognizer {
    fn name(&self) -> &str {
        "mock"
    }

    async fn recognize(&self, manifest: &Path) -> Result<String, RecognizerError> {
        let contents = tokio::fs::read_to_string(manifest).await?;
        let entries: Vec<String> = contents.lines().map(str::to_string).collect();
        self.manifests.write().await.push(entries.clone());

        match &*self.behavior.read().await {
            Behavior::Fixed(output) => Ok(output.clone()),
            Behavior::Fail(output) => Err(RecognizerError::Failed {
                code: Some(1),
                output: output.clone(),
            }),
            Behavior::Echo => {
                let mut output = String::new();
                for entry in &entries {
                    output.push_str(&Self::echo_line(entry));
                    output.push('\n');
                }
                output.push('\n');
                Ok(output)
            }
        }
    }

    async fn validate(&self) -> Result<(), RecognizerError> {
        Ok(())
    }
}
