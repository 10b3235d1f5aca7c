//! Opaque styled text
//!
//! Titles and labels are handed to the host untouched. The engine never parses
//! color codes or component markup.

use serde::{Deserialize, Serialize};

/// Styled-text payload owned by the host's text collaborator
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StyledText(String);

impl StyledText {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    /// Raw formatting payload
    pub fn as_raw(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<&str> for StyledText {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<String> for StyledText {
    fn from(raw: String) -> Self {
        Self(raw)
    }
}

impl std::fmt::Display for StyledText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
