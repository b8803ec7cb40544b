//! Error families raised while building, sequencing and launching sweeps.

use std::collections::BTreeMap;
use std::fmt::{self, Display};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Code, message and key/value context carried by a [`TekError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorInfo {
    /// Kebab-case code such as `unknown-sweep`, stable across releases.
    pub code: String,
    /// One-line description for the operator.
    pub message: String,
    /// Offending axis names, lengths, selectors or paths.
    #[serde(default)]
    pub context: BTreeMap<String, String>,
    /// Suggested fix, printed after the context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl ErrorInfo {
    /// Payload with no context or hint.
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
            context: BTreeMap::new(),
            hint: None,
        }
    }

    /// Records `key=value`; a repeated key keeps the latest value.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.context.insert(key.into(), value.into());
        self
    }

    /// Attaches the suggested fix.
    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }
}

/// Canonical error type for sweep generation and launching.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Error)]
#[serde(tag = "family", content = "detail")]
pub enum TekError {
    /// Invalid axis or sweep definitions.
    #[error("config error: {0}")]
    Config(ErrorInfo),
    /// Job sequence construction errors.
    #[error("sequence error: {0}")]
    Sequence(ErrorInfo),
    /// Sweep selector lookups.
    #[error("registry error: {0}")]
    Registry(ErrorInfo),
    /// Launcher setup failures.
    #[error("launch error: {0}")]
    Launch(ErrorInfo),
    /// Serialization, schema and file errors.
    #[error("serde error: {0}")]
    Serde(ErrorInfo),
}

impl Display for ErrorInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (code: {})", self.message, self.code)?;
        if !self.context.is_empty() {
            write!(f, " | context: [")?;
            for (idx, (key, value)) in self.context.iter().enumerate() {
                if idx > 0 {
                    write!(f, ", ")?;
                }
                write!(f, "{key}={value}")?;
            }
            write!(f, "]")?;
        }
        if let Some(hint) = &self.hint {
            write!(f, " | hint: {hint}")?;
        }
        Ok(())
    }
}

impl TekError {
    /// Payload shared by every family.
    pub fn info(&self) -> &ErrorInfo {
        match self {
            TekError::Config(info)
            | TekError::Sequence(info)
            | TekError::Registry(info)
            | TekError::Launch(info)
            | TekError::Serde(info) => info,
        }
    }
}
