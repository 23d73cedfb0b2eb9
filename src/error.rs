//! Unified error types for refminer.
//!
//! The diff core is a total function over well-formed snapshots, so the
//! only fatal condition it raises is [`RefMinerError::MalformedSnapshot`].
//! The remaining variants belong to the loading, configuration and
//! reporting layers around it.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for refminer operations.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RefMinerError {
    /// A snapshot violates the structural invariants (dangling owner, duplicate names)
    #[error("Malformed snapshot: {context}")]
    MalformedSnapshot {
        context: String,
        #[source]
        source: SnapshotErrorKind,
    },

    /// Errors while loading snapshot or hint documents
    #[error("Failed to load document: {context}")]
    Load {
        context: String,
        #[source]
        source: LoadErrorKind,
    },

    /// IO errors with context
    #[error("IO error at {path:?}: {message}")]
    Io {
        path: Option<PathBuf>,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Configuration errors
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// Validation errors
    #[error("Validation failed: {0}")]
    Validation(String),
}

/// Specific snapshot invariant violations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum SnapshotErrorKind {
    #[error("{member} references owner class '{owner}' which does not exist")]
    DanglingOwner { member: String, owner: String },

    #[error("Duplicate class qualified name: {0}")]
    DuplicateClass(String),

    #[error("Duplicate method signature: {0}")]
    DuplicateMethod(String),

    #[error("Duplicate field qualified name: {0}")]
    DuplicateField(String),

    #[error("Declaration with an empty name in {0}")]
    EmptyName(String),

    #[error("Key '{key}' does not match the declaration's qualified name '{expected}'")]
    KeyMismatch { key: String, expected: String },

    #[error("Package index entry '{package}' disagrees with class '{class}'")]
    PackageMismatch { package: String, class: String },
}

/// Specific load error kinds
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum LoadErrorKind {
    #[error("Invalid JSON structure: {0}")]
    InvalidJson(String),

    #[error("Unsupported document version: {version} (supported: {supported})")]
    UnsupportedVersion { version: u32, supported: u32 },
}

/// Convenient Result type for refminer operations
pub type Result<T> = std::result::Result<T, RefMinerError>;

// ============================================================================
// Error construction helpers
// ============================================================================

impl RefMinerError {
    /// Create a malformed snapshot error with context
    pub fn malformed(context: impl Into<String>, source: SnapshotErrorKind) -> Self {
        Self::MalformedSnapshot {
            context: context.into(),
            source,
        }
    }

    /// Create a load error with context
    pub fn load(context: impl Into<String>, source: LoadErrorKind) -> Self {
        Self::Load {
            context: context.into(),
            source,
        }
    }

    /// Create an IO error with path context
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        let path = path.into();
        let message = format!("{source}");
        Self::Io {
            path: Some(path),
            message,
            source,
        }
    }

    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Whether this error signals a contract violation by the snapshot producer.
    #[must_use]
    pub const fn is_malformed_snapshot(&self) -> bool {
        matches!(self, Self::MalformedSnapshot { .. })
    }
}

impl From<std::io::Error> for RefMinerError {
    fn from(err: std::io::Error) -> Self {
        Self::Io {
            path: None,
            message: format!("{err}"),
            source: err,
        }
    }
}

impl From<serde_json::Error> for RefMinerError {
    fn from(err: serde_json::Error) -> Self {
        Self::load(
            "JSON deserialization",
            LoadErrorKind::InvalidJson(err.to_string()),
        )
    }
}

// ============================================================================
// Error context extension trait
// ============================================================================

/// Extension trait for adding context to errors.
///
/// Context strings are prepended to the error's existing context, so a
/// failure deep in snapshot loading reads like
/// `"loading before snapshot: JSON deserialization"`.
pub trait ErrorContext<T> {
    /// Add context to an error.
    fn context(self, context: impl Into<String>) -> Result<T>;

    /// Add context from a closure, evaluated only on error.
    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>;
}

impl<T, E: Into<RefMinerError>> ErrorContext<T> for std::result::Result<T, E> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        let ctx: String = context.into();
        self.map_err(|e| add_context_to_error(e.into(), &ctx))
    }

    fn with_context<F, C>(self, f: F) -> Result<T>
    where
        F: FnOnce() -> C,
        C: Into<String>,
    {
        self.map_err(|e| {
            let ctx: String = f().into();
            add_context_to_error(e.into(), &ctx)
        })
    }
}

fn add_context_to_error(err: RefMinerError, new_ctx: &str) -> RefMinerError {
    match err {
        RefMinerError::MalformedSnapshot {
            context: existing,
            source,
        } => RefMinerError::MalformedSnapshot {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RefMinerError::Load {
            context: existing,
            source,
        } => RefMinerError::Load {
            context: chain_context(new_ctx, &existing),
            source,
        },
        RefMinerError::Io {
            path,
            message,
            source,
        } => RefMinerError::Io {
            path,
            message: chain_context(new_ctx, &message),
            source,
        },
        RefMinerError::Config(msg) => RefMinerError::Config(chain_context(new_ctx, &msg)),
        RefMinerError::Validation(msg) => RefMinerError::Validation(chain_context(new_ctx, &msg)),
    }
}

/// Returns `"new: existing"`, or just `new` when nothing was there before.
fn chain_context(new: &str, existing: &str) -> String {
    if existing.is_empty() {
        new.to_string()
    } else {
        format!("{new}: {existing}")
    }
}

/// Extension trait for Option types to convert to errors with context.
pub trait OptionContext<T> {
    /// Convert None to an error with the given context.
    fn context_none(self, context: impl Into<String>) -> Result<T>;
}

impl<T> OptionContext<T> for Option<T> {
    fn context_none(self, context: impl Into<String>) -> Result<T> {
        self.ok_or_else(|| RefMinerError::Validation(context.into()))
    }
}
