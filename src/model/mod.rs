//! Structural model of one codebase revision.
//!
//! A [`Snapshot`] holds the packages, classes, methods and fields of a
//! revision. It is produced by an external front-end (usually through a
//! [`SnapshotDocument`]) and never mutated by the diff engine.
//!
//! # Index Support
//!
//! Hierarchy and membership queries go through [`SnapshotIndex`]:
//!
//! ```ignore
//! let index = SnapshotIndex::build(&snapshot);
//! if index.is_subtype_of("app.Cat", "app.Animal") { /* ... */ }
//! ```

mod declarations;
mod document;
mod index;
mod snapshot;

pub use declarations::*;
pub use document::*;
pub use index::*;
pub use snapshot::*;

use std::collections::BTreeMap;

/// Externally supplied before -> after pairings.
///
/// Keys and values are either class qualified names or source file paths.
pub type RenameHints = BTreeMap<String, String>;
