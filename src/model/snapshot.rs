//! The structural snapshot of one revision.

use super::{ClassDecl, FieldDecl, MethodDecl};
use crate::error::{RefMinerError, Result, SnapshotErrorKind};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use xxhash_rust::xxh3::xxh3_64;

/// Immutable structural model of one codebase revision.
///
/// All maps are keyed by qualified name (see [`ClassDecl::qualified_name`],
/// [`MethodDecl::qualified_name`] and [`FieldDecl::qualified_name`]).
/// Snapshots are produced by an external front-end; [`Snapshot::validate`]
/// checks the invariants the diff engine relies on.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    /// Package path -> qualified names of the classes it declares
    pub packages: IndexMap<String, BTreeSet<String>>,
    pub classes: IndexMap<String, ClassDecl>,
    pub methods: IndexMap<String, MethodDecl>,
    pub fields: IndexMap<String, FieldDecl>,
}

impl Snapshot {
    /// Create an empty snapshot.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Start building a snapshot declaration by declaration.
    #[must_use]
    pub fn builder() -> SnapshotBuilder {
        SnapshotBuilder::default()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty() && self.methods.is_empty() && self.fields.is_empty()
    }

    /// Total number of declarations (classes, methods, fields).
    #[must_use]
    pub fn declaration_count(&self) -> usize {
        self.classes.len() + self.methods.len() + self.fields.len()
    }

    #[must_use]
    pub fn class(&self, qualified_name: &str) -> Option<&ClassDecl> {
        self.classes.get(qualified_name)
    }

    #[must_use]
    pub fn method(&self, qualified_name: &str) -> Option<&MethodDecl> {
        self.methods.get(qualified_name)
    }

    #[must_use]
    pub fn field(&self, qualified_name: &str) -> Option<&FieldDecl> {
        self.fields.get(qualified_name)
    }

    /// Check the structural invariants: every member's owner exists, every
    /// key is the declaration's qualified name, no name is empty, and the
    /// package index lists exactly the declared classes under their packages.
    pub fn validate(&self) -> Result<()> {
        for (key, class) in &self.classes {
            if class.name.is_empty() {
                return Err(RefMinerError::malformed(
                    "class declaration",
                    SnapshotErrorKind::EmptyName(key.clone()),
                ));
            }
            let expected = class.qualified_name();
            if *key != expected {
                return Err(RefMinerError::malformed(
                    "class declaration",
                    SnapshotErrorKind::KeyMismatch {
                        key: key.clone(),
                        expected,
                    },
                ));
            }
        }

        for (key, method) in &self.methods {
            if method.name.is_empty() {
                return Err(RefMinerError::malformed(
                    "method declaration",
                    SnapshotErrorKind::EmptyName(key.clone()),
                ));
            }
            if !self.classes.contains_key(&method.owner_class) {
                return Err(RefMinerError::malformed(
                    "method declaration",
                    SnapshotErrorKind::DanglingOwner {
                        member: key.clone(),
                        owner: method.owner_class.clone(),
                    },
                ));
            }
            let expected = method.qualified_name();
            if *key != expected {
                return Err(RefMinerError::malformed(
                    "method declaration",
                    SnapshotErrorKind::KeyMismatch {
                        key: key.clone(),
                        expected,
                    },
                ));
            }
        }

        for (key, field) in &self.fields {
            if field.name.is_empty() {
                return Err(RefMinerError::malformed(
                    "field declaration",
                    SnapshotErrorKind::EmptyName(key.clone()),
                ));
            }
            if !self.classes.contains_key(&field.owner_class) {
                return Err(RefMinerError::malformed(
                    "field declaration",
                    SnapshotErrorKind::DanglingOwner {
                        member: key.clone(),
                        owner: field.owner_class.clone(),
                    },
                ));
            }
            let expected = field.qualified_name();
            if *key != expected {
                return Err(RefMinerError::malformed(
                    "field declaration",
                    SnapshotErrorKind::KeyMismatch {
                        key: key.clone(),
                        expected,
                    },
                ));
            }
        }

        self.validate_packages()
    }

    fn validate_packages(&self) -> Result<()> {
        let mismatch = |package: &str, class: &str| {
            RefMinerError::malformed(
                "package index",
                SnapshotErrorKind::PackageMismatch {
                    package: package.to_string(),
                    class: class.to_string(),
                },
            )
        };
        for (package, classes) in &self.packages {
            for key in classes {
                match self.classes.get(key) {
                    Some(class) if class.package_path == *package => {}
                    _ => return Err(mismatch(package, key)),
                }
            }
        }
        for (key, class) in &self.classes {
            let listed = self
                .packages
                .get(&class.package_path)
                .is_some_and(|classes| classes.contains(key));
            if !listed {
                return Err(mismatch(&class.package_path, key));
            }
        }
        Ok(())
    }

    /// Order-independent content fingerprint, used to short-circuit identical inputs.
    #[must_use]
    pub fn content_hash(&self) -> u64 {
        let mut keys: Vec<(&str, String)> = Vec::with_capacity(self.declaration_count());
        for (key, class) in &self.classes {
            keys.push((key, serde_json::to_string(class).unwrap_or_default()));
        }
        for (key, method) in &self.methods {
            keys.push((key, serde_json::to_string(method).unwrap_or_default()));
        }
        for (key, field) in &self.fields {
            keys.push((key, serde_json::to_string(field).unwrap_or_default()));
        }
        keys.sort();

        let mut hasher_input = Vec::new();
        for (key, body) in keys {
            hasher_input.extend(key.as_bytes());
            hasher_input.push(0);
            hasher_input.extend(body.as_bytes());
            hasher_input.push(0);
        }
        xxh3_64(&hasher_input)
    }
}

/// Incremental builder for [`Snapshot`].
///
/// Duplicate qualified names are remembered and reported by [`SnapshotBuilder::build`].
#[derive(Debug, Default)]
#[must_use]
pub struct SnapshotBuilder {
    snapshot: Snapshot,
    duplicates: Vec<SnapshotErrorKind>,
}

impl SnapshotBuilder {
    pub fn class(mut self, class: ClassDecl) -> Self {
        self.add_class(class);
        self
    }

    pub fn method(mut self, method: MethodDecl) -> Self {
        self.add_method(method);
        self
    }

    pub fn field(mut self, field: FieldDecl) -> Self {
        self.add_field(field);
        self
    }

    pub fn add_class(&mut self, class: ClassDecl) {
        let key = class.qualified_name();
        if self.snapshot.classes.contains_key(&key) {
            self.duplicates.push(SnapshotErrorKind::DuplicateClass(key));
            return;
        }
        self.snapshot
            .packages
            .entry(class.package_path.clone())
            .or_default()
            .insert(key.clone());
        self.snapshot.classes.insert(key, class);
    }

    pub fn add_method(&mut self, method: MethodDecl) {
        let key = method.qualified_name();
        if self.snapshot.methods.contains_key(&key) {
            self.duplicates.push(SnapshotErrorKind::DuplicateMethod(key));
            return;
        }
        self.snapshot.methods.insert(key, method);
    }

    pub fn add_field(&mut self, field: FieldDecl) {
        let key = field.qualified_name();
        if self.snapshot.fields.contains_key(&key) {
            self.duplicates.push(SnapshotErrorKind::DuplicateField(key));
            return;
        }
        self.snapshot.fields.insert(key, field);
    }

    /// Finish the snapshot, failing on the first duplicate or invariant violation.
    pub fn build(self) -> Result<Snapshot> {
        if let Some(duplicate) = self.duplicates.into_iter().next() {
            return Err(RefMinerError::malformed("building snapshot", duplicate));
        }
        self.snapshot.validate()?;
        Ok(self.snapshot)
    }
}
