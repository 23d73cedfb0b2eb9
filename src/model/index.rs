//! Lookup index over a snapshot.
//!
//! Provides members-per-class, member-name sets and super-type resolution
//! with transitive hierarchy queries. Built once per snapshot per diff run.

use super::{simple_name, Snapshot};
use pathfinding::directed::bfs::bfs_reach;
use std::collections::{BTreeSet, HashMap};

/// Read-only index borrowed from a [`Snapshot`].
#[derive(Debug)]
pub struct SnapshotIndex<'a> {
    snapshot: &'a Snapshot,
    methods_by_class: HashMap<&'a str, Vec<&'a str>>,
    fields_by_class: HashMap<&'a str, Vec<&'a str>>,
    by_simple_name: HashMap<&'a str, Vec<&'a str>>,
    /// Resolved direct super types (only those declared in the snapshot)
    supers: HashMap<&'a str, Vec<&'a str>>,
    /// Direct subclasses, inverse of `supers`
    subs: HashMap<&'a str, Vec<&'a str>>,
}

impl<'a> SnapshotIndex<'a> {
    /// Build the index for a snapshot.
    #[must_use]
    pub fn build(snapshot: &'a Snapshot) -> Self {
        let mut methods_by_class: HashMap<&str, Vec<&str>> = HashMap::new();
        for (key, method) in &snapshot.methods {
            methods_by_class
                .entry(method.owner_class.as_str())
                .or_default()
                .push(key.as_str());
        }

        let mut fields_by_class: HashMap<&str, Vec<&str>> = HashMap::new();
        for (key, field) in &snapshot.fields {
            fields_by_class
                .entry(field.owner_class.as_str())
                .or_default()
                .push(key.as_str());
        }

        let mut by_simple_name: HashMap<&str, Vec<&str>> = HashMap::new();
        for (key, class) in &snapshot.classes {
            by_simple_name
                .entry(class.name.as_str())
                .or_default()
                .push(key.as_str());
        }
        for candidates in by_simple_name.values_mut() {
            candidates.sort_unstable();
        }

        let mut index = Self {
            snapshot,
            methods_by_class,
            fields_by_class,
            by_simple_name,
            supers: HashMap::new(),
            subs: HashMap::new(),
        };

        let mut supers: HashMap<&str, Vec<&str>> = HashMap::new();
        let mut subs: HashMap<&str, Vec<&str>> = HashMap::new();
        for (key, class) in &snapshot.classes {
            for declared in &class.super_types {
                if let Some(resolved) = index.resolve_type(declared, &class.package_path) {
                    if resolved == key.as_str() {
                        continue;
                    }
                    supers.entry(key.as_str()).or_default().push(resolved);
                    subs.entry(resolved).or_default().push(key.as_str());
                }
            }
        }
        for children in subs.values_mut() {
            children.sort_unstable();
            children.dedup();
        }
        index.supers = supers;
        index.subs = subs;
        index
    }

    #[must_use]
    pub const fn snapshot(&self) -> &'a Snapshot {
        self.snapshot
    }

    /// Resolve a declared type name to a class in this snapshot.
    ///
    /// Exact qualified names win. Otherwise the simple name is looked up,
    /// preferring a class in `from_package`, then the lexicographically
    /// smallest candidate.
    #[must_use]
    pub fn resolve_type(&self, declared: &str, from_package: &str) -> Option<&'a str> {
        let base = declared.split('<').next().unwrap_or(declared).trim();
        if let Some((key, _)) = self.snapshot.classes.get_key_value(base) {
            return Some(key.as_str());
        }
        let candidates = self.by_simple_name.get(simple_name(base))?;
        candidates
            .iter()
            .find(|qualified| {
                self.snapshot
                    .classes
                    .get(**qualified)
                    .is_some_and(|c| c.package_path == from_package)
            })
            .or_else(|| candidates.first())
            .copied()
    }

    /// Qualified method keys owned by `class`, in snapshot order.
    #[must_use]
    pub fn methods_of(&self, class: &str) -> &[&'a str] {
        self.methods_by_class.get(class).map_or(&[], Vec::as_slice)
    }

    /// Qualified field keys owned by `class`, in snapshot order.
    #[must_use]
    pub fn fields_of(&self, class: &str) -> &[&'a str] {
        self.fields_by_class.get(class).map_or(&[], Vec::as_slice)
    }

    /// Names of methods and fields declared by `class`.
    #[must_use]
    pub fn member_names(&self, class: &str) -> BTreeSet<&'a str> {
        let methods = self
            .methods_of(class)
            .iter()
            .filter_map(|key| self.snapshot.methods.get(*key))
            .map(|m| m.name.as_str());
        let fields = self
            .fields_of(class)
            .iter()
            .filter_map(|key| self.snapshot.fields.get(*key))
            .map(|f| f.name.as_str());
        methods.chain(fields).collect()
    }

    /// Simple names of the declared super types, resolved or not.
    #[must_use]
    pub fn super_simple_names(&self, class: &str) -> BTreeSet<&'a str> {
        self.snapshot
            .classes
            .get(class)
            .map(|c| c.super_types.iter().map(|s| simple_name(s)).collect())
            .unwrap_or_default()
    }

    /// Direct super types declared in this snapshot.
    #[must_use]
    pub fn direct_supers(&self, class: &str) -> &[&'a str] {
        self.supers.get(class).map_or(&[], Vec::as_slice)
    }

    /// Direct subclasses declared in this snapshot.
    #[must_use]
    pub fn direct_subclasses(&self, class: &str) -> &[&'a str] {
        self.subs.get(class).map_or(&[], Vec::as_slice)
    }

    /// All transitive super types of `class`, excluding itself.
    #[must_use]
    pub fn ancestors(&self, class: &str) -> BTreeSet<&'a str> {
        let Some((start, _)) = self.snapshot.classes.get_key_value(class) else {
            return BTreeSet::new();
        };
        let start = start.as_str();
        bfs_reach(start, |node| self.direct_supers(node).to_vec())
            .filter(|node| *node != start)
            .collect()
    }

    /// All transitive subclasses of `class`, excluding itself.
    #[must_use]
    pub fn descendants(&self, class: &str) -> BTreeSet<&'a str> {
        let Some((start, _)) = self.snapshot.classes.get_key_value(class) else {
            return BTreeSet::new();
        };
        let start = start.as_str();
        bfs_reach(start, |node| self.direct_subclasses(node).to_vec())
            .filter(|node| *node != start)
            .collect()
    }

    /// Whether `sub` transitively extends or implements `sup` (strict).
    #[must_use]
    pub fn is_subtype_of(&self, sub: &str, sup: &str) -> bool {
        sub != sup && self.ancestors(sub).contains(sup)
    }
}
