//! Precedence resolution over the merged detector output.

use super::refactoring::{EntityRef, Refactoring};
use std::collections::HashSet;
use tracing::trace;

/// Keep the first record for every `(before, after)` entity pair.
///
/// `records` must be in detector order, so the first record is the one
/// from the highest-precedence detector. Runs single-threaded over the
/// merged sequence.
#[must_use]
pub fn deduplicate(records: Vec<Refactoring>) -> Vec<Refactoring> {
    let mut seen: HashSet<(EntityRef, EntityRef)> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|record| {
            let fresh = seen.insert((record.before.clone(), record.after.clone()));
            if !fresh {
                trace!(
                    kind = %record.refactoring_type,
                    before = %record.before.name,
                    after = %record.after.name,
                    "dropped lower-precedence refactoring"
                );
            }
            fresh
        })
        .collect()
}
