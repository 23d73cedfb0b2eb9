//! Sequence and multiset comparisons over token lists.

use similar::{capture_diff_slices, Algorithm, DiffOp};
use std::collections::HashMap;
use std::hash::Hash;

/// One step of an alignment between two sequences.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOp {
    /// `a[i]` corresponds to `b[j]`
    Keep(usize, usize),
    /// `a[i]` has no counterpart
    Delete(usize),
    /// `b[j]` has no counterpart
    Insert(usize),
}

fn lcs_ops<T: Hash + Eq + Ord>(a: &[T], b: &[T]) -> Vec<DiffOp> {
    capture_diff_slices(Algorithm::Lcs, a, b)
}

/// Length of the longest common subsequence.
#[must_use]
pub fn lcs_length<T: Hash + Eq + Ord>(a: &[T], b: &[T]) -> usize {
    if a.is_empty() || b.is_empty() {
        return 0;
    }
    lcs_ops(a, b)
        .iter()
        .map(|op| match *op {
            DiffOp::Equal { len, .. } => len,
            _ => 0,
        })
        .sum()
}

/// LCS alignment of `a` against `b`, in sequence order.
///
/// Within a replaced run every deletion comes before the insertions.
#[must_use]
pub fn align<T: Hash + Eq + Ord>(a: &[T], b: &[T]) -> Vec<EditOp> {
    let mut ops = Vec::with_capacity(a.len().max(b.len()));
    for op in lcs_ops(a, b) {
        match op {
            DiffOp::Equal {
                old_index,
                new_index,
                len,
            } => ops.extend((0..len).map(|k| EditOp::Keep(old_index + k, new_index + k))),
            DiffOp::Delete {
                old_index, old_len, ..
            } => ops.extend((old_index..old_index + old_len).map(EditOp::Delete)),
            DiffOp::Insert {
                new_index, new_len, ..
            } => ops.extend((new_index..new_index + new_len).map(EditOp::Insert)),
            DiffOp::Replace {
                old_index,
                old_len,
                new_index,
                new_len,
            } => {
                ops.extend((old_index..old_index + old_len).map(EditOp::Delete));
                ops.extend((new_index..new_index + new_len).map(EditOp::Insert));
            }
        }
    }
    ops
}

/// LCS-based Dice coefficient: `2 * lcs / (|a| + |b|)`, 1.0 for two empty sequences.
#[must_use]
pub fn lcs_dice<T: Hash + Eq + Ord>(a: &[T], b: &[T]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    2.0 * lcs_length(a, b) as f64 / (a.len() + b.len()) as f64
}

/// Count occurrences of each item.
pub fn multiset<T: Hash + Eq>(items: impl IntoIterator<Item = T>) -> HashMap<T, usize> {
    let mut counts = HashMap::new();
    for item in items {
        *counts.entry(item).or_insert(0) += 1;
    }
    counts
}

/// Size of the multiset intersection.
#[must_use]
pub fn multiset_intersection<T: Hash + Eq>(a: &HashMap<T, usize>, b: &HashMap<T, usize>) -> usize {
    a.iter()
        .map(|(item, count)| (*count).min(b.get(item).copied().unwrap_or(0)))
        .sum()
}

/// Multiset difference `a - b` as counts.
#[must_use]
pub fn multiset_difference<'t, T: Hash + Eq>(a: &'t [T], b: &'t [T]) -> HashMap<&'t T, usize> {
    let mut remaining = multiset(a.iter());
    for item in b {
        if let Some(count) = remaining.get_mut(item) {
            *count = count.saturating_sub(1);
        }
    }
    remaining.retain(|_, count| *count > 0);
    remaining
}

/// Dice coefficient of two token multisets, 1.0 when both are empty.
#[must_use]
pub fn multiset_dice<T: Hash + Eq>(a: &[T], b: &[T]) -> f64 {
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let shared = multiset_intersection(&multiset(a.iter()), &multiset(b.iter()));
    2.0 * shared as f64 / (a.len() + b.len()) as f64
}

/// Fraction of `part` (as a multiset) covered by `pool`. Zero for an empty `part`.
#[must_use]
pub fn coverage<T: Hash + Eq>(part: &[T], pool: &HashMap<&T, usize>) -> f64 {
    if part.is_empty() {
        return 0.0;
    }
    let wanted = multiset(part.iter());
    let covered: usize = wanted
        .iter()
        .map(|(item, count)| (*count).min(pool.get(*item).copied().unwrap_or(0)))
        .sum();
    covered as f64 / part.len() as f64
}
