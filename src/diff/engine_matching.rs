//! Entity matching logic for the diff engine.
//!
//! Classes are matched first (rename hints, exact qualified name, then
//! best candidate), then methods and fields inside matched class pairs,
//! then cross-class leftovers so moved members can still pair up.

use super::engine_config::EngineConfig;
use super::match_set::{Ambiguity, KindMatches, MatchOrigin, MatchSet, MatchedPair};
use crate::matching::{ClassProfile, MatchingConfig, SimilarityScorer};
use crate::model::{simple_name, RenameHints, SnapshotIndex};
use rayon::prelude::*;
use std::cmp::Ordering;
use std::collections::{HashMap, HashSet};
use tracing::{debug, trace};

/// A scored (before, after) pair awaiting greedy assignment.
#[derive(Debug, Clone, Copy)]
struct Candidate<'k> {
    before: &'k str,
    after: &'k str,
    score: f64,
    /// Same package (classes) or corresponding owner (members)
    same_container: bool,
}

/// Descending score, then same container first, then before/after name.
fn candidate_order(a: &Candidate<'_>, b: &Candidate<'_>) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| b.same_container.cmp(&a.same_container))
        .then_with(|| a.before.cmp(b.before))
        .then_with(|| a.after.cmp(b.after))
}

/// One-to-one bookkeeping shared by all passes of one declaration kind.
#[derive(Debug, Default)]
struct Assignment<'k> {
    pairs: Vec<MatchedPair>,
    used_before: HashSet<&'k str>,
    used_after: HashSet<&'k str>,
}

impl<'k> Assignment<'k> {
    fn is_free(&self, before: &str, after: &str) -> bool {
        !self.used_before.contains(before) && !self.used_after.contains(after)
    }

    fn accept(&mut self, before: &'k str, after: &'k str, score: f64, origin: MatchOrigin) {
        self.used_before.insert(before);
        self.used_after.insert(after);
        self.pairs.push(MatchedPair::new(before, after, score, origin));
    }

    /// Greedy assignment over scored candidates with deterministic tie-breaks.
    fn assign_greedy(&mut self, mut candidates: Vec<Candidate<'k>>, ambiguities: &mut Vec<Ambiguity>) {
        candidates.sort_by(candidate_order);
        for (i, candidate) in candidates.iter().enumerate() {
            if !self.is_free(candidate.before, candidate.after) {
                continue;
            }
            if let Some(alternative) = candidates[i + 1..]
                .iter()
                .take_while(|other| other.score.total_cmp(&candidate.score) == Ordering::Equal)
                .find(|other| {
                    (other.before == candidate.before && !self.used_after.contains(other.after))
                        || (other.after == candidate.after && !self.used_before.contains(other.before))
                })
            {
                trace!(
                    before = candidate.before,
                    after = candidate.after,
                    alternative_before = alternative.before,
                    alternative_after = alternative.after,
                    "tie resolved deterministically"
                );
                ambiguities.push(Ambiguity {
                    before: candidate.before.to_string(),
                    after: candidate.after.to_string(),
                    alternative: (alternative.before.to_string(), alternative.after.to_string()),
                    score: candidate.score,
                });
            }
            trace!(
                before = candidate.before,
                after = candidate.after,
                score = candidate.score,
                "candidate accepted"
            );
            self.accept(candidate.before, candidate.after, candidate.score, MatchOrigin::Similarity);
        }
    }

    fn finish<'s>(
        self,
        before_keys: impl Iterator<Item = &'s str>,
        after_keys: impl Iterator<Item = &'s str>,
    ) -> KindMatches {
        let removed = before_keys
            .filter(|k| !self.used_before.contains(*k))
            .map(ToString::to_string)
            .collect();
        let added = after_keys
            .filter(|k| !self.used_after.contains(*k))
            .map(ToString::to_string)
            .collect();
        KindMatches {
            matched: self.pairs,
            removed,
            added,
        }
    }
}

/// Score every (before, after) combination, in parallel for large workloads.
///
/// Only candidates scoring strictly above `threshold` are kept.
fn score_candidates<'k, F>(
    befores: &[&'k str],
    afters: &[&'k str],
    threshold: f64,
    engine: &EngineConfig,
    score: F,
) -> Vec<Candidate<'k>>
where
    F: Fn(&'k str, &'k str) -> Option<(f64, bool)> + Sync,
{
    let build = |before: &'k str, after: &'k str| -> Option<Candidate<'k>> {
        score(before, after)
            .filter(|(s, _)| *s > threshold)
            .map(|(score, same_container)| Candidate {
                before,
                after,
                score,
                same_container,
            })
    };

    let build = &build;

    if engine.use_parallel(befores.len() * afters.len()) {
        befores
            .par_iter()
            .flat_map_iter(|&b| afters.iter().filter_map(move |&a| build(b, a)))
            .collect()
    } else {
        befores
            .iter()
            .flat_map(|&b| afters.iter().filter_map(move |&a| build(b, a)))
            .collect()
    }
}

/// Match all declarations of two snapshots.
///
/// Deterministic and total: every declaration ends up matched, removed or
/// added. Never fails.
pub fn match_entities(
    before: &SnapshotIndex<'_>,
    after: &SnapshotIndex<'_>,
    hints: &RenameHints,
    config: &MatchingConfig,
    engine: &EngineConfig,
) -> MatchSet {
    let scorer = SimilarityScorer::new(&config.weights);
    let mut ambiguities = Vec::new();

    let classes = match_classes(before, after, hints, config, engine, &scorer, &mut ambiguities);
    let class_map: HashMap<&str, &str> = classes
        .matched
        .iter()
        .map(|p| (p.before.as_str(), p.after.as_str()))
        .collect();

    let methods = match_members(
        MemberKind::Method,
        before,
        after,
        &class_map,
        config.thresholds.method,
        engine,
        &scorer,
        &mut ambiguities,
    );
    let fields = match_members(
        MemberKind::Field,
        before,
        after,
        &class_map,
        config.thresholds.field,
        engine,
        &scorer,
        &mut ambiguities,
    );

    MatchSet::from_parts(classes, methods, fields, ambiguities)
}

fn match_classes(
    before: &SnapshotIndex<'_>,
    after: &SnapshotIndex<'_>,
    hints: &RenameHints,
    config: &MatchingConfig,
    engine: &EngineConfig,
    scorer: &SimilarityScorer<'_>,
    ambiguities: &mut Vec<Ambiguity>,
) -> KindMatches {
    let before_classes = &before.snapshot().classes;
    let after_classes = &after.snapshot().classes;
    let mut assignment = Assignment::default();

    // Pass 0: explicit rename hints
    for (source, target) in hints {
        match (before_classes.get_key_value(source), after_classes.get_key_value(target)) {
            (Some((b, _)), Some((a, _))) => {
                if assignment.is_free(b, a) {
                    assignment.accept(b, a, 1.0, MatchOrigin::RenameHint);
                }
            }
            _ => pair_by_file_hint(before, after, source, target, &mut assignment),
        }
    }
    let hinted = assignment.pairs.len();

    // Pass 1: identical qualified names
    for key in before_classes.keys() {
        if let Some((a, _)) = after_classes.get_key_value(key) {
            if assignment.is_free(key, a) {
                assignment.accept(key, a, 1.0, MatchOrigin::Identity);
            }
        }
    }
    debug!(
        hinted,
        exact = assignment.pairs.len() - hinted,
        "class identity passes complete"
    );

    // Pass 2: best candidates
    let befores: Vec<&str> = before_classes
        .keys()
        .map(String::as_str)
        .filter(|k| !assignment.used_before.contains(*k))
        .collect();
    let afters: Vec<&str> = after_classes
        .keys()
        .map(String::as_str)
        .filter(|k| !assignment.used_after.contains(*k))
        .collect();

    if !befores.is_empty() && !afters.is_empty() {
        let before_profiles: HashMap<&str, ClassProfile<'_>> = befores
            .iter()
            .filter_map(|&k| class_profile(before, k).map(|p| (k, p)))
            .collect();
        let after_profiles: HashMap<&str, ClassProfile<'_>> = afters
            .iter()
            .filter_map(|&k| class_profile(after, k).map(|p| (k, p)))
            .collect();

        let candidates = score_candidates(&befores, &afters, config.thresholds.class, engine, |b, a| {
            let (bp, ap) = (before_profiles.get(b)?, after_profiles.get(a)?);
            let same_package = bp.decl.package_path == ap.decl.package_path;
            Some((scorer.class_score(bp, ap), same_package))
        });
        debug!(
            unmatched_before = befores.len(),
            unmatched_after = afters.len(),
            candidates = candidates.len(),
            "class candidate pass"
        );
        assignment.assign_greedy(candidates, ambiguities);
    }

    assignment.finish(
        before_classes.keys().map(String::as_str),
        after_classes.keys().map(String::as_str),
    )
}

fn class_profile<'a>(index: &SnapshotIndex<'a>, key: &str) -> Option<ClassProfile<'a>> {
    index.snapshot().classes.get(key).map(|decl| ClassProfile {
        decl,
        members: index.member_names(key),
        supers: index.super_simple_names(key),
    })
}

/// Pair classes declared in a hinted (source file -> target file) rename.
///
/// Same simple name pairs first; a single leftover on each side pairs too.
fn pair_by_file_hint<'k>(
    before: &SnapshotIndex<'k>,
    after: &SnapshotIndex<'k>,
    source_file: &str,
    target_file: &str,
    assignment: &mut Assignment<'k>,
) {
    let in_file = |index: &SnapshotIndex<'k>, file: &str| -> Vec<&'k str> {
        index
            .snapshot()
            .classes
            .iter()
            .filter(|(_, c)| !file.is_empty() && c.source_file == file)
            .map(|(k, _)| k.as_str())
            .collect()
    };
    let sources = in_file(before, source_file);
    let targets = in_file(after, target_file);
    if sources.is_empty() || targets.is_empty() {
        trace!(source_file, target_file, "rename hint matches no classes");
        return;
    }

    for &b in &sources {
        if let Some(a) = targets
            .iter()
            .copied()
            .find(|a| simple_name(a) == simple_name(b) && assignment.is_free(b, a))
        {
            assignment.accept(b, a, 1.0, MatchOrigin::RenameHint);
        }
    }

    let free_sources: Vec<&str> = sources
        .iter()
        .copied()
        .filter(|b| !assignment.used_before.contains(*b))
        .collect();
    let free_targets: Vec<&str> = targets
        .iter()
        .copied()
        .filter(|a| !assignment.used_after.contains(*a))
        .collect();
    if let (&[b], &[a]) = (free_sources.as_slice(), free_targets.as_slice()) {
        assignment.accept(b, a, 1.0, MatchOrigin::RenameHint);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MemberKind {
    Method,
    Field,
}

impl MemberKind {
    const fn label(self) -> &'static str {
        match self {
            Self::Method => "method",
            Self::Field => "field",
        }
    }
}

/// Borrowed view of one member, enough for matching.
struct MemberView<'k> {
    owner: &'k str,
    name: &'k str,
    /// Owner-relative identity: method signature or field name
    local_key: String,
}

fn member_views<'k>(kind: MemberKind, index: &SnapshotIndex<'k>) -> Vec<(&'k str, MemberView<'k>)> {
    let snapshot = index.snapshot();
    match kind {
        MemberKind::Method => snapshot
            .methods
            .iter()
            .map(|(k, m)| {
                let view = MemberView {
                    owner: m.owner_class.as_str(),
                    name: m.name.as_str(),
                    local_key: m.signature(),
                };
                (k.as_str(), view)
            })
            .collect(),
        MemberKind::Field => snapshot
            .fields
            .iter()
            .map(|(k, f)| {
                let view = MemberView {
                    owner: f.owner_class.as_str(),
                    name: f.name.as_str(),
                    local_key: f.name.clone(),
                };
                (k.as_str(), view)
            })
            .collect(),
    }
}

/// Members of `owner` not assigned yet.
fn unassigned<'k>(views: &[(&'k str, MemberView<'k>)], owner: &str, used: &HashSet<&'k str>) -> Vec<&'k str> {
    views
        .iter()
        .filter(|(k, v)| v.owner == owner && !used.contains(*k))
        .map(|(k, _)| *k)
        .collect()
}

#[allow(clippy::too_many_arguments)]
fn match_members(
    kind: MemberKind,
    before: &SnapshotIndex<'_>,
    after: &SnapshotIndex<'_>,
    class_map: &HashMap<&str, &str>,
    threshold: f64,
    engine: &EngineConfig,
    scorer: &SimilarityScorer<'_>,
    ambiguities: &mut Vec<Ambiguity>,
) -> KindMatches {
    let before_views = member_views(kind, before);
    let after_views = member_views(kind, after);
    let before_owner: HashMap<&str, &str> = before_views.iter().map(|(k, v)| (*k, v.owner)).collect();
    let after_owner: HashMap<&str, &str> = after_views.iter().map(|(k, v)| (*k, v.owner)).collect();

    let score = |b: &str, a: &str| -> Option<f64> {
        match kind {
            MemberKind::Method => Some(scorer.method_score(
                before.snapshot().methods.get(b)?,
                after.snapshot().methods.get(a)?,
            )),
            MemberKind::Field => Some(scorer.field_score(
                before.snapshot().fields.get(b)?,
                after.snapshot().fields.get(a)?,
            )),
        }
    };
    let corresponds = |b: &str, a: &str| -> bool {
        match (before_owner.get(b), after_owner.get(a)) {
            (Some(bo), Some(ao)) => class_map.get(*bo).copied() == Some(*ao),
            _ => false,
        }
    };

    let mut assignment = Assignment::default();

    // Phase A.1: same owner-relative key inside matched class pairs
    let mut after_by_owner_key: HashMap<(&str, &str), &str> = HashMap::new();
    for (key, view) in &after_views {
        after_by_owner_key.insert((view.owner, view.local_key.as_str()), *key);
    }
    for (key, view) in &before_views {
        let Some(&after_owner_class) = class_map.get(view.owner) else {
            continue;
        };
        if let Some(&a) = after_by_owner_key.get(&(after_owner_class, view.local_key.as_str())) {
            if assignment.is_free(key, a) {
                assignment.accept(*key, a, 1.0, MatchOrigin::Identity);
            }
        }
    }
    let exact = assignment.pairs.len();

    // Phase A.2: same name inside each matched class pair, any signature
    let before_name: HashMap<&str, &str> = before_views.iter().map(|(k, v)| (*k, v.name)).collect();
    let after_name: HashMap<&str, &str> = after_views.iter().map(|(k, v)| (*k, v.name)).collect();
    let mut same_name = Vec::new();
    for (before_class, after_class) in class_map {
        let befores = unassigned(&before_views, before_class, &assignment.used_before);
        let afters = unassigned(&after_views, after_class, &assignment.used_after);
        if befores.is_empty() || afters.is_empty() {
            continue;
        }
        same_name.extend(score_candidates(&befores, &afters, f64::NEG_INFINITY, engine, |b, a| {
            if before_name.get(b) == after_name.get(a) {
                score(b, a).map(|s| (s, true))
            } else {
                None
            }
        }));
    }
    assignment.assign_greedy(same_name, ambiguities);
    let renamed_signatures = assignment.pairs.len() - exact;

    // Phase A.3: best candidates inside each matched class pair
    let mut within = Vec::new();
    for (before_class, after_class) in class_map {
        let befores = unassigned(&before_views, before_class, &assignment.used_before);
        let afters = unassigned(&after_views, after_class, &assignment.used_after);
        if befores.is_empty() || afters.is_empty() {
            continue;
        }
        within.extend(score_candidates(&befores, &afters, threshold, engine, |b, a| {
            score(b, a).map(|s| (s, true))
        }));
    }
    assignment.assign_greedy(within, ambiguities);
    let within_pairs = assignment.pairs.len() - exact - renamed_signatures;

    // Phase B: cross-class leftovers, for moves
    let befores: Vec<&str> = before_views
        .iter()
        .map(|(k, _)| *k)
        .filter(|k| !assignment.used_before.contains(*k))
        .collect();
    let afters: Vec<&str> = after_views
        .iter()
        .map(|(k, _)| *k)
        .filter(|k| !assignment.used_after.contains(*k))
        .collect();
    if !befores.is_empty() && !afters.is_empty() {
        let cross = score_candidates(&befores, &afters, threshold, engine, |b, a| {
            score(b, a).map(|s| (s, corresponds(b, a)))
        });
        assignment.assign_greedy(cross, ambiguities);
    }

    debug!(
        kind = kind.label(),
        exact,
        renamed_signatures,
        within_pairs,
        cross_class = assignment.pairs.len() - exact - renamed_signatures - within_pairs,
        "member matching complete"
    );

    assignment.finish(
        before_views.iter().map(|(k, _)| *k),
        after_views.iter().map(|(k, _)| *k),
    )
}
