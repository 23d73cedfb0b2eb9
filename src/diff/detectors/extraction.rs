//! Extract Method and Inline Method.
//!
//! Both look for a body-token transfer between a matched method pair and an
//! unmatched method: the tokens that left (or entered) the matched body must
//! cover the unmatched method's body, and a call to it must appear (or
//! disappear) at the same time.

use crate::diff::refactoring::{EntityRef, Refactoring, RefactoringType};
use crate::diff::traits::{DetectionContext, RefactoringDetector};
use crate::matching::sequence::{coverage, multiset_difference};
use crate::model::MethodDecl;
use regex::Regex;
use tracing::trace;

/// Occurrences of a method name not preceded by an identifier character.
///
/// Explicit boundaries instead of `\b` so that backtick names and names
/// starting with a symbol still match. The trailing side is checked in
/// [`call_count`], since the regex crate has no lookahead.
fn call_pattern(name: &str) -> Option<Regex> {
    Regex::new(&format!(r"(?:^|[^\w])({})", regex::escape(name))).ok()
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}

fn call_count(pattern: &Regex, body: &[String]) -> usize {
    body.iter()
        .map(|token| {
            pattern
                .captures_iter(token)
                .filter_map(|caps| caps.get(1))
                .filter(|name| !token[name.end()..].chars().next().is_some_and(is_word_char))
                .count()
        })
        .sum()
}

/// Share of `moved` found among the tokens that are in `from` but not in `to`.
fn transfer_coverage(moved: &MethodDecl, from: &MethodDecl, to: &MethodDecl) -> f64 {
    coverage(&moved.body_tokens, &multiset_difference(&from.body_tokens, &to.body_tokens))
}

/// Extract Method / Extract And Move Method.
#[derive(Debug, Clone, Copy, Default)]
pub struct ExtractMethodDetector;

impl RefactoringDetector for ExtractMethodDetector {
    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Refactoring> {
        let threshold = ctx.config.thresholds.extract_overlap;
        let mut found = Vec::new();

        for key in &ctx.matches.added_methods {
            let Some(extracted) = ctx.after_snapshot().methods.get(key) else {
                continue;
            };
            if extracted.body_tokens.is_empty() {
                continue;
            }
            let Some(pattern) = call_pattern(&extracted.name) else {
                continue;
            };

            for pair in &ctx.matches.matched_methods {
                let Some((source_before, source_after)) = ctx.method_pair(&pair.before, &pair.after) else {
                    continue;
                };
                if source_after.body_tokens.len() >= source_before.body_tokens.len()
                    || call_count(&pattern, &source_after.body_tokens)
                        <= call_count(&pattern, &source_before.body_tokens)
                {
                    continue;
                }
                let overlap = transfer_coverage(extracted, source_before, source_after);
                if overlap < threshold {
                    trace!(source = %pair.before, extracted = %key, overlap, "extraction below threshold");
                    continue;
                }

                let (kind, description) = if extracted.owner_class == source_after.owner_class {
                    let kind = RefactoringType::ExtractMethod;
                    (
                        kind,
                        format!(
                            "{kind} {} extracted from {} in class {}",
                            extracted.display_signature(),
                            source_before.display_signature(),
                            source_after.owner_class
                        ),
                    )
                } else {
                    let kind = RefactoringType::ExtractAndMoveMethod;
                    (
                        kind,
                        format!(
                            "{kind} {} extracted from {} in class {} & moved to class {}",
                            extracted.display_signature(),
                            source_before.display_signature(),
                            source_after.owner_class,
                            extracted.owner_class
                        ),
                    )
                };

                found.push(
                    Refactoring::new(kind, EntityRef::method(&pair.before), EntityRef::method(key), description, overlap)
                        .with_left(ctx.before_method_location(source_before, "source method declaration before extraction"))
                        .with_right(ctx.after_method_location(extracted, "extracted method declaration"))
                        .with_right(ctx.after_method_location(source_after, "source method declaration after extraction")),
                );
            }
        }
        found
    }

    fn name(&self) -> &'static str {
        "extract-method"
    }
}

/// Inline Method: a removed method whose body now sits inside a former caller.
#[derive(Debug, Clone, Copy, Default)]
pub struct InlineMethodDetector;

impl RefactoringDetector for InlineMethodDetector {
    fn detect(&self, ctx: &DetectionContext<'_>) -> Vec<Refactoring> {
        let threshold = ctx.config.thresholds.extract_overlap;
        let mut found = Vec::new();

        for key in &ctx.matches.removed_methods {
            let Some(inlined) = ctx.before_snapshot().methods.get(key) else {
                continue;
            };
            if inlined.body_tokens.is_empty() {
                continue;
            }
            let Some(pattern) = call_pattern(&inlined.name) else {
                continue;
            };

            for pair in &ctx.matches.matched_methods {
                let Some((target_before, target_after)) = ctx.method_pair(&pair.before, &pair.after) else {
                    continue;
                };
                if target_after.body_tokens.len() <= target_before.body_tokens.len()
                    || call_count(&pattern, &target_after.body_tokens)
                        >= call_count(&pattern, &target_before.body_tokens)
                {
                    continue;
                }
                let overlap = transfer_coverage(inlined, target_after, target_before);
                if overlap < threshold {
                    continue;
                }

                let kind = RefactoringType::InlineMethod;
                found.push(
                    Refactoring::new(
                        kind,
                        EntityRef::method(key),
                        EntityRef::method(&pair.after),
                        format!(
                            "{kind} {} inlined to {} in class {}",
                            inlined.display_signature(),
                            target_after.display_signature(),
                            target_after.owner_class
                        ),
                        overlap,
                    )
                    .with_left(ctx.before_method_location(inlined, "inlined method declaration"))
                    .with_left(ctx.before_method_location(target_before, "target method declaration before inline"))
                    .with_right(ctx.after_method_location(target_after, "target method declaration after inline")),
                );
            }
        }
        found
    }

    fn name(&self) -> &'static str {
        "inline-method"
    }
}
