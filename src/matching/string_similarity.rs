//! Identifier similarity.
//!
//! Names are compared with a case-sensitive normalized Levenshtein
//! distance. Dropping or adding a camel-case prefix or suffix (`getX` vs
//! `x`, `userId` vs `id`) earns an affix score that is usually higher than
//! what the raw edit distance gives.

/// Similarity of two identifiers in [0, 1]. Symmetric; 1.0 only for equal names.
#[must_use]
pub fn name_similarity(a: &str, b: &str) -> f64 {
    if a == b {
        return 1.0;
    }
    if a.is_empty() || b.is_empty() {
        return 0.0;
    }

    let len_a = a.chars().count();
    let len_b = b.chars().count();
    let max_len = len_a.max(len_b);
    let distance = strsim::levenshtein(a, b);
    let edit = 1.0 - distance as f64 / max_len as f64;

    let (short, long) = if len_a <= len_b { (a, b) } else { (b, a) };
    let affix = affix_similarity(short, long);

    // Unequal names stay strictly below an exact match
    edit.max(affix).min(0.99)
}

/// Score for `short` being a camel-case prefix or suffix of `long`, compared
/// case-insensitively. Zero when it is neither.
#[must_use]
pub fn affix_similarity(short: &str, long: &str) -> f64 {
    let short_chars: Vec<char> = short.chars().collect();
    let long_chars: Vec<char> = long.chars().collect();
    if short_chars.is_empty() || short_chars.len() >= long_chars.len() {
        return 0.0;
    }

    let eq = |x: &char, y: &char| x.to_lowercase().eq(y.to_lowercase());
    let n = short_chars.len();
    let is_prefix = short_chars.iter().zip(&long_chars).all(|(x, y)| eq(x, y))
        && is_word_start(&long_chars, n);
    let offset = long_chars.len() - n;
    let is_suffix = short_chars
        .iter()
        .zip(&long_chars[offset..])
        .all(|(x, y)| eq(x, y))
        && is_word_start(&long_chars, offset);

    if is_prefix || is_suffix {
        0.5 + 0.5 * n as f64 / long_chars.len() as f64
    } else {
        0.0
    }
}

/// Whether position `at` in `chars` begins a new camel-case or snake-case word.
fn is_word_start(chars: &[char], at: usize) -> bool {
    match (at.checked_sub(1).and_then(|i| chars.get(i)), chars.get(at)) {
        (None, _) | (_, None) => true,
        (Some(prev), Some(current)) => {
            *prev == '_'
                || *current == '_'
                || (current.is_uppercase() && !prev.is_uppercase())
                || (current.is_ascii_digit() != prev.is_ascii_digit())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_match() {
        assert_eq!(name_similarity("render", "render"), 1.0);
        assert_eq!(name_similarity("", ""), 1.0);
        assert_eq!(name_similarity("a", ""), 0.0);
    }

    #[test]
    fn test_affix_removal_beats_substitution() {
        let getter = name_similarity("getX", "x");
        let unrelated = name_similarity("getX", "z");
        assert!(getter > unrelated, "{getter} should exceed {unrelated}");
        assert!(name_similarity("userId", "id") > name_similarity("userId", "ix"));
    }

    #[test]
    fn test_affix_requires_word_boundary() {
        assert_eq!(affix_similarity("cat", "category"), 0.0);
        assert!(affix_similarity("load", "loadAll") > 0.5);
        assert!(affix_similarity("count", "item_count") > 0.5);
    }

    #[test]
    fn test_case_sensitive_edit_distance() {
        assert!(name_similarity("value", "Value") < 1.0);
        assert!(name_similarity("value", "Value") > name_similarity("value", "xalue") - 1e-9);
    }

    #[test]
    fn test_symmetric() {
        for (a, b) in [("getName", "name"), ("parse", "parseAll"), ("foo", "bar")] {
            assert_eq!(name_similarity(a, b), name_similarity(b, a));
        }
    }
}
