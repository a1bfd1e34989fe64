//! Fuzzy string similarity used as the last-resort match.

/// Minimum similarity (inclusive) for a fuzzy match.
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.85;

/// Normalized Levenshtein similarity in `[0, 1]`, counted over chars.
///
/// `1 - distance / max(len_a, len_b)`; two empty strings are identical.
pub fn similarity(a: &str, b: &str) -> f64 {
    strsim::normalized_levenshtein(a, b)
}

/// Returns `true` if `a` and `b` are at least `threshold` similar.
pub fn is_similar(a: &str, b: &str, threshold: f64) -> bool {
    similarity(a, b) >= threshold
}
