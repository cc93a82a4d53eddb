//! Edit-distance similarity and its confidence tiers.

use serde::{Deserialize, Serialize};

/// Similarity at or above which an answer is accepted.
///
/// A hard cliff with no hysteresis; tune here, nowhere else.
pub const ACCEPT_THRESHOLD: f64 = 0.7;

const NEAR_THRESHOLD: f64 = 0.9;
const CLOSE_THRESHOLD: f64 = 0.8;
const PARTIAL_THRESHOLD: f64 = 0.6;
const WEAK_THRESHOLD: f64 = 0.4;

/// Levenshtein distance over Unicode scalar values.
///
/// Two-row dynamic programming: O(n·m) time, O(min(n, m)) space.
pub fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };

    if short.is_empty() {
        return long.len();
    }

    let mut prev: Vec<usize> = (0..=short.len()).collect();
    let mut curr = vec![0; short.len() + 1];

    for (i, lc) in long.iter().enumerate() {
        curr[0] = i + 1;
        for (j, sc) in short.iter().enumerate() {
            let substitution = prev[j] + usize::from(lc != sc);
            curr[j + 1] = substitution.min(prev[j + 1] + 1).min(curr[j] + 1);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[short.len()]
}

/// `(maxLen - distance) / maxLen`; two empty strings are identical (1.0).
pub fn similarity(a: &str, b: &str) -> f64 {
    let max_len = a.chars().count().max(b.chars().count());
    if max_len == 0 {
        return 1.0;
    }
    let distance = levenshtein(a, b);
    (max_len - distance) as f64 / max_len as f64
}

/// Verdict band for an edit-distance similarity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SimilarityTier {
    /// ≥ 0.9
    Near,
    /// [0.8, 0.9)
    Close,
    /// [0.7, 0.8)
    Mostly,
    /// [0.6, 0.7)
    Partial,
    /// [0.4, 0.6)
    Weak,
    /// < 0.4
    Distant,
}

impl SimilarityTier {
    pub fn from_similarity(similarity: f64) -> Self {
        if similarity >= NEAR_THRESHOLD {
            SimilarityTier::Near
        } else if similarity >= CLOSE_THRESHOLD {
            SimilarityTier::Close
        } else if similarity >= ACCEPT_THRESHOLD {
            SimilarityTier::Mostly
        } else if similarity >= PARTIAL_THRESHOLD {
            SimilarityTier::Partial
        } else if similarity >= WEAK_THRESHOLD {
            SimilarityTier::Weak
        } else {
            SimilarityTier::Distant
        }
    }

    pub fn confidence(self) -> f64 {
        match self {
            SimilarityTier::Near => 0.9,
            SimilarityTier::Close => 0.8,
            SimilarityTier::Mostly => 0.7,
            SimilarityTier::Partial => 0.6,
            SimilarityTier::Weak => 0.4,
            SimilarityTier::Distant => 0.2,
        }
    }

    pub fn is_correct(self) -> bool {
        matches!(
            self,
            SimilarityTier::Near | SimilarityTier::Close | SimilarityTier::Mostly
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein("", ""), 0);
        assert_eq!(levenshtein("abc", ""), 3);
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("kitten", "sitting"), 3);
        assert_eq!(levenshtein("flaw", "lawn"), 2);
        assert_eq!(levenshtein("東京", "大阪"), 2);
    }

    #[test]
    fn levenshtein_is_symmetric() {
        assert_eq!(
            levenshtein("日本の首都は東京です", "首都は東京です"),
            levenshtein("首都は東京です", "日本の首都は東京です")
        );
    }

    #[test]
    fn similarity_counts_chars_not_bytes() {
        assert!((similarity("日本の首都は東京です", "首都は東京です") - 0.7).abs() < 1e-9);
        assert_eq!(similarity("", ""), 1.0);
        assert_eq!(similarity("abc", ""), 0.0);
    }

    #[test]
    fn tier_boundaries() {
        assert_eq!(SimilarityTier::from_similarity(1.0), SimilarityTier::Near);
        assert_eq!(SimilarityTier::from_similarity(0.9), SimilarityTier::Near);
        assert_eq!(SimilarityTier::from_similarity(0.89), SimilarityTier::Close);
        assert_eq!(SimilarityTier::from_similarity(0.7), SimilarityTier::Mostly);
        assert_eq!(SimilarityTier::from_similarity(0.6999), SimilarityTier::Partial);
        assert_eq!(SimilarityTier::from_similarity(0.4), SimilarityTier::Weak);
        assert_eq!(SimilarityTier::from_similarity(0.0), SimilarityTier::Distant);
    }

    #[test]
    fn accept_cliff_at_point_seven() {
        assert!(SimilarityTier::from_similarity(ACCEPT_THRESHOLD).is_correct());
        assert!(!SimilarityTier::from_similarity(ACCEPT_THRESHOLD - 1e-9).is_correct());
    }
}
