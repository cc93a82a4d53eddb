//! Reference answer parsing and linting.
//!
//! A reference answer is authoritative on its first line only; anything after
//! it is explanatory text. The first line holds `/`-separated variants.

use std::collections::HashSet;
use std::fmt;

use crate::evaluator::normalize::normalize_text;

/// The authoritative line of a reference answer.
pub fn first_line(reference: &str) -> &str {
    reference.trim_start().lines().next().unwrap_or("")
}

/// Trimmed, non-empty `/`-separated variants of the first line.
pub fn candidates(reference: &str) -> Vec<&str> {
    first_line(reference)
        .split('/')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect()
}

/// A problem found in a reference answer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReferenceWarning {
    /// Nothing on the first line survives trimming; every answer will fail.
    NoVariants,
    /// An empty slot between separators (1-based position).
    EmptyVariant { position: usize },
    /// Two variants that normalize to the same text.
    DuplicateVariant { variant: String },
    /// Non-blank lines after the first, which evaluation ignores.
    TrailingLines { count: usize },
}

impl fmt::Display for ReferenceWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReferenceWarning::NoVariants => write!(f, "reference has no usable variant"),
            ReferenceWarning::EmptyVariant { position } => {
                write!(f, "variant {position} is empty")
            }
            ReferenceWarning::DuplicateVariant { variant } => {
                write!(f, "duplicate variant: {variant}")
            }
            ReferenceWarning::TrailingLines { count } => {
                write!(f, "{count} trailing line(s) are ignored during evaluation")
            }
        }
    }
}

/// Check a reference answer for common authoring mistakes.
pub fn lint(reference: &str) -> Vec<ReferenceWarning> {
    let mut warnings = Vec::new();
    let line = first_line(reference);

    let pieces: Vec<&str> = line.split('/').map(str::trim).collect();
    if pieces.iter().all(|p| p.is_empty()) {
        warnings.push(ReferenceWarning::NoVariants);
    } else {
        for (i, piece) in pieces.iter().enumerate() {
            if piece.is_empty() {
                warnings.push(ReferenceWarning::EmptyVariant { position: i + 1 });
            }
        }
    }

    let mut seen = HashSet::new();
    for variant in candidates(reference) {
        if !seen.insert(normalize_text(variant)) {
            warnings.push(ReferenceWarning::DuplicateVariant {
                variant: variant.to_string(),
            });
        }
    }

    let trailing = reference
        .trim_start()
        .lines()
        .skip(1)
        .filter(|l| !l.trim().is_empty())
        .count();
    if trailing > 0 {
        warnings.push(ReferenceWarning::TrailingLines { count: trailing });
    }

    warnings
}
