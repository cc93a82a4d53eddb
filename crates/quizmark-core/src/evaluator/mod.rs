//! Free-text answer evaluation.
//!
//! [`evaluate`] decides whether a typed answer is acceptably equivalent to a
//! reference answer, without dictionaries or models. Each `/`-separated
//! variant of the reference is tried against a fixed ladder of progressively
//! looser rules; the variant with the highest confidence wins.
//!
//! | rule | confidence | correct |
//! |------|-----------:|:-------:|
//! | raw exact match | 1.0 | yes |
//! | normalized match (NFKC, case, spacing) | 1.0 | yes |
//! | punctuation-insensitive match | 0.98 | yes |
//! | numeral-form match (`1つ` / `一つ` / `ひとつ`) | 0.95 | yes |
//! | katakana/hiragana match | 0.97 / 0.96 | yes |
//! | kanji against kana of plausible length | 0.85 | yes |
//! | same numeric tokens | 0.95 | yes |
//! | edit-distance similarity | 0.9 – 0.2 | ≥ 0.7 only |

mod feedback;
pub mod normalize;
pub mod numerals;
pub mod reading;
pub mod similarity;

use serde::{Deserialize, Serialize};

use crate::model::Locale;
use crate::reference;

use normalize::{normalize_text, strip_punctuation};
use numerals::{extract_numbers, normalize_numerals};
use reading::reading_match;
use similarity::{similarity, SimilarityTier};

/// Which rule produced a verdict.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchRule {
    /// Identical after trimming, before any normalization.
    Exact,
    /// Identical after width folding, lowercasing and whitespace collapsing.
    Normalized,
    IgnoringPunctuation,
    NumeralForm,
    /// Identical once katakana is read as hiragana.
    KanaScript,
    /// As `KanaScript`, ignoring punctuation.
    KanaScriptLoose,
    /// Kanji on one side, kana of plausible reading length on the other.
    KanjiReading,
    /// Same ordered list of numeric tokens.
    NumericValue,
    Similarity(SimilarityTier),
    /// Case-insensitive exact grading of a choice question.
    Choice { correct: bool },
    /// Verdict set by the learner.
    Manual { correct: bool },
    /// The reference had no usable variant.
    NoCandidate,
}

impl MatchRule {
    pub fn confidence(self) -> f64 {
        match self {
            MatchRule::Exact | MatchRule::Normalized => 1.0,
            MatchRule::IgnoringPunctuation => 0.98,
            MatchRule::KanaScript => 0.97,
            MatchRule::KanaScriptLoose => 0.96,
            MatchRule::NumeralForm | MatchRule::NumericValue => 0.95,
            MatchRule::KanjiReading => 0.85,
            MatchRule::Similarity(tier) => tier.confidence(),
            MatchRule::Choice { correct } | MatchRule::Manual { correct } => {
                if correct {
                    1.0
                } else {
                    0.0
                }
            }
            MatchRule::NoCandidate => SimilarityTier::Distant.confidence(),
        }
    }

    pub fn is_correct(self) -> bool {
        match self {
            MatchRule::Similarity(tier) => tier.is_correct(),
            MatchRule::Choice { correct } | MatchRule::Manual { correct } => correct,
            MatchRule::NoCandidate => false,
            _ => true,
        }
    }
}

/// Outcome of evaluating one answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EvaluationResult {
    pub is_correct: bool,
    /// One of the fixed confidence tiers.
    pub confidence: f64,
    /// Localized, display-only text.
    pub feedback: String,
    /// True only for a raw exact match; implies `is_correct` and confidence 1.0.
    pub exact_match: bool,
    pub rule: MatchRule,
}

impl EvaluationResult {
    pub fn from_rule(rule: MatchRule, locale: Locale) -> Self {
        Self {
            is_correct: rule.is_correct(),
            confidence: rule.confidence(),
            feedback: rule.feedback(locale).to_string(),
            exact_match: rule == MatchRule::Exact,
            rule,
        }
    }
}

/// One reference/answer pair for [`evaluate_batch`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvaluationRequest {
    pub reference: String,
    pub answer: String,
    #[serde(default)]
    pub locale: Locale,
}

/// Evaluate `answer` against every variant of `reference`.
///
/// Total over all inputs: blank answers, blank references, any script.
/// `locale` only selects feedback text.
pub fn evaluate(reference: &str, answer: &str, locale: Locale) -> EvaluationResult {
    let answer_trimmed = answer.trim();

    if answer_trimmed.is_empty() {
        tracing::debug!("blank answer rejected");
        return EvaluationResult::from_rule(
            MatchRule::Similarity(SimilarityTier::Distant),
            locale,
        );
    }

    if reference::first_line(reference).trim() == answer_trimmed {
        return EvaluationResult::from_rule(MatchRule::Exact, locale);
    }

    let mut best: Option<MatchRule> = None;

    for candidate in reference::candidates(reference) {
        let rule = judge_candidate(candidate, answer);
        tracing::trace!(candidate, ?rule, "judged candidate");

        if rule == MatchRule::Exact {
            return EvaluationResult::from_rule(rule, locale);
        }
        if best.is_none_or(|b| rule.confidence() > b.confidence()) {
            best = Some(rule);
        }
    }

    let rule = best.unwrap_or(MatchRule::NoCandidate);
    tracing::debug!(?rule, correct = rule.is_correct(), "evaluated answer");
    EvaluationResult::from_rule(rule, locale)
}

/// Evaluate many pairs; output order matches input order.
pub fn evaluate_batch(requests: &[EvaluationRequest]) -> Vec<EvaluationResult> {
    requests
        .iter()
        .map(|r| evaluate(&r.reference, &r.answer, r.locale))
        .collect()
}

/// First rule on the ladder that holds for one variant.
fn judge_candidate(candidate: &str, answer: &str) -> MatchRule {
    if candidate.trim() == answer.trim() {
        return MatchRule::Exact;
    }

    let norm_reference = normalize_text(candidate);
    let norm_answer = normalize_text(answer);

    if norm_reference == norm_answer {
        return MatchRule::Normalized;
    }

    let clean_reference = strip_punctuation(&norm_reference);
    let clean_answer = strip_punctuation(&norm_answer);
    // Punctuation-only input must not match punctuation-only references.
    let comparable = !clean_reference.is_empty() && !clean_answer.is_empty();

    if comparable && clean_reference == clean_answer {
        return MatchRule::IgnoringPunctuation;
    }

    if comparable && normalize_numerals(&clean_reference) == normalize_numerals(&clean_answer) {
        return MatchRule::NumeralForm;
    }

    if let Some(rule) = reading_match(&norm_reference, &norm_answer) {
        return rule;
    }

    if numbers_match(&norm_reference, &norm_answer) {
        return MatchRule::NumericValue;
    }

    if !comparable {
        return MatchRule::Similarity(SimilarityTier::Distant);
    }

    let score = similarity(&clean_reference, &clean_answer);
    MatchRule::Similarity(SimilarityTier::from_similarity(score))
}

fn numbers_match(reference: &str, answer: &str) -> bool {
    let expected = extract_numbers(reference);
    !expected.is_empty() && expected == extract_numbers(answer)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rule_of(reference: &str, answer: &str) -> MatchRule {
        evaluate(reference, answer, Locale::En).rule
    }

    #[test]
    fn ladder_order() {
        assert_eq!(rule_of("Tokyo", " Tokyo "), MatchRule::Exact);
        assert_eq!(rule_of("Tokyo", "TOKYO"), MatchRule::Normalized);
        assert_eq!(rule_of("東京です。", "東京です"), MatchRule::IgnoringPunctuation);
        assert_eq!(rule_of("1つの", "ひとつの"), MatchRule::NumeralForm);
        assert_eq!(rule_of("とうきょう", "トウキョウ"), MatchRule::KanaScript);
        assert_eq!(rule_of("東京", "とうきょう"), MatchRule::KanjiReading);
        assert_eq!(rule_of("42", "答えは42です"), MatchRule::NumericValue);
        assert_eq!(
            rule_of("東京", "大阪"),
            MatchRule::Similarity(SimilarityTier::Distant)
        );
    }

    #[test]
    fn exact_match_implies_full_confidence() {
        let result = evaluate("apple/りんご/林檎", "りんご", Locale::Ja);
        assert!(result.exact_match);
        assert!(result.is_correct);
        assert_eq!(result.confidence, 1.0);
        assert_eq!(result.feedback, "完全一致！正解です。");
    }

    #[test]
    fn normalized_match_is_not_exact() {
        let result = evaluate("python --version", "Python --Version", Locale::En);
        assert!(result.is_correct);
        assert_eq!(result.confidence, 1.0);
        assert!(!result.exact_match);
    }

    #[test]
    fn best_candidate_wins_over_first_acceptable() {
        // "Tokio" is a near miss for "Tokyo" but an exact normalized hit later on.
        let result = evaluate("Tokyo/tokio", "Tokio", Locale::En);
        assert_eq!(result.rule, MatchRule::Normalized);
        assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn blank_answers_fail() {
        for answer in ["", "   ", "\n\t"] {
            let result = evaluate("answer", answer, Locale::En);
            assert!(!result.is_correct, "{answer:?} should fail");
            assert_eq!(result.confidence, 0.2);
        }
        assert!(!evaluate("?", "", Locale::En).is_correct);
    }

    #[test]
    fn punctuation_only_answers_do_not_match_punctuation_references() {
        let result = evaluate("?", "!", Locale::En);
        assert!(!result.is_correct);
    }

    #[test]
    fn blank_reference_has_no_candidate() {
        let result = evaluate(" / ", "Tokyo", Locale::En);
        assert_eq!(result.rule, MatchRule::NoCandidate);
        assert!(!result.is_correct);
    }

    #[test]
    fn trailing_explanation_lines_are_ignored() {
        let reference = "犬/いぬ\n\n例: 犬が好きです";
        let result = evaluate(reference, "いぬ", Locale::Ja);
        assert!(result.exact_match);

        let wrong = evaluate(reference, "例: 犬が好きです", Locale::Ja);
        assert!(!wrong.exact_match);
    }

    #[test]
    fn copying_the_whole_reference_is_not_exact() {
        let reference = "猫/ねこ\n\n例文: 猫が好きです。";
        let result = evaluate(reference, reference, Locale::Ja);
        assert!(!result.exact_match);
        assert!(!result.is_correct);

        // a single-line reference typed in full, separator included, still counts
        assert_eq!(rule_of("  猫/ねこ\n", "猫/ねこ"), MatchRule::Exact);
    }

    #[test]
    fn batch_preserves_order() {
        let requests = vec![
            EvaluationRequest {
                reference: "Tokyo".into(),
                answer: "Tokyo".into(),
                locale: Locale::En,
            },
            EvaluationRequest {
                reference: "東京".into(),
                answer: "大阪".into(),
                locale: Locale::Ja,
            },
        ];
        let results = evaluate_batch(&requests);
        assert_eq!(results.len(), 2);
        assert!(results[0].exact_match);
        assert!(!results[1].is_correct);
        assert_eq!(results[1].feedback, "残念ながら不正解です。正解と大きく異なります。");
    }

    #[test]
    fn rule_serializes_snake_case() {
        let json = serde_json::to_string(&MatchRule::Similarity(SimilarityTier::Near)).unwrap();
        assert_eq!(json, r#"{"similarity":"near"}"#);
        let json = serde_json::to_string(&MatchRule::KanjiReading).unwrap();
        assert_eq!(json, r#""kanji_reading""#);
    }
}
