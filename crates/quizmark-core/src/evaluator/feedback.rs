//! Localized feedback text, selected by the rule that produced a verdict.

use super::similarity::SimilarityTier;
use super::MatchRule;
use crate::model::Locale;

impl MatchRule {
    /// Human-readable feedback for this rule.
    pub fn feedback(self, locale: Locale) -> &'static str {
        let (en, ja) = match self {
            MatchRule::Exact | MatchRule::Normalized => ("Perfect match!", "完全一致！正解です。"),
            MatchRule::IgnoringPunctuation => (
                "Correct! Slightly different expression.",
                "表現は少し異なりますが、正解です！",
            ),
            MatchRule::NumeralForm => (
                "Correct! Same number, different notation.",
                "数字表現が正解です！",
            ),
            MatchRule::KanaScript | MatchRule::KanaScriptLoose | MatchRule::KanjiReading => {
                ("Correct reading!", "読みが正解です！")
            }
            MatchRule::NumericValue => ("Correct number!", "数値が正解です！"),
            MatchRule::Similarity(tier) => tier_feedback(tier),
            MatchRule::Choice { correct: true } => ("Correct!", "正解！"),
            MatchRule::Choice { correct: false } => ("Incorrect", "不正解"),
            MatchRule::Manual { correct: true } => (
                "✓ Marked as correct by user",
                "✓ ユーザーが正解として記録しました",
            ),
            MatchRule::Manual { correct: false } => (
                "✗ Marked as incorrect by user",
                "✗ ユーザーが不正解として記録しました",
            ),
            MatchRule::NoCandidate => (
                "There is no accepted answer to compare against.",
                "比較できる正解がありません。",
            ),
        };

        match locale {
            Locale::En => en,
            Locale::Ja => ja,
        }
    }
}

fn tier_feedback(tier: SimilarityTier) -> (&'static str, &'static str) {
    match tier {
        SimilarityTier::Near => (
            "Almost perfect! Minor differences.",
            "ほぼ正解です！わずかな表現の違いがあります。",
        ),
        SimilarityTier::Close => (
            "Correct! Slightly different but same meaning.",
            "正解です！表現が少し異なりますが、意味は合っています。",
        ),
        SimilarityTier::Mostly => (
            "Mostly correct! Some differences but right meaning.",
            "概ね正解です！細かい表現に違いがありますが、意味は正しいです。",
        ),
        SimilarityTier::Partial => (
            "Close! Partially correct but some differences.",
            "惜しい！部分的に正しいですが、いくつか違いがあります。",
        ),
        SimilarityTier::Weak => (
            "Partially correct but significant differences.",
            "部分的に正しいですが、かなり違いがあります。",
        ),
        SimilarityTier::Distant => (
            "Incorrect. Very different from the answer.",
            "残念ながら不正解です。正解と大きく異なります。",
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn locale_selects_language() {
        assert_eq!(MatchRule::Exact.feedback(Locale::En), "Perfect match!");
        assert_eq!(MatchRule::Exact.feedback(Locale::Ja), "完全一致！正解です。");
    }

    #[test]
    fn numeral_and_numeric_feedback_differ() {
        assert_ne!(
            MatchRule::NumeralForm.feedback(Locale::En),
            MatchRule::NumericValue.feedback(Locale::En)
        );
        assert_ne!(
            MatchRule::NumeralForm.feedback(Locale::Ja),
            MatchRule::NumericValue.feedback(Locale::Ja)
        );
    }

    #[test]
    fn manual_feedback_reflects_verdict() {
        assert!(MatchRule::Manual { correct: true }
            .feedback(Locale::En)
            .contains("correct by user"));
        assert!(MatchRule::Manual { correct: false }
            .feedback(Locale::En)
            .contains("incorrect by user"));
    }
}
