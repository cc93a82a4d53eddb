//! The `quizmark evaluate` command.

use anyhow::Result;
use comfy_table::{Cell, Table};
use serde::Serialize;

use quizmark_core::evaluator::similarity::SimilarityTier;
use quizmark_core::{evaluate, EvaluationResult, Locale, MatchRule};

use crate::config::OutputFormat;

#[derive(Serialize)]
struct AnswerReport<'a> {
    answer: &'a str,
    #[serde(flatten)]
    result: &'a EvaluationResult,
}

pub fn execute(
    reference: &str,
    answers: &[String],
    locale: Locale,
    format: OutputFormat,
) -> Result<()> {
    let results: Vec<EvaluationResult> = answers
        .iter()
        .map(|answer| evaluate(reference, answer, locale))
        .collect();

    let correct = results.iter().filter(|r| r.is_correct).count();
    tracing::info!(answers = results.len(), correct, "evaluated answers");

    match format {
        OutputFormat::Json => {
            let reports: Vec<AnswerReport<'_>> = answers
                .iter()
                .zip(&results)
                .map(|(answer, result)| AnswerReport { answer, result })
                .collect();
            println!("{}", serde_json::to_string_pretty(&reports)?);
        }
        OutputFormat::Text => {
            let mut table = Table::new();
            table.set_header(vec!["Answer", "Verdict", "Confidence", "Rule", "Feedback"]);
            for (answer, result) in answers.iter().zip(&results) {
                table.add_row(vec![
                    Cell::new(answer),
                    Cell::new(verdict(result)),
                    Cell::new(format!("{:.2}", result.confidence)),
                    Cell::new(rule_label(result.rule)),
                    Cell::new(&result.feedback),
                ]);
            }
            println!("{table}");
        }
    }

    Ok(())
}

pub(crate) fn verdict(result: &EvaluationResult) -> &'static str {
    if result.is_correct {
        "correct"
    } else {
        "incorrect"
    }
}

pub(crate) fn rule_label(rule: MatchRule) -> String {
    match rule {
        MatchRule::Exact => "exact".into(),
        MatchRule::Normalized => "normalized".into(),
        MatchRule::IgnoringPunctuation => "ignoring_punctuation".into(),
        MatchRule::NumeralForm => "numeral_form".into(),
        MatchRule::KanaScript => "kana_script".into(),
        MatchRule::KanaScriptLoose => "kana_script_loose".into(),
        MatchRule::KanjiReading => "kanji_reading".into(),
        MatchRule::NumericValue => "numeric_value".into(),
        MatchRule::Similarity(tier) => format!("similarity ({})", tier_label(tier)),
        MatchRule::Choice { .. } => "choice".into(),
        MatchRule::Manual { .. } => "manual".into(),
        MatchRule::NoCandidate => "no_candidate".into(),
    }
}

fn tier_label(tier: SimilarityTier) -> &'static str {
    match tier {
        SimilarityTier::Near => "near",
        SimilarityTier::Close => "close",
        SimilarityTier::Mostly => "mostly",
        SimilarityTier::Partial => "partial",
        SimilarityTier::Weak => "weak",
        SimilarityTier::Distant => "distant",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_follow_wire_names() {
        assert_eq!(rule_label(MatchRule::KanjiReading), "kanji_reading");
        assert_eq!(
            rule_label(MatchRule::Similarity(SimilarityTier::Mostly)),
            "similarity (mostly)"
        );
    }

    #[test]
    fn report_flattens_result() {
        let result = evaluate("東京", "とうきょう", Locale::En);
        let json = serde_json::to_value(AnswerReport {
            answer: "とうきょう",
            result: &result,
        })
        .unwrap();
        assert_eq!(json["answer"], "とうきょう");
        assert_eq!(json["is_correct"], true);
        assert_eq!(json["rule"], "kanji_reading");
    }
}
