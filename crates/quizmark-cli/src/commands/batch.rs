//! The `quizmark batch` command.

use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};
use comfy_table::{Cell, Table};

use quizmark_core::{evaluate_batch, EvaluationRequest};

use super::evaluate::{rule_label, verdict};
use crate::config::OutputFormat;

pub fn execute(input: Option<&Path>, format: OutputFormat) -> Result<()> {
    let content = match input {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read input: {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read stdin")?;
            buf
        }
    };

    let requests = parse_requests(&content)?;
    let results = evaluate_batch(&requests);

    let correct = results.iter().filter(|r| r.is_correct).count();
    tracing::info!(requests = requests.len(), correct, "batch evaluated");

    match format {
        OutputFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&results)?);
        }
        OutputFormat::Text => {
            let mut table = Table::new();
            table.set_header(vec!["#", "Reference", "Answer", "Verdict", "Confidence", "Rule"]);
            for (i, (request, result)) in requests.iter().zip(&results).enumerate() {
                table.add_row(vec![
                    Cell::new(i + 1),
                    Cell::new(&request.reference),
                    Cell::new(&request.answer),
                    Cell::new(verdict(result)),
                    Cell::new(format!("{:.2}", result.confidence)),
                    Cell::new(rule_label(result.rule)),
                ]);
            }
            println!("{table}");
            println!("{correct}/{} correct", results.len());
        }
    }

    Ok(())
}

fn parse_requests(content: &str) -> Result<Vec<EvaluationRequest>> {
    serde_json::from_str(content)
        .context("expected a JSON array of {\"reference\", \"answer\", \"locale\"} objects")
}

#[cfg(test)]
mod tests {
    use super::*;
    use quizmark_core::Locale;

    #[test]
    fn locale_is_optional() {
        let requests = parse_requests(
            r#"[{"reference": "東京", "answer": "とうきょう"},
                {"reference": "犬", "answer": "いぬ", "locale": "ja"}]"#,
        )
        .unwrap();
        assert_eq!(requests.len(), 2);
        assert_eq!(requests[0].locale, Locale::En);
        assert_eq!(requests[1].locale, Locale::Ja);
    }

    #[test]
    fn rejects_non_array() {
        assert!(parse_requests(r#"{"reference": "a", "answer": "a"}"#).is_err());
    }
}
