//! Property tests for evaluator totality and the session score ledger.

use proptest::prelude::*;
use quizmark_core::{evaluate, Locale, QuizQuestion, QuizSession, SessionError};

fn locale() -> impl Strategy<Value = Locale> {
    prop_oneof![Just(Locale::En), Just(Locale::Ja)]
}

/// A single reference variant: no separators, no line breaks.
fn variant() -> impl Strategy<Value = String> {
    "[a-zA-Z0-9ぁ-んァ-ン一-龥。、!?]{1,8}"
}

proptest! {
    #[test]
    fn evaluation_is_deterministic(
        reference in "\\PC{0,24}",
        answer in "\\PC{0,24}",
        locale in locale(),
    ) {
        let first = evaluate(&reference, &answer, locale);
        let second = evaluate(&reference, &answer, locale);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn confidence_is_bounded_and_consistent(
        reference in "\\PC{0,24}",
        answer in "\\PC{0,24}",
    ) {
        let result = evaluate(&reference, &answer, Locale::En);
        prop_assert!((0.0..=1.0).contains(&result.confidence));
        if result.exact_match {
            prop_assert!(result.is_correct);
            prop_assert_eq!(result.confidence, 1.0);
        }
        if answer.trim().is_empty() {
            prop_assert!(!result.is_correct);
        }
    }

    #[test]
    fn identical_nonblank_input_is_exact(text in "\\PC{1,24}", locale in locale()) {
        prop_assume!(!text.trim().is_empty());
        let result = evaluate(&text, &text, locale);
        prop_assert!(result.is_correct);
        prop_assert!(result.exact_match);
        prop_assert_eq!(result.confidence, 1.0);
    }

    #[test]
    fn variants_score_as_their_best_member(
        left in variant(),
        right in variant(),
        answer in variant(),
    ) {
        let combined = evaluate(&format!("{left}/{right}"), &answer, Locale::Ja);
        let best = evaluate(&left, &answer, Locale::Ja)
            .confidence
            .max(evaluate(&right, &answer, Locale::Ja).confidence);
        prop_assert_eq!(combined.confidence, best);
    }
}

#[derive(Debug, Clone)]
enum Op {
    Submit(String),
    Override(bool),
    Advance,
    RequestEarly,
    ConfirmEarly,
    CancelEarly,
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        4 => prop_oneof![
            Just("東京".to_string()),
            Just("とうきょう".to_string()),
            Just("Jupiter".to_string()),
            Just("true".to_string()),
            Just("  ".to_string()),
            "[a-zぁ-ん]{1,6}",
        ]
        .prop_map(Op::Submit),
        2 => any::<bool>().prop_map(Op::Override),
        3 => Just(Op::Advance),
        1 => Just(Op::RequestEarly),
        1 => Just(Op::ConfirmEarly),
        1 => Just(Op::CancelEarly),
    ]
}

fn mixed_questions() -> Vec<QuizQuestion> {
    vec![
        QuizQuestion::text_input("q1", "Capital of Japan?", "東京/Tokyo"),
        QuizQuestion::multiple_choice(
            "q2",
            "Largest planet?",
            "Jupiter",
            vec!["Mars".into(), "Jupiter".into()],
        ),
        QuizQuestion::true_false("q3", "Water is wet.", "true"),
        QuizQuestion::text_input("q4", "Mountain?", "富士山/ふじさん"),
    ]
}

proptest! {
    #[test]
    fn ledger_stays_consistent(ops in prop::collection::vec(op(), 0..40)) {
        let mut session = QuizSession::new(mixed_questions(), 0).unwrap();
        let mut overrides_on_screen = 0;

        for op in ops {
            let before = session.snapshot();
            let result = match &op {
                Op::Submit(answer) => session.submit_answer(answer, 1),
                Op::Override(correct) => session.override_result(*correct),
                Op::Advance => session.advance(),
                Op::RequestEarly => session.request_early_submit(),
                Op::ConfirmEarly => session.confirm_early_submit(),
                Op::CancelEarly => session.cancel_early_submit(),
            };

            match result {
                Ok(state) => {
                    prop_assert_eq!(&state, session.state());
                    match &op {
                        Op::Submit(_) | Op::Advance => overrides_on_screen = 0,
                        Op::Override(_) => overrides_on_screen += 1,
                        _ => {}
                    }
                }
                Err(err) => {
                    prop_assert!(
                        !matches!(err, SessionError::ScoreDrift { .. }),
                        "ledger drifted after {:?}",
                        op
                    );
                    prop_assert_eq!(&before, session.state());
                }
            }

            let state = session.state();
            prop_assert_eq!(state.score, state.derived_score());
            prop_assert_eq!(state.total_answered, state.answers.len());
            prop_assert!(state.answers.len() <= mixed_questions().len());
            prop_assert!(overrides_on_screen <= 1);
        }
    }

    #[test]
    fn override_applies_at_most_once(first in any::<bool>(), second in any::<bool>()) {
        let mut session = QuizSession::new(mixed_questions(), 0).unwrap();
        session.submit_answer("大阪", 1).unwrap();

        let after_first = session.override_result(first).unwrap();
        prop_assert_eq!(after_first.score, usize::from(first));

        let err = session.override_result(second).unwrap_err();
        let is_already_overridden = matches!(err, SessionError::AlreadyOverridden { .. });
        prop_assert!(is_already_overridden);
        prop_assert_eq!(session.state(), &after_first);
    }
}
