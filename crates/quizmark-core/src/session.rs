//! Quiz session state machine.
//!
//! A [`QuizSession`] walks a fixed list of questions:
//!
//! ```text
//! Asking --submit_answer--> ShowingResult --advance--> Asking (next question)
//!                                         --advance--> Finished (after the last)
//! Asking | ShowingResult --request/confirm_early_submit--> Finished
//! ```
//!
//! The session never reads a clock; callers pass the seconds a question was
//! on screen into [`QuizSession::submit_answer`]. Persisting the outcome is
//! the caller's job once the session reaches [`Phase::Finished`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::error::{Operation, SessionError};
use crate::evaluator::{evaluate, EvaluationResult, MatchRule};
use crate::model::{Locale, QuizAnswer, QuizQuestion};

/// Where a session is in its question loop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    Asking,
    ShowingResult,
    Finished,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Phase::Asking => write!(f, "asking"),
            Phase::ShowingResult => write!(f, "showing_result"),
            Phase::Finished => write!(f, "finished"),
        }
    }
}

/// Session configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    /// Index of the first question to ask; supports resuming mid-set.
    #[serde(default)]
    pub start_index: usize,
    /// Feedback language.
    #[serde(default)]
    pub locale: Locale,
    /// Grade free-text questions with the evaluator and allow overrides.
    /// When off they are graded like choice questions.
    #[serde(default = "default_true")]
    pub free_text_evaluation: bool,
}

fn default_true() -> bool {
    true
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            start_index: 0,
            locale: Locale::default(),
            free_text_evaluation: true,
        }
    }
}

/// Immutable snapshot of a session, returned by every operation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    pub current_index: usize,
    /// Always equal to the number of correct ledger entries.
    pub score: usize,
    pub total_answered: usize,
    pub answers: Vec<QuizAnswer>,
    pub phase: Phase,
    /// Whether the answer on screen may still be overridden.
    pub can_override: bool,
    /// An early submit was requested and awaits confirmation.
    pub awaiting_confirmation: bool,
    /// Verdict for the answer on screen, for display.
    pub last_result: Option<EvaluationResult>,
}

impl SessionState {
    /// Score recomputed from the ledger.
    pub fn derived_score(&self) -> usize {
        self.answers.iter().filter(|a| a.is_correct).count()
    }
}

/// Final record handed to the caller for persistence.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionOutcome {
    pub answers: Vec<QuizAnswer>,
    pub score: usize,
    pub total_time_seconds: u64,
    /// Number of questions in the set, answered or not.
    pub total_questions: usize,
}

impl SessionOutcome {
    /// Fraction of answered questions that were correct.
    pub fn accuracy(&self) -> f64 {
        if self.answers.is_empty() {
            return 0.0;
        }
        self.score as f64 / self.answers.len() as f64
    }

    /// Questions absent from the ledger.
    pub fn unanswered(&self) -> usize {
        self.total_questions.saturating_sub(self.answers.len())
    }
}

/// Callbacks for session events.
pub trait SessionObserver {
    fn on_graded(&self, question_id: &str, result: &EvaluationResult);
    fn on_overridden(&self, question_id: &str, correct: bool);
    fn on_finished(&self, outcome: &SessionOutcome);
}

/// Observer that ignores every event.
pub struct NoopObserver;

impl SessionObserver for NoopObserver {
    fn on_graded(&self, _: &str, _: &EvaluationResult) {}
    fn on_overridden(&self, _: &str, _: bool) {}
    fn on_finished(&self, _: &SessionOutcome) {}
}

/// Case-insensitive, trimmed equality against a single reference string.
pub fn grade_choice(reference: &str, answer: &str, locale: Locale) -> EvaluationResult {
    let correct = reference.trim().to_lowercase() == answer.trim().to_lowercase();
    EvaluationResult::from_rule(MatchRule::Choice { correct }, locale)
}

/// One quiz attempt over a fixed, ordered question list.
///
/// Single caller at a time; every operation completes synchronously.
pub struct QuizSession {
    questions: Vec<QuizQuestion>,
    options: SessionOptions,
    state: SessionState,
    overridden: bool,
    observer: Box<dyn SessionObserver>,
}

impl fmt::Debug for QuizSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("QuizSession")
            .field("questions", &self.questions.len())
            .field("options", &self.options)
            .field("state", &self.state)
            .finish_non_exhaustive()
    }
}

impl QuizSession {
    /// Start a session at `start_index` with default options.
    pub fn new(questions: Vec<QuizQuestion>, start_index: usize) -> Result<Self, SessionError> {
        Self::with_options(
            questions,
            SessionOptions {
                start_index,
                ..SessionOptions::default()
            },
        )
    }

    pub fn with_options(
        questions: Vec<QuizQuestion>,
        options: SessionOptions,
    ) -> Result<Self, SessionError> {
        if questions.is_empty() {
            return Err(SessionError::NoQuestions);
        }
        if options.start_index >= questions.len() {
            return Err(SessionError::StartOutOfRange {
                index: options.start_index,
                len: questions.len(),
            });
        }

        tracing::debug!(
            questions = questions.len(),
            start = options.start_index,
            "session started"
        );

        Ok(Self {
            state: SessionState {
                current_index: options.start_index,
                score: 0,
                total_answered: 0,
                answers: Vec::new(),
                phase: Phase::Asking,
                can_override: false,
                awaiting_confirmation: false,
                last_result: None,
            },
            questions,
            options,
            overridden: false,
            observer: Box::new(NoopObserver),
        })
    }

    /// Attach an observer for grading, override and completion events.
    pub fn with_observer(mut self, observer: Box<dyn SessionObserver>) -> Self {
        self.observer = observer;
        self
    }

    pub fn state(&self) -> &SessionState {
        &self.state
    }

    pub fn snapshot(&self) -> SessionState {
        self.state.clone()
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    /// The question being asked or shown; `None` once finished.
    pub fn current_question(&self) -> Option<&QuizQuestion> {
        if self.state.phase == Phase::Finished {
            return None;
        }
        self.questions.get(self.state.current_index)
    }

    pub fn is_finished(&self) -> bool {
        self.state.phase == Phase::Finished
    }

    /// Grade an answer to the current question and record it.
    ///
    /// `elapsed_seconds` is how long the question was on screen.
    pub fn submit_answer(
        &mut self,
        answer: &str,
        elapsed_seconds: u64,
    ) -> Result<SessionState, SessionError> {
        self.try_submit_answer(answer, elapsed_seconds)
            .inspect_err(|e| tracing::warn!(error = %e, "submit_answer rejected"))
    }

    /// Replace the automatic verdict for the answer on screen.
    ///
    /// Allowed once per free-text answer.
    pub fn override_result(&mut self, correct: bool) -> Result<SessionState, SessionError> {
        self.try_override_result(correct)
            .inspect_err(|e| tracing::warn!(error = %e, "override_result rejected"))
    }

    /// Move to the next question, or finish after the last one.
    pub fn advance(&mut self) -> Result<SessionState, SessionError> {
        self.try_advance()
            .inspect_err(|e| tracing::warn!(error = %e, "advance rejected"))
    }

    /// First phase of early submit: ask the caller to confirm.
    pub fn request_early_submit(&mut self) -> Result<SessionState, SessionError> {
        self.try_request_early_submit()
            .inspect_err(|e| tracing::warn!(error = %e, "early submit rejected"))
    }

    /// Second phase of early submit: finish with the ledger as it stands.
    pub fn confirm_early_submit(&mut self) -> Result<SessionState, SessionError> {
        if !self.state.awaiting_confirmation {
            tracing::warn!("confirm_early_submit without a pending request");
            return Err(SessionError::NoPendingConfirmation);
        }
        tracing::debug!(answered = self.state.total_answered, "early submit confirmed");
        self.finish();
        self.checked()
    }

    /// Abandon a pending early submit and carry on.
    pub fn cancel_early_submit(&mut self) -> Result<SessionState, SessionError> {
        if !self.state.awaiting_confirmation {
            return Err(SessionError::NoPendingConfirmation);
        }
        self.state.awaiting_confirmation = false;
        self.checked()
    }

    /// The final record, if the session is finished.
    pub fn outcome(&self) -> Option<SessionOutcome> {
        self.is_finished().then(|| self.build_outcome())
    }

    /// Consume a finished session, handing its ledger to the caller.
    pub fn into_outcome(self) -> Result<SessionOutcome, SessionError> {
        if !self.is_finished() {
            return Err(SessionError::InvalidState {
                operation: Operation::IntoOutcome,
                phase: self.state.phase,
            });
        }
        let total_time_seconds = total_time(&self.state.answers);
        Ok(SessionOutcome {
            answers: self.state.answers,
            score: self.state.score,
            total_time_seconds,
            total_questions: self.questions.len(),
        })
    }

    /// Check the tracked score against the ledger.
    pub fn verify_ledger(&self) -> Result<(), SessionError> {
        let derived = self.state.derived_score();
        if derived != self.state.score {
            return Err(SessionError::ScoreDrift {
                tracked: self.state.score,
                derived,
            });
        }
        Ok(())
    }

    fn try_submit_answer(
        &mut self,
        answer: &str,
        elapsed_seconds: u64,
    ) -> Result<SessionState, SessionError> {
        self.ensure_no_pending_confirmation()?;
        self.ensure_phase(Operation::SubmitAnswer, &[Phase::Asking])?;
        if answer.trim().is_empty() {
            return Err(SessionError::EmptyAnswer);
        }

        let question = &self.questions[self.state.current_index];
        let locale = self.options.locale;
        let free_text = question.kind().is_free_text() && self.options.free_text_evaluation;

        let result = if free_text {
            evaluate(&question.reference_answer, answer, locale)
        } else {
            grade_choice(&question.reference_answer, answer, locale)
        };

        tracing::debug!(
            question = %question.id,
            kind = %question.kind(),
            correct = result.is_correct,
            confidence = result.confidence,
            "answer graded"
        );

        self.state.answers.push(QuizAnswer {
            question_id: question.id.clone(),
            user_answer: answer.to_string(),
            is_correct: result.is_correct,
            answer_time_seconds: elapsed_seconds,
        });
        self.state.total_answered += 1;
        if result.is_correct {
            self.state.score += 1;
        }
        self.state.phase = Phase::ShowingResult;
        self.state.can_override = free_text;
        self.overridden = false;

        self.observer.on_graded(&question.id, &result);
        self.state.last_result = Some(result);

        self.checked()
    }

    fn try_override_result(&mut self, correct: bool) -> Result<SessionState, SessionError> {
        self.ensure_no_pending_confirmation()?;
        self.ensure_phase(Operation::OverrideResult, &[Phase::ShowingResult])?;

        let question_id = &self.questions[self.state.current_index].id;
        if self.overridden {
            return Err(SessionError::AlreadyOverridden {
                question_id: question_id.clone(),
            });
        }
        if !self.state.can_override {
            return Err(SessionError::OverrideNotAllowed {
                question_id: question_id.clone(),
            });
        }

        let entry = self
            .state
            .answers
            .last_mut()
            .ok_or(SessionError::EmptyLedger)?;
        if entry.is_correct != correct {
            if correct {
                self.state.score += 1;
            } else {
                self.state.score -= 1;
            }
            entry.is_correct = correct;
        }

        self.state.can_override = false;
        self.overridden = true;
        self.state.last_result = Some(EvaluationResult::from_rule(
            MatchRule::Manual { correct },
            self.options.locale,
        ));

        tracing::debug!(question = %question_id, correct, "verdict overridden");
        self.observer.on_overridden(question_id, correct);

        self.checked()
    }

    fn try_advance(&mut self) -> Result<SessionState, SessionError> {
        self.ensure_no_pending_confirmation()?;
        self.ensure_phase(Operation::Advance, &[Phase::ShowingResult])?;

        if self.state.current_index + 1 < self.questions.len() {
            self.state.current_index += 1;
            self.state.phase = Phase::Asking;
            self.state.can_override = false;
            self.state.last_result = None;
            self.overridden = false;
            tracing::debug!(index = self.state.current_index, "next question");
        } else {
            self.finish();
        }

        self.checked()
    }

    fn try_request_early_submit(&mut self) -> Result<SessionState, SessionError> {
        if self.state.awaiting_confirmation {
            return Ok(self.snapshot());
        }
        self.ensure_phase(
            Operation::SubmitEarly,
            &[Phase::Asking, Phase::ShowingResult],
        )?;
        if self.state.total_answered == 0 {
            return Err(SessionError::NothingAnswered);
        }

        self.state.awaiting_confirmation = true;
        Ok(self.snapshot())
    }

    fn finish(&mut self) {
        self.state.phase = Phase::Finished;
        self.state.can_override = false;
        self.state.awaiting_confirmation = false;
        self.overridden = false;

        let outcome = self.build_outcome();
        tracing::debug!(
            score = outcome.score,
            answered = outcome.answers.len(),
            total_time = outcome.total_time_seconds,
            "session finished"
        );
        self.observer.on_finished(&outcome);
    }

    fn build_outcome(&self) -> SessionOutcome {
        SessionOutcome {
            answers: self.state.answers.clone(),
            score: self.state.score,
            total_time_seconds: total_time(&self.state.answers),
            total_questions: self.questions.len(),
        }
    }

    fn ensure_phase(&self, operation: Operation, allowed: &[Phase]) -> Result<(), SessionError> {
        if allowed.contains(&self.state.phase) {
            Ok(())
        } else {
            Err(SessionError::InvalidState {
                operation,
                phase: self.state.phase,
            })
        }
    }

    fn ensure_no_pending_confirmation(&self) -> Result<(), SessionError> {
        if self.state.awaiting_confirmation {
            return Err(SessionError::ConfirmationPending);
        }
        Ok(())
    }

    fn checked(&self) -> Result<SessionState, SessionError> {
        self.verify_ledger()?;
        Ok(self.snapshot())
    }
}

fn total_time(answers: &[QuizAnswer]) -> u64 {
    answers
        .iter()
        .map(|a| a.answer_time_seconds)
        .fold(0, u64::saturating_add)
}
