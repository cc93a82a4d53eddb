//! quizmark-core — free-text answer evaluation and quiz session scoring.
//!
//! [`evaluator::evaluate`] judges a typed answer against a reference answer
//! that may list several `/`-separated variants. [`session::QuizSession`]
//! drives one quiz attempt, grading each submission and keeping the score
//! ledger consistent through overrides and early submission.

pub mod error;
pub mod evaluator;
pub mod model;
pub mod reference;
pub mod session;

pub use error::{ErrorKind, SessionError};
pub use evaluator::{evaluate, evaluate_batch, EvaluationRequest, EvaluationResult, MatchRule};
pub use model::{Locale, QuestionType, QuizAnswer, QuizQuestion};
pub use session::{Phase, QuizSession, SessionOptions, SessionOutcome, SessionState};
