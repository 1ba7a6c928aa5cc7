//! Practice mode: a tiered question bank and the session that walks it.
//!
//! `bank` holds the immutable questions; `session` tracks the current
//! tier, question, verdict, and the scratch drawing for draw questions.

pub mod bank;
pub mod session;

pub use bank::{Question, QuestionBank, QuestionKind, QuizOption, Tier};
pub use session::{AdvanceOutcome, EndOfTierPolicy, QuizSession, Verdict};
