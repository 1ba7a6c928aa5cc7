//! QuizSession - verdicts and navigation through the question bank.
//!
//! Per question the verdict moves `Unanswered → {Correct, Incorrect}` once:
//!
//! - `select_option` compares the chosen value with the answer; only the
//!   first selection counts
//! - `submit_drawing` compares the scratch grid with the target cell by
//!   cell; any difference is incorrect
//! - `retry` (from Incorrect) resets the verdict and the scratch grid
//! - `advance` (from Correct) moves on according to [`EndOfTierPolicy`]
//! - `select_tier` restarts at question 0 of the chosen tier, always
//!
//! # Examples
//!
//! ```
//! use pixelbits::quiz::{EndOfTierPolicy, QuestionBank, QuizSession, Tier, Verdict};
//!
//! let bank = QuestionBank::builtin().unwrap();
//! let mut quiz = QuizSession::new(bank, EndOfTierPolicy::LoopWithinTier);
//!
//! assert_eq!(quiz.select_option("101010101").unwrap(), Verdict::Correct);
//! // later picks do not change the verdict
//! assert_eq!(quiz.select_option("111000111").unwrap(), Verdict::Correct);
//! quiz.advance();
//! assert_eq!(quiz.index(), 1);
//!
//! quiz.select_tier(Tier::Medium);
//! assert!(quiz.scratch().is_some());
//! ```

use serde::{Deserialize, Serialize};

use crate::adapters::PixelAdapter;
use crate::quiz::{Question, QuestionBank, QuestionKind, Tier};
use crate::{AppConfig, BitGrid, HighlightState, PixelError, Result};

/// Result of the current attempt.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Verdict {
    /// No answer yet
    #[default]
    Unanswered,
    /// The answer matched
    Correct,
    /// The answer did not match
    Incorrect,
}

impl Verdict {
    /// Lowercase name, as serialized.
    pub fn as_str(self) -> &'static str {
        match self {
            Verdict::Unanswered => "unanswered",
            Verdict::Correct => "correct",
            Verdict::Incorrect => "incorrect",
        }
    }
}

/// What `advance` does after the last question of a tier.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EndOfTierPolicy {
    /// Wrap to the first question of the same tier
    #[default]
    LoopWithinTier,
    /// Move to the next tier; after the last tier the session is complete
    AdvanceToNextTier,
}

/// Where `advance` went.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum AdvanceOutcome {
    /// Next question in the same tier
    Next {
        /// New question index
        index: usize,
    },
    /// Tier finished, wrapped back to its first question
    TierCompleted {
        /// The tier that was finished
        tier: Tier,
    },
    /// Tier finished, moved to the next tier
    Promoted {
        /// Tier that was finished
        from: Tier,
        /// Tier now current
        to: Tier,
    },
    /// The last tier was finished
    AllCompleted,
}

/// Practice-mode state.
#[derive(Debug, Clone)]
pub struct QuizSession {
    bank: QuestionBank,
    policy: EndOfTierPolicy,
    tier: Tier,
    index: usize,
    verdict: Verdict,
    completed: bool,
    // Draw questions only; distinct from the workspace grid
    scratch: Option<BitGrid>,
    pixels: PixelAdapter,
    highlight: HighlightState,
}

impl QuizSession {
    /// Start at the first easy question.
    pub fn new(bank: QuestionBank, policy: EndOfTierPolicy) -> Self {
        let mut session = Self {
            bank,
            policy,
            tier: Tier::Easy,
            index: 0,
            verdict: Verdict::Unanswered,
            completed: false,
            scratch: None,
            pixels: PixelAdapter::new(),
            highlight: HighlightState::new(),
        };
        session.enter_question();
        session
    }

    /// Start a session with the end-of-tier policy from `config`.
    pub fn from_config(bank: QuestionBank, config: &AppConfig) -> Self {
        Self::new(bank, config.end_of_tier)
    }

    /// Current tier.
    pub fn tier(&self) -> Tier {
        self.tier
    }

    /// Current question index within the tier.
    pub fn index(&self) -> usize {
        self.index
    }

    /// Number of questions in the current tier.
    pub fn tier_len(&self) -> usize {
        self.bank.questions(self.tier).len()
    }

    /// Verdict of the current attempt.
    pub fn verdict(&self) -> Verdict {
        self.verdict
    }

    /// End-of-tier policy in force.
    pub fn policy(&self) -> EndOfTierPolicy {
        self.policy
    }

    /// Whether the last tier has been finished under `AdvanceToNextTier`.
    pub fn is_completed(&self) -> bool {
        self.completed
    }

    /// The question being asked.
    pub fn current(&self) -> &Question {
        // tiers are non-empty and index is kept in range
        &self.bank.questions(self.tier)[self.index]
    }

    /// Scratch drawing for a draw question.
    pub fn scratch(&self) -> Option<&BitGrid> {
        self.scratch.as_ref()
    }

    /// Hover state over the scratch drawing.
    pub fn highlight(&self) -> &HighlightState {
        &self.highlight
    }

    // Verdict resets on every question change; draw questions get a blank
    // scratch grid of the target size.
    fn enter_question(&mut self) {
        self.verdict = Verdict::Unanswered;
        self.pixels.pointer_up();
        self.highlight.clear();
        self.scratch = self.blank_scratch();
        log::debug!(
            "quiz question {:?}#{} (id {})",
            self.tier,
            self.index,
            self.current().id
        );
    }

    fn blank_scratch(&self) -> Option<BitGrid> {
        let q = self.current();
        match (q.kind, q.side) {
            (QuestionKind::DrawToMatch, Some(side)) => BitGrid::new(side).ok(),
            _ => None,
        }
    }

    /// Pick an option of a choice question.
    ///
    /// Only the first pick decides; afterwards the existing verdict is
    /// returned unchanged. Values that are not listed options are rejected.
    pub fn select_option(&mut self, value: &str) -> Result<Verdict> {
        let q = self.current();
        if !q.kind.is_choice() {
            return Err(PixelError::InvalidQuestion(format!(
                "#{} is answered by drawing",
                q.id
            )));
        }
        if !q.has_option(value) {
            return Err(PixelError::Other(format!("#{} has no option {value:?}", q.id)));
        }
        if self.verdict != Verdict::Unanswered {
            return Ok(self.verdict);
        }
        let correct = q.correct_value.as_deref() == Some(value);
        self.verdict = if correct {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        };
        log::debug!("quiz answer {:?} -> {:?}", value, self.verdict);
        Ok(self.verdict)
    }

    /// Pick a choice option by its label.
    pub fn select_label(&mut self, label: &str) -> Result<Verdict> {
        let value = self
            .current()
            .options
            .iter()
            .find(|o| o.label == label)
            .map(|o| o.value.clone())
            .ok_or_else(|| PixelError::Other(format!("no option labelled {label:?}")))?;
        self.select_option(&value)
    }

    /// Press on a scratch cell.
    ///
    /// Ignored when there is no scratch grid or the drawing was already
    /// judged correct.
    pub fn pointer_down(&mut self, index: usize) -> Result<()> {
        if self.verdict == Verdict::Correct {
            return Ok(());
        }
        let Some(scratch) = self.scratch.as_mut() else {
            return Ok(());
        };
        if let Some(update) = self.pixels.pointer_down(scratch, index)? {
            update.apply(scratch)?;
        }
        Ok(())
    }

    /// Pointer entered a scratch cell; paints while `primary_held`.
    pub fn pointer_enter(&mut self, index: usize, primary_held: bool) -> Result<()> {
        if self.verdict == Verdict::Correct {
            return Ok(());
        }
        let Some(scratch) = self.scratch.as_mut() else {
            return Ok(());
        };
        if let Some(update) = self
            .pixels
            .pointer_enter(scratch, index, primary_held, &mut self.highlight)
        {
            update.apply(scratch)?;
        }
        Ok(())
    }

    /// Release the pointer.
    pub fn pointer_up(&mut self) {
        self.pixels.pointer_up();
    }

    /// Judge the scratch drawing against the target.
    ///
    /// Only an unanswered attempt is judged; otherwise the current verdict
    /// is returned.
    pub fn submit_drawing(&mut self) -> Result<Verdict> {
        let q = self.current();
        let (Some(scratch), Some(target)) = (self.scratch.as_ref(), q.target.as_ref()) else {
            return Err(PixelError::InvalidQuestion(format!(
                "#{} is not a drawing question",
                q.id
            )));
        };
        if self.verdict != Verdict::Unanswered {
            return Ok(self.verdict);
        }
        let correct = scratch.matches(target);
        self.verdict = if correct {
            Verdict::Correct
        } else {
            Verdict::Incorrect
        };
        log::debug!("quiz drawing -> {:?}", self.verdict);
        Ok(self.verdict)
    }

    /// Try the same question again after an incorrect answer.
    ///
    /// Returns false (and does nothing) unless the verdict is Incorrect.
    pub fn retry(&mut self) -> bool {
        if self.verdict != Verdict::Incorrect {
            return false;
        }
        self.verdict = Verdict::Unanswered;
        self.pixels.pointer_up();
        self.highlight.clear();
        self.scratch = self.blank_scratch();
        true
    }

    /// Move on after a correct answer.
    ///
    /// Returns `None` unless the verdict is Correct.
    pub fn advance(&mut self) -> Option<AdvanceOutcome> {
        if self.verdict != Verdict::Correct {
            return None;
        }
        if self.index + 1 < self.tier_len() {
            self.index += 1;
            self.enter_question();
            return Some(AdvanceOutcome::Next { index: self.index });
        }

        let outcome = match (self.policy, self.tier.next()) {
            (EndOfTierPolicy::LoopWithinTier, _) => {
                self.index = 0;
                self.enter_question();
                AdvanceOutcome::TierCompleted { tier: self.tier }
            }
            (EndOfTierPolicy::AdvanceToNextTier, Some(next)) => {
                let from = self.tier;
                self.tier = next;
                self.index = 0;
                self.enter_question();
                AdvanceOutcome::Promoted { from, to: next }
            }
            (EndOfTierPolicy::AdvanceToNextTier, None) => {
                // stay on the final, answered question
                self.completed = true;
                AdvanceOutcome::AllCompleted
            }
        };
        log::debug!("quiz advance -> {:?}", outcome);
        Some(outcome)
    }

    /// Jump to a tier, discarding progress.
    pub fn select_tier(&mut self, tier: Tier) {
        self.tier = tier;
        self.index = 0;
        self.completed = false;
        self.enter_question();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn session(policy: EndOfTierPolicy) -> QuizSession {
        QuizSession::new(QuestionBank::builtin().unwrap(), policy)
    }

    fn draw_target(quiz: &mut QuizSession) {
        let target = quiz.current().target.clone().unwrap();
        for (i, v) in target.into_iter().enumerate() {
            if v == 1 {
                quiz.pointer_down(i).unwrap();
                quiz.pointer_up();
            }
        }
    }

    #[test]
    fn test_scratch_hover_cleared_on_retry() {
        let mut quiz = session(EndOfTierPolicy::LoopWithinTier);
        quiz.select_tier(Tier::Medium);
        quiz.pointer_enter(2, false).unwrap();
        assert_eq!(quiz.highlight().hovered(), Some(2));

        quiz.pointer_down(0).unwrap();
        quiz.pointer_up();
        quiz.submit_drawing().unwrap();
        quiz.pointer_enter(1, false).unwrap();
        assert!(quiz.retry());
        assert_eq!(quiz.highlight().hovered(), None);
    }

    #[test]
    fn test_starts_unanswered() {
        let quiz = session(EndOfTierPolicy::LoopWithinTier);
        assert_eq!(quiz.tier(), Tier::Easy);
        assert_eq!(quiz.index(), 0);
        assert_eq!(quiz.verdict(), Verdict::Unanswered);
        assert!(quiz.scratch().is_none());
    }

    #[test]
    fn test_first_selection_only() {
        let mut quiz = session(EndOfTierPolicy::LoopWithinTier);
        assert_eq!(quiz.select_option("111000111").unwrap(), Verdict::Incorrect);
        assert_eq!(quiz.select_option("101010101").unwrap(), Verdict::Incorrect);
    }

    #[test]
    fn test_unlisted_option_rejected() {
        let mut quiz = session(EndOfTierPolicy::LoopWithinTier);
        assert!(quiz.select_option("000000000").is_err());
        assert_eq!(quiz.verdict(), Verdict::Unanswered);
    }

    #[test]
    fn test_select_label() {
        let mut quiz = session(EndOfTierPolicy::LoopWithinTier);
        assert_eq!(quiz.select_label("B").unwrap(), Verdict::Correct);
        assert!(quiz.select_label("Z").is_err());
    }

    #[test]
    fn test_retry_only_after_incorrect() {
        let mut quiz = session(EndOfTierPolicy::LoopWithinTier);
        assert!(!quiz.retry());
        quiz.select_option("010101010").unwrap();
        assert!(quiz.retry());
        assert_eq!(quiz.verdict(), Verdict::Unanswered);
        assert_eq!(quiz.index(), 0);
    }

    #[test]
    fn test_advance_requires_correct() {
        let mut quiz = session(EndOfTierPolicy::LoopWithinTier);
        assert!(quiz.advance().is_none());
        quiz.select_option("111000111").unwrap();
        assert!(quiz.advance().is_none());
    }

    #[test]
    fn test_draw_correct() {
        let mut quiz = session(EndOfTierPolicy::LoopWithinTier);
        quiz.select_tier(Tier::Medium);
        draw_target(&mut quiz);
        assert_eq!(quiz.submit_drawing().unwrap(), Verdict::Correct);

        // painting after a correct verdict is ignored
        quiz.pointer_down(5).unwrap();
        assert_eq!(quiz.scratch().unwrap().get(5).unwrap(), 0);
    }

    #[test]
    fn test_draw_incorrect_then_retry_clears_scratch() {
        let mut quiz = session(EndOfTierPolicy::LoopWithinTier);
        quiz.select_tier(Tier::Medium);
        quiz.pointer_down(5).unwrap();
        assert_eq!(quiz.submit_drawing().unwrap(), Verdict::Incorrect);

        assert!(quiz.retry());
        assert_eq!(quiz.scratch().unwrap().num_set(), 0);
    }

    #[test]
    fn test_submit_on_choice_question_errors() {
        let mut quiz = session(EndOfTierPolicy::LoopWithinTier);
        assert!(quiz.submit_drawing().is_err());
    }

    #[test]
    fn test_select_option_on_draw_question_errors() {
        let mut quiz = session(EndOfTierPolicy::LoopWithinTier);
        quiz.select_tier(Tier::Medium);
        assert!(quiz.select_option("1").is_err());
    }

    #[test]
    fn test_loop_within_tier() {
        let mut quiz = session(EndOfTierPolicy::LoopWithinTier);
        quiz.select_option("101010101").unwrap();
        assert_eq!(quiz.advance(), Some(AdvanceOutcome::Next { index: 1 }));
        quiz.select_option("1111").unwrap();
        assert_eq!(
            quiz.advance(),
            Some(AdvanceOutcome::TierCompleted { tier: Tier::Easy })
        );
        assert_eq!(quiz.tier(), Tier::Easy);
        assert_eq!(quiz.index(), 0);
        assert_eq!(quiz.verdict(), Verdict::Unanswered);
    }

    #[test]
    fn test_advance_to_next_tier() {
        let mut quiz = session(EndOfTierPolicy::AdvanceToNextTier);
        quiz.select_tier(Tier::Hard);
        quiz.select_option("增加格子的数量（提高分辨率）").unwrap();
        quiz.advance();
        quiz.select_option("64").unwrap();
        assert_eq!(quiz.advance(), Some(AdvanceOutcome::AllCompleted));
        assert!(quiz.is_completed());

        quiz.select_tier(Tier::Easy);
        assert!(!quiz.is_completed());
        quiz.select_option("101010101").unwrap();
        quiz.advance();
        quiz.select_option("1111").unwrap();
        assert_eq!(
            quiz.advance(),
            Some(AdvanceOutcome::Promoted {
                from: Tier::Easy,
                to: Tier::Medium
            })
        );
        assert_eq!(quiz.scratch().unwrap().num_bits(), 16);
    }

    #[test]
    fn test_select_tier_resets_progress() {
        let mut quiz = session(EndOfTierPolicy::LoopWithinTier);
        quiz.select_option("101010101").unwrap();
        quiz.advance();
        quiz.select_option("0000").unwrap();
        quiz.select_tier(Tier::Easy);
        assert_eq!(quiz.index(), 0);
        assert_eq!(quiz.verdict(), Verdict::Unanswered);
    }
}
