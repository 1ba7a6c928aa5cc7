//! Question bank for practice mode.
//!
//! Questions are immutable and grouped by difficulty tier. A bank is
//! validated when built so the session never meets a draw question without
//! a target or a choice question whose answer is not among its options.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::{BitGrid, PixelError, Result};

/// Difficulty grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Read the code of a picture
    Easy,
    /// Draw a picture from its code
    Medium,
    /// Concept questions
    Hard,
}

impl Tier {
    /// All tiers, easiest first.
    pub const ALL: [Tier; 3] = [Tier::Easy, Tier::Medium, Tier::Hard];

    /// The next harder tier, if any.
    pub fn next(self) -> Option<Tier> {
        match self {
            Tier::Easy => Some(Tier::Medium),
            Tier::Medium => Some(Tier::Hard),
            Tier::Hard => None,
        }
    }

    /// Star rating shown next to the question (1..=3).
    pub fn stars(self) -> u8 {
        match self {
            Tier::Easy => 1,
            Tier::Medium => 2,
            Tier::Hard => 3,
        }
    }

    /// Tab label.
    pub fn label(self) -> &'static str {
        match self {
            Tier::Easy => "初级：火眼金睛",
            Tier::Medium => "中级：神笔马良",
            Tier::Hard => "高级：智慧大脑",
        }
    }
}

/// What the learner does to answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuestionKind {
    /// Look at a picture, pick its code
    VisualChoice,
    /// Read a code, draw the picture
    DrawToMatch,
    /// Pick a text answer
    TextChoice,
}

impl QuestionKind {
    /// Whether the question is answered by picking an option.
    pub fn is_choice(self) -> bool {
        !matches!(self, QuestionKind::DrawToMatch)
    }

    /// Whether the question carries a picture.
    pub fn is_visual(self) -> bool {
        !matches!(self, QuestionKind::TextChoice)
    }

    /// Card heading for this kind.
    pub fn heading(self) -> &'static str {
        match self {
            QuestionKind::VisualChoice => "看图识码",
            QuestionKind::DrawToMatch => "看码画图",
            QuestionKind::TextChoice => "脑力风暴",
        }
    }
}

/// A labelled answer option.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOption {
    /// Short label, e.g. "A"
    pub label: String,
    /// Value compared against the correct answer
    pub value: String,
}

impl QuizOption {
    fn new(label: &str, value: &str) -> Self {
        Self {
            label: label.to_string(),
            value: value.to_string(),
        }
    }
}

/// One practice question.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Stable id
    pub id: u32,
    /// Answer style
    pub kind: QuestionKind,
    /// Prompt text
    pub prompt: String,
    /// Grid side, for visual kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub side: Option<usize>,
    /// Target cells, for visual kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target: Option<Vec<u8>>,
    /// Options, for choice kinds
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<QuizOption>,
    /// Correct option value, for choice kinds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub correct_value: Option<String>,
}

impl Question {
    /// Check the fields required by the question's kind.
    pub fn validate(&self) -> Result<()> {
        let fail = |msg: &str| Err(PixelError::InvalidQuestion(format!("#{}: {msg}", self.id)));

        if self.kind.is_visual() {
            let (Some(side), Some(target)) = (self.side, self.target.as_ref()) else {
                return fail("visual question needs side and target");
            };
            if let Err(e) = BitGrid::from_cells(side, target) {
                return fail(&e.to_string());
            }
        }
        if self.kind.is_choice() {
            let Some(correct) = self.correct_value.as_ref() else {
                return fail("choice question needs a correct value");
            };
            if !self.options.iter().any(|o| &o.value == correct) {
                return fail("correct value is not among the options");
            }
        }
        Ok(())
    }

    /// Target picture as a grid, for visual kinds.
    pub fn target_grid(&self) -> Option<BitGrid> {
        match (self.side, self.target.as_ref()) {
            (Some(side), Some(target)) => BitGrid::from_cells(side, target).ok(),
            _ => None,
        }
    }

    /// Whether `value` is one of the listed options.
    pub fn has_option(&self, value: &str) -> bool {
        self.options.iter().any(|o| o.value == value)
    }
}

/// Questions keyed by tier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "BTreeMap<Tier, Vec<Question>>", into = "BTreeMap<Tier, Vec<Question>>")]
pub struct QuestionBank {
    tiers: BTreeMap<Tier, Vec<Question>>,
}

impl TryFrom<BTreeMap<Tier, Vec<Question>>> for QuestionBank {
    type Error = PixelError;

    fn try_from(tiers: BTreeMap<Tier, Vec<Question>>) -> Result<Self> {
        QuestionBank::new(tiers)
    }
}

impl From<QuestionBank> for BTreeMap<Tier, Vec<Question>> {
    fn from(bank: QuestionBank) -> Self {
        bank.tiers
    }
}

impl QuestionBank {
    /// Build a bank; every tier must hold at least one valid question.
    pub fn new(tiers: BTreeMap<Tier, Vec<Question>>) -> Result<Self> {
        for tier in Tier::ALL {
            let questions = tiers.get(&tier).map(Vec::as_slice).unwrap_or_default();
            if questions.is_empty() {
                return Err(PixelError::InvalidQuestion(format!(
                    "tier {tier:?} has no questions"
                )));
            }
            for q in questions {
                q.validate()?;
            }
        }
        Ok(Self { tiers })
    }

    /// The stock practice questions.
    pub fn builtin() -> Result<Self> {
        let mut tiers = BTreeMap::new();
        tiers.insert(
            Tier::Easy,
            vec![
                Question {
                    id: 1,
                    kind: QuestionKind::VisualChoice,
                    prompt: "观察左边的图形，哪个编码是正确的？".into(),
                    side: Some(3),
                    target: Some(vec![1, 0, 1, 0, 1, 0, 1, 0, 1]),
                    options: vec![
                        QuizOption::new("A", "111000111"),
                        QuizOption::new("B", "101010101"),
                        QuizOption::new("C", "010101010"),
                    ],
                    correct_value: Some("101010101".into()),
                },
                Question {
                    id: 2,
                    kind: QuestionKind::VisualChoice,
                    prompt: "我们要画一个“全黑”的 2x2 方块，应该用什么编码？".into(),
                    side: Some(2),
                    target: Some(vec![1, 1, 1, 1]),
                    options: vec![
                        QuizOption::new("A", "0000"),
                        QuizOption::new("B", "1001"),
                        QuizOption::new("C", "1111"),
                    ],
                    correct_value: Some("1111".into()),
                },
            ],
        );
        tiers.insert(
            Tier::Medium,
            vec![
                Question {
                    id: 3,
                    kind: QuestionKind::DrawToMatch,
                    prompt: "请根据编码 1111100110011111 画出图形 (4x4)".into(),
                    side: Some(4),
                    target: Some(vec![1, 1, 1, 1, 1, 0, 0, 1, 1, 0, 0, 1, 1, 1, 1, 1]),
                    options: Vec::new(),
                    correct_value: None,
                },
                Question {
                    id: 4,
                    kind: QuestionKind::DrawToMatch,
                    prompt: "请画一个“加号” (+)：010111010 (3x3)".into(),
                    side: Some(3),
                    target: Some(vec![0, 1, 0, 1, 1, 1, 0, 1, 0]),
                    options: Vec::new(),
                    correct_value: None,
                },
            ],
        );
        tiers.insert(
            Tier::Hard,
            vec![
                Question {
                    id: 5,
                    kind: QuestionKind::TextChoice,
                    prompt: "如果不改变格子的大小，想要图像变得更清晰，应该怎么办？".into(),
                    side: None,
                    target: None,
                    options: vec![
                        QuizOption::new("A", "减少格子的数量"),
                        QuizOption::new("B", "增加格子的数量（提高分辨率）"),
                        QuizOption::new("C", "把屏幕调亮一点"),
                    ],
                    correct_value: Some("增加格子的数量（提高分辨率）".into()),
                },
                Question {
                    id: 6,
                    kind: QuestionKind::TextChoice,
                    prompt: "一个 8x8 的图像，总共包含多少个比特 (Bit)？".into(),
                    side: None,
                    target: None,
                    options: vec![
                        QuizOption::new("A", "16"),
                        QuizOption::new("B", "64"),
                        QuizOption::new("C", "8"),
                    ],
                    correct_value: Some("64".into()),
                },
            ],
        );
        Self::new(tiers)
    }

    /// Questions of one tier, in order.
    pub fn questions(&self, tier: Tier) -> &[Question] {
        self.tiers.get(&tier).map(Vec::as_slice).unwrap_or_default()
    }

    /// Question `index` of `tier`.
    pub fn get(&self, tier: Tier, index: usize) -> Option<&Question> {
        self.questions(tier).get(index)
    }

    /// Export the bank to JSON.
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Import and validate a bank from JSON.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_bank() {
        let bank = QuestionBank::builtin().unwrap();
        for tier in Tier::ALL {
            assert_eq!(bank.questions(tier).len(), 2);
        }
        let q = bank.get(Tier::Medium, 0).unwrap();
        assert_eq!(q.kind, QuestionKind::DrawToMatch);
        assert_eq!(q.target_grid().unwrap().to_stream(), "1111100110011111");
    }

    #[test]
    fn test_tier_order() {
        assert_eq!(Tier::Easy.next(), Some(Tier::Medium));
        assert_eq!(Tier::Hard.next(), None);
        assert_eq!(Tier::Hard.stars(), 3);
    }

    #[test]
    fn test_rejects_draw_without_target() {
        let q = Question {
            id: 9,
            kind: QuestionKind::DrawToMatch,
            prompt: String::new(),
            side: Some(2),
            target: None,
            options: Vec::new(),
            correct_value: None,
        };
        assert!(matches!(q.validate(), Err(PixelError::InvalidQuestion(_))));
    }

    #[test]
    fn test_rejects_target_length() {
        let q = Question {
            id: 9,
            kind: QuestionKind::DrawToMatch,
            prompt: String::new(),
            side: Some(2),
            target: Some(vec![1, 0, 1]),
            options: Vec::new(),
            correct_value: None,
        };
        assert!(q.validate().is_err());
    }

    #[test]
    fn test_rejects_missing_answer_option() {
        let q = Question {
            id: 9,
            kind: QuestionKind::TextChoice,
            prompt: String::new(),
            side: None,
            target: None,
            options: vec![QuizOption::new("A", "yes")],
            correct_value: Some("no".into()),
        };
        assert!(q.validate().is_err());
    }

    #[test]
    fn test_rejects_empty_tier() {
        let mut tiers = BTreeMap::new();
        tiers.insert(Tier::Easy, Vec::new());
        assert!(QuestionBank::new(tiers).is_err());
    }

    #[test]
    fn test_json_roundtrip() {
        let bank = QuestionBank::builtin().unwrap();
        let json = bank.to_json().unwrap();
        assert!(json.contains("\"draw_to_match\""));
        assert_eq!(QuestionBank::from_json(&json).unwrap(), bank);
    }
}
