//! Digital-responsibility lessons.
//!
//! Three short interactive lessons:
//!
//! - `TamperLesson` - an 8×8 happy face the learner repaints, showing how
//!   easily a picture is altered
//! - `FootprintLesson` - send a photo, then try to delete it, showing that
//!   copies remain elsewhere
//! - `PledgeChecklist` - four pledges to tick off

use serde::{Deserialize, Serialize};

use crate::adapters::PixelAdapter;
use crate::{BitGrid, HighlightState, PixelError, Result};

/// Which lesson is open.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Lesson {
    /// Picture tampering
    #[default]
    Tamper,
    /// Digital footprint
    Footprint,
    /// Pledges
    Pledge,
}

const HAPPY_FACE: [&str; 8] = [
    "00100100",
    "00100100",
    "00000000",
    "10000001",
    "01111110",
    "00000000",
    "00000000",
    "00000000",
];

/// Repaint a happy face; any change marks the picture as tampered.
#[derive(Debug, Clone)]
pub struct TamperLesson {
    grid: BitGrid,
    highlight: HighlightState,
    pixels: PixelAdapter,
    tampered: bool,
}

impl TamperLesson {
    /// Start with the untouched happy face.
    pub fn new() -> Result<Self> {
        Ok(Self {
            grid: BitGrid::from_stream(8, &HAPPY_FACE.concat())?,
            highlight: HighlightState::new(),
            pixels: PixelAdapter::new(),
            tampered: false,
        })
    }

    /// The picture as it is now.
    pub fn grid(&self) -> &BitGrid {
        &self.grid
    }

    /// Hover state of the picture.
    pub fn highlight(&self) -> &HighlightState {
        &self.highlight
    }

    /// Whether any cell was painted.
    pub fn is_tampered(&self) -> bool {
        self.tampered
    }

    /// Caption under the picture.
    pub fn caption(&self) -> &'static str {
        if self.tampered {
            "被修改后的图像"
        } else {
            "原始图像：开心"
        }
    }

    /// Press on a cell.
    pub fn pointer_down(&mut self, index: usize) -> Result<()> {
        if let Some(update) = self.pixels.pointer_down(&self.grid, index)? {
            update.apply(&mut self.grid)?;
            self.tampered = true;
        }
        Ok(())
    }

    /// Pointer entered a cell; paints while `primary_held`.
    pub fn pointer_enter(&mut self, index: usize, primary_held: bool) -> Result<()> {
        if let Some(update) =
            self.pixels
                .pointer_enter(&self.grid, index, primary_held, &mut self.highlight)
        {
            update.apply(&mut self.grid)?;
            self.tampered = true;
        }
        Ok(())
    }

    /// Release the pointer.
    pub fn pointer_up(&mut self) {
        self.pixels.pointer_up();
    }

    /// Pointer left the picture.
    pub fn pointer_leave(&mut self) {
        self.pixels.pointer_leave(&mut self.highlight);
    }
}

/// Step of the footprint experiment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FootprintStep {
    /// Nothing sent yet
    #[default]
    Idle,
    /// Photo sent to the server and a classmate
    Uploaded,
    /// Local copy deleted; the others remain
    Deleted,
}

/// Send-then-delete experiment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FootprintLesson {
    step: FootprintStep,
}

impl FootprintLesson {
    /// Start idle.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current step.
    pub fn step(&self) -> FootprintStep {
        self.step
    }

    /// Send the photo. Only valid from `Idle`; returns whether it happened.
    pub fn upload(&mut self) -> bool {
        if self.step != FootprintStep::Idle {
            return false;
        }
        self.step = FootprintStep::Uploaded;
        true
    }

    /// Delete the local photo. Only valid from `Uploaded`.
    pub fn delete(&mut self) -> bool {
        if self.step != FootprintStep::Uploaded {
            return false;
        }
        self.step = FootprintStep::Deleted;
        true
    }

    /// Start over.
    pub fn reset(&mut self) {
        self.step = FootprintStep::Idle;
    }

    /// Whether the server and classmate hold a copy.
    pub fn copies_elsewhere(&self) -> bool {
        self.step != FootprintStep::Idle
    }

    /// Whether the learner's own phone still has the photo.
    pub fn local_copy(&self) -> bool {
        self.step != FootprintStep::Deleted
    }

    /// Line shown under the experiment.
    pub fn message(&self) -> &'static str {
        match self.step {
            FootprintStep::Idle => "点击“发送照片”开始实验...",
            FootprintStep::Uploaded => "照片瞬间传到了服务器和同学那里！",
            FootprintStep::Deleted => {
                "删不掉？！虽然你删除了自己手机里的照片，但服务器和同学手机里可能还有备份。"
            }
        }
    }
}

/// One pledge line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pledge {
    /// Stable id
    pub id: String,
    /// Pledge text
    pub text: String,
}

/// The stock pledges.
pub const PLEDGES: [(&str, &str); 4] = [
    ("1", "我不随意修改别人的照片来取笑他们。"),
    ("2", "如果我用了别人的像素画，我会告诉大家这是谁画的（尊重原创）。"),
    ("3", "我不传播让别人感到难过或生气的图片。"),
    ("4", "保护隐私，不在网上随意发自己和家人的照片。"),
];

/// Tick-off list of pledges.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PledgeChecklist {
    items: Vec<Pledge>,
    checked: Vec<bool>,
}

impl Default for PledgeChecklist {
    fn default() -> Self {
        Self::new()
    }
}

impl PledgeChecklist {
    /// The four stock pledges, none ticked.
    pub fn new() -> Self {
        let items: Vec<Pledge> = PLEDGES
            .iter()
            .map(|(id, text)| Pledge {
                id: id.to_string(),
                text: text.to_string(),
            })
            .collect();
        let checked = vec![false; items.len()];
        Self { items, checked }
    }

    /// Pledges in display order.
    pub fn items(&self) -> &[Pledge] {
        &self.items
    }

    /// Whether the pledge `id` is ticked.
    pub fn is_checked(&self, id: &str) -> bool {
        self.position(id).map(|i| self.checked[i]).unwrap_or(false)
    }

    /// Flip the pledge `id`, returning its new state.
    pub fn toggle(&mut self, id: &str) -> Result<bool> {
        let i = self
            .position(id)
            .ok_or_else(|| PixelError::Other(format!("unknown pledge {id:?}")))?;
        self.checked[i] = !self.checked[i];
        Ok(self.checked[i])
    }

    /// Whether every pledge is ticked.
    pub fn all_checked(&self) -> bool {
        self.checked.iter().all(|&c| c)
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.items.iter().position(|p| p.id == id)
    }
}
