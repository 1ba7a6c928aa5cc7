//! Canvas size domain.
//!
//! Two ways to pick a side: a fixed set of buttons and a resolution slider.
//! Anything outside them is rejected by the workspace; hosts that drive a
//! free-form slider can snap with [`SizeDomain::clamp_slider`].

use serde::{Deserialize, Serialize};

use crate::{PixelError, Result};

/// Sides offered by the size buttons.
pub const DISCRETE_SIZES: [usize; 6] = [2, 3, 4, 8, 16, 32];

/// Smallest slider side.
pub const SLIDER_MIN: usize = 8;

/// Largest slider side.
pub const SLIDER_MAX: usize = 64;

/// Slider step.
pub const SLIDER_STEP: usize = 2;

/// The set of sides a workspace accepts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SizeDomain {
    /// Sides available as discrete choices
    pub discrete: Vec<usize>,
    /// Inclusive slider minimum
    pub slider_min: usize,
    /// Inclusive slider maximum
    pub slider_max: usize,
    /// Slider step, counted from `slider_min`
    pub slider_step: usize,
}

impl Default for SizeDomain {
    fn default() -> Self {
        Self {
            discrete: DISCRETE_SIZES.to_vec(),
            slider_min: SLIDER_MIN,
            slider_max: SLIDER_MAX,
            slider_step: SLIDER_STEP,
        }
    }
}

impl SizeDomain {
    /// Accept `side` only if it is one of the discrete choices.
    pub fn check_discrete(&self, side: usize) -> Result<usize> {
        if self.discrete.contains(&side) {
            Ok(side)
        } else {
            Err(PixelError::InvalidSize { side })
        }
    }

    /// Accept `side` only if it lies on the slider track.
    pub fn check_slider(&self, side: usize) -> Result<usize> {
        let on_track = side >= self.slider_min
            && side <= self.slider_max
            && (side - self.slider_min) % self.slider_step == 0;
        if on_track {
            Ok(side)
        } else {
            Err(PixelError::InvalidSize { side })
        }
    }

    /// Snap any value to the nearest slider position.
    ///
    /// Ties round up, matching a range input dragged between two stops.
    pub fn clamp_slider(&self, side: usize) -> usize {
        let side = side.clamp(self.slider_min, self.slider_max);
        let offset = side - self.slider_min;
        let steps = (offset + self.slider_step / 2) / self.slider_step;
        (self.slider_min + steps * self.slider_step).min(self.slider_max)
    }

    /// Whether `side` is accepted by either control.
    pub fn contains(&self, side: usize) -> bool {
        self.check_discrete(side).is_ok() || self.check_slider(side).is_ok()
    }

    /// Check the domain itself is usable.
    pub fn validate(&self) -> Result<()> {
        if self.discrete.is_empty() || self.discrete.contains(&0) {
            return Err(PixelError::Other(
                "discrete sizes must be non-empty and positive".into(),
            ));
        }
        if self.slider_min == 0 || self.slider_step == 0 || self.slider_min > self.slider_max {
            return Err(PixelError::Other(format!(
                "invalid slider range {}..={} step {}",
                self.slider_min, self.slider_max, self.slider_step
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_discrete() {
        let domain = SizeDomain::default();
        for side in DISCRETE_SIZES {
            assert_eq!(domain.check_discrete(side).unwrap(), side);
        }
        assert!(domain.check_discrete(5).is_err());
        assert!(domain.check_discrete(64).is_err());
        assert!(domain.check_discrete(0).is_err());
    }

    #[test]
    fn test_slider() {
        let domain = SizeDomain::default();
        assert!(domain.check_slider(8).is_ok());
        assert!(domain.check_slider(10).is_ok());
        assert!(domain.check_slider(64).is_ok());
        assert!(domain.check_slider(9).is_err());
        assert!(domain.check_slider(6).is_err());
        assert!(domain.check_slider(66).is_err());
    }

    #[test]
    fn test_clamp_slider() {
        let domain = SizeDomain::default();
        assert_eq!(domain.clamp_slider(0), 8);
        assert_eq!(domain.clamp_slider(9), 10);
        assert_eq!(domain.clamp_slider(12), 12);
        assert_eq!(domain.clamp_slider(1000), 64);
    }

    #[test]
    fn test_validate() {
        assert!(SizeDomain::default().validate().is_ok());
        let bad = SizeDomain {
            slider_step: 0,
            ..SizeDomain::default()
        };
        assert!(bad.validate().is_err());
    }
}
