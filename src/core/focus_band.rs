use serde::{Deserialize, Serialize};

use crate::error::{DeckError, DeckResult};

/// Fractions of the viewport height excluded at the top and bottom of the
/// observation window.
///
/// `RootMargin::new(0.3, 0.3)` keeps the middle 40 % of the viewport, which is
/// the focus band used for section activity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RootMargin {
    pub top_ratio: f64,
    pub bottom_ratio: f64,
}

impl RootMargin {
    pub const NONE: Self = Self {
        top_ratio: 0.0,
        bottom_ratio: 0.0,
    };

    pub fn new(top_ratio: f64, bottom_ratio: f64) -> DeckResult<Self> {
        Self {
            top_ratio,
            bottom_ratio,
        }
        .validate()
    }

    pub fn validate(self) -> DeckResult<Self> {
        for (edge, value) in [("top", self.top_ratio), ("bottom", self.bottom_ratio)] {
            if !value.is_finite() || !(0.0..1.0).contains(&value) {
                return Err(DeckError::InvalidConfig(format!(
                    "{edge} margin ratio must be finite and in [0, 1)"
                )));
            }
        }
        if self.top_ratio + self.bottom_ratio >= 1.0 {
            return Err(DeckError::InvalidConfig(
                "margins must leave a non-empty observation window".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Observation window `(top, bottom)` in viewport coordinates.
    #[must_use]
    pub fn window(self, viewport_height: f64) -> (f64, f64) {
        (
            viewport_height * self.top_ratio,
            viewport_height * (1.0 - self.bottom_ratio),
        )
    }

    /// CSS `rootMargin` string, e.g. `-30% 0px -30% 0px`.
    #[must_use]
    pub fn to_css(self) -> String {
        format!(
            "{} 0px {} 0px",
            css_shrink(self.top_ratio),
            css_shrink(self.bottom_ratio)
        )
    }
}

impl Default for RootMargin {
    fn default() -> Self {
        Self::NONE
    }
}

fn css_shrink(ratio: f64) -> String {
    if ratio <= 0.0 {
        return "0px".to_owned();
    }
    let percent = ratio * 100.0;
    if (percent - percent.round()).abs() < 1e-9 {
        format!("-{}%", percent.round())
    } else {
        format!("-{percent}%")
    }
}

/// Options a region is observed with: window margins plus the visible-ratio
/// threshold that counts as intersecting.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObserveOptions {
    pub root_margin: RootMargin,
    pub threshold: f64,
}

impl ObserveOptions {
    /// Band options: any positive overlap with the margin-shrunk window counts.
    pub fn focus_band(top_ratio: f64, bottom_ratio: f64) -> DeckResult<Self> {
        Self {
            root_margin: RootMargin::new(top_ratio, bottom_ratio)?,
            threshold: 0.0,
        }
        .validate()
    }

    /// Whole-viewport options firing once `threshold` of the region is visible.
    pub fn visible_ratio(threshold: f64) -> DeckResult<Self> {
        Self {
            root_margin: RootMargin::NONE,
            threshold,
        }
        .validate()
    }

    pub fn validate(self) -> DeckResult<Self> {
        self.root_margin.validate()?;
        if !self.threshold.is_finite() || !(0.0..=1.0).contains(&self.threshold) {
            return Err(DeckError::InvalidConfig(
                "visibility threshold must be finite and in [0, 1]".to_owned(),
            ));
        }
        Ok(self)
    }

    /// Measures a region whose top edge sits at `top` in viewport coordinates.
    #[must_use]
    pub fn measure(self, top: f64, height: f64, viewport_height: f64) -> Intersection {
        let (window_top, window_bottom) = self.root_margin.window(viewport_height);
        let bottom = top + height;
        let overlap_px = (bottom.min(window_bottom) - top.max(window_top)).max(0.0);

        let ratio = if height > 0.0 {
            (overlap_px / height).clamp(0.0, 1.0)
        } else if top >= window_top && top <= window_bottom {
            1.0
        } else {
            0.0
        };

        let is_intersecting = if self.threshold <= 0.0 {
            ratio > 0.0
        } else {
            ratio >= self.threshold
        };

        Intersection {
            overlap_px,
            ratio,
            is_intersecting,
        }
    }
}

/// Result of measuring one region against an observation window.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    pub overlap_px: f64,
    pub ratio: f64,
    pub is_intersecting: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn focus_band_css_matches_browser_syntax() {
        let options = ObserveOptions::focus_band(0.3, 0.3).expect("valid band");
        assert_eq!(options.root_margin.to_css(), "-30% 0px -30% 0px");
        assert_eq!(RootMargin::NONE.to_css(), "0px 0px 0px 0px");
    }

    #[test]
    fn region_outside_band_does_not_intersect() {
        let options = ObserveOptions::focus_band(0.3, 0.3).expect("valid band");
        // Band spans 300..700 of a 1000px viewport.
        let above = options.measure(-500.0, 790.0, 1000.0);
        assert!(!above.is_intersecting);
        let inside = options.measure(-500.0, 810.0, 1000.0);
        assert!(inside.is_intersecting);
        assert!((inside.overlap_px - 10.0).abs() <= 1e-9);
    }

    #[test]
    fn ratio_threshold_requires_half_visibility() {
        let options = ObserveOptions::visible_ratio(0.5).expect("valid threshold");
        assert!(!options.measure(760.0, 100.0, 800.0).is_intersecting);
        assert!(options.measure(750.0, 100.0, 800.0).is_intersecting);
    }

    #[test]
    fn margins_must_leave_a_window() {
        assert!(RootMargin::new(0.5, 0.5).is_err());
        assert!(ObserveOptions::visible_ratio(1.5).is_err());
    }
}
