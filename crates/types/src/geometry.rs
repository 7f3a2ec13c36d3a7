use serde::{Deserialize, Serialize};

/// The vertical extent of a rendered section, in document coordinates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    pub top: f64,
    pub height: f64,
}

impl Bounds {
    pub fn new(top: f64, height: f64) -> Self {
        Self { top, height }
    }

    pub fn bottom(self) -> f64 {
        self.top + self.height
    }

    /// Half-open membership test: `top <= offset < top + height`.
    pub fn contains(self, offset: f64) -> bool {
        offset >= self.top && offset < self.bottom()
    }

    pub fn is_empty(self) -> bool {
        self.height <= 0.0
    }

    pub fn is_finite(self) -> bool {
        self.top.is_finite() && self.height.is_finite()
    }

    pub fn overlaps(self, other: Bounds) -> bool {
        self.top < other.bottom() && other.top < self.bottom()
    }
}

/// How a programmatic scroll is animated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScrollBehavior {
    /// Jump straight to the target offset.
    Instant,
    /// Let the platform animate towards the target offset.
    #[default]
    Smooth,
}
