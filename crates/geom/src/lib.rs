//! Pixel geometry primitives used by the layout engine.

/// Layout regions in pixel space.
mod measure;
/// Width/height size type.
mod size;

pub use measure::Measure;
pub use size::Size;

/// Stacking axis of a linear layout.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum Axis {
    /// Children are laid out left to right.
    Horizontal,
    /// Children are laid out top to bottom.
    #[default]
    Vertical,
}

impl Axis {
    /// Return the axis for a vertical flag.
    pub fn from_vertical(vertical: bool) -> Self {
        if vertical {
            Self::Vertical
        } else {
            Self::Horizontal
        }
    }

    /// True for the vertical axis.
    pub fn is_vertical(self) -> bool {
        self == Self::Vertical
    }

    /// The perpendicular axis.
    pub fn cross(self) -> Self {
        match self {
            Self::Horizontal => Self::Vertical,
            Self::Vertical => Self::Horizontal,
        }
    }
}
