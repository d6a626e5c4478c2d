/// Horizontal placement of a control within its parent region.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum HorizontalAlignment {
    /// Flush with the left edge.
    Left,
    /// Flush with the right edge.
    Right,
    /// Centered.
    #[default]
    Center,
}

impl HorizontalAlignment {
    /// Offset of an extent of `size` inside `available`.
    pub fn offset(self, size: f32, available: f32) -> f32 {
        match self {
            Self::Left => 0.0,
            Self::Right => available - size,
            Self::Center => (available - size) / 2.0,
        }
    }
}

/// Vertical placement of a control within its parent region.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, Default)]
pub enum VerticalAlignment {
    /// Flush with the top edge.
    Top,
    /// Flush with the bottom edge.
    Bottom,
    /// Centered.
    #[default]
    Center,
}

impl VerticalAlignment {
    /// Offset of an extent of `size` inside `available`.
    pub fn offset(self, size: f32, available: f32) -> f32 {
        match self {
            Self::Top => 0.0,
            Self::Bottom => available - size,
            Self::Center => (available - size) / 2.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn offsets() {
        assert_eq!(HorizontalAlignment::Left.offset(10.0, 100.0), 0.0);
        assert_eq!(HorizontalAlignment::Right.offset(10.0, 100.0), 90.0);
        assert_eq!(HorizontalAlignment::Center.offset(10.0, 100.0), 45.0);
        assert_eq!(VerticalAlignment::Bottom.offset(30.0, 20.0), -10.0);
    }
}
