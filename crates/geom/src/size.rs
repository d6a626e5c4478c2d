use super::{Axis, Measure};

/// A `Size` is a region that has a width and height but no location.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    /// Width in pixels.
    pub width: f32,
    /// Height in pixels.
    pub height: f32,
}

impl Size {
    /// A zero-valued size.
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Construct a size from width and height.
    pub fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Build a size from extents along a main axis and its cross axis.
    pub fn from_main_cross(axis: Axis, main: f32, cross: f32) -> Self {
        match axis {
            Axis::Vertical => Self::new(cross, main),
            Axis::Horizontal => Self::new(main, cross),
        }
    }

    /// Extent along `axis`.
    pub fn main(&self, axis: Axis) -> f32 {
        match axis {
            Axis::Vertical => self.height,
            Axis::Horizontal => self.width,
        }
    }

    /// Extent perpendicular to `axis`.
    pub fn cross(&self, axis: Axis) -> f32 {
        self.main(axis.cross())
    }

    /// Return a `Measure` with the same dimensions located at the origin.
    pub fn measure(&self) -> Measure {
        Measure::new(0.0, 0.0, self.width, self.height)
    }
}

impl From<Measure> for Size {
    fn from(m: Measure) -> Self {
        Self::new(m.width, m.height)
    }
}

impl From<(f32, f32)> for Size {
    fn from(v: (f32, f32)) -> Self {
        Self::new(v.0, v.1)
    }
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn main_cross_vertical() {
        let s = Size::new(3.0, 7.0);
        assert_eq!(s.main(Axis::Vertical), 7.0);
        assert_eq!(s.cross(Axis::Vertical), 3.0);
        assert_eq!(s.main(Axis::Horizontal), 3.0);
        assert_eq!(s.cross(Axis::Horizontal), 7.0);
    }

    proptest! {
        #[test]
        fn from_main_cross_places_extents(main in 0u16..2000, cross in 0u16..2000, vertical: bool) {
            let axis = Axis::from_vertical(vertical);
            let s = Size::from_main_cross(axis, f32::from(main), f32::from(cross));
            prop_assert_eq!(s.main(axis), f32::from(main));
            prop_assert_eq!(s.cross(axis), f32::from(cross));
        }
    }
}
