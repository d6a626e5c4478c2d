use super::{Axis, Size};

/// A rectangular region in pixel space.
///
/// Controls keep several of these: the region they occupy, the region they
/// hand to their children, and the parent region they were last laid out in.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Measure {
    /// Left edge.
    pub left: f32,
    /// Top edge.
    pub top: f32,
    /// Width.
    pub width: f32,
    /// Height.
    pub height: f32,
}

impl Measure {
    /// Construct a new measure.
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    /// A zero-sized measure at the origin.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Overwrite every field from `other`.
    pub fn copy_from(&mut self, other: &Self) {
        *self = *other;
    }

    /// Exact field-wise comparison.
    pub fn is_equals_to(&self, other: &Self) -> bool {
        self == other
    }

    /// Dimensions without location.
    pub fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Extent along `axis`.
    pub fn extent(&self, axis: Axis) -> f32 {
        self.size().main(axis)
    }

    /// Right edge.
    pub fn right(&self) -> f32 {
        self.left + self.width
    }

    /// Bottom edge.
    pub fn bottom(&self) -> f32 {
        self.top + self.height
    }

    /// Truncate every field toward zero. Non-finite values pass through.
    pub fn truncate(&self) -> Self {
        Self {
            left: self.left.trunc(),
            top: self.top.trunc(),
            width: self.width.trunc(),
            height: self.height.trunc(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn copy_from_overwrites() {
        let mut m = Measure::empty();
        m.copy_from(&Measure::new(1.0, 2.0, 3.0, 4.0));
        assert!(m.is_equals_to(&Measure::new(1.0, 2.0, 3.0, 4.0)));
        assert_eq!(m.right(), 4.0);
        assert_eq!(m.bottom(), 6.0);
    }

    #[test]
    fn truncate_toward_zero() {
        let m = Measure::new(1.7, -2.5, 10.99, 0.2).truncate();
        assert_eq!(m, Measure::new(1.0, -2.0, 10.0, 0.0));
        assert!(Measure::new(f32::NAN, 0.0, 0.0, 0.0).truncate().left.is_nan());
    }

    #[test]
    fn extent_by_axis() {
        let m = Measure::new(0.0, 0.0, 5.0, 9.0);
        assert_eq!(m.extent(Axis::Horizontal), 5.0);
        assert_eq!(m.extent(Axis::Vertical), 9.0);
    }
}
