//! Axis-aligned bounding box representation for kd trees.

use crate::{KdTreeError, Ray, Vector};

/// A D-dimensional axis-aligned box spanning `low` to `high`.
///
/// Containment is half-open: a point belongs to the box iff
/// `low[i] < p[i] <= high[i]` on every axis. Corners are expected to satisfy
/// `low[i] <= high[i]`, but [`AaBb::new`] does not enforce it; an inverted
/// box simply contains nothing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AaBb<const D: usize> {
    low: Vector<D>,
    high: Vector<D>,
}

impl<const D: usize> AaBb<D> {
    /// Creates a box from its lower and upper corners without validation.
    pub fn new(low: Vector<D>, high: Vector<D>) -> Self {
        Self { low, high }
    }

    /// Creates a box from its corners, rejecting inverted or non-finite ones.
    pub fn try_new(low: Vector<D>, high: Vector<D>) -> Result<Self, KdTreeError> {
        for axis in 0..D {
            if !low[axis].is_finite() || !high[axis].is_finite() {
                return Err(KdTreeError::NonFiniteBounds { axis });
            }
            if low[axis] > high[axis] {
                return Err(KdTreeError::InvertedBounds {
                    axis,
                    low: low[axis],
                    high: high[axis],
                });
            }
        }
        Ok(Self { low, high })
    }

    /// Returns the lower corner.
    #[inline]
    pub fn low(&self) -> &Vector<D> {
        &self.low
    }

    /// Returns the upper corner.
    #[inline]
    pub fn high(&self) -> &Vector<D> {
        &self.high
    }

    /// Returns the center of the box.
    pub fn center(&self) -> Vector<D> {
        (self.low + self.high) * 0.5
    }

    /// Returns the half-extent of the box on every axis.
    pub fn half_extents(&self) -> Vector<D> {
        (self.high - self.low) * 0.5
    }

    /// Returns the full extent of the box on every axis.
    pub fn size(&self) -> Vector<D> {
        self.high - self.low
    }

    /// Checks if a point lies inside the box (lower-exclusive, upper-inclusive).
    pub fn contains_point(&self, point: &Vector<D>) -> bool {
        (0..D).all(|i| self.low[i] < point[i] && point[i] <= self.high[i])
    }

    /// Checks if this box overlaps another box.
    ///
    /// Two boxes overlap when, on every axis, the distance between their
    /// centers does not exceed the sum of their half-extents. Touching faces
    /// count as overlapping.
    pub fn overlaps(&self, other: &AaBb<D>) -> bool {
        let (center, other_center) = (self.center(), other.center());
        let (half, other_half) = (self.half_extents(), other.half_extents());

        (0..D).all(|i| (center[i] - other_center[i]).abs() <= half[i] + other_half[i])
    }

    /// Splits the box by the plane `x[axis] = value`.
    ///
    /// Returns `(left, right)` where `left` keeps the lower corner and ends at
    /// `value`, and `right` starts at `value` and keeps the upper corner.
    /// `value` is not checked against the box; a value outside
    /// `[low[axis], high[axis]]` yields an inverted child.
    ///
    /// # Panics
    /// Panics if `axis >= D`.
    pub fn split(&self, value: f32, axis: usize) -> (AaBb<D>, AaBb<D>) {
        let mut left_high = self.high;
        left_high[axis] = value;

        let mut right_low = self.low;
        right_low[axis] = value;

        (AaBb::new(self.low, left_high), AaBb::new(right_low, self.high))
    }

    /// Runs the slab test of `ray` against this box.
    #[inline]
    pub fn intersects_ray(&self, ray: &Ray<D>) -> bool {
        ray.intersects(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use nalgebra::vector;

    fn square(low: [f32; 2], high: [f32; 2]) -> AaBb<2> {
        AaBb::new(Vector::from(low), Vector::from(high))
    }

    #[test]
    fn contains_point_is_lower_exclusive_upper_inclusive() {
        let b = square([0.0, 0.0], [10.0, 10.0]);

        assert!(b.contains_point(&vector![5.0, 5.0]));
        assert!(b.contains_point(&vector![10.0, 10.0]));
        assert!(!b.contains_point(&vector![0.0, 5.0]));
        assert!(!b.contains_point(&vector![5.0, 0.0]));
        assert!(!b.contains_point(&vector![10.5, 5.0]));
    }

    #[test]
    fn inverted_box_contains_nothing() {
        let b = square([10.0, 0.0], [0.0, 10.0]);
        assert!(!b.contains_point(&vector![5.0, 5.0]));
    }

    #[test]
    fn center_and_extents() {
        let b = square([2.0, 4.0], [6.0, 10.0]);

        assert_relative_eq!(b.center(), vector![4.0, 7.0]);
        assert_relative_eq!(b.half_extents(), vector![2.0, 3.0]);
        assert_relative_eq!(b.size(), vector![4.0, 6.0]);
    }

    #[test]
    fn overlap_cases() {
        let box1 = square([20.0, 20.0], [50.0, 50.0]);
        let box2 = square([10.0, 10.0], [25.0, 25.0]);
        let box3 = square([30.0, 30.0], [40.0, 40.0]);

        // Partial overlap, containment, and disjoint.
        assert!(box1.overlaps(&box2));
        assert!(box1.overlaps(&box3));
        assert!(!box2.overlaps(&box3));

        assert!(box2.overlaps(&box1));
        assert!(box3.overlaps(&box1));
        assert!(!box3.overlaps(&box2));
    }

    #[test]
    fn overlap_touching_faces_and_identical_boxes() {
        let a = square([0.0, 0.0], [10.0, 10.0]);
        let touching = square([10.0, 0.0], [20.0, 10.0]);

        assert!(a.overlaps(&touching));
        assert!(a.overlaps(&a));
    }

    #[test]
    fn overlap_disjoint_on_one_axis_only() {
        let a = square([0.0, 0.0], [10.0, 10.0]);
        let b = square([2.0, 11.0], [8.0, 20.0]);
        assert!(!a.overlaps(&b));
    }

    #[test]
    fn split_produces_adjacent_halves() {
        let b = square([0.0, 0.0], [100.0, 50.0]);
        let (left, right) = b.split(30.0, 0);

        assert_eq!(left, square([0.0, 0.0], [30.0, 50.0]));
        assert_eq!(right, square([30.0, 0.0], [100.0, 50.0]));

        let (bottom, top) = b.split(20.0, 1);
        assert_eq!(bottom, square([0.0, 0.0], [100.0, 20.0]));
        assert_eq!(top, square([0.0, 20.0], [100.0, 50.0]));
    }

    #[test]
    fn split_outside_range_is_not_corrected() {
        let b = square([10.0, 0.0], [20.0, 10.0]);
        let (left, _) = b.split(5.0, 0);
        assert_eq!(left.high()[0], 5.0);
        assert!(!left.contains_point(&vector![7.0, 5.0]));
    }

    #[test]
    fn try_new_validates_corners() {
        assert!(AaBb::try_new(vector![0.0, 0.0], vector![1.0, 1.0]).is_ok());
        assert!(AaBb::try_new(vector![1.0, 1.0], vector![1.0, 1.0]).is_ok());

        assert_eq!(
            AaBb::try_new(vector![0.0, 2.0], vector![1.0, 1.0]),
            Err(KdTreeError::InvertedBounds {
                axis: 1,
                low: 2.0,
                high: 1.0
            })
        );
        assert_eq!(
            AaBb::try_new(vector![f32::NAN, 0.0], vector![1.0, 1.0]),
            Err(KdTreeError::NonFiniteBounds { axis: 0 })
        );
    }

    #[test]
    fn works_in_three_dimensions() {
        let b: AaBb<3> = AaBb::new(vector![0.0, 0.0, 0.0], vector![1.0, 1.0, 1.0]);
        assert!(b.contains_point(&vector![0.5, 0.5, 1.0]));
        assert!(!b.contains_point(&vector![0.5, 0.5, 1.5]));
    }
}
