//! Split plane selection strategies.
//!
//! When a leaf overflows, a selector picks the axis and the coordinate of the
//! plane that divides its region. Both strategies here pick the axis with the
//! greatest spread of representative coordinates; they differ in where along
//! that axis they cut.

use crate::SpatialItem;

/// An axis-aligned splitting plane `x[axis] = value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SplitPlane {
    /// Axis the plane is perpendicular to.
    pub axis: usize,
    /// Coordinate of the plane on that axis.
    pub value: f32,
}

/// Strategy for choosing where an overflowing leaf splits.
pub trait SplitSelector {
    /// Select a split plane for the given items.
    ///
    /// Returns `None` if the slice is empty.
    fn select<I: SpatialItem<D>, const D: usize>(&self, items: &[I]) -> Option<SplitPlane>;
}

/// Splits at the mean coordinate on the axis of greatest variance.
///
/// The mean is truncated toward zero. This is the default selector: it
/// produces fewer degenerate partitions than the median when many items
/// share a coordinate.
#[derive(Debug, Clone, Copy, Default)]
pub struct MeanSplit;

impl SplitSelector for MeanSplit {
    fn select<I: SpatialItem<D>, const D: usize>(&self, items: &[I]) -> Option<SplitPlane> {
        let axis = widest_axis(items)?;
        let value = mean(&coordinates(items, axis)).trunc();
        Some(SplitPlane { axis, value })
    }
}

/// Splits at the median coordinate on the axis of greatest variance.
///
/// The median of an even count is the average of the two middle values; the
/// result is truncated toward zero.
#[derive(Debug, Clone, Copy, Default)]
pub struct MedianSplit;

impl SplitSelector for MedianSplit {
    fn select<I: SpatialItem<D>, const D: usize>(&self, items: &[I]) -> Option<SplitPlane> {
        let axis = widest_axis(items)?;
        let mut coords = coordinates(items, axis);
        coords.sort_by(f32::total_cmp);

        let mid = coords.len() / 2;
        let median = if coords.len() % 2 == 0 {
            (coords[mid - 1] + coords[mid]) * 0.5
        } else {
            coords[mid]
        };
        Some(SplitPlane {
            axis,
            value: median.trunc(),
        })
    }
}

/// Returns the axis with strictly greatest population variance.
///
/// Axes are scanned in ascending order, so ties keep the lowest axis index.
fn widest_axis<I: SpatialItem<D>, const D: usize>(items: &[I]) -> Option<usize> {
    if items.is_empty() || D == 0 {
        return None;
    }

    let mut best_axis = 0;
    let mut best_variance = variance(&coordinates(items, 0));
    for axis in 1..D {
        let v = variance(&coordinates(items, axis));
        if v > best_variance {
            best_axis = axis;
            best_variance = v;
        }
    }
    Some(best_axis)
}

fn coordinates<I: SpatialItem<D>, const D: usize>(items: &[I], axis: usize) -> Vec<f32> {
    items
        .iter()
        .map(|item| item.representative_coordinate(axis))
        .collect()
}

fn mean(values: &[f32]) -> f32 {
    values.iter().sum::<f32>() / values.len() as f32
}

fn variance(values: &[f32]) -> f32 {
    let m = mean(values);
    values.iter().map(|v| (v - m) * (v - m)).sum::<f32>() / values.len() as f32
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{AaBb, Vector};
    use approx::assert_relative_eq;
    use nalgebra::vector;

    fn points(coords: &[[f32; 2]]) -> Vec<Vector<2>> {
        coords.iter().map(|c| Vector::from(*c)).collect()
    }

    #[test]
    fn empty_slice_selects_nothing() {
        let items: Vec<Vector<2>> = vec![];
        assert!(MeanSplit.select(&items).is_none());
        assert!(MedianSplit.select(&items).is_none());
    }

    #[test]
    fn mean_split_picks_axis_of_greatest_variance() {
        let items = points(&[[10.0, 50.0], [12.0, 10.0], [14.0, 90.0]]);
        let plane = MeanSplit.select(&items).unwrap();

        assert_eq!(plane.axis, 1);
        assert_relative_eq!(plane.value, 50.0);
    }

    #[test]
    fn mean_is_truncated_toward_zero() {
        let items = points(&[[1.0, 0.0], [2.0, 0.0], [4.0, 0.0]]);
        let plane = MeanSplit.select(&items).unwrap();
        assert_eq!(plane, SplitPlane { axis: 0, value: 2.0 });

        let negative = points(&[[-1.0, 0.0], [-2.0, 0.0], [-4.0, 0.0]]);
        let plane = MeanSplit.select(&negative).unwrap();
        assert_eq!(plane, SplitPlane { axis: 0, value: -2.0 });
    }

    #[test]
    fn ties_keep_the_lowest_axis() {
        let items = points(&[[0.0, 0.0], [10.0, 10.0]]);
        assert_eq!(MeanSplit.select(&items).unwrap().axis, 0);
        assert_eq!(MedianSplit.select(&items).unwrap().axis, 0);

        // All coordinates equal: zero variance everywhere.
        let same = points(&[[3.0, 3.0], [3.0, 3.0]]);
        assert_eq!(MeanSplit.select(&same).unwrap(), SplitPlane { axis: 0, value: 3.0 });
    }

    #[test]
    fn median_split_uses_middle_values() {
        let odd = points(&[[0.0, 0.0], [1.0, 0.0], [90.0, 0.0]]);
        assert_eq!(MedianSplit.select(&odd).unwrap(), SplitPlane { axis: 0, value: 1.0 });

        let even = points(&[[0.0, 0.0], [3.0, 0.0], [4.0, 0.0], [90.0, 0.0]]);
        assert_eq!(MedianSplit.select(&even).unwrap(), SplitPlane { axis: 0, value: 3.0 });
    }

    #[test]
    fn boxes_use_their_lower_corner() {
        let items = vec![
            AaBb::new(vector![0.0, 0.0], vector![100.0, 1.0]),
            AaBb::new(vector![0.0, 40.0], vector![100.0, 41.0]),
        ];
        // Wide x extents are ignored; only the lower corner counts.
        assert_eq!(MeanSplit.select(&items).unwrap(), SplitPlane { axis: 1, value: 20.0 });
    }

    #[test]
    fn three_dimensional_items() {
        let items: Vec<Vector<3>> = vec![
            vector![1.0, 1.0, 0.0],
            vector![1.0, 2.0, 50.0],
            vector![1.0, 3.0, 100.0],
        ];
        assert_eq!(MeanSplit.select(&items).unwrap(), SplitPlane { axis: 2, value: 50.0 });
    }
}
