//! Ray representation and the slab intersection test.

use crate::{AaBb, Vector};

/// Direction components with a magnitude below this are treated as parallel
/// to the corresponding slab.
pub const PARALLEL_EPSILON: f32 = 1e-6;

/// Added to every direction component before taking its reciprocal so that
/// an exactly-zero component never divides by zero.
///
/// This shifts every reciprocal slightly, so near-zero components carry a
/// small directional bias. Existing query results depend on that bias.
pub const DIVISION_EPSILON: f32 = 1e-5;

/// Finite upper bound of the parametric interval, standing in for "no bound".
pub const RAY_T_MAX: f32 = 1.0e9;

/// A half-line starting at `origin` and extending along `direction`.
///
/// The direction does not need to be normalized; components may be
/// negative or zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ray<const D: usize> {
    origin: Vector<D>,
    direction: Vector<D>,
}

impl<const D: usize> Ray<D> {
    /// Creates a new ray.
    pub fn new(origin: Vector<D>, direction: Vector<D>) -> Self {
        Self { origin, direction }
    }

    /// Returns the ray origin.
    #[inline]
    pub fn origin(&self) -> &Vector<D> {
        &self.origin
    }

    /// Returns the (unnormalized) ray direction.
    #[inline]
    pub fn direction(&self) -> &Vector<D> {
        &self.direction
    }

    /// Returns the point at parameter `t` along the ray.
    pub fn point_at(&self, t: f32) -> Vector<D> {
        self.origin + self.direction * t
    }

    /// Slab test against a box.
    ///
    /// Narrows the parametric interval `[0, RAY_T_MAX]` axis by axis and
    /// rejects as soon as it becomes empty. An axis whose direction component
    /// is below [`PARALLEL_EPSILON`] rejects immediately when the origin lies
    /// outside the closed slab `[low, high]` on that axis.
    pub fn intersects(&self, bounds: &AaBb<D>) -> bool {
        let (low, high) = (bounds.low(), bounds.high());
        let mut t_min = 0.0_f32;
        let mut t_max = RAY_T_MAX;

        for i in 0..D {
            let origin = self.origin[i];
            let direction = self.direction[i];

            if direction.abs() < PARALLEL_EPSILON && (origin < low[i] || origin > high[i]) {
                return false;
            }

            let n = 1.0 / (direction + DIVISION_EPSILON);
            let mut t1 = (low[i] - origin) * n;
            let mut t2 = (high[i] - origin) * n;
            if t1 > t2 {
                std::mem::swap(&mut t1, &mut t2);
            }

            t_min = t_min.max(t1);
            t_max = t_max.min(t2);
            if t_min > t_max {
                return false;
            }
        }

        true
    }
}
