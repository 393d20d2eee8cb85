//! Item kinds that can be stored in a kd tree.

use crate::{AaBb, Vector};

/// How an internal node hands an item down to its children.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Forwarding {
    /// Try the left child, then the right child; stop at the first that
    /// accepts. Used when the children's regions are disjoint for the item.
    FirstAccepting,
    /// Insert into both children. Items straddling the split plane end up
    /// stored once per child that accepts them.
    EveryChild,
}

/// Geometry that can be indexed by a kd tree.
///
/// The tree algorithm is written once against this trait; point and box
/// items differ only in the three hooks below.
pub trait SpatialItem<const D: usize>: Clone {
    /// Forwarding policy used on insertion into internal nodes and on split.
    const FORWARDING: Forwarding;

    /// Returns `true` if a node with the given bounds should hold this item.
    fn is_accepted_by(&self, bounds: &AaBb<D>) -> bool;

    /// Coordinate on `axis` used for choosing split axes and split values.
    fn representative_coordinate(&self, axis: usize) -> f32;
}

/// Point mode: a point belongs to the single node region that contains it.
impl<const D: usize> SpatialItem<D> for Vector<D> {
    const FORWARDING: Forwarding = Forwarding::FirstAccepting;

    #[inline]
    fn is_accepted_by(&self, bounds: &AaBb<D>) -> bool {
        bounds.contains_point(self)
    }

    #[inline]
    fn representative_coordinate(&self, axis: usize) -> f32 {
        self[axis]
    }
}

/// Box mode: a box belongs to every node region it overlaps.
impl<const D: usize> SpatialItem<D> for AaBb<D> {
    const FORWARDING: Forwarding = Forwarding::EveryChild;

    #[inline]
    fn is_accepted_by(&self, bounds: &AaBb<D>) -> bool {
        bounds.overlaps(self)
    }

    #[inline]
    fn representative_coordinate(&self, axis: usize) -> f32 {
        self.low()[axis]
    }
}
