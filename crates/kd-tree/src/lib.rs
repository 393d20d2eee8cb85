//! Kd tree spatial index for axis-aligned points and boxes in D dimensions.
//!
//! Items are inserted into a tree whose leaves split on overflow; ray queries
//! then prune whole regions with a slab test instead of scanning every item.
//! All operations are synchronous and infallible. Only the checked
//! constructors [`AaBb::try_new`] and [`TreeConfig::new`] return errors.

mod aabb;
mod error;
mod item;
pub mod kd;
mod ray;

/// A point or direction in D dimensions.
pub type Vector<const D: usize> = nalgebra::SVector<f32, D>;

pub use aabb::AaBb;
pub use error::KdTreeError;
pub use item::{Forwarding, SpatialItem};
pub use kd::{
    CollectingVisitor, FnVisitor, KdNode, KdTree, MeanSplit, MedianSplit, SplitPlane,
    SplitSelector, TreeConfig, TreeVisitor, MAX_DEPTH_LIMIT,
};
pub use ray::{Ray, DIVISION_EPSILON, PARALLEL_EPSILON, RAY_T_MAX};
