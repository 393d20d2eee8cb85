//! Kd tree over axis-aligned points or boxes.
//!
//! This module provides a kd tree that recursively halves its region along
//! one axis at a time as items are inserted. The tree enables:
//!
//! - Ray queries that skip every leaf the ray cannot reach
//! - Pre-order traversal for rendering or debugging the structure
//!
//! # Example
//!
//! ```
//! use kd_tree::{AaBb, KdTree, Vector};
//!
//! let bounds = AaBb::new(Vector::from([0.0, 0.0]), Vector::from([100.0, 100.0]));
//! let mut tree: KdTree<AaBb<2>, 2> = KdTree::new(bounds);
//!
//! for i in 0..10 {
//!     let x = 5.0 + i as f32 * 9.0;
//!     tree.insert(AaBb::new(Vector::from([x, 40.0]), Vector::from([x + 2.0, 42.0])));
//! }
//!
//! // Leaf regions crossed by a ray, and the boxes stored in them.
//! let leaves = tree.ray_intersection(Vector::from([0.0, 41.0]), Vector::from([1.0, 0.0]));
//! let candidates = tree.possible_values(Vector::from([0.0, 41.0]), Vector::from([1.0, 0.0]));
//! assert!(!leaves.is_empty());
//! assert!(candidates.len() >= 10);
//! ```
//!
//! # Architecture
//!
//! - [`KdTree`]: The main container holding the root node and the selector
//! - [`KdNode`]: Leaf or internal node owning a region of space
//! - [`SplitSelector`]: Strategy trait for choosing split planes
//! - [`TreeVisitor`]: Visitor trait for custom traversal behavior

mod config;
mod node;
mod selector;
mod tree;
mod visitor;

// Re-export main types
pub use config::{TreeConfig, MAX_DEPTH_LIMIT};
pub use node::KdNode;
pub use selector::{MeanSplit, MedianSplit, SplitPlane, SplitSelector};
pub use tree::KdTree;
pub use visitor::{CollectingVisitor, FnVisitor, TreeVisitor};
