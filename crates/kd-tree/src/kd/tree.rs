//! Kd tree container and queries.

use crate::{AaBb, Ray, SpatialItem, Vector};

use super::config::TreeConfig;
use super::node::KdNode;
use super::selector::{MeanSplit, SplitSelector};
use super::visitor::TreeVisitor;

/// A kd tree over points or boxes in `D` dimensions.
///
/// The tree starts as a single leaf covering the bounds given at
/// construction. Leaves split automatically once they hold more than
/// `split_threshold` items, until `max_depth` is reached. There is no
/// removal and no rebalancing.
///
/// # Construction
///
/// ```
/// use kd_tree::{AaBb, KdTree, TreeConfig, Vector};
///
/// let bounds = AaBb::new(Vector::from([0.0, 0.0]), Vector::from([100.0, 100.0]));
/// let mut tree: KdTree<Vector<2>, 2> = KdTree::with_config(bounds, TreeConfig::default());
///
/// assert!(tree.insert(Vector::from([10.0, 20.0])));
/// assert!(!tree.insert(Vector::from([150.0, 20.0])));
/// ```
///
/// # Queries
///
/// [`KdTree::ray_intersection`] returns the leaf regions a ray passes
/// through and [`KdTree::possible_values`] the items stored in them. Both
/// return results in tree order (left subtree first), not sorted along the
/// ray. [`KdTree::walk`] exposes every node to a [`TreeVisitor`].
#[derive(Debug, Clone)]
pub struct KdTree<I, const D: usize, S = MeanSplit> {
    root: KdNode<I, D>,
    selector: S,
}

impl<I, const D: usize> KdTree<I, D> {
    /// Creates an empty tree over `bounds` with the default configuration.
    pub fn new(bounds: AaBb<D>) -> Self {
        Self::with_config(bounds, TreeConfig::default())
    }

    /// Creates an empty tree over `bounds` using the default selector.
    pub fn with_config(bounds: AaBb<D>, config: TreeConfig) -> Self {
        Self::with_selector(bounds, config, MeanSplit)
    }
}

impl<I, const D: usize, S> KdTree<I, D, S> {
    /// Creates an empty tree that splits leaves with `selector`.
    pub fn with_selector(bounds: AaBb<D>, config: TreeConfig, selector: S) -> Self {
        Self {
            root: KdNode::new(bounds, config),
            selector,
        }
    }

    /// Returns the root node.
    #[inline]
    pub fn root(&self) -> &KdNode<I, D> {
        &self.root
    }

    /// Returns the region covered by the tree.
    #[inline]
    pub fn bounds(&self) -> &AaBb<D> {
        self.root.bounds()
    }

    /// Returns the split parameters.
    #[inline]
    pub fn config(&self) -> &TreeConfig {
        self.root.config()
    }

    /// Returns the split plane selector.
    #[inline]
    pub fn selector(&self) -> &S {
        &self.selector
    }

    /// Returns `true` if no item is stored.
    pub fn is_empty(&self) -> bool {
        self.item_count() == 0
    }

    /// Returns the number of stored items, counting duplicates per leaf.
    pub fn item_count(&self) -> usize {
        self.root.item_count()
    }

    /// Returns the number of nodes in the tree.
    pub fn node_count(&self) -> usize {
        self.root.node_count()
    }

    /// Returns the number of leaves in the tree.
    pub fn leaf_count(&self) -> usize {
        self.root.leaf_count()
    }

    /// Returns the number of levels in the tree (1 for a lone root).
    pub fn height(&self) -> usize {
        self.root.height()
    }

    /// Visits every node in pre-order, calling the visitor with the node's
    /// items (empty for internal nodes) and bounds.
    pub fn walk<V: TreeVisitor<I, D>>(&self, visitor: &mut V) {
        self.root.walk(visitor);
    }

    /// Returns the bounds of every leaf whose region the ray passes through.
    ///
    /// The ray starts at `origin` and extends along `direction`; see
    /// [`Ray::intersects`] for the exact slab test.
    pub fn ray_intersection(&self, origin: Vector<D>, direction: Vector<D>) -> Vec<AaBb<D>> {
        let ray = Ray::new(origin, direction);
        let mut result = Vec::new();
        self.root.ray_intersection_into(&ray, &mut result);
        result
    }

    /// Returns every item stored in a leaf the ray passes through.
    ///
    /// This is a coarse filter: items are not tested against the ray, and a
    /// box stored in several leaves is returned once per leaf.
    pub fn possible_values(&self, origin: Vector<D>, direction: Vector<D>) -> Vec<&I> {
        let ray = Ray::new(origin, direction);
        let mut result = Vec::new();
        self.root.possible_values_into(&ray, &mut result);
        result
    }

    /// Returns the leaf whose region contains `point`, if any.
    pub fn leaf_at(&self, point: &Vector<D>) -> Option<&KdNode<I, D>> {
        self.root.leaf_at(point)
    }

    /// Collects all stored items in tree order.
    pub fn collect_items(&self) -> Vec<&I> {
        let mut result = Vec::with_capacity(self.item_count());
        collect_items_recursive(&self.root, &mut result);
        result
    }
}

impl<I: SpatialItem<D>, const D: usize, S: SplitSelector> KdTree<I, D, S> {
    /// Inserts an item.
    ///
    /// Returns `false` if the item lies outside the tree's bounds (for points,
    /// by half-open containment; for boxes, by overlap).
    pub fn insert(&mut self, item: I) -> bool {
        self.root.insert(item, &self.selector)
    }
}

impl<I: SpatialItem<D>, const D: usize, S: SplitSelector> Extend<I> for KdTree<I, D, S> {
    fn extend<T: IntoIterator<Item = I>>(&mut self, iter: T) {
        for item in iter {
            self.insert(item);
        }
    }
}

fn collect_items_recursive<'a, I, const D: usize>(node: &'a KdNode<I, D>, result: &mut Vec<&'a I>) {
    result.extend(node.items().iter());
    if let (Some(left), Some(right)) = (node.left(), node.right()) {
        collect_items_recursive(left, result);
        collect_items_recursive(right, result);
    }
}
