//! Kd tree node implementation.

use tracing::{debug, trace};

use crate::{AaBb, Forwarding, Ray, SpatialItem, Vector};

use super::config::TreeConfig;
use super::selector::SplitSelector;
use super::visitor::TreeVisitor;

/// A node in the kd tree.
///
/// Every node owns a region of space. A leaf stores the items accepted into
/// that region; an internal node stores no items and owns exactly two
/// children whose regions are the two halves of its own.
///
/// A leaf turns into an internal node the moment an insertion leaves it with
/// more than `split_threshold` items while its depth is below `max_depth`.
/// The transition is one-way.
#[derive(Debug, Clone)]
pub struct KdNode<I, const D: usize> {
    bounds: AaBb<D>,
    depth: usize,
    config: TreeConfig,
    content: Content<I, D>,
}

#[derive(Debug, Clone)]
enum Content<I, const D: usize> {
    Leaf(Vec<I>),
    Internal {
        left: Box<KdNode<I, D>>,
        right: Box<KdNode<I, D>>,
    },
}

impl<I, const D: usize> KdNode<I, D> {
    /// Creates an empty root leaf covering `bounds`.
    pub fn new(bounds: AaBb<D>, config: TreeConfig) -> Self {
        Self::with_depth(bounds, 0, config)
    }

    fn with_depth(bounds: AaBb<D>, depth: usize, config: TreeConfig) -> Self {
        Self {
            bounds,
            depth,
            config,
            content: Content::Leaf(Vec::new()),
        }
    }

    /// Returns the region owned by this node.
    #[inline]
    pub fn bounds(&self) -> &AaBb<D> {
        &self.bounds
    }

    /// Returns the depth of this node (0 for the root).
    #[inline]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// Returns the split parameters of this node.
    #[inline]
    pub fn config(&self) -> &TreeConfig {
        &self.config
    }

    /// Checks if this node stores items rather than children.
    #[inline]
    pub fn is_leaf(&self) -> bool {
        matches!(self.content, Content::Leaf(_))
    }

    /// Returns the items stored at this node (always empty for internal nodes).
    pub fn items(&self) -> &[I] {
        match &self.content {
            Content::Leaf(items) => items,
            Content::Internal { .. } => &[],
        }
    }

    /// Returns the lower child, the one below the split plane.
    #[inline]
    pub fn left(&self) -> Option<&KdNode<I, D>> {
        match &self.content {
            Content::Internal { left, .. } => Some(left.as_ref()),
            Content::Leaf(_) => None,
        }
    }

    /// Returns the upper child, the one above the split plane.
    #[inline]
    pub fn right(&self) -> Option<&KdNode<I, D>> {
        match &self.content {
            Content::Internal { right, .. } => Some(right.as_ref()),
            Content::Leaf(_) => None,
        }
    }

    /// Returns the number of items stored in this subtree.
    ///
    /// Box items duplicated across a split plane are counted once per leaf.
    pub fn item_count(&self) -> usize {
        match &self.content {
            Content::Leaf(items) => items.len(),
            Content::Internal { left, right } => left.item_count() + right.item_count(),
        }
    }

    /// Returns the number of nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        match &self.content {
            Content::Leaf(_) => 1,
            Content::Internal { left, right } => 1 + left.node_count() + right.node_count(),
        }
    }

    /// Returns the number of leaves in this subtree.
    pub fn leaf_count(&self) -> usize {
        match &self.content {
            Content::Leaf(_) => 1,
            Content::Internal { left, right } => left.leaf_count() + right.leaf_count(),
        }
    }

    /// Returns the number of levels in this subtree (1 for a leaf).
    pub fn height(&self) -> usize {
        match &self.content {
            Content::Leaf(_) => 1,
            Content::Internal { left, right } => 1 + left.height().max(right.height()),
        }
    }

    /// Visits this subtree in pre-order, left before right.
    pub fn walk<V: TreeVisitor<I, D>>(&self, visitor: &mut V) {
        visitor.visit(self.items(), &self.bounds);
        if let Content::Internal { left, right } = &self.content {
            left.walk(visitor);
            right.walk(visitor);
        }
    }

    /// Pushes the bounds of every leaf hit by `ray` onto `out`.
    pub fn ray_intersection_into(&self, ray: &Ray<D>, out: &mut Vec<AaBb<D>>) {
        if !ray.intersects(&self.bounds) {
            return;
        }
        match &self.content {
            Content::Leaf(_) => out.push(self.bounds),
            Content::Internal { left, right } => {
                left.ray_intersection_into(ray, out);
                right.ray_intersection_into(ray, out);
            }
        }
    }

    /// Pushes every item stored in a leaf hit by `ray` onto `out`.
    ///
    /// Items are not tested against the ray themselves.
    pub fn possible_values_into<'a>(&'a self, ray: &Ray<D>, out: &mut Vec<&'a I>) {
        if !ray.intersects(&self.bounds) {
            return;
        }
        match &self.content {
            Content::Leaf(items) => out.extend(items.iter()),
            Content::Internal { left, right } => {
                left.possible_values_into(ray, out);
                right.possible_values_into(ray, out);
            }
        }
    }

    /// Returns the leaf whose region contains `point`, if any.
    pub fn leaf_at(&self, point: &Vector<D>) -> Option<&KdNode<I, D>> {
        if !self.bounds.contains_point(point) {
            return None;
        }
        match &self.content {
            Content::Leaf(_) => Some(self),
            Content::Internal { left, right } => {
                left.leaf_at(point).or_else(|| right.leaf_at(point))
            }
        }
    }
}

impl<I: SpatialItem<D>, const D: usize> KdNode<I, D> {
    /// Inserts an item into this subtree.
    ///
    /// Returns `false` without changing anything if this node's region does
    /// not accept the item. Otherwise returns `true`, even when no child
    /// below accepts it (possible after a degenerate split); the item is
    /// then dropped.
    pub fn insert<S: SplitSelector>(&mut self, item: I, selector: &S) -> bool {
        if !item.is_accepted_by(&self.bounds) {
            trace!(depth = self.depth, "item rejected by node bounds");
            return false;
        }

        let must_split = match &mut self.content {
            Content::Leaf(items) => {
                items.push(item);
                self.config.should_split(items.len(), self.depth)
            }
            Content::Internal { left, right } => {
                forward(left, right, item, selector);
                false
            }
        };

        if must_split {
            self.split(selector);
        }
        true
    }

    /// Turns this leaf into an internal node.
    ///
    /// The stored items are taken out, two children are built from the
    /// selected plane, and every item is inserted again through the normal
    /// forwarding rule. Children may split in turn.
    fn split<S: SplitSelector>(&mut self, selector: &S) {
        let Content::Leaf(items) = &mut self.content else {
            return;
        };
        let Some(plane) = selector.select::<I, D>(items.as_slice()) else {
            return;
        };
        let items = std::mem::take(items);

        debug!(
            depth = self.depth,
            axis = plane.axis,
            value = plane.value,
            items = items.len(),
            "splitting leaf"
        );

        let (left_bounds, right_bounds) = self.bounds.split(plane.value, plane.axis);
        let mut left = Box::new(KdNode::with_depth(left_bounds, self.depth + 1, self.config));
        let mut right = Box::new(KdNode::with_depth(right_bounds, self.depth + 1, self.config));

        for item in items {
            forward(&mut left, &mut right, item, selector);
        }

        self.content = Content::Internal { left, right };
    }
}

/// Hands an item to the children of an internal node.
fn forward<I: SpatialItem<D>, const D: usize, S: SplitSelector>(
    left: &mut KdNode<I, D>,
    right: &mut KdNode<I, D>,
    item: I,
    selector: &S,
) {
    match <I as SpatialItem<D>>::FORWARDING {
        Forwarding::FirstAccepting => {
            if item.is_accepted_by(&left.bounds) {
                left.insert(item, selector);
            } else {
                right.insert(item, selector);
            }
        }
        Forwarding::EveryChild => {
            left.insert(item.clone(), selector);
            right.insert(item, selector);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kd::selector::MeanSplit;
    use nalgebra::vector;

    fn domain() -> AaBb<2> {
        AaBb::new(vector![0.0, 0.0], vector![100.0, 100.0])
    }

    fn small_box(x: f32, y: f32) -> AaBb<2> {
        AaBb::new(vector![x - 1.0, y - 1.0], vector![x + 1.0, y + 1.0])
    }

    fn sorted(mut points: Vec<Vector<2>>) -> Vec<Vector<2>> {
        points.sort_by(|a, b| a[0].total_cmp(&b[0]).then(a[1].total_cmp(&b[1])));
        points
    }

    #[test]
    fn new_node_is_empty_leaf() {
        let node: KdNode<Vector<2>, 2> = KdNode::new(domain(), TreeConfig::default());

        assert!(node.is_leaf());
        assert_eq!(node.depth(), 0);
        assert_eq!(node.item_count(), 0);
        assert_eq!(node.node_count(), 1);
        assert_eq!(node.height(), 1);
        assert!(node.left().is_none());
        assert!(node.right().is_none());
    }

    #[test]
    fn leaf_stays_leaf_up_to_threshold() {
        let mut node = KdNode::new(domain(), TreeConfig::default());
        for i in 1..=5 {
            let p: Vector<2> = vector![i as f32 * 10.0, 50.0];
            assert!(node.insert(p, &MeanSplit));
        }
        assert!(node.is_leaf());
        assert_eq!(node.items().len(), 5);
    }

    #[test]
    fn point_split_conserves_items() {
        let mut node = KdNode::new(domain(), TreeConfig::default());
        let points: Vec<Vector<2>> = vec![
            vector![10.0, 10.0],
            vector![20.0, 10.0],
            vector![60.0, 10.0],
            vector![15.0, 30.0],
            vector![55.0, 80.0],
            vector![35.0, 50.0],
        ];
        for p in &points {
            node.insert(*p, &MeanSplit);
        }

        assert!(!node.is_leaf());
        assert!(node.items().is_empty());

        let left = node.left().unwrap();
        let right = node.right().unwrap();
        assert_eq!(left.depth(), 1);
        assert_eq!(right.depth(), 1);

        let mut children: Vec<Vector<2>> = left.items().to_vec();
        children.extend_from_slice(right.items());
        assert_eq!(sorted(children), sorted(points));
    }

    #[test]
    fn point_split_uses_mean_on_widest_axis() {
        let mut node = KdNode::new(domain(), TreeConfig::default());
        // y spread dominates; mean y = 285 / 6 = 47.5, truncated to 47.
        for (x, y) in [(50.0, 5.0), (51.0, 15.0), (52.0, 25.0), (50.0, 70.0), (51.0, 80.0), (52.0, 90.0)] {
            let p: Vector<2> = vector![x, y];
            node.insert(p, &MeanSplit);
        }

        let left = node.left().unwrap();
        let right = node.right().unwrap();
        assert_eq!(*left.bounds(), AaBb::new(vector![0.0, 0.0], vector![100.0, 47.0]));
        assert_eq!(*right.bounds(), AaBb::new(vector![0.0, 47.0], vector![100.0, 100.0]));
        assert_eq!(left.items().len(), 3);
        assert_eq!(right.items().len(), 3);
    }

    #[test]
    fn box_split_duplicates_straddling_items() {
        let mut node = KdNode::new(domain(), TreeConfig::default());
        // Lower corners at x = 9, 19, 29, 39, 49 and 25, all at y = 49; the
        // mean x of 28.33 splits at x = 28.
        let boxes: Vec<AaBb<2>> = (1..=5).map(|i| small_box(i as f32 * 10.0, 50.0)).collect();
        let straddler = AaBb::new(vector![25.0, 49.0], vector![33.0, 51.0]);

        for b in &boxes {
            node.insert(*b, &MeanSplit);
        }
        node.insert(straddler, &MeanSplit);
        assert!(!node.is_leaf());

        let left = node.left().unwrap();
        let right = node.right().unwrap();
        assert!(left.items().contains(&straddler));
        assert!(right.items().contains(&straddler));
        assert_eq!(node.item_count(), 7);

        assert_eq!(left.bounds().high()[0], 28.0);
        for b in &boxes {
            assert!(left.items().contains(b) || right.items().contains(b));
        }
    }

    #[test]
    fn rejected_item_leaves_node_untouched() {
        let mut node = KdNode::new(domain(), TreeConfig::default());
        let outside: Vector<2> = vector![150.0, 50.0];
        let on_lower_face: Vector<2> = vector![0.0, 50.0];

        assert!(!node.insert(outside, &MeanSplit));
        assert!(!node.insert(on_lower_face, &MeanSplit));
        assert_eq!(node.item_count(), 0);
    }

    #[test]
    fn node_at_max_depth_never_splits() {
        let config = TreeConfig::default().with_split_threshold(1).with_max_depth(0);
        let mut node = KdNode::new(domain(), config);
        for i in 1..=20 {
            let p: Vector<2> = vector![i as f32 * 4.0, i as f32 * 3.0];
            node.insert(p, &MeanSplit);
        }
        assert!(node.is_leaf());
        assert_eq!(node.items().len(), 20);
    }

    #[test]
    fn identical_points_split_down_to_max_depth() {
        let config = TreeConfig::default().with_split_threshold(2).with_max_depth(3);
        let mut node = KdNode::new(domain(), config);
        let p: Vector<2> = vector![40.0, 40.0];
        for _ in 0..4 {
            node.insert(p, &MeanSplit);
        }
        // Every split lands on x = 40, so the points always go left.
        assert_eq!(node.height(), 4);
        assert_eq!(node.item_count(), 4);
        assert_eq!(node.leaf_at(&p).unwrap().depth(), 3);
    }

    #[test]
    fn leaf_at_finds_containing_leaf() {
        let mut node = KdNode::new(domain(), TreeConfig::default().with_split_threshold(1));
        let a: Vector<2> = vector![10.0, 50.0];
        let b: Vector<2> = vector![90.0, 50.0];
        node.insert(a, &MeanSplit);
        node.insert(b, &MeanSplit);

        assert_eq!(node.leaf_at(&a).unwrap().items(), &[a]);
        assert_eq!(node.leaf_at(&b).unwrap().items(), &[b]);
        assert!(node.leaf_at(&vector![0.0, 0.0]).is_none());
    }
}
