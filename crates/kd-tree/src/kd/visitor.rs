//! Visitor pattern for kd tree traversal.
//!
//! Visitors let outside code (debug dumps, renderers) see the structure of a
//! tree without the tree knowing anything about them.

use crate::AaBb;

/// Visitor called once per node during [`KdTree::walk`](crate::KdTree::walk).
pub trait TreeVisitor<I, const D: usize> {
    /// Called for every node in pre-order.
    ///
    /// `items` is empty for internal nodes; items live only in leaves.
    fn visit(&mut self, items: &[I], bounds: &AaBb<D>);
}

/// A visitor that records every visited `(items, bounds)` pair.
#[derive(Debug)]
pub struct CollectingVisitor<I, const D: usize> {
    visited: Vec<(Vec<I>, AaBb<D>)>,
}

impl<I, const D: usize> Default for CollectingVisitor<I, D> {
    fn default() -> Self {
        Self {
            visited: Vec::new(),
        }
    }
}

impl<I, const D: usize> CollectingVisitor<I, D> {
    /// Creates a new empty collecting visitor.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the recorded pairs.
    pub fn visited(&self) -> &[(Vec<I>, AaBb<D>)] {
        &self.visited
    }

    /// Consumes the visitor, returning the recorded pairs.
    pub fn into_visited(self) -> Vec<(Vec<I>, AaBb<D>)> {
        self.visited
    }
}

impl<I: Clone, const D: usize> TreeVisitor<I, D> for CollectingVisitor<I, D> {
    fn visit(&mut self, items: &[I], bounds: &AaBb<D>) {
        self.visited.push((items.to_vec(), *bounds));
    }
}

/// A visitor that calls a closure for each node.
pub struct FnVisitor<F> {
    func: F,
}

impl<F> FnVisitor<F> {
    /// Creates a new visitor from a closure.
    pub fn new(func: F) -> Self {
        Self { func }
    }
}

impl<I, const D: usize, F> TreeVisitor<I, D> for FnVisitor<F>
where
    F: FnMut(&[I], &AaBb<D>),
{
    fn visit(&mut self, items: &[I], bounds: &AaBb<D>) {
        (self.func)(items, bounds);
    }
}
