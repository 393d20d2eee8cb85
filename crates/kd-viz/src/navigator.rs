//! Kd tree navigation utilities for interactive visualization.

use kd_tree::{KdNode, KdTree};
use macroquad::prelude::*;

use crate::{Drawable, Viewport};

/// Child taken at each node in the navigation path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

/// Interactive navigator for exploring the kd tree structure.
pub struct TreeNavigator {
    path: Vec<Direction>,
}

impl Default for TreeNavigator {
    fn default() -> Self {
        Self::new()
    }
}

impl TreeNavigator {
    /// Creates a new navigator starting at the root.
    pub fn new() -> Self {
        Self { path: Vec::new() }
    }

    /// Returns the current navigation path.
    pub fn path(&self) -> &[Direction] {
        &self.path
    }

    /// Returns the current depth in the tree.
    pub fn depth(&self) -> usize {
        self.path.len()
    }

    /// Attempts to navigate to the given child. Returns true if successful.
    pub fn go<I, S>(&mut self, tree: &KdTree<I, 2, S>, direction: Direction) -> bool {
        let has_child = self
            .current_node(tree)
            .and_then(|node| child(node, direction))
            .is_some();
        if has_child {
            self.path.push(direction);
        }
        has_child
    }

    /// Navigates to the parent node. Returns true if not already at root.
    pub fn go_parent(&mut self) -> bool {
        self.path.pop().is_some()
    }

    /// Returns to the root node.
    pub fn go_root(&mut self) {
        self.path.clear();
    }

    /// Handles keyboard input for navigation.
    /// Returns true if navigation state changed.
    pub fn update<I, S>(&mut self, tree: &KdTree<I, 2, S>) -> bool {
        let mut changed = false;

        if is_key_pressed(KeyCode::L) {
            changed = self.go(tree, Direction::Left);
        }
        if is_key_pressed(KeyCode::R) {
            changed = self.go(tree, Direction::Right);
        }
        if is_key_pressed(KeyCode::P) {
            changed = self.go_parent();
        }
        if is_key_pressed(KeyCode::H) && !self.path.is_empty() {
            self.go_root();
            changed = true;
        }

        changed
    }

    /// Returns the node at the current path.
    ///
    /// Returns `None` only if the path no longer exists, which cannot happen
    /// while nodes are never merged.
    pub fn current_node<'a, I, S>(&self, tree: &'a KdTree<I, 2, S>) -> Option<&'a KdNode<I, 2>> {
        let mut current = tree.root();
        for dir in &self.path {
            current = child(current, *dir)?;
        }
        Some(current)
    }

    /// Outlines the region of the selected node.
    pub fn render<I, S>(&self, tree: &KdTree<I, 2, S>, viewport: &Viewport) {
        if !self.path.is_empty() {
            if let Some(node) = self.current_node(tree) {
                node.bounds().draw(viewport, ORANGE);
            }
        }
    }

    /// Draws the navigation UI overlay.
    pub fn draw_ui<I, S>(&self, tree: &KdTree<I, 2, S>, y_offset: f32) {
        let (node_items, is_leaf) = self
            .current_node(tree)
            .map_or((0, true), |node| (node.item_count(), node.is_leaf()));

        let path_str = if self.path.is_empty() {
            "root".to_string()
        } else {
            self.path
                .iter()
                .map(|d| match d {
                    Direction::Left => "L",
                    Direction::Right => "R",
                })
                .collect::<Vec<_>>()
                .join(" -> ")
        };

        draw_text(
            &format!(
                "Tree: {} items, {} nodes, height {}",
                tree.item_count(),
                tree.node_count(),
                tree.height()
            ),
            10.0,
            y_offset,
            18.0,
            WHITE,
        );
        draw_text(
            &format!("Path: {} (depth {}), {} items", path_str, self.path.len(), node_items),
            10.0,
            y_offset + 20.0,
            18.0,
            YELLOW,
        );
        draw_text(
            if is_leaf { "(leaf)" } else { "[L]eft | [R]ight" },
            10.0,
            y_offset + 40.0,
            18.0,
            if is_leaf { ORANGE } else { GREEN },
        );
        draw_text("[P]arent | [H]ome | space: new ray", 10.0, y_offset + 60.0, 16.0, GRAY);
    }
}

fn child<I>(node: &KdNode<I, 2>, direction: Direction) -> Option<&KdNode<I, 2>> {
    match direction {
        Direction::Left => node.left(),
        Direction::Right => node.right(),
    }
}
