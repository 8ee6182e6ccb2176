//! Unbalanced binary search tree with rotation helpers.
//!
//! Values greater than or equal to a node go to its right subtree, smaller
//! values to the left, so equal values are kept. The rotations rearrange the
//! root without changing the in-order sequence; they are the primitives a
//! self-balancing tree is built from.

use std::{cmp::Ordering, fmt};

/// Owned link to a subtree
type Link<T> = Option<Box<Node<T>>>;

/// A node of the tree
struct Node<T> {
    /// The element held by this node
    value: T,
    /// Subtree of smaller values
    left: Link<T>,
    /// Subtree of greater or equal values
    right: Link<T>,
}

impl<T> Node<T> {
    /// Creates a leaf
    fn leaf(value: T) -> Box<Self> {
        Box::new(Self { value, left: None, right: None })
    }
}

/// Binary search tree of owned nodes.
///
/// Sorted inserts build a tree as deep as it is long, so every walk over the
/// nodes (drop and clone included) uses an explicit stack.
pub struct Tree<T> {
    /// The root node
    root: Link<T>,
    /// Number of nodes
    len: usize,
}

impl<T> Default for Tree<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Drop for Tree<T> {
    fn drop(&mut self) {
        let mut pending: Vec<Box<Node<T>>> = self.root.take().into_iter().collect();
        while let Some(mut node) = pending.pop() {
            pending.extend(node.left.take());
            pending.extend(node.right.take());
        }
    }
}

impl<T: Clone> Clone for Tree<T> {
    fn clone(&self) -> Self {
        // Node, right subtree, left subtree; reversed this is post-order.
        let mut order: Vec<&Node<T>> = Vec::with_capacity(self.len);
        let mut pending: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        while let Some(node) = pending.pop() {
            order.push(node);
            pending.extend(node.left.as_deref());
            pending.extend(node.right.as_deref());
        }

        let mut built: Vec<Box<Node<T>>> = Vec::new();
        for node in order.into_iter().rev() {
            let right = if node.right.is_some() { built.pop() } else { None };
            let left = if node.left.is_some() { built.pop() } else { None };
            built.push(Box::new(Node { value: node.value.clone(), left, right }));
        }

        Self { root: built.pop(), len: self.len }
    }
}

impl<T: fmt::Debug> fmt::Debug for Tree<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Tree").field("len", &self.len).field("values", &self.in_order()).finish()
    }
}

impl<T: Ord> Tree<T> {
    /// Inserts a value, keeping duplicates
    pub fn add(&mut self, value: T) {
        let mut link = &mut self.root;
        while let Some(node) = link {
            link = if value >= node.value { &mut node.right } else { &mut node.left };
        }
        *link = Some(Node::leaf(value));
        self.len = self.len.saturating_add(1);
    }

    /// Returns true if some node equals `value`
    pub fn contains(&self, value: &T) -> bool {
        let mut link = &self.root;
        while let Some(node) = link {
            link = match value.cmp(&node.value) {
                Ordering::Equal => return true,
                Ordering::Greater => &node.right,
                Ordering::Less => &node.left,
            };
        }
        false
    }
}

impl<T> Tree<T> {
    /// Creates an empty tree
    #[must_use]
    pub fn new() -> Self {
        Self { root: None, len: 0 }
    }

    /// Returns the number of values
    #[must_use]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the tree holds no values
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    /// Returns the number of nodes on the longest root-to-leaf path
    #[must_use]
    pub fn height(&self) -> usize {
        let mut level: Vec<&Node<T>> = self.root.as_deref().into_iter().collect();
        let mut height = 0usize;
        while !level.is_empty() {
            height = height.saturating_add(1);
            level = level
                .into_iter()
                .flat_map(|node| node.left.as_deref().into_iter().chain(node.right.as_deref()))
                .collect();
        }
        height
    }

    /// Returns the root value
    #[must_use]
    pub fn root(&self) -> Option<&T> {
        self.root.as_deref().map(|node| &node.value)
    }

    /// Returns every value in ascending order
    #[must_use]
    pub fn in_order(&self) -> Vec<&T> {
        let mut values = Vec::with_capacity(self.len);
        let mut stack: Vec<&Node<T>> = Vec::new();
        let mut current = self.root.as_deref();
        while current.is_some() || !stack.is_empty() {
            while let Some(node) = current {
                stack.push(node);
                current = node.left.as_deref();
            }
            if let Some(node) = stack.pop() {
                values.push(&node.value);
                current = node.right.as_deref();
            }
        }
        values
    }

    /// Promotes the right child of the root; the old root becomes its left child
    pub fn rotate_left(&mut self) {
        self.root = self.root.take().map(rotate_left);
    }

    /// Promotes the left child of the root; the old root becomes its right child
    pub fn rotate_right(&mut self) {
        self.root = self.root.take().map(rotate_right);
    }

    /// Rotates the right child right, then the root left
    pub fn rotate_right_left(&mut self) {
        self.root = self.root.take().map(rotate_right_left);
    }

    /// Rotates the left child left, then the root right
    pub fn rotate_left_right(&mut self) {
        self.root = self.root.take().map(rotate_left_right);
    }
}

/// Left rotation around `node`; a node without a right child is returned as is
fn rotate_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = node.right.take() else {
        return node;
    };
    node.right = pivot.left.take();
    pivot.left = Some(node);
    pivot
}

/// Right rotation around `node`; a node without a left child is returned as is
fn rotate_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    let Some(mut pivot) = node.left.take() else {
        return node;
    };
    node.left = pivot.right.take();
    pivot.right = Some(node);
    pivot
}

/// Right-left double rotation
fn rotate_right_left<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.right = node.right.take().map(rotate_right);
    rotate_left(node)
}

/// Left-right double rotation
fn rotate_left_right<T>(mut node: Box<Node<T>>) -> Box<Node<T>> {
    node.left = node.left.take().map(rotate_left);
    rotate_right(node)
}
