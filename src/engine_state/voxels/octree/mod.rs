//! # Octree Module
//!
//! This module provides [`OctreeNode`], the recursive container that stores the
//! whole voxel world.
//!
//! ## Structure
//!
//! A node is either a *leaf*, whose `value` is authoritative for its entire cube,
//! or an *internal* node with child slots covering the eight octants of its cube.
//! A node is a leaf exactly when every child slot is empty. An empty slot under an
//! internal node reads as [`NO_VALUE`].
//!
//! ## Canonical Form
//!
//! Writes may leave redundant structure behind: eight identical leaves under one
//! parent, or an empty leaf hanging off an otherwise sparse parent. [`OctreeNode::simplify`]
//! removes both in a single post-order pass, so the tree returns to its maximally
//! collapsed form after every write.
//!
//! ## Ownership
//!
//! Each node exclusively owns its children. Dropping a node drops its subtree.

use crate::engine_state::voxels::block::{is_solid, BlockValue, NO_VALUE};

pub mod octant;

pub use octant::Octant;

/// A single cube of space at some depth of the octree.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct OctreeNode {
    /// The block value of this cube. Only meaningful at leaves; internal nodes keep `NO_VALUE`.
    value: BlockValue,
    /// The eight octants of this cube, indexed as described in [`octant`].
    children: [Option<Box<OctreeNode>>; 8],
}

impl OctreeNode {
    /// Creates a leaf holding `value`.
    pub fn new(value: BlockValue) -> Self {
        OctreeNode {
            value,
            children: Default::default(),
        }
    }

    /// Returns the value stored at this node.
    ///
    /// For internal nodes this is `NO_VALUE`.
    #[inline]
    pub fn value(&self) -> BlockValue {
        self.value
    }

    /// Returns `true` if every child slot is empty.
    pub fn is_leaf(&self) -> bool {
        self.children.iter().all(Option::is_none)
    }

    /// Returns the child in slot `index`, if present.
    ///
    /// # Panics
    /// Panics if `index` is not in `0..8`.
    pub fn child(&self, index: usize) -> Option<&OctreeNode> {
        self.children[index].as_deref()
    }

    /// Returns the child in slot `index` mutably, if present.
    pub fn child_mut(&mut self, index: usize) -> Option<&mut OctreeNode> {
        self.children[index].as_deref_mut()
    }

    /// Iterates the present children together with their octants.
    pub fn children(&self) -> impl Iterator<Item = (Octant, &OctreeNode)> {
        self.children
            .iter()
            .enumerate()
            .filter_map(|(index, child)| child.as_deref().map(|node| (Octant::new(index), node)))
    }

    /// Attaches `child` in slot `index`, dropping any previous occupant.
    ///
    /// A solid leaf is subdivided first so the other seven octants keep its value.
    /// Afterwards the node is internal and its own value is `NO_VALUE`.
    ///
    /// # Panics
    /// Panics if `index` is not in `0..8`.
    pub fn set_child(&mut self, index: usize, child: OctreeNode) {
        assert!(index < Octant::COUNT, "child index {index} out of range");
        if self.is_leaf() && is_solid(self.value) {
            self.subdivide();
        }
        self.value = NO_VALUE;
        self.children[index] = Some(Box::new(child));
    }

    /// Returns the child in slot `index`, creating it first if the slot is empty.
    ///
    /// A created child is a leaf carrying this node's current value, so descending
    /// into a solid leaf does not change what any point reads.
    pub fn child_or_insert(&mut self, index: usize) -> &mut OctreeNode {
        if self.children[index].is_none() {
            let value = self.value;
            self.set_child(index, OctreeNode::new(value));
        }
        self.children[index].get_or_insert_with(Box::default)
    }

    /// Makes this node a leaf holding `value`, dropping its whole subtree.
    pub fn set_value(&mut self, value: BlockValue) {
        self.value = value;
        self.children = Default::default();
    }

    /// Splits this leaf into eight leaves carrying its value.
    ///
    /// # Panics
    /// Panics if the node is not a leaf.
    pub fn subdivide(&mut self) {
        assert!(self.is_leaf(), "only a leaf can be subdivided");
        let value = self.value;
        self.children = std::array::from_fn(|_| Some(Box::new(OctreeNode::new(value))));
        self.value = NO_VALUE;
    }

    /// Restores canonical form below and at this node.
    ///
    /// Children are simplified first, so collapses propagate all the way up in
    /// one call. At each internal node, empty leaves are dropped (an empty slot
    /// already reads as `NO_VALUE`), and eight identical leaves are merged into
    /// this node. A node left with no children becomes an empty leaf.
    pub fn simplify(&mut self) {
        for child in self.children.iter_mut().flatten() {
            child.simplify();
        }

        if self.is_leaf() {
            return;
        }

        for slot in self.children.iter_mut() {
            if slot.as_deref().is_some_and(|child| child.is_leaf() && !is_solid(child.value)) {
                *slot = None;
            }
        }

        if let Some(value) = self.uniform_leaf_value() {
            self.set_value(value);
        } else if self.is_leaf() {
            self.value = NO_VALUE;
        }
    }

    /// Returns the shared value if all eight children are present leaves with equal values.
    fn uniform_leaf_value(&self) -> Option<BlockValue> {
        let first = self.children[0].as_deref()?;
        self.children
            .iter()
            .all(|child| {
                child
                    .as_deref()
                    .is_some_and(|node| node.is_leaf() && node.value == first.value)
            })
            .then_some(first.value)
    }

    /// Counts the nodes in this subtree, including this one.
    pub fn node_count(&self) -> usize {
        1 + self
            .children
            .iter()
            .flatten()
            .map(|child| child.node_count())
            .sum::<usize>()
    }

    /// Returns the number of levels below this node; a leaf has height 0.
    pub fn height(&self) -> u32 {
        self.children
            .iter()
            .flatten()
            .map(|child| child.height() + 1)
            .max()
            .unwrap_or(0)
    }
}
