//! Unbalanced binary search tree.
//!
//! The baseline engine: ordered insertion, three-case deletion, and the
//! shared query/traversal algebra. [`AvlTree`](super::avl_tree::AvlTree)
//! extends this engine's mutation protocol with rebalancing; both share
//! [`BinaryNode`] storage and the [`BinaryArena`] capability surface.
//!
//! ## Example
//!
//! ```rust
//! use tree_collections::trees::BinarySearchTree;
//!
//! let mut bst = BinarySearchTree::new();
//! bst.insert(8);
//! bst.insert(3);
//! bst.insert(10);
//! bst.insert(1);
//! bst.insert(6);
//!
//! assert!(bst.contains(&6));
//! assert_eq!(bst.get_min(), Some(1));
//! assert_eq!(bst.get_max(), Some(10));
//! assert_eq!(bst.inorder(), vec![1, 3, 6, 8, 10]);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cmp::Ordering;

use tree_core::TreeError;

use super::arena::{Arena, Index};
use super::node::{BinaryArena, BinaryNode, ExportedNode};
use super::query;
use crate::trees::traversal::{self, Strategy};

/// An unbalanced binary search tree over keys `K`, ordered by an injected
/// comparator.
pub struct BinarySearchTree<K> {
    arena: Arena<BinaryNode<K>>,
    root: Option<Index>,
    size: usize,
    comparator: Box<dyn Fn(&K, &K) -> Ordering>,
}

impl<K: Ord> BinarySearchTree<K> {
    /// Creates an empty tree using `K`'s natural ordering.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tree_collections::trees::BinarySearchTree;
    ///
    /// let bst: BinarySearchTree<i32> = BinarySearchTree::new();
    /// assert!(bst.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_comparator(|a, b| a.cmp(b))
    }
}

impl<K: Ord> Default for BinarySearchTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> BinarySearchTree<K> {
    /// Creates an empty tree ordered by `comparator` instead of `K`'s
    /// natural ordering.
    pub fn with_comparator(comparator: impl Fn(&K, &K) -> Ordering + 'static) -> Self {
        BinarySearchTree {
            arena: Arena::new(),
            root: None,
            size: 0,
            comparator: Box::new(comparator),
        }
    }

    fn height_of(&self, idx: Option<Index>) -> i32 {
        match idx {
            None => -1,
            Some(i) => self.arena.get(i).expect("valid index").cached_height,
        }
    }

    fn recompute_height(&mut self, idx: Index) {
        let (left, right) = {
            let node = self.arena.get(idx).expect("valid index");
            (node.left, node.right)
        };
        let left_h = self.height_of(left);
        let right_h = self.height_of(right);
        let node = self.arena.get_mut(idx).expect("valid index");
        node.cached_height = 1 + core::cmp::max(left_h, right_h);
        node.balance_factor = right_h - left_h;
    }

    fn update_heights_upward(&mut self, mut idx: Index) {
        loop {
            self.recompute_height(idx);
            match self.arena.get(idx).expect("valid index").parent {
                Some(parent) => idx = parent,
                None => break,
            }
        }
    }

    /// Replaces `idx` with `child` in `idx`'s parent, repointing `child`'s
    /// parent link and the tree root as needed. Does not remove `idx` from
    /// the arena.
    fn transplant(&mut self, idx: Index, child: Option<Index>) {
        let parent = self.arena.get(idx).expect("valid index").parent;
        if let Some(c) = child {
            self.arena.get_mut(c).expect("valid index").parent = parent;
        }
        match parent {
            None => self.root = child,
            Some(p) => {
                let node = self.arena.get_mut(p).expect("valid index");
                if node.left == Some(idx) {
                    node.left = child;
                } else {
                    node.right = child;
                }
            }
        }
        if let Some(p) = parent {
            self.update_heights_upward(p);
        } else if let Some(c) = child {
            self.update_heights_upward(c);
        }
    }
}

impl<K: Clone> BinaryArena<K> for BinarySearchTree<K> {
    fn root(&self) -> Option<Index> {
        self.root
    }

    fn value(&self, index: Index) -> &K {
        &self.arena.get(index).expect("valid index").value
    }

    fn left(&self, index: Index) -> Option<Index> {
        self.arena.get(index).expect("valid index").left
    }

    fn right(&self, index: Index) -> Option<Index> {
        self.arena.get(index).expect("valid index").right
    }

    fn parent(&self, index: Index) -> Option<Index> {
        self.arena.get(index).expect("valid index").parent
    }

    fn compare(&self, a: &K, b: &K) -> Ordering {
        (self.comparator)(a, b)
    }
}

impl<K: Clone> BinarySearchTree<K> {
    /// Inserts `key`. Returns `false` without mutating the tree if an equal
    /// key is already present.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tree_collections::trees::BinarySearchTree;
    ///
    /// let mut bst = BinarySearchTree::new();
    /// assert!(bst.insert(5));
    /// assert!(!bst.insert(5));
    /// assert_eq!(bst.get_size(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        let Some(mut current) = self.root else {
            let idx = self.arena.insert(BinaryNode::leaf(key, None));
            self.root = Some(idx);
            self.size += 1;
            return true;
        };
        loop {
            let existing = self.arena.get(current).expect("valid index").value.clone();
            match (self.comparator)(&key, &existing) {
                Ordering::Equal => return false,
                Ordering::Less => match self.arena.get(current).expect("valid index").left {
                    Some(left) => current = left,
                    None => {
                        let idx = self.arena.insert(BinaryNode::leaf(key, Some(current)));
                        self.arena.get_mut(current).expect("valid index").left = Some(idx);
                        self.size += 1;
                        self.update_heights_upward(current);
                        return true;
                    }
                },
                Ordering::Greater => match self.arena.get(current).expect("valid index").right {
                    Some(right) => current = right,
                    None => {
                        let idx = self.arena.insert(BinaryNode::leaf(key, Some(current)));
                        self.arena.get_mut(current).expect("valid index").right = Some(idx);
                        self.size += 1;
                        self.update_heights_upward(current);
                        return true;
                    }
                },
            }
        }
    }

    /// Removes the node holding `key`, if any, using the three-case BST
    /// delete (leaf, single child, inorder-successor copy). Returns `false`
    /// if `key` was absent.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tree_collections::trees::BinarySearchTree;
    ///
    /// let mut bst = BinarySearchTree::new();
    /// bst.insert(5);
    /// bst.insert(3);
    /// bst.insert(7);
    ///
    /// assert!(bst.delete(&5));
    /// assert!(!bst.contains(&5));
    /// assert!(!bst.delete(&5));
    /// ```
    pub fn delete(&mut self, key: &K) -> bool {
        match query::find_index(self, key) {
            Some(idx) => {
                self.remove_node(idx);
                self.size -= 1;
                true
            }
            None => false,
        }
    }

    fn remove_node(&mut self, idx: Index) {
        let (left, right) = {
            let node = self.arena.get(idx).expect("valid index");
            (node.left, node.right)
        };
        if let (Some(_), Some(right)) = (left, right) {
            let successor = query::min_index(self, right);
            let successor_value = self.arena.get(successor).expect("valid index").value.clone();
            self.remove_node(successor);
            self.arena.get_mut(idx).expect("valid index").value = successor_value;
            return;
        }
        let child = left.or(right);
        self.transplant(idx, child);
        self.arena.remove(idx);
    }

    /// Returns `true` if `key` is present.
    pub fn search(&self, key: &K) -> bool {
        query::find_index(self, key).is_some()
    }

    /// Alias of [`Self::search`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use tree_collections::trees::BinarySearchTree;
    ///
    /// let mut bst = BinarySearchTree::new();
    /// bst.insert(5);
    /// assert!(bst.contains(&5));
    /// assert!(!bst.contains(&10));
    /// ```
    pub fn contains(&self, key: &K) -> bool {
        self.search(key)
    }

    pub fn get_min(&self) -> Option<K> {
        self.root
            .map(|root| self.arena.get(query::min_index(self, root)).unwrap().value.clone())
    }

    pub fn get_max(&self) -> Option<K> {
        self.root
            .map(|root| self.arena.get(query::max_index(self, root)).unwrap().value.clone())
    }

    /// Height of the tree; -1 for an empty tree, 0 for a single node.
    pub fn get_height(&self) -> i32 {
        self.height_of(self.root)
    }

    pub fn get_size(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.size = 0;
    }

    /// Smallest key strictly greater than `key`. `Err(ValueNotFound)` if
    /// `key` is absent.
    pub fn successor(&self, key: &K) -> Result<Option<K>, TreeError> {
        query::successor(self, key)
    }

    /// Largest key strictly less than `key`. `Err(ValueNotFound)` if `key`
    /// is absent.
    pub fn predecessor(&self, key: &K) -> Result<Option<K>, TreeError> {
        query::predecessor(self, key)
    }

    pub fn floor(&self, key: &K) -> Option<K> {
        query::floor(self, key)
    }

    pub fn ceiling(&self, key: &K) -> Option<K> {
        query::ceiling(self, key)
    }

    /// Keys `k` with `lo <= k <= hi`, ascending. Empty if `lo > hi`.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tree_collections::trees::BinarySearchTree;
    ///
    /// let mut bst = BinarySearchTree::new();
    /// for key in [5, 1, 9, 3, 7] {
    ///     bst.insert(key);
    /// }
    /// assert_eq!(bst.range_query(&3, &7), vec![3, 5, 7]);
    /// ```
    pub fn range_query(&self, lo: &K, hi: &K) -> Vec<K> {
        query::range_query(self, lo, hi)
    }

    pub fn count_range(&self, lo: &K, hi: &K) -> usize {
        query::count_range(self, lo, hi)
    }

    /// 1-indexed; `None` if `k` is out of range.
    pub fn kth_smallest(&self, k: usize) -> Option<K> {
        query::kth_smallest(self, k)
    }

    /// 1-indexed; `None` if `k` is out of range.
    pub fn kth_largest(&self, k: usize) -> Option<K> {
        query::kth_largest(self, k)
    }

    pub fn preorder(&self) -> Vec<K> {
        traversal::traverse(self, Strategy::Preorder)
    }

    /// # Example
    ///
    /// ```rust
    /// use tree_collections::trees::BinarySearchTree;
    ///
    /// let mut bst = BinarySearchTree::new();
    /// for key in [5, 1, 9] {
    ///     bst.insert(key);
    /// }
    /// assert_eq!(bst.inorder(), vec![1, 5, 9]);
    /// ```
    pub fn inorder(&self) -> Vec<K> {
        traversal::traverse(self, Strategy::Inorder)
    }

    pub fn postorder(&self) -> Vec<K> {
        traversal::traverse(self, Strategy::Postorder)
    }

    pub fn level_order(&self) -> Vec<K> {
        traversal::traverse(self, Strategy::LevelOrder)
    }

    pub fn preorder_lazy(&self) -> traversal::PreorderIter<'_, K, Self> {
        traversal::preorder_lazy(self)
    }

    pub fn inorder_lazy(&self) -> traversal::InorderIter<'_, K, Self> {
        traversal::inorder_lazy(self)
    }

    pub fn postorder_lazy(&self) -> traversal::PostorderIter<'_, K, Self> {
        traversal::postorder_lazy(self)
    }

    pub fn level_order_lazy(&self) -> traversal::LevelOrderIter<'_, K, Self> {
        traversal::level_order_lazy(self)
    }

    /// Walks the tree verifying in-order monotonicity, size consistency,
    /// height-cache consistency, and parent-pointer coherence.
    pub fn is_valid(&self) -> bool {
        let Some(root) = self.root else {
            return self.size == 0;
        };
        if self.arena.get(root).expect("valid index").parent.is_some() {
            return false;
        }
        let mut count = 0usize;
        if !self.validate_node(root, &mut count) {
            return false;
        }
        if count != self.size {
            return false;
        }
        let ordered = query::materialize_inorder(self);
        ordered
            .windows(2)
            .all(|pair| (self.comparator)(&pair[0], &pair[1]) == Ordering::Less)
    }

    fn validate_node(&self, idx: Index, count: &mut usize) -> bool {
        *count += 1;
        let node = self.arena.get(idx).expect("valid index");
        let left_h = self.height_of(node.left);
        let right_h = self.height_of(node.right);
        if node.cached_height != 1 + core::cmp::max(left_h, right_h) {
            return false;
        }
        if let Some(left) = node.left {
            if self.arena.get(left).expect("valid index").parent != Some(idx) {
                return false;
            }
            if !self.validate_node(left, count) {
                return false;
            }
        }
        if let Some(right) = node.right {
            if self.arena.get(right).expect("valid index").parent != Some(idx) {
                return false;
            }
            if !self.validate_node(right, count) {
                return false;
            }
        }
        true
    }

    /// Exports the tree to a plain nested record. `None` for an empty tree.
    pub fn export(&self) -> Option<ExportedNode<K>> {
        self.root.map(|root| self.export_node(root))
    }

    fn export_node(&self, idx: Index) -> ExportedNode<K> {
        let node = self.arena.get(idx).expect("valid index");
        ExportedNode {
            value: node.value.clone(),
            left: node.left.map(|l| Box::new(self.export_node(l))),
            right: node.right.map(|r| Box::new(self.export_node(r))),
            height: Some(node.cached_height),
            balance_factor: Some(node.balance_factor),
        }
    }

    /// Imports a tree from a plain nested record, ordered by `comparator`.
    /// `InvalidInput` if a node is missing `height`/`balance_factor`.
    pub fn import(
        record: Option<ExportedNode<K>>,
        comparator: impl Fn(&K, &K) -> Ordering + 'static,
    ) -> Result<Self, TreeError> {
        let mut tree = Self::with_comparator(comparator);
        if let Some(record) = record {
            let root = tree.import_node(record, None)?;
            tree.root = Some(root);
        }
        Ok(tree)
    }

    fn import_node(
        &mut self,
        record: ExportedNode<K>,
        parent: Option<Index>,
    ) -> Result<Index, TreeError> {
        record.height.ok_or(TreeError::InvalidInput {
            message: "node record missing height",
        })?;
        record.balance_factor.ok_or(TreeError::InvalidInput {
            message: "node record missing balance_factor",
        })?;
        let idx = self.arena.insert(BinaryNode::leaf(record.value, parent));
        self.size += 1;
        if let Some(left) = record.left {
            let l = self.import_node(*left, Some(idx))?;
            self.arena.get_mut(idx).expect("valid index").left = Some(l);
        }
        if let Some(right) = record.right {
            let r = self.import_node(*right, Some(idx))?;
            self.arena.get_mut(idx).expect("valid index").right = Some(r);
        }
        self.recompute_height(idx);
        Ok(idx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod basics {
        use super::*;

        #[test]
        fn new_tree_is_empty() {
            let tree: BinarySearchTree<i32> = BinarySearchTree::new();
            assert!(tree.is_empty());
            assert_eq!(tree.get_size(), 0);
            assert_eq!(tree.get_height(), -1);
        }

        #[test]
        fn clear_resets_to_empty() {
            let mut tree = BinarySearchTree::new();
            tree.insert(5);
            tree.insert(3);
            tree.clear();
            assert!(tree.is_empty());
            assert_eq!(tree.get_size(), 0);
        }
    }

    mod insert {
        use super::*;

        #[test]
        fn rejects_duplicate() {
            let mut tree = BinarySearchTree::new();
            assert!(tree.insert(5));
            assert!(!tree.insert(5));
            assert_eq!(tree.get_size(), 1);
        }

        #[test]
        fn builds_correct_shape() {
            let mut tree = BinarySearchTree::new();
            for k in [50, 30, 70, 20, 40] {
                tree.insert(k);
            }
            assert_eq!(tree.inorder(), alloc::vec![20, 30, 40, 50, 70]);
            assert!(tree.is_valid());
        }
    }

    mod search {
        use super::*;

        #[test]
        fn finds_present_keys_only() {
            let mut tree = BinarySearchTree::new();
            for k in [5, 1, 9] {
                tree.insert(k);
            }
            assert!(tree.contains(&1));
            assert!(!tree.contains(&2));
        }
    }

    mod remove {
        use super::*;

        #[test]
        fn double_delete_is_idempotent() {
            let mut tree = BinarySearchTree::new();
            tree.insert(5);
            assert!(tree.delete(&5));
            assert!(!tree.delete(&5));
            assert_eq!(tree.get_size(), 0);
        }

        #[test]
        fn two_child_case_copies_successor() {
            let mut tree = BinarySearchTree::new();
            for k in [5, 3, 8, 7, 9] {
                tree.insert(k);
            }
            assert!(tree.delete(&5));
            assert_eq!(tree.inorder(), alloc::vec![3, 7, 8, 9]);
            assert!(tree.is_valid());
        }

        #[test]
        fn leaf_case() {
            let mut tree = BinarySearchTree::new();
            for k in [5, 3, 8] {
                tree.insert(k);
            }
            assert!(tree.delete(&3));
            assert_eq!(tree.inorder(), alloc::vec![5, 8]);
            assert!(tree.is_valid());
        }

        #[test]
        fn single_child_case() {
            let mut tree = BinarySearchTree::new();
            for k in [5, 3, 2] {
                tree.insert(k);
            }
            assert!(tree.delete(&3));
            assert_eq!(tree.inorder(), alloc::vec![2, 5]);
            assert!(tree.is_valid());
        }
    }

    mod min_max {
        use super::*;

        #[test]
        fn reports_extremes() {
            let mut tree = BinarySearchTree::new();
            for k in [5, 1, 9, -3] {
                tree.insert(k);
            }
            assert_eq!(tree.get_min(), Some(-3));
            assert_eq!(tree.get_max(), Some(9));
        }
    }

    mod floor_ceiling {
        use super::*;

        #[test]
        fn present_key_is_its_own_floor_and_ceiling() {
            let mut tree = BinarySearchTree::new();
            for k in [10, 5, 15] {
                tree.insert(k);
            }
            assert_eq!(tree.floor(&10), Some(10));
            assert_eq!(tree.ceiling(&10), Some(10));
        }

        #[test]
        fn absent_key_brackets_between_neighbors() {
            let mut tree = BinarySearchTree::new();
            for k in [10, 5, 15] {
                tree.insert(k);
            }
            assert_eq!(tree.floor(&12), Some(10));
            assert_eq!(tree.ceiling(&12), Some(15));
        }

        #[test]
        fn out_of_range_has_no_bound() {
            let mut tree = BinarySearchTree::new();
            tree.insert(10);
            assert_eq!(tree.floor(&5), None);
            assert_eq!(tree.ceiling(&15), None);
        }
    }

    mod successor_predecessor {
        use super::*;

        #[test]
        fn absent_key_is_value_not_found() {
            let mut tree = BinarySearchTree::new();
            tree.insert(10);
            assert_eq!(tree.successor(&20), Err(TreeError::ValueNotFound));
        }

        #[test]
        fn present_key_walks_inorder_neighbors() {
            let mut tree = BinarySearchTree::new();
            for k in [10, 5, 15] {
                tree.insert(k);
            }
            assert_eq!(tree.successor(&10), Ok(Some(15)));
            assert_eq!(tree.predecessor(&10), Ok(Some(5)));
            assert_eq!(tree.successor(&15), Ok(None));
        }
    }

    mod range {
        use super::*;

        #[test]
        fn scenario_s5_bst_range_query() {
            let mut tree = BinarySearchTree::new();
            for k in [50, 30, 70, 20, 40, 60, 80] {
                tree.insert(k);
            }
            assert_eq!(tree.range_query(&25, &65), alloc::vec![30, 40, 50, 60]);
            assert_eq!(tree.count_range(&25, &65), 4);
        }

        #[test]
        fn inverted_bounds_are_empty() {
            let mut tree = BinarySearchTree::new();
            for k in [1, 2, 3] {
                tree.insert(k);
            }
            assert!(tree.range_query(&5, &1).is_empty());
        }
    }

    mod traversal {
        use super::*;

        #[test]
        fn all_four_strategies_agree_with_lazy_forms() {
            let mut tree = BinarySearchTree::new();
            for k in [5, 3, 8, 1, 4, 7, 9] {
                tree.insert(k);
            }
            assert_eq!(tree.preorder(), tree.preorder_lazy().collect::<Vec<_>>());
            assert_eq!(tree.inorder(), tree.inorder_lazy().collect::<Vec<_>>());
            assert_eq!(tree.postorder(), tree.postorder_lazy().collect::<Vec<_>>());
            assert_eq!(
                tree.level_order(),
                tree.level_order_lazy().collect::<Vec<_>>()
            );
        }

        #[test]
        fn right_to_left_mirrors_inorder() {
            let mut tree = BinarySearchTree::new();
            for k in [5, 3, 8, 1, 4, 7, 9] {
                tree.insert(k);
            }
            let mut mirrored = tree.inorder();
            mirrored.reverse();
            assert_eq!(
                crate::trees::traversal::traverse_right_to_left(&tree, Strategy::Inorder),
                mirrored
            );
        }

        #[test]
        fn depth_limited_stops_at_given_depth() {
            let mut tree = BinarySearchTree::new();
            for k in [5, 3, 8, 1, 4, 7, 9] {
                tree.insert(k);
            }
            assert_eq!(
                crate::trees::traversal::traverse_depth_limited(&tree, Strategy::Preorder, 0),
                vec![5]
            );
            assert_eq!(
                crate::trees::traversal::traverse_depth_limited(&tree, Strategy::Preorder, 1),
                vec![5, 3, 8]
            );
        }

        #[test]
        fn reverse_is_traverse_reversed() {
            let mut tree = BinarySearchTree::new();
            for k in [5, 3, 8, 1, 4, 7, 9] {
                tree.insert(k);
            }
            let mut expected = tree.inorder();
            expected.reverse();
            assert_eq!(
                crate::trees::traversal::traverse_reverse(&tree, Strategy::Inorder),
                expected
            );
        }

        #[test]
        fn count_limited_takes_a_prefix() {
            let mut tree = BinarySearchTree::new();
            for k in [5, 3, 8, 1, 4, 7, 9] {
                tree.insert(k);
            }
            assert_eq!(
                crate::trees::traversal::traverse_count_limited(&tree, Strategy::Inorder, 3),
                vec![1, 3, 4]
            );
            assert_eq!(
                crate::trees::traversal::traverse_count_limited(&tree, Strategy::Inorder, 100),
                tree.inorder()
            );
        }

        #[test]
        fn with_condition_filters_the_traversal() {
            let mut tree = BinarySearchTree::new();
            for k in [5, 3, 8, 1, 4, 7, 9] {
                tree.insert(k);
            }
            let evens =
                crate::trees::traversal::traverse_with_condition(&tree, Strategy::Inorder, |k| k % 2 == 0);
            assert_eq!(evens, vec![4, 8]);
        }

        #[test]
        fn with_callback_visits_every_value_in_order() {
            let mut tree = BinarySearchTree::new();
            for k in [5, 3, 8, 1, 4, 7, 9] {
                tree.insert(k);
            }
            let mut visited = Vec::new();
            crate::trees::traversal::traverse_with_callback(&tree, Strategy::Inorder, |k| visited.push(*k));
            assert_eq!(visited, tree.inorder());
        }

        #[test]
        fn stats_reports_shape_and_validity() {
            let mut tree = BinarySearchTree::new();
            for k in [5, 3, 8, 1, 4, 7, 9] {
                tree.insert(k);
            }
            let stats = crate::trees::traversal::stats(&tree);
            assert_eq!(stats.node_count, tree.get_size());
            assert_eq!(stats.height, tree.get_height());
            assert!(stats.is_valid);
            assert_eq!(stats.leaf_count + stats.internal_count, stats.node_count);

            let empty: BinarySearchTree<i32> = BinarySearchTree::new();
            let empty_stats = crate::trees::traversal::stats(&empty);
            assert_eq!(empty_stats.node_count, 0);
            assert_eq!(empty_stats.height, -1);
        }
    }

    mod height {
        use super::*;

        #[test]
        fn single_node_has_height_zero() {
            let mut tree = BinarySearchTree::new();
            tree.insert(1);
            assert_eq!(tree.get_height(), 0);
        }
    }

    mod kth_smallest {
        use super::*;

        #[test]
        fn bounds_match_min_and_max() {
            let mut tree = BinarySearchTree::new();
            for k in [5, 3, 8, 1, 4, 7, 9] {
                tree.insert(k);
            }
            assert_eq!(tree.kth_smallest(1), tree.get_min());
            assert_eq!(tree.kth_smallest(tree.get_size()), tree.get_max());
            assert_eq!(tree.kth_largest(1), tree.get_max());
            assert_eq!(tree.kth_smallest(0), None);
            assert_eq!(tree.kth_smallest(tree.get_size() + 1), None);
        }
    }

    mod round_trip {
        use super::*;

        #[test]
        fn export_then_import_is_structurally_identical() {
            let mut tree = BinarySearchTree::new();
            for k in [5, 3, 8, 1, 4, 7, 9] {
                tree.insert(k);
            }
            let exported = tree.export();
            let imported = BinarySearchTree::import(exported.clone(), |a: &i32, b: &i32| a.cmp(b))
                .expect("valid record");
            assert_eq!(imported.export(), exported);
            assert_eq!(imported.inorder(), tree.inorder());
        }

        #[test]
        fn shuffled_permutation_sorts_on_inorder() {
            let mut tree = BinarySearchTree::new();
            for k in [4, 1, 5, 2, 3] {
                tree.insert(k);
            }
            assert_eq!(tree.inorder(), alloc::vec![1, 2, 3, 4, 5]);
        }

        #[test]
        fn import_rejects_missing_height() {
            let record = ExportedNode {
                value: 1,
                left: None,
                right: None,
                height: None,
                balance_factor: Some(0),
            };
            let result = BinarySearchTree::import(Some(record), |a: &i32, b: &i32| a.cmp(b));
            assert!(matches!(result, Err(TreeError::InvalidInput { .. })));
        }
    }

    mod utilities {
        use super::*;

        #[test]
        fn reversed_comparator_inverts_order() {
            let mut tree = BinarySearchTree::with_comparator(|a: &i32, b: &i32| b.cmp(a));
            for k in [3, 1, 2] {
                tree.insert(k);
            }
            assert_eq!(tree.inorder(), alloc::vec![3, 2, 1]);
        }
    }

    mod edge_cases {
        use super::*;

        #[test]
        fn delete_from_empty_tree() {
            let mut tree: BinarySearchTree<i32> = BinarySearchTree::new();
            assert!(!tree.delete(&1));
        }

        #[test]
        fn single_node_delete_empties_tree() {
            let mut tree = BinarySearchTree::new();
            tree.insert(1);
            assert!(tree.delete(&1));
            assert!(tree.is_empty());
            assert!(tree.is_valid());
        }
    }
}
