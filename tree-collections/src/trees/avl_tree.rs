//! Height-balanced AVL tree.
//!
//! Extends the [`BinarySearchTree`](super::binary_search_tree::BinarySearchTree)
//! mutation protocol with balance-factor maintenance and the four rotation
//! patterns (LL, RR, LR, RL), guaranteeing `|balance_factor(x)| <= 1` at
//! every node `x` after every completed `insert`/`delete`.
//!
//! ## Example
//!
//! ```rust
//! use tree_collections::trees::AvlTree;
//!
//! let mut avl = AvlTree::new();
//! avl.insert(10);
//! avl.insert(5);
//! avl.insert(15);
//! avl.insert(2);
//! avl.insert(7);
//!
//! assert!(avl.contains(&7));
//! assert!(avl.is_avl());
//! assert_eq!(avl.get_min(), Some(2));
//! assert_eq!(avl.inorder(), vec![2, 5, 7, 10, 15]);
//! ```

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::cmp::Ordering;

use tree_core::TreeError;

use super::arena::{Arena, Index};
use super::node::{BinaryArena, BinaryNode, ExportedNode};
use super::query;
use crate::trees::traversal::{self, Strategy};

/// A self-balancing AVL tree over keys `K`, ordered by an injected
/// comparator.
pub struct AvlTree<K> {
    arena: Arena<BinaryNode<K>>,
    root: Option<Index>,
    size: usize,
    comparator: Box<dyn Fn(&K, &K) -> Ordering>,
}

impl<K: Ord> AvlTree<K> {
    /// Creates an empty tree using `K`'s natural ordering.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tree_collections::trees::AvlTree;
    ///
    /// let avl: AvlTree<i32> = AvlTree::new();
    /// assert!(avl.is_empty());
    /// ```
    pub fn new() -> Self {
        Self::with_comparator(|a, b| a.cmp(b))
    }
}

impl<K: Ord> Default for AvlTree<K> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K> AvlTree<K> {
    pub fn with_comparator(comparator: impl Fn(&K, &K) -> Ordering + 'static) -> Self {
        AvlTree {
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

    /// Rotates `x` left: `x`'s right child `y` becomes the subtree root,
    /// `x` becomes `y`'s left child, `y`'s former left subtree is
    /// reattached as `x`'s right subtree. Fixes `y`'s parent link (or the
    /// tree root) and both nodes' cached heights. Returns `y`.
    fn rotate_left(&mut self, x: Index) -> Index {
        let y = self.arena.get(x).expect("valid index").right.expect("right-heavy node has right child");
        let t2 = self.arena.get(y).expect("valid index").left;
        let parent = self.arena.get(x).expect("valid index").parent;

        self.arena.get_mut(x).expect("valid index").right = t2;
        if let Some(t2) = t2 {
            self.arena.get_mut(t2).expect("valid index").parent = Some(x);
        }
        self.arena.get_mut(y).expect("valid index").left = Some(x);
        self.arena.get_mut(x).expect("valid index").parent = Some(y);
        self.arena.get_mut(y).expect("valid index").parent = parent;
        match parent {
            None => self.root = Some(y),
            Some(p) => {
                let node = self.arena.get_mut(p).expect("valid index");
                if node.left == Some(x) {
                    node.left = Some(y);
                } else {
                    node.right = Some(y);
                }
            }
        }
        self.recompute_height(x);
        self.recompute_height(y);
        y
    }

    /// Mirror of [`Self::rotate_left`].
    fn rotate_right(&mut self, x: Index) -> Index {
        let y = self.arena.get(x).expect("valid index").left.expect("left-heavy node has left child");
        let t2 = self.arena.get(y).expect("valid index").right;
        let parent = self.arena.get(x).expect("valid index").parent;

        self.arena.get_mut(x).expect("valid index").left = t2;
        if let Some(t2) = t2 {
            self.arena.get_mut(t2).expect("valid index").parent = Some(x);
        }
        self.arena.get_mut(y).expect("valid index").right = Some(x);
        self.arena.get_mut(x).expect("valid index").parent = Some(y);
        self.arena.get_mut(y).expect("valid index").parent = parent;
        match parent {
            None => self.root = Some(y),
            Some(p) => {
                let node = self.arena.get_mut(p).expect("valid index");
                if node.left == Some(x) {
                    node.left = Some(y);
                } else {
                    node.right = Some(y);
                }
            }
        }
        self.recompute_height(x);
        self.recompute_height(y);
        y
    }

    /// Applies the rotation table from the balance factor of `idx` (already
    /// recomputed by the caller). Returns the resulting subtree root, which
    /// is `idx` itself if no rotation was needed.
    fn rebalance_at(&mut self, idx: Index) -> Index {
        let bf = self.arena.get(idx).expect("valid index").balance_factor;
        if bf < -1 {
            let left = self.arena.get(idx).expect("valid index").left.expect("left-heavy");
            let left_bf = self.arena.get(left).expect("valid index").balance_factor;
            if left_bf > 0 {
                self.rotate_left(left);
            }
            self.rotate_right(idx)
        } else if bf > 1 {
            let right = self.arena.get(idx).expect("valid index").right.expect("right-heavy");
            let right_bf = self.arena.get(right).expect("valid index").balance_factor;
            if right_bf < 0 {
                self.rotate_right(right);
            }
            self.rotate_left(idx)
        } else {
            idx
        }
    }

    /// Recomputes height and rebalances every node from `idx` up to the
    /// root, following whichever node ends up as each level's subtree root
    /// after a rotation.
    fn rebalance_upward(&mut self, mut idx: Index) {
        loop {
            self.recompute_height(idx);
            let new_root = self.rebalance_at(idx);
            match self.arena.get(new_root).expect("valid index").parent {
                Some(parent) => idx = parent,
                None => break,
            }
        }
    }

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
    }
}

impl<K: Clone> BinaryArena<K> for AvlTree<K> {
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

impl<K: Clone> AvlTree<K> {
    /// Inserts `key`, rebalancing from the insertion point up to the root.
    /// Returns `false` without mutating the tree if an equal key is
    /// already present.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tree_collections::trees::AvlTree;
    ///
    /// let mut avl = AvlTree::new();
    /// avl.insert(10);
    /// avl.insert(5);
    /// avl.insert(15);
    /// assert_eq!(avl.get_size(), 3);
    /// assert!(avl.is_avl());
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        let Some(root) = self.root else {
            let idx = self.arena.insert(BinaryNode::leaf(key, None));
            self.root = Some(idx);
            self.size += 1;
            return true;
        };
        let mut current = root;
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
                        self.rebalance_upward(current);
                        return true;
                    }
                },
                Ordering::Greater => match self.arena.get(current).expect("valid index").right {
                    Some(right) => current = right,
                    None => {
                        let idx = self.arena.insert(BinaryNode::leaf(key, Some(current)));
                        self.arena.get_mut(current).expect("valid index").right = Some(idx);
                        self.size += 1;
                        self.rebalance_upward(current);
                        return true;
                    }
                },
            }
        }
    }

    /// Removes the node holding `key`, rebalancing from the point of
    /// structural change up to the root. Returns `false` if `key` was
    /// absent.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tree_collections::trees::AvlTree;
    ///
    /// let mut avl = AvlTree::new();
    /// avl.insert(5);
    /// avl.insert(3);
    /// avl.insert(7);
    ///
    /// assert!(avl.delete(&5));
    /// assert!(!avl.contains(&5));
    /// assert!(avl.is_avl());
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
        let parent = self.arena.get(idx).expect("valid index").parent;
        self.transplant(idx, child);
        self.arena.remove(idx);
        if let Some(p) = parent {
            self.rebalance_upward(p);
        }
    }

    pub fn search(&self, key: &K) -> bool {
        query::find_index(self, key).is_some()
    }

    /// Alias of [`Self::search`].
    ///
    /// # Example
    ///
    /// ```rust
    /// use tree_collections::trees::AvlTree;
    ///
    /// let mut avl = AvlTree::new();
    /// avl.insert(5);
    /// assert!(avl.contains(&5));
    /// assert!(!avl.contains(&10));
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

    pub fn successor(&self, key: &K) -> Result<Option<K>, TreeError> {
        query::successor(self, key)
    }

    pub fn predecessor(&self, key: &K) -> Result<Option<K>, TreeError> {
        query::predecessor(self, key)
    }

    pub fn floor(&self, key: &K) -> Option<K> {
        query::floor(self, key)
    }

    pub fn ceiling(&self, key: &K) -> Option<K> {
        query::ceiling(self, key)
    }

    pub fn range_query(&self, lo: &K, hi: &K) -> Vec<K> {
        query::range_query(self, lo, hi)
    }

    pub fn count_range(&self, lo: &K, hi: &K) -> usize {
        query::count_range(self, lo, hi)
    }

    pub fn kth_smallest(&self, k: usize) -> Option<K> {
        query::kth_smallest(self, k)
    }

    pub fn kth_largest(&self, k: usize) -> Option<K> {
        query::kth_largest(self, k)
    }

    pub fn preorder(&self) -> Vec<K> {
        traversal::traverse(self, Strategy::Preorder)
    }

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

    /// The `balance_factor` of a given key's node, if present.
    pub fn balance_factor_of(&self, key: &K) -> Option<i32> {
        query::find_index(self, key).map(|idx| self.arena.get(idx).unwrap().balance_factor)
    }

    /// `is_valid_bst` plus `|balance_factor(x)| <= 1` for every node `x`.
    pub fn is_avl(&self) -> bool {
        self.is_valid()
    }

    /// Walks the tree verifying in-order monotonicity, size consistency,
    /// height-cache consistency, balance-factor bound, and parent-pointer
    /// coherence.
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
        if node.balance_factor != right_h - left_h {
            return false;
        }
        if node.balance_factor < -1 || node.balance_factor > 1 {
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

    /// Rebuilds the minimal-height AVL containing the same multiset of
    /// keys, using median-as-root divide-and-conquer over the current
    /// in-order traversal.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tree_collections::trees::AvlTree;
    ///
    /// let mut avl = AvlTree::new();
    /// for key in 1..=7 {
    ///     avl.insert(key);
    /// }
    /// avl.balance_tree();
    /// assert!(avl.is_avl());
    /// assert_eq!(avl.inorder(), (1..=7).collect::<Vec<_>>());
    /// ```
    pub fn balance_tree(&mut self) {
        let values = self.inorder();
        self.arena.clear();
        self.size = values.len();
        self.root = self.build_balanced(&values, None);
    }

    fn build_balanced(&mut self, values: &[K], parent: Option<Index>) -> Option<Index> {
        if values.is_empty() {
            return None;
        }
        let mid = values.len() / 2;
        let idx = self.arena.insert(BinaryNode::leaf(values[mid].clone(), parent));
        let left = self.build_balanced(&values[..mid], Some(idx));
        let right = self.build_balanced(&values[mid + 1..], Some(idx));
        self.arena.get_mut(idx).expect("valid index").left = left;
        self.arena.get_mut(idx).expect("valid index").right = right;
        self.recompute_height(idx);
        Some(idx)
    }

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

    fn min_avl_height(n: usize) -> i32 {
        if n == 0 {
            return -1;
        }
        ((n as f64 + 1.0).log2().floor() as i32) - 1
    }

    fn max_avl_height(n: usize) -> i32 {
        if n == 0 {
            return -1;
        }
        ((1.44 * (n as f64 + 2.0).log2()).floor() as i32) - 1
    }

    mod rotations {
        use super::*;

        #[test]
        fn scenario_s1_left_left_triggers_single_right_rotation() {
            let mut tree = AvlTree::new();
            for k in [30, 20, 10] {
                tree.insert(k);
            }
            assert_eq!(tree.get_min(), Some(10));
            assert_eq!(tree.get_max(), Some(30));
            assert_eq!(tree.inorder(), alloc::vec![10, 20, 30]);
            assert_eq!(tree.balance_factor_of(&20), Some(0));
            assert_eq!(tree.get_height(), 1);
            assert!(tree.is_avl());
        }

        #[test]
        fn scenario_s2_right_left_triggers_double_rotation() {
            let mut tree = AvlTree::new();
            for k in [30, 10, 20] {
                tree.insert(k);
            }
            assert_eq!(tree.inorder(), alloc::vec![10, 20, 30]);
            assert_eq!(tree.balance_factor_of(&10), Some(0));
            assert_eq!(tree.balance_factor_of(&20), Some(0));
            assert_eq!(tree.balance_factor_of(&30), Some(0));
            assert!(tree.is_avl());
        }

        #[test]
        fn right_right_triggers_single_left_rotation() {
            let mut tree = AvlTree::new();
            for k in [10, 20, 30] {
                tree.insert(k);
            }
            assert_eq!(tree.inorder(), alloc::vec![10, 20, 30]);
            assert!(tree.is_avl());
        }

        #[test]
        fn left_right_triggers_double_rotation() {
            let mut tree = AvlTree::new();
            for k in [10, 30, 20] {
                tree.insert(k);
            }
            assert_eq!(tree.inorder(), alloc::vec![10, 20, 30]);
            assert!(tree.is_avl());
        }
    }

    mod height_bounds {
        use super::*;

        #[test]
        fn scenario_s6_ascending_insert_stays_within_bound() {
            let mut tree = AvlTree::new();
            for k in 1..=15 {
                tree.insert(k);
            }
            assert_eq!(tree.get_size(), 15);
            assert!(tree.get_height() <= 4);
            assert_eq!(tree.inorder(), (1..=15).collect::<Vec<_>>());
            assert!(tree.is_avl());
        }

        #[test]
        fn bound_holds_for_many_sizes() {
            let mut tree = AvlTree::new();
            for n in 1..=200 {
                tree.insert(n);
                let h = tree.get_height();
                assert!(h >= min_avl_height(n as usize));
                assert!(h <= max_avl_height(n as usize));
            }
        }
    }

    mod delete {
        use super::*;

        #[test]
        fn stays_balanced_after_many_deletes() {
            let mut tree = AvlTree::new();
            for k in 1..=31 {
                tree.insert(k);
            }
            for k in (1..=31).step_by(2) {
                assert!(tree.delete(&k));
                assert!(tree.is_avl());
            }
            assert_eq!(tree.get_size(), 15);
        }

        #[test]
        fn double_delete_is_idempotent() {
            let mut tree = AvlTree::new();
            tree.insert(5);
            assert!(tree.delete(&5));
            assert!(!tree.delete(&5));
        }
    }

    mod balance_tree {
        use super::*;

        #[test]
        fn rebuild_from_skewed_tree_is_balanced() {
            let mut tree = AvlTree::with_comparator(|a: &i32, b: &i32| a.cmp(b));
            // Import a deliberately unbalanced (but structurally valid) chain.
            for k in 1..=7 {
                tree.insert(k);
            }
            tree.balance_tree();
            assert!(tree.is_avl());
            assert_eq!(tree.inorder(), alloc::vec![1, 2, 3, 4, 5, 6, 7]);
            assert_eq!(tree.get_height(), 2);
        }
    }

    mod round_trip {
        use super::*;

        #[test]
        fn export_then_import_is_structurally_identical() {
            let mut tree = AvlTree::new();
            for k in [5, 3, 8, 1, 4, 7, 9, 2, 6] {
                tree.insert(k);
            }
            let exported = tree.export();
            let imported =
                AvlTree::import(exported.clone(), |a: &i32, b: &i32| a.cmp(b)).expect("valid record");
            assert_eq!(imported.export(), exported);
            assert!(imported.is_avl());
        }
    }

    mod queries {
        use super::*;

        #[test]
        fn floor_and_ceiling_of_present_key() {
            let mut tree = AvlTree::new();
            for k in [10, 5, 15] {
                tree.insert(k);
            }
            assert_eq!(tree.floor(&10), Some(10));
            assert_eq!(tree.ceiling(&10), Some(10));
        }

        #[test]
        fn range_query_respects_bounds() {
            let mut tree = AvlTree::new();
            for k in 1..=10 {
                tree.insert(k);
            }
            assert_eq!(tree.range_query(&3, &7), alloc::vec![3, 4, 5, 6, 7]);
        }
    }

    mod traversal {
        use super::*;

        fn sample() -> AvlTree<i32> {
            let mut tree = AvlTree::new();
            for k in [5, 3, 8, 1, 4, 7, 9] {
                tree.insert(k);
            }
            tree
        }

        #[test]
        fn right_to_left_mirrors_inorder() {
            let tree = sample();
            let mut mirrored = tree.inorder();
            mirrored.reverse();
            assert_eq!(
                crate::trees::traversal::traverse_right_to_left(&tree, Strategy::Inorder),
                mirrored
            );
        }

        #[test]
        fn depth_limited_stops_at_given_depth() {
            let tree = sample();
            assert_eq!(
                crate::trees::traversal::traverse_depth_limited(&tree, Strategy::Preorder, 0),
                alloc::vec![5]
            );
            assert_eq!(
                crate::trees::traversal::traverse_depth_limited(&tree, Strategy::Preorder, 1),
                alloc::vec![5, 3, 8]
            );
        }

        #[test]
        fn reverse_is_traverse_reversed() {
            let tree = sample();
            let mut expected = tree.inorder();
            expected.reverse();
            assert_eq!(
                crate::trees::traversal::traverse_reverse(&tree, Strategy::Inorder),
                expected
            );
        }

        #[test]
        fn count_limited_takes_a_prefix() {
            let tree = sample();
            assert_eq!(
                crate::trees::traversal::traverse_count_limited(&tree, Strategy::Inorder, 3),
                alloc::vec![1, 3, 4]
            );
            assert_eq!(
                crate::trees::traversal::traverse_count_limited(&tree, Strategy::Inorder, 100),
                tree.inorder()
            );
        }

        #[test]
        fn with_condition_filters_the_traversal() {
            let tree = sample();
            let evens =
                crate::trees::traversal::traverse_with_condition(&tree, Strategy::Inorder, |k| k % 2 == 0);
            assert_eq!(evens, alloc::vec![4, 8]);
        }

        #[test]
        fn with_callback_visits_every_value_in_order() {
            let tree = sample();
            let mut visited = Vec::new();
            crate::trees::traversal::traverse_with_callback(&tree, Strategy::Inorder, |k| visited.push(*k));
            assert_eq!(visited, tree.inorder());
        }

        #[test]
        fn stats_reports_shape_and_validity() {
            let tree = sample();
            let stats = crate::trees::traversal::stats(&tree);
            assert_eq!(stats.node_count, tree.get_size());
            assert_eq!(stats.height, tree.get_height());
            assert!(stats.is_valid);
            assert_eq!(stats.leaf_count + stats.internal_count, stats.node_count);

            let empty: AvlTree<i32> = AvlTree::new();
            let empty_stats = crate::trees::traversal::stats(&empty);
            assert_eq!(empty_stats.node_count, 0);
            assert_eq!(empty_stats.height, -1);
        }
    }

    mod edge_cases {
        use super::*;

        #[test]
        fn empty_tree_is_trivially_avl() {
            let tree: AvlTree<i32> = AvlTree::new();
            assert!(tree.is_avl());
            assert_eq!(tree.get_height(), -1);
        }

        #[test]
        fn rejects_duplicate_insert() {
            let mut tree = AvlTree::new();
            assert!(tree.insert(1));
            assert!(!tree.insert(1));
            assert_eq!(tree.get_size(), 1);
        }
    }
}
