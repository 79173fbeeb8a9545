//! # B-Tree
//!
//! A self-balancing multi-way search tree. Every node holds between
//! `order - 1` and `2 * order - 1` keys (the root is exempt from the lower
//! bound), internal nodes have exactly `keys.len() + 1` children, and every
//! leaf sits at the same depth.
//!
//! Insertion splits a full node proactively on the way down, so a single
//! top-down pass never needs to backtrack. Deletion is the mirror image:
//! before descending into a child holding exactly the minimum number of
//! keys, it is topped up by borrowing a key from a sibling with a surplus,
//! or merged with a sibling if neither has one to spare.
//!
//! ## Complexity
//!
//! | Operation | Time      |
//! |-----------|-----------|
//! | Search    | O(log n)  |
//! | Insert    | O(log n)  |
//! | Delete    | O(log n)  |
//! | Range     | O(log n + k) |
//!
//! ## Example
//!
//! ```rust
//! use tree_collections::trees::BTree;
//!
//! let mut tree = BTree::new(3).unwrap();
//! tree.insert(10);
//! tree.insert(20);
//! tree.insert(5);
//!
//! assert!(tree.contains(&10));
//! assert_eq!(tree.len(), 3);
//! ```

use alloc::vec::Vec;
use core::cmp::Ordering;

use tree_core::TreeError;

use super::arena::{Arena, Index};
use super::node::{BTreeNode, ExportedBTreeNode};

/// A B-tree of the given `order` (the textbook "minimum degree" `t`):
/// non-root nodes hold `order - 1 ..= 2 * order - 1` keys.
pub struct BTree<K> {
    arena: Arena<BTreeNode<K>>,
    root: Option<Index>,
    order: usize,
    size: usize,
    comparator: alloc::boxed::Box<dyn Fn(&K, &K) -> Ordering>,
}

impl<K: core::fmt::Debug> core::fmt::Debug for BTree<K> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("BTree")
            .field("arena", &self.arena)
            .field("root", &self.root)
            .field("order", &self.order)
            .field("size", &self.size)
            .finish()
    }
}

impl<K: Ord> BTree<K> {
    /// Creates an empty tree of the given `order`. `order` must be `>= 2`;
    /// a smaller value can't satisfy the non-root minimum-keys invariant.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tree_collections::trees::BTree;
    ///
    /// let tree: BTree<i32> = BTree::new(3).unwrap();
    /// assert!(tree.is_empty());
    /// assert!(BTree::<i32>::new(1).is_err());
    /// ```
    pub fn new(order: usize) -> Result<Self, TreeError> {
        Self::with_comparator(order, |a, b| a.cmp(b))
    }
}

impl<K> BTree<K> {
    pub fn with_comparator(
        order: usize,
        comparator: impl Fn(&K, &K) -> Ordering + 'static,
    ) -> Result<Self, TreeError> {
        if order < 2 {
            return Err(TreeError::InvalidOrder { order });
        }
        Ok(BTree {
            arena: Arena::new(),
            root: None,
            order,
            size: 0,
            comparator: alloc::boxed::Box::new(comparator),
        })
    }

    fn max_keys(&self) -> usize {
        2 * self.order - 1
    }

    fn min_keys(&self) -> usize {
        self.order - 1
    }

    pub fn order(&self) -> usize {
        self.order
    }

    pub fn len(&self) -> usize {
        self.size
    }

    pub fn is_empty(&self) -> bool {
        self.size == 0
    }

    pub fn clear(&mut self) {
        self.arena.clear();
        self.root = None;
        self.size = 0;
    }

    /// Position of the first key `>= key` within `keys`, found by binary
    /// search. Doubles as an exact-match check when the returned index is
    /// in bounds and compares equal.
    fn lower_bound(&self, keys: &[K], key: &K) -> usize {
        let mut lo = 0;
        let mut hi = keys.len();
        while lo < hi {
            let mid = (lo + hi) / 2;
            if (self.comparator)(&keys[mid], key) == Ordering::Less {
                lo = mid + 1;
            } else {
                hi = mid;
            }
        }
        lo
    }
}

impl<K: Clone> BTree<K> {
    fn find(&self, key: &K) -> Option<(Index, usize)> {
        let mut current = self.root;
        while let Some(idx) = current {
            let node = self.arena.get(idx).expect("valid index");
            let pos = self.lower_bound(&node.keys, key);
            if pos < node.keys.len() && (self.comparator)(&node.keys[pos], key) == Ordering::Equal
            {
                return Some((idx, pos));
            }
            if node.is_leaf {
                return None;
            }
            current = Some(node.children[pos]);
        }
        None
    }

    /// # Example
    ///
    /// ```rust
    /// use tree_collections::trees::BTree;
    ///
    /// let mut tree = BTree::new(3).unwrap();
    /// tree.insert(10);
    /// assert!(tree.contains(&10));
    /// assert!(!tree.contains(&20));
    /// ```
    pub fn contains(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    pub fn search(&self, key: &K) -> Option<K> {
        self.find(key)
            .map(|(idx, pos)| self.arena.get(idx).expect("valid index").keys[pos].clone())
    }

    pub fn get_min(&self) -> Option<K> {
        let mut current = self.root?;
        loop {
            let node = self.arena.get(current).expect("valid index");
            if node.is_leaf {
                return node.keys.first().cloned();
            }
            current = node.children[0];
        }
    }

    pub fn get_max(&self) -> Option<K> {
        let mut current = self.root?;
        loop {
            let node = self.arena.get(current).expect("valid index");
            if node.is_leaf {
                return node.keys.last().cloned();
            }
            current = *node.children.last().expect("internal node has children");
        }
    }

    /// Height in edges from the root to a leaf. `-1` for an empty tree, `0`
    /// when the root is itself a leaf.
    pub fn get_height(&self) -> i32 {
        let mut height = -1;
        let mut current = self.root;
        while let Some(idx) = current {
            height += 1;
            let node = self.arena.get(idx).expect("valid index");
            current = if node.is_leaf {
                None
            } else {
                Some(node.children[0])
            };
        }
        height
    }

    pub fn get_size(&self) -> usize {
        self.size
    }

    /// Inserts `key`, splitting full nodes proactively on the way down.
    /// Returns `false` without mutating the tree if an equal key is
    /// already present.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tree_collections::trees::BTree;
    ///
    /// let mut tree = BTree::new(3).unwrap();
    /// assert!(tree.insert(5));
    /// assert!(!tree.insert(5));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn insert(&mut self, key: K) -> bool {
        if self.contains(&key) {
            return false;
        }
        let root = match self.root {
            Some(root) => root,
            None => {
                let mut node = BTreeNode::new_leaf(None);
                node.keys.push(key);
                let idx = self.arena.insert(node);
                self.root = Some(idx);
                self.size += 1;
                return true;
            }
        };

        if self.arena.get(root).expect("valid index").keys.len() == self.max_keys() {
            let mut new_root = BTreeNode::new_leaf(None);
            new_root.is_leaf = false;
            new_root.children.push(root);
            let new_root_idx = self.arena.insert(new_root);
            self.arena.get_mut(root).expect("valid index").parent = Some(new_root_idx);
            self.root = Some(new_root_idx);
            self.split_child(new_root_idx, 0);
            self.insert_non_full(new_root_idx, key);
        } else {
            self.insert_non_full(root, key);
        }
        self.size += 1;
        true
    }

    fn insert_non_full(&mut self, node_idx: Index, key: K) {
        let is_leaf = self.arena.get(node_idx).expect("valid index").is_leaf;
        if is_leaf {
            let pos = {
                let node = self.arena.get(node_idx).expect("valid index");
                self.lower_bound(&node.keys, &key)
            };
            self.arena
                .get_mut(node_idx)
                .expect("valid index")
                .keys
                .insert(pos, key);
            return;
        }

        let mut pos = {
            let node = self.arena.get(node_idx).expect("valid index");
            self.lower_bound(&node.keys, &key)
        };
        let child_idx = self.arena.get(node_idx).expect("valid index").children[pos];
        let child_full =
            self.arena.get(child_idx).expect("valid index").keys.len() == self.max_keys();
        if child_full {
            self.split_child(node_idx, pos);
            let promoted = self.arena.get(node_idx).expect("valid index").keys[pos].clone();
            if (self.comparator)(&key, &promoted) == Ordering::Greater {
                pos += 1;
            }
        }
        let next_child = self.arena.get(node_idx).expect("valid index").children[pos];
        self.insert_non_full(next_child, key);
    }

    /// Splits the full child at `parent.children[child_pos]` in two,
    /// promoting its median key into `parent`.
    fn split_child(&mut self, parent_idx: Index, child_pos: usize) {
        let child_idx = self.arena.get(parent_idx).expect("valid index").children[child_pos];
        let mid = self.order - 1;

        let (median, right_keys, right_children, is_leaf) = {
            let child = self.arena.get_mut(child_idx).expect("valid index");
            let median = child.keys[mid].clone();
            let right_keys = child.keys.split_off(mid + 1);
            child.keys.truncate(mid);
            let right_children = if child.is_leaf {
                Vec::new()
            } else {
                child.children.split_off(mid + 1)
            };
            (median, right_keys, right_children, child.is_leaf)
        };

        let right_node = BTreeNode {
            keys: right_keys,
            children: right_children,
            is_leaf,
            parent: Some(parent_idx),
        };
        let right_idx = self.arena.insert(right_node);
        if !is_leaf {
            let grandchildren = self.arena.get(right_idx).expect("valid index").children.clone();
            for c in grandchildren {
                self.arena.get_mut(c).expect("valid index").parent = Some(right_idx);
            }
        }

        let parent = self.arena.get_mut(parent_idx).expect("valid index");
        parent.keys.insert(child_pos, median);
        parent.children.insert(child_pos + 1, right_idx);
    }

    /// Removes `key` if present, rebalancing via borrow/merge on the way
    /// down so every visited node (but the root) keeps at least `order - 1`
    /// keys. Returns whether `key` was present.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tree_collections::trees::BTree;
    ///
    /// let mut tree = BTree::new(3).unwrap();
    /// for key in 1..=8 {
    ///     tree.insert(key);
    /// }
    /// assert!(tree.delete(&5));
    /// assert!(!tree.contains(&5));
    /// assert!(!tree.delete(&5));
    /// assert!(tree.is_valid());
    /// ```
    pub fn delete(&mut self, key: &K) -> bool {
        let Some(root) = self.root else {
            return false;
        };
        if !self.contains(key) {
            return false;
        }
        self.delete_key(root, key);
        self.size -= 1;

        if let Some(root) = self.root {
            let node = self.arena.get(root).expect("valid index");
            if node.is_leaf && node.keys.is_empty() {
                self.arena.remove(root);
                self.root = None;
            } else if !node.is_leaf && node.keys.is_empty() {
                let only_child = node.children[0];
                self.arena.get_mut(only_child).expect("valid index").parent = None;
                self.arena.remove(root);
                self.root = Some(only_child);
            }
        }
        true
    }

    fn delete_key(&mut self, node_idx: Index, key: &K) {
        let node = self.arena.get(node_idx).expect("valid index");
        let is_leaf = node.is_leaf;
        let pos = self.lower_bound(&node.keys, key);
        let found =
            pos < node.keys.len() && (self.comparator)(&node.keys[pos], key) == Ordering::Equal;

        if is_leaf {
            if found {
                self.arena.get_mut(node_idx).expect("valid index").keys.remove(pos);
            }
            return;
        }

        if found {
            self.delete_internal_key(node_idx, pos, key);
        } else {
            self.ensure_minimum_keys(node_idx, pos);
            // a merge above may have shifted key positions; recompute.
            let node = self.arena.get(node_idx).expect("valid index");
            let pos = self.lower_bound(&node.keys, key);
            let child = node.children[pos];
            self.delete_key(child, key);
        }
    }

    /// Deletes the key at `node.keys[pos]` of an internal node, via
    /// predecessor/successor replacement when a child has a key to spare,
    /// or by merging the two children around it otherwise.
    fn delete_internal_key(&mut self, node_idx: Index, pos: usize, key: &K) {
        let min_keys = self.min_keys();
        let left_child = self.arena.get(node_idx).expect("valid index").children[pos];
        let right_child = self.arena.get(node_idx).expect("valid index").children[pos + 1];
        let left_len = self.arena.get(left_child).expect("valid index").keys.len();
        let right_len = self.arena.get(right_child).expect("valid index").keys.len();

        if left_len > min_keys {
            let pred = self.subtree_max(left_child);
            self.arena.get_mut(node_idx).expect("valid index").keys[pos] = pred.clone();
            self.delete_key(left_child, &pred);
        } else if right_len > min_keys {
            let succ = self.subtree_min(right_child);
            self.arena.get_mut(node_idx).expect("valid index").keys[pos] = succ.clone();
            self.delete_key(right_child, &succ);
        } else {
            self.merge_children(node_idx, pos);
            let merged = self.arena.get(node_idx).expect("valid index").children[pos];
            self.delete_key(merged, key);
        }
    }

    fn subtree_max(&self, mut idx: Index) -> K {
        loop {
            let node = self.arena.get(idx).expect("valid index");
            if node.is_leaf {
                return node.keys.last().expect("non-empty node").clone();
            }
            idx = *node.children.last().expect("internal node has children");
        }
    }

    fn subtree_min(&self, mut idx: Index) -> K {
        loop {
            let node = self.arena.get(idx).expect("valid index");
            if node.is_leaf {
                return node.keys.first().expect("non-empty node").clone();
            }
            idx = node.children[0];
        }
    }

    /// Tops up `node.children[child_pos]` to more than the minimum key
    /// count, if it currently sits right at it, by borrowing from a
    /// sibling with a surplus or merging with one otherwise. No-op if the
    /// child already holds more than the minimum.
    fn ensure_minimum_keys(&mut self, node_idx: Index, child_pos: usize) {
        let min_keys = self.min_keys();
        let child_idx = self.arena.get(node_idx).expect("valid index").children[child_pos];
        if self.arena.get(child_idx).expect("valid index").keys.len() > min_keys {
            return;
        }

        let has_left = child_pos > 0;
        let has_right = child_pos + 1 < self.arena.get(node_idx).expect("valid index").children.len();

        if has_left {
            let left_sibling = self.arena.get(node_idx).expect("valid index").children[child_pos - 1];
            if self.arena.get(left_sibling).expect("valid index").keys.len() > min_keys {
                self.borrow_from_left(node_idx, child_pos);
                return;
            }
        }
        if has_right {
            let right_sibling = self.arena.get(node_idx).expect("valid index").children[child_pos + 1];
            if self.arena.get(right_sibling).expect("valid index").keys.len() > min_keys {
                self.borrow_from_right(node_idx, child_pos);
                return;
            }
        }
        if has_left {
            self.merge_children(node_idx, child_pos - 1);
        } else {
            self.merge_children(node_idx, child_pos);
        }
    }

    /// Rotates the left sibling's last key up through the separator and
    /// into the front of `node.children[child_pos]`.
    fn borrow_from_left(&mut self, node_idx: Index, child_pos: usize) {
        let child_idx = self.arena.get(node_idx).expect("valid index").children[child_pos];
        let left_idx = self.arena.get(node_idx).expect("valid index").children[child_pos - 1];
        let separator = self.arena.get(node_idx).expect("valid index").keys[child_pos - 1].clone();

        let (borrowed_key, borrowed_child) = {
            let left = self.arena.get_mut(left_idx).expect("valid index");
            let borrowed_key = left.keys.pop().expect("sibling has a surplus key");
            let borrowed_child = if left.is_leaf { None } else { left.children.pop() };
            (borrowed_key, borrowed_child)
        };

        {
            let child = self.arena.get_mut(child_idx).expect("valid index");
            child.keys.insert(0, separator);
            if let Some(bc) = borrowed_child {
                child.children.insert(0, bc);
            }
        }
        if let Some(bc) = borrowed_child {
            self.arena.get_mut(bc).expect("valid index").parent = Some(child_idx);
        }
        self.arena.get_mut(node_idx).expect("valid index").keys[child_pos - 1] = borrowed_key;
    }

    /// Rotates the right sibling's first key up through the separator and
    /// onto the back of `node.children[child_pos]`.
    fn borrow_from_right(&mut self, node_idx: Index, child_pos: usize) {
        let child_idx = self.arena.get(node_idx).expect("valid index").children[child_pos];
        let right_idx = self.arena.get(node_idx).expect("valid index").children[child_pos + 1];
        let separator = self.arena.get(node_idx).expect("valid index").keys[child_pos].clone();

        let (borrowed_key, borrowed_child) = {
            let right = self.arena.get_mut(right_idx).expect("valid index");
            let borrowed_key = right.keys.remove(0);
            let borrowed_child = if right.is_leaf {
                None
            } else {
                Some(right.children.remove(0))
            };
            (borrowed_key, borrowed_child)
        };

        {
            let child = self.arena.get_mut(child_idx).expect("valid index");
            child.keys.push(separator);
            if let Some(bc) = borrowed_child {
                child.children.push(bc);
            }
        }
        if let Some(bc) = borrowed_child {
            self.arena.get_mut(bc).expect("valid index").parent = Some(child_idx);
        }
        self.arena.get_mut(node_idx).expect("valid index").keys[child_pos] = borrowed_key;
    }

    /// Folds `node.children[left_pos + 1]` and the separator
    /// `node.keys[left_pos]` into `node.children[left_pos]`, leaving a
    /// single node of `2 * order - 1` keys.
    fn merge_children(&mut self, node_idx: Index, left_pos: usize) {
        let left_idx = self.arena.get(node_idx).expect("valid index").children[left_pos];
        let right_idx = self.arena.get(node_idx).expect("valid index").children[left_pos + 1];
        let separator = self.arena.get_mut(node_idx).expect("valid index").keys.remove(left_pos);
        self.arena.get_mut(node_idx).expect("valid index").children.remove(left_pos + 1);

        let (mut right_keys, right_children) = {
            let right = self.arena.get_mut(right_idx).expect("valid index");
            (
                core::mem::take(&mut right.keys),
                core::mem::take(&mut right.children),
            )
        };
        let reparent = right_children.clone();
        {
            let left = self.arena.get_mut(left_idx).expect("valid index");
            left.keys.push(separator);
            left.keys.append(&mut right_keys);
            left.children.extend(right_children);
        }
        for c in reparent {
            self.arena.get_mut(c).expect("valid index").parent = Some(left_idx);
        }
        self.arena.remove(right_idx);
    }

    pub fn inorder(&self) -> Vec<K> {
        let mut out = Vec::new();
        if let Some(root) = self.root {
            self.inorder_collect(root, &mut out);
        }
        out
    }

    fn inorder_collect(&self, idx: Index, out: &mut Vec<K>) {
        let node = self.arena.get(idx).expect("valid index");
        for i in 0..node.keys.len() {
            if !node.is_leaf {
                self.inorder_collect(node.children[i], out);
            }
            out.push(node.keys[i].clone());
        }
        if !node.is_leaf {
            self.inorder_collect(
                *node.children.last().expect("internal node has children"),
                out,
            );
        }
    }

    /// Keys `k` with `lo <= k <= hi`, in ascending order. Empty if
    /// `lo > hi`. Implemented as a full in-order scan with a range filter
    /// rather than a lower-bound-pruned walk.
    ///
    /// # Example
    ///
    /// ```rust
    /// use tree_collections::trees::BTree;
    ///
    /// let mut tree = BTree::new(3).unwrap();
    /// for key in [5, 1, 9, 3, 7] {
    ///     tree.insert(key);
    /// }
    /// assert_eq!(tree.range_query(&3, &7), vec![3, 5, 7]);
    /// ```
    pub fn range_query(&self, lo: &K, hi: &K) -> Vec<K> {
        if (self.comparator)(lo, hi) == Ordering::Greater {
            return Vec::new();
        }
        self.inorder()
            .into_iter()
            .filter(|k| {
                (self.comparator)(k, lo) != Ordering::Less
                    && (self.comparator)(k, hi) != Ordering::Greater
            })
            .collect()
    }

    pub fn count_range(&self, lo: &K, hi: &K) -> usize {
        self.range_query(lo, hi).len()
    }

    /// Checks every B-tree invariant: key-count bounds, sortedness within
    /// each node, children-count-equals-keys-plus-one, uniform leaf depth,
    /// correct parent pointers, and global sortedness.
    pub fn is_valid(&self) -> bool {
        let Some(root) = self.root else {
            return self.size == 0;
        };
        if self.arena.get(root).expect("valid index").parent.is_some() {
            return false;
        }
        let mut leaf_depths = Vec::new();
        let mut count = 0usize;
        if !self.validate_node(root, true, 0, &mut leaf_depths, &mut count) {
            return false;
        }
        if count != self.size {
            return false;
        }
        if let Some(&first) = leaf_depths.first() {
            if !leaf_depths.iter().all(|&d| d == first) {
                return false;
            }
        }
        self.inorder()
            .windows(2)
            .all(|w| (self.comparator)(&w[0], &w[1]) == Ordering::Less)
    }

    fn validate_node(
        &self,
        idx: Index,
        is_root: bool,
        depth: usize,
        leaf_depths: &mut Vec<usize>,
        count: &mut usize,
    ) -> bool {
        let node = self.arena.get(idx).expect("valid index");
        if node.keys.len() > self.max_keys() {
            return false;
        }
        if !is_root && node.keys.len() < self.min_keys() {
            return false;
        }
        if is_root && !node.is_leaf && node.keys.is_empty() {
            return false;
        }
        if !node
            .keys
            .windows(2)
            .all(|w| (self.comparator)(&w[0], &w[1]) == Ordering::Less)
        {
            return false;
        }
        *count += node.keys.len();
        if node.is_leaf {
            leaf_depths.push(depth);
            true
        } else {
            if node.children.len() != node.keys.len() + 1 {
                return false;
            }
            node.children.iter().all(|&c| {
                self.arena.get(c).expect("valid index").parent == Some(idx)
                    && self.validate_node(c, false, depth + 1, leaf_depths, count)
            })
        }
    }

    pub fn export(&self) -> Option<ExportedBTreeNode<K>> {
        self.root.map(|r| self.export_node(r))
    }

    fn export_node(&self, idx: Index) -> ExportedBTreeNode<K> {
        let node = self.arena.get(idx).expect("valid index");
        ExportedBTreeNode {
            keys: node.keys.clone(),
            children: node.children.iter().map(|&c| self.export_node(c)).collect(),
            is_leaf: Some(node.is_leaf),
        }
    }

    pub fn import(
        order: usize,
        comparator: impl Fn(&K, &K) -> Ordering + 'static,
        record: Option<ExportedBTreeNode<K>>,
    ) -> Result<Self, TreeError> {
        let mut tree = Self::with_comparator(order, comparator)?;
        if let Some(record) = record {
            let root = tree.import_node(record, None)?;
            tree.root = Some(root);
        }
        Ok(tree)
    }

    fn import_node(
        &mut self,
        record: ExportedBTreeNode<K>,
        parent: Option<Index>,
    ) -> Result<Index, TreeError> {
        let is_leaf = record.is_leaf.ok_or(TreeError::InvalidInput {
            message: "exported B-tree node missing is_leaf",
        })?;
        self.size += record.keys.len();
        let idx = self.arena.insert(BTreeNode {
            keys: record.keys,
            children: Vec::new(),
            is_leaf,
            parent,
        });
        let mut children = Vec::with_capacity(record.children.len());
        for child in record.children {
            children.push(self.import_node(child, Some(idx))?);
        }
        self.arena.get_mut(idx).expect("valid index").children = children;
        Ok(idx)
    }
}
