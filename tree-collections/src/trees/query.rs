//! Ordered-key query algebra shared by the BST and AVL engines.
//!
//! Every function here is generic over [`BinaryArena`] and routes
//! comparisons exclusively through `arena.compare`, never `==`/`<` on `K`
//! directly, so a reversed or domain-specific comparator changes the
//! answers these functions give without any code here changing.

use alloc::vec::Vec;
use core::cmp::Ordering;

use tree_core::TreeError;

use super::arena::Index;
use super::node::BinaryArena;

/// Descends from the root comparing against `key`, returning the index of
/// the node holding it, if any.
pub fn find_index<K, A: BinaryArena<K> + ?Sized>(arena: &A, key: &K) -> Option<Index> {
    let mut current = arena.root();
    while let Some(idx) = current {
        match arena.compare(key, arena.value(idx)) {
            Ordering::Equal => return Some(idx),
            Ordering::Less => current = arena.left(idx),
            Ordering::Greater => current = arena.right(idx),
        }
    }
    None
}

/// Leftmost descendant of the subtree rooted at `start`.
pub fn min_index<K, A: BinaryArena<K> + ?Sized>(arena: &A, start: Index) -> Index {
    let mut current = start;
    while let Some(left) = arena.left(current) {
        current = left;
    }
    current
}

/// Rightmost descendant of the subtree rooted at `start`.
pub fn max_index<K, A: BinaryArena<K> + ?Sized>(arena: &A, start: Index) -> Index {
    let mut current = start;
    while let Some(right) = arena.right(current) {
        current = right;
    }
    current
}

/// In-order successor of the node at `idx`, if one exists.
pub fn successor_index<K, A: BinaryArena<K> + ?Sized>(arena: &A, idx: Index) -> Option<Index> {
    if let Some(right) = arena.right(idx) {
        return Some(min_index(arena, right));
    }
    let mut child = idx;
    let mut parent = arena.parent(idx);
    while let Some(p) = parent {
        if arena.right(p) != Some(child) {
            return Some(p);
        }
        child = p;
        parent = arena.parent(p);
    }
    None
}

/// In-order predecessor of the node at `idx`, if one exists.
pub fn predecessor_index<K, A: BinaryArena<K> + ?Sized>(arena: &A, idx: Index) -> Option<Index> {
    if let Some(left) = arena.left(idx) {
        return Some(max_index(arena, left));
    }
    let mut child = idx;
    let mut parent = arena.parent(idx);
    while let Some(p) = parent {
        if arena.left(p) != Some(child) {
            return Some(p);
        }
        child = p;
        parent = arena.parent(p);
    }
    None
}

/// Smallest key strictly greater than `key`. Errors with `ValueNotFound` if
/// `key` itself is absent from the tree.
pub fn successor<K: Clone, A: BinaryArena<K> + ?Sized>(
    arena: &A,
    key: &K,
) -> Result<Option<K>, TreeError> {
    let idx = find_index(arena, key).ok_or(TreeError::ValueNotFound)?;
    Ok(successor_index(arena, idx).map(|i| arena.value(i).clone()))
}

/// Largest key strictly less than `key`. Errors with `ValueNotFound` if
/// `key` itself is absent from the tree.
pub fn predecessor<K: Clone, A: BinaryArena<K> + ?Sized>(
    arena: &A,
    key: &K,
) -> Result<Option<K>, TreeError> {
    let idx = find_index(arena, key).ok_or(TreeError::ValueNotFound)?;
    Ok(predecessor_index(arena, idx).map(|i| arena.value(i).clone()))
}

/// Greatest key `<= key`, or `None` if every key in the tree exceeds it.
pub fn floor<K: Clone, A: BinaryArena<K> + ?Sized>(arena: &A, key: &K) -> Option<K> {
    let mut current = arena.root();
    let mut best: Option<Index> = None;
    while let Some(idx) = current {
        match arena.compare(arena.value(idx), key) {
            Ordering::Equal => return Some(arena.value(idx).clone()),
            Ordering::Less => {
                best = Some(idx);
                current = arena.right(idx);
            }
            Ordering::Greater => current = arena.left(idx),
        }
    }
    best.map(|idx| arena.value(idx).clone())
}

/// Least key `>= key`, or `None` if every key in the tree is smaller.
pub fn ceiling<K: Clone, A: BinaryArena<K> + ?Sized>(arena: &A, key: &K) -> Option<K> {
    let mut current = arena.root();
    let mut best: Option<Index> = None;
    while let Some(idx) = current {
        match arena.compare(arena.value(idx), key) {
            Ordering::Equal => return Some(arena.value(idx).clone()),
            Ordering::Greater => {
                best = Some(idx);
                current = arena.left(idx);
            }
            Ordering::Less => current = arena.right(idx),
        }
    }
    best.map(|idx| arena.value(idx).clone())
}

fn inorder_collect<K: Clone, A: BinaryArena<K> + ?Sized>(
    arena: &A,
    idx: Option<Index>,
    out: &mut Vec<K>,
) {
    let Some(idx) = idx else { return };
    inorder_collect(arena, arena.left(idx), out);
    out.push(arena.value(idx).clone());
    inorder_collect(arena, arena.right(idx), out);
}

/// Keys `k` with `lo <= k <= hi` per the tree's comparator, in ascending
/// order. Empty if `lo > hi`.
pub fn range_query<K: Clone, A: BinaryArena<K> + ?Sized>(arena: &A, lo: &K, hi: &K) -> Vec<K> {
    if arena.compare(lo, hi) == Ordering::Greater {
        return Vec::new();
    }
    let mut out = Vec::new();
    range_collect(arena, arena.root(), lo, hi, &mut out);
    out
}

fn range_collect<K: Clone, A: BinaryArena<K> + ?Sized>(
    arena: &A,
    idx: Option<Index>,
    lo: &K,
    hi: &K,
    out: &mut Vec<K>,
) {
    let Some(idx) = idx else { return };
    let value = arena.value(idx);
    if arena.compare(value, lo) == Ordering::Greater {
        range_collect(arena, arena.left(idx), lo, hi, out);
    }
    if arena.compare(value, lo) != Ordering::Less && arena.compare(value, hi) != Ordering::Greater
    {
        out.push(value.clone());
    }
    if arena.compare(value, hi) == Ordering::Less {
        range_collect(arena, arena.right(idx), lo, hi, out);
    }
}

/// Cardinality of [`range_query`] without materializing the list.
pub fn count_range<K: Clone, A: BinaryArena<K> + ?Sized>(arena: &A, lo: &K, hi: &K) -> usize {
    range_query(arena, lo, hi).len()
}

fn subtree_size<K, A: BinaryArena<K> + ?Sized>(arena: &A, idx: Option<Index>) -> usize {
    match idx {
        None => 0,
        Some(idx) => {
            1 + subtree_size(arena, arena.left(idx)) + subtree_size(arena, arena.right(idx))
        }
    }
}

/// The `k`-th smallest key, 1-indexed. `None` if `k` is out of range.
pub fn kth_smallest<K: Clone, A: BinaryArena<K> + ?Sized>(arena: &A, k: usize) -> Option<K> {
    if k == 0 {
        return None;
    }
    let mut remaining = k;
    let mut current = arena.root();
    while let Some(idx) = current {
        let left_size = subtree_size(arena, arena.left(idx));
        match remaining.cmp(&(left_size + 1)) {
            Ordering::Equal => return Some(arena.value(idx).clone()),
            Ordering::Less => current = arena.left(idx),
            Ordering::Greater => {
                remaining -= left_size + 1;
                current = arena.right(idx);
            }
        }
    }
    None
}

/// The `k`-th largest key, 1-indexed. `None` if `k` is out of range.
pub fn kth_largest<K: Clone, A: BinaryArena<K> + ?Sized>(arena: &A, k: usize) -> Option<K> {
    let total = subtree_size(arena, arena.root());
    if k == 0 || k > total {
        return None;
    }
    kth_smallest(arena, total - k + 1)
}

pub(crate) fn materialize_inorder<K: Clone, A: BinaryArena<K> + ?Sized>(arena: &A) -> Vec<K> {
    let mut out = Vec::new();
    inorder_collect(arena, arena.root(), &mut out);
    out
}
