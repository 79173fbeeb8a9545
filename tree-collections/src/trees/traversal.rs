//! Traversal strategies shared by the BST and AVL engines.
//!
//! Four strategies — preorder, inorder, postorder, level-order — each
//! available materialized ([`traverse`]) and lazy ([`preorder_lazy`] and
//! friends, which hold an explicit stack/queue and yield one value per
//! `next()` call rather than building the full list up front).

use alloc::collections::VecDeque;
use alloc::vec::Vec;
use core::marker::PhantomData;

use super::arena::Index;
use super::node::BinaryArena;

/// Which of the four traversal orders to apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    Preorder,
    Inorder,
    Postorder,
    LevelOrder,
}

fn collect_recursive<K, A: BinaryArena<K> + ?Sized>(
    arena: &A,
    idx: Option<Index>,
    strategy: Strategy,
    mirror: bool,
    depth: usize,
    max_depth: Option<usize>,
    out: &mut Vec<Index>,
) {
    let Some(idx) = idx else { return };
    if let Some(max) = max_depth {
        if depth > max {
            return;
        }
    }
    let (first, second) = if mirror {
        (arena.right(idx), arena.left(idx))
    } else {
        (arena.left(idx), arena.right(idx))
    };
    match strategy {
        Strategy::Preorder => {
            out.push(idx);
            collect_recursive(arena, first, strategy, mirror, depth + 1, max_depth, out);
            collect_recursive(arena, second, strategy, mirror, depth + 1, max_depth, out);
        }
        Strategy::Inorder => {
            collect_recursive(arena, first, strategy, mirror, depth + 1, max_depth, out);
            out.push(idx);
            collect_recursive(arena, second, strategy, mirror, depth + 1, max_depth, out);
        }
        Strategy::Postorder => {
            collect_recursive(arena, first, strategy, mirror, depth + 1, max_depth, out);
            collect_recursive(arena, second, strategy, mirror, depth + 1, max_depth, out);
            out.push(idx);
        }
        Strategy::LevelOrder => unreachable!("level-order uses collect_level_order"),
    }
}

fn collect_level_order<K, A: BinaryArena<K> + ?Sized>(
    arena: &A,
    mirror: bool,
    max_depth: Option<usize>,
    out: &mut Vec<Index>,
) {
    let mut queue: VecDeque<(Index, usize)> = VecDeque::new();
    if let Some(root) = arena.root() {
        queue.push_back((root, 0));
    }
    while let Some((idx, depth)) = queue.pop_front() {
        if let Some(max) = max_depth {
            if depth > max {
                continue;
            }
        }
        out.push(idx);
        let (first, second) = if mirror {
            (arena.right(idx), arena.left(idx))
        } else {
            (arena.left(idx), arena.right(idx))
        };
        if let Some(f) = first {
            queue.push_back((f, depth + 1));
        }
        if let Some(s) = second {
            queue.push_back((s, depth + 1));
        }
    }
}

fn indices<K, A: BinaryArena<K> + ?Sized>(
    arena: &A,
    strategy: Strategy,
    mirror: bool,
    max_depth: Option<usize>,
) -> Vec<Index> {
    let mut out = Vec::new();
    match strategy {
        Strategy::LevelOrder => collect_level_order(arena, mirror, max_depth, &mut out),
        _ => collect_recursive(arena, arena.root(), strategy, mirror, 0, max_depth, &mut out),
    }
    out
}

/// Materialized traversal in the given `strategy`'s order.
pub fn traverse<K: Clone, A: BinaryArena<K> + ?Sized>(arena: &A, strategy: Strategy) -> Vec<K> {
    indices(arena, strategy, false, None)
        .into_iter()
        .map(|i| arena.value(i).clone())
        .collect()
}

/// Mirror of [`traverse`]: visits each node's right child before its left.
pub fn traverse_right_to_left<K: Clone, A: BinaryArena<K> + ?Sized>(
    arena: &A,
    strategy: Strategy,
) -> Vec<K> {
    indices(arena, strategy, true, None)
        .into_iter()
        .map(|i| arena.value(i).clone())
        .collect()
}

/// Traversal restricted to nodes at depth `<= max_depth` (root is depth 0).
pub fn traverse_depth_limited<K: Clone, A: BinaryArena<K> + ?Sized>(
    arena: &A,
    strategy: Strategy,
    max_depth: usize,
) -> Vec<K> {
    indices(arena, strategy, false, Some(max_depth))
        .into_iter()
        .map(|i| arena.value(i).clone())
        .collect()
}

/// The reverse of [`traverse`].
pub fn traverse_reverse<K: Clone, A: BinaryArena<K> + ?Sized>(
    arena: &A,
    strategy: Strategy,
) -> Vec<K> {
    let mut out = traverse(arena, strategy);
    out.reverse();
    out
}

/// The first `n` values of [`traverse`].
pub fn traverse_count_limited<K: Clone, A: BinaryArena<K> + ?Sized>(
    arena: &A,
    strategy: Strategy,
    n: usize,
) -> Vec<K> {
    indices(arena, strategy, false, None)
        .into_iter()
        .take(n)
        .map(|i| arena.value(i).clone())
        .collect()
}

/// Values from [`traverse`] satisfying `predicate`.
pub fn traverse_with_condition<K: Clone, A: BinaryArena<K> + ?Sized>(
    arena: &A,
    strategy: Strategy,
    predicate: impl Fn(&K) -> bool,
) -> Vec<K> {
    indices(arena, strategy, false, None)
        .into_iter()
        .map(|i| arena.value(i).clone())
        .filter(predicate)
        .collect()
}

/// Invokes `visitor` for each value in [`traverse`] order without
/// materializing the output list.
pub fn traverse_with_callback<K, A: BinaryArena<K> + ?Sized>(
    arena: &A,
    strategy: Strategy,
    mut visitor: impl FnMut(&K),
) {
    for idx in indices(arena, strategy, false, None) {
        visitor(arena.value(idx));
    }
}

/// Preorder: node, left, right. Yields one value per `next()` call.
pub struct PreorderIter<'a, K, A: ?Sized> {
    arena: &'a A,
    stack: Vec<Index>,
    _marker: PhantomData<K>,
}

pub fn preorder_lazy<'a, K, A: BinaryArena<K> + ?Sized>(arena: &'a A) -> PreorderIter<'a, K, A> {
    let mut stack = Vec::new();
    if let Some(root) = arena.root() {
        stack.push(root);
    }
    PreorderIter {
        arena,
        stack,
        _marker: PhantomData,
    }
}

impl<'a, K: Clone, A: BinaryArena<K> + ?Sized> Iterator for PreorderIter<'a, K, A> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        let idx = self.stack.pop()?;
        if let Some(right) = self.arena.right(idx) {
            self.stack.push(right);
        }
        if let Some(left) = self.arena.left(idx) {
            self.stack.push(left);
        }
        Some(self.arena.value(idx).clone())
    }
}

/// Inorder: left, node, right. Yields one value per `next()` call.
pub struct InorderIter<'a, K, A: ?Sized> {
    arena: &'a A,
    stack: Vec<Index>,
    current: Option<Index>,
    _marker: PhantomData<K>,
}

pub fn inorder_lazy<'a, K, A: BinaryArena<K> + ?Sized>(arena: &'a A) -> InorderIter<'a, K, A> {
    InorderIter {
        arena,
        stack: Vec::new(),
        current: arena.root(),
        _marker: PhantomData,
    }
}

impl<'a, K: Clone, A: BinaryArena<K> + ?Sized> Iterator for InorderIter<'a, K, A> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        while let Some(idx) = self.current {
            self.stack.push(idx);
            self.current = self.arena.left(idx);
        }
        let idx = self.stack.pop()?;
        self.current = self.arena.right(idx);
        Some(self.arena.value(idx).clone())
    }
}

/// Postorder: left, right, node. Yields one value per `next()` call.
pub struct PostorderIter<'a, K, A: ?Sized> {
    arena: &'a A,
    stack: Vec<Index>,
    current: Option<Index>,
    last_visited: Option<Index>,
    _marker: PhantomData<K>,
}

pub fn postorder_lazy<'a, K, A: BinaryArena<K> + ?Sized>(arena: &'a A) -> PostorderIter<'a, K, A> {
    PostorderIter {
        arena,
        stack: Vec::new(),
        current: arena.root(),
        last_visited: None,
        _marker: PhantomData,
    }
}

impl<'a, K: Clone, A: BinaryArena<K> + ?Sized> Iterator for PostorderIter<'a, K, A> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        loop {
            if let Some(idx) = self.current {
                self.stack.push(idx);
                self.current = self.arena.left(idx);
                continue;
            }
            let top = *self.stack.last()?;
            let right = self.arena.right(top);
            if right.is_some() && right != self.last_visited {
                self.current = right;
            } else {
                self.stack.pop();
                self.last_visited = Some(top);
                return Some(self.arena.value(top).clone());
            }
        }
    }
}

/// Level-order (breadth-first). Yields one value per `next()` call.
pub struct LevelOrderIter<'a, K, A: ?Sized> {
    arena: &'a A,
    queue: VecDeque<Index>,
    _marker: PhantomData<K>,
}

pub fn level_order_lazy<'a, K, A: BinaryArena<K> + ?Sized>(
    arena: &'a A,
) -> LevelOrderIter<'a, K, A> {
    let mut queue = VecDeque::new();
    if let Some(root) = arena.root() {
        queue.push_back(root);
    }
    LevelOrderIter {
        arena,
        queue,
        _marker: PhantomData,
    }
}

impl<'a, K: Clone, A: BinaryArena<K> + ?Sized> Iterator for LevelOrderIter<'a, K, A> {
    type Item = K;

    fn next(&mut self) -> Option<K> {
        let idx = self.queue.pop_front()?;
        if let Some(left) = self.arena.left(idx) {
            self.queue.push_back(left);
        }
        if let Some(right) = self.arena.right(idx) {
            self.queue.push_back(right);
        }
        Some(self.arena.value(idx).clone())
    }
}

/// Strategy-independent summary of a binary tree's shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TreeStats {
    pub node_count: usize,
    pub height: i32,
    pub leaf_count: usize,
    pub internal_count: usize,
    pub is_valid: bool,
}

fn height_of<K, A: BinaryArena<K> + ?Sized>(arena: &A, idx: Option<Index>) -> i32 {
    match idx {
        None => -1,
        Some(idx) => {
            1 + core::cmp::max(
                height_of(arena, arena.left(idx)),
                height_of(arena, arena.right(idx)),
            )
        }
    }
}

/// Computes [`TreeStats`] for the tree rooted at `arena.root()`. `is_valid`
/// reflects in-order monotonicity only; engines layer parent-pointer and
/// height-cache checks on top in their own `is_valid`.
pub fn stats<K, A: BinaryArena<K> + ?Sized>(arena: &A) -> TreeStats {
    let ordered = indices(arena, Strategy::Inorder, false, None);
    let mut internal_count = 0;
    let mut leaf_count = 0;
    for &idx in &ordered {
        if arena.left(idx).is_none() && arena.right(idx).is_none() {
            leaf_count += 1;
        } else {
            internal_count += 1;
        }
    }
    let is_valid = ordered
        .windows(2)
        .all(|pair| arena.compare(arena.value(pair[0]), arena.value(pair[1])) == core::cmp::Ordering::Less);
    TreeStats {
        node_count: ordered.len(),
        height: height_of(arena, arena.root()),
        leaf_count,
        internal_count,
        is_valid,
    }
}
