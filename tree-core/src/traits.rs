//! Generic container traits.
//!
//! `tree-collections` does not implement these against its three engines:
//! `Tree::height() -> usize` has no way to express the "-1 for empty"
//! convention the engines use throughout, and `Searchable::search() ->
//! Option<usize>` implies a positional index that an ordered tree doesn't
//! expose. The engines' shared surface is instead `trees::node::BinaryArena`
//! plus the free functions in `trees::query`/`trees::traversal`, which are
//! generic over the node shape rather than over a trait object.

/// A trait for data structures that have a length/size.
pub trait Container {
    /// Returns the number of elements in the container.
    fn len(&self) -> usize;

    /// Returns `true` if the container contains no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// A trait for data structures that support search operations.
pub trait Searchable<T> {
    /// Searches for a value and returns its index if found.
    fn search(&self, value: &T) -> Option<usize>;

    /// Returns `true` if the container contains the specified value.
    fn contains(&self, value: &T) -> bool {
        self.search(value).is_some()
    }
}

/// A trait for ordered data structures (e.g., BST, Heap).
pub trait Ordered<T: Ord>: Container {
    /// Returns a reference to the minimum element.
    fn min(&self) -> Option<&T>;

    /// Returns a reference to the maximum element.
    fn max(&self) -> Option<&T>;
}

/// A trait for tree-like data structures.
pub trait Tree<T> {
    /// Returns the height of the tree.
    fn height(&self) -> usize;

    /// Returns `true` if the tree is balanced.
    fn is_balanced(&self) -> bool;

    /// Returns the number of nodes in the tree.
    fn size(&self) -> usize;
}

