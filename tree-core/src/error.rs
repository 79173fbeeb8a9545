//! Error types for tree operations.
//!
//! This module provides a unified error type for the BST, AVL and B-tree
//! engines. Ordinary negative outcomes (key not present, duplicate key on a
//! best-effort insert) are reported as `bool`/`Option` by the engines
//! themselves; `TreeError` is reserved for construction-time contract
//! violations and internal node-level invariant failures.

extern crate alloc;

use alloc::string::String;
use thiserror::Error;

/// The main error type for tree operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TreeError {
    /// Index is out of bounds.
    #[error("index {index} out of bounds for size {size}")]
    IndexOutOfBounds {
        /// The invalid index that was accessed.
        index: usize,
        /// The size of the container.
        size: usize,
    },

    /// Operation attempted on an empty container.
    #[error("operation on empty container")]
    EmptyContainer,

    /// Capacity has been exceeded.
    #[error("capacity exceeded: maximum is {max}, requested {requested}")]
    CapacityExceeded {
        /// The maximum allowed capacity.
        max: usize,
        /// The requested capacity.
        requested: usize,
    },

    /// Key was not found in the container.
    #[error("key not found")]
    KeyNotFound,

    /// Duplicate key was inserted.
    #[error("duplicate key")]
    DuplicateKey,

    /// Invalid argument was provided.
    #[error("invalid argument: {message}")]
    InvalidArgument {
        /// Description of the invalid argument.
        message: &'static str,
    },

    /// A B-tree was constructed with an order below the required minimum.
    #[error("invalid B-tree order {order}: order must be >= 2")]
    InvalidOrder {
        /// The offending order value.
        order: usize,
    },

    /// Import from a structured export record failed: a required field was
    /// missing or a record's shape did not match the target engine.
    #[error("invalid input: {message}")]
    InvalidInput {
        /// Description of what was missing or malformed.
        message: &'static str,
    },

    /// A node-level mutator was invoked in a way that does not fit the
    /// target engine (e.g. rotating a node with no parent link).
    #[error("invalid node operation: {message}")]
    InvalidNodeOperation {
        /// Description of the mismatched operation.
        message: String,
    },

    /// A node's local invariants failed validation (unsorted keys, a height
    /// cache mismatch, a parent-pointer cycle). Indicates corruption; the
    /// owning tree should be discarded.
    #[error("node validation failed: {message}")]
    NodeValidation {
        /// Description of which invariant failed.
        message: String,
    },

    /// A B-tree split was attempted on a node that was not full, or left an
    /// inconsistent node.
    #[error("split error: {message}")]
    SplitError {
        /// Description of the illegal precondition.
        message: String,
    },

    /// A B-tree merge was attempted across nodes with mismatched parents, or
    /// the merged result would exceed node capacity.
    #[error("merge error: {message}")]
    MergeError {
        /// Description of the illegal precondition.
        message: String,
    },

    /// A borrow-from-sibling redistribution was attempted against a sibling
    /// with no surplus key to lend.
    #[error("redistribution error: {message}")]
    RedistributionError {
        /// Description of the illegal precondition.
        message: String,
    },

    /// A direct key insertion on a node was attempted past its capacity.
    #[error("node full: {key_count} keys already present, capacity is {capacity}")]
    NodeFull {
        /// Number of keys already present.
        key_count: usize,
        /// Maximum keys the node may hold.
        capacity: usize,
    },

    /// A direct key removal on a node would drop it below its minimum
    /// occupancy outside of a rebalancing step prepared to fix it back up.
    #[error("node underflow: {key_count} keys present, minimum is {minimum}")]
    NodeUnderflow {
        /// Number of keys present.
        key_count: usize,
        /// Minimum keys required.
        minimum: usize,
    },

    /// `successor`/`predecessor` was asked for a key absent from the tree.
    #[error("value not found")]
    ValueNotFound,
}

/// A specialized Result type for tree operations.
pub type Result<T> = core::result::Result<T, TreeError>;
