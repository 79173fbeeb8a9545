//! # Tree Collections
//!
//! Ordered, in-memory balanced search-tree containers.
//!
//! This crate provides three tree engines built on a shared comparator
//! contract and, where their node shape allows it, shared query and
//! traversal code:
//!
//! - [`trees::binary_search_tree::BinarySearchTree`] - unbalanced BST
//! - [`trees::avl_tree::AvlTree`] - height-balanced AVL tree
//! - [`trees::b_tree::BTree`] - multiway B-tree
//!
//! All three store their nodes in an arena (`trees::arena::Arena`) addressed
//! by stable integer indices rather than `Box`/`Rc` pointers, so parent
//! back-references and cross-node links survive deletions without needing
//! weak references.

#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub mod trees;

pub use tree_core::{Result, TreeError};
