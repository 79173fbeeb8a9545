//! # Tree Core
//!
//! Core traits and error types shared by the balanced search-tree engines in
//! `tree-collections`.
//!
//! This crate provides the foundational `TreeError` type and the generic
//! container/ordering traits used across the BST, AVL and B-tree engines.

#![cfg_attr(not(feature = "std"), no_std)]

pub mod error;
pub mod traits;

pub use error::{Result, TreeError};
pub use traits::*;
