//! Duplicate detection module.
//!
//! This module provides functionality for:
//! - Content hashing of a walk snapshot ([`DuplicateFinder`])
//! - Digest grouping in walk order ([`group_by_digest`])
//! - Removal of every copy but the first ([`remove_redundant`])

pub mod finder;
pub mod groups;

pub use finder::{remove_redundant, DuplicateFinder};
pub use groups::{group_by_digest, DuplicateGroup};
