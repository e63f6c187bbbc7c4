//! Digest grouping of walked files.
//!
//! # Overview
//!
//! Files are appended to the group keyed by their digest in walk order, so
//! the first member of every group is the file the walk met first. That
//! member is canonical and survives; every later member is redundant.
//!
//! # Example
//!
//! ```
//! use filemop::duplicates::group_by_digest;
//! use filemop::scanner::FileRecord;
//! use std::path::PathBuf;
//!
//! let files = vec![
//!     ([1u8; 32], FileRecord::new(PathBuf::from("/a.txt"), 3)),
//!     ([2u8; 32], FileRecord::new(PathBuf::from("/b.txt"), 3)),
//!     ([1u8; 32], FileRecord::new(PathBuf::from("/c.txt"), 3)),
//! ];
//!
//! let groups = group_by_digest(files);
//! assert_eq!(groups.len(), 1);
//! assert_eq!(groups[0].canonical().path, PathBuf::from("/a.txt"));
//! ```

use std::collections::HashMap;
use std::path::PathBuf;

use crate::scanner::{hash_to_hex, FileRecord, Hash};

/// Files sharing one digest, in walk order.
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    /// BLAKE3 digest shared by every member
    pub hash: Hash,
    /// Members in walk order; never empty
    pub files: Vec<FileRecord>,
}

impl DuplicateGroup {
    /// Create a group from its first member.
    #[must_use]
    pub fn new(hash: Hash, first: FileRecord) -> Self {
        Self {
            hash,
            files: vec![first],
        }
    }

    /// Append a member found later in the walk.
    pub fn push(&mut self, file: FileRecord) {
        debug_assert!(
            file.cached_digest().is_none_or(|d| d == self.hash),
            "digest mismatch for {}",
            file.path.display()
        );
        self.files.push(file);
    }

    /// The retained member (first in walk order).
    #[must_use]
    pub fn canonical(&self) -> &FileRecord {
        &self.files[0]
    }

    /// Members to delete: everything after the canonical file.
    #[must_use]
    pub fn redundant(&self) -> &[FileRecord] {
        &self.files[1..]
    }

    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Always false; groups are created with one member.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }

    /// Whether this group holds actual duplicates (2+ files).
    #[must_use]
    pub fn has_duplicates(&self) -> bool {
        self.files.len() > 1
    }

    /// Space freed by deleting the redundant members.
    #[must_use]
    pub fn wasted_space(&self) -> u64 {
        self.redundant().iter().map(|f| f.size).sum()
    }

    /// Hash as hexadecimal string.
    #[must_use]
    pub fn hash_hex(&self) -> String {
        hash_to_hex(&self.hash)
    }

    /// Paths of all members.
    #[must_use]
    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.iter().map(|f| f.path.clone()).collect()
    }
}

/// Group hashed files by digest, keeping only groups with 2+ members.
///
/// Input order is the walk order. The returned groups are ordered by the
/// walk position of their canonical member, and members keep input order.
#[must_use]
pub fn group_by_digest(files: impl IntoIterator<Item = (Hash, FileRecord)>) -> Vec<DuplicateGroup> {
    let mut index: HashMap<Hash, usize> = HashMap::new();
    let mut groups: Vec<DuplicateGroup> = Vec::new();

    for (hash, file) in files {
        match index.get(&hash) {
            Some(&i) => groups[i].push(file),
            None => {
                index.insert(hash, groups.len());
                groups.push(DuplicateGroup::new(hash, file));
            }
        }
    }

    groups.retain(DuplicateGroup::has_duplicates);
    for group in &groups {
        log::debug!(
            "Digest {}: {} copies of {}",
            &group.hash_hex()[..16],
            group.len(),
            group.canonical().path.display()
        );
    }
    groups
}
