use filemop::duplicates::group_by_digest;
use filemop::scanner::{FileRecord, Hasher};
use proptest::prelude::*;
use std::collections::HashSet;
use std::path::PathBuf;

proptest! {
    #[test]
    fn test_digest_independent_of_block_size(
        content in prop::collection::vec(any::<u8>(), 0..20_000),
        block_size in 1usize..9000,
    ) {
        let reference = Hasher::new().hash_reader(content.as_slice()).unwrap();
        let chunked = Hasher::with_block_size(block_size)
            .hash_reader(content.as_slice())
            .unwrap();

        prop_assert_eq!(reference, chunked);
        prop_assert_eq!(reference, *blake3::hash(&content).as_bytes());
    }

    #[test]
    fn test_digest_determinism(content in "\\PC*") {
        let hasher = Hasher::new();
        let first = hasher.hash_reader(content.as_bytes()).unwrap();
        let second = hasher.hash_reader(content.as_bytes()).unwrap();

        prop_assert_eq!(first, second);
    }

    #[test]
    fn test_group_by_digest_invariants(keys in prop::collection::vec(0u8..8, 0..60)) {
        let hashed: Vec<_> = keys
            .iter()
            .enumerate()
            .map(|(i, &key)| {
                let record = FileRecord::new(PathBuf::from(format!("/walk/{i:03}")), u64::from(key));
                ([key; 32], record)
            })
            .collect();

        let groups = group_by_digest(hashed.clone());

        let mut seen = HashSet::new();
        let mut previous_first = None;
        for group in &groups {
            // Only real duplicates are reported
            prop_assert!(group.len() >= 2);
            prop_assert!(seen.insert(group.hash));

            // Members share a digest and keep walk order
            let positions: Vec<usize> = group
                .files
                .iter()
                .map(|f| hashed.iter().position(|(_, r)| r.path == f.path).unwrap())
                .collect();
            for &pos in &positions {
                prop_assert_eq!(hashed[pos].0, group.hash);
            }
            prop_assert!(positions.windows(2).all(|w| w[0] < w[1]));

            // The canonical copy is the first occurrence of the digest
            let first = hashed.iter().position(|(h, _)| *h == group.hash).unwrap();
            prop_assert_eq!(positions[0], first);

            // Groups come back ordered by their first member
            if let Some(prev) = previous_first {
                prop_assert!(prev < first);
            }
            previous_first = Some(first);
        }

        // Every digest seen at least twice has a group
        for (digest, _) in &hashed {
            let count = hashed.iter().filter(|(h, _)| h == digest).count();
            prop_assert_eq!(count >= 2, seen.contains(digest));
        }
    }
}
