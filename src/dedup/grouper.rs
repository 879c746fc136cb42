//! Threshold-based duplicate grouping over perceptual hashes.
//!
//! A greedy single-link pass: each unprocessed hash anchors a candidate
//! group and collects every later unprocessed hash within the Hamming
//! threshold. This is deliberately not a transitive closure - with A~B and
//! B~C but A≁C, B joins whichever anchor reaches it first and C may stay
//! ungrouped. The pass is O(n²) over the surviving hashes, which is fine
//! for a personal photo library but would not scale to millions of files.

use std::path::PathBuf;

use crate::scanner::ImageHashInfo;

/// A cluster of files considered duplicates of each other.
///
/// Always holds at least two paths; which one survives is decided later by
/// a [`crate::dedup::KeepStrategy`].
#[derive(Debug, Clone)]
pub struct DuplicateGroup {
    /// Member paths, in hash-input order.
    pub files: Vec<PathBuf>,
}

impl DuplicateGroup {
    /// Number of files in this group.
    #[must_use]
    pub fn len(&self) -> usize {
        self.files.len()
    }

    /// Whether the group has no members.
    ///
    /// Groups emitted by [`group_duplicates`] always have ≥2 members, so
    /// this returns false for any of them.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// Cluster hashes into duplicate groups at the given inclusive threshold.
///
/// Two hashes match when their Hamming distance is `<= threshold`. Each
/// path lands in at most one group. An anchor whose candidate group stays a
/// singleton is left unprocessed, so it can still join a later anchor's
/// group.
#[must_use]
pub fn group_duplicates(hashes: &[ImageHashInfo], threshold: u32) -> Vec<DuplicateGroup> {
    let mut processed = vec![false; hashes.len()];
    let mut groups = Vec::new();

    for i in 0..hashes.len() {
        if processed[i] {
            continue;
        }

        let mut files = vec![hashes[i].path.clone()];
        for j in (i + 1)..hashes.len() {
            if processed[j] {
                continue;
            }
            let distance = hashes[i].hash.dist(&hashes[j].hash);
            if distance <= threshold {
                files.push(hashes[j].path.clone());
                processed[j] = true;
            }
        }

        if files.len() > 1 {
            processed[i] = true;
            log::debug!(
                "duplicate group anchored at {} with {} member(s)",
                hashes[i].path.display(),
                files.len()
            );
            groups.push(DuplicateGroup { files });
        }
    }

    groups
}

#[cfg(test)]
mod tests {
    use super::*;
    use image_hasher::ImageHash;

    fn info(path: &str, bytes: [u8; 8]) -> ImageHashInfo {
        ImageHashInfo {
            path: PathBuf::from(path),
            hash: ImageHash::from_bytes(&bytes).unwrap(),
        }
    }

    #[test]
    fn test_empty_input_yields_no_groups() {
        assert!(group_duplicates(&[], 5).is_empty());
    }

    #[test]
    fn test_identical_hashes_grouped() {
        let hashes = vec![
            info("/a", [0; 8]),
            info("/b", [0; 8]),
            info("/c", [0xFF; 8]),
        ];
        let groups = group_duplicates(&hashes, 0);
        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0].files,
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
    }

    #[test]
    fn test_threshold_is_inclusive() {
        // Distance between the two hashes is exactly 2 bits.
        let a = info("/a", [0b0000_0011, 0, 0, 0, 0, 0, 0, 0]);
        let b = info("/b", [0, 0, 0, 0, 0, 0, 0, 0]);

        let grouped = group_duplicates(&[a.clone(), b.clone()], 2);
        assert_eq!(grouped.len(), 1);

        let not_grouped = group_duplicates(&[a, b], 1);
        assert!(not_grouped.is_empty());
    }

    #[test]
    fn test_every_group_has_at_least_two_members() {
        let hashes = vec![
            info("/a", [0; 8]),
            info("/b", [0; 8]),
            info("/c", [0x0F; 8]),
            info("/d", [0xF0; 8]),
        ];
        for group in group_duplicates(&hashes, 1) {
            assert!(group.len() >= 2);
            assert!(!group.is_empty());
        }
    }

    #[test]
    fn test_each_path_in_at_most_one_group() {
        let hashes = vec![
            info("/a", [0; 8]),
            info("/b", [0; 8]),
            info("/c", [0; 8]),
            info("/d", [1; 8]),
            info("/e", [1; 8]),
        ];
        let groups = group_duplicates(&hashes, 0);
        let mut seen = std::collections::HashSet::new();
        for group in &groups {
            for path in &group.files {
                assert!(seen.insert(path.clone()), "{} in two groups", path.display());
            }
        }
    }

    #[test]
    fn test_greedy_chain_is_not_transitive() {
        // dist(a,b) = 1, dist(b,c) = 1, dist(a,c) = 2. At threshold 1 the
        // greedy pass anchors at a, takes b, and leaves c ungrouped - a
        // union-find upgrade would instead produce one {a, b, c} group.
        let a = info("/a", [0b0000_0000, 0, 0, 0, 0, 0, 0, 0]);
        let b = info("/b", [0b0000_0001, 0, 0, 0, 0, 0, 0, 0]);
        let c = info("/c", [0b0000_0011, 0, 0, 0, 0, 0, 0, 0]);

        let groups = group_duplicates(&[a, b, c], 1);
        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0].files,
            vec![PathBuf::from("/a"), PathBuf::from("/b")]
        );
    }

    #[test]
    fn test_skipped_anchor_can_join_later_group() {
        // a and b are far apart; c is close to b only. Anchoring at a finds
        // nothing and leaves a unprocessed as a singleton; anchoring at b
        // then pairs b with c.
        let a = info("/a", [0xFF; 8]);
        let b = info("/b", [0; 8]);
        let c = info("/c", [1, 0, 0, 0, 0, 0, 0, 0]);

        let groups = group_duplicates(&[a, b, c], 1);
        assert_eq!(groups.len(), 1);
        assert_eq!(
            groups[0].files,
            vec![PathBuf::from("/b"), PathBuf::from("/c")]
        );
    }
}
