//! Proof planning over subtree ranges
//!
//! Which subtree hashes make up a proof depends only on tree sizes and the leaf
//! index, never on leaf contents. The planners here compute that list of
//! [`SubtreeRange`]s; the log then hashes each range in order.
//!
//! Ranges come out in proof order: the one nearest the leaf (or the old tree)
//! first, the top-level sibling last. Verifiers consume proofs from the tail,
//! so this order is load-bearing.

use verifiable_log_merkle::{Error, Result, SubtreeRange};

/// Ranges whose hashes form the audit proof for `leaf_index` within `range`
///
/// `leaf_index` is relative to `range.start`. Ranges of zero or one leaf need
/// no siblings.
pub fn audit_path(leaf_index: u64, range: SubtreeRange) -> Result<Vec<SubtreeRange>> {
    if range.size <= 1 {
        return Ok(Vec::new());
    }

    let (left, right) = range.split()?;
    if leaf_index < left.size {
        let mut path = audit_path(leaf_index, left)?;
        path.push(right);
        Ok(path)
    } else {
        let mut path = audit_path(leaf_index - left.size, right)?;
        path.push(left);
        Ok(path)
    }
}

/// Ranges whose hashes form the consistency proof from `old_size` to `new_size`
///
/// Requires `0 < old_size <= new_size`; equal sizes need no proof.
pub fn consistency_path(old_size: u64, new_size: u64) -> Result<Vec<SubtreeRange>> {
    if old_size == 0 {
        return Err(Error::InvalidArgument(
            "old tree size must be strictly positive".to_string(),
        ));
    }
    if old_size > new_size {
        return Err(Error::InvalidArgument(format!(
            "old tree size {} exceeds new tree size {}",
            old_size, new_size
        )));
    }
    if old_size == new_size {
        return Ok(Vec::new());
    }

    subtree_consistency_path(old_size, SubtreeRange::prefix(new_size), true)
}

/// `low` is how much of `range` belongs to the old tree. While
/// `from_old_root` holds, the old root is itself a node the verifier rebuilds
/// and needs no anchor hash.
fn subtree_consistency_path(
    low: u64,
    range: SubtreeRange,
    from_old_root: bool,
) -> Result<Vec<SubtreeRange>> {
    if low == range.size {
        if from_old_root {
            return Ok(Vec::new());
        }
        return Ok(vec![range]);
    }

    let (left, right) = range.split()?;
    if low <= left.size {
        let mut path = subtree_consistency_path(low, left, from_old_root)?;
        path.push(right);
        Ok(path)
    } else {
        let mut path = subtree_consistency_path(low - left.size, right, false)?;
        path.push(left);
        Ok(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn r(start: u64, size: u64) -> SubtreeRange {
        SubtreeRange::new(start, size)
    }

    #[test]
    fn test_audit_path_trivial_trees() {
        assert!(audit_path(0, SubtreeRange::prefix(0)).unwrap().is_empty());
        assert!(audit_path(0, SubtreeRange::prefix(1)).unwrap().is_empty());
    }

    #[test]
    fn test_audit_path_complete_tree() {
        assert_eq!(
            audit_path(0, SubtreeRange::prefix(8)).unwrap(),
            vec![r(1, 1), r(2, 2), r(4, 4)]
        );
        assert_eq!(
            audit_path(5, SubtreeRange::prefix(8)).unwrap(),
            vec![r(4, 1), r(6, 2), r(0, 4)]
        );
    }

    #[test]
    fn test_audit_path_incomplete_tree() {
        assert_eq!(audit_path(2, SubtreeRange::prefix(3)).unwrap(), vec![r(0, 2)]);
        assert_eq!(
            audit_path(1, SubtreeRange::prefix(5)).unwrap(),
            vec![r(0, 1), r(2, 2), r(4, 1)]
        );
        // Rightmost leaf of an odd tree skips levels
        assert_eq!(audit_path(6, SubtreeRange::prefix(7)).unwrap(), vec![r(4, 2), r(0, 4)]);
    }

    #[test]
    fn test_audit_path_inside_subtree() {
        assert_eq!(audit_path(1, r(4, 4)).unwrap(), vec![r(4, 1), r(6, 2)]);
    }

    #[test]
    fn test_consistency_path() {
        assert!(consistency_path(1, 1).unwrap().is_empty());
        assert_eq!(
            consistency_path(1, 8).unwrap(),
            vec![r(1, 1), r(2, 2), r(4, 4)]
        );
        assert_eq!(
            consistency_path(6, 8).unwrap(),
            vec![r(4, 2), r(6, 2), r(0, 4)]
        );
        assert_eq!(consistency_path(2, 5).unwrap(), vec![r(2, 2), r(4, 1)]);
        // Old tree a complete left subtree: no anchor hash
        assert_eq!(consistency_path(4, 8).unwrap(), vec![r(4, 4)]);
        assert_eq!(
            consistency_path(3, 7).unwrap(),
            vec![r(2, 1), r(3, 1), r(0, 2), r(4, 3)]
        );
    }

    #[test]
    fn test_consistency_path_rejects_bad_sizes() {
        assert!(matches!(
            consistency_path(0, 4),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            consistency_path(5, 4),
            Err(Error::InvalidArgument(_))
        ));
    }
}
