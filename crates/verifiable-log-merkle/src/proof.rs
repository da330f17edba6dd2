//! Merkle proof verification
//!
//! Implements audit (inclusion) proof and consistency proof verification as
//! specified in RFC 6962. Verification only ever sees hashes and integers: it
//! has no access to leaf storage or to any memoized subtree hashes, so a proof
//! that checks out here was not vouched for by the party that produced it.
//!
//! Proofs are consumed as a stack: the last element is the sibling nearest the
//! root, the first element the sibling nearest the leaf.

use sha2::{Digest, Sha256};

use crate::error::{Error, Result};
use crate::hash::Hash;
use crate::tree::{split_point, Rfc6962Hasher};

/// Reconstructs roots from proofs using the hashing constructions of `D`
#[derive(Debug, Clone, Default)]
pub struct ProofVerifier<D = Sha256> {
    hasher: Rfc6962Hasher<D>,
}

/// Tail-consumed view over a private copy of a proof
struct ProofStack {
    hashes: Vec<Hash>,
}

impl ProofStack {
    fn new(proof: &[Hash]) -> Self {
        Self {
            hashes: proof.to_vec(),
        }
    }

    fn pop(&mut self) -> Result<Hash> {
        self.hashes
            .pop()
            .ok_or_else(|| Error::InvalidProof("proof has too few hashes".to_string()))
    }

    fn finish(self) -> Result<()> {
        if !self.hashes.is_empty() {
            return Err(Error::InvalidProof(format!(
                "proof has {} unused hashes",
                self.hashes.len()
            )));
        }
        Ok(())
    }
}

impl<D: Digest> ProofVerifier<D> {
    /// Create a verifier
    pub fn new() -> Self {
        Self {
            hasher: Rfc6962Hasher::new(),
        }
    }

    /// Recompute the root of a tree of `tree_size` leaves from one leaf and its audit proof
    ///
    /// # Arguments
    /// * `tree_size` - Total number of leaves in the tree
    /// * `leaf_index` - Index of the leaf in the tree (0-based)
    /// * `proof` - The audit proof, nearest sibling first
    /// * `leaf_data` - The raw leaf bytes (not the leaf hash)
    pub fn root_from_audit_proof(
        &self,
        tree_size: u64,
        leaf_index: u64,
        proof: &[Hash],
        leaf_data: &[u8],
    ) -> Result<Hash> {
        if tree_size == 0 {
            return Err(Error::InvalidTreeSize(
                "tree size cannot be zero".to_string(),
            ));
        }

        if leaf_index >= tree_size {
            return Err(Error::InvalidLeafIndex(format!(
                "leaf index {} >= tree size {}",
                leaf_index, tree_size
            )));
        }

        let mut stack = ProofStack::new(proof);
        let root = self.audit_root(tree_size, leaf_index, &mut stack, leaf_data)?;
        stack.finish()?;
        Ok(root)
    }

    fn audit_root(
        &self,
        tree_size: u64,
        leaf_index: u64,
        stack: &mut ProofStack,
        leaf_data: &[u8],
    ) -> Result<Hash> {
        if tree_size == 1 {
            if !stack.hashes.is_empty() {
                return Err(Error::Inconsistency(format!(
                    "audit path for a single-leaf subtree must be empty, {} hashes remain",
                    stack.hashes.len()
                )));
            }
            return Ok(self.hasher.hash_leaf(leaf_data));
        }

        let k = split_point(tree_size)?;
        let sibling = stack.pop()?;
        if leaf_index < k {
            let left = self.audit_root(k, leaf_index, stack, leaf_data)?;
            Ok(self.hasher.hash_children(&left, &sibling))
        } else {
            let right = self.audit_root(tree_size - k, leaf_index - k, stack, leaf_data)?;
            Ok(self.hasher.hash_children(&sibling, &right))
        }
    }

    /// Verify an audit proof, reporting why it failed
    ///
    /// # Returns
    /// * `Ok(())` if the proof is valid
    /// * `Err(...)` if the proof is invalid
    pub fn check_audit_proof(
        &self,
        expected_root: &Hash,
        tree_size: u64,
        leaf_index: u64,
        proof: &[Hash],
        leaf_data: &[u8],
    ) -> Result<()> {
        let root = self.root_from_audit_proof(tree_size, leaf_index, proof, leaf_data)?;

        if &root != expected_root {
            return Err(Error::HashMismatch {
                expected: expected_root.to_hex(),
                actual: root.to_hex(),
            });
        }

        Ok(())
    }

    /// Verify an audit proof
    ///
    /// Returns false for any malformed or mismatching proof.
    pub fn verify_audit_proof(
        &self,
        expected_root: &Hash,
        tree_size: u64,
        leaf_index: u64,
        proof: &[Hash],
        leaf_data: &[u8],
    ) -> bool {
        match self.check_audit_proof(expected_root, tree_size, leaf_index, proof, leaf_data) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(
                    "Audit proof for leaf {} in tree of size {} rejected: {}",
                    leaf_index,
                    tree_size,
                    e
                );
                false
            }
        }
    }

    /// Reconstruct both roots described by a consistency proof
    ///
    /// Returns `(old_root, new_root)` as implied by `proof` and the claimed
    /// `old_root`. For `old_size == new_size` the proof must be empty and both
    /// returned roots equal the supplied one.
    pub fn roots_from_consistency_proof(
        &self,
        old_size: u64,
        old_root: &Hash,
        new_size: u64,
        proof: &[Hash],
    ) -> Result<(Hash, Hash)> {
        if old_size == 0 {
            return Err(Error::InvalidTreeSize(
                "old tree size cannot be zero".to_string(),
            ));
        }

        if old_size > new_size {
            return Err(Error::InvalidTreeSize(format!(
                "old size {} > new size {}",
                old_size, new_size
            )));
        }

        if old_size == new_size {
            if !proof.is_empty() {
                return Err(Error::InvalidProof(
                    "proof should be empty for same-size trees".to_string(),
                ));
            }
            return Ok((old_root.clone(), old_root.clone()));
        }

        // Both passes pop the same number of hashes, they differ only in which
        // hashes get folded into the result.
        let mut stack = ProofStack::new(proof);
        let computed_old =
            self.consistency_root(old_size, new_size, &mut stack, old_root, false, true)?;
        stack.finish()?;

        let mut stack = ProofStack::new(proof);
        let computed_new =
            self.consistency_root(old_size, new_size, &mut stack, old_root, true, true)?;
        stack.finish()?;

        Ok((computed_old, computed_new))
    }

    fn consistency_root(
        &self,
        low: u64,
        high: u64,
        stack: &mut ProofStack,
        old_root: &Hash,
        compute_new_root: bool,
        start_from_old_root: bool,
    ) -> Result<Hash> {
        if low == high {
            if start_from_old_root {
                // The old tree is a complete subtree of the new one
                return Ok(old_root.clone());
            }
            return stack.pop();
        }

        let k = split_point(high)?;
        let next = stack.pop()?;
        if low <= k {
            let left = self.consistency_root(
                low,
                k,
                stack,
                old_root,
                compute_new_root,
                start_from_old_root,
            )?;
            if compute_new_root {
                Ok(self.hasher.hash_children(&left, &next))
            } else {
                // Right subtree holds only new leaves
                Ok(left)
            }
        } else {
            let right = self.consistency_root(
                low - k,
                high - k,
                stack,
                old_root,
                compute_new_root,
                false,
            )?;
            Ok(self.hasher.hash_children(&next, &right))
        }
    }

    /// Verify a consistency proof, reporting why it failed
    pub fn check_consistency_proof(
        &self,
        old_size: u64,
        old_root: &Hash,
        new_size: u64,
        new_root: &Hash,
        proof: &[Hash],
    ) -> Result<()> {
        let (calc_old_root, calc_new_root) =
            self.roots_from_consistency_proof(old_size, old_root, new_size, proof)?;

        if &calc_old_root != old_root {
            return Err(Error::HashMismatch {
                expected: old_root.to_hex(),
                actual: calc_old_root.to_hex(),
            });
        }

        if &calc_new_root != new_root {
            return Err(Error::HashMismatch {
                expected: new_root.to_hex(),
                actual: calc_new_root.to_hex(),
            });
        }

        Ok(())
    }

    /// Verify a consistency proof
    ///
    /// Returns false for any malformed or mismatching proof.
    pub fn verify_consistency_proof(
        &self,
        old_size: u64,
        old_root: &Hash,
        new_size: u64,
        new_root: &Hash,
        proof: &[Hash],
    ) -> bool {
        match self.check_consistency_proof(old_size, old_root, new_size, new_root, proof) {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!(
                    "Consistency proof between sizes {} and {} rejected: {}",
                    old_size,
                    new_size,
                    e
                );
                false
            }
        }
    }
}

/// Verify a SHA-256 audit proof for `leaf_data` at `leaf_index`
pub fn verify_audit_proof(
    expected_root: &Hash,
    tree_size: u64,
    leaf_index: u64,
    proof: &[Hash],
    leaf_data: &[u8],
) -> bool {
    ProofVerifier::<Sha256>::new().verify_audit_proof(
        expected_root,
        tree_size,
        leaf_index,
        proof,
        leaf_data,
    )
}

/// Like [`verify_audit_proof`], with the failure reason
pub fn check_audit_proof(
    expected_root: &Hash,
    tree_size: u64,
    leaf_index: u64,
    proof: &[Hash],
    leaf_data: &[u8],
) -> Result<()> {
    ProofVerifier::<Sha256>::new().check_audit_proof(
        expected_root,
        tree_size,
        leaf_index,
        proof,
        leaf_data,
    )
}

/// Verify a SHA-256 consistency proof between two tree states
pub fn verify_consistency_proof(
    old_size: u64,
    old_root: &Hash,
    new_size: u64,
    new_root: &Hash,
    proof: &[Hash],
) -> bool {
    ProofVerifier::<Sha256>::new().verify_consistency_proof(
        old_size, old_root, new_size, new_root, proof,
    )
}

/// Like [`verify_consistency_proof`], with the failure reason
pub fn check_consistency_proof(
    old_size: u64,
    old_root: &Hash,
    new_size: u64,
    new_root: &Hash,
    proof: &[Hash],
) -> Result<()> {
    ProofVerifier::<Sha256>::new().check_consistency_proof(
        old_size, old_root, new_size, new_root, proof,
    )
}
