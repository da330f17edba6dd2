//! RFC 6962 Merkle tree test suite
//!
//! Known-answer values for the 8-leaf reference log used across the
//! verifiable-log crates, plus negative cases for tampered proofs.

use verifiable_log_merkle::{
    check_audit_proof, check_consistency_proof, empty_hash, hash_children, hash_leaf,
    split_point, verify_audit_proof, verify_consistency_proof, Error, Hash,
};

fn leaves() -> Vec<Vec<u8>> {
    vec![
        vec![],
        vec![0x00],
        vec![0x10],
        vec![0x20, 0x21],
        vec![0x30, 0x31],
        vec![0x40, 0x41, 0x42, 0x43],
        (0x50..=0x57).collect(),
        (0x60..=0x6f).collect(),
    ]
}

fn h(hex: &str) -> Hash {
    Hash::from_hex(hex).unwrap()
}

fn hashes(hexes: &[&str]) -> Vec<Hash> {
    hexes.iter().map(|s| h(s)).collect()
}

const ROOT_6: &str = "76e67dadbcdf1e10e1b74ddc608abd2f98dfb16fbce75277b5232a127f2087ef";
const ROOT_8: &str = "5dc9da79a70659a9ad559cb701ded9a2ab9d823aad2f4960cfe370eff4604328";

const AUDIT_0_8: [&str; 3] = [
    "96a296d224f285c67bee93c30f8a309157f0daa35dc5b87e410b78630a09cfc7",
    "5f083f0a1a33ca076a95279832580db3e0ef4584bdff1f54c8a360f50de3031e",
    "6b47aaf29ee3c2af9af889bc1fb9254dabd31177f16232dd6aab035ca39bf6e4",
];

const CONSISTENCY_6_8: [&str; 3] = [
    "0ebc5d3437fbe2db158b9f126a1d118e308181031d0a949f8dededebc558ef6a",
    "ca854ea128ed050b41b35ffc1b87b8eb2bde461e9e3b5596ece6b9d5975a0ae0",
    "d37ee418976dd95753c1c73862b9398fa2a2cf9b4ff0fdfe8b30cd95209614b7",
];

#[test]
fn test_empty_tree_root() {
    assert_eq!(
        empty_hash().to_hex(),
        "e3b0c44298fc1c149afbf4c8996fb92427ae41e4649b934ca495991b7852b855"
    );
}

#[test]
fn test_single_leaf_root() {
    // The empty leaf still carries the 0x00 prefix
    assert_eq!(
        hash_leaf(&[]).to_hex(),
        "6e340b9cffb37a989ca544e6bb780a2c78901d3fb33738768511a30617afa01d"
    );
}

#[test]
fn test_split_point_large() {
    assert_eq!(split_point(35009563).unwrap(), 33554432);
}

#[test]
fn test_audit_proof_known_answer() {
    let leaves = leaves();
    assert!(verify_audit_proof(
        &h(ROOT_8),
        8,
        0,
        &hashes(&AUDIT_0_8),
        &leaves[0]
    ));
}

#[test]
fn test_audit_proof_wrong_leaf() {
    let leaves = leaves();
    let result = check_audit_proof(&h(ROOT_8), 8, 0, &hashes(&AUDIT_0_8), &leaves[1]);
    assert!(matches!(result, Err(Error::HashMismatch { .. })));
}

#[test]
fn test_audit_proof_wrong_index() {
    let leaves = leaves();
    assert!(!verify_audit_proof(
        &h(ROOT_8),
        8,
        1,
        &hashes(&AUDIT_0_8),
        &leaves[0]
    ));
}

#[test]
fn test_audit_proof_reordered() {
    let leaves = leaves();
    let mut proof = hashes(&AUDIT_0_8);
    proof.swap(0, 2);
    assert!(!verify_audit_proof(&h(ROOT_8), 8, 0, &proof, &leaves[0]));
}

#[test]
fn test_audit_proof_truncated_and_padded() {
    let leaves = leaves();
    let proof = hashes(&AUDIT_0_8);

    let truncated = check_audit_proof(&h(ROOT_8), 8, 0, &proof[1..], &leaves[0]);
    assert!(matches!(truncated, Err(Error::InvalidProof(_))));

    let mut padded = vec![hash_leaf(b"padding")];
    padded.extend(proof);
    assert!(!verify_audit_proof(&h(ROOT_8), 8, 0, &padded, &leaves[0]));
}

#[test]
fn test_audit_proof_out_of_range() {
    let leaves = leaves();
    let proof = hashes(&AUDIT_0_8);
    let result = check_audit_proof(&h(ROOT_8), 8, 8, &proof, &leaves[0]);
    assert!(matches!(result, Err(Error::InvalidLeafIndex(_))));

    let result = check_audit_proof(&h(ROOT_8), 0, 0, &[], &leaves[0]);
    assert!(matches!(result, Err(Error::InvalidTreeSize(_))));
}

#[test]
fn test_consistency_proof_known_answer() {
    assert!(verify_consistency_proof(
        6,
        &h(ROOT_6),
        8,
        &h(ROOT_8),
        &hashes(&CONSISTENCY_6_8)
    ));
}

#[test]
fn test_consistency_proof_wrong_old_root() {
    let result = check_consistency_proof(
        6,
        &h(ROOT_8),
        8,
        &h(ROOT_8),
        &hashes(&CONSISTENCY_6_8),
    );
    assert!(matches!(result, Err(Error::HashMismatch { .. })));
}

#[test]
fn test_consistency_proof_wrong_new_root() {
    assert!(!verify_consistency_proof(
        6,
        &h(ROOT_6),
        8,
        &h(ROOT_6),
        &hashes(&CONSISTENCY_6_8)
    ));
}

#[test]
fn test_consistency_proof_wrong_sizes() {
    let proof = hashes(&CONSISTENCY_6_8);
    assert!(!verify_consistency_proof(5, &h(ROOT_6), 8, &h(ROOT_8), &proof));
    assert!(!verify_consistency_proof(8, &h(ROOT_8), 6, &h(ROOT_6), &proof));
}

#[test]
fn test_consistency_proof_truncated_and_padded() {
    let proof = hashes(&CONSISTENCY_6_8);

    let truncated = check_consistency_proof(6, &h(ROOT_6), 8, &h(ROOT_8), &proof[1..]);
    assert!(matches!(truncated, Err(Error::InvalidProof(_))));

    let mut padded = vec![hash_leaf(b"padding")];
    padded.extend(proof);
    let result = check_consistency_proof(6, &h(ROOT_6), 8, &h(ROOT_8), &padded);
    assert!(matches!(result, Err(Error::InvalidProof(_))));
}

#[test]
fn test_consistency_same_size_needs_equal_roots() {
    assert!(verify_consistency_proof(8, &h(ROOT_8), 8, &h(ROOT_8), &[]));
    assert!(!verify_consistency_proof(8, &h(ROOT_8), 8, &h(ROOT_6), &[]));
    assert!(!verify_consistency_proof(
        8,
        &h(ROOT_8),
        8,
        &h(ROOT_8),
        &hashes(&CONSISTENCY_6_8)
    ));
}

#[test]
fn test_hash_leaf_format() {
    use verifiable_log_merkle::{Digest, Sha256};

    let data = b"test";
    let hash = hash_leaf(data);

    let mut raw_data = vec![0x00];
    raw_data.extend_from_slice(data);
    let expected = Hash::from_bytes(Sha256::digest(&raw_data).to_vec());

    assert_eq!(hash, expected, "hash_leaf should use 0x00 prefix");
}

#[test]
fn test_hash_children_format() {
    use verifiable_log_merkle::{Digest, Sha256};

    let left = hash_leaf(b"left");
    let right = hash_leaf(b"right");
    let hash = hash_children(&left, &right);

    let mut raw_data = vec![0x01];
    raw_data.extend_from_slice(left.as_slice());
    raw_data.extend_from_slice(right.as_slice());
    let expected = Hash::from_bytes(Sha256::digest(&raw_data).to_vec());

    assert_eq!(hash, expected, "hash_children should use 0x01 prefix");
}
