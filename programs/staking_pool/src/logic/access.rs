//! Allowlist check for community stakers.
//!
//! Leaves are `keccak(staker)`; each proof step hashes the sorted pair so proofs
//! carry no left/right flags.

use anchor_lang::prelude::Pubkey;
use anchor_lang::solana_program::keccak;

pub const EMPTY_ROOT: [u8; 32] = [0u8; 32];

pub fn leaf(staker: &Pubkey) -> [u8; 32] {
    keccak::hash(staker.as_ref()).to_bytes()
}

pub fn hash_pair(a: &[u8; 32], b: &[u8; 32]) -> [u8; 32] {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    keccak::hashv(&[lo.as_ref(), hi.as_ref()]).to_bytes()
}

/// Whether `staker` may deposit under `root`. An empty root admits everyone.
pub fn has_access(root: &[u8; 32], staker: &Pubkey, proof: &[[u8; 32]]) -> bool {
    if *root == EMPTY_ROOT {
        return true;
    }
    let computed = proof
        .iter()
        .fold(leaf(staker), |node, sibling| hash_pair(&node, sibling));
    computed == *root
}
