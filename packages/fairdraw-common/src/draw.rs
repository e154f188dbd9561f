//! Winner-index derivation from oracle randomness.
//!
//! The randomness oracle hands the hub a 32-byte beacon value. The winner is
//! the participant at `H(domain ‖ raffle_id ‖ randomness) mod population`,
//! indexed by join order. Domain separation ties the index to a specific
//! raffle, so two raffles drawn against the same beacon pick independently.

use sha2::{Digest, Sha256};

/// Domain separation tag for winner derivation.
const WINNER_DOMAIN: &[u8] = b"fairdraw/winner/v1";

/// Derive the winning participant index in `[0, population)`.
///
/// Returns `None` for an empty population. The modulo bias over a 128-bit
/// sample is negligible for any realistic participant count.
pub fn winner_index(randomness: &[u8], raffle_id: u64, population: u32) -> Option<u32> {
    if population == 0 {
        return None;
    }

    let mut hasher = Sha256::new();
    hasher.update(WINNER_DOMAIN);
    hasher.update(raffle_id.to_be_bytes());
    hasher.update(randomness);
    let digest: [u8; 32] = hasher.finalize().into();

    let mut sample = [0u8; 16];
    sample.copy_from_slice(&digest[0..16]);
    let ticket = u128::from_be_bytes(sample);

    Some((ticket % population as u128) as u32)
}
