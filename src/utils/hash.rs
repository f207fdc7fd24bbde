//! Content hashing for change detection.

/// Hash `bytes` to a `u64` (first 8 bytes of the blake3 digest).
pub fn compute(bytes: &[u8]) -> u64 {
    let digest = blake3::hash(bytes);
    let mut head = [0u8; 8];
    head.copy_from_slice(&digest.as_bytes()[..8]);
    u64::from_le_bytes(head)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compute_is_stable() {
        assert_eq!(compute(b"resources"), compute(b"resources"));
        assert_ne!(compute(b"resources"), compute(b"resources "));
    }
}
