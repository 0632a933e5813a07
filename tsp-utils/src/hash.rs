pub fn u8s_from_str(input: &str) -> [u8; 32] {
    blake3::hash(input.as_bytes()).into()
}

/// Derives an independent seed for the `index`-th unit of work from a base seed.
pub fn derive_seed(seed: &[u8; 32], index: u64) -> [u8; 32] {
    let mut hasher = blake3::Hasher::new();
    hasher.update(seed);
    hasher.update(&index.to_le_bytes());
    hasher.finalize().into()
}

