use std::hash::{Hash, Hasher};

/// Stable 32-bit hash of a node id, used to derive deterministic seed
/// placement without a process-global RNG.
pub fn stable_u32(s: &str) -> u32 {
    let mut h = std::collections::hash_map::DefaultHasher::new();
    s.hash(&mut h);
    (h.finish() & 0xFFFF_FFFF) as u32
}
