//! Stable host ids for parameter identifiers.
//!
//! Hosts record automation against a numeric parameter id. Using the catalog
//! address for that would tie saved automation to catalog ordering, so the id
//! is derived from the parameter's string identifier instead.

/// Compute the FNV-1a 32-bit hash of a string.
///
/// Deterministic across platforms and compiler versions, and usable in
/// `const` context:
///
/// ```
/// use flanger_utils::fnv1a_32;
///
/// const RATE_ID: u32 = fnv1a_32("rate");
/// assert_eq!(RATE_ID, fnv1a_32("rate"));
/// ```
#[inline]
pub const fn fnv1a_32(s: &str) -> u32 {
    const FNV_OFFSET: u32 = 2166136261;
    const FNV_PRIME: u32 = 16777619;

    let bytes = s.as_bytes();
    let mut hash = FNV_OFFSET;
    let mut i = 0;
    while i < bytes.len() {
        hash ^= bytes[i] as u32;
        hash = hash.wrapping_mul(FNV_PRIME);
        i += 1;
    }
    hash
}

/// Find the first pair of distinct identifiers whose host ids collide.
///
/// Returns the positions of the two identifiers, or `None` when every id is
/// unique. Identical strings are reported as a collision too, since they would
/// be indistinguishable to the host.
pub fn find_collision(identifiers: &[&str]) -> Option<(usize, usize)> {
    for (i, a) in identifiers.iter().enumerate() {
        let id = fnv1a_32(a);
        for (j, b) in identifiers.iter().enumerate().skip(i + 1) {
            if fnv1a_32(b) == id {
                return Some((i, j));
            }
        }
    }
    None
}
