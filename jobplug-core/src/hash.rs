//! Job identity hashing
//!
//! The host and the plugin never exchange a mapping table. Both sides derive a
//! job's identifier from its title with 32-bit FNV-1a, so the function must
//! stay bit-for-bit stable.

const FNV_OFFSET_BASIS: u32 = 0x811c_9dc5;
const FNV_PRIME: u32 = 0x0100_0193;

/// Computes the 32-bit FNV-1a hash of `input`'s UTF-8 bytes.
pub fn fnv1a_32(input: &str) -> u32 {
    input.bytes().fold(FNV_OFFSET_BASIS, |hash, byte| {
        (hash ^ u32::from(byte)).wrapping_mul(FNV_PRIME)
    })
}

/// Derives a job's unique identifier from its title (case-sensitive)
pub fn job_id(title: &str) -> u32 {
    fnv1a_32(title)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_vectors() {
        assert_eq!(fnv1a_32(""), 0x811c_9dc5);
        assert_eq!(fnv1a_32("a"), 0xe40c_292c);
        assert_eq!(fnv1a_32("foobar"), 0xbf9c_f968);
    }

    #[test]
    fn test_job_id_is_case_sensitive() {
        assert_eq!(job_id("Build"), job_id("Build"));
        assert_ne!(job_id("Build"), job_id("build"));
    }
}
