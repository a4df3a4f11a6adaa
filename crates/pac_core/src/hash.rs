//! Content hashing
//!
//! Item "type" hashes use Jenkins' one-at-a-time hash over the lower-cased
//! name, the same function the game uses for its own string hashes, so a
//! weapon item's content hash matches what other scripts compute for it.

/// Jenkins one-at-a-time hash, case-insensitive, `\` folded to `/`
pub fn joaat(name: &str) -> u32 {
    let mut hash: u32 = 0;
    for byte in name.bytes() {
        let byte = match byte.to_ascii_lowercase() {
            b'\\' => b'/',
            other => other,
        };
        hash = hash.wrapping_add(u32::from(byte));
        hash = hash.wrapping_add(hash << 10);
        hash ^= hash >> 6;
    }
    hash = hash.wrapping_add(hash << 3);
    hash ^= hash >> 11;
    hash.wrapping_add(hash << 15)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert_eq!(joaat(""), 0);
    }

    #[test]
    fn test_known_hash() {
        assert_eq!(joaat("adder"), 0xB779A091);
    }

    #[test]
    fn test_case_insensitive() {
        assert_eq!(joaat("WEAPON_PISTOL"), joaat("weapon_pistol"));
        assert_ne!(joaat("WEAPON_PISTOL"), joaat("WEAPON_KNIFE"));
    }

    #[test]
    fn test_slash_folding() {
        assert_eq!(joaat("a\\b"), joaat("a/b"));
    }
}
