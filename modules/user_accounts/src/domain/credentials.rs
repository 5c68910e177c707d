//! Password salting and digesting.
//!
//! The digest is uppercase hex MD5 over `plaintext || salt`. Stored digests
//! depend on this exact form, so it must not change.

use md5::{Digest, Md5};
use rand::Rng;

/// Decimal width of a salt; `i32::MAX` has ten digits.
pub const SALT_WIDTH: usize = 10;

/// Fresh salt: a non-negative 31-bit random integer, zero-padded.
pub fn derive_salt() -> String {
    let n: u32 = rand::rng().random_range(0..=i32::MAX as u32);
    format!("{n:0width$}", width = SALT_WIDTH)
}

pub fn digest(plaintext: &str, salt: &str) -> String {
    let mut hasher = Md5::new();
    hasher.update(plaintext.as_bytes());
    hasher.update(salt.as_bytes());
    hex::encode_upper(hasher.finalize())
}

pub fn verify(plaintext: &str, salt: &str, expected: &str) -> bool {
    digest(plaintext, salt) == expected
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn salt_is_fixed_width_digits() {
        for _ in 0..64 {
            let s = derive_salt();
            assert_eq!(s.len(), SALT_WIDTH);
            assert!(s.bytes().all(|b| b.is_ascii_digit()), "salt {s}");
            assert!(s.parse::<u64>().unwrap() <= i32::MAX as u64);
        }
    }

    #[test]
    fn digest_matches_known_vector() {
        // md5("abc")
        assert_eq!(digest("ab", "c"), "900150983CD24FB0D6963F7D28E17F72");
        assert_eq!(digest("", ""), "D41D8CD98F00B204E9800998ECF8427E");
    }

    #[test]
    fn digest_is_deterministic_and_password_sensitive() {
        let salt = "0000012345";
        assert_eq!(digest("pw1", salt), digest("pw1", salt));
        assert_ne!(digest("pw1", salt), digest("pw2", salt));
        assert_ne!(digest("pw1", salt), digest("pw1", "0000012346"));
    }

    #[test]
    fn verify_accepts_own_digest_only() {
        let salt = derive_salt();
        let d = digest("secret", &salt);
        assert!(verify("secret", &salt, &d));
        assert!(!verify("Secret", &salt, &d));
        assert!(!verify("secret", &salt, &d.to_lowercase()));
    }
}
