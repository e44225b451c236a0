use std::collections::BTreeSet;

use rand::{CryptoRng, Rng};

use crate::error::PasswordError;

pub const LOWERCASE: &str = "abcdefghijklmnopqrstuvwxyz";
pub const UPPERCASE: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &str = "0123456789";
pub const SYMBOLS: &str = "!@#$%^&*()-_=+[]{}<>?/\\~";

/// Glyphs easily confused when read back or transcribed.
pub const AMBIGUOUS: &str = "O0oIl1|`'\".,;:";

/// Builds the deduplicated charset for the given toggles, sorted by code point.
///
/// Never fails: an empty string comes back when no category is selected, and
/// callers are expected to check for that before generating.
pub fn build_charset(
    include_lower: bool,
    include_upper: bool,
    include_digits: bool,
    include_symbols: bool,
    avoid_ambiguous: bool,
) -> String {
    let mut charset = String::new();

    if include_lower {
        charset.push_str(LOWERCASE);
    }
    if include_upper {
        charset.push_str(UPPERCASE);
    }
    if include_digits {
        charset.push_str(DIGITS);
    }
    if include_symbols {
        charset.push_str(SYMBOLS);
    }

    charset
        .chars()
        .filter(|c| !(avoid_ambiguous && AMBIGUOUS.contains(*c)))
        .collect::<BTreeSet<char>>()
        .into_iter()
        .collect()
}

/// Generates `length` characters drawn uniformly from `charset` using the
/// thread-local CSPRNG (ChaCha, seeded from the OS).
pub fn generate_password(length: usize, charset: &str) -> Result<String, PasswordError> {
    generate_password_with(length, charset, &mut rand::rng())
}

/// Same as [`generate_password`] with an explicit cryptographic RNG.
pub fn generate_password_with<R: Rng + CryptoRng>(
    length: usize,
    charset: &str,
    rng: &mut R,
) -> Result<String, PasswordError> {
    let chars: Vec<char> = charset.chars().collect();
    if chars.is_empty() {
        return Err(PasswordError::EmptyCharset);
    }

    Ok((0..length)
        .map(|_| chars[rng.random_range(0..chars.len())])
        .collect())
}

// ------------------ TESTS ------------------
#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    fn all_combinations() -> impl Iterator<Item = [bool; 5]> {
        (0u8..32).map(|bits| {
            [
                bits & 1 != 0,
                bits & 2 != 0,
                bits & 4 != 0,
                bits & 8 != 0,
                bits & 16 != 0,
            ]
        })
    }

    #[test]
    fn test_charset_sizes() {
        assert_eq!(build_charset(true, false, false, false, false).len(), 26);
        assert_eq!(build_charset(false, true, false, false, false).len(), 26);
        assert_eq!(build_charset(false, false, true, false, false).len(), 10);
        assert_eq!(build_charset(false, false, false, true, false).len(), 24);
        assert_eq!(build_charset(true, true, true, true, false).len(), 86);
    }

    #[test]
    fn test_charset_is_sorted_and_unique() {
        for [l, u, d, s, a] in all_combinations() {
            let charset = build_charset(l, u, d, s, a);
            let chars: Vec<char> = charset.chars().collect();
            assert!(
                chars.windows(2).all(|w| w[0] < w[1]),
                "not strictly ascending: {charset:?}"
            );
        }
    }

    #[test]
    fn test_charset_non_empty_iff_category_selected() {
        for [l, u, d, s, a] in all_combinations() {
            let charset = build_charset(l, u, d, s, a);
            assert_eq!(charset.is_empty(), !(l || u || d || s), "flags {:?}", [l, u, d, s, a]);
        }
    }

    #[test]
    fn test_avoid_ambiguous_filters() {
        for [l, u, d, s, _] in all_combinations() {
            let charset = build_charset(l, u, d, s, true);
            assert!(!charset.chars().any(|c| AMBIGUOUS.contains(c)), "{charset:?}");
        }
        // 'l', 'o' gone from lowercase
        assert_eq!(build_charset(true, false, false, false, true).len(), 24);
        // '0' and '1' gone from digits
        assert_eq!(build_charset(false, false, true, false, true), "23456789");
    }

    #[test]
    fn test_symbols_kept_verbatim() {
        let charset = build_charset(false, false, false, true, true);
        for c in SYMBOLS.chars() {
            assert!(charset.contains(c), "missing symbol {c}");
        }
        assert!(charset.contains('\\'));
    }

    #[test]
    fn test_generate_password_length_and_membership() {
        let charset = build_charset(true, true, true, true, true);
        let mut rng = StdRng::seed_from_u64(7);
        for len in [1, 4, 16, 64, 128] {
            let pwd = generate_password_with(len, &charset, &mut rng).unwrap();
            assert_eq!(pwd.chars().count(), len);
            assert!(pwd.chars().all(|c| charset.contains(c)));
        }
    }

    #[test]
    fn test_generate_password_empty_charset() {
        assert_eq!(generate_password(16, ""), Err(PasswordError::EmptyCharset));
    }

    #[test]
    fn test_seeded_generation_is_reproducible() {
        let charset = build_charset(true, true, true, false, true);
        let a = generate_password_with(20, &charset, &mut StdRng::seed_from_u64(42)).unwrap();
        let b = generate_password_with(20, &charset, &mut StdRng::seed_from_u64(42)).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_single_char_charset() {
        let pwd = generate_password(8, "x").unwrap();
        assert_eq!(pwd, "xxxxxxxx");
    }
}
