use base64::{Engine as _, engine::general_purpose::STANDARD};

/// Offset added to every character code before the first base64 pass.
pub const CHAR_SHIFT: u8 = 3;

/// Repeating key XORed over the inner base64 text.
pub const XOR_KEY: &[u8] = b"mX9#pZ2$kL7&vN4!";

/// Salt prepended to the lower-cased input before hashing.
pub const HASH_SALT: &str = "CrosswordSalt2024";

/// Mask XORed over the folded hash.
pub const HASH_MASK: u32 = 0xAAAA_AAAA;

const BASE36_DIGITS: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Errors produced while encoding or decoding an answer token.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display, derive_more::Error, derive_more::From)]
pub enum CodecError {
    /// The character does not fit in a single byte after shifting.
    #[display("character {ch:?} cannot be encoded")]
    UnencodableChar {
        /// The offending character.
        ch: char,
    },
    /// One of the base64 layers is malformed.
    #[display("invalid base64 layer: {_0}")]
    InvalidBase64(#[from] base64::DecodeError),
    /// A decoded byte is smaller than the character shift.
    #[display("token decodes to a character below the shift offset")]
    ShiftUnderflow,
}

fn xor_with_key(bytes: &[u8]) -> Vec<u8> {
    bytes
        .iter()
        .zip(XOR_KEY.iter().cycle())
        .map(|(byte, key)| byte ^ key)
        .collect()
}

/// Encodes a plaintext answer into an opaque token.
///
/// The stages are, in order: reverse the characters, shift each character
/// code by [`CHAR_SHIFT`], base64-encode the resulting bytes, XOR each base64
/// character with [`XOR_KEY`], and base64-encode the XOR output.
///
/// # Errors
///
/// Returns [`CodecError::UnencodableChar`] if a shifted character code does
/// not fit in one byte. All printable ASCII input is encodable.
pub fn encode(plaintext: &str) -> Result<String, CodecError> {
    let shifted = plaintext
        .chars()
        .rev()
        .map(|ch| {
            u32::from(ch)
                .checked_add(u32::from(CHAR_SHIFT))
                .and_then(|code| u8::try_from(code).ok())
                .ok_or(CodecError::UnencodableChar { ch })
        })
        .collect::<Result<Vec<u8>, _>>()?;
    let inner = STANDARD.encode(shifted);
    Ok(STANDARD.encode(xor_with_key(inner.as_bytes())))
}

/// Decodes a token produced by [`encode`].
///
/// # Errors
///
/// Returns [`CodecError::InvalidBase64`] if either base64 layer is malformed
/// and [`CodecError::ShiftUnderflow`] if the token carries a byte that
/// [`encode`] cannot have produced.
pub fn try_decode(token: &str) -> Result<String, CodecError> {
    let outer = STANDARD.decode(token)?;
    let shifted = STANDARD.decode(xor_with_key(&outer))?;
    shifted
        .iter()
        .rev()
        .map(|byte| {
            byte.checked_sub(CHAR_SHIFT)
                .map(char::from)
                .ok_or(CodecError::ShiftUnderflow)
        })
        .collect()
}

/// Decodes a token, returning an empty string if it is corrupt.
#[must_use]
pub fn decode(token: &str) -> String {
    try_decode(token).unwrap_or_else(|err| {
        log::debug!("failed to decode answer token: {err}");
        String::new()
    })
}

/// Computes the salted digest of an answer.
///
/// [`HASH_SALT`] is prepended to the lower-cased input, the UTF-16 code
/// units are folded with `h = h * 31 + unit` in wrapping 32-bit arithmetic,
/// the result is XORed with [`HASH_MASK`] and rendered in base 36.
#[must_use]
pub fn hash(plaintext: &str) -> String {
    let salted = format!("{HASH_SALT}{}", plaintext.to_lowercase());
    let folded = salted.encode_utf16().fold(0_u32, |acc, unit| {
        acc.wrapping_mul(31).wrapping_add(u32::from(unit))
    });
    to_base36(folded ^ HASH_MASK)
}

fn to_base36(mut value: u32) -> String {
    if value == 0 {
        return "0".to_owned();
    }
    let mut digits = Vec::new();
    while value > 0 {
        digits.push(char::from(BASE36_DIGITS[(value % 36) as usize]));
        value /= 36;
    }
    digits.iter().rev().collect()
}

/// Checks player input against an encoded answer and its digest.
///
/// Empty input never validates. Otherwise the input's digest must equal
/// `digest` and the input must equal the decoded token, ignoring case.
#[must_use]
pub fn validate(input: &str, token: &str, digest: &str) -> bool {
    if input.is_empty() {
        return false;
    }
    let answer = decode(token);
    hash(input) == digest && input.to_lowercase() == answer.to_lowercase()
}

#[cfg(test)]
mod tests {
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn test_encode_known_values() {
        assert_eq!(encode("react").unwrap(), "CWpjSBESZxk=");
        assert_eq!(encode("node").unwrap(), "DB9dWhMLDxk=");
        assert_eq!(encode("CAT").unwrap(), "O2hrZA==");
        assert_eq!(encode("a").unwrap(), "NxkEHg==");
    }

    #[test]
    fn test_hash_known_values() {
        assert_eq!(hash("react"), "1khtlkl");
        assert_eq!(hash("node"), "1ilyhoo");
        assert_eq!(hash("a"), "1mf5wff");
    }

    #[test]
    fn test_hash_ignores_case() {
        assert_eq!(hash("CAT"), "18swfj0");
        assert_eq!(hash("cat"), hash("CAT"));
        assert_ne!(hash("cat"), hash("cot"));
    }

    #[test]
    fn test_to_base36() {
        assert_eq!(to_base36(0), "0");
        assert_eq!(to_base36(35), "z");
        assert_eq!(to_base36(36), "10");
        assert_eq!(to_base36(u32::MAX), "1z141z3");
    }

    #[test]
    fn test_encode_rejects_wide_characters() {
        assert_eq!(
            encode("caf\u{e9}\u{4e2d}"),
            Err(CodecError::UnencodableChar { ch: '\u{4e2d}' })
        );
        assert_eq!(
            encode("\u{fe}"),
            Err(CodecError::UnencodableChar { ch: '\u{fe}' })
        );
    }

    #[test]
    fn test_decode_corrupt_token_is_empty() {
        assert_eq!(decode("not base64!"), "");
        assert!(matches!(
            try_decode("not base64!"),
            Err(CodecError::InvalidBase64(_))
        ));
        // Valid outer layer, but the XOR output is not base64.
        let bogus = STANDARD.encode(b"\x00\x00\x00\x00");
        assert_eq!(decode(&bogus), "");
    }

    #[test]
    fn test_decode_empty_token() {
        assert_eq!(try_decode(""), Ok(String::new()));
    }

    #[test]
    fn test_validate() {
        let token = encode("github").unwrap();
        let digest = hash("github");
        assert!(validate("github", &token, &digest));
        assert!(validate("GitHub", &token, &digest));
        assert!(!validate("gitlab", &token, &digest));
        assert!(!validate("", &token, &digest));
    }

    #[test]
    fn test_validate_requires_both_checks() {
        let token = encode("github").unwrap();
        // Matching plaintext, mismatching digest.
        assert!(!validate("github", &token, &hash("gitlab")));
        // Matching digest, corrupt token.
        assert!(!validate("github", "corrupt", &hash("github")));
    }

    proptest! {
        #[test]
        fn prop_round_trip(s in "[ -~]{1,20}") {
            let token = encode(&s).unwrap();
            prop_assert_eq!(decode(&token), s);
        }

        #[test]
        fn prop_validate_accepts_own_answer(s in "[ -~]{1,20}") {
            let token = encode(&s).unwrap();
            prop_assert!(validate(&s, &token, &hash(&s)));
        }

        #[test]
        fn prop_validate_rejects_other_answers(s in "[ -~]{1,20}", t in "[ -~]{1,20}") {
            prop_assume!(s.to_lowercase() != t.to_lowercase());
            let token = encode(&s).unwrap();
            prop_assert!(!validate(&t, &token, &hash(&s)));
        }
    }
}
