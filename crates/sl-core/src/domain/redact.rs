use sha2::{Digest, Sha256};

/// Characters of original text kept in a redacted preview.
pub const PREVIEW_PREFIX_LEN: usize = 40;
/// Hex characters of the SHA-256 digest appended to a preview.
pub const PREVIEW_DIGEST_LEN: usize = 12;

const KEY_SEPARATOR: [u8; 1] = [0x1f];

/// Hex SHA-256 of raw bytes.
pub fn digest_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Redacted preview of a text: a bounded prefix plus a short one-way digest
/// of the full text. Texts longer than the prefix never appear whole; the
/// digest lets a holder of the original verify what was shown.
pub fn hash_preview(text: &str) -> String {
    let digest_full = digest_hex(text.as_bytes());
    let digest = &digest_full[..PREVIEW_DIGEST_LEN];
    if text.chars().count() > PREVIEW_PREFIX_LEN {
        let prefix: String = text
            .chars()
            .take(PREVIEW_PREFIX_LEN)
            .map(|c| if c == '\n' { ' ' } else { c })
            .collect();
        format!("{prefix}...|{digest}")
    } else {
        format!("{text}|{digest}")
    }
}

/// Stable content identity over normalized field values, order-sensitive and
/// label-independent. Used to match records across sessions without trusting
/// array positions.
pub fn content_key(parts: &[&str]) -> String {
    let mut hasher = Sha256::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            hasher.update(KEY_SEPARATOR);
        }
        hasher.update(part.as_bytes());
    }
    hex::encode(hasher.finalize())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_short_text_keeps_full_text_and_digest() {
        let preview = hash_preview("hello");
        let digest = &digest_hex(b"hello")[..PREVIEW_DIGEST_LEN];
        assert_eq!(preview, format!("hello|{digest}"));
    }

    #[test]
    fn test_long_text_never_appears_whole() {
        let text = "a sentence that is well over forty characters long in total";
        let preview = hash_preview(text);
        assert!(!preview.contains(text));
        assert!(preview.starts_with("a sentence that is well over forty chara..."));
    }

    #[test]
    fn test_digest_verifiable_from_original() {
        let text = "some sensitive content that must not leak into the log file";
        let preview = hash_preview(text);
        let digest = preview.rsplit('|').next().expect("digest suffix");
        assert_eq!(digest, &digest_hex(text.as_bytes())[..PREVIEW_DIGEST_LEN]);
    }

    #[test]
    fn test_newlines_folded_in_prefix() {
        let text = format!("line one\nline two\nline three{}", "x".repeat(40));
        let preview = hash_preview(&text);
        let prefix = preview.split("...|").next().expect("prefix");
        assert!(!prefix.contains('\n'));
        assert!(prefix.starts_with("line one line two"));
    }

    #[test]
    fn test_content_key_is_order_sensitive() {
        assert_eq!(content_key(&["a", "b"]), content_key(&["a", "b"]));
        assert_ne!(content_key(&["a", "b"]), content_key(&["b", "a"]));
    }

    #[test]
    fn test_content_key_separator_prevents_boundary_collisions() {
        assert_ne!(content_key(&["ab", "c"]), content_key(&["a", "bc"]));
    }
}
