//! Decoding of backslash escapes in string and key content.
//!
//! The recognizer hands out raw content; this is only applied by the event
//! layer when [`ParserOptions::decode_escapes`](crate::ParserOptions) is set.
//! Content without a backslash is returned borrowed.
//!
//! Supported escapes: `\"`, `\\`, `\/`, `\b`, `\f`, `\n`, `\r`, `\t` and
//! `\uXXXX`. A high surrogate must be followed by an escaped low surrogate;
//! lone surrogates are rejected.

use alloc::{borrow::Cow, string::String};
use core::str::Chars;

/// Decodes `raw`, or returns `None` if it contains an invalid escape.
pub(crate) fn unescape(raw: &str) -> Option<Cow<'_, str>> {
    if !raw.contains('\\') {
        return Some(Cow::Borrowed(raw));
    }

    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(c) = chars.next() {
        if c != '\\' {
            out.push(c);
            continue;
        }
        let decoded = match chars.next()? {
            '"' => '"',
            '\\' => '\\',
            '/' => '/',
            'b' => '\u{0008}',
            'f' => '\u{000C}',
            'n' => '\n',
            'r' => '\r',
            't' => '\t',
            'u' => unicode_escape(&mut chars)?,
            _ => return None,
        };
        out.push(decoded);
    }
    Some(Cow::Owned(out))
}

/// Decodes the digits after `\u`, pulling in a second `\uXXXX` for surrogate
/// pairs.
fn unicode_escape(chars: &mut Chars<'_>) -> Option<char> {
    let hi = hex4(chars)?;
    match hi {
        0xD800..=0xDBFF => {
            if chars.next()? != '\\' || chars.next()? != 'u' {
                return None;
            }
            let lo = hex4(chars)?;
            if !(0xDC00..=0xDFFF).contains(&lo) {
                return None;
            }
            char::from_u32(0x10000 + ((hi - 0xD800) << 10) + (lo - 0xDC00))
        }
        0xDC00..=0xDFFF => None,
        _ => char::from_u32(hi),
    }
}

fn hex4(chars: &mut Chars<'_>) -> Option<u32> {
    let mut acc = 0;
    for _ in 0..4 {
        acc = (acc << 4) | hex_val(chars.next()?)?;
    }
    Some(acc)
}

/// Convert a single ASCII hex digit into its 0..=15 value.
#[inline]
fn hex_val(c: char) -> Option<u32> {
    match c {
        '0'..='9' => Some((c as u32) - ('0' as u32)),
        'a'..='f' => Some((c as u32) - ('a' as u32) + 10),
        'A'..='F' => Some((c as u32) - ('A' as u32) + 10),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    #[case("plain", "plain")]
    #[case(r#"a\"b"#, "a\"b")]
    #[case(r"back\\slash", "back\\slash")]
    #[case(r"\/", "/")]
    #[case(r"\b\f\n\r\t", "\u{8}\u{c}\n\r\t")]
    #[case(r"\u0041\u00e9", "Aé")]
    #[case(r"\u2028", "\u{2028}")]
    #[case(r"\uD83D\uDE00", "\u{1F600}")]
    #[case(r"\ud83d\ude00!", "\u{1F600}!")]
    fn decodes(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(unescape(raw).as_deref(), Some(expected));
    }

    #[rstest]
    #[case(r"\x")]
    #[case(r"trailing\")]
    #[case(r"\u12")]
    #[case(r"\u12G4")]
    #[case(r"\uDE00")]
    #[case(r"\uD83D")]
    #[case(r"\uD83Dx")]
    #[case(r"\uD83DA")]
    fn rejects(#[case] raw: &str) {
        assert_eq!(unescape(raw), None);
    }

    #[test]
    fn borrows_without_escapes() {
        assert!(matches!(unescape("no escapes"), Some(Cow::Borrowed("no escapes"))));
    }
}
