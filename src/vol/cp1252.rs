//! Convert names stored in Windows code page 1252 to UTF-8

use std::borrow::Cow;

/// Decode a Windows-1252 byte string.
///
/// Every byte maps to exactly one char, so distinct names stay distinct.
/// The five bytes 1252 leaves undefined map to the C1 control of the same
/// value, as Windows itself does. ASCII input is borrowed.
pub fn decode(bytes: &[u8]) -> Cow<'_, str> {
    if bytes.is_ascii() {
        // ASCII is always valid UTF-8
        return Cow::Borrowed(std::str::from_utf8(bytes).unwrap_or_default());
    }
    Cow::Owned(bytes.iter().copied().map(to_char).collect())
}

fn to_char(input: u8) -> char {
    match input {
        0x80 => '\u{20ac}',
        0x82 => '\u{201a}',
        0x83 => '\u{0192}',
        0x84 => '\u{201e}',
        0x85 => '\u{2026}',
        0x86 => '\u{2020}',
        0x87 => '\u{2021}',
        0x88 => '\u{02c6}',
        0x89 => '\u{2030}',
        0x8a => '\u{0160}',
        0x8b => '\u{2039}',
        0x8c => '\u{0152}',
        0x8e => '\u{017d}',
        0x91 => '\u{2018}',
        0x92 => '\u{2019}',
        0x93 => '\u{201c}',
        0x94 => '\u{201d}',
        0x95 => '\u{2022}',
        0x96 => '\u{2013}',
        0x97 => '\u{2014}',
        0x98 => '\u{02dc}',
        0x99 => '\u{2122}',
        0x9a => '\u{0161}',
        0x9b => '\u{203a}',
        0x9c => '\u{0153}',
        0x9e => '\u{017e}',
        0x9f => '\u{0178}',
        // ASCII, the undefined 0x81/0x8d/0x8f/0x90/0x9d, and Latin-1 above 0xa0
        _ => char::from(input),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn ascii_is_borrowed() {
        assert!(matches!(decode(b"sounds\\horn.wav"), Cow::Borrowed("sounds\\horn.wav")));
    }

    #[test]
    fn latin1_range_maps_to_same_code_point() {
        assert_eq!(decode(b"caf\xe9.txt"), "café.txt");
        assert_eq!(decode(b"\xc4rger"), "Ärger");
    }

    #[test]
    fn windows_specific_range() {
        assert_eq!(decode(b"\x80 \x99 \x9f"), "€ ™ Ÿ");
    }

    #[test]
    fn every_byte_decodes_to_a_distinct_char() {
        let chars: HashSet<char> = (0..=u8::MAX).map(to_char).collect();
        assert_eq!(chars.len(), 256);
    }
}
