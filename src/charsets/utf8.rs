//! UTF-8. Invalid input is reported one maximal invalid subpart at a time:
//! the longest prefix of a sequence that could have started a valid
//! character, or a single byte if no such prefix exists.

use super::{code_point, decodes_cleanly, push_utf16};
use crate::transform::{DecodeTransform, EncodeTransform, Transform, Translation};
use crate::CapacityHints;

pub const DECODE_HINTS: CapacityHints = CapacityHints::fixed(1.0, 1.0);
pub const ENCODE_HINTS: CapacityHints = CapacityHints::fixed(1.1, 3.0);

pub fn decoder() -> Box<DecodeTransform> {
    Box::new(Utf8Decoder)
}

pub fn encoder() -> Box<EncodeTransform> {
    Box::new(Utf8Encoder)
}

/// Returns the sequence length for the lead byte 'b', and the legal range of
/// the byte that follows it.
fn classify(b: u8) -> Option<(usize, u8, u8)> {
    match b {
        0xc2..=0xdf => Some((2, 0x80, 0xbf)),
        0xe0 => Some((3, 0xa0, 0xbf)),
        0xe1..=0xec | 0xee..=0xef => Some((3, 0x80, 0xbf)),
        // No surrogates.
        0xed => Some((3, 0x80, 0x9f)),
        0xf0 => Some((4, 0x90, 0xbf)),
        0xf1..=0xf3 => Some((4, 0x80, 0xbf)),
        // Nothing above U+10FFFF.
        0xf4 => Some((4, 0x80, 0x8f)),
        _ => None,
    }
}

pub struct Utf8Decoder;

impl Transform for Utf8Decoder {
    type Input = u8;
    type Output = u16;

    fn translate(&mut self, window: &[u8], out: &mut Vec<u16>) -> Translation {
        let lead = window[0];
        if lead < 0x80 {
            out.push(lead as u16);
            return Translation::Mapped { consumed: 1 };
        }

        let Some((len, low, high)) = classify(lead) else {
            return Translation::Malformed(1);
        };

        let mut cp = (lead & (0x7f >> len)) as u32;
        for i in 1..len {
            let Some(&b) = window.get(i) else {
                return Translation::NeedMoreInput;
            };
            let (lo, hi) = if i == 1 { (low, high) } else { (0x80, 0xbf) };
            if b < lo || b > hi {
                return Translation::Malformed(i);
            }
            cp = (cp << 6) | (b & 0x3f) as u32;
        }

        push_utf16(cp, out);
        Translation::Mapped { consumed: len }
    }

    fn max_unit_len(&self) -> usize {
        4
    }
}

pub struct Utf8Encoder;

impl Transform for Utf8Encoder {
    type Input = u16;
    type Output = u8;

    fn translate(&mut self, window: &[u16], out: &mut Vec<u8>) -> Translation {
        let (cp, len) = match code_point(window) {
            Ok(res) => res,
            Err(translation) => return translation,
        };

        match cp {
            0..=0x7f => out.push(cp as u8),
            0x80..=0x7ff => {
                out.push(0xc0 | (cp >> 6) as u8);
                out.push(0x80 | (cp & 0x3f) as u8);
            }
            0x800..=0xffff => {
                out.push(0xe0 | (cp >> 12) as u8);
                out.push(0x80 | ((cp >> 6) & 0x3f) as u8);
                out.push(0x80 | (cp & 0x3f) as u8);
            }
            _ => {
                out.push(0xf0 | (cp >> 18) as u8);
                out.push(0x80 | ((cp >> 12) & 0x3f) as u8);
                out.push(0x80 | ((cp >> 6) & 0x3f) as u8);
                out.push(0x80 | (cp & 0x3f) as u8);
            }
        }
        Translation::Mapped { consumed: len }
    }

    fn max_unit_len(&self) -> usize {
        2
    }

    fn is_legal_replacement(&self, replacement: &[u8]) -> bool {
        decodes_cleanly(decoder(), replacement)
    }
}

#[test]
fn test_utf8_decode_units() {
    fn one(window: &[u8]) -> (Translation, Vec<u16>) {
        let mut out = Vec::new();
        let res = Utf8Decoder.translate(window, &mut out);
        (res, out)
    }

    assert_eq!(one(b"a"), (Translation::Mapped { consumed: 1 }, vec![0x61]));
    assert_eq!(
        one(&[0xc3, 0xa9]),
        (Translation::Mapped { consumed: 2 }, vec![0xe9])
    );
    assert_eq!(
        one(&[0xe2, 0x82, 0xac]),
        (Translation::Mapped { consumed: 3 }, vec![0x20ac])
    );
    assert_eq!(
        one(&[0xf0, 0x9f, 0x98, 0x80]),
        (Translation::Mapped { consumed: 4 }, vec![0xd83d, 0xde00])
    );

    assert_eq!(one(&[0xe2, 0x82]).0, Translation::NeedMoreInput);
    assert_eq!(one(&[0xe2, 0x82, 0x41]).0, Translation::Malformed(2));
    assert_eq!(one(&[0xe0, 0x80]).0, Translation::Malformed(1));
    assert_eq!(one(&[0xed, 0xa0, 0x80]).0, Translation::Malformed(1));
    assert_eq!(one(&[0xf4, 0x90]).0, Translation::Malformed(1));
    assert_eq!(one(&[0xc0]).0, Translation::Malformed(1));
    assert_eq!(one(&[0x80]).0, Translation::Malformed(1));
    assert_eq!(one(&[0xff]).0, Translation::Malformed(1));
}

#[test]
fn test_utf8_encode_units() {
    let text = "a\u{e9}\u{20ac}\u{1f600}";
    let units: Vec<u16> = text.encode_utf16().collect();
    let mut out = Vec::new();
    let mut pos = 0;
    while pos < units.len() {
        match Utf8Encoder.translate(&units[pos..], &mut out) {
            Translation::Mapped { consumed } => pos += consumed,
            other => panic!("unexpected {:?}", other),
        }
    }
    assert_eq!(out, text.as_bytes());
}
