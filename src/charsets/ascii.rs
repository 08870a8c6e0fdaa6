//! US-ASCII: the bytes 0x00..=0x7f map to the same code points.

use super::{code_point, decodes_cleanly};
use crate::transform::{DecodeTransform, EncodeTransform, Transform, Translation};
use crate::CapacityHints;

pub const DECODE_HINTS: CapacityHints = CapacityHints::fixed(1.0, 1.0);
pub const ENCODE_HINTS: CapacityHints = CapacityHints::fixed(1.0, 1.0);

pub fn decoder() -> Box<DecodeTransform> {
    Box::new(AsciiDecoder)
}

pub fn encoder() -> Box<EncodeTransform> {
    Box::new(AsciiEncoder)
}

pub struct AsciiDecoder;

impl Transform for AsciiDecoder {
    type Input = u8;
    type Output = u16;

    fn translate(&mut self, window: &[u8], out: &mut Vec<u16>) -> Translation {
        let byte = window[0];
        if byte >= 0x80 {
            return Translation::Malformed(1);
        }
        out.push(byte as u16);
        Translation::Mapped { consumed: 1 }
    }

    fn max_unit_len(&self) -> usize {
        1
    }
}

pub struct AsciiEncoder;

impl Transform for AsciiEncoder {
    type Input = u16;
    type Output = u8;

    fn translate(&mut self, window: &[u16], out: &mut Vec<u8>) -> Translation {
        match code_point(window) {
            Ok((cp, len)) if cp < 0x80 => {
                out.push(cp as u8);
                Translation::Mapped { consumed: len }
            }
            Ok((_, len)) => Translation::Unmappable(len),
            Err(translation) => translation,
        }
    }

    fn max_unit_len(&self) -> usize {
        2
    }

    fn is_legal_replacement(&self, replacement: &[u8]) -> bool {
        decodes_cleanly(decoder(), replacement)
    }
}

#[test]
fn test_ascii_units() {
    let mut out = Vec::new();
    assert_eq!(
        AsciiDecoder.translate(&[0x41, 0x42], &mut out),
        Translation::Mapped { consumed: 1 }
    );
    assert_eq!(AsciiDecoder.translate(&[0xff], &mut out), Translation::Malformed(1));
    assert_eq!(out, vec![0x41]);

    let mut out = Vec::new();
    assert_eq!(AsciiEncoder.translate(&[0xe9], &mut out), Translation::Unmappable(1));
    assert_eq!(
        AsciiEncoder.translate(&[0xd83d, 0xde00], &mut out),
        Translation::Unmappable(2)
    );
    assert!(out.is_empty());
    assert!(AsciiEncoder.is_legal_replacement(b"?"));
    assert!(!AsciiEncoder.is_legal_replacement(&[0x80]));
}
