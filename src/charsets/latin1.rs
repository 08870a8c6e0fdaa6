//! ISO-8859-1: every byte maps to the code point of the same value.

use super::{code_point, decodes_cleanly};
use crate::transform::{DecodeTransform, EncodeTransform, Transform, Translation};
use crate::CapacityHints;

pub const DECODE_HINTS: CapacityHints = CapacityHints::fixed(1.0, 1.0);
pub const ENCODE_HINTS: CapacityHints = CapacityHints::fixed(1.0, 1.0);

pub fn decoder() -> Box<DecodeTransform> {
    Box::new(Latin1Decoder)
}

pub fn encoder() -> Box<EncodeTransform> {
    Box::new(Latin1Encoder)
}

pub struct Latin1Decoder;

impl Transform for Latin1Decoder {
    type Input = u8;
    type Output = u16;

    fn translate(&mut self, window: &[u8], out: &mut Vec<u16>) -> Translation {
        out.push(window[0] as u16);
        Translation::Mapped { consumed: 1 }
    }

    fn max_unit_len(&self) -> usize {
        1
    }
}

pub struct Latin1Encoder;

impl Transform for Latin1Encoder {
    type Input = u16;
    type Output = u8;

    fn translate(&mut self, window: &[u16], out: &mut Vec<u8>) -> Translation {
        match code_point(window) {
            Ok((cp, len)) if cp <= 0xff => {
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
