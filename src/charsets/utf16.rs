//! UTF-16 in a fixed byte order, without a byte order mark.

use super::{code_point, decodes_cleanly};
use crate::transform::{DecodeTransform, EncodeTransform, Transform, Translation};
use crate::CapacityHints;

pub const DECODE_HINTS: CapacityHints = CapacityHints::fixed(0.5, 1.0);
pub const ENCODE_HINTS: CapacityHints = CapacityHints::fixed(2.0, 2.0);

pub fn be_decoder() -> Box<DecodeTransform> {
    Box::new(Utf16Decoder { big_endian: true })
}

pub fn le_decoder() -> Box<DecodeTransform> {
    Box::new(Utf16Decoder { big_endian: false })
}

pub fn be_encoder() -> Box<EncodeTransform> {
    Box::new(Utf16Encoder { big_endian: true })
}

pub fn le_encoder() -> Box<EncodeTransform> {
    Box::new(Utf16Encoder { big_endian: false })
}

fn is_high(unit: u16) -> bool {
    (0xd800..=0xdbff).contains(&unit)
}

fn is_low(unit: u16) -> bool {
    (0xdc00..=0xdfff).contains(&unit)
}

pub struct Utf16Decoder {
    big_endian: bool,
}

impl Utf16Decoder {
    fn read(&self, bytes: &[u8]) -> u16 {
        let pair = [bytes[0], bytes[1]];
        if self.big_endian {
            u16::from_be_bytes(pair)
        } else {
            u16::from_le_bytes(pair)
        }
    }
}

impl Transform for Utf16Decoder {
    type Input = u8;
    type Output = u16;

    fn translate(&mut self, window: &[u8], out: &mut Vec<u16>) -> Translation {
        if window.len() < 2 {
            return Translation::NeedMoreInput;
        }
        let unit = self.read(window);
        if is_low(unit) {
            return Translation::Malformed(2);
        }
        if !is_high(unit) {
            out.push(unit);
            return Translation::Mapped { consumed: 2 };
        }

        if window.len() < 4 {
            return Translation::NeedMoreInput;
        }
        let low = self.read(&window[2..]);
        if !is_low(low) {
            return Translation::Malformed(2);
        }
        out.push(unit);
        out.push(low);
        Translation::Mapped { consumed: 4 }
    }

    fn max_unit_len(&self) -> usize {
        4
    }
}

pub struct Utf16Encoder {
    big_endian: bool,
}

impl Utf16Encoder {
    fn write(&self, unit: u16, out: &mut Vec<u8>) {
        if self.big_endian {
            out.extend(unit.to_be_bytes());
        } else {
            out.extend(unit.to_le_bytes());
        }
    }

    fn decoder(&self) -> Box<DecodeTransform> {
        if self.big_endian {
            be_decoder()
        } else {
            le_decoder()
        }
    }
}

impl Transform for Utf16Encoder {
    type Input = u16;
    type Output = u8;

    fn translate(&mut self, window: &[u16], out: &mut Vec<u8>) -> Translation {
        let len = match code_point(window) {
            Ok((_, len)) => len,
            Err(translation) => return translation,
        };
        for unit in &window[..len] {
            self.write(*unit, out);
        }
        Translation::Mapped { consumed: len }
    }

    fn max_unit_len(&self) -> usize {
        2
    }

    fn is_legal_replacement(&self, replacement: &[u8]) -> bool {
        decodes_cleanly(self.decoder(), replacement)
    }

    fn default_replacement(&self) -> Option<Vec<u8>> {
        let mut out = Vec::new();
        self.write(0xfffd, &mut out);
        Some(out)
    }
}

#[test]
fn test_utf16_decode_units() {
    let mut be = Utf16Decoder { big_endian: true };
    let mut le = Utf16Decoder { big_endian: false };
    let mut out = Vec::new();

    assert_eq!(be.translate(&[0x00, 0x41], &mut out), Translation::Mapped { consumed: 2 });
    assert_eq!(le.translate(&[0x41, 0x00], &mut out), Translation::Mapped { consumed: 2 });
    assert_eq!(out, vec![0x41, 0x41]);

    assert_eq!(be.translate(&[0x00], &mut out), Translation::NeedMoreInput);
    assert_eq!(be.translate(&[0xd8, 0x3d, 0xde], &mut out), Translation::NeedMoreInput);
    assert_eq!(be.translate(&[0xd8, 0x3d, 0x00, 0x41], &mut out), Translation::Malformed(2));
    assert_eq!(be.translate(&[0xde, 0x00], &mut out), Translation::Malformed(2));
    assert_eq!(
        be.translate(&[0xd8, 0x3d, 0xde, 0x00], &mut out),
        Translation::Mapped { consumed: 4 }
    );
    assert_eq!(out, vec![0x41, 0x41, 0xd83d, 0xde00]);
}

#[test]
fn test_utf16_replacement() {
    let be = Utf16Encoder { big_endian: true };
    assert_eq!(be.default_replacement(), Some(vec![0xff, 0xfd]));
    assert!(be.is_legal_replacement(&[0xff, 0xfd]));
    assert!(!be.is_legal_replacement(b"?"));
    assert!(!be.is_legal_replacement(&[0xdc, 0x00]));
}
