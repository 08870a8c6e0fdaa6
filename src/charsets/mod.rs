//! Built-in charsets, and the registry that maps charset names to the
//! factories of their transforms.

pub mod ascii;
pub mod latin1;
pub mod utf16;
pub mod utf8;

use std::collections::HashMap;
use std::sync::OnceLock;

use crate::decoder::Decoder;
use crate::encoder::Encoder;
use crate::error::{CodingError, CodingResult};
use crate::transform::{DecodeTransform, EncodeTransform, Translation};
use crate::CapacityHints;

/// Builds a fresh decoding transform.
pub type DecoderFactory = fn() -> Box<DecodeTransform>;
/// Builds a fresh encoding transform.
pub type EncoderFactory = fn() -> Box<EncodeTransform>;

/// A named charset, with the factories of both of its directions.
#[derive(Clone, Debug)]
pub struct Charset {
    name: String,
    aliases: Vec<String>,
    decoder: DecoderFactory,
    decode_hints: CapacityHints,
    encoder: EncoderFactory,
    encode_hints: CapacityHints,
}

impl Charset {
    pub fn new(
        name: &str,
        aliases: &[&str],
        decoder: DecoderFactory,
        decode_hints: CapacityHints,
        encoder: EncoderFactory,
        encode_hints: CapacityHints,
    ) -> Self {
        Self {
            name: name.to_string(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            decoder,
            decode_hints,
            encoder,
            encode_hints,
        }
    }

    /// The canonical name.
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    pub fn new_decoder(&self) -> CodingResult<Decoder> {
        let decoder = Decoder::new((self.decoder)(), self.decode_hints)?;
        Ok(decoder.with_charset(self))
    }

    pub fn new_encoder(&self) -> CodingResult<Encoder> {
        let encoder = Encoder::new((self.encoder)(), self.encode_hints)?;
        Ok(encoder.with_charset(self))
    }
}

/// Maps charset names and aliases to charsets. Lookups ignore ASCII case.
#[derive(Default)]
pub struct Registry {
    charsets: Vec<Charset>,
    by_name: HashMap<String, usize>,
}

impl Registry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a registry with all of the built-in charsets.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        for charset in builtins() {
            registry.register(charset);
        }
        registry
    }

    /// Adds 'charset'. Names that are already taken now refer to it.
    pub fn register(&mut self, charset: Charset) {
        let index = self.charsets.len();
        let names = std::iter::once(&charset.name).chain(charset.aliases.iter());
        for name in names {
            if let Some(prev) = self.by_name.insert(name.to_ascii_lowercase(), index) {
                log::debug!(
                    "Charset name {} moves from {} to {}",
                    name,
                    self.charsets[prev].name,
                    charset.name
                );
            }
        }
        self.charsets.push(charset);
    }

    pub fn lookup(&self, name: &str) -> CodingResult<&Charset> {
        match self.by_name.get(&name.to_ascii_lowercase()) {
            Some(index) => Ok(&self.charsets[*index]),
            None => Err(CodingError::UnsupportedCharset(name.to_string())),
        }
    }

    pub fn is_supported(&self, name: &str) -> bool {
        self.lookup(name).is_ok()
    }

    /// Returns the canonical names of the charsets that can still be looked
    /// up by their canonical name.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .charsets
            .iter()
            .enumerate()
            .filter(|(i, c)| self.by_name.get(&c.name.to_ascii_lowercase()) == Some(i))
            .map(|(_, c)| c.name())
            .collect();
        names.sort_unstable();
        names
    }
}

/// Look up a built-in charset.
pub fn for_name(name: &str) -> CodingResult<&'static Charset> {
    static BUILTINS: OnceLock<Registry> = OnceLock::new();
    BUILTINS.get_or_init(Registry::with_builtins).lookup(name)
}

fn builtins() -> Vec<Charset> {
    vec![
        Charset::new(
            "US-ASCII",
            &["ascii", "us", "iso646-us", "ansi_x3.4-1968", "cp367"],
            ascii::decoder,
            ascii::DECODE_HINTS,
            ascii::encoder,
            ascii::ENCODE_HINTS,
        ),
        Charset::new(
            "ISO-8859-1",
            &["latin1", "l1", "iso8859-1", "iso_8859-1", "cp819"],
            latin1::decoder,
            latin1::DECODE_HINTS,
            latin1::encoder,
            latin1::ENCODE_HINTS,
        ),
        Charset::new(
            "UTF-8",
            &["utf8"],
            utf8::decoder,
            utf8::DECODE_HINTS,
            utf8::encoder,
            utf8::ENCODE_HINTS,
        ),
        Charset::new(
            "UTF-16BE",
            &["utf16be", "x-utf-16be"],
            utf16::be_decoder,
            utf16::DECODE_HINTS,
            utf16::be_encoder,
            utf16::ENCODE_HINTS,
        ),
        Charset::new(
            "UTF-16LE",
            &["utf16le", "x-utf-16le"],
            utf16::le_decoder,
            utf16::DECODE_HINTS,
            utf16::le_encoder,
            utf16::ENCODE_HINTS,
        ),
    ]
}

/// Returns true if 'bytes' decode without errors using 'transform'. This is
/// how the built-in encoders check their replacements.
pub(crate) fn decodes_cleanly(transform: Box<DecodeTransform>, bytes: &[u8]) -> bool {
    let hints = CapacityHints::fixed(1.0, 1.0);
    Decoder::new(transform, hints)
        .and_then(|mut decoder| decoder.decode_all(bytes))
        .is_ok()
}

/// Read the code point at the start of a UTF-16 window. Returns the code
/// point and the number of units it takes, or the translation to report.
pub(crate) fn code_point(window: &[u16]) -> Result<(u32, usize), Translation> {
    let unit = window[0];
    match unit {
        0xd800..=0xdbff => match window.get(1) {
            None => Err(Translation::NeedMoreInput),
            Some(&low @ 0xdc00..=0xdfff) => {
                let high = (unit as u32 - 0xd800) << 10;
                Ok((0x10000 + (high | (low as u32 - 0xdc00)), 2))
            }
            Some(_) => Err(Translation::Malformed(1)),
        },
        0xdc00..=0xdfff => Err(Translation::Malformed(1)),
        _ => Ok((unit as u32, 1)),
    }
}

/// Append the UTF-16 units of the code point 'cp'.
pub(crate) fn push_utf16(cp: u32, out: &mut Vec<u16>) {
    if cp < 0x10000 {
        out.push(cp as u16);
        return;
    }
    let cp = cp - 0x10000;
    out.push(0xd800 | (cp >> 10) as u16);
    out.push(0xdc00 | (cp & 0x3ff) as u16);
}

#[test]
fn test_code_point() {
    assert_eq!(code_point(&[0x41]), Ok((0x41, 1)));
    assert_eq!(code_point(&[0xd83d, 0xde00]), Ok((0x1f600, 2)));
    assert_eq!(code_point(&[0xd83d]), Err(Translation::NeedMoreInput));
    assert_eq!(code_point(&[0xd83d, 0x41]), Err(Translation::Malformed(1)));
    assert_eq!(code_point(&[0xde00, 0x41]), Err(Translation::Malformed(1)));

    let mut out = Vec::new();
    push_utf16(0x1f600, &mut out);
    push_utf16(0xe9, &mut out);
    assert_eq!(out, vec![0xd83d, 0xde00, 0xe9]);
}
