//! Decodes bytes into UTF-16 code units.

use crate::buffer::{InputCursor, OutputCursor};
use crate::charsets::Charset;
use crate::engine::Coder;
use crate::error::{CodingError, CodingResult};
use crate::result::{CoderResult, CodingErrorAction};
use crate::state::SessionState;
use crate::transform::DecodeTransform;
use crate::CapacityHints;

/// The Unicode replacement character.
pub const REPLACEMENT_CHARACTER: u16 = 0xfffd;

/// A decoder that turns a byte stream into UTF-16 code units, using the
/// grammar of one charset.
pub struct Decoder {
    coder: Coder<u8, u16>,
    /// The charset that built this coder, if any.
    charset: Option<Charset>,
}

impl Decoder {
    /// Creates a new decoder. The replacement starts as U+FFFD unless the
    /// transform has its own.
    pub fn new(
        transform: Box<DecodeTransform>,
        hints: CapacityHints,
    ) -> CodingResult<Self> {
        let replacement = transform
            .default_replacement()
            .unwrap_or_else(|| vec![REPLACEMENT_CHARACTER]);
        let coder = Coder::new(transform, hints, &replacement)?;
        Ok(Self {
            coder,
            charset: None,
        })
    }

    pub(crate) fn with_charset(mut self, charset: &Charset) -> Self {
        self.charset = Some(charset.clone());
        self
    }

    /// The charset this coder belongs to. Coders built directly from a
    /// transform have none.
    pub fn charset(&self) -> Option<&Charset> {
        self.charset.as_ref()
    }

    pub fn charset_name(&self) -> Option<&str> {
        self.charset.as_ref().map(|c| c.name())
    }

    /// Decode as many bytes from 'input' as fit into 'output'.
    pub fn decode(
        &mut self,
        input: &mut InputCursor<u8>,
        output: &mut OutputCursor<u16>,
        end_of_input: bool,
    ) -> CodingResult<CoderResult> {
        self.coder.step(input, output, end_of_input)
    }

    pub fn flush(
        &mut self,
        output: &mut OutputCursor<u16>,
    ) -> CodingResult<CoderResult> {
        self.coder.flush(output)
    }

    pub fn reset(&mut self) -> CodingResult<()> {
        self.coder.reset()
    }

    /// Decode a whole buffer. Errors that are reported by the configured
    /// actions are raised.
    pub fn decode_all(&mut self, input: &[u8]) -> CodingResult<Vec<u16>> {
        self.coder.transcode(input)
    }

    /// Decode a whole buffer into a string. Unpaired surrogates in the
    /// decoded units are raised as malformed input.
    pub fn decode_to_string(&mut self, input: &[u8]) -> CodingResult<String> {
        let units = self.decode_all(input)?;
        char::decode_utf16(units.iter().copied())
            .map(|c| c.map_err(|_| CodingError::Malformed(1)))
            .collect()
    }

    pub fn state(&self) -> SessionState {
        self.coder.state()
    }

    pub fn is_poisoned(&self) -> bool {
        self.coder.is_poisoned()
    }

    pub fn malformed_action(&self) -> CodingErrorAction {
        self.coder.malformed_action()
    }

    pub fn unmappable_action(&self) -> CodingErrorAction {
        self.coder.unmappable_action()
    }

    /// Sets the action for malformed input. Fails on a poisoned coder.
    pub fn set_malformed_action(
        &mut self,
        action: CodingErrorAction,
    ) -> CodingResult<&mut Self> {
        self.coder.set_malformed_action(action)?;
        Ok(self)
    }

    pub fn set_unmappable_action(
        &mut self,
        action: CodingErrorAction,
    ) -> CodingResult<&mut Self> {
        self.coder.set_unmappable_action(action)?;
        Ok(self)
    }

    pub fn replacement(&self) -> &[u16] {
        self.coder.replacement()
    }

    pub fn set_replacement(&mut self, replacement: &[u16]) -> CodingResult<()> {
        self.coder.set_replacement(replacement)
    }

    /// Sets the replacement from a string.
    pub fn set_replacement_str(&mut self, replacement: &str) -> CodingResult<()> {
        let units: Vec<u16> = replacement.encode_utf16().collect();
        self.set_replacement(&units)
    }

    pub fn average_chars_per_byte(&self) -> f32 {
        self.coder.hints().average()
    }

    pub fn max_chars_per_byte(&self) -> f32 {
        self.coder.hints().maximum()
    }
}
