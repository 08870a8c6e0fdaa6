//! Encodes UTF-16 code units into bytes.

use crate::buffer::{InputCursor, OutputCursor};
use crate::charsets::Charset;
use crate::engine::Coder;
use crate::error::{CodingError, CodingResult};
use crate::result::{CoderResult, CodingErrorAction};
use crate::state::SessionState;
use crate::transform::EncodeTransform;
use crate::CapacityHints;

/// The replacement that encoders start with, unless the charset has its own.
pub const DEFAULT_REPLACEMENT: &[u8] = b"?";

/// An encoder that turns UTF-16 code units into the bytes of one charset.
pub struct Encoder {
    coder: Coder<u16, u8>,
    /// The charset that built this coder, if any.
    charset: Option<Charset>,
}

impl Encoder {
    pub fn new(
        transform: Box<EncodeTransform>,
        hints: CapacityHints,
    ) -> CodingResult<Self> {
        let replacement = transform
            .default_replacement()
            .unwrap_or_else(|| DEFAULT_REPLACEMENT.to_vec());
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

    /// Encode as many units from 'input' as fit into 'output'.
    pub fn encode(
        &mut self,
        input: &mut InputCursor<u16>,
        output: &mut OutputCursor<u8>,
        end_of_input: bool,
    ) -> CodingResult<CoderResult> {
        self.coder.step(input, output, end_of_input)
    }

    pub fn flush(
        &mut self,
        output: &mut OutputCursor<u8>,
    ) -> CodingResult<CoderResult> {
        self.coder.flush(output)
    }

    pub fn reset(&mut self) -> CodingResult<()> {
        self.coder.reset()
    }

    /// Encode a whole buffer. Errors that are reported by the configured
    /// actions are raised.
    pub fn encode_all(&mut self, input: &[u16]) -> CodingResult<Vec<u8>> {
        self.coder.transcode(input)
    }

    pub fn encode_str(&mut self, input: &str) -> CodingResult<Vec<u8>> {
        let units: Vec<u16> = input.encode_utf16().collect();
        self.encode_all(&units)
    }

    /// Returns true if 'input' encodes without errors. Only legal when no
    /// encoding is in progress. The configured actions are left unchanged,
    /// and the encoder is reset afterwards.
    pub fn can_encode(&mut self, input: &[u16]) -> CodingResult<bool> {
        if input.is_empty() {
            return Ok(true);
        }
        match self.state() {
            SessionState::Reset => {}
            SessionState::Flushed => self.reset()?,
            current => {
                return Err(CodingError::IllegalState {
                    current,
                    requested: SessionState::Coding,
                })
            }
        }

        let malformed = self.coder.malformed_action();
        let unmappable = self.coder.unmappable_action();
        self.coder.set_malformed_action(CodingErrorAction::Report)?;
        self.coder.set_unmappable_action(CodingErrorAction::Report)?;
        let encoded = self.coder.transcode(input);
        let restored = self
            .coder
            .set_malformed_action(malformed)
            .and(self.coder.set_unmappable_action(unmappable));

        let res = match encoded {
            Ok(_) => true,
            Err(CodingError::Malformed(_) | CodingError::Unmappable(_)) => false,
            Err(err) => return Err(err),
        };
        restored?;
        self.reset()?;
        Ok(res)
    }

    pub fn can_encode_char(&mut self, unit: u16) -> CodingResult<bool> {
        self.can_encode(&[unit])
    }

    pub fn can_encode_str(&mut self, input: &str) -> CodingResult<bool> {
        let units: Vec<u16> = input.encode_utf16().collect();
        self.can_encode(&units)
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

    pub fn replacement(&self) -> &[u8] {
        self.coder.replacement()
    }

    /// Sets the bytes written in place of erroneous input. The bytes must be
    /// a legal sequence in the target charset.
    pub fn set_replacement(&mut self, replacement: &[u8]) -> CodingResult<()> {
        self.coder.set_replacement(replacement)
    }

    /// Returns true if the charset accepts 'replacement' as a byte sequence.
    pub fn is_legal_replacement(&self, replacement: &[u8]) -> bool {
        self.coder.transform().is_legal_replacement(replacement)
    }

    pub fn average_bytes_per_char(&self) -> f32 {
        self.coder.hints().average()
    }

    pub fn max_bytes_per_char(&self) -> f32 {
        self.coder.hints().maximum()
    }
}
