//! The interface that each charset implements. A transform knows the grammar
//! of one charset in one direction, and translates one grammar unit at a
//! time. Everything else (buffering, error policy, session state) is handled
//! by the coder that drives it.

/// The outcome of translating the grammar unit at the start of a window.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Translation {
    /// The first 'consumed' units of the window were translated, and the
    /// output was appended to the output vector.
    Mapped { consumed: usize },
    /// The first N units of the window are not valid in the source grammar.
    Malformed(usize),
    /// The first N units of the window are valid but have no representation
    /// in the target.
    Unmappable(usize),
    /// The window ends inside a grammar unit that could still be completed.
    NeedMoreInput,
}

/// A pluggable translation between two kinds of units.
pub trait Transform: Send {
    type Input: Copy + Default;
    type Output: Copy + Default;

    /// Translate the grammar unit at the start of 'window', which is never
    /// empty. Output is appended to 'out' only for 'Mapped' results.
    ///
    /// The coder commits every 'Mapped' result, even when its output does
    /// not fit yet, so state kept across calls may change only when
    /// returning 'Mapped'. Other results may be asked for again.
    fn translate(
        &mut self,
        window: &[Self::Input],
        out: &mut Vec<Self::Output>,
    ) -> Translation;

    /// The length of the longest grammar unit, in input units.
    fn max_unit_len(&self) -> usize;

    /// Returns true if 'replacement' may be written in place of erroneous
    /// input.
    fn is_legal_replacement(&self, _replacement: &[Self::Output]) -> bool {
        true
    }

    /// The replacement that coders start with, if the charset has its own.
    fn default_replacement(&self) -> Option<Vec<Self::Output>> {
        None
    }

    /// Append any trailing output once the input is complete.
    fn flush(&mut self, _out: &mut Vec<Self::Output>) {}

    /// Forget any state kept across calls to 'translate'.
    fn reset(&mut self) {}
}

/// A transform from bytes to UTF-16 code units.
pub type DecodeTransform = dyn Transform<Input = u8, Output = u16>;

/// A transform from UTF-16 code units to bytes.
pub type EncodeTransform = dyn Transform<Input = u16, Output = u8>;
