//! The coding engine that drives a 'Transform'. This module implements the
//! stepwise protocol once, for both directions: consume as much input as
//! possible, write as much output as fits, and report why we stopped. The
//! decoder and the encoder are thin wrappers around 'Coder'.

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};

use crate::buffer::{InputCursor, OutputCursor};
use crate::error::{CodingError, CodingResult};
use crate::result::{CoderResult, CodingErrorAction};
use crate::state::{Session, SessionState};
use crate::transform::{Transform, Translation};
use crate::CapacityHints;

/// Run a call into the transform, and turn a panic into an error message.
fn call_guarded<R>(f: impl FnOnce() -> R) -> Result<R, String> {
    panic::catch_unwind(AssertUnwindSafe(f)).map_err(panic_message)
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(msg) = payload.downcast_ref::<&str>() {
        return format!("transform panicked: {}", msg);
    }
    if let Some(msg) = payload.downcast_ref::<String>() {
        return format!("transform panicked: {}", msg);
    }
    String::from("transform panicked")
}

/// Check that a translation of a window of 'len' units is consistent with
/// the window. 'complete' is set when the window holds all of the available
/// input.
fn validate(
    translation: Translation,
    len: usize,
    complete: bool,
    max_unit_len: usize,
) -> Result<Translation, String> {
    match translation {
        Translation::Mapped { consumed } if consumed == 0 || consumed > len => {
            Err(format!("transform consumed {} of {} units", consumed, len))
        }
        Translation::Malformed(n) | Translation::Unmappable(n)
            if n == 0 || n > len =>
        {
            Err(format!("transform reported an error of {} of {} units", n, len))
        }
        Translation::NeedMoreInput if !complete || len >= max_unit_len => {
            Err(format!("transform asked for more input after {} units", len))
        }
        _ => Ok(translation),
    }
}

/// A stateful coder that converts units of type 'I' into units of type 'O'.
pub struct Coder<I: 'static, O: 'static> {
    /// The charset grammar.
    transform: Box<dyn Transform<Input = I, Output = O>>,
    /// Output size estimates.
    hints: CapacityHints,
    /// Session state, checked at the top of every entry point.
    session: Session,
    malformed_action: CodingErrorAction,
    unmappable_action: CodingErrorAction,
    replacement: Vec<O>,
    /// The leading units of an incomplete grammar unit, carried across calls.
    /// Always shorter than 'max_unit_len'.
    carry: Vec<I>,
    /// Set when the last step reported the carry as malformed.
    carry_reported: bool,
    /// The carry followed by the head of the input.
    window: Vec<I>,
    /// The output of the grammar unit that is being translated.
    scratch: Vec<O>,
    /// Output of a committed translation or of the transform's flush that
    /// did not fit yet. Written before anything else.
    pending: Vec<O>,
    /// Set once the transform's flush hook ran in this session.
    tail_taken: bool,
    max_unit_len: usize,
}

impl<I: Copy + Default + 'static, O: Copy + Default + 'static> Coder<I, O> {
    /// Creates a new coder around 'transform'. The 'replacement' is checked
    /// like any replacement that is set later.
    pub fn new(
        transform: Box<dyn Transform<Input = I, Output = O>>,
        hints: CapacityHints,
        replacement: &[O],
    ) -> CodingResult<Self> {
        let max_unit_len = transform.max_unit_len();
        if max_unit_len == 0 {
            return Err(CodingError::Malfunction(String::from(
                "transform has an empty grammar unit",
            )));
        }
        let mut coder = Self {
            transform,
            hints,
            session: Session::new(),
            malformed_action: CodingErrorAction::Report,
            unmappable_action: CodingErrorAction::Report,
            replacement: Vec::new(),
            carry: Vec::with_capacity(max_unit_len),
            carry_reported: false,
            window: Vec::with_capacity(max_unit_len),
            scratch: Vec::new(),
            pending: Vec::new(),
            tail_taken: false,
            max_unit_len,
        };
        coder.set_replacement(replacement)?;
        Ok(coder)
    }

    pub fn hints(&self) -> CapacityHints {
        self.hints
    }

    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    pub fn is_poisoned(&self) -> bool {
        self.session.is_poisoned()
    }

    pub fn transform(&self) -> &dyn Transform<Input = I, Output = O> {
        &*self.transform
    }

    pub fn malformed_action(&self) -> CodingErrorAction {
        self.malformed_action
    }

    pub fn unmappable_action(&self) -> CodingErrorAction {
        self.unmappable_action
    }

    /// Sets the action for malformed input. Takes effect at the next error.
    pub fn set_malformed_action(
        &mut self,
        action: CodingErrorAction,
    ) -> CodingResult<()> {
        self.session.check_usable()?;
        self.malformed_action = action;
        Ok(())
    }

    /// Sets the action for unmappable input. Takes effect at the next error.
    pub fn set_unmappable_action(
        &mut self,
        action: CodingErrorAction,
    ) -> CodingResult<()> {
        self.session.check_usable()?;
        self.unmappable_action = action;
        Ok(())
    }

    pub fn replacement(&self) -> &[O] {
        &self.replacement
    }

    /// Sets the units that are written in place of erroneous input.
    pub fn set_replacement(&mut self, replacement: &[O]) -> CodingResult<()> {
        self.session.check_usable()?;
        if replacement.is_empty() {
            return Err(CodingError::IllegalReplacement("empty replacement"));
        }
        if replacement.len() as f32 > self.hints.maximum() {
            return Err(CodingError::IllegalReplacement("replacement too long"));
        }
        let transform = &self.transform;
        let legal = call_guarded(|| transform.is_legal_replacement(replacement));
        match legal {
            Ok(true) => {
                self.replacement.clear();
                self.replacement.extend_from_slice(replacement);
                Ok(())
            }
            Ok(false) => Err(CodingError::IllegalReplacement(
                "not legal for this charset",
            )),
            Err(msg) => Err(self.malfunction(msg)),
        }
    }

    /// Poison the coder and build the error that reports the malfunction.
    fn malfunction(&mut self, msg: String) -> CodingError {
        log::error!("Poisoning the coder: {}", msg);
        self.session.poison();
        CodingError::Malfunction(msg)
    }

    /// Drop 'len' units from the carry and then from the input.
    fn consume(&mut self, input: &mut InputCursor<I>, len: usize) {
        let from_carry = len.min(self.carry.len());
        self.carry.drain(..from_carry);
        input.advance(len - from_carry);
    }

    /// Write as much of the pending output as fits. Returns true once
    /// nothing is pending.
    fn drain_pending(&mut self, output: &mut OutputCursor<O>) -> bool {
        let n = self.pending.len().min(output.remaining());
        output.put_slice(&self.pending[..n]);
        self.pending.drain(..n);
        self.pending.is_empty()
    }

    /// Translate the grammar unit at the start of 'window' into the scratch
    /// buffer.
    fn run_transform(
        &mut self,
        window: &[I],
        complete: bool,
    ) -> CodingResult<Translation> {
        self.scratch.clear();
        let transform = &mut self.transform;
        let scratch = &mut self.scratch;
        let max_unit_len = self.max_unit_len;
        call_guarded(|| transform.translate(window, scratch))
            .and_then(|t| validate(t, window.len(), complete, max_unit_len))
            .map_err(|msg| self.malfunction(msg))
    }

    /// Translate until the input runs out, the output is full, or the
    /// transform finds an error. Errors are returned without consuming the
    /// erroneous input; the caller applies the configured action. A mapped
    /// unit is committed right away, and the part of its output that does
    /// not fit is kept pending.
    fn translate_loop(
        &mut self,
        input: &mut InputCursor<I>,
        output: &mut OutputCursor<O>,
        end_of_input: bool,
    ) -> CodingResult<CoderResult> {
        loop {
            let window_len;
            let translation = if self.carry.is_empty() {
                if !input.has_remaining() {
                    return Ok(CoderResult::Underflow);
                }
                if output.remaining() == 0 {
                    return Ok(CoderResult::Overflow);
                }
                let window = input.remaining_slice();
                window_len = window.len();
                self.run_transform(window, true)?
            } else {
                // A grammar unit was started by an earlier call. Only judge
                // it once there is more input, or we know none will arrive.
                if !input.has_remaining() && !end_of_input {
                    return Ok(CoderResult::Underflow);
                }
                if output.remaining() == 0 {
                    return Ok(CoderResult::Overflow);
                }
                let room = self.max_unit_len - self.carry.len();
                let take = room.min(input.remaining());
                let mut window = std::mem::take(&mut self.window);
                window.clear();
                window.extend_from_slice(&self.carry);
                window.extend_from_slice(&input.remaining_slice()[..take]);
                window_len = window.len();
                let translation =
                    self.run_transform(&window, take == input.remaining());
                self.window = window;
                translation?
            };

            match translation {
                Translation::Mapped { consumed } => {
                    self.consume(input, consumed);
                    let n = self.scratch.len().min(output.remaining());
                    output.put_slice(&self.scratch[..n]);
                    if n < self.scratch.len() {
                        self.pending.extend_from_slice(&self.scratch[n..]);
                        return Ok(CoderResult::Overflow);
                    }
                }
                Translation::Malformed(len) => {
                    return Ok(CoderResult::Malformed(len));
                }
                Translation::Unmappable(len) => {
                    return Ok(CoderResult::Unmappable(len));
                }
                Translation::NeedMoreInput => {
                    if end_of_input {
                        return Ok(CoderResult::Malformed(window_len));
                    }
                    // The window is the whole available input. Keep it.
                    self.carry.extend_from_slice(input.remaining_slice());
                    input.advance(input.remaining());
                    return Ok(CoderResult::Underflow);
                }
            }
        }
    }

    fn step_impl(
        &mut self,
        input: &mut InputCursor<I>,
        output: &mut OutputCursor<O>,
        end_of_input: bool,
    ) -> CodingResult<CoderResult> {
        let next = self.session.on_step(end_of_input)?;
        self.session.enter(next);
        self.carry_reported = false;
        if !self.drain_pending(output) {
            return Ok(CoderResult::Overflow);
        }

        loop {
            let result = self.translate_loop(input, output, end_of_input)?;
            let (len, action) = match result {
                CoderResult::Malformed(len) => (len, self.malformed_action),
                CoderResult::Unmappable(len) => (len, self.unmappable_action),
                _ => return Ok(result),
            };

            match action {
                CodingErrorAction::Report => {
                    self.carry_reported = !self.carry.is_empty();
                    return Ok(result);
                }
                CodingErrorAction::Replace => {
                    if output.remaining() < self.replacement.len() {
                        return Ok(CoderResult::Overflow);
                    }
                    output.put_slice(&self.replacement);
                }
                CodingErrorAction::Ignore => {}
            }
            // Skip the erroneous input either way.
            self.consume(input, len);
        }
    }

    /// Translate as much of 'input' as possible into 'output'. Set
    /// 'end_of_input' when the caller has no input beyond this buffer.
    pub fn step(
        &mut self,
        input: &mut InputCursor<I>,
        output: &mut OutputCursor<O>,
        end_of_input: bool,
    ) -> CodingResult<CoderResult> {
        let result = self.step_impl(input, output, end_of_input)?;
        log::trace!(
            "Step stopped with {} (input at {}, output at {})",
            result,
            input.position(),
            output.position()
        );
        Ok(result)
    }

    /// Write the trailing output of the session. Legal after a step with
    /// 'end_of_input' set, and again (as a no-op) after a completed flush.
    pub fn flush(
        &mut self,
        output: &mut OutputCursor<O>,
    ) -> CodingResult<CoderResult> {
        let next = self.session.on_flush()?;
        if self.session.state() == SessionState::Flushed {
            return Ok(CoderResult::Underflow);
        }
        // The last step stopped inside a grammar unit without judging it.
        if !self.carry.is_empty() && !self.carry_reported {
            return Err(CodingError::IllegalState {
                current: self.session.state(),
                requested: next,
            });
        }
        if !self.drain_pending(output) {
            return Ok(CoderResult::Overflow);
        }

        // The last step reported an incomplete unit that the caller never
        // resolved. Resolve it under the current policy.
        if !self.carry.is_empty() {
            let len = self.carry.len();
            match self.malformed_action {
                CodingErrorAction::Report => {
                    return Ok(CoderResult::Malformed(len));
                }
                CodingErrorAction::Replace => {
                    if output.remaining() < self.replacement.len() {
                        return Ok(CoderResult::Overflow);
                    }
                    output.put_slice(&self.replacement);
                }
                CodingErrorAction::Ignore => {}
            }
            self.carry.clear();
            self.carry_reported = false;
        }

        if !self.tail_taken {
            let transform = &mut self.transform;
            let pending = &mut self.pending;
            if let Err(msg) = call_guarded(|| transform.flush(pending)) {
                return Err(self.malfunction(msg));
            }
            self.tail_taken = true;
            if !self.drain_pending(output) {
                return Ok(CoderResult::Overflow);
            }
        }
        self.session.enter(next);
        Ok(CoderResult::Underflow)
    }

    /// Discard the coding progress. The actions and the replacement are
    /// kept.
    pub fn reset(&mut self) -> CodingResult<()> {
        let next = self.session.on_reset()?;
        let transform = &mut self.transform;
        if let Err(msg) = call_guarded(|| transform.reset()) {
            return Err(self.malfunction(msg));
        }
        self.carry.clear();
        self.carry_reported = false;
        self.pending.clear();
        self.tail_taken = false;
        self.session.enter(next);
        Ok(())
    }

    /// Translate the whole of 'input' in one call. Content errors that are
    /// reported by the configured actions are raised as errors.
    pub fn transcode(&mut self, input: &[I]) -> CodingResult<Vec<O>> {
        self.reset()?;
        let mut out = vec![O::default(); self.hints.estimate(input.len())];
        let mut src = InputCursor::new(input);
        let mut written = 0;

        loop {
            let mut dst = OutputCursor::with_position(&mut out, written);
            let mut result = self.step(&mut src, &mut dst, true)?;
            if result.is_underflow() {
                result = self.flush(&mut dst)?;
            }
            written = dst.position();

            match result {
                CoderResult::Underflow => break,
                CoderResult::Overflow => {
                    // Make progress even if the estimate was zero.
                    let n = 2 * out.len() + 1;
                    log::debug!("Growing the output from {} to {}", out.len(), n);
                    out.resize(n, O::default());
                }
                CoderResult::Malformed(len) => {
                    log::warn!("Malformed input at {}", src.position());
                    return Err(CodingError::Malformed(len));
                }
                CoderResult::Unmappable(len) => {
                    log::warn!("Unmappable input at {}", src.position());
                    return Err(CodingError::Unmappable(len));
                }
            }
        }

        out.truncate(written);
        Ok(out)
    }
}

#[test]
fn test_validate_translation() {
    let mapped = Translation::Mapped { consumed: 2 };
    assert_eq!(validate(mapped, 2, true, 4), Ok(mapped));
    assert!(validate(Translation::Mapped { consumed: 0 }, 2, true, 4).is_err());
    assert!(validate(Translation::Mapped { consumed: 3 }, 2, true, 4).is_err());
    assert!(validate(Translation::Malformed(0), 2, true, 4).is_err());
    assert!(validate(Translation::Unmappable(3), 2, true, 4).is_err());

    let more = Translation::NeedMoreInput;
    assert_eq!(validate(more, 3, true, 4), Ok(more));
    assert!(validate(more, 4, true, 4).is_err());
    assert!(validate(more, 2, false, 4).is_err());
}
