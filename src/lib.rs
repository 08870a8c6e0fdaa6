pub mod buffer;
pub mod charsets;
pub mod decoder;
pub mod encoder;
pub mod engine;
pub mod error;
pub mod result;
pub mod state;
pub mod transform;

pub use buffer::{InputCursor, OutputCursor};
pub use decoder::Decoder;
pub use encoder::Encoder;
pub use error::{CodingError, CodingResult};
pub use result::{CoderResult, CodingErrorAction};
pub use state::SessionState;
pub use transform::{DecodeTransform, EncodeTransform, Transform, Translation};

/// Stores the output size estimates of a coder. These are only used for
/// pre-sizing buffers and never affect the produced output.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct CapacityHints {
    /// Average number of output units produced per input unit.
    average: f32,
    /// Maximum number of output units produced per input unit.
    maximum: f32,
}

impl CapacityHints {
    pub fn new(average: f32, maximum: f32) -> CodingResult<Self> {
        // Written this way so that NaN is rejected too.
        if !(average > 0.0) {
            return Err(CodingError::InvalidHints("non-positive average"));
        }
        if !(maximum > 0.0) {
            return Err(CodingError::InvalidHints("non-positive maximum"));
        }
        if average > maximum {
            return Err(CodingError::InvalidHints("average exceeds maximum"));
        }
        Ok(Self { average, maximum })
    }

    /// Builds hints from constants that are known to be valid.
    pub(crate) const fn fixed(average: f32, maximum: f32) -> Self {
        Self { average, maximum }
    }

    pub fn average(&self) -> f32 {
        self.average
    }

    pub fn maximum(&self) -> f32 {
        self.maximum
    }

    /// Returns the initial output size for an input of 'len' units.
    pub fn estimate(&self, len: usize) -> usize {
        (len as f32 * self.average) as usize
    }
}

#[test]
fn test_capacity_hints() {
    assert!(CapacityHints::new(1.0, 1.0).is_ok());
    assert!(CapacityHints::new(0.5, 3.0).is_ok());
    assert!(CapacityHints::new(0.0, 1.0).is_err());
    assert!(CapacityHints::new(1.0, 0.0).is_err());
    assert!(CapacityHints::new(-1.0, 2.0).is_err());
    assert!(CapacityHints::new(2.0, 1.0).is_err());
    assert!(CapacityHints::new(f32::NAN, 1.0).is_err());

    let hints = CapacityHints::new(1.5, 3.0).unwrap();
    assert_eq!(hints.estimate(10), 15);
    assert_eq!(hints.estimate(0), 0);
}
