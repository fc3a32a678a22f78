use thiserror::Error;

/// Precondition violations detected when a frame is constructed.
///
/// Processing never starts on a frame that fails these checks, so the
/// detectors themselves have no error path.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum FrameError {
    #[error("frame has zero area ({width}x{height})")]
    ZeroArea { width: u32, height: u32 },

    #[error("pixel buffer holds {actual} bytes, expected {expected} for RGBA")]
    BufferLength { expected: usize, actual: usize },

    #[error("buffer is {actual:?}, expected {expected:?} to match the frame")]
    DimensionMismatch {
        expected: (u32, u32),
        actual: (u32, u32),
    },
}
