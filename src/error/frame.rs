use std::fmt::{Display, Formatter};

/// Errors raised while feeding bytes to the [`FrameReceiver`](crate::frame::FrameReceiver).
#[derive(Debug)]
pub enum FrameError {
    /// The revision-76 close sentinel (`0xFF 0x00`) was seen and the
    /// two-byte ack could not be written back.
    CloseAckFailed(std::io::Error),
}

impl Display for FrameError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use FrameError::*;
        match self {
            CloseAckFailed(e) => write!(f, "failed to write revision-76 close ack: {}", e),
        }
    }
}

impl std::error::Error for FrameError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FrameError::CloseAckFailed(e) => Some(e),
        }
    }
}
