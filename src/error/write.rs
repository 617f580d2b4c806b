use std::fmt::{Display, Formatter};

/// Errors raised by [`FrameEmitter::write`](crate::frame::FrameEmitter::write).
#[derive(Debug)]
pub enum WriteError {
    /// A websocket frame was written before the connection reached
    /// [`ConnState::Established`](crate::connection::ConnState::Established).
    NotEstablished,

    /// The padded payload did not reserve enough pre/post padding for the
    /// chosen revision's framing.
    NotEnoughPadding,

    /// The connection's revision has no emit-side wire format defined in
    /// this core (see `SPEC_FULL.md`, revision detection / emit dispatch).
    UnsupportedRevision,

    /// The transport's send primitive reported a short write or an error.
    Transport(std::io::Error),
}

impl Display for WriteError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use WriteError::*;
        match self {
            NotEstablished => write!(f, "websocket write attempted before handshake completed"),
            NotEnoughPadding => write!(f, "payload does not reserve enough framing padding"),
            UnsupportedRevision => write!(f, "revision has no defined emit wire format"),
            Transport(e) => write!(f, "transport write failed: {}", e),
        }
    }
}

impl std::error::Error for WriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            WriteError::Transport(e) => Some(e),
            _ => None,
        }
    }
}
