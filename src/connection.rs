//! Per-peer connection state tying the handshake parser, frame receiver
//! and frame emitter together behind one byte-feed entry point.

use crate::config::FRAME_MASK_LEN;
use crate::error::Error;
use crate::frame::{self, FrameKind, FrameReceiver, RxOutcome};
use crate::handshake::{HandshakeParser, ParserState};
use crate::padding::PaddedPayload;
use crate::protocol::{Protocol, Transport};
use crate::revision::Revision;
use crate::token::TokenId;

/// Connection lifecycle state (spec.md §3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnState {
    /// Handshake Parser is active.
    Handshaking,
    /// Frame Receiver/Emitter are active.
    Established,
    /// Teardown in progress (close sentinel seen, or http-only completion).
    Closing,
    /// Fully torn down; further feeds are no-ops.
    Dead,
}

/// What happened as a result of feeding one byte.
#[derive(Debug)]
pub enum FeedOutcome {
    /// Nothing externally interesting; keep feeding.
    Continue,
    /// The handshake completed without an `Upgrade` header. The caller
    /// should serve a plain HTTP response and then tear the connection
    /// down.
    HttpOnly,
    /// The handshake completed as a websocket upgrade. The caller should
    /// supply the connection-lifetime masking key (for revision 4) via
    /// [`Connection::set_masking_key`] before any frame bytes arrive.
    Established,
    /// The peer requested a close; the ack (if any) has already been sent.
    /// The caller should tear the connection down.
    Close,
}

/// The per-peer state object: owns the handshake parser, the frame
/// receiver once established, and the transport/protocol the caller
/// supplied.
pub struct Connection<T: Transport, P: Protocol> {
    transport: T,
    protocol: P,
    user: P::User,
    state: ConnState,
    handshake: HandshakeParser,
    receiver: Option<FrameReceiver>,
}

impl<T: Transport, P: Protocol> Connection<T, P> {
    pub fn new(transport: T, protocol: P, user: P::User) -> Self {
        Self {
            transport,
            protocol,
            user,
            state: ConnState::Handshaking,
            handshake: HandshakeParser::new(),
            receiver: None,
        }
    }

    #[inline]
    pub fn state(&self) -> ConnState { self.state }

    #[inline]
    pub fn revision(&self) -> Option<Revision> { self.handshake.revision() }

    /// Value of a recognized handshake token, once seen.
    pub fn token(&self, id: TokenId) -> Option<&[u8]> { self.handshake.token(id) }

    pub fn protocol_mut(&mut self) -> &mut P { &mut self.protocol }

    pub fn transport_mut(&mut self) -> &mut T { &mut self.transport }

    /// Install the connection-lifetime masking key used to derive each
    /// revision-4 frame's mask. A no-op before [`FeedOutcome::Established`]
    /// or on any other revision.
    pub fn set_masking_key(&mut self, key: [u8; FRAME_MASK_LEN]) {
        if let Some(receiver) = self.receiver.as_mut() {
            receiver.set_masking_key(key);
        }
    }

    /// Feed one byte of the inbound stream. HP and FR never run
    /// concurrently: which one consumes the byte depends on `state`.
    pub fn feed(&mut self, byte: u8) -> Result<FeedOutcome, Error> {
        match self.state {
            ConnState::Handshaking => Ok(self.feed_handshake(byte)),
            ConnState::Established => self.feed_frame(byte),
            ConnState::Closing | ConnState::Dead => Ok(FeedOutcome::Continue),
        }
    }

    fn feed_handshake(&mut self, byte: u8) -> FeedOutcome {
        self.handshake.feed(byte);
        match self.handshake.state() {
            ParserState::Complete => {
                let revision = self
                    .handshake
                    .revision()
                    .expect("revision set on entering CHALLENGE");
                self.receiver = Some(FrameReceiver::new(revision));
                self.state = ConnState::Established;
                FeedOutcome::Established
            }
            ParserState::CompleteHttpOnly => {
                self.state = ConnState::Closing;
                FeedOutcome::HttpOnly
            }
            _ => FeedOutcome::Continue,
        }
    }

    fn feed_frame(&mut self, byte: u8) -> Result<FeedOutcome, Error> {
        let receiver = self.receiver.as_mut().expect("receiver present once established");
        match receiver.feed(byte, &mut self.protocol, &mut self.user, &mut self.transport)? {
            RxOutcome::Ok => Ok(FeedOutcome::Continue),
            RxOutcome::Close => {
                self.state = ConnState::Closing;
                Ok(FeedOutcome::Close)
            }
        }
    }

    /// Drive [`Connection::feed`] over `bytes`, stopping early once the
    /// receiver reaches a gated terminal state (mirrors
    /// `libwebsocket_interpret_incoming_packet`'s loop condition) or a
    /// close is signalled.
    pub fn feed_many(&mut self, bytes: &[u8]) -> Result<FeedOutcome, Error> {
        for &b in bytes {
            if let Some(receiver) = self.receiver.as_ref() {
                if receiver.state().is_gate() {
                    break;
                }
            }
            match self.feed(b)? {
                FeedOutcome::Continue => {}
                outcome => return Ok(outcome),
            }
        }
        Ok(FeedOutcome::Continue)
    }

    /// Write a frame (or, for `FrameKind::Http`, a raw response) through
    /// the transport. `payload` must reserve standard framing padding;
    /// see [`PaddedPayload::with_standard_padding`].
    pub fn write(&mut self, kind: FrameKind, payload: PaddedPayload<'_>) -> Result<usize, crate::error::WriteError> {
        let revision = self.handshake.revision().unwrap_or(Revision::Hixie76);
        let established = matches!(self.state, ConnState::Established);
        frame::write(&mut self.transport, revision, established, kind, payload)
    }

    pub fn close(&mut self) { self.state = ConnState::Dead; }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::padding::PaddedPayload;
    use crate::protocol::test_support::{Collector, RecordingTransport};

    #[test]
    fn full_upgrade_then_legacy_frame() {
        let mut conn = Connection::new(RecordingTransport::default(), Collector::default(), ());
        let req = b"GET /chat HTTP/1.1\r\nHost: a\r\nUpgrade: WebSocket\r\n\
                     Sec-WebSocket-Key1: x\r\nSec-WebSocket-Key2: y\r\n\r\n01234567";
        let outcome = conn.feed_many(req).unwrap();
        assert!(matches!(outcome, FeedOutcome::Established));
        assert_eq!(conn.state(), ConnState::Established);
        assert_eq!(conn.revision(), Some(Revision::Hixie76));

        let outcome = conn.feed_many(b"\x00hi\xff").unwrap();
        assert!(matches!(outcome, FeedOutcome::Continue));
        assert_eq!(conn.protocol_mut().chunks, vec![b"hi".to_vec()]);
    }

    #[test]
    fn plain_http_request_yields_http_only_outcome() {
        let mut conn = Connection::new(RecordingTransport::default(), Collector::default(), ());
        let outcome = conn.feed_many(b"GET / HTTP/1.0\r\n\r\n").unwrap();
        assert!(matches!(outcome, FeedOutcome::HttpOnly));
        assert_eq!(conn.state(), ConnState::Closing);
    }

    #[test]
    fn websocket_write_before_established_is_rejected() {
        let mut conn = Connection::new(RecordingTransport::default(), Collector::default(), ());
        let mut buf = [0u8; 32];
        let payload = PaddedPayload::with_standard_padding(&mut buf).unwrap();
        let err = conn.write(FrameKind::Text, payload).unwrap_err();
        assert!(matches!(err, crate::error::WriteError::NotEstablished));
    }
}
