//! Byte-at-a-time frame receiver.
//!
//! Mirrors the legacy (`Hixie76`/`Zero`) and revision-4 receive paths; the
//! `Three` path is a deliberate gate, not an omission — see `SPEC_FULL.md`.

use crate::config::{FRAME_MASK_LEN, MAX_USER_RX_BUFFER};
use crate::error::FrameError;
use crate::frame::mask::{derive_frame_mask, MaskCursor};
use crate::protocol::{Event, Protocol, Transport};
use crate::revision::Revision;

/// Frame receiver state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RxState {
    /// Waiting for the start of a new frame.
    New,
    /// Legacy framing: accumulating payload bytes until `0xFF`.
    EatUntilFf,
    /// Legacy framing: one byte after a standalone `0xFF` outside a frame —
    /// a client close request if the next byte is `0x00`.
    Seen76Ff,
    /// Revision 4: nonce bytes 1-3 still to come.
    Nonce1,
    Nonce2,
    Nonce3,
    /// Revision 4: unmasking payload bytes with the derived frame mask.
    FrameHdr1,
    /// Reserved terminal gate: revision-3 length framing was never
    /// completed upstream. The outer driver stops feeding bytes once here.
    PullingLength76,
    /// Reserved terminal gate, reached once a revision-3/76 length-framed
    /// payload has been fully consumed by a (never-implemented) decoder.
    PayloadUntilLengthExhausted,
}

impl RxState {
    /// Whether the outer driver should stop feeding bytes (§4.2 driver
    /// loop condition).
    pub fn is_gate(self) -> bool {
        matches!(self, RxState::PayloadUntilLengthExhausted)
    }
}

/// Outcome of feeding one byte to the receiver.
pub enum RxOutcome {
    /// Byte consumed, connection stays open.
    Ok,
    /// The peer requested a close (revision-76 `0xFF 0x00`); the ack has
    /// already been written to the transport.
    Close,
}

/// Drives the frame receive state machine for one connection.
pub struct FrameReceiver {
    state: RxState,
    revision: Revision,
    rx_buf: Vec<u8>,
    nonce: [u8; 4],
    masking_key: [u8; FRAME_MASK_LEN],
    mask: Option<MaskCursor>,
}

impl FrameReceiver {
    pub fn new(revision: Revision) -> Self {
        let state = match revision {
            Revision::Hixie76 | Revision::Zero => RxState::New,
            Revision::Four => RxState::New,
            Revision::Three => RxState::PullingLength76,
        };
        Self {
            state,
            revision,
            rx_buf: Vec::with_capacity(MAX_USER_RX_BUFFER),
            nonce: [0; 4],
            masking_key: [0; FRAME_MASK_LEN],
            mask: None,
        }
    }

    #[inline]
    pub fn state(&self) -> RxState { self.state }

    /// Feed one byte, delivering any completed payload chunk through
    /// `protocol.on_event` and writing a close ack through `transport` if
    /// the revision-76 close sentinel is observed.
    pub fn feed<P: Protocol, T: Transport>(
        &mut self,
        byte: u8,
        protocol: &mut P,
        user: &mut P::User,
        transport: &mut T,
    ) -> Result<RxOutcome, FrameError> {
        match self.state {
            RxState::New => self.feed_new(byte),
            RxState::EatUntilFf => self.feed_eat_until_ff(byte, protocol, user),
            RxState::Seen76Ff => return self.feed_seen_76_ff(byte, transport),
            RxState::Nonce1 => {
                self.nonce[1] = byte;
                self.state = RxState::Nonce2;
            }
            RxState::Nonce2 => {
                self.nonce[2] = byte;
                self.state = RxState::Nonce3;
            }
            RxState::Nonce3 => {
                self.nonce[3] = byte;
                self.complete_nonce();
            }
            RxState::FrameHdr1 => self.feed_frame_hdr1(byte, protocol, user),
            RxState::PullingLength76 | RxState::PayloadUntilLengthExhausted => {
                log::trace!("rx: byte discarded in gated state {:?}", self.state);
            }
        }
        Ok(RxOutcome::Ok)
    }

    fn feed_new(&mut self, byte: u8) {
        match self.revision {
            Revision::Hixie76 | Revision::Zero => {
                if byte == 0x00 {
                    self.rx_buf.clear();
                    self.state = RxState::EatUntilFf;
                } else if byte == 0xFF {
                    self.state = RxState::Seen76Ff;
                }
            }
            Revision::Four => {
                self.nonce[0] = byte;
                self.state = RxState::Nonce1;
            }
            Revision::Three => {}
        }
    }

    fn feed_eat_until_ff<P: Protocol>(&mut self, byte: u8, protocol: &mut P, user: &mut P::User) {
        if byte == 0xFF {
            self.deliver(protocol, user);
            self.state = RxState::New;
            return;
        }
        self.rx_buf.push(byte);
        if self.rx_buf.len() == MAX_USER_RX_BUFFER {
            self.deliver(protocol, user);
        }
    }

    fn feed_seen_76_ff<T: Transport>(&mut self, byte: u8, transport: &mut T) -> Result<RxOutcome, FrameError> {
        if byte != 0x00 {
            return Ok(RxOutcome::Ok);
        }
        log::debug!("rx: client requested revision-76 close, sending ack");
        transport
            .send(&[0xFF, 0x00])
            .map_err(FrameError::CloseAckFailed)?;
        Ok(RxOutcome::Close)
    }

    fn complete_nonce(&mut self) {
        let frame_mask = derive_frame_mask(self.nonce, &self.masking_key);
        self.mask = Some(MaskCursor::new(frame_mask));
        self.state = RxState::FrameHdr1;
    }

    fn feed_frame_hdr1<P: Protocol>(&mut self, byte: u8, protocol: &mut P, user: &mut P::User) {
        let cursor = self.mask.as_mut().expect("mask derived before FrameHdr1");
        let unmasked = cursor.unmask(byte);
        self.rx_buf.push(unmasked);
        if self.rx_buf.len() == MAX_USER_RX_BUFFER {
            self.deliver(protocol, user);
        }
    }

    fn deliver<P: Protocol>(&mut self, protocol: &mut P, user: &mut P::User) {
        protocol.on_event(user, Event::Receive { data: &self.rx_buf });
        self.rx_buf.clear();
    }

    /// Install the connection-lifetime masking key used to derive each
    /// frame's mask (revision 4 only).
    pub(crate) fn set_masking_key(&mut self, key: [u8; FRAME_MASK_LEN]) {
        self.masking_key = key;
    }
}
