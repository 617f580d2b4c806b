//! Frame receive and emit state machines.
//!
//! The receiver interprets inbound frame bytes one at a time across the
//! revisions this core understands; the emitter writes outbound framing
//! into caller-reserved padding around a payload. See `SPEC_FULL.md` for
//! which revision/path combinations are deliberately left gated rather
//! than fully decoded.

pub mod emitter;
pub mod mask;
pub mod receiver;

pub use emitter::{write, FrameKind};
pub use receiver::{FrameReceiver, RxOutcome, RxState};
