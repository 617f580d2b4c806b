//! User-facing dispatch surface: the callback the receiver delivers
//! payload chunks to, and the send primitive the emitter writes through.

/// Events the core can raise through [`Protocol::on_event`].
///
/// `Receive` is the only event this core emits today; the variant is
/// `#[non_exhaustive]` because the dispatch record this replaces
/// (`protocol.callback` in the source) is a general event sink, and a
/// fuller protocol implementation built on this core will want to raise
/// more (connection established, ping/pong, close).
#[non_exhaustive]
#[derive(Debug)]
pub enum Event<'d> {
    /// A chunk of frame payload is ready. For revision 76/0, this is
    /// delivered once per complete `0x00..0xFF` frame or every
    /// [`crate::config::MAX_USER_RX_BUFFER`] bytes, whichever comes first.
    /// For revision 4, there is no frame boundary to report (see
    /// `SPEC_FULL.md`); chunks are delivered purely by buffer size.
    Receive { data: &'d [u8] },
}

/// A single-operation capability interface standing in for the source's
/// `protocol.callback` function pointer.
pub trait Protocol {
    /// Opaque per-connection user context, threaded through unchanged.
    type User;

    fn on_event(&mut self, user: &mut Self::User, event: Event<'_>);
}

/// The send primitive. TCP/TLS selection and all other I/O concerns are
/// the caller's responsibility (spec.md §1); this core only needs
/// something that can accept a byte slice and report how much of it made
/// it out.
pub trait Transport {
    fn send(&mut self, buf: &[u8]) -> std::io::Result<usize>;
}
