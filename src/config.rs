//! Compile-time protocol limits.
//!
//! These are tuning knobs for the engine itself (buffer sizes, growth
//! steps), not runtime deployment configuration — there is nothing here to
//! load from a file or environment.

/// Hard cap on any single recognized header value. Oversize values are
/// truncated to [`TRUNCATION_SENTINEL`] rather than rejected.
pub const LWS_MAX_HEADER_LEN: usize = 1024;

/// Initial capacity reserved for a token's value buffer on first match.
pub const LWS_INITIAL_HDR_ALLOC: usize = 64;

/// Growth step applied each time a token's value buffer fills up.
pub const LWS_ADDITIONAL_HDR_ALLOC: usize = 64;

/// Bytes the caller must reserve before a websocket payload so the emitter
/// can write framing in place. Ten bytes covers the worst case (revision 3,
/// 64-bit extended length).
pub const LWS_SEND_BUFFER_PRE_PADDING: usize = 10;

/// Bytes the caller must reserve after a websocket payload (revision 76
/// text frames append a single `0xFF` trailer).
pub const LWS_SEND_BUFFER_POST_PADDING: usize = 1;

/// Chunk size at which a partial frame payload is delivered to the user
/// callback rather than held until the frame terminator arrives.
pub const MAX_USER_RX_BUFFER: usize = 4096;

/// Length of the recirculating per-frame XOR mask (and of the
/// connection-lifetime masking key it is derived from).
pub const FRAME_MASK_LEN: usize = 20;

/// Value written into a token's buffer when its incoming value exceeds
/// [`LWS_MAX_HEADER_LEN`].
pub const TRUNCATION_SENTINEL: &[u8] = b"!!! Length exceeded maximum supported !!!";
