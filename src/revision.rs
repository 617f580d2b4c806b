//! Historic WebSocket draft revisions this core can speak.
//!
//! See `SPEC_FULL.md` ("Revision detection") for how a [`Revision`] is
//! derived from the tokens the handshake parser collects, and for which
//! gaps in the receive/emit wire formats are deliberate (mirroring gaps
//! in the original source) rather than omissions.

/// A detected protocol revision, fixed for the lifetime of a connection
/// once the handshake completes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Revision {
    /// No `Sec-WebSocket-Version` header at all — the original hixie-76
    /// draft. Uses `Key1`/`Key2` plus an 8-byte challenge (key3), and
    /// `0x00`-led / `0xFF`-terminated frames with no masking.
    Hixie76,
    /// `Sec-WebSocket-Version: 0`. Shares hixie-76's receive framing but
    /// uses a 9-byte long-length header on emit.
    Zero,
    /// `Sec-WebSocket-Version: 1..=3`. Opcode + length-prefixed emit
    /// framing; receive framing was never completed upstream (see
    /// `SPEC_FULL.md`) and is preserved here as a gated, driver-halting
    /// state.
    Three,
    /// `Sec-WebSocket-Version: 4` or higher. Per-frame nonce + SHA-1 mask
    /// derivation on receive; no emit wire format is defined.
    Four,
}

impl Revision {
    /// `VERSION` token absent, or present and parsed per the rules in
    /// `SPEC_FULL.md`.
    pub(crate) fn detect(version_token: Option<&[u8]>) -> Self {
        let Some(raw) = version_token else {
            return Revision::Hixie76;
        };
        match parse_leading_u32(raw) {
            0 => Revision::Zero,
            1..=3 => Revision::Three,
            _ => Revision::Four,
        }
    }

    /// Whether CHALLENGE completion requires exactly 8 bytes (the
    /// hixie-era key3), as opposed to zero additional bytes.
    pub(crate) fn needs_key3_challenge(self) -> bool {
        matches!(self, Revision::Hixie76 | Revision::Zero | Revision::Three)
    }
}

/// `atoi`-style parse: read a run of leading ASCII digits, ignore
/// anything after the first non-digit, default to `0` if there are none.
fn parse_leading_u32(bytes: &[u8]) -> u32 {
    let mut n: u32 = 0;
    let mut seen = false;
    for &b in bytes {
        if !b.is_ascii_digit() {
            break;
        }
        seen = true;
        n = n.saturating_mul(10).saturating_add((b - b'0') as u32);
    }
    if seen {
        n
    } else {
        0
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn detect_from_version() {
        assert_eq!(Revision::detect(None), Revision::Hixie76);
        assert_eq!(Revision::detect(Some(b"0")), Revision::Zero);
        assert_eq!(Revision::detect(Some(b"1")), Revision::Three);
        assert_eq!(Revision::detect(Some(b"3")), Revision::Three);
        assert_eq!(Revision::detect(Some(b"4")), Revision::Four);
        assert_eq!(Revision::detect(Some(b"13")), Revision::Four);
        assert_eq!(Revision::detect(Some(b"13 foo")), Revision::Four);
    }

    #[test]
    fn key3_gating() {
        assert!(Revision::Hixie76.needs_key3_challenge());
        assert!(Revision::Zero.needs_key3_challenge());
        assert!(Revision::Three.needs_key3_challenge());
        assert!(!Revision::Four.needs_key3_challenge());
    }
}
