//! Revision-4 per-frame mask derivation and the recirculating XOR cipher.
//!
//! Every frame carries a fresh 4-byte nonce; the mask used to unmask that
//! frame's payload is `SHA1(nonce || connection masking key)`. The resulting
//! 20-byte digest recirculates as the XOR key for as many payload bytes as
//! the frame holds.

use sha1::{Digest, Sha1};

use crate::config::FRAME_MASK_LEN;

/// Derive a frame's 20-byte recirculating mask from its 4-byte nonce and the
/// connection's 20-byte masking key.
pub fn derive_frame_mask(nonce: [u8; 4], masking_key: &[u8; FRAME_MASK_LEN]) -> [u8; FRAME_MASK_LEN] {
    let mut sha1 = Sha1::default();
    sha1.update(nonce);
    sha1.update(masking_key);
    let digest = sha1.finalize();
    let mut out = [0u8; FRAME_MASK_LEN];
    out.copy_from_slice(&digest);
    out
}

/// A cursor over a 20-byte recirculating XOR key, unmasking bytes one at a
/// time and wrapping back to index 0 every 20 bytes.
#[derive(Debug, Clone, Copy)]
pub struct MaskCursor {
    key: [u8; FRAME_MASK_LEN],
    index: usize,
}

impl MaskCursor {
    pub fn new(key: [u8; FRAME_MASK_LEN]) -> Self {
        Self { key, index: 0 }
    }

    #[inline]
    pub fn index(&self) -> usize { self.index }

    /// Unmask one byte and advance the cursor, wrapping at 20.
    #[inline]
    pub fn unmask(&mut self, byte: u8) -> u8 {
        let out = byte ^ self.key[self.index];
        self.index += 1;
        if self.index == FRAME_MASK_LEN {
            self.index = 0;
        }
        out
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn mask_round_trip_is_self_inverse() {
        let key: [u8; FRAME_MASK_LEN] = std::array::from_fn(|i| i as u8);
        let payload: Vec<u8> = (0..77u8).collect();

        let mut cursor = MaskCursor::new(key);
        let masked: Vec<u8> = payload.iter().map(|&b| cursor.unmask(b)).collect();

        let mut cursor = MaskCursor::new(key);
        let restored: Vec<u8> = masked.iter().map(|&b| cursor.unmask(b)).collect();

        assert_eq!(restored, payload);
    }

    #[test]
    fn cursor_wraps_at_twenty() {
        let key: [u8; FRAME_MASK_LEN] = std::array::from_fn(|i| i as u8);
        let mut cursor = MaskCursor::new(key);
        for _ in 0..FRAME_MASK_LEN {
            cursor.unmask(0);
        }
        assert_eq!(cursor.index(), 0);
    }

    #[test]
    fn derivation_matches_sha1_of_nonce_and_key() {
        let nonce = [0x00, 0x01, 0x02, 0x03];
        let key = [0x42u8; FRAME_MASK_LEN];

        let mut sha1 = Sha1::default();
        sha1.update(nonce);
        sha1.update(key);
        let expected = sha1.finalize();

        assert_eq!(&derive_frame_mask(nonce, &key)[..], &expected[..]);
    }
}
