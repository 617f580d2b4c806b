//! Byte-at-a-time handshake request parser.
//!
//! Drives one state machine forward a single octet per [`HandshakeParser::feed`]
//! call, with no lookahead buffer of its own — bytes may arrive split at any
//! boundary and the parser always reaches the same terminal state.

use std::array;

use crate::bleed::Store;
use crate::revision::Revision;
use crate::token::{match_token, TokenBuf, TokenId, ALL_TOKENS, NAME_SCRATCH_CAP, TOKEN_COUNT};

/// Handshake parser state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Accumulating a header name. Initial state.
    NamePart,
    /// Collecting a recognized token's value.
    Token(TokenId),
    /// Discarding bytes until the next CR.
    Skipping,
    /// One byte past a CR; LF returns to `NamePart`, anything else to `Skipping`.
    SkippingSawCr,
    /// Terminal: request completed as a websocket upgrade.
    Complete,
    /// Terminal: request completed as a plain HTTP request (no `Upgrade` header).
    CompleteHttpOnly,
}

impl ParserState {
    pub fn is_terminal(self) -> bool {
        matches!(self, ParserState::Complete | ParserState::CompleteHttpOnly)
    }
}

/// Parses one connection's handshake request, one byte at a time.
pub struct HandshakeParser {
    state: ParserState,
    tokens: [TokenBuf; TOKEN_COUNT],
    seen: [bool; TOKEN_COUNT],
    name_scratch: Store<NAME_SCRATCH_CAP>,
    revision: Option<Revision>,
}

impl HandshakeParser {
    pub fn new() -> Self {
        Self {
            state: ParserState::NamePart,
            tokens: array::from_fn(|_| TokenBuf::new()),
            seen: [false; TOKEN_COUNT],
            name_scratch: Store::new(),
            revision: None,
        }
    }

    #[inline]
    pub fn state(&self) -> ParserState { self.state }

    #[inline]
    pub fn is_complete(&self) -> bool { self.state.is_terminal() }

    #[inline]
    pub fn is_upgrade(&self) -> bool { self.state == ParserState::Complete }

    /// The revision detected on entering `CHALLENGE`, if the parser has got
    /// that far. `None` before then (and for an http-only completion, which
    /// never detects a revision at all).
    #[inline]
    pub fn revision(&self) -> Option<Revision> { self.revision }

    /// Value of a recognized token, if its header was seen at all. `Some(&[])`
    /// means the header was present with an empty value; `None` means the
    /// header never appeared.
    pub fn token(&self, id: TokenId) -> Option<&[u8]> {
        self.seen[id.index()].then(|| self.tokens[id.index()].value())
    }

    /// Feed one byte. No-op once [`ParserState::is_terminal`].
    pub fn feed(&mut self, byte: u8) {
        match self.state {
            ParserState::NamePart => self.feed_name_part(byte),
            ParserState::Token(id) => self.feed_token(id, byte),
            ParserState::Skipping => {
                if byte == b'\r' {
                    self.state = ParserState::SkippingSawCr;
                }
            }
            ParserState::SkippingSawCr => {
                self.name_scratch.reset();
                self.state = if byte == b'\n' {
                    ParserState::NamePart
                } else {
                    ParserState::Skipping
                };
            }
            ParserState::Complete | ParserState::CompleteHttpOnly => {
                log::trace!("handshake: byte discarded after completion");
            }
        }
    }

    fn feed_name_part(&mut self, byte: u8) {
        if !self.name_scratch.push(byte) {
            log::debug!("handshake: header name exceeded scratch capacity, skipping");
            self.state = ParserState::Skipping;
            return;
        }
        if let Some(id) = match_token(self.name_scratch.as_slice()) {
            log::trace!("handshake: recognized token {:?}", id);
            self.name_scratch.reset();
            self.tokens[id.index()] = TokenBuf::new();
            self.seen[id.index()] = true;
            if id == TokenId::Challenge {
                self.enter_challenge();
            } else {
                self.state = ParserState::Token(id);
            }
            return;
        }
        if byte == b':' {
            log::trace!("handshake: unrecognized header, skipping");
            self.state = ParserState::Skipping;
        }
    }

    fn feed_token(&mut self, id: TokenId, byte: u8) {
        let buf = &mut self.tokens[id.index()];
        if buf.is_empty() && byte == b' ' {
            return;
        }
        if id == TokenId::GetUri && byte == b' ' {
            self.state = ParserState::Skipping;
            return;
        }
        if id != TokenId::Challenge && byte == b'\r' {
            self.state = ParserState::SkippingSawCr;
            return;
        }
        if !buf.push(byte) && buf.is_truncated() {
            log::debug!("handshake: token {:?} value truncated", id);
            self.state = ParserState::Skipping;
            return;
        }
        if id == TokenId::Challenge {
            self.check_challenge_complete();
        }
    }

    /// Reached when the table match lands on the blank-line sentinel token.
    fn enter_challenge(&mut self) {
        if !self.seen[TokenId::Upgrade.index()] {
            log::debug!("handshake: no Upgrade header, completing as plain HTTP");
            self.state = ParserState::CompleteHttpOnly;
            return;
        }
        let revision = Revision::detect(self.token(TokenId::Version));
        log::debug!("handshake: detected revision {:?}", revision);
        self.revision = Some(revision);
        if revision.needs_key3_challenge() {
            self.state = ParserState::Token(TokenId::Challenge);
        } else {
            self.state = ParserState::Complete;
        }
    }

    fn check_challenge_complete(&mut self) {
        if self.tokens[TokenId::Challenge.index()].len() >= 8 {
            self.state = ParserState::Complete;
        }
    }
}

impl Default for HandshakeParser {
    fn default() -> Self { Self::new() }
}

#[cfg(test)]
mod test {
    use super::*;

    fn feed_all(bytes: &[u8]) -> HandshakeParser {
        let mut p = HandshakeParser::new();
        for &b in bytes {
            p.feed(b);
        }
        p
    }

    #[test]
    fn websocket_upgrade_end_to_end() {
        let req = b"GET /chat HTTP/1.1\r\nHost: a\r\nUpgrade: WebSocket\r\n\
                     Sec-WebSocket-Key1: x\r\nSec-WebSocket-Key2: y\r\n\r\n01234567";
        let p = feed_all(req);
        assert_eq!(p.state(), ParserState::Complete);
        assert_eq!(p.token(TokenId::GetUri), Some(&b"/chat"[..]));
        assert_eq!(p.token(TokenId::Host), Some(&b"a"[..]));
        assert_eq!(p.token(TokenId::Upgrade), Some(&b"WebSocket"[..]));
        assert_eq!(p.token(TokenId::Key1), Some(&b"x"[..]));
        assert_eq!(p.token(TokenId::Key2), Some(&b"y"[..]));
        assert_eq!(p.token(TokenId::Challenge), Some(&b"01234567"[..]));
        assert_eq!(p.revision(), Some(Revision::Hixie76));
    }

    #[test]
    fn plain_http_completes_without_upgrade() {
        let p = feed_all(b"GET / HTTP/1.0\r\n\r\n");
        assert_eq!(p.state(), ParserState::CompleteHttpOnly);
        assert!(!p.is_upgrade());
        assert_eq!(p.revision(), None);
    }

    #[test]
    fn unknown_header_is_skipped_others_survive() {
        let req = b"GET /chat HTTP/1.1\r\nHost: a\r\nX-Unknown: foo\r\nUpgrade: WebSocket\r\n\
                     Sec-WebSocket-Key1: x\r\nSec-WebSocket-Key2: y\r\n\r\n01234567";
        let p = feed_all(req);
        assert_eq!(p.state(), ParserState::Complete);
        assert_eq!(p.token(TokenId::Host), Some(&b"a"[..]));
        assert_eq!(p.token(TokenId::Upgrade), Some(&b"WebSocket"[..]));
    }

    #[test]
    fn version_four_completes_with_zero_challenge_bytes() {
        let req = b"GET /chat HTTP/1.1\r\nUpgrade: WebSocket\r\nSec-WebSocket-Version: 13\r\n\r\n";
        let p = feed_all(req);
        assert_eq!(p.state(), ParserState::Complete);
        assert_eq!(p.revision(), Some(Revision::Four));
        assert_eq!(p.token(TokenId::Challenge), Some(&b""[..]));
    }

    #[test]
    fn byte_chunking_invariance() {
        let req: &[u8] = b"GET /chat HTTP/1.1\r\nHost: a\r\nUpgrade: WebSocket\r\n\
                     Sec-WebSocket-Key1: x\r\nSec-WebSocket-Key2: y\r\n\r\n01234567";
        let whole = feed_all(req);

        for chunk_len in 1..=7usize {
            let mut p = HandshakeParser::new();
            for chunk in req.chunks(chunk_len) {
                for &b in chunk {
                    p.feed(b);
                }
            }
            assert_eq!(p.state(), whole.state());
            for id in ALL_TOKENS {
                assert_eq!(p.token(id), whole.token(id), "token {:?} diverged at chunk_len {}", id, chunk_len);
            }
        }
    }

    #[test]
    fn oversize_header_value_is_truncated_non_fatally() {
        let mut req = Vec::new();
        req.extend_from_slice(b"GET /chat HTTP/1.1\r\nHost: ");
        req.extend(std::iter::repeat(b'x').take(2000));
        req.extend_from_slice(b"\r\nUpgrade: WebSocket\r\n\r\n");
        let p = feed_all(&req);
        assert_eq!(p.state(), ParserState::Complete);
        assert_eq!(p.token(TokenId::Host), Some(crate::config::TRUNCATION_SENTINEL));
    }
}
