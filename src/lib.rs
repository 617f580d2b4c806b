//! Byte-oriented websocket handshake and framing core.
//!
//! This crate implements the server-side state machines that parse an
//! inbound HTTP Upgrade request one octet at a time, interpret inbound
//! websocket frames across several historic protocol revisions, and
//! synthesize outbound frames by writing framing bytes directly into
//! caller-reserved padding around a payload.
//!
//! TCP/TLS I/O, the dispatch/event loop, and handshake *response*
//! generation (the `Sec-WebSocket-Accept` computation and friends) are
//! deliberately out of scope — see [`protocol::Transport`] for the single
//! point of contact with the outside world this crate needs.
//!
//! ## Example
//!
//! ```no_run
//! use wscore::connection::{Connection, FeedOutcome};
//! use wscore::protocol::{Event, Protocol, Transport};
//!
//! struct EchoProtocol;
//! impl Protocol for EchoProtocol {
//!     type User = ();
//!     fn on_event(&mut self, _user: &mut (), event: Event<'_>) {
//!         match event {
//!             Event::Receive { data } => println!("{} bytes", data.len()),
//!         }
//!     }
//! }
//!
//! struct TcpTransport;
//! impl Transport for TcpTransport {
//!     fn send(&mut self, buf: &[u8]) -> std::io::Result<usize> {
//!         Ok(buf.len())
//!     }
//! }
//!
//! let mut conn = Connection::new(TcpTransport, EchoProtocol, ());
//! match conn.feed_many(b"GET /chat HTTP/1.1\r\n\r\n").unwrap() {
//!     FeedOutcome::HttpOnly => { /* serve a plain HTTP response */ }
//!     _ => {}
//! }
//! ```

pub mod config;
pub mod connection;
pub mod error;
pub mod frame;
pub mod handshake;
pub mod padding;
pub mod protocol;
pub mod revision;
pub mod token;

mod bleed;

pub use connection::Connection;
pub use error::Error;
pub use revision::Revision;
