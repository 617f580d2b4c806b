#![allow(missing_docs)]
//! Errors.

mod frame;
mod write;

pub use frame::FrameError;
pub use write::WriteError;

use std::fmt::{Display, Formatter};

/// Aggregate error type covering the whole crate surface.
#[derive(Debug)]
pub enum Error {
    Frame(FrameError),
    Write(WriteError),
}

impl From<FrameError> for Error {
    fn from(e: FrameError) -> Self { Error::Frame(e) }
}

impl From<WriteError> for Error {
    fn from(e: WriteError) -> Self { Error::Write(e) }
}

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        use Error::*;
        match self {
            Frame(e) => write!(f, "frame error: {}", e),
            Write(e) => write!(f, "write error: {}", e),
        }
    }
}

impl std::error::Error for Error {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        use Error::*;
        match self {
            Frame(e) => Some(e),
            Write(e) => Some(e),
        }
    }
}

impl From<Error> for std::io::Error {
    fn from(e: Error) -> Self { std::io::Error::new(std::io::ErrorKind::Other, e) }
}

impl From<FrameError> for std::io::Error {
    fn from(e: FrameError) -> Self { Error::Frame(e).into() }
}

impl From<WriteError> for std::io::Error {
    fn from(e: WriteError) -> Self { Error::Write(e).into() }
}
