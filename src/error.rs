//! Error types for the driver
//!
//! Encoding never fails: numeric parameters are masked and option values are
//! closed enums. The only runtime failure is the byte sink itself, which
//! [`Error`] wraps.
//!
//! ## Error Types
//!
//! - [`Error`] - Failure while emitting a command or data byte
//! - [`InterfaceError`](crate::interface::InterfaceError) - Low-level SPI/GPIO errors
//!
//! When the sink fails on the first byte of a double-byte command, the second
//! byte is not sent. The controller is then waiting for a data byte; recover by
//! resending the whole command, or by re-addressing with page and column.

use crate::interface::DisplayInterface;

/// Errors that can occur when interacting with the display
///
/// Generic over the interface type to preserve the specific error type.
/// This allows error handling code to match on the underlying hardware error.
pub enum Error<I: DisplayInterface> {
    /// Interface error
    ///
    /// Wraps the underlying error from the [`DisplayInterface`] implementation.
    Interface(I::Error),
}

impl<I: DisplayInterface> Error<I> {
    /// Unwrap the interface error
    pub fn into_inner(self) -> I::Error {
        match self {
            Self::Interface(e) => e,
        }
    }
}

impl<I: DisplayInterface> core::fmt::Debug for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => f.debug_tuple("Interface").field(e).finish(),
        }
    }
}

impl<I: DisplayInterface> core::fmt::Display for Error<I> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Interface(e) => write!(f, "Interface error: {e:?}"),
        }
    }
}

impl<I: DisplayInterface> core::error::Error for Error<I> {}
